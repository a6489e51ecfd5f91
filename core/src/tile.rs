use std::{
    borrow::{Borrow, Cow},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between the fields of an encoded tile key.
const KEY_SEPARATOR: char = '_';

/// Prefix marking variants drawn over the base quadrant tiles.
const OVERLAY_PREFIX: &str = "o";

/// Errors raised while validating tile key fields or parsing keys.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TileRefError {
    /// A layer or variant name was empty or contained `_` or whitespace.
    #[error("`{0}` is not a valid tile field; fields must be non-empty and free of `_` and whitespace")]
    InvalidField(String),
    /// The key did not split into exactly three fields.
    #[error("tile keys have 3 fields separated by `_`, found {0}")]
    FieldCount(usize),
    /// The index field was not a non-negative integer.
    #[error("tile index `{0}` is not a non-negative integer")]
    InvalidIndex(String),
}

const fn is_valid_field(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut index = 0;
    while index < bytes.len() {
        let byte = bytes[index];
        if byte == b'_' || byte.is_ascii_whitespace() {
            return false;
        }
        index += 1;
    }
    true
}

fn validated(value: String) -> Result<String, TileRefError> {
    if is_valid_field(&value) {
        Ok(value)
    } else {
        Err(TileRefError::InvalidField(value))
    }
}

/// Name of a terrain layer, as registered by its seam selector.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LayerName(String);

impl LayerName {
    /// Validates and wraps a layer name.
    pub fn new(name: impl Into<String>) -> Result<Self, TileRefError> {
        validated(name.into()).map(Self)
    }

    /// Borrowed form of the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LayerName {
    type Error = TileRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LayerName> for String {
    fn from(value: LayerName) -> Self {
        value.0
    }
}

impl Borrow<str> for LayerName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semantic name of a tile variant such as `m`, `ttl` or `btrc`.
///
/// Names describe a seam by the sides it runs between: `ttl` runs from the top
/// to the left edge, `t` is a straight top edge and `m` is the fully interior
/// tile. An optional `o` prefix marks overlay fillers. Suffix letters
/// (`s`, `e`, `c`, ...) distinguish start, end and corner pieces.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariantName(Cow<'static, str>);

impl VariantName {
    /// Wraps a static variant name.
    ///
    /// # Panics
    ///
    /// Panics when `name` is empty or contains `_` or whitespace; in const
    /// contexts this is a compile error.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        assert!(is_valid_field(name), "invalid static variant name");
        Self(Cow::Borrowed(name))
    }

    /// Validates and wraps a variant name.
    pub fn new(name: impl Into<String>) -> Result<Self, TileRefError> {
        validated(name.into()).map(|name| Self(Cow::Owned(name)))
    }

    /// Borrowed form of the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the same piece turned a quarter turn clockwise.
    ///
    /// Side letters rotate `t -> r -> b -> l -> t`; the `t` joining two sides,
    /// the overlay prefix and any suffix are kept.
    #[must_use]
    pub fn rotate_cw(&self) -> Self {
        let (prefix, body) = match self.0.strip_prefix(OVERLAY_PREFIX) {
            Some(rest) if !rest.is_empty() => (OVERLAY_PREFIX, rest),
            _ => ("", &*self.0),
        };
        let side_positions: &[usize] = if body.len() >= 3 { &[0, 2] } else { &[0] };
        let mut rotated = String::with_capacity(self.0.len());
        rotated.push_str(prefix);
        for (position, letter) in body.chars().enumerate() {
            if side_positions.contains(&position) {
                rotated.push(rotate_side(letter));
            } else {
                rotated.push(letter);
            }
        }
        Self(Cow::Owned(rotated))
    }
}

fn rotate_side(letter: char) -> char {
    match letter {
        't' => 'r',
        'r' => 'b',
        'b' => 'l',
        'l' => 't',
        other => other,
    }
}

impl TryFrom<String> for VariantName {
    type Error = TileRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VariantName> for String {
    fn from(value: VariantName) -> Self {
        value.0.into_owned()
    }
}

impl Borrow<str> for VariantName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A layer and variant chosen for an overlay cell, before a sprite index is
/// assigned.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileName {
    layer: LayerName,
    variant: VariantName,
}

impl TileName {
    /// Pairs a layer with one of its variants.
    #[must_use]
    pub const fn new(layer: LayerName, variant: VariantName) -> Self {
        Self { layer, variant }
    }

    /// Owning layer.
    #[must_use]
    pub const fn layer(&self) -> &LayerName {
        &self.layer
    }

    /// Variant drawn for the cell.
    #[must_use]
    pub const fn variant(&self) -> &VariantName {
        &self.variant
    }

    /// Completes the name with a sprite index.
    #[must_use]
    pub fn with_index(self, index: u32) -> TileRef {
        TileRef {
            layer: self.layer,
            variant: self.variant,
            index,
        }
    }
}

/// Fully resolved overlay tile: layer, variant and sprite index.
///
/// The canonical string form is `"{layer}_{variant}_{index}"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    layer: LayerName,
    variant: VariantName,
    index: u32,
}

impl TileRef {
    /// Validates and assembles a tile reference.
    pub fn new(layer: &str, variant: &str, index: u32) -> Result<Self, TileRefError> {
        Ok(Self {
            layer: LayerName::new(layer)?,
            variant: VariantName::new(variant)?,
            index,
        })
    }

    /// Owning layer.
    #[must_use]
    pub const fn layer(&self) -> &LayerName {
        &self.layer
    }

    /// Variant drawn for the cell.
    #[must_use]
    pub const fn variant(&self) -> &VariantName {
        &self.variant
    }

    /// Index of the sprite among the variant's catalog entries.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Encodes the reference into its canonical key.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Decodes a key, returning `None` for empty or malformed input.
    #[must_use]
    pub fn decode(key: &str) -> Option<Self> {
        key.parse().ok()
    }

    /// Drops the sprite index.
    #[must_use]
    pub fn into_name(self) -> TileName {
        TileName::new(self.layer, self.variant)
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            self.layer, self.variant, self.index
        )
    }
}

impl FromStr for TileRef {
    type Err = TileRefError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = key.split(KEY_SEPARATOR).collect();
        let [layer, variant, index] = fields.as_slice() else {
            return Err(TileRefError::FieldCount(fields.len()));
        };
        let invalid = || TileRefError::InvalidIndex((*index).to_owned());
        if !index.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }
        let index = index.parse::<u32>().map_err(|_| invalid())?;
        Self::new(layer, variant, index)
    }
}

/// Location of a sprite on a sheet, in whole tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteCoord {
    column: u32,
    row: u32,
}

impl SpriteCoord {
    /// Creates a sprite coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Sheet column of the sprite.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Sheet row of the sprite.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl From<[u32; 2]> for SpriteCoord {
    fn from([column, row]: [u32; 2]) -> Self {
        Self::new(column, row)
    }
}
