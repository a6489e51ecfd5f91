#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Variant catalog mapping tile variant names to sprite sheet coordinates.
//!
//! The catalog is static data supplied by the caller. The engine consults it
//! when completing a placement with a sprite index, and renderers use it to
//! turn a decoded tile key back into a sheet coordinate.

mod manifest;

use std::{collections::BTreeMap, io, path::PathBuf};

use rand::Rng;
use thiserror::Error;
use tileseam_core::{LayerName, SpriteCoord, TileName, TileRef, TileRefError, VariantName};

pub use manifest::SUPPORTED_MANIFEST_VERSION;

/// Reasons a catalog could not be built or loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The manifest file could not be read.
    #[error("failed to read catalog manifest at {}", .path.display())]
    Io {
        /// Location of the manifest.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The manifest was not valid TOML or did not match the expected shape.
    #[error("failed to parse catalog manifest: {0}")]
    Parse(#[from] toml::de::Error),
    /// The manifest declared a version this crate does not understand.
    #[error("unsupported catalog manifest version {found}; expected {expected}")]
    UnsupportedVersion {
        /// Version found in the manifest.
        found: u32,
        /// Version this crate reads.
        expected: u32,
    },
    /// A variant listed no sprite coordinates.
    #[error("variant `{0}` lists no sprite coordinates")]
    EmptyVariant(VariantName),
    /// A variant or layer name cannot be used inside tile keys.
    #[error("invalid name in catalog: {0}")]
    InvalidName(#[from] TileRefError),
}

/// Sprite coordinates registered for every known variant name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariantCatalog {
    variants: BTreeMap<VariantName, Vec<SpriteCoord>>,
    default_layer: Option<LayerName>,
}

impl VariantCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog listing each of `names` once, laid out along the first row of
    /// the sheet.
    #[must_use]
    pub fn single_row(names: impl IntoIterator<Item = VariantName>) -> Self {
        let variants = names
            .into_iter()
            .zip(0..)
            .map(|(name, column)| (name, vec![SpriteCoord::new(column, 0)]))
            .collect();
        Self {
            variants,
            default_layer: None,
        }
    }

    /// Registers the sprite coordinates of `name`, replacing earlier ones.
    pub fn insert(
        &mut self,
        name: VariantName,
        coords: Vec<SpriteCoord>,
    ) -> Result<Option<Vec<SpriteCoord>>, CatalogError> {
        if coords.is_empty() {
            return Err(CatalogError::EmptyVariant(name));
        }
        Ok(self.variants.insert(name, coords))
    }

    /// Baseline layer declared by the catalog, if any.
    #[must_use]
    pub fn default_layer(&self) -> Option<&LayerName> {
        self.default_layer.as_ref()
    }

    /// Declares the baseline layer used when corner resolution finds no
    /// majority.
    pub fn set_default_layer(&mut self, layer: Option<LayerName>) {
        self.default_layer = layer;
    }

    /// Sprite coordinates registered for `name`.
    #[must_use]
    pub fn variants(&self, name: &str) -> Option<&[SpriteCoord]> {
        self.variants.get(name).map(Vec::as_slice)
    }

    /// Iterates variant names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &VariantName> {
        self.variants.keys()
    }

    /// Number of registered variant names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Returns `true` when no variant is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Chooses a sprite index for `name`.
    ///
    /// Draws uniformly from `rng` only when several sprites are registered;
    /// unknown names and single-sprite variants resolve to 0 without a draw.
    pub fn pick_index<R: Rng + ?Sized>(&self, name: &VariantName, rng: &mut R) -> u32 {
        let count = self
            .variants
            .get(name)
            .map_or(0, |coords| u32::try_from(coords.len()).unwrap_or(u32::MAX));
        if count > 1 {
            rng.gen_range(0..count)
        } else {
            0
        }
    }

    /// Completes `name` with `index`, or with a picked index when none is
    /// given.
    pub fn encode<R: Rng + ?Sized>(&self, name: TileName, index: Option<u32>, rng: &mut R) -> TileRef {
        let index = match index {
            Some(index) => index,
            None => self.pick_index(name.variant(), rng),
        };
        name.with_index(index)
    }

    /// Sheet coordinate a decoded tile refers to.
    #[must_use]
    pub fn sprite(&self, tile: &TileRef) -> Option<SpriteCoord> {
        let index = usize::try_from(tile.index()).ok()?;
        self.variants.get(tile.variant())?.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogError, VariantCatalog};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tileseam_core::{LayerName, SpriteCoord, TileName, TileRef, VariantName};

    fn catalog() -> VariantCatalog {
        let mut catalog = VariantCatalog::new();
        let _ = catalog
            .insert(
                VariantName::from_static("m"),
                vec![
                    SpriteCoord::new(0, 0),
                    SpriteCoord::new(1, 0),
                    SpriteCoord::new(2, 0),
                ],
            )
            .expect("non-empty coordinates");
        let _ = catalog
            .insert(VariantName::from_static("ttl"), vec![SpriteCoord::new(0, 1)])
            .expect("non-empty coordinates");
        catalog
    }

    fn name(variant: &'static str) -> TileName {
        TileName::new(
            LayerName::new("ground").expect("valid layer"),
            VariantName::from_static(variant),
        )
    }

    #[test]
    fn single_sprite_and_unknown_variants_use_index_zero() {
        let catalog = catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..16 {
            assert_eq!(catalog.pick_index(&VariantName::from_static("ttl"), &mut rng), 0);
            assert_eq!(catalog.pick_index(&VariantName::from_static("btrc"), &mut rng), 0);
        }
    }

    #[test]
    fn several_sprites_are_all_reachable() {
        let catalog = catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let index = catalog.pick_index(&VariantName::from_static("m"), &mut rng);
            seen[index as usize] = true;
        }
        assert_eq!(seen, [true; 3], "uniform picks should reach every sprite");
    }

    #[test]
    fn seeded_picks_are_reproducible() {
        let catalog = catalog();
        let draw = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..32)
                .map(|_| catalog.pick_index(&VariantName::from_static("m"), &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(11), draw(11));
    }

    #[test]
    fn explicit_indices_are_kept_verbatim() {
        let catalog = catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tile = catalog.encode(name("m"), Some(9), &mut rng);
        assert_eq!(tile.key(), "ground_m_9");
        assert_eq!(catalog.sprite(&tile), None, "index 9 is not registered");
    }

    #[test]
    fn sprite_resolves_decoded_keys() {
        let catalog = catalog();
        let tile = TileRef::decode("wall_m_2").expect("valid key");
        assert_eq!(catalog.sprite(&tile), Some(SpriteCoord::new(2, 0)));
        let unknown = TileRef::decode("wall_ltb_0").expect("valid key");
        assert_eq!(catalog.sprite(&unknown), None);
    }

    #[test]
    fn empty_coordinate_lists_are_rejected() {
        let mut catalog = VariantCatalog::new();
        let result = catalog.insert(VariantName::from_static("m"), Vec::new());
        assert!(matches!(result, Err(CatalogError::EmptyVariant(name)) if name.as_str() == "m"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn single_row_layout_assigns_one_column_per_name() {
        let catalog = VariantCatalog::single_row(
            ["m", "t", "ttl"].into_iter().map(VariantName::from_static),
        );
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.variants("ttl"), Some(&[SpriteCoord::new(2, 0)][..]));
    }
}
