#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure arbitration system deciding which terrain layer owns each quadrant.
//!
//! Every terrain layer registers a [`SeamSelector`]: one predicate recognising
//! the layer's own terrain and one recognising terrain that may border it
//! without a seam. For each quadrant the selectors are scored against the
//! cell and its three inward neighbours; the best scoring selector owns the
//! quadrant and its compatibility predicate drives the [`neighbor_mask`].

mod mask;

use std::fmt;

use thiserror::Error;
use tileseam_core::{LayerName, TileRefError};

pub use mask::neighbor_mask;

/// Predicate evaluated against a terrain value.
pub type TerrainPredicate<T> = Box<dyn Fn(&T) -> bool>;

/// Reasons a selector or selector set could not be built.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The layer name cannot be used inside tile keys.
    #[error("invalid layer name: {0}")]
    InvalidLayer(#[from] TileRefError),
    /// Two selectors registered the same layer.
    #[error("layer `{0}` is registered twice")]
    DuplicateLayer(LayerName),
}

/// Terrain layer together with the predicates that describe its seams.
pub struct SeamSelector<T> {
    layer: LayerName,
    matches: TerrainPredicate<T>,
    compatible: TerrainPredicate<T>,
}

impl<T> SeamSelector<T> {
    /// Creates a selector from its two predicates.
    ///
    /// `matches` recognises the layer's own terrain. `compatible` recognises
    /// neighbours that need no seam against it, which normally includes the
    /// layer's own terrain.
    pub fn new<M, C>(layer: &str, matches: M, compatible: C) -> Result<Self, SelectorError>
    where
        M: Fn(&T) -> bool + 'static,
        C: Fn(&T) -> bool + 'static,
    {
        Ok(Self {
            layer: LayerName::new(layer)?,
            matches: Box::new(matches),
            compatible: Box::new(compatible),
        })
    }

    /// Layer owning the quadrants this selector wins.
    #[must_use]
    pub fn layer(&self) -> &LayerName {
        &self.layer
    }

    /// Returns `true` when `value` is this layer's terrain.
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        (self.matches)(value)
    }

    /// Returns `true` when `value` may border this layer without a seam.
    #[must_use]
    pub fn is_compatible(&self, value: &T) -> bool {
        (self.compatible)(value)
    }

    /// Scores how strongly this layer is represented around `base`.
    ///
    /// Zero when the selector does not match `base`; otherwise one plus the
    /// number of neighbours that match or are compatible.
    #[must_use]
    pub fn score(&self, base: &T, neighbors: &[&T]) -> u32 {
        if !self.matches(base) {
            return 0;
        }
        let agreeing = neighbors
            .iter()
            .filter(|neighbor| self.matches(neighbor) || self.is_compatible(neighbor))
            .count();
        1 + agreeing as u32
    }
}

impl<T: PartialEq + 'static> SeamSelector<T> {
    /// Selector for a single terrain value that is only compatible with
    /// itself.
    pub fn for_terrain(layer: &str, terrain: T) -> Result<Self, SelectorError>
    where
        T: Clone,
    {
        let own = terrain.clone();
        Self::new(layer, move |value| *value == own, move |value| *value == terrain)
    }

    /// Declares additional terrain values as visually indistinguishable from
    /// this layer, so no seam is drawn against them.
    #[must_use]
    pub fn with_compatible(mut self, others: impl IntoIterator<Item = T>) -> Self {
        let others: Vec<T> = others.into_iter().collect();
        let previous = self.compatible;
        self.compatible = Box::new(move |value: &T| previous(value) || others.contains(value));
        self
    }
}

impl<T> fmt::Debug for SeamSelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeamSelector")
            .field("layer", &self.layer)
            .finish_non_exhaustive()
    }
}

/// Scores `selector` against `base` and its neighbours.
#[must_use]
pub fn score<T>(selector: &SeamSelector<T>, base: &T, neighbors: &[&T]) -> u32 {
    selector.score(base, neighbors)
}

/// Picks the selector with the strictly highest score.
///
/// Earlier selectors win ties. Returns `None` when no selector matches `base`,
/// meaning the quadrant is left without a tile.
#[must_use]
pub fn pick<'s, T>(
    selectors: &'s [SeamSelector<T>],
    base: &T,
    neighbors: &[&T],
) -> Option<&'s SeamSelector<T>> {
    let mut best = None;
    let mut best_score = 0;
    for selector in selectors {
        let score = selector.score(base, neighbors);
        if score > best_score {
            best = Some(selector);
            best_score = score;
        }
    }
    best
}

/// Ordered collection of selectors with unique layer names.
///
/// Registration order is the arbitration tie-break.
pub struct SelectorSet<T> {
    selectors: Vec<SeamSelector<T>>,
}

impl<T> SelectorSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            selectors: Vec::new(),
        }
    }

    /// Builds a set from selectors in registration order.
    pub fn from_selectors(
        selectors: impl IntoIterator<Item = SeamSelector<T>>,
    ) -> Result<Self, SelectorError> {
        let mut set = Self::new();
        for selector in selectors {
            set.push(selector)?;
        }
        Ok(set)
    }

    /// Registers a selector after all existing ones.
    pub fn push(&mut self, selector: SeamSelector<T>) -> Result<(), SelectorError> {
        if self.get(selector.layer().as_str()).is_some() {
            return Err(SelectorError::DuplicateLayer(selector.layer.clone()));
        }
        self.selectors.push(selector);
        Ok(())
    }

    /// Number of registered selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Returns `true` when no selector is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Selectors in registration order.
    #[must_use]
    pub fn as_slice(&self) -> &[SeamSelector<T>] {
        &self.selectors
    }

    /// Iterates selectors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SeamSelector<T>> {
        self.selectors.iter()
    }

    /// Selector registered for `layer`.
    #[must_use]
    pub fn get(&self, layer: &str) -> Option<&SeamSelector<T>> {
        self.selectors
            .iter()
            .find(|selector| selector.layer().as_str() == layer)
    }

    /// Most recently registered selector.
    #[must_use]
    pub fn last(&self) -> Option<&SeamSelector<T>> {
        self.selectors.last()
    }

    /// Picks the owning selector for `base`; see [`pick`].
    #[must_use]
    pub fn pick(&self, base: &T, neighbors: &[&T]) -> Option<&SeamSelector<T>> {
        pick(&self.selectors, base, neighbors)
    }
}

impl<T> Default for SelectorSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SelectorSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.selectors.iter()).finish()
    }
}
