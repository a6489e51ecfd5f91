#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Overlay generation pipeline tying the seam passes together.
//!
//! A terrain grid flows through selector arbitration and quadrant resolution
//! into a double-resolution placement grid, has its open corners settled,
//! and finally receives sprite indices from the variant catalog. Generation
//! is a pure function of its inputs and the draws taken from the caller's
//! random number generator. A separate foreground pass draws one solid
//! layer, such as walls, over the floor overlay.

mod stats;

use std::collections::BTreeSet;

use rand::Rng;
use tileseam_catalog::VariantCatalog;
use tileseam_core::{Grid, LayerName, OverlayGrid, PlacementGrid, VariantName};
use tileseam_system_corners::{CornerResolver, CornerSummary};
use tileseam_system_foreground::ForegroundResolver;
use tileseam_system_quadrants::QuadrantResolver;
use tileseam_system_selection::SelectorSet;
use tracing::{debug, info};

pub use stats::OverlayStats;

/// Settings applied to every generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayConfig {
    /// Layer whose filler settles corners without a majority.
    ///
    /// When unset the catalog's declared default is used, then the last
    /// registered selector.
    pub default_layer: Option<LayerName>,
    /// Whether open corner markers are settled after quadrant resolution.
    pub resolve_corners: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            default_layer: None,
            resolve_corners: true,
        }
    }
}

/// Generates seam overlays for terrain grids.
#[derive(Clone, Debug, Default)]
pub struct OverlayGenerator {
    config: OverlayConfig,
    quadrants: QuadrantResolver,
    corners: CornerResolver,
    foreground: ForegroundResolver,
}

impl OverlayGenerator {
    /// Creates a generator applying `config`.
    #[must_use]
    pub fn new(config: OverlayConfig) -> Self {
        let quadrants = QuadrantResolver::new();
        let corners = CornerResolver::from_tables(quadrants.tables());
        Self {
            config,
            quadrants,
            corners,
            foreground: ForegroundResolver::new(),
        }
    }

    /// Every variant name a generation run can write, corner fillers and
    /// foreground tiles included.
    #[must_use]
    pub fn variant_names(&self) -> BTreeSet<VariantName> {
        let mut names = self.quadrants.tables().variant_names();
        names.extend(
            self.quadrants
                .tables()
                .iter()
                .map(|table| self.corners.filler(table.quadrant()).clone()),
        );
        names.extend(self.foreground.variant_names());
        names
    }

    /// Layer used when corner resolution finds no majority.
    #[must_use]
    pub fn default_layer<T>(
        &self,
        selectors: &SelectorSet<T>,
        catalog: &VariantCatalog,
    ) -> Option<LayerName> {
        self.config
            .default_layer
            .as_ref()
            .or_else(|| catalog.default_layer())
            .or_else(|| selectors.last().map(|selector| selector.layer()))
            .cloned()
    }

    /// Runs the layer passes without assigning sprite indices.
    #[must_use]
    pub fn placements<T>(
        &self,
        grid: &Grid<T>,
        selectors: &SelectorSet<T>,
        catalog: &VariantCatalog,
    ) -> PlacementGrid {
        let mut placements = self.quadrants.resolve(grid, selectors);
        let claimed = placements.cells().iter().flatten().count();
        debug!(
            claimed,
            unclaimed = placements.len() - claimed,
            "quadrants_resolved"
        );

        if !self.config.resolve_corners {
            debug!("corner_resolution_disabled");
            return placements;
        }
        let Some(default_layer) = self.default_layer(selectors, catalog) else {
            debug!("corner_resolution_skipped_without_layers");
            return placements;
        };
        let CornerSummary {
            markers,
            majority,
            fallback,
        } = self
            .corners
            .resolve_with_context(&mut placements, &default_layer, grid, selectors);
        debug!(
            markers,
            majority,
            fallback,
            default_layer = %default_layer,
            "corners_resolved"
        );
        placements
    }

    /// Generates the overlay for `grid`.
    ///
    /// Sprite indices are drawn from `rng` in row-major overlay order.
    pub fn generate<T, R: Rng + ?Sized>(
        &self,
        grid: &Grid<T>,
        selectors: &SelectorSet<T>,
        catalog: &VariantCatalog,
        rng: &mut R,
    ) -> OverlayGrid {
        let overlay = encode(&self.placements(grid, selectors, catalog), catalog, rng);
        info!(
            width = grid.width(),
            height = grid.height(),
            overlay_width = overlay.width(),
            overlay_height = overlay.height(),
            "overlay_generated"
        );
        overlay
    }

    /// Generates the foreground overlay of `layer`, whose cells are those
    /// satisfying `in_layer`.
    ///
    /// Sprite indices are drawn from `rng` in row-major overlay order.
    pub fn generate_foreground<T, R: Rng + ?Sized>(
        &self,
        grid: &Grid<T>,
        layer: &LayerName,
        in_layer: impl Fn(&T) -> bool,
        catalog: &VariantCatalog,
        rng: &mut R,
    ) -> OverlayGrid {
        let overlay = encode(&self.foreground.resolve(grid, layer, in_layer), catalog, rng);
        info!(
            layer = %layer,
            tiles = overlay.cells().iter().flatten().count(),
            "foreground_generated"
        );
        overlay
    }
}

fn encode<R: Rng + ?Sized>(
    placements: &PlacementGrid,
    catalog: &VariantCatalog,
    rng: &mut R,
) -> OverlayGrid {
    placements.map(|cell| {
        cell.as_ref()
            .map(|name| catalog.encode(name.clone(), None, rng))
    })
}

/// Generates an overlay with the default configuration.
pub fn generate<T, R: Rng + ?Sized>(
    grid: &Grid<T>,
    selectors: &SelectorSet<T>,
    catalog: &VariantCatalog,
    rng: &mut R,
) -> OverlayGrid {
    OverlayGenerator::default().generate(grid, selectors, catalog, rng)
}
