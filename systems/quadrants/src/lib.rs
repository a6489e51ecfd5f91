#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system resolving the sprite variant of every overlay quadrant.
//!
//! Each coarse cell is split into four quadrants. A quadrant is owned by the
//! selector winning arbitration over the cell and the quadrant's three inward
//! neighbours; the owner's compatibility mask is then looked up in that
//! quadrant's [`QuadrantTable`]. Variant indices are left to the catalog.

mod table;

use tileseam_core::{Grid, GridPos, PlacementGrid, Quadrant, TileName};
use tileseam_system_selection::{neighbor_mask, SelectorSet};

pub use table::{QuadrantTable, QuadrantTables};

/// Resolves quadrant placements for whole terrain grids.
#[derive(Clone, Debug, Default)]
pub struct QuadrantResolver {
    tables: QuadrantTables,
}

impl QuadrantResolver {
    /// Creates a resolver using the generated quadrant tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: QuadrantTables::new(),
        }
    }

    /// Tables consulted by the resolver.
    #[must_use]
    pub const fn tables(&self) -> &QuadrantTables {
        &self.tables
    }

    /// Produces the double-resolution placement grid for `grid`.
    ///
    /// Quadrants no selector claims are left empty.
    #[must_use]
    pub fn resolve<T>(&self, grid: &Grid<T>, selectors: &SelectorSet<T>) -> PlacementGrid {
        let mut placements = grid.doubled(None);
        for pos in grid.positions() {
            for quadrant in Quadrant::ALL {
                let tile = self.resolve_quadrant(grid, selectors, pos, quadrant);
                let _ = placements.set(quadrant.sub_cell(pos), tile);
            }
        }
        placements
    }

    /// Resolves a single quadrant of the cell at `pos`.
    #[must_use]
    pub fn resolve_quadrant<T>(
        &self,
        grid: &Grid<T>,
        selectors: &SelectorSet<T>,
        pos: GridPos,
        quadrant: Quadrant,
    ) -> Option<TileName> {
        let value = grid.get(pos)?;
        let table = self.tables.get(quadrant);
        let neighbors = table
            .inward()
            .map(|direction| grid.neighbor_or(pos, direction, value));
        let selector = selectors.pick(value, &neighbors)?;
        let mask = neighbor_mask(grid, pos, value, |neighbor| {
            selector.is_compatible(neighbor)
        });
        Some(TileName::new(
            selector.layer().clone(),
            table.resolve(mask).clone(),
        ))
    }
}
