#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system drawing the foreground overlay of a single solid layer.
//!
//! Unlike floor quadrants, which arbitrate between several layers, the
//! foreground pass looks at one layer only. A cell's east, north, west and
//! south neighbours select one of sixteen [`ForegroundCase`]s, and the case
//! consults diagonal neighbours to refine each quadrant. Cells outside the layer get
//! the layer's overhang where it borders them. Cells beyond the map edge
//! never belong to the layer.

mod table;

use std::collections::BTreeSet;

use tileseam_core::{
    Direction, Grid, GridPos, LayerName, NeighborMask, PlacementGrid, Quadrant, TileName,
    VariantName,
};

pub use table::{ForegroundCase, Pick};

const ORTHOGONAL: [Direction; 4] = [
    Direction::East,
    Direction::North,
    Direction::West,
    Direction::South,
];

/// Resolves foreground placements for one layer.
#[derive(Clone, Copy, Debug)]
pub struct ForegroundResolver {
    cases: &'static [ForegroundCase; 16],
}

impl Default for ForegroundResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ForegroundResolver {
    /// Creates a resolver using the built-in case table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cases: &table::CASES,
        }
    }

    /// Case selected by the orthogonal bits of `mask`.
    #[must_use]
    pub fn case(&self, mask: NeighborMask) -> &ForegroundCase {
        &self.cases[usize::from(mask.restrict(&ORTHOGONAL).bits())]
    }

    /// Produces the double-resolution foreground placements of `layer`,
    /// whose cells are those satisfying `in_layer`.
    #[must_use]
    pub fn resolve<T>(
        &self,
        grid: &Grid<T>,
        layer: &LayerName,
        in_layer: impl Fn(&T) -> bool,
    ) -> PlacementGrid {
        let mut placements = grid.doubled(None);
        for (pos, value) in grid.iter() {
            let mask = layer_mask(grid, pos, &in_layer);
            let case = self.case(mask);
            let picks = if in_layer(value) {
                &case.solid
            } else {
                &case.open
            };
            for quadrant in Quadrant::ALL {
                let tile = picks[quadrant.index()].resolve(mask).map(|variant| {
                    TileName::new(layer.clone(), VariantName::from_static(variant))
                });
                let _ = placements.set(quadrant.sub_cell(pos), tile);
            }
        }
        placements
    }

    /// Sorted set of every variant the pass can place.
    #[must_use]
    pub fn variant_names(&self) -> BTreeSet<VariantName> {
        self.cases
            .iter()
            .flat_map(ForegroundCase::variants)
            .map(VariantName::from_static)
            .collect()
    }
}

fn layer_mask<T>(grid: &Grid<T>, pos: GridPos, in_layer: &impl Fn(&T) -> bool) -> NeighborMask {
    Direction::ALL
        .into_iter()
        .filter(|&direction| grid.neighbor(pos, direction).is_some_and(in_layer))
        .fold(NeighborMask::EMPTY, NeighborMask::with)
}
