#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system settling open corner markers left by quadrant resolution.
//!
//! A quadrant whose only agreeing neighbour is the diagonal one receives an
//! open corner marker: several layers meet at its outer point and the first
//! pass cannot tell who owns it. This pass reads the three overlay cells
//! around the marker and replaces it with a corner filler belonging to the
//! layer held by at least two of them, or to the default layer when no such
//! majority exists.

use tileseam_core::{Grid, GridPos, LayerName, PlacementGrid, Quadrant, TileName, VariantName};
use tileseam_system_quadrants::QuadrantTables;
use tileseam_system_selection::SelectorSet;

/// Filler drawn in a top-left quadrant; other quadrants use its rotations.
const CANONICAL_FILLER: VariantName = VariantName::from_static("ortb");

/// Candidates that must agree for a layer to win the corner.
const MAJORITY: usize = 2;

/// Counts gathered while settling the markers of one overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CornerSummary {
    /// Open corner markers found.
    pub markers: usize,
    /// Markers settled by a majority layer.
    pub majority: usize,
    /// Markers settled by the default layer.
    pub fallback: usize,
}

/// Overlay cell voting on the owner of a corner.
#[derive(Clone, Copy, Debug)]
struct Candidate<'a> {
    pos: GridPos,
    layer: &'a LayerName,
}

/// Replaces open corner markers with layer fillers.
#[derive(Clone, Debug)]
pub struct CornerResolver {
    markers: [VariantName; 4],
    fillers: [VariantName; 4],
}

impl CornerResolver {
    /// Creates a resolver recognising the markers of the generated tables.
    #[must_use]
    pub fn new() -> Self {
        Self::from_tables(&QuadrantTables::new())
    }

    /// Creates a resolver recognising the markers of `tables`.
    #[must_use]
    pub fn from_tables(tables: &QuadrantTables) -> Self {
        let mut filler = CANONICAL_FILLER;
        let fillers = Quadrant::ALL.map(|_| {
            let current = filler.clone();
            filler = filler.rotate_cw();
            current
        });
        let markers =
            Quadrant::ALL.map(|quadrant| tables.get(quadrant).open_corner_marker().clone());
        Self { markers, fillers }
    }

    /// Marker variant recognised in `quadrant`.
    #[must_use]
    pub fn marker(&self, quadrant: Quadrant) -> &VariantName {
        &self.markers[quadrant.index()]
    }

    /// Filler variant written in `quadrant`.
    #[must_use]
    pub fn filler(&self, quadrant: Quadrant) -> &VariantName {
        &self.fillers[quadrant.index()]
    }

    /// Returns `true` when the overlay cell at `pos` holds an open corner
    /// marker.
    #[must_use]
    pub fn is_marker(&self, pos: GridPos, tile: &TileName) -> bool {
        tile.variant() == self.marker(Quadrant::of_sub_cell(pos))
    }

    /// Settles every marker, treating candidates as agreeing only when they
    /// belong to the same layer.
    pub fn resolve(&self, placements: &mut PlacementGrid, default_layer: &LayerName) -> CornerSummary {
        self.resolve_by(placements, default_layer, |owner, other| {
            owner.layer == other.layer
        })
    }

    /// Settles every marker, also letting a candidate's selector accept the
    /// terrain beneath another candidate as agreement.
    pub fn resolve_with_context<T>(
        &self,
        placements: &mut PlacementGrid,
        default_layer: &LayerName,
        grid: &Grid<T>,
        selectors: &SelectorSet<T>,
    ) -> CornerSummary {
        self.resolve_by(placements, default_layer, |owner, other| {
            if owner.layer == other.layer {
                return true;
            }
            match (
                selectors.get(owner.layer.as_str()),
                grid.get(coarse_cell(other.pos)),
            ) {
                (Some(selector), Some(terrain)) => selector.is_compatible(terrain),
                _ => false,
            }
        })
    }

    fn resolve_by<F>(
        &self,
        placements: &mut PlacementGrid,
        default_layer: &LayerName,
        agree: F,
    ) -> CornerSummary
    where
        F: Fn(&Candidate<'_>, &Candidate<'_>) -> bool,
    {
        let mut summary = CornerSummary::default();
        let mut decisions = Vec::new();

        for (pos, tile) in placements.iter() {
            let Some(tile) = tile else {
                continue;
            };
            if !self.is_marker(pos, tile) {
                continue;
            }
            summary.markers += 1;

            let quadrant = Quadrant::of_sub_cell(pos);
            let candidates: Vec<Candidate<'_>> =
                [quadrant.horizontal(), quadrant.vertical(), quadrant.diagonal()]
                    .into_iter()
                    .filter_map(|direction| {
                        let neighbor = placements.step(pos, direction)?;
                        let layer = placements.get(neighbor)?.as_ref()?.layer();
                        Some(Candidate {
                            pos: neighbor,
                            layer,
                        })
                    })
                    .collect();

            let layer = match majority(&candidates, &agree) {
                Some(layer) => {
                    summary.majority += 1;
                    layer.clone()
                }
                None => {
                    summary.fallback += 1;
                    default_layer.clone()
                }
            };
            decisions.push((pos, TileName::new(layer, self.filler(quadrant).clone())));
        }

        // Applied afterwards so every vote reads the first-pass overlay.
        for (pos, tile) in decisions {
            let _ = placements.set(pos, Some(tile));
        }
        summary
    }
}

impl Default for CornerResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn majority<'a, F>(candidates: &[Candidate<'a>], agree: &F) -> Option<&'a LayerName>
where
    F: Fn(&Candidate<'_>, &Candidate<'_>) -> bool,
{
    candidates
        .iter()
        .find(|&owner| {
            candidates
                .iter()
                .filter(|&other| agree(owner, other))
                .count()
                >= MAJORITY
        })
        .map(|owner| owner.layer)
}

fn coarse_cell(pos: GridPos) -> GridPos {
    GridPos::new(pos.column() / 2, pos.row() / 2)
}
