use tileseam_core::{Direction, Grid, GridPos, NeighborMask};

/// Builds the 8-bit mask of neighbours of `pos` that satisfy `predicate`.
///
/// Neighbours outside the grid are read as `self_value`, so map edges behave
/// as if surrounded by the cell's own terrain and never introduce seams.
#[must_use]
pub fn neighbor_mask<T>(
    grid: &Grid<T>,
    pos: GridPos,
    self_value: &T,
    predicate: impl Fn(&T) -> bool,
) -> NeighborMask {
    Direction::ALL
        .into_iter()
        .filter(|&direction| predicate(grid.neighbor_or(pos, direction, self_value)))
        .fold(NeighborMask::EMPTY, NeighborMask::with)
}
