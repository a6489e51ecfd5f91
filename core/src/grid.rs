use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Direction;

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    column: u32,
    row: u32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Reasons a [`Grid`] could not be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height was zero.
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// The flat cell vector did not match `width * height`.
    #[error("a {width}x{height} grid needs {expected} cells but {actual} were provided")]
    CellCountMismatch {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
        /// Number of cells the dimensions require.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// A row passed to [`Grid::from_rows`] differed in length from the first.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// A dimension did not fit in a `u32`.
    #[error("grid dimension {0} exceeds the supported range")]
    TooLarge(usize),
}

/// Dense, row-major 2-D array of cells.
///
/// Neighbour accessors never panic: reads that fall outside the grid resolve
/// to a caller-supplied default, so systems can treat the map edge as
/// surrounded by whatever terrain suits them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Largest width or height a grid may have, so that its doubled overlay
    /// still fits in `u32` coordinates.
    pub const MAX_DIMENSION: u32 = u32::MAX / 2;

    /// Builds a grid from row-major cells.
    pub fn from_cells(width: u32, height: u32, cells: Vec<T>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        if let Some(side) = [width, height]
            .into_iter()
            .find(|&side| side > Self::MAX_DIMENSION)
        {
            return Err(GridError::TooLarge(side as usize));
        }
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: index,
                    expected: width,
                    actual: row.len(),
                });
            }
            cells.extend(row);
        }
        let width = u32::try_from(width).map_err(|_| GridError::TooLarge(width))?;
        let height = u32::try_from(height).map_err(|_| GridError::TooLarge(height))?;
        Self::from_cells(width, height, cells)
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; grids hold at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` when `pos` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.column() < self.width && pos.row() < self.height
    }

    /// Cell stored at `pos`, if inside the grid.
    #[must_use]
    pub fn get(&self, pos: GridPos) -> Option<&T> {
        self.index(pos).and_then(|index| self.cells.get(index))
    }

    /// Mutable cell stored at `pos`, if inside the grid.
    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut T> {
        let index = self.index(pos)?;
        self.cells.get_mut(index)
    }

    /// Replaces the cell at `pos`, returning the previous value.
    ///
    /// Writes outside the grid are dropped and return `None`.
    pub fn set(&mut self, pos: GridPos, value: T) -> Option<T> {
        self.get_mut(pos)
            .map(|cell| std::mem::replace(cell, value))
    }

    /// Row-major view of every cell.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterates every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |column| GridPos::new(column, row)))
    }

    /// Iterates every cell together with its position in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &T)> {
        self.positions().zip(self.cells.iter())
    }

    /// Iterates the rows of the grid from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width as usize)
    }

    /// Builds a grid of the same dimensions by transforming every cell.
    #[must_use]
    pub fn map<U>(&self, transform: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(transform).collect(),
        }
    }

    /// Grid of twice the width and height with every cell set to `value`.
    ///
    /// Each cell of `self` covers the 2x2 block starting at
    /// `(2 * column, 2 * row)` of the result.
    #[must_use]
    pub fn doubled<U: Clone>(&self, value: U) -> Grid<U> {
        let width = self.width * 2;
        let height = self.height * 2;
        Grid {
            width,
            height,
            cells: vec![value; width as usize * height as usize],
        }
    }

    /// Position one step away from `pos` in `direction`, if inside the grid.
    #[must_use]
    pub fn step(&self, pos: GridPos, direction: Direction) -> Option<GridPos> {
        let (dx, dy) = direction.offset();
        let column = i64::from(pos.column()) + dx;
        let row = i64::from(pos.row()) + dy;
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        let next = GridPos::new(column, row);
        self.contains(next).then_some(next)
    }

    /// Neighbour of `pos` in `direction`, if inside the grid.
    #[must_use]
    pub fn neighbor(&self, pos: GridPos, direction: Direction) -> Option<&T> {
        self.step(pos, direction).and_then(|next| self.get(next))
    }

    /// Neighbour of `pos` in `direction`, or `default` when out of bounds.
    #[must_use]
    pub fn neighbor_or<'a>(&'a self, pos: GridPos, direction: Direction, default: &'a T) -> &'a T {
        self.neighbor(pos, direction).unwrap_or(default)
    }

    /// Cell to the west of `pos`, or `default`.
    #[must_use]
    pub fn left<'a>(&'a self, pos: GridPos, default: &'a T) -> &'a T {
        self.neighbor_or(pos, Direction::West, default)
    }

    /// Cell to the east of `pos`, or `default`.
    #[must_use]
    pub fn right<'a>(&'a self, pos: GridPos, default: &'a T) -> &'a T {
        self.neighbor_or(pos, Direction::East, default)
    }

    /// Cell to the north of `pos`, or `default`.
    #[must_use]
    pub fn up<'a>(&'a self, pos: GridPos, default: &'a T) -> &'a T {
        self.neighbor_or(pos, Direction::North, default)
    }

    /// Cell to the south of `pos`, or `default`.
    #[must_use]
    pub fn down<'a>(&'a self, pos: GridPos, default: &'a T) -> &'a T {
        self.neighbor_or(pos, Direction::South, default)
    }

    /// Cell to the north-west of `pos`, or `default`.
    #[must_use]
    pub fn ul<'a>(&'a self, pos: GridPos, default: &'a T) -> &'a T {
        self.neighbor_or(pos, Direction::NorthWest, default)
    }

    /// Cell to the north-east of `pos`, or `default`.
    #[must_use]
    pub fn ur<'a>(&'a self, pos: GridPos, default: &'a T) -> &'a T {
        self.neighbor_or(pos, Direction::NorthEast, default)
    }

    /// Cell to the south-west of `pos`, or `default`.
    #[must_use]
    pub fn dl<'a>(&'a self, pos: GridPos, default: &'a T) -> &'a T {
        self.neighbor_or(pos, Direction::SouthWest, default)
    }

    /// Cell to the south-east of `pos`, or `default`.
    #[must_use]
    pub fn dr<'a>(&'a self, pos: GridPos, default: &'a T) -> &'a T {
        self.neighbor_or(pos, Direction::SouthEast, default)
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.row() as usize * self.width as usize + pos.column() as usize)
    }
}

impl<T: Clone> Grid<T> {
    /// Builds a grid with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: T) -> Result<Self, GridError> {
        let count = width as usize * height as usize;
        Self::from_cells(width, height, vec![value; count])
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, GridError, GridPos};
    use crate::Direction;

    fn numbered(width: u32, height: u32) -> Grid<u32> {
        Grid::from_cells(width, height, (0..width * height).collect()).expect("valid grid")
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::<u8>::filled(0, 3, 0),
            Err(GridError::EmptyDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(Grid::<u8>::from_rows(Vec::new()).is_err());
    }

    #[test]
    fn rejects_dimensions_whose_overlay_would_overflow() {
        let too_wide = Grid::<()>::MAX_DIMENSION + 1;
        assert_eq!(
            Grid::<()>::from_cells(too_wide, 1, Vec::new()),
            Err(GridError::TooLarge(too_wide as usize))
        );
        assert_eq!(
            Grid::<()>::from_cells(1, u32::MAX, Vec::new()),
            Err(GridError::TooLarge(u32::MAX as usize))
        );
        assert!(matches!(
            Grid::<()>::from_cells(Grid::<()>::MAX_DIMENSION, 1, Vec::new()),
            Err(GridError::CellCountMismatch { .. })
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5]]);
        assert_eq!(
            result,
            Err(GridError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn neighbours_read_row_major_cells() {
        let grid = numbered(3, 3);
        let center = GridPos::new(1, 1);
        let fallback = 99;
        assert_eq!(*grid.left(center, &fallback), 3);
        assert_eq!(*grid.right(center, &fallback), 5);
        assert_eq!(*grid.up(center, &fallback), 1);
        assert_eq!(*grid.down(center, &fallback), 7);
        assert_eq!(*grid.ul(center, &fallback), 0);
        assert_eq!(*grid.ur(center, &fallback), 2);
        assert_eq!(*grid.dl(center, &fallback), 6);
        assert_eq!(*grid.dr(center, &fallback), 8);
    }

    #[test]
    fn neighbours_outside_the_grid_fall_back_to_default() {
        let grid = numbered(2, 2);
        let fallback = 42;
        let corner = GridPos::new(0, 0);
        for direction in [
            Direction::West,
            Direction::North,
            Direction::NorthWest,
            Direction::NorthEast,
            Direction::SouthWest,
        ] {
            assert_eq!(*grid.neighbor_or(corner, direction, &fallback), 42, "{direction:?}");
        }
        assert_eq!(*grid.dr(corner, &fallback), 3);
        assert_eq!(*grid.dr(GridPos::new(1, 1), &fallback), 42);
    }

    #[test]
    fn writes_outside_the_grid_are_dropped() {
        let mut grid = numbered(2, 2);
        assert_eq!(grid.set(GridPos::new(2, 0), 7), None);
        assert_eq!(grid.set(GridPos::new(1, 0), 7), Some(1));
        assert_eq!(grid.cells(), &[0, 7, 2, 3]);
    }

    #[test]
    fn positions_follow_row_major_order() {
        let grid = numbered(3, 2);
        let visited: Vec<_> = grid.iter().map(|(pos, value)| (pos, *value)).collect();
        assert_eq!(visited[0], (GridPos::new(0, 0), 0));
        assert_eq!(visited[4], (GridPos::new(1, 1), 4));
        assert_eq!(grid.rows().count(), 2);
    }
}
