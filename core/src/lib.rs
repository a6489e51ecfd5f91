#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the tileseam overlay engine.
//!
//! This crate defines the vocabulary every pass speaks: the coarse [`Grid`]
//! of terrain values with bounds-safe neighbour access, compass
//! [`Direction`]s and the [`NeighborMask`] built from them, the four
//! [`Quadrant`]s a coarse cell is split into, and the tile identifiers
//! ([`TileName`], [`TileRef`]) written into the double-resolution overlay.
//! Systems read immutable grids and fill overlays; nothing here performs I/O.

mod grid;
mod tile;

use serde::{Deserialize, Serialize};

pub use grid::{Grid, GridError, GridPos};
pub use tile::{LayerName, SpriteCoord, TileName, TileRef, TileRefError, VariantName};

/// Quadrant placements produced before variant indices are assigned.
pub type PlacementGrid = Grid<Option<TileName>>;

/// Double-resolution overlay holding fully encoded tile references.
pub type OverlayGrid = Grid<Option<TileRef>>;

impl OverlayGrid {
    /// Canonical key of every overlay cell, `None` where the cell is empty.
    #[must_use]
    pub fn keys(&self) -> Grid<Option<String>> {
        self.map(|tile| tile.as_ref().map(TileRef::key))
    }
}

/// Compass directions towards the eight neighbours of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Towards decreasing row indices.
    North,
    /// Towards increasing row indices.
    South,
    /// Towards increasing column indices.
    East,
    /// Towards decreasing column indices.
    West,
    /// Up and to the right.
    NorthEast,
    /// Up and to the left.
    NorthWest,
    /// Down and to the right.
    SouthEast,
    /// Down and to the left.
    SouthWest,
}

impl Direction {
    /// Every direction, in mask bit order.
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Bit assigned to the direction inside a [`NeighborMask`].
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Direction::East => 1,
            Direction::North => 2,
            Direction::West => 4,
            Direction::South => 8,
            Direction::NorthEast => 16,
            Direction::NorthWest => 32,
            Direction::SouthWest => 64,
            Direction::SouthEast => 128,
        }
    }

    /// Column and row offsets travelled when stepping once in this direction.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    /// Direction obtained by turning a quarter turn clockwise.
    #[must_use]
    pub const fn rotate_cw(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            Direction::NorthEast => Direction::SouthEast,
            Direction::SouthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthWest,
            Direction::NorthWest => Direction::NorthEast,
        }
    }
}

/// Eight-bit summary of which neighbours satisfied a predicate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeighborMask(u8);

impl NeighborMask {
    /// Mask with no neighbour bits set.
    pub const EMPTY: NeighborMask = NeighborMask(0);

    /// Mask with every neighbour bit set.
    pub const FULL: NeighborMask = NeighborMask(u8::MAX);

    /// Raw mask bits.
    #[must_use]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns `true` when the bit for `direction` is set.
    #[must_use]
    pub const fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Returns a copy of the mask with the bit for `direction` set.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    /// Keeps only the bits for the provided directions.
    #[must_use]
    pub fn restrict(self, directions: &[Direction]) -> Self {
        let keep = directions
            .iter()
            .fold(0u8, |bits, direction| bits | direction.bit());
        Self(self.0 & keep)
    }
}

/// One of the four sub-cells produced when a coarse cell is split at double
/// resolution, listed clockwise from the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    /// Upper-left sub-cell.
    TopLeft,
    /// Upper-right sub-cell.
    TopRight,
    /// Lower-right sub-cell.
    BottomRight,
    /// Lower-left sub-cell.
    BottomLeft,
}

impl Quadrant {
    /// Every quadrant in clockwise order starting at the top-left.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomRight,
        Quadrant::BottomLeft,
    ];

    /// Position of the quadrant within [`Quadrant::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomRight => 2,
            Quadrant::BottomLeft => 3,
        }
    }

    /// Quadrant reached by a quarter turn clockwise.
    #[must_use]
    pub const fn rotate_cw(self) -> Self {
        match self {
            Quadrant::TopLeft => Quadrant::TopRight,
            Quadrant::TopRight => Quadrant::BottomRight,
            Quadrant::BottomRight => Quadrant::BottomLeft,
            Quadrant::BottomLeft => Quadrant::TopLeft,
        }
    }

    /// Horizontal neighbour the quadrant touches.
    #[must_use]
    pub const fn horizontal(self) -> Direction {
        match self {
            Quadrant::TopLeft | Quadrant::BottomLeft => Direction::West,
            Quadrant::TopRight | Quadrant::BottomRight => Direction::East,
        }
    }

    /// Vertical neighbour the quadrant touches.
    #[must_use]
    pub const fn vertical(self) -> Direction {
        match self {
            Quadrant::TopLeft | Quadrant::TopRight => Direction::North,
            Quadrant::BottomLeft | Quadrant::BottomRight => Direction::South,
        }
    }

    /// Diagonal neighbour the quadrant touches.
    #[must_use]
    pub const fn diagonal(self) -> Direction {
        match self {
            Quadrant::TopLeft => Direction::NorthWest,
            Quadrant::TopRight => Direction::NorthEast,
            Quadrant::BottomRight => Direction::SouthEast,
            Quadrant::BottomLeft => Direction::SouthWest,
        }
    }

    /// Overlay position of this quadrant for the coarse cell at `cell`.
    #[must_use]
    pub const fn sub_cell(self, cell: GridPos) -> GridPos {
        let (dx, dy) = match self {
            Quadrant::TopLeft => (0, 0),
            Quadrant::TopRight => (1, 0),
            Quadrant::BottomRight => (1, 1),
            Quadrant::BottomLeft => (0, 1),
        };
        GridPos::new(cell.column() * 2 + dx, cell.row() * 2 + dy)
    }

    /// Quadrant an overlay position falls in, relative to its coarse cell.
    #[must_use]
    pub const fn of_sub_cell(pos: GridPos) -> Self {
        match (pos.column() % 2, pos.row() % 2) {
            (0, 0) => Quadrant::TopLeft,
            (1, 0) => Quadrant::TopRight,
            (1, _) => Quadrant::BottomRight,
            _ => Quadrant::BottomLeft,
        }
    }
}
