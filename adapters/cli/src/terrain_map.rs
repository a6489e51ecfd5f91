use std::{error::Error, fmt};

use rand::Rng;
use tileseam_core::{Grid, GridError};
use tileseam_system_selection::{SeamSelector, SelectorError, SelectorSet};

/// Terrain kinds understood by the map format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Terrain {
    /// Solid wall.
    Wall,
    /// Plain walkable ground.
    Ground,
    /// Alternative ground texture that borders plain ground seamlessly.
    Ground2,
    /// Hole in the floor.
    Hole,
    /// Empty space outside the level.
    Void,
}

impl Terrain {
    const LEGEND: [(char, Terrain); 5] = [
        ('#', Terrain::Wall),
        ('.', Terrain::Ground),
        (',', Terrain::Ground2),
        ('o', Terrain::Hole),
        ('~', Terrain::Void),
    ];

    /// Terrain drawn by `symbol` in a map file.
    pub(crate) fn from_symbol(symbol: char) -> Option<Self> {
        Self::LEGEND
            .iter()
            .find(|(candidate, _)| *candidate == symbol)
            .map(|(_, terrain)| *terrain)
    }

    /// Symbol drawing the terrain in a map file.
    pub(crate) fn symbol(self) -> char {
        Self::LEGEND
            .iter()
            .find(|(_, terrain)| *terrain == self)
            .map_or('?', |(symbol, _)| *symbol)
    }
}

/// Selectors for every terrain kind, in arbitration order.
pub(crate) fn standard_selectors() -> Result<SelectorSet<Terrain>, SelectorError> {
    SelectorSet::from_selectors([
        SeamSelector::for_terrain("wall", Terrain::Wall)?,
        SeamSelector::for_terrain("hole", Terrain::Hole)?,
        SeamSelector::for_terrain("void", Terrain::Void)?,
        SeamSelector::for_terrain("ground2", Terrain::Ground2)?.with_compatible([Terrain::Ground]),
        SeamSelector::for_terrain("ground", Terrain::Ground)?,
    ])
}

/// Parses a terrain map, one row per line and one symbol per cell.
///
/// Blank lines are ignored.
pub(crate) fn parse(contents: &str) -> Result<Grid<Terrain>, TerrainMapError> {
    let mut rows: Vec<Vec<Terrain>> = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let line_number = index + 1;
        let mut row = Vec::with_capacity(line.len());
        for (column, symbol) in line.chars().enumerate() {
            let terrain =
                Terrain::from_symbol(symbol).ok_or(TerrainMapError::UnknownSymbol {
                    line: line_number,
                    column: column + 1,
                    symbol,
                })?;
            row.push(terrain);
        }
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(TerrainMapError::RaggedRow {
                    line: line_number,
                    expected: first.len(),
                    actual: row.len(),
                });
            }
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(TerrainMapError::Empty);
    }
    Grid::from_rows(rows).map_err(TerrainMapError::Grid)
}

/// Renders `grid` in the map format, one line per row.
pub(crate) fn render(grid: &Grid<Terrain>) -> String {
    let mut output = String::with_capacity(grid.len() + grid.height() as usize);
    for row in grid.rows() {
        output.extend(row.iter().map(|terrain| terrain.symbol()));
        output.push('\n');
    }
    output
}

/// Share of cells assigned to each non-ground terrain by [`random`], as
/// fractions of one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TerrainMix {
    pub(crate) wall: f64,
    pub(crate) hole: f64,
    pub(crate) void: f64,
}

/// Fills a `width` by `height` map, drawing one value per cell in row-major
/// order; whatever the mix leaves over becomes ground.
pub(crate) fn random<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    mix: TerrainMix,
    rng: &mut R,
) -> Result<Grid<Terrain>, GridError> {
    let cells = (0..u64::from(width) * u64::from(height))
        .map(|_| {
            let roll: f64 = rng.gen();
            if roll < mix.wall {
                Terrain::Wall
            } else if roll < mix.wall + mix.hole {
                Terrain::Hole
            } else if roll < mix.wall + mix.hole + mix.void {
                Terrain::Void
            } else {
                Terrain::Ground
            }
        })
        .collect();
    Grid::from_cells(width, height, cells)
}

/// Errors that can occur while reading a terrain map.
#[derive(Debug)]
pub(crate) enum TerrainMapError {
    /// The map contained no rows.
    Empty,
    /// A symbol was not part of the legend.
    UnknownSymbol {
        /// One-based line number.
        line: usize,
        /// One-based column number.
        column: usize,
        /// Offending symbol.
        symbol: char,
    },
    /// A row differed in length from the first row.
    RaggedRow {
        /// One-based line number.
        line: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// The rows could not form a grid.
    Grid(GridError),
}

impl fmt::Display for TerrainMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "terrain map contains no rows"),
            Self::UnknownSymbol {
                line,
                column,
                symbol,
            } => write!(
                f,
                "unknown terrain symbol '{symbol}' at line {line}, column {column}"
            ),
            Self::RaggedRow {
                line,
                expected,
                actual,
            } => write!(
                f,
                "line {line} has {actual} cells but the first row has {expected}"
            ),
            Self::Grid(error) => write!(f, "could not build terrain grid: {error}"),
        }
    }
}

impl Error for TerrainMapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(error) => Some(error),
            _ => None,
        }
    }
}
