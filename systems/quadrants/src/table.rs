use std::collections::BTreeSet;

use tileseam_core::{Direction, NeighborMask, Quadrant, VariantName};

const PRIMARY: usize = 1;
const SECONDARY: usize = 2;
const DIAGONAL: usize = 4;

/// Variant used instead when the neighbour opposite the agreeing one
/// disagrees, turning a straight edge into the end of a seam.
#[derive(Clone, Debug, PartialEq, Eq)]
struct OpenEnd {
    opposite: Direction,
    variant: VariantName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct QuadrantCase {
    variant: VariantName,
    open_end: Option<OpenEnd>,
}

impl QuadrantCase {
    const fn fixed(variant: &'static str) -> Self {
        Self {
            variant: VariantName::from_static(variant),
            open_end: None,
        }
    }

    const fn edge(through: &'static str, opposite: Direction, end: &'static str) -> Self {
        Self {
            variant: VariantName::from_static(through),
            open_end: Some(OpenEnd {
                opposite,
                variant: VariantName::from_static(end),
            }),
        }
    }

    fn rotate_cw(&self) -> Self {
        Self {
            variant: self.variant.rotate_cw(),
            open_end: self.open_end.as_ref().map(|end| OpenEnd {
                opposite: end.opposite.rotate_cw(),
                variant: end.variant.rotate_cw(),
            }),
        }
    }
}

/// Eight-entry lookup from a quadrant's three inward neighbours to the variant
/// drawn in that quadrant.
///
/// Entries are keyed by which of the primary, secondary and diagonal
/// neighbours agree with the owning layer. Tables for the other quadrants are
/// the top-left table turned clockwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuadrantTable {
    quadrant: Quadrant,
    primary: Direction,
    secondary: Direction,
    diagonal: Direction,
    cases: [QuadrantCase; 8],
}

impl QuadrantTable {
    /// Table for the top-left quadrant, from which the others are derived.
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            quadrant: Quadrant::TopLeft,
            primary: Direction::West,
            secondary: Direction::North,
            diagonal: Direction::NorthWest,
            cases: [
                QuadrantCase::fixed("ttl"),
                QuadrantCase::edge("t", Direction::East, "rtte"),
                QuadrantCase::edge("l", Direction::South, "ltbs"),
                QuadrantCase::fixed("ltt"),
                QuadrantCase::fixed("btrc"),
                QuadrantCase::fixed("ttrs"),
                QuadrantCase::fixed("btle"),
                QuadrantCase::fixed("m"),
            ],
        }
    }

    /// Same table turned a quarter turn clockwise.
    #[must_use]
    pub fn rotate_cw(&self) -> Self {
        Self {
            quadrant: self.quadrant.rotate_cw(),
            primary: self.primary.rotate_cw(),
            secondary: self.secondary.rotate_cw(),
            diagonal: self.diagonal.rotate_cw(),
            cases: std::array::from_fn(|index| self.cases[index].rotate_cw()),
        }
    }

    /// Quadrant the table resolves.
    #[must_use]
    pub const fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// Primary, secondary and diagonal neighbours the quadrant touches.
    #[must_use]
    pub const fn inward(&self) -> [Direction; 3] {
        [self.primary, self.secondary, self.diagonal]
    }

    /// Resolves the variant for a full neighbour mask.
    #[must_use]
    pub fn resolve(&self, mask: NeighborMask) -> &VariantName {
        let case = &self.cases[self.case_index(mask)];
        match &case.open_end {
            Some(end) if !mask.contains(end.opposite) => &end.variant,
            _ => &case.variant,
        }
    }

    /// Variant used when none of the inward neighbours agree.
    #[must_use]
    pub fn convex_corner(&self) -> &VariantName {
        &self.cases[0].variant
    }

    /// Variant used when only the diagonal neighbour agrees, so that several
    /// layers meet at the quadrant's outer corner.
    #[must_use]
    pub fn open_corner_marker(&self) -> &VariantName {
        &self.cases[DIAGONAL].variant
    }

    /// Variant used when every inward neighbour agrees.
    #[must_use]
    pub fn interior(&self) -> &VariantName {
        &self.cases[PRIMARY | SECONDARY | DIAGONAL].variant
    }

    /// Every variant the table can produce.
    pub fn variant_names(&self) -> impl Iterator<Item = &VariantName> {
        self.cases.iter().flat_map(|case| {
            std::iter::once(&case.variant).chain(case.open_end.as_ref().map(|end| &end.variant))
        })
    }

    fn case_index(&self, mask: NeighborMask) -> usize {
        let mut index = 0;
        if mask.contains(self.primary) {
            index |= PRIMARY;
        }
        if mask.contains(self.secondary) {
            index |= SECONDARY;
        }
        if mask.contains(self.diagonal) {
            index |= DIAGONAL;
        }
        index
    }
}

/// The four quadrant tables, generated from the canonical one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuadrantTables {
    tables: [QuadrantTable; 4],
}

impl QuadrantTables {
    /// Builds all four tables by turning the canonical table clockwise.
    #[must_use]
    pub fn new() -> Self {
        let top_left = QuadrantTable::canonical();
        let top_right = top_left.rotate_cw();
        let bottom_right = top_right.rotate_cw();
        let bottom_left = bottom_right.rotate_cw();
        Self {
            tables: [top_left, top_right, bottom_right, bottom_left],
        }
    }

    /// Table for `quadrant`.
    #[must_use]
    pub fn get(&self, quadrant: Quadrant) -> &QuadrantTable {
        &self.tables[quadrant.index()]
    }

    /// Tables in clockwise order starting at the top-left.
    pub fn iter(&self) -> impl Iterator<Item = &QuadrantTable> {
        self.tables.iter()
    }

    /// Sorted set of every variant any quadrant can produce.
    #[must_use]
    pub fn variant_names(&self) -> BTreeSet<VariantName> {
        self.tables
            .iter()
            .flat_map(QuadrantTable::variant_names)
            .cloned()
            .collect()
    }
}

impl Default for QuadrantTables {
    fn default() -> Self {
        Self::new()
    }
}
