use tileseam_core::{Direction, NeighborMask};

use Direction::{NorthEast as NE, NorthWest as NW, SouthEast as SE, SouthWest as SW};
use Pick::{Blank, Tile, When};

/// Rule choosing the variant of one quadrant of a foreground case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    /// The quadrant stays empty.
    Blank,
    /// The quadrant always receives this variant.
    Tile(&'static str),
    /// Follows the first rule when the neighbour in the direction belongs to
    /// the layer, the second otherwise.
    When(Direction, &'static Pick, &'static Pick),
}

impl Pick {
    /// Variant chosen for a cell whose layer neighbours are `mask`.
    #[must_use]
    pub fn resolve(&self, mask: NeighborMask) -> Option<&'static str> {
        match *self {
            Blank => None,
            Tile(variant) => Some(variant),
            When(direction, inside, outside) => {
                if mask.contains(direction) {
                    inside.resolve(mask)
                } else {
                    outside.resolve(mask)
                }
            }
        }
    }

    fn collect_variants(&self, into: &mut Vec<&'static str>) {
        match *self {
            Blank => {}
            Tile(variant) => into.push(variant),
            When(_, inside, outside) => {
                inside.collect_variants(into);
                outside.collect_variants(into);
            }
        }
    }
}

/// Quadrant rules for one combination of orthogonal layer neighbours, in
/// clockwise quadrant order from the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForegroundCase {
    /// Rules for a cell belonging to the layer.
    pub solid: [Pick; 4],
    /// Rules for a cell outside the layer, drawing the layer's overhang.
    pub open: [Pick; 4],
}

impl ForegroundCase {
    /// Every variant the case can place.
    #[must_use]
    pub fn variants(&self) -> Vec<&'static str> {
        let mut variants = Vec::new();
        for pick in self.solid.iter().chain(&self.open) {
            pick.collect_variants(&mut variants);
        }
        variants
    }
}

const NOTHING: [Pick; 4] = [Blank; 4];

/// Cases indexed by the east, north, west and south mask bits.
pub(crate) static CASES: [ForegroundCase; 16] = [
    // isolated
    ForegroundCase {
        solid: [Tile("ltbsc"), Tile("btrec"), Tile("btr"), Tile("ltb")],
        open: NOTHING,
    },
    // east
    ForegroundCase {
        solid: [
            Tile("ltbs"),
            When(SE, &Tile("btlsi"), &Tile("ltbi")),
            When(SE, &Tile("btls"), &Tile("ltbe")),
            Tile("ltb"),
        ],
        open: NOTHING,
    },
    // north
    ForegroundCase {
        solid: [Tile("ltbs"), Tile("btre"), Tile("btr"), Tile("ltb")],
        open: NOTHING,
    },
    // north, east
    ForegroundCase {
        solid: [
            Tile("ltbs"),
            When(SE, &Tile("btlsi"), &Tile("ltbi")),
            When(SE, &Tile("btls"), &Tile("ltbe")),
            Tile("ltb"),
        ],
        open: [Blank, When(NE, &Tile("obtl"), &Blank), Blank, Blank],
    },
    // west
    ForegroundCase {
        solid: [
            When(SW, &Tile("rtbei"), &Tile("btri")),
            Tile("btre"),
            Tile("btr"),
            When(SW, &Tile("rtbe"), &Tile("btrs")),
        ],
        open: NOTHING,
    },
    // west, east
    ForegroundCase {
        solid: [
            When(SW, &Tile("rtbei"), &Tile("bi")),
            When(SE, &Tile("btlsi"), &Tile("bi")),
            When(SE, &Tile("btls"), &Tile("b")),
            When(SW, &Tile("rtbe"), &Tile("b")),
        ],
        open: NOTHING,
    },
    // west, north
    ForegroundCase {
        solid: [
            When(SW, &Tile("rtbei"), &Tile("btri")),
            Tile("btre"),
            Tile("btr"),
            When(SW, &Tile("rtbe"), &Tile("btrs")),
        ],
        open: [When(NW, &Tile("ortb"), &Blank), Blank, Blank, Blank],
    },
    // west, north, east
    ForegroundCase {
        solid: [
            When(SW, &Tile("rtbei"), &Tile("bi")),
            When(SE, &Tile("btlsi"), &Tile("bi")),
            When(SE, &Tile("btls"), &Tile("b")),
            When(SW, &Tile("rtbe"), &Tile("b")),
        ],
        open: [
            When(NW, &Tile("ortb"), &Blank),
            When(NE, &Tile("obtl"), &Blank),
            Blank,
            Blank,
        ],
    },
    // south
    ForegroundCase {
        solid: [
            When(SW, &Tile("ltti"), &Tile("ttl")),
            When(SE, &Tile("ttri"), &Tile("rtt")),
            When(SE, &Tile("ttre"), &Tile("rtts")),
            When(SW, &Tile("ltts"), &Tile("ttle")),
        ],
        open: [
            Blank,
            Blank,
            When(SE, &Tile("ot"), &Tile("ortt")),
            When(SW, &Tile("ot"), &Tile("ottl")),
        ],
    },
    // south, east
    ForegroundCase {
        solid: [
            When(SW, &Tile("ltti"), &Tile("ttl")),
            When(SE, &Tile("ttls"), &Tile("rtbi")),
            When(SE, &Tile("m"), &Tile("rtb")),
            When(SW, &Tile("ltts"), &Tile("ttle")),
        ],
        open: [
            Blank,
            When(SE, &Tile("oltts"), &Blank),
            When(SE, &Tile("oltt"), &Tile("ortt")),
            When(SW, &Tile("ot"), &Tile("ottl")),
        ],
    },
    // south, north
    ForegroundCase {
        solid: [
            When(SW, &Tile("ltti"), &Tile("l")),
            When(SE, &Tile("ttri"), &Tile("r")),
            When(SE, &Tile("ttre"), &Tile("r")),
            When(SW, &Tile("ltts"), &Tile("l")),
        ],
        open: [
            Blank,
            Blank,
            When(SE, &Tile("ot"), &Tile("ortt")),
            When(SW, &Tile("ot"), &Tile("ottl")),
        ],
    },
    // south, north, east
    ForegroundCase {
        solid: [
            When(SW, &Tile("ltti"), &Tile("l")),
            When(SE, &When(NE, &Tile("m"), &Tile("ttr")), &Tile("rtbi")),
            When(SE, &Tile("m"), &Tile("rtb")),
            When(SW, &Tile("ltts"), &Tile("l")),
        ],
        open: [
            Blank,
            When(SE, &Tile("oltts"), &When(NE, &Tile("obtl"), &Blank)),
            When(SE, &Tile("oltt"), &Tile("ortt")),
            When(SW, &Tile("ot"), &Tile("ottl")),
        ],
    },
    // south, west
    ForegroundCase {
        solid: [
            When(SW, &Tile("rtte"), &Tile("btli")),
            When(SE, &Tile("ttri"), &Tile("rtt")),
            When(SE, &Tile("ttre"), &Tile("rtts")),
            When(SW, &Tile("m"), &Tile("btl")),
        ],
        open: [
            When(SW, &Tile("ottre"), &Blank),
            Blank,
            When(SE, &Tile("ot"), &Tile("ortt")),
            When(SW, &Tile("ottr"), &Tile("ottl")),
        ],
    },
    // south, west, east
    ForegroundCase {
        solid: [
            When(SW, &Tile("t"), &Tile("btli")),
            When(SE, &Tile("t"), &Tile("rtbi")),
            When(SE, &Tile("m"), &Tile("rtb")),
            When(SW, &Tile("m"), &Tile("btl")),
        ],
        open: [
            When(SW, &Tile("ottre"), &Blank),
            When(SE, &Tile("oltts"), &Blank),
            When(SE, &Tile("oltt"), &Tile("ortt")),
            When(SW, &Tile("ottr"), &Tile("ottl")),
        ],
    },
    // south, west, north
    ForegroundCase {
        solid: [
            When(SW, &When(NW, &Tile("m"), &Tile("ltt")), &Tile("btli")),
            When(SE, &Tile("ttri"), &Tile("r")),
            When(SE, &Tile("ttre"), &Tile("r")),
            When(SW, &Tile("m"), &Tile("btl")),
        ],
        open: [
            When(SW, &Tile("ottre"), &When(NW, &Tile("ortb"), &Blank)),
            Blank,
            When(SE, &Tile("ot"), &Tile("ortt")),
            When(SW, &Tile("ottr"), &Tile("ottl")),
        ],
    },
    // surrounded
    ForegroundCase {
        solid: [
            When(SW, &When(NW, &Tile("m"), &Tile("ltt")), &Tile("btli")),
            When(SE, &When(NE, &Tile("m"), &Tile("ttr")), &Tile("rtbi")),
            When(SE, &Tile("m"), &Tile("rtb")),
            When(SW, &Tile("m"), &Tile("btl")),
        ],
        open: [
            When(SW, &Tile("ottre"), &When(NW, &Tile("ortb"), &Blank)),
            When(SE, &Tile("oltts"), &When(NE, &Tile("obtl"), &Blank)),
            When(SE, &Tile("oltt"), &Tile("ortt")),
            When(SW, &Tile("ottr"), &Tile("ottl")),
        ],
    },
];
