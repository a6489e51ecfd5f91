use std::collections::HashSet;

use tileseam_core::{Grid, GridPos, PlacementGrid, Quadrant};
use tileseam_system_quadrants::QuadrantResolver;
use tileseam_system_selection::{SeamSelector, SelectorSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Terrain {
    Ground,
    Wall,
    Hole,
}

use Terrain::{Ground as G, Hole as H, Wall as W};

fn selectors() -> SelectorSet<Terrain> {
    SelectorSet::from_selectors([
        SeamSelector::for_terrain("wall", W).expect("valid layer"),
        SeamSelector::for_terrain("ground", G).expect("valid layer"),
    ])
    .expect("unique layers")
}

fn resolve(rows: Vec<Vec<Terrain>>) -> PlacementGrid {
    let grid = Grid::from_rows(rows).expect("rectangular grid");
    QuadrantResolver::new().resolve(&grid, &selectors())
}

fn variant_at(placements: &PlacementGrid, cell: (u32, u32), quadrant: Quadrant) -> (String, String) {
    let sub_cell = quadrant.sub_cell(GridPos::new(cell.0, cell.1));
    let tile = placements
        .get(sub_cell)
        .and_then(Option::as_ref)
        .unwrap_or_else(|| panic!("quadrant {quadrant:?} of {cell:?} should be claimed"));
    (
        tile.layer().as_str().to_owned(),
        tile.variant().as_str().to_owned(),
    )
}

#[test]
fn uniform_terrain_resolves_to_interior_everywhere() {
    let placements = resolve(vec![vec![G; 4]; 3]);
    for (pos, tile) in placements.iter() {
        let tile = tile
            .as_ref()
            .unwrap_or_else(|| panic!("sub-cell {pos:?} left empty"));
        assert_eq!(tile.layer().as_str(), "ground");
        assert_eq!(
            tile.variant().as_str(),
            "m",
            "border sub-cell {pos:?} must not pick up a corner variant"
        );
    }
}

#[test]
fn isolated_singleton_uses_each_convex_corner_once() {
    let placements = resolve(vec![vec![G, G, G], vec![G, W, G], vec![G, G, G]]);

    let corners: Vec<_> = Quadrant::ALL
        .into_iter()
        .map(|quadrant| variant_at(&placements, (1, 1), quadrant))
        .collect();
    assert!(corners.iter().all(|(layer, _)| layer == "wall"));

    let names: Vec<_> = corners.iter().map(|(_, name)| name.as_str()).collect();
    assert_eq!(names, ["ttl", "rtt", "btr", "ltb"]);
    let distinct: HashSet<_> = names.iter().collect();
    assert_eq!(distinct.len(), 4, "each convex corner must be used exactly once");
}

#[test]
fn ground_around_a_singleton_wraps_it_with_concave_corners() {
    let placements = resolve(vec![vec![G, G, G], vec![G, W, G], vec![G, G, G]]);
    assert_eq!(
        variant_at(&placements, (0, 0), Quadrant::BottomRight),
        ("ground".to_owned(), "rtb".to_owned())
    );
    assert_eq!(
        variant_at(&placements, (1, 0), Quadrant::BottomLeft),
        ("ground".to_owned(), "rtbe".to_owned())
    );
}

#[test]
fn overlay_has_double_dimensions() {
    for (width, height) in [(1, 1), (5, 2), (3, 7)] {
        let grid = Grid::filled(width, height, G).expect("non-empty grid");
        let placements = QuadrantResolver::new().resolve(&grid, &selectors());
        assert_eq!(placements.width(), width * 2);
        assert_eq!(placements.height(), height * 2);
        assert_eq!(placements.len(), (width * height * 4) as usize);
    }
}

#[test]
fn unclaimed_terrain_leaves_quadrants_empty() {
    let placements = resolve(vec![vec![G, H], vec![G, G]]);
    for quadrant in Quadrant::ALL {
        let sub_cell = quadrant.sub_cell(GridPos::new(1, 0));
        assert_eq!(placements.get(sub_cell), Some(&None), "{quadrant:?}");
    }
    assert!(placements
        .get(GridPos::new(0, 0))
        .and_then(Option::as_ref)
        .is_some());
}

#[test]
fn diagonal_only_agreement_marks_an_open_corner() {
    let placements = resolve(vec![vec![W, G], vec![G, W]]);
    assert_eq!(
        variant_at(&placements, (1, 1), Quadrant::TopLeft),
        ("wall".to_owned(), "btrc".to_owned())
    );
    assert_eq!(
        variant_at(&placements, (0, 0), Quadrant::BottomRight),
        ("wall".to_owned(), "ttlc".to_owned())
    );
}

#[test]
fn edges_run_through_or_end_depending_on_the_far_neighbour() {
    let through = resolve(vec![vec![G, G, G], vec![W, W, W], vec![G, G, G]]);
    assert_eq!(variant_at(&through, (1, 1), Quadrant::TopLeft).1, "t");

    let ending = resolve(vec![vec![G, G, G], vec![W, W, G], vec![G, G, G]]);
    assert_eq!(variant_at(&ending, (1, 1), Quadrant::TopLeft).1, "rtte");
}
