use tileseam_core::{Grid, GridPos, LayerName, PlacementGrid};
use tileseam_system_corners::{CornerResolver, CornerSummary};
use tileseam_system_quadrants::QuadrantResolver;
use tileseam_system_selection::{SeamSelector, SelectorSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Terrain {
    Ground,
    Moss,
    Wall,
    Hole,
}

use Terrain::{Ground as G, Hole as H, Moss as M, Wall as W};

fn selectors() -> SelectorSet<Terrain> {
    SelectorSet::from_selectors([
        SeamSelector::for_terrain("wall", W).expect("valid layer"),
        SeamSelector::for_terrain("hole", H).expect("valid layer"),
        SeamSelector::for_terrain("moss", M)
            .expect("valid layer")
            .with_compatible([G]),
        SeamSelector::for_terrain("ground", G).expect("valid layer"),
    ])
    .expect("unique layers")
}

fn first_pass(grid: &Grid<Terrain>, selectors: &SelectorSet<Terrain>) -> PlacementGrid {
    QuadrantResolver::new().resolve(grid, selectors)
}

fn tile_at(placements: &PlacementGrid, column: u32, row: u32) -> (String, String) {
    let tile = placements
        .get(GridPos::new(column, row))
        .and_then(Option::as_ref)
        .expect("sub-cell is claimed");
    (
        tile.layer().as_str().to_owned(),
        tile.variant().as_str().to_owned(),
    )
}

fn owned(layer: &str, variant: &str) -> (String, String) {
    (layer.to_owned(), variant.to_owned())
}

fn default_layer() -> LayerName {
    LayerName::new("base").expect("valid layer")
}

#[test]
fn majority_layer_fills_the_corner() {
    // Two ground quadrants and one wall quadrant meet at the marker.
    let grid = Grid::from_rows(vec![vec![W, G], vec![G, W]]).expect("grid");
    let selectors = selectors();
    let mut placements = first_pass(&grid, &selectors);
    assert_eq!(tile_at(&placements, 2, 2), owned("wall", "btrc"));

    let summary = CornerResolver::new().resolve(&mut placements, &default_layer());

    assert_eq!(tile_at(&placements, 2, 2), owned("ground", "ortb"));
    assert_eq!(tile_at(&placements, 1, 1), owned("ground", "oltt"));
    assert_eq!(
        summary,
        CornerSummary {
            markers: 4,
            majority: 4,
            fallback: 0,
        }
    );
}

#[test]
fn three_distinct_layers_fall_back_to_the_default() {
    let grid = Grid::from_rows(vec![vec![W, G], vec![H, W]]).expect("grid");
    let selectors = selectors();
    let mut placements = first_pass(&grid, &selectors);

    let summary = CornerResolver::new().resolve(&mut placements, &default_layer());

    assert_eq!(tile_at(&placements, 2, 2), owned("base", "ortb"));
    assert_eq!(tile_at(&placements, 1, 1), owned("base", "oltt"));
    assert_eq!(summary.markers, 2);
    assert_eq!(summary.fallback, 2);
    assert_eq!(summary.majority, 0);
}

#[test]
fn selector_context_counts_compatible_terrain_as_agreement() {
    let grid = Grid::from_rows(vec![vec![W, G], vec![M, W]]).expect("grid");
    let selectors = selectors();
    let resolver = CornerResolver::new();

    let mut by_equality = first_pass(&grid, &selectors);
    let _ = resolver.resolve(&mut by_equality, &default_layer());
    assert_eq!(tile_at(&by_equality, 2, 2), owned("base", "ortb"));

    let mut by_context = first_pass(&grid, &selectors);
    let _ = resolver.resolve_with_context(&mut by_context, &default_layer(), &grid, &selectors);
    assert_eq!(tile_at(&by_context, 2, 2), owned("moss", "ortb"));
}

#[test]
fn overlays_without_markers_are_left_untouched() {
    let grid = Grid::from_rows(vec![vec![G, G, G], vec![G, W, G], vec![G, G, G]]).expect("grid");
    let selectors = selectors();
    let mut placements = first_pass(&grid, &selectors);
    let before = placements.clone();

    let summary = CornerResolver::new().resolve(&mut placements, &default_layer());

    assert_eq!(summary, CornerSummary::default());
    assert_eq!(placements, before);
}

#[test]
fn no_marker_survives_the_pass() {
    let grid = Grid::from_rows(vec![
        vec![W, G, H, G],
        vec![G, W, G, H],
        vec![M, G, W, G],
        vec![W, M, G, W],
    ])
    .expect("grid");
    let selectors = selectors();
    let resolver = CornerResolver::new();
    let mut placements = first_pass(&grid, &selectors);

    let summary = resolver.resolve_with_context(&mut placements, &default_layer(), &grid, &selectors);

    assert!(summary.markers > 0);
    assert_eq!(summary.markers, summary.majority + summary.fallback);
    for (pos, tile) in placements.iter() {
        if let Some(tile) = tile {
            assert!(!resolver.is_marker(pos, tile), "marker left at {pos:?}");
        }
    }
}
