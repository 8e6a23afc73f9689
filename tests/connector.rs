use cliff_connector::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

/// Cliff.0: straight piece running east.
/// Cliff.1: cap that closes a run heading east.
/// Cliff.2: turn from east to south.
/// Cliff.3: straight piece running south.
/// Ridge.0: the straight east piece on the back side.
const CATALOG: &str = "\
; connection tiles used by the tests
[Cliff.0]
ConnectionPoint0=0,0
ConnectionPoint0.Directions=00000010
ConnectionPoint0.Side=front
ConnectionPoint1=1,0
ConnectionPoint1.Directions=00100000
ConnectionPoint1.Side=front

[Cliff.1]
ConnectionPoint0=0,0
ConnectionPoint0.Directions=00000010
ConnectionPoint0.Side=front

[Cliff.2]
ConnectionPoint0=0,0
ConnectionPoint0.Directions=00000010
ConnectionPoint0.Side=front
ConnectionPoint1=0,1
ConnectionPoint1.Directions=00001000
ConnectionPoint1.Side=front

[Cliff.3]
ConnectionPoint0=0,0
ConnectionPoint0.Directions=10000000
ConnectionPoint0.Side=front
ConnectionPoint1=0,1
ConnectionPoint1.Directions=00001000
ConnectionPoint1.Side=front

[Ridge.0]
ConnectionPoint0=0,0
ConnectionPoint0.Directions=00000010
ConnectionPoint0.Side=back
ConnectionPoint1=1,0
ConnectionPoint1.Directions=00100000
ConnectionPoint1.Side=back
";

fn cliff() -> ConnectionTileSet {
    ConnectionTileSet::load(CATALOG, "Cliff").unwrap()
}

fn straight_only() -> ConnectionTileSet {
    let cliff = cliff();
    ConnectionTileSet::new("Cliff", vec![cliff.by_index(0).unwrap().clone()])
}

/// Stand-in for the map command that records each placed tile.
#[derive(Default)]
struct PlacementLog(Vec<(String, u32, Point)>);

impl TilePlacer for PlacementLog {
    fn place(&mut self, tile: &ConnectionTile, location: Point) {
        self.0.push((tile.tile_set.clone(), tile.index, location));
    }
}

fn placements(chain: &ConnectionChain) -> Vec<(u32, Point)> {
    chain
        .placements()
        .map(|(tile, location)| (tile.index, location))
        .collect()
}

#[test]
fn straight_run_ends_on_a_cap() {
    let chain = search(Point::new(0, 0), Side::Front, Point::new(3, 0), &cliff()).unwrap();

    assert_eq!(
        placements(&chain),
        vec![(0, Point::new(1, 0)), (1, Point::new(3, 0))]
    );
    assert_eq!(chain.length, 3.0);
    assert_eq!(chain.end, Point::new(3, 0));
}

#[test]
fn straight_run_passes_the_destination() {
    let chain = search(Point::new(0, 0), Side::Front, Point::new(3, 0), &straight_only()).unwrap();

    assert_eq!(
        placements(&chain),
        vec![(0, Point::new(1, 0)), (0, Point::new(3, 0))]
    );
    assert_eq!(chain.length, 4.0);
    assert!(chain.end.x() >= 3);
    assert_eq!(chain.steps[0].exit, Point::new(2, 0));
}

#[test]
fn turns_toward_the_destination() {
    let chain = search(Point::new(0, 0), Side::Front, Point::new(3, 3), &cliff()).unwrap();

    assert_eq!(
        placements(&chain),
        vec![
            (0, Point::new(1, 0)),
            (2, Point::new(3, 0)),
            (3, Point::new(3, 2)),
        ]
    );
    assert_eq!(chain.end, Point::new(3, 3));
    assert!((chain.length - (4.0 + 2f32.sqrt())).abs() < 1e-5);
}

#[test]
fn start_point_is_relative_to_world_coordinates() {
    let chain = search(Point::new(10, -4), Side::Front, Point::new(13, -4), &cliff()).unwrap();

    assert_eq!(
        placements(&chain),
        vec![(0, Point::new(11, -4)), (1, Point::new(13, -4))]
    );
}

#[test]
fn sides_never_connect() {
    let ridge = ConnectionTileSet::load(CATALOG, "Ridge").unwrap();

    assert_eq!(
        search(Point::new(0, 0), Side::Front, Point::new(3, 0), &ridge),
        Err(SearchError::NotFound { expanded: 1 })
    );
    assert!(search(Point::new(0, 0), Side::Back, Point::new(3, 0), &ridge).is_ok());
}

#[test]
fn front_cap_does_not_continue_into_back_tiles() {
    let cliff = cliff();
    let ridge = ConnectionTileSet::load(CATALOG, "Ridge").unwrap();
    let mixed = ConnectionTileSet::new(
        "Mixed",
        vec![
            cliff.by_index(1).unwrap().clone(),
            ridge.by_index(0).unwrap().clone(),
        ],
    );

    let result = search(Point::new(0, 0), Side::Front, Point::new(5, 0), &mixed);
    assert!(matches!(result, Err(SearchError::NotFound { .. })));
}

#[test]
fn empty_catalog_is_not_found() {
    let empty = ConnectionTileSet::new("Cliff", Vec::new());

    assert_eq!(
        search(Point::new(0, 0), Side::Front, Point::new(3, 0), &empty),
        Err(SearchError::NotFound { expanded: 1 })
    );
}

#[test]
fn unreachable_destination_behind_a_one_way_run() {
    // Straight pieces can only head east or west along y = 0.
    let result = search(Point::new(0, 0), Side::Front, Point::new(0, 5), &straight_only());

    assert!(matches!(result, Err(SearchError::NotFound { .. })));
}

#[test]
fn long_runs_are_not_cut_short() {
    // 150 pieces east, one turn, 150 pieces south.
    let chain = search(Point::new(0, 0), Side::Front, Point::new(301, 301), &cliff()).unwrap();

    assert_eq!(chain.len(), 301);
    assert_eq!(chain.end, Point::new(301, 301));
    assert_eq!(chain.steps[150].tile.index, 2);
    assert!((chain.length - (600.0 + 2f32.sqrt())).abs() < 1e-2);
}

#[test]
fn large_unreachable_region_is_not_found() {
    // Only odd columns are reachable south of the first row.
    let result = search(Point::new(0, 0), Side::Front, Point::new(120, 120), &cliff());

    assert!(matches!(result, Err(SearchError::NotFound { .. })));
}

#[test]
fn distant_endpoints_do_not_overflow() {
    let result = search(
        Point::new(-2_000_000_000, 0),
        Side::Back,
        Point::new(2_000_000_000, 0),
        &cliff(),
    );

    assert_eq!(result, Err(SearchError::NotFound { expanded: 1 }));
}

#[test]
fn cyclic_tiles_terminate() {
    // Two U-turn pieces that feed each other forever.
    let source = "\
[Loop.0]
ConnectionPoint0=0,0
ConnectionPoint0.Directions=00000010
ConnectionPoint1=0,1
ConnectionPoint1.Directions=00000010
[Loop.1]
ConnectionPoint0=0,0
ConnectionPoint0.Directions=00100000
ConnectionPoint1=0,1
ConnectionPoint1.Directions=00100000
";
    let tile_set = ConnectionTileSet::load(source, "Loop").unwrap();

    let result = search(Point::new(0, 0), Side::Front, Point::new(6, 0), &tile_set);
    assert!(matches!(result, Err(SearchError::NotFound { .. })));
}

#[test]
fn repeated_searches_are_identical() {
    let tile_set = cliff();

    let first = search(Point::new(0, 0), Side::Front, Point::new(7, 5), &tile_set);
    let second = search(Point::new(0, 0), Side::Front, Point::new(7, 5), &tile_set);

    assert_eq!(first, second);
}

#[test]
fn catalog_is_shared_across_threads() {
    let catalog = TileCatalog::load_all(CATALOG).unwrap();
    let tile_set = catalog.tile_set("cliff").unwrap();
    let expected = search(Point::new(0, 0), Side::Front, Point::new(5, 3), &tile_set);

    let handles = (0..4)
        .map(|_| {
            let tile_set = Arc::clone(&tile_set);
            thread::spawn(move || search(Point::new(0, 0), Side::Front, Point::new(5, 3), &tile_set))
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn chain_is_applied_in_order() {
    let chain = search(Point::new(0, 0), Side::Front, Point::new(3, 3), &cliff()).unwrap();

    let mut placed = PlacementLog::default();
    chain.apply(&mut placed);

    assert_eq!(
        placed.0,
        vec![
            ("Cliff".to_string(), 0, Point::new(1, 0)),
            ("Cliff".to_string(), 2, Point::new(3, 0)),
            ("Cliff".to_string(), 3, Point::new(3, 2)),
        ]
    );
}

#[test]
fn malformed_catalog_never_loads() {
    let source = CATALOG.replace(
        "ConnectionPoint1.Directions=00001000\nConnectionPoint1.Side=front\n\n[Cliff.3]",
        "ConnectionPoint1.Directions=0000100\nConnectionPoint1.Side=front\n\n[Cliff.3]",
    );

    assert_eq!(
        ConnectionTileSet::load(&source, "Cliff"),
        Err(CatalogError::InvalidDirections {
            section: "Cliff.2".to_string(),
            point: 1,
            value: "0000100".to_string(),
        })
    );
    assert!(TileCatalog::load_all(&source).is_err());
}
