use polyfleet::{
    line_fleet, play_game, reference_fleet, EngineError, Grid, PlacementEngine, Referee,
    ShapeId, ShotOutcome, TargetingConfig, TargetingEngine, Tile,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn grid_with(rows: usize, cols: usize, ships: &[(ShapeId, &[(usize, usize)])]) -> Grid<Tile> {
    let mut grid = Grid::new(rows, cols, Tile::Water).unwrap();
    for (id, cells) in ships {
        for &(x, y) in cells.iter() {
            grid.set(x, y, Tile::Ship(*id)).unwrap();
        }
    }
    grid
}

#[test]
fn test_referee_outcomes() {
    let grid = grid_with(5, 5, &[(ShapeId(1), &[(1, 1), (1, 2)])]);
    let mut referee = Referee::new(grid).unwrap();
    assert_eq!(referee.ship_count(), 1);
    assert_eq!(referee.fire(0, 0).unwrap(), ShotOutcome::Miss);
    assert_eq!(referee.fire(1, 2).unwrap(), ShotOutcome::Hit);
    assert!(!referee.all_sunk());
    assert_eq!(referee.fire(1, 1).unwrap(), ShotOutcome::Sunk(ShapeId(1)));
    assert!(referee.all_sunk());
    assert_eq!(
        referee.fire(1, 1).unwrap_err(),
        EngineError::AlreadyAttacked { x: 1, y: 1 }
    );
    assert_eq!(
        referee.fire(5, 0).unwrap_err(),
        EngineError::OutOfBounds { x: 5, y: 0 }
    );
}

#[test]
fn test_referee_separates_diagonal_twins() {
    let grid = grid_with(
        4,
        4,
        &[(ShapeId(1), &[(0, 0), (1, 0)]), (ShapeId(1), &[(2, 1), (3, 1)])],
    );
    let mut referee = Referee::new(grid).unwrap();
    assert_eq!(referee.ship_count(), 2);
    referee.fire(0, 0).unwrap();
    assert_eq!(referee.fire(1, 0).unwrap(), ShotOutcome::Sunk(ShapeId(1)));
    assert_eq!(referee.ships_afloat(), 1);
}

#[test]
fn test_line_fleet_cleared_with_plain_heuristic() {
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = line_fleet();
        let mut placement = PlacementEngine::new(10, 10, fleet.clone()).unwrap();
        placement.place_fleet(&mut rng).unwrap();
        let mut referee = Referee::new(placement.into_grid()).unwrap();
        let mut targeting = TargetingEngine::new(10, 10, fleet.clone()).unwrap();

        let report = play_game(&mut rng, &mut referee, &mut targeting, 100).unwrap();
        assert!(report.cleared, "seed {} left ships afloat", seed);
        assert!(targeting.all_sunk());
        assert_eq!(report.sunk.len(), fleet.total());
        assert_eq!(report.hits, 2 + 2 + 3 + 3 + 4);
        assert!(report.shots <= 100);
    }
}

#[test]
fn test_reference_fleet_cleared_with_widening() {
    let config = TargetingConfig { widen_on_stall: true };
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = reference_fleet();
        let mut placement = PlacementEngine::new(10, 10, fleet.clone()).unwrap();
        placement.place_fleet(&mut rng).unwrap();
        let mut referee = Referee::new(placement.into_grid()).unwrap();
        let mut targeting = TargetingEngine::with_config(10, 10, fleet, config).unwrap();

        let report = play_game(&mut rng, &mut referee, &mut targeting, 100).unwrap();
        assert!(report.cleared, "seed {} left ships afloat", seed);
        assert_eq!(report.hits, 27);
        let mut sunk = report.sunk.clone();
        sunk.sort();
        assert_eq!(sunk, (1..=7).map(ShapeId).collect::<Vec<_>>());
    }
}

#[test]
fn test_shot_cap_stops_game_early() {
    let mut rng = SmallRng::seed_from_u64(4);
    let fleet = line_fleet();
    let mut placement = PlacementEngine::new(10, 10, fleet.clone()).unwrap();
    placement.place_fleet(&mut rng).unwrap();
    let mut referee = Referee::new(placement.into_grid()).unwrap();
    let mut targeting = TargetingEngine::new(10, 10, fleet).unwrap();

    let report = play_game(&mut rng, &mut referee, &mut targeting, 5).unwrap();
    assert_eq!(report.shots, 5);
    assert_eq!(targeting.shots().len(), 5);
    assert!(!report.cleared);
    assert!(!referee.all_sunk());

    let none = play_game(&mut rng, &mut referee, &mut targeting, 0).unwrap();
    assert_eq!(none.shots, 0);
    assert_eq!(targeting.shots().len(), 5);
}
