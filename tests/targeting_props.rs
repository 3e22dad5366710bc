use polyfleet::{
    line_fleet, reference_fleet, Fleet, PlacementEngine, Referee, TargetingConfig,
    TargetingEngine,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn setup(seed: u64, fleet: Fleet, config: TargetingConfig) -> (SmallRng, Referee, TargetingEngine) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut placement = PlacementEngine::new(10, 10, fleet.clone()).unwrap();
    placement.place_fleet(&mut rng).unwrap();
    let referee = Referee::new(placement.into_grid()).unwrap();
    let targeting = TargetingEngine::with_config(10, 10, fleet, config).unwrap();
    (rng, referee, targeting)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn next_attack_never_repeats(seed in any::<u64>(), widen in any::<bool>()) {
        let fleet = if widen { reference_fleet() } else { line_fleet() };
        let config = TargetingConfig { widen_on_stall: widen };
        let (mut rng, mut referee, mut targeting) = setup(seed, fleet, config);

        while !targeting.all_sunk() {
            let (x, y) = targeting.next_attack(&mut rng).unwrap();
            prop_assert!(!targeting.shots().contains(&(x, y)));
            prop_assert!(targeting.is_available(x, y));
            let outcome = referee.fire(x, y).unwrap();
            targeting.register_attack(x, y, outcome.is_hit(), outcome.is_sunk()).unwrap();
        }
        prop_assert!(referee.all_sunk());
    }

    #[test]
    fn sinking_clears_leads_and_decrements_once(seed in any::<u64>()) {
        let config = TargetingConfig { widen_on_stall: true };
        let (mut rng, mut referee, mut targeting) = setup(seed, reference_fleet(), config);

        while let Some((x, y)) = targeting.next_attack(&mut rng) {
            let before = targeting.remaining_fleet().total();
            let outcome = referee.fire(x, y).unwrap();
            let sunk = targeting
                .register_attack(x, y, outcome.is_hit(), outcome.is_sunk())
                .unwrap();
            if outcome.is_sunk() {
                let id = sunk.unwrap();
                prop_assert_eq!(targeting.remaining_fleet().total(), before - 1);
                prop_assert!(targeting.current_cluster().is_empty());
                prop_assert_eq!(targeting.hit_queue().count(), 0);
                prop_assert!(matches!(outcome, polyfleet::ShotOutcome::Sunk(actual) if actual == id));
            } else {
                prop_assert!(sunk.is_none());
                prop_assert_eq!(targeting.remaining_fleet().total(), before);
            }
            if targeting.all_sunk() {
                break;
            }
        }
        prop_assert!(targeting.all_sunk());
    }
}
