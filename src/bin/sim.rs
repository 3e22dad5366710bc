use clap::Parser;
use polyfleet::{
    init_logging, play_game, reference_fleet, PlacementEngine, Referee, TargetingConfig,
    TargetingEngine, DEFAULT_COLS, DEFAULT_ROWS,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Play seeded games of the targeting engine against the reference fleet and
/// print a JSON summary.
#[derive(Parser)]
struct Args {
    seed: u64,
    #[arg(long, default_value_t = 1)]
    games: u64,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut shots = Vec::new();
    let mut cleared = 0usize;
    for game in 0..args.games {
        let mut rng = SmallRng::seed_from_u64(args.seed.wrapping_add(game));
        let fleet = reference_fleet();

        let mut placement = PlacementEngine::new(DEFAULT_ROWS, DEFAULT_COLS, fleet.clone())?;
        placement.place_fleet(&mut rng)?;
        let mut referee = Referee::new(placement.into_grid())?;

        let config = TargetingConfig { widen_on_stall: true };
        let mut targeting = TargetingEngine::with_config(DEFAULT_ROWS, DEFAULT_COLS, fleet, config)?;
        let max_shots = DEFAULT_ROWS * DEFAULT_COLS;
        let report = play_game(&mut rng, &mut referee, &mut targeting, max_shots)?;

        if report.cleared {
            cleared += 1;
        }
        shots.push(report.shots);
    }

    let mean = if shots.is_empty() {
        0.0
    } else {
        shots.iter().sum::<usize>() as f64 / shots.len() as f64
    };
    let result = json!({
        "seed": args.seed,
        "games": args.games,
        "cleared": cleared,
        "min_shots": shots.iter().min(),
        "max_shots": shots.iter().max(),
        "mean_shots": mean,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
