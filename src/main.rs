use polyfleet::{
    init_logging, play_game, print_board, print_knowledge, reference_fleet, Fleet,
    PlacementEngine, Referee, ShapeId, TargetingConfig, TargetingEngine, DEFAULT_COLS,
    DEFAULT_ROWS,
};

use clap::{Args, Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct BoardArgs {
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,
    #[arg(long, value_parser = parse_fleet, help = "Fleet manifest, e.g. 1=2,2=1 (default: one of each shape)")]
    fleet: Option<Fleet>,
    #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Place a fleet on an empty grid and print it.
    Place {
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Place an opponent fleet and let the targeting engine sink it.
    Play {
        #[command(flatten)]
        board: BoardArgs,
        #[arg(long, help = "Only follow straight lines of hits, as for line-only fleets")]
        strict_lines: bool,
    },
}

fn parse_fleet(s: &str) -> Result<Fleet, String> {
    s.split(',')
        .map(|entry| {
            let (id, count) = entry
                .split_once('=')
                .ok_or_else(|| format!("expected <id>=<count>, got '{}'", entry))?;
            let id: u8 = id.trim().parse().map_err(|_| format!("invalid ship id '{}'", id))?;
            let count: usize = count
                .trim()
                .parse()
                .map_err(|_| format!("invalid count '{}'", count))?;
            Ok((ShapeId(id), count))
        })
        .collect()
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (run will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Place { board } => {
            let mut rng = make_rng(board.seed);
            let fleet = board.fleet.unwrap_or_else(reference_fleet);
            let mut engine = PlacementEngine::new(board.rows, board.cols, fleet)?;
            engine.place_fleet(&mut rng)?;
            print_board(engine.grid(), engine.board_stats());
        }
        Commands::Play { board, strict_lines } => {
            let mut rng = make_rng(board.seed);
            let fleet = board.fleet.unwrap_or_else(reference_fleet);
            let mut placement = PlacementEngine::new(board.rows, board.cols, fleet.clone())?;
            placement.place_fleet(&mut rng)?;
            println!("Opponent board:");
            print_board(placement.grid(), placement.board_stats());

            let config = TargetingConfig {
                widen_on_stall: !strict_lines,
            };
            let mut targeting = TargetingEngine::with_config(board.rows, board.cols, fleet, config)?;
            let mut referee = Referee::new(placement.into_grid())?;
            let max_shots = board.rows.saturating_mul(board.cols);
            let report = play_game(&mut rng, &mut referee, &mut targeting, max_shots)?;

            println!("\nKnowledge board:");
            print_knowledge(targeting.knowledge_grid());
            println!(
                "{} shots, {} hits, {} ships sunk, fleet {}",
                report.shots,
                report.hits,
                report.sunk.len(),
                if report.cleared { "cleared" } else { "still afloat" }
            );
        }
    }
    Ok(())
}
