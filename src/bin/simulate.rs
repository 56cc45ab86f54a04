//! Simulator CLI: plays a batch of games with automatic strategies and
//! reports the team win counts.
//!
//! Home entry uses raw square sums (see `board::advance`), which keeps
//! seats 2 and 3 out of their home stretches. Automatic games therefore
//! run into `--max-steps` and the win counters stay at zero unless the
//! configuration starts from a prepared position.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use rust_dog::core::{GameConfig, PlayerMap, Team};
use rust_dog::games::dog::Dog;
use rust_dog::strategy::{play_game, FirstActionStrategy, RandomStrategy, Strategy};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Play Dog games between automatic strategies")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; game `n` uses `seed + n`. Seeds from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// TOML game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Action limit per game
    #[arg(long, default_value = "20000")]
    max_steps: usize,

    /// Strategy for every seat
    #[arg(long, value_enum, default_value = "random")]
    strategy: StrategyKind,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyKind {
    Random,
    First,
}

impl StrategyKind {
    fn build(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::new(seed)),
            StrategyKind::First => Box::new(FirstActionStrategy),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    info!(games = args.games, strategy = ?args.strategy, "starting simulation");

    let start = Instant::now();
    let mut wins: PlayerMap<u32> = PlayerMap::with_default();
    let mut team_wins = [0u32; 2];
    let mut unfinished = 0u32;
    let mut total_steps = 0usize;

    for game_num in 1..=args.games {
        let seed = match args.seed {
            Some(base) => base.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };
        let mut dog = Dog::new_game(config.clone().with_seed(seed))?;
        let mut strategies =
            PlayerMap::new(|seat| args.strategy.build(seed.wrapping_mul(31).wrapping_add(seat.index() as u64)));

        let outcome = play_game(&mut dog, &mut strategies, args.max_steps);
        total_steps += outcome.steps;

        match outcome.result {
            Some(result) => {
                let slot = Team::ALL.iter().position(|&t| t == result.team).unwrap_or(0);
                team_wins[slot] += 1;
                for seat in result.team.members() {
                    wins[seat] += 1;
                }
                info!(game = game_num, seed, team = ?result.team, rounds = outcome.rounds, steps = outcome.steps, "game finished");
            }
            None => {
                unfinished += 1;
                warn!(game = game_num, seed, steps = outcome.steps, "game hit the step limit");
            }
        }
    }

    let elapsed = start.elapsed();
    info!(
        even = team_wins[0],
        odd = team_wins[1],
        unfinished,
        avg_steps = total_steps as f64 / f64::from(args.games.max(1)),
        elapsed_ms = elapsed.as_millis() as u64,
        "simulation complete"
    );
    for (seat, count) in wins.iter() {
        info!(%seat, wins = count, "seat total");
    }
    Ok(())
}
