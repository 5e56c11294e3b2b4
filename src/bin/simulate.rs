//! Headless autoplay simulator.
//!
//! Plays whole games with autoplay on and no terminal, driving the same
//! controller and timers as the real game on a synthetic clock. Useful for
//! checking how far the pathfinding gets and how the combo/speed curve plays
//! out.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --runs N        Games to play with incrementing seeds (default: 10)
//!   --seed N        First RNG seed (default: 42)
//!   --tiles N       Board size (default: 20)
//!   --max-secs N    Stop a game after N seconds of game time (default: 600)
//!   --greedy        Use the greedy rule instead of pathfinding
//!   --quiet         Only the summary line

use rand::rngs::StdRng;
use rand::SeedableRng;
use serpent::core::{GameConfig, GameController};
use serpent::snake::{format_elapsed, InputCommand, SessionEvent};
use std::time::{Duration, Instant};

struct SimArgs {
    runs: u32,
    seed: u64,
    tiles: i16,
    max_secs: u64,
    greedy: bool,
    quiet: bool,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            runs: 10,
            seed: 42,
            tiles: 20,
            max_secs: 600,
            greedy: false,
            quiet: false,
        }
    }
}

fn parse_args() -> Result<SimArgs, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut sim = SimArgs::default();
    let mut iter = args.iter().skip(1);

    fn number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
        value
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| format!("{flag} requires a number"))
    }

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--runs" => sim.runs = number(arg, iter.next())?,
            "--seed" => sim.seed = number(arg, iter.next())?,
            "--tiles" => sim.tiles = number(arg, iter.next())?,
            "--max-secs" => sim.max_secs = number(arg, iter.next())?,
            "--greedy" => sim.greedy = true,
            "--quiet" => sim.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(sim)
}

fn print_usage() {
    eprintln!(
        "Serpent autoplay simulator\n\
         \n\
         Usage: simulate [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N       Games to play with incrementing seeds (default: 10)\n\
         \x20 --seed N       First RNG seed (default: 42)\n\
         \x20 --tiles N      Board size (default: 20)\n\
         \x20 --max-secs N   Game-time limit per run (default: 600)\n\
         \x20 --greedy       Greedy rule instead of pathfinding\n\
         \x20 --quiet        Only the summary line\n\
         \x20 --help, -h     Show this help"
    );
}

#[derive(Debug, Default, Clone)]
struct RunStats {
    score: u64,
    length: usize,
    elapsed_secs: u64,
    ticks: u64,
    food_eaten: u64,
    best_combo: u64,
    top_speed: u32,
    died: bool,
}

fn simulate_run(config: GameConfig, seed: u64, max_secs: u64) -> RunStats {
    let start = Instant::now();
    let mut now = start;
    let mut controller = GameController::new(config, StdRng::seed_from_u64(seed), now);
    controller.handle_input(InputCommand::ToggleAutoplay, now);

    let mut stats = RunStats::default();
    let limit = start + Duration::from_secs(max_secs);

    // Jump straight to each deadline instead of sleeping
    while let Some(deadline) = controller.next_deadline() {
        if deadline > limit {
            break;
        }
        now = deadline;
        for event in controller.run_due(now) {
            match event {
                SessionEvent::FoodEaten { combo, .. } => {
                    stats.food_eaten += 1;
                    stats.best_combo = stats.best_combo.max(combo);
                }
                SessionEvent::SpeedChanged { to, .. } => {
                    stats.top_speed = stats.top_speed.max(to);
                }
                SessionEvent::GameOver { .. } => stats.died = true,
                _ => {}
            }
        }
    }

    let session = controller.session();
    stats.score = session.score;
    stats.length = session.len();
    stats.elapsed_secs = session.elapsed_secs;
    stats.ticks = session.tick_count;
    stats.top_speed = stats.top_speed.max(session.config.initial_speed);
    stats
}

fn main() {
    let sim = match parse_args() {
        Ok(sim) => sim,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            std::process::exit(1);
        }
    };

    let config = GameConfig {
        tile_count: sim.tiles,
        autoplay_collision_avoidance: !sim.greedy,
        ..GameConfig::default()
    }
    .validated();

    let mut all = Vec::with_capacity(sim.runs as usize);
    for run in 0..sim.runs {
        let seed = sim.seed + run as u64;
        let stats = simulate_run(config.clone(), seed, sim.max_secs);
        if !sim.quiet {
            println!(
                "seed {:>6}  score {:>10}  length {:>4}  time {:>6}  ticks {:>7}  combo x{:<6} speed {:>2}  {}",
                seed,
                stats.score,
                stats.length,
                format_elapsed(stats.elapsed_secs),
                stats.ticks,
                stats.best_combo,
                stats.top_speed,
                if stats.died { "died" } else { "alive" }
            );
        }
        all.push(stats);
    }

    if all.is_empty() {
        return;
    }
    let runs = all.len() as u64;
    let avg_score = all.iter().map(|s| s.score).sum::<u64>() / runs;
    let avg_length = all.iter().map(|s| s.length as u64).sum::<u64>() / runs;
    let best = all.iter().map(|s| s.score).max().unwrap_or(0);
    let deaths = all.iter().filter(|s| s.died).count();
    println!(
        "{} runs on {}x{} ({}): avg score {}, best {}, avg length {}, {} died",
        runs,
        config.tile_count,
        config.tile_count,
        if sim.greedy { "greedy" } else { "pathfind" },
        avg_score,
        best,
        avg_length,
        deaths
    );
}
