mod input;
mod ui;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{handle_game_input, GameOverlay, InputResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use serpent::build_info;
use serpent::core::constants::FRAME_POLL_MS;
use serpent::core::{load_config, GameConfig, GameController, LogLevel};
use serpent::history::{history_path, load_history, record_game_at, Leaderboard};
use serpent::snake::{InputCommand, SessionEvent};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Command-line overrides on top of `config.json`.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    tiles: Option<i16>,
    speed: Option<u32>,
    seed: Option<u64>,
    autoplay: bool,
    greedy: bool,
}

impl CliArgs {
    fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(tiles) = self.tiles {
            config.tile_count = tiles;
        }
        if let Some(speed) = self.speed {
            config.initial_speed = speed;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.greedy {
            config.autoplay_collision_avoidance = false;
        }
        config.validated()
    }
}

enum CliCommand {
    Play(CliArgs),
    Help,
    Version,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("{} requires a number", flag))
}

fn parse_args(args: &[String]) -> Result<CliCommand, String> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--tiles" => cli.tiles = Some(parse_value(arg, iter.next())?),
            "--speed" => cli.speed = Some(parse_value(arg, iter.next())?),
            "--seed" => cli.seed = Some(parse_value(arg, iter.next())?),
            "--autoplay" => cli.autoplay = true,
            "--greedy" => cli.greedy = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(CliCommand::Play(cli))
}

fn print_usage() {
    println!(
        "Serpent - toroidal combo snake\n\
         \n\
         Usage: serpent [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --tiles N      Board size in cells per side (default: 20)\n\
         \x20 --speed N      Starting speed in cells per second (default: 5)\n\
         \x20 --seed N       Fixed seed for food placement\n\
         \x20 --autoplay     Start with autoplay on\n\
         \x20 --greedy       Autoplay heads straight for food without pathfinding\n\
         \x20 --version, -v  Show version information\n\
         \x20 --help, -h     Show this help\n\
         \n\
         Keys: arrows steer, A autoplay, R restart, H history, Q quit"
    );
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(CliCommand::Play(cli)) => cli,
        Ok(CliCommand::Help) => {
            print_usage();
            return Ok(());
        }
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_string());
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'serpent --help' for usage.");
            std::process::exit(1);
        }
    };

    let config = cli.apply(load_config());
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = Instant::now();
    let mut controller = GameController::new(config, rng, now);
    if cli.autoplay {
        controller.handle_input(InputCommand::ToggleAutoplay, now);
    }

    let mut board = load_history();
    let history_file = history_path().ok();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut controller, &mut board, history_file);

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut GameController<StdRng>,
    board: &mut Leaderboard,
    history_file: Option<PathBuf>,
) -> io::Result<()> {
    let mut overlay = GameOverlay::None;
    let frame_budget = Duration::from_millis(FRAME_POLL_MS);

    loop {
        let snapshot = controller.snapshot();
        let log = controller.log();
        let shown_board: &Leaderboard = board;
        terminal.draw(|frame| ui::draw_ui(frame, &snapshot, log, shown_board, overlay))?;

        // Sleep until input arrives or the next timer is due
        let now = Instant::now();
        let timeout = controller
            .next_deadline()
            .map_or(frame_budget, |deadline| {
                deadline.saturating_duration_since(now).min(frame_budget)
            });

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_game_input(key, controller, &mut overlay, Instant::now()) {
                        InputResult::Quit => break,
                        InputResult::Continue => {}
                        InputResult::Events(events) => {
                            record_finished_games(&events, controller, board, &history_file)
                        }
                    }
                }
            }
        }

        let events = controller.run_due(Instant::now());
        record_finished_games(&events, controller, board, &history_file);
    }
    Ok(())
}

/// Put finished games on the leaderboard and persist it. A failed save is
/// reported in the event log and the game carries on.
fn record_finished_games(
    events: &[SessionEvent],
    controller: &mut GameController<StdRng>,
    board: &mut Leaderboard,
    history_file: &Option<PathBuf>,
) {
    for event in events {
        let SessionEvent::GameOver { record } = event else {
            continue;
        };
        let rank = match history_file {
            Some(path) => match record_game_at(path, board, record.clone()) {
                Ok(rank) => rank,
                Err(e) => {
                    controller
                        .log_mut()
                        .add_log_entry(format!("History not saved: {}", e), LogLevel::Warning);
                    continue;
                }
            },
            None => board.insert(record.clone()),
        };
        if let Some(rank) = rank {
            controller
                .log_mut()
                .add_log_entry(format!("New #{} on the board!", rank), LogLevel::Highlight);
        }
    }
}
