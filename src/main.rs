use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Instant;

use arcade_snake::config::{Difficulty, FRAME_INTERVAL, GameSettings, IDLE_GOLDEN_SPAWN_PERIOD};
use arcade_snake::game::{GameEngine, TickOutcome};
use arcade_snake::input::{GameInput, InputHandler};
use arcade_snake::renderer;
use arcade_snake::score::{load_best_score, record_best_score};
use arcade_snake::terminal_runtime::{AppTerminal, TerminalSession, restore_terminal};
use arcade_snake::ui::hud::HudInfo;
use clap::Parser;
use log::{LevelFilter, info, warn};
use simplelog::{Config, WriteLogger};

const LOG_FILE_NAME: &str = "arcade-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Difficulty tier: tick speed, grid size and obstacle count.
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,

    /// Start without obstacles.
    #[arg(long = "no-obstacles")]
    no_obstacles: bool,

    /// Seed the random generator for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the log here instead of the local data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref());

    let best_score = match load_best_score() {
        Ok(score) => score,
        Err(error) => {
            warn!("ignoring unreadable best score: {error}");
            eprintln!("Warning: {error}; starting from 0");
            0
        }
    };

    install_panic_hook();

    let mut session = TerminalSession::enter()?;
    run(session.terminal_mut(), &cli, best_score)
}

fn run(terminal: &mut AppTerminal, cli: &Cli, best_score: u32) -> io::Result<()> {
    let settings = GameSettings {
        difficulty: cli.difficulty,
        obstacles_enabled: !cli.no_obstacles,
        ..GameSettings::default()
    };
    let mut engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(settings, seed),
        None => GameEngine::new(settings),
    };
    engine.reset(settings.difficulty, settings.obstacles_enabled);
    info!("session started: {settings:?}");

    let mut input = InputHandler::new();
    let mut best_score = best_score;
    let mut run_start_best = best_score;
    let mut last_tick = Instant::now();
    let mut last_idle_roll = Instant::now();

    loop {
        terminal.draw(|frame| {
            renderer::render(
                frame,
                &engine,
                HudInfo {
                    best_score,
                    run_start_best,
                },
            );
        })?;

        if let Some(game_input) = input.poll_input(FRAME_INTERVAL)? {
            if matches!(game_input, GameInput::Quit) {
                break;
            }

            if matches!(game_input, GameInput::Confirm) && !engine.is_running() {
                run_start_best = best_score;
            }
            handle_input(&mut engine, game_input);
        }

        if last_tick.elapsed() >= engine.tick_interval() {
            last_tick = Instant::now();
            if let TickOutcome::GameOver { final_score, .. } = engine.tick() {
                best_score = persist_best_score(final_score, best_score);
            }
        }

        if last_idle_roll.elapsed() >= IDLE_GOLDEN_SPAWN_PERIOD {
            last_idle_roll = Instant::now();
            engine.maybe_spawn_idle_golden_food();
        }
    }

    info!("session finished, best score {best_score}");
    Ok(())
}

fn handle_input(engine: &mut GameEngine, input: GameInput) {
    let settings = *engine.settings();

    match input {
        GameInput::Direction(direction) => {
            let _ = engine.set_direction(direction);
        }
        GameInput::Confirm => engine.start(),
        GameInput::Pause => engine.toggle_pause(),
        GameInput::Reset => engine.restart(),
        GameInput::SelectDifficulty(difficulty) => {
            engine.reset(difficulty, settings.obstacles_enabled);
        }
        GameInput::ToggleObstacles => {
            engine.reset(settings.difficulty, !settings.obstacles_enabled);
        }
        GameInput::Quit => {}
    }
}

fn persist_best_score(final_score: u32, best_score: u32) -> u32 {
    if final_score <= best_score {
        return best_score;
    }

    match record_best_score(final_score) {
        Ok(true) => info!("new best score {final_score}"),
        Ok(false) => {}
        Err(error) => warn!("failed to save best score: {error}"),
    }
    final_score
}

fn init_logging(path: Option<&Path>) {
    let path = path.map_or_else(default_log_path, Path::to_path_buf);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let result = File::create(&path)
        .map_err(|error| error.to_string())
        .and_then(|file| {
            WriteLogger::init(LevelFilter::Info, Config::default(), file)
                .map_err(|error| error.to_string())
        });

    if let Err(error) = result {
        eprintln!("Logging disabled ({}): {error}", path.display());
    }
}

fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push("arcade-snake");
    base.push(LOG_FILE_NAME);
    base
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
