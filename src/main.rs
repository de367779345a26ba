use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use tile_snake::config::{self, BoardConfig};
use tile_snake::error::Error;
use tile_snake::game::GameSession;
use tile_snake::input::GameInput;
use tile_snake::terminal_runtime::{TerminalSession, restore_terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "tile-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file. Defaults to `tile-snake/config.json` in the platform
    /// config directory, when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells.
    #[arg(long)]
    columns: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    rows: Option<u16>,

    /// Number of apples spawned at once.
    #[arg(long)]
    apples: Option<usize>,

    /// Ticks per snake move.
    #[arg(long)]
    cadence: Option<u32>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for apple placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many ticks without a terminal and print the final state as JSON.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Write the resolved configuration to the default config path and exit.
    #[arg(long)]
    save_config: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("tile-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = resolve_config(&cli)?;

    if cli.save_config {
        return save_config(&config);
    }

    if let Some(ticks) = cli.headless {
        init_logging_to_stderr();
        return run_headless(&config, ticks);
    }

    init_logging_to_file()?;
    install_panic_hook();
    run_interactive(&config)
}

fn resolve_config(cli: &Cli) -> Result<BoardConfig, Error> {
    let mut config = BoardConfig::load(cli.config.as_deref())?;

    if let Some(columns) = cli.columns {
        config.columns = columns;
    }
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(apples) = cli.apples {
        config.apple_count = apples;
    }
    if let Some(cadence) = cli.cadence {
        config.cadence = cadence;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate()?;
    Ok(config)
}

fn save_config(config: &BoardConfig) -> Result<(), Error> {
    let Some(path) = config::default_config_path() else {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "no config directory on this platform",
        )));
    };

    config::save_to_path(&path, config)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn run_headless(config: &BoardConfig, ticks: u64) -> Result<(), Error> {
    let mut session = GameSession::new(config)?;
    for _ in 0..ticks {
        session.tick();
    }

    info!(ticks, score = session.score, "headless run finished");
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}

fn run_interactive(config: &BoardConfig) -> Result<(), Error> {
    let mut terminal = TerminalSession::enter()?;
    let mut session = GameSession::new(config)?;
    let tick_interval = Duration::from_millis(config.tick_interval_ms);
    let mut next_tick = Instant::now() + tick_interval;

    terminal.draw(&session.snapshot(), config.tile_width)?;

    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if let Some(input) = terminal.poll_input(timeout)? {
            if input == GameInput::Quit {
                break;
            }

            let before = session.status;
            session.apply_input(input);
            if session.status != before {
                terminal.draw(&session.snapshot(), config.tile_width)?;
            }
            continue;
        }

        let now = Instant::now();
        if now < next_tick {
            continue;
        }

        session.tick();
        next_tick += tick_interval;
        if next_tick < now {
            // Skip ticks lost to a stall instead of replaying them in a burst.
            next_tick = now + tick_interval;
        }

        terminal.draw(&session.snapshot(), config.tile_width)?;
    }

    info!(
        score = session.score,
        length = session.snake.length(),
        ticks = session.tick_count,
        "session ended"
    );
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_logging_to_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();
}

/// Logs go to a file while the alternate screen owns stdout.
fn init_logging_to_file() -> Result<(), Error> {
    let dir = config::log_dir();
    fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}
