use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use snektorus::config::Config;
use snektorus::game::{self, Game};
use snektorus::terminal::{self, CrosstermEvents, TerminalGuard, TerminalSurface, TickClock};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.log_file.as_deref())?;

    let board = config.board()?;
    let speed = config.speed()?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    terminal::ensure_fits(&board)?;
    let mut game = Game::new(board, speed, rng);

    let record = {
        let _terminal = TerminalGuard::enter().context("failed to set up the terminal")?;
        let mut surface = TerminalSurface::new(stdout(), board);
        game::run(&mut game, &mut surface, &mut CrosstermEvents, &mut TickClock::new())?
    };

    println!("Thanks for playing! Record length: {}", record);
    Ok(())
}

/// The terminal is in raw mode while playing, so logs only go to a file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
