//! chess-play - a two-player chess game in the terminal.
//!
//! Reads commands from standard input, applies them through the rules engine
//! and draws the board after every move.

mod command;
mod config;
mod session;

use anyhow::Context;
use clap::Parser;
use config::PlayConfig;
use session::{Flow, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// chess-play - two-player chess in the terminal.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess in the terminal")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Draw pieces with Unicode chess glyphs
    #[arg(long)]
    unicode: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(PlayConfig::default_path);
    let mut config = PlayConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if args.unicode {
        config.display.unicode = true;
    }

    let level = args.log_level.unwrap_or_else(|| config.log.level.clone());
    let filter: LevelFilter = level
        .parse()
        .with_context(|| format!("invalid log level '{}'", level))?;
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(io::stderr)
        .init();

    tracing::info!("Config: {:?}", config_path);

    let mut session = Session::new(config.display);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    session.print_position(&mut out)?;
    loop {
        write!(out, "{}> ", session.game().side_to_move())?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        if session.handle(&line, &mut out)? == Flow::Quit {
            break;
        }
    }

    tracing::info!("Exiting after {} plies", session.game().ply_count());
    Ok(())
}
