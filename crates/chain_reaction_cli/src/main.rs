//! Chain Reaction - command-line driver
//!
//! Plays the chain-reaction board game from stdin intents or a fixed list of
//! moves, printing plain-text or JSON snapshots.

#![warn(missing_docs)]

mod cli;
mod config;
mod display;
mod intent;

use anyhow::{Context, Result};
use chain_reaction::{GameConfig, GameState, Intent, Session};
use clap::Parser;
use cli::{Cli, Command};
use intent::ScriptLine;
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load game configuration")?;

    match cli.command {
        Command::Play {
            stepwise,
            delay_ms,
            json,
        } => {
            let options = PlayOptions {
                stepwise,
                delay: Duration::from_millis(delay_ms),
                json,
            };
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            run_play(config, stdin.lock(), stdout.lock(), &options)
        }
        Command::Replay { moves, json } => {
            let stdout = std::io::stdout();
            run_replay(config, &moves, json, stdout.lock())
        }
        Command::Config => {
            let text = toml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{text}");
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays a clean snapshot stream.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,chain_reaction=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// How `play` reports progress.
#[derive(Debug, Clone, Default)]
struct PlayOptions {
    stepwise: bool,
    delay: Duration,
    json: bool,
}

fn emit(out: &mut impl Write, state: &GameState, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(state).context("Failed to serialize snapshot")?;
        writeln!(out, "{line}")?;
    } else {
        writeln!(out, "{}", display::BoardView(state))?;
    }
    out.flush()?;
    Ok(())
}

/// Runs an intent script against a fresh session.
///
/// Rejected intents are reported and skipped; only I/O failures and engine
/// invariant violations stop the run.
#[instrument(skip(config, input, out))]
fn run_play(
    config: GameConfig,
    input: impl BufRead,
    mut out: impl Write,
    options: &PlayOptions,
) -> Result<()> {
    let mut session = Session::new(config).context("Failed to start session")?;
    emit(&mut out, session.state(), options.json)?;

    for (number, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let parsed = match intent::parse_line(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = number + 1, error = %err, "Skipping unreadable line");
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        let intent = match parsed {
            ScriptLine::Quit => break,
            ScriptLine::Intent(intent) => intent,
        };
        debug!(line = number + 1, ?intent, "Applying intent");

        match (intent, options.stepwise) {
            (Intent::Place(position), true) => {
                if let Err(err) = session.begin_stepwise(position) {
                    writeln!(out, "error: {err}")?;
                    continue;
                }
                while let Some(level) = session.advance_level()? {
                    emit(&mut out, level, options.json)?;
                    if !options.delay.is_zero() {
                        std::thread::sleep(options.delay);
                    }
                }
                let settled = session.finish_stepwise()?;
                emit(&mut out, settled, options.json)?;
            }
            (intent, _) => match session.apply(intent) {
                Ok(state) => emit(&mut out, state, options.json)?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
        }
    }

    if let Some(outcome) = session.state().outcome() {
        info!(%outcome, "Game finished");
    }
    Ok(())
}

/// Plays `moves` in order and prints the final snapshot.
#[instrument(skip(config, out))]
fn run_replay(config: GameConfig, moves: &[String], json: bool, mut out: impl Write) -> Result<()> {
    let mut session = Session::new(config).context("Failed to start session")?;
    for (index, text) in moves.iter().enumerate() {
        let position = intent::parse_move(text)?;
        session
            .play(position)
            .with_context(|| format!("Move {} ({text}) was rejected", index + 1))?;
    }
    emit(&mut out, session.state(), json)
}
