//! Command-line interface for chain_reaction.

use crate::config::ConfigOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chain Reaction - play the chain-reaction board game from a terminal or script
#[derive(Parser, Debug)]
#[command(name = "chain_reaction")]
#[command(about = "Deterministic chain-reaction board game engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Board width, overriding the config file
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Board height, overriding the config file
    #[arg(long, global = true)]
    pub height: Option<u32>,

    /// Number of players, overriding the config file
    #[arg(long, global = true)]
    pub players: Option<usize>,

    /// Player name (repeat once per player, in turn order)
    #[arg(long = "name", global = true)]
    pub names: Vec<String>,

    /// Enable debug logging for the engine
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Collects the flags that override config file values.
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::default().with_player_names(self.names.clone());
        if let Some(width) = self.width {
            overrides = overrides.with_width(width);
        }
        if let Some(height) = self.height {
            overrides = overrides.with_height(height);
        }
        if let Some(players) = self.players {
            overrides = overrides.with_players(players);
        }
        overrides
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read intents from stdin, one per line ("place X Y", "X Y", "restart", "quit")
    Play {
        /// Show every cascade level instead of only settled boards
        #[arg(long)]
        stepwise: bool,

        /// Pause between cascade levels, in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,

        /// Print snapshots as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Play a fixed list of moves and print the final board
    Replay {
        /// Moves as "X,Y", in turn order
        #[arg(required = true)]
        moves: Vec<String>,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}
