//! Chain reaction - a deterministic engine for the chain-reaction board game
//!
//! Players take turns dropping molecules onto a grid. A cell that holds more
//! molecules than its capacity explodes, sending one molecule to each
//! orthogonal neighbour and claiming it for the exploding cell's owner. The
//! resulting cascades run level by level until the board settles. A player
//! who has moved at least once and owns nothing is out; the last survivor
//! wins.
//!
//! # Architecture
//!
//! - **Board**: geometry, cell classification and the capacity rule
//! - **Cascade**: placement and simultaneous, level-by-level explosions
//! - **Rules**: elimination, turn rotation and game end
//! - **Facade**: `new_game`, `play_turn` and the stepwise driver
//! - **Session**: intent handling with one placement in flight
//!
//! # Example
//!
//! ```
//! use chain_reaction::{GameConfig, Position, Session};
//!
//! # fn example() -> Result<(), chain_reaction::EngineError> {
//! let mut session = Session::new(GameConfig::default())?;
//! session.play(Position::new(0, 0))?;
//! session.play(Position::new(7, 15))?;
//! assert_eq!(session.state().current_player_index(), 0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod game;
mod overlay;
mod phases;
mod position;
mod session;
mod state;
mod types;

// Public rule modules
pub mod cascade;
pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Geometry and board model
pub use board::{CellKind, Grid, capacity, classify, critical_mass, neighbors};
pub use position::{Dimensions, Position};
pub use types::{Cell, Player, PlayerId};

// Crate-level exports - Snapshots
pub use overlay::{CascadeOverlay, CellTrace};
pub use phases::{Outcome, Phase};
pub use state::GameState;

// Crate-level exports - Actions and errors
pub use action::{EngineError, IllegalMove, Placement};

// Crate-level exports - Cascade resolution
pub use cascade::{
    LEVEL_LIMIT_PER_CELL, Resolution, clear_transient_flags, has_pending_explosions, is_settled,
    level_limit, place, place_and_resolve_atomic, resolve_one_level, resolve_to_fixpoint,
};

// Crate-level exports - Turn rules
pub use rules::{advance_turn, all_players_have_played, surviving_players};

// Crate-level exports - Facade and session
pub use game::{MIN_PLAYERS, StepwiseTurn, begin_stepwise_turn, new_game, play_turn};
pub use session::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, GameConfig, Intent, MAX_PLAYERS, Session, default_names,
};
