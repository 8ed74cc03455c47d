//! Turn, elimination and victory rules.
//!
//! These are pure functions over snapshots, kept apart from the cascade
//! resolver so contracts and invariants can reuse them.

pub mod elimination;
pub mod turn;

pub use elimination::{
    all_players_have_played, is_eligible_for_elimination, is_eliminated, surviving_players,
};
pub use turn::{TurnDecision, advance_turn, decide_next_turn};
