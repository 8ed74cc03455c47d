//! The current player is a real, surviving player.

use super::Invariant;
use crate::GameState;
use crate::rules::is_eliminated;

/// Invariant: the current index points into the player list and, while the
/// game runs, at a player who has not been eliminated.
pub struct CurrentPlayerInvariant;

impl Invariant<GameState> for CurrentPlayerInvariant {
    fn holds(state: &GameState) -> bool {
        match state.current_player() {
            None => false,
            Some(player) => state.is_over() || !is_eliminated(state, player.id()),
        }
    }

    fn description() -> &'static str {
        "Current player exists and has not been eliminated"
    }
}
