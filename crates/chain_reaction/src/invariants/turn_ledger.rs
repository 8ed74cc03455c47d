//! The turn ledger tracks exactly the players in the game.

use super::Invariant;
use crate::GameState;

/// Invariant: `turns_taken` has one entry per player and no others.
pub struct TurnLedgerInvariant;

impl Invariant<GameState> for TurnLedgerInvariant {
    fn holds(state: &GameState) -> bool {
        let ledger = state.turn_ledger();
        ledger.len() == state.players().len()
            && state.players().iter().all(|p| ledger.contains_key(&p.id()))
    }

    fn description() -> &'static str {
        "Turn ledger has exactly one entry per player"
    }
}
