//! Turn advancement and game-end detection.

use super::elimination::{all_players_have_played, is_eliminated, surviving_players};
use crate::{GameState, Outcome, PlayerId};
use tracing::{debug, info, instrument};

/// What should happen once a turn has fully resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDecision {
    /// Play passes to the player at this index.
    Continue {
        /// Index of the next player.
        next_index: usize,
    },
    /// The game ends with this outcome.
    End(Outcome),
}

/// Decides who plays next, or whether the game is over.
///
/// Until every player has placed once, play simply rotates. After that, a
/// single survivor wins, no survivors is a wipeout, and otherwise play
/// moves to the next player who has not been eliminated.
#[instrument(skip(state))]
pub fn decide_next_turn(state: &GameState) -> TurnDecision {
    let count = state.players().len();
    let current = state.current_player_index();
    if count == 0 {
        return TurnDecision::End(Outcome::Wipeout);
    }

    if !all_players_have_played(state) {
        return TurnDecision::Continue {
            next_index: (current + 1) % count,
        };
    }

    let survivors = surviving_players(state);
    match survivors.as_slice() {
        [] => return TurnDecision::End(Outcome::Wipeout),
        [winner] => return TurnDecision::End(Outcome::Winner(*winner)),
        _ => {}
    }

    let mut index = current;
    for _ in 1..count {
        index = (index + 1) % count;
        if !is_eliminated(state, state.players()[index].id()) {
            return TurnDecision::Continue { next_index: index };
        }
    }

    // Came back around without a candidate.
    match state.players().get(current).map(|p| p.id()) {
        Some(id) if !is_eliminated(state, id) => TurnDecision::End(Outcome::Winner(id)),
        _ => TurnDecision::End(Outcome::Wipeout),
    }
}

/// Applies [`decide_next_turn`], returning the next snapshot.
///
/// Finished games are returned unchanged.
#[instrument(skip(state))]
pub fn advance_turn(state: &GameState) -> GameState {
    let mut next = state.clone();
    if state.is_over() {
        return next;
    }

    match decide_next_turn(state) {
        TurnDecision::Continue { next_index } => {
            next.set_current_player_index(next_index);
            let player: Option<PlayerId> = next.current_player_id();
            debug!(next_index, ?player, "Turn passed");
        }
        TurnDecision::End(outcome) => {
            info!(%outcome, "Game over");
            next.set_outcome(outcome);
        }
    }
    next
}
