//! Contract-based validation for placements.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, placement)} place-and-resolve {Q(before, after)}.

use crate::invariants::{ChainReactionInvariants, InvariantSet};
use crate::{EngineError, GameState, IllegalMove, Placement};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), EngineError>;

    /// Checks postconditions across a completed transition.
    fn post(before: &S, action: &A, after: &S) -> Result<(), EngineError>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has no outcome yet.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects placements on a finished game.
    #[instrument(skip(state))]
    pub fn check(placement: &Placement, state: &GameState) -> Result<(), EngineError> {
        if state.is_over() {
            Err(IllegalMove::GameOver.into())
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target lies on the board.
pub struct InBounds;

impl InBounds {
    /// Rejects off-board coordinates.
    #[instrument(skip(state))]
    pub fn check(placement: &Placement, state: &GameState) -> Result<(), EngineError> {
        state.grid().cell(placement.position).map(|_| ())
    }
}

/// Precondition: the placing player is the current player.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects out-of-turn placements.
    #[instrument(skip(state))]
    pub fn check(placement: &Placement, state: &GameState) -> Result<(), EngineError> {
        if state.current_player_id() != Some(placement.player) {
            Err(IllegalMove::NotPlayersTurn(placement.player).into())
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target is empty or already the player's own.
pub struct CellAvailable;

impl CellAvailable {
    /// Rejects placements on an opponent's cell.
    #[instrument(skip(state))]
    pub fn check(placement: &Placement, state: &GameState) -> Result<(), EngineError> {
        match state.grid().cell(placement.position)?.owner() {
            Some(owner) if owner != placement.player => Err(IllegalMove::CellOwnedByOpponent {
                position: placement.position,
                owner,
            }
            .into()),
            _ => Ok(()),
        }
    }
}

/// Composite precondition covering every placement rule.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a placement.
    #[instrument(skip(state))]
    pub fn check(placement: &Placement, state: &GameState) -> Result<(), EngineError> {
        GameNotOver::check(placement, state)?;
        InBounds::check(placement, state)?;
        PlayersTurn::check(placement, state)?;
        CellAvailable::check(placement, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for a full turn.
///
/// Preconditions:
/// - Game not over
/// - Target on the board
/// - Placing player is the current player
/// - Target empty or owned by the placing player
///
/// Postconditions:
/// - Exactly one molecule was added to the board
/// - The placing player's turn count went up by one
/// - Every state invariant holds
pub struct PlacementContract;

impl Contract<GameState, Placement> for PlacementContract {
    fn pre(state: &GameState, action: &Placement) -> Result<(), EngineError> {
        LegalPlacement::check(action, state)
    }

    fn post(before: &GameState, action: &Placement, after: &GameState) -> Result<(), EngineError> {
        let expected = before.grid().total_molecules() + 1;
        let actual = after.grid().total_molecules();
        if actual != expected {
            warn!(expected, actual, "Mass conservation violated");
            return Err(EngineError::InvariantViolation(format!(
                "Postcondition failed: board holds {actual} molecules, expected {expected}"
            )));
        }

        let turns_before = before.turns_taken(action.player);
        let turns_after = after.turns_taken(action.player);
        if turns_after != turns_before + 1 {
            warn!(turns_before, turns_after, "Turn ledger not advanced");
            return Err(EngineError::InvariantViolation(format!(
                "Postcondition failed: {} has {turns_after} turns, expected {}",
                action.player,
                turns_before + 1
            )));
        }

        ChainReactionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            EngineError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
