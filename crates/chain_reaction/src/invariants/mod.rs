//! First-class invariants for chain-reaction snapshots.
//!
//! Invariants are properties every settled snapshot must satisfy. They are
//! checked after each turn in debug builds and are testable on their own.

use crate::GameState;
use tracing::instrument;

/// A property of a single snapshot `S`, checked without reference to the
/// move that produced it.
pub trait Invariant<S> {
    /// Returns true if `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// The property, phrased as the thing that should be true.
    fn description() -> &'static str;
}

/// A property that a snapshot failed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("invariant violated: {description}")]
pub struct InvariantViolation {
    /// What should have held.
    pub description: String,
}

impl InvariantViolation {
    /// Records that the property described by `description` failed.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of up to four invariants.
pub trait InvariantSet<S> {
    /// Checks every invariant, collecting all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

pub mod current_player;
pub mod molecule_ownership;
pub mod stable_board;
pub mod turn_ledger;

pub use current_player::CurrentPlayerInvariant;
pub use molecule_ownership::MoleculeOwnershipInvariant;
pub use stable_board::StableBoardInvariant;
pub use turn_ledger::TurnLedgerInvariant;

/// Every invariant a settled snapshot satisfies.
pub type ChainReactionInvariants = (
    MoleculeOwnershipInvariant,
    TurnLedgerInvariant,
    StableBoardInvariant,
    CurrentPlayerInvariant,
);

/// Asserts that all invariants hold (panics on violation in debug builds).
#[instrument(skip(state))]
pub fn assert_invariants(state: &GameState) {
    debug_assert!(
        ChainReactionInvariants::check_all(state).is_ok(),
        "Chain reaction invariants violated: {:?}",
        ChainReactionInvariants::check_all(state)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, PlayerId, Position, new_game, play_turn};

    fn game() -> GameState {
        new_game(
            3,
            3,
            vec![
                Player::new(PlayerId::new(0), "A"),
                Player::new(PlayerId::new(1), "B"),
            ],
        )
        .expect("valid game")
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(ChainReactionInvariants::check_all(&game()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut state = game();
        for (x, y) in [(0, 0), (2, 2), (1, 1), (2, 1)] {
            state = play_turn(&state, Position::new(x, y)).expect("legal move");
        }
        assert!(ChainReactionInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = game();
        if let Some(cell) = state.grid_mut().get_mut(Position::new(0, 0)) {
            *cell = crate::Cell::new(None, 5);
        }
        state.turn_ledger_mut().clear();

        let violations = ChainReactionInvariants::check_all(&state).expect_err("corrupted");
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_violation_names_failed_property() {
        let mut state = game();
        state.turn_ledger_mut().clear();

        let violations = ChainReactionInvariants::check_all(&state).expect_err("corrupted");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            <TurnLedgerInvariant as Invariant<GameState>>::description()
        );
        assert_eq!(
            violations[0].to_string(),
            format!("invariant violated: {}", violations[0].description)
        );
    }
}
