//! Placements and the errors they can produce.
//!
//! A placement is the only action a player can take. It is a plain value,
//! validated by [`PlacementContract`](crate::PlacementContract) before the
//! cascade resolver applies it.

use crate::{Dimensions, PlayerId, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player dropping one molecule onto a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// The player making the placement.
    pub player: PlayerId,
    /// The target cell.
    pub position: Position,
}

impl Placement {
    /// Creates a new placement.
    #[instrument]
    pub fn new(player: PlayerId, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the player making this placement.
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Returns the target cell.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position)
    }
}

/// Why a well-formed placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// The target cell belongs to another player.
    #[display("Cell {} is owned by {}", position, owner)]
    CellOwnedByOpponent {
        /// The contested cell.
        position: Position,
        /// Its current owner.
        owner: PlayerId,
    },

    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,

    /// It is not this player's turn.
    #[display("It's not {}'s turn", _0)]
    NotPlayersTurn(PlayerId),

    /// A stepwise resolution is still running.
    #[display("A chain reaction is still resolving")]
    ResolutionInProgress,
}

/// Errors raised by engine operations.
///
/// None of these leave a partially applied state behind: every operation
/// borrows its input snapshot and only returns a new one on success.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Coordinates outside the grid.
    #[display("Position {} is outside the {} grid", position, dimensions)]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// The grid it was checked against.
        dimensions: Dimensions,
    },

    /// The placement is not allowed in the current state.
    #[display("Illegal move: {}", _0)]
    IllegalMove(IllegalMove),

    /// Game setup parameters were rejected.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// A representation invariant broke, or a cascade ran away.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for IllegalMove {}
impl std::error::Error for EngineError {}

impl From<IllegalMove> for EngineError {
    fn from(illegal: IllegalMove) -> Self {
        EngineError::IllegalMove(illegal)
    }
}

impl EngineError {
    /// Returns the refusal reason if this is an illegal-move rejection.
    pub fn illegal_move(&self) -> Option<IllegalMove> {
        match self {
            EngineError::IllegalMove(illegal) => Some(*illegal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::OutOfBounds {
            position: Position::new(5, 1),
            dimensions: Dimensions::new(3, 3),
        };
        assert_eq!(err.to_string(), "Position (5, 1) is outside the 3x3 grid");

        let err: EngineError = IllegalMove::CellOwnedByOpponent {
            position: Position::new(0, 0),
            owner: PlayerId::new(1),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Illegal move: Cell (0, 0) is owned by P1"
        );
        assert!(matches!(
            err.illegal_move(),
            Some(IllegalMove::CellOwnedByOpponent { .. })
        ));
    }
}
