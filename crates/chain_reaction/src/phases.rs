//! Game outcome and session phase.

use crate::PlayerId;
use serde::{Deserialize, Serialize};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// One player is the last survivor.
    Winner(PlayerId),
    /// Every remaining player was eliminated in the same turn.
    Wipeout,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Wipeout => None,
        }
    }

    /// Returns true if the game ended without a winner.
    pub fn is_wipeout(&self) -> bool {
        matches!(self, Outcome::Wipeout)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} wins", player),
            Outcome::Wipeout => write!(f, "No survivors"),
        }
    }
}

/// Where a [`Session`](crate::Session) is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// Waiting for the current player to place.
    AwaitingPlacement,
    /// A stepwise cascade is partway through.
    Resolving,
    /// The game has an outcome.
    Finished,
}
