//! A cell holds molecules exactly when it has an owner.

use super::Invariant;
use crate::GameState;

/// Invariant: `molecules == 0` if and only if the cell has no owner.
pub struct MoleculeOwnershipInvariant;

impl Invariant<GameState> for MoleculeOwnershipInvariant {
    fn holds(state: &GameState) -> bool {
        state
            .grid()
            .cells()
            .all(|(_, cell)| (cell.molecules() == 0) == cell.owner().is_none())
    }

    fn description() -> &'static str {
        "Cells hold molecules if and only if they have an owner"
    }
}
