//! Between turns, no cell is over capacity while the game is running.

use super::Invariant;
use crate::GameState;

/// Invariant: a running game's board has no overloaded cells.
///
/// A finished game may keep overloaded cells, since resolution stops as
/// soon as one player holds the whole board.
pub struct StableBoardInvariant;

impl Invariant<GameState> for StableBoardInvariant {
    fn holds(state: &GameState) -> bool {
        state.is_over() || state.grid().overloaded().is_empty()
    }

    fn description() -> &'static str {
        "No cell exceeds its capacity between turns of a running game"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Outcome, Player, PlayerId, Position, new_game};

    #[test]
    fn test_overload_only_allowed_after_game_end() {
        let mut state = new_game(
            3,
            3,
            vec![
                Player::new(PlayerId::new(0), "A"),
                Player::new(PlayerId::new(1), "B"),
            ],
        )
        .expect("valid game");
        assert!(StableBoardInvariant::holds(&state));

        if let Some(cell) = state.grid_mut().get_mut(Position::new(0, 0)) {
            *cell = Cell::new(Some(PlayerId::new(0)), 2);
        }
        assert!(!StableBoardInvariant::holds(&state));

        state.set_outcome(Outcome::Winner(PlayerId::new(0)));
        assert!(StableBoardInvariant::holds(&state));
    }
}
