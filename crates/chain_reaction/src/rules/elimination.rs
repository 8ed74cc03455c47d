//! Elimination logic.

use crate::{GameState, PlayerId};
use tracing::instrument;

/// A player can only be eliminated after taking at least one turn.
pub fn is_eligible_for_elimination(state: &GameState, player: PlayerId) -> bool {
    state.turns_taken(player) > 0
}

/// A player is out once they are eligible and own no cells.
pub fn is_eliminated(state: &GameState, player: PlayerId) -> bool {
    is_eligible_for_elimination(state, player) && state.grid().owned_by(player) == 0
}

/// Returns true once every player has placed at least once.
pub fn all_players_have_played(state: &GameState) -> bool {
    state
        .players()
        .iter()
        .all(|p| is_eligible_for_elimination(state, p.id()))
}

/// Players still in the game, in turn order.
#[instrument(skip(state))]
pub fn surviving_players(state: &GameState) -> Vec<PlayerId> {
    state
        .players()
        .iter()
        .map(|p| p.id())
        .filter(|id| !is_eliminated(state, *id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Player, Position, new_game};

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
    fn test_first_turn_immunity() {
        let state = game();
        let b = PlayerId::new(1);
        assert!(!is_eligible_for_elimination(&state, b));
        assert!(!is_eliminated(&state, b));
        assert_eq!(surviving_players(&state).len(), 2);
    }

    #[test]
    fn test_eliminated_after_losing_cells() {
        let mut state = game();
        let a = PlayerId::new(0);
        let b = PlayerId::new(1);
        state.record_turn(a);
        state.record_turn(b);
        if let Some(cell) = state.grid_mut().get_mut(Position::new(0, 0)) {
            *cell = Cell::new(Some(a), 1);
        }

        assert!(all_players_have_played(&state));
        assert!(is_eliminated(&state, b));
        assert!(!is_eliminated(&state, a));
        assert_eq!(surviving_players(&state), vec![a]);
    }
}
