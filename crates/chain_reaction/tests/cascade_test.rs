//! Scenario tests for cascade resolution.

use chain_reaction::{
    Cell, EngineError, GameState, IllegalMove, Outcome, Player, PlayerId, Position,
    begin_stepwise_turn, new_game, place, play_turn, resolve_to_fixpoint,
};

fn p(id: u32) -> PlayerId {
    PlayerId::new(id)
}

fn game(width: u32, height: u32) -> GameState {
    new_game(
        width,
        height,
        vec![Player::new(p(0), "Red"), Player::new(p(1), "Blue")],
    )
    .expect("valid game")
}

fn replay(mut state: GameState, moves: &[(u32, u32)]) -> GameState {
    for &(x, y) in moves {
        state = play_turn(&state, Position::new(x, y)).expect("legal move");
    }
    state
}

fn cell(state: &GameState, x: u32, y: u32) -> Cell {
    *state.grid().get(Position::new(x, y)).expect("on board")
}

fn owned(owner: u32, molecules: u32) -> Option<(PlayerId, u32)> {
    Some((p(owner), molecules))
}

fn summary(state: &GameState, x: u32, y: u32) -> Option<(PlayerId, u32)> {
    let c = cell(state, x, y);
    c.owner().map(|o| (o, c.molecules()))
}

#[test]
fn test_strip_corner_explodes_into_single_neighbor() {
    let state = replay(game(1, 3), &[(0, 0), (0, 2), (0, 0)]);

    assert_eq!(summary(&state, 0, 0), owned(0, 1));
    assert_eq!(summary(&state, 0, 1), owned(0, 1));
    assert_eq!(summary(&state, 0, 2), owned(1, 1));
    assert_eq!(state.grid().total_molecules(), 3);
    assert_eq!(state.current_player_id(), Some(p(1)));
}

#[test]
fn test_corner_explosion_captures_opponent() {
    let state = replay(game(3, 3), &[(0, 0), (2, 2), (0, 0)]);
    assert!(!state.is_over());

    let state = replay(game(3, 3), &[(0, 0), (1, 0), (2, 2), (1, 1), (0, 0)]);
    assert_eq!(summary(&state, 0, 0), None);
    assert_eq!(summary(&state, 0, 1), owned(0, 1));
    assert_eq!(summary(&state, 1, 0), owned(0, 2));
    assert_eq!(summary(&state, 1, 1), owned(1, 1));
    assert!(state.overlay().is_empty());
    assert!(!state.is_over());
}

#[test]
fn test_two_level_cascade_is_traced_per_level() {
    let before = replay(
        game(3, 3),
        &[(0, 0), (2, 2), (1, 0), (1, 2), (1, 0), (1, 1)],
    );
    let mut turn = begin_stepwise_turn(&before, Position::new(0, 0)).expect("legal");
    assert!(turn.has_next());

    let level0 = turn.advance_level().expect("level").expect("pending").clone();
    let source = level0.overlay().get(Position::new(0, 0)).expect("traced");
    assert!(source.is_exploding());
    assert_eq!(source.level(), 0);
    assert_eq!(source.targets(), &[Position::new(0, 1), Position::new(1, 0)]);
    assert_eq!(summary(&level0, 1, 0), owned(0, 3));
    assert!(level0.overlay().captured().next().is_none());

    let level1 = turn.advance_level().expect("level").expect("pending").clone();
    assert!(level1.overlay().get(Position::new(0, 0)).is_some_and(|t| !t.is_exploding()));
    let source = level1.overlay().get(Position::new(1, 0)).expect("traced");
    assert!(source.is_exploding());
    assert_eq!(source.level(), 1);
    assert_eq!(
        source.targets(),
        &[Position::new(1, 1), Position::new(0, 0), Position::new(2, 0)]
    );
    let captured = level1.overlay().get(Position::new(1, 1)).expect("traced");
    assert!(captured.is_captured());
    assert_eq!(captured.previous_owner(), Some(p(1)));
    assert_eq!(level1.overlay().captured().collect::<Vec<_>>(), vec![Position::new(1, 1)]);

    assert!(!turn.has_next());
    assert_eq!(turn.levels(), 2);

    let after = turn.finish().expect("finish");
    assert_eq!(after, play_turn(&before, Position::new(0, 0)).expect("legal"));
    assert_eq!(summary(&after, 1, 1), owned(0, 2));
    assert_eq!(summary(&after, 2, 0), owned(0, 1));
    assert_eq!(summary(&after, 1, 0), None);
    assert_eq!(after.grid().total_molecules(), 7);
    assert!(after.overlay().is_empty());
    assert_eq!(after.current_player_id(), Some(p(1)));
}

#[test]
fn test_last_survivor_wins() {
    let state = replay(game(2, 2), &[(0, 0), (1, 1), (0, 0), (1, 1)]);

    assert_eq!(state.outcome(), Some(Outcome::Winner(p(1))));
    assert_eq!(state.winner(), Some(p(1)));
    assert_eq!(summary(&state, 1, 0), owned(1, 2));
    assert_eq!(summary(&state, 0, 1), owned(1, 2));
    assert_eq!(state.grid().total_molecules(), 4);
    assert_eq!(state.scoreboard(), vec![(p(0), 0), (p(1), 2)]);
}

#[test]
fn test_fixpoint_level_count() {
    let before = replay(
        game(3, 3),
        &[(0, 0), (2, 2), (1, 0), (1, 2), (1, 0), (1, 1)],
    );
    let placed = place(&before, Position::new(0, 0)).expect("legal");
    let resolution = resolve_to_fixpoint(placed, p(0)).expect("settles");
    assert_eq!(*resolution.levels(), 2);
    assert_eq!(
        resolution.state().grid().total_molecules(),
        before.grid().total_molecules() + 1
    );
}

#[test]
fn test_opponent_cell_rejected_without_change() {
    let state = replay(game(3, 3), &[(0, 0)]);
    let snapshot = state.clone();

    let result = play_turn(&state, Position::new(0, 0));
    assert_eq!(
        result,
        Err(EngineError::IllegalMove(IllegalMove::CellOwnedByOpponent {
            position: Position::new(0, 0),
            owner: p(0),
        }))
    );
    assert_eq!(state, snapshot);
}

#[test]
fn test_out_of_bounds_rejected() {
    let state = game(3, 3);
    assert_eq!(
        play_turn(&state, Position::new(3, 1)),
        Err(EngineError::OutOfBounds {
            position: Position::new(3, 1),
            dimensions: state.dimensions(),
        })
    );
    assert!(begin_stepwise_turn(&state, Position::new(0, 9)).is_err());
}

#[test]
fn test_own_cell_accepted() {
    let state = replay(game(3, 3), &[(1, 1), (0, 0), (1, 1)]);
    assert_eq!(summary(&state, 1, 1), owned(0, 2));
}
