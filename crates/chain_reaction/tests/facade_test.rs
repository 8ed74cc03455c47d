//! Property-style tests over whole games played through the facade.

use chain_reaction::invariants::{ChainReactionInvariants, InvariantSet};
use chain_reaction::cascade::level_limit;
use chain_reaction::{
    GameState, Player, PlayerId, Position, begin_stepwise_turn, clear_transient_flags, new_game,
    place, play_turn, resolve_to_fixpoint, rules,
};

fn game(width: u32, height: u32, players: u32) -> GameState {
    new_game(
        width,
        height,
        (0..players)
            .map(|i| Player::new(PlayerId::new(i), format!("Player {}", i + 1)))
            .collect(),
    )
    .expect("valid game")
}

/// Deterministic move picker: the `skip`-th legal cell for the current
/// player, wrapping around.
fn pick(state: &GameState, skip: usize) -> Option<Position> {
    let mover = state.current_player_id()?;
    let legal: Vec<Position> = state
        .grid()
        .cells()
        .filter(|(_, cell)| cell.owner().is_none_or(|owner| owner == mover))
        .map(|(position, _)| position)
        .collect();
    if legal.is_empty() {
        None
    } else {
        Some(legal[skip % legal.len()])
    }
}

#[test]
fn test_mass_conservation_and_invariants_across_games() {
    for (width, height, players) in [(3, 3, 2), (4, 4, 3), (5, 3, 4), (1, 6, 2), (6, 8, 2)] {
        let mut state = game(width, height, players);
        for turn in 0..120usize {
            if state.is_over() {
                break;
            }
            let Some(position) = pick(&state, turn * 7 + 3) else {
                break;
            };
            let before = state.grid().total_molecules();
            state = play_turn(&state, position).expect("legal move");
            assert_eq!(state.grid().total_molecules(), before + 1);
            assert!(ChainReactionInvariants::check_all(&state).is_ok());
            assert!(state.overlay().is_empty());
        }
    }
}

#[test]
fn test_cascades_stay_within_level_limit() {
    // Exploding cells keep any surplus, so long games on the default board
    // can run past W*H levels. The enforced ceiling is `level_limit`.
    let mut longest = 0u32;
    for (width, height, players) in [
        (2, 2, 2),
        (3, 3, 2),
        (4, 4, 3),
        (5, 3, 4),
        (1, 6, 2),
        (6, 8, 2),
        (8, 16, 2),
        (8, 16, 4),
    ] {
        let limit = level_limit((width * height) as usize);
        for sequence in 0..40usize {
            let mut state = game(width, height, players);
            for turn in 0..300usize {
                if state.is_over() {
                    break;
                }
                let Some(position) = pick(&state, turn * (2 * sequence + 1) + sequence) else {
                    break;
                };
                let mover = state.current_player_id().expect("current player");
                let placed = place(&state, position).expect("legal move");
                let resolution = resolve_to_fixpoint(placed, mover).expect("cascade settles");
                assert!(
                    (*resolution.levels() as usize) <= limit,
                    "{width}x{height} sequence {sequence} turn {turn}: {} levels",
                    resolution.levels()
                );
                longest = longest.max(*resolution.levels());
                state = play_turn(&state, position).expect("legal move");
            }
        }
    }
    assert!(longest > 0);
}

#[test]
fn test_atomic_and_stepwise_agree() {
    let mut atomic = game(4, 4, 2);
    let mut stepwise = atomic.clone();
    for turn in 0..80usize {
        if atomic.is_over() {
            break;
        }
        let Some(position) = pick(&atomic, turn * 5 + 1) else {
            break;
        };

        atomic = play_turn(&atomic, position).expect("legal move");

        let mut driver = begin_stepwise_turn(&stepwise, position).expect("legal move");
        while driver.advance_level().expect("level").is_some() {}
        stepwise = driver.finish().expect("finish");

        assert_eq!(atomic, stepwise);
    }
}

#[test]
fn test_clear_transient_flags_is_idempotent_mid_cascade() {
    let mut state = game(3, 3, 2);
    for turn in 0..40usize {
        if state.is_over() {
            break;
        }
        let Some(position) = pick(&state, turn) else {
            break;
        };
        let mut driver = begin_stepwise_turn(&state, position).expect("legal move");
        while let Some(level) = driver.advance_level().expect("level") {
            let once = clear_transient_flags(level);
            assert_eq!(clear_transient_flags(&once), once);
            assert_eq!(once.grid(), level.grid());
        }
        state = driver.finish().expect("finish");
    }
}

#[test]
fn test_first_turn_immunity_through_facade() {
    let state = game(3, 3, 3);
    let state = play_turn(&state, Position::new(0, 0)).expect("legal move");

    // Players 1 and 2 own nothing yet but have not moved.
    assert_eq!(rules::surviving_players(&state).len(), 3);
    assert!(!rules::all_players_have_played(&state));
    assert_eq!(state.current_player_index(), 1);
}
