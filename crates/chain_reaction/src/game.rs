//! The simulation facade.
//!
//! [`new_game`] and [`play_turn`] are the whole API for callers that only
//! want settled snapshots. Animated callers use [`begin_stepwise_turn`] to
//! walk a cascade one level at a time.

use crate::cascade::{
    clear_transient_flags, current_placement, is_settled, level_limit, place,
    place_and_resolve_atomic, resolve_one_level,
};
use crate::contracts::{Contract, PlacementContract};
use crate::invariants::assert_invariants;
use crate::rules::advance_turn;
use crate::{Dimensions, EngineError, GameState, Placement, Player, Position};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Minimum number of players in a game.
pub const MIN_PLAYERS: usize = 2;

/// Starts a game on an empty `width` × `height` board.
///
/// Rejects fewer than two players, duplicate player ids, zero-sized
/// dimensions and boards with fewer than two cells.
#[instrument(skip(players), fields(players = players.len()))]
pub fn new_game(width: u32, height: u32, players: Vec<Player>) -> Result<GameState, EngineError> {
    if players.len() < MIN_PLAYERS {
        return Err(EngineError::InvalidConfiguration(format!(
            "at least {MIN_PLAYERS} players are required, got {}",
            players.len()
        )));
    }
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidConfiguration(format!(
            "grid dimensions must be positive, got {width}x{height}"
        )));
    }
    let dimensions = Dimensions::new(width, height);
    if dimensions.cell_count() < 2 {
        return Err(EngineError::InvalidConfiguration(
            "a 1x1 grid has no neighbours to explode into".to_string(),
        ));
    }
    let mut seen = BTreeSet::new();
    if let Some(duplicate) = players.iter().find(|p| !seen.insert(p.id())) {
        return Err(EngineError::InvalidConfiguration(format!(
            "duplicate player id {}",
            duplicate.id()
        )));
    }

    info!(%dimensions, "New game");
    Ok(GameState::fresh(dimensions, players))
}

/// Plays one complete turn for the current player.
///
/// Places, resolves the cascade to completion and advances the turn. The
/// returned snapshot carries no overlay.
#[instrument(skip(state))]
pub fn play_turn(state: &GameState, position: Position) -> Result<GameState, EngineError> {
    let placement = current_placement(state, position)?;
    let resolved = place_and_resolve_atomic(state, position)?;
    complete_turn(state, &placement, &resolved)
}

/// Places for the current player and hands back a driver that resolves the
/// cascade one level per call.
#[instrument(skip(state))]
pub fn begin_stepwise_turn(
    state: &GameState,
    position: Position,
) -> Result<StepwiseTurn, EngineError> {
    let placement = current_placement(state, position)?;
    let placed = place(state, position)?;
    let limit = level_limit(placed.dimensions().cell_count());
    Ok(StepwiseTurn {
        before: state.clone(),
        placement,
        current: placed,
        levels: 0,
        limit,
    })
}

/// Clears the overlay, advances the turn and checks the placement contract.
fn complete_turn(
    before: &GameState,
    placement: &Placement,
    resolved: &GameState,
) -> Result<GameState, EngineError> {
    let next = advance_turn(&clear_transient_flags(resolved));

    #[cfg(debug_assertions)]
    PlacementContract::post(before, placement, &next)?;
    #[cfg(not(debug_assertions))]
    let _ = (before, placement);

    assert_invariants(&next);
    Ok(next)
}

/// A turn whose cascade is resolved one level at a time.
///
/// Each [`advance_level`](StepwiseTurn::advance_level) yields a snapshot whose
/// overlay describes only that level. [`finish`](StepwiseTurn::finish)
/// completes the turn exactly as [`play_turn`] would have.
#[derive(Debug, Clone)]
pub struct StepwiseTurn {
    before: GameState,
    placement: Placement,
    current: GameState,
    levels: u32,
    limit: usize,
}

impl StepwiseTurn {
    /// Returns true while another level remains to be resolved.
    pub fn has_next(&self) -> bool {
        !is_settled(&self.current, self.placement.player)
    }

    /// Resolves the next level and returns its tagged snapshot, or `None`
    /// if the cascade has already settled.
    #[instrument(skip(self), fields(level = self.levels))]
    pub fn advance_level(&mut self) -> Result<Option<&GameState>, EngineError> {
        if !self.has_next() {
            return Ok(None);
        }
        if self.levels as usize >= self.limit {
            warn!(levels = self.levels, limit = self.limit, "Cascade did not settle");
            return Err(EngineError::InvariantViolation(format!(
                "cascade still unsettled after {} levels",
                self.levels
            )));
        }

        let cleared = clear_transient_flags(&self.current);
        self.current = resolve_one_level(&cleared, self.levels);
        self.levels += 1;
        debug!(levels = self.levels, "Stepwise level resolved");
        Ok(Some(&self.current))
    }

    /// The most recent snapshot, including its overlay.
    pub fn snapshot(&self) -> &GameState {
        &self.current
    }

    /// Levels resolved so far.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// The placement that started this turn.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Resolves any remaining levels and completes the turn.
    #[instrument(skip(self), fields(placement = %self.placement))]
    pub fn finish(mut self) -> Result<GameState, EngineError> {
        while self.advance_level()?.is_some() {}
        complete_turn(&self.before, &self.placement, &self.current)
    }
}
