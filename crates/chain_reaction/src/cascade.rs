//! Placement and level-by-level cascade resolution.
//!
//! A level is one batch of simultaneous explosions. Every cell that is over
//! capacity when the level starts explodes, and every explosion reads the
//! start-of-level board. The proposed transfers are collected first and then
//! applied to a copy, so the order in which sources are visited cannot leak
//! into the result.

use crate::contracts::{Contract, PlacementContract};
use crate::{
    CascadeOverlay, CellTrace, EngineError, GameState, Placement, PlayerId, Position, neighbors,
};
use derive_getters::Getters;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Levels allowed per board cell before a cascade is declared runaway.
pub const LEVEL_LIMIT_PER_CELL: usize = 64;

/// Hard ceiling on cascade levels for a board of `cell_count` cells.
pub fn level_limit(cell_count: usize) -> usize {
    LEVEL_LIMIT_PER_CELL.saturating_mul(cell_count)
}

/// A fully resolved cascade and the number of levels it took.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Resolution {
    /// The settled state, overlay from its final level included.
    state: GameState,
    /// Levels resolved.
    levels: u32,
}

impl Resolution {
    /// Consumes the resolution, returning the settled state.
    pub fn into_state(self) -> GameState {
        self.state
    }
}

/// One exploding cell's outgoing transfer, computed against the
/// start-of-level board.
#[derive(Debug, Clone)]
struct Discharge {
    source: Position,
    owner: Option<PlayerId>,
    targets: Vec<Position>,
}

/// Applies the current player's placement without resolving explosions.
///
/// The target gains one molecule and passes to the mover, and the mover's
/// turn count goes up. Any overlay on the input is dropped.
#[instrument(skip(state), fields(player = ?state.current_player_id()))]
pub fn place(state: &GameState, position: Position) -> Result<GameState, EngineError> {
    let placement = current_placement(state, position)?;
    if let Err(err) = PlacementContract::pre(state, &placement) {
        warn!(%placement, error = %err, "Placement rejected");
        return Err(err);
    }

    let mut next = state.clone();
    next.clear_overlay();
    let cell = next
        .grid_mut()
        .get_mut(position)
        .ok_or(EngineError::OutOfBounds {
            position,
            dimensions: state.dimensions(),
        })?;
    cell.receive(Some(placement.player));
    let molecules = cell.molecules();
    next.record_turn(placement.player);

    debug!(%placement, molecules, "Molecule placed");
    Ok(next)
}

/// Places and then resolves every level until the board settles.
#[instrument(skip(state))]
pub fn place_and_resolve_atomic(
    state: &GameState,
    position: Position,
) -> Result<GameState, EngineError> {
    let mover = current_placement(state, position)?.player;
    let placed = place(state, position)?;
    let resolution = resolve_to_fixpoint(placed, mover)?;
    Ok(clear_transient_flags(resolution.state()))
}

/// Returns true if any cell holds more molecules than its capacity.
pub fn has_pending_explosions(state: &GameState) -> bool {
    let grid = state.grid();
    grid.positions().any(|p| grid.is_overloaded(p))
}

/// Returns true if a cascade started by `owner` has nothing left to do.
///
/// That is the case when no cell is overloaded, or when no other player
/// holds a cell, since further levels can no longer change the outcome.
pub fn is_settled(state: &GameState, owner: PlayerId) -> bool {
    !has_pending_explosions(state) || state.grid().owners().iter().all(|p| *p == owner)
}

/// Resolves a single level of simultaneous explosions.
///
/// The returned snapshot's overlay describes only this level: exploding
/// cells with their targets, and every receiving cell with its capture
/// status. When two sources in the same level reach one cell, the first
/// source in row-major order decides its owner.
#[instrument(skip(state))]
pub fn resolve_one_level(state: &GameState, level: u32) -> GameState {
    let snapshot = state.grid();
    let dimensions = snapshot.dimensions();

    let discharges: Vec<Discharge> = snapshot
        .overloaded()
        .into_iter()
        .map(|source| Discharge {
            source,
            owner: snapshot.get(source).and_then(|c| c.owner()),
            targets: neighbors(source, dimensions),
        })
        .collect();

    let mut grid = snapshot.clone();
    let mut traces: BTreeMap<Position, CellTrace> = BTreeMap::new();

    for discharge in &discharges {
        if let Some(cell) = grid.get_mut(discharge.source) {
            cell.discharge(discharge.targets.len() as u32);
        }
        traces
            .entry(discharge.source)
            .or_insert_with(|| CellTrace::new(discharge.source, level))
            .mark_exploding(discharge.targets.clone());
    }

    let mut claimed: BTreeMap<Position, PlayerId> = BTreeMap::new();
    let mut captures = 0usize;
    for discharge in &discharges {
        if discharge.owner.is_none() {
            warn!(source = %discharge.source, "Overloaded cell has no owner");
        }
        for &target in &discharge.targets {
            let new_owner = match discharge.owner {
                Some(owner) => Some(*claimed.entry(target).or_insert(owner)),
                None => None,
            };
            let previous_owner = snapshot.get(target).and_then(|c| c.owner());
            if let Some(cell) = grid.get_mut(target) {
                cell.receive(new_owner);
            }

            let trace = traces
                .entry(target)
                .or_insert_with(|| CellTrace::new(target, level));
            if let (Some(previous), Some(new)) = (previous_owner, new_owner) {
                if previous != new && !trace.is_captured() {
                    trace.mark_captured(previous);
                    captures += 1;
                }
            }
        }
    }

    debug!(
        level,
        explosions = discharges.len(),
        captures,
        "Cascade level resolved"
    );

    let mut next = state.clone();
    next.set_grid(grid);
    next.set_overlay(CascadeOverlay::from_traces(traces.into_values()));
    next
}

/// Resolves levels until the cascade started by `owner` settles.
///
/// Fails with [`EngineError::InvariantViolation`] if the board is still
/// unsettled after [`level_limit`] levels.
#[instrument(skip(state))]
pub fn resolve_to_fixpoint(state: GameState, owner: PlayerId) -> Result<Resolution, EngineError> {
    let limit = level_limit(state.dimensions().cell_count());
    let mut state = state;
    let mut levels: u32 = 0;

    while !is_settled(&state, owner) {
        if levels as usize >= limit {
            warn!(levels, limit, "Cascade did not settle");
            return Err(EngineError::InvariantViolation(format!(
                "cascade still unsettled after {levels} levels"
            )));
        }
        state = resolve_one_level(&state, levels);
        levels += 1;
    }

    if levels > 0 {
        debug!(levels, %owner, "Cascade settled");
    }
    Ok(Resolution { state, levels })
}

/// Returns a copy of the state with the overlay removed. Idempotent.
pub fn clear_transient_flags(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.clear_overlay();
    next
}

/// The placement the current player would make at `position`.
pub(crate) fn current_placement(
    state: &GameState,
    position: Position,
) -> Result<Placement, EngineError> {
    state
        .current_player_id()
        .map(|player| Placement::new(player, position))
        .ok_or_else(|| {
            EngineError::InvariantViolation(format!(
                "current player index {} is out of range",
                state.current_player_index()
            ))
        })
}
