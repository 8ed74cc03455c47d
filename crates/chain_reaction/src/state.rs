//! Immutable game snapshots.

use crate::{CascadeOverlay, Dimensions, Grid, Outcome, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete snapshot of a game.
///
/// Snapshots are values: engine operations borrow one and return a fresh
/// one, so a rejected operation never disturbs the caller's copy. All fields
/// are private; external layers read them through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    grid: Grid,
    players: Vec<Player>,
    current_player_index: usize,
    outcome: Option<Outcome>,
    turns_taken: BTreeMap<PlayerId, u32>,
    #[serde(default, skip_serializing_if = "CascadeOverlay::is_empty")]
    overlay: CascadeOverlay,
}

impl GameState {
    /// Fresh state with an empty grid. Callers validate the inputs first.
    pub(crate) fn fresh(dimensions: Dimensions, players: Vec<Player>) -> Self {
        let turns_taken = players.iter().map(|p| (p.id(), 0)).collect();
        Self {
            grid: Grid::new(dimensions),
            players,
            current_player_index: 0,
            outcome: None,
            turns_taken,
            overlay: CascadeOverlay::default(),
        }
    }

    /// The board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Board dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Looks up a player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Index of the player whose turn it is.
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Id of the player whose turn it is.
    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.current_player().map(Player::id)
    }

    /// How the game ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns true once the game has an outcome.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The winner, if the game ended with one.
    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.and_then(|o| o.winner())
    }

    /// Placements made so far by `player`. Unknown players report 0.
    pub fn turns_taken(&self, player: PlayerId) -> u32 {
        self.turns_taken.get(&player).copied().unwrap_or(0)
    }

    /// The full turn ledger.
    pub fn turn_ledger(&self) -> &BTreeMap<PlayerId, u32> {
        &self.turns_taken
    }

    /// Transient metadata from the most recent cascade level.
    pub fn overlay(&self) -> &CascadeOverlay {
        &self.overlay
    }

    /// Owned-cell count for each player, in turn order.
    pub fn scoreboard(&self) -> Vec<(PlayerId, usize)> {
        self.players
            .iter()
            .map(|p| (p.id(), self.grid.owned_by(p.id())))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    //  Crate-internal mutation, used on fresh clones only
    // ─────────────────────────────────────────────────────────────

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub(crate) fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    pub(crate) fn set_overlay(&mut self, overlay: CascadeOverlay) {
        self.overlay = overlay;
    }

    pub(crate) fn clear_overlay(&mut self) {
        self.overlay = CascadeOverlay::default();
    }

    pub(crate) fn record_turn(&mut self, player: PlayerId) {
        *self.turns_taken.entry(player).or_insert(0) += 1;
    }

    pub(crate) fn set_current_player_index(&mut self, index: usize) {
        self.current_player_index = index;
    }

    pub(crate) fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }

    #[cfg(test)]
    pub(crate) fn turn_ledger_mut(&mut self) -> &mut BTreeMap<PlayerId, u32> {
        &mut self.turns_taken
    }
}
