//! Transient cascade metadata for animated consumers.
//!
//! The overlay records what happened to each touched cell during the most
//! recent cascade level. It is presentation data only: nothing in the
//! engine reads it back, and it is cleared before every turn advance.

use crate::{PlayerId, Position};
use serde::{Deserialize, Serialize};

/// What one cascade level did to a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTrace {
    position: Position,
    level: u32,
    exploding: bool,
    captured: bool,
    previous_owner: Option<PlayerId>,
    targets: Vec<Position>,
}

impl CellTrace {
    pub(crate) fn new(position: Position, level: u32) -> Self {
        Self {
            position,
            level,
            exploding: false,
            captured: false,
            previous_owner: None,
            targets: Vec::new(),
        }
    }

    pub(crate) fn mark_exploding(&mut self, targets: Vec<Position>) {
        self.exploding = true;
        self.targets = targets;
    }

    pub(crate) fn mark_captured(&mut self, previous_owner: PlayerId) {
        self.captured = true;
        self.previous_owner = Some(previous_owner);
    }

    /// The traced cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Cascade level that touched the cell, starting at 0.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns true if the cell exploded in this level.
    pub fn is_exploding(&self) -> bool {
        self.exploding
    }

    /// Returns true if the cell changed hands in this level.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Owner before a capture.
    pub fn previous_owner(&self) -> Option<PlayerId> {
        self.previous_owner
    }

    /// Cells this one sent molecules to, in neighbour order.
    pub fn targets(&self) -> &[Position] {
        &self.targets
    }
}

/// Per-cell traces for one cascade level, sorted row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CascadeOverlay {
    traces: Vec<CellTrace>,
}

impl CascadeOverlay {
    /// Builds an overlay from traces, ordering them row-major.
    pub(crate) fn from_traces(traces: impl IntoIterator<Item = CellTrace>) -> Self {
        let mut traces: Vec<_> = traces.into_iter().collect();
        traces.sort_by_key(CellTrace::position);
        Self { traces }
    }

    /// Returns true if no cell is traced.
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// All traces, row-major.
    pub fn traces(&self) -> &[CellTrace] {
        &self.traces
    }

    /// The trace for `position`, if it was touched.
    pub fn get(&self, position: Position) -> Option<&CellTrace> {
        self.traces
            .binary_search_by_key(&position, CellTrace::position)
            .ok()
            .and_then(|index| self.traces.get(index))
    }

    /// Positions that exploded.
    pub fn exploding(&self) -> impl Iterator<Item = Position> + '_ {
        self.traces
            .iter()
            .filter(|t| t.exploding)
            .map(CellTrace::position)
    }

    /// Positions that were captured.
    pub fn captured(&self) -> impl Iterator<Item = Position> + '_ {
        self.traces
            .iter()
            .filter(|t| t.captured)
            .map(CellTrace::position)
    }
}
