//! Board geometry and the capacity rule.
//!
//! Everything here is a pure function of a position and the board
//! dimensions. The only stateful type is [`Grid`], a dense row-major
//! store of [`Cell`]s.

use crate::{Cell, Dimensions, EngineError, PlayerId, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

/// Geometric class of a cell, derived from where it sits on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum CellKind {
    /// Both coordinates at an edge extreme.
    Corner,
    /// Exactly one coordinate at an edge extreme.
    Edge,
    /// Neither coordinate at an extreme.
    Inner,
}

impl CellKind {
    /// Molecules the cell can hold without exploding.
    pub const fn capacity(self) -> u32 {
        match self {
            CellKind::Corner => 1,
            CellKind::Edge => 2,
            CellKind::Inner => 3,
        }
    }

    /// Molecule count at which the cell explodes.
    pub const fn critical_mass(self) -> u32 {
        self.capacity() + 1
    }
}

/// Classifies a position as corner, edge or inner.
///
/// On a single row or column every cell touches both long edges, so
/// cells there classify as corners or edges only.
pub fn classify(position: Position, dimensions: Dimensions) -> Result<CellKind, EngineError> {
    if !dimensions.contains(position) {
        return Err(EngineError::OutOfBounds {
            position,
            dimensions,
        });
    }

    let x_extreme = position.x == 0 || position.x == dimensions.width() - 1;
    let y_extreme = position.y == 0 || position.y == dimensions.height() - 1;

    Ok(match (x_extreme, y_extreme) {
        (true, true) => CellKind::Corner,
        (true, false) | (false, true) => CellKind::Edge,
        (false, false) => CellKind::Inner,
    })
}

/// Capacity of a cell kind.
pub fn capacity(kind: CellKind) -> u32 {
    kind.capacity()
}

/// Critical mass of a cell kind.
pub fn critical_mass(kind: CellKind) -> u32 {
    kind.critical_mass()
}

/// Orthogonal in-bounds neighbours in the fixed order up, down, left, right.
///
/// Candidates that fall off the board are dropped, so an off-board
/// `position` yields only whichever of its neighbours happen to be on it.
pub fn neighbors(position: Position, dimensions: Dimensions) -> Vec<Position> {
    let Position { x, y } = position;
    [
        y.checked_sub(1).map(|y| Position::new(x, y)),
        y.checked_add(1).map(|y| Position::new(x, y)),
        x.checked_sub(1).map(|x| Position::new(x, y)),
        x.checked_add(1).map(|x| Position::new(x, y)),
    ]
    .into_iter()
    .flatten()
    .filter(|p| dimensions.contains(*p))
    .collect()
}

/// Dense row-major storage of a board's cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty grid.
    #[instrument]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![Cell::EMPTY; dimensions.cell_count()],
        }
    }

    /// The grid's dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The cell at `position`, if it is on the board.
    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.dimensions
            .index_of(position)
            .and_then(|index| self.cells.get(index))
    }

    /// Like [`Grid::get`] but reports off-board positions as an error.
    pub fn cell(&self, position: Position) -> Result<&Cell, EngineError> {
        self.get(position).ok_or(EngineError::OutOfBounds {
            position,
            dimensions: self.dimensions,
        })
    }

    pub(crate) fn get_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.dimensions
            .index_of(position)
            .and_then(|index| self.cells.get_mut(index))
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        self.dimensions.positions()
    }

    /// Every cell with its position, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    /// Cells grouped by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.dimensions.width().max(1) as usize)
    }

    /// Kind of the cell at `position`.
    pub fn kind_of(&self, position: Position) -> Result<CellKind, EngineError> {
        classify(position, self.dimensions)
    }

    /// Returns true if the cell holds more molecules than its capacity.
    pub fn is_overloaded(&self, position: Position) -> bool {
        match (self.get(position), self.kind_of(position)) {
            (Some(cell), Ok(kind)) => cell.molecules() > kind.capacity(),
            _ => false,
        }
    }

    /// Positions of every overloaded cell, row-major.
    pub fn overloaded(&self) -> Vec<Position> {
        self.positions()
            .filter(|p| self.is_overloaded(*p))
            .collect()
    }

    /// Sum of molecules over the whole board.
    pub fn total_molecules(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.molecules())).sum()
    }

    /// Number of cells owned by `player`.
    pub fn owned_by(&self, player: PlayerId) -> usize {
        self.cells.iter().filter(|c| c.is_owned_by(player)).count()
    }

    /// Distinct owners present on the board.
    pub fn owners(&self) -> BTreeSet<PlayerId> {
        self.cells.iter().filter_map(|c| c.owner()).collect()
    }
}
