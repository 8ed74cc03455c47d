//! Core domain types: players and cells.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identity of a player. Turn order is carried by the player list,
/// not by the id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("P{}", _0)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Wraps a raw id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// A participant in the game.
///
/// `attributes` is an opaque bag of display data (colors, avatars) that
/// the engine carries but never interprets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Player {
    #[getter(skip)]
    id: PlayerId,
    name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
}

impl Player {
    /// Creates a player with no attributes.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Returns this player with an extra display attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The player's id.
    pub fn id(&self) -> PlayerId {
        self.id
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// One square of the board.
///
/// A cell holds zero molecules exactly when it has no owner. The fields are
/// private so that only the cascade resolver can change them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    owner: Option<PlayerId>,
    molecules: u32,
}

impl Cell {
    /// An unowned cell with no molecules.
    pub const EMPTY: Cell = Cell::new(None, 0);

    pub(crate) const fn new(owner: Option<PlayerId>, molecules: u32) -> Self {
        Self { owner, molecules }
    }

    /// The owning player, if any.
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Number of molecules in the cell.
    pub fn molecules(&self) -> u32 {
        self.molecules
    }

    /// Returns true if nobody owns the cell.
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }

    /// Returns true if the cell belongs to `player`.
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Adds one molecule and hands the cell to `owner`.
    pub(crate) fn receive(&mut self, owner: Option<PlayerId>) {
        self.molecules += 1;
        if owner.is_some() {
            self.owner = owner;
        }
    }

    /// Removes `count` molecules, clearing the owner when nothing is left.
    pub(crate) fn discharge(&mut self, count: u32) {
        debug_assert!(count <= self.molecules, "discharge exceeds contents");
        self.molecules = self.molecules.saturating_sub(count);
        if self.molecules == 0 {
            self.owner = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId::new(3).to_string(), "P3");
        assert_eq!(PlayerId::from(7).get(), 7);
    }

    #[test]
    fn test_player_attributes() {
        let player = Player::new(PlayerId::new(0), "Ada").with_attribute("color", "red");
        assert_eq!(player.name(), "Ada");
        assert_eq!(player.attributes().get("color").map(String::as_str), Some("red"));
        assert_eq!(player.id(), PlayerId::new(0));
    }

    #[test]
    fn test_cell_receive_and_discharge() {
        let p = PlayerId::new(1);
        let mut cell = Cell::EMPTY;
        cell.receive(Some(p));
        cell.receive(Some(p));
        assert_eq!(cell.molecules(), 2);
        assert!(cell.is_owned_by(p));

        cell.discharge(1);
        assert_eq!(cell.molecules(), 1);
        assert!(cell.is_owned_by(p));

        cell.discharge(1);
        assert_eq!(cell, Cell::EMPTY);
    }

    #[test]
    fn test_empty_cell_matches_default() {
        assert_eq!(Cell::EMPTY, Cell::default());
        assert!(Cell::EMPTY.is_empty());

        let cell = Cell::new(Some(PlayerId::new(2)), 3);
        assert_eq!(cell.owner(), Some(PlayerId::new(2)));
        assert_eq!(cell.molecules(), 3);
        assert!(!cell.is_empty());
    }
}
