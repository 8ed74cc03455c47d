//! Plain-text board rendering.

use chain_reaction::{GameState, PlayerId, Position};
use std::fmt;

/// Letter used for a player on the board: the player's position in turn order.
fn label(state: &GameState, player: PlayerId) -> char {
    state
        .players()
        .iter()
        .position(|p| p.id() == player)
        .and_then(|i| char::from_u32('A' as u32 + i as u32))
        .unwrap_or('?')
}

/// Text view of a snapshot: the board, the turn line and the scoreboard.
///
/// Each cell shows its molecule count and owner letter. Cells from the
/// current overlay are suffixed with `*` when exploding and `!` when
/// captured.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a>(pub &'a GameState);

impl BoardView<'_> {
    fn cell_text(&self, position: Position) -> String {
        let state = self.0;
        let cell = state.grid().get(position).copied().unwrap_or_default();
        let body = match cell.owner() {
            Some(owner) => format!("{}{}", cell.molecules(), label(state, owner)),
            None => ".".to_string(),
        };
        let mark = match state.overlay().get(position) {
            Some(trace) if trace.is_exploding() => "*",
            Some(trace) if trace.is_captured() => "!",
            _ => "",
        };
        format!("{body}{mark}")
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        let dims = state.dimensions();

        write!(f, "    ")?;
        for x in 0..dims.width() {
            write!(f, "{x:>4}")?;
        }
        writeln!(f)?;

        for y in 0..dims.height() {
            write!(f, "{y:>4}")?;
            for x in 0..dims.width() {
                write!(f, "{:>4}", self.cell_text(Position::new(x, y)))?;
            }
            writeln!(f)?;
        }

        match (state.outcome(), state.current_player()) {
            (Some(outcome), _) => writeln!(f, "Game over: {outcome}")?,
            (None, Some(player)) => {
                writeln!(f, "Turn: {player} [{}]", label(state, player.id()))?
            }
            (None, None) => {}
        }

        for (id, cells) in state.scoreboard() {
            let name = state.player(id).map(|p| p.name().as_str()).unwrap_or("?");
            writeln!(f, "  {} {name}: {cells}", label(state, id))?;
        }
        Ok(())
    }
}
