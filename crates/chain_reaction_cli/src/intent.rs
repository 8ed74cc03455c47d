//! Line-oriented intent parsing.
//!
//! One intent per line: `place X Y`, bare `X Y`, `restart` or `quit`.
//! Blank lines and `#` comments are skipped.

use chain_reaction::{Intent, Position};
use derive_more::{Display, Error};

/// A parsed script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLine {
    /// An intent for the session.
    Intent(Intent),
    /// Stop reading input.
    Quit,
}

/// A line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Cannot parse {:?}: {}", input, reason)]
pub struct IntentError {
    /// The offending input.
    pub input: String,
    /// What was wrong with it.
    pub reason: String,
}

impl IntentError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parses one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptLine>, IntentError> {
    let content = line.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return Ok(None);
    }

    let words: Vec<&str> = content.split_whitespace().collect();
    let parsed = match words.as_slice() {
        [word] if word.eq_ignore_ascii_case("quit") || word.eq_ignore_ascii_case("exit") => {
            ScriptLine::Quit
        }
        [word] if word.eq_ignore_ascii_case("restart") => ScriptLine::Intent(Intent::Restart),
        [word, x, y] if word.eq_ignore_ascii_case("place") => {
            ScriptLine::Intent(Intent::Place(coordinates(line, x, y)?))
        }
        [x, y] => ScriptLine::Intent(Intent::Place(coordinates(line, x, y)?)),
        _ => return Err(IntentError::new(line, "expected \"place X Y\", \"restart\" or \"quit\"")),
    };
    Ok(Some(parsed))
}

/// Parses a move given as `X,Y`.
pub fn parse_move(text: &str) -> Result<Position, IntentError> {
    match text.split_once(',') {
        Some((x, y)) => coordinates(text, x.trim(), y.trim()),
        None => Err(IntentError::new(text, "expected \"X,Y\"")),
    }
}

fn coordinates(input: &str, x: &str, y: &str) -> Result<Position, IntentError> {
    let parse = |value: &str| {
        value
            .parse::<u32>()
            .map_err(|e| IntentError::new(input, format!("bad coordinate {value:?}: {e}")))
    };
    Ok(Position::new(parse(x)?, parse(y)?))
}
