//! Game configuration loading.
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags. Anything left unset falls back to the engine's
//! defaults.

use chain_reaction::{DEFAULT_HEIGHT, DEFAULT_WIDTH, GameConfig, default_names};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Contents of a configuration file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Board width in cells.
    width: Option<u32>,

    /// Board height in cells.
    height: Option<u32>,

    /// Number of players; names are padded or truncated to match.
    players: Option<usize>,

    /// Display names in turn order.
    player_names: Option<Vec<String>>,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct ConfigOverrides {
    /// Board width.
    width: Option<u32>,
    /// Board height.
    height: Option<u32>,
    /// Number of players.
    players: Option<usize>,
    /// Player names; empty means "not given".
    player_names: Vec<String>,
}

/// Merges file values and overrides into a validated [`GameConfig`].
#[instrument(skip(file, overrides))]
pub fn resolve(file: &FileConfig, overrides: &ConfigOverrides) -> Result<GameConfig, ConfigError> {
    let width = overrides.width.or(*file.width()).unwrap_or(DEFAULT_WIDTH);
    let height = overrides.height.or(*file.height()).unwrap_or(DEFAULT_HEIGHT);

    let mut names = if overrides.player_names.is_empty() {
        file.player_names().clone().unwrap_or_default()
    } else {
        overrides.player_names.clone()
    };
    let count = overrides
        .players
        .or(*file.players())
        .unwrap_or(if names.is_empty() { 2 } else { names.len() });
    fit_names(&mut names, count);

    let config = GameConfig::new(width, height, names);
    config
        .validate()
        .map_err(|e| ConfigError::new(e.to_string()))?;

    info!(width, height, players = count, "Configuration resolved");
    Ok(config)
}

/// Loads the optional file at `path` and applies `overrides`.
pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<GameConfig, ConfigError> {
    let file = match path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    resolve(&file, overrides)
}

/// Pads with default names or truncates so exactly `count` names remain.
fn fit_names(names: &mut Vec<String>, count: usize) {
    if names.len() > count {
        names.truncate(count);
    } else {
        let defaults = default_names(count);
        names.extend(defaults.into_iter().skip(names.len()));
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = load(None, &ConfigOverrides::default()).expect("defaults");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_file_values() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "width = 6\nheight = 9\nplayer_names = [\"Ada\", \"Grace\", \"Linus\"]"
        )
        .expect("write");

        let config = load(Some(file.path()), &ConfigOverrides::default()).expect("load");
        assert_eq!(*config.width(), 6);
        assert_eq!(*config.height(), 9);
        assert_eq!(config.player_names(), &vec!["Ada", "Grace", "Linus"]);
    }

    #[test]
    fn test_overrides_win() {
        let file = FileConfig::from_toml("width = 6\nplayers = 4").expect("parse");
        let overrides = ConfigOverrides::default().with_width(10).with_players(3);
        let config = resolve(&file, &overrides).expect("resolve");
        assert_eq!(*config.width(), 10);
        assert_eq!(*config.height(), DEFAULT_HEIGHT);
        assert_eq!(
            config.player_names(),
            &vec!["Player 1", "Player 2", "Player 3"]
        );
    }

    #[test]
    fn test_names_fit_player_count() {
        let file = FileConfig::from_toml("players = 3\nplayer_names = [\"Ada\"]").expect("parse");
        let config = resolve(&file, &ConfigOverrides::default()).expect("resolve");
        assert_eq!(config.player_names(), &vec!["Ada", "Player 2", "Player 3"]);

        let overrides = ConfigOverrides::default()
            .with_player_names(vec!["A".into(), "B".into(), "C".into()])
            .with_players(2);
        let config = resolve(&FileConfig::default(), &overrides).expect("resolve");
        assert_eq!(config.player_names(), &vec!["A", "B"]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = FileConfig::from_toml("players = 9").expect("parse");
        let err = resolve(&file, &ConfigOverrides::default()).expect_err("too many players");
        assert!(err.message.contains("players"));

        assert!(FileConfig::from_toml("colour = \"red\"").is_err());
        assert!(load(Some(Path::new("/nonexistent/chain.toml")), &ConfigOverrides::default()).is_err());
    }
}
