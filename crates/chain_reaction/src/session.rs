//! Local game sessions.
//!
//! A [`Session`] owns the current snapshot and turns a stream of player
//! intents into engine calls. It allows one placement in flight at a time:
//! while a stepwise cascade is unresolved, new placements are refused.

use crate::game::{StepwiseTurn, begin_stepwise_turn, new_game, play_turn};
use crate::{EngineError, GameState, IllegalMove, Phase, Player, PlayerId, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Default board width.
pub const DEFAULT_WIDTH: u32 = 8;
/// Default board height.
pub const DEFAULT_HEIGHT: u32 = 16;
/// Most players a session accepts.
pub const MAX_PLAYERS: usize = 8;

/// Setup parameters for a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in cells.
    width: u32,
    /// Board height in cells.
    height: u32,
    /// Display names in turn order.
    player_names: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::with_player_count(DEFAULT_WIDTH, DEFAULT_HEIGHT, 2)
    }
}

impl GameConfig {
    /// Creates a config from explicit names.
    pub fn new(width: u32, height: u32, player_names: Vec<String>) -> Self {
        Self {
            width,
            height,
            player_names,
        }
    }

    /// Creates a config with `count` players named "Player 1", "Player 2", ...
    pub fn with_player_count(width: u32, height: u32, count: usize) -> Self {
        Self::new(width, height, default_names(count))
    }

    /// Checks player count and dimensions.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), EngineError> {
        let count = self.player_names.len();
        if !(crate::MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(EngineError::InvalidConfiguration(format!(
                "between {} and {MAX_PLAYERS} players are required, got {count}",
                crate::MIN_PLAYERS
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Builds the player list, with ids `0..n` in name order.
    pub fn players(&self) -> Vec<Player> {
        self.player_names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerId::new(i as u32), name.clone()))
            .collect()
    }
}

/// Default display names for `count` players.
pub fn default_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Player {i}")).collect()
}

/// A player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// The current player places at a cell.
    Place(Position),
    /// Start over with the same config.
    Restart,
}

/// A running local game.
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    state: GameState,
    pending: Option<StepwiseTurn>,
}

impl Session {
    /// Validates the config and starts a fresh game.
    #[instrument]
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let state = new_game(config.width, config.height, config.players())?;
        info!(players = config.player_names.len(), "Session started");
        Ok(Self {
            config,
            state,
            pending: None,
        })
    }

    /// The session's setup parameters.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The last committed snapshot. During stepwise resolution this is the
    /// state from before the placement; see [`Session::snapshot`].
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The snapshot a renderer should show right now.
    pub fn snapshot(&self) -> &GameState {
        self.pending
            .as_ref()
            .map(StepwiseTurn::snapshot)
            .unwrap_or(&self.state)
    }

    /// Where the session is in its turn cycle.
    pub fn phase(&self) -> Phase {
        if self.state.is_over() {
            Phase::Finished
        } else if self.pending.is_some() {
            Phase::Resolving
        } else {
            Phase::AwaitingPlacement
        }
    }

    /// Plays a full turn at `position`.
    #[instrument(skip(self))]
    pub fn play(&mut self, position: Position) -> Result<&GameState, EngineError> {
        self.ensure_idle()?;
        self.state = play_turn(&self.state, position)?;
        Ok(&self.state)
    }

    /// Places at `position` and starts a stepwise cascade.
    ///
    /// Returns the snapshot right after the placement.
    #[instrument(skip(self))]
    pub fn begin_stepwise(&mut self, position: Position) -> Result<&GameState, EngineError> {
        self.ensure_idle()?;
        let turn = begin_stepwise_turn(&self.state, position)?;
        Ok(self.pending.insert(turn).snapshot())
    }

    /// Returns true if a stepwise cascade has another level to resolve.
    pub fn has_pending_level(&self) -> bool {
        self.pending.as_ref().is_some_and(StepwiseTurn::has_next)
    }

    /// Resolves one level of the pending cascade.
    ///
    /// Returns `None` when nothing is pending or the cascade has settled.
    pub fn advance_level(&mut self) -> Result<Option<&GameState>, EngineError> {
        match self.pending.as_mut() {
            Some(turn) => turn.advance_level(),
            None => Ok(None),
        }
    }

    /// Completes the pending stepwise turn, if any.
    #[instrument(skip(self))]
    pub fn finish_stepwise(&mut self) -> Result<&GameState, EngineError> {
        if let Some(turn) = self.pending.take() {
            let placement = turn.placement();
            self.state = turn.finish()?;
            debug!(%placement, "Stepwise turn committed");
        }
        Ok(&self.state)
    }

    /// Discards any in-flight cascade and starts a fresh game.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<&GameState, EngineError> {
        if self.pending.take().is_some() {
            debug!("Discarded in-flight cascade");
        }
        self.state = new_game(
            self.config.width,
            self.config.height,
            self.config.players(),
        )?;
        info!("Session restarted");
        Ok(&self.state)
    }

    /// Applies an intent.
    pub fn apply(&mut self, intent: Intent) -> Result<&GameState, EngineError> {
        match intent {
            Intent::Place(position) => self.play(position),
            Intent::Restart => self.restart(),
        }
    }

    /// Owned-cell count per player, in turn order.
    pub fn scoreboard(&self) -> Vec<(PlayerId, usize)> {
        self.snapshot().scoreboard()
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.pending.is_some() {
            warn!("Placement refused while a cascade is resolving");
            return Err(IllegalMove::ResolutionInProgress.into());
        }
        Ok(())
    }
}
