//! Game configuration

use crate::types::{Color, Orientation};
use crate::variant::Variant;

use std::path::PathBuf;

use thiserror::Error;

/// Default command used to ask the engine for a move
pub const DEFAULT_GO_COMMAND: &str = "go movetime 1000";

/// Error validating [`GameConfig`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Side is played by the engine, but no engine is configured
    #[error("{0} is played by the engine, but no engine is configured")]
    MissingEngine(Color),
    /// Engine cannot play this variant
    #[error("engine can only play the standard variant, not {0}")]
    UnsupportedVariant(Variant),
}

/// Who makes the moves for one side
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Controller {
    #[default]
    Human,
    Engine,
}

/// Controllers of both sides
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Players {
    pub white: Controller,
    pub black: Controller,
}

impl Players {
    /// Both sides are played by humans
    pub const fn humans() -> Players {
        Players {
            white: Controller::Human,
            black: Controller::Human,
        }
    }

    /// Side `human` is played by a human, the other one by the engine
    pub const fn against_engine(human: Color) -> Players {
        match human {
            Color::White => Players {
                white: Controller::Human,
                black: Controller::Engine,
            },
            Color::Black => Players {
                white: Controller::Engine,
                black: Controller::Human,
            },
        }
    }

    pub const fn get(&self, c: Color) -> Controller {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Returns the first side played by the engine, if any
    pub fn engine_side(&self) -> Option<Color> {
        Color::iter().find(|&c| self.get(c) == Controller::Engine)
    }
}

/// How to launch the engine process
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EngineConfig {
    /// Path to the executable
    pub path: PathBuf,
    /// Command line arguments
    pub args: Vec<String>,
    /// Command sent to request a move, e.g. `go depth 12`
    pub go_command: String,
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> EngineConfig {
        EngineConfig {
            path: path.into(),
            args: Vec::new(),
            go_command: DEFAULT_GO_COMMAND.to_string(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> EngineConfig
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_go_command(mut self, cmd: impl Into<String>) -> EngineConfig {
        self.go_command = cmd.into();
        self
    }
}

/// Everything needed to start a game
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub variant: Variant,
    pub orientation: Orientation,
    pub players: Players,
    pub engine: Option<EngineConfig>,
    /// Seed for the back rank shuffle. If `None`, the thread-local generator is used.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(variant: Variant) -> GameConfig {
        GameConfig {
            variant,
            ..GameConfig::default()
        }
    }

    /// Checks that the player setup can be launched with the given engine availability
    pub(crate) fn validate_players(&self, has_engine: bool) -> Result<(), ConfigError> {
        if let Some(side) = self.players.engine_side() {
            if !has_engine {
                return Err(ConfigError::MissingEngine(side));
            }
            if self.variant != Variant::Standard {
                return Err(ConfigError::UnsupportedVariant(self.variant));
            }
        }
        Ok(())
    }

    /// Checks that the configuration describes a game which can be started
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_players(self.engine.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_players() {
        let p = Players::against_engine(Color::Black);
        assert_eq!(p.get(Color::White), Controller::Engine);
        assert_eq!(p.get(Color::Black), Controller::Human);
        assert_eq!(p.engine_side(), Some(Color::White));
        assert_eq!(Players::humans().engine_side(), None);
        assert_eq!(Players::default(), Players::humans());
    }

    #[test]
    fn test_validate() {
        let mut cfg = GameConfig::new(Variant::Horde);
        assert_eq!(cfg.validate(), Ok(()));

        cfg.players = Players::against_engine(Color::White);
        assert_eq!(cfg.validate(), Err(ConfigError::MissingEngine(Color::Black)));

        cfg.engine = Some(EngineConfig::new("stockfish"));
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::UnsupportedVariant(Variant::Horde))
        );

        cfg.variant = Variant::Standard;
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_engine_config() {
        let e = EngineConfig::new("/usr/bin/stockfish");
        assert_eq!(e.go_command, DEFAULT_GO_COMMAND);
        assert!(e.args.is_empty());
        let e = e.with_args(["--threads", "2"]).with_go_command("go depth 5");
        assert_eq!(e.args, vec!["--threads".to_string(), "2".to_string()]);
        assert_eq!(e.go_command, "go depth 5");
    }
}
