//! Session configuration, loadable from JSON
//!
//! ```json
//! {
//!   "game": "DirectionalSwipe",
//!   "preset": "relaxed",
//!   "seed": 7,
//!   "timing": { "round_time_ms": 6000 },
//!   "log": { "level": "debug", "json": true }
//! }
//! ```
//!
//! Every field is optional. Timing overrides are applied on top of the preset
//! and ignored by games without the matching timer.

use std::path::Path;
use std::time::Duration;

use mano_core::{CanvasSize, GameKind, ManoError, ManoResult};
use mano_games::GameConfig;
use serde::{Deserialize, Serialize};

/// Base tuning for the selected game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Standard,
    /// Slower cadence, longer rounds
    Relaxed,
}

/// Millisecond timing overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingOverrides {
    /// ReactionTarget spawn interval
    pub spawn_interval_ms: Option<u64>,
    /// Round timer of the gesture, swipe and pose games
    pub round_time_ms: Option<u64>,
    /// SequenceRecallBalls flash / wait / feedback windows
    pub flash_time_ms: Option<u64>,
    pub wait_time_ms: Option<u64>,
    pub feedback_time_ms: Option<u64>,
}

impl TimingOverrides {
    fn fields(&self) -> [(&'static str, Option<u64>); 5] {
        [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("round_time_ms", self.round_time_ms),
            ("flash_time_ms", self.flash_time_ms),
            ("wait_time_ms", self.wait_time_ms),
            ("feedback_time_ms", self.feedback_time_ms),
        ]
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    /// JSON lines instead of human-readable output
    pub json: bool,
    /// Include the event target (module path)
    pub targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
            json: false,
            targets: true,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub game: GameKind,
    pub preset: Preset,
    /// Fixed seed for reproducible rounds; entropy when absent
    pub seed: Option<u64>,
    pub canvas: CanvasSize,
    /// Pacing of sources that generate their own frames
    pub tick_interval_ms: u64,
    pub timing: TimingOverrides,
    pub log: LogConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            game: GameKind::ReactionTarget,
            preset: Preset::Standard,
            seed: None,
            canvas: CanvasSize::default(),
            tick_interval_ms: 33,
            timing: TimingOverrides::default(),
            log: LogConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> ManoResult<Self> {
        let config: SessionConfig =
            serde_json::from_str(json).map_err(|e| ManoError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> ManoResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ManoError::ConfigIo(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ManoResult<()> {
        let canvas_ok = self.canvas.width.is_finite()
            && self.canvas.height.is_finite()
            && self.canvas.width > 0.0
            && self.canvas.height > 0.0;
        if !canvas_ok {
            return Err(ManoError::InvalidConfig(format!(
                "canvas must be positive, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ManoError::InvalidConfig(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        for (name, value) in self.timing.fields() {
            if value == Some(0) {
                return Err(ManoError::InvalidConfig(format!("{} must be positive", name)));
            }
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Preset for the selected game with the timing overrides applied
    pub fn game_config(&self) -> GameConfig {
        let mut config = match self.preset {
            Preset::Standard => GameConfig::default_for(self.game),
            Preset::Relaxed => GameConfig::relaxed_for(self.game),
        };
        let timing = self.timing;
        let ms = Duration::from_millis;

        match &mut config {
            GameConfig::ReactionTarget(c) => {
                if let Some(v) = timing.spawn_interval_ms {
                    c.spawn_interval = ms(v);
                }
            }
            GameConfig::ShapeTrace(_) => {}
            GameConfig::SequenceRecallBalls(c) => {
                if let Some(v) = timing.flash_time_ms {
                    c.flash_time = ms(v);
                }
                if let Some(v) = timing.wait_time_ms {
                    c.wait_time = ms(v);
                }
                if let Some(v) = timing.feedback_time_ms {
                    c.feedback_time = ms(v);
                }
            }
            GameConfig::SequenceRecallGestures(c) => {
                if let Some(v) = timing.round_time_ms {
                    c.round_time = ms(v);
                }
            }
            GameConfig::DirectionalSwipe(c) => {
                if let Some(v) = timing.round_time_ms {
                    c.round_time = ms(v);
                }
            }
            GameConfig::PoseMatch(c) => {
                if let Some(v) = timing.round_time_ms {
                    c.round_time = ms(v);
                }
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = SessionConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(33));
    }

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "game": "DirectionalSwipe",
            "preset": "relaxed",
            "seed": 7,
            "canvas": { "width": 1280.0, "height": 720.0 },
            "timing": { "round_time_ms": 6000 },
            "log": { "level": "debug", "json": true }
        }"#;
        let config = SessionConfig::from_json_str(json).unwrap();

        assert_eq!(config.game, GameKind::DirectionalSwipe);
        assert_eq!(config.preset, Preset::Relaxed);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.canvas, CanvasSize::new(1280.0, 720.0));
        assert!(config.log.json);
        assert!(config.log.targets);

        match config.game_config() {
            GameConfig::DirectionalSwipe(c) => {
                assert_eq!(c.round_time, Duration::from_millis(6_000));
                assert_eq!(c.distance_threshold, 80.0);
            }
            other => panic!("unexpected config {:?}", other),
        }
    }

    #[test]
    fn test_ball_overrides() {
        let config = SessionConfig {
            game: GameKind::SequenceRecallBalls,
            timing: TimingOverrides {
                flash_time_ms: Some(400),
                feedback_time_ms: Some(250),
                ..TimingOverrides::default()
            },
            ..SessionConfig::default()
        };
        match config.game_config() {
            GameConfig::SequenceRecallBalls(c) => {
                assert_eq!(c.flash_time, Duration::from_millis(400));
                assert_eq!(c.wait_time, Duration::from_millis(300));
                assert_eq!(c.feedback_time, Duration::from_millis(250));
            }
            other => panic!("unexpected config {:?}", other),
        }
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"game": "Tetris"}"#),
            Err(ManoError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"tick_interval_ms": 0}"#),
            Err(ManoError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"canvas": {"width": 0.0, "height": 480.0}}"#),
            Err(ManoError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"timing": {"wait_time_ms": 0}}"#),
            Err(ManoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SessionConfig::from_path("/nonexistent/mano/session.json").unwrap_err();
        assert!(matches!(err, ManoError::ConfigIo(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("mano-session-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"game": "PoseMatch", "seed": 3}"#).unwrap();

        let config = SessionConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.game, GameKind::PoseMatch);
        assert_eq!(config.seed, Some(3));
    }

    proptest! {
        #[test]
        fn test_game_config_matches_selected_game(kind in 0usize..6, relaxed in any::<bool>()) {
            let config = SessionConfig {
                game: GameKind::ALL[kind],
                preset: if relaxed { Preset::Relaxed } else { Preset::Standard },
                ..SessionConfig::default()
            };
            prop_assert_eq!(config.game_config().kind(), GameKind::ALL[kind]);
        }
    }
}
