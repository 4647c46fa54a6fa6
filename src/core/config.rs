//! Engine configuration.
//!
//! Timing values are stored as milliseconds so config files stay readable;
//! accessors hand out `Duration`s to the scheduler.
//!
//! ```
//! use simon_engine::core::{EngineConfig, SequencePolicy};
//!
//! let config = EngineConfig::default()
//!     .with_base_length(3)
//!     .with_step_ms(800)
//!     .with_highlight_ms(600)
//!     .with_policy(SequencePolicy::Regenerate);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.step().as_millis(), 800);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Starting sequence length for a fresh game.
pub const BASE_LENGTH: usize = 2;

/// Time between the starts of two consecutive playback highlights.
pub const DEFAULT_STEP_MS: u64 = 500;

/// How long a single highlight stays lit.
pub const DEFAULT_HIGHLIGHT_MS: u64 = 500;

/// Pause between announcing a round and starting its playback.
pub const DEFAULT_ROUND_DELAY_MS: u64 = 1000;

/// How the next round's sequence is built after a win.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencePolicy {
    /// Append new symbols to the sequence the player just reproduced.
    #[default]
    Extend,
    /// Draw an entirely new sequence of the longer length.
    Regenerate,
}

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sequence length of the first round (default: 2).
    pub base_length: usize,

    /// Milliseconds between playback highlights.
    pub step_ms: u64,

    /// Milliseconds each highlight is presented for. Must not exceed `step_ms`.
    pub highlight_ms: u64,

    /// Milliseconds between the round announcement and playback.
    pub round_delay_ms: u64,

    /// Input lockout after each correct but incomplete pick.
    /// `None` re-enables input immediately.
    pub pick_lockout_ms: Option<u64>,

    /// Sequence growth policy on a win.
    pub policy: SequencePolicy,

    /// Seed for the sequence RNG. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_length: BASE_LENGTH,
            step_ms: DEFAULT_STEP_MS,
            highlight_ms: DEFAULT_HIGHLIGHT_MS,
            round_delay_ms: DEFAULT_ROUND_DELAY_MS,
            pick_lockout_ms: None,
            policy: SequencePolicy::Extend,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Check that the engine can run with these values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_length == 0 {
            return Err(ConfigError::Invalid {
                field: "base_length",
                reason: "must be at least 1".into(),
            });
        }
        if self.step_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "step_ms",
                reason: "must be greater than 0".into(),
            });
        }
        if self.highlight_ms > self.step_ms {
            return Err(ConfigError::Invalid {
                field: "highlight_ms",
                reason: format!(
                    "{}ms highlight overlaps the next {}ms step",
                    self.highlight_ms, self.step_ms
                ),
            });
        }
        if self.pick_lockout_ms == Some(0) {
            return Err(ConfigError::Invalid {
                field: "pick_lockout_ms",
                reason: "use null to disable the lockout".into(),
            });
        }
        Ok(())
    }

    /// Set the starting sequence length.
    #[must_use]
    pub fn with_base_length(mut self, length: usize) -> Self {
        self.base_length = length;
        self
    }

    /// Set the playback step.
    #[must_use]
    pub fn with_step_ms(mut self, ms: u64) -> Self {
        self.step_ms = ms;
        self
    }

    /// Set the highlight duration.
    #[must_use]
    pub fn with_highlight_ms(mut self, ms: u64) -> Self {
        self.highlight_ms = ms;
        self
    }

    /// Set the pre-round delay.
    #[must_use]
    pub fn with_round_delay_ms(mut self, ms: u64) -> Self {
        self.round_delay_ms = ms;
        self
    }

    /// Enable the post-pick input lockout.
    #[must_use]
    pub fn with_pick_lockout_ms(mut self, ms: u64) -> Self {
        self.pick_lockout_ms = Some(ms);
        self
    }

    /// Set the growth policy.
    #[must_use]
    pub fn with_policy(mut self, policy: SequencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    #[must_use]
    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    #[must_use]
    pub fn round_delay(&self) -> Duration {
        Duration::from_millis(self.round_delay_ms)
    }

    #[must_use]
    pub fn pick_lockout(&self) -> Option<Duration> {
        self.pick_lockout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.base_length, 2);
        assert_eq!(config.step(), Duration::from_millis(500));
        assert_eq!(config.highlight(), Duration::from_millis(500));
        assert_eq!(config.round_delay(), Duration::from_secs(1));
        assert_eq!(config.pick_lockout(), None);
        assert_eq!(config.policy, SequencePolicy::Extend);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_base_length(4)
            .with_pick_lockout_ms(250)
            .with_seed(9);

        assert_eq!(config.base_length, 4);
        assert_eq!(config.pick_lockout(), Some(Duration::from_millis(250)));
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{"step_ms": 800, "policy": "regenerate"}"#).unwrap();

        assert_eq!(config.step_ms, 800);
        assert_eq!(config.highlight_ms, DEFAULT_HIGHLIGHT_MS);
        assert_eq!(config.base_length, BASE_LENGTH);
        assert_eq!(config.policy, SequencePolicy::Regenerate);
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::default().with_pick_lockout_ms(300).with_seed(1);

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_base_length() {
        let err = EngineConfig::default().with_base_length(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "base_length", .. }));
    }

    #[test]
    fn test_rejects_highlight_longer_than_step() {
        let err = EngineConfig::default()
            .with_step_ms(300)
            .with_highlight_ms(400)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "highlight_ms", .. }));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
