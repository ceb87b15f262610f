//! Engine configuration.
//!
//! The engine never reads process state on its own: a config is built by the
//! caller (from defaults or from the environment) and passed in explicitly.

use reelcut_models::DEFAULT_FRAME_RATE;

use crate::error::{EngineError, EngineResult};
use crate::scoring::{ScoreWeights, ScoringStrategy};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Scoring tables and weights
    pub scoring: ScoringStrategy,
    /// Frame rate of edit-list timecodes
    pub frame_rate: f64,
    /// Prefix the written subtitle file with a UTF-8 byte-order mark
    pub subtitle_bom: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringStrategy::default(),
            frame_rate: DEFAULT_FRAME_RATE,
            subtitle_bom: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load a `.env` file if one exists, then read the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Build config from a key lookup, falling back to defaults for absent
    /// or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ScoreWeights::default();
        let number = |key: &str, default: f64| {
            lookup(key)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .unwrap_or(default)
        };

        let weights = ScoreWeights {
            text: number("REELCUT_WEIGHT_TEXT", defaults.text),
            emotion: number("REELCUT_WEIGHT_EMOTION", defaults.emotion),
            shot: number("REELCUT_WEIGHT_SHOT", defaults.shot),
        };

        Self {
            scoring: ScoringStrategy::default().with_weights(weights),
            frame_rate: number("REELCUT_FRAME_RATE", DEFAULT_FRAME_RATE),
            subtitle_bom: lookup("REELCUT_SUBTITLE_BOM")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(false),
        }
    }

    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_subtitle_bom(mut self, subtitle_bom: bool) -> Self {
        self.subtitle_bom = subtitle_bom;
        self
    }

    /// Reject unusable frame rates and weights.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(EngineError::invalid_input(format!(
                "frame rate must be finite and positive, got {}",
                self.frame_rate
            )));
        }
        if !self.scoring.weights.is_valid() {
            return Err(EngineError::invalid_input(format!(
                "score weights must be finite and non-negative, got {:?}",
                self.scoring.weights
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.frame_rate, 30.0);
        assert!(!config.subtitle_bom);
        assert!(config.validate().is_ok());
        assert_eq!(EngineConfig::from_lookup(lookup(&[])), config);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("REELCUT_FRAME_RATE", "24"),
            ("REELCUT_SUBTITLE_BOM", "true"),
            ("REELCUT_WEIGHT_TEXT", "0.8"),
            ("REELCUT_WEIGHT_SHOT", "not-a-number"),
        ]));
        assert_eq!(config.frame_rate, 24.0);
        assert!(config.subtitle_bom);
        assert_eq!(config.scoring.weights.text, 0.8);
        assert_eq!(config.scoring.weights.emotion, 0.3);
        assert_eq!(config.scoring.weights.shot, 0.1);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EngineConfig::default().with_frame_rate(0.0);
        assert!(matches!(config.validate(), Err(EngineError::InvalidInput(_))));

        let mut config = EngineConfig::default();
        config.scoring.weights.emotion = f64::INFINITY;
        assert!(config.validate().is_err());
    }
}
