//! Optimizer configuration
//!
//! - Disabling the optimizer passes queries through untouched
//! - Score weights are tunable; defaults are the calibrated constants
//! - Missing JSON fields take their defaults

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{OptimizerError, OptimizerResult};
use super::score::ScoreWeights;
use crate::observability::{log_event_with_fields, Event};

/// Configuration for the condition reordering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Whether conditions are reordered at all.
    pub enabled: bool,
    /// Cost multipliers used by the scorer.
    pub weights: ScoreWeights,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            weights: ScoreWeights::default(),
        }
    }
}

impl OptimizerConfig {
    /// Create config with reordering enabled.
    pub fn enabled() -> Self {
        Self::default()
    }

    /// Create config with reordering disabled.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Check if reordering is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(content: &str) -> OptimizerResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file.
    pub fn load(path: &Path) -> OptimizerResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| OptimizerError::ConfigIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_json(&content)?;

        let path_str = path.display().to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("enabled", if config.enabled { "true" } else { "false" }),
                ("path", path_str.as_str()),
            ],
        );

        Ok(config)
    }

    /// Rejects weights that are non-finite, non-positive, or that would
    /// invert the intended ordering.
    ///
    /// Every factor of a column comparison is at most 1.0, so `default_score`
    /// is the largest column score and `on_score` must exceed it.
    pub fn validate(&self) -> OptimizerResult<()> {
        let w = &self.weights;
        let all = [
            ("default_score", w.default_score),
            ("indexed_multiplier", w.indexed_multiplier),
            ("eq_multiplier", w.eq_multiplier),
            ("on_score", w.on_score),
            ("set_size_halfway", w.set_size_halfway),
        ];
        for (name, value) in all {
            if !value.is_finite() || value <= 0.0 {
                return Err(OptimizerError::invalid_config(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("indexed_multiplier", w.indexed_multiplier),
            ("eq_multiplier", w.eq_multiplier),
        ] {
            if value > 1.0 {
                return Err(OptimizerError::invalid_config(format!(
                    "{} must not exceed 1.0, got {}",
                    name, value
                )));
            }
        }

        if w.on_score <= w.default_score {
            return Err(OptimizerError::invalid_config(format!(
                "on_score must exceed default_score ({}), got {}",
                w.default_score, w.on_score
            )));
        }

        Ok(())
    }
}
