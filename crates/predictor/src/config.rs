// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Predictor configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! max_batch_size = 32
//! input_binding = "data"
//! output_binding = "prob"
//! enable_profiling = true
//! ```

use crate::PredictorError;
use std::path::Path;

/// Configuration for a [`crate::Predictor`].
///
/// `input_binding`/`output_binding` are defaults for callers (such as the
/// CLI) that do not pass binding names per call; `predict` itself always
/// takes explicit names. `max_batch_size` mirrors the batch capacity the
/// engine was compiled for and is enforced as a precondition.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PredictorConfig {
    /// Largest batch a single predict call may carry.
    pub max_batch_size: usize,
    /// Default input tensor name.
    pub input_binding: String,
    /// Default output tensor name.
    pub output_binding: String,
    /// Whether the CLI starts a profiling session by default.
    #[serde(default = "default_true")]
    pub enable_profiling: bool,
}

fn default_true() -> bool {
    true
}

impl PredictorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PredictorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PredictorError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, PredictorError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| PredictorError::Config(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, PredictorError> {
        toml::to_string_pretty(self)
            .map_err(|e| PredictorError::Config(format!("TOML serialise error: {e}")))
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<(), PredictorError> {
        if self.max_batch_size == 0 {
            return Err(PredictorError::Config(
                "max_batch_size must be at least 1".into(),
            ));
        }
        if self.input_binding.is_empty() || self.output_binding.is_empty() {
            return Err(PredictorError::Config(
                "binding names must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 32,
            input_binding: "data".to_string(),
            output_binding: "prob".to_string(),
            enable_profiling: true,
        }
    }
}
