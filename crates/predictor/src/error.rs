// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the predictor harness.

/// Errors that can occur during a predict call or profile read.
///
/// Exactly one attempt is made per call: no error is retried, and no error
/// aborts the process. Configuration errors (the first four variants) are
/// raised before any device resource is acquired.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// Binding resolution failed (wrong signature or unknown name).
    #[error("binding error: {0}")]
    Binding(#[from] engine_api::BindingError),

    /// The input slice does not hold `batch_size` examples.
    #[error("input holds {actual} elements, expected {batch_size} × {per_example}")]
    InputLength {
        actual: usize,
        batch_size: usize,
        per_example: usize,
    },

    /// The batch exceeds the configured maximum.
    #[error("batch size {batch_size} exceeds configured maximum {max_batch_size}")]
    BatchTooLarge {
        batch_size: usize,
        max_batch_size: usize,
    },

    /// A zero-example batch was requested.
    #[error("batch size must be at least 1")]
    EmptyBatch,

    /// Device allocation or transfer failed mid-call.
    #[error("device error: {0}")]
    Device(#[from] device_memory::DeviceError),

    /// The engine failed to create a context or execute the batch.
    #[error("engine error: {0}")]
    Engine(#[from] engine_api::EngineError),

    /// The profile snapshot could not be serialized.
    #[error("profile error: {0}")]
    Profile(#[from] profiling::ProfileError),

    /// The prediction records could not be serialized.
    #[error("result serialization failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
