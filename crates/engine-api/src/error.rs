// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the engine boundary.

/// Errors surfaced by an engine while creating contexts or executing.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine could not create an execution context.
    #[error("execution context creation failed: {0}")]
    ContextCreation(String),

    /// Batch execution failed on the device.
    #[error("batch execution failed in layer '{layer}': {detail}")]
    Execution { layer: String, detail: String },
}

/// Errors resolving caller-supplied binding names against an engine.
///
/// These are configuration errors: they abort the call before any device
/// resource is touched.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    /// The engine does not expose the two-tensor (input, output) signature.
    #[error("engine exposes {actual} bindings, expected exactly {expected}")]
    Signature { expected: usize, actual: usize },

    /// A requested name does not resolve to a tensor slot.
    #[error("binding '{name}' does not resolve to a tensor slot")]
    UnknownBinding { name: String },
}
