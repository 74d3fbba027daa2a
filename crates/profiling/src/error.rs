// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for profile serialization.

/// Errors reading a profile snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The entry list could not be serialized.
    #[error("profile serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
