// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for device memory management.

use crate::DevicePtr;

/// Errors that can occur during device allocation and data transfer.
///
/// Every primitive is atomic: on error, no partial allocation or partial
/// copy is observable.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The device could not satisfy the allocation request.
    #[error("device allocation of {requested_bytes} bytes failed: {reason}")]
    AllocationFailed {
        requested_bytes: usize,
        reason: String,
    },

    /// Attempted to allocate a zero-sized region.
    #[error("cannot allocate zero-sized device buffer")]
    ZeroSizedAllocation,

    /// The pointer does not refer to a live region on this device.
    #[error("invalid device pointer {0}")]
    InvalidPointer(DevicePtr),

    /// A copy would read or write past the end of the target region.
    #[error("transfer of {requested_bytes} bytes exceeds region of {region_bytes} bytes")]
    TransferOutOfBounds {
        requested_bytes: usize,
        region_bytes: usize,
    },

    /// The device reported a failure during a host↔device copy.
    #[error("device transfer failed: {0}")]
    TransferFailed(String),
}
