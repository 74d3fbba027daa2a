// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The allocator trait boundary over device memory primitives.
//!
//! The harness never touches accelerator memory directly; everything goes
//! through [`DeviceAllocator`], which a backend implements on top of its
//! native primitives (`cudaMalloc`/`cudaMemcpy`-style calls, or a host
//! simulation for tests).

use crate::DeviceError;
use std::fmt;

/// An opaque handle to one device-resident memory region.
///
/// Only the allocator that issued a `DevicePtr` can interpret it. Handles
/// are plain values: copying one does not duplicate the region, and a
/// handle outliving its region is detected by the allocator as
/// [`DeviceError::InvalidPointer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DevicePtr(u64);

impl DevicePtr {
    /// Wraps a raw handle value (for allocator implementations).
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DevicePtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// The device memory primitives consumed by the execution harness.
///
/// All four operations are atomic: they either fully succeed or fail with a
/// [`DeviceError`] leaving no partial state. Implementations must be safe to
/// share across threads (`Send + Sync`) — the harness itself serializes
/// calls per predictor, but one device may back several predictors.
pub trait DeviceAllocator: Send + Sync {
    /// Allocates a region of `bytes` device bytes.
    fn allocate(&self, bytes: usize) -> Result<DevicePtr, DeviceError>;

    /// Releases a region. Freeing an unknown pointer is a no-op (the region
    /// may already have been torn down with the device).
    fn free(&self, ptr: DevicePtr);

    /// Copies `src.len()` bytes from host memory into the region at `ptr`.
    fn copy_to_device(&self, dst: DevicePtr, src: &[u8]) -> Result<(), DeviceError>;

    /// Copies `dst.len()` bytes from the region at `ptr` into host memory.
    fn copy_to_host(&self, dst: &mut [u8], src: DevicePtr) -> Result<(), DeviceError>;
}
