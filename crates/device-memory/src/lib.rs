// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # device-memory
//!
//! Call-scoped device buffer management for the inference harness.
//!
//! # Key Components
//!
//! - [`DeviceAllocator`] — the trait boundary over the accelerator's memory
//!   primitives: allocate, free, host→device copy, device→host copy. Each
//!   primitive either fully succeeds or returns a [`DeviceError`].
//! - [`DevicePtr`] — an opaque handle to one device-resident region. Never
//!   dereferenced on the host; only the owning allocator interprets it.
//! - [`DeviceBuffer`] — an RAII guard around one allocation. When a guard is
//!   dropped, the region is freed through its allocator. The borrow checker
//!   prevents use-after-free at compile time.
//! - [`HostDevice`] — a host-memory-backed device used by tests and the CLI
//!   demo: bounds-checked transfers, allocation counters, and fault fuses
//!   for exercising mid-call failure paths.
//! - [`DeviceStats`] — cumulative allocation/transfer counters.
//!
//! # Ownership Model
//!
//! ```text
//! DeviceBuffer::allocate(device, bytes)
//!       │
//!       ▼
//!   DeviceBuffer  ◄─── holds DevicePtr + Arc<dyn DeviceAllocator>
//!       │
//!       │  drop()
//!       ▼
//!   DeviceAllocator::free()
//! ```
//!
//! Buffers are scoped to one execution call: allocated immediately before
//! the call, dropped unconditionally at its end, never retained. A failure
//! allocating the second of two regions still releases the first, because
//! the first guard drops on every exit path.
//!
//! # Example
//! ```
//! use device_memory::{DeviceAllocator, DeviceBuffer, HostDevice};
//! use std::sync::Arc;
//!
//! let device: Arc<dyn DeviceAllocator> = Arc::new(HostDevice::new());
//!
//! let buf = DeviceBuffer::allocate(&device, 16).unwrap();
//! buf.write_from_host(&[1u8; 16]).unwrap();
//!
//! let mut back = [0u8; 16];
//! buf.read_to_host(&mut back).unwrap();
//! assert_eq!(back, [1u8; 16]);
//! // Region freed when `buf` drops.
//! ```

mod allocator;
mod buffer;
mod error;
mod host;
mod stats;

pub use allocator::{DeviceAllocator, DevicePtr};
pub use buffer::DeviceBuffer;
pub use error::DeviceError;
pub use host::HostDevice;
pub use stats::DeviceStats;

/// Reinterprets a float slice as raw bytes for a host→device transfer.
pub fn float_bytes(data: &[f32]) -> &[u8] {
    // f32 has no invalid bit patterns; layout is guaranteed.
    unsafe {
        std::slice::from_raw_parts(
            data.as_ptr() as *const u8,
            data.len() * std::mem::size_of::<f32>(),
        )
    }
}

/// Reinterprets a mutable float slice as raw bytes for a device→host transfer.
pub fn float_bytes_mut(data: &mut [f32]) -> &mut [u8] {
    unsafe {
        std::slice::from_raw_parts_mut(
            data.as_mut_ptr() as *mut u8,
            data.len() * std::mem::size_of::<f32>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_bytes_roundtrip() {
        let floats = [1.0f32, -2.5, 0.0, 3.25];
        let bytes = float_bytes(&floats);
        assert_eq!(bytes.len(), 16);

        let mut back = [0.0f32; 4];
        float_bytes_mut(&mut back).copy_from_slice(bytes);
        assert_eq!(back, floats);
    }
}
