// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! RAII guard that frees a device region on drop.
//!
//! [`DeviceBuffer`] is the mechanism through which the execution pipeline
//! guarantees "released on every exit path": each of the two per-call
//! regions is held by a guard, so an error between the input allocation and
//! the output copy still frees everything when the guards go out of scope.

use crate::{DeviceAllocator, DeviceError, DevicePtr};
use std::sync::Arc;

/// An RAII guard owning one device-resident region.
///
/// When a `DeviceBuffer` is dropped, its region is freed through the
/// allocator that produced it. Buffers are scoped to one execution call and
/// never retained across calls.
///
/// # Example
/// ```
/// use device_memory::{DeviceAllocator, DeviceBuffer, HostDevice};
/// use std::sync::Arc;
///
/// let device: Arc<dyn DeviceAllocator> = Arc::new(HostDevice::new());
/// let buf = DeviceBuffer::allocate(&device, 64).unwrap();
/// assert_eq!(buf.len(), 64);
/// drop(buf);                 // region freed here
/// ```
pub struct DeviceBuffer {
    /// Handle back to the owning device for the eventual free.
    device: Arc<dyn DeviceAllocator>,
    ptr: DevicePtr,
    len: usize,
}

impl DeviceBuffer {
    /// Allocates a `bytes`-sized region on `device` and wraps it in a guard.
    pub fn allocate(
        device: &Arc<dyn DeviceAllocator>,
        bytes: usize,
    ) -> Result<Self, DeviceError> {
        let ptr = device.allocate(bytes)?;
        Ok(Self {
            device: Arc::clone(device),
            ptr,
            len: bytes,
        })
    }

    /// Returns the opaque handle to the region.
    pub fn ptr(&self) -> DevicePtr {
        self.ptr
    }

    /// Returns the region size in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the region is zero-sized (never the case for
    /// guards produced by [`DeviceBuffer::allocate`]).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copies `src` into the front of the region.
    pub fn write_from_host(&self, src: &[u8]) -> Result<(), DeviceError> {
        self.device.copy_to_device(self.ptr, src)
    }

    /// Copies the front of the region into `dst`.
    pub fn read_to_host(&self, dst: &mut [u8]) -> Result<(), DeviceError> {
        self.device.copy_to_host(dst, self.ptr)
    }
}

impl Drop for DeviceBuffer {
    fn drop(&mut self) {
        self.device.free(self.ptr);
    }
}

impl std::fmt::Debug for DeviceBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceBuffer")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HostDevice;

    fn device() -> (Arc<HostDevice>, Arc<dyn DeviceAllocator>) {
        let host = Arc::new(HostDevice::new());
        let alloc: Arc<dyn DeviceAllocator> = host.clone();
        (host, alloc)
    }

    #[test]
    fn test_drop_frees_region() {
        let (host, alloc) = device();
        let buf = DeviceBuffer::allocate(&alloc, 128).unwrap();
        assert_eq!(host.live_regions(), 1);
        assert_eq!(host.bytes_in_use(), 128);
        drop(buf);
        assert_eq!(host.live_regions(), 0);
        assert_eq!(host.bytes_in_use(), 0);
    }

    #[test]
    fn test_write_then_read() {
        let (_host, alloc) = device();
        let buf = DeviceBuffer::allocate(&alloc, 8).unwrap();
        buf.write_from_host(&[9u8; 8]).unwrap();
        let mut back = [0u8; 8];
        buf.read_to_host(&mut back).unwrap();
        assert_eq!(back, [9u8; 8]);
    }

    #[test]
    fn test_failed_second_allocation_releases_first() {
        let (host, alloc) = device();
        host.fail_allocations_after(1);

        let first = DeviceBuffer::allocate(&alloc, 64).unwrap();
        let second = DeviceBuffer::allocate(&alloc, 64);
        assert!(second.is_err());

        drop(first);
        assert_eq!(host.live_regions(), 0);
    }

    #[test]
    fn test_zero_sized_allocation_rejected() {
        let (_host, alloc) = device();
        assert!(matches!(
            DeviceBuffer::allocate(&alloc, 0),
            Err(DeviceError::ZeroSizedAllocation)
        ));
    }
}
