// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A host-memory-backed device for tests and demos.
//!
//! [`HostDevice`] implements [`DeviceAllocator`] over a table of
//! heap-allocated regions keyed by opaque handles. It behaves like a real
//! accelerator at the API boundary: regions are invisible to the host
//! except through explicit transfers, copies are bounds-checked, and
//! failure points can be injected to exercise the harness's error paths.

use crate::{DeviceAllocator, DeviceError, DevicePtr, DeviceStats};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Injectable failure switches, used by the error-path tests.
#[derive(Debug, Default)]
struct Faults {
    /// Number of allocations to allow before failing; `None` disables.
    allocations_remaining: Option<usize>,
    fail_h2d: bool,
    fail_d2h: bool,
}

/// A simulated device backed by host memory.
///
/// # Example
/// ```
/// use device_memory::{DeviceAllocator, HostDevice};
///
/// let device = HostDevice::new();
/// let ptr = device.allocate(4).unwrap();
/// device.copy_to_device(ptr, &[1, 2, 3, 4]).unwrap();
///
/// let mut out = [0u8; 4];
/// device.copy_to_host(&mut out, ptr).unwrap();
/// assert_eq!(out, [1, 2, 3, 4]);
/// device.free(ptr);
/// ```
pub struct HostDevice {
    /// Live regions: handle → backing storage.
    regions: Mutex<HashMap<u64, Vec<u8>>>,
    /// Next handle value. Starts at 1 so 0 never names a region.
    next_handle: AtomicU64,
    stats: Mutex<DeviceStats>,
    faults: Mutex<Faults>,
}

impl HostDevice {
    /// Creates an empty device.
    pub fn new() -> Self {
        Self {
            regions: Mutex::new(HashMap::new()),
            next_handle: AtomicU64::new(1),
            stats: Mutex::new(DeviceStats::default()),
            faults: Mutex::new(Faults::default()),
        }
    }

    /// Returns a snapshot of the cumulative statistics.
    pub fn stats(&self) -> DeviceStats {
        self.stats.lock().expect("stats lock poisoned").clone()
    }

    /// Returns the number of currently live regions.
    pub fn live_regions(&self) -> usize {
        self.regions.lock().expect("region lock poisoned").len()
    }

    /// Returns the number of bytes currently allocated.
    pub fn bytes_in_use(&self) -> usize {
        self.stats.lock().expect("stats lock poisoned").bytes_in_use
    }

    /// Allows `n` further allocations, then fails every one after that
    /// until the fuse is rearmed or cleared with [`HostDevice::clear_faults`].
    pub fn fail_allocations_after(&self, n: usize) {
        self.faults.lock().expect("fault lock poisoned").allocations_remaining = Some(n);
    }

    /// Makes every host→device copy fail.
    pub fn fail_transfers_to_device(&self) {
        self.faults.lock().expect("fault lock poisoned").fail_h2d = true;
    }

    /// Makes every device→host copy fail.
    pub fn fail_transfers_to_host(&self) {
        self.faults.lock().expect("fault lock poisoned").fail_d2h = true;
    }

    /// Clears all injected faults.
    pub fn clear_faults(&self) {
        *self.faults.lock().expect("fault lock poisoned") = Faults::default();
    }

    fn allocation_fuse_blown(&self) -> bool {
        let mut faults = self.faults.lock().expect("fault lock poisoned");
        match faults.allocations_remaining {
            None => false,
            Some(0) => true,
            Some(n) => {
                faults.allocations_remaining = Some(n - 1);
                false
            }
        }
    }
}

impl Default for HostDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceAllocator for HostDevice {
    fn allocate(&self, bytes: usize) -> Result<DevicePtr, DeviceError> {
        if bytes == 0 {
            return Err(DeviceError::ZeroSizedAllocation);
        }
        if self.allocation_fuse_blown() {
            self.stats.lock().expect("stats lock poisoned").record_failure();
            return Err(DeviceError::AllocationFailed {
                requested_bytes: bytes,
                reason: "injected allocation fault".into(),
            });
        }

        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed);
        self.regions
            .lock()
            .expect("region lock poisoned")
            .insert(handle, vec![0u8; bytes]);
        self.stats
            .lock()
            .expect("stats lock poisoned")
            .record_allocation(bytes);

        tracing::trace!("allocated {bytes} B as region 0x{handle:x}");
        Ok(DevicePtr::from_raw(handle))
    }

    fn free(&self, ptr: DevicePtr) {
        let removed = self
            .regions
            .lock()
            .expect("region lock poisoned")
            .remove(&ptr.raw());
        if let Some(region) = removed {
            self.stats
                .lock()
                .expect("stats lock poisoned")
                .record_free(region.len());
            tracing::trace!("freed region {ptr} ({} B)", region.len());
        }
    }

    fn copy_to_device(&self, dst: DevicePtr, src: &[u8]) -> Result<(), DeviceError> {
        if self.faults.lock().expect("fault lock poisoned").fail_h2d {
            return Err(DeviceError::TransferFailed(
                "injected host-to-device fault".into(),
            ));
        }
        let mut regions = self.regions.lock().expect("region lock poisoned");
        let region = regions
            .get_mut(&dst.raw())
            .ok_or(DeviceError::InvalidPointer(dst))?;
        if src.len() > region.len() {
            return Err(DeviceError::TransferOutOfBounds {
                requested_bytes: src.len(),
                region_bytes: region.len(),
            });
        }
        region[..src.len()].copy_from_slice(src);
        self.stats
            .lock()
            .expect("stats lock poisoned")
            .record_h2d(src.len());
        Ok(())
    }

    fn copy_to_host(&self, dst: &mut [u8], src: DevicePtr) -> Result<(), DeviceError> {
        if self.faults.lock().expect("fault lock poisoned").fail_d2h {
            return Err(DeviceError::TransferFailed(
                "injected device-to-host fault".into(),
            ));
        }
        let regions = self.regions.lock().expect("region lock poisoned");
        let region = regions
            .get(&src.raw())
            .ok_or(DeviceError::InvalidPointer(src))?;
        if dst.len() > region.len() {
            return Err(DeviceError::TransferOutOfBounds {
                requested_bytes: dst.len(),
                region_bytes: region.len(),
            });
        }
        dst.copy_from_slice(&region[..dst.len()]);
        self.stats
            .lock()
            .expect("stats lock poisoned")
            .record_d2h(dst.len());
        Ok(())
    }
}
