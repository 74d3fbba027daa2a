// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Allocation and transfer statistics for diagnostics.
//!
//! [`DeviceStats`] tracks cumulative counters for the simulated device.
//! The integration tests lean on these to prove properties the API alone
//! cannot show, e.g. "a binding-signature failure performs no device
//! allocation" and "every region is freed on the error path".

/// Cumulative statistics about device memory usage.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DeviceStats {
    /// Total number of successful allocations.
    pub total_allocations: u64,
    /// Total number of frees.
    pub total_frees: u64,
    /// Number of allocation requests that failed.
    pub failed_allocations: u64,
    /// Bytes currently allocated (live regions).
    pub bytes_in_use: usize,
    /// Peak bytes allocated at any one time.
    pub peak_bytes_in_use: usize,
    /// Number of host→device copies.
    pub h2d_transfers: u64,
    /// Number of device→host copies.
    pub d2h_transfers: u64,
    /// Total bytes moved host→device.
    pub h2d_bytes: u64,
    /// Total bytes moved device→host.
    pub d2h_bytes: u64,
}

impl DeviceStats {
    /// Records a successful allocation and updates the high-water mark.
    pub(crate) fn record_allocation(&mut self, bytes: usize) {
        self.total_allocations += 1;
        self.bytes_in_use += bytes;
        if self.bytes_in_use > self.peak_bytes_in_use {
            self.peak_bytes_in_use = self.bytes_in_use;
        }
    }

    /// Records a free.
    pub(crate) fn record_free(&mut self, bytes: usize) {
        self.total_frees += 1;
        self.bytes_in_use = self.bytes_in_use.saturating_sub(bytes);
    }

    /// Records a failed allocation request.
    pub(crate) fn record_failure(&mut self) {
        self.failed_allocations += 1;
    }

    /// Records a host→device copy.
    pub(crate) fn record_h2d(&mut self, bytes: usize) {
        self.h2d_transfers += 1;
        self.h2d_bytes += bytes as u64;
    }

    /// Records a device→host copy.
    pub(crate) fn record_d2h(&mut self, bytes: usize) {
        self.d2h_transfers += 1;
        self.d2h_bytes += bytes as u64;
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} allocs ({} failed), {} frees, {} B live (peak {} B), \
             h2d {}×/{} B, d2h {}×/{} B",
            self.total_allocations,
            self.failed_allocations,
            self.total_frees,
            self.bytes_in_use,
            self.peak_bytes_in_use,
            self.h2d_transfers,
            self.h2d_bytes,
            self.d2h_transfers,
            self.d2h_bytes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_tracking() {
        let mut s = DeviceStats::default();
        s.record_allocation(100);
        s.record_allocation(50);
        s.record_free(100);
        s.record_allocation(20);

        assert_eq!(s.bytes_in_use, 70);
        assert_eq!(s.peak_bytes_in_use, 150);
        assert_eq!(s.total_allocations, 3);
        assert_eq!(s.total_frees, 1);
    }

    #[test]
    fn test_summary_format() {
        let mut s = DeviceStats::default();
        s.record_allocation(64);
        s.record_h2d(64);
        let text = s.summary();
        assert!(text.contains("1 allocs"));
        assert!(text.contains("64 B live"));
    }
}
