// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Turns per-layer timing callbacks into timeline entries.

use crate::{Profile, ProfileEntry};
use engine_api::LayerProfiler;

/// The layer profiler attached to an execution context for one call.
///
/// Each callback becomes a half-open interval `[cursor, cursor + duration)`
/// appended to the borrowed [`Profile`]; the cursor then advances to the
/// interval's end. Intervals are laid end to end: entry `i`'s end equals
/// entry `i + 1`'s start, and the first entry of a fresh session starts at
/// the session start timestamp.
///
/// The builder borrows the profile only for the duration of one execution;
/// the cursor itself persists on the profile, so a later execution in the
/// same session continues where this one stopped.
pub struct TimelineBuilder<'p> {
    profile: &'p mut Profile,
}

impl<'p> TimelineBuilder<'p> {
    /// Borrows `profile` for one execution call.
    pub fn new(profile: &'p mut Profile) -> Self {
        Self { profile }
    }
}

impl LayerProfiler for TimelineBuilder<'_> {
    fn report_layer_time(&mut self, layer_name: &str, elapsed_ms: f32) {
        let duration_ns = (f64::from(elapsed_ms) * 1_000_000.0) as u64;
        let start_ns = self.profile.cursor_ns();
        self.profile.add(ProfileEntry {
            layer_name: layer_name.to_string(),
            start_ns,
            end_ns: start_ns + duration_ns,
        });
    }
}
