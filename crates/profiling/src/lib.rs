// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # profiling
//!
//! Per-layer execution timelines for the inference harness.
//!
//! # Key Components
//!
//! - [`Profile`] — a named, metadata-tagged session owned by a predictor.
//!   Holds an ordered entry sequence, a session start timestamp, and the
//!   timeline cursor. Sessions are restarted in place (`restart`), closed
//!   (`end`), or returned to their unstarted state (`reset`) — the object
//!   itself is reused across a predictor's lifetime.
//! - [`ProfileEntry`] — one `(layer_name, start_ns, end_ns)` record.
//! - [`TimelineBuilder`] — the [`engine_api::LayerProfiler`] implementation
//!   attached to an execution context for the duration of one call. It
//!   converts per-layer millisecond callbacks into half-open intervals laid
//!   end to end from the cursor.
//!
//! Because the cursor lives on the [`Profile`], executions that share one
//! session chain their entries continuously; only restarting the session
//! moves the cursor backward.
//!
//! # Example
//! ```
//! use profiling::{Profile, TimelineBuilder};
//! use engine_api::LayerProfiler;
//!
//! let mut profile = Profile::new("run1", "");
//! {
//!     let mut timeline = TimelineBuilder::new(&mut profile);
//!     timeline.report_layer_time("conv1", 1.0);
//!     timeline.report_layer_time("prob", 0.5);
//! }
//! assert_eq!(profile.entries().len(), 2);
//! assert_eq!(profile.entries()[0].end_ns, profile.entries()[1].start_ns);
//! ```

mod error;
mod profile;
mod timeline;

pub use error::ProfileError;
pub use profile::{Profile, ProfileEntry};
pub use timeline::TimelineBuilder;
