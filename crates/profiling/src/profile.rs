// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Profiling sessions and their entries.

use crate::ProfileError;
use std::time::{SystemTime, UNIX_EPOCH};

/// One per-layer record: a half-open `[start_ns, end_ns)` interval on the
/// session timeline. Timestamps are nanoseconds since the UNIX epoch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProfileEntry {
    pub layer_name: String,
    pub start_ns: u64,
    pub end_ns: u64,
}

impl ProfileEntry {
    /// Returns the interval length in nanoseconds.
    pub fn duration_ns(&self) -> u64 {
        self.end_ns - self.start_ns
    }
}

/// A named profiling session.
///
/// Created on the first `start_profiling` request and reused for the rest
/// of the owning predictor's lifetime: restarted in place on subsequent
/// `start_profiling` calls, closed by `end_profiling`, and returned to its
/// initial unstarted state by `disable_profiling`.
///
/// Entries accumulate across every execution that runs while the session is
/// recording; the timeline cursor persists between executions so entries
/// never overlap or move backward within one session.
#[derive(Debug)]
pub struct Profile {
    name: String,
    metadata: String,
    /// Session start, ns since the UNIX epoch. Zero while unstarted.
    start_ns: u64,
    /// Where the next entry begins.
    cursor_ns: u64,
    entries: Vec<ProfileEntry>,
    started: bool,
    closed: bool,
}

impl Profile {
    /// Creates a session and starts it now.
    pub fn new(name: impl Into<String>, metadata: impl Into<String>) -> Self {
        let start = now_ns();
        let name = name.into();
        tracing::debug!("profile '{name}' started at {start} ns");
        Self {
            name,
            metadata: metadata.into(),
            start_ns: start,
            cursor_ns: start,
            entries: Vec::new(),
            started: true,
            closed: false,
        }
    }

    /// Restarts the session in place: clears entries, takes a fresh start
    /// timestamp, reopens if closed. Entries recorded before a restart are
    /// discarded.
    pub fn restart(&mut self) {
        self.entries.clear();
        self.start_ns = now_ns();
        self.cursor_ns = self.start_ns;
        self.started = true;
        self.closed = false;
        tracing::debug!("profile '{}' restarted at {} ns", self.name, self.start_ns);
    }

    /// Closes the session. Entries remain readable; further layer reports
    /// are ignored.
    pub fn end(&mut self) {
        self.closed = true;
    }

    /// Returns the session to its initial unstarted state, clearing entries.
    /// The object is retained for reuse.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.start_ns = 0;
        self.cursor_ns = 0;
        self.started = false;
        self.closed = false;
    }

    /// Appends an entry and advances the cursor. Ignored while the session
    /// is closed or unstarted.
    pub(crate) fn add(&mut self, entry: ProfileEntry) {
        if !self.started || self.closed {
            return;
        }
        self.cursor_ns = entry.end_ns;
        self.entries.push(entry);
    }

    pub(crate) fn cursor_ns(&self) -> u64 {
        self.cursor_ns
    }

    /// The session name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The caller-supplied metadata string.
    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    /// Session start in ns since the UNIX epoch; zero while unstarted.
    pub fn start_ns(&self) -> u64 {
        self.start_ns
    }

    /// The recorded entries in timeline order.
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    /// Returns `true` once [`Profile::end`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns `true` while the session accepts layer reports.
    pub fn is_recording(&self) -> bool {
        self.started && !self.closed
    }

    /// Serializes the entries as a JSON array; `"[]"` when empty.
    pub fn read(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string(&self.entries)?)
    }
}

fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
