// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # engine-api
//!
//! The trait boundary over a compiled inference engine, plus the binding
//! resolution the execution harness performs against it.
//!
//! The harness never links against an engine's native object model. It sees:
//!
//! - [`Engine`] — binding count, name→slot resolution, per-slot shape query,
//!   and execution context creation.
//! - [`ExecutionContext`] — runs one batch synchronously against a device
//!   input/output buffer pair, reporting per-layer times to an optional
//!   [`LayerProfiler`].
//! - [`TensorShape`] — channels/height/width extents of one binding slot.
//! - [`BindingPlan`] — the per-call resolution of (input name, output name)
//!   to slot indices and shapes. Recomputed on every call; never cached.
//! - [`StubEngine`] — a deterministic reference engine backed by
//!   [`device_memory::HostDevice`], used by tests and the CLI demo.
//!
//! Engine construction (parsing a network description, compiling the plan)
//! happens upstream of this crate; an engine that failed to build never
//! reaches the harness.

mod binding;
mod engine;
mod error;
mod shape;
mod stub;

pub use binding::BindingPlan;
pub use engine::{Engine, ExecutionContext, LayerProfiler, ELEMENT_SIZE};
pub use error::{BindingError, EngineError};
pub use shape::TensorShape;
pub use stub::{StubEngine, StubLayer};
