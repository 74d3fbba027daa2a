// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The compiled-engine trait seam.
//!
//! A backend (CUDA, simulated, ...) implements [`Engine`] over its native
//! engine object. The harness only ever holds `Box<dyn Engine>`: it queries
//! bindings, creates one [`ExecutionContext`] per call, and hands the
//! context two device pointers plus an optional profiler.

use crate::{EngineError, TensorShape};
use device_memory::DevicePtr;

/// Size of one tensor element. The harness moves 32-bit floats end to end.
pub const ELEMENT_SIZE: usize = std::mem::size_of::<f32>();

/// Receives per-layer timing callbacks during one execution.
///
/// Implemented by the profiling timeline builder. Engines report each layer
/// exactly once per execution, in network order, with the layer's elapsed
/// time in fractional milliseconds.
pub trait LayerProfiler {
    fn report_layer_time(&mut self, layer_name: &str, elapsed_ms: f32);
}

/// A compiled, ready-to-run inference engine.
///
/// The engine is read-only during execution and may back any number of
/// successive calls. Concurrent calls against one engine must be serialized
/// by the caller.
pub trait Engine: Send {
    /// Total number of tensor binding slots the engine exposes.
    fn num_bindings(&self) -> usize;

    /// Resolves a tensor name to its slot index.
    fn binding_index(&self, name: &str) -> Option<usize>;

    /// Returns the CHW shape of a slot, or `None` for an unknown slot.
    fn binding_shape(&self, index: usize) -> Option<TensorShape>;

    /// Creates a fresh execution context. One context serves exactly one
    /// call; contexts are never pooled or reused.
    fn create_context(&self) -> Result<Box<dyn ExecutionContext + '_>, EngineError>;
}

/// One call's worth of execution state on an engine.
pub trait ExecutionContext {
    /// Runs a batch synchronously against a device input/output pair.
    ///
    /// Blocks until the device computation completes. If `profiler` is
    /// present, the engine reports each layer's elapsed time through it.
    fn execute(
        &mut self,
        batch_size: usize,
        input: DevicePtr,
        output: DevicePtr,
        profiler: Option<&mut dyn LayerProfiler>,
    ) -> Result<(), EngineError>;
}
