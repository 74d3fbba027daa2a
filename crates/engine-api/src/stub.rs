// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A deterministic reference engine for tests and demos.
//!
//! [`StubEngine`] stands in for a compiled accelerator engine. It computes
//! a fixed, checkable function: for each example, class `k` scores the
//! example's input mean plus `k + 1`, normalized so the scores sum to one.
//! Layer timings are scripted, not measured, so profiling assertions are
//! exact.

use crate::{Engine, EngineError, ExecutionContext, LayerProfiler, TensorShape};
use device_memory::{float_bytes, float_bytes_mut, DeviceAllocator, DevicePtr, HostDevice};
use std::sync::Arc;

/// One scripted layer: a name and the execution time it reports.
#[derive(Debug, Clone)]
pub struct StubLayer {
    pub name: String,
    pub simulated_ms: f32,
}

impl StubLayer {
    pub fn new(name: impl Into<String>, simulated_ms: f32) -> Self {
        Self {
            name: name.into(),
            simulated_ms,
        }
    }
}

/// A simulated compiled engine backed by a [`HostDevice`].
///
/// Exposes the classifier's conventional two-binding signature
/// (`"data"` in, `"prob"` out) unless reconfigured.
///
/// # Example
/// ```
/// use engine_api::{Engine, StubEngine, TensorShape};
/// use device_memory::HostDevice;
/// use std::sync::Arc;
///
/// let engine = StubEngine::new(
///     Arc::new(HostDevice::new()),
///     TensorShape::new(3, 224, 224),
///     TensorShape::flat(1000),
/// );
/// assert_eq!(engine.num_bindings(), 2);
/// assert_eq!(engine.binding_index("data"), Some(0));
/// ```
pub struct StubEngine {
    device: Arc<HostDevice>,
    /// Slot table: index 0 is the input, index 1 the output.
    bindings: Vec<(String, TensorShape)>,
    layers: Vec<StubLayer>,
    fail_execution: bool,
    /// When set, only the first `n` examples are written to the output
    /// region; the rest keep the region's initial contents.
    truncate_output_to: Option<usize>,
}

impl StubEngine {
    /// Creates an engine with the conventional `"data"`/`"prob"` bindings
    /// and no layers.
    pub fn new(device: Arc<HostDevice>, input: TensorShape, output: TensorShape) -> Self {
        tracing::debug!("stub engine created: input {input}, output {output}");
        Self {
            device,
            bindings: vec![("data".into(), input), ("prob".into(), output)],
            layers: Vec::new(),
            fail_execution: false,
            truncate_output_to: None,
        }
    }

    /// Renames the input and output bindings.
    pub fn with_binding_names(
        mut self,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        self.bindings[0].0 = input.into();
        self.bindings[1].0 = output.into();
        self
    }

    /// Appends an extra binding slot, breaking the two-tensor signature.
    pub fn with_extra_binding(mut self, name: impl Into<String>, shape: TensorShape) -> Self {
        self.bindings.push((name.into(), shape));
        self
    }

    /// Appends a scripted layer.
    pub fn with_layer(mut self, name: impl Into<String>, simulated_ms: f32) -> Self {
        self.layers.push(StubLayer::new(name, simulated_ms));
        self
    }

    /// Replaces the scripted layer list.
    pub fn with_layers(mut self, layers: Vec<StubLayer>) -> Self {
        self.layers = layers;
        self
    }

    /// Makes every execution fail after layer reporting, before any output
    /// is written.
    pub fn with_execution_failure(mut self) -> Self {
        self.fail_execution = true;
        self
    }

    /// Writes only the first `examples` examples of each batch.
    pub fn with_truncated_output(mut self, examples: usize) -> Self {
        self.truncate_output_to = Some(examples);
        self
    }

    fn input_shape(&self) -> TensorShape {
        self.bindings[0].1
    }

    fn output_shape(&self) -> TensorShape {
        self.bindings[1].1
    }
}

impl Engine for StubEngine {
    fn num_bindings(&self) -> usize {
        self.bindings.len()
    }

    fn binding_index(&self, name: &str) -> Option<usize> {
        self.bindings.iter().position(|(n, _)| n == name)
    }

    fn binding_shape(&self, index: usize) -> Option<TensorShape> {
        self.bindings.get(index).map(|(_, shape)| *shape)
    }

    fn create_context(&self) -> Result<Box<dyn ExecutionContext + '_>, EngineError> {
        Ok(Box::new(StubContext { engine: self }))
    }
}

struct StubContext<'e> {
    engine: &'e StubEngine,
}

impl ExecutionContext for StubContext<'_> {
    fn execute(
        &mut self,
        batch_size: usize,
        input: DevicePtr,
        output: DevicePtr,
        mut profiler: Option<&mut dyn LayerProfiler>,
    ) -> Result<(), EngineError> {
        let engine = self.engine;
        let in_elems = engine.input_shape().num_elements();
        let out_elems = engine.output_shape().num_elements();

        // Stage the device input back to host; the "computation" runs there.
        let mut staged = vec![0.0f32; batch_size * in_elems];
        engine
            .device
            .copy_to_host(float_bytes_mut(&mut staged), input)
            .map_err(|e| EngineError::Execution {
                layer: engine.bindings[0].0.clone(),
                detail: format!("input readback failed: {e}"),
            })?;

        // Scripted layer timings, reported in network order.
        if let Some(profiler) = profiler.as_deref_mut() {
            for layer in &engine.layers {
                profiler.report_layer_time(&layer.name, layer.simulated_ms);
            }
        }

        if engine.fail_execution {
            return Err(EngineError::Execution {
                layer: engine
                    .layers
                    .last()
                    .map(|l| l.name.clone())
                    .unwrap_or_else(|| "<network>".into()),
                detail: "injected execution fault".into(),
            });
        }

        // Class k scores the example mean plus (k + 1), normalized per example.
        let mut scores = vec![0.0f32; batch_size * out_elems];
        for example in 0..batch_size {
            let inputs = &staged[example * in_elems..(example + 1) * in_elems];
            let mean = inputs.iter().sum::<f32>() / in_elems as f32;

            let row = &mut scores[example * out_elems..(example + 1) * out_elems];
            for (k, slot) in row.iter_mut().enumerate() {
                *slot = mean + (k + 1) as f32;
            }
            let total: f32 = row.iter().sum();
            if total != 0.0 {
                for slot in row.iter_mut() {
                    *slot /= total;
                }
            }
        }

        let written_examples = engine
            .truncate_output_to
            .unwrap_or(batch_size)
            .min(batch_size);
        engine
            .device
            .copy_to_device(output, float_bytes(&scores[..written_examples * out_elems]))
            .map_err(|e| EngineError::Execution {
                layer: engine.bindings[1].0.clone(),
                detail: format!("output writeback failed: {e}"),
            })?;

        Ok(())
    }
}
