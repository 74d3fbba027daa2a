// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! One-call execution orchestration: copy-in, compute, copy-out.
//!
//! Both device regions are held by [`DeviceBuffer`] guards, so every exit
//! path — including a failure between the input allocation and the output
//! copy — releases exactly what was acquired. Nothing allocated here
//! survives the call.

use crate::PredictorError;
use device_memory::{float_bytes, float_bytes_mut, DeviceAllocator, DeviceBuffer};
use engine_api::{BindingPlan, Engine, LayerProfiler};
use profiling::{Profile, TimelineBuilder};
use std::sync::Arc;

/// Runs one batch through `engine` and returns the host-side output buffer.
///
/// The output vec is zero-initialized before the device→host copy, so an
/// execution that fills only part of the output region is observable as
/// trailing zeros rather than stale memory.
pub(crate) fn run(
    engine: &dyn Engine,
    device: &Arc<dyn DeviceAllocator>,
    plan: &BindingPlan,
    input: &[f32],
    batch_size: usize,
    profile: Option<&mut Profile>,
) -> Result<Vec<f32>, PredictorError> {
    let input_bytes = batch_size * plan.input_example_bytes();
    let output_bytes = batch_size * plan.output_example_bytes();

    tracing::debug!(
        "executing batch of {batch_size}: input {} → slot {}, output {} → slot {}",
        plan.input_shape,
        plan.input_index,
        plan.output_shape,
        plan.output_index,
    );

    // Stage the two call-scoped regions. If the output allocation fails,
    // the input guard has already been constructed and frees on return.
    let input_region = DeviceBuffer::allocate(device, input_bytes)?;
    let output_region = DeviceBuffer::allocate(device, output_bytes)?;

    input_region.write_from_host(float_bytes(input))?;

    // One fresh context per call; dropped before this function returns.
    let mut context = engine.create_context()?;

    match profile {
        Some(profile) => {
            let mut timeline = TimelineBuilder::new(profile);
            context.execute(
                batch_size,
                input_region.ptr(),
                output_region.ptr(),
                Some(&mut timeline as &mut dyn LayerProfiler),
            )?;
        }
        None => {
            context.execute(batch_size, input_region.ptr(), output_region.ptr(), None)?;
        }
    }

    let mut output = vec![0.0f32; batch_size * plan.output_elements()];
    output_region.read_to_host(float_bytes_mut(&mut output))?;

    tracing::debug!("batch complete: {} output elements", output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use device_memory::HostDevice;
    use engine_api::{StubEngine, TensorShape};

    fn setup(engine_mods: impl FnOnce(StubEngine) -> StubEngine) -> (Arc<HostDevice>, StubEngine) {
        let host = Arc::new(HostDevice::new());
        let engine = engine_mods(StubEngine::new(
            host.clone(),
            TensorShape::new(1, 2, 2),
            TensorShape::flat(4),
        ));
        (host, engine)
    }

    #[test]
    fn test_run_returns_output_and_frees_regions() {
        let (host, engine) = setup(|e| e);
        let device: Arc<dyn DeviceAllocator> = host.clone();
        let plan = BindingPlan::resolve(&engine, "data", "prob").unwrap();

        let output = run(&engine, &device, &plan, &[0.0; 8], 2, None).unwrap();
        assert_eq!(output.len(), 8);
        assert_eq!(host.live_regions(), 0);
    }

    #[test]
    fn test_output_allocation_failure_frees_input_region() {
        let (host, engine) = setup(|e| e);
        let device: Arc<dyn DeviceAllocator> = host.clone();
        let plan = BindingPlan::resolve(&engine, "data", "prob").unwrap();

        host.fail_allocations_after(1);
        let err = run(&engine, &device, &plan, &[0.0; 4], 1, None).unwrap_err();
        assert!(matches!(err, PredictorError::Device(_)));
        assert_eq!(host.live_regions(), 0);
    }

    #[test]
    fn test_execution_failure_frees_both_regions() {
        let (host, engine) = setup(|e| e.with_execution_failure());
        let device: Arc<dyn DeviceAllocator> = host.clone();
        let plan = BindingPlan::resolve(&engine, "data", "prob").unwrap();

        let err = run(&engine, &device, &plan, &[0.0; 4], 1, None).unwrap_err();
        assert!(matches!(err, PredictorError::Engine(_)));
        assert_eq!(host.live_regions(), 0);
    }

    #[test]
    fn test_transfer_failure_frees_both_regions() {
        let (host, engine) = setup(|e| e);
        let device: Arc<dyn DeviceAllocator> = host.clone();
        let plan = BindingPlan::resolve(&engine, "data", "prob").unwrap();

        host.fail_transfers_to_device();
        let err = run(&engine, &device, &plan, &[0.0; 4], 1, None).unwrap_err();
        assert!(matches!(err, PredictorError::Device(_)));
        assert_eq!(host.live_regions(), 0);
    }

    #[test]
    fn test_partial_output_remains_zero_filled() {
        let (host, engine) = setup(|e| e.with_truncated_output(1));
        let device: Arc<dyn DeviceAllocator> = host.clone();
        let plan = BindingPlan::resolve(&engine, "data", "prob").unwrap();

        let output = run(&engine, &device, &plan, &[0.0; 8], 2, None).unwrap();
        assert!(output[..4].iter().any(|&v| v != 0.0));
        assert!(output[4..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_profiled_run_records_layers() {
        let (host, engine) = setup(|e| e.with_layer("conv1", 1.0).with_layer("prob", 0.5));
        let device: Arc<dyn DeviceAllocator> = host.clone();
        let plan = BindingPlan::resolve(&engine, "data", "prob").unwrap();

        let mut profile = Profile::new("run1", "");
        run(&engine, &device, &plan, &[0.0; 4], 1, Some(&mut profile)).unwrap();
        assert_eq!(profile.entries().len(), 2);
        assert_eq!(profile.entries()[0].layer_name, "conv1");
    }
}
