// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Command implementations and shared CLI plumbing.

pub mod profile;
pub mod run;

use anyhow::Context;
use device_memory::HostDevice;
use engine_api::{StubEngine, TensorShape};
use predictor::{Predictor, PredictorConfig};
use std::path::Path;
use std::sync::Arc;

/// Installs a tracing subscriber at a level matching the `-v` count.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads the predictor config, falling back to defaults without a file.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PredictorConfig> {
    match path {
        Some(path) => PredictorConfig::from_file(path)
            .with_context(|| format!("loading config '{}'", path.display())),
        None => Ok(PredictorConfig::default()),
    }
}

/// Parses a `channels,height,width` argument.
pub fn parse_shape(text: &str) -> anyhow::Result<TensorShape> {
    let dims: Vec<usize> = text
        .split(',')
        .map(|d| d.trim().parse())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid shape '{text}', expected C,H,W"))?;
    anyhow::ensure!(dims.len() == 3, "shape '{text}' must have three dimensions");
    Ok(TensorShape::new(dims[0], dims[1], dims[2]))
}

/// Builds a predictor over the stub engine with a scripted demo network.
pub fn build_predictor(
    config: PredictorConfig,
    shape: TensorShape,
    classes: usize,
) -> (Arc<HostDevice>, Predictor) {
    let device = Arc::new(HostDevice::new());
    let engine = StubEngine::new(device.clone(), shape, TensorShape::flat(classes))
        .with_binding_names(&config.input_binding, &config.output_binding)
        .with_layer("conv1", 1.2)
        .with_layer("pool1", 0.3)
        .with_layer("fc1", 0.8)
        .with_layer("prob", 0.1);
    let predictor = Predictor::new(Box::new(engine), device.clone(), config);
    (device, predictor)
}

/// Generates a deterministic ramp input for `batch` examples.
pub fn synthetic_input(shape: TensorShape, batch: usize) -> Vec<f32> {
    let per_example = shape.num_elements();
    (0..batch * per_example)
        .map(|i| (i % 255) as f32 / 255.0)
        .collect()
}
