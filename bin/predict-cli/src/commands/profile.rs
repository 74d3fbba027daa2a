// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `predict-rt profile` command: record a session across predict calls and
//! print the per-layer timeline.

use predictor::PredictorConfig;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: PredictorConfig,
    shape: String,
    classes: usize,
    batch: usize,
    name: String,
    metadata: String,
    iterations: usize,
) -> anyhow::Result<()> {
    anyhow::ensure!(iterations >= 1, "iterations must be at least 1");

    let shape = super::parse_shape(&shape)?;
    let input_binding = config.input_binding.clone();
    let output_binding = config.output_binding.clone();
    let (_device, mut predictor) = super::build_predictor(config, shape, classes);

    let input = super::synthetic_input(shape, batch);

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║           predict-rt · Profiling Session            ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  Session '{name}' ({iterations} iterations, batch {batch})");
    println!();

    predictor.start_profiling(&name, &metadata);
    for _ in 0..iterations {
        predictor.predict(&input, &input_binding, &output_binding, batch)?;
    }
    predictor.end_profiling();

    if let Some(profile) = predictor.profile() {
        let session_start = profile.start_ns();
        println!("  {:<24} {:>12} {:>12}", "layer", "offset (µs)", "time (µs)");
        for entry in profile.entries() {
            println!(
                "  {:<24} {:>12.1} {:>12.1}",
                entry.layer_name,
                (entry.start_ns - session_start) as f64 / 1_000.0,
                entry.duration_ns() as f64 / 1_000.0,
            );
        }
        println!();

        let total_ns: u64 = profile.entries().iter().map(|e| e.duration_ns()).sum();
        println!(
            "  {} entries, {:.3} ms recorded",
            profile.entries().len(),
            total_ns as f64 / 1_000_000.0,
        );
        println!();
    }

    println!("  Timeline JSON:");
    println!("  {}", predictor.read_profile()?);

    Ok(())
}
