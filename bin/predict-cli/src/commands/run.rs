// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `predict-rt run` command: one predict call, printed results.

use predictor::{Prediction, PredictorConfig};

pub fn execute(
    config: PredictorConfig,
    shape: String,
    classes: usize,
    batch: usize,
    json: bool,
    top: usize,
) -> anyhow::Result<()> {
    let shape = super::parse_shape(&shape)?;
    let input_binding = config.input_binding.clone();
    let output_binding = config.output_binding.clone();
    let (_device, mut predictor) = super::build_predictor(config, shape, classes);

    let input = super::synthetic_input(shape, batch);

    if json {
        let text = predictor.predict_json(&input, &input_binding, &output_binding, batch)?;
        println!("{text}");
        return Ok(());
    }

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            predict-rt · Inference Runner            ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  Config:");
    println!("   Input:    {shape} as '{input_binding}'");
    println!("   Output:   {classes} classes as '{output_binding}'");
    println!("   Batch:    {batch}");
    println!();

    let records = predictor.predict(&input, &input_binding, &output_binding, batch)?;

    for example in 0..batch {
        let row = &records[example * classes..(example + 1) * classes];
        println!("  Example {example} — top {top}:");
        for r in top_k(row, top) {
            println!("   class {:>5}  p = {:.6}", r.index, r.probability);
        }
        println!();
    }

    Ok(())
}

/// Returns the `k` highest-probability records of one example.
fn top_k(row: &[Prediction], k: usize) -> Vec<Prediction> {
    let mut sorted: Vec<Prediction> = row.to_vec();
    sorted.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(k);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_sorts_descending() {
        let row = vec![
            Prediction { index: 0, probability: 0.1 },
            Prediction { index: 1, probability: 0.7 },
            Prediction { index: 2, probability: 0.2 },
        ];
        let top = top_k(&row, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].index, 1);
        assert_eq!(top[1].index, 2);
    }
}
