// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Serialization of output buffers into per-class probability records.

/// One `(class index, probability)` record.
///
/// The JSON field names `"index"` and `"probability"` are the wire
/// contract consumed by downstream runtimes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Prediction {
    pub index: usize,
    pub probability: f32,
}

/// Flattens an output buffer of `batch_size × classes` floats into ordered
/// records.
///
/// Ordering is a contract: example-major, class-minor. Callers index the
/// result as `example * classes + class_index`, with `index` cycling
/// `0..classes` within each example.
pub fn encode_batch(output: &[f32], batch_size: usize, classes: usize) -> Vec<Prediction> {
    debug_assert_eq!(output.len(), batch_size * classes);

    let mut records = Vec::with_capacity(batch_size * classes);
    for example in 0..batch_size {
        for index in 0..classes {
            records.push(Prediction {
                index,
                probability: output[example * classes + index],
            });
        }
    }
    records
}

/// Serializes records as a JSON array of objects. The caller owns the text.
pub fn to_json(records: &[Prediction]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}
