// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # predictor
//!
//! The synchronous inference-execution harness: bind device buffers by
//! name, run one forward pass over a batch, record per-layer timing, and
//! return per-class probability records.
//!
//! The caller-facing surface is [`Predictor`], which exclusively owns one
//! compiled engine and at most one profiling session:
//!
//! ```text
//! Predictor::new(engine, device, config)
//!     │  .start_profiling("run1", "")        (optional)
//!     │  .predict(input, "data", "prob", batch)
//!     │  .read_profile()
//!     ▼
//!   drop  ──► engine + profile released
//! ```
//!
//! Every `predict` call is self-contained: binding names are resolved
//! afresh, device buffers live only for the duration of the call, and one
//! fresh execution context is created and dropped. Calls block until the
//! device computation and both transfers complete; concurrent calls against
//! one predictor must be serialized by the caller.
//!
//! # Example
//! ```
//! use device_memory::HostDevice;
//! use engine_api::{StubEngine, TensorShape};
//! use predictor::{Predictor, PredictorConfig};
//! use std::sync::Arc;
//!
//! let device = Arc::new(HostDevice::new());
//! let engine = StubEngine::new(
//!     device.clone(),
//!     TensorShape::new(1, 2, 2),
//!     TensorShape::flat(4),
//! );
//!
//! let mut predictor = Predictor::new(
//!     Box::new(engine),
//!     device,
//!     PredictorConfig::default(),
//! );
//! let input = vec![0.0f32; 4];
//! let predictions = predictor.predict(&input, "data", "prob", 1).unwrap();
//! assert_eq!(predictions.len(), 4);
//! assert_eq!(predictions[3].index, 3);
//! ```

mod config;
mod encode;
mod error;
mod pipeline;
mod predictor;

pub use config::PredictorConfig;
pub use encode::{encode_batch, to_json, Prediction};
pub use error::PredictorError;
pub use predictor::Predictor;
