// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The predictor handle: engine ownership, predict calls, profile control.

use crate::{encode, pipeline, Prediction, PredictorConfig, PredictorError};
use device_memory::DeviceAllocator;
use engine_api::{BindingPlan, Engine};
use profiling::Profile;
use std::sync::Arc;

/// Exclusively owns one compiled engine and at most one profiling session.
///
/// A `Predictor` that exists is always valid: upstream engine-construction
/// failure surfaces before one is built, and dropping it releases the
/// engine and any profile exactly once. Calls against one predictor are not
/// internally synchronized; concurrent use requires external serialization
/// (a lock around the predictor, or single-threaded dispatch).
pub struct Predictor {
    engine: Box<dyn Engine>,
    device: Arc<dyn DeviceAllocator>,
    config: PredictorConfig,
    profile: Option<Profile>,
}

impl Predictor {
    /// Takes ownership of an already-compiled engine.
    pub fn new(
        engine: Box<dyn Engine>,
        device: Arc<dyn DeviceAllocator>,
        config: PredictorConfig,
    ) -> Self {
        tracing::info!(
            "predictor created: {} bindings, max batch {}",
            engine.num_bindings(),
            config.max_batch_size,
        );
        Self {
            engine,
            device,
            config,
            profile: None,
        }
    }

    /// Runs one synchronous forward pass over `batch_size` examples.
    ///
    /// `input` must hold exactly `batch_size × input elements` floats for
    /// the shape behind `input_name`. Returns `batch_size × classes`
    /// records ordered example-major, class-minor. Bindings are resolved
    /// afresh on every call, and both device regions plus the execution
    /// context live only for the duration of the call.
    pub fn predict(
        &mut self,
        input: &[f32],
        input_name: &str,
        output_name: &str,
        batch_size: usize,
    ) -> Result<Vec<Prediction>, PredictorError> {
        if batch_size == 0 {
            return Err(PredictorError::EmptyBatch);
        }
        if batch_size > self.config.max_batch_size {
            return Err(PredictorError::BatchTooLarge {
                batch_size,
                max_batch_size: self.config.max_batch_size,
            });
        }

        // Configuration checks run before any device resource is touched.
        let plan = BindingPlan::resolve(self.engine.as_ref(), input_name, output_name)?;

        let per_example = plan.input_shape.num_elements();
        if input.len() != batch_size * per_example {
            return Err(PredictorError::InputLength {
                actual: input.len(),
                batch_size,
                per_example,
            });
        }

        let profile = self.profile.as_mut().filter(|p| p.is_recording());
        let output = pipeline::run(
            self.engine.as_ref(),
            &self.device,
            &plan,
            input,
            batch_size,
            profile,
        )?;

        Ok(encode::encode_batch(&output, batch_size, plan.output_elements()))
    }

    /// Like [`Predictor::predict`], returning the serialized JSON text.
    pub fn predict_json(
        &mut self,
        input: &[f32],
        input_name: &str,
        output_name: &str,
        batch_size: usize,
    ) -> Result<String, PredictorError> {
        let records = self.predict(input, input_name, output_name, batch_size)?;
        Ok(encode::to_json(&records)?)
    }

    /// Starts (or restarts) the profiling session.
    ///
    /// The first call allocates the session with the given name and
    /// metadata; later calls reuse the same object, clearing its entries
    /// and restarting its timestamp cursor.
    pub fn start_profiling(&mut self, name: &str, metadata: &str) {
        match self.profile.as_mut() {
            Some(profile) => profile.restart(),
            None => self.profile = Some(Profile::new(name, metadata)),
        }
    }

    /// Closes the profiling session; entries remain readable. No-op
    /// without a session.
    pub fn end_profiling(&mut self) {
        if let Some(profile) = self.profile.as_mut() {
            profile.end();
        }
    }

    /// Returns the session to its initial unstarted state, clearing
    /// entries. The session object is retained for reuse. No-op without a
    /// session.
    pub fn disable_profiling(&mut self) {
        if let Some(profile) = self.profile.as_mut() {
            profile.reset();
        }
    }

    /// Serializes the current session's entries as JSON. Returns `"[]"`
    /// when there is no session or it holds no entries.
    pub fn read_profile(&self) -> Result<String, PredictorError> {
        match self.profile.as_ref() {
            Some(profile) => Ok(profile.read()?),
            None => Ok("[]".to_string()),
        }
    }

    /// The current profiling session, if one was ever started.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// The configuration this predictor was built with.
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("bindings", &self.engine.num_bindings())
            .field("max_batch_size", &self.config.max_batch_size)
            .field("profiling", &self.profile.is_some())
            .finish()
    }
}
