// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-call resolution of binding names to slots and shapes.

use crate::{BindingError, Engine, TensorShape};

/// The resolved (input, output) binding pair for one execution call.
///
/// A plan is derived, not stored: resolution is cheap, and recomputing it on
/// every call guarantees it can never go stale against the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingPlan {
    pub input_index: usize,
    pub output_index: usize,
    pub input_shape: TensorShape,
    pub output_shape: TensorShape,
}

impl BindingPlan {
    /// Resolves `input_name` and `output_name` against `engine`.
    ///
    /// Fails if the engine does not expose exactly two bindings, or if
    /// either name does not resolve to a slot. Nothing is allocated before
    /// these checks pass.
    pub fn resolve(
        engine: &dyn Engine,
        input_name: &str,
        output_name: &str,
    ) -> Result<Self, BindingError> {
        let actual = engine.num_bindings();
        if actual != 2 {
            return Err(BindingError::Signature {
                expected: 2,
                actual,
            });
        }

        let input_index = engine
            .binding_index(input_name)
            .ok_or_else(|| BindingError::UnknownBinding {
                name: input_name.to_string(),
            })?;
        let output_index = engine
            .binding_index(output_name)
            .ok_or_else(|| BindingError::UnknownBinding {
                name: output_name.to_string(),
            })?;

        let input_shape = engine
            .binding_shape(input_index)
            .ok_or_else(|| BindingError::UnknownBinding {
                name: input_name.to_string(),
            })?;
        let output_shape = engine
            .binding_shape(output_index)
            .ok_or_else(|| BindingError::UnknownBinding {
                name: output_name.to_string(),
            })?;

        Ok(Self {
            input_index,
            output_index,
            input_shape,
            output_shape,
        })
    }

    /// Byte size of one input example.
    pub fn input_example_bytes(&self) -> usize {
        self.input_shape.size_bytes()
    }

    /// Byte size of one output example.
    pub fn output_example_bytes(&self) -> usize {
        self.output_shape.size_bytes()
    }

    /// Number of output elements (classes) per example.
    pub fn output_elements(&self) -> usize {
        self.output_shape.num_elements()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StubEngine;
    use device_memory::HostDevice;
    use std::sync::Arc;

    fn engine() -> StubEngine {
        StubEngine::new(
            Arc::new(HostDevice::new()),
            TensorShape::new(3, 4, 4),
            TensorShape::flat(10),
        )
    }

    #[test]
    fn test_resolve_both_names() {
        let engine = engine();
        let plan = BindingPlan::resolve(&engine, "data", "prob").unwrap();
        assert_eq!(plan.input_index, 0);
        assert_eq!(plan.output_index, 1);
        assert_eq!(plan.input_example_bytes(), 3 * 4 * 4 * 4);
        assert_eq!(plan.output_elements(), 10);
    }

    #[test]
    fn test_unknown_name_fails() {
        let engine = engine();
        let err = BindingPlan::resolve(&engine, "data", "logits").unwrap_err();
        assert!(matches!(err, BindingError::UnknownBinding { name } if name == "logits"));
    }

    #[test]
    fn test_signature_mismatch_fails() {
        let engine = engine().with_extra_binding("aux", TensorShape::flat(1));
        let err = BindingPlan::resolve(&engine, "data", "prob").unwrap_err();
        assert!(matches!(
            err,
            BindingError::Signature {
                expected: 2,
                actual: 3
            }
        ));
    }
}
