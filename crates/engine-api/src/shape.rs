// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Binding slot shapes in channels/height/width form.

use std::fmt;

/// The extents of one binding slot, in CHW order.
///
/// Shapes are immutable once created. A classifier output is typically
/// expressed as `(classes, 1, 1)`.
///
/// # Examples
/// ```
/// use engine_api::TensorShape;
///
/// let s = TensorShape::new(3, 224, 224);
/// assert_eq!(s.num_elements(), 3 * 224 * 224);
/// assert_eq!(s.size_bytes(), 3 * 224 * 224 * 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TensorShape {
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl TensorShape {
    /// Creates a shape from CHW extents.
    pub fn new(channels: usize, height: usize, width: usize) -> Self {
        Self {
            channels,
            height,
            width,
        }
    }

    /// A flat shape for per-class vectors: `(len, 1, 1)`.
    pub fn flat(len: usize) -> Self {
        Self::new(len, 1, 1)
    }

    /// Returns the number of elements in one example.
    pub fn num_elements(&self) -> usize {
        self.channels * self.height * self.width
    }

    /// Returns the byte size of one example at 32-bit float precision.
    pub fn size_bytes(&self) -> usize {
        self.num_elements() * crate::ELEMENT_SIZE
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.channels, self.height, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_elements() {
        assert_eq!(TensorShape::new(3, 224, 224).num_elements(), 150_528);
        assert_eq!(TensorShape::flat(1000).num_elements(), 1000);
    }

    #[test]
    fn test_size_bytes_is_f32() {
        assert_eq!(TensorShape::new(1, 2, 2).size_bytes(), 16);
    }

    #[test]
    fn test_display() {
        assert_eq!(TensorShape::new(3, 4, 5).to_string(), "(3, 4, 5)");
    }
}
