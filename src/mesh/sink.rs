// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use super::Triangle;
use crate::error::Result;

/// Destination for generated triangles
pub trait TriangleSink {
    /// Accept one triangle. `Ok(false)` means the sink dropped it.
    fn add_triangle(&mut self, triangle: Triangle) -> Result<bool>;
}

impl TriangleSink for Vec<Triangle> {
    fn add_triangle(&mut self, triangle: Triangle) -> Result<bool> {
        self.push(triangle);
        Ok(true)
    }
}

impl<S: TriangleSink + ?Sized> TriangleSink for &mut S {
    fn add_triangle(&mut self, triangle: Triangle) -> Result<bool> {
        (**self).add_triangle(triangle)
    }
}
