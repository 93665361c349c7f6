// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Integer coordinate of a grid cell.
///
/// Ordering is lexicographic on (x, y, z), which is what canonical segment
/// keys and deterministic bucket iteration rely on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridCell {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl GridCell {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i64, dy: i64, dz: i64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Every cell within `reach` steps on each axis, this one included.
    ///
    /// `reach = 1` gives the 27-cell neighborhood.
    pub fn neighborhood(self, reach: i64) -> impl Iterator<Item = GridCell> {
        let span = -reach..=reach;
        span.clone().flat_map(move |dx| {
            let span = span.clone();
            span.clone()
                .flat_map(move |dy| span.clone().map(move |dz| self.offset(dx, dy, dz)))
        })
    }
}

/// Uniform cubic grid with cells of edge `radius`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    radius: f64,
}

impl Grid {
    /// `None` unless `radius` is finite and positive
    pub fn new(radius: f64) -> Option<Self> {
        (radius.is_finite() && radius > 0.0).then_some(Self { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Cell containing `point`: `(⌊x/r⌋, ⌊y/r⌋, ⌊z/r⌋)`
    pub fn cell(&self, point: &Point3<f64>) -> GridCell {
        GridCell::new(
            (point.x / self.radius).floor() as i64,
            (point.y / self.radius).floor() as i64,
            (point.z / self.radius).floor() as i64,
        )
    }

    /// Cells of both endpoints, smaller first
    pub fn segment_key(&self, a: &Point3<f64>, b: &Point3<f64>) -> (GridCell, GridCell) {
        let (ca, cb) = (self.cell(a), self.cell(b));
        if ca <= cb {
            (ca, cb)
        } else {
            (cb, ca)
        }
    }
}
