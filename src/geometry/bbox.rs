// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box and print area utilities

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    /// True until a point has been included
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Midpoint of the box
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// Closed interval on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Bounds are reordered so `min <= max`
    pub fn new(a: f64, b: f64) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn shifted(self, delta: f64) -> Self {
        Self { min: self.min + delta, max: self.max + delta }
    }
}

/// Optional per-axis bounds; members fully outside are not rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintArea {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<AxisRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<AxisRange>,
}

impl PrintArea {
    /// Unbounded on every axis
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_x(mut self, min: f64, max: f64) -> Self {
        self.x = Some(AxisRange::new(min, max));
        self
    }

    pub fn with_y(mut self, min: f64, max: f64) -> Self {
        self.y = Some(AxisRange::new(min, max));
        self
    }

    pub fn with_z(mut self, min: f64, max: f64) -> Self {
        self.z = Some(AxisRange::new(min, max));
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    /// `(axis index, bounds)` for x, y and z in order
    pub fn ranges(&self) -> [(usize, Option<AxisRange>); 3] {
        [(0, self.x), (1, self.y), (2, self.z)]
    }

    /// Same area expressed in coordinates translated by `offset`
    pub fn shifted(&self, offset: &Vector3<f64>) -> Self {
        Self {
            x: self.x.map(|r| r.shifted(offset.x)),
            y: self.y.map(|r| r.shifted(offset.y)),
            z: self.z.map(|r| r.shifted(offset.z)),
        }
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        self.ranges()
            .iter()
            .all(|(axis, range)| range.map_or(true, |r| r.contains(point[*axis])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let mut bbox = BoundingBox::empty();
        assert!(bbox.is_empty());
        bbox.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
        bbox.expand_to_include(&Point3::new(-1.0, -2.0, -3.0));

        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.max, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.center(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.size(), Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(bbox.volume(), 48.0);
    }

    #[test]
    fn test_empty_box_has_zero_size() {
        assert_eq!(BoundingBox::empty().size(), Vector3::zeros());
    }

    #[test]
    fn test_print_area_shift_and_contains() {
        let area = PrintArea::new().with_x(10.0, 0.0).with_z(0.0, 5.0);
        assert_eq!(area.x, Some(AxisRange { min: 0.0, max: 10.0 }));
        assert!(area.contains(&Point3::new(5.0, -100.0, 1.0)));
        assert!(!area.contains(&Point3::new(11.0, 0.0, 1.0)));

        let shifted = area.shifted(&Vector3::new(-2.0, 0.0, 1.0));
        assert_eq!(shifted.x, Some(AxisRange { min: -2.0, max: 8.0 }));
        assert_eq!(shifted.z, Some(AxisRange { min: 1.0, max: 6.0 }));
        assert!(shifted.y.is_none());
    }

    #[test]
    fn test_unbounded_area_parses_from_empty_toml() {
        let area: PrintArea = toml::from_str("").unwrap();
        assert!(area.is_unbounded());
    }
}
