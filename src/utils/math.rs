// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Lengths below this are treated as degenerate
pub const EPSILON: f64 = 1e-12;

/// Rotate the `a`/`b` components of a vector in their shared plane.
///
/// The angle is in degrees and turns axis `a` toward axis `b`; the remaining
/// component is left untouched.
pub fn rotate_in_plane(v: &Vector3<f64>, degrees: f64, a: usize, b: usize) -> Vector3<f64> {
    let (sin, cos) = deg_to_rad(degrees).sin_cos();
    let mut rotated = *v;
    rotated[a] = v[a] * cos - v[b] * sin;
    rotated[b] = v[a] * sin + v[b] * cos;
    rotated
}

/// Point flavour of [`rotate_in_plane`], rotating about the origin
pub fn rotate_point_in_plane(p: &Point3<f64>, degrees: f64, a: usize, b: usize) -> Point3<f64> {
    Point3::from(rotate_in_plane(&p.coords, degrees, a, b))
}

/// Unit vector in the same direction, or `None` for a zero-length input
pub fn try_normalize(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let length = v.norm();
    if length < EPSILON || !length.is_finite() {
        None
    } else {
        Some(v / length)
    }
}

/// Centroid of a non-empty set of points
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Point3<f64>> {
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(Point3::from(sum / count as f64))
}

/// Convert degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Convert radians to degrees
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}
