// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Re-orientation of local geometry onto a segment
//!
//! Local geometry is built lying along +X from the origin with +Z as "up".
//! A [`Placement`] rolls it about X so that +Z follows the target's normal,
//! tilts it in the XZ plane to the target's elevation, turns it in the XY
//! plane to the target's azimuth and finally moves it to the target's start.

use super::Stick;
use crate::utils::math::{rad_to_deg, rotate_in_plane, EPSILON};
use nalgebra::{Matrix3, Point3, Vector3};

/// A rigid map from segment-local coordinates to world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    origin: Point3<f64>,
    rotation: Matrix3<f64>,
}

impl Placement {
    pub fn identity() -> Self {
        Self {
            origin: Point3::origin(),
            rotation: Matrix3::identity(),
        }
    }

    /// Placement onto `start -> end` without any roll
    pub fn along_segment(start: &Point3<f64>, end: &Point3<f64>) -> Self {
        let (azimuth, elevation) = heading(&(end - start));
        Self::from_angles(*start, azimuth, elevation, 0.0)
    }

    /// Placement onto a stick, rolled so local +Z follows the stick's normal
    pub fn along(target: &Stick) -> Self {
        let (azimuth, elevation) = heading(&target.vector());
        let unrolled = Self::from_angles(target.start, azimuth, elevation, 0.0);
        let local_normal = unrolled.inverse_vector(&target.normal);
        let roll = if local_normal.y.hypot(local_normal.z) < EPSILON {
            0.0
        } else {
            rad_to_deg((-local_normal.y).atan2(local_normal.z))
        };
        Self::from_angles(target.start, azimuth, elevation, roll)
    }

    fn from_angles(origin: Point3<f64>, azimuth: f64, elevation: f64, roll: f64) -> Self {
        let orient = |v: Vector3<f64>| {
            let v = rotate_in_plane(&v, roll, 1, 2);
            let v = rotate_in_plane(&v, elevation, 0, 2);
            rotate_in_plane(&v, azimuth, 0, 1)
        };
        let rotation = Matrix3::from_columns(&[
            orient(Vector3::x()),
            orient(Vector3::y()),
            orient(Vector3::z()),
        ]);
        Self { origin, rotation }
    }

    pub fn origin(&self) -> Point3<f64> {
        self.origin
    }

    /// Local point to world point
    pub fn apply(&self, p: &Point3<f64>) -> Point3<f64> {
        self.origin + self.rotation * p.coords
    }

    /// Local direction to world direction
    pub fn apply_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * v
    }

    /// World point back to local coordinates
    pub fn inverse(&self, p: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation.transpose() * (p - self.origin))
    }

    /// World direction back to local coordinates
    pub fn inverse_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.rotation.transpose() * v
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

/// Azimuth (XY plane) and elevation (toward Z) of a direction, in degrees
fn heading(direction: &Vector3<f64>) -> (f64, f64) {
    let length = direction.norm();
    if length < EPSILON {
        return (0.0, 0.0);
    }
    let elevation = (direction.z / length).clamp(-1.0, 1.0).asin();
    let azimuth = direction.y.atan2(direction.x);
    (rad_to_deg(azimuth), rad_to_deg(elevation))
}
