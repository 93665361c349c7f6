// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Spine-relative deformations: bend, twist, pinch and punch
//!
//! Each deformation works in the frame's spine-local coordinates (spine from
//! the origin along +X, see [`GeometricPrimitive::lay_along_x`]) and maps the
//! result back onto the original spine.

use super::{Frame, GeometricPrimitive, Placement, Stick};
use crate::utils::math::{deg_to_rad, rotate_in_plane, EPSILON};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;
use tracing::debug;

/// Default member subdivision threshold for bend and twist
pub const DEFAULT_SPLIT_RATIO: f64 = 0.75;

/// Halving depth limit when refining a member for a deformation
const MAX_SPLIT_DEPTH: usize = 8;

impl Frame {
    /// Bend the frame into an arc curving toward +Y.
    ///
    /// The spine length `L` maps linearly onto an arc of `degrees`, so a point
    /// at local `x` turns by `degrees * x / L` about a centre at radius
    /// `L * 360 / (2π * degrees)`. Members whose chord would stretch or shrink
    /// by more than `1 / split_ratio` are subdivided first.
    pub fn bend(&self, degrees: f64, split_ratio: f64) -> Frame {
        let length = self.length();
        if degrees.abs() < EPSILON || length < EPSILON {
            return self.clone();
        }
        let total = deg_to_rad(degrees);
        let radius = length / total;
        let bend_point = move |p: &Point3<f64>| {
            let angle = degrees * p.x / length;
            let around = rotate_in_plane(&Vector3::new(0.0, p.y - radius, p.z), angle, 0, 1);
            Point3::new(around.x, around.y + radius, around.z)
        };
        let bend_normal =
            move |m: &Stick| rotate_in_plane(&m.normal, degrees * m.midpoint(0.5).x / length, 0, 1);

        let local = self.lay_along_x();
        let mut bent = local.deform(split_ratio, bend_point, bend_normal);

        let closed = (degrees % 360.0).abs() < EPSILON;
        if closed {
            // Ends meet: pivot the ring so its diameter becomes the new spine
            bent.end = Point3::new(0.0, 2.0 * radius, 0.0);
            bent = bent.lay_along_x();
        } else {
            bent.end = Point3::new(radius * total.sin(), radius - radius * total.cos(), 0.0);
        }
        debug!(degrees, radius, members = bent.members.len(), closed, "bent frame");
        self.restore(bent)
    }

    /// Twist about the spine, turning a point at local `x` by `degrees * x / L`
    pub fn twist(&self, degrees: f64, split_ratio: f64) -> Frame {
        let length = self.length();
        if degrees.abs() < EPSILON || length < EPSILON {
            return self.clone();
        }
        let twist_point = move |p: &Point3<f64>| {
            let turned = rotate_in_plane(&p.coords, degrees * p.x / length, 1, 2);
            Point3::from(turned)
        };
        let twist_normal =
            move |m: &Stick| rotate_in_plane(&m.normal, degrees * m.midpoint(0.5).x / length, 1, 2);

        let local = self.lay_along_x();
        let twisted = local.deform(split_ratio, twist_point, twist_normal);
        self.restore(twisted)
    }

    /// Squeeze the cross-section toward the spine: `1 - sin(π x / L) * amount`
    pub fn pinch(&self, amount: f64) -> Frame {
        self.radial_profile(-amount)
    }

    /// Swell the cross-section away from the spine: `1 + sin(π x / L) * amount`
    pub fn punch(&self, amount: f64) -> Frame {
        self.radial_profile(amount)
    }

    fn radial_profile(&self, amount: f64) -> Frame {
        let length = self.length();
        if length < EPSILON {
            return self.clone();
        }
        let factor = move |x: f64| 1.0 + (PI * x / length).sin() * amount;
        let local = self.lay_along_x();

        let mut shaped = local.clone_empty();
        shaped.members = local
            .live_members()
            .map(|m| {
                let scale_yz = |p: &Point3<f64>| {
                    let f = factor(p.x);
                    Point3::new(p.x, p.y * f, p.z * f)
                };
                let f = factor(m.midpoint(0.5).x);
                Stick {
                    start: scale_yz(&m.start),
                    end: scale_yz(&m.end),
                    normal: Vector3::new(m.normal.x, m.normal.y * f, m.normal.z * f),
                    ..m.clone()
                }
            })
            .collect();
        self.restore(shaped)
    }

    /// Subdivide members that the point map would distort, then map them.
    fn deform(
        &self,
        split_ratio: f64,
        point: impl Fn(&Point3<f64>) -> Point3<f64>,
        normal: impl Fn(&Stick) -> Vector3<f64>,
    ) -> Frame {
        let threshold = if split_ratio > 0.0 { 1.0 / split_ratio } else { f64::INFINITY };
        let mut refined = Vec::with_capacity(self.members.len());
        for member in self.live_members() {
            refine(member, &point, threshold, 0, &mut refined);
        }

        let mut deformed = self.clone_empty();
        deformed.members = refined
            .iter()
            .map(|m| Stick {
                start: point(&m.start),
                end: point(&m.end),
                normal: normal(m),
                ..m.clone()
            })
            .collect();
        deformed
    }

    /// Map a spine-local result back onto this frame's spine
    fn restore(&self, local: Frame) -> Frame {
        let placement = Placement::along_segment(&self.start, &self.end);
        let mut restored = local.map(|p| placement.apply(p), |n| placement.apply_vector(n), true);
        if self.spine_lock {
            restored.start = self.start;
            restored.end = self.end;
        }
        restored
    }
}

/// Ratio of a member's mapped chord to its length, folded to be >= 1
fn distortion(member: &Stick, point: &impl Fn(&Point3<f64>) -> Point3<f64>) -> f64 {
    let length = member.length();
    let chord = (point(&member.end) - point(&member.start)).norm();
    if length < EPSILON {
        return 1.0;
    }
    if chord < EPSILON {
        return f64::INFINITY;
    }
    let ratio = chord / length;
    ratio.max(1.0 / ratio)
}

fn refine(
    member: &Stick,
    point: &impl Fn(&Point3<f64>) -> Point3<f64>,
    threshold: f64,
    depth: usize,
    out: &mut Vec<Stick>,
) {
    if depth < MAX_SPLIT_DEPTH && distortion(member, point) > threshold {
        for half in member.split(2).members {
            refine(&half, point, threshold, depth + 1, out);
        }
    } else {
        out.push(member.clone());
    }
}
