// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stick: a thickness-bearing line segment, the atomic renderable unit

use super::{AxisPair, Frame, GeometricPrimitive, Placement, PrintArea};
use crate::utils::math::{deg_to_rad, rotate_in_plane, rotate_point_in_plane, try_normalize, EPSILON};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Unit-vector distance above which two directions are read as opposite
const ANTIPARALLEL_SPLIT: f64 = 1.4;

/// A straight cylindrical member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stick {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    /// Radius multiplier applied on top of the render radius
    pub thickness: f64,
    /// "Up" reference; only its angle around the stick axis is used
    pub normal: Vector3<f64>,
    /// Soft-delete flag set by the repair passes
    #[serde(default)]
    pub deleted: bool,
}

impl Stick {
    pub fn from_endpoints(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self {
            start,
            end,
            thickness: 1.0,
            normal: Vector3::z(),
            deleted: false,
        }
    }

    /// A stick of the given length lying along +X from the origin
    pub fn from_length_thickness(length: f64, thickness: f64) -> Self {
        Self::from_endpoints(Point3::origin(), Point3::new(length, 0.0, 0.0)).with_thickness(thickness)
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.normal = normal;
        self
    }

    /// Direction vector from start to end
    pub fn vector(&self) -> Vector3<f64> {
        self.end - self.start
    }

    /// Point at `fraction` of the way from start to end
    pub fn midpoint(&self, fraction: f64) -> Point3<f64> {
        self.start + self.vector() * fraction
    }

    /// Same stick with its ends swapped
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            ..self.clone()
        }
    }

    /// Rescale the direction vector from `start`; a degenerate stick is returned unchanged
    pub fn set_length(&self, length: f64) -> Self {
        match try_normalize(&self.vector()) {
            Some(direction) => Self {
                end: self.start + direction * length,
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// Whether two sticks point the same or opposite way within `tolerance_degrees`.
    ///
    /// Compares the chord between the two unit directions against the chord of
    /// the tolerance angle; chords longer than 1.4 are folded back (`2 - d`) so
    /// antiparallel sticks count as colinear too.
    pub fn colinear_with(&self, other: &Stick, tolerance_degrees: f64) -> bool {
        let (Some(a), Some(b)) = (try_normalize(&self.vector()), try_normalize(&other.vector())) else {
            return false;
        };
        let mut distance = (a - b).norm();
        if distance > ANTIPARALLEL_SPLIT {
            distance = 2.0 - distance;
        }
        let max_deviation = 2.0 * deg_to_rad(tolerance_degrees / 2.0).sin();
        distance < max_deviation
    }

    /// Merge with a colinear stick that shares an incident point.
    ///
    /// Spans the farthest pair of the four endpoints: the point farthest from
    /// the first endpoint, then the point farthest from that one. Thickness is
    /// the mean of the two inputs.
    pub fn merge_with(&self, other: &Stick) -> Stick {
        let points = [self.start, self.end, other.start, other.end];
        let farthest_from = |from: usize| {
            let mut best = from;
            let mut best_distance = -1.0;
            for (i, p) in points.iter().enumerate() {
                if i == from {
                    continue;
                }
                let distance = (p - points[from]).norm();
                if distance > best_distance {
                    best_distance = distance;
                    best = i;
                }
            }
            best
        };
        let a = farthest_from(0);
        let b = farthest_from(a);

        Stick {
            start: points[a],
            end: points[b],
            thickness: (self.thickness + other.thickness) / 2.0,
            normal: self.normal,
            deleted: false,
        }
    }

    /// Whether the segment misses the print area entirely.
    ///
    /// Axes without bounds never exclude anything.
    pub fn outside_print_area(&self, area: &PrintArea) -> bool {
        let direction = self.vector();
        let (mut t_min, mut t_max) = (0.0f64, 1.0f64);
        for (axis, range) in area.ranges() {
            let Some(range) = range else { continue };
            let origin = self.start[axis];
            let delta = direction[axis];
            if delta.abs() < EPSILON {
                if origin < range.min || origin > range.max {
                    return true;
                }
                continue;
            }
            let mut t0 = (range.min - origin) / delta;
            let mut t1 = (range.max - origin) / delta;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return true;
            }
        }
        false
    }

    pub(crate) fn map(
        &self,
        point: impl Fn(&Point3<f64>) -> Point3<f64>,
        vector: impl Fn(&Vector3<f64>) -> Vector3<f64>,
    ) -> Stick {
        Stick {
            start: point(&self.start),
            end: point(&self.end),
            normal: vector(&self.normal),
            ..self.clone()
        }
    }

    pub(crate) fn is_degenerate(&self) -> bool {
        self.vector().norm() < EPSILON
    }
}

impl GeometricPrimitive for Stick {
    fn length(&self) -> f64 {
        self.vector().norm()
    }

    fn translate<V: Into<Vector3<f64>>>(&self, offset: V) -> Self {
        let offset = offset.into();
        self.map(|p| p + offset, |n| *n)
    }

    fn rotate(&self, degrees: f64, plane: AxisPair) -> Self {
        let (a, b) = plane.axes();
        self.map(
            |p| rotate_point_in_plane(p, degrees, a, b),
            |n| rotate_in_plane(n, degrees, a, b),
        )
    }

    fn scale<V: Into<Vector3<f64>>>(&self, factors: V) -> Self {
        let factors = factors.into();
        self.map(
            |p| Point3::from(p.coords.component_mul(&factors)),
            |n| n.component_mul(&factors),
        )
    }

    fn lay_along_x(&self) -> Self {
        let placement = Placement::along_segment(&self.start, &self.end);
        self.map(|p| placement.inverse(p), |n| placement.inverse_vector(n))
    }

    fn lay_along_line(&self, target: &Stick) -> Self {
        let placement = Placement::along(target);
        self.map(|p| placement.apply(p), |n| placement.apply_vector(n))
    }

    fn split(&self, parts: usize) -> Frame {
        let parts = parts.max(1);
        let mut frame = Frame::new();
        frame.start = self.start;
        frame.end = self.end;
        let mut last = self.start;
        for i in 1..=parts {
            let next = if i == parts {
                self.end
            } else {
                self.midpoint(i as f64 / parts as f64)
            };
            frame.add(Stick {
                start: last,
                end: next,
                ..self.clone()
            });
            last = next;
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn along_x(from: f64, to: f64) -> Stick {
        Stick::from_endpoints(Point3::new(from, 0.0, 0.0), Point3::new(to, 0.0, 0.0))
    }

    #[test]
    fn test_defaults() {
        let stick = along_x(0.0, 1.0);
        assert_eq!(stick.thickness, 1.0);
        assert_eq!(stick.normal, Vector3::z());
        assert!(!stick.deleted);
    }

    #[test]
    fn test_from_length_thickness() {
        let stick = Stick::from_length_thickness(4.0, 0.5);
        assert_eq!(stick.end, Point3::new(4.0, 0.0, 0.0));
        assert_eq!(stick.thickness, 0.5);
    }

    #[test]
    fn test_midpoint_and_set_length() {
        let stick = along_x(2.0, 6.0);
        assert_eq!(stick.midpoint(0.5), Point3::new(4.0, 0.0, 0.0));
        assert_eq!(stick.midpoint(0.25), Point3::new(3.0, 0.0, 0.0));
        let longer = stick.set_length(10.0);
        assert_relative_eq!(longer.end, Point3::new(12.0, 0.0, 0.0));
        assert_eq!(longer.start, stick.start);
    }

    #[test]
    fn test_colinear_same_and_opposite_direction() {
        let a = along_x(0.0, 5.0);
        let b = along_x(5.0, 9.0);
        assert!(a.colinear_with(&b, 0.5));
        assert!(a.colinear_with(&b.reversed(), 0.5));
    }

    #[test]
    fn test_colinear_respects_tolerance() {
        let a = along_x(0.0, 10.0);
        // ~1.15 degrees off axis
        let b = Stick::from_endpoints(Point3::new(10.0, 0.0, 0.0), Point3::new(20.0, 0.2, 0.0));
        assert!(!a.colinear_with(&b, 0.5));
        assert!(a.colinear_with(&b, 3.0));

        let perpendicular = Stick::from_endpoints(Point3::new(10.0, 0.0, 0.0), Point3::new(10.0, 5.0, 0.0));
        assert!(!a.colinear_with(&perpendicular, 10.0));
    }

    #[test]
    fn test_degenerate_is_never_colinear() {
        let a = along_x(0.0, 10.0);
        let point = along_x(3.0, 3.0);
        assert!(!a.colinear_with(&point, 45.0));
    }

    #[test]
    fn test_merge_with_spans_extremes() {
        let a = along_x(0.0, 4.0).with_thickness(1.0);
        let b = along_x(9.0, 4.0).with_thickness(3.0);
        let merged = a.merge_with(&b);
        assert_relative_eq!(merged.length(), 9.0);
        assert_eq!(merged.thickness, 2.0);
        let xs = [merged.start.x, merged.end.x];
        assert!(xs.contains(&0.0) && xs.contains(&9.0));
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let stick = along_x(0.0, 2.0).rotate_z(90.0);
        assert_relative_eq!(stick.end, Point3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_x_carries_normal() {
        let stick = along_x(0.0, 2.0).rotate_x(90.0);
        assert_relative_eq!(stick.normal, Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_translate_and_scale() {
        let stick = along_x(1.0, 2.0)
            .translate([0.0, 1.0, 0.0])
            .scale([2.0, 3.0, 1.0]);
        assert_eq!(stick.start, Point3::new(2.0, 3.0, 0.0));
        assert_eq!(stick.end, Point3::new(4.0, 3.0, 0.0));
    }

    #[test]
    fn test_lay_along_x_then_back() {
        let stick = Stick::from_endpoints(Point3::new(1.0, 1.0, 1.0), Point3::new(4.0, 5.0, 1.0));
        let local = stick.lay_along_x();
        assert_relative_eq!(local.start, Point3::origin(), epsilon = 1e-12);
        assert_relative_eq!(local.end, Point3::new(5.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_lay_along_line() {
        let target = Stick::from_endpoints(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 3.0));
        let laid = Stick::from_length_thickness(3.0, 1.0).lay_along_line(&target);
        assert_relative_eq!(laid.start, target.start, epsilon = 1e-12);
        assert_relative_eq!(laid.end, target.end, epsilon = 1e-12);
    }

    #[test]
    fn test_split_carries_thickness() {
        let stick = along_x(0.0, 9.0).with_thickness(0.3);
        let parts = stick.split(3);
        assert_eq!(parts.member_count(), 3);
        for member in parts.live_members() {
            assert_relative_eq!(member.length(), 3.0, epsilon = 1e-12);
            assert_eq!(member.thickness, 0.3);
        }
        assert_eq!(parts.members[2].end, stick.end);
    }

    #[test]
    fn test_outside_print_area() {
        let area = PrintArea::new().with_x(0.0, 10.0).with_y(0.0, 10.0);
        assert!(!along_x(1.0, 5.0).outside_print_area(&area));
        assert!(!along_x(-5.0, 5.0).outside_print_area(&area));
        assert!(along_x(-5.0, -1.0).outside_print_area(&area));

        // Diagonal that clears the corner of the box
        let diagonal = Stick::from_endpoints(Point3::new(-2.0, 9.0, 0.0), Point3::new(2.0, 13.0, 0.0));
        assert!(diagonal.outside_print_area(&area));
    }
}
