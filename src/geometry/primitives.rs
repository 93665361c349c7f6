// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared transform capabilities of sticks and frames

use super::{Frame, Stick};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Plane of a 2D rotation, named by its two coordinate axes.
///
/// A positive angle turns the first axis toward the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisPair {
    XY,
    XZ,
    YZ,
}

impl AxisPair {
    /// Coordinate indices of the two axes
    pub fn axes(self) -> (usize, usize) {
        match self {
            Self::XY => (0, 1),
            Self::XZ => (0, 2),
            Self::YZ => (1, 2),
        }
    }
}

/// Operations every primitive supports.
///
/// All transforms are pure: they return a new value and leave `self` alone.
pub trait GeometricPrimitive: Sized {
    /// Segment length for a stick, spine length for a frame
    fn length(&self) -> f64;

    fn translate<V: Into<Vector3<f64>>>(&self, offset: V) -> Self;

    /// Rotate about the origin by `degrees` in the given plane
    fn rotate(&self, degrees: f64, plane: AxisPair) -> Self;

    /// Per-axis scale about the origin
    fn scale<V: Into<Vector3<f64>>>(&self, factors: V) -> Self;

    /// Move and turn so the primitive's reference segment runs along +X from the origin
    fn lay_along_x(&self) -> Self;

    /// Map local +X onto `target`, rolled so local +Z follows the target's normal
    fn lay_along_line(&self, target: &Stick) -> Self;

    /// Subdivide into `parts` pieces of equal parametric length
    fn split(&self, parts: usize) -> Frame;

    fn rotate_x(&self, degrees: f64) -> Self {
        self.rotate(degrees, AxisPair::YZ)
    }

    fn rotate_y(&self, degrees: f64) -> Self {
        self.rotate(degrees, AxisPair::XZ)
    }

    fn rotate_z(&self, degrees: f64) -> Self {
        self.rotate(degrees, AxisPair::XY)
    }

    fn translate_x(&self, distance: f64) -> Self {
        self.translate(Vector3::new(distance, 0.0, 0.0))
    }

    fn translate_y(&self, distance: f64) -> Self {
        self.translate(Vector3::new(0.0, distance, 0.0))
    }

    fn translate_z(&self, distance: f64) -> Self {
        self.translate(Vector3::new(0.0, 0.0, distance))
    }

    fn scale_uniform(&self, factor: f64) -> Self {
        self.scale(Vector3::repeat(factor))
    }
}

/// Either kind of primitive, for code that composes both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Stick(Stick),
    Frame(Frame),
}

impl Primitive {
    pub fn as_frame(&self) -> Frame {
        match self {
            Self::Stick(stick) => Frame::from(stick.clone()),
            Self::Frame(frame) => frame.clone(),
        }
    }
}

impl From<Stick> for Primitive {
    fn from(stick: Stick) -> Self {
        Self::Stick(stick)
    }
}

impl From<Frame> for Primitive {
    fn from(frame: Frame) -> Self {
        Self::Frame(frame)
    }
}

impl From<&Frame> for Primitive {
    fn from(frame: &Frame) -> Self {
        Self::Frame(frame.clone())
    }
}

impl GeometricPrimitive for Primitive {
    fn length(&self) -> f64 {
        match self {
            Self::Stick(stick) => stick.length(),
            Self::Frame(frame) => frame.length(),
        }
    }

    fn translate<V: Into<Vector3<f64>>>(&self, offset: V) -> Self {
        let offset = offset.into();
        match self {
            Self::Stick(stick) => Self::Stick(stick.translate(offset)),
            Self::Frame(frame) => Self::Frame(frame.translate(offset)),
        }
    }

    fn rotate(&self, degrees: f64, plane: AxisPair) -> Self {
        match self {
            Self::Stick(stick) => Self::Stick(stick.rotate(degrees, plane)),
            Self::Frame(frame) => Self::Frame(frame.rotate(degrees, plane)),
        }
    }

    fn scale<V: Into<Vector3<f64>>>(&self, factors: V) -> Self {
        let factors = factors.into();
        match self {
            Self::Stick(stick) => Self::Stick(stick.scale(factors)),
            Self::Frame(frame) => Self::Frame(frame.scale(factors)),
        }
    }

    fn lay_along_x(&self) -> Self {
        match self {
            Self::Stick(stick) => Self::Stick(stick.lay_along_x()),
            Self::Frame(frame) => Self::Frame(frame.lay_along_x()),
        }
    }

    fn lay_along_line(&self, target: &Stick) -> Self {
        match self {
            Self::Stick(stick) => Self::Stick(stick.lay_along_line(target)),
            Self::Frame(frame) => Self::Frame(frame.lay_along_line(target)),
        }
    }

    fn split(&self, parts: usize) -> Frame {
        match self {
            Self::Stick(stick) => stick.split(parts),
            Self::Frame(frame) => frame.split(parts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_axis_pair_indices() {
        assert_eq!(AxisPair::XY.axes(), (0, 1));
        assert_eq!(AxisPair::XZ.axes(), (0, 2));
        assert_eq!(AxisPair::YZ.axes(), (1, 2));
    }

    #[test]
    fn test_primitive_dispatches_to_variant() {
        let stick = Stick::from_length_thickness(2.0, 1.0);
        let moved = Primitive::from(stick.clone()).translate_y(3.0);
        match moved {
            Primitive::Stick(s) => assert_eq!(s.start, Point3::new(0.0, 3.0, 0.0)),
            Primitive::Frame(_) => panic!("stick turned into a frame"),
        }

        let frame = Primitive::from(Frame::from(stick)).rotate_z(90.0);
        assert_relative_eq!(frame.length(), 2.0, epsilon = 1e-12);
        assert_eq!(frame.as_frame().member_count(), 1);
    }
}
