// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Frame (truss): an ordered collection of sticks plus a logical spine

use super::{AxisPair, BoundingBox, GeometricPrimitive, Placement, Primitive, Stick};
use crate::utils::math::{rotate_in_plane, rotate_point_in_plane};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How member ends are finished when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapMode {
    /// Domes on free ends, flush discs at junctions
    #[default]
    Auto,
    /// Domes on every end
    All,
    /// Open tubes
    None,
    /// Full spheres on free ends
    Ball,
    /// Tube extended flush past free ends, without cap geometry
    Flat,
}

impl CapMode {
    /// Whether rendering needs endpoint adjacency counts
    pub fn detects_junctions(self) -> bool {
        matches!(self, Self::Auto | Self::Ball | Self::Flat)
    }
}

impl fmt::Display for CapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::All => "all",
            Self::None => "none",
            Self::Ball => "ball",
            Self::Flat => "flat",
        };
        f.write_str(name)
    }
}

impl FromStr for CapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "all" => Ok(Self::All),
            "none" => Ok(Self::None),
            "ball" => Ok(Self::Ball),
            "flat" => Ok(Self::Flat),
            other => Err(format!(
                "unknown cap mode '{}' (expected auto, all, none, ball or flat)",
                other
            )),
        }
    }
}

/// A truss: members plus a spine used for whole-assembly transforms.
///
/// Adding a frame to a frame copies its live members in; there is no
/// persistent nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub members: Vec<Stick>,
    /// Freeze the spine across translate, rotate and scale
    #[serde(default)]
    pub spine_lock: bool,
    #[serde(default)]
    pub stick_caps: CapMode,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            start: Point3::origin(),
            end: Point3::origin(),
            members: Vec::new(),
            spine_lock: false,
            stick_caps: CapMode::default(),
        }
    }

    /// Single-member frame whose spine is the member itself
    pub fn from_endpoints(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self::from(Stick::from_endpoints(start, end))
    }

    pub fn with_spine(mut self, start: Point3<f64>, end: Point3<f64>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_spine_lock(mut self, locked: bool) -> Self {
        self.spine_lock = locked;
        self
    }

    pub fn with_caps(mut self, caps: CapMode) -> Self {
        self.stick_caps = caps;
        self
    }

    /// Append a stick, or the live members of another frame
    pub fn add<P: Into<Primitive>>(&mut self, item: P) {
        match item.into() {
            Primitive::Stick(stick) => self.members.push(stick),
            Primitive::Frame(frame) => self
                .members
                .extend(frame.members.into_iter().filter(|m| !m.deleted)),
        }
    }

    /// Members not soft-deleted
    pub fn live_members(&self) -> impl Iterator<Item = &Stick> {
        self.members.iter().filter(|m| !m.deleted)
    }

    pub fn member_count(&self) -> usize {
        self.live_members().count()
    }

    pub fn is_empty(&self) -> bool {
        self.member_count() == 0
    }

    /// Spine as a stick
    pub fn spine(&self) -> Stick {
        Stick::from_endpoints(self.start, self.end)
    }

    /// Length of the shortest non-degenerate live member
    pub fn shortest_member_length(&self) -> Option<f64> {
        self.live_members()
            .map(|m| m.length())
            .filter(|&l| l > crate::utils::math::EPSILON)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Copy without deleted or zero-length members
    pub fn compacted(&self) -> Frame {
        Frame {
            members: self
                .live_members()
                .filter(|m| !m.is_degenerate())
                .cloned()
                .collect(),
            ..self.clone_empty()
        }
    }

    /// Bounds of every live member endpoint
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.live_members().flat_map(|m| [&m.start, &m.end]))
    }

    pub fn scale_x(&self, factor: f64) -> Frame {
        self.scale(Vector3::new(factor, 1.0, 1.0))
    }

    pub fn scale_y(&self, factor: f64) -> Frame {
        self.scale(Vector3::new(1.0, factor, 1.0))
    }

    pub fn scale_z(&self, factor: f64) -> Frame {
        self.scale(Vector3::new(1.0, 1.0, factor))
    }

    /// Same spine and settings, no members
    pub(crate) fn clone_empty(&self) -> Frame {
        Frame {
            start: self.start,
            end: self.end,
            members: Vec::new(),
            spine_lock: self.spine_lock,
            stick_caps: self.stick_caps,
        }
    }

    /// Apply a point/direction map to every live member and, if `move_spine`, the spine
    pub(crate) fn map(
        &self,
        point: impl Fn(&Point3<f64>) -> Point3<f64>,
        vector: impl Fn(&Vector3<f64>) -> Vector3<f64>,
        move_spine: bool,
    ) -> Frame {
        let mut frame = self.clone_empty();
        frame.members = self.live_members().map(|m| m.map(&point, &vector)).collect();
        if move_spine {
            frame.start = point(&self.start);
            frame.end = point(&self.end);
        }
        frame
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Stick> for Frame {
    fn from(stick: Stick) -> Self {
        let mut frame = Frame::new().with_spine(stick.start, stick.end);
        frame.add(stick);
        frame
    }
}

impl GeometricPrimitive for Frame {
    fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    fn translate<V: Into<Vector3<f64>>>(&self, offset: V) -> Self {
        let offset = offset.into();
        self.map(|p| p + offset, |n| *n, !self.spine_lock)
    }

    fn rotate(&self, degrees: f64, plane: AxisPair) -> Self {
        let (a, b) = plane.axes();
        self.map(
            |p| rotate_point_in_plane(p, degrees, a, b),
            |n| rotate_in_plane(n, degrees, a, b),
            !self.spine_lock,
        )
    }

    fn scale<V: Into<Vector3<f64>>>(&self, factors: V) -> Self {
        let factors = factors.into();
        self.map(
            |p| Point3::from(p.coords.component_mul(&factors)),
            |n| n.component_mul(&factors),
            !self.spine_lock,
        )
    }

    fn lay_along_x(&self) -> Self {
        let placement = Placement::along_segment(&self.start, &self.end);
        self.map(|p| placement.inverse(p), |n| placement.inverse_vector(n), true)
    }

    fn lay_along_line(&self, target: &Stick) -> Self {
        let placement = Placement::along(target);
        self.map(|p| placement.apply(p), |n| placement.apply_vector(n), true)
    }

    fn split(&self, parts: usize) -> Frame {
        let mut frame = self.clone_empty();
        for member in self.live_members() {
            frame.add(member.split(parts));
        }
        frame
    }
}
