// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh generation - capped tubes for every member of a frame

mod caps;
mod render;
mod sink;

pub use caps::CapTemplates;
pub use render::{render_stl, render_to_file};
pub use sink::TriangleSink;

use crate::geometry::{CapMode, PrintArea};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Triangle as three vertices, wound counter-clockwise seen from outside
pub type Triangle = [Point3<f64>; 3];

pub const DEFAULT_RADIUS: f64 = 0.5;
pub const DEFAULT_RESOLUTION: u32 = 8;

/// Parameters for [`render_stl`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Tube radius for a member of thickness 1
    pub radius: f64,
    /// Facets around each tube
    pub resolution: u32,
    /// Bounds in output coordinates; members entirely outside are skipped
    pub print_area: PrintArea,
    /// Overrides the frame's own cap mode when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caps: Option<CapMode>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            resolution: DEFAULT_RESOLUTION,
            print_area: PrintArea::default(),
            caps: None,
        }
    }
}

/// Geometry closing one end of a tube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndFinish {
    Open,
    Dome,
    Disc,
    Ball,
    /// Tube lengthened past the endpoint, with no cap
    Flush,
}

impl EndFinish {
    pub fn facets(self, resolution: u32) -> usize {
        let n = resolution as usize;
        match self {
            Self::Open | Self::Flush => 0,
            Self::Dome => 3 * n,
            Self::Disc => n,
            Self::Ball => 6 * n,
        }
    }
}

/// Facets one member contributes: `2n` for the tube plus both end finishes
pub fn facets_per_member(start: EndFinish, end: EndFinish, resolution: u32) -> usize {
    2 * resolution as usize + start.facets(resolution) + end.facets(resolution)
}

/// What a render produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderSummary {
    /// Translation added to every output vertex
    pub offset: [f64; 3],
    pub members_rendered: usize,
    pub members_skipped: usize,
    pub domes: usize,
    pub discs: usize,
    pub balls: usize,
    pub flush: usize,
    /// Triangles generated
    pub facets: usize,
    /// Triangles the sink rejected
    pub facets_dropped: usize,
}

impl RenderSummary {
    pub fn facets_written(&self) -> usize {
        self.facets - self.facets_dropped
    }

    fn record(&mut self, finish: EndFinish) {
        match finish {
            EndFinish::Open => {}
            EndFinish::Dome => self.domes += 1,
            EndFinish::Disc => self.discs += 1,
            EndFinish::Ball => self.balls += 1,
            EndFinish::Flush => self.flush += 1,
        }
    }
}
