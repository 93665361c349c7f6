// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Frame to triangle mesh

use super::{CapTemplates, EndFinish, RenderOptions, RenderSummary, Triangle, TriangleSink};
use crate::error::{Error, Result};
use crate::geometry::{CapMode, Frame, GeometricPrimitive, Placement};
use crate::io::StlWriter;
use crate::spatial::{Grid, PointCounter};
use nalgebra::{Point3, Vector3};
use std::path::Path;
use tracing::{debug, info};

/// Endpoint counts at or above this are treated as junctions
const JUNCTION_THRESHOLD: u32 = 5;
/// Count injected at a capped endpoint so no other member caps it again
const CAPPED_MARK: u32 = 100;
/// Junction-detection cell size, as a fraction of the shortest member
const JUNCTION_CELL_FRACTION: f64 = 0.3;
/// How far a flush end extends the tube, in tube radii
const FLUSH_EXTENSION: f64 = 0.2;

/// Render every live member of `frame` as a capped tube into `sink`.
///
/// Output is shifted so no coordinate is negative. Fails on an empty frame or
/// bad options; triangles the sink rejects are counted, not fatal.
pub fn render_stl<S: TriangleSink>(
    frame: &Frame,
    sink: S,
    options: &RenderOptions,
) -> Result<RenderSummary> {
    let frame = prepare(frame, options)?;
    render_prepared(&frame, sink, options)
}

/// Render into a new binary STL file at `path`.
///
/// Options and frame are checked before `path` is opened, so a rejected
/// render leaves any existing file untouched.
pub fn render_to_file(
    frame: &Frame,
    path: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<RenderSummary> {
    let frame = prepare(frame, options)?;
    let mut writer = StlWriter::create(path.as_ref())?;
    let summary = render_prepared(&frame, &mut writer, options)?;
    writer.finish()?;
    debug!(path = %path.as_ref().display(), "closed stl file");
    Ok(summary)
}

/// Validate `options` and compact `frame`, failing if nothing is left to render
fn prepare(frame: &Frame, options: &RenderOptions) -> Result<Frame> {
    if options.resolution < 3 {
        return Err(Error::InvalidResolution(options.resolution));
    }
    if !options.radius.is_finite() || options.radius <= 0.0 {
        return Err(Error::InvalidRadius(options.radius));
    }
    let frame = frame.compacted();
    if frame.is_empty() {
        return Err(Error::EmptyFrame);
    }
    Ok(frame)
}

fn render_prepared<S: TriangleSink>(
    frame: &Frame,
    mut sink: S,
    options: &RenderOptions,
) -> Result<RenderSummary> {
    let caps = options.caps.unwrap_or(frame.stick_caps);
    let offset = output_offset(frame, options.radius, caps);
    let area = options.print_area.shifted(&-offset);
    let templates = CapTemplates::new(options.resolution as usize);

    let mut junctions = if caps.detects_junctions() {
        frame
            .shortest_member_length()
            .and_then(|shortest| Grid::new(shortest * JUNCTION_CELL_FRACTION))
            .map(|grid| {
                let mut counter = PointCounter::new(grid);
                for member in &frame.members {
                    counter.add_stick(member);
                }
                counter
            })
    } else {
        None
    };

    let mut summary = RenderSummary {
        offset: [offset.x, offset.y, offset.z],
        ..RenderSummary::default()
    };
    for member in &frame.members {
        if !area.is_unbounded() && member.outside_print_area(&area) {
            summary.members_skipped += 1;
            continue;
        }
        let start = end_finish(caps, junctions.as_mut(), &member.start);
        let end = end_finish(caps, junctions.as_mut(), &member.end);
        summary.record(start);
        summary.record(end);

        let scale = options.radius * member.thickness.abs();
        let placement = Placement::along(member);
        for triangle in member_triangles(member.length(), scale, start, end, &templates) {
            let placed = triangle.map(|p| placement.apply(&p) + offset);
            summary.facets += 1;
            if !sink.add_triangle(placed)? {
                summary.facets_dropped += 1;
            }
        }
        summary.members_rendered += 1;
    }

    info!(
        members = summary.members_rendered,
        skipped = summary.members_skipped,
        facets = summary.facets,
        dropped = summary.facets_dropped,
        "rendered frame"
    );
    Ok(summary)
}

/// Per-axis shift that lifts the thickest tube clear of negative coordinates
fn output_offset(frame: &Frame, radius: f64, caps: CapMode) -> Vector3<f64> {
    let bounds = frame.bounding_box();
    let thickest = frame
        .members
        .iter()
        .map(|m| m.thickness.abs())
        .fold(0.0, f64::max);
    let mut margin = thickest * radius;
    if caps == CapMode::Flat {
        // Extended rims reach slightly past the tube radius
        margin *= (1.0 + FLUSH_EXTENSION * FLUSH_EXTENSION).sqrt();
    }
    (Vector3::repeat(margin) - bounds.min.coords).map(|v| v.max(0.0))
}

fn end_finish(
    caps: CapMode,
    junctions: Option<&mut PointCounter>,
    point: &Point3<f64>,
) -> EndFinish {
    let free_end = match caps {
        CapMode::None => return EndFinish::Open,
        CapMode::All => return EndFinish::Dome,
        CapMode::Auto | CapMode::Ball | CapMode::Flat => match junctions {
            Some(counter) if counter.count(point, true) >= JUNCTION_THRESHOLD => false,
            Some(counter) => {
                counter.add(point, CAPPED_MARK);
                true
            }
            None => true,
        },
    };
    match (free_end, caps) {
        (false, _) => EndFinish::Disc,
        (true, CapMode::Ball) => EndFinish::Ball,
        (true, CapMode::Flat) => EndFinish::Flush,
        (true, _) => EndFinish::Dome,
    }
}

/// Tube plus end geometry for a member laid along +X from the origin
fn member_triangles(
    length: f64,
    scale: f64,
    start: EndFinish,
    end: EndFinish,
    templates: &CapTemplates,
) -> Vec<Triangle> {
    let n = templates.resolution();
    let extension = FLUSH_EXTENSION * scale;
    let x0 = if start == EndFinish::Flush { -extension } else { 0.0 };
    let x1 = if end == EndFinish::Flush { length + extension } else { length };

    let section = |x: f64, i: usize| {
        let p = templates.ring()[i % n];
        Point3::new(x, p.y * scale, p.z * scale)
    };
    let mut triangles = Vec::with_capacity(super::facets_per_member(start, end, n as u32));
    for i in 0..n {
        triangles.push([section(x0, i), section(x1, i + 1), section(x0, i + 1)]);
        triangles.push([section(x0, i), section(x1, i), section(x1, i + 1)]);
    }

    // A flush end is only the lengthened tube; it carries no cap geometry
    let mut cap = |finish: EndFinish, x: f64, mirrored: bool| match finish {
        EndFinish::Open | EndFinish::Flush => {}
        EndFinish::Dome => {
            triangles.extend(CapTemplates::place(templates.dome(), scale, x, mirrored))
        }
        EndFinish::Disc => {
            triangles.extend(CapTemplates::place(templates.disc(), scale, x, mirrored))
        }
        EndFinish::Ball => {
            triangles.extend(CapTemplates::place(templates.dome(), scale, x, mirrored));
            triangles.extend(CapTemplates::place(templates.dome(), scale, x, !mirrored));
        }
    };
    cap(start, x0, false);
    cap(end, x1, true);
    triangles
}
