// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry of rendered members

use approx::assert_relative_eq;
use frameworx::mesh::Triangle;
use frameworx::{render_stl, shapes, CapMode, Frame, PrintArea, RenderOptions, Stick};
use nalgebra::Point3;
use std::f64::consts::PI;

fn render(frame: &Frame, options: &RenderOptions) -> Vec<Triangle> {
    let mut triangles: Vec<Triangle> = Vec::new();
    render_stl(frame, &mut triangles, options).unwrap();
    triangles
}

fn lone_stick(thickness: f64) -> Frame {
    let mut frame = Frame::new();
    frame.add(
        Stick::from_endpoints(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 12.0))
            .with_thickness(thickness),
    );
    frame
}

fn with_caps(resolution: u32, caps: CapMode) -> RenderOptions {
    RenderOptions {
        resolution,
        caps: Some(caps),
        ..RenderOptions::default()
    }
}

#[test]
fn test_facet_counts_per_cap_mode() {
    let frame = lone_stick(1.0);
    let n = 10;
    for (caps, expected) in [
        (CapMode::None, 2 * n),
        (CapMode::All, 8 * n),
        (CapMode::Auto, 8 * n),
        (CapMode::Ball, 14 * n),
        (CapMode::Flat, 2 * n),
    ] {
        let triangles = render(&frame, &with_caps(n as u32, caps));
        assert_eq!(triangles.len(), expected, "caps {}", caps);
    }
}

#[test]
fn test_thickness_scales_radius() {
    let frame = lone_stick(3.0);
    let triangles = render(&frame, &with_caps(12, CapMode::None));

    // Offset puts the axis at x = y = 1.5
    for vertex in triangles.iter().flatten() {
        let radial = ((vertex.x - 1.5).powi(2) + (vertex.y - 1.5).powi(2)).sqrt();
        assert_relative_eq!(radial, 1.5, epsilon = 1e-9);
    }
}

#[test]
fn test_domes_reach_one_radius_past_ends() {
    let frame = lone_stick(1.0);
    let triangles = render(&frame, &with_caps(16, CapMode::All));

    let (min_z, max_z) = triangles
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.z), hi.max(p.z))
        });
    assert_relative_eq!(min_z, 0.0, epsilon = 1e-9);
    assert_relative_eq!(max_z, 13.0, epsilon = 1e-9);
}

#[test]
fn test_closed_frame_edges_pair_with_their_reverse() {
    use std::collections::HashMap;

    let frame = shapes::cube(10.0);
    let triangles = render(&frame, &RenderOptions::default());

    let key = |p: &Point3<f64>| {
        [
            (p.x * 1e6).round() as i64,
            (p.y * 1e6).round() as i64,
            (p.z * 1e6).round() as i64,
        ]
    };
    let mut edges: HashMap<([i64; 3], [i64; 3]), usize> = HashMap::new();
    for triangle in &triangles {
        for i in 0..3 {
            let edge = (key(&triangle[i]), key(&triangle[(i + 1) % 3]));
            *edges.entry(edge).or_default() += 1;
        }
    }

    // Watertight and consistently wound: every directed edge is matched by its reverse
    for (&(a, b), &count) in &edges {
        assert_eq!(edges.get(&(b, a)).copied().unwrap_or(0), count, "edge {:?} -> {:?}", a, b);
    }
}

#[test]
fn test_tube_volume_converges_from_below() {
    let frame = lone_stick(1.0);
    let radius = RenderOptions::default().radius;
    let cylinder = PI * radius * radius * 12.0;

    let mut previous = 0.0;
    for n in [6u32, 12, 24, 48, 96] {
        let triangles = render(&frame, &with_caps(n, CapMode::None));
        // Flux of (x/2, y/2, 0) through the open tube; the missing ends face
        // along z and contribute nothing
        let volume: f64 = triangles
            .iter()
            .map(|[a, b, c]| {
                let normal = (b - a).cross(&(c - a)) / 2.0;
                let centre = Point3::from((a.coords + b.coords + c.coords) / 3.0);
                (centre.x * normal.x + centre.y * normal.y) / 2.0
            })
            .sum();

        let polygon = n as f64 / 2.0 * radius * radius * (2.0 * PI / n as f64).sin() * 12.0;
        assert_relative_eq!(volume, polygon, max_relative = 1e-9);
        assert!(volume > previous && volume < cylinder, "n = {n}: {volume}");
        previous = volume;
    }
    assert!((cylinder - previous) / cylinder < 1e-3);
}

#[test]
fn test_print_area_skips_members_outside() {
    let frame = shapes::cubic_truss(10.0, 5);
    let all = render_stl(&frame, Vec::<Triangle>::new(), &RenderOptions::default()).unwrap();

    let options = RenderOptions {
        print_area: PrintArea::new().with_x(0.0, 20.0),
        ..RenderOptions::default()
    };
    let clipped = render_stl(&frame, Vec::<Triangle>::new(), &options).unwrap();

    assert_eq!(all.members_skipped, 0);
    assert!(clipped.members_skipped > 0);
    assert_eq!(
        clipped.members_rendered + clipped.members_skipped,
        all.members_rendered
    );
}
