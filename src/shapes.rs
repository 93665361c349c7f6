// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Ready-made trusses assembled from the public transform API

use crate::geometry::{Frame, GeometricPrimitive, Primitive, Stick};
use nalgebra::{Point3, Vector3};

/// The twelve edges of a cube of side `side` centred on the origin.
///
/// The spine runs along X through the centre, face to face.
pub fn cube(side: f64) -> Frame {
    let half = side / 2.0;
    let edge = Stick::from_endpoints(Point3::origin(), Point3::new(0.0, 0.0, side))
        .translate(Vector3::repeat(-half));

    // Three edges of one face, then rotated copies round Z
    let mut cube =
        Frame::new().with_spine(Point3::new(-half, 0.0, 0.0), Point3::new(half, 0.0, 0.0));
    cube.add(edge.clone());
    cube.add(edge.rotate_x(90.0));
    cube.add(edge.rotate_x(-90.0));
    let quarter = cube.rotate_z(90.0);
    cube.add(quarter);
    let half_turn = cube.rotate_z(180.0);
    cube.add(half_turn);
    cube
}

/// `cells` cubes in a row along X, shared faces deduplicated
pub fn cubic_truss(side: f64, cells: usize) -> Frame {
    let unit = cube(side);
    let mut truss = Frame::new();
    for i in 0..cells {
        truss.add(unit.translate_x(i as f64 * side));
    }
    truss.repair().deduplicate(None);
    truss.with_spine(
        Point3::origin(),
        Point3::new(side * cells.saturating_sub(1) as f64, 0.0, 0.0),
    )
}

/// [`cubic_truss`] bent through `degrees` along its spine
pub fn bent_cubic_truss(side: f64, cells: usize, degrees: f64, split_ratio: f64) -> Frame {
    cubic_truss(side, cells).bend(degrees, split_ratio)
}

/// Self-similar truss: each level builds cube edges out of the previous level
/// and strings `levels[i]` of those cubes together.
///
/// Members are left unmerged; overlapping edges between levels are expected
/// to be cleaned up with a repair pass.
pub fn cubic_fractal_truss(levels: &[usize], stick_length: f64) -> Frame {
    let mut unit = Primitive::from(Stick::from_endpoints(
        Point3::origin(),
        Point3::new(stick_length, 0.0, 0.0),
    ));
    let mut truss_length = stick_length;

    for &iterations in levels {
        let half = truss_length / 2.0;
        let edge = unit.translate(Vector3::new(-half, half, half));
        let mut edges = Frame::new();
        edges.add(edge.clone());
        edges.add(edge.rotate_x(90.0));
        edges.add(edge.rotate_x(180.0));
        edges.add(edge.rotate_x(270.0));

        let mut cube = Frame::new();
        cube.add(edges.clone());
        cube.add(edges.rotate_z(90.0));
        cube.add(edges.rotate_y(90.0));

        let mut truss = Frame::new();
        for j in 0..iterations {
            truss.add(cube.translate_x(truss_length * j as f64));
        }
        truss_length *= iterations.saturating_sub(1) as f64;
        unit = Primitive::from(truss);
    }

    unit.as_frame().with_spine(Point3::origin(), Point3::new(truss_length, 0.0, 0.0))
}

/// Chain of cubes stood on their corners, each level strung from the
/// previous level's chain.
///
/// Every cube is turned so one body diagonal lies along X and the chain runs
/// corner to corner. Members are left unmerged.
pub fn cubic_fractal_chain(levels: &[usize], stick_length: f64) -> Frame {
    let mut unit = Primitive::from(Stick::from_endpoints(
        Point3::origin(),
        Point3::new(stick_length, 0.0, 0.0),
    ));
    let mut chain_length = stick_length;
    // Tilt that brings a face diagonal down onto the body diagonal
    let tilt = (1.0 / std::f64::consts::SQRT_2).atan().to_degrees();

    for &iterations in levels {
        let half = chain_length / 2.0;
        let edge = unit.translate(Vector3::new(-half, half, half));
        let mut edges = Frame::new();
        edges.add(edge.clone());
        edges.add(edge.rotate_x(90.0));
        edges.add(edge.rotate_x(180.0));
        edges.add(edge.rotate_x(270.0));

        let mut cube = Frame::new();
        cube.add(edges.clone());
        cube.add(edges.rotate_z(90.0));
        cube.add(edges.rotate_y(90.0));
        let cube = cube
            .translate(Vector3::repeat(half))
            .rotate_x(-45.0)
            .rotate_z(tilt - 90.0);

        let step = (3.0 * chain_length * chain_length).sqrt() / 2.0;
        let mut chain = Frame::new();
        for j in 0..iterations {
            chain.add(cube.translate_x(step * j as f64));
        }
        chain_length = step * (iterations as f64 - 2.0) * 2.0;
        unit = Primitive::from(chain.rotate_x(45.0));
    }

    unit.as_frame()
        .with_spine(Point3::origin(), Point3::new(chain_length, 0.0, 0.0))
}

/// Chain of octahedra, each rolled 45 degrees further about X than the last,
/// each level strung from the previous level's chain.
///
/// Members are left unmerged.
pub fn octahedral_fractal_chain(levels: &[usize], stick_length: f64) -> Frame {
    let mut unit = Primitive::from(Stick::from_endpoints(
        Point3::origin(),
        Point3::new(stick_length, 0.0, 0.0),
    ));
    let mut chain_length = stick_length;

    for &iterations in levels {
        let diagonal = (2.0 * chain_length * chain_length).sqrt();
        let rise = ((diagonal / 2.0) / chain_length).acos().to_degrees();
        let edge = unit.rotate_z(rise);

        // Four edges round the apex at the origin, two round the equator
        let mut octahedron = Frame::new();
        octahedron.add(edge.clone());
        octahedron.add(edge.rotate_x(90.0));
        octahedron.add(edge.rotate_x(180.0));
        octahedron.add(edge.rotate_x(270.0));
        octahedron.add(
            edge.rotate_y(-90.0)
                .translate(Vector3::new(diagonal / 2.0, 0.0, diagonal / 2.0)),
        );
        octahedron.add(
            edge.rotate_y(90.0)
                .translate(Vector3::new(diagonal / 2.0, -diagonal / 2.0, 0.0)),
        );
        let far_half = octahedron.rotate_y(180.0).translate_x(diagonal);
        octahedron.add(far_half);

        let mut chain = Frame::new();
        for j in 0..iterations {
            chain.add(
                octahedron
                    .translate_x(diagonal / 2.0 * j as f64)
                    .rotate_x(45.0 * j as f64),
            );
        }
        chain_length = diagonal / 2.0 * (iterations as f64 + 1.0);
        unit = Primitive::from(chain.rotate_x(45.0));
    }

    unit.as_frame()
        .with_spine(Point3::origin(), Point3::new(chain_length, 0.0, 0.0))
}
