// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Unit-radius cap templates, built once per render
//!
//! Templates face the start of a tube: the cross-section ring lies in the YZ
//! plane at `x = 0` and caps bulge toward -X. End caps are their mirror image.

use super::Triangle;
use nalgebra::Point3;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

#[derive(Debug, Clone)]
pub struct CapTemplates {
    resolution: usize,
    ring: Vec<Point3<f64>>,
    dome: Vec<Triangle>,
    disc: Vec<Triangle>,
}

impl CapTemplates {
    /// Templates with `resolution` segments around the ring (at least 3)
    pub fn new(resolution: usize) -> Self {
        let step = 2.0 * PI / resolution as f64;
        let ring: Vec<Point3<f64>> = (0..resolution)
            .map(|i| {
                let angle = step * i as f64;
                Point3::new(0.0, angle.sin(), angle.cos())
            })
            .collect();
        // Second latitude, half a step round so its quads zigzag with the ring
        let shoulder: Vec<Point3<f64>> = (0..resolution)
            .map(|i| {
                let angle = step * i as f64 + step / 2.0;
                Point3::new(
                    -FRAC_1_SQRT_2,
                    angle.sin() * FRAC_1_SQRT_2,
                    angle.cos() * FRAC_1_SQRT_2,
                )
            })
            .collect();
        let pole = Point3::new(-1.0, 0.0, 0.0);
        let centre = Point3::origin();

        let mut dome = Vec::with_capacity(3 * resolution);
        let mut disc = Vec::with_capacity(resolution);
        for i in 0..resolution {
            let next = (i + 1) % resolution;
            dome.push([ring[i], ring[next], shoulder[i]]);
            dome.push([ring[next], shoulder[next], shoulder[i]]);
            dome.push([shoulder[i], shoulder[next], pole]);
            disc.push([ring[i], ring[next], centre]);
        }

        Self {
            resolution,
            ring,
            dome,
            disc,
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Unit cross-section ring at `x = 0`
    pub fn ring(&self) -> &[Point3<f64>] {
        &self.ring
    }

    /// Hemisphere closing the start of a tube
    pub fn dome(&self) -> &[Triangle] {
        &self.dome
    }

    /// Flat fan closing the start of a tube
    pub fn disc(&self) -> &[Triangle] {
        &self.disc
    }

    /// `template` scaled by `scale` and moved to `x`; `mirrored` flips it to
    /// face +X, reversing winding so it still faces outward
    pub fn place<'a>(
        template: &'a [Triangle],
        scale: f64,
        x: f64,
        mirrored: bool,
    ) -> impl Iterator<Item = Triangle> + 'a {
        let sign = if mirrored { -1.0 } else { 1.0 };
        let map = move |p: &Point3<f64>| Point3::new(sign * p.x * scale + x, p.y * scale, p.z * scale);
        template.iter().map(move |[a, b, c]| {
            if mirrored {
                [map(a), map(c), map(b)]
            } else {
                [map(a), map(b), map(c)]
            }
        })
    }
}
