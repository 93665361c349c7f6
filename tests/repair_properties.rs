// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Properties of the repair passes on generated trusses

use approx::assert_relative_eq;
use frameworx::{shapes, Frame, GeometricPrimitive, RepairConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn endpoint_keys(frame: &Frame) -> HashSet<[u64; 3]> {
    frame
        .live_members()
        .flat_map(|m| [m.start, m.end])
        .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
        .collect()
}

fn jittered_cube(seed: u64, amount: f64) -> Frame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut frame = shapes::cube(10.0);
    for member in &mut frame.members {
        for axis in 0..3 {
            member.start[axis] += rng.gen_range(-amount..amount);
            member.end[axis] += rng.gen_range(-amount..amount);
        }
    }
    frame
}

#[test]
fn test_merge_points_collapses_jittered_corners() {
    let mut frame = jittered_cube(7, 0.01);
    assert_eq!(endpoint_keys(&frame).len(), 24);

    let moved = frame.repair().merge_points(None);
    assert_eq!(moved, 24);
    assert_eq!(endpoint_keys(&frame).len(), 8);

    // Nothing left to pull together
    assert_eq!(frame.repair().merge_points(None), 0);
}

#[test]
fn test_repair_never_adds_members_without_gap_fill() {
    for levels in [vec![2], vec![3], vec![2, 2], vec![3, 2]] {
        let mut frame = shapes::cubic_fractal_truss(&levels, 4.0);
        let before = frame.member_count();
        let summary = frame.repair().run(&RepairConfig::default());

        assert!(summary.members <= before, "levels {:?}", levels);
        assert_eq!(summary.infill_added, 0);
    }
}

#[test]
fn test_repair_preserves_bounds() {
    let mut frame = shapes::cubic_fractal_truss(&[3, 3], 4.0);
    let before = frame.bounding_box();

    frame.repair().run(&RepairConfig::default());

    let after = frame.bounding_box();
    assert_relative_eq!(after.min, before.min, epsilon = 1e-6);
    assert_relative_eq!(after.max, before.max, epsilon = 1e-6);
}

#[test]
fn test_second_dedup_is_a_no_op() {
    let mut frame = shapes::cubic_fractal_truss(&[3, 3], 4.0);
    let removed = frame.repair().deduplicate(None);
    assert!(removed > 0);
    assert_eq!(frame.repair().deduplicate(None), 0);
}

#[test]
fn test_welding_truss_edges_leaves_full_length_rails() {
    let mut frame = shapes::cubic_truss(10.0, 4);
    let config = RepairConfig {
        weld_passes: 8,
        ..RepairConfig::default()
    };
    frame.repair().run(&config);

    // The four long rails become single sticks spanning all four cubes
    let rails = frame
        .live_members()
        .filter(|m| (m.length() - 40.0).abs() < 1e-6)
        .count();
    assert_eq!(rails, 4);
}

#[test]
fn test_thicker_duplicate_survives() {
    let mut frame = shapes::cube(10.0);
    let thick: Vec<_> = frame
        .live_members()
        .map(|m| m.clone().with_thickness(2.0))
        .collect();
    for member in thick {
        frame.add(member);
    }
    assert_eq!(frame.member_count(), 24);

    let removed = frame.repair().deduplicate(None);
    assert_eq!(removed, 12);
    assert!(frame.live_members().all(|m| m.thickness == 2.0));
}
