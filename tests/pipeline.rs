// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end build, repair and render tests

use anyhow::Result;
use approx::assert_relative_eq;
use frameworx::cli::Runner;
use frameworx::io::{FACET_BYTES, HEADER_BYTES};
use frameworx::{inspect_stl, render_to_file, shapes, CapMode, FrameworxConfig, RenderOptions};
use std::fs::File;
use std::io::BufReader;
use tempfile::NamedTempFile;

#[test]
fn test_cube_renders_to_closed_stl() -> Result<()> {
    let mut frame = shapes::cube(10.0);
    let file = NamedTempFile::with_suffix(".stl")?;

    let report = Runner::default().run(&mut frame, file.path())?;

    assert_eq!(frame.member_count(), 12);
    // Each corner gets one dome and two discs
    assert_eq!(report.render.domes, 8);
    assert_eq!(report.render.discs, 16);
    assert_eq!(report.render.facets_written(), 512);

    let length = std::fs::metadata(file.path())?.len();
    assert_eq!(length, HEADER_BYTES + 4 + FACET_BYTES * 512);

    let mut reader = BufReader::new(File::open(file.path())?);
    let mesh = stl_io::read_stl(&mut reader)?;
    assert_eq!(mesh.faces.len(), 512);

    println!("Cube: {} faces, {} vertices", mesh.faces.len(), mesh.vertices.len());

    Ok(())
}

#[test]
fn test_cube_merged_then_fully_domed() -> Result<()> {
    let mut frame = shapes::cube(10.0);
    {
        let mut repair = frame.repair();
        repair.merge_points(Some(0.1));
        assert_eq!(repair.merge_sticks(Some(0.1), 0.5, 2), 0);
        repair.compact();
    }
    assert_eq!(frame.member_count(), 12);

    let n = 8u32;
    let options = RenderOptions {
        resolution: n,
        caps: Some(CapMode::All),
        ..RenderOptions::default()
    };
    let file = NamedTempFile::with_suffix(".stl")?;
    let summary = render_to_file(&frame, file.path(), &options)?;

    // Tube 2n plus a 3n dome at each end
    let expected = 12 * n as usize * 8;
    assert_eq!(summary.domes, 24);
    assert_eq!(summary.facets_written(), expected);

    let mut reader = BufReader::new(File::open(file.path())?);
    let mesh = stl_io::read_stl(&mut reader)?;
    assert_eq!(mesh.faces.len(), expected);
    assert!(inspect_stl(file.path())?.is_consistent());

    Ok(())
}

#[test]
fn test_cube_output_sits_on_origin() -> Result<()> {
    let mut frame = shapes::cube(10.0);
    let file = NamedTempFile::with_suffix(".stl")?;
    Runner::default().run(&mut frame, file.path())?;

    let summary = inspect_stl(file.path())?;
    assert!(summary.is_consistent());
    for axis in 0..3 {
        assert!(summary.min[axis] >= 0.0);
        assert_relative_eq!(summary.min[axis], 0.0, epsilon = 1e-3);
        assert_relative_eq!(summary.max[axis], 11.0, epsilon = 1e-3);
    }

    Ok(())
}

#[test]
fn test_fractal_repair_shrinks_before_render() -> Result<()> {
    let mut frame = shapes::cubic_fractal_truss(&[3, 3], 4.0);
    let before = frame.member_count();
    let file = NamedTempFile::with_suffix(".stl")?;

    let report = Runner::default().run(&mut frame, file.path())?;
    let repair = report.repair.expect("repair ran");

    assert!(frame.member_count() < before);
    assert_eq!(repair.members, frame.member_count());
    assert!(repair.sticks_welded + repair.duplicates_removed > 0);
    assert_eq!(report.render.members_rendered, frame.member_count());
    assert_eq!(report.render.facets_dropped, 0);

    let summary = inspect_stl(file.path())?;
    assert!(summary.is_consistent());
    assert_eq!(summary.facets, report.render.facets_written());

    println!(
        "Fractal: {} -> {} members, {} facets",
        before,
        frame.member_count(),
        summary.facets
    );

    Ok(())
}

#[test]
fn test_chains_render_after_repair() -> Result<()> {
    for mut frame in [
        shapes::cubic_fractal_chain(&[4], 4.0),
        shapes::octahedral_fractal_chain(&[3], 4.0),
    ] {
        let before = frame.member_count();
        let file = NamedTempFile::with_suffix(".stl")?;

        let report = Runner::default().run(&mut frame, file.path())?;

        assert!(frame.member_count() <= before);
        assert_eq!(report.render.facets_dropped, 0);
        let summary = inspect_stl(file.path())?;
        assert!(summary.is_consistent());
        assert_eq!(summary.facets, report.render.facets_written());
    }

    Ok(())
}

#[test]
fn test_without_repair_keeps_members() -> Result<()> {
    let mut frame = shapes::cubic_fractal_truss(&[2], 4.0);
    let before = frame.member_count();
    let file = NamedTempFile::with_suffix(".stl")?;

    let report = Runner::default()
        .without_repair()
        .run(&mut frame, file.path())?;

    assert!(report.repair.is_none());
    assert_eq!(frame.member_count(), before);
    assert_eq!(report.render.members_rendered, before);

    Ok(())
}

#[test]
fn test_config_file_drives_render() -> Result<()> {
    let config_file = NamedTempFile::with_suffix(".toml")?;
    std::fs::write(
        config_file.path(),
        r#"
[render]
resolution = 6
caps = "none"

[repair]
merge_sticks = false
"#,
    )?;
    let config = FrameworxConfig::from_file(config_file.path())?;
    assert!(!config.repair.merge_sticks);

    let mut frame = shapes::cube(10.0);
    let file = NamedTempFile::with_suffix(".stl")?;
    let report = Runner::new(config).run(&mut frame, file.path())?;

    // Open tubes: 2n facets per member
    assert_eq!(report.render.facets_written(), 12 * 2 * 6);
    assert_eq!(report.render.domes + report.render.discs, 0);

    Ok(())
}

#[test]
fn test_bent_truss_renders_without_dropped_facets() -> Result<()> {
    let mut frame = shapes::bent_cubic_truss(10.0, 6, 90.0, 0.75);
    let file = NamedTempFile::with_suffix(".stl")?;

    let report = Runner::default().run(&mut frame, file.path())?;

    assert_eq!(report.render.facets_dropped, 0);
    let summary = inspect_stl(file.path())?;
    assert!(summary.is_consistent());
    assert!(summary.min.iter().all(|&c| c >= 0.0));

    Ok(())
}
