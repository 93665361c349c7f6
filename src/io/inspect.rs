// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Read back a written STL for reporting

use super::stl::HEADER_BYTES;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StlSummary {
    /// Facet count stored after the header
    pub header_facets: u32,
    /// Facets actually parsed
    pub facets: usize,
    /// Distinct vertices after parsing
    pub vertices: usize,
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl StlSummary {
    /// Whether the header count agrees with the facet records
    pub fn is_consistent(&self) -> bool {
        self.header_facets as usize == self.facets
    }
}

/// Parse the STL at `path` and summarize it
pub fn inspect_stl(path: impl AsRef<Path>) -> Result<StlSummary> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);

    let mut count = [0u8; 4];
    reader.seek(SeekFrom::Start(HEADER_BYTES))?;
    reader.read_exact(&mut count)?;
    reader.seek(SeekFrom::Start(0))?;

    let mesh = stl_io::read_stl(&mut reader)?;
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for vertex in &mesh.vertices {
        for axis in 0..3 {
            min[axis] = min[axis].min(vertex[axis]);
            max[axis] = max[axis].max(vertex[axis]);
        }
    }
    if mesh.vertices.is_empty() {
        min = [0.0; 3];
        max = [0.0; 3];
    }

    Ok(StlSummary {
        header_facets: u32::from_le_bytes(count),
        facets: mesh.faces.len(),
        vertices: mesh.vertices.len(),
        min,
        max,
    })
}
