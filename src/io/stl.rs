// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Streaming binary STL writer
//!
//! Layout: an 80-byte header, a little-endian `u32` facet count (patched on
//! [`StlWriter::finish`]), then 50-byte facet records of a zero normal, three
//! `f32` vertices and a zero `u16` attribute.

use crate::error::{Error, Result};
use crate::mesh::{Triangle, TriangleSink};
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::warn;

/// Header size; the facet count follows at this offset
pub const HEADER_BYTES: u64 = 80;
/// Size of one facet record
pub const FACET_BYTES: u64 = 50;

/// Header fill byte; readers do not interpret header content
const HEADER_FILL: u8 = 1;
/// Slack for coordinates that should be zero but picked up rounding error
const NEGATIVE_TOLERANCE: f64 = 1e-9;

pub struct StlWriter<W: Write + Seek> {
    inner: W,
    facets: u32,
    dropped: u32,
    pending: Vec<Point3<f64>>,
}

impl StlWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write the header
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write + Seek> StlWriter<W> {
    /// Write the header and a zero facet count into `inner`
    pub fn new(mut inner: W) -> Result<Self> {
        inner.write_all(&[HEADER_FILL; HEADER_BYTES as usize])?;
        inner.write_all(&0u32.to_le_bytes())?;
        Ok(Self {
            inner,
            facets: 0,
            dropped: 0,
            pending: Vec::with_capacity(3),
        })
    }

    /// Facets written so far
    pub fn facet_count(&self) -> u32 {
        self.facets
    }

    /// Facets rejected by the coordinate check
    pub fn dropped_count(&self) -> u32 {
        self.dropped
    }

    /// Buffer one vertex; every third completes a facet
    pub fn write_vertex(&mut self, vertex: Point3<f64>) -> Result<()> {
        self.pending.push(vertex);
        if self.pending.len() == 3 {
            let facet = [self.pending[0], self.pending[1], self.pending[2]];
            self.pending.clear();
            self.write_facet(&facet)?;
        }
        Ok(())
    }

    /// Write a raw vertex stream. Nothing is written unless it divides into
    /// whole triangles.
    pub fn write_vertices(&mut self, vertices: &[Point3<f64>]) -> Result<()> {
        if vertices.len() % 3 != 0 {
            return Err(Error::PartialTriangulation {
                vertices: vertices.len(),
            });
        }
        for vertex in vertices {
            self.write_vertex(*vertex)?;
        }
        Ok(())
    }

    /// Write one facet if every coordinate is non-negative and finite once
    /// narrowed to `f32`.
    ///
    /// Returns whether it was written; a rejected facet is logged and skipped.
    pub fn write_facet(&mut self, facet: &Triangle) -> Result<bool> {
        let valid = facet
            .iter()
            .flat_map(|p| p.iter())
            .all(|&c| (c as f32).is_finite() && c >= -NEGATIVE_TOLERANCE);
        if !valid {
            self.dropped += 1;
            warn!(
                facet = self.facets,
                vertices = ?facet,
                "dropping facet with negative or non-finite coordinate"
            );
            return Ok(false);
        }

        let mut record = [0u8; FACET_BYTES as usize];
        // Normal stays zero; slicers recompute it from winding
        let mut at = 12;
        for &coordinate in facet.iter().flat_map(|p| p.iter()) {
            let value = coordinate.max(0.0) as f32;
            record[at..at + 4].copy_from_slice(&value.to_le_bytes());
            at += 4;
        }
        self.inner.write_all(&record)?;
        self.facets += 1;
        Ok(true)
    }

    /// Patch the facet count and hand back the underlying writer.
    ///
    /// Vertices left over from an incomplete triangle are discarded.
    pub fn finish(mut self) -> Result<W> {
        if !self.pending.is_empty() {
            warn!(vertices = self.pending.len(), "discarding incomplete trailing facet");
        }
        self.inner.seek(SeekFrom::Start(HEADER_BYTES))?;
        self.inner.write_all(&self.facets.to_le_bytes())?;
        self.inner.seek(SeekFrom::End(0))?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write + Seek> TriangleSink for StlWriter<W> {
    fn add_triangle(&mut self, triangle: Triangle) -> Result<bool> {
        self.write_facet(&triangle)
    }
}
