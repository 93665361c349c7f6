// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for mesh generation and STL output

use thiserror::Error;

/// Hard failures surfaced to the caller.
///
/// Repair passes never produce these; a facet with bad coordinates is dropped
/// by the writer rather than reported here.
#[derive(Debug, Error)]
pub enum Error {
    /// The frame has no members left after compaction, so it has no bounds
    #[error("cannot render an empty frame: no members to bound")]
    EmptyFrame,

    /// Too few facets around a tube to enclose any volume
    #[error("resolution must be at least 3 facets around a tube, got {0}")]
    InvalidResolution(u32),

    /// Render radius was zero, negative or not a number
    #[error("render radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// A raw vertex stream that does not divide into whole triangles
    #[error("vertex stream of {vertices} vertices does not form whole triangles")]
    PartialTriangulation { vertices: usize },

    /// Sink unavailable or a write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for fallible frameworx operations
pub type Result<T> = std::result::Result<T, Error>;
