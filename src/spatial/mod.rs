// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Spatial hashing - grid-bucketed point and segment stores
//!
//! Indices are built fresh for a single repair or render stage and dropped
//! afterwards. Cell size doubles as the "same point" tolerance.

mod cell;
mod line_index;
mod point_index;

pub use cell::{Grid, GridCell};
pub use line_index::LineIndex;
pub use point_index::{PointCounter, PointIndex};
