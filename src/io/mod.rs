// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - binary STL writing and inspection

mod inspect;
mod stl;

pub use inspect::{inspect_stl, StlSummary};
pub use stl::{StlWriter, FACET_BYTES, HEADER_BYTES};
