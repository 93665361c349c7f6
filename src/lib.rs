// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Frameworx
//!
//! Builds trusses out of cylindrical sticks, cleans them up with merge and
//! repair passes, and renders them as closed binary STL meshes ready for
//! printing.
//!
//! ```no_run
//! use frameworx::{render_to_file, shapes, RenderOptions, RepairConfig};
//!
//! let mut frame = shapes::cubic_fractal_truss(&[3, 3], 4.0);
//! frame.repair().run(&RepairConfig::default());
//! render_to_file(&frame, "truss.stl", &RenderOptions::default())?;
//! # Ok::<(), frameworx::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod repair;
pub mod shapes;
pub mod spatial;
pub mod utils;

pub use config::FrameworxConfig;
pub use error::{Error, Result};
pub use geometry::{AxisPair, CapMode, Frame, GeometricPrimitive, PrintArea, Primitive, Stick};
pub use io::{inspect_stl, StlWriter};
pub use mesh::{render_stl, render_to_file, RenderOptions, RenderSummary, TriangleSink};
pub use repair::{Repair, RepairConfig};
