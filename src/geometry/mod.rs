// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - sticks, frames and their transforms

mod bbox;
pub mod deform;
mod frame;
mod placement;
mod primitives;
mod stick;

pub use bbox::{AxisRange, BoundingBox, PrintArea};
pub use frame::{CapMode, Frame};
pub use placement::Placement;
pub use primitives::{AxisPair, GeometricPrimitive, Primitive};
pub use stick::Stick;
