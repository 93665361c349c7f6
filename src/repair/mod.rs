// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! In-place clean-up passes over a frame's members
//!
//! Every method on [`Repair`] mutates the borrowed frame. Pure transforms
//! live on [`Frame`] itself and always return a new value.

mod dedup;
mod gaps;
mod weld;

use crate::geometry::{Frame, Stick};
use crate::spatial::Grid;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use gaps::DEFAULT_LOOSE_END_LIMITS;

/// Default point-merge and weld radius, as a fraction of the shortest member
pub const MERGE_FRACTION: f64 = 0.5;
/// Default dedup radius, as a fraction of the shortest member
pub const DEDUP_FRACTION: f64 = 1.0 / 3.0;
pub const DEFAULT_COLINEARITY_TOLERANCE: f64 = 0.5;
pub const DEFAULT_WELD_PASSES: usize = 2;

/// Which stages [`Repair::run`] executes, and with what parameters.
///
/// Proximities left as `None` are derived from the frame at the time the
/// stage runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    pub merge_points: bool,
    pub merge_sticks: bool,
    pub deduplicate: bool,
    pub fill_gaps: bool,
    pub merge_proximity: Option<f64>,
    pub weld_proximity: Option<f64>,
    pub colinearity_tolerance: f64,
    pub weld_passes: usize,
    pub dedup_proximity: Option<f64>,
    pub gap_proximity: Option<f64>,
    pub gap_width: f64,
    pub loose_end_limits: Vec<usize>,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            merge_points: true,
            merge_sticks: true,
            deduplicate: true,
            fill_gaps: false,
            merge_proximity: None,
            weld_proximity: None,
            colinearity_tolerance: DEFAULT_COLINEARITY_TOLERANCE,
            weld_passes: DEFAULT_WELD_PASSES,
            dedup_proximity: None,
            gap_proximity: None,
            gap_width: 1.0,
            loose_end_limits: DEFAULT_LOOSE_END_LIMITS.to_vec(),
        }
    }
}

/// What a [`Repair::run`] changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairSummary {
    pub points_moved: usize,
    pub sticks_welded: usize,
    pub duplicates_removed: usize,
    pub infill_added: usize,
    pub members_removed: usize,
    pub members: usize,
}

/// Mutable repair session over one frame
pub struct Repair<'a> {
    frame: &'a mut Frame,
}

impl<'a> Repair<'a> {
    pub fn new(frame: &'a mut Frame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &Frame {
        &*self.frame
    }

    /// Drop deleted and zero-length members. Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.frame.members.len();
        self.frame.members.retain(|m| !m.deleted && !m.is_degenerate());
        before - self.frame.members.len()
    }

    /// Run the enabled stages in order: merge points, weld, dedup, fill gaps,
    /// then a final compaction.
    pub fn run(&mut self, config: &RepairConfig) -> RepairSummary {
        let mut summary = RepairSummary::default();
        if config.merge_points {
            summary.points_moved = self.merge_points(config.merge_proximity);
        }
        if config.merge_sticks {
            summary.sticks_welded = self.merge_sticks(
                config.weld_proximity,
                config.colinearity_tolerance,
                config.weld_passes,
            );
        }
        if config.deduplicate {
            summary.duplicates_removed = self.deduplicate(config.dedup_proximity);
        }
        if config.fill_gaps {
            summary.infill_added =
                self.fill_gaps_with(config.gap_proximity, &config.loose_end_limits, config.gap_width);
        }
        summary.members_removed = self.compact();
        summary.members = self.frame.members.len();

        info!(
            points_moved = summary.points_moved,
            welded = summary.sticks_welded,
            duplicates = summary.duplicates_removed,
            infill = summary.infill_added,
            members = summary.members,
            "repair complete"
        );
        summary
    }

    /// Grid for a stage: the explicit proximity, or `fraction` of the shortest member
    fn grid(&self, proximity: Option<f64>, fraction: f64) -> Option<Grid> {
        let radius = match proximity {
            Some(radius) => radius,
            None => self.frame.shortest_member_length()? * fraction,
        };
        Grid::new(radius)
    }

    /// Indices of live members
    fn live_indices(&self) -> Vec<usize> {
        self.members()
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.deleted)
            .map(|(i, _)| i)
            .collect()
    }

    fn members(&self) -> &[Stick] {
        &self.frame.members
    }
}

impl Frame {
    /// Start an in-place repair session
    pub fn repair(&mut self) -> Repair<'_> {
        Repair::new(self)
    }
}
