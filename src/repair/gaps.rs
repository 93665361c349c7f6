// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use super::{Repair, MERGE_FRACTION};
use crate::spatial::{LineIndex, PointIndex};
use tracing::debug;

/// Loose-end thresholds tried in turn: simple joints first, then busier ones
pub const DEFAULT_LOOSE_END_LIMITS: [usize; 2] = [2, 3];

impl Repair<'_> {
    /// Bridge nearby loose ends with unit-thickness infill members.
    ///
    /// Defaults to half the shortest member. Returns the number of members added.
    pub fn fill_gaps(&mut self, proximity: Option<f64>) -> usize {
        self.fill_gaps_with(proximity, &DEFAULT_LOOSE_END_LIMITS, 1.0)
    }

    /// [`Repair::fill_gaps`] with explicit loose-end limits and infill thickness.
    ///
    /// Both indices are rebuilt for each limit so infill from an earlier round
    /// counts toward later ones.
    pub fn fill_gaps_with(
        &mut self,
        proximity: Option<f64>,
        loose_end_limits: &[usize],
        width: f64,
    ) -> usize {
        let Some(grid) = self.grid(proximity, MERGE_FRACTION) else {
            return 0;
        };

        let mut added = 0;
        for &limit in loose_end_limits {
            let mut points = PointIndex::new(grid);
            let mut lines: LineIndex<()> = LineIndex::new(grid);
            for i in self.live_indices() {
                let member = &self.frame.members[i];
                points.add_stick(member, i);
                lines.mark(&member.start, &member.end);
            }

            let infill = points.fill_gaps(&mut lines, limit, width);
            debug!(limit, infill = infill.len(), "filled gaps");
            added += infill.len();
            self.frame.members.extend(infill);
        }
        added
    }
}
