// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use super::{Repair, DEDUP_FRACTION};
use crate::spatial::LineIndex;
use tracing::debug;

impl Repair<'_> {
    /// Collapse members whose endpoints coincide within `proximity`, keeping
    /// the thickest of each group, then compact.
    ///
    /// Defaults to a third of the shortest member. Returns the number of
    /// members discarded as duplicates.
    pub fn deduplicate(&mut self, proximity: Option<f64>) -> usize {
        let Some(grid) = self.grid(proximity, DEDUP_FRACTION) else {
            return 0;
        };

        let mut lines: LineIndex<usize> = LineIndex::new(grid);
        let mut removed = 0;
        for i in self.live_indices() {
            let (start, end) = (self.frame.members[i].start, self.frame.members[i].end);
            let Some(previous) = lines.insert(&start, &end, i) else {
                continue;
            };
            // Ties keep the earlier member
            let (keep, drop) =
                if self.frame.members[i].thickness > self.frame.members[previous].thickness {
                    (i, previous)
                } else {
                    (previous, i)
                };
            self.frame.members[drop].deleted = true;
            lines.insert(&start, &end, keep);
            removed += 1;
        }

        self.compact();
        debug!(radius = grid.radius(), removed, "deduplicated members");
        removed
    }
}
