// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Grid-bucketed point stores: item lists and counters

use super::{Grid, GridCell, LineIndex};
use crate::geometry::Stick;
use crate::utils::math::centroid;
use ahash::AHashMap;
use nalgebra::Point3;

/// Cells searched around a loose end when looking for a partner
const LOOSE_END_REACH: i64 = 3;

/// Item-list point index: each cell holds the points that fall in it, each
/// tagged with a caller-chosen item (a member index, an endpoint slot, ...).
#[derive(Debug, Clone)]
pub struct PointIndex<T> {
    grid: Grid,
    buckets: AHashMap<GridCell, Vec<(Point3<f64>, T)>>,
}

impl<T: Clone> PointIndex<T> {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            buckets: AHashMap::new(),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn add(&mut self, point: Point3<f64>, item: T) {
        let cell = self.grid.cell(&point);
        self.buckets.entry(cell).or_default().push((point, item));
    }

    /// Index both endpoints of `stick` against the same item
    pub fn add_stick(&mut self, stick: &Stick, item: T) {
        self.add(stick.start, item.clone());
        self.add(stick.end, item);
    }

    /// Entries in the cell of `point`, or in its 27-cell neighborhood
    pub fn count(&self, point: &Point3<f64>, include_adjacent: bool) -> usize {
        let cell = self.grid.cell(point);
        let reach = i64::from(include_adjacent);
        cell.neighborhood(reach).map(|c| self.bucket(c).len()).sum()
    }

    pub fn bucket(&self, cell: GridCell) -> &[(Point3<f64>, T)] {
        self.buckets.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn bucket_mut(&mut self, cell: GridCell) -> Option<&mut Vec<(Point3<f64>, T)>> {
        self.buckets.get_mut(&cell)
    }

    /// Occupied cells in lexicographic order
    pub fn cells(&self) -> Vec<GridCell> {
        let mut cells: Vec<GridCell> = self.buckets.keys().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Entries from every cell within `reach` of `cell`
    pub fn nearby(&self, cell: GridCell, reach: i64) -> Vec<&(Point3<f64>, T)> {
        cell.neighborhood(reach).flat_map(|c| self.bucket(c)).collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Collect every point whose cell holds at most `loose_end_limit` entries
    /// and join each to its nearest unconnected loose neighbor.
    ///
    /// New segments are recorded in `lines` as they are created.
    pub fn fill_gaps(
        &self,
        lines: &mut LineIndex<()>,
        loose_end_limit: usize,
        width: f64,
    ) -> Vec<Stick> {
        let mut loose_ends = PointIndex::new(self.grid);
        for (cell, bucket) in &self.buckets {
            if bucket.len() <= loose_end_limit {
                for (point, _) in bucket {
                    loose_ends.buckets.entry(*cell).or_default().push((*point, ()));
                }
            }
        }
        loose_ends.join_loose_ends(lines, loose_end_limit, width)
    }
}

impl PointIndex<usize> {
    /// Pull every cluster of points closer than the cell radius onto its
    /// centroid. Items are slots in `positions`, which is updated in place.
    ///
    /// Clusters are local to each point's own neighborhood, so chains of
    /// near points are not merged transitively. Returns how many positions
    /// moved.
    pub fn merge_close_points(&self, positions: &mut [Point3<f64>]) -> usize {
        let radius = self.grid.radius();
        let mut moved = vec![false; positions.len()];

        for cell in self.cells() {
            let candidates: Vec<usize> =
                self.nearby(cell, 1).into_iter().map(|(_, slot)| *slot).collect();
            for &(_, slot) in self.bucket(cell).iter().rev() {
                let point = positions[slot];
                let mut cluster = vec![slot];
                cluster.extend(
                    candidates
                        .iter()
                        .copied()
                        .filter(|&other| other != slot && (positions[other] - point).norm() < radius),
                );
                if cluster.iter().all(|&s| positions[s] == point) {
                    continue;
                }
                let Some(center) = centroid(cluster.iter().map(|&s| &positions[s])) else {
                    continue;
                };
                for s in cluster {
                    if positions[s] != center {
                        positions[s] = center;
                        moved[s] = true;
                    }
                }
            }
        }
        moved.into_iter().filter(|&m| m).count()
    }
}

impl PointIndex<()> {
    fn join_loose_ends(
        &mut self,
        lines: &mut LineIndex<()>,
        loose_end_limit: usize,
        width: f64,
    ) -> Vec<Stick> {
        let mut infill = Vec::new();

        for cell in self.cells() {
            if self.bucket(cell).len() > loose_end_limit {
                continue;
            }
            let Some(&(point, ())) = self.bucket(cell).first() else {
                continue;
            };

            let mut candidates: Vec<Point3<f64>> = cell
                .neighborhood(LOOSE_END_REACH)
                .filter(|&c| c != cell)
                .map(|c| self.bucket(c))
                .filter(|bucket| bucket.len() <= loose_end_limit)
                .flat_map(|bucket| bucket.iter().map(|(p, _)| *p))
                .collect();
            candidates.sort_by(|a, b| (a - point).norm().total_cmp(&(b - point).norm()));

            let partner = candidates.into_iter().find(|other| !lines.check(&point, other));
            if let Some(other) = partner {
                infill.push(Stick::from_endpoints(point, other).with_thickness(width));
                lines.mark(&point, &other);
                if let Some(bucket) = self.bucket_mut(cell) {
                    bucket.push((point, ()));
                }
                self.add(other, ());
            }
        }
        infill
    }
}

/// Count-only point index
#[derive(Debug, Clone)]
pub struct PointCounter {
    grid: Grid,
    counts: AHashMap<GridCell, u32>,
}

impl PointCounter {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            counts: AHashMap::new(),
        }
    }

    pub fn add(&mut self, point: &Point3<f64>, count: u32) {
        let cell = self.grid.cell(point);
        *self.counts.entry(cell).or_insert(0) += count;
    }

    pub fn add_stick(&mut self, stick: &Stick) {
        self.add(&stick.start, 1);
        self.add(&stick.end, 1);
    }

    pub fn count(&self, point: &Point3<f64>, include_adjacent: bool) -> u32 {
        let cell = self.grid.cell(point);
        cell.neighborhood(i64::from(include_adjacent))
            .filter_map(|c| self.counts.get(&c))
            .sum()
    }

    pub fn clear(&mut self, point: &Point3<f64>) {
        let cell = self.grid.cell(point);
        self.counts.remove(&cell);
    }
}
