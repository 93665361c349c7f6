// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Segment store keyed by the ordered pair of endpoint cells
//!
//! Two segments whose endpoints share cells are the same key, whichever way
//! round they run. The grid radius must therefore be smaller than the shortest
//! member that should stay distinct.

use super::{Grid, GridCell};
use ahash::AHashMap;
use nalgebra::Point3;

#[derive(Debug, Clone)]
pub struct LineIndex<T> {
    grid: Grid,
    lines: AHashMap<(GridCell, GridCell), T>,
}

impl<T> LineIndex<T> {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            lines: AHashMap::new(),
        }
    }

    pub fn check(&self, a: &Point3<f64>, b: &Point3<f64>) -> bool {
        self.lines.contains_key(&self.grid.segment_key(a, b))
    }

    pub fn get(&self, a: &Point3<f64>, b: &Point3<f64>) -> Option<&T> {
        self.lines.get(&self.grid.segment_key(a, b))
    }

    /// Store `item` for the segment, returning the previous occupant
    pub fn insert(&mut self, a: &Point3<f64>, b: &Point3<f64>, item: T) -> Option<T> {
        self.lines.insert(self.grid.segment_key(a, b), item)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl LineIndex<()> {
    /// Record presence only
    pub fn mark(&mut self, a: &Point3<f64>, b: &Point3<f64>) {
        self.insert(a, b, ());
    }
}

impl LineIndex<u32> {
    /// Bump the segment's counter and return the new value
    pub fn increment(&mut self, a: &Point3<f64>, b: &Point3<f64>) -> u32 {
        let counter = self.lines.entry(self.grid.segment_key(a, b)).or_insert(0);
        *counter += 1;
        *counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn test_reverse_segment_hits_same_entry() {
        let mut lines: LineIndex<()> = LineIndex::new(Grid::new(0.5).unwrap());
        lines.mark(&p(0.0, 0.0, 0.0), &p(3.0, 1.0, 0.0));
        assert!(lines.check(&p(3.0, 1.0, 0.0), &p(0.0, 0.0, 0.0)));
        assert!(lines.check(&p(0.1, 0.2, 0.1), &p(3.2, 1.1, 0.3)));
        assert!(!lines.check(&p(0.0, 0.0, 0.0), &p(3.0, 2.0, 0.0)));
    }

    #[test]
    fn test_insert_returns_previous_owner() {
        let mut lines = LineIndex::new(Grid::new(1.0).unwrap());
        assert_eq!(lines.insert(&p(0.0, 0.0, 0.0), &p(5.0, 0.0, 0.0), 1usize), None);
        assert_eq!(lines.insert(&p(5.2, 0.0, 0.0), &p(0.3, 0.0, 0.0), 2), Some(1));
        assert_eq!(lines.get(&p(0.0, 0.0, 0.0), &p(5.0, 0.0, 0.0)), Some(&2));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_increment_counts_duplicates() {
        let mut lines: LineIndex<u32> = LineIndex::new(Grid::new(1.0).unwrap());
        assert_eq!(lines.increment(&p(0.0, 0.0, 0.0), &p(1.0, 1.0, 1.0)), 1);
        assert_eq!(lines.increment(&p(1.0, 1.0, 1.0), &p(0.0, 0.0, 0.0)), 2);
    }
}
