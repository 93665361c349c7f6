// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point merging and colinear stick welding

use super::{Repair, MERGE_FRACTION};
use crate::spatial::PointIndex;
use nalgebra::Point3;
use tracing::debug;

impl Repair<'_> {
    /// Snap endpoints closer than `proximity` onto their cluster centroid.
    ///
    /// Defaults to half the shortest member. Returns how many endpoints moved.
    pub fn merge_points(&mut self, proximity: Option<f64>) -> usize {
        let Some(grid) = self.grid(proximity, MERGE_FRACTION) else {
            return 0;
        };

        let live = self.live_indices();
        let mut positions: Vec<Point3<f64>> = Vec::with_capacity(live.len() * 2);
        for &i in &live {
            positions.push(self.frame.members[i].start);
            positions.push(self.frame.members[i].end);
        }

        let mut index = PointIndex::new(grid);
        for (slot, point) in positions.iter().enumerate() {
            index.add(*point, slot);
        }
        let moved = index.merge_close_points(&mut positions);

        for (n, &i) in live.iter().enumerate() {
            let member = &mut self.frame.members[i];
            member.start = positions[2 * n];
            member.end = positions[2 * n + 1];
        }
        debug!(radius = grid.radius(), moved, "merged close points");
        moved
    }

    /// Weld colinear members that meet at a point, repeating until a pass
    /// makes no merge or `repeat_count` passes have run.
    ///
    /// Welded inputs are soft-deleted and the merged stick is appended, so a
    /// later [`Repair::compact`] is needed before counting members. Returns the
    /// number of welds.
    pub fn merge_sticks(
        &mut self,
        proximity: Option<f64>,
        tolerance_degrees: f64,
        repeat_count: usize,
    ) -> usize {
        let Some(grid) = self.grid(proximity, MERGE_FRACTION) else {
            return 0;
        };

        let mut total = 0;
        for pass in 1..=repeat_count.max(1) {
            let mut index = PointIndex::new(grid);
            for i in self.live_indices() {
                index.add_stick(&self.frame.members[i], i);
            }

            let mut welded = 0;
            for cell in index.cells() {
                let mut bucket: Vec<usize> = index.bucket(cell).iter().map(|(_, i)| *i).collect();
                if bucket.len() < 2 {
                    continue;
                }
                for a in 0..bucket.len() - 1 {
                    if self.frame.members[bucket[a]].deleted {
                        continue;
                    }
                    for b in a + 1..bucket.len() {
                        let (first, second) = (bucket[a], bucket[b]);
                        let members = &self.frame.members;
                        if first == second
                            || members[second].deleted
                            || !members[first].colinear_with(&members[second], tolerance_degrees)
                        {
                            continue;
                        }
                        let merged = members[first].merge_with(&members[second]);
                        self.frame.members[first].deleted = true;
                        self.frame.members[second].deleted = true;

                        let merged_index = self.frame.members.len();
                        index.add_stick(&merged, merged_index);
                        self.frame.members.push(merged);
                        bucket[a] = merged_index;
                        welded += 1;
                    }
                }
            }

            debug!(pass, welded, "stick weld pass");
            total += welded;
            if welded == 0 {
                break;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{Frame, GeometricPrimitive, Stick};
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use rand::{Rng, SeedableRng};

    fn along_x(from: f64, to: f64) -> Stick {
        Stick::from_endpoints(Point3::new(from, 0.0, 0.0), Point3::new(to, 0.0, 0.0))
    }

    #[test]
    fn test_colinear_pair_welds_into_one() {
        let mut frame = Frame::new();
        frame.add(along_x(0.0, 5.0));
        frame.add(along_x(5.0, 12.0));

        let mut repair = frame.repair();
        assert_eq!(repair.merge_sticks(None, 0.5, 2), 1);
        repair.compact();

        assert_eq!(frame.members.len(), 1);
        assert_relative_eq!(frame.members[0].length(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_weld_averages_thickness() {
        let mut frame = Frame::new();
        frame.add(along_x(0.0, 4.0).with_thickness(1.0));
        frame.add(along_x(4.0, 8.0).with_thickness(3.0));
        frame.repair().merge_sticks(Some(1.0), 0.5, 2);
        let live: Vec<_> = frame.live_members().collect();
        assert_eq!(live.len(), 1);
        assert_relative_eq!(live[0].thickness, 2.0);
    }

    #[test]
    fn test_chain_of_three_welds_fully() {
        let mut frame = Frame::new();
        frame.add(along_x(0.0, 3.0));
        frame.add(along_x(3.0, 6.0));
        frame.add(along_x(6.0, 9.0));

        let mut repair = frame.repair();
        let welds = repair.merge_sticks(Some(1.0), 0.5, 4);
        repair.compact();
        assert_eq!(welds, 2);
        assert_eq!(frame.members.len(), 1);
        assert_relative_eq!(frame.members[0].length(), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_right_angle_does_not_weld() {
        let mut frame = Frame::new();
        frame.add(along_x(0.0, 5.0));
        frame.add(along_x(0.0, 5.0).rotate_z(90.0));
        assert_eq!(frame.repair().merge_sticks(Some(1.0), 0.5, 2), 0);
        assert_eq!(frame.member_count(), 2);
    }

    #[test]
    fn test_merge_points_snaps_jittered_corner() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut frame = Frame::new();
        for _ in 0..4 {
            let jitter = Point3::new(
                rng.gen_range(-0.01..0.01),
                rng.gen_range(-0.01..0.01),
                rng.gen_range(-0.01..0.01),
            );
            frame.add(Stick::from_endpoints(Point3::new(5.0, 5.0, 5.0) + jitter.coords, Point3::origin()));
        }
        frame.repair().merge_points(Some(1.0));

        let first = frame.members[0].start;
        for member in &frame.members {
            assert_eq!(member.start, first);
        }
        assert!((first - Point3::new(5.0, 5.0, 5.0)).norm() < 0.01);
    }

    #[test]
    fn test_merge_points_twice_is_stable() {
        let mut frame = Frame::new();
        frame.add(Stick::from_endpoints(Point3::new(0.5, 0.5, 0.5), Point3::new(10.5, 0.5, 0.5)));
        frame.add(Stick::from_endpoints(Point3::new(0.6, 0.5, 0.5), Point3::new(0.5, 10.5, 0.5)));
        frame.repair().merge_points(Some(1.0));
        let once = frame.clone();
        assert_eq!(frame.repair().merge_points(Some(1.0)), 0);
        assert_eq!(frame, once);
    }
}
