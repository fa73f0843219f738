use fxhash::FxHashSet;

use crate::field::{is_finite_distance, DistanceField};
use crate::{Cell, Measurement, CARDINALS, OUTWARDS};

/// Partitions a map into overlapping regions of influence, one per group of
/// seed cells, built on top of a single shared [`DistanceField`] scan.
///
/// All groups are scanned together so their gradients are directly
/// comparable; the region a group dominates is then grown independently by
/// walking its own gradient outward one contour line at a time, which is
/// why two groups can legitimately both claim the handful of cells sitting
/// exactly on the boundary between them.
pub struct ZoneOfInfluence {
    field: DistanceField,
}

impl ZoneOfInfluence {
    #[must_use]
    pub fn new(measurement: Measurement) -> Self {
        Self {
            field: DistanceField::new(measurement),
        }
    }

    pub fn initialize(&mut self, rows: &[Vec<char>], wall_char: char) {
        self.field.initialize(rows, wall_char);
    }

    #[must_use]
    pub fn field(&self) -> &DistanceField {
        &self.field
    }

    /// Scans once from every seed in every group, then region-grows each
    /// group's own footprint from that shared gradient. Returns one bitmap
    /// per input group, in the same order.
    pub fn partition(&mut self, groups: &[Vec<Cell>]) -> Vec<FxHashSet<Cell>> {
        self.field.reset();
        for group in groups {
            self.field.set_goals(group.iter().copied());
        }
        let _ = self.field.scan_from(None, None, false);

        groups.iter().map(|g| self.grow_region(g)).collect()
    }

    /// Monotonic frontier flood from `seeds`: a neighbour joins the region
    /// only if it hasn't already, and its shared-scan distance is no lower
    /// and at most one higher than the frontier cell it was reached from.
    fn grow_region(&self, seeds: &[Cell]) -> FxHashSet<Cell> {
        let directions: &[crate::Direction] = if self.field.measurement() == Measurement::Manhattan
        {
            &CARDINALS
        } else {
            &OUTWARDS
        };

        let mut claimed: FxHashSet<Cell> = seeds.iter().copied().collect();
        let mut frontier: Vec<Cell> = seeds.to_vec();

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for &c in &frontier {
                let dc = self.field.gradient_at(c);
                for &d in directions {
                    let Some(n) = c.translate(d) else {
                        continue;
                    };
                    if !n.within(self.field.width(), self.field.height()) || claimed.contains(&n) {
                        continue;
                    }
                    let dn = self.field.gradient_at(n);
                    if !is_finite_distance(dn) || dn < dc || dn > dc + 1.0 {
                        continue;
                    }
                    claimed.insert(n);
                    next.push(n);
                }
            }
            frontier = next;
        }

        claimed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_room(w: usize, h: usize) -> Vec<Vec<char>> {
        vec![vec!['.'; w]; h]
    }

    #[test]
    fn partition_covers_every_passable_cell() {
        let mut zoi = ZoneOfInfluence::new(Measurement::Euclidean);
        zoi.initialize(&open_room(10, 10), '#');
        let zones = zoi.partition(&[vec![Cell::new(0, 0)], vec![Cell::new(9, 9)]]);

        let mut covered: FxHashSet<Cell> = FxHashSet::default();
        for zone in &zones {
            covered.extend(zone.iter().copied());
        }
        for y in 0..10 {
            for x in 0..10 {
                assert!(covered.contains(&Cell::new(x, y)));
            }
        }
    }

    #[test]
    fn overlap_is_a_thin_border() {
        let mut zoi = ZoneOfInfluence::new(Measurement::Euclidean);
        zoi.initialize(&open_room(10, 10), '#');
        let zones = zoi.partition(&[vec![Cell::new(0, 0)], vec![Cell::new(9, 9)]]);
        let overlap: Vec<Cell> = zones[0].intersection(&zones[1]).copied().collect();
        assert!(!overlap.is_empty());
        assert!(overlap.len() < 20);
    }

    #[test]
    fn single_group_claims_every_reachable_cell() {
        let mut zoi = ZoneOfInfluence::new(Measurement::Chebyshev);
        zoi.initialize(&open_room(5, 5), '#');
        let zones = zoi.partition(&[vec![Cell::new(2, 2)]]);
        assert_eq!(zones[0].len(), 25);
    }

    #[test]
    fn manhattan_partition_uses_cardinal_growth() {
        let mut rows = open_room(5, 5);
        rows[2][2] = '#';
        let mut zoi = ZoneOfInfluence::new(Measurement::Manhattan);
        zoi.initialize(&rows, '#');
        let zones = zoi.partition(&[vec![Cell::new(0, 0)]]);
        assert!(!zones[0].contains(&Cell::new(2, 2)));
        assert!(zones[0].contains(&Cell::new(4, 4)));
    }
}
