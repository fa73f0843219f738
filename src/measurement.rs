#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{Direction, CARDINALS, OUTWARDS};

/// A distance metric over the grid, controlling which neighbours a scan
/// expands into and how a diagonal step is costed relative to a cardinal
/// one.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// 4-directional movement; diagonals are disallowed.
    Manhattan,
    /// 8-directional movement; a diagonal step costs the same as a cardinal
    /// one.
    Chebyshev,
    /// 8-directional movement; a diagonal step costs `sqrt(2)` times a
    /// cardinal one.
    Euclidean,
}

impl Measurement {
    /// Number of directions a wave expands into: 4 for Manhattan, 8
    /// otherwise.
    #[inline]
    #[must_use]
    pub fn direction_count(&self) -> usize {
        match self {
            Measurement::Manhattan => 4,
            Measurement::Chebyshev | Measurement::Euclidean => 8,
        }
    }

    /// The direction set a wave scan iterates, in its canonical order:
    /// cardinals only for Manhattan, cardinals-then-diagonals otherwise.
    #[inline]
    #[must_use]
    pub fn directions(&self) -> &'static [Direction] {
        match self {
            Measurement::Manhattan => &CARDINALS,
            Measurement::Chebyshev | Measurement::Euclidean => &OUTWARDS,
        }
    }

    /// The per-step cost multiplier of moving in `direction` under this
    /// measurement. Cardinal steps always cost `1`. Diagonal steps are
    /// `NaN` (disallowed) under Manhattan, `1` under Chebyshev, and
    /// `sqrt(2)` under Euclidean.
    #[inline]
    #[must_use]
    pub fn heuristic(&self, direction: Direction) -> f32 {
        if !direction.is_diagonal() {
            return 1.0;
        }
        match self {
            Measurement::Manhattan => f32::NAN,
            Measurement::Chebyshev => 1.0,
            Measurement::Euclidean => std::f32::consts::SQRT_2,
        }
    }

    /// The distance between `(x1, y1)` and `(x2, y2)` under this metric.
    #[inline]
    #[must_use]
    pub fn radius(&self, x1: i64, y1: i64, x2: i64, y2: i64) -> f32 {
        let dx = (x2 - x1).unsigned_abs() as f32;
        let dy = (y2 - y1).unsigned_abs() as f32;
        match self {
            Measurement::Manhattan => dx + dy,
            Measurement::Chebyshev => dx.max(dy),
            Measurement::Euclidean => (dx * dx + dy * dy).sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_forbids_diagonals() {
        assert!(Measurement::Manhattan
            .heuristic(Direction::NorthEast)
            .is_nan());
        assert_eq!(Measurement::Manhattan.direction_count(), 4);
    }

    #[test]
    fn chebyshev_diagonal_costs_one() {
        assert_eq!(Measurement::Chebyshev.heuristic(Direction::NorthEast), 1.0);
    }

    #[test]
    fn euclidean_diagonal_costs_sqrt2() {
        assert_eq!(
            Measurement::Euclidean.heuristic(Direction::SouthWest),
            std::f32::consts::SQRT_2
        );
    }

    #[test]
    fn radius_matches_metric() {
        assert_eq!(Measurement::Manhattan.radius(0, 0, 3, 4), 7.0);
        assert_eq!(Measurement::Chebyshev.radius(0, 0, 3, 4), 4.0);
        assert_eq!(Measurement::Euclidean.radius(0, 0, 3, 4), 5.0);
    }
}
