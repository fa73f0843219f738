#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// One of the eight compass directions, plus a `None` sentinel used by the
/// greedy descent loop to mean "no improving neighbour was chosen yet".
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    None,
}

/// The four cardinal directions, in clockwise order starting at north.
pub const CARDINALS: [Direction; 4] =
    [Direction::North, Direction::East, Direction::South, Direction::West];

/// All eight directions, cardinals first, then diagonals: the "outwards"
/// ordering used to build the initial direction-shuffle buffer under
/// Chebyshev and Euclidean measurement.
pub const OUTWARDS: [Direction; 8] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

impl Direction {
    /// Returns the `(dx, dy)` unit vector for this direction. `None` has no
    /// displacement.
    #[inline]
    #[must_use]
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::None => (0, 0),
        }
    }

    /// Returns true if this direction is one of the four cardinals.
    #[inline]
    #[must_use]
    pub fn is_cardinal(&self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }

    /// Returns true iff both components of [`Direction::delta`] are non-zero.
    #[inline]
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_iff_both_deltas_nonzero() {
        for d in OUTWARDS {
            assert_eq!(d.is_diagonal(), !d.is_cardinal());
        }
        assert!(!Direction::None.is_diagonal());
        assert!(!Direction::None.is_cardinal());
    }

    #[test]
    fn outwards_is_cardinals_then_diagonals() {
        assert_eq!(&OUTWARDS[..4], &CARDINALS[..]);
        for d in &OUTWARDS[4..] {
            assert!(d.is_diagonal());
        }
    }
}
