/// A goal cell during a scan.
pub const GOAL: f32 = 0.0;

/// Walkable, not yet reached by a wave.
pub const FLOOR: f32 = 999_200.0;

/// Impassable.
pub const WALL: f32 = 999_500.0;

/// Walkable but unreachable from any goal, assigned only on result
/// extraction (see [`crate::DistanceField::scan`]'s 2D-array-returning
/// variant vs. its `start`-taking void variant).
pub const DARK: f32 = 999_800.0;

/// True for any value below [`FLOOR`]: a finite, reached distance.
#[inline]
#[must_use]
pub fn is_finite_distance(value: f32) -> bool {
    value < FLOOR
}
