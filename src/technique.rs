use indexmap::IndexMap;

use crate::field::DistanceField;
use crate::Cell;

/// External collaborator describing an area-of-effect ability: the range it
/// can be used from, and which cells are worth standing on to hit a set of
/// targets. [`super::field::extract::find_technique_path`] consults this to
/// choose a destination instead of walking straight to a target.
pub trait Technique {
    /// Closest distance the technique can be used from.
    fn min_range(&self) -> u32;
    /// Farthest distance the technique can be used from.
    fn max_range(&self) -> u32;

    /// Gives the technique a look at the current map before it is asked for
    /// placements, so it can avoid offering cells that are walls or
    /// otherwise unreachable.
    fn set_map(&mut self, field: &DistanceField);

    /// Every cell worth standing on to use this technique against `targets`
    /// from `origin`, each mapped to the subset of `targets` it would hit.
    /// `allies` are cells the technique should avoid hitting (friendly
    /// fire), if it has an area of effect. Iteration order is the order
    /// candidates were discovered, not sorted by quality.
    fn ideal_locations(
        &self,
        origin: Cell,
        targets: &[Cell],
        allies: &[Cell],
    ) -> IndexMap<Cell, Vec<Cell>>;
}
