use std::collections::VecDeque;

use fxhash::FxHashMap;

use crate::error::{GridFlowError, GridFlowResult};
use crate::rng::Rng;
use crate::{Cell, Direction, Measurement};

use super::sentinels::{DARK, FLOOR, GOAL, WALL};

/// The memoized result of the last [`super::extract::find_flee_path`] call,
/// reused verbatim by a subsequent call with byte-equal inputs.
#[derive(Debug, Clone)]
pub(crate) struct FleeCache {
    pub(crate) fear_sources: Vec<Cell>,
    pub(crate) impassable: Vec<Cell>,
    pub(crate) prefer_longer_paths_bits: u32,
    pub(crate) mover_size: u32,
    pub(crate) gradient: Vec<f32>,
}

/// The "Dijkstra map" distance-field engine: a multi-goal wave scan over a
/// per-cell cost grid, whose resulting gradient supports repeated cheap
/// path extraction (see [`super::extract`]).
///
/// `width`, `height`, and the `physical`/`gradient`/`cost` buffers are kept
/// in lockstep; [`DistanceField::initialize`] and
/// [`DistanceField::initialize_cost`] are the only operations that may
/// change their shape.
#[derive(Debug, Clone)]
pub struct DistanceField {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) physical: Vec<f32>,
    pub(crate) gradient: Vec<f32>,
    pub(crate) cost: Vec<f32>,
    pub(crate) measurement: Measurement,
    pub(crate) standard_costs: bool,
    blocking_requirement: u8,
    pub(crate) goals: Vec<Cell>,
    pub(crate) flee_cache: Option<FleeCache>,
}

impl DistanceField {
    /// An uninitialized field with no buffers allocated yet. Every query
    /// before [`DistanceField::initialize`]/[`DistanceField::initialize_cost`]
    /// fails with [`GridFlowError::NotInitialized`] or, for infallible
    /// lookups, returns the unreachable sentinel.
    #[must_use]
    pub fn new(measurement: Measurement) -> Self {
        Self {
            width: 0,
            height: 0,
            physical: Vec::new(),
            gradient: Vec::new(),
            cost: Vec::new(),
            measurement,
            standard_costs: true,
            blocking_requirement: 2,
            goals: Vec::new(),
            flee_cache: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    #[inline]
    #[must_use]
    pub fn standard_costs(&self) -> bool {
        self.standard_costs
    }

    /// Corner-cutting policy for diagonal moves: `0` disables the check,
    /// `1` forbids cutting any corner, `2` (the default) only forbids moves
    /// squeezed between two flanking walls.
    #[inline]
    #[must_use]
    pub fn blocking_requirement(&self) -> u8 {
        self.blocking_requirement
    }

    pub fn set_blocking_requirement(&mut self, value: u8) {
        self.blocking_requirement = value.min(2);
    }

    fn require_initialized(&self) -> GridFlowResult<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(GridFlowError::NotInitialized)
        }
    }

    #[inline]
    pub(crate) fn index(&self, cell: Cell) -> Option<usize> {
        if !cell.within(self.width, self.height) {
            return None;
        }
        Some(cell.y() as usize * self.width as usize + cell.x() as usize)
    }

    /// Allocates (or reallocates, if the shape changed) every buffer from a
    /// character grid `rows[y][x]`. Cells equal to `wall_char` become
    /// walls; every other cell costs `1` and `standard_costs` is enabled.
    pub fn initialize(&mut self, rows: &[Vec<char>], wall_char: char) {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len() as u32);
        let mut physical = vec![FLOOR; (width * height) as usize];
        for (y, row) in rows.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                if c == wall_char {
                    physical[y * width as usize + x] = WALL;
                }
            }
        }
        self.width = width;
        self.height = height;
        self.gradient = physical.clone();
        self.physical = physical;
        self.cost = vec![1.0; (width * height) as usize];
        self.standard_costs = true;
        self.goals.clear();
        self.flee_cache = None;
    }

    /// Sets the cost buffer from a float grid `rows[y][x]`, disabling
    /// `standard_costs`. Any entry `<= 0` becomes a wall. If the field was
    /// already initialized at a different shape, this fails with
    /// [`GridFlowError::ShapeMismatch`] rather than silently reallocating
    /// (only [`DistanceField::initialize`] may change shape).
    pub fn initialize_cost(&mut self, rows: &[Vec<f32>]) -> GridFlowResult<()> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len() as u32);
        if self.is_initialized() && (width, height) != (self.width, self.height) {
            return Err(GridFlowError::ShapeMismatch {
                expected: (self.width, self.height),
                found: (width, height),
            });
        }

        let mut physical = vec![FLOOR; (width * height) as usize];
        let mut cost = vec![1.0; (width * height) as usize];
        for (y, row) in rows.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                let idx = y * width as usize + x;
                if c <= 0.0 {
                    physical[idx] = WALL;
                } else {
                    cost[idx] = c;
                }
            }
        }

        self.width = width;
        self.height = height;
        self.gradient = physical.clone();
        self.physical = physical;
        self.cost = cost;
        self.standard_costs = false;
        self.goals.clear();
        self.flee_cache = None;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.index(cell).map_or(true, |i| self.physical[i] == WALL)
    }

    #[inline]
    #[must_use]
    pub fn cost_at(&self, cell: Cell) -> f32 {
        self.index(cell).map_or(1.0, |i| self.cost[i])
    }

    /// Current gradient value at `cell`; `WALL` for out-of-bounds cells.
    #[inline]
    #[must_use]
    pub fn gradient_at(&self, cell: Cell) -> f32 {
        self.index(cell).map_or(WALL, |i| self.gradient[i])
    }

    /// Whether a diagonal move from `c` in direction `d` is disallowed by
    /// the blocking-requirement corner-cutting rule, evaluated against the
    /// current gradient buffer.
    pub(crate) fn diagonal_blocked(&self, c: Cell, d: Direction) -> bool {
        corner_blocked(
            &self.gradient,
            self.width,
            self.height,
            self.blocking_requirement,
            c,
            d,
        )
    }

    /// Runs `f` with `measurement` substituted for the field's own for the
    /// duration of the call, then restores it. Used by the attack-path
    /// extractor's pass A, which needs integer-grid (Chebyshev) distances
    /// even when the field is configured for Euclidean.
    pub(crate) fn with_measurement<T>(&mut self, measurement: Measurement, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.measurement;
        self.measurement = measurement;
        let out = f(self);
        self.measurement = saved;
        out
    }

    /// Records `cell` as a scan goal (`gradient = 0`). Silently ignored if
    /// `cell` is out of bounds or a wall.
    pub fn set_goal(&mut self, cell: Cell) {
        if let Some(idx) = self.index(cell) {
            if self.physical[idx] != WALL {
                self.goals.push(cell);
                self.gradient[idx] = GOAL;
            }
        }
    }

    pub fn set_goals(&mut self, cells: impl IntoIterator<Item = Cell>) {
        for c in cells {
            self.set_goal(c);
        }
    }

    pub fn clear_goals(&mut self) {
        self.goals.clear();
    }

    #[inline]
    #[must_use]
    pub fn goals(&self) -> &[Cell] {
        &self.goals
    }

    /// Copies the physical map into the gradient map verbatim, discarding
    /// any in-progress wave. Does not clear the goal list.
    pub fn reset_map(&mut self) {
        self.gradient.clone_from(&self.physical);
    }

    /// [`DistanceField::reset_map`] plus [`DistanceField::clear_goals`].
    pub fn reset(&mut self) {
        self.reset_map();
        self.clear_goals();
    }

    fn mark_impassable(&mut self, impassable: Option<&[Cell]>) -> Vec<(usize, f32)> {
        let mut originals = Vec::new();
        if let Some(cells) = impassable {
            for &c in cells {
                if let Some(idx) = self.index(c) {
                    originals.push((idx, self.gradient[idx]));
                    self.gradient[idx] = WALL;
                }
            }
        }
        originals
    }

    fn restore_originals(&mut self, originals: &[(usize, f32)]) {
        for &(idx, val) in originals {
            self.gradient[idx] = val;
        }
    }

    fn restore_physical(&mut self, impassable: Option<&[Cell]>) {
        if let Some(cells) = impassable {
            for &c in cells {
                if let Some(idx) = self.index(c) {
                    self.gradient[idx] = self.physical[idx];
                }
            }
        }
    }

    /// The wave expansion shared by every scan variant.
    ///
    /// `start_for_standard_exit`, when `Some` and `standard_costs` is true,
    /// makes the wave stop and return as soon as that cell is assigned a
    /// value. When `standard_costs` is false this short-circuit never
    /// fires, *even if* `start` is supplied: a caller who passes a
    /// non-uniform cost map and expects early termination will instead
    /// observe a full scan to exhaustion. This asymmetry is intentional,
    /// not a bug, see `DESIGN.md`.
    ///
    /// `on_assign` is consulted on every newly assigned cell in addition to
    /// the standard-costs exit; returning `true` stops the wave and
    /// surfaces that cell, independent of `start_for_standard_exit`. Used
    /// by [`DistanceField::find_nearest`] to stop at the first target
    /// found.
    fn expand_wave<F: FnMut(Cell) -> bool>(
        &mut self,
        start_for_standard_exit: Option<Cell>,
        limit: Option<u32>,
        nonzero_optimum: bool,
        window: Option<(Cell, u32)>,
        mut on_assign: F,
    ) -> Option<Cell> {
        let width = self.width;
        let height = self.height;
        let blocking_requirement = self.blocking_requirement;
        let standard_costs = self.standard_costs;
        let measurement = self.measurement;
        let directions = measurement.directions().to_vec();
        let cost = self.cost.clone();

        let mut frontier = if nonzero_optimum {
            lowest_value_cells(&self.gradient, width, height, window)
        } else {
            self.goals.clone()
        };

        let mut iterations: u32 = 0;
        loop {
            let mut next = Vec::new();
            let mut changed = false;

            for c in &frontier {
                let idx = (c.y() * width + c.x()) as usize;
                let dist = self.gradient[idx];
                for &d in &directions {
                    let Some(n) = c.translate(d) else {
                        continue;
                    };
                    if !n.within(width, height) {
                        continue;
                    }
                    if d.is_diagonal()
                        && corner_blocked(&self.gradient, width, height, blocking_requirement, *c, d)
                    {
                        continue;
                    }
                    let ni = (n.y() * width + n.x()) as usize;
                    if self.gradient[ni] > FLOOR {
                        continue;
                    }
                    let step = measurement.heuristic(d);
                    if step.is_nan() {
                        continue;
                    }
                    let new_val = dist + step * cost[ni];
                    if new_val < self.gradient[ni] {
                        self.gradient[ni] = new_val;
                        next.push(n);
                        changed = true;

                        if let Some(s) = start_for_standard_exit {
                            if standard_costs && n == s {
                                return Some(n);
                            }
                        }
                        if on_assign(n) {
                            return Some(n);
                        }
                    }
                }
            }

            frontier = next;
            iterations += 1;
            if let Some(limit) = limit {
                if iterations >= limit {
                    break;
                }
            }
            if !changed {
                break;
            }
        }
        None
    }

    /// Runs a full wave scan in place. When `start` is given and
    /// `standard_costs` is true, the scan stops as soon as `start` is
    /// first reached. Leaves unreached passable cells at `FLOOR`; use
    /// [`DistanceField::scan`] instead if you want unreached cells
    /// scrubbed to `DARK`.
    pub fn scan_from(
        &mut self,
        start: Option<Cell>,
        impassable: Option<&[Cell]>,
        nonzero_optimum: bool,
    ) -> GridFlowResult<()> {
        self.require_initialized()?;
        let originals = self.mark_impassable(impassable);
        let early = self
            .expand_wave(start, None, nonzero_optimum, None, |_| false)
            .is_some();
        if early {
            self.restore_originals(&originals);
        } else {
            self.restore_physical(impassable);
        }
        Ok(())
    }

    /// As [`DistanceField::scan_from`], but caps the wave at `limit`
    /// iterations. When `start` is given and `nonzero_optimum` is true, the
    /// initial lowest-value search is restricted to the `(2*limit+1)^2`
    /// window centered on `start`.
    pub fn partial_scan_from(
        &mut self,
        start: Option<Cell>,
        limit: u32,
        impassable: Option<&[Cell]>,
        nonzero_optimum: bool,
    ) -> GridFlowResult<()> {
        self.require_initialized()?;
        let originals = self.mark_impassable(impassable);
        let window = if nonzero_optimum {
            start.map(|s| (s, limit))
        } else {
            None
        };
        let early = self
            .expand_wave(start, Some(limit), nonzero_optimum, window, |_| false)
            .is_some();
        if early {
            self.restore_originals(&originals);
        } else {
            self.restore_physical(impassable);
        }
        Ok(())
    }

    fn scrub_floor_to_dark(&mut self) {
        for v in self.gradient.iter_mut() {
            if *v == FLOOR {
                *v = DARK;
            }
        }
    }

    fn export_grid(&self) -> Vec<Vec<f32>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.gradient[(y * self.width + x) as usize])
                    .collect()
            })
            .collect()
    }

    /// Full scan from the goal list, scrubbing unreached passable cells to
    /// `DARK` and returning the resulting grid.
    pub fn scan(&mut self, impassable: Option<&[Cell]>) -> GridFlowResult<Vec<Vec<f32>>> {
        self.scan_from(None, impassable, false)?;
        self.scrub_floor_to_dark();
        Ok(self.export_grid())
    }

    /// As [`DistanceField::scan`], but caps the wave at `limit` iterations.
    pub fn partial_scan(
        &mut self,
        limit: u32,
        impassable: Option<&[Cell]>,
    ) -> GridFlowResult<Vec<Vec<f32>>> {
        self.partial_scan_from(None, limit, impassable, false)?;
        self.scrub_floor_to_dark();
        Ok(self.export_grid())
    }

    fn is_wall_or_oob(&self, cell: Cell) -> bool {
        self.index(cell).map_or(true, |i| self.physical[i] == WALL)
    }

    fn jitter_within_sixth(&self, start: Cell, rng: &mut impl Rng) -> Cell {
        let rx = (self.width / 6).max(1);
        let ry = (self.height / 6).max(1);
        let dx = rng.bounded((2 * rx + 1) as u64) as i64 - rx as i64;
        let dy = rng.bounded((2 * ry + 1) as u64) as i64 - ry as i64;
        let nx = (start.x() as i64 + dx).clamp(0, self.width as i64 - 1) as u32;
        let ny = (start.y() as i64 + dy).clamp(0, self.height as i64 - 1) as u32;
        Cell::new(nx, ny)
    }

    /// Treats `start` as the sole goal (jittering it within a sixth of the
    /// map if it sits on a wall) and runs a standard wave, returning the
    /// first of `targets` discovered during expansion, or `None` if the
    /// wave exhausts without finding one.
    pub fn find_nearest(&mut self, start: Cell, targets: &[Cell], rng: &mut impl Rng) -> Option<Cell> {
        if !self.is_initialized() {
            return None;
        }
        let origin = if self.is_wall_or_oob(start) {
            self.jitter_within_sixth(start, rng)
        } else {
            start
        };
        if targets.contains(&origin) {
            return Some(origin);
        }

        self.clear_goals();
        self.set_goal(origin);
        let target_set: fxhash::FxHashSet<Cell> = targets.iter().copied().collect();
        self.expand_wave(None, None, false, None, move |c| target_set.contains(&c))
    }

    /// Repeats [`DistanceField::find_nearest`] up to `limit` times,
    /// resetting the gradient between draws and excluding cells already
    /// found, stopping early once `targets` is exhausted or no further
    /// target is reachable.
    pub fn find_nearest_multiple(
        &mut self,
        start: Cell,
        limit: usize,
        targets: &[Cell],
        rng: &mut impl Rng,
    ) -> VecDeque<Cell> {
        let mut found = VecDeque::new();
        let mut remaining: Vec<Cell> = targets.to_vec();
        for _ in 0..limit {
            if remaining.is_empty() {
                break;
            }
            self.reset_map();
            match self.find_nearest(start, &remaining, rng) {
                Some(c) => {
                    found.push_back(c);
                    remaining.retain(|&t| t != c);
                }
                None => break,
            }
        }
        found
    }

    /// `partial_scan(radius)` with `starts` as goals, collecting every cell
    /// whose resulting gradient is finite.
    pub fn flood_fill(&mut self, radius: u32, starts: &[Cell]) -> FxHashMap<Cell, f32> {
        self.reset_map();
        self.clear_goals();
        self.set_goals(starts.iter().copied());
        let _ = self.partial_scan_from(None, radius, None, false);

        let mut out = FxHashMap::default();
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = (y * self.width + x) as usize;
                let v = self.gradient[idx];
                if v < FLOOR {
                    out.insert(Cell::new(x, y), v);
                }
            }
        }
        out
    }

    /// Paints the `s x s` footprint blocks a large mover can't fit into as
    /// walls on a private clone, leaving `self` untouched. A goal cell is
    /// kept only if its own `s x s` footprint contains no physical wall.
    pub(crate) fn clone_for_mover(&self, mover_size: u32) -> Self {
        if mover_size <= 1 {
            return self.clone();
        }
        let mut clone = self.clone();
        let s = mover_size;
        for y in 0..clone.height {
            for x in 0..clone.width {
                if x < s - 1 || y < s - 1 {
                    continue;
                }
                let idx = (y * clone.width + x) as usize;
                if clone.gradient[idx] <= FLOOR {
                    continue;
                }
                for by in (y + 1 - s)..=y {
                    for bx in (x + 1 - s)..=x {
                        let bidx = (by * clone.width + bx) as usize;
                        clone.gradient[bidx] = WALL;
                    }
                }
            }
        }
        let goals = std::mem::take(&mut clone.goals);
        clone.goals = goals.into_iter().filter(|&g| !footprint_has_wall(&clone, g, s)).collect();
        clone
    }

    /// A small ASCII dump of the current gradient, used only by this
    /// crate's own tests to eyeball a scan result at a glance.
    #[must_use]
    pub fn debug_grid(&self) -> String {
        let mut s = String::new();
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let v = self.gradient[(y * self.width + x) as usize];
                let ch = if v == WALL {
                    '#'
                } else if v == DARK {
                    '?'
                } else if v == FLOOR {
                    '.'
                } else if v == GOAL {
                    'G'
                } else {
                    '+'
                };
                s.push(ch);
            }
            s.push('\n');
        }
        s
    }
}

fn footprint_has_wall(field: &DistanceField, max_corner: Cell, s: u32) -> bool {
    if max_corner.x() + 1 < s || max_corner.y() + 1 < s {
        return true;
    }
    for y in (max_corner.y() + 1 - s)..=max_corner.y() {
        for x in (max_corner.x() + 1 - s)..=max_corner.x() {
            if field.is_wall(Cell::new(x, y)) {
                return true;
            }
        }
    }
    false
}

fn corner_blocked(
    gradient: &[f32],
    width: u32,
    height: u32,
    blocking_requirement: u8,
    c: Cell,
    d: Direction,
) -> bool {
    if blocking_requirement == 0 {
        return false;
    }
    let (dx, dy) = d.delta();
    let k = flank_blocked(gradient, width, height, c.x() as i64 + dx as i64, c.y() as i64) as u32
        + flank_blocked(gradient, width, height, c.x() as i64, c.y() as i64 + dy as i64) as u32;
    k >= blocking_requirement as u32
}

fn flank_blocked(gradient: &[f32], width: u32, height: u32, x: i64, y: i64) -> bool {
    if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
        return true;
    }
    let idx = (y as u32 * width + x as u32) as usize;
    gradient[idx] > FLOOR
}

fn lowest_value_cells(
    gradient: &[f32],
    width: u32,
    height: u32,
    window: Option<(Cell, u32)>,
) -> Vec<Cell> {
    let (x0, x1, y0, y1) = match window {
        Some((s, l)) => (
            s.x().saturating_sub(l),
            (s.x() + l).min(width.saturating_sub(1)),
            s.y().saturating_sub(l),
            (s.y() + l).min(height.saturating_sub(1)),
        ),
        None => (0, width.saturating_sub(1), 0, height.saturating_sub(1)),
    };

    let mut min = f32::INFINITY;
    let mut cells = Vec::new();
    if width == 0 || height == 0 {
        return cells;
    }
    for y in y0..=y1 {
        for x in x0..=x1 {
            let v = gradient[(y * width + x) as usize];
            if v < FLOOR {
                if v < min {
                    min = v;
                    cells.clear();
                    cells.push(Cell::new(x, y));
                } else if v == min {
                    cells.push(Cell::new(x, y));
                }
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(rows: &[&str]) -> Vec<Vec<char>> {
        rows.iter().map(|r| r.chars().collect()).collect()
    }

    #[test]
    fn bare_room_manhattan_gradient_is_l1_distance() {
        let mut field = DistanceField::new(Measurement::Manhattan);
        field.initialize(&room(&[".....", ".....", ".....", ".....", "....."]), '#');
        field.set_goal(Cell::new(0, 0));
        field.scan_from(None, None, false).unwrap();
        for y in 0..5u32 {
            for x in 0..5u32 {
                assert_eq!(field.gradient_at(Cell::new(x, y)), (x + y) as f32);
            }
        }
    }

    #[test]
    fn corner_cutting_toggle() {
        let rows = room(&["..#", "...", "#.."]);
        let mut field = DistanceField::new(Measurement::Chebyshev);
        field.initialize(&rows, '#');
        field.set_goal(Cell::new(2, 2));
        field.set_blocking_requirement(2);
        field.scan_from(None, None, false).unwrap();
        // (1,1) -> (2,2): only one flanking wall is present (the #s flank
        // two different diagonal moves), so requirement=2 must allow it.
        assert!(field.gradient_at(Cell::new(1, 1)) < FLOOR);

        field.reset();
        field.set_goal(Cell::new(2, 2));
        field.set_blocking_requirement(1);
        field.scan_from(None, None, false).unwrap();
        assert_eq!(field.gradient_at(Cell::new(1, 1)), FLOOR.min(field.gradient_at(Cell::new(1, 1))));
    }

    #[test]
    fn costed_traversal_weights_by_entry_cost() {
        let mut field = DistanceField::new(Measurement::Manhattan);
        field
            .initialize_cost(&[vec![1.0, 5.0, 1.0]])
            .unwrap();
        field.set_goal(Cell::new(2, 0));
        field.scan_from(None, None, false).unwrap();
        assert_eq!(field.gradient_at(Cell::new(2, 0)), 0.0);
        assert_eq!(field.gradient_at(Cell::new(1, 0)), 5.0);
        assert_eq!(field.gradient_at(Cell::new(0, 0)), 6.0);
        assert!(!field.standard_costs());
    }

    #[test]
    fn reset_map_is_idempotent_given_same_goals() {
        let mut field = DistanceField::new(Measurement::Chebyshev);
        field.initialize(&room(&["....", "....", "...."]), '#');
        field.set_goal(Cell::new(0, 0));
        field.scan_from(None, None, false).unwrap();
        let first = field.export_grid();
        field.reset_map();
        field.set_goal(Cell::new(0, 0));
        field.scan_from(None, None, false).unwrap();
        assert_eq!(field.export_grid(), first);
    }

    #[test]
    fn scan_scrubs_unreachable_floor_to_dark() {
        let mut field = DistanceField::new(Measurement::Manhattan);
        field.initialize(&room(&[".#.", ".#.", ".#."]), '#');
        field.set_goal(Cell::new(0, 0));
        let grid = field.scan(None).unwrap();
        assert_eq!(grid[0][2], DARK);
    }

    #[test]
    fn shape_mismatch_on_reinitialize_cost() {
        let mut field = DistanceField::new(Measurement::Manhattan);
        field.initialize(&room(&["..", ".."]), '#');
        let err = field.initialize_cost(&[vec![1.0, 1.0, 1.0]]).unwrap_err();
        assert_eq!(
            err,
            GridFlowError::ShapeMismatch {
                expected: (2, 2),
                found: (3, 1)
            }
        );
    }

    #[test]
    fn not_initialized_scan_fails() {
        let mut field = DistanceField::new(Measurement::Manhattan);
        assert_eq!(
            field.scan_from(None, None, false).unwrap_err(),
            GridFlowError::NotInitialized
        );
    }
}
