use std::collections::VecDeque;

use fxhash::{FxHashMap, FxHashSet};

use crate::los::LineOfSight;
use crate::measurement::Measurement;
use crate::rng::shuffle_directions;
use crate::technique::Technique;
use crate::{Cell, Direction};

use super::distance_field::DistanceField;
use super::sentinels::{DARK, FLOOR, GOAL};

const FRUSTRATION_LIMIT: u32 = 500;

/// Result of [`DistanceField::find_attack_path`].
#[derive(Debug, Clone, Default)]
pub struct AttackPath {
    pub path: VecDeque<Cell>,
    pub cut_short: bool,
}

/// Result of [`DistanceField::find_flee_path`].
#[derive(Debug, Clone, Default)]
pub struct FleePath {
    pub path: VecDeque<Cell>,
    pub cut_short: bool,
}

/// Result of [`DistanceField::find_technique_path`].
#[derive(Debug, Clone, Default)]
pub struct TechniquePlacement {
    pub path: VecDeque<Cell>,
    pub cut_short: bool,
    /// The impact center the mover should aim the technique at once it
    /// reaches the path's endpoint, if any placement was found.
    pub impact_center: Option<Cell>,
}

fn to_cell_set(cells: Option<&[Cell]>) -> FxHashSet<Cell> {
    cells.map(|c| c.iter().copied().collect()).unwrap_or_default()
}

/// The descent shared by every path extractor: walk `field.gradient`
/// downhill from `start` using a direction order shuffled once per call
/// and reused at every step, per the direction-shuffle policy.
///
/// Returns the path (excluding `start`) and whether it was cut short for
/// lack of a downhill neighbour. `stop_on_plateau` additionally halts the
/// walk if the cell the mover just left is no better than the candidate
/// next cell, which `find_flee_path` uses to avoid oscillating in a flat
/// region of the safety field.
fn greedy_descent(
    field: &DistanceField,
    start: Cell,
    length: u32,
    impassable: &FxHashSet<Cell>,
    goal_count: usize,
    stop_on_plateau: bool,
) -> (VecDeque<Cell>, bool) {
    let mut directions: Vec<Direction> = field.measurement().directions().to_vec();
    shuffle_directions(&mut directions, start.encode(), goal_count);
    directions.push(Direction::None);

    let width = field.width();
    let height = field.height();

    let mut path = VecDeque::new();
    let mut current = start;
    let mut previous: Option<Cell> = None;
    let mut accumulated = 0.0f32;

    loop {
        let current_val = field.gradient_at(current);
        if current_val == GOAL {
            return (path, false);
        }
        if accumulated > length as f32 - 1.0 {
            return (path, false);
        }

        let candidate = |allow_revisit: bool| -> Option<(Direction, Cell, f32)> {
            for &d in &directions {
                if d == Direction::None {
                    break;
                }
                let Some(n) = current.translate(d) else {
                    continue;
                };
                if !n.within(width, height) || impassable.contains(&n) {
                    continue;
                }
                if d.is_diagonal() && field.diagonal_blocked(current, d) {
                    continue;
                }
                let nv = field.gradient_at(n);
                if nv >= current_val {
                    continue;
                }
                if !allow_revisit && path.iter().any(|&c| c == n) {
                    continue;
                }
                return Some((d, n, nv));
            }
            None
        };

        let chosen = candidate(false).or_else(|| candidate(true));
        let Some((direction, next, next_val)) = chosen else {
            return (path, true);
        };

        if stop_on_plateau {
            if let Some(p) = previous {
                if field.gradient_at(p) <= next_val {
                    return (path, false);
                }
            }
        }

        accumulated += field.measurement().heuristic(direction) * field.cost_at(next);
        previous = Some(current);
        path.push_back(next);
        current = next;
    }
}

/// Runs `descend` and, if it succeeds with an endpoint in `only_passable`,
/// blocks that cell and retries from scratch, up to a bounded number of
/// restarts, per the frustration-counter rule shared by every extractor.
fn with_frustration(
    only_passable: &FxHashSet<Cell>,
    mut impassable: FxHashSet<Cell>,
    mut descend: impl FnMut(&FxHashSet<Cell>) -> (VecDeque<Cell>, bool),
) -> (VecDeque<Cell>, bool) {
    for _ in 0..FRUSTRATION_LIMIT {
        let (path, cut_short) = descend(&impassable);
        match path.back() {
            Some(&end) if !cut_short && only_passable.contains(&end) => {
                impassable.insert(end);
                continue;
            }
            _ => return (path, cut_short),
        }
    }
    (VecDeque::new(), true)
}

impl DistanceField {
    /// Sets `targets` as goals, scans (fully if `scan_limit <= 0` or
    /// `scan_limit < length`, otherwise as a bounded partial scan), then
    /// greedily descends from `start`.
    pub fn find_path(
        &mut self,
        length: u32,
        scan_limit: i64,
        impassable: Option<&[Cell]>,
        only_passable: Option<&[Cell]>,
        start: Cell,
        targets: &[Cell],
    ) -> VecDeque<Cell> {
        self.reset();
        self.set_goals(targets.iter().copied());

        if scan_limit <= 0 || (scan_limit as u32) < length {
            let _ = self.scan_from(None, impassable, false);
        } else {
            let _ = self.partial_scan_from(None, scan_limit as u32, impassable, false);
        }

        let only_passable = to_cell_set(only_passable);
        let base_impassable = to_cell_set(impassable);
        let (path, _) = with_frustration(&only_passable, base_impassable, |imp| {
            greedy_descent(self, start, length, imp, targets.len(), false)
        });
        path
    }

    /// Re-runs the greedy descent from `start` over the gradient left by
    /// the most recent scan, without re-scanning.
    pub fn find_path_pre_scanned(
        &mut self,
        start: Cell,
        length: u32,
        impassable: Option<&[Cell]>,
        only_passable: Option<&[Cell]>,
    ) -> VecDeque<Cell> {
        let only_passable = to_cell_set(only_passable);
        let base_impassable = to_cell_set(impassable);
        let goal_count = self.goals().len();
        let (path, _) = with_frustration(&only_passable, base_impassable, |imp| {
            greedy_descent(self, start, length, imp, goal_count, false)
        });
        path
    }

    /// Two-pass attack-range path: pass A finds the integer-grid distance
    /// from any target, pass B turns every cell within `[min_range,
    /// max_range]` with a line of sight to a target into a goal, and the
    /// descent follows that second gradient.
    pub fn find_attack_path(
        &mut self,
        length: u32,
        min_range: u32,
        max_range: u32,
        los: Option<&dyn LineOfSight>,
        impassable: Option<&[Cell]>,
        only_passable: Option<&[Cell]>,
        start: Cell,
        targets: &[Cell],
    ) -> AttackPath {
        self.reset();
        self.set_goals(targets.iter().copied());
        let pass_a = self.with_measurement(Measurement::Chebyshev, |field| {
            let _ = field.scan_from(None, impassable, false);
            for v in field.gradient.iter_mut() {
                if *v == FLOOR {
                    *v = DARK;
                }
            }
            field.gradient.clone()
        });
        self.reset();

        let width = self.width();
        let height = self.height();
        let mut in_range_goals = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let c = Cell::new(x, y);
                if self.is_wall(c) {
                    continue;
                }
                let idx = (y * width + x) as usize;
                let dist = pass_a[idx];
                let in_range = dist >= min_range as f32 && dist <= max_range as f32;
                let sighted = match los {
                    Some(los) => targets.iter().any(|&t| los.is_reachable(c, t)),
                    None => true,
                };
                if in_range && sighted {
                    in_range_goals.push(c);
                }
            }
        }
        self.set_goals(in_range_goals);
        let _ = self.scan_from(None, impassable, false);

        let only_passable = to_cell_set(only_passable);
        let base_impassable = to_cell_set(impassable);
        let (path, cut_short) = with_frustration(&only_passable, base_impassable, |imp| {
            greedy_descent(self, start, length, imp, targets.len(), false)
        });
        AttackPath { path, cut_short }
    }

    /// Scans away from `fear_sources`, inverts the result so deep valleys
    /// sit far from danger, and descends toward the nearest valley. Caches
    /// the whole computation, reusing it verbatim on a byte-equal repeat
    /// call.
    pub fn find_flee_path(
        &mut self,
        length: u32,
        scan_limit: i64,
        prefer_longer_paths: f32,
        impassable: Option<&[Cell]>,
        only_passable: Option<&[Cell]>,
        start: Cell,
        fear_sources: &[Cell],
    ) -> FleePath {
        let impassable_vec: Vec<Cell> = impassable.map(|c| c.to_vec()).unwrap_or_default();
        let prefer_bits = prefer_longer_paths.to_bits();
        let mover_size: u32 = 1;

        let reuse = self.flee_cache.as_ref().is_some_and(|c| {
            c.fear_sources == fear_sources
                && c.impassable == impassable_vec
                && c.prefer_longer_paths_bits == prefer_bits
                && c.mover_size == mover_size
        });

        let flee_gradient = if reuse {
            self.clear_goals();
            self.flee_cache.as_ref().unwrap().gradient.clone()
        } else {
            self.reset();
            self.set_goals(fear_sources.iter().copied());
            if scan_limit <= 0 || (scan_limit as u32) < length {
                let _ = self.scan_from(None, impassable, false);
            } else {
                let _ = self.partial_scan_from(None, scan_limit as u32, impassable, false);
            }
            for v in self.gradient.iter_mut() {
                if *v < FLOOR {
                    *v *= -prefer_longer_paths;
                }
            }
            let _ = self.scan_from(Some(start), impassable, true);

            let gradient = self.gradient.clone();
            self.flee_cache = Some(super::distance_field::FleeCache {
                fear_sources: fear_sources.to_vec(),
                impassable: impassable_vec,
                prefer_longer_paths_bits: prefer_bits,
                mover_size,
                gradient: gradient.clone(),
            });
            gradient
        };
        self.gradient = flee_gradient;

        let only_passable = to_cell_set(only_passable);
        let base_impassable = to_cell_set(impassable);
        let (path, cut_short) = with_frustration(&only_passable, base_impassable, |imp| {
            greedy_descent(self, start, length, imp, fear_sources.len(), true)
        });
        FleePath { path, cut_short }
    }

    /// Finds a standing cell for `tech` that threatens the most targets
    /// while reachable within `move_length`, and descends toward it.
    pub fn find_technique_path(
        &mut self,
        move_length: u32,
        tech: &mut dyn Technique,
        los: &dyn LineOfSight,
        impassable: Option<&[Cell]>,
        allies: &[Cell],
        start: Cell,
        targets: &[Cell],
    ) -> TechniquePlacement {
        tech.set_map(self);

        self.reset();
        self.set_goal(start);
        let _ = self.partial_scan_from(None, 2 * move_length, impassable, false);
        let reach_from_start = self.gradient.clone();

        self.reset();
        self.set_goals(targets.iter().copied());
        let pass_a = self.with_measurement(Measurement::Chebyshev, |field| {
            let _ = field.scan_from(None, impassable, false);
            field.gradient.clone()
        });
        self.reset();

        let width = self.width();
        let height = self.height();
        let min_range = tech.min_range() as f32;
        let max_range = tech.max_range() as f32;

        let mut target_map: FxHashMap<Cell, Cell> = FxHashMap::default();
        let mut worth_map: FxHashMap<Cell, usize> = FxHashMap::default();
        let mut second_pass_goals: Vec<Cell> = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let c = Cell::new(x, y);
                let idx = (y * width + x) as usize;
                if reach_from_start[idx] >= FLOOR {
                    continue;
                }
                let dist = pass_a[idx];
                if dist < min_range || dist > max_range {
                    continue;
                }
                if !targets.iter().any(|&t| los.is_reachable(c, t)) {
                    continue;
                }

                let locations = tech.ideal_locations(c, targets, allies);
                let Some(max_len) = locations.values().map(Vec::len).max() else {
                    continue;
                };
                let mut ties = locations.iter().filter(|(_, v)| v.len() == max_len);
                if let Some((impact, affected)) = ties.next() {
                    target_map.insert(c, *impact);
                    worth_map.insert(c, affected.len());
                }
                let tie_count = locations.values().filter(|v| v.len() == max_len).count();
                for _ in 0..tie_count {
                    second_pass_goals.push(c);
                }
            }
        }

        let reachable_max_worth = second_pass_goals
            .iter()
            .copied()
            .filter(|&g| self.index(g).is_some_and(|i| reach_from_start[i] <= move_length as f32))
            .filter_map(|g| worth_map.get(&g).copied())
            .max()
            .unwrap_or(0);

        let final_goals: Vec<Cell> = second_pass_goals
            .into_iter()
            .filter(|g| {
                self.index(*g).is_some_and(|i| reach_from_start[i] <= move_length as f32)
                    && worth_map.get(g).copied().unwrap_or(0) == reachable_max_worth
            })
            .collect();

        self.reset();
        self.set_goals(final_goals.iter().copied());
        let _ = self.scan_from(None, impassable, false);

        let only_passable: FxHashSet<Cell> = allies.iter().copied().collect();
        let base_impassable = to_cell_set(impassable);
        let (path, cut_short) = with_frustration(&only_passable, base_impassable, |imp| {
            greedy_descent(self, start, move_length, imp, final_goals.len(), false)
        });

        let impact_center = path.back().and_then(|c| target_map.get(c).copied());
        TechniquePlacement {
            path,
            cut_short,
            impact_center,
        }
    }
}
