use fxhash::FxHashMap;

use crate::{Cell, Direction, Graph, CARDINALS, OUTWARDS};

/// Cost sentinel for a wall cell in the float cost map.
pub const WALL_COST: f32 = -1.0;

/// Default entry cost for a non-wall cell.
pub const DEFAULT_COST: f32 = 1.0;

/// True for characters this crate treats as a wall by default: `#`, `+`,
/// and any Unicode box-drawing glyph (`U+2500..=U+257F`).
#[inline]
#[must_use]
pub fn is_wall_char(c: char) -> bool {
    c == '#' || c == '+' || is_box_drawing(c)
}

#[inline]
fn is_box_drawing(c: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&c)
}

/// A per-cell entry-cost grid, derived from a character map (or built
/// directly from floats), with wall cells tagged [`WALL_COST`].
#[derive(Debug, Clone)]
pub struct CostMap {
    width: u32,
    height: u32,
    costs: Vec<f32>,
}

impl CostMap {
    /// Builds a cost map from a character grid, `rows[y][x]`. `#`, `+`, and
    /// box-drawing characters become walls; everything else costs `1`
    /// unless `overrides` says otherwise. An override entry for `#` also
    /// applies to every box-drawing character, so a single entry can
    /// reclassify a whole family of wall glyphs at once.
    #[must_use]
    pub fn from_chars(rows: &[Vec<char>], overrides: Option<&FxHashMap<char, f32>>) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len() as u32);
        let mut costs = vec![DEFAULT_COST; (width * height) as usize];

        for (y, row) in rows.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                let idx = y * width as usize + x;
                costs[idx] = resolve_cost(c, overrides);
            }
        }

        Self {
            width,
            height,
            costs,
        }
    }

    /// Builds a cost map directly from floats; any non-positive value is
    /// treated as a wall.
    #[must_use]
    pub fn from_costs(width: u32, height: u32, costs: Vec<f32>) -> Self {
        debug_assert_eq!(costs.len(), (width * height) as usize);
        Self {
            width,
            height,
            costs,
        }
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
    fn index(&self, cell: Cell) -> Option<usize> {
        if !cell.within(self.width, self.height) {
            return None;
        }
        Some(cell.y() as usize * self.width as usize + cell.x() as usize)
    }

    /// The entry cost of `cell`, or [`WALL_COST`] if it is out of bounds.
    #[inline]
    #[must_use]
    pub fn cost(&self, cell: Cell) -> f32 {
        self.index(cell).map_or(WALL_COST, |i| self.costs[i])
    }

    #[inline]
    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.cost(cell) <= 0.0
    }

    /// Builds a directed graph over every non-wall cell: an edge runs
    /// `neighbour -> c` with weight `cost(c)`, so the weight always
    /// represents the price of *entering* the target cell, even though the
    /// wall topology itself is symmetric.
    #[must_use]
    pub fn build_graph(&self, diagonals: bool) -> Graph<Cell> {
        let mut graph = Graph::new(true);
        for y in 0..self.height {
            for x in 0..self.width {
                let c = Cell::new(x, y);
                if !self.is_wall(c) {
                    graph.add_vertex(c);
                }
            }
        }

        let directions: &[Direction] = if diagonals { &OUTWARDS } else { &CARDINALS };
        for y in 0..self.height {
            for x in 0..self.width {
                let c = Cell::new(x, y);
                if self.is_wall(c) {
                    continue;
                }
                for &d in directions {
                    let Some(n) = c.translate(d) else {
                        continue;
                    };
                    if !n.within(self.width, self.height) || self.is_wall(n) {
                        continue;
                    }
                    graph.add_edge(&n, &c, self.cost(c)).expect("both endpoints are vertices");
                }
            }
        }

        graph
    }
}

fn resolve_cost(c: char, overrides: Option<&FxHashMap<char, f32>>) -> f32 {
    if let Some(overrides) = overrides {
        if let Some(&cost) = overrides.get(&c) {
            return cost;
        }
        if is_box_drawing(c) {
            if let Some(&cost) = overrides.get(&'#') {
                return cost;
            }
        }
    }
    if is_wall_char(c) {
        WALL_COST
    } else {
        DEFAULT_COST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(s: &[&str]) -> Vec<Vec<char>> {
        s.iter().map(|r| r.chars().collect()).collect()
    }

    #[test]
    fn walls_recognized() {
        let map = CostMap::from_chars(&rows(&["#.+", "..."]), None);
        assert!(map.is_wall(Cell::new(0, 0)));
        assert!(map.is_wall(Cell::new(2, 0)));
        assert!(!map.is_wall(Cell::new(1, 0)));
    }

    #[test]
    fn hash_override_widens_to_box_drawing() {
        let mut overrides = FxHashMap::default();
        overrides.insert('#', 3.0);
        let map = CostMap::from_chars(&rows(&["#\u{2500}."]), Some(&overrides));
        assert_eq!(map.cost(Cell::new(0, 0)), 3.0);
        assert_eq!(map.cost(Cell::new(1, 0)), 3.0);
        assert_eq!(map.cost(Cell::new(2, 0)), DEFAULT_COST);
    }

    #[test]
    fn graph_edge_weight_is_entry_cost_of_target() {
        let mut overrides = FxHashMap::default();
        overrides.insert('~', 5.0);
        let map = CostMap::from_chars(&rows(&[".~"]), Some(&overrides));
        let graph = map.build_graph(false);
        let edge = graph.get_edge(&Cell::new(0, 0), &Cell::new(1, 0)).unwrap();
        assert_eq!(edge.weight, 5.0);
    }

    #[test]
    fn diagonals_toggle_connectivity() {
        let map = CostMap::from_chars(&rows(&["#.", ".#"]), None);
        let no_diag = map.build_graph(false);
        assert!(!no_diag.edge_exists(&Cell::new(1, 0), &Cell::new(0, 1)));
        let diag = map.build_graph(true);
        assert!(diag.edge_exists(&Cell::new(1, 0), &Cell::new(0, 1)));
    }
}
