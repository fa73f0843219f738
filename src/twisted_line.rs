use fxhash::FxHashSet;

use crate::error::GridFlowResult;
use crate::graph::Graph;
use crate::rng::{shuffle_directions, Rng};
use crate::{Cell, CARDINALS};

/// A maze carved over a rectangular grid by randomized-DFS spanning-tree
/// generation, used to produce a single meandering path between two cells
/// rather than a full navigable map.
///
/// The carve itself only ever adds edges, it never has a reason to
/// remove one, so [`TwistedLine::path`] can be called any number of times
/// against the same tree once [`TwistedLine::carve`] has run.
pub struct TwistedLine {
    graph: Graph<Cell>,
    width: u32,
    height: u32,
}

impl TwistedLine {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut graph = Graph::new(false);
        for y in 0..height {
            for x in 0..width {
                graph.add_vertex(Cell::new(x, y));
            }
        }
        Self {
            graph,
            width,
            height,
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

    #[must_use]
    pub fn graph(&self) -> &Graph<Cell> {
        &self.graph
    }

    /// Carves a spanning tree over the grid by randomized DFS: start at a
    /// random cell; from the most-recently-visited cell, try the four
    /// cardinals in a shuffled order and descend into the first unvisited
    /// neighbour found; backtrack when none remain.
    pub fn carve(&mut self, rng: &mut impl Rng) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let start = Cell::new(
            rng.bounded(self.width as u64) as u32,
            rng.bounded(self.height as u64) as u32,
        );

        let mut visited: FxHashSet<Cell> = FxHashSet::default();
        visited.insert(start);
        let mut stack = vec![start];

        while let Some(&c) = stack.last() {
            let mut dirs = CARDINALS;
            shuffle_directions(&mut dirs, c.encode(), stack.len());

            let mut advanced = false;
            for d in dirs {
                let Some(n) = c.translate(d) else {
                    continue;
                };
                if !n.within(self.width, self.height) || visited.contains(&n) {
                    continue;
                }
                self.graph
                    .add_edge(&c, &n, 1.0)
                    .expect("both endpoints are vertices added in TwistedLine::new");
                visited.insert(n);
                stack.push(n);
                advanced = true;
                break;
            }

            if !advanced {
                stack.pop();
            }
        }
    }

    /// The unique path between `from` and `to` through the carved tree
    /// (Dijkstra over equal edge weights; there being only one path in a
    /// tree, any shortest-path search finds it).
    pub fn path(&mut self, from: Cell, to: Cell) -> GridFlowResult<Vec<Cell>> {
        self.graph
            .find_shortest_path(&from, &to, None::<fn(&Cell, &Cell) -> f32>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lcg(u64);
    impl Rng for Lcg {
        fn next_u64(&mut self) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
            self.0
        }
    }

    #[test]
    fn carve_produces_a_spanning_tree() {
        let mut maze = TwistedLine::new(6, 6);
        let mut rng = Lcg(7);
        maze.carve(&mut rng);
        assert_eq!(maze.graph().vertex_count(), 36);
        assert_eq!(maze.graph().edge_count(), 35);
    }

    #[test]
    fn path_connects_any_two_cells() {
        let mut maze = TwistedLine::new(5, 5);
        let mut rng = Lcg(99);
        maze.carve(&mut rng);
        let path = maze.path(Cell::new(0, 0), Cell::new(4, 4)).unwrap();
        assert_eq!(*path.first().unwrap(), Cell::new(0, 0));
        assert_eq!(*path.last().unwrap(), Cell::new(4, 4));
    }

    #[test]
    fn path_to_self_is_a_single_cell() {
        let mut maze = TwistedLine::new(4, 4);
        let mut rng = Lcg(3);
        maze.carve(&mut rng);
        let path = maze.path(Cell::new(2, 2), Cell::new(2, 2)).unwrap();
        assert_eq!(path, vec![Cell::new(2, 2)]);
    }

    #[test]
    fn empty_grid_carves_nothing() {
        let mut maze = TwistedLine::new(0, 0);
        let mut rng = Lcg(1);
        maze.carve(&mut rng);
        assert_eq!(maze.graph().vertex_count(), 0);
    }
}
