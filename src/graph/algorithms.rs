use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::hash::Hash;

use crate::error::{GridFlowError, GridFlowResult};

use super::connection::NodeId;
use super::graph::Graph;

/// Priority-queue entry for A*/Dijkstra, ordered so [`BinaryHeap`] (a
/// max-heap) pops the *smallest* `estimated_cost` first. Adapted from the
/// classic `evenfurther/pathfinding` `SmallestCostHolder` shape.
struct SmallestCostHolder {
    estimated_cost: f32,
    cost: f32,
    id: NodeId,
}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.cost == other.cost
    }
}
impl Eq for SmallestCostHolder {}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.cost.partial_cmp(&other.cost).unwrap_or(Ordering::Equal))
    }
}

impl<V: Hash + Eq + Clone> Graph<V> {
    /// A* shortest path from `start` to `target`. Pass `None` for
    /// `heuristic` to get plain Dijkstra. Returns an empty path (not an
    /// error) when `target` is unreachable; see [`GridFlowError`] doc
    /// comment for why `NoPath` is not a variant.
    pub fn find_shortest_path<H>(
        &mut self,
        start: &V,
        target: &V,
        heuristic: Option<H>,
    ) -> GridFlowResult<Vec<V>>
    where
        H: Fn(&V, &V) -> f32,
    {
        let start_id = self
            .node_id(start)
            .ok_or_else(|| GridFlowError::InvalidArgument("unknown start vertex".into()))?;
        let target_id = self
            .node_id(target)
            .ok_or_else(|| GridFlowError::InvalidArgument("unknown target vertex".into()))?;

        if start_id == target_id {
            return Ok(vec![start.clone()]);
        }

        let run_id = self.next_run_id();
        let h0 = heuristic.as_ref().map_or(0.0, |f| f(start, target));
        {
            let s = self.node_mut(start_id).scratch_for_run(run_id);
            s.distance = 0.0;
            s.estimate = h0;
            s.seen = true;
        }

        let mut heap = BinaryHeap::new();
        heap.push(SmallestCostHolder {
            estimated_cost: h0,
            cost: 0.0,
            id: start_id,
        });

        while let Some(SmallestCostHolder { cost, id, .. }) = heap.pop() {
            if id == target_id {
                return Ok(self.reconstruct_path(run_id, target_id));
            }
            if cost > self.node(id).scratch.distance {
                continue; // stale heap entry superseded by a better path
            }
            if self.node(id).scratch.visited {
                continue;
            }
            self.node_mut(id).scratch_for_run(run_id).visited = true;

            let out: Vec<(NodeId, f32)> = self.out_edges(id).collect();
            for (neighbor, weight) in out {
                if self.node(neighbor).scratch.last_run_id == run_id
                    && self.node(neighbor).scratch.visited
                {
                    continue;
                }
                let new_distance = cost + weight;
                let neighbor_vertex = self.node(neighbor).vertex.clone();
                let first_touch = self.node(neighbor).scratch.last_run_id != run_id
                    || !self.node(neighbor).scratch.seen;
                let estimate = if first_touch {
                    heuristic.as_ref().map_or(0.0, |f| f(&neighbor_vertex, target))
                } else {
                    self.node(neighbor).scratch.estimate
                };

                let better = {
                    let s = self.node_mut(neighbor).scratch_for_run(run_id);
                    if !s.seen || new_distance < s.distance {
                        s.distance = new_distance;
                        s.prev = Some(id);
                        s.estimate = estimate;
                        s.seen = true;
                        true
                    } else {
                        false
                    }
                };
                if better {
                    heap.push(SmallestCostHolder {
                        estimated_cost: new_distance + estimate,
                        cost: new_distance,
                        id: neighbor,
                    });
                }
            }
        }

        Ok(Vec::new())
    }

    /// The total weight of the shortest path from `start` to `target`, or
    /// `f32::MAX` as the "unreachable" distance sentinel if none exists.
    pub fn find_minimum_distance<H>(
        &mut self,
        start: &V,
        target: &V,
        heuristic: Option<H>,
    ) -> GridFlowResult<f32>
    where
        H: Fn(&V, &V) -> f32,
    {
        let start_id = self
            .node_id(start)
            .ok_or_else(|| GridFlowError::InvalidArgument("unknown start vertex".into()))?;
        let target_id = self
            .node_id(target)
            .ok_or_else(|| GridFlowError::InvalidArgument("unknown target vertex".into()))?;
        if start_id == target_id {
            return Ok(0.0);
        }

        let path = self.find_shortest_path(start, target, heuristic)?;
        if path.is_empty() {
            return Ok(f32::MAX);
        }
        Ok(self.node(target_id).scratch.distance)
    }

    fn reconstruct_path(&self, run_id: u64, target_id: NodeId) -> Vec<V> {
        let mut path = vec![self.node(target_id).vertex.clone()];
        let mut cur = target_id;
        while self.node(cur).scratch.last_run_id == run_id {
            match self.node(cur).scratch.prev {
                Some(p) => {
                    path.push(self.node(p).vertex.clone());
                    cur = p;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Explores from `v` breadth-first, stopping once `max_vertices` have
    /// been visited or `max_depth` would be exceeded. Returns a new graph
    /// containing the visited vertices and the tree edges by which each was
    /// first reached.
    pub fn breadth_first_search(
        &mut self,
        v: &V,
        max_vertices: usize,
        max_depth: u32,
    ) -> GridFlowResult<Graph<V>> {
        self.traverse(v, max_vertices, max_depth, false)
    }

    /// As [`Graph::breadth_first_search`], but explores depth-first (LIFO
    /// frontier).
    pub fn depth_first_search(
        &mut self,
        v: &V,
        max_vertices: usize,
        max_depth: u32,
    ) -> GridFlowResult<Graph<V>> {
        self.traverse(v, max_vertices, max_depth, true)
    }

    fn traverse(
        &mut self,
        v: &V,
        max_vertices: usize,
        max_depth: u32,
        depth_first: bool,
    ) -> GridFlowResult<Graph<V>> {
        let start_id = self
            .node_id(v)
            .ok_or_else(|| GridFlowError::InvalidArgument("unknown start vertex".into()))?;
        let run_id = self.next_run_id();

        let mut out = Graph::new(self.directed);
        let mut frontier: VecDeque<NodeId> = VecDeque::new();
        frontier.push_back(start_id);
        {
            let s = self.node_mut(start_id).scratch_for_run(run_id);
            s.visited = true;
            s.depth = 0;
        }
        out.add_vertex(self.node(start_id).vertex.clone());

        let mut visited_count = 1usize;
        // Both traversal orders pop from the front: BFS pushes new work to
        // the back (FIFO), DFS pushes it to the front in reverse (so the
        // next pop still yields the first child, mimicking a LIFO stack).
        while let Some(id) = frontier.pop_front() {
            if visited_count >= max_vertices {
                break;
            }
            let depth = self.node(id).scratch.depth;
            if depth >= max_depth {
                continue;
            }
            let vertex = self.node(id).vertex.clone();
            let out_edges: Vec<(NodeId, f32)> = self.out_edges(id).collect();
            let mut newly = Vec::new();
            for (n, w) in out_edges {
                let fresh = self.node(n).scratch.last_run_id != run_id || !self.node(n).scratch.visited;
                if fresh {
                    let s = self.node_mut(n).scratch_for_run(run_id);
                    s.visited = true;
                    s.depth = depth + 1;
                    let nv = self.node(n).vertex.clone();
                    out.add_vertex(nv.clone());
                    out.add_edge(&vertex, &nv, w)?;
                    newly.push(n);
                    visited_count += 1;
                    if visited_count >= max_vertices {
                        break;
                    }
                }
            }
            if depth_first {
                for n in newly.into_iter().rev() {
                    frontier.push_front(n);
                }
            } else {
                for n in newly {
                    frontier.push_back(n);
                }
            }
        }

        Ok(out)
    }

    /// Recursive-DFS topological sort. Returns `false` (without touching
    /// `sorted`'s prior contents beyond what was appended) if a cycle is
    /// found. Cycle detection here is reported as a non-fatal `bool`, not a
    /// `Result`.
    pub fn topological_sort(&mut self, sorted: &mut Vec<V>) -> bool {
        let run_id = self.next_run_id();
        let mut order = Vec::with_capacity(self.vertex_count());
        let ids: Vec<NodeId> = (0..self.nodes.len())
            .filter(|&i| self.nodes[i].is_some())
            .collect();

        for id in ids {
            if self.node(id).scratch.last_run_id == run_id && self.node(id).scratch.visited {
                continue;
            }
            if !self.topo_visit(id, run_id, &mut order) {
                return false;
            }
        }

        order.reverse();
        sorted.extend(order);
        true
    }

    fn topo_visit(&mut self, id: NodeId, run_id: u64, order: &mut Vec<V>) -> bool {
        {
            let s = self.node_mut(id).scratch_for_run(run_id);
            if s.seen {
                return false; // on recursion stack: cycle
            }
            s.seen = true;
        }
        let out: Vec<NodeId> = self.out_edges(id).map(|(n, _)| n).collect();
        for n in out {
            let (last_run, visited) = {
                let s = &self.node(n).scratch;
                (s.last_run_id, s.visited)
            };
            if last_run == run_id && visited {
                continue;
            }
            if !self.topo_visit(n, run_id, order) {
                return false;
            }
        }
        let s = self.node_mut(id).scratch_for_run(run_id);
        s.visited = true;
        order.push(self.node(id).vertex.clone());
        true
    }

    /// Kruskal's algorithm. `min` selects a minimum spanning tree (ascending
    /// edge weight); `false` selects a maximum spanning tree. Union-find
    /// reuses each node's `prev` scratch field as its parent pointer and
    /// `depth` as its rank, with path compression during `find`.
    pub fn kruskals_mst(&mut self, min: bool) -> Graph<V> {
        let run_id = self.next_run_id();
        for id in 0..self.nodes.len() {
            if self.nodes[id].is_some() {
                let s = self.node_mut(id).scratch_for_run(run_id);
                s.prev = Some(id);
                s.depth = 0;
            }
        }

        // Each undirected edge occupies exactly one slot in `connections`
        // (both endpoints' adjacency maps point at the same id), so no
        // dedup is needed here even though the graph may be undirected.
        let mut edges: Vec<(NodeId, NodeId, f32)> = self
            .connections
            .iter()
            .filter_map(|c| c.map(|c| (c.a, c.b, c.weight)))
            .collect();
        if min {
            edges.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));
        } else {
            edges.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));
        }

        let mut out = Graph::new(self.directed);
        for v in self.vertices() {
            out.add_vertex(v.clone());
        }

        for (a, b, w) in edges {
            let ra = self.find_set(a, run_id);
            let rb = self.find_set(b, run_id);
            if ra == rb {
                continue;
            }
            self.union_sets(ra, rb, run_id);
            let va = self.node(a).vertex.clone();
            let vb = self.node(b).vertex.clone();
            out.add_edge(&va, &vb, w).ok();
        }

        out
    }

    fn find_set(&mut self, id: NodeId, run_id: u64) -> NodeId {
        let parent = self.node(id).scratch.prev.unwrap_or(id);
        if parent == id {
            return id;
        }
        let root = self.find_set(parent, run_id);
        self.node_mut(id).scratch_for_run(run_id).prev = Some(root);
        root
    }

    fn union_sets(&mut self, a: NodeId, b: NodeId, run_id: u64) {
        let ra = self.find_set(a, run_id);
        let rb = self.find_set(b, run_id);
        if ra == rb {
            return;
        }
        let rank_a = self.node(ra).scratch.depth;
        let rank_b = self.node(rb).scratch.depth;
        match rank_a.cmp(&rank_b) {
            Ordering::Less => self.node_mut(ra).scratch_for_run(run_id).prev = Some(rb),
            Ordering::Greater => self.node_mut(rb).scratch_for_run(run_id).prev = Some(ra),
            Ordering::Equal => {
                self.node_mut(rb).scratch_for_run(run_id).prev = Some(ra);
                self.node_mut(ra).scratch_for_run(run_id).depth = rank_a + 1;
            }
        }
    }

    /// True iff this graph contains a cycle. For an undirected graph, an
    /// edge back to the immediate parent in the DFS tree does not count.
    pub fn contains_cycle(&mut self) -> bool {
        let run_id = self.next_run_id();
        let ids: Vec<NodeId> = (0..self.nodes.len())
            .filter(|&i| self.nodes[i].is_some())
            .collect();
        for id in ids {
            if self.node(id).scratch.last_run_id == run_id && self.node(id).scratch.visited {
                continue;
            }
            if self.cycle_visit(id, None, run_id) {
                return true;
            }
        }
        false
    }

    fn cycle_visit(&mut self, id: NodeId, parent: Option<NodeId>, run_id: u64) -> bool {
        {
            let s = self.node_mut(id).scratch_for_run(run_id);
            s.seen = true; // on recursion stack
        }
        let out: Vec<NodeId> = self.out_edges(id).map(|(n, _)| n).collect();
        for n in out {
            if !self.directed && Some(n) == parent {
                continue;
            }
            let (last_run, seen, visited) = {
                let s = &self.node(n).scratch;
                (s.last_run_id, s.seen, s.visited)
            };
            if last_run == run_id && seen && !visited {
                return true; // back-edge onto the current stack
            }
            if last_run != run_id || !visited {
                if self.cycle_visit(n, Some(id), run_id) {
                    return true;
                }
            }
        }
        self.node_mut(id).scratch_for_run(run_id).visited = true;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Graph;

    fn manhattan(a: &(i32, i32), b: &(i32, i32)) -> f32 {
        ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as f32
    }

    fn grid_graph(w: i32, h: i32) -> Graph<(i32, i32)> {
        let mut g = Graph::new(false);
        for x in 0..w {
            for y in 0..h {
                g.add_vertex((x, y));
            }
        }
        for x in 0..w {
            for y in 0..h {
                if x + 1 < w {
                    g.add_edge(&(x, y), &(x + 1, y), 1.0).unwrap();
                }
                if y + 1 < h {
                    g.add_edge(&(x, y), &(x, y + 1), 1.0).unwrap();
                }
            }
        }
        g
    }

    #[test]
    fn astar_and_dijkstra_agree_on_weight() {
        let mut g = grid_graph(5, 5);
        let a = g.find_shortest_path(&(0, 0), &(4, 4), Some(manhattan)).unwrap();
        let b = g
            .find_shortest_path(&(0, 0), &(4, 4), None::<fn(&(i32, i32), &(i32, i32)) -> f32>)
            .unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a.len(), 9);
        assert_eq!(*a.first().unwrap(), (0, 0));
        assert_eq!(*a.last().unwrap(), (4, 4));
    }

    #[test]
    fn unreachable_target_returns_empty_path() {
        let mut g: Graph<i32> = Graph::new(false);
        g.add_vertex(1);
        g.add_vertex(2);
        let path = g
            .find_shortest_path(&1, &2, None::<fn(&i32, &i32) -> f32>)
            .unwrap();
        assert!(path.is_empty());
        assert_eq!(
            g.find_minimum_distance(&1, &2, None::<fn(&i32, &i32) -> f32>)
                .unwrap(),
            f32::MAX
        );
    }

    #[test]
    fn bfs_respects_max_vertices() {
        let mut g = grid_graph(3, 3);
        let sub = g.breadth_first_search(&(0, 0), 3, 10).unwrap();
        assert_eq!(sub.vertex_count(), 3);
    }

    #[test]
    fn topological_sort_orders_dag() {
        let mut g: Graph<&str> = Graph::new(true);
        for v in ["a", "b", "c", "d"] {
            g.add_vertex(v);
        }
        g.add_edge(&"a", &"b", 1.0).unwrap();
        g.add_edge(&"a", &"c", 1.0).unwrap();
        g.add_edge(&"b", &"d", 1.0).unwrap();
        g.add_edge(&"c", &"d", 1.0).unwrap();
        let mut sorted = Vec::new();
        assert!(g.topological_sort(&mut sorted));
        let pos = |x: &str| sorted.iter().position(|v| *v == x).unwrap();
        assert!(pos("a") < pos("b"));
        assert!(pos("a") < pos("c"));
        assert!(pos("b") < pos("d"));
        assert!(pos("c") < pos("d"));
    }

    #[test]
    fn topological_sort_detects_cycle() {
        let mut g: Graph<&str> = Graph::new(true);
        for v in ["a", "b", "c"] {
            g.add_vertex(v);
        }
        g.add_edge(&"a", &"b", 1.0).unwrap();
        g.add_edge(&"b", &"c", 1.0).unwrap();
        g.add_edge(&"c", &"a", 1.0).unwrap();
        let mut sorted = Vec::new();
        assert!(!g.topological_sort(&mut sorted));
    }

    #[test]
    fn cycle_detection_undirected_ignores_parent_edge() {
        let mut g: Graph<&str> = Graph::new(false);
        for v in ["a", "b", "c"] {
            g.add_vertex(v);
        }
        g.add_edge(&"a", &"b", 1.0).unwrap();
        g.add_edge(&"b", &"c", 1.0).unwrap();
        assert!(!g.contains_cycle());
        g.add_edge(&"c", &"a", 1.0).unwrap();
        assert!(g.contains_cycle());
    }

    #[test]
    fn kruskal_min_spanning_tree_has_n_minus_one_edges() {
        let mut g = grid_graph(3, 3);
        let mst = g.kruskals_mst(true);
        assert_eq!(mst.vertex_count(), 9);
        assert_eq!(mst.edge_count(), 8);
    }
}
