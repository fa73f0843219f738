use std::cmp::Ordering;
use std::hash::BuildHasherDefault;

use fxhash::FxHasher;
use indexmap::IndexMap;

use crate::error::{GridFlowError, GridFlowResult};

use super::connection::{Connection, Edge, NodeId};
use super::node::Node;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// A directed or undirected graph over vertices of type `V`.
///
/// Vertices are addressed by value (`V: Hash + Eq + Clone`) at the public
/// API, but internally resolved to a stable arena index: the "cyclic
/// graph between `Graph`, `Node`, and `Connection`" problem this design
/// sidesteps by never letting a node or edge hold a reference back to the
/// graph: edges address nodes by id only, and the graph alone owns both
/// arenas.
///
/// Each algorithm invocation bumps [`Graph::run_id`]; see
/// [`super::node::Scratch`] for why that avoids resetting every node on
/// every query.
pub struct Graph<V> {
    pub(crate) directed: bool,
    pub(crate) index: FxIndexMap<V, NodeId>,
    pub(crate) nodes: Vec<Option<Node<V>>>,
    pub(crate) connections: Vec<Option<Connection>>,
    pub(crate) run_id: u64,
}

impl<V: std::hash::Hash + Eq + Clone> Graph<V> {
    #[must_use]
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            index: FxIndexMap::default(),
            nodes: Vec::new(),
            connections: Vec::new(),
            run_id: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.connections.iter().filter(|c| c.is_some()).count()
    }

    #[inline]
    pub(crate) fn next_run_id(&mut self) -> u64 {
        self.run_id += 1;
        self.run_id
    }

    #[inline]
    pub(crate) fn node_id(&self, v: &V) -> Option<NodeId> {
        self.index.get(v).copied()
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<V> {
        self.nodes[id].as_ref().expect("tombstoned node id")
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
        self.nodes[id].as_mut().expect("tombstoned node id")
    }

    /// Adds `v` as a vertex if it is not already present. Returns `true` if
    /// it was newly added.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.index.contains_key(&v) {
            return false;
        }
        let id = self.nodes.len();
        self.nodes.push(Some(Node::new(v.clone())));
        self.index.insert(v, id);
        true
    }

    #[inline]
    #[must_use]
    pub fn contains_vertex(&self, v: &V) -> bool {
        self.index.contains_key(v)
    }

    /// Adds an edge `(v, w)` with the given `weight`, overwriting any
    /// existing edge between the same pair. Rejects self-loops and
    /// endpoints that aren't already vertices.
    pub fn add_edge(&mut self, v: &V, w: &V, weight: f32) -> GridFlowResult<Edge<V>> {
        if v == w {
            return Err(GridFlowError::InvalidArgument(
                "self-loops are not permitted".into(),
            ));
        }
        let a = self
            .node_id(v)
            .ok_or_else(|| GridFlowError::InvalidArgument("unknown source vertex".into()))?;
        let b = self
            .node_id(w)
            .ok_or_else(|| GridFlowError::InvalidArgument("unknown target vertex".into()))?;

        if let Some(&cid) = self.node(a).out.get(&b) {
            self.connections[cid].as_mut().unwrap().weight = weight;
            return Ok(Edge::new(v.clone(), w.clone(), weight, self.directed));
        }

        let cid = self.connections.len();
        self.connections.push(Some(Connection { a, b, weight }));

        {
            let na = self.node_mut(a);
            na.out.insert(b, cid);
            na.out_order.push(b);
        }
        if self.directed {
            self.node_mut(b).incoming.push(a);
        } else {
            let nb = self.node_mut(b);
            nb.out.insert(a, cid);
            nb.out_order.push(a);
        }

        Ok(Edge::new(v.clone(), w.clone(), weight, self.directed))
    }

    /// Removes `v` and every edge incident to it (both directions, for a
    /// directed graph).
    pub fn remove_vertex(&mut self, v: &V) {
        let Some(id) = self.node_id(v) else {
            return;
        };

        let mut touched: Vec<NodeId> = Vec::new();
        for slot in self.connections.iter_mut() {
            if let Some(c) = slot {
                if c.a == id || c.b == id {
                    touched.push(if c.a == id { c.b } else { c.a });
                    *slot = None;
                }
            }
        }
        for n in touched {
            if n == id {
                continue;
            }
            let nn = self.node_mut(n);
            nn.out.remove(&id);
            nn.out_order.retain(|&x| x != id);
        }
        if self.directed {
            for nn in self.nodes.iter_mut().flatten() {
                nn.incoming.retain(|&x| x != id);
            }
        }

        self.nodes[id] = None;
        self.index.shift_remove(v);
    }

    #[must_use]
    pub fn get_edge(&self, v: &V, w: &V) -> Option<Edge<V>> {
        let a = self.node_id(v)?;
        let b = self.node_id(w)?;
        let &cid = self.node(a).out.get(&b)?;
        let c = self.connections[cid]?;
        Some(Edge::new(v.clone(), w.clone(), c.weight, self.directed))
    }

    #[inline]
    #[must_use]
    pub fn edge_exists(&self, v: &V, w: &V) -> bool {
        self.get_edge(v, w).is_some()
    }

    /// Vertex values, in current iteration order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.index.keys()
    }

    /// All live edges, in insertion order (undirected edges appear once).
    pub fn edges(&self) -> impl Iterator<Item = Edge<V>> + '_ {
        self.connections.iter().filter_map(move |c| {
            let c = (*c)?;
            let a = &self.nodes[c.a].as_ref()?.vertex;
            let b = &self.nodes[c.b].as_ref()?.vertex;
            Some(Edge::new(a.clone(), b.clone(), c.weight, self.directed))
        })
    }

    pub(crate) fn out_edges(&self, id: NodeId) -> impl Iterator<Item = (NodeId, f32)> + '_ {
        let node = self.node(id);
        node.out_order.iter().filter_map(move |&n| {
            let &cid = node.out.get(&n)?;
            self.connections[cid].map(|c| (n, c.weight))
        })
    }

    /// Reorders vertex iteration (and thus the order downstream algorithms
    /// see them in) by `cmp`.
    pub fn sort_vertices<F: FnMut(&V, &V) -> Ordering>(&mut self, mut cmp: F) {
        self.index.sort_by(|a, _, b, _| cmp(a, b));
    }

    /// Reorders each node's outgoing-edge iteration by `cmp`, applied over
    /// `(neighbor_vertex, weight)` pairs.
    pub fn sort_edges<F: FnMut((&V, f32), (&V, f32)) -> Ordering>(&mut self, mut cmp: F) {
        let vertex_of: Vec<V> = (0..self.nodes.len())
            .map(|i| self.nodes[i].as_ref().map(|n| n.vertex.clone()))
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default();
        if vertex_of.len() != self.nodes.len() {
            return;
        }
        for node_slot in self.nodes.iter_mut().flatten() {
            let connections = &self.connections;
            let vertex_of = &vertex_of;
            node_slot.out_order.sort_by(|&a, &b| {
                let wa = node_slot
                    .out
                    .get(&a)
                    .and_then(|&cid| connections[cid])
                    .map(|c| c.weight)
                    .unwrap_or(0.0);
                let wb = node_slot
                    .out
                    .get(&b)
                    .and_then(|&cid| connections[cid])
                    .map(|c| c.weight)
                    .unwrap_or(0.0);
                cmp((&vertex_of[a], wa), (&vertex_of[b], wb))
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_vertex_reports_novelty() {
        let mut g: Graph<&str> = Graph::new(false);
        assert!(g.add_vertex("a"));
        assert!(!g.add_vertex("a"));
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn self_loop_rejected() {
        let mut g: Graph<&str> = Graph::new(false);
        g.add_vertex("a");
        assert!(g.add_edge(&"a", &"a", 1.0).is_err());
    }

    #[test]
    fn missing_endpoint_rejected() {
        let mut g: Graph<&str> = Graph::new(false);
        g.add_vertex("a");
        assert!(g.add_edge(&"a", &"b", 1.0).is_err());
    }

    #[test]
    fn undirected_edge_visible_from_both_sides() {
        let mut g: Graph<&str> = Graph::new(false);
        g.add_vertex("a");
        g.add_vertex("b");
        g.add_edge(&"a", &"b", 2.5).unwrap();
        assert!(g.edge_exists(&"a", &"b"));
        assert!(g.edge_exists(&"b", &"a"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn directed_edge_one_way() {
        let mut g: Graph<&str> = Graph::new(true);
        g.add_vertex("a");
        g.add_vertex("b");
        g.add_edge(&"a", &"b", 1.0).unwrap();
        assert!(g.edge_exists(&"a", &"b"));
        assert!(!g.edge_exists(&"b", &"a"));
    }

    #[test]
    fn re_adding_edge_overwrites_weight() {
        let mut g: Graph<&str> = Graph::new(false);
        g.add_vertex("a");
        g.add_vertex("b");
        g.add_edge(&"a", &"b", 1.0).unwrap();
        g.add_edge(&"a", &"b", 5.0).unwrap();
        assert_eq!(g.get_edge(&"a", &"b").unwrap().weight, 5.0);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn remove_vertex_drops_incident_edges() {
        let mut g: Graph<&str> = Graph::new(false);
        g.add_vertex("a");
        g.add_vertex("b");
        g.add_vertex("c");
        g.add_edge(&"a", &"b", 1.0).unwrap();
        g.add_edge(&"b", &"c", 1.0).unwrap();
        g.remove_vertex(&"b");
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(!g.contains_vertex(&"b"));
    }
}
