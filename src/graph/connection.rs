#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

pub(crate) type NodeId = usize;

/// An edge between two vertices, as stored internally by the arena: it
/// addresses endpoints by stable node id, not by vertex value, so it stays
/// cheap to move around scratch collections during a query.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Connection {
    pub(crate) a: NodeId,
    pub(crate) b: NodeId,
    pub(crate) weight: f32,
}

/// A user-facing edge: the two vertex values it connects, plus its weight.
///
/// Directed edges compare `(a, b)` as an ordered pair. Undirected edges
/// compare as an unordered pair: `Edge::new(x, y, w, false) ==
/// Edge::new(y, x, w, false)`, with a hash that agrees.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Edge<V> {
    pub a: V,
    pub b: V,
    pub weight: f32,
    pub(crate) directed: bool,
}

impl<V> Edge<V> {
    pub(crate) fn new(a: V, b: V, weight: f32, directed: bool) -> Self {
        Self {
            a,
            b,
            weight,
            directed,
        }
    }
}

impl<V: PartialEq> PartialEq for Edge<V> {
    fn eq(&self, other: &Self) -> bool {
        if self.weight != other.weight {
            return false;
        }
        if self.directed {
            self.a == other.a && self.b == other.b
        } else {
            (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
        }
    }
}

impl<V: std::hash::Hash> std::hash::Hash for Edge<V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Commutative combine for the undirected case: order-independent so
        // that `(a, b)` and `(b, a)` land in the same bucket.
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;

        let mut ha = DefaultHasher::new();
        self.a.hash(&mut ha);
        let ha = ha.finish();

        let mut hb = DefaultHasher::new();
        self.b.hash(&mut hb);
        let hb = hb.finish();

        if self.directed {
            ha.hash(state);
            hb.hash(state);
        } else {
            (ha ^ hb).hash(state);
        }
    }
}
