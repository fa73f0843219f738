use super::connection::NodeId;
use fxhash::FxHashMap;

/// Per-node algorithm scratch. Reset lazily: a node's scratch is stale
/// whenever `last_run_id` disagrees with the graph's current `run_id`,
/// which lets every query skip an O(|V|) reset pass over the whole graph.
#[derive(Debug, Clone)]
pub(crate) struct Scratch {
    pub(crate) visited: bool,
    pub(crate) seen: bool,
    pub(crate) distance: f32,
    pub(crate) estimate: f32,
    pub(crate) prev: Option<NodeId>,
    pub(crate) depth: u32,
    pub(crate) last_run_id: u64,
}

impl Default for Scratch {
    fn default() -> Self {
        Self {
            visited: false,
            seen: false,
            distance: f32::MAX,
            estimate: 0.0,
            prev: None,
            depth: 0,
            last_run_id: 0,
        }
    }
}

pub(crate) struct Node<V> {
    pub(crate) vertex: V,
    /// Outgoing edges (all edges, for an undirected graph): neighbour node
    /// id -> connection id, in insertion order for deterministic iteration.
    pub(crate) out: FxHashMap<NodeId, usize>,
    pub(crate) out_order: Vec<NodeId>,
    /// Incoming edges, maintained only for directed graphs, to support
    /// reverse traversal and vertex removal without a full edge scan.
    pub(crate) incoming: Vec<NodeId>,
    pub(crate) scratch: Scratch,
}

impl<V> Node<V> {
    pub(crate) fn new(vertex: V) -> Self {
        Self {
            vertex,
            out: FxHashMap::default(),
            out_order: Vec::new(),
            incoming: Vec::new(),
            scratch: Scratch::default(),
        }
    }

    /// Resets this node's scratch for a fresh algorithm run if it is stale
    /// relative to `run_id`, and returns a mutable reference to it either
    /// way.
    #[inline]
    pub(crate) fn scratch_for_run(&mut self, run_id: u64) -> &mut Scratch {
        if self.scratch.last_run_id != run_id {
            self.scratch = Scratch {
                last_run_id: run_id,
                ..Scratch::default()
            };
        }
        &mut self.scratch
    }
}
