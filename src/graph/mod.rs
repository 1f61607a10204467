//! # Type Graph
//!
//! Directed unit-weight graph over type identities, built once per options
//! generation and never mutated afterwards — concurrent reads need no lock.
//!
//! - [`builder::build_graph`] — dedup, drop self-loops, intern nodes.
//! - [`solver::solve`] — bounded shortest-path search over the built graph.

pub mod builder;
pub mod solver;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::TypeKey;

/// Dense node index inside one graph. Meaningless across graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeIx(pub(crate) u32);

/// Immutable adjacency over interned type nodes.
pub struct TypeGraph {
    index: HashMap<TypeKey, NodeIx>,
    nodes: Vec<TypeKey>,
    adjacency: Vec<SmallVec<[NodeIx; 4]>>,
    edge_count: usize,
}

impl TypeGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, key: TypeKey) -> bool {
        self.index.contains_key(&key)
    }

    pub(crate) fn ix(&self, key: TypeKey) -> Option<NodeIx> {
        self.index.get(&key).copied()
    }

    pub(crate) fn key(&self, ix: NodeIx) -> TypeKey {
        self.nodes[ix.0 as usize]
    }

    pub(crate) fn neighbors(&self, ix: NodeIx) -> &[NodeIx] {
        &self.adjacency[ix.0 as usize]
    }
}
