//! Graph construction from one edge-source snapshot.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;
use tracing::debug;

use crate::model::{Edge, TypeKey};

use super::{NodeIx, TypeGraph};

/// Build an immutable graph from raw edges.
///
/// Duplicates collapse to one edge; self-loops are discarded. Each distinct
/// type is assigned a dense index on first sight. Returns `None` when no
/// usable edge survives — absence of connectivity is structural, never an
/// error.
pub fn build_graph(edges: impl IntoIterator<Item = Edge>) -> Option<TypeGraph> {
    let mut index: HashMap<TypeKey, NodeIx> = HashMap::new();
    let mut nodes: Vec<TypeKey> = Vec::new();
    let mut adjacency: Vec<SmallVec<[NodeIx; 4]>> = Vec::new();
    let mut seen: HashSet<(TypeKey, TypeKey)> = HashSet::new();
    let mut edge_count = 0usize;

    fn intern(
        key: TypeKey,
        index: &mut HashMap<TypeKey, NodeIx>,
        nodes: &mut Vec<TypeKey>,
        adjacency: &mut Vec<SmallVec<[NodeIx; 4]>>,
    ) -> NodeIx {
        *index.entry(key).or_insert_with(|| {
            let ix = NodeIx(nodes.len() as u32);
            nodes.push(key);
            adjacency.push(SmallVec::new());
            ix
        })
    }

    for edge in edges {
        if edge.is_loop() {
            continue;
        }
        if !seen.insert((edge.from, edge.to)) {
            continue;
        }
        let from = intern(edge.from, &mut index, &mut nodes, &mut adjacency);
        let to = intern(edge.to, &mut index, &mut nodes, &mut adjacency);
        adjacency[from.0 as usize].push(to);
        edge_count += 1;
    }

    if edge_count == 0 {
        debug!("no usable edges, graph absent");
        return None;
    }

    debug!(nodes = nodes.len(), edges = edge_count, "type graph built");
    Some(TypeGraph { index, nodes, adjacency, edge_count })
}
