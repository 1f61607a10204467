//! Bounded shortest-path search over a type graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::model::{TypeKey, TypePath};

use super::{NodeIx, TypeGraph};

/// Shortest chain from `from` to `to` within `max_nodes` nodes (endpoints
/// included), or `None`.
///
/// Dijkstra over unit weights. Hop count is the only cost signal: fewer
/// intermediate conversions is the only quality measure available. A path
/// that exists only beyond the bound is reported absent, never truncated.
///
/// Determinism: the same graph and bound always yield a chain of the same
/// *length*; the tie-broken sequence among equal-length chains is not fixed.
pub fn solve(graph: &TypeGraph, from: TypeKey, to: TypeKey, max_nodes: usize) -> Option<TypePath> {
    if max_nodes < 2 {
        return None;
    }
    // A valid chain has distinct endpoints; the graph holds no self-loops,
    // so an A→A query can never satisfy the 2-node minimum.
    if from == to {
        return None;
    }
    let start = graph.ix(from)?;
    let goal = graph.ix(to)?;

    let node_count = graph.node_count();
    let mut dist: Vec<usize> = vec![usize::MAX; node_count];
    let mut prev: Vec<Option<NodeIx>> = vec![None; node_count];
    let mut heap: BinaryHeap<Reverse<(usize, NodeIx)>> = BinaryHeap::new();

    dist[start.0 as usize] = 0;
    heap.push(Reverse((0, start)));

    while let Some(Reverse((d, node))) = heap.pop() {
        if d > dist[node.0 as usize] {
            continue; // stale heap entry
        }
        if node == goal {
            return Some(reconstruct(graph, &prev, start, goal));
        }
        // A neighbor at distance d+1 lies on a path of d+2 nodes.
        if d + 2 > max_nodes {
            continue;
        }
        for &next in graph.neighbors(node) {
            let nd = d + 1;
            if nd < dist[next.0 as usize] {
                dist[next.0 as usize] = nd;
                prev[next.0 as usize] = Some(node);
                heap.push(Reverse((nd, next)));
            }
        }
    }

    trace!(%from, %to, max_nodes, "no chain within bound");
    None
}

fn reconstruct(graph: &TypeGraph, prev: &[Option<NodeIx>], start: NodeIx, goal: NodeIx) -> TypePath {
    let mut nodes = vec![graph.key(goal)];
    let mut cursor = goal;
    while cursor != start {
        cursor = prev[cursor.0 as usize].expect("predecessor chain reaches the start node");
        nodes.push(graph.key(cursor));
    }
    nodes.reverse();
    TypePath::new(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::build_graph;
    use crate::model::Edge;

    struct A;
    struct B;
    struct C;
    struct D;

    fn key<T: 'static>() -> TypeKey {
        TypeKey::of::<T>()
    }

    fn line_graph() -> TypeGraph {
        build_graph(vec![Edge::of::<A, B>(), Edge::of::<B, C>(), Edge::of::<C, D>()]).unwrap()
    }

    #[test]
    fn test_direct_edge() {
        let graph = line_graph();
        let path = solve(&graph, key::<A>(), key::<B>(), usize::MAX).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.source(), key::<A>());
        assert_eq!(path.destination(), key::<B>());
    }

    #[test]
    fn test_full_chain() {
        let graph = line_graph();
        let path = solve(&graph, key::<A>(), key::<D>(), usize::MAX).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.hops(), 3);
    }

    #[test]
    fn test_bound_counts_nodes_including_endpoints() {
        let graph = line_graph();
        for bound in 0..4 {
            assert!(solve(&graph, key::<A>(), key::<D>(), bound).is_none(), "bound {bound}");
        }
        assert!(solve(&graph, key::<A>(), key::<D>(), 4).is_some());
        // A→C needs 3 nodes: absent at 2, present at 3.
        assert!(solve(&graph, key::<A>(), key::<C>(), 2).is_none());
        assert!(solve(&graph, key::<A>(), key::<C>(), 3).is_some());
    }

    #[test]
    fn test_missing_endpoint() {
        let graph = line_graph();
        struct Z;
        assert!(solve(&graph, key::<A>(), key::<Z>(), usize::MAX).is_none());
        assert!(solve(&graph, key::<Z>(), key::<A>(), usize::MAX).is_none());
    }

    #[test]
    fn test_direction_matters() {
        let graph = line_graph();
        assert!(solve(&graph, key::<D>(), key::<A>(), usize::MAX).is_none());
    }

    #[test]
    fn test_same_endpoints_absent() {
        let graph = line_graph();
        assert!(solve(&graph, key::<A>(), key::<A>(), usize::MAX).is_none());
    }

    #[test]
    fn test_shortest_wins_over_longer_alternative() {
        // A→B→D and A→D: the direct edge must win.
        let graph =
            build_graph(vec![Edge::of::<A, B>(), Edge::of::<B, D>(), Edge::of::<A, D>()]).unwrap();
        let path = solve(&graph, key::<A>(), key::<D>(), usize::MAX).unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_repeated_solves_agree_on_length() {
        let graph = build_graph(vec![
            Edge::of::<A, B>(),
            Edge::of::<B, D>(),
            Edge::of::<A, C>(),
            Edge::of::<C, D>(),
        ])
        .unwrap();
        let first = solve(&graph, key::<A>(), key::<D>(), usize::MAX).unwrap().len();
        for _ in 0..16 {
            assert_eq!(solve(&graph, key::<A>(), key::<D>(), usize::MAX).unwrap().len(), first);
        }
    }
}
