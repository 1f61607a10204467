//! End-to-end tests for the chain-length bound.
//!
//! The bound counts nodes, endpoints included: a direct edge is a 2-node
//! chain. The convention is uniform — solver, cache keys and verification
//! all speak node counts.

use transmap::{MapOptions, Mapper, Registry, TypeKey};

struct A;
struct B;
struct C;
struct D;

fn key<T: 'static>() -> TypeKey {
    TypeKey::of::<T>()
}

/// A→B→C→D, values unused — these tests only resolve.
fn line_mapper() -> Mapper<Registry> {
    let registry = Registry::builder()
        .edge::<A, B>(|_: A| B)
        .edge::<B, C>(|_: B| C)
        .edge::<C, D>(|_: C| D)
        .build();
    Mapper::new(registry)
}

#[test]
fn test_four_node_chain_bound_grid() {
    let mapper = line_mapper();
    for bound in [0usize, 1, 2, 3] {
        let options = MapOptions::default().with_max_chain_length(bound);
        assert!(!mapper.can_map(key::<A>(), key::<D>(), &options), "bound {bound}");
    }
    for bound in [4usize, 5, 100] {
        let options = MapOptions::default().with_max_chain_length(bound);
        assert!(mapper.can_map(key::<A>(), key::<D>(), &options), "bound {bound}");
    }
}

#[test]
fn test_no_direct_edge_means_three_nodes_minimum() {
    let mapper = line_mapper();
    let two = MapOptions::default().with_max_chain_length(2);
    assert!(!mapper.can_map(key::<A>(), key::<C>(), &two));
    let three = MapOptions::default().with_max_chain_length(3);
    assert!(mapper.can_map(key::<A>(), key::<C>(), &three));
}

#[test]
fn test_bounds_below_two_make_everything_unreachable() {
    let mapper = line_mapper();
    for bound in [0usize, 1] {
        let options = MapOptions::default().with_max_chain_length(bound);
        assert!(!mapper.can_map(key::<A>(), key::<B>(), &options), "direct edge at bound {bound}");
    }
}

#[test]
fn test_unbounded_default_reaches_everything_reachable() {
    let mapper = line_mapper();
    let options = MapOptions::default();
    assert!(mapper.can_map(key::<A>(), key::<D>(), &options));
    assert!(!mapper.can_map(key::<D>(), key::<A>(), &options));
}

#[test]
fn test_repeated_resolution_is_length_deterministic() {
    // Two equal-length routes A→B→D and A→C→D: the chosen sequence is not
    // contractual, the length is.
    let registry = Registry::builder()
        .edge::<A, B>(|_: A| B)
        .edge::<B, D>(|_: B| D)
        .edge::<A, C>(|_: A| C)
        .edge::<C, D>(|_: C| D)
        .build();
    let mapper = Mapper::new(registry);

    let lengths: Vec<usize> = (0..32)
        .map(|_| {
            mapper
                .resolve_path(key::<A>(), key::<D>(), &MapOptions::transient())
                .expect("route exists")
                .len()
        })
        .collect();
    assert!(lengths.iter().all(|&len| len == 3), "got {lengths:?}");
}

#[test]
fn test_stricter_bound_is_a_distinct_cache_entry() {
    let mapper = line_mapper();
    let options = MapOptions::cacheable();

    // Populate under the loose bound, then query the same identity with a
    // stricter one: the cached 4-node chain must not leak through.
    let loose = options.clone().with_max_chain_length(10);
    assert!(mapper.can_map(key::<A>(), key::<D>(), &loose));

    let strict = options.clone().with_max_chain_length(3);
    assert!(!mapper.can_map(key::<A>(), key::<D>(), &strict));

    // And back: the loose entry is still intact.
    assert!(mapper.can_map(key::<A>(), key::<D>(), &loose));
}
