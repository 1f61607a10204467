//! End-to-end tests for the two-tier memoization layers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use transmap::{
    BoxError, Edge, EdgeResolver, Lambda, MapOptions, Mapper, Registry, ResolvedEdge, TypeKey,
};

fn key<T: 'static>() -> TypeKey {
    TypeKey::of::<T>()
}

/// Wraps a registry and counts collaborator calls.
struct Counting {
    inner: Registry,
    edge_enumerations: Arc<AtomicUsize>,
    transform_lookups: Arc<AtomicUsize>,
}

impl Counting {
    fn new(inner: Registry) -> Self {
        Self {
            inner,
            edge_enumerations: Arc::new(AtomicUsize::new(0)),
            transform_lookups: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl EdgeResolver for Counting {
    fn edges(&self, options: &MapOptions) -> Vec<Edge> {
        self.edge_enumerations.fetch_add(1, Ordering::SeqCst);
        self.inner.edges(options)
    }

    fn transform(&self, from: TypeKey, to: TypeKey, options: &MapOptions) -> Option<ResolvedEdge> {
        self.transform_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.transform(from, to, options)
    }

    fn expression(
        &self,
        from: TypeKey,
        to: TypeKey,
        options: &MapOptions,
    ) -> Result<Option<Lambda>, BoxError> {
        self.inner.expression(from, to, options)
    }
}

fn counting_mapper() -> Mapper<Counting> {
    let registry = Registry::builder()
        .edge::<i32, String>(|n| n.to_string())
        .try_edge::<String, f32>(|s| Ok(s.parse::<f32>()?))
        .build();
    Mapper::new(Counting::new(registry))
}

#[test]
fn test_default_options_build_the_graph_once() {
    let mapper = counting_mapper();
    let options = MapOptions::default();
    for _ in 0..10 {
        assert!(mapper.can_map(key::<i32>(), key::<f32>(), &options));
    }
    assert_eq!(mapper.resolver().edge_enumerations.load(Ordering::SeqCst), 1);
}

#[test]
fn test_cacheable_options_build_once_per_identity() {
    let mapper = counting_mapper();
    let a = MapOptions::cacheable();
    let b = MapOptions::cacheable();
    for _ in 0..5 {
        mapper.can_map(key::<i32>(), key::<f32>(), &a);
        mapper.can_map(key::<i32>(), key::<f32>(), &b);
    }
    assert_eq!(mapper.resolver().edge_enumerations.load(Ordering::SeqCst), 2);
}

#[test]
fn test_transient_options_re_enumerate_every_call() {
    let mapper = counting_mapper();
    for _ in 0..4 {
        mapper.can_map(key::<i32>(), key::<f32>(), &MapOptions::transient());
    }
    assert_eq!(mapper.resolver().edge_enumerations.load(Ordering::SeqCst), 4);
}

#[test]
fn test_can_map_never_invokes_base_transforms() {
    let mapper = counting_mapper();
    for options in [MapOptions::default(), MapOptions::cacheable(), MapOptions::transient()] {
        mapper.can_map(key::<i32>(), key::<f32>(), &options);
        mapper.can_map(key::<f32>(), key::<i32>(), &options);
    }
    assert_eq!(mapper.resolver().transform_lookups.load(Ordering::SeqCst), 0);
}

#[test]
fn test_rebuild_for_same_identity_is_idempotent() {
    // Two mappers over the same registry shape: identical graphs come out.
    let first = counting_mapper();
    let second = counting_mapper();
    let options = MapOptions::default();

    let a = first.resolve_path(key::<i32>(), key::<f32>(), &options).unwrap();
    let b = second.resolve_path(key::<i32>(), key::<f32>(), &options).unwrap();
    assert_eq!(a.nodes(), b.nodes());
}

#[test]
fn test_misses_are_memoized_for_cacheable_options() {
    let mapper = counting_mapper();
    let options = MapOptions::cacheable();
    for _ in 0..5 {
        assert!(!mapper.can_map(key::<f32>(), key::<i32>(), &options));
    }
    // One enumeration builds the graph; the miss itself is a cached entry.
    assert_eq!(mapper.resolver().edge_enumerations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_concurrent_first_queries_agree() {
    let mapper = Arc::new(counting_mapper());
    let options = MapOptions::cacheable();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let mapper = mapper.clone();
        let options = options.clone();
        handles.push(tokio::spawn(async move {
            mapper.resolve_path(key::<i32>(), key::<f32>(), &options).map(|p| p.len())
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), Some(3));
    }
}
