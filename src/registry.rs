//! Explicit edge registry — the in-crate [`EdgeResolver`].
//!
//! Replaces reflection-style edge discovery: the composition root registers
//! closed, concrete type-pair transforms once at build time, and the
//! resulting [`Registry`] is immutable thereafter. Open generic templates
//! are out of scope — every edge connects two constructed types.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;

use crate::expr::Lambda;
use crate::model::{Edge, MapOptions, TypeKey};
use crate::resolve::{
    BoxError, BoxedValue, EdgeResolver, EdgeScope, EdgeTransform, MapContext, ResolvedEdge,
};

type ScopeFactory = Box<dyn Fn() -> Box<dyn EdgeScope> + Send + Sync>;

// ============================================================================
// Typed closure adapter
// ============================================================================

/// Wraps a plain `Fn(A) -> B` as an [`EdgeTransform`] over boxed values.
struct FnTransform<A, B, F> {
    f: F,
    _marker: PhantomData<fn(A) -> B>,
}

#[async_trait]
impl<A, B, F> EdgeTransform for FnTransform<A, B, F>
where
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> B + Send + Sync,
{
    async fn apply(&self, value: BoxedValue, _ctx: &MapContext) -> Result<BoxedValue, BoxError> {
        let input = value.downcast::<A>().map_err(|_| {
            format!(
                "hop input is not a {}",
                TypeKey::of::<A>().name()
            )
        })?;
        Ok(Box::new((self.f)(*input)))
    }
}

/// Fallible variant: the closure itself may refuse a value.
struct TryFnTransform<A, B, F> {
    f: F,
    _marker: PhantomData<fn(A) -> B>,
}

#[async_trait]
impl<A, B, F> EdgeTransform for TryFnTransform<A, B, F>
where
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> Result<B, BoxError> + Send + Sync,
{
    async fn apply(&self, value: BoxedValue, _ctx: &MapContext) -> Result<BoxedValue, BoxError> {
        let input = value.downcast::<A>().map_err(|_| {
            format!(
                "hop input is not a {}",
                TypeKey::of::<A>().name()
            )
        })?;
        Ok(Box::new((self.f)(*input)?))
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Collects edges at composition-root build time.
#[derive(Default)]
pub struct RegistryBuilder {
    edges: Vec<Edge>,
    transforms: HashMap<(TypeKey, TypeKey), Arc<dyn EdgeTransform>>,
    expressions: HashMap<(TypeKey, TypeKey), Lambda>,
    scopes: HashMap<(TypeKey, TypeKey), ScopeFactory>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pure value transform for the edge `A → B`.
    pub fn edge<A, B>(self, f: impl Fn(A) -> B + Send + Sync + 'static) -> Self
    where
        A: Send + 'static,
        B: Send + 'static,
    {
        self.edge_transform::<A, B>(Arc::new(FnTransform { f, _marker: PhantomData }))
    }

    /// Register a fallible value transform for the edge `A → B`.
    pub fn try_edge<A, B>(
        self,
        f: impl Fn(A) -> Result<B, BoxError> + Send + Sync + 'static,
    ) -> Self
    where
        A: Send + 'static,
        B: Send + 'static,
    {
        self.edge_transform::<A, B>(Arc::new(TryFnTransform { f, _marker: PhantomData }))
    }

    /// Register a hand-built transform (custom async hops, context-aware
    /// hops) for the edge `A → B`.
    pub fn edge_transform<A: 'static, B: 'static>(
        mut self,
        transform: Arc<dyn EdgeTransform>,
    ) -> Self {
        let pair = (TypeKey::of::<A>(), TypeKey::of::<B>());
        if !self.known(pair) {
            self.edges.push(Edge::new(pair.0, pair.1));
        }
        self.transforms.insert(pair, transform);
        self
    }

    /// Attach a projection lambda to the edge `A → B`. The lambda's
    /// parameter and result types must match the edge.
    pub fn expression<A: 'static, B: 'static>(mut self, lambda: Lambda) -> Self {
        let pair = (TypeKey::of::<A>(), TypeKey::of::<B>());
        debug_assert_eq!(lambda.source(), pair.0, "lambda parameter type must match edge source");
        debug_assert_eq!(lambda.result(), pair.1, "lambda result type must match edge target");
        if !self.known(pair) {
            self.edges.push(Edge::new(pair.0, pair.1));
        }
        self.expressions.insert(pair, lambda);
        self
    }

    fn known(&self, pair: (TypeKey, TypeKey)) -> bool {
        self.transforms.contains_key(&pair) || self.expressions.contains_key(&pair)
    }

    /// Attach a scoped-resource factory to the edge `A → B`; the factory
    /// runs once per chain execution that traverses the edge.
    pub fn scope<A: 'static, B: 'static, S, F>(mut self, factory: F) -> Self
    where
        S: EdgeScope + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        let pair = (TypeKey::of::<A>(), TypeKey::of::<B>());
        self.scopes.insert(pair, Box::new(move || Box::new(factory())));
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            edges: self.edges,
            transforms: self.transforms,
            expressions: self.expressions,
            scopes: self.scopes,
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Immutable edge registry. One registry is one configuration context: its
/// edge set does not vary with options — options-specific edge sets are
/// built by handing each options identity its own resolver.
pub struct Registry {
    edges: Vec<Edge>,
    transforms: HashMap<(TypeKey, TypeKey), Arc<dyn EdgeTransform>>,
    expressions: HashMap<(TypeKey, TypeKey), Lambda>,
    scopes: HashMap<(TypeKey, TypeKey), ScopeFactory>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }
}

impl EdgeResolver for Registry {
    fn edges(&self, _options: &MapOptions) -> Vec<Edge> {
        self.edges.clone()
    }

    fn transform(&self, from: TypeKey, to: TypeKey, _options: &MapOptions) -> Option<ResolvedEdge> {
        let transform = self.transforms.get(&(from, to))?.clone();
        let scope = self.scopes.get(&(from, to)).map(|factory| factory());
        Some(ResolvedEdge { transform, scope })
    }

    fn expression(
        &self,
        from: TypeKey,
        to: TypeKey,
        _options: &MapOptions,
    ) -> Result<Option<Lambda>, BoxError> {
        Ok(self.expressions.get(&(from, to)).cloned())
    }
}
