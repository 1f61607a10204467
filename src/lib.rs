//! # transmap — Transitive Type-Mapping Composition Engine
//!
//! Given a set of directly available single-step type transforms (edges)
//! supplied by a base mapper/projector, `transmap` computes and caches the
//! shortest chain of intermediate types connecting an arbitrary
//! (source, destination) pair within a configurable length budget, then
//! either executes the chain as a runtime value transform or folds it into
//! one composed, inspectable expression for query translation.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: [`EdgeResolver`] is the contract between the engine
//!    and the base mapper that owns individual edges
//! 2. **Pure model**: `TypeKey`, `Edge`, `TypePath` cross all boundaries
//! 3. **Build-once graphs**: a graph is immutable after construction and
//!    safe for concurrent reads; caches are append-only, insert-if-absent
//! 4. **NotFound is control flow**: a missing multi-hop chain looks exactly
//!    like a missing direct edge, so callers can fall back uniformly
//!
//! ## Quick Start
//!
//! ```rust
//! use transmap::{Mapper, MapOptions, Registry, TypeKey};
//!
//! # async fn example() -> transmap::Result<()> {
//! let registry = Registry::builder()
//!     .edge::<i32, String>(|n| (n * 2).to_string())
//!     .try_edge::<String, f32>(|s| Ok(s.parse::<f32>()?))
//!     .build();
//! let mapper = Mapper::new(registry);
//!
//! let options = MapOptions::default();
//! assert!(mapper.can_map(TypeKey::of::<i32>(), TypeKey::of::<f32>(), &options));
//!
//! let mapped = mapper
//!     .map(TypeKey::of::<i32>(), TypeKey::of::<f32>(), Box::new(5i32), &options)
//!     .await?;
//! let (value, _scope) = mapped.take::<f32>().unwrap();
//! assert_eq!(value, 10.0);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod cache;
pub mod resolve;
pub mod exec;
pub mod expr;
pub mod registry;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Edge, MapOptions, OptionsIdentity, OptionsKey, TypeKey, TypePath, UNBOUNDED};

// ============================================================================
// Re-exports: Collaborator seam
// ============================================================================

pub use resolve::{
    BoxError, BoxedValue, EdgeResolver, EdgeScope, EdgeTransform, MapContext, ResolvedEdge,
};

// ============================================================================
// Re-exports: Execution & expressions
// ============================================================================

pub use exec::{ChainScope, Mapped};
pub use expr::{Expr, Lambda, Literal, Param};
pub use registry::{Registry, RegistryBuilder};

use cache::{GraphCache, PairQuery, PathCache};
use graph::TypeGraph;

// ============================================================================
// Top-level Mapper handle
// ============================================================================

/// The primary entry point. A `Mapper` wraps a base resolver and adds
/// transitive composition: graph construction, bounded shortest-path
/// resolution, two-tier memoization, chain execution and expression folding.
///
/// A passive library object: all work happens on caller threads, and the
/// only shared mutable state is the append-only caches, so one `Mapper` may
/// be used from many threads at once.
pub struct Mapper<R: EdgeResolver> {
    resolver: R,
    graphs: GraphCache,
    paths: PathCache,
}

impl<R: EdgeResolver> Mapper<R> {
    /// Create a Mapper over the given base resolver.
    pub fn new(resolver: R) -> Self {
        Self { resolver, graphs: GraphCache::new(), paths: PathCache::new() }
    }

    /// Whether a chain from `source` to `destination` exists within the
    /// options' bound. Existence check only — never invokes base edges.
    pub fn can_map(&self, source: TypeKey, destination: TypeKey, options: &MapOptions) -> bool {
        self.resolve_path(source, destination, options).is_some()
    }

    /// The shortest chain for this pair under these options, if any.
    pub fn resolve_path(
        &self,
        source: TypeKey,
        destination: TypeKey,
        options: &MapOptions,
    ) -> Option<Arc<TypePath>> {
        let max_nodes = options.max_chain_length();
        let graph = self.graph(options)?;
        let query = PairQuery { from: source, to: destination, max_nodes };
        self.paths.get_or_solve(options, query, || {
            graph::solver::solve(&graph, source, destination, max_nodes)
        })
    }

    /// Map `value` from `source` to `destination` by executing the resolved
    /// chain hop by hop. `Err(Error::NotFound)` when no chain exists — the
    /// same signal a missing direct edge would produce.
    pub async fn map(
        &self,
        source: TypeKey,
        destination: TypeKey,
        value: BoxedValue,
        options: &MapOptions,
    ) -> Result<Mapped> {
        self.map_with_cancel(source, destination, value, options, CancellationToken::new()).await
    }

    /// [`Mapper::map`] with a caller-supplied cancellation token. The token
    /// is observed between hops only; cancellation yields
    /// `Err(Error::Cancelled)` and no partial value.
    pub async fn map_with_cancel(
        &self,
        source: TypeKey,
        destination: TypeKey,
        value: BoxedValue,
        options: &MapOptions,
        cancel: CancellationToken,
    ) -> Result<Mapped> {
        let path = self
            .resolve_path(source, destination, options)
            .ok_or(Error::NotFound { source, destination })?;
        path.verify(source, destination, options.max_chain_length())?;

        debug!(%source, %destination, chain = %path, "mapping via chain");
        let ctx = MapContext::root(cancel);
        exec::run_chain(&self.resolver, &path, value, options, &ctx).await
    }

    /// Compose the resolved chain's per-edge lambdas into one expression.
    ///
    /// Synchronous: projection never suspends. A projection from a type to
    /// itself is always NotFound — identity projections are out of scope,
    /// so a degenerate 1-node chain can never masquerade as a true 2-node
    /// minimal chain.
    pub fn project(
        &self,
        source: TypeKey,
        destination: TypeKey,
        options: &MapOptions,
    ) -> Result<Lambda> {
        if source == destination {
            return Err(Error::NotFound { source, destination });
        }
        let path = self
            .resolve_path(source, destination, options)
            .ok_or(Error::NotFound { source, destination })?;
        path.verify(source, destination, options.max_chain_length())?;

        debug!(%source, %destination, chain = %path, "projecting via chain");
        expr::compose::compose_chain(&self.resolver, &path, options)
    }

    /// Access the underlying resolver (for advanced use).
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    fn graph(&self, options: &MapOptions) -> Option<Arc<TypeGraph>> {
        self.graphs.get_or_build(options, || {
            graph::builder::build_graph(self.resolver.edges(options))
        })
    }
}

// ============================================================================
// Error Types
// ============================================================================

// `Display`/`Error` are written by hand rather than derived with
// `thiserror`: the derive treats any field named `source` as the error's
// cause, but here `source` is the source *type* of the mapping pair.
#[derive(Debug)]
pub enum Error {
    /// No chain connects the pair under the current options. Ordinary
    /// control flow: callers fall back to other strategies.
    NotFound { source: TypeKey, destination: TypeKey },

    /// A hop's runtime transform failed. Attributed to the overall pair;
    /// hop boundaries are an implementation detail.
    Execution { source: TypeKey, destination: TypeKey, cause: BoxError },

    /// Building a hop's expression failed for a reason other than the edge
    /// being unavailable. Attributed to the overall pair.
    Projection { source: TypeKey, destination: TypeKey, cause: BoxError },

    /// Cancellation observed at a hop boundary; no partial value.
    Cancelled,

    /// The solver returned a path violating its own contract. A defect,
    /// never downgraded to NotFound.
    InternalConsistency(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound { source, destination } => {
                write!(f, "no mapping chain from {source} to {destination}")
            }
            Error::Execution { source, destination, cause } => {
                write!(f, "chain execution from {source} to {destination} failed: {cause}")
            }
            Error::Projection { source, destination, cause } => {
                write!(f, "projection from {source} to {destination} failed: {cause}")
            }
            Error::Cancelled => f.write_str("mapping cancelled between hops"),
            Error::InternalConsistency(msg) => {
                write!(f, "internal consistency fault: {msg}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Execution { cause, .. } | Error::Projection { cause, .. } => {
                Some(cause.as_ref())
            }
            _ => None,
        }
    }
}

impl Error {
    /// True for the recoverable "no chain" signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
