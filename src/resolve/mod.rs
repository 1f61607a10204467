//! # Collaborator Seam
//!
//! Trait-first contract between the composition engine and the base
//! mapper/projector that owns individual edges. The engine never knows how
//! an edge transform works — it only enumerates edges, asks for per-edge
//! transforms or expressions, and threads values/expressions along a chain.

use std::any::Any;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::expr::Lambda;
use crate::model::{Edge, MapOptions, TypeKey};

/// Runtime value crossing hop boundaries.
pub type BoxedValue = Box<dyn Any + Send>;

/// Cause channel for hop-level failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ============================================================================
// MapContext
// ============================================================================

/// Per-invocation context handed to every hop transform.
///
/// `nested` is the composition marker: the executor sets it before invoking
/// hops so a base mapper can detect re-entrancy (a hop that itself asks the
/// engine to map).
#[derive(Debug, Clone)]
pub struct MapContext {
    nested: bool,
    cancel: CancellationToken,
}

impl MapContext {
    /// Context for a top-level call.
    pub fn root(cancel: CancellationToken) -> Self {
        Self { nested: false, cancel }
    }

    /// True when the current operation runs inside a composed chain.
    pub fn nested(&self) -> bool {
        self.nested
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Derive the context hops run under.
    pub(crate) fn enter_chain(&self) -> Self {
        Self { nested: true, cancel: self.cancel.clone() }
    }
}

// ============================================================================
// Per-edge contracts
// ============================================================================

/// One runtime transform for a single edge. Hops may suspend; cancellation
/// is cooperative and only observed by the engine between hops.
#[async_trait]
pub trait EdgeTransform: Send + Sync {
    async fn apply(&self, value: BoxedValue, ctx: &MapContext) -> Result<BoxedValue, BoxError>;
}

/// A scoped resource obtained alongside an edge transform. The executor
/// aggregates these and releases them in one sweep on chain teardown.
pub trait EdgeScope: Send {
    fn release(&mut self);
}

/// Transform plus its optional resource handle, as resolved for one hop.
pub struct ResolvedEdge {
    pub transform: std::sync::Arc<dyn EdgeTransform>,
    pub scope: Option<Box<dyn EdgeScope>>,
}

// ============================================================================
// EdgeResolver
// ============================================================================

/// The base mapper/projector.
///
/// `edges` is re-queried on every graph build and never assumed stable
/// across options identities. `transform`/`expression` may legitimately
/// miss even after path resolution (e.g. a concurrent configuration swap);
/// the engine folds such a miss into the aggregate NotFound for the overall
/// pair.
pub trait EdgeResolver: Send + Sync {
    /// Enumerate the directly available edges under these options. Finite.
    fn edges(&self, options: &MapOptions) -> Vec<Edge>;

    /// Runtime transform for one edge, or `None`.
    fn transform(&self, from: TypeKey, to: TypeKey, options: &MapOptions) -> Option<ResolvedEdge>;

    /// Projection lambda for one edge.
    ///
    /// `Ok(None)` means the edge is not available (NotFound for the overall
    /// pair); `Err` is any other failure while building the hop's expression
    /// and is re-attributed to the overall pair by the composer.
    fn expression(
        &self,
        from: TypeKey,
        to: TypeKey,
        options: &MapOptions,
    ) -> Result<Option<Lambda>, BoxError>;
}
