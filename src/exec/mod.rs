//! # Chain Executor
//!
//! Runs a resolved chain as a runtime value transform: hop *i*'s output is
//! hop *i+1*'s input, strictly sequential. The only shared state touched
//! here is the caller's value and the per-edge scopes; cancellation is
//! observed between hops only — an in-flight hop is never interrupted.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::model::{MapOptions, TypePath};
use crate::resolve::{BoxedValue, EdgeResolver, EdgeScope, MapContext};
use crate::{Error, Result};

// ============================================================================
// ChainScope
// ============================================================================

/// Owning aggregate of every hop's scoped resource.
///
/// Releasing once tears down all handles; repeated release is a no-op,
/// guarded by a compare-and-set flag. Dropping an unreleased scope releases
/// it.
pub struct ChainScope {
    handles: Vec<Box<dyn EdgeScope>>,
    released: AtomicBool,
}

impl ChainScope {
    fn new() -> Self {
        Self { handles: Vec::new(), released: AtomicBool::new(false) }
    }

    fn push(&mut self, handle: Box<dyn EdgeScope>) {
        self.handles.push(handle);
    }

    /// Release every hop's handle. Idempotent.
    pub fn release(&mut self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }
        for handle in &mut self.handles {
            handle.release();
        }
        self.handles.clear();
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

impl Drop for ChainScope {
    fn drop(&mut self) {
        self.release();
    }
}

// ============================================================================
// Mapped
// ============================================================================

/// Result of executing a chain: the destination value plus the aggregate
/// scope the caller releases (or drops) when done with the value.
pub struct Mapped {
    pub value: BoxedValue,
    pub scope: ChainScope,
}

// Both fields are opaque trait objects; an empty struct form is all Debug
// can honestly show.
impl std::fmt::Debug for Mapped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapped").finish_non_exhaustive()
    }
}

impl Mapped {
    /// Downcast the destination value, keeping the scope alive.
    pub fn take<T: 'static>(self) -> Option<(T, ChainScope)> {
        let Mapped { value, scope } = self;
        value.downcast::<T>().ok().map(|boxed| (*boxed, scope))
    }
}

// ============================================================================
// Chain execution
// ============================================================================

/// Thread `value` through every hop of `path`.
///
/// Hops run under a nested-marked context so the base mapper can detect
/// re-entrancy. Any hop error is wrapped with the overall (source,
/// destination) pair — hop boundaries are an implementation detail.
pub(crate) async fn run_chain<R: EdgeResolver + ?Sized>(
    resolver: &R,
    path: &TypePath,
    value: BoxedValue,
    options: &MapOptions,
    ctx: &MapContext,
) -> Result<Mapped> {
    let hop_ctx = ctx.enter_chain();
    let mut scope = ChainScope::new();
    let mut current = value;

    debug!(chain = %path, "executing chain");

    for (from, to) in path.edges() {
        // Cooperative: checked at hop boundaries only. Scope handles
        // acquired so far are released by drop.
        if hop_ctx.cancel_token().is_cancelled() {
            return Err(Error::Cancelled);
        }

        let Some(edge) = resolver.transform(from, to, options) else {
            // Edge vanished after path resolution; fold into the aggregate
            // miss so callers can fall back to other strategies.
            return Err(Error::NotFound {
                source: path.source(),
                destination: path.destination(),
            });
        };
        if let Some(handle) = edge.scope {
            scope.push(handle);
        }

        trace!(%from, %to, "hop");
        current = edge.transform.apply(current, &hop_ctx).await.map_err(|cause| {
            Error::Execution {
                source: path.source(),
                destination: path.destination(),
                cause,
            }
        })?;
    }

    Ok(Mapped { value: current, scope })
}
