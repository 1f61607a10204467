//! MapOptions — configuration identity and per-call chain-length bound.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide default bound: effectively unbounded.
pub const UNBOUNDED: usize = usize::MAX;

static NEXT_OPTIONS_KEY: AtomicU64 = AtomicU64::new(1);

/// Opaque identity for a cacheable options value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionsKey(u64);

/// How an options value participates in memoization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionsIdentity {
    /// The distinguished default/empty configuration. Lock-free fast path.
    Default,
    /// Caller-guaranteed immutable and reused across calls; safe to key
    /// caches by identity.
    Cacheable(OptionsKey),
    /// One-shot configuration: bypasses both caches entirely, trading CPU
    /// for bounded memory.
    Transient,
}

/// Per-call configuration for graph construction and path resolution.
///
/// The chain-length bound counts *nodes*, endpoints included: a direct edge
/// A→B is a 2-node chain. Bounds below 2 make every chain unreachable.
#[derive(Debug, Clone)]
pub struct MapOptions {
    identity: OptionsIdentity,
    max_chain_length: Option<usize>,
}

impl MapOptions {
    /// A cacheable options value with a fresh identity key.
    ///
    /// Calling this twice yields two distinct cache identities; reuse the
    /// returned value (or a clone) to share cached graphs and paths.
    pub fn cacheable() -> Self {
        let key = OptionsKey(NEXT_OPTIONS_KEY.fetch_add(1, Ordering::Relaxed));
        Self { identity: OptionsIdentity::Cacheable(key), max_chain_length: None }
    }

    /// A non-cacheable options value. Every call re-enumerates edges and
    /// re-solves paths.
    pub fn transient() -> Self {
        Self { identity: OptionsIdentity::Transient, max_chain_length: None }
    }

    /// Override the node-count bound for chains resolved under these options.
    pub fn with_max_chain_length(mut self, max_nodes: usize) -> Self {
        self.max_chain_length = Some(max_nodes);
        self
    }

    /// Effective bound: the override, or the unbounded process default.
    pub fn max_chain_length(&self) -> usize {
        self.max_chain_length.unwrap_or(UNBOUNDED)
    }

    pub fn identity(&self) -> OptionsIdentity {
        self.identity
    }
}

impl Default for MapOptions {
    /// The distinguished default configuration (fast cache slot).
    fn default() -> Self {
        Self { identity: OptionsIdentity::Default, max_chain_length: None }
    }
}

impl fmt::Display for MapOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity {
            OptionsIdentity::Default => f.write_str("default")?,
            OptionsIdentity::Cacheable(OptionsKey(k)) => write!(f, "cacheable#{k}")?,
            OptionsIdentity::Transient => f.write_str("transient")?,
        }
        if let Some(n) = self.max_chain_length {
            write!(f, " (max {n} nodes)")?;
        }
        Ok(())
    }
}
