//! Graph memoization, keyed by options identity.

use std::sync::Arc;
use std::sync::OnceLock;

use dashmap::DashMap;
use tracing::debug;

use crate::graph::TypeGraph;
use crate::model::{MapOptions, OptionsIdentity, OptionsKey};

/// Cached value: `None` records that the edge source produced no usable
/// edges for this identity, so repeated misses stay cheap.
type Slot = Option<Arc<TypeGraph>>;

/// Per-mapper graph cache. Graphs live for the owning mapper's lifetime;
/// there is no eviction or teardown beyond normal reclamation.
pub struct GraphCache {
    default_slot: OnceLock<Slot>,
    keyed: DashMap<OptionsKey, Slot>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self { default_slot: OnceLock::new(), keyed: DashMap::new() }
    }

    /// Fetch the graph for this options identity, building it on first use.
    pub fn get_or_build<F>(&self, options: &MapOptions, build: F) -> Slot
    where
        F: FnOnce() -> Option<TypeGraph>,
    {
        match options.identity() {
            OptionsIdentity::Default => {
                self.default_slot.get_or_init(|| build().map(Arc::new)).clone()
            }
            OptionsIdentity::Cacheable(key) => {
                if let Some(slot) = self.keyed.get(&key) {
                    return slot.clone();
                }
                let built = build().map(Arc::new);
                debug!(options = %options, present = built.is_some(), "graph cached");
                // Insert-if-absent: if another caller won the race, keep
                // theirs and discard ours.
                self.keyed.entry(key).or_insert(built).clone()
            }
            OptionsIdentity::Transient => build().map(Arc::new),
        }
    }
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new()
    }
}
