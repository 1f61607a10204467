//! Path memoization: options identity → (pair, bound) → resolved chain.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use crate::model::{MapOptions, OptionsIdentity, OptionsKey, TypeKey, TypePath};

/// One path lookup. The effective bound is part of the key: a stricter
/// bound is a different entry, never a re-filter of a cached chain solved
/// under a looser one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairQuery {
    pub from: TypeKey,
    pub to: TypeKey,
    pub max_nodes: usize,
}

/// Cached value: `None` records a proven miss for this query.
type Slot = Option<Arc<TypePath>>;

/// Per-mapper path cache.
///
/// The general slot is a nested map — options identity → (pair → path) —
/// with per-pair insert-if-absent independent of the outer map.
pub struct PathCache {
    default_slot: DashMap<PairQuery, Slot>,
    keyed: DashMap<OptionsKey, Arc<DashMap<PairQuery, Slot>>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self { default_slot: DashMap::new(), keyed: DashMap::new() }
    }

    /// Fetch the path for this (options, pair, bound) query, solving on
    /// first use.
    pub fn get_or_solve<F>(&self, options: &MapOptions, query: PairQuery, solve: F) -> Slot
    where
        F: FnOnce() -> Option<TypePath>,
    {
        match options.identity() {
            OptionsIdentity::Default => Self::pair_slot(&self.default_slot, query, solve),
            OptionsIdentity::Cacheable(key) => {
                let pairs = self
                    .keyed
                    .entry(key)
                    .or_insert_with(|| Arc::new(DashMap::new()))
                    .clone();
                Self::pair_slot(&pairs, query, solve)
            }
            OptionsIdentity::Transient => solve().map(Arc::new),
        }
    }

    fn pair_slot<F>(pairs: &DashMap<PairQuery, Slot>, query: PairQuery, solve: F) -> Slot
    where
        F: FnOnce() -> Option<TypePath>,
    {
        if let Some(slot) = pairs.get(&query) {
            return slot.clone();
        }
        let solved = solve().map(Arc::new);
        trace!(from = %query.from, to = %query.to, max_nodes = query.max_nodes,
               present = solved.is_some(), "path cached");
        pairs.entry(query).or_insert(solved).clone()
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(max_nodes: usize) -> PairQuery {
        PairQuery { from: TypeKey::of::<i32>(), to: TypeKey::of::<f32>(), max_nodes }
    }

    fn chain() -> Option<TypePath> {
        Some(TypePath::new(vec![
            TypeKey::of::<i32>(),
            TypeKey::of::<String>(),
            TypeKey::of::<f32>(),
        ]))
    }

    #[test]
    fn test_default_slot_solves_once_per_query() {
        let cache = PathCache::new();
        let mut solves = 0;
        for _ in 0..3 {
            let path = cache.get_or_solve(&MapOptions::default(), query(8), || {
                solves += 1;
                chain()
            });
            assert!(path.is_some());
        }
        assert_eq!(solves, 1);
    }

    #[test]
    fn test_bound_is_part_of_the_key() {
        let cache = PathCache::new();
        let mut solves = 0;
        cache.get_or_solve(&MapOptions::default(), query(8), || {
            solves += 1;
            chain()
        });
        cache.get_or_solve(&MapOptions::default(), query(2), || {
            solves += 1;
            None
        });
        assert_eq!(solves, 2);
    }

    #[test]
    fn test_cacheable_identities_are_independent() {
        let cache = PathCache::new();
        let a = MapOptions::cacheable();
        let b = MapOptions::cacheable();
        let mut solves = 0;
        for opts in [&a, &a, &b] {
            cache.get_or_solve(opts, query(8), || {
                solves += 1;
                chain()
            });
        }
        assert_eq!(solves, 2);
    }

    #[test]
    fn test_transient_bypasses_cache() {
        let cache = PathCache::new();
        let mut solves = 0;
        for _ in 0..3 {
            cache.get_or_solve(&MapOptions::transient(), query(8), || {
                solves += 1;
                chain()
            });
        }
        assert_eq!(solves, 3);
    }

    #[test]
    fn test_miss_is_cached() {
        let cache = PathCache::new();
        let mut solves = 0;
        for _ in 0..3 {
            let path = cache.get_or_solve(&MapOptions::default(), query(2), || {
                solves += 1;
                None
            });
            assert!(path.is_none());
        }
        assert_eq!(solves, 1);
    }
}
