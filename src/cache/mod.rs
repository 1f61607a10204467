//! # Memoization Layers
//!
//! Two independent two-tier caches with the same shape: a lock-free fast
//! slot for the default options identity, and a general slot populated only
//! for options explicitly marked cacheable. Non-cacheable options bypass
//! both layers entirely.
//!
//! All population is insert-if-absent: concurrent first-builders may race
//! and duplicate work, but entries are immutable once published and never
//! overwritten, so losers simply discard their result.

pub mod graph_cache;
pub mod path_cache;

pub use graph_cache::GraphCache;
pub use path_cache::{PairQuery, PathCache};
