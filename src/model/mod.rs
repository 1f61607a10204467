//! # Type-Mapping Model
//!
//! Clean data types for the composition engine. These cross every boundary:
//! resolver ↔ graph ↔ caches ↔ executor ↔ user.
//!
//! Design rule: this module is pure data — no I/O, no locks, no async.

pub mod key;
pub mod edge;
pub mod path;
pub mod options;

pub use key::TypeKey;
pub use edge::Edge;
pub use path::TypePath;
pub use options::{MapOptions, OptionsIdentity, OptionsKey, UNBOUNDED};
