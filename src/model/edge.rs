//! Edge — one directly available single-step transform between two types.

use std::fmt;

use super::TypeKey;

/// Directed, unit-weight edge in the type graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: TypeKey,
    pub to: TypeKey,
}

impl Edge {
    pub fn new(from: TypeKey, to: TypeKey) -> Self {
        Self { from, to }
    }

    /// Edge between two concrete types.
    pub fn of<A: 'static, B: 'static>() -> Self {
        Self::new(TypeKey::of::<A>(), TypeKey::of::<B>())
    }

    /// Self-loops carry no mapping information and are discarded at build.
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
