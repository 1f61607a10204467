//! TypePath — an ordered chain of types realizing a multi-step transform.

use std::fmt;

use crate::{Error, Result};

use super::TypeKey;

/// A resolved chain `[T0, T1, .., Tn]`: every adjacent pair is one hop
/// through a directly available edge.
///
/// Invariants (checked by [`TypePath::verify`]):
/// - at least 2 nodes (a 1-node "identity chain" is never a valid path),
/// - endpoints equal the queried (source, destination) pair,
/// - node count within the queried bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePath {
    nodes: Vec<TypeKey>,
}

impl TypePath {
    pub(crate) fn new(nodes: Vec<TypeKey>) -> Self {
        debug_assert!(nodes.len() >= 2, "TypePath requires at least 2 nodes");
        Self { nodes }
    }

    pub fn source(&self) -> TypeKey {
        self.nodes[0]
    }

    pub fn destination(&self) -> TypeKey {
        self.nodes[self.nodes.len() - 1]
    }

    /// Node count, endpoints included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Hop count: one less than the node count.
    pub fn hops(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[TypeKey] {
        &self.nodes
    }

    /// Adjacent pairs, in traversal order.
    pub fn edges(&self) -> impl Iterator<Item = (TypeKey, TypeKey)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    /// Contract check against the query that produced this path.
    ///
    /// A violation is a solver defect (or an inconsistent bound fed to the
    /// cache), never a recoverable miss — callers must not turn it into
    /// NotFound.
    pub(crate) fn verify(&self, from: TypeKey, to: TypeKey, max_nodes: usize) -> Result<()> {
        if self.nodes.len() < 2 {
            return Err(Error::InternalConsistency(format!(
                "resolved path has {} node(s), minimum is 2",
                self.nodes.len()
            )));
        }
        if self.source() != from || self.destination() != to {
            return Err(Error::InternalConsistency(format!(
                "resolved path {self} does not connect {from} to {to}"
            )));
        }
        if self.nodes.len() > max_nodes {
            return Err(Error::InternalConsistency(format!(
                "resolved path {self} has {} nodes, bound is {max_nodes}",
                self.nodes.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
