//! TypeKey — stable identity for a concrete runtime type.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of one vertex in the type graph.
///
/// Equality and hashing use only the `TypeId`; the name rides along purely
/// for diagnostics and `Display`.
#[derive(Debug, Clone, Copy, Eq)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for a concrete type.
    pub fn of<T: 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>() }
    }

    /// Fully qualified type name, as reported by the compiler.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name with module path stripped, for compact log/display output.
    pub fn short_name(&self) -> &'static str {
        // Generic arguments may themselves contain `::`; split only the
        // leading path segment of the outer type.
        match self.name.find('<') {
            Some(lt) => {
                let head = &self.name[..lt];
                let start = head.rfind("::").map(|i| i + 2).unwrap_or(0);
                &self.name[start..]
            }
            None => {
                let start = self.name.rfind("::").map(|i| i + 2).unwrap_or(0);
                &self.name[start..]
            }
        }
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
