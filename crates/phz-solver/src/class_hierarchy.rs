//! Class hierarchy seam.
//!
//! The solver compares class types nominally. Whether one class extends or
//! implements another is answered by the host's symbol table through this
//! trait.

pub trait ClassHierarchy {
    /// Whether `child` extends or implements `ancestor`, directly or
    /// transitively. Names compare ASCII case-insensitively.
    fn class_extends_or_implements(&self, child: &str, ancestor: &str) -> bool;
}

/// A hierarchy in which no class is related to any other.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHierarchy;

impl ClassHierarchy for NoHierarchy {
    fn class_extends_or_implements(&self, _child: &str, _ancestor: &str) -> bool {
        false
    }
}
