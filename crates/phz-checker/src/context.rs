//! Mutable analysis state for one statement-list traversal.
//!
//! The statement walker owns the `Context` lifecycle and forks it across
//! branches with `clone`. The call checker reads it and narrows it: escape
//! hatches turn gates off, `class_exists` guards register phantom classes and
//! by-reference arguments introduce variables.

use std::hash::BuildHasherDefault;

use bitflags::bitflags;
use indexmap::IndexMap;
use phz_solver::UnionType;
use rustc_hash::{FxHashSet, FxHasher};

bitflags! {
    /// Categories of checking that can be switched off by dynamic escape hatches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CheckGates: u8 {
        const CLASSES = 1 << 0;
        const METHODS = 1 << 1;
        const FUNCTIONS = 1 << 2;
        const CONSTS = 1 << 3;
        const VARIABLES = 1 << 4;
    }
}

pub type VarMap = IndexMap<String, UnionType, BuildHasherDefault<FxHasher>>;

#[derive(Clone, Debug)]
pub struct Context {
    /// Known variables and property chains, keyed by var-id (`$x`, `$this->y`).
    pub vars_in_scope: VarMap,
    /// Var-ids that may have been assigned on some path.
    pub vars_possibly_in_scope: FxHashSet<String>,
    pub gates: CheckGates,
    pub self_class: Option<String>,
    pub parent_class: Option<String>,
    /// Inside a static method body.
    pub is_static: bool,
    /// Lowercased class names guarded by a `class_exists` check.
    phantom_classes: FxHashSet<String>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// A context outside any class with every gate on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vars_in_scope: VarMap::default(),
            vars_possibly_in_scope: FxHashSet::default(),
            gates: CheckGates::all(),
            self_class: None,
            parent_class: None,
            is_static: false,
            phantom_classes: FxHashSet::default(),
        }
    }

    /// A context for a method body of `self_class`.
    #[must_use]
    pub fn for_class(self_class: &str, parent_class: Option<&str>) -> Self {
        Self {
            self_class: Some(self_class.to_string()),
            parent_class: parent_class.map(str::to_string),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn check_classes(&self) -> bool {
        self.gates.contains(CheckGates::CLASSES)
    }

    pub fn check_methods(&self) -> bool {
        self.gates.contains(CheckGates::METHODS)
    }

    pub fn check_functions(&self) -> bool {
        self.gates.contains(CheckGates::FUNCTIONS)
    }

    pub fn check_consts(&self) -> bool {
        self.gates.contains(CheckGates::CONSTS)
    }

    pub fn check_variables(&self) -> bool {
        self.gates.contains(CheckGates::VARIABLES)
    }

    pub fn disable(&mut self, gates: CheckGates) {
        self.gates.remove(gates);
    }

    pub fn add_phantom_class(&mut self, class: &str) {
        self.phantom_classes
            .insert(class.trim_start_matches('\\').to_ascii_lowercase());
    }

    #[must_use]
    pub fn is_phantom_class(&self, class: &str) -> bool {
        self.phantom_classes
            .contains(&class.trim_start_matches('\\').to_ascii_lowercase())
    }

    pub fn set_var(&mut self, var_id: impl Into<String>, ty: UnionType) {
        let var_id = var_id.into();
        self.vars_possibly_in_scope.insert(var_id.clone());
        self.vars_in_scope.insert(var_id, ty);
    }

    #[must_use]
    pub fn var_type(&self, var_id: &str) -> Option<&UnionType> {
        self.vars_in_scope.get(var_id)
    }

    #[must_use]
    pub fn is_possibly_in_scope(&self, var_id: &str) -> bool {
        self.vars_possibly_in_scope.contains(var_id)
    }

    /// Record that `var_id` exists with an unknown type.
    pub fn assume_var_exists(&mut self, var_id: &str) {
        self.set_var(var_id, UnionType::mixed());
    }
}

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod context_tests;
