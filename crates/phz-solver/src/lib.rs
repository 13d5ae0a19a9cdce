//! Union Type Algebra
//!
//! This crate implements the type representation the checker reasons with:
//!
//! - **`UnionType`**: a set of `AtomicType` alternatives with a deterministic
//!   pipe-delimited textual form (`int|array<string, Foo>|null`)
//! - **Compatibility**: the three-way parameter verdict (exact, coerced,
//!   incompatible) computed against a `ClassHierarchy`
//! - **Fleshing out**: substitution of `self`/`static`/`parent` placeholders
//!   and `$param` type variables with call-site types
mod class_hierarchy;
pub mod compat;
mod format;
mod instantiate;
pub mod types;

pub use class_hierarchy::{ClassHierarchy, NoHierarchy};
pub use compat::{ParamMatch, TypeError, does_param_match};
pub use format::TypeParseError;
pub use instantiate::{FleshOutContext, flesh_out};
pub use types::{AtomicType, GenericType, ScalarKind, UnionType, combine_union_types, same_class};
