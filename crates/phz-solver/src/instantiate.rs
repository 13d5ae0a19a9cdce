//! Fleshing out declared types at a call site.
//!
//! Signatures may mention `self`, `static`, `parent` and `$param` type
//! variables. Before a declared type is compared or returned, these are
//! replaced with the receiver class, its parent and the argument types bound
//! to the named parameters.

use smallvec::SmallVec;

use crate::compat::TypeError;
use crate::types::{AtomicType, GenericType, UnionType};

/// Call-site information used to flesh out a declared type.
#[derive(Clone, Debug, Default)]
pub struct FleshOutContext<'a> {
    pub self_class: Option<&'a str>,
    pub parent_class: Option<&'a str>,
    bindings: SmallVec<[(&'a str, &'a UnionType); 4]>,
}

impl<'a> FleshOutContext<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_class(self_class: Option<&'a str>, parent_class: Option<&'a str>) -> Self {
        Self {
            self_class,
            parent_class,
            bindings: SmallVec::new(),
        }
    }

    /// Bind parameter `param` (without `$`) to the type of its argument.
    pub fn bind(&mut self, param: &'a str, arg_type: &'a UnionType) {
        self.bindings.push((param, arg_type));
    }

    #[must_use]
    pub fn with_binding(mut self, param: &'a str, arg_type: &'a UnionType) -> Self {
        self.bind(param, arg_type);
        self
    }

    fn binding(&self, param: &str) -> Option<&'a UnionType> {
        self.bindings
            .iter()
            .find(|(name, _)| *name == param)
            .map(|(_, ty)| *ty)
    }
}

/// Substitute placeholders and type variables in `ty`.
///
/// Unbound type variables are kept as they are. A placeholder with no class
/// to resolve to is an error.
pub fn flesh_out(ty: &UnionType, cx: &FleshOutContext<'_>) -> Result<UnionType, TypeError> {
    let mut fleshed = UnionType::empty();
    for atomic in ty {
        match atomic {
            AtomicType::SelfPlaceholder | AtomicType::StaticPlaceholder => {
                let class = cx.self_class.ok_or_else(|| TypeError::unresolved(atomic))?;
                fleshed.insert(AtomicType::object(class));
            }
            AtomicType::ParentPlaceholder => {
                let class = cx
                    .parent_class
                    .ok_or_else(|| TypeError::unresolved(atomic))?;
                fleshed.insert(AtomicType::object(class));
            }
            AtomicType::TypeVariable(name) => match cx.binding(name) {
                Some(bound) => fleshed.extend_from(bound),
                None => {
                    fleshed.insert(atomic.clone());
                }
            },
            AtomicType::Generic(generic) => {
                let params = generic
                    .params
                    .iter()
                    .map(|param| flesh_out(param, cx))
                    .collect::<Result<Vec<_>, _>>()?;
                fleshed.insert(AtomicType::Generic(GenericType::new(
                    generic.base.clone(),
                    params,
                )));
            }
            _ => {
                fleshed.insert(atomic.clone());
            }
        }
    }
    Ok(fleshed)
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod instantiate_tests;
