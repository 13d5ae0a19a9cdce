//! Parameter compatibility.
//!
//! `does_param_match` answers whether an argument of type `input` may be
//! passed to a parameter declared as `declared`. The verdict has three tiers:
//!
//! - exact: every input member has an identical declared counterpart
//! - coerced: accepted, but at least one member only matched through a
//!   class-hierarchy relation
//! - incompatible: some input member has no counterpart; `scalar_fallback`
//!   marks the case where it would have matched through an `int`/`float`
//!   conversion

use phz_common::limits::MAX_GENERIC_COMPARE_DEPTH;
use tracing::trace;

use crate::class_hierarchy::ClassHierarchy;
use crate::types::{AtomicType, GenericType, UnionType, same_class};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamMatch {
    pub matched: bool,
    pub scalar_fallback: bool,
    pub coerced: bool,
}

impl ParamMatch {
    pub const EXACT: ParamMatch = ParamMatch {
        matched: true,
        scalar_fallback: false,
        coerced: false,
    };

    pub const COERCED: ParamMatch = ParamMatch {
        matched: true,
        scalar_fallback: false,
        coerced: true,
    };

    pub const NONE: ParamMatch = ParamMatch {
        matched: false,
        scalar_fallback: false,
        coerced: false,
    };

    const SCALAR_FALLBACK: ParamMatch = ParamMatch {
        matched: false,
        scalar_fallback: true,
        coerced: false,
    };

    #[must_use]
    pub const fn is_exact(self) -> bool {
        self.matched && !self.coerced
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("cannot compare against unresolved `{placeholder}`")]
    UnresolvedPlaceholder { placeholder: String },
}

impl TypeError {
    pub(crate) fn unresolved(atomic: &AtomicType) -> Self {
        TypeError::UnresolvedPlaceholder {
            placeholder: atomic.to_string(),
        }
    }
}

/// Compare an argument type against a declared parameter type.
pub fn does_param_match<H: ClassHierarchy + ?Sized>(
    input: &UnionType,
    declared: &UnionType,
    hierarchy: &H,
) -> Result<ParamMatch, TypeError> {
    let mut matcher = ParamMatcher {
        hierarchy,
        depth: 0,
    };
    matcher.union_matches(input, declared)
}

struct ParamMatcher<'h, H: ?Sized> {
    hierarchy: &'h H,
    depth: u32,
}

impl<H: ClassHierarchy + ?Sized> ParamMatcher<'_, H> {
    fn union_matches(
        &mut self,
        input: &UnionType,
        declared: &UnionType,
    ) -> Result<ParamMatch, TypeError> {
        if declared.is_mixed() {
            return Ok(ParamMatch::EXACT);
        }
        reject_placeholders(input)?;
        reject_placeholders(declared)?;
        if input.is_mixed() || input.has_type_variable() || declared.has_type_variable() {
            return Ok(ParamMatch::EXACT);
        }

        let mut verdict = ParamMatch::EXACT;
        for input_part in input.iter().filter(|atomic| !atomic.is_null_like()) {
            let mut part_matched = false;
            let mut part_scalar_fallback = false;
            for declared_part in declared.iter().filter(|atomic| !atomic.is_null_like()) {
                let pair = self.atomic_matches(input_part, declared_part)?;
                if pair.matched {
                    part_matched = true;
                    verdict.coerced |= pair.coerced;
                    verdict.scalar_fallback |= pair.scalar_fallback;
                    break;
                }
                part_scalar_fallback |= pair.scalar_fallback;
            }
            if !part_matched {
                trace!(input = %input_part, declared = %declared, "no compatible member");
                verdict.matched = false;
                verdict.scalar_fallback |= part_scalar_fallback;
            }
        }
        Ok(verdict)
    }

    fn atomic_matches(
        &mut self,
        input: &AtomicType,
        declared: &AtomicType,
    ) -> Result<ParamMatch, TypeError> {
        let verdict = match (input, declared) {
            (AtomicType::Scalar(a), AtomicType::Scalar(b)) => {
                if a == b {
                    ParamMatch::EXACT
                } else if a.is_numeric_neighbour(*b) {
                    ParamMatch::SCALAR_FALLBACK
                } else {
                    ParamMatch::NONE
                }
            }
            (AtomicType::ArrayLike, AtomicType::ArrayLike) => ParamMatch::EXACT,
            (AtomicType::ArrayLike, AtomicType::Generic(g))
            | (AtomicType::Generic(g), AtomicType::ArrayLike)
                if g.is_array() =>
            {
                ParamMatch::EXACT
            }
            (AtomicType::Generic(a), AtomicType::Generic(b)) => self.generic_matches(a, b)?,
            (AtomicType::Object(_) | AtomicType::Generic(_), AtomicType::Object(_) | AtomicType::Generic(_)) => {
                match (input.class_name(), declared.class_name()) {
                    (Some(a), Some(b)) => self.class_matches(a, b),
                    _ => ParamMatch::NONE,
                }
            }
            _ => ParamMatch::NONE,
        };
        Ok(verdict)
    }

    fn class_matches(&self, input: &str, declared: &str) -> ParamMatch {
        if same_class(input, declared) {
            ParamMatch::EXACT
        } else if self.hierarchy.class_extends_or_implements(input, declared)
            || self.hierarchy.class_extends_or_implements(declared, input)
        {
            ParamMatch::COERCED
        } else {
            ParamMatch::NONE
        }
    }

    fn generic_matches(
        &mut self,
        input: &GenericType,
        declared: &GenericType,
    ) -> Result<ParamMatch, TypeError> {
        let mut verdict = if input.is_array() && declared.is_array() {
            ParamMatch::EXACT
        } else if input.is_array() || declared.is_array() {
            return Ok(ParamMatch::NONE);
        } else {
            self.class_matches(&input.base, &declared.base)
        };
        if !verdict.matched || self.depth >= MAX_GENERIC_COMPARE_DEPTH {
            return Ok(verdict);
        }

        self.depth += 1;
        let result = self.generic_params_match(input, declared);
        self.depth -= 1;

        for nested in result? {
            verdict.matched &= nested.matched;
            verdict.coerced |= nested.coerced;
            verdict.scalar_fallback |= nested.scalar_fallback;
        }
        Ok(verdict)
    }

    fn generic_params_match(
        &mut self,
        input: &GenericType,
        declared: &GenericType,
    ) -> Result<Vec<ParamMatch>, TypeError> {
        let mut verdicts = Vec::with_capacity(2);
        if let (Some(input_key), Some(declared_key)) = (input.key_param(), declared.key_param()) {
            verdicts.push(self.union_matches(input_key, declared_key)?);
        }
        if let (Some(input_value), Some(declared_value)) =
            (input.value_param(), declared.value_param())
        {
            verdicts.push(self.union_matches(input_value, declared_value)?);
        }
        Ok(verdicts)
    }
}

fn reject_placeholders(ty: &UnionType) -> Result<(), TypeError> {
    match ty.iter().find(|atomic| atomic.is_placeholder()) {
        Some(placeholder) => Err(TypeError::unresolved(placeholder)),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "../tests/compat_tests.rs"]
mod compat_tests;
