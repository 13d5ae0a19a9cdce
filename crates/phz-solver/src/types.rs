//! Atomic and union type representation.
//!
//! A `UnionType` is the set of alternatives a value may hold. Members keep
//! their insertion order for display, but comparison is set-based and
//! duplicates are never stored.

use smallvec::SmallVec;

/// Built-in scalar kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Int,
    Float,
    String,
    Bool,
}

impl ScalarKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
        }
    }

    /// `int` and `float` convert into each other at runtime but are not
    /// accepted for one another by the checker.
    #[must_use]
    pub const fn is_numeric_neighbour(self, other: ScalarKind) -> bool {
        matches!(
            (self, other),
            (ScalarKind::Int, ScalarKind::Float) | (ScalarKind::Float, ScalarKind::Int)
        )
    }
}

/// A parameterized type such as `array<string, Foo>` or `ArrayIterator<int, Foo>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericType {
    pub base: String,
    pub params: Vec<UnionType>,
}

impl GenericType {
    #[must_use]
    pub fn new(base: impl Into<String>, params: Vec<UnionType>) -> Self {
        Self {
            base: base.into(),
            params,
        }
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.base.eq_ignore_ascii_case("array")
    }

    /// The key parameter: the first of two or more parameters.
    #[must_use]
    pub fn key_param(&self) -> Option<&UnionType> {
        if self.params.len() >= 2 {
            self.params.first()
        } else {
            None
        }
    }

    /// The value parameter: always the last parameter.
    #[must_use]
    pub fn value_param(&self) -> Option<&UnionType> {
        self.params.last()
    }
}

/// One alternative inside a union.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AtomicType {
    Mixed,
    Null,
    Void,
    Scalar(ScalarKind),
    ArrayLike,
    Object(String),
    Generic(GenericType),
    /// `self` in a signature: the class the member is resolved on.
    SelfPlaceholder,
    /// `static` or `$this`: the late-bound receiver class.
    StaticPlaceholder,
    /// `parent`: the parent of the class the member is resolved on.
    ParentPlaceholder,
    /// `$name`: the type of the argument bound to parameter `name`.
    TypeVariable(String),
}

impl AtomicType {
    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        AtomicType::Object(name.into())
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(
            self,
            AtomicType::SelfPlaceholder | AtomicType::StaticPlaceholder | AtomicType::ParentPlaceholder
        )
    }

    #[must_use]
    pub const fn is_null_like(&self) -> bool {
        matches!(self, AtomicType::Null | AtomicType::Void)
    }

    #[must_use]
    pub fn is_array_like(&self) -> bool {
        match self {
            AtomicType::ArrayLike => true,
            AtomicType::Generic(generic) => generic.is_array(),
            _ => false,
        }
    }

    /// Equality with class names compared case-insensitively.
    #[must_use]
    pub fn same_as(&self, other: &AtomicType) -> bool {
        match (self, other) {
            (AtomicType::Object(a), AtomicType::Object(b)) => same_class(a, b),
            (AtomicType::Generic(a), AtomicType::Generic(b)) => {
                same_class(&a.base, &b.base) && a.params == b.params
            }
            _ => self == other,
        }
    }

    /// The class this member denotes, for objects and non-array generics.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        match self {
            AtomicType::Object(name) => Some(name),
            AtomicType::Generic(generic) if !generic.is_array() => Some(&generic.base),
            _ => None,
        }
    }
}

/// Whether two class names denote the same class.
#[must_use]
pub fn same_class(a: &str, b: &str) -> bool {
    a.trim_start_matches('\\')
        .eq_ignore_ascii_case(b.trim_start_matches('\\'))
}

/// A set of atomic alternatives. The empty union means "never inferred".
#[derive(Clone, Debug, Default)]
pub struct UnionType {
    types: SmallVec<[AtomicType; 2]>,
}

impl UnionType {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(atomic: AtomicType) -> Self {
        let mut types = SmallVec::new();
        types.push(atomic);
        Self { types }
    }

    #[must_use]
    pub fn mixed() -> Self {
        Self::single(AtomicType::Mixed)
    }

    #[must_use]
    pub fn null() -> Self {
        Self::single(AtomicType::Null)
    }

    #[must_use]
    pub fn void() -> Self {
        Self::single(AtomicType::Void)
    }

    #[must_use]
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::single(AtomicType::Scalar(kind))
    }

    #[must_use]
    pub fn int() -> Self {
        Self::scalar(ScalarKind::Int)
    }

    #[must_use]
    pub fn float() -> Self {
        Self::scalar(ScalarKind::Float)
    }

    #[must_use]
    pub fn string() -> Self {
        Self::scalar(ScalarKind::String)
    }

    #[must_use]
    pub fn bool() -> Self {
        Self::scalar(ScalarKind::Bool)
    }

    #[must_use]
    pub fn array() -> Self {
        Self::single(AtomicType::ArrayLike)
    }

    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        Self::single(AtomicType::object(name))
    }

    #[must_use]
    pub fn generic(base: impl Into<String>, params: Vec<UnionType>) -> Self {
        Self::single(AtomicType::Generic(GenericType::new(base, params)))
    }

    #[must_use]
    pub fn type_variable(name: impl Into<String>) -> Self {
        Self::single(AtomicType::TypeVariable(name.into()))
    }

    /// Add a member unless an equal one is already present. The first
    /// spelling of a class name wins.
    pub fn insert(&mut self, atomic: AtomicType) -> bool {
        if self.types.iter().any(|existing| existing.same_as(&atomic)) {
            return false;
        }
        self.types.push(atomic);
        true
    }

    pub fn extend_from(&mut self, other: &UnionType) {
        for atomic in other.iter() {
            self.insert(atomic.clone());
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AtomicType> {
        self.types.iter()
    }

    #[must_use]
    pub fn types(&self) -> &[AtomicType] {
        &self.types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[must_use]
    pub fn contains(&self, atomic: &AtomicType) -> bool {
        self.types.contains(atomic)
    }

    #[must_use]
    pub fn is_mixed(&self) -> bool {
        self.contains(&AtomicType::Mixed)
    }

    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.contains(&AtomicType::Null)
    }

    /// Exactly `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.types.as_slice(), [AtomicType::Null])
    }

    /// Exactly `void`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self.types.as_slice(), [AtomicType::Void])
    }

    #[must_use]
    pub fn has_generic(&self) -> bool {
        self.types
            .iter()
            .any(|atomic| matches!(atomic, AtomicType::Generic(_)))
    }

    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.types.iter().any(AtomicType::is_placeholder)
    }

    #[must_use]
    pub fn has_type_variable(&self) -> bool {
        self.types
            .iter()
            .any(|atomic| matches!(atomic, AtomicType::TypeVariable(_)))
    }

    pub fn generics(&self) -> impl Iterator<Item = &GenericType> {
        self.types.iter().filter_map(|atomic| match atomic {
            AtomicType::Generic(generic) => Some(generic),
            _ => None,
        })
    }

    /// The generic member whose base is `base`, if any.
    #[must_use]
    pub fn generic_param(&self, base: &str) -> Option<&GenericType> {
        self.generics().find(|generic| same_class(&generic.base, base))
    }

    /// Apply the Void-collapse rule: in a union of more than one member,
    /// `void` becomes `null`.
    #[must_use]
    pub fn finalize(mut self) -> Self {
        if self.types.len() > 1 && self.contains(&AtomicType::Void) {
            let has_null = self.is_nullable();
            if has_null {
                self.types.retain(|atomic| *atomic != AtomicType::Void);
            } else {
                for atomic in &mut self.types {
                    if *atomic == AtomicType::Void {
                        *atomic = AtomicType::Null;
                    }
                }
            }
        }
        self
    }

    /// Set union of `self` and `other`, Void-collapsed.
    #[must_use]
    pub fn combine(&self, other: &UnionType) -> UnionType {
        combine_union_types(self, other)
    }
}

impl PartialEq for UnionType {
    fn eq(&self, other: &Self) -> bool {
        self.types.len() == other.types.len()
            && self
                .types
                .iter()
                .all(|atomic| other.types.iter().any(|theirs| theirs.same_as(atomic)))
    }
}

impl Eq for UnionType {}

impl From<AtomicType> for UnionType {
    fn from(atomic: AtomicType) -> Self {
        UnionType::single(atomic)
    }
}

impl FromIterator<AtomicType> for UnionType {
    fn from_iter<I: IntoIterator<Item = AtomicType>>(iter: I) -> Self {
        let mut union = UnionType::empty();
        for atomic in iter {
            union.insert(atomic);
        }
        union
    }
}

impl<'a> IntoIterator for &'a UnionType {
    type Item = &'a AtomicType;
    type IntoIter = std::slice::Iter<'a, AtomicType>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

/// Set union of two types followed by the Void-collapse rule.
#[must_use]
pub fn combine_union_types(a: &UnionType, b: &UnionType) -> UnionType {
    let mut combined = a.clone();
    combined.extend_from(b);
    combined.finalize()
}

#[cfg(test)]
#[path = "../tests/union_tests.rs"]
mod union_tests;
