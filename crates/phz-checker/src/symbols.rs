//! Symbol metadata seam.
//!
//! The checker never reads declarations itself. It asks a [`SymbolTable`]
//! whether functions, classes and methods exist and what their signatures
//! are. [`SymbolRegistry`] is an in-memory table that hosts populate from
//! their own declaration scan.

use indexmap::IndexMap;
use phz_solver::{ClassHierarchy, UnionType, same_class};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::call_map;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParamInfo {
    /// Parameter name without `$`.
    pub name: String,
    pub declared_type: UnionType,
    pub by_ref: bool,
    pub is_optional: bool,
    pub is_variadic: bool,
}

impl ParamInfo {
    #[must_use]
    pub fn new(name: &str, declared_type: UnionType) -> Self {
        Self {
            name: name.trim_start_matches('$').to_string(),
            declared_type,
            by_ref: false,
            is_optional: false,
            is_variadic: false,
        }
    }

    #[must_use]
    pub fn by_ref(mut self) -> Self {
        self.by_ref = true;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionSignature {
    /// Name as declared, used in diagnostics.
    pub name: String,
    pub params: Vec<ParamInfo>,
    pub return_type: Option<UnionType>,
    /// Accepts arguments beyond its declared parameters (`func_get_args`).
    pub is_variadic: bool,
}

impl FunctionSignature {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
            return_type: None,
            is_variadic: false,
        }
    }

    #[must_use]
    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn returning(mut self, return_type: UnionType) -> Self {
        self.return_type = Some(return_type);
        self
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    /// Whether extra arguments are accepted, through the flag or a variadic parameter.
    #[must_use]
    pub fn accepts_variadic(&self) -> bool {
        self.is_variadic || self.params.iter().any(|param| param.is_variadic)
    }

    /// The parameter receiving argument `offset`; a trailing variadic
    /// parameter receives every argument past its position.
    #[must_use]
    pub fn param_for_offset(&self, offset: usize) -> Option<&ParamInfo> {
        self.params
            .get(offset)
            .or_else(|| self.params.last().filter(|param| param.is_variadic))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodInfo {
    pub signature: FunctionSignature,
    /// Class that declares the method, as written.
    pub declaring_class: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_deprecated: bool,
}

impl MethodInfo {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            signature: FunctionSignature::new(name),
            declaring_class: String::new(),
            visibility: Visibility::Public,
            is_static: false,
            is_deprecated: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.signature.name
    }

    /// `Declaring::method` as written, used in diagnostics.
    #[must_use]
    pub fn cased_id(&self) -> String {
        format!("{}::{}", self.declaring_class, self.signature.name)
    }

    #[must_use]
    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.signature.params.push(param);
        self
    }

    #[must_use]
    pub fn returning(mut self, return_type: UnionType) -> Self {
        self.signature.return_type = Some(return_type);
        self
    }

    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.is_deprecated = true;
        self
    }
}

/// A class or interface declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassInfo {
    pub name: String,
    pub parent: Option<String>,
    pub interfaces: Vec<String>,
    /// Methods keyed by lowercased name.
    pub methods: IndexMap<String, MethodInfo>,
}

impl ClassInfo {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            interfaces: Vec::new(),
            methods: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn extends(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: &str) -> Self {
        self.interfaces.push(interface.to_string());
        self
    }

    #[must_use]
    pub fn with_method(mut self, mut method: MethodInfo) -> Self {
        method.declaring_class = self.name.clone();
        self.methods
            .insert(method.name().to_ascii_lowercase(), method);
        self
    }
}

/// Read access to declared symbols.
///
/// Names are looked up ASCII case-insensitively. Implementations must be
/// `Sync` so independent files can be checked on separate threads against
/// one table.
pub trait SymbolTable: ClassHierarchy + Sync {
    /// A user-declared function.
    fn function(&self, name: &str) -> Option<&FunctionSignature>;

    /// A builtin function from the call map.
    fn builtin_function(&self, name: &str) -> Option<&FunctionSignature> {
        call_map::builtin_signature(name)
    }

    fn function_exists(&self, name: &str) -> bool {
        self.function(name).is_some()
    }

    /// Whether `name` is a declared class or interface.
    fn class_exists(&self, name: &str) -> bool;

    /// A method declared on `class` or inherited from its parents.
    fn method(&self, class: &str, method: &str) -> Option<&MethodInfo>;

    fn has_method(&self, class: &str, method: &str) -> bool {
        self.method(class, method).is_some()
    }

    fn parent_class(&self, class: &str) -> Option<&str>;

    fn is_builtin_variadic(&self, name: &str) -> bool {
        self.builtin_function(name)
            .is_some_and(FunctionSignature::accepts_variadic)
    }
}

fn symbol_key(name: &str) -> String {
    name.trim_start_matches('\\').to_ascii_lowercase()
}

#[derive(Clone, Debug, Default)]
pub struct SymbolRegistry {
    functions: FxHashMap<String, FunctionSignature>,
    classes: FxHashMap<String, ClassInfo>,
}

impl SymbolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, function: FunctionSignature) -> &mut Self {
        self.functions.insert(symbol_key(&function.name), function);
        self
    }

    pub fn add_class(&mut self, class: ClassInfo) -> &mut Self {
        self.classes.insert(symbol_key(&class.name), class);
        self
    }

    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(&symbol_key(name))
    }

    /// `class` followed by its parents, nearest first. Stops at the first
    /// missing class or a repeated name.
    fn class_chain<'s>(&'s self, class: &str) -> impl Iterator<Item = &'s ClassInfo> + 's {
        let mut seen = FxHashSet::default();
        let mut next = self.class(class);
        std::iter::from_fn(move || {
            let current = next?;
            if !seen.insert(symbol_key(&current.name)) {
                return None;
            }
            next = current.parent.as_deref().and_then(|parent| self.class(parent));
            Some(current)
        })
    }
}

impl ClassHierarchy for SymbolRegistry {
    fn class_extends_or_implements(&self, child: &str, ancestor: &str) -> bool {
        let mut pending = vec![symbol_key(child)];
        let mut seen = FxHashSet::default();
        while let Some(current) = pending.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Some(info) = self.classes.get(&current) else {
                continue;
            };
            for related in info.parent.iter().chain(info.interfaces.iter()) {
                if same_class(related, ancestor) {
                    return true;
                }
                pending.push(symbol_key(related));
            }
        }
        false
    }
}

impl SymbolTable for SymbolRegistry {
    fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(&symbol_key(name))
    }

    fn class_exists(&self, name: &str) -> bool {
        self.classes.contains_key(&symbol_key(name))
    }

    fn method(&self, class: &str, method: &str) -> Option<&MethodInfo> {
        let key = method.to_ascii_lowercase();
        self.class_chain(class)
            .find_map(|info| info.methods.get(&key))
    }

    fn parent_class(&self, class: &str) -> Option<&str> {
        self.class(class)?.parent.as_deref()
    }
}

#[cfg(test)]
#[path = "../tests/symbols_tests.rs"]
mod symbols_tests;
