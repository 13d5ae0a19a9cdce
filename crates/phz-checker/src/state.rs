//! Checker state.
//!
//! `CheckerState` is the per-file state shared by every checking method. Its
//! impl blocks are split across modules: `dispatch` (expressions),
//! `call_resolution` and `method_resolution` (call targets), `call_checker`
//! (arguments), `return_types` and `error_reporter`.

use phz_common::{CheckerOptions, Issue, IssueBuffer, IssueKindSet};
use phz_solver::UnionType;
use rustc_hash::FxHashMap;

use crate::ast::ExprId;
use crate::symbols::SymbolTable;

/// A check stopped because the sink asked to halt.
///
/// Every checking method returns `Err(CheckAborted)` once halted, and callers
/// propagate it with `?` up to the call boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckAborted;

pub type CheckResult<T = ()> = Result<T, CheckAborted>;

/// Inferred expression types, keyed by expression id.
#[derive(Clone, Debug, Default)]
pub struct ExprTypes {
    types: FxHashMap<ExprId, UnionType>,
}

impl ExprTypes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: ExprId) -> Option<&UnionType> {
        self.types.get(&id)
    }

    pub fn insert(&mut self, id: ExprId, ty: UnionType) {
        self.types.insert(id, ty);
    }

    #[must_use]
    pub fn contains(&self, id: ExprId) -> bool {
        self.types.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

pub struct CheckerState<'a> {
    pub symbols: &'a dyn SymbolTable,
    pub file_name: String,
    pub(crate) issues: IssueBuffer,
    /// Issue kinds muted for the statement being checked.
    pub(crate) suppressed_issues: IssueKindSet,
    pub(crate) expr_types: ExprTypes,
    /// Constants registered through `define()`, by name.
    pub(crate) const_types: FxHashMap<String, UnionType>,
    /// First line each by-reference variable was introduced on.
    pub(crate) registered_vars: FxHashMap<String, u32>,
    pub(crate) expr_depth: u32,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        symbols: &'a dyn SymbolTable,
        options: CheckerOptions,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            symbols,
            file_name: file_name.into(),
            issues: IssueBuffer::new(options),
            suppressed_issues: IssueKindSet::new(),
            expr_types: ExprTypes::new(),
            const_types: FxHashMap::default(),
            registered_vars: FxHashMap::default(),
            expr_depth: 0,
        }
    }

    #[must_use]
    pub fn options(&self) -> &CheckerOptions {
        self.issues.options()
    }

    #[must_use]
    pub fn issues(&self) -> &IssueBuffer {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues.into_issues()
    }

    /// Replace the suppression list for the next statement.
    pub fn set_suppressed_issues(&mut self, suppressed: IssueKindSet) {
        self.suppressed_issues = suppressed;
    }

    #[must_use]
    pub fn expr_type(&self, id: ExprId) -> Option<&UnionType> {
        self.expr_types.get(id)
    }

    /// Record an inferred type. Hosts may pre-annotate expressions they typed themselves.
    pub fn set_expr_type(&mut self, id: ExprId, ty: UnionType) {
        self.expr_types.insert(id, ty);
    }

    #[must_use]
    pub fn expr_types(&self) -> &ExprTypes {
        &self.expr_types
    }

    #[must_use]
    pub fn const_type(&self, name: &str) -> Option<&UnionType> {
        self.const_types.get(name)
    }

    pub fn set_const_type(&mut self, name: &str, ty: UnionType) {
        self.const_types.insert(name.to_string(), ty);
    }

    /// Note a variable introduced by a by-reference argument.
    pub(crate) fn register_variable(&mut self, var_id: &str, line: u32) {
        self.registered_vars
            .entry(var_id.to_string())
            .or_insert(line);
    }

    #[must_use]
    pub fn registered_variable_line(&self, var_id: &str) -> Option<u32> {
        self.registered_vars.get(var_id).copied()
    }
}
