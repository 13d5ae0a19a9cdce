//! Return type collection.
//!
//! Gathers the types of every `return` reachable by structure (not by
//! control flow) in a statement list. There is no reachability analysis:
//! both branches of an `if` contribute even when one cannot run.

use phz_common::limits::MAX_RETURN_COLLECTION_DEPTH;
use phz_solver::UnionType;
use tracing::warn;

use crate::ast::{ExprKind, Stmt};
use crate::state::{CheckerState, ExprTypes};

/// The union of the types returned from `stmts`.
///
/// A bare `return;` contributes `void`, which becomes `null` once combined
/// with any other type. Statements after a `return` in the same list are
/// not scanned. The result is empty when nothing returns.
#[must_use]
pub fn collect_return_types(stmts: &[Stmt], expr_types: &ExprTypes) -> UnionType {
    let mut collector = ReturnCollector {
        expr_types,
        collected: UnionType::empty(),
    };
    collector.collect(stmts, 0);
    collector.collected.finalize()
}

struct ReturnCollector<'t> {
    expr_types: &'t ExprTypes,
    collected: UnionType,
}

impl ReturnCollector<'_> {
    fn collect(&mut self, stmts: &[Stmt], depth: u32) {
        if depth >= MAX_RETURN_COLLECTION_DEPTH {
            warn!(depth, "statement nesting too deep; skipping nested returns");
            return;
        }
        let depth = depth + 1;
        for stmt in stmts {
            match stmt {
                Stmt::Return { value: None, .. } => {
                    self.collected.extend_from(&UnionType::void());
                    return;
                }
                Stmt::Return {
                    value: Some(value), ..
                } => {
                    let ty = self.expr_types.get(value.id).cloned().unwrap_or_else(|| {
                        match &value.kind {
                            ExprKind::Literal(literal) => literal.inferred_type(),
                            ExprKind::Array(items) if items.is_empty() => UnionType::array(),
                            _ => UnionType::mixed(),
                        }
                    });
                    self.collected.extend_from(&ty);
                    return;
                }
                Stmt::If {
                    then_branch,
                    else_ifs,
                    else_branch,
                    ..
                } => {
                    self.collect(then_branch, depth);
                    for else_if in else_ifs {
                        self.collect(&else_if.body, depth);
                    }
                    if let Some(else_branch) = else_branch {
                        self.collect(else_branch, depth);
                    }
                }
                Stmt::Try {
                    body,
                    catches,
                    finally,
                } => {
                    self.collect(body, depth);
                    for catch in catches {
                        self.collect(&catch.body, depth);
                    }
                    if let Some(finally) = finally {
                        self.collect(finally, depth);
                    }
                }
                Stmt::For { body, .. }
                | Stmt::Foreach { body, .. }
                | Stmt::While { body, .. }
                | Stmt::DoWhile { body, .. } => self.collect(body, depth),
                Stmt::Switch { cases, .. } => {
                    for case in cases {
                        self.collect(&case.body, depth);
                    }
                }
                Stmt::Expr(_) | Stmt::Echo(_) => {}
            }
        }
    }
}

impl<'a> CheckerState<'a> {
    /// Collect return types using the expression types inferred so far.
    #[must_use]
    pub fn collect_return_types(&self, stmts: &[Stmt]) -> UnionType {
        collect_return_types(stmts, &self.expr_types)
    }
}

#[cfg(test)]
#[path = "../tests/return_types_tests.rs"]
mod return_types_tests;
