//! Expression type computation dispatcher.
//!
//! `ExpressionDispatcher` maps each expression kind to the checking method
//! that computes its type. Calls are handed to the call resolvers; the other
//! kinds are simple enough to type here.

use phz_common::diagnostic_messages;
use phz_common::limits::MAX_EXPR_CHECK_DEPTH;
use phz_solver::{AtomicType, ScalarKind, UnionType};
use tracing::{trace, warn};

use crate::ast::{ArrayItem, Expr, ExprId, ExprKind};
use crate::context::Context;
use crate::state::{CheckResult, CheckerState};

pub struct ExpressionDispatcher<'s, 'a> {
    pub checker: &'s mut CheckerState<'a>,
}

impl<'s, 'a> ExpressionDispatcher<'s, 'a> {
    pub fn new(checker: &'s mut CheckerState<'a>) -> Self {
        Self { checker }
    }

    pub fn dispatch(&mut self, expr: &Expr, ctx: &mut Context) -> CheckResult {
        let checker = &mut *self.checker;
        match &expr.kind {
            ExprKind::Literal(literal) => {
                checker.set_expr_type(expr.id, literal.inferred_type());
                Ok(())
            }
            ExprKind::Array(items) => checker.check_array_literal(expr.id, items, ctx),
            ExprKind::Variable(name) => checker.check_variable(expr, name, ctx),
            ExprKind::PropertyFetch { object, .. } => {
                checker.check_expression(object, ctx)?;
                let ty = expr
                    .var_id()
                    .and_then(|var_id| ctx.var_type(&var_id).cloned())
                    .unwrap_or_else(UnionType::mixed);
                checker.set_expr_type(expr.id, ty);
                Ok(())
            }
            ExprKind::ArrayDimFetch { base, dim } => {
                checker.check_expression(base, ctx)?;
                if let Some(dim) = dim {
                    checker.check_expression(dim, ctx)?;
                }
                let ty = checker
                    .expr_type(base.id)
                    .and_then(|base_type| base_type.generic_param("array"))
                    .and_then(|array| array.value_param())
                    .cloned()
                    .unwrap_or_else(UnionType::mixed);
                checker.set_expr_type(expr.id, ty);
                Ok(())
            }
            ExprKind::ConstFetch(name) => checker.check_const_fetch(expr, name, ctx),
            ExprKind::Closure(_) => {
                checker.set_expr_type(expr.id, UnionType::object("Closure"));
                Ok(())
            }
            ExprKind::Call(call) => checker.check_call(expr, call, ctx),
        }
    }
}

impl<'a> CheckerState<'a> {
    /// Compute and record the type of `expr`, checking any calls inside it.
    pub fn check_expression(&mut self, expr: &Expr, ctx: &mut Context) -> CheckResult {
        if self.expr_depth >= MAX_EXPR_CHECK_DEPTH {
            warn!(line = expr.line, "expression nesting too deep; typing as mixed");
            self.set_expr_type(expr.id, UnionType::mixed());
            return Ok(());
        }
        self.expr_depth += 1;
        let result = ExpressionDispatcher::new(self).dispatch(expr, ctx);
        self.expr_depth -= 1;
        result
    }

    /// The recorded type of `id`, or `mixed` when none was inferred.
    pub(crate) fn type_or_mixed(&self, id: ExprId) -> UnionType {
        self.expr_type(id).cloned().unwrap_or_else(UnionType::mixed)
    }

    fn check_array_literal(
        &mut self,
        id: ExprId,
        items: &[ArrayItem],
        ctx: &mut Context,
    ) -> CheckResult {
        if items.is_empty() {
            self.set_expr_type(id, UnionType::array());
            return Ok(());
        }
        let mut key_type = UnionType::empty();
        let mut value_type = UnionType::empty();
        for item in items {
            match &item.key {
                Some(key) => {
                    self.check_expression(key, ctx)?;
                    key_type.extend_from(&self.type_or_mixed(key.id));
                }
                None => {
                    key_type.insert(AtomicType::Scalar(ScalarKind::Int));
                }
            }
            self.check_expression(&item.value, ctx)?;
            value_type.extend_from(&self.type_or_mixed(item.value.id));
        }
        self.set_expr_type(
            id,
            UnionType::generic("array", vec![key_type.finalize(), value_type.finalize()]),
        );
        Ok(())
    }

    fn check_variable(&mut self, expr: &Expr, name: &str, ctx: &Context) -> CheckResult {
        if name == "this" {
            let ty = ctx
                .self_class
                .as_deref()
                .map(UnionType::object)
                .unwrap_or_else(UnionType::mixed);
            self.set_expr_type(expr.id, ty);
            return Ok(());
        }
        let var_id = format!("${name}");
        if let Some(ty) = ctx.var_type(&var_id) {
            self.set_expr_type(expr.id, ty.clone());
            return Ok(());
        }
        if ctx.check_variables() && !ctx.is_possibly_in_scope(&var_id) {
            self.report(
                diagnostic_messages::CANNOT_FIND_REFERENCED_VARIABLE,
                &[&var_id],
                expr.line,
            )?;
        }
        trace!(%var_id, "variable type unknown");
        self.set_expr_type(expr.id, UnionType::mixed());
        Ok(())
    }

    fn check_const_fetch(&mut self, expr: &Expr, name: &str, ctx: &Context) -> CheckResult {
        let ty = match name.to_ascii_lowercase().as_str() {
            "true" | "false" => Some(UnionType::bool()),
            "null" => Some(UnionType::null()),
            _ => self.const_type(name).cloned(),
        };
        let ty = match ty {
            Some(ty) => ty,
            None => {
                if ctx.check_consts() {
                    self.report(diagnostic_messages::CONST_IS_NOT_DEFINED, &[name], expr.line)?;
                }
                UnionType::mixed()
            }
        };
        self.set_expr_type(expr.id, ty);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/dispatch_tests.rs"]
mod dispatch_tests;
