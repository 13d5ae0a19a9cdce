//! Function and constructor call resolution.
//!
//! Resolves `name(...)` and `new Class(...)` to a `CallTarget`, applies the
//! dynamic escape hatches that narrow the `Context`, checks the arguments
//! and records the call's type.

use phz_solver::{AtomicType, GenericType, UnionType};
use tracing::debug;

use crate::ast::{Arg, CallExpr, Callee, ClassRef, Expr, ExprKind, FunctionCall, NewExpr};
use crate::call_checker::CallTarget;
use crate::call_map;
use crate::context::{CheckGates, Context};
use crate::state::{CheckResult, CheckerState};
use crate::symbols::FunctionSignature;

/// Classes whose constructor re-derives type parameters from its first argument.
const COLLECTION_CONSTRUCTORS: &[&str] = &["ArrayIterator"];

impl<'a> CheckerState<'a> {
    pub(crate) fn check_call(
        &mut self,
        expr: &Expr,
        call: &CallExpr,
        ctx: &mut Context,
    ) -> CheckResult {
        match call {
            CallExpr::Function(call) => self.check_function_call(expr, call, ctx),
            CallExpr::New(new) => self.check_new(expr, new, ctx),
            CallExpr::Method(call) => self.check_method_call(expr, call, ctx),
            CallExpr::StaticMethod(call) => self.check_static_call(expr, call, ctx),
        }
    }

    /// Walk the arguments of a call whose target is unknown and type it `mixed`.
    pub(crate) fn check_unresolved_call(
        &mut self,
        expr: &Expr,
        args: &[Arg],
        ctx: &mut Context,
    ) -> CheckResult {
        self.set_expr_type(expr.id, UnionType::mixed());
        self.check_call_arguments(args, &CallTarget::Unresolved, ctx, expr.line, false)
    }

    pub(crate) fn check_function_call(
        &mut self,
        expr: &Expr,
        call: &FunctionCall,
        ctx: &mut Context,
    ) -> CheckResult {
        let line = expr.line;
        let name = match &call.callee {
            Callee::Name(name) => name.as_str(),
            Callee::Dynamic(_) => {
                debug!(line, "dynamic callee; arguments walked unresolved");
                return self.check_unresolved_call(expr, &call.args, ctx);
            }
        };

        self.apply_escape_hatch(name, &call.args, line, ctx)?;

        if !ctx.check_functions() {
            return self.check_unresolved_call(expr, &call.args, ctx);
        }

        let symbols = self.symbols;
        let builtin = symbols.builtin_function(name);
        let user_function = if builtin.is_none() {
            symbols.function(name)
        } else {
            None
        };
        let target = if builtin.is_some() || user_function.is_some() {
            CallTarget::function(name)
        } else {
            self.report_undefined_function(name, line)?;
            CallTarget::Unresolved
        };

        self.check_call_arguments(&call.args, &target, ctx, line, false)?;

        let return_type = if let Some(builtin) = builtin {
            self.builtin_call_type(builtin, &call.args)
        } else if let Some(function) = user_function {
            match self.fleshed_return_type(function, &call.args, None, None) {
                Ok(return_type) => return_type.unwrap_or_else(UnionType::mixed),
                Err(err) => {
                    self.report_unresolved_placeholder(&err, &function.name, line)?;
                    UnionType::mixed()
                }
            }
        } else {
            UnionType::mixed()
        };
        debug!(function = name, %return_type, "function call resolved");
        self.set_expr_type(expr.id, return_type);
        Ok(())
    }

    fn builtin_call_type(&self, signature: &FunctionSignature, args: &[Arg]) -> UnionType {
        if signature.name == "get_class"
            && let Some(ExprKind::Variable(var)) = args.first().map(|arg| &arg.value.kind)
        {
            return UnionType::type_variable(var.as_str());
        }
        let arg_types: Vec<Option<&UnionType>> = args
            .iter()
            .map(|arg| self.expr_type(arg.value.id))
            .collect();
        call_map::builtin_return_type(signature, &arg_types)
    }

    /// Narrow the context for calls that guard dynamic code, and flag unsafe ones.
    fn apply_escape_hatch(
        &mut self,
        name: &str,
        args: &[Arg],
        line: u32,
        ctx: &mut Context,
    ) -> CheckResult {
        let first_literal = args.first().and_then(|arg| arg.value.string_literal());
        match name.trim_start_matches('\\').to_ascii_lowercase().as_str() {
            "method_exists" => ctx.disable(CheckGates::METHODS),
            "class_exists" => match first_literal {
                Some(class) => ctx.add_phantom_class(class),
                None => ctx.disable(CheckGates::CLASSES),
            },
            "function_exists" => ctx.disable(CheckGates::FUNCTIONS),
            "is_callable" => ctx.disable(CheckGates::METHODS | CheckGates::FUNCTIONS),
            "defined" => ctx.disable(CheckGates::CONSTS),
            "extract" => ctx.disable(CheckGates::VARIABLES),
            "define" => match (first_literal, args.get(1)) {
                (Some(const_name), Some(value)) => {
                    self.check_expression(&value.value, ctx)?;
                    let ty = self.type_or_mixed(value.value.id);
                    debug!(const_name, %ty, "constant defined");
                    self.set_const_type(const_name, ty);
                }
                _ => ctx.disable(CheckGates::CONSTS),
            },
            "var_dump" | "die" | "exit" => self.report_forbidden_code(name, line)?,
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn check_new(
        &mut self,
        expr: &Expr,
        new: &NewExpr,
        ctx: &mut Context,
    ) -> CheckResult {
        let line = expr.line;
        let class = match &new.class {
            ClassRef::Named(name) => {
                if ctx.check_classes() {
                    if ctx.is_phantom_class(name) {
                        debug!(class = %name, "phantom class; constructor not checked");
                        return self.check_unresolved_call(expr, &new.args, ctx);
                    }
                    if !self.symbols.class_exists(name) {
                        self.report_undefined_class(name, line)?;
                    }
                }
                Some(name.clone())
            }
            // `static` is approximated by the enclosing class
            ClassRef::SelfRef | ClassRef::StaticRef => ctx.self_class.clone(),
            ClassRef::ParentRef => ctx.parent_class.clone(),
            ClassRef::Dynamic(class_expr) => {
                self.check_expression(class_expr, ctx)?;
                None
            }
        };
        let Some(class) = class else {
            return self.check_unresolved_call(expr, &new.args, ctx);
        };

        self.set_expr_type(expr.id, UnionType::object(class.as_str()));

        if !self.symbols.has_method(&class, "__construct") {
            for arg in &new.args {
                self.check_expression(&arg.value, ctx)?;
            }
            return Ok(());
        }

        let target = CallTarget::constructor(&class);
        self.check_call_arguments(&new.args, &target, ctx, line, false)?;

        if COLLECTION_CONSTRUCTORS
            .iter()
            .any(|collection| collection.eq_ignore_ascii_case(&class))
            && let Some(first_arg) = new.args.first()
            && let Some(arg_type) = self.expr_type(first_arg.value.id)
            && let Some(derived) = collection_type_from_argument(&class, arg_type)
        {
            debug!(class = %class, %derived, "collection type derived from constructor argument");
            self.set_expr_type(expr.id, derived);
        }
        Ok(())
    }
}

/// `Collection<K, V>` from an argument such as `array<K, V>`.
///
/// `V` combines every generic member's last parameter and `K` their first.
/// Members without parameters contribute nothing.
fn collection_type_from_argument(class: &str, arg_type: &UnionType) -> Option<UnionType> {
    if !arg_type.has_generic() {
        return None;
    }
    let mut key_type: Option<UnionType> = None;
    let mut value_type: Option<UnionType> = None;
    for generic in arg_type.iter().filter_map(|atomic| match atomic {
        AtomicType::Generic(generic) => Some(generic),
        _ => None,
    }) {
        let GenericType { params, .. } = generic;
        let (Some(first), Some(last)) = (params.first(), params.last()) else {
            continue;
        };
        value_type = Some(match value_type {
            Some(value) => value.combine(last),
            None => last.clone(),
        });
        key_type = Some(match key_type {
            Some(key) => key.combine(first),
            None => first.clone(),
        });
    }
    Some(UnionType::generic(
        class,
        vec![key_type?, value_type?],
    ))
}

#[cfg(test)]
#[path = "../tests/call_resolution_tests.rs"]
mod call_resolution_tests;
