//! Argument checking against a resolved call target.
//!
//! Arguments are checked in three steps:
//! 1. Every argument expression is evaluated. By-reference parameters rebind
//!    their variable as `mixed` instead, and calls to unknown targets assume
//!    bare variables may be bound by reference.
//! 2. Arity: extra arguments to a non-variadic target stop the check.
//! 3. Each typed argument is compared against its fleshed-out parameter type,
//!    closures handed to `array_map`/`array_filter` are compared against the
//!    arrays they will receive, and missing required parameters are reported.

use phz_common::{IssueMessage, diagnostic_messages};
use phz_solver::{FleshOutContext, GenericType, TypeError, UnionType, does_param_match, flesh_out};
use tracing::{debug, trace};

use crate::ast::{Arg, ExprKind};
use crate::context::Context;
use crate::state::{CheckResult, CheckerState};
use crate::symbols::{FunctionSignature, MethodInfo};

const ARGUMENT_TEMPLATES: [IssueMessage; 3] = [
    diagnostic_messages::ARGUMENT_RELATED_TYPE_PROVIDED,
    diagnostic_messages::ARGUMENT_SCALAR_MISMATCH,
    diagnostic_messages::ARGUMENT_TYPE_MISMATCH,
];

const CLOSURE_PARAM_TEMPLATES: [IssueMessage; 3] = [
    diagnostic_messages::CLOSURE_PARAM_RELATED_TYPE_PROVIDED,
    diagnostic_messages::CLOSURE_PARAM_SCALAR_MISMATCH,
    diagnostic_messages::CLOSURE_PARAM_TYPE_MISMATCH,
];

/// What a call resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallTarget {
    Function {
        name: String,
        display: String,
    },
    Method {
        /// Receiver class used for lookup and `self` resolution.
        class: String,
        /// Lowercased method name.
        method: String,
        display: String,
    },
    Constructor {
        class: String,
        display: String,
    },
    /// No signature is known; arguments are evaluated but not compared.
    Unresolved,
}

impl CallTarget {
    #[must_use]
    pub fn function(name: &str) -> Self {
        CallTarget::Function {
            name: name.trim_start_matches('\\').to_ascii_lowercase(),
            display: name.to_string(),
        }
    }

    #[must_use]
    pub fn method(class: &str, method: &MethodInfo) -> Self {
        CallTarget::Method {
            class: class.to_string(),
            method: method.name().to_ascii_lowercase(),
            display: method.cased_id(),
        }
    }

    #[must_use]
    pub fn constructor(class: &str) -> Self {
        CallTarget::Constructor {
            class: class.to_string(),
            display: format!("{class}::__construct"),
        }
    }

    /// The name used in diagnostics.
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            CallTarget::Function { display, .. }
            | CallTarget::Method { display, .. }
            | CallTarget::Constructor { display, .. } => display,
            CallTarget::Unresolved => "",
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, CallTarget::Unresolved)
    }

    #[must_use]
    pub fn class(&self) -> Option<&str> {
        match self {
            CallTarget::Method { class, .. } | CallTarget::Constructor { class, .. } => {
                Some(class)
            }
            CallTarget::Function { .. } | CallTarget::Unresolved => None,
        }
    }
}

impl<'a> CheckerState<'a> {
    /// The declared signature of `target`, if the symbol table knows it.
    #[must_use]
    pub fn target_signature(&self, target: &CallTarget) -> Option<&'a FunctionSignature> {
        let symbols = self.symbols;
        match target {
            CallTarget::Function { name, .. } => symbols
                .builtin_function(name)
                .or_else(|| symbols.function(name)),
            CallTarget::Method { class, method, .. } => {
                symbols.method(class, method).map(|info| &info.signature)
            }
            CallTarget::Constructor { class, .. } => symbols
                .method(class, "__construct")
                .map(|info| &info.signature),
            CallTarget::Unresolved => None,
        }
    }

    /// Check `args` against `target`. Mock receivers accept any number of arguments.
    pub fn check_call_arguments(
        &mut self,
        args: &[Arg],
        target: &CallTarget,
        ctx: &mut Context,
        line: u32,
        is_mock: bool,
    ) -> CheckResult {
        let signature = self.target_signature(target);

        for (offset, arg) in args.iter().enumerate() {
            if self.expr_types.contains(arg.value.id) {
                continue;
            }
            let by_ref = signature
                .and_then(|signature| signature.param_for_offset(offset))
                .is_some_and(|param| param.by_ref);
            let binds_variable = by_ref || !target.is_resolved();
            if binds_variable
                && arg.value.is_variable_like()
                && let Some(var_id) = arg.value.var_id()
            {
                // A by-reference write discards whatever type the variable had.
                if by_ref || ctx.var_type(&var_id).is_none_or(UnionType::is_null) {
                    trace!(%var_id, "variable bound by reference");
                    ctx.assume_var_exists(&var_id);
                    self.register_variable(&var_id, arg.value.line);
                    continue;
                }
            }
            self.check_expression(&arg.value, ctx)?;
        }

        let Some(signature) = signature else {
            return Ok(());
        };
        let display = target.display();

        if !(is_mock || signature.accepts_variadic()) && args.len() > signature.params.len() {
            debug!(callee = %target.display(), args = args.len(), "too many arguments");
            return self.report(diagnostic_messages::TOO_MANY_ARGUMENTS, &[display], line);
        }

        let symbols = self.symbols;
        let class = target.class();
        let parent = class.and_then(|class| symbols.parent_class(class));
        let flesh_cx = FleshOutContext::for_class(class, parent);
        for (offset, arg) in args.iter().enumerate() {
            let Some(param) = signature.params.get(offset) else {
                break;
            };
            if param.is_variadic || arg.unpack {
                break;
            }
            let Some(input) = self.expr_type(arg.value.id).cloned() else {
                continue;
            };
            let declared = match flesh_out(&param.declared_type, &flesh_cx) {
                Ok(declared) => declared,
                Err(err) => {
                    self.report_unresolved_placeholder(&err, display, arg.value.line)?;
                    continue;
                }
            };
            self.check_argument_type(&input, &declared, display, offset + 1, arg.value.line)?;
        }

        if let CallTarget::Function { name, .. } = target
            && matches!(name.as_str(), "array_map" | "array_filter")
        {
            self.check_closure_argument(name, display, args, ctx)?;
        }

        if !args.iter().any(|arg| arg.unpack)
            && let Some(missing) = signature
                .params
                .iter()
                .skip(args.len())
                .find(|param| !param.is_optional && !param.is_variadic)
        {
            let missing = format!("${}", missing.name);
            self.report(
                diagnostic_messages::TOO_FEW_ARGUMENTS,
                &[display, &missing],
                line,
            )?;
        }
        Ok(())
    }

    fn check_argument_type(
        &mut self,
        input: &UnionType,
        declared: &UnionType,
        target: &str,
        position: usize,
        line: u32,
    ) -> CheckResult {
        trace!(callee = target, position, %input, %declared, "checking argument");
        if declared.is_mixed() {
            return Ok(());
        }
        let position_text = position.to_string();
        if input.is_mixed() {
            let declared_text = declared.to_string();
            return self.report(
                diagnostic_messages::ARGUMENT_CANNOT_BE_MIXED,
                &[&position_text, target, &declared_text],
                line,
            );
        }
        if input.is_nullable() && !declared.is_nullable() {
            self.report(
                diagnostic_messages::ARGUMENT_CANNOT_BE_NULL,
                &[&position_text, target],
                line,
            )?;
        }
        match does_param_match(input, declared, self.symbols) {
            Ok(verdict) => self.report_argument_verdict(
                ARGUMENT_TEMPLATES,
                position,
                target,
                declared,
                input,
                verdict,
                line,
            ),
            Err(err) => self.report_unresolved_placeholder(&err, target, line),
        }
    }

    /// Closures passed to `array_map` and `array_filter` receive the values
    /// of the array arguments, one parameter per array.
    fn check_closure_argument(
        &mut self,
        function: &str,
        display: &str,
        args: &[Arg],
        ctx: &Context,
    ) -> CheckResult {
        let is_map = function == "array_map";
        let (closure_index, array_args) = if is_map {
            (0, args.get(1..).unwrap_or_default())
        } else {
            (1, args.get(..1).unwrap_or_default())
        };
        let Some(ExprKind::Closure(closure)) = args.get(closure_index).map(|arg| &arg.value.kind)
        else {
            return Ok(());
        };
        let closure_line = args[closure_index].value.line;

        let array_types: Vec<Option<GenericType>> = array_args
            .iter()
            .map(|arg| {
                self.expr_type(arg.value.id)
                    .and_then(|ty| ty.generic_param("array"))
                    .cloned()
            })
            .collect();

        let expected = if is_map { array_types.len() } else { 1 };
        if closure.params.len() > expected {
            self.report(
                diagnostic_messages::TOO_MANY_CLOSURE_PARAMS,
                &[display],
                closure_line,
            )?;
        } else if closure.params.len() < expected {
            self.report(
                diagnostic_messages::TOO_FEW_CLOSURE_PARAMS,
                &[display],
                closure_line,
            )?;
        }

        let flesh_cx =
            FleshOutContext::for_class(ctx.self_class.as_deref(), ctx.parent_class.as_deref());
        for (index, param) in closure.params.iter().enumerate() {
            let Some(Some(array)) = array_types.get(index) else {
                continue;
            };
            let Some(declared) = &param.declared_type else {
                continue;
            };
            let Some(input) = array.value_param() else {
                continue;
            };
            if input.is_mixed() {
                continue;
            }
            let verdict = flesh_out(declared, &flesh_cx)
                .and_then(|declared| {
                    does_param_match(input, &declared, self.symbols).map(|verdict| (declared, verdict))
                });
            match verdict {
                Ok((declared, verdict)) => self.report_argument_verdict(
                    CLOSURE_PARAM_TEMPLATES,
                    index + 1,
                    display,
                    &declared,
                    input,
                    verdict,
                    closure_line,
                )?,
                Err(err) => self.report_unresolved_placeholder(&err, display, closure_line)?,
            }
        }
        Ok(())
    }

    /// The declared return type of `signature` with placeholders resolved
    /// against `self_class`/`parent_class` and `$param` variables bound to
    /// the argument types. `None` when nothing is declared.
    pub(crate) fn fleshed_return_type(
        &self,
        signature: &FunctionSignature,
        args: &[Arg],
        self_class: Option<&str>,
        parent_class: Option<&str>,
    ) -> Result<Option<UnionType>, TypeError> {
        let Some(return_type) = &signature.return_type else {
            return Ok(None);
        };
        let mut cx = FleshOutContext::for_class(self_class, parent_class);
        for (param, arg) in signature.params.iter().zip(args) {
            if let Some(arg_type) = self.expr_type(arg.value.id) {
                cx.bind(&param.name, arg_type);
            }
        }
        flesh_out(return_type, &cx).map(Some)
    }
}

#[cfg(test)]
#[path = "../tests/call_checker_tests.rs"]
mod call_checker_tests;
