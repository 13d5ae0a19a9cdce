//! Instance and static method call resolution.

use phz_common::diagnostic_messages;
use phz_solver::{AtomicType, TypeError, UnionType, same_class};
use tracing::debug;

use crate::ast::{ClassRef, Expr, MemberName, MethodCall, StaticCall};
use crate::call_checker::CallTarget;
use crate::context::Context;
use crate::state::{CheckResult, CheckerState};
use crate::symbols::{MethodInfo, Visibility};

impl<'a> CheckerState<'a> {
    /// `$receiver->method(...)`
    ///
    /// Every member of the receiver's union is resolved on its own, so a
    /// nullable receiver reports the null branch and still checks the call
    /// against the object branch.
    pub(crate) fn check_method_call(
        &mut self,
        expr: &Expr,
        call: &MethodCall,
        ctx: &mut Context,
    ) -> CheckResult {
        let line = expr.line;
        self.check_expression(&call.receiver, ctx)?;

        if call.receiver.is_this() && ctx.self_class.is_none() {
            self.report(diagnostic_messages::THIS_IN_NON_CLASS_CONTEXT, &[], line)?;
        }

        let var_id = call.receiver.var_id();
        let receiver_type = self.expr_type(call.receiver.id).cloned().or_else(|| {
            var_id
                .as_deref()
                .and_then(|var_id| ctx.var_type(var_id))
                .cloned()
        });
        self.set_expr_type(expr.id, UnionType::mixed());

        if !ctx.check_methods() || !ctx.check_classes() {
            return Ok(());
        }

        let (Some(receiver_type), MemberName::Ident(method_name)) = (receiver_type, &call.method)
        else {
            if let MemberName::Dynamic(name_expr) = &call.method {
                self.check_expression(name_expr, ctx)?;
            }
            return self.check_unresolved_call(expr, &call.args, ctx);
        };
        let method_name = method_name.as_str();

        let symbols = self.symbols;
        let receiver_label = var_id.as_deref().unwrap_or("value");
        let receiver_text = receiver_type.to_string();
        let mut resolved: Vec<(String, &'a MethodInfo)> = Vec::new();
        let mut widened = false;
        let mut has_mock = false;

        for atomic in &receiver_type {
            let class = match atomic {
                AtomicType::Null | AtomicType::Void => {
                    self.report(
                        diagnostic_messages::METHOD_ON_POSSIBLY_NULL,
                        &[method_name, receiver_label],
                        line,
                    )?;
                    continue;
                }
                AtomicType::Scalar(_) | AtomicType::ArrayLike => {
                    self.report(
                        diagnostic_messages::METHOD_ON_NON_OBJECT,
                        &[method_name, receiver_text.as_str(), receiver_label],
                        line,
                    )?;
                    continue;
                }
                AtomicType::Generic(generic) if generic.is_array() => {
                    self.report(
                        diagnostic_messages::METHOD_ON_NON_OBJECT,
                        &[method_name, receiver_text.as_str(), receiver_label],
                        line,
                    )?;
                    continue;
                }
                AtomicType::Mixed | AtomicType::TypeVariable(_) => {
                    self.report(
                        diagnostic_messages::METHOD_ON_MIXED,
                        &[method_name, receiver_label],
                        line,
                    )?;
                    continue;
                }
                AtomicType::SelfPlaceholder | AtomicType::StaticPlaceholder => {
                    ctx.self_class.clone()
                }
                AtomicType::ParentPlaceholder => ctx.parent_class.clone(),
                AtomicType::Object(name) => Some(name.clone()),
                AtomicType::Generic(generic) => Some(generic.base.clone()),
            };
            let Some(class) = class else {
                let err = TypeError::UnresolvedPlaceholder {
                    placeholder: atomic.to_string(),
                };
                self.report_unresolved_placeholder(&err, method_name, line)?;
                widened = true;
                continue;
            };

            let is_mock = self.options().is_mock_class(&class);
            has_mock |= is_mock;
            if is_mock || ctx.is_phantom_class(&class) || symbols.has_method(&class, "__call") {
                debug!(class = %class, method = method_name, "dynamic receiver; result widened to mixed");
                widened = true;
                continue;
            }
            if !symbols.class_exists(&class) {
                self.report_undefined_class(&class, line)?;
                widened = true;
                continue;
            }
            let Some(method) = symbols.method(&class, method_name) else {
                self.report_undefined_method(&class, method_name, line)?;
                widened = true;
                continue;
            };
            self.check_method_visibility(method, ctx.self_class.as_deref(), line)?;
            if method.is_deprecated {
                self.report_deprecated_method(method, line)?;
            }
            resolved.push((class, method));
        }

        let target = resolved
            .last()
            .map_or(CallTarget::Unresolved, |(class, method)| {
                CallTarget::method(class, method)
            });
        self.check_call_arguments(&call.args, &target, ctx, line, has_mock)?;

        let mut return_type: Option<UnionType> = widened.then(UnionType::mixed);
        for (class, method) in &resolved {
            let candidate = match self.fleshed_return_type(
                &method.signature,
                &call.args,
                Some(class.as_str()),
                symbols.parent_class(class),
            ) {
                Ok(candidate) => candidate.unwrap_or_else(UnionType::mixed),
                Err(err) => {
                    self.report_unresolved_placeholder(&err, &method.cased_id(), line)?;
                    UnionType::mixed()
                }
            };
            return_type = Some(match return_type {
                Some(acc) => acc.combine(&candidate),
                None => candidate,
            });
        }
        let return_type = return_type.unwrap_or_else(UnionType::mixed);
        debug!(method = method_name, %return_type, "method call resolved");
        self.set_expr_type(expr.id, return_type);
        Ok(())
    }

    /// `Class::method(...)`, `self::`, `static::` and `parent::`.
    pub(crate) fn check_static_call(
        &mut self,
        expr: &Expr,
        call: &StaticCall,
        ctx: &mut Context,
    ) -> CheckResult {
        let line = expr.line;
        self.set_expr_type(expr.id, UnionType::mixed());

        let class = match &call.class {
            ClassRef::Dynamic(_) => {
                // `$class::method()` cannot be resolved statically
                debug!(line, "static call on a dynamic class left unchecked");
                return Ok(());
            }
            ClassRef::ParentRef => {
                if ctx.parent_class.is_none() {
                    self.report(diagnostic_messages::PARENT_NOT_FOUND, &[], line)?;
                }
                ctx.parent_class.clone()
            }
            ClassRef::SelfRef | ClassRef::StaticRef => ctx.self_class.clone(),
            ClassRef::Named(name) if ctx.check_classes() => {
                if ctx.is_phantom_class(name) {
                    None
                } else if self.symbols.class_exists(name) {
                    Some(name.clone())
                } else {
                    self.report_undefined_class(name, line)?;
                    None
                }
            }
            ClassRef::Named(_) => None,
        };
        let Some(class) = class.filter(|class| !ctx.is_phantom_class(class)) else {
            return Ok(());
        };
        if !ctx.check_methods() {
            return Ok(());
        }

        let method_name = match &call.method {
            MemberName::Ident(name) => name.as_str(),
            MemberName::Dynamic(name_expr) => {
                self.check_expression(name_expr, ctx)?;
                return self.check_unresolved_call(expr, &call.args, ctx);
            }
        };

        let symbols = self.symbols;
        if self.options().is_mock_class(&class) || symbols.has_method(&class, "__callStatic") {
            debug!(class = %class, method = method_name, "dynamic static receiver; result widened to mixed");
            return self.check_unresolved_call(expr, &call.args, ctx);
        }

        let Some(method) = symbols.method(&class, method_name) else {
            self.report_undefined_method(&class, method_name, line)?;
            return self.check_unresolved_call(expr, &call.args, ctx);
        };
        self.check_method_visibility(method, ctx.self_class.as_deref(), line)?;

        let via_parent = matches!(call.class, ClassRef::ParentRef);
        if !via_parent
            && !method.is_static
            && let Some(caller) = ctx.self_class.as_deref()
            && (ctx.is_static
                || !(same_class(caller, &class) || symbols.class_extends_or_implements(caller, &class)))
        {
            self.report(
                diagnostic_messages::METHOD_IS_NOT_STATIC,
                &[&method.cased_id()],
                line,
            )?;
        }
        if method.is_deprecated {
            self.report_deprecated_method(method, line)?;
        }

        let target = CallTarget::method(&class, method);
        self.check_call_arguments(&call.args, &target, ctx, line, false)?;

        let resolve_against = if via_parent {
            ctx.self_class.as_deref()
        } else {
            Some(class.as_str())
        };
        let parent = resolve_against.and_then(|class| symbols.parent_class(class));
        let return_type = match self.fleshed_return_type(
            &method.signature,
            &call.args,
            resolve_against,
            parent,
        ) {
            Ok(return_type) => return_type.unwrap_or_else(UnionType::mixed),
            Err(err) => {
                self.report_unresolved_placeholder(&err, &method.cased_id(), line)?;
                UnionType::mixed()
            }
        };
        debug!(class = %class, method = method_name, %return_type, "static call resolved");
        self.set_expr_type(expr.id, return_type);
        Ok(())
    }

    /// Private methods are visible to their declaring class; protected
    /// methods to any class related to it.
    fn check_method_visibility(
        &mut self,
        method: &MethodInfo,
        caller: Option<&str>,
        line: u32,
    ) -> CheckResult {
        let declaring = method.declaring_class.as_str();
        let visible = match method.visibility {
            Visibility::Public => true,
            Visibility::Private => caller.is_some_and(|caller| same_class(caller, declaring)),
            Visibility::Protected => caller.is_some_and(|caller| {
                same_class(caller, declaring)
                    || self.symbols.class_extends_or_implements(caller, declaring)
                    || self.symbols.class_extends_or_implements(declaring, caller)
            }),
        };
        if visible {
            return Ok(());
        }
        self.report_inaccessible_method(method, caller, line)
    }
}

#[cfg(test)]
#[path = "../tests/method_resolution_tests.rs"]
mod method_resolution_tests;
