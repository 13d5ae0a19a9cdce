//! Shared test fixtures for checker tests.
//!
//! `ZOO` is a symbol table built once and shared by every test (and by
//! the parallel tests across threads):
//! - `Animal` with public, private, protected, deprecated and static methods
//! - `Dog extends Animal implements Pet`, `Cat extends Animal`, `Puppy extends Dog`
//! - `Magic` (`__call`), `StaticMagic` (`__callStatic`)
//! - `Widget`, unrelated to the animals
//! - `ArrayIterator` with a constructor taking an array
//! - user functions `greet`, `add`, `identity`, `sum`, `make_self`, `describe`

use once_cell::sync::Lazy;
use phz_common::{CheckerOptions, IssueKind};
use phz_solver::UnionType;

use crate::ast::Expr;
use crate::context::Context;
use crate::state::{CheckResult, CheckerState};
use crate::symbols::{ClassInfo, FunctionSignature, MethodInfo, ParamInfo, SymbolRegistry, Visibility};

pub const TEST_FILE_NAME: &str = "test.php";

pub static ZOO: Lazy<SymbolRegistry> = Lazy::new(zoo_registry);

/// Parse a type written in union syntax.
pub fn ty(source: &str) -> UnionType {
    source
        .parse()
        .unwrap_or_else(|err| panic!("bad test type {source:?}: {err}"))
}

fn zoo_registry() -> SymbolRegistry {
    let mut registry = SymbolRegistry::new();
    registry
        .add_class(
            ClassInfo::new("Animal")
                .with_method(MethodInfo::new("speak").returning(ty("string")))
                .with_method(
                    MethodInfo::new("bar")
                        .with_param(ParamInfo::new("x", ty("int")))
                        .returning(ty("int")),
                )
                .with_method(
                    MethodInfo::new("adopt")
                        .with_param(ParamInfo::new("other", ty("Animal")))
                        .returning(ty("static")),
                )
                .with_method(MethodInfo::new("me").returning(ty("$this")))
                .with_method(
                    MethodInfo::new("secret")
                        .visibility(Visibility::Private)
                        .returning(ty("int")),
                )
                .with_method(MethodInfo::new("groom").visibility(Visibility::Protected))
                .with_method(MethodInfo::new("legacy").deprecated())
                .with_method(MethodInfo::new("create").static_method().returning(ty("self")))
                .with_method(MethodInfo::new("ancestor").returning(ty("parent"))),
        )
        .add_class(ClassInfo::new("Pet"))
        .add_class(
            ClassInfo::new("Dog")
                .extends("Animal")
                .implements("Pet")
                .with_method(
                    MethodInfo::new("__construct")
                        .with_param(ParamInfo::new("name", ty("string")))
                        .with_param(ParamInfo::new("age", ty("int")).optional()),
                )
                .with_method(
                    MethodInfo::new("fetch")
                        .with_param(ParamInfo::new("item", ty("string")))
                        .returning(ty("string|null")),
                ),
        )
        .add_class(ClassInfo::new("Cat").extends("Animal"))
        .add_class(ClassInfo::new("Puppy").extends("Dog"))
        .add_class(ClassInfo::new("Magic").with_method(MethodInfo::new("__call")))
        .add_class(ClassInfo::new("StaticMagic").with_method(MethodInfo::new("__callStatic")))
        .add_class(
            ClassInfo::new("Widget")
                .with_method(MethodInfo::new("render").returning(ty("string")))
                .with_method(MethodInfo::new("build").static_method().returning(ty("Widget"))),
        )
        .add_class(
            ClassInfo::new("ArrayIterator").with_method(
                MethodInfo::new("__construct").with_param(ParamInfo::new("array", ty("array"))),
            ),
        )
        .add_function(
            FunctionSignature::new("greet")
                .with_param(ParamInfo::new("name", ty("string")))
                .returning(ty("string")),
        )
        .add_function(
            FunctionSignature::new("add")
                .with_param(ParamInfo::new("a", ty("int")))
                .with_param(ParamInfo::new("b", ty("int")))
                .with_param(ParamInfo::new("c", ty("int")).optional())
                .returning(ty("int")),
        )
        .add_function(
            FunctionSignature::new("identity")
                .with_param(ParamInfo::new("value", ty("mixed")))
                .returning(ty("$value")),
        )
        .add_function(
            FunctionSignature::new("sum")
                .with_param(ParamInfo::new("numbers", ty("int")).variadic())
                .returning(ty("int")),
        )
        .add_function(FunctionSignature::new("make_self").returning(ty("self")))
        .add_function(
            FunctionSignature::new("describe")
                .with_param(ParamInfo::new("animal", ty("Animal")))
                .returning(ty("string")),
        );
    registry
}

/// A checker over `ZOO` with default options.
pub fn checker() -> CheckerState<'static> {
    checker_with(CheckerOptions::default())
}

pub fn checker_with(options: CheckerOptions) -> CheckerState<'static> {
    CheckerState::new(&*ZOO, options, TEST_FILE_NAME)
}

/// Check each expression in order, stopping at the first halt.
pub fn check_all(state: &mut CheckerState<'_>, exprs: &[Expr], ctx: &mut Context) -> CheckResult {
    for expr in exprs {
        state.check_expression(expr, ctx)?;
    }
    Ok(())
}

/// Unsuppressed issue kinds, in report order.
pub fn kinds(state: &CheckerState<'_>) -> Vec<IssueKind> {
    state.issues().kinds()
}
