//! Call resolution and argument checking.
//!
//! This crate is organized into several modules:
//! - `ast` - Expression and statement shapes consumed by the checker
//! - `context` - `Context`, the mutable per-scope analysis state
//! - `symbols` - Symbol metadata seam (`SymbolTable`) and `SymbolRegistry`
//! - `call_map` - Builtin function signatures
//! - `state` - `CheckerState`, the checker's per-file state
//! - `dispatch` - Expression type computation
//! - `call_resolution` - Function and constructor call resolution
//! - `method_resolution` - Instance and static method call resolution
//! - `call_checker` - Argument checking against a resolved target
//! - `return_types` - Return type collection over statement lists
//! - `error_reporter` - Issue construction helpers

pub mod ast;
pub mod call_checker;
pub mod call_map;
mod call_resolution;
pub mod context;
pub mod dispatch;
mod error_reporter;
mod method_resolution;
pub mod return_types;
pub mod state;
pub mod symbols;

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
#[path = "../tests/parallel_tests.rs"]
mod parallel_tests;

pub use ast::{
    Arg, ArrayItem, AstBuilder, CallExpr, Callee, Case, Catch, ClassRef, Closure, ClosureParam,
    ElseIf, Expr, ExprId, ExprKind, FunctionCall, Literal, MemberName, MethodCall, NewExpr,
    StaticCall, Stmt,
};
pub use call_checker::CallTarget;
pub use context::{CheckGates, Context};
pub use return_types::collect_return_types;
pub use state::{CheckAborted, CheckResult, CheckerState, ExprTypes};
pub use symbols::{
    ClassInfo, FunctionSignature, MethodInfo, ParamInfo, SymbolRegistry, SymbolTable, Visibility,
};
