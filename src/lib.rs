//! phz: call resolution and type compatibility for PHP-like source.
//!
//! The checker itself lives in the workspace crates; this package re-exports
//! them, installs the tracing subscriber and loads options from disk.

use std::path::Path;

use anyhow::Context as _;

// Issue kinds, the diagnostic sink, options and limits
pub use phz_common as common;
pub use phz_common::{
    CheckerOptions, DiagnosticSink, Issue, IssueBuffer, IssueKind, IssueKindSet, IssueLevel,
    SourceLocation,
};

// Union type algebra and parameter compatibility
pub use phz_solver as solver;
pub use phz_solver::{ParamMatch, UnionType};

// Call resolution, argument checking and return type collection
pub use phz_checker as checker;
pub use phz_checker::{
    AstBuilder, CheckAborted, CheckResult, CheckerState, Context, Expr, Stmt, SymbolRegistry,
    SymbolTable, collect_return_types,
};

// Tracing subscriber setup, driven by PHZ_LOG / PHZ_LOG_FORMAT
pub mod tracing_config;
#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;

/// Read checker options from a JSON file.
pub fn load_options(path: &Path) -> anyhow::Result<CheckerOptions> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read checker options from {}", path.display()))?;
    let options = CheckerOptions::from_json_str(&source)
        .with_context(|| format!("failed to parse checker options in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "checker options loaded");
    Ok(options)
}

/// Render issues as a pretty-printed JSON array.
pub fn issues_to_json(issues: &[Issue]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(issues).context("failed to serialize issues")
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod lib_tests;
