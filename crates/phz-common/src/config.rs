//! Checker options: per-kind issue levels, mock classes and halting policy.
//!
//! Options are read from JSON:
//!
//! ```json
//! {
//!   "issue_levels": { "TypeCoercion": "info", "UndefinedFunction": "fatal" },
//!   "mock_classes": ["Mockery\\MockInterface"],
//!   "stop_on_first_error": false
//! }
//! ```

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::diagnostics::{IssueKind, UnknownIssueKind};

/// How an issue of a given kind is handled once raised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// Recorded and halts the current check.
    Fatal,
    /// Recorded as an error; checking continues.
    #[default]
    Error,
    /// Recorded as informational; never counts as an error.
    Info,
    /// Recorded as suppressed.
    Suppress,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid checker options: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownIssueKind(#[from] UnknownIssueKind),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawCheckerOptions {
    issue_levels: BTreeMap<String, IssueLevel>,
    mock_classes: Vec<String>,
    stop_on_first_error: bool,
}

/// Options that shape how issues are reported and which classes are mocks.
#[derive(Clone, Debug, Default)]
pub struct CheckerOptions {
    issue_levels: FxHashMap<IssueKind, IssueLevel>,
    /// Lowercased names of classes whose method calls widen to `mixed`.
    mock_classes: Vec<String>,
    /// Halt on every unsuppressed, non-info issue.
    pub stop_on_first_error: bool,
}

impl CheckerOptions {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let raw: RawCheckerOptions = serde_json::from_str(source)?;
        let mut options = CheckerOptions {
            stop_on_first_error: raw.stop_on_first_error,
            ..CheckerOptions::default()
        };
        for (name, level) in raw.issue_levels {
            let kind: IssueKind = name.parse()?;
            options.issue_levels.insert(kind, level);
        }
        for class in raw.mock_classes {
            options.add_mock_class(&class);
        }
        Ok(options)
    }

    /// The configured level for `kind`; unconfigured kinds are errors.
    #[must_use]
    pub fn level_for(&self, kind: IssueKind) -> IssueLevel {
        self.issue_levels.get(&kind).copied().unwrap_or_default()
    }

    pub fn set_level(&mut self, kind: IssueKind, level: IssueLevel) {
        self.issue_levels.insert(kind, level);
    }

    #[must_use]
    pub fn with_level(mut self, kind: IssueKind, level: IssueLevel) -> Self {
        self.set_level(kind, level);
        self
    }

    pub fn add_mock_class(&mut self, class: &str) {
        let class = class.trim_start_matches('\\').to_ascii_lowercase();
        if !self.mock_classes.contains(&class) {
            self.mock_classes.push(class);
        }
    }

    #[must_use]
    pub fn with_mock_class(mut self, class: &str) -> Self {
        self.add_mock_class(class);
        self
    }

    #[must_use]
    pub fn is_mock_class(&self, class: &str) -> bool {
        let class = class.trim_start_matches('\\');
        self.mock_classes
            .iter()
            .any(|mock| mock.eq_ignore_ascii_case(class))
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
