//! Issue kinds, issue records and message lookup for the type checker.
//!
//! Message templates live in `data.rs`. Templates use positional `{0}`, `{1}`
//! placeholders filled by [`format_message`].

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::Serialize;

mod data;
pub use data::{ISSUE_MESSAGES, diagnostic_messages};

// =============================================================================
// Issue Kinds
// =============================================================================

/// Every diagnostic the checker can raise.
///
/// The set is closed: suppression lists and issue-level configuration are
/// keyed by these variants, and each variant is independently suppressible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IssueKind {
    UndefinedFunction,
    UndefinedClass,
    UndefinedMethod,
    UndefinedVariable,
    UndefinedConstant,
    ParentNotFound,
    InvalidScope,
    NullReference,
    InvalidArgument,
    InvalidScalarArgument,
    MixedArgument,
    MixedMethodCall,
    TypeCoercion,
    TooFewArguments,
    TooManyArguments,
    ForbiddenCode,
    InaccessibleMethod,
    DeprecatedMethod,
    InvalidStaticInvocation,
}

impl IssueKind {
    pub const ALL: [IssueKind; 19] = [
        IssueKind::UndefinedFunction,
        IssueKind::UndefinedClass,
        IssueKind::UndefinedMethod,
        IssueKind::UndefinedVariable,
        IssueKind::UndefinedConstant,
        IssueKind::ParentNotFound,
        IssueKind::InvalidScope,
        IssueKind::NullReference,
        IssueKind::InvalidArgument,
        IssueKind::InvalidScalarArgument,
        IssueKind::MixedArgument,
        IssueKind::MixedMethodCall,
        IssueKind::TypeCoercion,
        IssueKind::TooFewArguments,
        IssueKind::TooManyArguments,
        IssueKind::ForbiddenCode,
        IssueKind::InaccessibleMethod,
        IssueKind::DeprecatedMethod,
        IssueKind::InvalidStaticInvocation,
    ];

    /// The name used in configuration files and machine-readable output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IssueKind::UndefinedFunction => "UndefinedFunction",
            IssueKind::UndefinedClass => "UndefinedClass",
            IssueKind::UndefinedMethod => "UndefinedMethod",
            IssueKind::UndefinedVariable => "UndefinedVariable",
            IssueKind::UndefinedConstant => "UndefinedConstant",
            IssueKind::ParentNotFound => "ParentNotFound",
            IssueKind::InvalidScope => "InvalidScope",
            IssueKind::NullReference => "NullReference",
            IssueKind::InvalidArgument => "InvalidArgument",
            IssueKind::InvalidScalarArgument => "InvalidScalarArgument",
            IssueKind::MixedArgument => "MixedArgument",
            IssueKind::MixedMethodCall => "MixedMethodCall",
            IssueKind::TypeCoercion => "TypeCoercion",
            IssueKind::TooFewArguments => "TooFewArguments",
            IssueKind::TooManyArguments => "TooManyArguments",
            IssueKind::ForbiddenCode => "ForbiddenCode",
            IssueKind::InaccessibleMethod => "InaccessibleMethod",
            IssueKind::DeprecatedMethod => "DeprecatedMethod",
            IssueKind::InvalidStaticInvocation => "InvalidStaticInvocation",
        }
    }

    /// The undefined-symbol family: a missing function, class or method.
    #[must_use]
    pub const fn is_undefined_symbol(self) -> bool {
        matches!(
            self,
            IssueKind::UndefinedFunction | IssueKind::UndefinedClass | IssueKind::UndefinedMethod
        )
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an issue name does not name a known kind.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown issue kind `{0}`")]
pub struct UnknownIssueKind(pub String);

impl FromStr for IssueKind {
    type Err = UnknownIssueKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownIssueKind(s.to_string()))
    }
}

/// A set of issue kinds, used for statement-level suppression lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueKindSet {
    kinds: FxHashSet<IssueKind>,
}

impl IssueKindSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: IssueKind) -> bool {
        self.kinds.insert(kind)
    }

    pub fn remove(&mut self, kind: IssueKind) -> bool {
        self.kinds.remove(&kind)
    }

    #[must_use]
    pub fn contains(&self, kind: IssueKind) -> bool {
        self.kinds.contains(&kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }
}

impl FromIterator<IssueKind> for IssueKindSet {
    fn from_iter<I: IntoIterator<Item = IssueKind>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

impl Extend<IssueKind> for IssueKindSet {
    fn extend<I: IntoIterator<Item = IssueKind>>(&mut self, iter: I) {
        self.kinds.extend(iter);
    }
}

// =============================================================================
// Issue Records
// =============================================================================

/// How an issue is reported once it passes the sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Error,
    Info,
}

/// A message template paired with the kind it raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssueMessage {
    pub kind: IssueKind,
    pub message: &'static str,
}

/// Where an issue was detected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single diagnostic, created at the point of detection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    pub location: SourceLocation,
    pub category: DiagnosticCategory,
    /// Recorded but muted by a suppression list or a `suppress` level.
    pub suppressed: bool,
}

impl Issue {
    #[must_use]
    pub fn new(kind: IssueKind, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
            category: DiagnosticCategory::Error,
            suppressed: false,
        }
    }

    /// Build an issue from a template, filling `{n}` placeholders from `args`.
    #[must_use]
    pub fn from_template(template: IssueMessage, args: &[&str], location: SourceLocation) -> Self {
        Self::new(template.kind, format_message(template.message, args), location)
    }

    /// Whether this issue counts as an error (unsuppressed and not informational).
    #[must_use]
    pub fn is_error(&self) -> bool {
        !self.suppressed && self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.kind, self.location, self.message)
    }
}

/// Look up the message template for a kind.
///
/// Kinds with several templates return the first registered one.
pub fn get_message_template(kind: IssueKind) -> Option<&'static str> {
    ISSUE_MESSAGES
        .iter()
        .find(|m| m.kind == kind)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
#[path = "../../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
