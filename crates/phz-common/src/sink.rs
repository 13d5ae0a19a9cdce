//! Diagnostic sink.
//!
//! The checker hands every issue to a [`DiagnosticSink`] together with the
//! suppression list active for the current statement. The sink records the
//! issue and answers whether checking may continue.

use tracing::debug;

use crate::config::{CheckerOptions, IssueLevel};
use crate::diagnostics::{DiagnosticCategory, Issue, IssueKind, IssueKindSet};

/// Whether the caller may keep checking after an issue was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueFlow {
    Continue,
    Halt,
}

pub trait DiagnosticSink {
    /// Record `issue`, muting it when its kind is in `suppressed`.
    fn accepts(&mut self, issue: Issue, suppressed: &IssueKindSet) -> IssueFlow;
}

/// Collects issues and applies the configured issue levels.
#[derive(Clone, Debug, Default)]
pub struct IssueBuffer {
    options: CheckerOptions,
    issues: Vec<Issue>,
}

impl IssueBuffer {
    #[must_use]
    pub fn new(options: CheckerOptions) -> Self {
        Self {
            options,
            issues: Vec::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// All recorded issues, suppressed ones included, in report order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Unsuppressed, non-informational issues.
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of unsuppressed issues of `kind`.
    #[must_use]
    pub fn count_of(&self, kind: IssueKind) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.kind == kind && !issue.suppressed)
            .count()
    }

    #[must_use]
    pub fn has(&self, kind: IssueKind) -> bool {
        self.count_of(kind) > 0
    }

    /// Unsuppressed issue kinds in report order.
    #[must_use]
    pub fn kinds(&self) -> Vec<IssueKind> {
        self.issues
            .iter()
            .filter(|issue| !issue.suppressed)
            .map(|issue| issue.kind)
            .collect()
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn clear(&mut self) {
        self.issues.clear();
    }

    /// Render every recorded issue as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.issues)
    }
}

impl DiagnosticSink for IssueBuffer {
    fn accepts(&mut self, mut issue: Issue, suppressed: &IssueKindSet) -> IssueFlow {
        let level = self.options.level_for(issue.kind);
        let flow = if suppressed.contains(issue.kind) || level == IssueLevel::Suppress {
            issue.suppressed = true;
            IssueFlow::Continue
        } else {
            match level {
                IssueLevel::Info => {
                    issue.category = DiagnosticCategory::Info;
                    IssueFlow::Continue
                }
                IssueLevel::Fatal => IssueFlow::Halt,
                _ if self.options.stop_on_first_error => IssueFlow::Halt,
                _ => IssueFlow::Continue,
            }
        };
        debug!(
            kind = %issue.kind,
            line = issue.location.line,
            suppressed = issue.suppressed,
            halt = flow == IssueFlow::Halt,
            "issue accepted"
        );
        self.issues.push(issue);
        flow
    }
}

#[cfg(test)]
#[path = "../tests/sink_tests.rs"]
mod sink_tests;
