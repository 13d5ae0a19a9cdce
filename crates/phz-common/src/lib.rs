//! Common types and utilities for the phz type checker.
//!
//! This crate provides foundational types used across all phz crates:
//! - Issue kinds, issue records and message templates (`IssueKind`, `Issue`)
//! - The diagnostic sink (`DiagnosticSink`, `IssueBuffer`)
//! - Issue-level configuration (`CheckerOptions`, `IssueLevel`)
//! - Checker limits and thresholds

// Issue kinds, records and message templates
pub mod diagnostics;
pub use diagnostics::{
    DiagnosticCategory, Issue, IssueKind, IssueKindSet, IssueMessage, SourceLocation,
    diagnostic_messages, format_message, get_message_template,
};

// Diagnostic sink with per-kind levels and halting
pub mod sink;
pub use sink::{DiagnosticSink, IssueBuffer, IssueFlow};

// Checker options loaded from configuration
pub mod config;
pub use config::{CheckerOptions, ConfigError, IssueLevel};

// Centralized limits and thresholds
pub mod limits;
