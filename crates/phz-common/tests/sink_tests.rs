use super::*;
use crate::diagnostics::{SourceLocation, diagnostic_messages};

fn undefined_function(name: &str) -> Issue {
    Issue::from_template(
        diagnostic_messages::FUNCTION_DOES_NOT_EXIST,
        &[name],
        SourceLocation::new("test.php", 3),
    )
}

#[test]
fn error_level_records_and_continues() {
    let mut buffer = IssueBuffer::default();
    let flow = buffer.accepts(undefined_function("foo"), &IssueKindSet::new());
    assert_eq!(flow, IssueFlow::Continue);
    assert_eq!(buffer.error_count(), 1);
    assert_eq!(buffer.count_of(IssueKind::UndefinedFunction), 1);
}

#[test]
fn statement_suppression_marks_issue_and_continues() {
    let mut buffer = IssueBuffer::default();
    let suppressed: IssueKindSet = [IssueKind::UndefinedFunction].into_iter().collect();
    let flow = buffer.accepts(undefined_function("foo"), &suppressed);
    assert_eq!(flow, IssueFlow::Continue);
    assert_eq!(buffer.issues().len(), 1);
    assert!(buffer.issues()[0].suppressed);
    assert_eq!(buffer.error_count(), 0);
    assert_eq!(buffer.count_of(IssueKind::UndefinedFunction), 0);
}

#[test]
fn configured_suppress_level_marks_issue() {
    let options =
        CheckerOptions::default().with_level(IssueKind::UndefinedFunction, IssueLevel::Suppress);
    let mut buffer = IssueBuffer::new(options);
    buffer.accepts(undefined_function("foo"), &IssueKindSet::new());
    assert!(buffer.issues()[0].suppressed);
    assert!(buffer.kinds().is_empty());
}

#[test]
fn info_level_is_not_an_error() {
    let options =
        CheckerOptions::default().with_level(IssueKind::UndefinedFunction, IssueLevel::Info);
    let mut buffer = IssueBuffer::new(options);
    let flow = buffer.accepts(undefined_function("foo"), &IssueKindSet::new());
    assert_eq!(flow, IssueFlow::Continue);
    assert_eq!(buffer.issues()[0].category, DiagnosticCategory::Info);
    assert_eq!(buffer.error_count(), 0);
}

#[test]
fn fatal_level_halts() {
    let options =
        CheckerOptions::default().with_level(IssueKind::UndefinedFunction, IssueLevel::Fatal);
    let mut buffer = IssueBuffer::new(options);
    let flow = buffer.accepts(undefined_function("foo"), &IssueKindSet::new());
    assert_eq!(flow, IssueFlow::Halt);
    assert_eq!(buffer.error_count(), 1);
}

#[test]
fn suppression_wins_over_fatal() {
    let options =
        CheckerOptions::default().with_level(IssueKind::UndefinedFunction, IssueLevel::Fatal);
    let mut buffer = IssueBuffer::new(options);
    let suppressed: IssueKindSet = [IssueKind::UndefinedFunction].into_iter().collect();
    let flow = buffer.accepts(undefined_function("foo"), &suppressed);
    assert_eq!(flow, IssueFlow::Continue);
}

#[test]
fn stop_on_first_error_halts_on_errors_only() {
    let mut options =
        CheckerOptions::default().with_level(IssueKind::UndefinedFunction, IssueLevel::Info);
    options.stop_on_first_error = true;
    let mut buffer = IssueBuffer::new(options);
    assert_eq!(
        buffer.accepts(undefined_function("foo"), &IssueKindSet::new()),
        IssueFlow::Continue
    );
    let parent = Issue::from_template(
        diagnostic_messages::PARENT_NOT_FOUND,
        &[],
        SourceLocation::new("test.php", 4),
    );
    assert_eq!(
        buffer.accepts(parent, &IssueKindSet::new()),
        IssueFlow::Halt
    );
}

#[test]
fn renders_issues_as_json() {
    let mut buffer = IssueBuffer::default();
    buffer.accepts(undefined_function("foo"), &IssueKindSet::new());
    let json: serde_json::Value = serde_json::from_str(&buffer.to_json().unwrap()).unwrap();
    assert_eq!(json[0]["kind"], "UndefinedFunction");
    assert_eq!(json[0]["message"], "Function foo does not exist");
    assert_eq!(json[0]["location"]["file"], "test.php");
    assert_eq!(json[0]["location"]["line"], 3);
    assert_eq!(json[0]["suppressed"], false);
}
