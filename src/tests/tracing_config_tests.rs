use crate::tracing_config::{LogFormat, init_tracing};

#[test]
fn log_format_names_are_case_insensitive() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::parse(" Text "), LogFormat::Text);
}

#[test]
fn unknown_log_format_is_text() {
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
}

#[test]
fn init_tracing_can_run_twice() {
    init_tracing();
    init_tracing();
}
