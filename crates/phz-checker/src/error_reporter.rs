//! Issue construction helpers.

use phz_common::{
    DiagnosticSink, Issue, IssueFlow, IssueMessage, SourceLocation, diagnostic_messages,
};
use phz_solver::{ParamMatch, TypeError, UnionType};
use tracing::warn;

use crate::state::{CheckAborted, CheckResult, CheckerState};
use crate::symbols::MethodInfo;

impl<'a> CheckerState<'a> {
    /// Hand an issue to the sink, turning a halt into `Err(CheckAborted)`.
    pub(crate) fn report(
        &mut self,
        template: IssueMessage,
        args: &[&str],
        line: u32,
    ) -> CheckResult {
        let issue = Issue::from_template(
            template,
            args,
            SourceLocation::new(self.file_name.as_str(), line),
        );
        match self.issues.accepts(issue, &self.suppressed_issues) {
            IssueFlow::Continue => Ok(()),
            IssueFlow::Halt => Err(CheckAborted),
        }
    }

    pub(crate) fn report_undefined_function(&mut self, name: &str, line: u32) -> CheckResult {
        self.report(diagnostic_messages::FUNCTION_DOES_NOT_EXIST, &[name], line)
    }

    pub(crate) fn report_undefined_class(&mut self, class: &str, line: u32) -> CheckResult {
        self.report(diagnostic_messages::CLASS_DOES_NOT_EXIST, &[class], line)
    }

    pub(crate) fn report_undefined_method(
        &mut self,
        class: &str,
        method: &str,
        line: u32,
    ) -> CheckResult {
        let method_id = format!("{class}::{method}");
        self.report(diagnostic_messages::METHOD_DOES_NOT_EXIST, &[&method_id], line)
    }

    pub(crate) fn report_forbidden_code(&mut self, construct: &str, line: u32) -> CheckResult {
        self.report(diagnostic_messages::UNSAFE_CODE, &[construct], line)
    }

    /// A placeholder in a signature could not be resolved at this call site.
    pub(crate) fn report_unresolved_placeholder(
        &mut self,
        err: &TypeError,
        target: &str,
        line: u32,
    ) -> CheckResult {
        warn!(%err, target, line, "unresolved placeholder in signature");
        let TypeError::UnresolvedPlaceholder { placeholder } = err;
        self.report(
            diagnostic_messages::PLACEHOLDER_OUTSIDE_CLASS,
            &[placeholder, target],
            line,
        )
    }

    pub(crate) fn report_inaccessible_method(
        &mut self,
        method: &MethodInfo,
        caller: Option<&str>,
        line: u32,
    ) -> CheckResult {
        self.report(
            diagnostic_messages::METHOD_NOT_ACCESSIBLE,
            &[
                method.visibility.as_str(),
                &method.cased_id(),
                caller.unwrap_or("global"),
            ],
            line,
        )
    }

    pub(crate) fn report_deprecated_method(&mut self, method: &MethodInfo, line: u32) -> CheckResult {
        self.report(
            diagnostic_messages::METHOD_IS_DEPRECATED,
            &[&method.cased_id()],
            line,
        )
    }

    /// Argument and closure-parameter mismatch, by verdict tier.
    pub(crate) fn report_argument_verdict(
        &mut self,
        templates: [IssueMessage; 3],
        position: usize,
        target: &str,
        declared: &UnionType,
        input: &UnionType,
        verdict: ParamMatch,
        line: u32,
    ) -> CheckResult {
        let [coerced, scalar, mismatch] = templates;
        let position = position.to_string();
        let declared = declared.to_string();
        let input = input.to_string();
        let args: [&str; 4] = [&position, target, &declared, &input];
        if verdict.coerced {
            self.report(coerced, &args, line)?;
        }
        if !verdict.matched {
            let template = if verdict.scalar_fallback { scalar } else { mismatch };
            self.report(template, &args, line)?;
        }
        Ok(())
    }
}
