use super::IssueMessage;

pub mod diagnostic_messages {
    use crate::diagnostics::{IssueKind, IssueMessage};

    const fn msg(kind: IssueKind, message: &'static str) -> IssueMessage {
        IssueMessage { kind, message }
    }

    pub const FUNCTION_DOES_NOT_EXIST: IssueMessage =
        msg(IssueKind::UndefinedFunction, "Function {0} does not exist");
    pub const CLASS_DOES_NOT_EXIST: IssueMessage =
        msg(IssueKind::UndefinedClass, "Class or interface {0} does not exist");
    pub const METHOD_DOES_NOT_EXIST: IssueMessage =
        msg(IssueKind::UndefinedMethod, "Method {0} does not exist");
    pub const CANNOT_FIND_REFERENCED_VARIABLE: IssueMessage =
        msg(IssueKind::UndefinedVariable, "Cannot find referenced variable {0}");
    pub const CONST_IS_NOT_DEFINED: IssueMessage =
        msg(IssueKind::UndefinedConstant, "Const {0} is not defined");
    pub const PARENT_NOT_FOUND: IssueMessage = msg(
        IssueKind::ParentNotFound,
        "Cannot call method on parent as this class does not extend another",
    );
    pub const THIS_IN_NON_CLASS_CONTEXT: IssueMessage =
        msg(IssueKind::InvalidScope, "Use of $this in non-class context");
    pub const PLACEHOLDER_OUTSIDE_CLASS: IssueMessage = msg(
        IssueKind::InvalidScope,
        "Cannot resolve {0} in the signature of {1} outside of a class context",
    );
    pub const METHOD_ON_POSSIBLY_NULL: IssueMessage = msg(
        IssueKind::NullReference,
        "Cannot call method {0} on possibly null variable {1}",
    );
    pub const METHOD_ON_NON_OBJECT: IssueMessage = msg(
        IssueKind::InvalidArgument,
        "Cannot call method {0} on {1} variable {2}",
    );
    pub const METHOD_ON_MIXED: IssueMessage = msg(
        IssueKind::MixedMethodCall,
        "Cannot call method {0} on a mixed variable {1}",
    );
    pub const ARGUMENT_CANNOT_BE_MIXED: IssueMessage = msg(
        IssueKind::MixedArgument,
        "Argument {0} of {1} cannot be mixed, expecting {2}",
    );
    pub const ARGUMENT_CANNOT_BE_NULL: IssueMessage = msg(
        IssueKind::NullReference,
        "Argument {0} of {1} cannot be null, possibly null value provided",
    );
    pub const ARGUMENT_RELATED_TYPE_PROVIDED: IssueMessage = msg(
        IssueKind::TypeCoercion,
        "Argument {0} of {1} expects {2}, related type {3} provided",
    );
    pub const ARGUMENT_SCALAR_MISMATCH: IssueMessage = msg(
        IssueKind::InvalidScalarArgument,
        "Argument {0} of {1} expects {2}, {3} provided",
    );
    pub const ARGUMENT_TYPE_MISMATCH: IssueMessage = msg(
        IssueKind::InvalidArgument,
        "Argument {0} of {1} expects {2}, {3} provided",
    );
    pub const CLOSURE_PARAM_RELATED_TYPE_PROVIDED: IssueMessage = msg(
        IssueKind::TypeCoercion,
        "Parameter {0} of closure passed to function {1} expects {2}, related type {3} provided",
    );
    pub const CLOSURE_PARAM_SCALAR_MISMATCH: IssueMessage = msg(
        IssueKind::InvalidScalarArgument,
        "Parameter {0} of closure passed to function {1} expects {2}, {3} provided",
    );
    pub const CLOSURE_PARAM_TYPE_MISMATCH: IssueMessage = msg(
        IssueKind::InvalidArgument,
        "Parameter {0} of closure passed to function {1} expects {2}, {3} provided",
    );
    pub const TOO_MANY_ARGUMENTS: IssueMessage =
        msg(IssueKind::TooManyArguments, "Too many arguments for method {0}");
    pub const TOO_FEW_ARGUMENTS: IssueMessage = msg(
        IssueKind::TooFewArguments,
        "Too few arguments for method {0}, missing parameter {1}",
    );
    pub const TOO_MANY_CLOSURE_PARAMS: IssueMessage = msg(
        IssueKind::TooManyArguments,
        "Too many arguments in closure for {0}",
    );
    pub const TOO_FEW_CLOSURE_PARAMS: IssueMessage = msg(
        IssueKind::TooFewArguments,
        "You must supply a param in the closure for {0}",
    );
    pub const UNSAFE_CODE: IssueMessage = msg(IssueKind::ForbiddenCode, "Unsafe {0}");
    pub const METHOD_NOT_ACCESSIBLE: IssueMessage = msg(
        IssueKind::InaccessibleMethod,
        "Cannot access {0} method {1} from context {2}",
    );
    pub const METHOD_IS_DEPRECATED: IssueMessage = msg(
        IssueKind::DeprecatedMethod,
        "The method {0} has been marked as deprecated",
    );
    pub const METHOD_IS_NOT_STATIC: IssueMessage =
        msg(IssueKind::InvalidStaticInvocation, "Method {0} is not static");
}

/// Every registered template, in kind order.
pub static ISSUE_MESSAGES: &[IssueMessage] = &[
    diagnostic_messages::FUNCTION_DOES_NOT_EXIST,
    diagnostic_messages::CLASS_DOES_NOT_EXIST,
    diagnostic_messages::METHOD_DOES_NOT_EXIST,
    diagnostic_messages::CANNOT_FIND_REFERENCED_VARIABLE,
    diagnostic_messages::CONST_IS_NOT_DEFINED,
    diagnostic_messages::PARENT_NOT_FOUND,
    diagnostic_messages::THIS_IN_NON_CLASS_CONTEXT,
    diagnostic_messages::PLACEHOLDER_OUTSIDE_CLASS,
    diagnostic_messages::METHOD_ON_POSSIBLY_NULL,
    diagnostic_messages::ARGUMENT_CANNOT_BE_NULL,
    diagnostic_messages::ARGUMENT_TYPE_MISMATCH,
    diagnostic_messages::METHOD_ON_NON_OBJECT,
    diagnostic_messages::CLOSURE_PARAM_TYPE_MISMATCH,
    diagnostic_messages::ARGUMENT_SCALAR_MISMATCH,
    diagnostic_messages::CLOSURE_PARAM_SCALAR_MISMATCH,
    diagnostic_messages::ARGUMENT_CANNOT_BE_MIXED,
    diagnostic_messages::METHOD_ON_MIXED,
    diagnostic_messages::ARGUMENT_RELATED_TYPE_PROVIDED,
    diagnostic_messages::CLOSURE_PARAM_RELATED_TYPE_PROVIDED,
    diagnostic_messages::TOO_FEW_ARGUMENTS,
    diagnostic_messages::TOO_FEW_CLOSURE_PARAMS,
    diagnostic_messages::TOO_MANY_ARGUMENTS,
    diagnostic_messages::TOO_MANY_CLOSURE_PARAMS,
    diagnostic_messages::UNSAFE_CODE,
    diagnostic_messages::METHOD_NOT_ACCESSIBLE,
    diagnostic_messages::METHOD_IS_DEPRECATED,
    diagnostic_messages::METHOD_IS_NOT_STATIC,
];
