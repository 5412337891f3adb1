//! The evaluation failure taxonomy.

use soil_calls::CallError;
use soil_state::StateError;
use thiserror::Error;

/// The only failure kind visible to callers of a statement.
///
/// Always attributes to the originating statement; composite statements
/// propagate sub-statement failures unmodified, so the attribution names
/// the primitive that actually failed.
#[derive(Debug, Error)]
#[error("Evaluation of statement `{statement}` failed: {kind}")]
pub struct EvaluationError {
    statement: String,
    kind: EvaluationErrorKind,
}

impl EvaluationError {
    /// Attribute a failure cause to a statement's textual form.
    pub fn new(statement: impl Into<String>, kind: EvaluationErrorKind) -> Self {
        Self {
            statement: statement.into(),
            kind,
        }
    }

    /// The textual form of the failed statement.
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// The failure cause.
    pub fn kind(&self) -> &EvaluationErrorKind {
        &self.kind
    }
}

/// Causes of an evaluation failure.
#[derive(Debug, Error)]
pub enum EvaluationErrorKind {
    #[error("Evaluation of expression `{expr}` failed: {message}")]
    ExpressionFailed { expr: String, message: String },

    #[error("The value of expression `{expr}` is undefined")]
    UndefinedExpression { expr: String },

    #[error("The value of rvalue `{rvalue}` is undefined")]
    UndefinedRValue { rvalue: String },

    #[error("Expression `{expr}` is expected to evaluate to an object, but its type is {actual}")]
    NotAnObject { expr: String, actual: String },

    #[error("Expression `{expr}` is expected to be of type String, found {actual}")]
    NotAString { expr: String, actual: String },

    #[error("Object {object} has an active operation and thus cannot be deleted")]
    ActiveOperation { object: String },

    #[error("No current operation")]
    NoCurrentOperation,

    #[error("Class {class} has no operation {operation}")]
    UnknownOperation { class: String, operation: String },

    #[error("Operation {operation} is a query operation and cannot be entered")]
    QueryOperation { operation: String },

    #[error("Operation {operation} expects {expected} arguments, got {actual}")]
    ArgumentCountMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Call(#[from] CallError),
}

impl EvaluationErrorKind {
    pub fn expression_failed(expr: impl ToString, message: impl ToString) -> Self {
        Self::ExpressionFailed {
            expr: expr.to_string(),
            message: message.to_string(),
        }
    }

    pub fn undefined_expression(expr: impl ToString) -> Self {
        Self::UndefinedExpression {
            expr: expr.to_string(),
        }
    }

    pub fn undefined_rvalue(rvalue: impl ToString) -> Self {
        Self::UndefinedRValue {
            rvalue: rvalue.to_string(),
        }
    }

    pub fn not_an_object(expr: impl ToString, actual: impl Into<String>) -> Self {
        Self::NotAnObject {
            expr: expr.to_string(),
            actual: actual.into(),
        }
    }

    pub fn not_a_string(expr: impl ToString, actual: impl Into<String>) -> Self {
        Self::NotAString {
            expr: expr.to_string(),
            actual: actual.into(),
        }
    }

    pub fn active_operation(object: impl Into<String>) -> Self {
        Self::ActiveOperation {
            object: object.into(),
        }
    }

    pub fn unknown_operation(class: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnknownOperation {
            class: class.into(),
            operation: operation.into(),
        }
    }

    pub fn query_operation(operation: impl Into<String>) -> Self {
        Self::QueryOperation {
            operation: operation.into(),
        }
    }

    pub fn argument_count_mismatch(
        operation: impl Into<String>,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::ArgumentCountMismatch {
            operation: operation.into(),
            expected,
            actual,
        }
    }
}
