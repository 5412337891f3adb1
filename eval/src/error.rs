//! Evaluation error types.

use thiserror::Error;

/// Result type for expression evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur while evaluating an expression.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(
        "Navigation to role {role} of association {association} yields {count} objects, but at most one is allowed"
    )]
    MultiplicityViolation {
        association: String,
        role: String,
        count: usize,
    },

    #[error("Expression `{expr}` is not an object, found {actual}")]
    NotAnObject { expr: String, actual: String },

    #[error("Unknown object: {name}")]
    UnknownObject { name: String },

    #[error("Attribute {attribute} is not defined on class {class}")]
    UnknownAttribute { class: String, attribute: String },

    #[error("Unknown association: {name}")]
    UnknownAssociation { name: String },

    #[error("Association {association} has no role {role}")]
    UnknownRole { association: String, role: String },
}

impl EvalError {
    pub fn multiplicity_violation(
        association: impl Into<String>,
        role: impl Into<String>,
        count: usize,
    ) -> Self {
        Self::MultiplicityViolation {
            association: association.into(),
            role: role.into(),
            count,
        }
    }

    pub fn not_an_object(expr: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::NotAnObject {
            expr: expr.into(),
            actual: actual.into(),
        }
    }

    pub fn unknown_object(name: impl Into<String>) -> Self {
        Self::UnknownObject { name: name.into() }
    }

    pub fn unknown_attribute(class: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            class: class.into(),
            attribute: attribute.into(),
        }
    }

    pub fn unknown_association(name: impl Into<String>) -> Self {
        Self::UnknownAssociation { name: name.into() }
    }

    pub fn unknown_role(association: impl Into<String>, role: impl Into<String>) -> Self {
        Self::UnknownRole {
            association: association.into(),
            role: role.into(),
        }
    }

    /// Returns true if this is a multiplicity violation.
    pub fn is_multiplicity_violation(&self) -> bool {
        matches!(self, Self::MultiplicityViolation { .. })
    }
}
