//! Expression trees.
//!
//! Statements reference values through expressions; the engine treats the
//! tree as opaque and only needs its evaluation and its textual form for
//! diagnostics.

use soil_core::Value;
use std::fmt;

/// A side-effect-free expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal value.
    Literal(Value),
    /// A variable reference.
    Var(String),
    /// Attribute access on an object-valued expression.
    Attribute(Box<Expression>, String),
    /// Association navigation from an object-valued expression to a role.
    Navigation {
        source: Box<Expression>,
        association: String,
        role: String,
    },
}

impl Expression {
    /// Literal expression from anything convertible to a value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Variable reference expression.
    pub fn var(name: impl Into<String>) -> Self {
        Expression::Var(name.into())
    }

    /// Object reference literal.
    pub fn object(name: impl Into<String>) -> Self {
        Expression::Literal(Value::Object(name.into()))
    }

    /// Attribute access on this expression.
    pub fn attribute(self, name: impl Into<String>) -> Self {
        Expression::Attribute(Box::new(self), name.into())
    }

    /// Navigation from this expression along an association role.
    pub fn navigate(self, association: impl Into<String>, role: impl Into<String>) -> Self {
        Expression::Navigation {
            source: Box::new(self),
            association: association.into(),
            role: role.into(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Var(name) => write!(f, "{}", name),
            Expression::Attribute(source, name) => write!(f, "{}.{}", source, name),
            Expression::Navigation { source, role, .. } => write!(f, "{}.{}", source, role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_display() {
        assert_eq!(Expression::literal(5i64).to_string(), "5");
        assert_eq!(Expression::var("x").to_string(), "x");
        assert_eq!(Expression::var("p").attribute("age").to_string(), "p.age");
        assert_eq!(
            Expression::object("ada").navigate("Job", "employer").to_string(),
            "ada.employer"
        );
    }
}
