//! State error types.

use thiserror::Error;

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors that can occur while mutating or querying the system state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Unknown class: {name}")]
    UnknownClass { name: String },

    #[error("Unknown association: {name}")]
    UnknownAssociation { name: String },

    #[error("Unknown object: {name}")]
    UnknownObject { name: String },

    #[error("An object with name `{name}` already exists")]
    NameConflict { name: String },

    #[error("Association class `{name}` cannot be instantiated without participants")]
    AssociationClass { name: String },

    #[error("Association `{name}` is not an association class")]
    NotAnAssociationClass { name: String },

    #[error("Instances of association class `{name}` must be created as link objects")]
    LinkOnAssociationClass { name: String },

    #[error("Association {association} expects {expected} participants, got {actual}")]
    EndCountMismatch {
        association: String,
        expected: usize,
        actual: usize,
    },

    #[error("Participant {object} at role {role} must be of class {expected}, found {actual}")]
    EndClassMismatch {
        object: String,
        role: String,
        expected: String,
        actual: String,
    },

    #[error("Role {role} of association {association} expects {expected} qualifier values, got {actual}")]
    QualifierCountMismatch {
        association: String,
        role: String,
        expected: usize,
        actual: usize,
    },

    #[error("Link ({participants}) already exists in association {association}")]
    DuplicateLink {
        association: String,
        participants: String,
    },

    #[error(
        "Inserting ({participants}) into association {association} violates multiplicity {multiplicity} at role {role}"
    )]
    MultiplicityViolation {
        association: String,
        participants: String,
        role: String,
        multiplicity: String,
    },

    #[error("Link ({participants}) not found in association {association}")]
    LinkNotFound {
        association: String,
        participants: String,
    },

    #[error("Attribute {attribute} is not defined on class {class}")]
    UnknownAttribute { class: String, attribute: String },
}

impl StateError {
    pub fn unknown_class(name: impl Into<String>) -> Self {
        Self::UnknownClass { name: name.into() }
    }

    pub fn unknown_association(name: impl Into<String>) -> Self {
        Self::UnknownAssociation { name: name.into() }
    }

    pub fn unknown_object(name: impl Into<String>) -> Self {
        Self::UnknownObject { name: name.into() }
    }

    pub fn name_conflict(name: impl Into<String>) -> Self {
        Self::NameConflict { name: name.into() }
    }

    pub fn association_class(name: impl Into<String>) -> Self {
        Self::AssociationClass { name: name.into() }
    }

    pub fn not_an_association_class(name: impl Into<String>) -> Self {
        Self::NotAnAssociationClass { name: name.into() }
    }

    pub fn link_on_association_class(name: impl Into<String>) -> Self {
        Self::LinkOnAssociationClass { name: name.into() }
    }

    pub fn end_count_mismatch(
        association: impl Into<String>,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::EndCountMismatch {
            association: association.into(),
            expected,
            actual,
        }
    }

    pub fn end_class_mismatch(
        object: impl Into<String>,
        role: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::EndClassMismatch {
            object: object.into(),
            role: role.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn qualifier_count_mismatch(
        association: impl Into<String>,
        role: impl Into<String>,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::QualifierCountMismatch {
            association: association.into(),
            role: role.into(),
            expected,
            actual,
        }
    }

    pub fn duplicate_link(association: impl Into<String>, participants: &[String]) -> Self {
        Self::DuplicateLink {
            association: association.into(),
            participants: participants.join(","),
        }
    }

    pub fn multiplicity_violation(
        association: impl Into<String>,
        participants: &[String],
        role: impl Into<String>,
        multiplicity: impl Into<String>,
    ) -> Self {
        Self::MultiplicityViolation {
            association: association.into(),
            participants: participants.join(","),
            role: role.into(),
            multiplicity: multiplicity.into(),
        }
    }

    pub fn link_not_found(association: impl Into<String>, participants: &[String]) -> Self {
        Self::LinkNotFound {
            association: association.into(),
            participants: participants.join(","),
        }
    }

    pub fn unknown_attribute(class: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            class: class.into(),
            attribute: attribute.into(),
        }
    }
}
