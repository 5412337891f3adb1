//! Instance entities.
//!
//! A running system instance contains objects and links. A link object is
//! an object that additionally participates in an association; it is stored
//! as an `Object` whose `link` field is populated.

use crate::{Attributes, Value};
use std::fmt;

/// The link half of a link object: the association it instantiates and the
/// participants it connects.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkEnds {
    /// Name of the association class.
    pub association: String,
    /// Participating object names, in end order.
    pub participants: Vec<String>,
    /// Qualifier values per end (empty inner vectors for unqualified ends).
    pub qualifiers: Vec<Vec<Value>>,
}

/// An object in the system state.
///
/// Identity is the unique object name. Link objects carry their link ends
/// in `link`.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// Unique object name.
    pub name: String,
    /// Class of this object.
    pub class: String,
    /// Attribute slots.
    pub attributes: Attributes,
    /// Populated when this object is a link object.
    pub link: Option<LinkEnds>,
}

impl Object {
    /// Create a plain object of the given class.
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            attributes: Attributes::new(),
            link: None,
        }
    }

    /// Create a link object connecting the given participants.
    pub fn new_link_object(
        name: impl Into<String>,
        association: impl Into<String>,
        participants: Vec<String>,
        qualifiers: Vec<Vec<Value>>,
    ) -> Self {
        let association = association.into();
        Self {
            name: name.into(),
            class: association.clone(),
            attributes: Attributes::new(),
            link: Some(LinkEnds {
                association,
                participants,
                qualifiers,
            }),
        }
    }

    /// Returns true if this object is a link object.
    pub fn is_link_object(&self) -> bool {
        self.link.is_some()
    }

    /// Get an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// The object reference value for this object.
    pub fn reference(&self) -> Value {
        Value::Object(self.name.clone())
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.class)
    }
}

/// A plain link in the system state.
///
/// Identity is the full (association, participants, qualifiers) triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Name of the instantiated association.
    pub association: String,
    /// Participating object names, in end order.
    pub participants: Vec<String>,
    /// Qualifier values per end.
    pub qualifiers: Vec<Vec<Value>>,
}

impl Link {
    /// Create a new link.
    pub fn new(
        association: impl Into<String>,
        participants: Vec<String>,
        qualifiers: Vec<Vec<Value>>,
    ) -> Self {
        Self {
            association: association.into(),
            participants,
            qualifiers,
        }
    }

    /// Returns true if the given object participates in this link.
    pub fn involves(&self, object: &str) -> bool {
        self.participants.iter().any(|p| p == object)
    }

    /// Returns true if this link connects exactly the given participants
    /// and qualifier values.
    pub fn connects(&self, participants: &[String], qualifiers: &[Vec<Value>]) -> bool {
        self.participants == participants && self.qualifiers_match(qualifiers)
    }

    // An omitted qualifier list matches a link without qualifier values.
    fn qualifiers_match(&self, qualifiers: &[Vec<Value>]) -> bool {
        if qualifiers.is_empty() {
            return self.qualifiers.iter().all(|q| q.is_empty());
        }
        self.qualifiers == qualifiers
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) : {}", self.participants.join(","), self.association)
    }
}
