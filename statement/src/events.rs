//! Change notifications.
//!
//! Every observable change produces exactly one event, appended to the
//! evaluation result in execution order.

use soil_calls::OperationCall;
use soil_core::Value;
use std::fmt;

/// An immutable notification describing one observable change.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An object was created.
    ObjectCreated { object: String, class: String },

    /// An object was destroyed.
    ObjectDestroyed { object: String, class: String },

    /// A link (or link object) was inserted.
    LinkInserted {
        association: String,
        participants: Vec<String>,
    },

    /// A link (or link object) was deleted.
    LinkDeleted {
        association: String,
        participants: Vec<String>,
    },

    /// An attribute slot was overwritten.
    AttributeAssigned {
        object: String,
        attribute: String,
        value: Value,
    },

    /// A non-query operation call was entered.
    OperationEntered { call: OperationCall },

    /// A non-query operation call was exited.
    OperationExited { call: OperationCall },
}

impl Event {
    /// Returns true if this event reports a destruction (object or link).
    pub fn is_destruction(&self) -> bool {
        matches!(
            self,
            Event::ObjectDestroyed { .. } | Event::LinkDeleted { .. }
        )
    }

    /// The destroyed object name, if this is an object destruction.
    pub fn destroyed_object(&self) -> Option<&str> {
        match self {
            Event::ObjectDestroyed { object, .. } => Some(object),
            _ => None,
        }
    }

    /// The deleted association name, if this is a link deletion.
    pub fn deleted_link(&self) -> Option<&str> {
        match self {
            Event::LinkDeleted { association, .. } => Some(association),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ObjectCreated { object, class } => {
                write!(f, "created {}:{}", object, class)
            }
            Event::ObjectDestroyed { object, class } => {
                write!(f, "destroyed {}:{}", object, class)
            }
            Event::LinkInserted {
                association,
                participants,
            } => write!(f, "inserted ({}) into {}", participants.join(","), association),
            Event::LinkDeleted {
                association,
                participants,
            } => write!(f, "deleted ({}) from {}", participants.join(","), association),
            Event::AttributeAssigned {
                object,
                attribute,
                value,
            } => write!(f, "assigned {}.{} := {}", object, attribute, value),
            Event::OperationEntered { call } => write!(f, "entered {}", call),
            Event::OperationExited { call } => write!(f, "exited {}", call),
        }
    }
}
