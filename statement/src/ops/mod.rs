//! Mutation primitives.
//!
//! Each primitive applies one change to the graph, records its inverse on
//! the result and appends its event, in that order. A failing primitive
//! returns before any of the three.

mod attr;
mod call;
mod destroy;
mod link;
mod object;
mod var;

pub(crate) use attr::assign_attribute;
pub(crate) use call::{enter_operation, exit_operation};
pub(crate) use destroy::destroy_object;
pub(crate) use link::{delete_link, insert_link};
pub(crate) use object::{create_link_object, create_object, restore_object};
pub(crate) use var::{assign_variable, destroy_variable};
