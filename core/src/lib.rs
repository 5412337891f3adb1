//! SOIL Core Types
//!
//! This crate provides the foundational types used throughout the SOIL
//! engine:
//! - Value types (the Value enum with all scalar and reference kinds)
//! - The structural model (classes, attributes, operations, associations)
//! - Instance entities (objects, links, link objects)
//! - Model construction and validation errors

mod entity;
mod error;
mod model;
mod value;

pub use entity::*;
pub use error::*;
pub use model::*;
pub use value::*;
