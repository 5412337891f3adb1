//! SOIL Operation Call Stack
//!
//! Tracks nested non-query operation invocations.
//!
//! Responsibilities:
//! - Call records (receiver, operation, arguments, policy selection)
//! - Enter/exit pairing with depth guarding
//! - The active-operation relation used by the destruction guard

mod call;
mod error;
mod stack;

pub use call::{OperationCall, PpcPolicy};
pub use error::{CallError, CallResult};
pub use stack::CallStack;
