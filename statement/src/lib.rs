//! SOIL Statement Engine
//!
//! Executes statements of the SOIL command language against a system
//! state. Every mutating statement does three things atomically with
//! respect to its own failure: it applies the change, prepends an inverse
//! statement that exactly undoes it, and appends an event describing it.
//!
//! # Module Structure
//!
//! - `stmt` - The Statement variants and their evaluation entry points
//! - `ops/` - Mutation primitives (object, attribute, link, destruction,
//!   variable, operation boundary)
//! - `context` - Per-evaluation context and expression helpers
//! - `result` - The evaluation result accumulator
//! - `diff` - State difference bookkeeping
//! - `events` - Change notifications
//! - `rvalue` - Lazily evaluated value references
//! - `config` - The statement-in-expression policy
//! - `error` - The evaluation failure taxonomy

mod config;
mod context;
mod diff;
mod error;
mod events;
mod ops;
mod result;
mod rvalue;
mod stmt;

pub use config::StatementPolicy;
pub use context::EvaluationContext;
pub use diff::StateDifference;
pub use error::{EvaluationError, EvaluationErrorKind};
pub use events::Event;
pub use result::EvaluationResult;
pub use rvalue::RValue;
pub use stmt::Statement;
