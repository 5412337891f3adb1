//! Variable binding primitives.
//!
//! Variable mutations touch only the environment, never the graph; they
//! record inverses but emit no events.

use crate::context::EvaluationContext;
use crate::result::EvaluationResult;
use crate::rvalue::RValue;
use crate::stmt::Statement;
use soil_core::Value;

/// Rebind a name, recording the previous binding (or its absence) as the
/// inverse.
pub(crate) fn assign_variable(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    name: &str,
    value: Value,
) {
    match ctx.env.look_up(name) {
        Some(old) => result.prepend_to_inverse(Statement::VariableAssignment {
            name: name.to_string(),
            rvalue: RValue::Literal(old.clone()),
        }),
        None => result.prepend_to_inverse(Statement::VariableDestruction {
            name: name.to_string(),
        }),
    }

    ctx.env.assign(name, value);
}

/// Remove a binding, recording the previous binding as the inverse.
pub(crate) fn destroy_variable(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    name: &str,
) {
    if let Some(old) = ctx.env.undefine(name) {
        result.prepend_to_inverse(Statement::VariableAssignment {
            name: name.to_string(),
            rvalue: RValue::Literal(old),
        });
    }
}
