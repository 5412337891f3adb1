//! Attribute assignment primitive.

use crate::context::EvaluationContext;
use crate::error::EvaluationErrorKind;
use crate::events::Event;
use crate::result::EvaluationResult;
use crate::rvalue::RValue;
use crate::stmt::Statement;
use soil_core::Value;

/// Overwrite an attribute slot; the inverse restores the old value.
pub(crate) fn assign_attribute(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    object: &str,
    attribute: &str,
    value: Value,
) -> Result<(), EvaluationErrorKind> {
    let old = ctx.state.set_attribute(object, attribute, value.clone())?;

    result.diff_mut().add_modified_object(object);
    result.prepend_to_inverse(Statement::AttributeAssignment {
        object: RValue::object(object),
        attribute: attribute.to_string(),
        value: RValue::Literal(old),
    });
    result.append_event(Event::AttributeAssigned {
        object: object.to_string(),
        attribute: attribute.to_string(),
        value,
    });
    Ok(())
}
