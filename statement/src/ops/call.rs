//! Operation call boundary primitives.

use crate::context::EvaluationContext;
use crate::error::EvaluationErrorKind;
use crate::events::Event;
use crate::result::EvaluationResult;
use soil_calls::{OperationCall, PpcPolicy};
use soil_core::Value;
use soil_state::StateError;

/// Enter a non-query operation: validate the call against the receiver's
/// class, push a variable frame binding `self` and the parameters, push
/// the call record.
pub(crate) fn enter_operation(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    receiver: &str,
    operation: &str,
    arguments: Vec<Value>,
    ppc_policy: PpcPolicy,
    explicit: bool,
) -> Result<(), EvaluationErrorKind> {
    let object = ctx
        .state
        .object(receiver)
        .ok_or_else(|| StateError::unknown_object(receiver))?;
    let class = ctx
        .state
        .model()
        .class(&object.class)
        .ok_or_else(|| StateError::unknown_class(&object.class))?;
    let operation_def = class
        .operation(operation)
        .ok_or_else(|| EvaluationErrorKind::unknown_operation(&class.name, operation))?;

    if operation_def.is_query {
        return Err(EvaluationErrorKind::query_operation(operation));
    }
    if operation_def.params.len() != arguments.len() {
        return Err(EvaluationErrorKind::argument_count_mismatch(
            operation,
            operation_def.params.len(),
            arguments.len(),
        ));
    }
    let params = operation_def.params.clone();

    let mut call = OperationCall::new(receiver, operation, arguments.clone())
        .with_ppc_policy(ppc_policy);
    if explicit {
        call = call.explicit();
    }
    ctx.calls.enter(call.clone())?;

    // The frame follows the successful push; a rejected call leaves the
    // environment untouched.
    ctx.env.push_frame();
    ctx.env.assign("self", Value::Object(receiver.to_string()));
    for (param, argument) in params.iter().zip(arguments) {
        ctx.env.assign(param, argument);
    }

    result.append_event(Event::OperationEntered { call });
    Ok(())
}

/// Exit the current non-query operation, applying an optional policy
/// override before the call is popped.
pub(crate) fn exit_operation(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    result_value: Option<Value>,
    ppc_override: Option<PpcPolicy>,
) -> Result<(), EvaluationErrorKind> {
    if ctx.calls.current().is_none() {
        return Err(EvaluationErrorKind::NoCurrentOperation);
    }
    if let Some(policy) = ppc_override {
        if let Some(call) = ctx.calls.current_mut() {
            call.ppc_policy = policy;
        }
    }

    let call = ctx.calls.exit(result_value)?;
    ctx.env.pop_frame();

    result.append_event(Event::OperationExited { call });
    Ok(())
}
