//! Object creation and restoration primitives.

use crate::context::EvaluationContext;
use crate::error::EvaluationErrorKind;
use crate::events::Event;
use crate::result::EvaluationResult;
use crate::rvalue::RValue;
use crate::stmt::Statement;
use soil_core::Value;
use soil_state::DeleteResult;

/// Create a new object; the inverse destroys it.
pub(crate) fn create_object(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    class: &str,
    name: Option<&str>,
) -> Result<String, EvaluationErrorKind> {
    let created = ctx.state.create_object(class, name)?;
    let name = created.name.clone();
    let class = created.class.clone();

    result.diff_mut().add_new_object(&name);
    result.prepend_to_inverse(Statement::ObjectDestruction {
        object: RValue::object(&name),
    });
    result.append_event(Event::ObjectCreated {
        object: name.clone(),
        class,
    });
    Ok(name)
}

/// Create a new link object; the inverse destroys it (which also removes
/// its link half).
pub(crate) fn create_link_object(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    association: &str,
    name: Option<&str>,
    participants: Vec<String>,
    qualifiers: Vec<Vec<Value>>,
) -> Result<String, EvaluationErrorKind> {
    let created =
        ctx.state
            .create_link_object(association, name, participants.clone(), qualifiers)?;
    let name = created.name.clone();

    result.diff_mut().add_new_link_object(&name);
    result.prepend_to_inverse(Statement::ObjectDestruction {
        object: RValue::object(&name),
    });
    result.append_event(Event::LinkInserted {
        association: association.to_string(),
        participants,
    });
    Ok(name)
}

/// Reinsert a full destruction snapshot and rebind the variable
/// references that dangled when it was taken; the inverse re-destroys the
/// original target.
pub(crate) fn restore_object(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    target: &str,
    deleted: &DeleteResult,
    dangling: &[(String, Vec<String>)],
) -> Result<(), EvaluationErrorKind> {
    ctx.state.restore(deleted)?;

    for (object, names) in dangling {
        for name in names {
            ctx.env.assign(name, Value::Object(object.clone()));
        }
    }

    result.prepend_to_inverse(Statement::ObjectDestruction {
        object: RValue::object(target),
    });

    for object in &deleted.removed_objects {
        match &object.link {
            Some(ends) => {
                result.diff_mut().add_new_link_object(&object.name);
                result.append_event(Event::LinkInserted {
                    association: ends.association.clone(),
                    participants: ends.participants.clone(),
                });
            }
            None => {
                result.diff_mut().add_new_object(&object.name);
                result.append_event(Event::ObjectCreated {
                    object: object.name.clone(),
                    class: object.class.clone(),
                });
            }
        }
    }
    for link in &deleted.removed_links {
        result.diff_mut().add_new_link(link.clone());
        result.append_event(Event::LinkInserted {
            association: link.association.clone(),
            participants: link.participants.clone(),
        });
    }
    Ok(())
}
