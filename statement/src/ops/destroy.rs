//! The destruction cascade primitive.

use crate::context::EvaluationContext;
use crate::error::EvaluationErrorKind;
use crate::events::Event;
use crate::result::EvaluationResult;
use crate::stmt::Statement;
use soil_core::Object;

/// Destroy an object together with its cascade.
///
/// Order matters: the active-operation guard runs over the full affected
/// set strictly before any mutation, so a blocked destruction leaves the
/// graph, the diff and the inverse untouched.
pub(crate) fn destroy_object(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    object: &str,
) -> Result<(), EvaluationErrorKind> {
    let affected = ctx.state.objects_affected_by_destruction(object);
    for name in &affected {
        if ctx.calls.has_active_operation(name) {
            return Err(EvaluationErrorKind::active_operation(name));
        }
    }

    // Snapshot of the target before deletion, for event classification.
    let target = ctx
        .state
        .object(object)
        .cloned()
        .ok_or_else(|| soil_state::StateError::unknown_object(object))?;

    let deleted = ctx.state.delete_object(object)?;
    result.diff_mut().add_delete_result(&deleted);

    // Collect dangling top-level references for the inverse, then sever
    // every binding to the removed entities.
    let mut dangling: Vec<(String, Vec<String>)> = Vec::new();
    for removed in &deleted.removed_objects {
        let references = ctx.env.top_level_references_to(&removed.name);
        if !references.is_empty() {
            dangling.push((removed.name.clone(), references));
        }
        ctx.env.undefine_references_to(&removed.name);
    }

    result.prepend_to_inverse(Statement::ObjectRestoration {
        target: target.name.clone(),
        deleted: deleted.clone(),
        dangling,
    });

    // The target is reported first, then every other cascade member is
    // classified independently by its structural kind.
    emit_destruction(result, &target);
    for removed in &deleted.removed_objects {
        if removed.name != target.name {
            emit_destruction(result, removed);
        }
    }
    for link in &deleted.removed_links {
        result.append_event(Event::LinkDeleted {
            association: link.association.clone(),
            participants: link.participants.clone(),
        });
    }
    Ok(())
}

/// A link object reports as a link deletion, a plain object as an object
/// destruction.
fn emit_destruction(result: &mut EvaluationResult, object: &Object) {
    match &object.link {
        Some(ends) => result.append_event(Event::LinkDeleted {
            association: ends.association.clone(),
            participants: ends.participants.clone(),
        }),
        None => result.append_event(Event::ObjectDestroyed {
            object: object.name.clone(),
            class: object.class.clone(),
        }),
    }
}
