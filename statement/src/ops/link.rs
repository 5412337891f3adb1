//! Link insertion and deletion primitives.

use crate::context::EvaluationContext;
use crate::error::EvaluationErrorKind;
use crate::events::Event;
use crate::ops::destroy::destroy_object;
use crate::result::EvaluationResult;
use crate::rvalue::RValue;
use crate::stmt::Statement;
use soil_core::Value;
use soil_state::LinkKind;

/// Insert a link; the inverse deletes it by its resolved participants.
pub(crate) fn insert_link(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    association: &str,
    participants: Vec<String>,
    qualifiers: Vec<Vec<Value>>,
) -> Result<(), EvaluationErrorKind> {
    let link = ctx
        .state
        .create_link(association, participants, qualifiers)?;

    result.diff_mut().add_new_link(link.clone());
    result.prepend_to_inverse(Statement::LinkDeletion {
        association: association.to_string(),
        participants: wrap_participants(&link.participants),
        qualifiers: wrap_qualifiers(&link.qualifiers),
    });
    result.append_event(Event::LinkInserted {
        association: association.to_string(),
        participants: link.participants,
    });
    Ok(())
}

/// Delete a link identified by its participants; the inverse reinserts
/// it.
///
/// When the resolved link is in fact a link object, deletion delegates to
/// object destruction so its cascade and undo semantics apply uniformly.
pub(crate) fn delete_link(
    ctx: &mut EvaluationContext,
    result: &mut EvaluationResult,
    association: &str,
    participants: &[String],
    qualifiers: &[Vec<Value>],
) -> Result<(), EvaluationErrorKind> {
    if let Some(LinkKind::Object(name)) =
        ctx.state
            .link_between_objects(association, participants, qualifiers)
    {
        return destroy_object(ctx, result, &name);
    }

    let deleted = ctx.state.delete_link(association, participants, qualifiers)?;
    result.diff_mut().add_delete_result(&deleted);

    result.prepend_to_inverse(Statement::LinkInsertion {
        association: association.to_string(),
        participants: wrap_participants(participants),
        qualifiers: wrap_qualifiers(qualifiers),
    });
    result.append_event(Event::LinkDeleted {
        association: association.to_string(),
        participants: participants.to_vec(),
    });
    Ok(())
}

fn wrap_participants(participants: &[String]) -> Vec<RValue> {
    participants.iter().map(|p| RValue::object(p.as_str())).collect()
}

fn wrap_qualifiers(qualifiers: &[Vec<Value>]) -> Vec<Vec<RValue>> {
    qualifiers
        .iter()
        .map(|end| end.iter().cloned().map(RValue::Literal).collect())
        .collect()
}
