//! Expression evaluator.

use crate::env::VarEnv;
use crate::error::{EvalError, EvalResult};
use crate::expr::Expression;
use soil_core::Value;
use soil_state::SystemState;

/// Evaluates expressions against a system state and variable environment.
///
/// Evaluation never mutates the state. Unknown variables and attribute
/// access through an undefined value evaluate to `Undefined` rather than
/// failing; structural errors (unknown attributes, associations, roles)
/// and to-one navigations with more than one target fail.
#[derive(Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Create a new evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate an expression.
    pub fn eval(
        &self,
        expr: &Expression,
        state: &SystemState,
        env: &VarEnv,
    ) -> EvalResult<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::Var(name) => {
                Ok(env.look_up(name).cloned().unwrap_or(Value::Undefined))
            }

            Expression::Attribute(source, attribute) => {
                let value = self.eval(source, state, env)?;
                if value.is_undefined() {
                    return Ok(Value::Undefined);
                }
                let object_name = value
                    .as_object()
                    .ok_or_else(|| EvalError::not_an_object(source.to_string(), value.type_name()))?;
                let object = state
                    .object(object_name)
                    .ok_or_else(|| EvalError::unknown_object(object_name))?;
                object
                    .attribute(attribute)
                    .cloned()
                    .ok_or_else(|| EvalError::unknown_attribute(&object.class, attribute))
            }

            Expression::Navigation {
                source,
                association,
                role,
            } => {
                let value = self.eval(source, state, env)?;
                if value.is_undefined() {
                    return Ok(Value::Undefined);
                }
                let object_name = value
                    .as_object()
                    .ok_or_else(|| EvalError::not_an_object(source.to_string(), value.type_name()))?;
                if state.object(object_name).is_none() {
                    return Err(EvalError::unknown_object(object_name));
                }
                self.navigate(state, object_name, association, role)
            }
        }
    }

    /// Collect the objects reachable from `source` over the given role and
    /// apply the role's multiplicity regime.
    fn navigate(
        &self,
        state: &SystemState,
        source: &str,
        association: &str,
        role: &str,
    ) -> EvalResult<Value> {
        let assoc = state
            .model()
            .association(association)
            .ok_or_else(|| EvalError::unknown_association(association))?;
        let (target_index, target_end) = assoc
            .end(role)
            .ok_or_else(|| EvalError::unknown_role(association, role))?;

        let mut targets: Vec<String> = Vec::new();
        let mut collect = |participants: &[String]| {
            let from_other_end = participants
                .iter()
                .enumerate()
                .any(|(j, p)| j != target_index && p == source);
            if from_other_end {
                let target = participants[target_index].clone();
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        };

        for link in state.links_of(association) {
            collect(&link.participants);
        }
        for object in state.objects() {
            if let Some(ends) = &object.link {
                if ends.association == association {
                    collect(&ends.participants);
                }
            }
        }

        if target_end.multiplicity.is_to_one() {
            match targets.len() {
                0 => Ok(Value::Undefined),
                1 => Ok(Value::Object(targets.remove(0))),
                count => Err(EvalError::multiplicity_violation(association, role, count)),
            }
        } else {
            Ok(Value::Collection(
                targets.into_iter().map(Value::Object).collect(),
            ))
        }
    }
}
