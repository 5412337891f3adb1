//! The evaluation result accumulator.

use crate::diff::StateDifference;
use crate::error::EvaluationError;
use crate::events::Event;
use crate::stmt::Statement;
use std::collections::VecDeque;

/// Accumulator produced by one statement evaluation: the ordered event
/// log, the state difference, the synthesized inverse statement and an
/// optional captured failure.
///
/// The inverse is built by prepending each primitive's inverse as it
/// executes, so the accumulated sequence read front to back exactly
/// undoes the whole statement against the post-state.
#[derive(Debug, Default)]
pub struct EvaluationResult {
    events: Vec<Event>,
    diff: StateDifference,
    inverse: VecDeque<Statement>,
    failure: Option<EvaluationError>,
}

impl EvaluationResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// The events in execution order.
    pub fn events(&self) -> &[Event] {
        self.events.as_slice()
    }

    /// Append an event.
    pub fn append_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// The accumulated state difference.
    pub fn diff(&self) -> &StateDifference {
        &self.diff
    }

    /// Mutable access for the primitives.
    pub fn diff_mut(&mut self) -> &mut StateDifference {
        &mut self.diff
    }

    /// Prepend a primitive's inverse.
    pub fn prepend_to_inverse(&mut self, statement: Statement) {
        self.inverse.push_front(statement);
    }

    /// The synthesized inverse statement. Executing it front to back
    /// against the post-state undoes everything this result recorded.
    pub fn inverse_statement(&self) -> Statement {
        let mut statements: Vec<Statement> = self.inverse.iter().cloned().collect();
        match statements.len() {
            0 => Statement::Empty,
            1 => statements.remove(0),
            _ => Statement::Sequence(statements),
        }
    }

    /// The captured failure, if any.
    pub fn failure(&self) -> Option<&EvaluationError> {
        self.failure.as_ref()
    }

    /// Capture a failure.
    pub fn set_failure(&mut self, failure: EvaluationError) {
        self.failure = Some(failure);
    }

    /// Remove and return the captured failure (sub-statement re-raise).
    pub fn take_failure(&mut self) -> Option<EvaluationError> {
        self.failure.take()
    }

    /// Returns true if no failure was captured.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rvalue::RValue;

    #[test]
    fn test_inverse_is_mirror_of_execution_order() {
        // GIVEN: primitives executed S1, S2 prepend their inverses I1, I2
        let mut result = EvaluationResult::new();
        result.prepend_to_inverse(Statement::unset_var("one"));
        result.prepend_to_inverse(Statement::unset_var("two"));

        // THEN: the accumulated inverse reads I2, I1
        match result.inverse_statement() {
            Statement::Sequence(statements) => {
                assert_eq!(statements[0], Statement::unset_var("two"));
                assert_eq!(statements[1], Statement::unset_var("one"));
            }
            other => panic!("expected a sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_inverse_of_nothing_is_empty() {
        let result = EvaluationResult::new();

        assert_eq!(result.inverse_statement(), Statement::Empty);
    }

    #[test]
    fn test_single_inverse_is_not_wrapped() {
        let mut result = EvaluationResult::new();
        result.prepend_to_inverse(Statement::assign_var("x", RValue::literal(1i64)));

        assert!(matches!(
            result.inverse_statement(),
            Statement::VariableAssignment { .. }
        ));
    }
}
