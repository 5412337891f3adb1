//! The session facade.

use crate::error::{SessionError, SessionResult};
use soil_calls::CallStack;
use soil_core::Model;
use soil_eval::VarEnv;
use soil_state::SystemState;
use soil_statement::{
    EvaluationContext, EvaluationResult, Statement, StatementPolicy,
};

/// A running SOIL session: one system state, one variable environment,
/// one operation call stack, and the undo/redo history of everything
/// executed so far.
#[derive(Debug)]
pub struct Session {
    state: SystemState,
    env: VarEnv,
    calls: CallStack,
    policy: StatementPolicy,
    undo: Vec<Statement>,
    redo: Vec<Statement>,
}

impl Session {
    /// Create a session over an empty instance of the given model.
    pub fn new(model: Model) -> Self {
        Self {
            state: SystemState::new(model),
            env: VarEnv::new(),
            calls: CallStack::new(),
            policy: StatementPolicy::default(),
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Select the statement-in-expression policy for this session.
    pub fn with_policy(mut self, policy: StatementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The system state.
    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// The variable environment.
    pub fn env(&self) -> &VarEnv {
        &self.env
    }

    /// The operation call stack.
    pub fn calls(&self) -> &CallStack {
        &self.calls
    }

    /// The statement-in-expression policy in effect.
    pub fn policy(&self) -> StatementPolicy {
        self.policy
    }

    /// Number of undoable steps.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable steps.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Execute a statement through the guarded entry point.
    ///
    /// On success the synthesized inverse joins the undo history and the
    /// redo history is cleared. On failure the inverse of whatever prefix
    /// committed joins the undo history too, so partial effects of a
    /// failed composite stay undoable; the failure is returned.
    pub fn execute(&mut self, statement: &Statement) -> SessionResult<EvaluationResult> {
        let mut result = self.evaluate(statement);

        let inverse = result.inverse_statement();
        if inverse != Statement::Empty {
            self.undo.push(inverse);
            self.redo.clear();
        }

        match result.take_failure() {
            Some(failure) => Err(SessionError::Statement(failure)),
            None => Ok(result),
        }
    }

    /// Undo the most recent step by executing its inverse; the inverse of
    /// the undo becomes redoable.
    pub fn undo(&mut self) -> SessionResult<EvaluationResult> {
        let statement = self.undo.pop().ok_or(SessionError::NothingToUndo)?;
        let mut result = self.evaluate(&statement);

        match result.take_failure() {
            Some(failure) => Err(SessionError::Statement(failure)),
            None => {
                self.redo.push(result.inverse_statement());
                Ok(result)
            }
        }
    }

    /// Redo the most recently undone step.
    pub fn redo(&mut self) -> SessionResult<EvaluationResult> {
        let statement = self.redo.pop().ok_or(SessionError::NothingToRedo)?;
        let mut result = self.evaluate(&statement);

        match result.take_failure() {
            Some(failure) => Err(SessionError::Statement(failure)),
            None => {
                self.undo.push(result.inverse_statement());
                Ok(result)
            }
        }
    }

    fn evaluate(&mut self, statement: &Statement) -> EvaluationResult {
        let mut result = EvaluationResult::new();
        let mut ctx = EvaluationContext::new(&mut self.state, &mut self.env, &mut self.calls)
            .with_policy(self.policy);
        statement.evaluate_guarded(&mut ctx, &mut result);
        result
    }
}
