//! Per-evaluation context.

use crate::config::StatementPolicy;
use crate::error::EvaluationErrorKind;
use crate::rvalue::RValue;
use soil_calls::CallStack;
use soil_core::Value;
use soil_eval::{Evaluator, Expression, VarEnv};
use soil_state::SystemState;

/// Bundles the system state, variable environment and call stack for the
/// duration of one top-level statement evaluation, together with a stack
/// of currently evaluating expressions used for error attribution.
///
/// The context borrows its collaborators exclusively; one context drives
/// exactly one in-flight evaluation.
#[derive(Debug)]
pub struct EvaluationContext<'a> {
    /// The object/link graph.
    pub state: &'a mut SystemState,
    /// Variable bindings of the current scope.
    pub env: &'a mut VarEnv,
    /// Active non-query operation calls.
    pub calls: &'a mut CallStack,
    policy: StatementPolicy,
    evaluator: Evaluator,
    expression_stack: Vec<String>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context over the given collaborators.
    pub fn new(
        state: &'a mut SystemState,
        env: &'a mut VarEnv,
        calls: &'a mut CallStack,
    ) -> Self {
        Self {
            state,
            env,
            calls,
            policy: StatementPolicy::default(),
            evaluator: Evaluator::new(),
            expression_stack: Vec::new(),
        }
    }

    /// Thread a statement-in-expression policy through this context.
    pub fn with_policy(mut self, policy: StatementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The statement-in-expression policy in effect.
    pub fn policy(&self) -> StatementPolicy {
        self.policy
    }

    /// The expression currently being evaluated, if any.
    pub fn current_expression(&self) -> Option<&str> {
        self.expression_stack.last().map(|s| s.as_str())
    }

    /// Evaluate an expression, tracking it on the diagnostic stack for
    /// the duration. Fails when the evaluator reports an error, or when
    /// `must_be_defined` and the result is undefined.
    pub fn evaluate_expression(
        &mut self,
        expr: &Expression,
        must_be_defined: bool,
    ) -> Result<Value, EvaluationErrorKind> {
        self.expression_stack.push(expr.to_string());
        let outcome = self.evaluator.eval(expr, self.state, self.env);
        self.expression_stack.pop();

        let value =
            outcome.map_err(|e| EvaluationErrorKind::expression_failed(expr, e))?;
        if must_be_defined && value.is_undefined() {
            return Err(EvaluationErrorKind::undefined_expression(expr));
        }
        Ok(value)
    }

    /// Evaluate an expression that must yield an object reference;
    /// returns the referenced object name.
    pub fn evaluate_object_expression(
        &mut self,
        expr: &Expression,
    ) -> Result<String, EvaluationErrorKind> {
        let value = self.evaluate_expression(expr, true)?;
        match value {
            Value::Object(name) => Ok(name),
            other => Err(EvaluationErrorKind::not_an_object(expr, other.type_name())),
        }
    }

    /// Evaluate an expression that must yield a string.
    pub fn evaluate_string(&mut self, expr: &Expression) -> Result<String, EvaluationErrorKind> {
        let value = self.evaluate_expression(expr, true)?;
        match value {
            Value::String(s) => Ok(s),
            other => Err(EvaluationErrorKind::not_a_string(expr, other.type_name())),
        }
    }

    /// Evaluate an rvalue with the same definedness contract as
    /// [`EvaluationContext::evaluate_expression`].
    pub fn evaluate_rvalue(
        &mut self,
        rvalue: &RValue,
        must_be_defined: bool,
    ) -> Result<Value, EvaluationErrorKind> {
        let value = match rvalue {
            RValue::Literal(value) => value.clone(),
            RValue::Expr(expr) => self.evaluate_expression(expr, false)?,
        };
        if must_be_defined && value.is_undefined() {
            return Err(EvaluationErrorKind::undefined_rvalue(rvalue));
        }
        Ok(value)
    }

    /// Evaluate an rvalue that must yield an object reference.
    pub fn evaluate_object_rvalue(
        &mut self,
        rvalue: &RValue,
    ) -> Result<String, EvaluationErrorKind> {
        let value = self.evaluate_rvalue(rvalue, true)?;
        match value {
            Value::Object(name) => Ok(name),
            other => Err(EvaluationErrorKind::not_an_object(rvalue, other.type_name())),
        }
    }

    /// Evaluate a list of object-valued rvalues (link participants).
    pub fn evaluate_object_rvalues(
        &mut self,
        rvalues: &[RValue],
    ) -> Result<Vec<String>, EvaluationErrorKind> {
        rvalues
            .iter()
            .map(|rv| self.evaluate_object_rvalue(rv))
            .collect()
    }

    /// Evaluate per-end qualifier rvalues.
    pub fn evaluate_qualifiers(
        &mut self,
        qualifiers: &[Vec<RValue>],
    ) -> Result<Vec<Vec<Value>>, EvaluationErrorKind> {
        qualifiers
            .iter()
            .map(|end| {
                end.iter()
                    .map(|rv| self.evaluate_rvalue(rv, true))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soil_core::{ModelBuilder, Multiplicity};

    fn collaborators() -> (SystemState, VarEnv, CallStack) {
        let mut builder = ModelBuilder::new("M");
        builder.class("Person").attr("age", "Integer").done().unwrap();
        builder.class("Car").done().unwrap();
        builder
            .association("Owns")
            .end("owner", "Person", Multiplicity::optional())
            .end("owned", "Car", Multiplicity::many())
            .done()
            .unwrap();
        let mut state = SystemState::new(builder.build().unwrap());
        state.create_object("Person", Some("ada")).unwrap();
        (state, VarEnv::new(), CallStack::new())
    }

    #[test]
    fn test_expression_stack_balanced_on_success_and_failure() {
        let (mut state, mut env, mut calls) = collaborators();
        let mut ctx = EvaluationContext::new(&mut state, &mut env, &mut calls);

        ctx.evaluate_expression(&Expression::literal(1i64), false)
            .unwrap();
        assert_eq!(ctx.current_expression(), None);

        let failing = Expression::literal(1i64).attribute("age");
        ctx.evaluate_expression(&failing, false).unwrap_err();
        assert_eq!(ctx.current_expression(), None);
    }

    #[test]
    fn test_must_be_defined() {
        let (mut state, mut env, mut calls) = collaborators();
        let mut ctx = EvaluationContext::new(&mut state, &mut env, &mut calls);

        let undefined = Expression::var("missing");
        assert!(ctx.evaluate_expression(&undefined, false).is_ok());
        assert!(matches!(
            ctx.evaluate_expression(&undefined, true),
            Err(EvaluationErrorKind::UndefinedExpression { .. })
        ));
    }

    #[test]
    fn test_object_expression_type_check() {
        let (mut state, mut env, mut calls) = collaborators();
        let mut ctx = EvaluationContext::new(&mut state, &mut env, &mut calls);

        assert_eq!(
            ctx.evaluate_object_expression(&Expression::object("ada"))
                .unwrap(),
            "ada"
        );
        assert!(matches!(
            ctx.evaluate_object_expression(&Expression::literal(5i64)),
            Err(EvaluationErrorKind::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_string_expression_type_check() {
        let (mut state, mut env, mut calls) = collaborators();
        let mut ctx = EvaluationContext::new(&mut state, &mut env, &mut calls);

        assert_eq!(
            ctx.evaluate_string(&Expression::literal("lo1")).unwrap(),
            "lo1"
        );
        assert!(matches!(
            ctx.evaluate_string(&Expression::literal(5i64)),
            Err(EvaluationErrorKind::NotAString { .. })
        ));
    }

    #[test]
    fn test_rvalue_definedness() {
        let (mut state, mut env, mut calls) = collaborators();
        let mut ctx = EvaluationContext::new(&mut state, &mut env, &mut calls);

        let undefined = RValue::Literal(Value::Undefined);
        assert!(ctx.evaluate_rvalue(&undefined, false).is_ok());
        assert!(matches!(
            ctx.evaluate_rvalue(&undefined, true),
            Err(EvaluationErrorKind::UndefinedRValue { .. })
        ));
    }
}
