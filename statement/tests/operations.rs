//! Operation call boundary: enter/exit pairing, parameter frames,
//! policy overrides and guarded totality.

use soil_calls::{CallStack, PpcPolicy};
use soil_core::{ModelBuilder, OperationDef, Value};
use soil_eval::{Expression, VarEnv};
use soil_state::SystemState;
use soil_statement::{
    EvaluationContext, EvaluationErrorKind, EvaluationResult, Event, RValue, Statement,
};

fn model() -> soil_core::Model {
    let mut builder = ModelBuilder::new("Payroll");
    builder
        .class("Person")
        .attr("age", "Integer")
        .attr("salary", "Integer")
        .operation(OperationDef::new("raise").param("amount"))
        .operation(OperationDef::new("birthday"))
        .operation(OperationDef::new("describe").query())
        .done()
        .unwrap();
    builder.build().unwrap()
}

struct Fixture {
    state: SystemState,
    env: VarEnv,
    calls: CallStack,
}

impl Fixture {
    fn new() -> Self {
        let mut state = SystemState::new(model());
        state.create_object("Person", Some("ada")).unwrap();
        Self {
            state,
            env: VarEnv::new(),
            calls: CallStack::new(),
        }
    }

    fn run(&mut self, statement: &Statement) -> EvaluationResult {
        let mut result = EvaluationResult::new();
        let mut ctx =
            EvaluationContext::new(&mut self.state, &mut self.env, &mut self.calls);
        statement.evaluate_guarded(&mut ctx, &mut result);
        result
    }

    fn run_ok(&mut self, statement: &Statement) -> EvaluationResult {
        let result = self.run(statement);
        if let Some(failure) = result.failure() {
            panic!("unexpected failure: {}", failure);
        }
        result
    }
}

#[test]
fn test_exit_without_enter_fails() {
    let mut fixture = Fixture::new();

    let result = fixture.run(&Statement::exit_operation(None));

    let failure = result.failure().expect("exit must fail");
    assert!(matches!(
        failure.kind(),
        EvaluationErrorKind::NoCurrentOperation
    ));
    assert_eq!(fixture.calls.depth(), 0);
}

#[test]
fn test_matched_pair_leaves_depth_unchanged() {
    // GIVEN
    let mut fixture = Fixture::new();
    assert_eq!(fixture.calls.depth(), 0);

    // WHEN
    let entered = fixture.run_ok(&Statement::enter_operation(
        Expression::object("ada"),
        "raise",
        vec![Expression::literal(100i64)],
    ));
    assert_eq!(fixture.calls.depth(), 1);
    let exited = fixture.run_ok(&Statement::exit_operation(None));

    // THEN
    assert_eq!(fixture.calls.depth(), 0);
    assert!(matches!(
        entered.events(),
        [Event::OperationEntered { call }] if call.operation == "raise"
    ));
    assert!(matches!(
        exited.events(),
        [Event::OperationExited { call }] if call.operation == "raise"
    ));
}

#[test]
fn test_enter_binds_self_and_parameters() {
    // GIVEN
    let mut fixture = Fixture::new();
    fixture.run_ok(&Statement::assign_var("x", RValue::literal(1i64)));

    // WHEN
    fixture.run_ok(&Statement::enter_operation(
        Expression::object("ada"),
        "raise",
        vec![Expression::literal(100i64)],
    ));

    // THEN: the operation frame sees self and amount, not the caller's x
    assert_eq!(
        fixture.env.look_up("self"),
        Some(&Value::Object("ada".to_string()))
    );
    assert_eq!(fixture.env.look_up("amount"), Some(&Value::Int(100)));
    assert_eq!(fixture.env.look_up("x"), None);

    // AND: exit pops the frame
    fixture.run_ok(&Statement::exit_operation(None));
    assert_eq!(fixture.env.look_up("self"), None);
    assert_eq!(fixture.env.look_up("x"), Some(&Value::Int(1)));
}

#[test]
fn test_exit_records_result_value() {
    let mut fixture = Fixture::new();
    fixture.run_ok(&Statement::enter_operation(
        Expression::object("ada"),
        "birthday",
        vec![],
    ));

    let exited = fixture.run_ok(&Statement::exit_operation(Some(Expression::literal(true))));

    assert!(matches!(
        exited.events(),
        [Event::OperationExited { call }] if call.result == Some(Value::Bool(true))
    ));
}

#[test]
fn test_exit_applies_ppc_override() {
    let mut fixture = Fixture::new();
    fixture.run_ok(&Statement::enter_operation(
        Expression::object("ada"),
        "birthday",
        vec![],
    ));

    let exited = fixture.run_ok(&Statement::OperationExit {
        result: None,
        ppc_override: Some(PpcPolicy::Ignore),
    });

    assert!(matches!(
        exited.events(),
        [Event::OperationExited { call }] if call.ppc_policy == PpcPolicy::Ignore
    ));
}

#[test]
fn test_enter_rejects_query_operation() {
    let mut fixture = Fixture::new();

    let result = fixture.run(&Statement::enter_operation(
        Expression::object("ada"),
        "describe",
        vec![],
    ));

    assert!(matches!(
        result.failure().map(|f| f.kind()),
        Some(EvaluationErrorKind::QueryOperation { .. })
    ));
    assert_eq!(fixture.calls.depth(), 0);
    assert_eq!(fixture.env.frame_depth(), 1);
}

#[test]
fn test_enter_rejects_unknown_operation() {
    let mut fixture = Fixture::new();

    let result = fixture.run(&Statement::enter_operation(
        Expression::object("ada"),
        "retire",
        vec![],
    ));

    assert!(matches!(
        result.failure().map(|f| f.kind()),
        Some(EvaluationErrorKind::UnknownOperation { .. })
    ));
}

#[test]
fn test_enter_rejects_argument_count_mismatch() {
    let mut fixture = Fixture::new();

    let result = fixture.run(&Statement::enter_operation(
        Expression::object("ada"),
        "raise",
        vec![],
    ));

    assert!(matches!(
        result.failure().map(|f| f.kind()),
        Some(EvaluationErrorKind::ArgumentCountMismatch {
            expected: 1,
            actual: 0,
            ..
        })
    ));
    assert_eq!(fixture.env.frame_depth(), 1);
}

#[test]
fn test_guarded_totality_on_partial_sequence_failure() {
    // GIVEN: a sequence whose second statement fails
    let mut fixture = Fixture::new();
    let sequence = Statement::sequence(vec![
        Statement::assign_attr(RValue::object("ada"), "age", RValue::literal(40i64)),
        Statement::destroy(RValue::object("ghost")),
        Statement::assign_attr(RValue::object("ada"), "age", RValue::literal(50i64)),
    ]);

    // WHEN
    let result = fixture.run(&sequence);

    // THEN: the failure is captured, attributed to the failing primitive
    let failure = result.failure().expect("sequence must fail");
    assert_eq!(failure.statement(), "destroy ghost");

    // AND: diff, events and inverse reflect only the committed prefix
    assert_eq!(result.diff().modified_objects(), &["ada".to_string()]);
    assert_eq!(result.events().len(), 1);
    assert_eq!(
        fixture.state.attribute_value("ada", "age").unwrap(),
        Value::Int(40)
    );
    assert_eq!(
        result.inverse_statement(),
        Statement::assign_attr(RValue::object("ada"), "age", RValue::Literal(Value::Undefined))
    );

    // AND: running the partial inverse restores the pre-state
    fixture.run_ok(&result.inverse_statement());
    assert_eq!(
        fixture.state.attribute_value("ada", "age").unwrap(),
        Value::Undefined
    );
}

#[test]
fn test_failure_reports_triggering_expression() {
    // Navigation failures surface the offending expression in the cause.
    let mut fixture = Fixture::new();

    let result = fixture.run(&Statement::assign_var(
        "x",
        RValue::Expr(Expression::literal(5i64).attribute("age")),
    ));

    let failure = result.failure().expect("assignment must fail");
    assert!(failure.to_string().contains("5.age"));
}
