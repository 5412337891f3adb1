//! Undo/redo history round-trips across a whole session.

use pretty_assertions::assert_eq;
use soil_core::{ModelBuilder, Multiplicity, Value};
use soil_eval::Expression;
use soil_session::{Session, SessionError};
use soil_statement::{RValue, Statement};

fn library_model() -> soil_core::Model {
    let mut builder = ModelBuilder::new("Library");
    builder
        .class("Person")
        .attr("name", "String")
        .attr("age", "Integer")
        .done()
        .unwrap();
    builder.class("Book").attr("title", "String").done().unwrap();
    builder
        .association("Borrows")
        .end("borrower", "Person", Multiplicity::optional())
        .end("borrowed", "Book", Multiplicity::many())
        .done()
        .unwrap();
    builder.build().unwrap()
}

#[test]
fn test_undo_redo_round_trip() {
    // GIVEN: three executed statements
    let mut session = Session::new(library_model());
    session
        .execute(&Statement::create_object(
            "Person",
            Some(Expression::literal("ada")),
        ))
        .unwrap();
    session
        .execute(&Statement::assign_attr(
            RValue::object("ada"),
            "age",
            RValue::literal(36i64),
        ))
        .unwrap();
    session
        .execute(&Statement::create_object(
            "Book",
            Some(Expression::literal("b1")),
        ))
        .unwrap();
    assert_eq!(session.undo_depth(), 3);

    // WHEN: undoing everything
    session.undo().unwrap();
    session.undo().unwrap();
    session.undo().unwrap();

    // THEN: the state is empty again
    assert!(session.state().object("ada").is_none());
    assert!(session.state().object("b1").is_none());
    assert_eq!(session.undo_depth(), 0);
    assert_eq!(session.redo_depth(), 3);

    // AND: redoing everything reproduces the state
    session.redo().unwrap();
    session.redo().unwrap();
    session.redo().unwrap();
    assert_eq!(
        session.state().attribute_value("ada", "age").unwrap(),
        Value::Int(36)
    );
    assert!(session.state().object("b1").is_some());
    assert_eq!(session.undo_depth(), 3);
    assert_eq!(session.redo_depth(), 0);
}

#[test]
fn test_execute_clears_redo() {
    let mut session = Session::new(library_model());
    session
        .execute(&Statement::create_object(
            "Person",
            Some(Expression::literal("ada")),
        ))
        .unwrap();
    session.undo().unwrap();
    assert_eq!(session.redo_depth(), 1);

    session
        .execute(&Statement::create_object(
            "Book",
            Some(Expression::literal("b1")),
        ))
        .unwrap();

    assert_eq!(session.redo_depth(), 0);
    assert!(matches!(session.redo(), Err(SessionError::NothingToRedo)));
}

#[test]
fn test_undo_of_destruction_restores_cascade_and_bindings() {
    // GIVEN: a borrowed book and variables referencing both objects
    let mut session = Session::new(library_model());
    session
        .execute(&Statement::create_object(
            "Person",
            Some(Expression::literal("ada")),
        ))
        .unwrap();
    session
        .execute(&Statement::create_object(
            "Book",
            Some(Expression::literal("b1")),
        ))
        .unwrap();
    session
        .execute(&Statement::insert_link(
            "Borrows",
            vec![RValue::object("ada"), RValue::object("b1")],
        ))
        .unwrap();
    session
        .execute(&Statement::assign_var("a", RValue::object("ada")))
        .unwrap();

    // WHEN: destroying ada and undoing it
    session
        .execute(&Statement::destroy(RValue::object("ada")))
        .unwrap();
    assert!(session.state().object("ada").is_none());
    assert_eq!(session.env().look_up("a"), None);
    session.undo().unwrap();

    // THEN: object, link and binding are all back
    assert!(session.state().object("ada").is_some());
    assert!(session
        .state()
        .link_between_objects("Borrows", &["ada".into(), "b1".into()], &[])
        .is_some());
    assert_eq!(
        session.env().look_up("a"),
        Some(&Value::Object("ada".to_string()))
    );

    // AND: redo destroys it again
    session.redo().unwrap();
    assert!(session.state().object("ada").is_none());
}

#[test]
fn test_variable_history() {
    let mut session = Session::new(library_model());
    session
        .execute(&Statement::assign_var("x", RValue::literal(1i64)))
        .unwrap();
    session
        .execute(&Statement::assign_var("x", RValue::literal(2i64)))
        .unwrap();

    session.undo().unwrap();
    assert_eq!(session.env().look_up("x"), Some(&Value::Int(1)));
    session.undo().unwrap();
    assert_eq!(session.env().look_up("x"), None);
    session.redo().unwrap();
    session.redo().unwrap();
    assert_eq!(session.env().look_up("x"), Some(&Value::Int(2)));
}
