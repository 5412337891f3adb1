//! The SOIL statement variants and their evaluation entry points.

use crate::config::StatementPolicy;
use crate::context::EvaluationContext;
use crate::error::{EvaluationError, EvaluationErrorKind};
use crate::ops;
use crate::result::EvaluationResult;
use crate::rvalue::RValue;
use soil_calls::PpcPolicy;
use soil_core::Value;
use soil_eval::Expression;
use soil_state::DeleteResult;
use std::fmt;

/// One unit of the SOIL command language.
///
/// A statement is immutable once constructed; its textual rendering is a
/// pure function of its fields. Adding a mutation kind means adding a
/// variant here and a primitive in `ops/` — the match arms below are
/// exhaustive on purpose.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// No-op.
    Empty,

    /// `x := rvalue`
    VariableAssignment { name: String, rvalue: RValue },

    /// Remove the binding of `name`.
    VariableDestruction { name: String },

    /// `new Class('name')`
    ObjectCreation {
        class: String,
        name: Option<Expression>,
    },

    /// `destroy object`
    ObjectDestruction { object: RValue },

    /// Reinsert a destruction snapshot and rebind dangling references.
    /// Only ever synthesized as the inverse of a destruction.
    ObjectRestoration {
        target: String,
        deleted: DeleteResult,
        dangling: Vec<(String, Vec<String>)>,
    },

    /// `object.attribute := value`
    AttributeAssignment {
        object: RValue,
        attribute: String,
        value: RValue,
    },

    /// `insert (participants) into association`
    LinkInsertion {
        association: String,
        participants: Vec<RValue>,
        qualifiers: Vec<Vec<RValue>>,
    },

    /// `delete (participants) from association`
    LinkDeletion {
        association: String,
        participants: Vec<RValue>,
        qualifiers: Vec<Vec<RValue>>,
    },

    /// `new AssocClass('name') between (participants)`
    LinkObjectCreation {
        association: String,
        name: Option<Expression>,
        participants: Vec<RValue>,
        qualifiers: Vec<Vec<RValue>>,
    },

    /// `openter object operation(arguments)`
    OperationEnter {
        object: Expression,
        operation: String,
        arguments: Vec<Expression>,
        ppc_policy: PpcPolicy,
        explicit: bool,
    },

    /// `opexit result`
    OperationExit {
        result: Option<Expression>,
        ppc_override: Option<PpcPolicy>,
    },

    /// Sub-statements evaluated in order, stopping at the first failure.
    Sequence(Vec<Statement>),
}

impl Statement {
    // ==================== Constructors ====================

    /// `name := rvalue`
    pub fn assign_var(name: impl Into<String>, rvalue: impl Into<RValue>) -> Self {
        Statement::VariableAssignment {
            name: name.into(),
            rvalue: rvalue.into(),
        }
    }

    /// Remove the binding of `name`.
    pub fn unset_var(name: impl Into<String>) -> Self {
        Statement::VariableDestruction { name: name.into() }
    }

    /// `new class('name')`
    pub fn create_object(class: impl Into<String>, name: Option<Expression>) -> Self {
        Statement::ObjectCreation {
            class: class.into(),
            name,
        }
    }

    /// `destroy object`
    pub fn destroy(object: impl Into<RValue>) -> Self {
        Statement::ObjectDestruction {
            object: object.into(),
        }
    }

    /// `object.attribute := value`
    pub fn assign_attr(
        object: impl Into<RValue>,
        attribute: impl Into<String>,
        value: impl Into<RValue>,
    ) -> Self {
        Statement::AttributeAssignment {
            object: object.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// `insert (participants) into association`
    pub fn insert_link(association: impl Into<String>, participants: Vec<RValue>) -> Self {
        Statement::LinkInsertion {
            association: association.into(),
            participants,
            qualifiers: Vec::new(),
        }
    }

    /// `delete (participants) from association`
    pub fn delete_link(association: impl Into<String>, participants: Vec<RValue>) -> Self {
        Statement::LinkDeletion {
            association: association.into(),
            participants,
            qualifiers: Vec::new(),
        }
    }

    /// `new association('name') between (participants)`
    pub fn create_link_object(
        association: impl Into<String>,
        name: Option<Expression>,
        participants: Vec<RValue>,
    ) -> Self {
        Statement::LinkObjectCreation {
            association: association.into(),
            name,
            participants,
            qualifiers: Vec::new(),
        }
    }

    /// `openter object operation(arguments)`
    pub fn enter_operation(
        object: Expression,
        operation: impl Into<String>,
        arguments: Vec<Expression>,
    ) -> Self {
        Statement::OperationEnter {
            object,
            operation: operation.into(),
            arguments,
            ppc_policy: PpcPolicy::Default,
            explicit: false,
        }
    }

    /// `opexit result`
    pub fn exit_operation(result: Option<Expression>) -> Self {
        Statement::OperationExit {
            result,
            ppc_override: None,
        }
    }

    /// Sub-statements evaluated in order.
    pub fn sequence(statements: Vec<Statement>) -> Self {
        Statement::Sequence(statements)
    }

    // ==================== Surface ====================

    /// The textual surface form, without the shell prefix.
    pub fn shell_command(&self) -> String {
        match self {
            Statement::Empty => String::new(),

            Statement::VariableAssignment { name, rvalue } => {
                format!("{} := {}", name, rvalue)
            }

            Statement::VariableDestruction { name } => format!("unset {}", name),

            Statement::ObjectCreation { class, name } => match name {
                Some(name) => format!("new {}({})", class, name),
                None => format!("new {}", class),
            },

            Statement::ObjectDestruction { object } => format!("destroy {}", object),

            Statement::ObjectRestoration { target, .. } => format!("restore {}", target),

            Statement::AttributeAssignment {
                object,
                attribute,
                value,
            } => format!("{}.{} := {}", object, attribute, value),

            Statement::LinkInsertion {
                association,
                participants,
                qualifiers,
            } => format!(
                "insert ({}) into {}",
                render_participants(participants, qualifiers),
                association
            ),

            Statement::LinkDeletion {
                association,
                participants,
                qualifiers,
            } => format!(
                "delete ({}) from {}",
                render_participants(participants, qualifiers),
                association
            ),

            Statement::LinkObjectCreation {
                association,
                name,
                participants,
                qualifiers,
            } => {
                let head = match name {
                    Some(name) => format!("new {}({})", association, name),
                    None => format!("new {}", association),
                };
                format!(
                    "{} between ({})",
                    head,
                    render_participants(participants, qualifiers)
                )
            }

            Statement::OperationEnter {
                object,
                operation,
                arguments,
                ..
            } => {
                let arguments: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                format!("openter {} {}({})", object, operation, arguments.join(","))
            }

            Statement::OperationExit { result, .. } => match result {
                Some(result) => format!("opexit {}", result),
                None => "opexit".to_string(),
            },

            Statement::Sequence(statements) => {
                let parts: Vec<String> =
                    statements.iter().map(|s| s.shell_command()).collect();
                parts.join("; ")
            }
        }
    }

    /// Returns true if evaluating this statement can change the system
    /// state. Variable bindings are evaluation scope, not system state.
    pub fn has_side_effects(&self) -> bool {
        match self {
            Statement::Empty
            | Statement::VariableAssignment { .. }
            | Statement::VariableDestruction { .. } => false,
            Statement::Sequence(statements) => statements.iter().any(|s| s.has_side_effects()),
            _ => true,
        }
    }

    /// Returns whether this statement may be invoked from within an
    /// expression evaluation under the given policy.
    pub fn is_callable_from_expression(&self, policy: StatementPolicy) -> bool {
        match policy {
            StatementPolicy::AllowAll => true,
            StatementPolicy::SideEffectFreeOnly => !self.has_side_effects(),
            StatementPolicy::DenyAll => false,
        }
    }

    // ==================== Evaluation ====================

    /// Evaluate, capturing any failure into the result instead of
    /// propagating it. The only entry point safe for a top-level driver.
    pub fn evaluate_guarded(&self, ctx: &mut EvaluationContext, result: &mut EvaluationResult) {
        if let Err(failure) = self.evaluate(ctx, result) {
            result.set_failure(failure);
        }
    }

    /// Evaluate, propagating the first failure to the caller. A failing
    /// primitive never partially commits; composite statements stop at
    /// the first failing sub-statement.
    pub fn evaluate(
        &self,
        ctx: &mut EvaluationContext,
        result: &mut EvaluationResult,
    ) -> Result<(), EvaluationError> {
        match self {
            Statement::Empty => Ok(()),

            Statement::Sequence(statements) => {
                for statement in statements {
                    statement.evaluate_sub_statement(ctx, result)?;
                }
                Ok(())
            }

            _ => self
                .evaluate_primitive(ctx, result)
                .map_err(|kind| EvaluationError::new(self.shell_command(), kind)),
        }
    }

    /// Evaluate as a sub-statement of a composite: run guarded, then
    /// re-raise a captured failure immediately so composite evaluation
    /// halts on the first error with the failure unmodified.
    pub fn evaluate_sub_statement(
        &self,
        ctx: &mut EvaluationContext,
        result: &mut EvaluationResult,
    ) -> Result<(), EvaluationError> {
        self.evaluate_guarded(ctx, result);
        match result.take_failure() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Dispatch to the mutation primitives. Failures are attributed to
    /// this statement by [`Statement::evaluate`].
    fn evaluate_primitive(
        &self,
        ctx: &mut EvaluationContext,
        result: &mut EvaluationResult,
    ) -> Result<(), EvaluationErrorKind> {
        match self {
            Statement::VariableAssignment { name, rvalue } => {
                let value = ctx.evaluate_rvalue(rvalue, false)?;
                ops::assign_variable(ctx, result, name, value);
                Ok(())
            }

            Statement::VariableDestruction { name } => {
                ops::destroy_variable(ctx, result, name);
                Ok(())
            }

            Statement::ObjectCreation { class, name } => {
                let name = match name {
                    Some(expr) => Some(ctx.evaluate_string(expr)?),
                    None => None,
                };
                ops::create_object(ctx, result, class, name.as_deref())?;
                Ok(())
            }

            Statement::ObjectDestruction { object } => {
                let object = ctx.evaluate_object_rvalue(object)?;
                ops::destroy_object(ctx, result, &object)
            }

            Statement::ObjectRestoration {
                target,
                deleted,
                dangling,
            } => ops::restore_object(ctx, result, target, deleted, dangling),

            Statement::AttributeAssignment {
                object,
                attribute,
                value,
            } => {
                let object = ctx.evaluate_object_rvalue(object)?;
                let value = ctx.evaluate_rvalue(value, false)?;
                ops::assign_attribute(ctx, result, &object, attribute, value)
            }

            Statement::LinkInsertion {
                association,
                participants,
                qualifiers,
            } => {
                let participants = ctx.evaluate_object_rvalues(participants)?;
                let qualifiers = ctx.evaluate_qualifiers(qualifiers)?;
                ops::insert_link(ctx, result, association, participants, qualifiers)
            }

            Statement::LinkDeletion {
                association,
                participants,
                qualifiers,
            } => {
                let participants = ctx.evaluate_object_rvalues(participants)?;
                let qualifiers = ctx.evaluate_qualifiers(qualifiers)?;
                ops::delete_link(ctx, result, association, &participants, &qualifiers)
            }

            Statement::LinkObjectCreation {
                association,
                name,
                participants,
                qualifiers,
            } => {
                let name = match name {
                    Some(expr) => Some(ctx.evaluate_string(expr)?),
                    None => None,
                };
                let participants = ctx.evaluate_object_rvalues(participants)?;
                let qualifiers = ctx.evaluate_qualifiers(qualifiers)?;
                ops::create_link_object(
                    ctx,
                    result,
                    association,
                    name.as_deref(),
                    participants,
                    qualifiers,
                )?;
                Ok(())
            }

            Statement::OperationEnter {
                object,
                operation,
                arguments,
                ppc_policy,
                explicit,
            } => {
                let receiver = ctx.evaluate_object_expression(object)?;
                let arguments: Result<Vec<Value>, _> = arguments
                    .iter()
                    .map(|a| ctx.evaluate_expression(a, false))
                    .collect();
                ops::enter_operation(
                    ctx,
                    result,
                    &receiver,
                    operation,
                    arguments?,
                    *ppc_policy,
                    *explicit,
                )
            }

            Statement::OperationExit {
                result: result_expr,
                ppc_override,
            } => {
                let value = match result_expr {
                    Some(expr) => Some(ctx.evaluate_expression(expr, false)?),
                    None => None,
                };
                ops::exit_operation(ctx, result, value, *ppc_override)
            }

            Statement::Empty | Statement::Sequence(_) => Ok(()),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{}", self.shell_command())
    }
}

fn render_participants(participants: &[RValue], qualifiers: &[Vec<RValue>]) -> String {
    let mut parts = Vec::with_capacity(participants.len());
    for (index, participant) in participants.iter().enumerate() {
        let values = qualifiers.get(index).map(|q| q.as_slice()).unwrap_or(&[]);
        if values.is_empty() {
            parts.push(participant.to_string());
        } else {
            let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            parts.push(format!("{}[{}]", participant, values.join(",")));
        }
    }
    parts.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_commands() {
        assert_eq!(
            Statement::assign_var("x", RValue::literal(3i64)).shell_command(),
            "x := 3"
        );
        assert_eq!(
            Statement::create_object("Person", Some(Expression::literal("ada"))).shell_command(),
            "new Person('ada')"
        );
        assert_eq!(Statement::create_object("Person", None).shell_command(), "new Person");
        assert_eq!(
            Statement::destroy(RValue::object("ada")).shell_command(),
            "destroy ada"
        );
        assert_eq!(
            Statement::assign_attr(RValue::object("ada"), "age", RValue::literal(36i64))
                .shell_command(),
            "ada.age := 36"
        );
        assert_eq!(
            Statement::insert_link(
                "Owns",
                vec![RValue::object("ada"), RValue::object("car1")]
            )
            .shell_command(),
            "insert (ada,car1) into Owns"
        );
        assert_eq!(
            Statement::enter_operation(Expression::object("ada"), "raise", vec![
                Expression::literal(100i64)
            ])
            .shell_command(),
            "openter ada raise(100)"
        );
        assert_eq!(Statement::exit_operation(None).shell_command(), "opexit");
    }

    #[test]
    fn test_display_uses_shell_prefix() {
        assert_eq!(
            Statement::unset_var("x").to_string(),
            "!unset x"
        );
    }

    #[test]
    fn test_qualified_participants_rendering() {
        let stmt = Statement::LinkInsertion {
            association: "Account".to_string(),
            participants: vec![RValue::object("b"), RValue::object("p")],
            qualifiers: vec![vec![RValue::literal(7i64)], vec![]],
        };

        assert_eq!(stmt.shell_command(), "insert (b[7],p) into Account");
    }

    #[test]
    fn test_sequence_rendering() {
        let stmt = Statement::sequence(vec![
            Statement::unset_var("x"),
            Statement::unset_var("y"),
        ]);

        assert_eq!(stmt.shell_command(), "unset x; unset y");
    }

    #[test]
    fn test_side_effects() {
        assert!(!Statement::Empty.has_side_effects());
        assert!(!Statement::assign_var("x", RValue::literal(1i64)).has_side_effects());
        assert!(!Statement::unset_var("x").has_side_effects());
        assert!(Statement::create_object("Person", None).has_side_effects());
        assert!(Statement::destroy(RValue::object("ada")).has_side_effects());

        let pure = Statement::sequence(vec![Statement::unset_var("x")]);
        let impure = Statement::sequence(vec![
            Statement::unset_var("x"),
            Statement::create_object("Person", None),
        ]);
        assert!(!pure.has_side_effects());
        assert!(impure.has_side_effects());
    }

    #[test]
    fn test_callability_policies() {
        let pure = Statement::assign_var("x", RValue::literal(1i64));
        let impure = Statement::create_object("Person", None);

        assert!(pure.is_callable_from_expression(StatementPolicy::AllowAll));
        assert!(impure.is_callable_from_expression(StatementPolicy::AllowAll));
        assert!(pure.is_callable_from_expression(StatementPolicy::SideEffectFreeOnly));
        assert!(!impure.is_callable_from_expression(StatementPolicy::SideEffectFreeOnly));
        assert!(!pure.is_callable_from_expression(StatementPolicy::DenyAll));
        assert!(!impure.is_callable_from_expression(StatementPolicy::DenyAll));
    }
}
