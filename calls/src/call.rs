//! Operation call records.

use soil_core::Value;
use std::fmt;

/// Selection of the pre/post-condition handling strategy for one call.
///
/// Condition handling itself is a collaborator outside the engine; the
/// call record only carries which strategy was selected, and an exit
/// statement may override it before the call is popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PpcPolicy {
    /// Use the session-wide default handler.
    #[default]
    Default,
    /// Enforce conditions, failing the call on violation.
    Enforce,
    /// Skip condition checking for this call.
    Ignore,
}

/// One non-query operation invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationCall {
    /// Receiver object name.
    pub receiver: String,
    /// Operation name.
    pub operation: String,
    /// Argument values, in parameter order.
    pub arguments: Vec<Value>,
    /// Selected pre/post-condition handling strategy.
    pub ppc_policy: PpcPolicy,
    /// True when the call was issued explicitly (an `openter` from the
    /// shell) rather than as part of evaluating an operation body.
    pub explicit: bool,
    /// Result value, set on exit.
    pub result: Option<Value>,
}

impl OperationCall {
    /// Create a call record.
    pub fn new(
        receiver: impl Into<String>,
        operation: impl Into<String>,
        arguments: Vec<Value>,
    ) -> Self {
        Self {
            receiver: receiver.into(),
            operation: operation.into(),
            arguments,
            ppc_policy: PpcPolicy::Default,
            explicit: false,
            result: None,
        }
    }

    /// Select a pre/post-condition handling strategy.
    pub fn with_ppc_policy(mut self, policy: PpcPolicy) -> Self {
        self.ppc_policy = policy;
        self
    }

    /// Mark the call as explicitly issued.
    pub fn explicit(mut self) -> Self {
        self.explicit = true;
        self
    }
}

impl fmt::Display for OperationCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.receiver, self.operation)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_display() {
        let call = OperationCall::new("ada", "raise", vec![Value::Int(100)]);

        assert_eq!(call.to_string(), "ada.raise(100)");
    }

    #[test]
    fn test_call_builders() {
        let call = OperationCall::new("ada", "birthday", vec![])
            .with_ppc_policy(PpcPolicy::Ignore)
            .explicit();

        assert_eq!(call.ppc_policy, PpcPolicy::Ignore);
        assert!(call.explicit);
        assert!(call.result.is_none());
    }
}
