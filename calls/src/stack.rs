//! The operation call stack.

use crate::call::OperationCall;
use crate::error::{CallError, CallResult};
use soil_core::Value;

/// Default maximum nesting depth for non-query operation calls.
const DEFAULT_DEPTH_LIMIT: usize = 1024;

/// Stack of active non-query operation calls.
#[derive(Debug)]
pub struct CallStack {
    calls: Vec<OperationCall>,
    depth_limit: usize,
}

impl CallStack {
    /// Create an empty stack with the default depth limit.
    pub fn new() -> Self {
        Self::with_depth_limit(DEFAULT_DEPTH_LIMIT)
    }

    /// Create an empty stack with a custom depth limit.
    pub fn with_depth_limit(depth_limit: usize) -> Self {
        Self {
            calls: Vec::new(),
            depth_limit,
        }
    }

    /// Push a call.
    pub fn enter(&mut self, call: OperationCall) -> CallResult<()> {
        if self.calls.len() >= self.depth_limit {
            return Err(CallError::depth_exceeded(self.depth_limit, call.to_string()));
        }
        self.calls.push(call);
        Ok(())
    }

    /// Pop the current call, recording its result value.
    pub fn exit(&mut self, result: Option<Value>) -> CallResult<OperationCall> {
        let mut call = self.calls.pop().ok_or(CallError::EmptyStack)?;
        call.result = result;
        Ok(call)
    }

    /// The call currently on top of the stack.
    pub fn current(&self) -> Option<&OperationCall> {
        self.calls.last()
    }

    /// Mutable access to the current call (policy overrides).
    pub fn current_mut(&mut self) -> Option<&mut OperationCall> {
        self.calls.last_mut()
    }

    /// Returns true if the given object is the receiver of any active
    /// call.
    pub fn has_active_operation(&self, object: &str) -> bool {
        self.calls.iter().any(|c| c.receiver == object)
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.calls.len()
    }

    /// Returns true if no call is active.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_exit_pairing() {
        // GIVEN
        let mut stack = CallStack::new();
        stack
            .enter(OperationCall::new("ada", "birthday", vec![]))
            .unwrap();

        // WHEN
        let call = stack.exit(Some(Value::Bool(true))).unwrap();

        // THEN
        assert_eq!(call.operation, "birthday");
        assert_eq!(call.result, Some(Value::Bool(true)));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_exit_on_empty_stack() {
        let mut stack = CallStack::new();
        let result = stack.exit(None);

        assert!(matches!(result, Err(CallError::EmptyStack)));
    }

    #[test]
    fn test_active_operation_relation() {
        let mut stack = CallStack::new();
        stack
            .enter(OperationCall::new("ada", "birthday", vec![]))
            .unwrap();
        stack
            .enter(OperationCall::new("bob", "greet", vec![]))
            .unwrap();

        assert!(stack.has_active_operation("ada"));
        assert!(stack.has_active_operation("bob"));
        assert!(!stack.has_active_operation("eve"));

        stack.exit(None).unwrap();
        assert!(!stack.has_active_operation("bob"));
    }

    #[test]
    fn test_depth_limit() {
        let mut stack = CallStack::with_depth_limit(2);
        stack.enter(OperationCall::new("a", "f", vec![])).unwrap();
        stack.enter(OperationCall::new("a", "f", vec![])).unwrap();

        let result = stack.enter(OperationCall::new("a", "f", vec![]));

        assert!(matches!(result, Err(CallError::DepthExceeded { .. })));
    }
}
