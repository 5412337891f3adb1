//! Statement-in-expression policy.

/// Governs whether statements may be invoked from within expression
/// evaluation.
///
/// Supplied once per session and threaded through the evaluation context;
/// the engine never consults a process-wide setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementPolicy {
    /// Any statement may run inside an expression.
    AllowAll,
    /// Only side-effect-free statements may run inside an expression.
    SideEffectFreeOnly,
    /// No statement may run inside an expression.
    #[default]
    DenyAll,
}
