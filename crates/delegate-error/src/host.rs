// Host error types
// Faults of the execution environment itself, outside any callee's control

use alloy_primitives::Address;
use thiserror::Error;
use crate::{DelegateError, ErrorCode, ErrorDomain};

/// Host error codes
pub mod codes {
    use crate::ErrorCode;

    // Host error codes start with 5000
    pub const CALL_DEPTH_EXCEEDED: ErrorCode = ErrorCode(5001);
    pub const BALANCE_OVERFLOW: ErrorCode = ErrorCode(5002);
}

/// Environment faults. These unwind the whole transaction, whatever the
/// failure policy of the dispatch that hit them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Nested call depth limit reached
    #[error("Call depth exceeded: {depth}")]
    CallDepthExceeded { depth: usize },

    /// Crediting an account would overflow its balance
    #[error("Balance overflow crediting {address}")]
    BalanceOverflow { address: Address },
}

impl DelegateError for HostError {
    fn code(&self) -> ErrorCode {
        use codes::*;
        match self {
            HostError::CallDepthExceeded { .. } => CALL_DEPTH_EXCEEDED,
            HostError::BalanceOverflow { .. } => BALANCE_OVERFLOW,
        }
    }

    fn domain(&self) -> ErrorDomain {
        ErrorDomain::Host
    }
}

/// Convenient Result type for host operations
pub type HostResult<T> = Result<T, HostError>;
