// Dispatch error types
// Everything that aborts an execute invocation

use alloy_primitives::{Bytes, U256};
use thiserror::Error;
use crate::{CodecError, DelegateError, ErrorCode, ErrorDomain, HostError};

/// Dispatch error codes
pub mod codes {
    use crate::ErrorCode;

    // Authorization error codes start with 1000
    pub const UNAUTHORIZED_CALL_CONTEXT: ErrorCode = ErrorCode(1001);

    // Protocol error codes start with 2000
    pub const UNSUPPORTED_CALL_TYPE: ErrorCode = ErrorCode(2001);
    pub const UNSUPPORTED_EXEC_TYPE: ErrorCode = ErrorCode(2002);

    // Execution error codes start with 4000
    pub const CALL_FAILED: ErrorCode = ErrorCode(4001);
    pub const INSUFFICIENT_BALANCE: ErrorCode = ErrorCode(4002);
    pub const REENTRANT_CALL: ErrorCode = ErrorCode(4003);
}

/// Fatal outcome of a dispatch. Any of these undoes every effect of the
/// current invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Entry point reached while running as the implementation itself
    #[error("Unauthorized call context")]
    UnauthorizedCallContext,

    /// Mode carries a call-type tag this executor does not handle
    #[error("Unsupported call type: 0x{0:02x}")]
    UnsupportedCallType(u8),

    /// Mode carries an exec-type tag this executor does not handle
    #[error("Unsupported exec type: 0x{0:02x}")]
    UnsupportedExecType(u8),

    /// Execution calldata does not match the declared call-type
    #[error("Decode error: {0}")]
    Decode(#[from] CodecError),

    /// Sub-call failed under the default (revert) policy
    #[error("Call #{index} failed")]
    CallFailed { index: usize, return_data: Bytes },

    /// Account cannot fund the value of a strict call
    #[error("Insufficient balance: have {balance}, need {needed}")]
    InsufficientBalance { balance: U256, needed: U256 },

    /// Nested dispatch into an account that is already dispatching
    #[error("Reentrant call")]
    ReentrantCall,

    /// Environment fault
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

impl DelegateError for DispatchError {
    fn code(&self) -> ErrorCode {
        use codes::*;
        match self {
            DispatchError::UnauthorizedCallContext => UNAUTHORIZED_CALL_CONTEXT,
            DispatchError::UnsupportedCallType(_) => UNSUPPORTED_CALL_TYPE,
            DispatchError::UnsupportedExecType(_) => UNSUPPORTED_EXEC_TYPE,
            DispatchError::Decode(err) => err.code(),
            DispatchError::CallFailed { .. } => CALL_FAILED,
            DispatchError::InsufficientBalance { .. } => INSUFFICIENT_BALANCE,
            DispatchError::ReentrantCall => REENTRANT_CALL,
            DispatchError::Host(err) => err.code(),
        }
    }

    fn domain(&self) -> ErrorDomain {
        match self {
            DispatchError::UnauthorizedCallContext => ErrorDomain::Authorization,
            DispatchError::UnsupportedCallType(_) | DispatchError::UnsupportedExecType(_) => {
                ErrorDomain::Protocol
            }
            DispatchError::Decode(_) => ErrorDomain::Codec,
            DispatchError::CallFailed { .. }
            | DispatchError::InsufficientBalance { .. }
            | DispatchError::ReentrantCall => ErrorDomain::Execution,
            DispatchError::Host(_) => ErrorDomain::Host,
        }
    }
}

/// Convenient Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

impl DispatchError {
    /// Create a new call failed error
    pub fn call_failed(index: usize, return_data: impl Into<Bytes>) -> Self {
        DispatchError::CallFailed { index, return_data: return_data.into() }
    }

    /// Check if this error was raised before any sub-call could run
    pub fn is_pre_execution(&self) -> bool {
        matches!(
            self,
            DispatchError::UnauthorizedCallContext
                | DispatchError::UnsupportedCallType(_)
                | DispatchError::UnsupportedExecType(_)
                | DispatchError::Decode(_)
        )
    }
}
