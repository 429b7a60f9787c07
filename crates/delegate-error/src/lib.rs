// Delegate Error Handling Framework
// Central location for error types, codes and domains used across the executor

use std::error::Error as StdError;
use std::fmt;

// Re-export for crates that define their own error enums against this registry
pub use thiserror;

mod codec;
mod dispatch;
mod host;

pub use codec::{CodecError, CodecResult};
pub use dispatch::{DispatchError, DispatchResult};
pub use host::{HostError, HostResult};

/// Error domains representing the different stages of a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorDomain {
    Authorization, Protocol, Codec, Execution, Host,
}
impl fmt::Display for ErrorDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDomain::Authorization => write!(f, "authorization"),
            ErrorDomain::Protocol => write!(f, "protocol"),
            ErrorDomain::Codec => write!(f, "codec"),
            ErrorDomain::Execution => write!(f, "execution"),
            ErrorDomain::Host => write!(f, "host"),
        }
    }
}

/// Error code structure for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ErrorCode(pub u32);
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Base trait for all errors raised by the executor.
pub trait DelegateError: StdError + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Numeric code, unique per variant family.
    fn code(&self) -> ErrorCode;

    /// Stage of the dispatch the error belongs to.
    fn domain(&self) -> ErrorDomain;

    /// Whether the error aborts the whole invocation.
    ///
    /// Everything that reaches a caller as an error is fatal; recoverable
    /// sub-call failures never become errors in the first place.
    fn is_fatal(&self) -> bool { true }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display_is_zero_padded() {
        assert_eq!(ErrorCode(7).to_string(), "0007");
        assert_eq!(ErrorCode(3001).to_string(), "3001");
    }

    #[test]
    fn test_domains_are_distinct_per_family() {
        let unauthorized = DispatchError::UnauthorizedCallContext;
        let unsupported = DispatchError::UnsupportedCallType(0xff);
        let decode = DispatchError::from(CodecError::SingleCallTooShort { len: 3 });
        let host = DispatchError::from(HostError::CallDepthExceeded { depth: 1024 });

        assert_eq!(unauthorized.domain(), ErrorDomain::Authorization);
        assert_eq!(unsupported.domain(), ErrorDomain::Protocol);
        assert_eq!(decode.domain(), ErrorDomain::Codec);
        assert_eq!(host.domain(), ErrorDomain::Host);
        assert!(host.is_fatal());
    }
}
