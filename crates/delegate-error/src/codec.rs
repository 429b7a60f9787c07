// Codec error types
// Raised while decoding execution calldata into calls

use thiserror::Error;
use crate::{DelegateError, ErrorCode, ErrorDomain};

/// Codec error codes
pub mod codes {
    use crate::ErrorCode;

    // Codec error codes start with 3000
    pub const SINGLE_CALL_TOO_SHORT: ErrorCode = ErrorCode(3001);
    pub const MALFORMED_BATCH: ErrorCode = ErrorCode(3002);
}

/// Errors raised while decoding execution calldata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Packed single-call payload is shorter than `target || value`
    #[error("Single call payload too short: {len} bytes, need at least 52")]
    SingleCallTooShort { len: usize },

    /// ABI-encoded batch could not be decoded
    #[error("Malformed batch payload: {0}")]
    MalformedBatch(String),
}

impl DelegateError for CodecError {
    fn code(&self) -> ErrorCode {
        use codes::*;
        match self {
            CodecError::SingleCallTooShort { .. } => SINGLE_CALL_TOO_SHORT,
            CodecError::MalformedBatch(_) => MALFORMED_BATCH,
        }
    }

    fn domain(&self) -> ErrorDomain {
        ErrorDomain::Codec
    }
}

/// Convenient Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

impl CodecError {
    /// Create a new malformed batch error
    pub fn malformed_batch(message: impl Into<String>) -> Self {
        CodecError::MalformedBatch(message.into())
    }
}
