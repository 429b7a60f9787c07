// Outbound call representation

use crate::address::{Address, Bytes, NativeAmount};

/// One outbound invocation made on behalf of the account.
///
/// Calls are decoded from execution calldata and consumed by the dispatch
/// that decoded them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Address being called
    pub target: Address,
    /// Native amount sent along with the call
    pub value: NativeAmount,
    /// Opaque calldata handed to the target
    pub data: Bytes,
}

impl Call {
    /// Create a new call
    pub fn new(target: Address, value: NativeAmount, data: impl Into<Bytes>) -> Self {
        Self {
            target,
            value,
            data: data.into(),
        }
    }

    /// Create a plain value transfer with no calldata
    pub fn transfer(target: Address, value: NativeAmount) -> Self {
        Self::new(target, value, Bytes::new())
    }

    /// Check if the call moves any native amount
    pub fn has_value(&self) -> bool {
        !self.value.is_zero()
    }
}

/// Outcome of a single low-level call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    /// Return data on success, revert data on failure
    pub return_data: Bytes,
}

impl ExecutionResult {
    pub fn success(return_data: impl Into<Bytes>) -> Self {
        Self { success: true, return_data: return_data.into() }
    }

    pub fn failure(return_data: impl Into<Bytes>) -> Self {
        Self { success: false, return_data: return_data.into() }
    }

    /// Convert into a `Result`, keeping the raw bytes on both sides
    pub fn into_result(self) -> Result<Bytes, Bytes> {
        if self.success {
            Ok(self.return_data)
        } else {
            Err(self.return_data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};

    #[test]
    fn test_transfer_has_no_data() {
        let call = Call::transfer(address!("0000000000000000000000000000000000000001"), U256::from(5));
        assert!(call.data.is_empty());
        assert!(call.has_value());
    }

    #[test]
    fn test_result_conversion_keeps_bytes() {
        let ok = ExecutionResult::success(vec![1, 2]);
        let err = ExecutionResult::failure(vec![3]);
        assert_eq!(ok.into_result(), Ok(Bytes::from(vec![1, 2])));
        assert_eq!(err.into_result(), Err(Bytes::from(vec![3])));
    }
}
