// Solidity-facing ABI of the delegated account
//
// Batch calldata, the failure event, custom errors and the account interface
// are declared here once and shared by the codec, the dispatcher and the
// account contract.

use alloy_primitives::{Bytes, FixedBytes};
use alloy_sol_types::{sol, SolError};

use delegate_error::DispatchError;
use delegate_types::Call;

sol! {
    /// One call inside an ABI-encoded batch
    #[derive(Debug, PartialEq, Eq)]
    struct Execution {
        address target;
        uint256 value;
        bytes callData;
    }

    /// Emitted once per failed call under the try policy
    event TryExecuteUnsuccessful(uint256 batchExecutionIndex, bytes result);

    error UnauthorizedCallContext();
    error UnsupportedCallType(bytes1 callType);
    error UnsupportedExecType(bytes1 execType);
    error InsufficientBalance(uint256 balance, uint256 needed);
    error FailedCall();
    error ReentrantCall();

    interface IDelegatedAccount {
        function execute(bytes32 mode, bytes executionCalldata) external payable returns (bytes[] returnData);
        function execute(Execution call) external payable returns (bytes returnData);
        function supportsExecutionMode(bytes32 mode) external view returns (bool);
    }
}

impl From<Execution> for Call {
    fn from(execution: Execution) -> Self {
        Call::new(execution.target, execution.value, execution.callData)
    }
}

impl From<&Call> for Execution {
    fn from(call: &Call) -> Self {
        Execution {
            target: call.target,
            value: call.value,
            callData: call.data.clone(),
        }
    }
}

/// Revert data reported to the caller of the account for a fatal error.
///
/// Strict sub-call failures bubble the callee's revert data unchanged.
/// Decode errors and host faults revert without data.
pub fn revert_data(error: &DispatchError) -> Bytes {
    let encoded = match error {
        DispatchError::UnauthorizedCallContext => UnauthorizedCallContext {}.abi_encode(),
        DispatchError::UnsupportedCallType(tag) => UnsupportedCallType {
            callType: FixedBytes([*tag]),
        }
        .abi_encode(),
        DispatchError::UnsupportedExecType(tag) => UnsupportedExecType {
            execType: FixedBytes([*tag]),
        }
        .abi_encode(),
        DispatchError::Decode(_) => Vec::new(),
        DispatchError::CallFailed { return_data, .. } if return_data.is_empty() => {
            FailedCall {}.abi_encode()
        }
        DispatchError::CallFailed { return_data, .. } => return_data.to_vec(),
        DispatchError::InsufficientBalance { balance, needed } => InsufficientBalance {
            balance: *balance,
            needed: *needed,
        }
        .abi_encode(),
        DispatchError::ReentrantCall => ReentrantCall {}.abi_encode(),
        DispatchError::Host(_) => Vec::new(),
    };
    Bytes::from(encoded)
}
