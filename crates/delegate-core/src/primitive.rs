// Execution primitive
//
// One low-level call to `(target, value, data)` from the account the frame
// runs as. The strict variant turns a failed call into a dispatch error; the
// tolerant variant hands the outcome back untouched.

use alloy_primitives::Bytes;
use tracing::{debug, trace};

use delegate_error::{DispatchError, DispatchResult, HostResult};
use delegate_types::{Call, ExecutionResult};

use crate::host::Frame;

/// Perform `call`; a failed call aborts with `CallFailed`.
///
/// The account's balance is checked up front so an unfundable value is
/// reported as `InsufficientBalance` rather than an anonymous failure.
pub fn execute_strict(frame: &mut Frame<'_>, index: usize, call: &Call) -> DispatchResult<Bytes> {
    if call.has_value() {
        let balance = frame.self_balance();
        if balance < call.value {
            return Err(DispatchError::InsufficientBalance { balance, needed: call.value });
        }
    }

    let result = frame.call(call.target, call.value, &call.data)?;
    if result.success {
        trace!(index, target = %call.target, "strict call succeeded");
        Ok(result.return_data)
    } else {
        debug!(index, target = %call.target, "strict call failed");
        Err(DispatchError::CallFailed { index, return_data: result.return_data })
    }
}

/// Perform `call` and report its outcome.
///
/// Never fails because the callee failed, including when the account cannot
/// fund `value`. Only host faults propagate.
pub fn execute_tolerant(frame: &mut Frame<'_>, call: &Call) -> HostResult<ExecutionResult> {
    let result = frame.call(call.target, call.value, &call.data)?;
    trace!(target = %call.target, success = result.success, "tolerant call finished");
    Ok(result)
}
