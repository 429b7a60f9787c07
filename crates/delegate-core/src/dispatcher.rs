// Dispatcher
//
// Entry surface of the executor. Every entry point passes the authorization
// gate, then resolves the mode into a (call kind, failure policy) pair before
// touching the payload, then drives the execution primitive.

use alloy_primitives::{keccak256, Bytes, B256};
use tracing::{debug, instrument, warn};

use delegate_error::{DelegateError, DispatchError, DispatchResult};
use delegate_types::{Call, CallKind, FailurePolicy, IdentityAnchor, ModeCode};

use crate::codec;
use crate::config::DispatchConfig;
use crate::events::{self, Notification};
use crate::gate::AuthorizationGate;
use crate::host::Frame;
use crate::primitive;

const DISPATCH_LOCK_KEY: &str = "delegate.dispatch.lock";

#[derive(Debug, Clone)]
pub struct Dispatcher {
    gate: AuthorizationGate,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher for an implementation deployed at `anchor`
    pub fn new(anchor: IdentityAnchor, config: DispatchConfig) -> Self {
        Self {
            gate: AuthorizationGate::new(anchor),
            config,
        }
    }

    pub fn anchor(&self) -> IdentityAnchor {
        self.gate.anchor()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Execute one explicitly supplied call with the default policy.
    ///
    /// Same as dispatching `(SINGLE, DEFAULT)` without decoding anything.
    #[instrument(
        level = "debug",
        skip_all,
        fields(account = %frame.address(), caller = %frame.caller(), depth = frame.depth(), target = %call.target)
    )]
    pub fn execute_call(&self, frame: &mut Frame<'_>, call: &Call) -> DispatchResult<Bytes> {
        self.gate.check(&frame.address())?;
        self.enter(frame)?;
        let checkpoint = frame.checkpoint();
        let result = primitive::execute_strict(frame, 0, call);
        if result.is_err() {
            frame.revert_to(checkpoint);
        }
        self.exit(frame);
        result.inspect_err(report)
    }

    /// Decode `mode` and `execution_calldata` and run the calls they describe.
    ///
    /// Returns the return data of every call in order. Under the try policy a
    /// failed call contributes its revert data and a notification.
    #[instrument(
        level = "debug",
        skip_all,
        fields(account = %frame.address(), caller = %frame.caller(), depth = frame.depth(), mode = %mode)
    )]
    pub fn execute(
        &self,
        frame: &mut Frame<'_>,
        mode: ModeCode,
        execution_calldata: &[u8],
    ) -> DispatchResult<Vec<Bytes>> {
        self.gate.check(&frame.address())?;
        let (kind, policy) = mode.decode().resolve().inspect_err(report)?;
        self.enter(frame)?;
        let checkpoint = frame.checkpoint();
        let result = dispatch(frame, kind, policy, execution_calldata);
        if result.is_err() {
            frame.revert_to(checkpoint);
        }
        self.exit(frame);
        result.inspect_err(report)
    }

    /// Whether `mode` names a call kind and failure policy this dispatcher runs
    pub fn supports_execution_mode(&self, mode: ModeCode) -> bool {
        mode.decode().resolve().is_ok()
    }

    fn enter(&self, frame: &mut Frame<'_>) -> DispatchResult<()> {
        if !self.config.reentrancy_guard {
            return Ok(());
        }
        let key = lock_key();
        if frame.tload(key) != B256::ZERO {
            warn!(account = %frame.address(), "reentrant dispatch rejected");
            return Err(DispatchError::ReentrantCall);
        }
        frame.tstore(key, B256::with_last_byte(1));
        Ok(())
    }

    fn exit(&self, frame: &mut Frame<'_>) {
        if self.config.reentrancy_guard {
            frame.tstore(lock_key(), B256::ZERO);
        }
    }
}

fn dispatch(
    frame: &mut Frame<'_>,
    kind: CallKind,
    policy: FailurePolicy,
    execution_calldata: &[u8],
) -> DispatchResult<Vec<Bytes>> {
    match (kind, policy) {
        (CallKind::Single, FailurePolicy::Revert) => {
            let call = codec::decode_single(execution_calldata)?;
            Ok(vec![primitive::execute_strict(frame, 0, &call)?])
        }
        (CallKind::Single, FailurePolicy::Try) => {
            let call = codec::decode_single(execution_calldata)?;
            Ok(vec![try_execute(frame, 0, &call)?])
        }
        (CallKind::Batch, FailurePolicy::Revert) => {
            let calls = codec::decode_batch(execution_calldata)?;
            debug!(calls = calls.len(), "executing batch");
            calls
                .iter()
                .enumerate()
                .map(|(index, call)| primitive::execute_strict(frame, index, call))
                .collect()
        }
        (CallKind::Batch, FailurePolicy::Try) => {
            let calls = codec::decode_batch(execution_calldata)?;
            debug!(calls = calls.len(), "trying batch");
            calls
                .iter()
                .enumerate()
                .map(|(index, call)| try_execute(frame, index, call))
                .collect()
        }
    }
}

fn try_execute(frame: &mut Frame<'_>, index: usize, call: &Call) -> DispatchResult<Bytes> {
    let result = primitive::execute_tolerant(frame, call)?;
    if !result.success {
        warn!(
            index,
            target = %call.target,
            revert = %hex::encode(&result.return_data),
            "call unsuccessful, continuing"
        );
        events::emit(frame, &Notification::new(index, result.return_data.clone()));
    }
    Ok(result.return_data)
}

fn lock_key() -> B256 {
    keccak256(DISPATCH_LOCK_KEY)
}

fn report(err: &DispatchError) {
    warn!(
        code = %err.code(),
        domain = %err.domain(),
        rejected = err.is_pre_execution(),
        error = %err,
        "dispatch aborted"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_mocks::test_address;
    use delegate_types::{CallType, ExecType};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(IdentityAnchor::new(test_address(0xd0)), DispatchConfig::default())
    }

    #[test]
    fn test_supported_modes_are_the_four_combinations() {
        let dispatcher = dispatcher();
        for call_type in 0..=u8::MAX {
            for exec_type in [0x00, 0x01, 0x02, 0xff] {
                let mode = ModeCode::new(CallType(call_type), ExecType(exec_type));
                let expected = call_type <= 0x01 && exec_type <= 0x01;
                assert_eq!(dispatcher.supports_execution_mode(mode), expected, "{mode}");
            }
        }
    }

    #[test]
    fn test_anchor_is_the_implementation_address() {
        assert_eq!(dispatcher().anchor().address(), test_address(0xd0));
        assert!(!dispatcher().config().reentrancy_guard);
    }

    #[test]
    fn test_lock_key_is_stable() {
        assert_eq!(lock_key(), keccak256(b"delegate.dispatch.lock"));
        assert_ne!(lock_key(), B256::ZERO);
    }
}
