// Delegated account contract
//
// Exposes the dispatcher through its Solidity interface so it can be
// deployed in the host, delegated to, called by other contracts and called
// back into.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolInterface, SolValue};
use tracing::debug;

use delegate_error::DispatchError;
use delegate_types::{Call, IdentityAnchor, ModeCode};

use crate::abi::{self, IDelegatedAccount::IDelegatedAccountCalls};
use crate::config::DispatchConfig;
use crate::dispatcher::Dispatcher;
use crate::host::{Contract, Frame, Halt};

/// Shared implementation code of a delegated account
#[derive(Debug, Clone)]
pub struct DelegatedAccount {
    dispatcher: Dispatcher,
}

impl DelegatedAccount {
    /// Build the implementation that will be deployed at `implementation`
    pub fn new(implementation: Address, config: DispatchConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(IdentityAnchor::new(implementation), config),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl Contract for DelegatedAccount {
    fn invoke(&self, frame: &mut Frame<'_>, input: &[u8]) -> Result<Bytes, Halt> {
        if input.is_empty() {
            debug!(account = %frame.address(), value = %frame.value(), "value received");
            return Ok(Bytes::new());
        }

        let call = IDelegatedAccountCalls::abi_decode(input, false).map_err(|err| {
            debug!(account = %frame.address(), error = %err, "unrecognized calldata");
            Halt::Revert(Bytes::new())
        })?;

        match call {
            IDelegatedAccountCalls::execute_0(request) => {
                let results = self
                    .dispatcher
                    .execute(frame, ModeCode::from(request.mode), &request.executionCalldata)
                    .map_err(halt)?;
                Ok(Bytes::from(results.abi_encode()))
            }
            IDelegatedAccountCalls::execute_1(request) => {
                let call = Call::from(request.call);
                let result = self.dispatcher.execute_call(frame, &call).map_err(halt)?;
                Ok(Bytes::from(result.abi_encode()))
            }
            IDelegatedAccountCalls::supportsExecutionMode(request) => {
                let supported = self.dispatcher.supports_execution_mode(ModeCode::from(request.mode));
                Ok(Bytes::from(supported.abi_encode()))
            }
        }
    }
}

fn halt(err: DispatchError) -> Halt {
    match err {
        DispatchError::Host(fault) => Halt::Fatal(fault),
        other => Halt::Revert(abi::revert_data(&other)),
    }
}
