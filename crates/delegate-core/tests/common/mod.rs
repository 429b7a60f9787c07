// Shared fixture: one implementation, one account delegating to it

#![allow(dead_code)]

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue};

use delegate_core::abi::{Execution, IDelegatedAccount};
use delegate_core::logging::init_test_logging;
use delegate_core::test_mocks::test_address;
use delegate_core::{Call, Contract, DelegatedAccount, DispatchConfig, HostConfig, ModeCode, Receipt, World};

pub const STARTING_BALANCE: u64 = 1_000;

pub struct Fixture {
    pub world: World,
    pub implementation: Address,
    pub account: Address,
    pub sender: Address,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default(), HostConfig::default())
    }

    pub fn with_config(dispatch: DispatchConfig, host: HostConfig) -> Self {
        init_test_logging();
        let implementation = test_address(0xd0);
        let account = test_address(0xac);
        let sender = test_address(0x01);

        let mut world = World::new(&host);
        world.deploy(implementation, Arc::new(DelegatedAccount::new(implementation, dispatch)));
        world.delegate(account, implementation);
        world.set_balance(account, U256::from(STARTING_BALANCE));
        world.set_balance(sender, U256::from(STARTING_BALANCE));

        Self { world, implementation, account, sender }
    }

    pub fn deploy(&mut self, address: Address, contract: Arc<dyn Contract>) -> Address {
        self.world.deploy(address, contract);
        address
    }

    /// Send `execute(mode, payload)` to `to`
    pub fn execute_at(&mut self, to: Address, mode: ModeCode, payload: Bytes) -> Receipt {
        let calldata = execute_calldata(mode, payload);
        self.world
            .transact(self.sender, to, U256::ZERO, &calldata)
            .expect("host fault")
    }

    pub fn execute(&mut self, mode: ModeCode, payload: Bytes) -> Receipt {
        self.execute_at(self.account, mode, payload)
    }

    /// Send `execute(call)` to `to`
    pub fn execute_call_at(&mut self, to: Address, call: &Call) -> Receipt {
        let calldata = execute_call_calldata(call);
        self.world
            .transact(self.sender, to, U256::ZERO, &calldata)
            .expect("host fault")
    }

    pub fn balance(&self, address: &Address) -> U256 {
        self.world.balance(address)
    }
}

pub fn execute_calldata(mode: ModeCode, payload: Bytes) -> Vec<u8> {
    IDelegatedAccount::execute_0Call { mode: mode.0, executionCalldata: payload }.abi_encode()
}

pub fn execute_call_calldata(call: &Call) -> Vec<u8> {
    IDelegatedAccount::execute_1Call { call: Execution::from(call) }.abi_encode()
}

/// Decode the `bytes[]` returned by `execute(mode, payload)`
pub fn decode_results(receipt: &Receipt) -> Vec<Bytes> {
    Vec::<Bytes>::abi_decode(&receipt.output, true).expect("bytes[] output")
}
