//! Mock contracts for dispatcher and host tests

use std::sync::atomic::{AtomicUsize, Ordering};

use alloy_primitives::{Address, Bytes, LogData, B256, U256};

use crate::host::{Contract, Frame, Halt};

/// Deterministic address ending in `n`
pub fn test_address(n: u8) -> Address {
    Address::with_last_byte(n)
}

//-----------------------------------------------------------------------------
// Echo
//-----------------------------------------------------------------------------

/// Logs its input and returns it. The log makes call order observable.
#[derive(Debug, Default)]
pub struct Echo;

impl Contract for Echo {
    fn invoke(&self, frame: &mut Frame<'_>, input: &[u8]) -> Result<Bytes, Halt> {
        let data = Bytes::copy_from_slice(input);
        frame.emit(LogData::new_unchecked(Vec::new(), data.clone()));
        Ok(data)
    }
}

//-----------------------------------------------------------------------------
// Counter
//-----------------------------------------------------------------------------

/// Increments a storage slot and returns the new count as a 32-byte word
#[derive(Debug, Default)]
pub struct Counter;

impl Counter {
    pub const SLOT: B256 = B256::ZERO;

    pub fn count(world: &crate::host::World, address: &Address) -> U256 {
        U256::from_be_bytes(world.storage(address, &Self::SLOT).0)
    }
}

impl Contract for Counter {
    fn invoke(&self, frame: &mut Frame<'_>, _input: &[u8]) -> Result<Bytes, Halt> {
        let current = U256::from_be_bytes(frame.sload(Self::SLOT).0);
        let next = current + U256::from(1);
        frame.sstore(Self::SLOT, B256::from(next));
        Ok(Bytes::copy_from_slice(B256::from(next).as_slice()))
    }
}

//-----------------------------------------------------------------------------
// Reverter
//-----------------------------------------------------------------------------

/// Always reverts with fixed data, after writing storage that must not survive
#[derive(Debug, Default)]
pub struct Reverter {
    reason: Bytes,
}

impl Reverter {
    pub fn new(reason: impl Into<Bytes>) -> Self {
        Self { reason: reason.into() }
    }
}

impl Contract for Reverter {
    fn invoke(&self, frame: &mut Frame<'_>, _input: &[u8]) -> Result<Bytes, Halt> {
        frame.sstore(B256::ZERO, B256::with_last_byte(0xff));
        Err(Halt::Revert(self.reason.clone()))
    }
}

//-----------------------------------------------------------------------------
// Witness
//-----------------------------------------------------------------------------

/// Counts invocations outside the journal, so attempts stay visible even
/// when the frames that made them were rolled back
#[derive(Debug, Default)]
pub struct Witness {
    hits: AtomicUsize,
}

impl Witness {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Contract for Witness {
    fn invoke(&self, _frame: &mut Frame<'_>, _input: &[u8]) -> Result<Bytes, Halt> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(Bytes::new())
    }
}

//-----------------------------------------------------------------------------
// Reentrant
//-----------------------------------------------------------------------------

/// Calls `account` with fixed calldata and mirrors the outcome
#[derive(Debug)]
pub struct Reentrant {
    account: Address,
    calldata: Bytes,
}

impl Reentrant {
    pub fn new(account: Address, calldata: impl Into<Bytes>) -> Self {
        Self { account, calldata: calldata.into() }
    }
}

impl Contract for Reentrant {
    fn invoke(&self, frame: &mut Frame<'_>, _input: &[u8]) -> Result<Bytes, Halt> {
        let result = frame.call(self.account, U256::ZERO, &self.calldata)?;
        result.into_result().map_err(Halt::Revert)
    }
}

//-----------------------------------------------------------------------------
// SelfCaller
//-----------------------------------------------------------------------------

/// Calls itself until the host runs out of call depth
#[derive(Debug, Default)]
pub struct SelfCaller;

impl Contract for SelfCaller {
    fn invoke(&self, frame: &mut Frame<'_>, input: &[u8]) -> Result<Bytes, Halt> {
        let result = frame.call(frame.address(), U256::ZERO, input)?;
        result.into_result().map_err(Halt::Revert)
    }
}
