// In-memory transactional host
//
// Accounts hold a balance, optional code and storage. Code is either a native
// Rust contract or a delegation designator pointing at another account whose
// code runs with the delegating account as its context. Every call frame
// takes a journal checkpoint and rolls back to it when the callee fails, so a
// failed frame leaves no effects behind.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use alloy_primitives::{Address, Bytes, Log, LogData, B256, U256};
use tracing::{debug, trace};

use delegate_error::{HostError, HostResult};
use delegate_types::ExecutionResult;

use crate::config::HostConfig;

pub mod journal;

pub use journal::{Checkpoint, Journal, JournalEntry};

/// Why a contract stopped without returning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// Ordinary failure; the frame is rolled back and the caller sees the data
    Revert(Bytes),
    /// Environment fault; unwinds every frame up to the transaction
    Fatal(HostError),
}

impl From<HostError> for Halt {
    fn from(err: HostError) -> Self {
        Halt::Fatal(err)
    }
}

/// Code executed when an account is called
pub trait Contract: Send + Sync + fmt::Debug {
    fn invoke(&self, frame: &mut Frame<'_>, input: &[u8]) -> Result<Bytes, Halt>;
}

/// What an account runs when called
#[derive(Debug, Clone)]
pub enum Code {
    Native(Arc<dyn Contract>),
    /// Run the code of the given implementation in this account's context
    Delegated(Address),
}

#[derive(Debug, Clone, Default)]
struct AccountState {
    balance: U256,
    code: Option<Code>,
    storage: HashMap<B256, B256>,
}

/// Outcome of a top-level transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub success: bool,
    /// Return data on success, revert data on failure
    pub output: Bytes,
    /// Logs emitted by the transaction; empty when it failed
    pub logs: Vec<Log>,
}

/// The host environment
#[derive(Debug)]
pub struct World {
    accounts: HashMap<Address, AccountState>,
    transient: HashMap<(Address, B256), B256>,
    logs: Vec<Log>,
    journal: Journal,
    depth: usize,
    max_call_depth: usize,
}

impl Default for World {
    fn default() -> Self {
        Self::new(&HostConfig::default())
    }
}

impl World {
    /// Create an empty world
    pub fn new(config: &HostConfig) -> Self {
        Self {
            accounts: HashMap::new(),
            transient: HashMap::new(),
            logs: Vec::new(),
            journal: Journal::new(),
            depth: 0,
            max_call_depth: config.max_call_depth,
        }
    }

    /// Install native code at `address`
    pub fn deploy(&mut self, address: Address, contract: Arc<dyn Contract>) {
        self.accounts.entry(address).or_default().code = Some(Code::Native(contract));
    }

    /// Point `account` at the code of `implementation`
    pub fn delegate(&mut self, account: Address, implementation: Address) {
        self.accounts.entry(account).or_default().code = Some(Code::Delegated(implementation));
    }

    /// Set a balance outside of any transaction
    pub fn set_balance(&mut self, address: Address, balance: U256) {
        self.accounts.entry(address).or_default().balance = balance;
    }

    pub fn balance(&self, address: &Address) -> U256 {
        self.accounts.get(address).map(|account| account.balance).unwrap_or_default()
    }

    pub fn storage(&self, address: &Address, key: &B256) -> B256 {
        self.accounts
            .get(address)
            .and_then(|account| account.storage.get(key).copied())
            .unwrap_or_default()
    }

    /// Every log committed so far
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Run a top-level call from `origin`.
    ///
    /// A failed transaction leaves no effects. Transient storage is cleared
    /// when the transaction ends either way.
    pub fn transact(
        &mut self,
        origin: Address,
        to: Address,
        value: U256,
        data: &[u8],
    ) -> HostResult<Receipt> {
        let log_start = self.logs.len();
        let result = self.call(origin, to, value, data);
        self.transient.clear();
        self.journal.clear();
        self.depth = 0;

        let result = result?;
        let logs = if result.success { self.logs[log_start..].to_vec() } else { Vec::new() };
        debug!(%origin, %to, success = result.success, logs = logs.len(), "transaction finished");
        Ok(Receipt {
            success: result.success,
            output: result.return_data,
            logs,
        })
    }

    fn call(
        &mut self,
        caller: Address,
        target: Address,
        value: U256,
        data: &[u8],
    ) -> HostResult<ExecutionResult> {
        if self.depth >= self.max_call_depth {
            return Err(HostError::CallDepthExceeded { depth: self.depth });
        }

        let checkpoint = self.journal.checkpoint();
        if !self.transfer(caller, target, value)? {
            trace!(%caller, %target, %value, "call failed: insufficient balance");
            return Ok(ExecutionResult::failure(Bytes::new()));
        }

        let Some(contract) = self.resolve_code(&target) else {
            return Ok(ExecutionResult::success(Bytes::new()));
        };

        self.depth += 1;
        let outcome = {
            let mut frame = Frame {
                world: self,
                address: target,
                caller,
                value,
            };
            contract.invoke(&mut frame, data)
        };
        self.depth -= 1;

        match outcome {
            Ok(output) => Ok(ExecutionResult::success(output)),
            Err(Halt::Revert(revert_data)) => {
                self.revert_to(checkpoint);
                trace!(%target, revert = %hex::encode(&revert_data), "call reverted");
                Ok(ExecutionResult::failure(revert_data))
            }
            Err(Halt::Fatal(err)) => {
                self.revert_to(checkpoint);
                Err(err)
            }
        }
    }

    /// Move `value` from `from` to `to`; `Ok(false)` when `from` cannot fund it.
    fn transfer(&mut self, from: Address, to: Address, value: U256) -> HostResult<bool> {
        if value.is_zero() {
            return Ok(true);
        }
        let Some(remaining) = self.balance(&from).checked_sub(value) else {
            return Ok(false);
        };
        if from == to {
            return Ok(true);
        }
        let credited = self
            .balance(&to)
            .checked_add(value)
            .ok_or(HostError::BalanceOverflow { address: to })?;
        self.write_balance(from, remaining);
        self.write_balance(to, credited);
        Ok(true)
    }

    /// Code to run for `target`, following one delegation hop
    fn resolve_code(&self, target: &Address) -> Option<Arc<dyn Contract>> {
        match self.accounts.get(target)?.code.as_ref()? {
            Code::Native(contract) => Some(contract.clone()),
            Code::Delegated(implementation) => match self.accounts.get(implementation)?.code.as_ref()? {
                Code::Native(contract) => Some(contract.clone()),
                Code::Delegated(_) => None,
            },
        }
    }

    fn write_balance(&mut self, address: Address, balance: U256) {
        let account = self.accounts.entry(address).or_default();
        let previous = std::mem::replace(&mut account.balance, balance);
        self.journal.record(JournalEntry::BalanceChanged { address, previous });
    }

    fn write_storage(&mut self, address: Address, key: B256, value: B256) {
        let account = self.accounts.entry(address).or_default();
        let previous = account.storage.insert(key, value);
        self.journal.record(JournalEntry::StorageChanged { address, key, previous });
    }

    fn write_transient(&mut self, address: Address, key: B256, value: B256) {
        let previous = self.transient.insert((address, key), value);
        self.journal.record(JournalEntry::TransientChanged { address, key, previous });
    }

    fn push_log(&mut self, log: Log) {
        self.logs.push(log);
        self.journal.record(JournalEntry::LogEmitted);
    }

    fn revert_to(&mut self, checkpoint: Checkpoint) {
        for entry in self.journal.unwind(checkpoint) {
            match entry {
                JournalEntry::BalanceChanged { address, previous } => {
                    self.accounts.entry(address).or_default().balance = previous;
                }
                JournalEntry::StorageChanged { address, key, previous } => {
                    let storage = &mut self.accounts.entry(address).or_default().storage;
                    match previous {
                        Some(value) => storage.insert(key, value),
                        None => storage.remove(&key),
                    };
                }
                JournalEntry::TransientChanged { address, key, previous } => {
                    match previous {
                        Some(value) => self.transient.insert((address, key), value),
                        None => self.transient.remove(&(address, key)),
                    };
                }
                JournalEntry::LogEmitted => {
                    self.logs.pop();
                }
            }
        }
    }
}

/// Execution context handed to a running contract
pub struct Frame<'w> {
    world: &'w mut World,
    address: Address,
    caller: Address,
    value: U256,
}

impl fmt::Debug for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("address", &self.address)
            .field("caller", &self.caller)
            .field("value", &self.value)
            .field("depth", &self.world.depth)
            .finish()
    }
}

impl Frame<'_> {
    /// Address whose state this code runs against
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn caller(&self) -> Address {
        self.caller
    }

    /// Value sent with the current call
    pub fn value(&self) -> U256 {
        self.value
    }

    /// Nesting depth of this frame, 1 for the top-level callee
    pub fn depth(&self) -> usize {
        self.world.depth
    }

    pub fn balance(&self, address: &Address) -> U256 {
        self.world.balance(address)
    }

    pub fn self_balance(&self) -> U256 {
        self.world.balance(&self.address)
    }

    pub fn sload(&self, key: B256) -> B256 {
        self.world.storage(&self.address, &key)
    }

    pub fn sstore(&mut self, key: B256, value: B256) {
        self.world.write_storage(self.address, key, value);
    }

    pub fn tload(&self, key: B256) -> B256 {
        self.world
            .transient
            .get(&(self.address, key))
            .copied()
            .unwrap_or_default()
    }

    pub fn tstore(&mut self, key: B256, value: B256) {
        self.world.write_transient(self.address, key, value);
    }

    /// Emit a log from the current address
    pub fn emit(&mut self, data: LogData) {
        self.world.push_log(Log { address: self.address, data });
    }

    /// Call `target` from the current address
    pub fn call(&mut self, target: Address, value: U256, data: &[u8]) -> HostResult<ExecutionResult> {
        self.world.call(self.address, target, value, data)
    }

    /// Mark a point the frame can roll back to without failing itself
    pub fn checkpoint(&self) -> Checkpoint {
        self.world.journal.checkpoint()
    }

    /// Undo everything recorded since `checkpoint`
    pub fn revert_to(&mut self, checkpoint: Checkpoint) {
        self.world.revert_to(checkpoint);
    }
}
