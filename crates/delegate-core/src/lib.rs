// Delegate Core Library
//
// Mode decoding, call codec, execution primitive and dispatcher for
// delegated accounts, plus the in-memory host they run against.

// Solidity-facing ABI: batch layout, failure event, custom errors
pub mod abi;

// Execution calldata codec
pub mod codec;

// Configuration loading
pub mod config;

// Authorization gate
pub mod gate;

// Transactional host environment
pub mod host;

// Execution primitive
pub mod primitive;

// Try-policy notifications
pub mod events;

// Dispatcher
pub mod dispatcher;

// Deployable account contract
pub mod account;

// Tracing setup
pub mod logging;

// Mock contracts for tests
pub mod test_mocks;

// Re-export important types for easier access
pub use account::DelegatedAccount;
pub use config::{Config, DispatchConfig, HostConfig, LoggingConfig};
pub use dispatcher::Dispatcher;
pub use events::Notification;
pub use host::{Contract, Frame, Halt, Receipt, World};

pub use delegate_error::{CodecError, DelegateError, DispatchError, DispatchResult, HostError};
pub use delegate_types::{
    Address, Bytes, Call, CallKind, CallType, ExecType, ExecutionResult, FailurePolicy,
    IdentityAnchor, Mode, ModeCode, ModePayload, ModeSelector, NativeAmount,
};
