// Delegate Types
//
// Value types shared by the mode decoder, the call codec and the dispatcher.

pub mod address;
pub mod call;
pub mod mode;

pub use address::{Address, Bytes, IdentityAnchor, NativeAmount};
pub use call::{Call, ExecutionResult};
pub use mode::{CallKind, CallType, ExecType, FailurePolicy, Mode, ModeCode, ModePayload, ModeSelector};
