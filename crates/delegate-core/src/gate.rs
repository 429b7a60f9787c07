// Authorization gate
//
// The executor's code is shared: it runs both as delegated accounts and, if
// someone calls it directly, as itself. Only the former may dispatch.

use alloy_primitives::Address;
use tracing::warn;

use delegate_error::{DispatchError, DispatchResult};
use delegate_types::IdentityAnchor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationGate {
    anchor: IdentityAnchor,
}

impl AuthorizationGate {
    pub fn new(anchor: IdentityAnchor) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> IdentityAnchor {
        self.anchor
    }

    /// Reject `context` when it is the implementation's own address
    pub fn check(&self, context: &Address) -> DispatchResult<()> {
        if self.anchor.is_self(context) {
            warn!(%context, "entry point called outside a delegated context");
            return Err(DispatchError::UnauthorizedCallContext);
        }
        Ok(())
    }
}
