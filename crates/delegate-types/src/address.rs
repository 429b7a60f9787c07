// Addresses and native amounts
//
// Targets are opaque 20-byte addresses; the executor never does arithmetic on them.

use std::fmt;

pub use alloy_primitives::{Address, Bytes, U256};

/// Amount of the native asset carried by a call.
pub type NativeAmount = U256;

/// Canonical address of the shared implementation, captured once when the
/// executor is constructed.
///
/// Code running with this address as its context is being called directly
/// instead of on behalf of a delegated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityAnchor(Address);

impl IdentityAnchor {
    /// Capture the anchor for an implementation deployed at `address`
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    /// Get the anchored address
    pub fn address(&self) -> Address {
        self.0
    }

    /// Check whether `context` is the implementation itself
    pub fn is_self(&self, context: &Address) -> bool {
        self.0 == *context
    }
}

impl fmt::Display for IdentityAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Address> for IdentityAnchor {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_anchor_matches_only_its_own_address() {
        let implementation = address!("00000000000000000000000000000000000000aa");
        let account = address!("00000000000000000000000000000000000000bb");
        let anchor = IdentityAnchor::new(implementation);

        assert!(anchor.is_self(&implementation));
        assert!(!anchor.is_self(&account));
        assert_eq!(anchor.address(), implementation);
    }
}
