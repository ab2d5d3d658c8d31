use std::fmt;

pub use alloy::primitives::{Address, TxHash, U256};

/// An ERC-20 token address.
///
/// https://eips.ethereum.org/EIPS/eip-20
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAddress(pub Address);

impl From<Address> for TokenAddress {
    fn from(value: Address) -> Self {
        Self(value)
    }
}

/// Identifier of a liquidity pool within a routing backend. Constant-product
/// routers identify pools by their contract address, weighted routers by a
/// 32-byte pool ID; both are carried verbatim as 0x-prefixed strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolId(pub String);

/// A request-scoped signing key.
///
/// Constructed from the request payload just before trade execution and
/// dropped with the request. Never cached and redacted from all Debug output.
#[derive(Clone)]
pub struct SignerKey(String);

impl SignerKey {
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// The raw key material, only for handing over to the execution proxy.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SignerKey([redacted])")
    }
}
