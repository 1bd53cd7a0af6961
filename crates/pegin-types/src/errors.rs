use bitcoin::address;
use thiserror::Error;

/// Version tag that does not correspond to any known pegin proof layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown pegin proof version {0}")]
pub struct UnknownPeginVersion(pub u32);

/// Errors deriving a [`ScriptHash`](crate::ScriptHash) from an address.
#[derive(Debug, Error)]
pub enum ScriptHashError {
    /// The address could not be parsed or is not valid for the requested network.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] address::ParseError),
}
