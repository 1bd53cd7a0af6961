//! Builds pegin proofs for bitcoin deposits to a bridge gateway address.

mod assembler;
mod errors;
mod policy;
mod service;

pub use assembler::assemble_components;
pub use errors::PeginError;
pub use policy::{confirmation_depth, COINBASE_MATURITY, MAINNET_CONFIRMATIONS, TESTNET_CONFIRMATIONS};
pub use service::{PeginData, PeginService};
