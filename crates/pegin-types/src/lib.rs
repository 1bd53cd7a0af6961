//! Data types shared by the pegin proof pipeline.
//!
//! These describe a chain snapshot (UTXOs and the optional L2 checkpoint attached to them) and the
//! pre-encoding record that the proof encoder consumes.

mod checkpoint;
mod components;
mod errors;
mod gateway;
mod script_hash;
mod utils;
mod utxo;

pub use checkpoint::BitcoinCheckpoint;
pub use components::{PeginVersion, ProofComponents};
pub use errors::{ScriptHashError, UnknownPeginVersion};
pub use gateway::GatewayAddress;
pub use script_hash::ScriptHash;
pub use utils::strip_hex_prefix;
pub use utxo::{Utxo, UtxoWithCheckpoint};
