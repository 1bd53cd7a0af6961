use serde::{Deserialize, Serialize};

use crate::UnknownPeginVersion;

/// Pegin proof layout version.
///
/// The two layouts are wire-incompatible; a verifier dispatches on the leading version tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum PeginVersion {
    /// Proof without an L2 block reference, headers run up to the current tip.
    V0 = 0,

    /// Proof referencing an L2 block hash, headers run up to the checkpointed height.
    V1 = 1,
}

impl PeginVersion {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for PeginVersion {
    type Error = UnknownPeginVersion;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::V0),
            1 => Ok(Self::V1),
            other => Err(UnknownPeginVersion(other)),
        }
    }
}

/// Everything needed to encode a single pegin proof.
///
/// Hex fields are kept as received from the collaborators and are validated by the encoder, which
/// is the only consumer of this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofComponents {
    /// Funding transaction id in display (big-endian) hex.
    pub tx_id: String,

    /// Output index of the pegin output.
    pub vout: u32,

    /// Merkle inclusion proof of the transaction in its block, as returned by the bridge.
    pub merkle_proof: Vec<u8>,

    /// Serialized block headers from the confirmation height up to the end height, ascending.
    pub block_headers: Vec<Vec<u8>>,

    /// L2 recipient address, hex.
    pub eth_address: String,

    /// Compressed aggregate public key controlling the gateway address, hex.
    pub aggregate_public_key: String,

    /// Consensus-serialized funding transaction.
    pub raw_tx: Vec<u8>,

    /// L2 block hash referenced by a [`PeginVersion::V1`] proof.
    pub ref_l2_block_hash: Option<String>,

    pub version: PeginVersion,
}
