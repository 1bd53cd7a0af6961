use serde::{Deserialize, Serialize};

/// An L2-attested commitment to a bitcoin height.
///
/// When attached to a UTXO it bounds the header range of the proof to `utxo_height` and makes the
/// proof reference `l2_block_hash`, which switches the encoding to [`PeginVersion::V1`].
///
/// [`PeginVersion::V1`]: crate::PeginVersion::V1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitcoinCheckpoint {
    /// L2 block hash, hex encoded with an optional `0x` prefix.
    pub l2_block_hash: String,

    /// Hash of the L1 checkpoint that the L2 block commits to.
    pub l1_checkpoint_hash: String,

    /// Bitcoin height the checkpoint commits to.
    pub utxo_height: i32,
}

impl BitcoinCheckpoint {
    pub fn new(l2_block_hash: String, l1_checkpoint_hash: String, utxo_height: i32) -> Self {
        Self {
            l2_block_hash,
            l1_checkpoint_hash,
            utxo_height,
        }
    }
}
