use bitcoin::Txid;
use serde::{Deserialize, Serialize};

use crate::BitcoinCheckpoint;

/// An unspent output as reported by the chain indexer.
///
/// `height` follows the indexer convention: zero or negative means the output has not been
/// confirmed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Output index within the transaction.
    pub index: u32,

    /// Id of the funding transaction.
    pub hash: Txid,

    /// Value in satoshis.
    pub value: u64,

    /// Confirmation height.
    pub height: i32,
}

impl Utxo {
    pub fn new(hash: Txid, index: u32, value: u64, height: i32) -> Self {
        Self {
            index,
            hash,
            value,
            height,
        }
    }

    /// Whether the output has been included in a block.
    pub fn is_confirmed(&self) -> bool {
        self.height > 0
    }

    /// Number of confirmations at `tip`, counting the confirming block itself.
    ///
    /// Negative when the tip is behind the confirmation height.
    pub fn confirmations_at(&self, tip: u64) -> i64 {
        let tip = i64::try_from(tip).unwrap_or(i64::MAX);
        tip - i64::from(self.height) + 1
    }
}

/// A UTXO annotated with the L2 checkpoint that covers it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoWithCheckpoint {
    #[serde(flatten)]
    pub utxo: Utxo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitcoin_checkpoint: Option<BitcoinCheckpoint>,
}

impl UtxoWithCheckpoint {
    pub fn new(utxo: Utxo, bitcoin_checkpoint: Option<BitcoinCheckpoint>) -> Self {
        Self {
            utxo,
            bitcoin_checkpoint,
        }
    }

    pub fn utxo(&self) -> &Utxo {
        &self.utxo
    }

    pub fn checkpoint(&self) -> Option<&BitcoinCheckpoint> {
        self.bitcoin_checkpoint.as_ref()
    }
}

impl From<Utxo> for UtxoWithCheckpoint {
    fn from(utxo: Utxo) -> Self {
        Self::new(utxo, None)
    }
}
