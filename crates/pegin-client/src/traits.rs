use async_trait::async_trait;
use bitcoin::{BlockHash, Txid};
use strata_pegin_types::{GatewayAddress, ScriptHash, Utxo};

use crate::ClientError;

/// Read access to bitcoin chain data.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait ChainDataProvider: Send + Sync {
    /// Returns the consensus-serialized transaction.
    async fn get_transaction(&self, txid: Txid) -> Result<Vec<u8>, ClientError>;

    /// Returns the hash of the main-chain block at `height`.
    async fn get_block_hash(&self, height: u64) -> Result<BlockHash, ClientError>;

    /// Returns the 80-byte serialized header of the block `hash`.
    async fn get_block_header_from_hash(&self, hash: BlockHash) -> Result<Vec<u8>, ClientError>;

    /// Returns the height of the current chain tip.
    async fn get_tip(&self) -> Result<u64, ClientError>;

    async fn is_coinbase_tx(&self, txid: Txid) -> Result<bool, ClientError>;

    /// Lists unspent outputs paying to any of `script_hashes`, confirmed or not.
    async fn get_unspent_outputs(
        &self,
        script_hashes: Vec<ScriptHash>,
    ) -> Result<Vec<Utxo>, ClientError>;
}

/// Bridge node RPC surface used while building pegins.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait BridgeRpc: Send + Sync {
    /// Derives the gateway address for an L2 recipient.
    ///
    /// `eth_address` is hex without the `0x` prefix.
    async fn get_gateway_address(&self, eth_address: String)
        -> Result<GatewayAddress, ClientError>;

    /// Returns the merkle inclusion proof of `txid` in block `block_hash`.
    async fn get_merkle_proof(
        &self,
        txid: Txid,
        block_hash: BlockHash,
    ) -> Result<Vec<u8>, ClientError>;
}
