use std::{fmt, sync::Arc};

use async_trait::async_trait;
use bitcoin::{
    consensus::{deserialize, serialize},
    BlockHash, Transaction, Txid,
};
use bitcoind_async_client::traits::Reader;
use futures::future::try_join_all;
use strata_pegin_types::{ScriptHash, Utxo};
use tracing::debug;

use crate::{ChainDataProvider, ClientError, EsploraClient};

const BITCOIND: &str = "bitcoind";
const ESPLORA: &str = "esplora";

/// [`ChainDataProvider`] backed by a bitcoind node and an esplora indexer.
///
/// Block data comes from bitcoind while transactions and address UTXOs come from esplora. Either
/// backend may be left out, in which case the calls it serves fail with
/// [`ClientError::MissingConfig`].
pub struct BitcoinChainClient<R: Reader> {
    bitcoind: Option<Arc<R>>,
    esplora: Option<EsploraClient>,
}

impl<R: Reader> fmt::Debug for BitcoinChainClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitcoinChainClient")
            .field("bitcoind", &self.bitcoind.is_some())
            .field("esplora", &self.esplora)
            .finish()
    }
}

impl<R: Reader> BitcoinChainClient<R> {
    pub fn new(bitcoind: Option<Arc<R>>, esplora: Option<EsploraClient>) -> Self {
        Self { bitcoind, esplora }
    }

    fn bitcoind(&self) -> Result<&R, ClientError> {
        self.bitcoind
            .as_deref()
            .ok_or(ClientError::MissingConfig(BITCOIND))
    }

    fn esplora(&self) -> Result<&EsploraClient, ClientError> {
        self.esplora
            .as_ref()
            .ok_or(ClientError::MissingConfig(ESPLORA))
    }
}

#[async_trait]
impl<R: Reader + Send + Sync> ChainDataProvider for BitcoinChainClient<R> {
    async fn get_transaction(&self, txid: Txid) -> Result<Vec<u8>, ClientError> {
        self.esplora()?.tx_raw(&txid).await
    }

    async fn get_block_hash(&self, height: u64) -> Result<BlockHash, ClientError> {
        self.bitcoind()?
            .get_block_hash(height)
            .await
            .map_err(|e| ClientError::upstream("getblockhash", e))
    }

    async fn get_block_header_from_hash(&self, hash: BlockHash) -> Result<Vec<u8>, ClientError> {
        let header = self
            .bitcoind()?
            .get_block_header(&hash)
            .await
            .map_err(|e| ClientError::upstream("getblockheader", e))?;
        Ok(serialize(&header))
    }

    async fn get_tip(&self) -> Result<u64, ClientError> {
        let info = self
            .bitcoind()?
            .get_blockchain_info()
            .await
            .map_err(|e| ClientError::upstream("getblockchaininfo", e))?;
        debug!(tip = %info.blocks, "fetched chain tip");
        Ok(u64::from(info.blocks))
    }

    async fn is_coinbase_tx(&self, txid: Txid) -> Result<bool, ClientError> {
        let raw = self.get_transaction(txid).await?;
        let tx: Transaction =
            deserialize(&raw).map_err(|e| ClientError::malformed("decode transaction", e))?;
        Ok(tx.is_coinbase())
    }

    async fn get_unspent_outputs(
        &self,
        script_hashes: Vec<ScriptHash>,
    ) -> Result<Vec<Utxo>, ClientError> {
        let esplora = self.esplora()?;
        let per_script = try_join_all(
            script_hashes
                .iter()
                .map(|script_hash| esplora.scripthash_utxos(script_hash)),
        )
        .await?;
        Ok(per_script.into_iter().flatten().collect())
    }
}
