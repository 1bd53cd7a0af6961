use bitcoin::Txid;
use serde::Deserialize;
use strata_pegin_types::{ScriptHash, Utxo};
use tracing::debug;

use crate::ClientError;

/// Minimal client for an esplora REST indexer.
#[derive(Debug, Clone)]
pub struct EsploraClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct EsploraUtxo {
    txid: Txid,
    vout: u32,
    value: u64,
    status: EsploraTxStatus,
}

#[derive(Debug, Deserialize)]
struct EsploraTxStatus {
    confirmed: bool,
    #[serde(default)]
    block_height: Option<i32>,
}

impl From<EsploraUtxo> for Utxo {
    fn from(entry: EsploraUtxo) -> Self {
        let height = match entry.status {
            EsploraTxStatus {
                confirmed: true,
                block_height: Some(height),
            } => height,
            _ => 0,
        };
        Utxo::new(entry.txid, entry.vout, entry.value, height)
    }
}

impl EsploraClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%operation, %url, "querying esplora");
        self.http
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| ClientError::upstream(operation, e))
    }

    /// Fetches the consensus-serialized transaction `txid`.
    pub async fn tx_raw(&self, txid: &Txid) -> Result<Vec<u8>, ClientError> {
        const OP: &str = "esplora get tx hex";
        let body = self
            .get(OP, &format!("/tx/{txid}/hex"))
            .await?
            .text()
            .await
            .map_err(|e| ClientError::upstream(OP, e))?;
        hex::decode(body.trim()).map_err(|e| ClientError::malformed(OP, e))
    }

    /// Lists UTXOs locked to the script with hash `script_hash`.
    ///
    /// Mempool entries are reported with height 0.
    pub async fn scripthash_utxos(&self, script_hash: &ScriptHash) -> Result<Vec<Utxo>, ClientError> {
        const OP: &str = "esplora get scripthash utxos";
        let entries: Vec<EsploraUtxo> = self
            .get(OP, &format!("/scripthash/{script_hash}/utxo"))
            .await?
            .json()
            .await
            .map_err(|e| ClientError::malformed(OP, e))?;
        Ok(entries.into_iter().map(Utxo::from).collect())
    }
}
