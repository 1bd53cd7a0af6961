use futures::future::try_join_all;
use strata_pegin_client::{BridgeRpc, ChainDataProvider, ClientError};
use strata_pegin_types::{PeginVersion, ProofComponents, UtxoWithCheckpoint};
use tracing::{debug, warn};

use crate::PeginError;

/// Gathers everything needed to encode the pegin proof of `utxo`.
///
/// Headers run from the confirmation height up to the checkpointed height when the UTXO carries
/// a checkpoint, and up to `tip` otherwise. They are fetched concurrently and any failed fetch
/// fails the whole assembly.
pub async fn assemble_components(
    chain: &impl ChainDataProvider,
    bridge: &impl BridgeRpc,
    utxo: &UtxoWithCheckpoint,
    eth_address: &str,
    aggregate_public_key: &str,
    tip: u64,
) -> Result<ProofComponents, PeginError> {
    let txid = utxo.utxo.hash;
    let height = u64::try_from(utxo.utxo.height)
        .ok()
        .filter(|h| *h > 0)
        .ok_or(PeginError::Unconfirmed {
            txid,
            vout: utxo.utxo.index,
        })?;

    let raw_tx = chain.get_transaction(txid).await?;
    let block_hash = chain.get_block_hash(height).await?;
    let merkle_proof = bridge.get_merkle_proof(txid, block_hash).await?;

    let end_height = match utxo.checkpoint() {
        Some(checkpoint) => u64::try_from(checkpoint.utxo_height)
            .ok()
            .filter(|end| *end >= height)
            .ok_or_else(|| {
                warn!(%txid, height, checkpoint_height = checkpoint.utxo_height, "checkpoint precedes utxo");
                PeginError::InvalidCheckpointHeight {
                    height: utxo.utxo.height,
                    checkpoint_height: checkpoint.utxo_height,
                }
            })?,
        None => tip,
    };

    debug!(%txid, start = height, end = end_height, "fetching block headers");
    let block_headers = fetch_headers(chain, height, end_height).await?;

    let (version, ref_l2_block_hash) = match utxo.checkpoint() {
        Some(checkpoint) => (PeginVersion::V1, Some(checkpoint.l2_block_hash.clone())),
        None => (PeginVersion::V0, None),
    };

    Ok(ProofComponents {
        tx_id: txid.to_string(),
        vout: utxo.utxo.index,
        merkle_proof,
        block_headers,
        eth_address: eth_address.to_owned(),
        aggregate_public_key: aggregate_public_key.to_owned(),
        raw_tx,
        ref_l2_block_hash,
        version,
    })
}

/// Fetches headers for `start..=end` in ascending height order.
async fn fetch_headers(
    chain: &impl ChainDataProvider,
    start: u64,
    end: u64,
) -> Result<Vec<Vec<u8>>, ClientError> {
    let mut tagged = try_join_all((start..=end).map(|height| async move {
        let hash = chain.get_block_hash(height).await?;
        let header = chain.get_block_header_from_hash(hash).await?;
        Ok::<_, ClientError>((height, header))
    }))
    .await?;

    tagged.sort_unstable_by_key(|(height, _)| *height);
    Ok(tagged.into_iter().map(|(_, header)| header).collect())
}
