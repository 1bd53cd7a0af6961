use std::fmt;

use bitcoin::{Network, Txid};
use strata_pegin_client::{BridgeRpc, ChainDataProvider};
use strata_pegin_proof::encode_proof;
use strata_pegin_types::{
    strip_hex_prefix, GatewayAddress, ProofComponents, ScriptHash, Utxo, UtxoWithCheckpoint,
};
use tracing::{debug, error, info};

use crate::{assemble_components, confirmation_depth, PeginError};

/// Result of [`PeginService::generate_proof`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeginData {
    /// One encoded proof per confirmed UTXO sharing the target's block.
    pub proofs: Vec<Vec<u8>>,

    /// Confirmation height of the target UTXO.
    pub utxo_height: i32,

    /// Sum of the values of the proven UTXOs, in satoshis.
    pub aggregate_value: u64,
}

/// Builds pegin proofs from chain and bridge data.
pub struct PeginService<C, B> {
    chain: C,
    bridge: B,
    network: Network,
}

impl<C, B> fmt::Debug for PeginService<C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeginService")
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

impl<C: ChainDataProvider, B: BridgeRpc> PeginService<C, B> {
    pub fn new(chain: C, bridge: B, network: Network) -> Self {
        Self {
            chain,
            bridge,
            network,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Asks the bridge for the gateway address of `eth_address`, with or without `0x`.
    pub async fn generate_gateway_address(
        &self,
        eth_address: &str,
    ) -> Result<GatewayAddress, PeginError> {
        let eth_address = strip_hex_prefix(eth_address).to_owned();
        Ok(self.bridge.get_gateway_address(eth_address).await?)
    }

    /// Lists UTXOs currently held at `gateway_address`.
    pub async fn gateway_utxos(&self, gateway_address: &str) -> Result<Vec<Utxo>, PeginError> {
        let script_hash = ScriptHash::from_address(gateway_address, self.network).map_err(
            |source| PeginError::InvalidGatewayAddress {
                address: gateway_address.to_owned(),
                source,
            },
        )?;

        self.chain
            .get_unspent_outputs(vec![script_hash])
            .await
            .map_err(|source| {
                error!(%gateway_address, %source, "failed to fetch gateway utxos");
                PeginError::GatewayUtxos {
                    address: gateway_address.to_owned(),
                    source,
                }
            })
    }

    pub fn confirmation_depth(&self, is_coinbase: bool) -> u32 {
        confirmation_depth(is_coinbase, self.network)
    }

    pub async fn assemble_components(
        &self,
        utxo: &UtxoWithCheckpoint,
        eth_address: &str,
        aggregate_public_key: &str,
        tip: u64,
    ) -> Result<ProofComponents, PeginError> {
        assemble_components(
            &self.chain,
            &self.bridge,
            utxo,
            eth_address,
            aggregate_public_key,
            tip,
        )
        .await
    }

    /// Assembles components for every confirmed UTXO in `utxos`, returning them with the summed
    /// value.
    ///
    /// Unconfirmed UTXOs are skipped.
    pub async fn process_utxos(
        &self,
        utxos: &[&UtxoWithCheckpoint],
        eth_address: &str,
        aggregate_public_key: &str,
        tip: u64,
    ) -> Result<(Vec<ProofComponents>, u64), PeginError> {
        let mut components = Vec::with_capacity(utxos.len());
        let mut aggregate_value = 0u64;

        for utxo in utxos.iter().filter(|u| u.utxo.is_confirmed()) {
            let assembled = self
                .assemble_components(utxo, eth_address, aggregate_public_key, tip)
                .await?;
            components.push(assembled);
            aggregate_value = aggregate_value
                .checked_add(utxo.utxo.value)
                .ok_or(PeginError::ValueOverflow)?;
        }

        Ok((components, aggregate_value))
    }

    /// Builds the pegin proofs for the deposit `target_txid` made to the gateway address of
    /// `eth_address`.
    ///
    /// Every entry of `candidates` confirmed in the same block as the target is proven alongside
    /// it, since they share the header range.
    pub async fn generate_proof(
        &self,
        eth_address: &str,
        target_txid: Txid,
        candidates: &[UtxoWithCheckpoint],
    ) -> Result<PeginData, PeginError> {
        let eth_address = strip_hex_prefix(eth_address);

        let gateway = self.generate_gateway_address(eth_address).await?;
        if gateway.gateway_address.is_empty() {
            error!(%eth_address, "bridge returned an empty gateway address");
            return Err(PeginError::EmptyGatewayAddress);
        }
        let address = gateway.gateway_address.as_str();

        let utxos = self.gateway_utxos(address).await?;
        let target = utxos
            .iter()
            .find(|u| u.hash == target_txid)
            .ok_or_else(|| {
                error!(%target_txid, %address, "target utxo not held by gateway");
                PeginError::UtxoNotFound {
                    txid: target_txid,
                    address: address.to_owned(),
                }
            })?;

        let tip = self.chain.get_tip().await?;
        let is_coinbase = self.chain.is_coinbase_tx(target_txid).await?;
        let need = self.confirmation_depth(is_coinbase);
        let have = target.confirmations_at(tip);
        if have < i64::from(need) {
            error!(%target_txid, have, need, "deposit not deep enough");
            return Err(PeginError::InsufficientConfirmations { have, need });
        }

        let batch: Vec<&UtxoWithCheckpoint> = candidates
            .iter()
            .filter(|c| c.utxo.height == target.height)
            .collect();
        debug!(height = target.height, batch = batch.len(), "batching same-block utxos");

        let (components, aggregate_value) = self
            .process_utxos(&batch, eth_address, &gateway.aggregate_public_key, tip)
            .await?;

        let proofs = components
            .iter()
            .map(encode_proof)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| error!(%e, "failed to encode pegin proof"))?;

        info!(
            %target_txid,
            proofs = proofs.len(),
            %aggregate_value,
            "generated pegin proofs"
        );

        Ok(PeginData {
            proofs,
            utxo_height: target.height,
            aggregate_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::hashes::Hash;
    use strata_pegin_client::{ClientError, MockBridgeRpc, MockChainDataProvider};
    use strata_pegin_proof::decode_proof;
    use strata_pegin_types::BitcoinCheckpoint;

    use super::*;
    use crate::assembler::tests::{hash_at, header_at, height_of, txid, AGG_KEY, ETH, TXID};

    const GATEWAY: &str = "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7";

    fn other_txid() -> Txid {
        Txid::from_byte_array([0x42; 32])
    }

    fn bridge_with_gateway(address: &'static str) -> MockBridgeRpc {
        let mut bridge = MockBridgeRpc::new();
        bridge
            .expect_get_gateway_address()
            .times(1)
            .withf(|eth| eth == ETH)
            .returning(move |_| Ok(GatewayAddress::new(address.to_owned(), AGG_KEY.to_owned())));
        bridge
    }

    /// Chain mock holding the target UTXO at `height` with `tip` as the current tip.
    fn chain_with_target(height: i32, tip: u64) -> MockChainDataProvider {
        let mut chain = MockChainDataProvider::new();
        chain
            .expect_get_unspent_outputs()
            .times(1)
            .returning(move |_| Ok(vec![Utxo::new(txid(), 0, 100_000, height)]));
        chain.expect_get_tip().returning(move || Ok(tip));
        chain.expect_is_coinbase_tx().returning(|_| Ok(false));
        chain
    }

    fn expect_block_data(chain: &mut MockChainDataProvider) {
        chain
            .expect_get_transaction()
            .returning(|_| Ok(vec![0x02, 0x00, 0x00, 0x00]));
        chain
            .expect_get_block_hash()
            .returning(|height| Ok(hash_at(height)));
        chain
            .expect_get_block_header_from_hash()
            .returning(|hash| Ok(header_at(height_of(&hash))));
    }

    #[tokio::test]
    async fn test_batches_same_block_utxos() {
        let mut chain = chain_with_target(100, 100);
        expect_block_data(&mut chain);

        let mut bridge = bridge_with_gateway(GATEWAY);
        bridge
            .expect_get_merkle_proof()
            .times(2)
            .returning(|_, _| Ok(vec![0xaa; 8]));

        let service = PeginService::new(chain, bridge, Network::Testnet);
        let candidates = vec![
            UtxoWithCheckpoint::from(Utxo::new(txid(), 0, 100_000, 100)),
            UtxoWithCheckpoint::from(Utxo::new(other_txid(), 3, 200_000, 100)),
            UtxoWithCheckpoint::from(Utxo::new(other_txid(), 4, 700_000, 101)),
        ];

        let data = service
            .generate_proof(&format!("0x{ETH}"), txid(), &candidates)
            .await
            .expect("generates proofs");

        assert_eq!(data.proofs.len(), 2);
        assert_eq!(data.aggregate_value, 300_000);
        assert_eq!(data.utxo_height, 100);

        let first = decode_proof(&data.proofs[0]).expect("decodes");
        assert_eq!(first.tx_id, TXID);
        assert_eq!(first.vout, 0);
        assert_eq!(first.block_headers.len(), 1);
        assert_eq!(hex::encode(first.eth_address), ETH);

        let second = decode_proof(&data.proofs[1]).expect("decodes");
        assert_eq!(second.vout, 3);
    }

    #[tokio::test]
    async fn test_skips_unconfirmed_candidates() {
        let mut chain = MockChainDataProvider::new();
        expect_block_data(&mut chain);

        let mut bridge = MockBridgeRpc::new();
        bridge
            .expect_get_merkle_proof()
            .times(1)
            .returning(|_, _| Ok(vec![0xaa; 8]));

        let service = PeginService::new(chain, bridge, Network::Regtest);
        let candidates = vec![
            UtxoWithCheckpoint::from(Utxo::new(txid(), 0, 100_000, 100)),
            UtxoWithCheckpoint::new(
                Utxo::new(other_txid(), 1, 500_000, 0),
                Some(BitcoinCheckpoint::new("0x00".to_owned(), "00".to_owned(), 0)),
            ),
        ];

        let (components, value) = service
            .process_utxos(
                &candidates.iter().collect::<Vec<_>>(),
                ETH,
                AGG_KEY,
                101,
            )
            .await
            .expect("processes");

        assert_eq!(components.len(), 1);
        assert_eq!(value, 100_000);
        assert_eq!(components[0].block_headers.len(), 2);
    }

    #[tokio::test]
    async fn test_unconfirmed_target_yields_no_proofs() {
        let chain = chain_with_target(0, 99);
        let service = PeginService::new(chain, bridge_with_gateway(GATEWAY), Network::Testnet);
        let candidates = vec![UtxoWithCheckpoint::from(Utxo::new(txid(), 0, 100_000, 0))];

        let data = service
            .generate_proof(ETH, txid(), &candidates)
            .await
            .expect("unconfirmed target is not an error");

        assert_eq!(
            data,
            PeginData {
                proofs: vec![],
                utxo_height: 0,
                aggregate_value: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_target_not_found() {
        let mut chain = MockChainDataProvider::new();
        chain
            .expect_get_unspent_outputs()
            .times(1)
            .returning(|_| Ok(vec![Utxo::new(other_txid(), 0, 100_000, 100)]));

        let service = PeginService::new(chain, bridge_with_gateway(GATEWAY), Network::Testnet);
        let err = service.generate_proof(ETH, txid(), &[]).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("UTXO {TXID} not found for address {GATEWAY}")
        );
    }

    #[tokio::test]
    async fn test_not_enough_confirmations() {
        let chain = chain_with_target(100, 99);
        let service = PeginService::new(chain, bridge_with_gateway(GATEWAY), Network::Testnet);

        let err = service.generate_proof(ETH, txid(), &[]).await.unwrap_err();

        assert!(matches!(
            err,
            PeginError::InsufficientConfirmations { have: 0, need: 1 }
        ));
        assert_eq!(err.to_string(), "Not enough confirmations: 0/1");
    }

    #[tokio::test]
    async fn test_mainnet_needs_nineteen_confirmations() {
        let gateway = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
        let chain = chain_with_target(100, 110);
        let service = PeginService::new(chain, bridge_with_gateway(gateway), Network::Bitcoin);

        let err = service.generate_proof(ETH, txid(), &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Not enough confirmations: 11/19");
    }

    #[tokio::test]
    async fn test_empty_gateway_address() {
        let service = PeginService::new(
            MockChainDataProvider::new(),
            bridge_with_gateway(""),
            Network::Testnet,
        );

        let err = service.generate_proof(ETH, txid(), &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate gateway address");
    }

    #[tokio::test]
    async fn test_gateway_utxo_failure_names_address() {
        let mut chain = MockChainDataProvider::new();
        chain
            .expect_get_unspent_outputs()
            .times(1)
            .returning(|_| Err(ClientError::upstream("esplora get scripthash utxos", "timeout")));

        let service = PeginService::new(chain, MockBridgeRpc::new(), Network::Signet);
        let err = service.gateway_utxos(GATEWAY).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            format!(
                "failed to get UTXOs for address {GATEWAY}: esplora get scripthash utxos failed: timeout"
            )
        );
    }

    #[tokio::test]
    async fn test_gateway_address_on_wrong_network() {
        let service = PeginService::new(
            MockChainDataProvider::new(),
            MockBridgeRpc::new(),
            Network::Bitcoin,
        );

        let err = service.gateway_utxos(GATEWAY).await.unwrap_err();
        assert!(matches!(err, PeginError::InvalidGatewayAddress { .. }));
    }

    #[tokio::test]
    async fn test_encoding_error_propagates() {
        let mut chain = chain_with_target(100, 100);
        expect_block_data(&mut chain);

        let mut bridge = MockBridgeRpc::new();
        bridge
            .expect_get_gateway_address()
            .returning(|_| Ok(GatewayAddress::new(GATEWAY.to_owned(), "02abcd".to_owned())));
        bridge
            .expect_get_merkle_proof()
            .returning(|_, _| Ok(vec![0xaa; 8]));

        let service = PeginService::new(chain, bridge, Network::Testnet);
        let candidates = vec![UtxoWithCheckpoint::from(Utxo::new(txid(), 0, 100_000, 100))];

        let err = service
            .generate_proof(ETH, txid(), &candidates)
            .await
            .unwrap_err();
        assert!(matches!(err, PeginError::Encode(_)));
    }
}
