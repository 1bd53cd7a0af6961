use async_trait::async_trait;
use bitcoin::{BlockHash, Txid};
use jsonrpsee::{
    core::RpcResult,
    http_client::{HttpClient, HttpClientBuilder},
    proc_macros::rpc,
};
use strata_pegin_types::{strip_hex_prefix, GatewayAddress};

use crate::{BridgeRpc, ClientError};

/// JSON-RPC methods the bridge node serves under the `eth` namespace.
#[rpc(server, client, namespace = "eth")]
pub trait BridgeApi {
    /// Derives the gateway address for an L2 recipient, `null` if the bridge cannot.
    #[method(name = "getGatewayAddress")]
    async fn get_gateway_address(&self, eth_address: String) -> RpcResult<Option<GatewayAddress>>;

    /// Returns the `0x`-prefixed hex merkle proof of a transaction in a block.
    #[method(name = "getMerkleProof")]
    async fn get_merkle_proof(&self, txid: String, block_hash: String)
        -> RpcResult<Option<String>>;
}

/// [`BridgeRpc`] over HTTP JSON-RPC.
#[derive(Debug)]
pub struct BridgeRpcClient {
    client: HttpClient,
}

impl BridgeRpcClient {
    pub fn try_new(rpc_url: &str) -> Result<Self, ClientError> {
        let client = HttpClientBuilder::default()
            .build(rpc_url)
            .map_err(|e| ClientError::invalid_endpoint("bridge", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BridgeRpc for BridgeRpcClient {
    async fn get_gateway_address(
        &self,
        eth_address: String,
    ) -> Result<GatewayAddress, ClientError> {
        BridgeApiClient::get_gateway_address(&self.client, eth_address)
            .await
            .map_err(|e| ClientError::upstream("eth_getGatewayAddress", e))?
            .ok_or_else(|| {
                ClientError::upstream("eth_getGatewayAddress", "failed to get gateway address")
            })
    }

    async fn get_merkle_proof(
        &self,
        txid: Txid,
        block_hash: BlockHash,
    ) -> Result<Vec<u8>, ClientError> {
        let proof = BridgeApiClient::get_merkle_proof(
            &self.client,
            txid.to_string(),
            block_hash.to_string(),
        )
        .await
        .map_err(|e| ClientError::upstream("eth_getMerkleProof", e))?
        .ok_or_else(|| ClientError::upstream("eth_getMerkleProof", "failed to get merkle proof"))?;

        hex::decode(strip_hex_prefix(&proof))
            .map_err(|e| ClientError::malformed("eth_getMerkleProof", e))
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::hashes::Hash;
    use jsonrpsee::server::{ServerBuilder, ServerHandle};

    use super::*;

    const GATEWAY: &str = "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7";
    const AGG_KEY: &str = "02a1633cafcc01ebfb6d78e39f687a1f0995c62fc95f51ead10a02ee0be551b5dc";

    /// Bridge node answering every call with fixed results.
    struct FixedBridge {
        gateway: Option<GatewayAddress>,
        merkle_proof: Option<String>,
    }

    #[async_trait]
    impl BridgeApiServer for FixedBridge {
        async fn get_gateway_address(
            &self,
            _eth_address: String,
        ) -> RpcResult<Option<GatewayAddress>> {
            Ok(self.gateway.clone())
        }

        async fn get_merkle_proof(
            &self,
            _txid: String,
            _block_hash: String,
        ) -> RpcResult<Option<String>> {
            Ok(self.merkle_proof.clone())
        }
    }

    async fn serve(bridge: FixedBridge) -> (BridgeRpcClient, ServerHandle) {
        let server = ServerBuilder::default()
            .build("127.0.0.1:0")
            .await
            .expect("build bridge rpc server");
        let addr = server.local_addr().expect("local addr");
        let handle = server.start(bridge.into_rpc());
        let client = BridgeRpcClient::try_new(&format!("http://{addr}")).expect("client");
        (client, handle)
    }

    fn serve_proof(merkle_proof: Option<&str>) -> FixedBridge {
        FixedBridge {
            gateway: None,
            merkle_proof: merkle_proof.map(str::to_owned),
        }
    }

    async fn fetch_proof(bridge: FixedBridge) -> Result<Vec<u8>, ClientError> {
        let (client, _handle) = serve(bridge).await;
        client
            .get_merkle_proof(Txid::all_zeros(), BlockHash::all_zeros())
            .await
    }

    #[tokio::test]
    async fn test_rejects_invalid_url() {
        let err = BridgeRpcClient::try_new("not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint { backend: "bridge", .. }));
    }

    #[tokio::test]
    async fn test_accepts_http_url() {
        assert!(BridgeRpcClient::try_new("http://127.0.0.1:8545").is_ok());
    }

    #[tokio::test]
    async fn test_gateway_address() {
        let expected = GatewayAddress::new(GATEWAY.to_owned(), AGG_KEY.to_owned());
        let (client, _handle) = serve(FixedBridge {
            gateway: Some(expected.clone()),
            merkle_proof: None,
        })
        .await;

        let gateway = client
            .get_gateway_address("5fbdb2315678afecb367f032d93f642f64180aa3".to_owned())
            .await
            .expect("gateway address");
        assert_eq!(gateway, expected);
    }

    #[tokio::test]
    async fn test_null_gateway_address() {
        let (client, _handle) = serve(serve_proof(None)).await;

        let err = client
            .get_gateway_address("5fbdb2315678afecb367f032d93f642f64180aa3".to_owned())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Upstream {
                operation: "eth_getGatewayAddress",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "eth_getGatewayAddress failed: failed to get gateway address"
        );
    }

    #[tokio::test]
    async fn test_merkle_proof_hex() {
        let prefixed = fetch_proof(serve_proof(Some("0xdeadbeef")))
            .await
            .expect("prefixed proof");
        assert_eq!(prefixed, vec![0xde, 0xad, 0xbe, 0xef]);

        let bare = fetch_proof(serve_proof(Some("0102"))).await.expect("bare proof");
        assert_eq!(bare, vec![0x01, 0x02]);
    }

    #[tokio::test]
    async fn test_null_merkle_proof() {
        let err = fetch_proof(serve_proof(None)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "eth_getMerkleProof failed: failed to get merkle proof"
        );
    }

    #[tokio::test]
    async fn test_malformed_merkle_proof() {
        let err = fetch_proof(serve_proof(Some("0xzz"))).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Malformed {
                operation: "eth_getMerkleProof",
                ..
            }
        ));
    }

    #[test]
    fn test_gateway_response_ignores_extra_fields() {
        let json = r#"{
            "gateway_address": "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7",
            "aggregate_public_key": "02a1633cafcc01ebfb6d78e39f687a1f0995c62fc95f51ead10a02ee0be551b5dc",
            "eth_address": "5fbdb2315678afecb367f032d93f642f64180aa3"
        }"#;
        let parsed: GatewayAddress = serde_json::from_str(json).expect("valid json");
        assert_eq!(parsed.aggregate_public_key, AGG_KEY);
    }
}
