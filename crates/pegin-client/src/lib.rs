//! Collaborators the pegin flow reads chain and bridge data from.

mod bitcoin_client;
mod bridge;
mod errors;
mod esplora;
mod traits;

pub use bitcoin_client::BitcoinChainClient;
pub use bridge::{BridgeApiClient, BridgeRpcClient};
pub use errors::ClientError;
pub use esplora::EsploraClient;
#[cfg(feature = "test-utils")]
pub use traits::{MockBridgeRpc, MockChainDataProvider};
pub use traits::{BridgeRpc, ChainDataProvider};
