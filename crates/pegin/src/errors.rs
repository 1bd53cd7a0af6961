use bitcoin::Txid;
use strata_pegin_client::ClientError;
use strata_pegin_proof::ProofEncodeError;
use strata_pegin_types::ScriptHashError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeginError {
    #[error("Failed to generate gateway address")]
    EmptyGatewayAddress,

    #[error("invalid gateway address {address}: {source}")]
    InvalidGatewayAddress {
        address: String,
        #[source]
        source: ScriptHashError,
    },

    #[error("failed to get UTXOs for address {address}: {source}")]
    GatewayUtxos {
        address: String,
        #[source]
        source: ClientError,
    },

    #[error("UTXO {txid} not found for address {address}")]
    UtxoNotFound { txid: Txid, address: String },

    #[error("Not enough confirmations: {have}/{need}")]
    InsufficientConfirmations { have: i64, need: u32 },

    #[error("UTXO {txid}:{vout} is not confirmed")]
    Unconfirmed { txid: Txid, vout: u32 },

    #[error("checkpoint height {checkpoint_height} is below confirmation height {height}")]
    InvalidCheckpointHeight { height: i32, checkpoint_height: i32 },

    #[error("aggregate pegin value overflows")]
    ValueOverflow,

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Encode(#[from] ProofEncodeError),
}
