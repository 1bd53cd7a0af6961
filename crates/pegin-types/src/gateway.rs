use serde::{Deserialize, Serialize};

/// Bitcoin gateway address derived by the bridge for a single L2 recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayAddress {
    /// Bitcoin address the user locks funds at.
    pub gateway_address: String,

    /// Compressed aggregate public key controlling the gateway address, hex.
    pub aggregate_public_key: String,
}

impl GatewayAddress {
    pub fn new(gateway_address: String, aggregate_public_key: String) -> Self {
        Self {
            gateway_address,
            aggregate_public_key,
        }
    }
}
