use std::{fmt, str::FromStr};

use bitcoin::{
    address::NetworkUnchecked,
    hashes::{sha256, Hash as _},
    Address, Network, Script,
};

use crate::ScriptHashError;

/// SHA-256 of an output script, the key chain indexers list UTXOs by.
///
/// [`Display`](fmt::Display) renders the hash in digest order, which is what esplora expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptHash([u8; 32]);

impl ScriptHash {
    /// Hashes the output script of `address`.
    ///
    /// The address must be valid for `network`. Signet shares the testnet address prefix, so testnet
    /// addresses are accepted for it.
    pub fn from_address(address: &str, network: Network) -> Result<Self, ScriptHashError> {
        let address = Address::<NetworkUnchecked>::from_str(address)?.require_network(network)?;
        Ok(Self::from_script(&address.script_pubkey()))
    }

    pub fn from_script(script: &Script) -> Self {
        Self(sha256::Hash::hash(script.as_bytes()).to_byte_array())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ScriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::ScriptBuf;

    use super::*;

    // BIP-173 mainnet P2WPKH test vector.
    const MAINNET_P2WPKH: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";

    // BIP-173 testnet P2WSH test vector.
    const TESTNET_P2WSH: &str = "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7";

    #[test]
    fn test_from_address_hashes_script_pubkey() {
        let script =
            ScriptBuf::from_hex("0014751e76e8199196d454941c45d1b3a323f1433bd6").expect("valid hex");
        let expected = ScriptHash::from_script(&script);

        let hash = ScriptHash::from_address(MAINNET_P2WPKH, Network::Bitcoin).expect("valid address");
        assert_eq!(hash, expected);
    }

    #[test]
    fn test_from_address_rejects_wrong_network() {
        let res = ScriptHash::from_address(MAINNET_P2WPKH, Network::Testnet);
        assert!(matches!(res, Err(ScriptHashError::InvalidAddress(_))));
    }

    #[test]
    fn test_signet_accepts_testnet_prefix() {
        let testnet = ScriptHash::from_address(TESTNET_P2WSH, Network::Testnet).expect("testnet");
        let signet = ScriptHash::from_address(TESTNET_P2WSH, Network::Signet).expect("signet");
        assert_eq!(testnet, signet);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(ScriptHash::from_address("not-an-address", Network::Bitcoin).is_err());
    }

    #[test]
    fn test_display_is_digest_order() {
        let hash = ScriptHash::from_address(MAINNET_P2WPKH, Network::Bitcoin).expect("valid address");

        let bytes = hex::decode(hash.to_string()).expect("valid hex");
        assert_eq!(&bytes[..], hash.as_bytes());
    }
}
