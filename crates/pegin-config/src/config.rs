use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bitcoin::Network;
use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bridge node the gateway addresses and merkle proofs are requested from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub rpc_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitcoindConfig {
    pub rpc_url: String,
    pub rpc_user: String,
    pub rpc_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_interval: Option<u64>,
}

/// Esplora REST indexer used for transactions and address UTXOs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsploraConfig {
    pub url: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bitcoin network the gateway addresses live on.
    #[serde(deserialize_with = "deserialize_network")]
    pub network: Network,

    pub bridge: BridgeConfig,

    /// Required for block hashes, headers and the chain tip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitcoind: Option<BitcoindConfig>,

    /// Required for transactions and gateway UTXOs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esplora: Option<EsploraConfig>,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Accepts `mainnet` for [`Network::Bitcoin`] besides the usual network names.
fn deserialize_network<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Network, D::Error> {
    let name = String::deserialize(deserializer)?;
    match name.as_str() {
        "mainnet" => Ok(Network::Bitcoin),
        other => other.parse().map_err(de::Error::custom),
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
