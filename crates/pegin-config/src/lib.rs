//! Configuration of the pegin proof tooling.

mod config;

pub use config::{
    BitcoindConfig, BridgeConfig, Config, ConfigError, EsploraConfig, LoggingConfig,
};
