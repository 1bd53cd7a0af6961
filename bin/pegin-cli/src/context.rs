//! Wiring of configured collaborators into a [`PeginService`].

use std::sync::Arc;

use anyhow::Context;
use bitcoind_async_client::{Auth, Client};
use strata_common::logging::{self, FileLoggingConfig, LoggerConfig};
use strata_pegin::PeginService;
use strata_pegin_client::{BitcoinChainClient, BridgeRpcClient, EsploraClient};
use strata_pegin_config::{BitcoindConfig, Config, LoggingConfig};

pub(crate) type CliPeginService = PeginService<BitcoinChainClient<Client>, BridgeRpcClient>;

/// Initializes logging to stderr, so stdout only carries command output.
pub(crate) fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let mut logger = LoggerConfig::new("strata-pegin-cli".to_owned())
        .with_json_logging(config.json_format.unwrap_or(false))
        .with_stderr(true);

    if let Some(dir) = &config.log_dir {
        let prefix = config
            .log_file_prefix
            .clone()
            .unwrap_or_else(|| "pegin".to_owned());
        logger = logger.with_file_logging(
            FileLoggingConfig::new(dir.clone(), prefix)
                .with_json_format(config.json_format.unwrap_or(false)),
        );
    }

    logging::init(logger).context("failed to initialize logging")
}

fn bitcoind_client(config: &BitcoindConfig) -> anyhow::Result<Client> {
    let auth = Auth::UserPass(config.rpc_user.clone(), config.rpc_password.clone());
    Client::new(
        config.rpc_url.clone(),
        auth,
        config.retry_count,
        config.retry_interval,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Failed to create Bitcoin RPC client: {e}"))
}

pub(crate) fn build_service(config: &Config) -> anyhow::Result<CliPeginService> {
    let bitcoind = config
        .bitcoind
        .as_ref()
        .map(bitcoind_client)
        .transpose()?
        .map(Arc::new);
    let esplora = config
        .esplora
        .as_ref()
        .map(|esplora| EsploraClient::new(esplora.url.clone()));

    let chain = BitcoinChainClient::new(bitcoind, esplora);
    let bridge = BridgeRpcClient::try_new(&config.bridge.rpc_url)?;

    Ok(PeginService::new(chain, bridge, config.network))
}
