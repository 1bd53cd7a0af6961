use bitcoin::Network;

/// Blocks a coinbase output must be buried under before it can be spent.
pub const COINBASE_MATURITY: u32 = 100;

/// Confirmations required for a regular deposit on mainnet.
pub const MAINNET_CONFIRMATIONS: u32 = 19;

/// Confirmations required for a regular deposit on test networks.
pub const TESTNET_CONFIRMATIONS: u32 = 1;

/// Confirmations a deposit transaction needs before a pegin proof is built for it.
pub fn confirmation_depth(is_coinbase: bool, network: Network) -> u32 {
    if is_coinbase {
        return COINBASE_MATURITY;
    }
    match network {
        Network::Bitcoin => MAINNET_CONFIRMATIONS,
        _ => TESTNET_CONFIRMATIONS,
    }
}
