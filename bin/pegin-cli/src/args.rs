//! Command line arguments for the `strata-pegin-cli` binary.

use std::path::PathBuf;

use argh::FromArgs;

/// Builds pegin proofs for deposits to bridge gateway addresses.
#[derive(FromArgs, PartialEq, Debug)]
pub(crate) struct Args {
    #[argh(
        option,
        description = "path to the TOML config (default config.toml)",
        short = 'c',
        default = "PathBuf::from(\"config.toml\")"
    )]
    pub(crate) config: PathBuf,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    GatewayAddress(SubcGatewayAddress),
    ConfirmationDepth(SubcConfirmationDepth),
    GenerateProof(SubcGenerateProof),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "gateway-address",
    description = "derives the gateway address for an L2 recipient"
)]
pub(crate) struct SubcGatewayAddress {
    #[argh(positional, description = "L2 recipient address, with or without 0x")]
    pub(crate) eth_address: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "confirmation-depth",
    description = "prints the confirmations a deposit needs on the configured network"
)]
pub(crate) struct SubcConfirmationDepth {
    #[argh(switch, description = "the deposit is a coinbase output")]
    pub(crate) coinbase: bool,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "generate-proof",
    description = "builds the pegin proofs for a deposit"
)]
pub(crate) struct SubcGenerateProof {
    #[argh(positional, description = "L2 recipient address, with or without 0x")]
    pub(crate) eth_address: String,

    #[argh(positional, description = "id of the deposit transaction")]
    pub(crate) txid: String,

    #[argh(
        option,
        description = "JSON file with the checkpoint-annotated candidate UTXOs"
    )]
    pub(crate) utxos: PathBuf,

    #[argh(option, description = "output file path .json (default stdout)", short = 'o')]
    pub(crate) output: Option<PathBuf>,
}
