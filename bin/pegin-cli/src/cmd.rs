use std::{fs, str::FromStr};

use anyhow::Context;
use bitcoin::Txid;
use serde::Serialize;
use strata_pegin::PeginData;
use strata_pegin_types::UtxoWithCheckpoint;
use tracing::info;

use crate::{
    args::{SubcConfirmationDepth, SubcGatewayAddress, SubcGenerateProof, Subcommand},
    context::CliPeginService,
};

/// JSON printed by `generate-proof`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProofOutput {
    proofs: Vec<String>,
    utxo_height: i32,
    value: u64,
}

impl From<PeginData> for ProofOutput {
    fn from(data: PeginData) -> Self {
        Self {
            proofs: data.proofs.iter().map(hex::encode).collect(),
            utxo_height: data.utxo_height,
            value: data.aggregate_value,
        }
    }
}

pub(crate) async fn exec_subc(cmd: Subcommand, service: &CliPeginService) -> anyhow::Result<()> {
    match cmd {
        Subcommand::GatewayAddress(subc) => exec_gateway_address(subc, service).await,
        Subcommand::ConfirmationDepth(subc) => exec_confirmation_depth(subc, service),
        Subcommand::GenerateProof(subc) => exec_generate_proof(subc, service).await,
    }
}

async fn exec_gateway_address(
    cmd: SubcGatewayAddress,
    service: &CliPeginService,
) -> anyhow::Result<()> {
    let gateway = service.generate_gateway_address(&cmd.eth_address).await?;
    println!("{}", serde_json::to_string_pretty(&gateway)?);
    Ok(())
}

fn exec_confirmation_depth(
    cmd: SubcConfirmationDepth,
    service: &CliPeginService,
) -> anyhow::Result<()> {
    let depth = service.confirmation_depth(cmd.coinbase);
    info!(network = %service.network(), coinbase = cmd.coinbase, depth, "confirmation depth");
    println!("{depth}");
    Ok(())
}

async fn exec_generate_proof(
    cmd: SubcGenerateProof,
    service: &CliPeginService,
) -> anyhow::Result<()> {
    let txid = Txid::from_str(&cmd.txid).context("invalid deposit txid")?;

    let raw = fs::read_to_string(&cmd.utxos)
        .with_context(|| format!("failed to read {}", cmd.utxos.display()))?;
    let candidates: Vec<UtxoWithCheckpoint> =
        serde_json::from_str(&raw).context("invalid candidate UTXO file")?;
    info!(%txid, candidates = candidates.len(), "generating pegin proofs");

    let data = service
        .generate_proof(&cmd.eth_address, txid, &candidates)
        .await?;
    let output = serde_json::to_string_pretty(&ProofOutput::from(data))?;

    match cmd.output {
        Some(path) => fs::write(&path, output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{output}"),
    }
    Ok(())
}
