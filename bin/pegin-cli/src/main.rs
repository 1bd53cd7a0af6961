//! Command line tool for building pegin proofs.

mod args;
mod cmd;
mod context;

use std::process;

use anyhow::Context as _;
use strata_pegin_config::Config;

use crate::{
    args::Args,
    cmd::exec_subc,
    context::{build_service, init_logging},
};

#[tokio::main]
async fn main() {
    let args: Args = argh::from_env();
    if let Err(e) = run(args).await {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    init_logging(&config.logging)?;

    let service = build_service(&config)?;
    exec_subc(args.subc, &service).await
}
