// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use alloy::{primitives::Address, providers::Provider};
use deploy_tools::ops;

use crate::{
    common_args::{ConfigArgs, ConstructorArgs, NetworkArgs},
    error::CargoDeployResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contract to verify, by name or fully qualified
    contract: String,
    /// Address the contract was deployed to
    #[arg(long)]
    address: Address,

    #[command(flatten)]
    constructor: ConstructorArgs,
    #[command(flatten)]
    network: NetworkArgs,
}

pub async fn exec(args: Args, config: &ConfigArgs) -> CargoDeployResult {
    let config = config.load()?;
    let network = args.network.resolve(&config)?;
    let provider = network.connect().await?;
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(deploy_tools::Error::from)?;
    network.check_chain_id(chain_id)?;

    ops::verify(
        &config,
        &args.contract,
        args.address,
        &args.constructor.constructor_args,
        &provider,
    )
    .await?;
    Ok(())
}
