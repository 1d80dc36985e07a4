// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use alloy::primitives::{utils::parse_ether, U256};
use deploy_tools::{ops, utils::convert_gwei_to_wei};
use eyre::Context;

use crate::{
    common_args::{AuthArgs, ConfigArgs, ConstructorArgs, NetworkArgs},
    error::CargoDeployResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contract to deploy, by name (`SolDisc`) or fully qualified (`contracts/SolDisc.sol:SolDisc`)
    contract: String,
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,
    /// The amount of Ether sent to the contract through the constructor.
    #[arg(long, value_parser = parse_ether, default_value = "0")]
    constructor_value: U256,
    /// Blocks to wait for after the deployment is mined. Overrides the network setting.
    #[arg(long)]
    confirmations: Option<u64>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<f64>,

    #[command(flatten)]
    constructor: ConstructorArgs,
    /// Wallet source to use instead of the network's accounts.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    network: NetworkArgs,
}

pub async fn exec(args: Args, config: &ConfigArgs) -> CargoDeployResult {
    let config = config.load()?;
    let network = args.network.resolve(&config)?;

    let mut deployment = ops::deployment_config(&config, &network);
    deployment.constructor_args = args.constructor.constructor_args;
    deployment.constructor_value = args.constructor_value;
    deployment.estimate_gas = args.estimate_gas;
    deployment.max_fee_per_gas_wei = args
        .max_fee_per_gas_gwei
        .map(convert_gwei_to_wei)
        .transpose()
        .wrap_err("invalid --max-fee-per-gas-gwei")?;
    if let Some(confirmations) = args.confirmations {
        deployment.confirmations = confirmations;
    }

    let signer = args.auth.signer()?;
    let provider = network.connect_with_wallet(signer).await?;
    ops::deploy(&config, &network, &args.contract, &deployment, &provider).await?;
    Ok(())
}
