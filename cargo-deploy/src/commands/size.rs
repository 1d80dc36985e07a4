// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use deploy_tools::ops;

use crate::{common_args::ConfigArgs, error::CargoDeployResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contracts to measure. Every deployable contract when empty.
    contracts: Vec<String>,

}

pub fn exec(args: Args, config: &ConfigArgs) -> CargoDeployResult {
    let config = config.load()?;
    ops::print_sizes(&config, &args.contracts)?;
    Ok(())
}
