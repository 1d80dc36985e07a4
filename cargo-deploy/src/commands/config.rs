// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use crate::{common_args::ConfigArgs, error::CargoDeployResult};

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_args: Args, config: &ConfigArgs) -> CargoDeployResult {
    let config = config.load()?;
    print!("{}", config.redacted().to_toml()?);
    Ok(())
}
