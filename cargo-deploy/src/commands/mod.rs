// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use crate::{common_args::ConfigArgs, error::CargoDeployResult};

mod config;
mod deploy;
mod networks;
mod size;
mod verify;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the project configuration with secrets redacted
    Config(config::Args),
    /// Deploy a compiled contract
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// List the configured networks
    #[clap(visible_alias = "n")]
    Networks(networks::Args),
    /// Print contract code sizes against the EIP-170 and EIP-3860 limits
    Size(size::Args),
    /// Verify a deployed contract's source on the block explorer
    #[clap(visible_alias = "v")]
    Verify(verify::Args),
}

pub async fn exec(cmd: Command, config: &ConfigArgs) -> CargoDeployResult {
    match cmd {
        Command::Config(args) => config::exec(args, config),
        Command::Deploy(args) => deploy::exec(args, config).await,
        Command::Networks(args) => networks::exec(args, config),
        Command::Size(args) => size::exec(args, config),
        Command::Verify(args) => verify::exec(args, config).await,
    }
}
