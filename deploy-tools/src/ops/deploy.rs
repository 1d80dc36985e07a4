// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Contract deployment.

use alloy::providers::{Provider, WalletProvider};

use crate::{
    core::{
        artifact::ArtifactStore,
        config::ProjectConfig,
        deployment::{self, DeploymentConfig, DeploymentOutcome},
        factory::ContractFactory,
        gas_report,
        network::Network,
    },
    utils::{color::Color, format_fee, format_gas},
    Result,
};

/// Deployment settings taken from the project and network configuration.
pub fn deployment_config(config: &ProjectConfig, network: &Network) -> DeploymentConfig {
    DeploymentConfig {
        confirmations: network.confirmations,
        timeout: config.test.timeout(),
        allow_unlimited_contract_size: network.allow_unlimited_contract_size,
        ..Default::default()
    }
}

/// Deploys a contract and prints `<name> deployed to: <address>`.
pub async fn deploy(
    config: &ProjectConfig,
    network: &Network,
    contract: &str,
    deployment: &DeploymentConfig,
    provider: &(impl Provider + WalletProvider),
) -> Result<DeploymentOutcome> {
    let store = ArtifactStore::new(config.artifacts_dir());
    let factory = ContractFactory::get(&store, contract)?;
    info!(@grey, "deploying {} to network {}", factory.name(), network.name.lavender());

    let outcome = deployment::deploy(&factory, deployment, provider).await?;
    match &outcome {
        DeploymentOutcome::Estimated(estimate) => {
            greyln!("deployment gas: {}", format_gas(estimate.gas));
            greyln!("gas price: {} wei", estimate.gas_price);
            greyln!("deployment fee: {}", format_fee(estimate.fee()));
            greyln!("predicted address: {}", estimate.predicted_address);
        }
        DeploymentOutcome::Deployed(deployed) => {
            println!("{} deployed to: {}", deployed.name, deployed.address);
            if config.gas_reporter.enabled {
                let report = gas_report::report(&config.gas_reporter, deployed).await;
                println!("{report}");
            }
        }
    }
    Ok(outcome)
}
