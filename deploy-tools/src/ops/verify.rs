// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Block explorer verification of a deployed contract.

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
};

use crate::{
    core::{
        artifact::ArtifactStore,
        config::ProjectConfig,
        factory::ContractFactory,
        verification::{self, VerificationError, VerificationRequest},
    },
    Result,
};

/// Submits the sources of `contract`, deployed at `address`, to the configured explorer.
pub async fn verify(
    config: &ProjectConfig,
    contract: &str,
    address: Address,
    constructor_args: &[String],
    provider: &impl Provider,
) -> Result<()> {
    if config.etherscan.api_key.is_none() {
        return Err(VerificationError::MissingApiKey.into());
    }

    let store = ArtifactStore::new(config.artifacts_dir());
    let factory = ContractFactory::get(&store, contract)?;
    let build_info = store.build_info(factory.artifact())?;
    if !config.has_compiler(&build_info.solc_version) {
        warn!(@yellow, "{} was compiled with solc {}, which is not a configured compiler", factory.name(), build_info.solc_version);
    }
    let encoded_args = factory.encode_constructor_args(constructor_args, U256::ZERO)?;

    let code = provider.get_code_at(address).await?;
    if code.is_empty() {
        return Err(VerificationError::NoCode(address).into());
    }
    let chain_id = provider.get_chain_id().await?;

    let request = VerificationRequest::new(
        chain_id,
        address,
        factory.artifact(),
        build_info,
        encoded_args,
    );
    info!(@grey, "verifying {} at {}", request.contract_name, address);
    verification::verify(&config.etherscan, &request).await?;
    mintln!("{} verified at {}", factory.name(), address);
    Ok(())
}
