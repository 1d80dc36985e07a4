// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use std::time::Duration;

use alloy::{
    primitives::{Address, TxHash, U256},
    providers::{PendingTransactionError, Provider, WalletProvider},
};

use crate::{
    core::factory::{ContractFactory, FactoryError},
    utils::{
        color::{Color, DebugColor},
        format_fee, format_gas,
    },
};

pub use request::DeploymentRequest;

pub mod request;

#[derive(Debug, Default)]
pub struct DeploymentConfig {
    pub constructor_args: Vec<String>,
    pub constructor_value: U256,
    pub max_fee_per_gas_wei: Option<u128>,
    pub estimate_gas: bool,
    pub confirmations: u64,
    pub timeout: Option<Duration>,
    pub allow_unlimited_contract_size: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("{0}")]
    Factory(#[from] FactoryError),

    #[error("deployment failed during gas estimation: {0}")]
    GasEstimation(alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error(
        "not enough funds in account {} to deploy\nbalance {} < {}",
        .from_address.red(),
        .balance.red(),
        format!("{} wei", .required).red(),
    )]
    NotEnoughFunds {
        from_address: Address,
        balance: U256,
        required: U256,
    },
    #[error("deploy tx {} failed to complete: {source}", .tx_hash.debug_red())]
    FailedToComplete {
        tx_hash: TxHash,
        source: PendingTransactionError,
    },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("no contract address in receipt of {}", .tx_hash.debug_red())]
    NoContractAddress { tx_hash: TxHash },
}

/// A contract created on chain.
#[derive(Clone, Debug)]
pub struct DeployedContract {
    pub name: String,
    pub address: Address,
    pub tx_hash: TxHash,
    pub gas_used: u64,
    pub effective_gas_price: u128,
}

/// Gas estimate for a deployment that was not sent.
#[derive(Clone, Debug)]
pub struct DeploymentEstimate {
    pub name: String,
    pub gas: u64,
    pub gas_price: u128,
    pub predicted_address: Address,
}

impl DeploymentEstimate {
    pub fn fee(&self) -> U256 {
        U256::from(self.gas) * U256::from(self.gas_price)
    }
}

#[derive(Clone, Debug)]
pub enum DeploymentOutcome {
    Deployed(DeployedContract),
    Estimated(DeploymentEstimate),
}

/// Deploys a contract from its factory and waits for the deployment to be mined.
pub async fn deploy(
    factory: &ContractFactory,
    config: &DeploymentConfig,
    provider: &(impl Provider + WalletProvider),
) -> Result<DeploymentOutcome, DeploymentError> {
    let code = factory.deploy_code(&config.constructor_args, config.constructor_value)?;
    let size = factory.code_size(&code)?;
    debug!(@grey, "{} runtime code: {} bytes, init code: {} bytes", factory.name(), size.runtime, size.initcode);
    if !config.allow_unlimited_contract_size {
        size.check(factory.name())?;
    }

    let from_address = provider.default_signer_address();
    debug!(@grey, "sender address: {}", from_address.debug_lavender());

    let req = DeploymentRequest::new(from_address, code, config.constructor_value)
        .with_gas_price(config.max_fee_per_gas_wei)
        .with_confirmations(config.confirmations)
        .with_timeout(config.timeout);
    let gas = req.estimate_gas(provider).await?;
    let gas_price = req.gas_price(provider).await?;

    if config.estimate_gas {
        let nonce = provider.get_transaction_count(from_address).await?;
        return Ok(DeploymentOutcome::Estimated(DeploymentEstimate {
            name: factory.name().to_string(),
            gas,
            gas_price,
            predicted_address: from_address.create(nonce),
        }));
    }

    let required = U256::from(gas) * U256::from(gas_price) + req.value();
    let balance = provider.get_balance(from_address).await?;
    if balance < required {
        return Err(DeploymentError::NotEnoughFunds {
            from_address,
            balance,
            required,
        });
    }

    let receipt = req.exec(gas, gas_price, provider).await?;
    let tx_hash = receipt.transaction_hash;
    let address = receipt
        .contract_address
        .ok_or(DeploymentError::NoContractAddress { tx_hash })?;

    info!(@grey, "deployed code at address: {}", address.debug_lavender());
    debug!(@grey, "gas used: {}", format_gas(receipt.gas_used));
    debug!(@grey, "fee paid: {}", format_fee(U256::from(receipt.gas_used) * U256::from(receipt.effective_gas_price)));
    info!(@grey, "deployment tx hash: {}", tx_hash.debug_lavender());

    Ok(DeploymentOutcome::Deployed(DeployedContract {
        name: factory.name().to_string(),
        address,
        tx_hash,
        gas_used: receipt.gas_used,
        effective_gas_price: receipt.effective_gas_price,
    }))
}
