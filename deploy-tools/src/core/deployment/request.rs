// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Contract creation transaction

use std::time::Duration;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};

use super::DeploymentError;
use crate::utils::color::DebugColor;

/// Contract creation transaction request
#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    gas_price_wei: Option<u128>,
    confirmations: u64,
    timeout: Option<Duration>,
}

impl DeploymentRequest {
    pub fn new(sender: Address, code: Bytes, value: U256) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(code)
                .with_value(value),
            gas_price_wei: None,
            confirmations: 1,
            timeout: None,
        }
    }

    /// Uses a fixed gas price instead of asking the node.
    pub fn with_gas_price(mut self, gas_price_wei: Option<u128>) -> Self {
        self.gas_price_wei = gas_price_wei;
        self
    }

    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn value(&self) -> U256 {
        self.tx.value.unwrap_or_default()
    }

    pub async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, DeploymentError> {
        provider
            .estimate_gas(self.tx.clone())
            .await
            .map_err(DeploymentError::GasEstimation)
    }

    pub async fn gas_price(&self, provider: &impl Provider) -> Result<u128, DeploymentError> {
        match self.gas_price_wei {
            Some(wei) => Ok(wei),
            None => Ok(provider.get_gas_price().await?),
        }
    }

    /// Sends the transaction with the given gas limit and price, then waits for its receipt.
    pub async fn exec(
        self,
        gas: u64,
        gas_price: u128,
        provider: &impl Provider,
    ) -> Result<TransactionReceipt, DeploymentError> {
        let mut tx = self.tx;
        tx.gas = Some(gas);
        tx.gas_price = Some(gas_price);

        let pending = provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .with_timeout(self.timeout)
            .get_receipt()
            .await
            .map_err(|source| DeploymentError::FailedToComplete { tx_hash, source })?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted { tx_hash });
        }

        Ok(receipt)
    }
}
