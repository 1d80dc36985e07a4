// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Deployment cost reporting.

use std::fmt;

use alloy::primitives::{utils::format_ether, U256};

use crate::{
    core::{config::GasReporterConfig, deployment::DeployedContract, price},
    utils::convert_gwei_to_wei,
};

/// Cost of a single deployment.
#[derive(Clone, Debug)]
pub struct GasReport {
    pub contract: String,
    pub gas_used: u64,
    pub gas_price_wei: u128,
    pub token: String,
    pub currency: String,
    pub token_price: Option<f64>,
}

impl GasReport {
    /// Prices the deployment at the configured gas price, or at the price actually paid.
    pub fn new(config: &GasReporterConfig, deployed: &DeployedContract) -> Self {
        let gas_price_wei = config
            .gas_price
            .and_then(|gwei| convert_gwei_to_wei(gwei).ok())
            .unwrap_or(deployed.effective_gas_price);
        Self {
            contract: deployed.name.clone(),
            gas_used: deployed.gas_used,
            gas_price_wei,
            token: config.token.clone(),
            currency: config.currency.clone(),
            token_price: None,
        }
    }

    pub fn with_token_price(mut self, price: f64) -> Self {
        self.token_price = Some(price);
        self
    }

    pub fn cost_wei(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.gas_price_wei)
    }

    pub fn cost_in_token(&self) -> f64 {
        self.gas_used as f64 * self.gas_price_wei as f64 / 1e18
    }

    pub fn cost_in_currency(&self) -> Option<f64> {
        self.token_price.map(|price| self.cost_in_token() * price)
    }

    pub fn gas_price_gwei(&self) -> f64 {
        self.gas_price_wei as f64 / 1e9
    }
}

impl fmt::Display for GasReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fiat = match self.cost_in_currency() {
            Some(cost) => format!("{cost:.2} {}", self.currency),
            None => "-".to_string(),
        };
        writeln!(
            f,
            "{:<24} {:>12} {:>12} {:>22} {:>14}",
            "Contract",
            "Gas",
            "Gwei",
            self.token,
            self.currency
        )?;
        write!(
            f,
            "{:<24} {:>12} {:>12} {:>22} {:>14}",
            self.contract,
            self.gas_used,
            format!("{:.2}", self.gas_price_gwei()),
            format_ether(self.cost_wei()),
            fiat
        )
    }
}

/// Builds the report, looking up the token price when an API key is configured.
///
/// A failed price lookup only drops the fiat column.
pub async fn report(config: &GasReporterConfig, deployed: &DeployedContract) -> GasReport {
    let report = GasReport::new(config, deployed);
    let Some(api_key) = &config.coinmarketcap else {
        return report;
    };
    match price::fetch_token_price(api_key, &config.token, &config.currency).await {
        Ok(price) => report.with_token_price(price),
        Err(err) => {
            warn!(@yellow, "could not fetch {} price: {err}", config.token);
            report
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, TxHash};

    use super::*;

    fn deployed() -> DeployedContract {
        DeployedContract {
            name: "SolDisc".to_string(),
            address: Address::ZERO,
            tx_hash: TxHash::ZERO,
            gas_used: 1_000_000,
            effective_gas_price: 2_000_000_000,
        }
    }

    #[test]
    fn configured_gas_price() {
        let config = GasReporterConfig {
            enabled: true,
            gas_price: Some(100.0),
            ..Default::default()
        };
        let report = GasReport::new(&config, &deployed());
        assert_eq!(report.gas_price_wei, 100_000_000_000);
        assert_eq!(report.cost_wei(), U256::from(100_000_000_000_000_000u128));
        assert!((report.cost_in_token() - 0.1).abs() < 1e-12);
        assert_eq!(report.cost_in_currency(), None);

        let report = report.with_token_price(2000.0);
        assert!((report.cost_in_currency().unwrap() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_effective_gas_price() {
        let report = GasReport::new(&GasReporterConfig::default(), &deployed());
        assert_eq!(report.gas_price_wei, 2_000_000_000);
        assert!((report.gas_price_gwei() - 2.0).abs() < 1e-12);
        assert!((report.cost_in_token() - 0.002).abs() < 1e-12);
    }

    #[test]
    fn renders_table() {
        let config = GasReporterConfig {
            gas_price: Some(100.0),
            ..Default::default()
        };
        let text = GasReport::new(&config, &deployed())
            .with_token_price(2000.0)
            .to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Contract"));
        assert!(lines[1].starts_with("SolDisc"));
        assert!(lines[1].contains("1000000"));
        assert!(lines[1].contains("100.00"));
        assert!(lines[1].contains("200.00 USD"));
    }
}
