// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Source verification on Etherscan-compatible block explorers.

use std::time::Duration;

use alloy::primitives::Address;

use crate::core::{
    artifact::{Artifact, ArtifactError, BuildInfo},
    config::EtherscanConfig,
};

pub use etherscan::Etherscan;

pub mod etherscan;

/// Etherscan multichain API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.etherscan.io/v2/api";

/// Delay between verification status checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Status checks before giving up.
pub const MAX_POLLS: usize = 20;

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("explorer request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no etherscan api key configured")]
    MissingApiKey,
    #[error("no contract code at {0}")]
    NoCode(Address),
    #[error("explorer rejected the request: {0}")]
    Api(String),
    #[error("verification of {address} failed: {reason}")]
    Rejected { address: Address, reason: String },
    #[error("verification of {address} still pending after {attempts} checks")]
    Timeout { address: Address, attempts: usize },
}

/// Outcome of a verification status check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Verified,
    Failed(String),
}

/// A contract source submission.
#[derive(Clone, Debug)]
pub struct VerificationRequest {
    pub chain_id: u64,
    pub address: Address,
    /// `<source name>:<contract name>`
    pub contract_name: String,
    /// Long compiler version, e.g. `v0.8.12+commit.f00d7308`.
    pub compiler_version: String,
    /// Solidity standard JSON input.
    pub source: serde_json::Value,
    /// ABI-encoded constructor arguments.
    pub constructor_args: Vec<u8>,
}

impl VerificationRequest {
    pub fn new(
        chain_id: u64,
        address: Address,
        artifact: &Artifact,
        build_info: BuildInfo,
        constructor_args: Vec<u8>,
    ) -> Self {
        Self {
            chain_id,
            address,
            contract_name: artifact.fully_qualified_name(),
            compiler_version: format!("v{}", build_info.solc_long_version),
            source: build_info.input,
            constructor_args,
        }
    }

    /// Form fields for the `verifysourcecode` action, without the api key.
    pub fn form(&self) -> Result<Vec<(&'static str, String)>, VerificationError> {
        Ok(vec![
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("contractaddress", self.address.to_string()),
            ("sourceCode", serde_json::to_string(&self.source)?),
            ("codeformat", "solidity-standard-json-input".to_string()),
            ("contractname", self.contract_name.clone()),
            ("compilerversion", self.compiler_version.clone()),
            // Misspelled in the explorer API.
            ("constructorArguements", hex::encode(&self.constructor_args)),
        ])
    }
}

/// Submits a contract for verification and waits for the explorer's verdict.
pub async fn verify(
    config: &EtherscanConfig,
    request: &VerificationRequest,
) -> Result<(), VerificationError> {
    let explorer = Etherscan::new(config)?;
    let Some(guid) = explorer.submit(request).await? else {
        info!(@grey, "contract {} is already verified", request.address);
        return Ok(());
    };
    debug!(@grey, "verification submitted with guid {guid}");

    for _ in 0..MAX_POLLS {
        tokio::time::sleep(POLL_INTERVAL).await;
        match explorer.status(request.chain_id, &guid).await? {
            VerificationStatus::Pending => debug!(@grey, "verification pending"),
            VerificationStatus::Verified => return Ok(()),
            VerificationStatus::Failed(reason) => {
                return Err(VerificationError::Rejected {
                    address: request.address,
                    reason,
                })
            }
        }
    }
    Err(VerificationError::Timeout {
        address: request.address,
        attempts: MAX_POLLS,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_form() {
        let request = VerificationRequest {
            chain_id: 4,
            address: Address::repeat_byte(0xab),
            contract_name: "contracts/SolDisc.sol:SolDisc".to_string(),
            compiler_version: "v0.8.12+commit.f00d7308".to_string(),
            source: json!({ "language": "Solidity" }),
            constructor_args: vec![0, 1],
        };
        let form = request.form().unwrap();
        let field = |name: &str| {
            form.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.clone())
                .unwrap()
        };

        assert_eq!(field("action"), "verifysourcecode");
        assert_eq!(field("contractname"), "contracts/SolDisc.sol:SolDisc");
        assert_eq!(field("compilerversion"), "v0.8.12+commit.f00d7308");
        assert_eq!(field("sourceCode"), r#"{"language":"Solidity"}"#);
        assert_eq!(field("constructorArguements"), "0001");
        assert!(field("contractaddress").starts_with("0x"));
    }
}
