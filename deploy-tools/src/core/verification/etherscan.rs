// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use serde::Deserialize;

use super::{VerificationError, VerificationRequest, VerificationStatus};
use crate::core::config::EtherscanConfig;

/// Client for the Etherscan contract API.
#[derive(Debug)]
pub struct Etherscan {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// Envelope of every explorer response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: String,
}

impl Etherscan {
    pub fn new(config: &EtherscanConfig) -> Result<Self, VerificationError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(VerificationError::MissingApiKey)?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key,
        })
    }

    /// Submits sources. Returns the submission guid, or `None` when already verified.
    pub async fn submit(
        &self,
        request: &VerificationRequest,
    ) -> Result<Option<String>, VerificationError> {
        let mut form = request.form()?;
        form.push(("apikey", self.api_key.clone()));

        let response: ApiResponse = self
            .client
            .post(&self.api_url)
            .query(&[("chainid", request.chain_id)])
            .form(&form)
            .send()
            .await?
            .json()
            .await?;
        parse_submission(response)
    }

    /// Checks the state of a submission.
    pub async fn status(
        &self,
        chain_id: u64,
        guid: &str,
    ) -> Result<VerificationStatus, VerificationError> {
        let chain_id = chain_id.to_string();
        let response: ApiResponse = self
            .client
            .get(&self.api_url)
            .query(&[
                ("chainid", chain_id.as_str()),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;
        Ok(parse_status(response))
    }
}

pub(crate) fn parse_submission(
    response: ApiResponse,
) -> Result<Option<String>, VerificationError> {
    if response.status == "1" {
        return Ok(Some(response.result));
    }
    if is_already_verified(&response.result) {
        return Ok(None);
    }
    Err(VerificationError::Api(format!(
        "{} ({})",
        response.result, response.message
    )))
}

pub(crate) fn parse_status(response: ApiResponse) -> VerificationStatus {
    let result = response.result;
    if is_already_verified(&result) || (response.status == "1" && result.starts_with("Pass")) {
        VerificationStatus::Verified
    } else if result.starts_with("Pending") {
        VerificationStatus::Pending
    } else {
        VerificationStatus::Failed(result)
    }
}

fn is_already_verified(result: &str) -> bool {
    result.to_ascii_lowercase().contains("already verified")
}
