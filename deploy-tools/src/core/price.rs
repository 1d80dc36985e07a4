// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Token prices from the CoinMarketCap quotes API.

use std::time::Duration;

use serde_json::Value;

pub const COINMARKETCAP_ENDPOINT: &str =
    "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest";

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("price request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("price api error: {0}")]
    Api(String),
    #[error("no {token} quote in {currency}")]
    MissingQuote { token: String, currency: String },
}

/// Fetches the latest price of `token` in `currency`.
pub async fn fetch_token_price(
    api_key: &str,
    token: &str,
    currency: &str,
) -> Result<f64, PriceError> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let body: Value = client
        .get(COINMARKETCAP_ENDPOINT)
        .header(API_KEY_HEADER, api_key)
        .query(&[("symbol", token), ("convert", currency)])
        .send()
        .await?
        .json()
        .await?;
    parse_quote(&body, token, currency)
}

/// Extracts `data.<token>.quote.<currency>.price` from a quotes response.
pub(crate) fn parse_quote(body: &Value, token: &str, currency: &str) -> Result<f64, PriceError> {
    if let Some(code) = body.pointer("/status/error_code").and_then(Value::as_i64) {
        if code != 0 {
            let message = body
                .pointer("/status/error_message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(PriceError::Api(format!("{message} (code {code})")));
        }
    }

    let mut entry = body.pointer(&format!("/data/{token}"));
    // Some API versions list every coin sharing a symbol.
    if let Some(Value::Array(entries)) = entry {
        entry = entries.first();
    }
    entry
        .and_then(|entry| entry.pointer(&format!("/quote/{currency}/price")))
        .and_then(Value::as_f64)
        .ok_or_else(|| PriceError::MissingQuote {
            token: token.to_string(),
            currency: currency.to_string(),
        })
}
