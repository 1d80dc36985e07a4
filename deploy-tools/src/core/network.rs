// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Resolving configured networks into RPC providers and signers.

use alloy::{
    network::EthereumWallet,
    primitives::FixedBytes,
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::{local::PrivateKeySigner, Signer},
};

use crate::{
    core::config::{ProjectConfig, LOCAL_ENDPOINT, LOCAL_NETWORK, LOCAL_PRIVATE_KEY},
    utils::{color::Color, decode0x},
};

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error("unknown network {}, expected one of: {}", .name.red(), .available.join(", "))]
    Unknown {
        name: String,
        available: Vec<String>,
    },
    #[error("network {name} has no url")]
    MissingUrl { name: String },
    #[error("network {name} has no accounts to sign with")]
    NoAccounts { name: String },
    #[error("invalid private key for network {name}: expected 32 bytes of hex")]
    InvalidKey { name: String },
    #[error("network {name} expects chain id {expected} but the node reports {actual}")]
    ChainIdMismatch {
        name: String,
        expected: u64,
        actual: u64,
    },
}

/// A network selected from the project configuration.
#[derive(Clone, Debug)]
pub struct Network {
    pub name: String,
    pub endpoint: String,
    pub chain_id: Option<u64>,
    pub allow_unlimited_contract_size: bool,
    pub confirmations: u64,
    accounts: Vec<String>,
}

impl Network {
    /// Selects a network by name, falling back to the configured default.
    pub fn resolve(config: &ProjectConfig, name: Option<&str>) -> Result<Self, NetworkError> {
        let name = name.unwrap_or(&config.default_network);
        let Some(network) = config.network(name) else {
            return Err(NetworkError::Unknown {
                name: name.to_string(),
                available: config.network_names(),
            });
        };

        let is_local = name == LOCAL_NETWORK;
        let endpoint = match network.url {
            Some(url) => url,
            None if is_local => LOCAL_ENDPOINT.to_string(),
            None => {
                return Err(NetworkError::MissingUrl {
                    name: name.to_string(),
                })
            }
        };
        let accounts = if network.accounts.is_empty() && is_local {
            vec![LOCAL_PRIVATE_KEY.to_string()]
        } else {
            network.accounts
        };

        Ok(Self {
            name: name.to_string(),
            endpoint,
            chain_id: network.chain_id,
            allow_unlimited_contract_size: network.allow_unlimited_contract_size,
            confirmations: network.confirmations.max(1),
            accounts,
        })
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Signer for the first configured account.
    pub fn signer(&self) -> Result<PrivateKeySigner, NetworkError> {
        let key = self.accounts.first().ok_or_else(|| NetworkError::NoAccounts {
            name: self.name.clone(),
        })?;
        parse_private_key(key).ok_or_else(|| NetworkError::InvalidKey {
            name: self.name.clone(),
        })
    }

    /// Read-only provider for the network's endpoint.
    pub async fn connect(&self) -> Result<impl Provider, NetworkError> {
        debug!(@grey, "connecting to {} at {}", self.name, self.endpoint);
        let provider = ProviderBuilder::new().connect(&self.endpoint).await?;
        Ok(provider)
    }

    /// Provider that signs with `signer`, or with the network's first account when `None`.
    pub async fn connect_with_wallet(
        &self,
        signer: Option<PrivateKeySigner>,
    ) -> Result<impl Provider + WalletProvider, NetworkError> {
        let provider = self.connect().await?;
        let chain_id = provider.get_chain_id().await?;
        self.check_chain_id(chain_id)?;

        let signer = match signer {
            Some(signer) => signer,
            None => self.signer()?,
        };
        let wallet = EthereumWallet::new(signer.with_chain_id(Some(chain_id)));
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&self.endpoint)
            .await?;
        Ok(provider)
    }

    /// Checks the chain id reported by the node against the configured one.
    pub fn check_chain_id(&self, actual: u64) -> Result<(), NetworkError> {
        match self.chain_id {
            Some(expected) if expected != actual => Err(NetworkError::ChainIdMismatch {
                name: self.name.clone(),
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }
}

/// Parses a hex-encoded private key, with or without `0x` prefix.
pub fn parse_private_key(key: &str) -> Option<PrivateKeySigner> {
    let bytes = decode0x(key).ok()?;
    if bytes.len() != 32 {
        return None;
    }
    let key: FixedBytes<32> = FixedBytes::from_slice(&bytes);
    PrivateKeySigner::from_bytes(&key).ok()
}
