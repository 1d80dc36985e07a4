// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use crate::core::{
    artifact::ArtifactError, config::ConfigError, deployment::DeploymentError,
    factory::FactoryError, network::NetworkError, price::PriceError,
    verification::VerificationError,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("{0}")]
    Factory(#[from] FactoryError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
    #[error("{0}")]
    Price(#[from] PriceError),
    #[error("{0}")]
    Verification(#[from] VerificationError),
}
