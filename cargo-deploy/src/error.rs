// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use std::fmt;
use std::process::ExitCode;

use deploy_tools::core::{config::ConfigError, network::NetworkError};

pub type CargoDeployResult = Result<(), CargoDeployError>;

#[derive(Debug)]
pub struct CargoDeployError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl CargoDeployError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for CargoDeployError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for CargoDeployError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<eyre::Error> for CargoDeployError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<deploy_tools::Error> for CargoDeployError {
    fn from(err: deploy_tools::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<ConfigError> for CargoDeployError {
    fn from(err: ConfigError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<NetworkError> for CargoDeployError {
    fn from(err: NetworkError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}
