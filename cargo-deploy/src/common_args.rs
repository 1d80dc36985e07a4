// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use std::{fs, path::PathBuf};

use alloy::signers::local::{LocalSigner, PrivateKeySigner};
use deploy_tools::core::{
    config::{ConfigError, ProjectConfig, FILENAME},
    network::{parse_private_key, Network, NetworkError},
};
use eyre::{bail, eyre, Context};

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Path to the project configuration
    #[arg(long, global = true, default_value = FILENAME)]
    pub config: PathBuf,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<ProjectConfig, ConfigError> {
        ProjectConfig::load(&self.config)
    }
}

#[derive(Debug, clap::Args)]
pub struct NetworkArgs {
    /// Network from the project configuration (defaults to `default_network`)
    #[arg(short, long)]
    pub network: Option<String>,
}

impl NetworkArgs {
    pub fn resolve(&self, config: &ProjectConfig) -> Result<Network, NetworkError> {
        Network::resolve(config, self.network.as_deref())
    }
}

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
}

impl AuthArgs {
    /// Signer overriding the network's configured accounts, if any was given.
    pub fn signer(&self) -> eyre::Result<Option<PrivateKeySigner>> {
        if let Some(key) = &self.private_key {
            if key.is_empty() {
                bail!("empty private key");
            }
            let signer = parse_private_key(key).ok_or(eyre!("invalid private key"))?;
            return Ok(Some(signer));
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            let signer =
                parse_private_key(&key).ok_or(eyre!("invalid private key in key file"))?;
            return Ok(Some(signer));
        }

        let Some(keystore) = &self.keystore_path else {
            return Ok(None);
        };
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))?;
        let signer = LocalSigner::decrypt_keystore(keystore, password.trim_end())
            .wrap_err("could not decrypt keystore")?;
        Ok(Some(signer))
    }
}

#[derive(Debug, clap::Args)]
pub struct ConstructorArgs {
    /// The constructor arguments.
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    pub constructor_args: Vec<String>,
}
