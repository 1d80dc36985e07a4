// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Project configuration, read from a `Deploy.toml` file.
//!
//! String values may reference environment variables with `${NAME}` or `${NAME:-default}`.
//! A `.env` file next to the configuration is loaded before interpolation.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Deserializer, Serialize};

pub use network::{NetworkConfig, LOCAL_ENDPOINT, LOCAL_NETWORK, LOCAL_PRIVATE_KEY};

pub mod env;
pub mod network;

/// Filename of the project configuration.
pub const FILENAME: &str = "Deploy.toml";

/// Placeholder printed instead of secrets.
pub const REDACTED: &str = "<redacted>";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),
    #[error("toml write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("failed to load .env file: {0}")]
    Dotenv(#[source] dotenvy::Error),

    #[error("missing {}", .0.display())]
    Missing(PathBuf),
    #[error("environment variable {0} is not set")]
    MissingVar(String),
    #[error("invalid environment variable name: {0:?}")]
    InvalidVarName(String),
    #[error("unterminated variable reference in {0:?}")]
    UnterminatedVar(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Contents of a `Deploy.toml` file.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Network used when none is given on the command line.
    #[serde(default = "default_network")]
    pub default_network: String,
    #[serde(default)]
    pub solidity: SolidityConfig,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
    #[serde(default)]
    pub test: TestConfig,
    #[serde(default)]
    pub etherscan: EtherscanConfig,
    #[serde(default)]
    pub gas_reporter: GasReporterConfig,
    #[serde(default)]
    pub paths: PathsConfig,

    /// Directory containing the configuration file.
    #[serde(skip)]
    root: PathBuf,
}

fn default_network() -> String {
    LOCAL_NETWORK.to_string()
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SolidityConfig {
    #[serde(default)]
    pub compilers: Vec<CompilerConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CompilerConfig {
    pub version: String,
    #[serde(default)]
    pub settings: CompilerSettings,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CompilerSettings {
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_runs")]
    pub runs: u32,
}

fn default_runs() -> u32 {
    200
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            runs: default_runs(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TestConfig {
    /// Milliseconds to wait for transactions, `0` waits forever.
    #[serde(default)]
    pub timeout: u64,
}

impl TestConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_millis(self.timeout))
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EtherscanConfig {
    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    crate::core::verification::DEFAULT_API_URL.to_string()
}

impl Default for EtherscanConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GasReporterConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Gas price in gwei. The transaction's effective price is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<f64>,
    /// CoinMarketCap API key for fiat prices.
    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub coinmarketcap: Option<String>,
    /// Symbol of the chain's native token.
    #[serde(default = "default_token")]
    pub token: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_token() -> String {
    "ETH".to_string()
}

impl Default for GasReporterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            currency: default_currency(),
            gas_price: None,
            coinmarketcap: None,
            token: default_token(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_artifacts")]
    pub artifacts: PathBuf,
}

fn default_artifacts() -> PathBuf {
    "artifacts".into()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            artifacts: default_artifacts(),
        }
    }
}

impl ProjectConfig {
    /// Reads the configuration at `path`, loading `.env` from the same directory first.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        env::hydrate(&root)?;
        let contents = fs::read_to_string(path)?;
        debug!(@grey, "read configuration from {}", path.display());
        Self::parse(&contents, root, |name| std::env::var(name).ok())
    }

    /// Parses configuration text, resolving variables with `lookup`.
    pub fn parse(
        contents: &str,
        root: impl Into<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut value: toml::Value = toml::from_str(contents)?;
        env::interpolate_value(&mut value, &lookup)?;

        let mut config: ProjectConfig = value.try_into()?;
        config.root = root.into();
        for network in config.networks.values_mut() {
            network.accounts.retain(|key| !key.trim().is_empty());
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for compiler in &self.solidity.compilers {
            if !is_version(&compiler.version) {
                return Err(ConfigError::Invalid(format!(
                    "compiler version {:?} is not of the form x.y.z",
                    compiler.version
                )));
            }
            let optimizer = &compiler.settings.optimizer;
            if optimizer.enabled && optimizer.runs == 0 {
                return Err(ConfigError::Invalid(format!(
                    "compiler {}: optimizer runs must be at least 1",
                    compiler.version
                )));
            }
        }

        for (name, network) in &self.networks {
            network.validate(name).map_err(ConfigError::Invalid)?;
        }
        if self.default_network != LOCAL_NETWORK
            && !self.networks.contains_key(&self.default_network)
        {
            return Err(ConfigError::Invalid(format!(
                "default network {} is not configured",
                self.default_network
            )));
        }

        let currency = &self.gas_reporter.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid(format!(
                "gas reporter currency {currency:?} is not a 3-letter code"
            )));
        }
        if let Some(gas_price) = self.gas_reporter.gas_price {
            if !gas_price.is_finite() || gas_price < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "gas reporter gas price {gas_price} is not a valid gwei amount"
                )));
            }
        }
        Ok(())
    }

    /// Directory containing the configuration file.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding compiled contract artifacts.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.root.join(&self.paths.artifacts)
    }

    /// Network configuration by name. The local network is always available.
    pub fn network(&self, name: &str) -> Option<NetworkConfig> {
        match self.networks.get(name) {
            Some(network) => Some(network.clone()),
            None if name == LOCAL_NETWORK => Some(NetworkConfig::default()),
            None => None,
        }
    }

    /// Names of every network that can be selected.
    pub fn network_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.networks.keys().cloned().collect();
        if !self.networks.contains_key(LOCAL_NETWORK) {
            names.insert(0, LOCAL_NETWORK.to_string());
        }
        names
    }

    /// Whether `version` is one of the configured compilers.
    pub fn has_compiler(&self, version: &str) -> bool {
        self.solidity.compilers.iter().any(|c| c.version == version)
    }

    /// Copy of the configuration with keys and endpoint paths masked.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        for network in config.networks.values_mut() {
            *network = network.redacted();
        }
        if config.etherscan.api_key.is_some() {
            config.etherscan.api_key = Some(REDACTED.to_string());
        }
        if config.gas_reporter.coinmarketcap.is_some() {
            config.gas_reporter.coinmarketcap = Some(REDACTED.to_string());
        }
        config
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn is_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

/// Deserializes an optional string, mapping an empty (or blank) value to `None`.
fn non_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
