// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use eyre::{Result, WrapErr};
use reqwest::{header::HeaderValue, Method, Response};
use testcontainers::{
    core::{wait::HttpWaitStrategy, IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

pub use crate::core::config::LOCAL_PRIVATE_KEY as DEVNET_PRIVATE_KEY;

/// Chain id of Anvil development nodes.
pub const DEVNET_CHAIN_ID: u64 = 31337;

/// Name of the devnet network in generated project configurations.
pub const DEVNET_NETWORK: &str = "devnet";

const ANVIL_IMAGE_NAME: &str = "ghcr.io/foundry-rs/foundry";
const ANVIL_IMAGE_TAG: &str = "latest";
const ANVIL_PORT: u16 = 8545;

/// Manage an Anvil devnet node for deploying contracts.
pub struct Node {
    _container: ContainerAsync<GenericImage>,
    rpc: String,
}

impl Node {
    /// Starts a new Anvil node in the background.
    /// This node will be shutdown when this struct is dropped.
    pub async fn new() -> Result<Self> {
        let wait_strategy = HttpWaitStrategy::new("/")
            .with_port(ANVIL_PORT.into())
            .with_method(Method::POST)
            .with_header("Content-Type", HeaderValue::from_static("application/json"))
            .with_body(r#"{"jsonrpc":"2.0","method":"net_version","params":[],"id":1}"#)
            .with_response_matcher_async(anvil_response_matcher);
        let container = GenericImage::new(ANVIL_IMAGE_NAME, ANVIL_IMAGE_TAG)
            .with_exposed_port(ANVIL_PORT.tcp())
            .with_wait_for(WaitFor::Http(wait_strategy))
            .with_cmd(vec!["anvil --host 0.0.0.0"])
            .start()
            .await
            .wrap_err("failed to start Anvil container")?;
        let port = container
            .get_host_port_ipv4(ANVIL_PORT)
            .await
            .wrap_err("failed to get Anvil RPC port")?;
        Ok(Node {
            _container: container,
            rpc: format!("http://localhost:{port}"),
        })
    }

    /// Get the Anvil node RPC.
    pub fn rpc(&self) -> &str {
        &self.rpc
    }

    /// Create a provider signing with the funded development account.
    pub async fn create_provider(&self) -> Result<impl Provider> {
        let signer: PrivateKeySigner = DEVNET_PRIVATE_KEY
            .parse()
            .wrap_err("failed to parse devnet private key")?;
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(self.rpc())
            .await?;
        Ok(provider)
    }

    /// `Deploy.toml` contents targeting this node as the default network.
    pub fn project_config(&self) -> String {
        format!(
            r#"default_network = "{DEVNET_NETWORK}"

[networks.{DEVNET_NETWORK}]
url = "{}"
accounts = ["{DEVNET_PRIVATE_KEY}"]
chain_id = {DEVNET_CHAIN_ID}
"#,
            self.rpc
        )
    }
}

async fn anvil_response_matcher(response: Response) -> bool {
    let Ok(text) = response.text().await else {
        return false;
    };
    text.contains("result")
}
