// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Listing configured networks.

use crate::{
    core::{
        config::ProjectConfig,
        network::{Network, NetworkError},
    },
    utils::color::Color,
};

/// Every selectable network with secrets redacted, or why it cannot be used.
pub fn networks(config: &ProjectConfig) -> Vec<(String, Result<Network, NetworkError>)> {
    let redacted = config.redacted();
    redacted
        .network_names()
        .into_iter()
        .map(|name| {
            let network = Network::resolve(&redacted, Some(&name));
            (name, network)
        })
        .collect()
}

pub fn print_networks(config: &ProjectConfig) {
    for (name, network) in networks(config) {
        let marker = if name == config.default_network {
            " (default)"
        } else {
            ""
        };
        match network {
            Ok(network) => {
                let chain_id = network
                    .chain_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "any".to_string());
                println!(
                    "{}{marker}: {} chain id {} accounts {}",
                    name.lavender(),
                    network.endpoint,
                    chain_id,
                    network.account_count()
                );
            }
            Err(err) => println!("{}{marker}: {}", name.lavender(), err.red()),
        }
    }
}
