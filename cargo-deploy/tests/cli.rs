// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

const COUNTER_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "SolDisc",
  "sourceName": "contracts/SolDisc.sol",
  "abi": [],
  "bytecode": "0x600a600c600039600a6000f3602a60005260206000f3",
  "deployedBytecode": "0x602a60005260206000f3",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

const CONFIG: &str = r#"
[[solidity.compilers]]
version = "0.8.12"
[solidity.compilers.settings.optimizer]
enabled = true
runs = 100000

[networks.hardhat]
allow_unlimited_contract_size = true

[networks.offline]
url = "http://127.0.0.1:9/${OFFLINE_PROJECT_ID:-project}"
accounts = ["0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"]

[etherscan]
api_key = "etherscan-secret"

[gas_reporter]
enabled = true
currency = "USD"
gas_price = 100
"#;

fn project(config: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Deploy.toml"), config).unwrap();
    let artifacts = dir.path().join("artifacts/contracts/SolDisc.sol");
    fs::create_dir_all(&artifacts).unwrap();
    fs::write(artifacts.join("SolDisc.json"), COUNTER_ARTIFACT).unwrap();
    dir
}

fn cargo_deploy(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cargo-deploy").unwrap();
    cmd.current_dir(dir).arg("deploy");
    cmd
}

#[test]
fn networks_lists_configured_networks() {
    let dir = project(CONFIG);
    cargo_deploy(dir.path())
        .arg("networks")
        .assert()
        .success()
        .stdout(predicate::str::contains("hardhat"))
        .stdout(predicate::str::contains("offline"))
        .stdout(predicate::str::contains("http://127.0.0.1:8545"))
        .stdout(predicate::str::contains("project").not());
}

#[test]
fn config_redacts_secrets() {
    let dir = project(CONFIG);
    cargo_deploy(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.8.12"))
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("etherscan-secret").not())
        .stdout(predicate::str::contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80").not());
}

#[test]
fn size_reports_contracts() {
    let dir = project(CONFIG);
    cargo_deploy(dir.path())
        .arg("size")
        .assert()
        .success()
        .stdout(predicate::str::contains("contracts/SolDisc.sol:SolDisc"))
        .stdout(predicate::str::contains("(10 bytes)"))
        .stdout(predicate::str::contains("(22 bytes)"));
}

#[test]
fn deploy_without_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    cargo_deploy(dir.path())
        .args(["deploy", "SolDisc"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("Deploy.toml"));
}

#[test]
fn deploy_to_unknown_network_fails() {
    let dir = project(CONFIG);
    cargo_deploy(dir.path())
        .args(["deploy", "SolDisc", "--network", "mainnet"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown network"));
}

#[test]
fn deploy_to_unreachable_node_fails() {
    let dir = project(CONFIG);
    cargo_deploy(dir.path())
        .args(["deploy", "SolDisc", "--network", "offline"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("deployed to").not())
        .stderr(predicate::str::contains("error"));
}

#[test]
fn missing_environment_variable_fails() {
    let dir = project(
        r#"
        [networks.rinkeby]
        url = "${CARGO_DEPLOY_TEST_UNSET_PROVIDER}"
        "#,
    );
    cargo_deploy(dir.path())
        .args(["deploy", "SolDisc", "--network", "rinkeby"])
        .env_remove("CARGO_DEPLOY_TEST_UNSET_PROVIDER")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("CARGO_DEPLOY_TEST_UNSET_PROVIDER"));
}

#[test]
fn explicit_config_path() {
    let dir = project(CONFIG);
    let other = tempfile::tempdir().unwrap();
    cargo_deploy(other.path())
        .args(["networks", "--config"])
        .arg(dir.path().join("Deploy.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("offline"));
}

#[test]
fn config_flag_before_subcommand() {
    let dir = project(CONFIG);
    let other = tempfile::tempdir().unwrap();
    cargo_deploy(other.path())
        .arg("--config")
        .arg(dir.path().join("Deploy.toml"))
        .arg("networks")
        .assert()
        .success()
        .stdout(predicate::str::contains("offline"));
}

#[test]
fn usage_errors_exit_one() {
    let dir = project(CONFIG);
    cargo_deploy(dir.path())
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("required arguments"));
    cargo_deploy(dir.path())
        .args(["networks", "--no-such-flag"])
        .assert()
        .code(1);
}

#[test]
fn help_exits_zero() {
    let dir = project(CONFIG);
    cargo_deploy(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"));
}

#[test]
fn demo_config_loads_without_secrets() {
    let dir = project(include_str!("../../demos/soldisc/Deploy.toml"));
    let unset = ["PROVIDER_RINKEBY", "PRIVATE_KEY", "ETHERSCAN_KEY", "COINMARKETCAP_KEY"];

    let mut networks = cargo_deploy(dir.path());
    for name in unset {
        networks.env_remove(name);
    }
    networks
        .arg("networks")
        .assert()
        .success()
        .stdout(predicate::str::contains("hardhat"))
        .stdout(predicate::str::contains("http://127.0.0.1:8545"));

    let mut deploy = cargo_deploy(dir.path());
    for name in unset {
        deploy.env_remove(name);
    }
    deploy
        .args(["deploy", "SolDisc", "--network", "rinkeby"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("network rinkeby has no url"));
}
