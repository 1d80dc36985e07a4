// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Contract code sizes against the EIP-170 and EIP-3860 limits.

use bytesize::ByteSize;

use crate::{
    core::{
        artifact::ArtifactStore,
        config::ProjectConfig,
        factory::{CodeSize, ContractFactory, MAX_CODE_SIZE, MAX_INITCODE_SIZE},
    },
    utils::{
        color::{Color, RESET},
        format_file_size,
    },
    Result,
};

/// Code sizes of the named contracts, or of every deployable contract when `names` is empty.
pub fn contract_sizes(config: &ProjectConfig, names: &[String]) -> Result<Vec<(String, CodeSize)>> {
    let store = ArtifactStore::new(config.artifacts_dir());
    let artifacts = if names.is_empty() {
        store.all()?
    } else {
        names
            .iter()
            .map(|name| store.read(name))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut sizes = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let factory = ContractFactory::new(artifact)?;
        let size = factory.code_size(factory.bytecode())?;
        sizes.push((factory.artifact().fully_qualified_name(), size));
    }
    Ok(sizes)
}

pub fn print_sizes(config: &ProjectConfig, names: &[String]) -> Result<()> {
    let sizes = contract_sizes(config, names)?;
    if sizes.is_empty() {
        greyln!("no deployable contracts in {}", config.artifacts_dir().display());
        return Ok(());
    }

    for (name, size) in sizes {
        let runtime = format_file_size(
            ByteSize(size.runtime as u64),
            ByteSize((MAX_CODE_SIZE * 3 / 4) as u64),
            ByteSize(MAX_CODE_SIZE as u64),
        );
        let initcode = format_file_size(
            ByteSize(size.initcode as u64),
            ByteSize((MAX_INITCODE_SIZE * 3 / 4) as u64),
            ByteSize(MAX_INITCODE_SIZE as u64),
        );
        println!("{}", name.lavender());
        println!("  runtime:  {runtime}{RESET}");
        println!("  initcode: {initcode}{RESET}");
    }
    Ok(())
}
