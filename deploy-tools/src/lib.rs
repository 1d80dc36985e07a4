// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Tools for deploying compiled Solidity contracts from a `Deploy.toml` project.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod utils;

#[cfg(feature = "integration-tests")]
pub mod devnet;

pub use error::{Error, Result};
