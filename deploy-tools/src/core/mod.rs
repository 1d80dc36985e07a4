// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

pub mod artifact;
pub mod config;
pub mod deployment;
pub mod factory;
pub mod gas_report;
pub mod network;
pub mod price;
pub mod verification;
