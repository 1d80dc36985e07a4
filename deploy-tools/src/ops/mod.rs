// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

pub use deploy::{deploy, deployment_config};
pub use networks::{networks, print_networks};
pub use size::{contract_sizes, print_sizes};
pub use verify::verify;

mod deploy;
mod networks;
mod size;
mod verify;
