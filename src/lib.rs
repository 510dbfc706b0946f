// file: src/lib.rs
// version: 1.0.0
// guid: 3f8c1a2b-9d4e-4c7a-b561-208e4d97c3aa

//! Ubuntu VPS Hardening Agent
//!
//! Single-host, single-run provisioning pass that applies restrictive
//! security defaults to a fresh Ubuntu server: system update, restricted
//! admin account, root lockout, SSH daemon lockdown, firewall, brute-force
//! jailing, unattended upgrades, and kernel network tuning.
//!
//! Every step is idempotent and the pipeline is fail-fast: a partial run is
//! repaired by simply running again.

pub mod cli;
pub mod config;
pub mod error;
pub mod hardening;
pub mod logging;
pub mod shell;
pub mod utils;

pub use error::{HardenError, Result};

/// Version information for the agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
