// file: src/cli/mod.rs
// version: 1.0.0
// guid: 2a9d64e7-0b83-4f15-ac62-79d1e8c450b6

//! Command line interface for the hardening agent

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
