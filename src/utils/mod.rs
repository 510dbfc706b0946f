// file: src/utils/mod.rs
// version: 1.0.0
// guid: f2b91d57-8c03-4e6a-b7d4-19a5c6e28f40

//! Utility modules for host probes and owned config fragments

pub mod files;
pub mod system;

pub use system::SystemUtils;
