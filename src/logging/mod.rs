// file: src/logging/mod.rs
// version: 1.0.0
// guid: a94d7e12-6b3f-48c1-8d55-f20c19e8b446

//! Logging system for the hardening agent

pub mod logger;

pub use logger::init_logger;
