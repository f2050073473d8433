//! Shared utilities for stock-insight
//!
//! This crate provides the functionality shared by the server and CLI binaries:
//! tracing setup and process-level settings read from the environment.

pub mod config;
pub mod logging;

pub use config::{LogFormat, Settings, SettingsError};
pub use logging::init_tracing;
