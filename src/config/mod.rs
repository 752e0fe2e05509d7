//! Configuration management module
//!
//! Responsible for loading and managing application configuration from environment variables

pub mod settings;

pub use settings::{ApiKey, Settings};
