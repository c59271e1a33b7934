//! # pagesnap config
//!
//! Configuration management for pagesnap: browser connection, extraction
//! tuning, style table overrides, device profiles, logging and output.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
