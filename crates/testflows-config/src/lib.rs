//! testflows configuration.
//!
//! TOML-based configuration for the webhook chat client. Every section
//! uses defaults, so an empty or partial file is valid.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use testflows_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config.webhook.session_header);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LogLevel, LoggingConfig, MessagesConfig, TestflowsConfig, WebhookConfig};

use std::path::Path;
use testflows_common::ConfigError;

/// Load config from `path`, or from the platform default when `None`.
///
/// Unlike [`toml_loader::load_from_path`], validation errors are returned.
pub fn load_config(path: Option<&Path>) -> Result<TestflowsConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}
