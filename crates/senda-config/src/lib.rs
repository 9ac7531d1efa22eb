// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Senda communications gateway.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment
//! variable overrides, and miette diagnostic rendering with typo
//! suggestions. Provider credentials are validated here, at startup:
//! a missing Twilio credential can never surface as a first-call error.
//!
//! # Usage
//!
//! ```no_run
//! use senda_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("platform: {}", config.agent.name);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AgentConfig, SendaConfig, TwilioConfig};
pub use validation::validate_config;

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the startup entry point:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation (required
///    credentials, ranges, URLs)
/// 3. On Figment error: converts to miette diagnostics with typo
///    suggestions
pub fn load_and_validate() -> Result<SendaConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<SendaConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string("senda.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("senda.toml").display().to_string())
            .unwrap_or_else(|_| "senda.toml".to_string());
        sources.push((path, content));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("senda/senda.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    let system_path = std::path::Path::new("/etc/senda/senda.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
