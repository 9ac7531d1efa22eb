// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./senda.toml` > `~/.config/senda/senda.toml` > `/etc/senda/senda.toml`
//! with environment variable overrides via `SENDA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SendaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/senda/senda.toml` (system-wide)
/// 3. `~/.config/senda/senda.toml` (user XDG config)
/// 4. `./senda.toml` (local directory)
/// 5. `SENDA_*` environment variables
pub fn load_config() -> Result<SendaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SendaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SendaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SendaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SendaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SendaConfig::default()))
        .merge(Toml::file("/etc/senda/senda.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("senda/senda.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("senda.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SENDA_TWILIO_CHAT_SERVICE_SID` must
/// map to `twilio.chat_service_sid`, not `twilio.chat.service.sid`.
fn env_provider() -> Env {
    Env::prefixed("SENDA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SENDA_TWILIO_API_KEY -> "twilio_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("twilio_", "twilio.", 1);
        mapped.into()
    })
}
