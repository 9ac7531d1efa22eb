// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Provider credentials have no defaults, so their absence must surface
//! here, at startup, rather than on the first provider call. All errors
//! are collected before returning.

use crate::diagnostic::ConfigError;
use crate::model::SendaConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &SendaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let required = [
        ("twilio.account_sid", &config.twilio.account_sid),
        ("twilio.api_key", &config.twilio.api_key),
        ("twilio.api_secret", &config.twilio.api_secret),
        ("twilio.chat_service_sid", &config.twilio.chat_service_sid),
        ("twilio.notify_service_sid", &config.twilio.notify_service_sid),
    ];
    for (key, value) in required {
        match value {
            None => errors.push(ConfigError::MissingKey {
                key: key.to_string(),
            }),
            Some(v) if v.trim().is_empty() => errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            }),
            Some(_) => {}
        }
    }

    if config.twilio.token_ttl_secs < 60 {
        errors.push(ConfigError::Validation {
            message: format!(
                "twilio.token_ttl_secs must be at least 60, got {}",
                config.twilio.token_ttl_secs
            ),
        });
    }

    if config.twilio.request_timeout_secs < 1 {
        errors.push(ConfigError::Validation {
            message: "twilio.request_timeout_secs must be at least 1".to_string(),
        });
    }

    let base_urls = [
        ("twilio.chat_base_url", &config.twilio.chat_base_url),
        ("twilio.notify_base_url", &config.twilio.notify_base_url),
        ("twilio.video_base_url", &config.twilio.video_base_url),
    ];
    for (key, url) in base_urls {
        if !url.starts_with("https://") && !url.starts_with("http://") {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be an http(s) URL, got `{url}`"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join("/"),
                config.agent.log_level
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> SendaConfig {
        let mut config = SendaConfig::default();
        config.twilio.account_sid = Some("AC0123456789".into());
        config.twilio.api_key = Some("SK0123456789".into());
        config.twilio.api_secret = Some("secret".into());
        config.twilio.chat_service_sid = Some("IS0123456789".into());
        config.twilio.notify_service_sid = Some("IS9876543210".into());
        config
    }

    #[test]
    fn complete_config_validates() {
        assert!(validate_config(&complete_config()).is_ok());
    }

    #[test]
    fn default_config_is_missing_all_credentials() {
        let errors = validate_config(&SendaConfig::default()).unwrap_err();
        let missing = errors
            .iter()
            .filter(|e| matches!(e, ConfigError::MissingKey { .. }))
            .count();
        assert_eq!(missing, 5);
    }

    #[test]
    fn empty_api_secret_fails_validation() {
        let mut config = complete_config();
        config.twilio.api_secret = Some("   ".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("api_secret")
        )));
    }

    #[test]
    fn short_token_ttl_fails_validation() {
        let mut config = complete_config();
        config.twilio.token_ttl_secs = 5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("token_ttl_secs")
        )));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = complete_config();
        config.twilio.chat_base_url = "ftp://chat.example.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("chat_base_url")
        )));
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = complete_config();
        config.agent.log_level = "verbose".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn all_errors_are_collected_not_just_the_first() {
        let mut config = SendaConfig::default();
        config.twilio.token_ttl_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        // 5 missing credentials + 1 ttl error.
        assert_eq!(errors.len(), 6);
    }
}
