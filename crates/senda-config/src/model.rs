// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Senda communications gateway.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Senda configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Provider credentials have no defaults; their
/// absence is a startup error, never a first-call error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SendaConfig {
    /// Platform identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Twilio account credentials and service identifiers.
    #[serde(default)]
    pub twilio: TwilioConfig,
}

/// Platform identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Platform display name, used as the default notification title.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "Senda".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Twilio account configuration.
///
/// The five credential/service fields are required: validation fails at
/// startup when any is `None` or empty.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TwilioConfig {
    /// Account sid (`AC...`). Required.
    #[serde(default)]
    pub account_sid: Option<String>,

    /// API key sid (`SK...`) used for REST auth and token signing. Required.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API key secret. Required. Never logged.
    #[serde(default)]
    pub api_secret: Option<String>,

    /// Programmable Chat service sid (`IS...`). Required.
    #[serde(default)]
    pub chat_service_sid: Option<String>,

    /// Notify service sid (`IS...`). Required.
    #[serde(default)]
    pub notify_service_sid: Option<String>,

    /// Push credential sid attached to chat grants, when configured.
    #[serde(default)]
    pub push_credential_sid: Option<String>,

    /// Lifetime of issued access tokens, in seconds.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,

    /// Per-request timeout for provider calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Programmable Chat base URL. Overridable for tests and regional endpoints.
    #[serde(default = "default_chat_base_url")]
    pub chat_base_url: String,

    /// Notify base URL.
    #[serde(default = "default_notify_base_url")]
    pub notify_base_url: String,

    /// Video base URL.
    #[serde(default = "default_video_base_url")]
    pub video_base_url: String,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            api_key: None,
            api_secret: None,
            chat_service_sid: None,
            notify_service_sid: None,
            push_credential_sid: None,
            token_ttl_secs: default_token_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            chat_base_url: default_chat_base_url(),
            notify_base_url: default_notify_base_url(),
            video_base_url: default_video_base_url(),
        }
    }
}

// The signing secret must never reach logs, so Debug is hand-written to
// redact it.
impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("api_key", &self.api_key)
            .field(
                "api_secret",
                &self.api_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("chat_service_sid", &self.chat_service_sid)
            .field("notify_service_sid", &self.notify_service_sid)
            .field("push_credential_sid", &self.push_credential_sid)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("chat_base_url", &self.chat_base_url)
            .field("notify_base_url", &self.notify_base_url)
            .field("video_base_url", &self.video_base_url)
            .finish()
    }
}

fn default_token_ttl_secs() -> u64 {
    3600
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_chat_base_url() -> String {
    "https://chat.twilio.com/v2".to_string()
}

fn default_notify_base_url() -> String {
    "https://notify.twilio.com/v1".to_string()
}

fn default_video_base_url() -> String {
    "https://video.twilio.com/v1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production_endpoints() {
        let config = SendaConfig::default();
        assert_eq!(config.twilio.chat_base_url, "https://chat.twilio.com/v2");
        assert_eq!(config.twilio.notify_base_url, "https://notify.twilio.com/v1");
        assert_eq!(config.twilio.video_base_url, "https://video.twilio.com/v1");
        assert_eq!(config.twilio.token_ttl_secs, 3600);
        assert!(config.twilio.account_sid.is_none());
    }

    #[test]
    fn unknown_twilio_key_is_rejected() {
        let toml_str = r#"
[twilio]
acount_sid = "AC123"
"#;
        assert!(toml::from_str::<SendaConfig>(toml_str).is_err());
    }

    #[test]
    fn debug_output_redacts_api_secret() {
        let config = TwilioConfig {
            api_secret: Some("super-secret".into()),
            ..TwilioConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
