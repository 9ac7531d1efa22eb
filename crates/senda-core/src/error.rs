// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Senda communications gateway.

use thiserror::Error;

/// The primary error type returned by every gateway operation.
///
/// Provider failures are classified once, at the HTTP seam: a vendor 404
/// becomes [`SendaError::NotFound`] ("confirmed absent"), every other
/// vendor response becomes [`SendaError::Api`], and failures that never
/// produced a vendor response become [`SendaError::Transport`]. Callers
/// can therefore distinguish "does not exist yet" from "could not
/// determine" without inspecting strings.
#[derive(Debug, Error)]
pub enum SendaError {
    /// Configuration errors (missing credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The provider confirmed the resource does not exist (HTTP 404).
    #[error("{resource} `{key}` not found")]
    NotFound {
        /// Resource kind, e.g. "user", "channel", "member".
        resource: &'static str,
        /// The key the lookup used (identity, unique name, room sid).
        key: String,
    },

    /// The provider answered with a non-404 error response.
    #[error("provider returned {status}: {message}")]
    Api {
        /// HTTP status of the response.
        status: u16,
        /// Vendor error code from the response body, when present.
        code: Option<i64>,
        /// Vendor error message, or the raw body if it did not parse.
        message: String,
    },

    /// The request never produced a provider response (connect failure,
    /// timeout, or an unreadable/undecodable body).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Local access-token construction or signing failed.
    #[error("token error: {0}")]
    Token(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SendaError {
    /// True when the error is a confirmed "resource does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, SendaError::NotFound { .. })
    }

    /// True when the provider reported a conflict with an existing
    /// resource (HTTP 409), the signature of a lost create race.
    pub fn is_conflict(&self) -> bool {
        matches!(self, SendaError::Api { status: 409, .. })
    }
}
