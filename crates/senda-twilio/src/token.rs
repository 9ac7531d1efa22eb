// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local access-token construction and signing.
//!
//! Tokens are HS256 JWTs in the provider's access-token format: a
//! `twilio-fv=1` content type, the signing key sid as issuer, the
//! account sid as subject, and a `grants` object binding the caller's
//! identity to either chat-service access or a single video room.
//! Signing happens entirely locally with the API key secret; no network
//! call is involved and the secret is only exposed at the signing call.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use senda_core::SendaError;

/// Content type marking the provider's access-token format.
const TOKEN_CTY: &str = "twilio-fv=1";

/// Claims of an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Unique token id: `"{api_key}-{nonce}"`.
    pub jti: String,
    /// Issuer: the API key sid the token was signed with.
    pub iss: String,
    /// Subject: the account sid.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub grants: Grants,
}

/// The capability grants embedded in a token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Grants {
    /// The identity (email) the grants are bound to.
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatGrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoGrant>,
}

/// Grants access to the configured chat service.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatGrant {
    pub service_sid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_credential_sid: Option<String>,
}

/// Grants access to a single video room.
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoGrant {
    pub room: String,
}

/// Signs access tokens for the configured account.
#[derive(Debug)]
pub struct TokenSigner {
    account_sid: String,
    api_key: String,
    api_secret: SecretString,
    chat_service_sid: String,
    push_credential_sid: Option<String>,
    ttl_secs: u64,
}

impl TokenSigner {
    pub fn new(
        account_sid: String,
        api_key: String,
        api_secret: SecretString,
        chat_service_sid: String,
        push_credential_sid: Option<String>,
        ttl_secs: u64,
    ) -> Self {
        Self {
            account_sid,
            api_key,
            api_secret,
            chat_service_sid,
            push_credential_sid,
            ttl_secs,
        }
    }

    /// Token granting chat-service access, with the push credential
    /// attached when configured.
    pub fn chat_token(&self, identity: &str) -> Result<String, SendaError> {
        self.sign(Grants {
            identity: identity.to_string(),
            chat: Some(ChatGrant {
                service_sid: self.chat_service_sid.clone(),
                push_credential_sid: self.push_credential_sid.clone(),
            }),
            video: None,
        })
    }

    /// Token granting access scoped to a single video room.
    pub fn video_token(&self, identity: &str, room: &str) -> Result<String, SendaError> {
        self.sign(Grants {
            identity: identity.to_string(),
            chat: None,
            video: Some(VideoGrant {
                room: room.to_string(),
            }),
        })
    }

    fn sign(&self, grants: Grants) -> Result<String, SendaError> {
        let now = Utc::now();
        let claims = AccessClaims {
            jti: format!("{}-{}", self.api_key, uuid::Uuid::new_v4()),
            iss: self.api_key.clone(),
            sub: self.account_sid.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.ttl_secs as i64,
            grants,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.cty = Some(TOKEN_CTY.to_string());

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.api_secret.expose_secret().as_bytes()),
        )
        .map_err(|e| SendaError::Token(format!("failed to sign access token: {e}")))
    }
}
