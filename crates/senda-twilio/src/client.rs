// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Twilio Chat, Notify and Video REST APIs.
//!
//! Provides [`RestClient`], the single seam every provider call goes
//! through: Basic-auth'd requests, form-encoded bodies, and uniform
//! response classification. A 404 becomes [`SendaError::NotFound`], any
//! other non-2xx response becomes [`SendaError::Api`] with the parsed
//! vendor error body, and failures without a response become
//! [`SendaError::Transport`]. No retries happen here; timeout and retry
//! policy belong to the HTTP client and the vendor.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use senda_core::SendaError;

use crate::types::{
    ApiErrorBody, BindingResource, ChannelResource, MemberResource, MessageResource,
    NotificationResource, ParticipantPage, ParticipantResource, ServiceResource, UserResource,
};

/// HTTP client for Twilio REST communication.
#[derive(Debug)]
pub struct RestClient {
    http: reqwest::Client,
    api_key: String,
    api_secret: SecretString,
    chat_base: String,
    notify_base: String,
    video_base: String,
    chat_service: String,
    notify_service: String,
}

/// Construction parameters for [`RestClient`], resolved from validated
/// configuration by the gateway.
pub struct RestClientParams {
    pub api_key: String,
    pub api_secret: SecretString,
    pub chat_base: String,
    pub notify_base: String,
    pub video_base: String,
    pub chat_service: String,
    pub notify_service: String,
    pub request_timeout: Duration,
}

impl RestClient {
    pub fn new(params: RestClientParams) -> Result<Self, SendaError> {
        let http = reqwest::Client::builder()
            .timeout(params.request_timeout)
            .build()
            .map_err(|e| SendaError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: params.api_key,
            api_secret: params.api_secret,
            chat_base: params.chat_base,
            notify_base: params.notify_base,
            video_base: params.video_base,
            chat_service: params.chat_service,
            notify_service: params.notify_service,
        })
    }

    fn chat_url(&self, suffix: &str) -> String {
        format!("{}/Services/{}{}", self.chat_base, self.chat_service, suffix)
    }

    fn notify_url(&self, suffix: &str) -> String {
        format!(
            "{}/Services/{}{}",
            self.notify_base, self.notify_service, suffix
        )
    }

    /// Fetch a chat user by identity.
    pub async fn fetch_user(&self, identity: &str) -> Result<UserResource, SendaError> {
        let url = self.chat_url(&format!("/Users/{identity}"));
        self.get(&url, "user", identity).await
    }

    /// Create a chat user with the given identity.
    pub async fn create_user(&self, identity: &str) -> Result<UserResource, SendaError> {
        let url = self.chat_url("/Users");
        let form = [("Identity", identity.to_string())];
        self.post(&url, &form, "user", identity).await
    }

    /// Fetch a channel by unique name (or sid).
    pub async fn fetch_channel(&self, unique_name: &str) -> Result<ChannelResource, SendaError> {
        let url = self.chat_url(&format!("/Channels/{unique_name}"));
        self.get(&url, "channel", unique_name).await
    }

    /// Create a private channel whose unique name doubles as its
    /// display name.
    pub async fn create_channel(&self, unique_name: &str) -> Result<ChannelResource, SendaError> {
        let url = self.chat_url("/Channels");
        let form = [
            ("FriendlyName", unique_name.to_string()),
            ("UniqueName", unique_name.to_string()),
            ("Type", "private".to_string()),
        ];
        self.post(&url, &form, "channel", unique_name).await
    }

    /// Fetch a channel membership by identity.
    pub async fn fetch_member(
        &self,
        channel: &str,
        identity: &str,
    ) -> Result<MemberResource, SendaError> {
        let url = self.chat_url(&format!("/Channels/{channel}/Members/{identity}"));
        self.get(&url, "member", identity).await
    }

    /// Add an identity to a channel.
    pub async fn create_member(
        &self,
        channel: &str,
        identity: &str,
    ) -> Result<MemberResource, SendaError> {
        let url = self.chat_url(&format!("/Channels/{channel}/Members"));
        let form = [("Identity", identity.to_string())];
        self.post(&url, &form, "member", identity).await
    }

    /// Post a message into a channel.
    pub async fn create_message(
        &self,
        channel: &str,
        body: &str,
        from: &str,
    ) -> Result<MessageResource, SendaError> {
        let url = self.chat_url(&format!("/Channels/{channel}/Messages"));
        let form = [("Body", body.to_string()), ("From", from.to_string())];
        self.post(&url, &form, "channel", channel).await
    }

    /// Fetch the configured chat service resource. Used by health checks.
    pub async fn fetch_chat_service(&self) -> Result<ServiceResource, SendaError> {
        let url = format!("{}/Services/{}", self.chat_base, self.chat_service);
        self.get(&url, "service", &self.chat_service).await
    }

    /// Create a notification on the notify service.
    pub async fn create_notification(
        &self,
        form: &[(&str, String)],
    ) -> Result<NotificationResource, SendaError> {
        let url = self.notify_url("/Notifications");
        self.post(&url, form, "notification", "dispatch").await
    }

    /// Register a device binding on the notify service.
    pub async fn create_binding(
        &self,
        form: &[(&str, String)],
    ) -> Result<BindingResource, SendaError> {
        let url = self.notify_url("/Bindings");
        self.post(&url, form, "binding", "register").await
    }

    /// List the participants of a video room.
    pub async fn list_room_participants(
        &self,
        room_sid: &str,
    ) -> Result<Vec<ParticipantResource>, SendaError> {
        let url = format!("{}/Rooms/{room_sid}/Participants", self.video_base);
        let page: ParticipantPage = self.get(&url, "room", room_sid).await?;
        Ok(page.participants)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: &'static str,
        key: &str,
    ) -> Result<T, SendaError> {
        let request = self.http.get(url);
        self.execute(request, resource, key).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        form: &[(&str, String)],
        resource: &'static str,
        key: &str,
    ) -> Result<T, SendaError> {
        let request = self.http.post(url).form(form);
        self.execute(request, resource, key).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        resource: &'static str,
        key: &str,
    ) -> Result<T, SendaError> {
        let response = request
            .basic_auth(&self.api_key, Some(self.api_secret.expose_secret()))
            .send()
            .await
            .map_err(|e| SendaError::Transport {
                message: format!("request for {resource} `{key}` failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, resource, key, "provider response received");

        if status == StatusCode::NOT_FOUND {
            return Err(SendaError::NotFound {
                resource,
                key: key.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| SendaError::Transport {
            message: format!("failed to read {resource} response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(classify_api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| SendaError::Transport {
            message: format!("failed to decode {resource} response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

/// Map a non-2xx, non-404 response to [`SendaError::Api`], preferring
/// the vendor's structured error body over the raw text.
fn classify_api_error(status: StatusCode, body: &str) -> SendaError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => SendaError::Api {
            status: status.as_u16(),
            code: parsed.code,
            message: parsed.message.unwrap_or_else(|| body.to_string()),
        },
        Err(_) => SendaError::Api {
            status: status.as_u16(),
            code: None,
            message: body.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base: &str) -> RestClient {
        RestClient::new(RestClientParams {
            api_key: "SK123".into(),
            api_secret: SecretString::from("secret".to_string()),
            chat_base: base.to_string(),
            notify_base: base.to_string(),
            video_base: base.to_string(),
            chat_service: "IS111".into(),
            notify_service: "IS222".into(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_user_sends_basic_auth() {
        let server = MockServer::start().await;
        let expected = format!("Basic {}", BASE64.encode("SK123:secret"));

        Mock::given(method("GET"))
            .and(path("/Services/IS111/Users/ana@example.com"))
            .and(header("authorization", expected.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sid": "US1",
                "identity": "ana@example.com"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let user = client.fetch_user("ana@example.com").await.unwrap();
        assert_eq!(user.sid, "US1");
        assert_eq!(user.identity, "ana@example.com");
    }

    #[tokio::test]
    async fn missing_resource_classifies_as_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Services/IS111/Channels/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": 20404,
                "message": "The requested resource was not found",
                "status": 404
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.fetch_channel("nope").await.unwrap_err();
        match err {
            SendaError::NotFound { resource, key } => {
                assert_eq!(resource, "channel");
                assert_eq!(key, "nope");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn vendor_error_body_classifies_as_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Services/IS111/Users/ana@example.com"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": 20003,
                "message": "Authentication Error - invalid username",
                "status": 401
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.fetch_user("ana@example.com").await.unwrap_err();
        match err {
            SendaError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 401);
                assert_eq!(code, Some(20003));
                assert!(message.contains("Authentication Error"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_error_body_keeps_raw_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Services/IS111"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.fetch_chat_service().await.unwrap_err();
        match err {
            SendaError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 503);
                assert_eq!(code, None);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_success_body_is_a_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Services/IS111/Users/ana@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.fetch_user("ana@example.com").await.unwrap_err();
        assert!(matches!(err, SendaError::Transport { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn create_channel_posts_name_and_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/Services/IS111/Channels"))
            .and(body_string_contains("UniqueName=support-general"))
            .and(body_string_contains("FriendlyName=support-general"))
            .and(body_string_contains("Type=private"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sid": "CH1",
                "unique_name": "support-general",
                "friendly_name": "support-general"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let channel = client.create_channel("support-general").await.unwrap();
        assert_eq!(channel.sid, "CH1");
    }

    #[tokio::test]
    async fn list_room_participants_unwraps_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Rooms/RM123/Participants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "participants": [
                    {"sid": "PA1", "identity": "ana@example.com", "status": "connected"},
                    {"sid": "PA2", "identity": "luis@example.com", "status": "connected"}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let roster = client.list_room_participants("RM123").await.unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].sid, "PA1");
    }
}
