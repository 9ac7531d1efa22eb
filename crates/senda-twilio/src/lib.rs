// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Twilio provider gateway for the Senda platform.
//!
//! Implements [`CommsGateway`] against Twilio's hosted Chat, Notify and
//! Video APIs: identity provisioning, access-token issuance, channel and
//! membership provisioning, push-notification dispatch, device binding
//! registration, and room-webhook interpretation. Each operation is a
//! stateless request/response translation; the only state is the
//! configuration captured at construction.

pub mod client;
pub mod token;
pub mod types;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use senda_config::SendaConfig;
use senda_core::error::SendaError;
use senda_core::traits::{Adapter, CommsGateway};
use senda_core::types::{
    BindingReceipt, ChatMessage, DeviceBinding, HealthStatus, NotificationReceipt,
    NotificationRequest, RemoteChannel, RemoteMember, RemoteUser, RoomEvent, RoomParticipant,
    TokenGrant, UserRef,
};

use crate::client::{RestClient, RestClientParams};
use crate::token::TokenSigner;

/// Android notification channel attached to FCM payloads.
const FCM_CHANNEL_ID: &str = "fcm_default_channel";

/// Gateway to Twilio's hosted communications APIs.
///
/// Construct once from validated configuration and share; every
/// operation takes `&self` and holds no mutable state.
#[derive(Debug)]
pub struct TwilioGateway {
    client: RestClient,
    signer: TokenSigner,
    default_title: String,
}

impl TwilioGateway {
    /// Creates a gateway from the given configuration.
    ///
    /// All five Twilio credentials/service sids must be present; a
    /// missing one is a [`SendaError::Config`] here, at construction,
    /// never an error on first use.
    pub fn new(config: &SendaConfig) -> Result<Self, SendaError> {
        let twilio = &config.twilio;
        let account_sid = required(&twilio.account_sid, "twilio.account_sid")?;
        let api_key = required(&twilio.api_key, "twilio.api_key")?;
        let api_secret = required(&twilio.api_secret, "twilio.api_secret")?;
        let chat_service = required(&twilio.chat_service_sid, "twilio.chat_service_sid")?;
        let notify_service = required(&twilio.notify_service_sid, "twilio.notify_service_sid")?;

        let client = RestClient::new(RestClientParams {
            api_key: api_key.clone(),
            api_secret: SecretString::from(api_secret.clone()),
            chat_base: twilio.chat_base_url.clone(),
            notify_base: twilio.notify_base_url.clone(),
            video_base: twilio.video_base_url.clone(),
            chat_service: chat_service.clone(),
            notify_service,
            request_timeout: Duration::from_secs(twilio.request_timeout_secs),
        })?;

        let signer = TokenSigner::new(
            account_sid,
            api_key,
            SecretString::from(api_secret),
            chat_service.clone(),
            twilio.push_credential_sid.clone(),
            twilio.token_ttl_secs,
        );

        info!(chat_service = %chat_service, "Twilio gateway initialized");

        Ok(Self {
            client,
            signer,
            default_title: config.agent.name.clone(),
        })
    }

    /// The greeting posted by [`CommsGateway::send_welcome_message`].
    fn welcome_body(receiver: &UserRef) -> String {
        format!(
            "Hola {}, te damos la bienvenida a Senda. ¿Te podemos ayudar en algo?",
            receiver.name
        )
    }
}

fn required(value: &Option<String>, key: &'static str) -> Result<String, SendaError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(SendaError::Config(format!("{key} is required"))),
    }
}

/// Fetch-or-create for a provider resource.
///
/// Fetches first; a confirmed 404 triggers the create. When the create
/// itself loses a concurrent race and the provider answers 409 Conflict,
/// the resource exists now, so a re-fetch returns the winner's resource
/// instead of surfacing an error or creating a duplicate.
async fn ensure<T, FFut, CFut>(
    fetch: impl Fn() -> FFut,
    create: impl FnOnce() -> CFut,
) -> Result<T, SendaError>
where
    FFut: Future<Output = Result<T, SendaError>>,
    CFut: Future<Output = Result<T, SendaError>>,
{
    match fetch().await {
        Err(err) if err.is_not_found() => {}
        other => return other,
    }

    match create().await {
        Err(err) if err.is_conflict() => {
            debug!("create lost a concurrent race, re-fetching");
            fetch().await
        }
        other => other,
    }
}

/// Build the shared data map and the two platform payloads for a push
/// notification: the caller's data map merged with the body and title,
/// plus the Android channel id on the FCM side.
fn platform_payloads(
    body: &str,
    title: &str,
    data: Option<&Value>,
) -> (Map<String, Value>, Value, Value) {
    let mut merged = match data {
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            warn!("notification data is not a JSON object, ignoring it");
            Map::new()
        }
        None => Map::new(),
    };
    merged.insert("notification_body".into(), Value::String(body.to_string()));
    merged.insert("notification_title".into(), Value::String(title.to_string()));

    let apn = Value::Object(merged.clone());
    let mut fcm = merged.clone();
    fcm.insert("channel_id".into(), Value::String(FCM_CHANNEL_ID.into()));

    (merged, apn, Value::Object(fcm))
}

#[async_trait]
impl Adapter for TwilioGateway {
    fn name(&self) -> &str {
        "twilio"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, SendaError> {
        match self.client.fetch_chat_service().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "chat service unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), SendaError> {
        debug!("Twilio gateway shutting down");
        Ok(())
    }
}

#[async_trait]
impl CommsGateway for TwilioGateway {
    async fn provision_identity(&self, user: &UserRef) -> Result<RemoteUser, SendaError> {
        let identity = user.email.as_str();
        let resource = ensure(
            || self.client.fetch_user(identity),
            || {
                info!(identity, "chat user absent, creating");
                self.client.create_user(identity)
            },
        )
        .await?;
        Ok(resource.into())
    }

    fn issue_chat_token(&self, user: &UserRef) -> Result<TokenGrant, SendaError> {
        let token = self.signer.chat_token(&user.email)?;
        Ok(TokenGrant {
            token,
            user_name: user.display_name(),
        })
    }

    fn issue_video_token(&self, user: &UserRef, room: &str) -> Result<TokenGrant, SendaError> {
        let token = self.signer.video_token(&user.email, room)?;
        Ok(TokenGrant {
            token,
            user_name: user.display_name(),
        })
    }

    async fn send_welcome_message(
        &self,
        channel_sid: &str,
        from: &str,
        receiver: &UserRef,
    ) -> Result<ChatMessage, SendaError> {
        let body = Self::welcome_body(receiver);
        let resource = self.client.create_message(channel_sid, &body, from).await?;
        debug!(channel = channel_sid, "welcome message posted");
        Ok(resource.into())
    }

    async fn member_exists(&self, identity: &str, channel: &str) -> Result<bool, SendaError> {
        match self.client.fetch_member(channel, identity).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn ensure_member(
        &self,
        identity: &str,
        channel: &str,
    ) -> Result<RemoteMember, SendaError> {
        let resource = ensure(
            || self.client.fetch_member(channel, identity),
            || {
                info!(identity, channel, "membership absent, creating");
                self.client.create_member(channel, identity)
            },
        )
        .await?;
        Ok(resource.into())
    }

    async fn ensure_channel(&self, unique_name: &str) -> Result<RemoteChannel, SendaError> {
        let resource = ensure(
            || self.client.fetch_channel(unique_name),
            || {
                info!(unique_name, "channel absent, creating");
                self.client.create_channel(unique_name)
            },
        )
        .await?;
        Ok(resource.into())
    }

    async fn dispatch_notification(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationReceipt, SendaError> {
        let title = request
            .title
            .clone()
            .unwrap_or_else(|| self.default_title.clone());
        let (data, apn, fcm) = platform_payloads(&request.body, &title, request.data.as_ref());

        let mut form: Vec<(&str, String)> = request
            .identities
            .iter()
            .map(|identity| ("Identity", identity.clone()))
            .collect();
        form.push(("Body", request.body.clone()));
        form.push(("Title", title));
        form.push(("Data", Value::Object(data).to_string()));
        form.push(("Apn", apn.to_string()));
        form.push(("Fcm", fcm.to_string()));

        let resource = self.client.create_notification(&form).await?;
        info!(
            recipients = request.identities.len(),
            sid = %resource.sid,
            "notification dispatched"
        );
        Ok(resource.into())
    }

    async fn register_binding(
        &self,
        binding: &DeviceBinding,
    ) -> Result<BindingReceipt, SendaError> {
        let form = [
            ("Identity", binding.identity.clone()),
            ("BindingType", binding.binding_type.to_string()),
            ("Address", binding.address.clone()),
        ];
        let resource = self.client.create_binding(&form).await?;
        debug!(identity = %binding.identity, "device binding registered");
        Ok(resource.into())
    }

    async fn handle_room_event(
        &self,
        event: &RoomEvent,
    ) -> Result<Option<Vec<RoomParticipant>>, SendaError> {
        let connected = event.participant_status.as_deref() == Some("connected")
            && event.status_callback_event.as_deref() == Some("participant-connected");
        if !connected {
            debug!(room = %event.room_sid, "room event ignored");
            return Ok(None);
        }

        let participants = self.client.list_room_participants(&event.room_sid).await?;
        info!(
            room = %event.room_sid,
            count = participants.len(),
            "participant connected, roster fetched"
        );
        Ok(Some(participants.into_iter().map(Into::into).collect()))
    }
}
