// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-format types for the Twilio REST APIs.
//!
//! These mirror the JSON shapes the provider returns and convert into
//! the normalized types of `senda-core`. Only the fields the gateway
//! reads are modeled; everything else in the vendor payload is ignored.

use serde::Deserialize;

use senda_core::types::{
    BindingReceipt, BindingType, ChatMessage, NotificationReceipt, RemoteChannel, RemoteMember,
    RemoteUser, RoomParticipant,
};

/// A chat user resource.
#[derive(Debug, Clone, Deserialize)]
pub struct UserResource {
    pub sid: String,
    pub identity: String,
}

impl From<UserResource> for RemoteUser {
    fn from(value: UserResource) -> Self {
        RemoteUser {
            sid: value.sid,
            identity: value.identity,
        }
    }
}

/// A chat channel resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelResource {
    pub sid: String,
    #[serde(default)]
    pub unique_name: Option<String>,
    #[serde(default)]
    pub friendly_name: Option<String>,
}

impl From<ChannelResource> for RemoteChannel {
    fn from(value: ChannelResource) -> Self {
        RemoteChannel {
            sid: value.sid,
            unique_name: value.unique_name.unwrap_or_default(),
            friendly_name: value.friendly_name.unwrap_or_default(),
        }
    }
}

/// A channel member resource.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberResource {
    pub sid: String,
    pub identity: String,
    pub channel_sid: String,
}

impl From<MemberResource> for RemoteMember {
    fn from(value: MemberResource) -> Self {
        RemoteMember {
            sid: value.sid,
            identity: value.identity,
            channel_sid: value.channel_sid,
        }
    }
}

/// A channel message resource.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResource {
    pub sid: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
}

impl From<MessageResource> for ChatMessage {
    fn from(value: MessageResource) -> Self {
        ChatMessage {
            sid: value.sid,
            body: value.body.unwrap_or_default(),
            from: value.from.unwrap_or_default(),
        }
    }
}

/// A created notification resource.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationResource {
    pub sid: String,
    #[serde(default)]
    pub identities: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl From<NotificationResource> for NotificationReceipt {
    fn from(value: NotificationResource) -> Self {
        NotificationReceipt {
            sid: value.sid,
            identities: value.identities,
            title: value.title.unwrap_or_default(),
            body: value.body.unwrap_or_default(),
        }
    }
}

/// A created device binding resource.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingResource {
    pub sid: String,
    pub identity: String,
    pub binding_type: BindingType,
    pub address: String,
}

impl From<BindingResource> for BindingReceipt {
    fn from(value: BindingResource) -> Self {
        BindingReceipt {
            sid: value.sid,
            identity: value.identity,
            binding_type: value.binding_type,
            address: value.address,
        }
    }
}

/// A video room participant resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantResource {
    pub sid: String,
    pub identity: String,
    pub status: String,
}

impl From<ParticipantResource> for RoomParticipant {
    fn from(value: ParticipantResource) -> Self {
        RoomParticipant {
            sid: value.sid,
            identity: value.identity,
            status: value.status,
        }
    }
}

/// The list page returned by the room participants endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantPage {
    #[serde(default)]
    pub participants: Vec<ParticipantResource>,
}

/// A chat service resource, fetched by health checks.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceResource {
    pub sid: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
}

/// The provider's error body: `{"code": 20404, "message": "...", "status": 404}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_resource_normalizes_missing_names() {
        let channel: ChannelResource =
            serde_json::from_str(r#"{"sid": "CH1"}"#).unwrap();
        let remote: RemoteChannel = channel.into();
        assert_eq!(remote.sid, "CH1");
        assert_eq!(remote.unique_name, "");
    }

    #[test]
    fn binding_resource_parses_platform() {
        let binding: BindingResource = serde_json::from_str(
            r#"{"sid": "BS1", "identity": "ana@example.com", "binding_type": "fcm", "address": "device-token"}"#,
        )
        .unwrap();
        assert_eq!(binding.binding_type, BindingType::Fcm);
    }

    #[test]
    fn api_error_body_tolerates_partial_payloads() {
        let err: ApiErrorBody = serde_json::from_str(r#"{"message": "boom"}"#).unwrap();
        assert_eq!(err.code, None);
        assert_eq!(err.message.as_deref(), Some("boom"));
        assert_eq!(err.status, None);
    }

    #[test]
    fn participant_page_defaults_to_empty() {
        let page: ParticipantPage = serde_json::from_str(r#"{}"#).unwrap();
        assert!(page.participants.is_empty());
    }
}
