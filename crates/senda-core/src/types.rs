// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the gateway trait and its implementations.
//!
//! Persisted records ([`VideoCall`], [`ChatChannel`]) are passive data:
//! they are owned and mutated by application code, and the gateway only
//! reads the fields it needs to build provider requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A caller-supplied user reference. The stable external identity used
/// with the provider is the email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub email: String,
    pub name: String,
    pub last_name: String,
}

impl UserRef {
    /// Display name in the `"{name} {last_name}"` form returned
    /// alongside issued tokens.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

/// Lifecycle status of a video call.
///
/// Transitions are driven entirely by application code; the gateway
/// neither enforces nor observes them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    Started,
    InProgress,
    Ended,
    Rejected,
    NotAnswered,
}

impl CallStatus {
    /// True for the three terminal statuses. `VideoCall::finished_at`
    /// stays `None` until one of these is reached.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CallStatus::Ended | CallStatus::Rejected | CallStatus::NotAnswered
        )
    }
}

/// A video call record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoCall {
    pub id: i64,
    pub status: CallStatus,
    /// Provider room identifier the call takes place in.
    pub room_id: String,
    /// Set when the call reaches a terminal status, `None` before.
    pub finished_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Identities (emails) of the participating users.
    pub participants: Vec<String>,
}

/// The closed set of channel kinds the platform provisions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Therapist,
    Support,
}

/// A chat channel record. `unique_name` maps 1:1 to a provider channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChannel {
    pub id: i64,
    pub unique_name: String,
    /// Provider-assigned channel sid.
    pub channel_sid: String,
    pub kind: ChannelKind,
    pub created_at: DateTime<Utc>,
    /// Identities (emails) of the channel members.
    pub members: Vec<String>,
}

// --- Normalized provider results ---

/// A provisioned chat user on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub sid: String,
    pub identity: String,
}

/// A chat channel resource on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteChannel {
    pub sid: String,
    pub unique_name: String,
    pub friendly_name: String,
}

/// A channel membership on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMember {
    pub sid: String,
    pub identity: String,
    pub channel_sid: String,
}

/// A message posted into a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sid: String,
    pub body: String,
    pub from: String,
}

/// The provider's record of a dispatched notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub sid: String,
    pub identities: Vec<String>,
    pub title: String,
    pub body: String,
}

/// The provider's record of a registered device binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingReceipt {
    pub sid: String,
    pub identity: String,
    pub binding_type: BindingType,
    pub address: String,
}

/// A participant currently known to a video room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomParticipant {
    pub sid: String,
    pub identity: String,
    pub status: String,
}

/// An issued access token plus the display name shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenGrant {
    pub token: String,
    pub user_name: String,
}

// --- Transient request payloads ---

/// A push notification dispatch request. Exists only for the duration
/// of the dispatch call; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Recipient identities (emails).
    pub identities: Vec<String>,
    pub body: String,
    /// Defaults to the platform name when `None`.
    pub title: Option<String>,
    /// Shared data map merged into each platform payload.
    pub data: Option<serde_json::Value>,
}

impl NotificationRequest {
    pub fn new(identities: Vec<String>, body: impl Into<String>) -> Self {
        Self {
            identities,
            body: body.into(),
            title: None,
            data: None,
        }
    }
}

/// Delivery platform of a device binding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BindingType {
    Apn,
    Fcm,
}

/// A device binding registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceBinding {
    /// Identity (email) the device belongs to.
    pub identity: String,
    pub binding_type: BindingType,
    /// Platform device token the notification service delivers to.
    pub address: String,
}

/// An inbound video-room status callback event.
///
/// Field names follow the provider's PascalCase webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoomEvent {
    pub room_sid: String,
    #[serde(default)]
    pub participant_status: Option<String>,
    #[serde(default)]
    pub status_callback_event: Option<String>,
    #[serde(default)]
    pub participant_identity: Option<String>,
}

/// Health reported by a gateway health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// The provider is reachable and the configured service exists.
    Healthy,
    /// The provider could not be reached or rejected the credentials.
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn call_status_has_five_variants_and_round_trips() {
        let variants = [
            CallStatus::Started,
            CallStatus::InProgress,
            CallStatus::Ended,
            CallStatus::Rejected,
            CallStatus::NotAnswered,
        ];
        assert_eq!(variants.len(), 5);
        for v in &variants {
            let s = v.to_string();
            assert_eq!(CallStatus::from_str(&s).unwrap(), *v);
        }
        assert_eq!(CallStatus::NotAnswered.to_string(), "NOT_ANSWERED");
    }

    #[test]
    fn only_three_statuses_are_terminal() {
        assert!(!CallStatus::Started.is_terminal());
        assert!(!CallStatus::InProgress.is_terminal());
        assert!(CallStatus::Ended.is_terminal());
        assert!(CallStatus::Rejected.is_terminal());
        assert!(CallStatus::NotAnswered.is_terminal());
    }

    #[test]
    fn user_display_name_joins_name_and_last_name() {
        let user = UserRef {
            email: "ana@example.com".into(),
            name: "Ana".into(),
            last_name: "García".into(),
        };
        assert_eq!(user.display_name(), "Ana García");
    }

    #[test]
    fn room_event_deserializes_from_pascal_case() {
        let event: RoomEvent = serde_json::from_str(
            r#"{
                "RoomSid": "RM123",
                "ParticipantStatus": "connected",
                "StatusCallbackEvent": "participant-connected",
                "ParticipantIdentity": "ana@example.com"
            }"#,
        )
        .unwrap();
        assert_eq!(event.room_sid, "RM123");
        assert_eq!(event.participant_status.as_deref(), Some("connected"));
        assert_eq!(
            event.status_callback_event.as_deref(),
            Some("participant-connected")
        );
    }

    #[test]
    fn room_event_tolerates_missing_participant_fields() {
        let event: RoomEvent =
            serde_json::from_str(r#"{"RoomSid": "RM123"}"#).unwrap();
        assert!(event.participant_status.is_none());
        assert!(event.status_callback_event.is_none());
    }

    #[test]
    fn video_call_record_starts_unfinished() {
        let call = VideoCall {
            id: 1,
            status: CallStatus::Started,
            room_id: "RM123".into(),
            finished_at: None,
            created_at: Utc::now(),
            participants: vec!["ana@example.com".into(), "luis@example.com".into()],
        };
        assert!(!call.status.is_terminal());
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["status"], "STARTED");
        assert!(json["finished_at"].is_null());
    }

    #[test]
    fn chat_channel_record_round_trips() {
        let channel = ChatChannel {
            id: 3,
            unique_name: "support-general".into(),
            channel_sid: "CH7".into(),
            kind: ChannelKind::Support,
            created_at: Utc::now(),
            members: vec!["ana@example.com".into()],
        };
        let json = serde_json::to_string(&channel).unwrap();
        let parsed: ChatChannel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, ChannelKind::Support);
        assert_eq!(parsed.unique_name, "support-general");
    }

    #[test]
    fn binding_type_serializes_lowercase() {
        assert_eq!(BindingType::Apn.to_string(), "apn");
        assert_eq!(BindingType::Fcm.to_string(), "fcm");
        assert_eq!(
            serde_json::to_string(&BindingType::Fcm).unwrap(),
            r#""fcm""#
        );
    }
}
