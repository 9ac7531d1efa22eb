// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The communications gateway trait.
//!
//! Application code depends on [`CommsGateway`], never on a concrete
//! provider, so the hosted backend can be swapped or mocked in tests.

use async_trait::async_trait;

use crate::error::SendaError;
use crate::traits::adapter::Adapter;
use crate::types::{
    BindingReceipt, ChatMessage, DeviceBinding, NotificationReceipt, NotificationRequest,
    RemoteChannel, RemoteMember, RemoteUser, RoomEvent, RoomParticipant, TokenGrant, UserRef,
};

/// Gateway to a hosted chat/video/push-notification provider.
///
/// Every operation is a stateless `&self` call. The only idempotence
/// guarantee is in the `ensure_*` operations and `provision_identity`:
/// fetch-or-create with a conflict re-fetch, so concurrent calls for
/// the same key converge on one resource.
#[async_trait]
pub trait CommsGateway: Adapter {
    /// Looks up the remote chat user for `user`'s identity, creating it
    /// when the provider confirms it is absent. Any failure other than
    /// "confirmed absent" propagates.
    async fn provision_identity(&self, user: &UserRef) -> Result<RemoteUser, SendaError>;

    /// Issues a signed, time-boxed token granting chat-service access to
    /// `user`'s identity. Local construction, no network call.
    fn issue_chat_token(&self, user: &UserRef) -> Result<TokenGrant, SendaError>;

    /// Issues a signed, time-boxed token granting access to a single
    /// video room. Local construction, no network call.
    fn issue_video_token(&self, user: &UserRef, room: &str) -> Result<TokenGrant, SendaError>;

    /// Posts the templated greeting into an existing channel. A missing
    /// channel propagates as [`SendaError::NotFound`]; nothing is
    /// auto-created here.
    async fn send_welcome_message(
        &self,
        channel_sid: &str,
        from: &str,
        receiver: &UserRef,
    ) -> Result<ChatMessage, SendaError>;

    /// Returns whether `identity` is a member of `channel`.
    ///
    /// `Ok(false)` means the provider confirmed the membership is
    /// absent; an unreachable provider or any other failure is `Err(_)`,
    /// never a guessed `false`.
    async fn member_exists(&self, identity: &str, channel: &str) -> Result<bool, SendaError>;

    /// Fetch-or-create for a channel membership.
    async fn ensure_member(
        &self,
        identity: &str,
        channel: &str,
    ) -> Result<RemoteMember, SendaError>;

    /// Fetch-or-create for a channel, keyed by its unique name. The
    /// unique name doubles as the display name on creation.
    async fn ensure_channel(&self, unique_name: &str) -> Result<RemoteChannel, SendaError>;

    /// Sends a push notification to every identity in the request,
    /// attaching per-platform payloads built from the shared data map.
    async fn dispatch_notification(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationReceipt, SendaError>;

    /// Registers a device binding with the notification service.
    async fn register_binding(
        &self,
        binding: &DeviceBinding,
    ) -> Result<BindingReceipt, SendaError>;

    /// Interprets a video-room status callback. Only the combination
    /// "participant connected" + "participant-connected event" triggers
    /// a roster fetch, whose result is awaited and returned; every other
    /// combination is a no-op returning `None`.
    async fn handle_room_event(
        &self,
        event: &RoomEvent,
    ) -> Result<Option<Vec<RoomParticipant>>, SendaError>;
}
