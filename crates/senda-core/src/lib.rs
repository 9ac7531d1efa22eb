// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Senda communications gateway.
//!
//! This crate provides the gateway trait, error type, validated inbound
//! DTOs, and the common types shared between the provider implementation
//! and application code. It performs no I/O itself.

pub mod dto;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SendaError;
pub use traits::{Adapter, CommsGateway};
pub use types::{
    BindingReceipt, BindingType, CallStatus, ChannelKind, ChatChannel, ChatMessage,
    DeviceBinding, HealthStatus, NotificationReceipt, NotificationRequest, RemoteChannel,
    RemoteMember, RemoteUser, RoomEvent, RoomParticipant, TokenGrant, UserRef, VideoCall,
};
