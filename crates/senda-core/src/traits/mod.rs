// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for provider integrations.
//!
//! The [`Adapter`] base trait carries identity and lifecycle; the
//! [`CommsGateway`] trait carries the gateway operations. Both use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod comms;

pub use adapter::Adapter;
pub use comms::CommsGateway;
