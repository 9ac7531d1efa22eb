// SPDX-FileCopyrightText: 2026 Senda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validated inbound DTOs for the notification-triggering requests.

use serde::Deserialize;
use validator::Validate;

/// Request to notify a user about a new chat message.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatMessageNotificationRequest {
    #[validate(range(min = 1, message = "receiver_id must be a positive id"))]
    pub receiver_id: i64,

    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Request to notify a user about an incoming call.
#[derive(Debug, Deserialize, Validate)]
pub struct CallNotificationRequest {
    #[validate(range(min = 1, message = "receiver_id must be a positive id"))]
    pub receiver_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_request_accepts_valid_input() {
        let req = ChatMessageNotificationRequest {
            receiver_id: 7,
            text: "hola".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn chat_message_request_rejects_empty_text() {
        let req = ChatMessageNotificationRequest {
            receiver_id: 7,
            text: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("text"));
    }

    #[test]
    fn chat_message_request_rejects_zero_receiver() {
        let req = ChatMessageNotificationRequest {
            receiver_id: 0,
            text: "hola".into(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("receiver_id"));
    }

    #[test]
    fn call_request_rejects_negative_receiver() {
        let req = CallNotificationRequest { receiver_id: -1 };
        assert!(req.validate().is_err());
        assert!(CallNotificationRequest { receiver_id: 1 }.validate().is_ok());
    }

    #[test]
    fn chat_message_request_rejects_wrongly_typed_receiver() {
        let result = serde_json::from_str::<ChatMessageNotificationRequest>(
            r#"{"receiver_id": "seven", "text": "hola"}"#,
        );
        assert!(result.is_err());
    }
}
