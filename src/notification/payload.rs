//! HipChat room notification payload

use serde::{Deserialize, Serialize};

use crate::config::NotifyParams;

/// Body of `POST /v2/room/<room_id>/notification`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HipChatMessage {
    pub room_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
}

impl HipChatMessage {
    pub fn new(room_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            message: message.into(),
            from: None,
            color: None,
            message_format: None,
            notify: None,
        }
    }

    /// Copy the optional fields from step params; empty strings are left out
    pub fn with_params(mut self, params: &NotifyParams) -> Self {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        self.from = non_empty(&params.from);
        self.color = non_empty(&params.color);
        self.message_format = non_empty(&params.message_format);
        self.notify = params.notify;
        self
    }
}
