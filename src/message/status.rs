//! Build status categories and their default styling
//!
//! Every `message_type` maps to a room color, a notify flag, a default status text
//! and a favicon. Pull request variants share color, notify flag and icon with
//! their plain counterpart but carry their own status text.

use std::fmt;
use std::str::FromStr;

/// Build status category (`message_type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Pending,
    Started,
    Succeeded,
    Failed,
    Aborted,
    PrPending,
    PrStarted,
    PrSucceeded,
    PrFailed,
    PrAborted,
}

/// Defaults a status category contributes to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDefaults {
    pub color: &'static str,
    pub notify: bool,
    pub status_text: &'static str,
    pub icon: &'static str,
}

impl MessageType {
    pub const ALL: [MessageType; 10] = [
        MessageType::Pending,
        MessageType::Started,
        MessageType::Succeeded,
        MessageType::Failed,
        MessageType::Aborted,
        MessageType::PrPending,
        MessageType::PrStarted,
        MessageType::PrSucceeded,
        MessageType::PrFailed,
        MessageType::PrAborted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Pending => "pending",
            MessageType::Started => "started",
            MessageType::Succeeded => "succeeded",
            MessageType::Failed => "failed",
            MessageType::Aborted => "aborted",
            MessageType::PrPending => "pr_pending",
            MessageType::PrStarted => "pr_started",
            MessageType::PrSucceeded => "pr_succeeded",
            MessageType::PrFailed => "pr_failed",
            MessageType::PrAborted => "pr_aborted",
        }
    }

    /// Favicon name: the category with any `pr_` prefix stripped
    pub fn icon(&self) -> &'static str {
        let name = self.as_str();
        name.strip_prefix("pr_").unwrap_or(name)
    }

    pub fn defaults(&self) -> StatusDefaults {
        let (color, notify, status_text) = match self {
            MessageType::Pending => ("gray", false, "Build Pending"),
            MessageType::Started => ("yellow", false, "Build Started"),
            MessageType::Succeeded => ("green", false, "Build Successful"),
            MessageType::Failed => ("red", true, "Build Failed!"),
            MessageType::Aborted => ("purple", false, "Build Aborted"),
            MessageType::PrPending => ("gray", false, "Pull Request Build Pending"),
            MessageType::PrStarted => ("yellow", false, "Pull Request Build Started"),
            MessageType::PrSucceeded => ("green", false, "Pull Request Build Successful"),
            MessageType::PrFailed => ("red", true, "Pull Request Build Failed!"),
            MessageType::PrAborted => ("purple", false, "Pull Request Build Aborted"),
        };
        StatusDefaults {
            color,
            notify,
            status_text,
            icon: self.icon(),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unsupported `message_type` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessageType(pub String);

impl fmt::Display for UnknownMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported value for 'message_type': {}", self.0)
    }
}

impl std::error::Error for UnknownMessageType {}

impl FromStr for MessageType {
    type Err = UnknownMessageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownMessageType(s.to_string()))
    }
}
