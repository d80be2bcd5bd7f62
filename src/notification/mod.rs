//! Notification delivery - HipChat room notifications
//!
//! # Usage
//! ```ignore
//! use hipchat_notify::notification::{HipChatClient, HipChatConfig};
//!
//! let client = HipChatClient::new(HipChatConfig {
//!     token: "...".to_string(),
//!     room_id: "12456".to_string(),
//!     ..Default::default()
//! })?;
//! client.send(&client.message("Build Failed!")).await?;
//! ```

pub mod client;
pub mod payload;

pub use client::{HipChatClient, HipChatConfig, DEFAULT_TIMEOUT_SECS};
pub use payload::HipChatMessage;
