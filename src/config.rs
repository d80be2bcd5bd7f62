//! `out` request model - the JSON Concourse writes to the resource's stdin
//!
//! ```json
//! {
//!   "source": { "hipchat_server_url": "https://api.hipchat.com", "token": "...", "room_id": 1234 },
//!   "params": { "message_type": "failed", "tokens": { "PR": "file://pr/url" } }
//! }
//! ```

use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::message::{MessageBody, SegmentConfig};
use crate::notification::client::{HipChatConfig, DEFAULT_TIMEOUT_SECS};
use crate::report::Reporter;
use crate::template::TokenMap;

/// `<server>/v2/room/<id>` form of `hipchat_server_url`
static ROOM_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"((?:http|https)://.*)/v2/room/(\d+)").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutRequest {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub params: NotifyParams,
}

/// Resource `source` configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub hipchat_server_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub room_id: Option<String>,
    #[serde(default)]
    pub skip_ssl_verification: bool,
    /// Fail the step when delivery fails (default true)
    #[serde(default)]
    pub fail_on_error: Option<bool>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl SourceConfig {
    pub fn fail_on_error(&self) -> bool {
        self.fail_on_error.unwrap_or(true)
    }
}

/// Step `params`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifyParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(default)]
    pub message_type_config: SegmentConfig,
    #[serde(default, skip_serializing_if = "TokenMap::is_empty")]
    pub tokens: TokenMap,
}

impl OutRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check required properties and work out the room to post to
    ///
    /// Every missing property is reported before the request is rejected.
    pub fn client_config(&self, reporter: &dyn Reporter) -> Result<HipChatConfig> {
        let mut valid = true;
        let mut require = |name: &str, value: Option<&str>| {
            if value.map_or(true, str::is_empty) {
                reporter.error(&format!("Please provide a value for {}", name));
                valid = false;
            }
        };

        require("hipchat_server_url", self.source.hipchat_server_url.as_deref());
        require("token", self.source.token.as_deref());
        require(
            "message",
            self.params.message.as_ref().and_then(MessageBody::text),
        );

        let mut server_url = self.source.hipchat_server_url.clone().unwrap_or_default();
        let mut room_id = self.source.room_id.clone().filter(|id| !id.is_empty());

        if room_id.is_none() {
            match split_room_url(&server_url) {
                Some((base, id)) => {
                    server_url = base;
                    room_id = Some(id);
                }
                None => {
                    reporter.error(
                        "Room id must be included in hipchat_server_url when not specified in the source (https://api.hipchat.com/v2/room/12456)",
                    );
                    valid = false;
                }
            }
        }

        if !valid {
            bail!("Please provide valid input and try again");
        }

        Ok(HipChatConfig {
            server_url,
            token: self.source.token.clone().unwrap_or_default(),
            room_id: room_id.unwrap_or_default(),
            skip_ssl_verification: self.source.skip_ssl_verification,
            timeout_secs: self.source.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Split `https://host/v2/room/123` into `("https://host", "123")`
pub fn split_room_url(url: &str) -> Option<(String, String)> {
    let captures = ROOM_URL.captures(url)?;
    let id: u64 = captures.get(2)?.as_str().parse().ok()?;
    Some((captures.get(1)?.as_str().to_string(), id.to_string()))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}
