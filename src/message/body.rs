//! Message body as supplied in `params.message`
//!
//! Pipelines may pass either a plain string or an object with a `template` field.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageBody {
    PlainText(String),
    Templated {
        #[serde(default)]
        template: Option<String>,
    },
}

impl MessageBody {
    pub fn templated(template: impl Into<String>) -> Self {
        MessageBody::Templated {
            template: Some(template.into()),
        }
    }

    /// The text to resolve, whichever shape it came in
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageBody::PlainText(text) => Some(text.as_str()),
            MessageBody::Templated { template } => template.as_deref(),
        }
    }

    /// Normalize to the templated form
    pub fn into_templated(self) -> Self {
        match self {
            MessageBody::PlainText(text) => MessageBody::templated(text),
            templated => templated,
        }
    }
}

impl From<&str> for MessageBody {
    fn from(text: &str) -> Self {
        MessageBody::PlainText(text.to_string())
    }
}
