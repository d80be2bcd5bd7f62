//! Opinionated message composer
//!
//! Given a `message_type`, the composer dresses the user's message (or the status
//! default) with Concourse styling:
//!
//! ```text
//! [favicon][pipeline breadcrumb][message][  git summary][fly instructions]
//! ```
//!
//! The result still contains `${...}` tokens; they are resolved afterwards by
//! [`TokenResolver`](crate::template::TokenResolver).

use std::path::Path;

use tracing::{debug, info};

use super::body::MessageBody;
use super::segment::{
    default_fly_info, default_git_info, default_pipeline_info, status_icon, SegmentConfig,
    SegmentSetting,
};
use super::status::{MessageType, StatusDefaults};
use crate::config::NotifyParams;
use crate::report::Reporter;
use crate::template::{TokenMap, FILE_SCHEME};

/// Sender name used when a status category decorates the message
pub const DEFAULT_FROM: &str = "Concourse CI";

/// Placeholder injected for a git metadata file that does not exist
pub const UNKNOWN_GIT_VALUE: &str = "<unknown>";

/// Git metadata tokens and the files they come from, under `<root>/src/.git`
pub const GIT_TOKENS: [(&str, &str); 3] = [
    ("GIT_COMMITTER", "committer"),
    ("GIT_SHORT_REF", "short_ref"),
    ("GIT_COMMIT_MESSAGE", "commit_message"),
];

const GIT_DIR: &str = "src/.git";
const GIT_INFO_PADDING: &str = "  ";

/// Decorated message and the defaults of its status category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub message: String,
    pub defaults: StatusDefaults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// No `message_type`; the message is left as the caller wrote it
    Untouched,
    /// Unknown `message_type`; reported, nothing composed
    Unsupported,
    Composed(ComposedMessage),
}

pub struct MessageComposer<'a> {
    reporter: &'a dyn Reporter,
}

impl<'a> MessageComposer<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self { reporter }
    }

    /// Build the decorated message body for `message_type`
    ///
    /// When git metadata is available the `GIT_*` tokens are added to `tokens`,
    /// without touching entries the caller already set.
    pub fn compose(
        &self,
        message_type: Option<&str>,
        user_message: Option<&str>,
        segments: &SegmentConfig,
        tokens: &mut TokenMap,
        root_dir: Option<&Path>,
    ) -> Composition {
        let message_type = match message_type {
            Some(t) if !t.is_empty() => t,
            _ => return Composition::Untouched,
        };

        let message_type: MessageType = match message_type.parse() {
            Ok(t) => t,
            Err(e) => {
                self.reporter.error(&e.to_string());
                return Composition::Unsupported;
            }
        };
        let defaults = message_type.defaults();

        let text = match user_message {
            Some(text) if !text.is_empty() => text,
            _ => defaults.status_text,
        };

        let git_info = self.git_segment(segments.git_info(), tokens, root_dir);

        let message = [
            status_icon(defaults.icon),
            segments.pipeline_info().render(default_pipeline_info),
            text.to_string(),
            git_info,
            segments.fly_info().render(default_fly_info),
        ]
        .concat();

        debug!(message_type = %message_type, "Composed opinionated message");
        Composition::Composed(ComposedMessage { message, defaults })
    }

    /// Apply the status defaults to request params in place
    ///
    /// `from`, `color` and `notify` are only filled when the caller left them unset;
    /// an explicit `notify: false` is kept.
    pub fn apply_defaults(&self, params: &mut NotifyParams, root_dir: Option<&Path>) -> Composition {
        if params.message_type.as_deref().is_some_and(|t| !t.is_empty()) {
            params.message = params.message.take().map(MessageBody::into_templated);
        }

        let user_message = params
            .message
            .as_ref()
            .and_then(MessageBody::text)
            .map(str::to_string);

        let composition = self.compose(
            params.message_type.as_deref(),
            user_message.as_deref(),
            &params.message_type_config,
            &mut params.tokens,
            root_dir,
        );

        if let Composition::Composed(composed) = &composition {
            if is_unset(&params.from) {
                params.from = Some(DEFAULT_FROM.to_string());
            }
            if is_unset(&params.color) {
                params.color = Some(composed.defaults.color.to_string());
            }
            params.notify.get_or_insert(composed.defaults.notify);
            params.message = Some(MessageBody::templated(composed.message.clone()));

            info!(
                message_type = ?params.message_type,
                color = ?params.color,
                notify = ?params.notify,
                "Applied opinionated defaults"
            );
        }

        composition
    }

    fn git_segment(
        &self,
        setting: SegmentSetting,
        tokens: &mut TokenMap,
        root_dir: Option<&Path>,
    ) -> String {
        if setting.is_disabled() || !self.discover_git_tokens(tokens, root_dir) {
            return String::new();
        }

        let markup = setting.render(default_git_info);
        if markup.is_empty() {
            markup
        } else {
            format!("{}{}", GIT_INFO_PADDING, markup)
        }
    }

    /// Make sure the `GIT_*` tokens are populated; false when there is no git metadata
    fn discover_git_tokens(&self, tokens: &mut TokenMap, root_dir: Option<&Path>) -> bool {
        if GIT_TOKENS.iter().all(|(token, _)| tokens.contains(token)) {
            return true;
        }

        let Some(root) = root_dir else {
            return false;
        };

        let git_dir = root.join(GIT_DIR);
        let present: Vec<bool> = GIT_TOKENS
            .iter()
            .map(|(_, file)| git_dir.join(file).is_file())
            .collect();

        if !present.iter().any(|p| *p) {
            debug!(git_dir = %git_dir.display(), "No git metadata found");
            return false;
        }

        for ((token, file), exists) in GIT_TOKENS.iter().zip(present) {
            let value = if exists {
                git_file_ref(file)
            } else {
                self.reporter.warn(&format!(
                    "git metadata file [{}] is missing, using {} for {}",
                    git_dir.join(file).display(),
                    UNKNOWN_GIT_VALUE,
                    token
                ));
                UNKNOWN_GIT_VALUE.to_string()
            };
            tokens.insert_if_absent(*token, value);
        }

        true
    }
}

fn git_file_ref(file: &str) -> String {
    format!("{}{}/{}", FILE_SCHEME, GIT_DIR, file)
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TracingReporter;

    #[test]
    fn test_git_file_ref() {
        assert_eq!(git_file_ref("committer"), "file://src/.git/committer");
    }

    #[test]
    fn test_empty_message_type_is_untouched() {
        let composer = MessageComposer::new(&TracingReporter);
        let mut tokens = TokenMap::new();
        let composition = composer.compose(
            Some(""),
            Some("hello"),
            &SegmentConfig::default(),
            &mut tokens,
            None,
        );
        assert_eq!(composition, Composition::Untouched);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_user_supplied_git_tokens_skip_discovery() {
        let composer = MessageComposer::new(&TracingReporter);
        let mut tokens: TokenMap = [
            ("GIT_COMMITTER", "file://some/other/committer"),
            ("GIT_SHORT_REF", "file://some/other/short_ref"),
            ("GIT_COMMIT_MESSAGE", "file://some/other/commit_message"),
        ]
        .into_iter()
        .collect();

        let Composition::Composed(composed) = composer.compose(
            Some("pending"),
            None,
            &SegmentConfig::default(),
            &mut tokens,
            None,
        ) else {
            panic!("expected composed message");
        };

        assert!(composed.message.contains(&format!("Build Pending  {}", default_git_info())));
        assert_eq!(tokens.len(), 3);
    }
}
