//! Token resolver - substitutes `${NAME}` placeholders in a message
//!
//! Resolution happens in two layers:
//! 1. the nine ambient build tokens from [`BuildContext`]
//! 2. user tokens (literals or `file://` references), filtered through the
//!    [`InterceptorChain`]
//!
//! A token present in both layers is substituted by the build layer first; the user
//! layer can only see placeholders the build layer left behind.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use super::interceptor::{InterceptorChain, Verdict};
use super::tokens::{read_token_file, TokenMap};
use crate::context::BuildContext;
use crate::report::Reporter;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// `${NAME}` for a token name
pub fn placeholder(name: &str) -> String {
    format!("${{{}}}", name)
}

pub struct TokenResolver<'a> {
    context: &'a BuildContext,
    interceptors: InterceptorChain,
    reporter: &'a dyn Reporter,
}

impl<'a> TokenResolver<'a> {
    /// Resolver with the standard interceptor chain
    pub fn new(context: &'a BuildContext, reporter: &'a dyn Reporter) -> Self {
        Self {
            context,
            interceptors: InterceptorChain::standard(),
            reporter,
        }
    }

    /// Replace the interceptor chain
    pub fn with_interceptors(mut self, interceptors: InterceptorChain) -> Self {
        self.interceptors = interceptors;
        self
    }

    /// Resolve an optional message
    ///
    /// A missing message is reported and handed back unresolved.
    pub fn resolve(
        &self,
        message: Option<&str>,
        user_tokens: Option<&TokenMap>,
        root_dir: Option<&Path>,
    ) -> Option<String> {
        match message {
            Some(message) => Some(self.resolve_str(message, user_tokens, root_dir)),
            None => {
                self.reporter.error("message param must be a string");
                None
            }
        }
    }

    /// Resolve every known placeholder in `message`
    pub fn resolve_str(
        &self,
        message: &str,
        user_tokens: Option<&TokenMap>,
        root_dir: Option<&Path>,
    ) -> String {
        let message = self.substitute_build_tokens(message);

        let user_tokens = match user_tokens {
            Some(tokens) if !tokens.is_empty() => tokens,
            _ => return message,
        };

        // Read every value first; one unreadable file must not affect the others.
        let resolved: Vec<(&str, String)> = user_tokens
            .iter()
            .filter_map(|(key, value)| {
                let Some(file) = value.file_ref() else {
                    return Some((key, value.to_string()));
                };
                let Some(root) = root_dir else {
                    self.reporter.error(&format!(
                        "Error reading file. no root directory to resolve [{}] for token {}",
                        file, key
                    ));
                    return None;
                };
                match read_token_file(&file.resolve(root)) {
                    Ok(text) => Some((key, text)),
                    Err(e) => {
                        self.reporter.error(&format!("Error reading file. {:#}", e));
                        None
                    }
                }
            })
            .collect();

        let replacements: HashMap<&str, String> = resolved
            .into_iter()
            .map(|(key, value)| match self.interceptors.intercept(key, value) {
                Verdict::Accept(value) => (key, value),
                Verdict::Reject => (key, String::new()),
            })
            .collect();

        // Single pass: placeholders inside substituted values are left as they are.
        PLACEHOLDER
            .replace_all(&message, |caps: &Captures| match replacements.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    fn substitute_build_tokens(&self, message: &str) -> String {
        let mut message = message.to_string();
        for (name, value) in self.context.tokens() {
            let token = placeholder(name);
            if message.contains(&token) {
                if value.is_none() {
                    debug!(token = name, "Build token has no value");
                }
                message = message.replace(&token, value.unwrap_or_default());
            }
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        assert_eq!(placeholder("BUILD_ID"), "${BUILD_ID}");
    }
}
