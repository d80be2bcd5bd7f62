//! Token interceptors - per-token policies applied before substitution
//!
//! An interceptor sees a resolved `(key, value)` pair and either hands a (possibly
//! transformed) value to the next interceptor, accepts it, or rejects it. Rejected
//! tokens are removed from the message. When every interceptor passes, the value is
//! accepted as-is.

/// Outcome of a single interceptor step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interception {
    /// Continue with the next interceptor
    Pass(String),
    /// Stop and substitute this value
    Accept(String),
    /// Stop and remove every occurrence of the token
    Reject,
}

/// Final decision of the chain for one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept(String),
    Reject,
}

/// A single token policy
pub trait TokenInterceptor: Send + Sync {
    /// Name used in debug logs
    fn name(&self) -> &str;

    fn intercept(&self, key: &str, value: String) -> Interception;
}

/// Accepts every value unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultInterceptor;

impl TokenInterceptor for DefaultInterceptor {
    fn name(&self) -> &str {
        "default"
    }

    fn intercept(&self, _key: &str, value: String) -> Interception {
        Interception::Accept(value)
    }
}

/// Maximum length of a truncated value, before the ellipsis
pub const TRUNCATE_AT: usize = 75;

/// Shortens long or multi-line values of selected tokens
///
/// Values are cut at the first line break, then cut to `TRUNCATE_AT` characters with
/// `...` appended. Other tokens pass through untouched.
#[derive(Debug, Clone)]
pub struct TruncatingInterceptor {
    at_newline: Vec<String>,
    at_length: Vec<String>,
}

impl Default for TruncatingInterceptor {
    fn default() -> Self {
        Self {
            at_newline: vec!["GIT_COMMIT_MESSAGE".to_string()],
            at_length: vec!["GIT_COMMIT_MESSAGE".to_string()],
        }
    }
}

impl TruncatingInterceptor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenInterceptor for TruncatingInterceptor {
    fn name(&self) -> &str {
        "truncating"
    }

    fn intercept(&self, key: &str, mut value: String) -> Interception {
        if self.at_newline.iter().any(|k| k == key) {
            if let Some(idx) = value.find('\n') {
                value.truncate(idx);
            }
        }

        if self.at_length.iter().any(|k| k == key) && value.chars().count() > TRUNCATE_AT {
            value = value.chars().take(TRUNCATE_AT).collect::<String>() + "...";
        }

        Interception::Pass(value)
    }
}

/// Ordered list of interceptors
///
/// New policies are added with [`InterceptorChain::then`]; existing ones are never
/// modified.
pub struct InterceptorChain {
    interceptors: Vec<Box<dyn TokenInterceptor>>,
}

impl InterceptorChain {
    /// Empty chain; accepts everything
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// Truncation followed by the default policy
    pub fn standard() -> Self {
        Self::new()
            .then(TruncatingInterceptor::new())
            .then(DefaultInterceptor)
    }

    /// Append an interceptor
    pub fn then(mut self, interceptor: impl TokenInterceptor + 'static) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run `value` through every interceptor until one of them decides
    pub fn intercept(&self, key: &str, value: String) -> Verdict {
        let mut value = value;
        for interceptor in &self.interceptors {
            match interceptor.intercept(key, value) {
                Interception::Pass(next) => value = next,
                Interception::Accept(accepted) => return Verdict::Accept(accepted),
                Interception::Reject => {
                    tracing::debug!(key = %key, interceptor = interceptor.name(), "Token rejected");
                    return Verdict::Reject;
                }
            }
        }
        Verdict::Accept(value)
    }
}

impl Default for InterceptorChain {
    fn default() -> Self {
        Self::standard()
    }
}
