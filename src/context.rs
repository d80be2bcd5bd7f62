//! Build context - the ambient build metadata Concourse exposes to a resource step
//!
//! The context is read once at the start of an invocation and never mutated.
//! Components receive it explicitly instead of reading the environment themselves.

use std::env;

/// Names of the ambient build tokens, in substitution order.
pub static BUILD_TOKEN_NAMES: [&str; 9] = [
    "BUILD_ID",
    "BUILD_NAME",
    "BUILD_TEAM_ID",
    "BUILD_TEAM_NAME",
    "BUILD_JOB_ID",
    "BUILD_JOB_NAME",
    "BUILD_PIPELINE_ID",
    "BUILD_PIPELINE_NAME",
    "ATC_EXTERNAL_URL",
];

/// Immutable snapshot of build-identifying values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    pub build_id: Option<String>,
    pub build_name: Option<String>,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub job_id: Option<String>,
    pub job_name: Option<String>,
    pub pipeline_id: Option<String>,
    pub pipeline_name: Option<String>,
    pub external_url: Option<String>,
}

impl BuildContext {
    /// Snapshot the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a context from any name -> value lookup (environment, map, ...)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            build_id: lookup("BUILD_ID"),
            build_name: lookup("BUILD_NAME"),
            team_id: lookup("BUILD_TEAM_ID"),
            team_name: lookup("BUILD_TEAM_NAME"),
            job_id: lookup("BUILD_JOB_ID"),
            job_name: lookup("BUILD_JOB_NAME"),
            pipeline_id: lookup("BUILD_PIPELINE_ID"),
            pipeline_name: lookup("BUILD_PIPELINE_NAME"),
            external_url: lookup("ATC_EXTERNAL_URL"),
        }
    }

    /// Value of a single ambient token by name
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "BUILD_ID" => &self.build_id,
            "BUILD_NAME" => &self.build_name,
            "BUILD_TEAM_ID" => &self.team_id,
            "BUILD_TEAM_NAME" => &self.team_name,
            "BUILD_JOB_ID" => &self.job_id,
            "BUILD_JOB_NAME" => &self.job_name,
            "BUILD_PIPELINE_ID" => &self.pipeline_id,
            "BUILD_PIPELINE_NAME" => &self.pipeline_name,
            "ATC_EXTERNAL_URL" => &self.external_url,
            _ => return None,
        };
        value.as_deref()
    }

    /// All nine ambient tokens; absent values are reported as `None`
    pub fn tokens(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        BUILD_TOKEN_NAMES.iter().map(move |name| (*name, self.get(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_maps_every_token() {
        let values: HashMap<&str, String> = BUILD_TOKEN_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, (i + 1).to_string()))
            .collect();

        let context = BuildContext::from_lookup(|name| values.get(name).cloned());

        assert_eq!(context.build_id.as_deref(), Some("1"));
        assert_eq!(context.pipeline_name.as_deref(), Some("8"));
        assert_eq!(context.external_url.as_deref(), Some("9"));

        let tokens: Vec<_> = context.tokens().collect();
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[0], ("BUILD_ID", Some("1")));
        assert_eq!(tokens[8], ("ATC_EXTERNAL_URL", Some("9")));
    }

    #[test]
    fn test_missing_values_are_none() {
        let context = BuildContext::default();
        assert!(context.tokens().all(|(_, value)| value.is_none()));
        assert_eq!(context.get("NOT_A_BUILD_TOKEN"), None);
    }
}
