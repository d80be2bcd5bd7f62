//! Token map - user supplied values for `${NAME}` placeholders
//!
//! A value is either a literal (text, number or boolean, substituted verbatim) or a
//! file reference `file://<name>` / `file://<dir>/<path>` that is read relative to the
//! build root directory.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Scheme prefix marking a token value as a file reference
pub const FILE_SCHEME: &str = "file://";

/// Raw value of a user token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl TokenValue {
    pub fn text(value: impl Into<String>) -> Self {
        TokenValue::Text(value.into())
    }

    /// The file this value points at, if it is a file reference
    pub fn file_ref(&self) -> Option<FileRef> {
        match self {
            TokenValue::Text(text) => FileRef::parse(text),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(text) => f.write_str(text),
            TokenValue::Number(number) => write!(f, "{}", number),
            TokenValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Text(value)
    }
}

/// Parsed `file://` reference
///
/// The first segment after the scheme is the host component, the remainder is the
/// nested path (kept with its leading `/`, empty when there is nothing after the host).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub host: String,
    pub path: String,
}

impl FileRef {
    pub fn parse(value: &str) -> Option<Self> {
        let rest = value.strip_prefix(FILE_SCHEME)?;
        let (host, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };
        let path = if path.len() > 1 { path } else { "" };

        Some(Self {
            host: host.to_string(),
            path: path.to_string(),
        })
    }

    /// Absolute location of the referenced file under `root`
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let mut resolved = root.join(&self.host);
        let nested = self.path.trim_start_matches('/');
        if !nested.is_empty() {
            resolved.push(nested);
        }
        resolved
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", FILE_SCHEME, self.host, self.path)
    }
}

/// Read the full text of a referenced file
pub fn read_token_file(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("file at path [{}] does not exist", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// User tokens keyed by name (without the surrounding `${}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenMap(BTreeMap<String, TokenValue>);

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&TokenValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set `key` unless the caller already populated it; returns whether it was set
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<TokenValue>) -> bool {
        match self.0.entry(key.into()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for TokenMap
where
    K: Into<String>,
    V: Into<TokenValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
