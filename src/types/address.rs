//! Address-related types for the address validator
//!
//! Defines the parsed input row, the credentials handed to the remote service,
//! and the accumulated per-key validation results.

use std::collections::HashMap;
use std::fmt;

/// One parsed input row
///
/// Field values are kept exactly as parsed (no trimming) because the lookup
/// key and the combined street are derived from them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRow {
    /// Value of the `street` column
    pub street: String,

    /// Value of the `city` column
    pub city: String,

    /// Value of the `zip_code` column
    pub zip_code: String,

    /// The row rendered back to CSV text and trimmed
    pub original: String,
}

/// Credentials for the remote verification service
///
/// `Debug` prints neither the id nor the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    auth_id: String,
    auth_token: String,
}

impl Credentials {
    pub fn new(auth_id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Credentials {
            auth_id: auth_id.into(),
            auth_token: auth_token.into(),
        }
    }

    pub fn auth_id(&self) -> &str {
        &self.auth_id
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_id", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

/// Mapping from lookup key to `"<original> -> <formatted>"`
///
/// Iterates in insertion order. Once a key is set its line never changes;
/// later rows with the same key reuse the first line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedResults {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ValidatedResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join an original row and its formatted result into an output line
    pub fn render_line(original: &str, formatted: &str) -> String {
        format!("{} -> {}", original, formatted)
    }

    /// Store a line for `key` unless one is already stored
    ///
    /// Returns `true` if the line was inserted.
    pub fn insert_if_absent(&mut self, key: String, line: String) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, line));
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, line)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, line)| (key.as_str(), line.as_str()))
    }

    /// Iterate lines in insertion order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, line)| line.as_str())
    }
}
