use std::collections::BTreeSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::placeholder::scan_placeholders;

/// Stable identifier of one translatable row. The same key names the same
/// text in every language; row identity is this key and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for RowKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// One translatable entry of a language file.
///
/// Immutable after construction; the placeholder data is derived from
/// `value` once, up front, so it can never go stale.
#[derive(Debug, Clone)]
pub struct TextRow {
    key: RowKey,
    description: String,
    value: String,
    row_number: u32,
    placeholders: Vec<String>,
    has_open_placeholder: bool,
}

impl TextRow {
    pub fn new(
        key: impl Into<RowKey>,
        description: impl Into<String>,
        value: impl Into<String>,
        row_number: u32,
    ) -> Self {
        let value = value.into();
        let scan = scan_placeholders(&value);
        Self {
            key: key.into(),
            description: description.into(),
            value,
            row_number,
            placeholders: scan.tokens,
            has_open_placeholder: scan.unterminated,
        }
    }

    pub fn key(&self) -> &RowKey {
        &self.key
    }

    /// Free text shown alongside the key; semantically meaningful only on
    /// the master language.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The displayed string. Empty means untranslated.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// 1-based position of this row in the originating file. Used for error
    /// reporting only.
    pub fn row_number(&self) -> u32 {
        self.row_number
    }

    /// Placeholder tokens in order of appearance, duplicates included.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// True when `value` has a start delimiter with no matching stop.
    pub fn has_open_placeholder(&self) -> bool {
        self.has_open_placeholder
    }

    /// Set view of the placeholder tokens, for set comparisons.
    pub fn placeholder_set(&self) -> BTreeSet<&str> {
        self.placeholders.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_placeholders_at_construction() {
        let row = TextRow::new("greeting", "shown on the title screen", "Hello {name}!", 2);
        assert_eq!(row.placeholders(), ["{name}"]);
        assert!(!row.has_open_placeholder());
        assert_eq!(row.row_number(), 2);
    }

    #[test]
    fn flags_open_placeholder() {
        let row = TextRow::new("greeting", "", "Hola {name", 2);
        assert!(row.has_open_placeholder());
        assert!(row.placeholders().is_empty());
    }

    #[test]
    fn placeholder_set_collapses_duplicates() {
        let row = TextRow::new("echo", "", "{x} {x} {y}", 1);
        assert_eq!(row.placeholders().len(), 3);
        let set = row.placeholder_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains("{x}") && set.contains("{y}"));
    }

    #[test]
    fn row_keys_compare_by_content() {
        assert_eq!(RowKey::from("a"), RowKey::new(String::from("a")));
        assert_ne!(RowKey::from("a"), RowKey::from("A"));
    }
}
