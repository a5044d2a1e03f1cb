use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, LocalizationError};
use crate::row::{RowKey, TextRow};

/// Identity of a language within a working set. Two records with the same
/// name are the same language, whatever else differs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct LanguageName(String);

impl LanguageName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for LanguageName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Declares a language file to be imported and processed. Built from the run
/// configuration; importers consume it.
#[derive(Debug, Clone)]
pub struct LanguageDecl {
    pub name: LanguageName,
    pub path: PathBuf,
    /// The master language is the source of truth candidates are validated
    /// against. Exactly one declaration per run carries this flag; the
    /// driver enforces it before any record reaches the checker.
    pub is_master: bool,
}

impl LanguageDecl {
    pub fn new(name: impl Into<LanguageName>, path: impl Into<PathBuf>, is_master: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_master,
        }
    }
}

/// Rows and validation findings for one language.
///
/// Created empty by an importer and populated row by row; read-mostly
/// afterwards. The checker is the only writer post-import, and it only
/// appends to `errors`.
#[derive(Debug, Clone)]
pub struct LanguageRecord {
    name: LanguageName,
    source_path: PathBuf,
    is_master: bool,
    rows: IndexMap<RowKey, TextRow>,
    errors: Vec<LocalizationError>,
}

impl LanguageRecord {
    pub fn new(decl: &LanguageDecl) -> Self {
        Self {
            name: decl.name.clone(),
            source_path: decl.path.clone(),
            is_master: decl.is_master,
            rows: IndexMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn name(&self) -> &LanguageName {
        &self.name
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn is_master(&self) -> bool {
        self.is_master
    }

    /// Append a row. Insertion order is the file's row order and is
    /// preserved; keys must be unique within one language.
    pub fn push_row(&mut self, row: TextRow) -> Result<(), CoreError> {
        if let Some(existing) = self.rows.get(row.key()) {
            return Err(CoreError::DuplicateKey {
                key: row.key().clone(),
                first: existing.row_number(),
                second: row.row_number(),
            });
        }
        self.rows.insert(row.key().clone(), row);
        Ok(())
    }

    /// Convenience for importers populating a record field by field.
    pub fn add_text(
        &mut self,
        key: impl Into<RowKey>,
        description: impl Into<String>,
        value: impl Into<String>,
        row_number: u32,
    ) -> Result<(), CoreError> {
        self.push_row(TextRow::new(key, description, value, row_number))
    }

    pub fn row(&self, key: &RowKey) -> Option<&TextRow> {
        self.rows.get(key)
    }

    pub fn contains_key(&self, key: &RowKey) -> bool {
        self.rows.contains_key(key)
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = &TextRow> + '_ {
        self.rows.values()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a finding. The list is append-only and never deduplicated.
    pub fn push_error(&mut self, error: LocalizationError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[LocalizationError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LanguageRecord {
        LanguageRecord::new(&LanguageDecl::new("english", "loc/english.csv", true))
    }

    #[test]
    fn rows_keep_insertion_order() {
        let mut lang = record();
        lang.add_text("b", "", "bee", 2).unwrap();
        lang.add_text("a", "", "ay", 3).unwrap();
        lang.add_text("c", "", "sea", 4).unwrap();
        let keys: Vec<&str> = lang.rows().map(|r| r.key().as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn duplicate_key_is_rejected_with_both_rows() {
        let mut lang = record();
        lang.add_text("greeting", "", "Hello", 2).unwrap();
        let err = lang.add_text("greeting", "", "Hello again", 9).unwrap_err();
        match err {
            CoreError::DuplicateKey { key, first, second } => {
                assert_eq!(key.as_str(), "greeting");
                assert_eq!((first, second), (2, 9));
            }
        }
        assert_eq!(lang.row_count(), 1);
    }

    #[test]
    fn errors_are_append_only() {
        let mut lang = record();
        lang.push_error(LocalizationError::file_error("cannot read loc/english.csv"));
        lang.push_error(LocalizationError::file_error("cannot read loc/english.csv"));
        assert_eq!(lang.errors().len(), 2, "duplicates are kept");
    }
}
