//! The consistency-error taxonomy.
//!
//! `LocalizationError` is the one finding type flowing through the whole
//! toolkit: the checker appends them to a candidate's record, exporters may
//! return one as a soft failure, and the CLI renders or serializes them.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::row::RowKey;

/// What went wrong. The first seven kinds are produced by the checker;
/// `FileError` and `PluginError` are reserved for importers and exporters
/// and never come out of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    KeysMissing,
    KeysAdded,
    KeysNotInOrder,
    FormatArgsAdded,
    FormatArgsOpen,
    FormatArgMissing,
    EmptyTerm,
    FileError,
    PluginError,
}

impl ErrorKind {
    /// Stable machine-readable name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::KeysMissing => "keys-missing",
            ErrorKind::KeysAdded => "keys-added",
            ErrorKind::KeysNotInOrder => "keys-not-in-order",
            ErrorKind::FormatArgsAdded => "format-args-added",
            ErrorKind::FormatArgsOpen => "format-args-open",
            ErrorKind::FormatArgMissing => "format-arg-missing",
            ErrorKind::EmptyTerm => "empty-term",
            ErrorKind::FileError => "file-error",
            ErrorKind::PluginError => "plugin-error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding raised against a language.
///
/// `line` is the 1-based line in the language's source file, or 0 when the
/// finding is not tied to a row (ratio check, importer/exporter failures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocalizationError {
    pub kind: ErrorKind,
    pub message: String,
    pub line: u32,
}

impl LocalizationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
        }
    }

    /// An I/O-level failure reported by a collaborator, not row-scoped.
    pub fn file_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileError, message, 0)
    }

    /// A non-I/O collaborator failure, not row-scoped.
    pub fn plugin_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PluginError, message, 0)
    }
}

impl fmt::Display for LocalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] line {}: {}", self.kind, self.line, self.message)
    }
}

/// Typed failures of the core model itself.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("duplicate key `{key}` (rows {first} and {second})")]
    DuplicateKey { key: RowKey, first: u32, second: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_kebab_case() {
        assert_eq!(ErrorKind::KeysNotInOrder.as_str(), "keys-not-in-order");
        assert_eq!(ErrorKind::FormatArgMissing.as_str(), "format-arg-missing");
    }

    #[test]
    fn kind_serializes_to_its_wire_name() {
        let json = serde_json::to_string(&ErrorKind::EmptyTerm).unwrap();
        assert_eq!(json, "\"empty-term\"");
    }

    #[test]
    fn collaborator_constructors_are_not_row_scoped() {
        assert_eq!(LocalizationError::file_error("boom").line, 0);
        assert_eq!(
            LocalizationError::plugin_error("boom").kind,
            ErrorKind::PluginError
        );
    }
}
