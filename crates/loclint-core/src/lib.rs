//! Core data model shared by every loclint crate: languages, rows,
//! placeholder tokens and the consistency-error taxonomy.
//!
//! Everything in here is plain in-memory data. File formats live in the
//! importer/exporter crates, the comparison algorithm lives in
//! `loclint-validate`, and orchestration lives in `loclint-services`.

pub mod error;
pub mod language;
pub mod placeholder;
pub mod row;

pub use error::{CoreError, ErrorKind, LocalizationError};
pub use language::{LanguageDecl, LanguageName, LanguageRecord};
pub use placeholder::{scan_placeholders, TokenScan, PLACEHOLDER_START, PLACEHOLDER_STOP};
pub use row::{RowKey, TextRow};

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version stamp embedded in machine-readable outputs (JSON reports, schemas).
pub const SCHEMA_VERSION: u32 = 1;
