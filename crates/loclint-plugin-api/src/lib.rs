//! Capability traits implemented by statically linked plugins.
//!
//! The engine consumes these interfaces but never discovers or loads
//! implementations itself; the driver resolves them through an explicit
//! registry and passes them in.

use std::fmt;
use std::path::PathBuf;

use loclint_core::{LanguageDecl, LanguageRecord, LocalizationError, RowKey};
use thiserror::Error;

/// Reads one language file into a populated [`LanguageRecord`].
///
/// Exactly one importer is active per run; the driver enforces that.
pub trait Importer: Send + Sync {
    fn descriptor(&self) -> PluginDescriptor;

    fn import(
        &self,
        decl: &LanguageDecl,
        config: &dyn PluginConfig,
    ) -> Result<LanguageRecord, ImportError>;
}

/// Writes some artifact derived from the complete, already-checked record
/// set. Never mutates the records it receives.
///
/// Failures are soft: an exporter returns at most one finding of kind
/// `FileError` or `PluginError`, and the driver keeps running the rest.
pub trait Exporter: Send + Sync {
    fn descriptor(&self) -> PluginDescriptor;

    fn export(
        &self,
        languages: &[LanguageRecord],
        config: &dyn PluginConfig,
    ) -> Option<LocalizationError>;
}

/// Read-only settings lookup handed to every plugin invocation.
///
/// Integer and boolean lookups fall back to the caller-supplied default when
/// the setting is absent or does not parse as the requested type.
pub trait PluginConfig {
    fn get_str(&self, setting: &str) -> Option<String>;
    fn get_int(&self, setting: &str, default: i64) -> i64;
    fn get_bool(&self, setting: &str, default: bool) -> bool;
}

/// Self-description a plugin exposes for the CLI's `plugins` listing.
#[derive(Debug, Clone, Copy)]
pub struct PluginDescriptor {
    /// Identifier the run configuration refers to the plugin by.
    pub id: &'static str,
    pub summary: &'static str,
    pub params: &'static [ParamSpec],
}

/// One settings entry a plugin understands.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub summary: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Int,
    Bool,
    Path,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamKind::String => "string",
            ParamKind::Int => "int",
            ParamKind::Bool => "bool",
            ParamKind::Path => "path",
        })
    }
}

/// Import-level defects. The driver maps these onto the run's failure
/// policy: a failing candidate is recorded and skipped, a failing master
/// aborts the run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read `{path}`: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("malformed source `{path}`: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("duplicate key `{key}` in `{path}` (rows {first} and {second})")]
    DuplicateKey {
        path: PathBuf,
        key: RowKey,
        first: u32,
        second: u32,
    },

    #[error("importer `{id}` misconfigured: {message}")]
    BadSettings { id: &'static str, message: String },
}
