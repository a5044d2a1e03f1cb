//! The run's outcome: checked records, collaborator failures, and the
//! serializable summary the CLI's JSON mode emits.

use loclint_core::{LanguageName, LanguageRecord, LocalizationError, SCHEMA_VERSION};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A candidate whose import failed. The language is excluded from checking
/// and export; the failure itself is preserved here.
#[derive(Debug, Clone)]
pub struct ImportFailure {
    pub name: LanguageName,
    pub error: LocalizationError,
}

/// Everything one pipeline run produced.
///
/// `languages` holds master and candidates in declaration order, each
/// carrying its own findings. Aggregate counts are derived on demand, never
/// stored.
#[derive(Debug)]
pub struct RunReport {
    pub languages: Vec<LanguageRecord>,
    pub import_failures: Vec<ImportFailure>,
    /// Soft failures returned by exporters, in exporter order.
    pub plugin_errors: Vec<LocalizationError>,
}

impl RunReport {
    /// Sum of findings across all checked languages.
    pub fn total_errors(&self) -> usize {
        self.languages.iter().map(|l| l.errors().len()).sum()
    }

    /// Number of languages with at least one finding.
    pub fn languages_with_errors(&self) -> usize {
        self.languages.iter().filter(|l| l.has_errors()).count()
    }

    /// True when anything at all went wrong: validation findings, skipped
    /// imports, or exporter failures.
    pub fn has_findings(&self) -> bool {
        self.total_errors() > 0
            || !self.import_failures.is_empty()
            || !self.plugin_errors.is_empty()
    }

    /// Wire DTO for machine-readable output.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            schema_version: SCHEMA_VERSION,
            languages: self
                .languages
                .iter()
                .map(|l| LanguageSummary {
                    name: l.name().clone(),
                    path: l.source_path().display().to_string(),
                    is_master: l.is_master(),
                    errors: l.errors().to_vec(),
                })
                .collect(),
            import_failures: self
                .import_failures
                .iter()
                .map(|f| (f.name.clone(), f.error.clone()))
                .collect(),
            plugin_errors: self.plugin_errors.clone(),
            total_errors: self.total_errors(),
            languages_with_errors: self.languages_with_errors(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunSummary {
    pub schema_version: u32,
    pub languages: Vec<LanguageSummary>,
    pub import_failures: Vec<(LanguageName, LocalizationError)>,
    pub plugin_errors: Vec<LocalizationError>,
    pub total_errors: usize,
    pub languages_with_errors: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LanguageSummary {
    pub name: LanguageName,
    pub path: String,
    pub is_master: bool,
    pub errors: Vec<LocalizationError>,
}
