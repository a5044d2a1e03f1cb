//! Imports a language stored as a delimited spreadsheet (CSV).
//!
//! Assumed sheet shape, all overridable through settings:
//!   * a single header row (`header-rows`, default 1);
//!   * the first column is the key (`key-column`);
//!   * the second column is a description (`description-column`);
//!   * for the master, the third column is the value text
//!     (`master-value-column`);
//!   * for translated languages the third column carries a copy of the
//!     master text and the fourth column is the value (`value-column`);
//!   * records with every cell empty are skipped, as are records with an
//!     empty key cell.
//!
//! Row numbers are the physical 1-based lines of the file, header and blank
//! lines included, so findings point at the line an editor shows.

use loclint_core::{CoreError, LanguageDecl, LanguageRecord, TextRow};
use loclint_plugin_api::{ImportError, Importer, ParamKind, ParamSpec, PluginConfig, PluginDescriptor};

const PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "header-rows",
        summary: "How many leading rows to skip. Default is 1.",
        kind: ParamKind::Int,
        required: false,
    },
    ParamSpec {
        name: "key-column",
        summary: "0-based column index of the key. Default is 0.",
        kind: ParamKind::Int,
        required: false,
    },
    ParamSpec {
        name: "description-column",
        summary: "0-based column index of the description. Default is 1.",
        kind: ParamKind::Int,
        required: false,
    },
    ParamSpec {
        name: "master-value-column",
        summary: "0-based value column for the master language. Default is 2.",
        kind: ParamKind::Int,
        required: false,
    },
    ParamSpec {
        name: "value-column",
        summary: "0-based value column for translated languages. Default is 3.",
        kind: ParamKind::Int,
        required: false,
    },
    ParamSpec {
        name: "delimiter",
        summary: "Field delimiter. Default is `,`.",
        kind: ParamKind::String,
        required: false,
    },
];

/// The delimited-spreadsheet importer, registered as `csv`.
#[derive(Debug, Default)]
pub struct CsvImporter;

impl Importer for CsvImporter {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor {
            id: "csv",
            summary: "Imports languages stored as delimited spreadsheet files.",
            params: PARAMS,
        }
    }

    fn import(
        &self,
        decl: &LanguageDecl,
        config: &dyn PluginConfig,
    ) -> Result<LanguageRecord, ImportError> {
        let header_rows = non_negative(config, "header-rows", 1)?;
        let key_column = non_negative(config, "key-column", 0)? as usize;
        let description_column = non_negative(config, "description-column", 1)? as usize;
        let value_column = if decl.is_master {
            non_negative(config, "master-value-column", 2)? as usize
        } else {
            non_negative(config, "value-column", 3)? as usize
        };
        let delimiter = config
            .get_str("delimiter")
            .and_then(|s| s.as_bytes().first().copied())
            .unwrap_or(b',');

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_path(&decl.path)
            .map_err(|e| ImportError::Unreadable {
                path: decl.path.clone(),
                message: e.to_string(),
            })?;

        let mut language = LanguageRecord::new(decl);
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| ImportError::Malformed {
                path: decl.path.clone(),
                message: e.to_string(),
            })?;
            if index < header_rows as usize {
                continue;
            }

            // The csv reader never yields fully empty lines, but a record of
            // delimiters alone still comes through as empty cells.
            if record.iter().all(str::is_empty) {
                continue;
            }

            let key = record.get(key_column).unwrap_or("");
            let line = record.position().map(|p| p.line() as u32).unwrap_or(0);
            if key.is_empty() {
                tracing::debug!(
                    event = "import_skip_keyless_row",
                    path = %decl.path.display(),
                    line,
                );
                continue;
            }

            let row = TextRow::new(
                key,
                record.get(description_column).unwrap_or(""),
                record.get(value_column).unwrap_or(""),
                line,
            );
            language.push_row(row).map_err(|e| match e {
                CoreError::DuplicateKey { key, first, second } => ImportError::DuplicateKey {
                    path: decl.path.clone(),
                    key,
                    first,
                    second,
                },
            })?;
        }

        tracing::debug!(
            event = "import_done",
            language = %language.name(),
            rows = language.row_count(),
        );
        Ok(language)
    }
}

fn non_negative(config: &dyn PluginConfig, setting: &str, default: i64) -> Result<i64, ImportError> {
    let value = config.get_int(setting, default);
    if value < 0 {
        return Err(ImportError::BadSettings {
            id: "csv",
            message: format!("`{setting}` must not be negative (got {value})"),
        });
    }
    Ok(value)
}
