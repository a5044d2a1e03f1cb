//! Exports a chosen set of keys as columns with one row per language.
//!
//! Useful for eyeballing a handful of terms side by side across every
//! language without opening each file.

use std::path::Path;

use loclint_core::{LanguageRecord, LocalizationError};
use loclint_plugin_api::{Exporter, ParamKind, ParamSpec, PluginConfig, PluginDescriptor};

use crate::{ensure_parent, read_failure, write_failure};

const PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "keys-file",
        summary: "File listing the keys to export, one per line.",
        kind: ParamKind::Path,
        required: true,
    },
    ParamSpec {
        name: "output",
        summary: "File to write CSV data to.",
        kind: ParamKind::Path,
        required: true,
    },
];

/// The key-matrix exporter, registered as `keys`.
#[derive(Debug, Default)]
pub struct KeysExporter;

impl Exporter for KeysExporter {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor {
            id: "keys",
            summary: "Exports selected keys as columns with each language as a row.",
            params: PARAMS,
        }
    }

    fn export(
        &self,
        languages: &[LanguageRecord],
        config: &dyn PluginConfig,
    ) -> Option<LocalizationError> {
        let Some(keys_file) = config.get_str("keys-file") else {
            return Some(LocalizationError::plugin_error(
                "keys exporter: the `keys-file` setting is required",
            ));
        };
        let Some(output) = config.get_str("output") else {
            return Some(LocalizationError::plugin_error(
                "keys exporter: the `output` setting is required",
            ));
        };

        let listing = match std::fs::read_to_string(&keys_file) {
            Ok(s) => s,
            Err(e) => return Some(read_failure("key list", &keys_file, &e)),
        };
        let keys: Vec<&str> = listing
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if let Err(e) = write_matrix(Path::new(&output), &keys, languages) {
            return Some(write_failure(&output, &e));
        }
        tracing::info!(event = "export_keys_done", path = %output, keys = keys.len());
        None
    }
}

fn write_matrix(
    path: &Path,
    keys: &[&str],
    languages: &[LanguageRecord],
) -> std::io::Result<()> {
    ensure_parent(path)?;
    let mut wtr = csv::Writer::from_writer(std::fs::File::create(path)?);

    let mut header = vec!["Language"];
    header.extend_from_slice(keys);
    wtr.write_record(&header).map_err(csv_to_io)?;

    for language in languages {
        let mut record = vec![language.name().as_str()];
        for key in keys {
            let row = language.row(&(*key).into());
            record.push(row.map_or("", |r| r.value()));
        }
        wtr.write_record(&record).map_err(csv_to_io)?;
    }
    wtr.flush()
}

fn csv_to_io(e: csv::Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e)
}
