//! Exports every language into a single CSV, one column per language, in a
//! format suitable for re-import by localization tooling.
//!
//! Header is `Key,Type,Desc,<language...>`; rows follow the master's row
//! order. A language missing a key gets an empty field, so the export stays
//! usable even when validation already flagged the gap.

use std::io::Write;
use std::path::Path;

use loclint_core::{LanguageRecord, LocalizationError};
use loclint_plugin_api::{Exporter, ParamKind, ParamSpec, PluginConfig, PluginDescriptor};

const PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "output",
    summary: "File to write CSV data to.",
    kind: ParamKind::Path,
    required: true,
}];

/// The all-languages CSV exporter, registered as `csv`.
#[derive(Debug, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor {
            id: "csv",
            summary: "Exports all languages into a single CSV.",
            params: PARAMS,
        }
    }

    fn export(
        &self,
        languages: &[LanguageRecord],
        config: &dyn PluginConfig,
    ) -> Option<LocalizationError> {
        let Some(output) = config.get_str("output") else {
            return Some(LocalizationError::plugin_error(
                "csv exporter: the `output` setting is required",
            ));
        };

        match write_to_path(Path::new(&output), languages) {
            Ok(()) => {
                tracing::info!(event = "export_csv_done", path = %output);
                None
            }
            Err(ExportFailure::Io(e)) => Some(LocalizationError::file_error(format!(
                "Unable to write to output file: {output}. {e}"
            ))),
            Err(ExportFailure::NoMaster) => Some(LocalizationError::plugin_error(
                "csv exporter: no master language in the record set",
            )),
        }
    }
}

#[derive(Debug)]
enum ExportFailure {
    Io(std::io::Error),
    NoMaster,
}

impl From<std::io::Error> for ExportFailure {
    fn from(e: std::io::Error) -> Self {
        ExportFailure::Io(e)
    }
}

impl From<csv::Error> for ExportFailure {
    fn from(e: csv::Error) -> Self {
        ExportFailure::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

fn write_to_path(path: &Path, languages: &[LanguageRecord]) -> Result<(), ExportFailure> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_languages_csv(file, languages)
}

/// Writer-generic body, so tests can target a buffer directly.
fn write_languages_csv<W: Write>(
    writer: W,
    languages: &[LanguageRecord],
) -> Result<(), ExportFailure> {
    let master = languages
        .iter()
        .find(|l| l.is_master())
        .ok_or(ExportFailure::NoMaster)?;

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Key", "Type", "Desc"];
    header.extend(languages.iter().map(|l| l.name().as_str()));
    wtr.write_record(&header)?;

    for row in master.rows() {
        let mut record = vec![row.key().as_str(), "Text", row.description()];
        for language in languages {
            record.push(language.row(row.key()).map_or("", |r| r.value()));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loclint_config::TomlPluginConfig;
    use loclint_core::LanguageDecl;

    fn language(name: &str, is_master: bool, rows: &[(&str, &str, &str)]) -> LanguageRecord {
        let decl = LanguageDecl::new(name, format!("loc/{name}.csv"), is_master);
        let mut record = LanguageRecord::new(&decl);
        for (i, (key, desc, value)) in rows.iter().enumerate() {
            record.add_text(*key, *desc, *value, i as u32 + 2).unwrap();
        }
        record
    }

    #[test]
    fn writes_master_order_with_one_column_per_language() {
        let languages = vec![
            language(
                "english",
                true,
                &[("greeting", "Start screen", "Hello"), ("farewell", "", "Bye")],
            ),
            language("german", false, &[("greeting", "", "Hallo"), ("farewell", "", "Tschüss")]),
        ];

        let mut buf = Vec::new();
        write_languages_csv(&mut buf, &languages).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Key,Type,Desc,english,german");
        assert_eq!(lines[1], "greeting,Text,Start screen,Hello,Hallo");
        assert_eq!(lines[2], "farewell,Text,,Bye,Tschüss");
    }

    #[test]
    fn missing_keys_become_empty_fields() {
        let languages = vec![
            language("english", true, &[("greeting", "", "Hello")]),
            language("german", false, &[]),
        ];
        let mut buf = Vec::new();
        write_languages_csv(&mut buf, &languages).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.lines().any(|l| l == "greeting,Text,,Hello,"));
    }

    #[test]
    fn creates_parent_directories_for_the_output() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("nested").join("all.csv");
        let table: toml::Table =
            toml::from_str(&format!("output = {:?}", out.to_str().unwrap())).unwrap();
        let languages = vec![language("english", true, &[("greeting", "", "Hello")])];

        let result = CsvExporter.export(&languages, &TomlPluginConfig::new(&table));
        assert!(result.is_none(), "unexpected soft failure: {result:?}");
        assert!(out.is_file());
    }

    #[test]
    fn missing_output_setting_is_a_plugin_error() {
        let table = toml::Table::new();
        let languages = vec![language("english", true, &[])];
        let err = CsvExporter
            .export(&languages, &TomlPluginConfig::new(&table))
            .unwrap();
        assert_eq!(err.kind, loclint_core::ErrorKind::PluginError);
    }

    #[test]
    fn unwritable_output_is_a_file_error() {
        let tmp = tempfile::tempdir().unwrap();
        // The output path is an existing directory, so creating it fails.
        let table: toml::Table =
            toml::from_str(&format!("output = {:?}", tmp.path().to_str().unwrap())).unwrap();
        let languages = vec![language("english", true, &[])];
        let err = CsvExporter
            .export(&languages, &TomlPluginConfig::new(&table))
            .unwrap();
        assert_eq!(err.kind, loclint_core::ErrorKind::FileError);
    }
}
