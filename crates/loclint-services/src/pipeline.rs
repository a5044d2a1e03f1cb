//! The import → check → export pipeline.

use loclint_config::{LocLintConfig, TomlPluginConfig};
use loclint_core::{LanguageDecl, LocalizationError};
use loclint_plugin_api::Exporter;
use loclint_validate::check_language;
use thiserror::Error;

use crate::registry::PluginRegistry;
use crate::report::{ImportFailure, RunReport};

/// Hard failures that abort a run before it can produce a report. Soft
/// failures (a candidate that will not import, an exporter that cannot
/// write) live inside [`RunReport`] instead.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no languages declared")]
    NoLanguages,

    #[error("language `{name}` is declared more than once")]
    DuplicateLanguage { name: String },

    #[error("exactly one language must be flagged master, found {found}")]
    MasterCount { found: usize },

    #[error("no importer configured")]
    NoImporter,

    #[error("unknown importer plugin `{id}`")]
    UnknownImporter { id: String },

    #[error("unknown exporter plugin `{id}`")]
    UnknownExporter { id: String },

    #[error("cannot import master language `{name}`: {message}")]
    MasterImportFailed { name: String, message: String },
}

/// Run the whole pipeline over an already-loaded configuration.
///
/// 1. Validate the language set (nonempty, unique names, exactly one
///    master).
/// 2. Resolve the importer and every exporter; unknown ids fail fast,
///    before any file is touched.
/// 3. Import every language in declaration order. A failing candidate is
///    recorded and skipped; a failing master aborts the run.
/// 4. Check every candidate against the master.
/// 5. Run the exporters in order over the full surviving set, collecting
///    soft failures; one failing exporter never stops the next.
pub fn run_pipeline(
    config: &LocLintConfig,
    registry: &PluginRegistry,
) -> Result<RunReport, ServiceError> {
    validate_language_set(config)?;

    let importer_cfg = config.importer.as_ref().ok_or(ServiceError::NoImporter)?;
    let importer =
        registry
            .create_importer(&importer_cfg.plugin)
            .ok_or_else(|| ServiceError::UnknownImporter {
                id: importer_cfg.plugin.clone(),
            })?;

    let mut exporters: Vec<(Box<dyn Exporter>, &toml::Table)> = Vec::new();
    for exporter_cfg in &config.exporters {
        let exporter = registry.create_exporter(&exporter_cfg.plugin).ok_or_else(|| {
            ServiceError::UnknownExporter {
                id: exporter_cfg.plugin.clone(),
            }
        })?;
        exporters.push((exporter, &exporter_cfg.settings));
    }

    let importer_settings = TomlPluginConfig::new(&importer_cfg.settings);
    let mut languages = Vec::new();
    let mut import_failures = Vec::new();
    for language_cfg in &config.languages {
        let decl = LanguageDecl::new(
            language_cfg.name.as_str(),
            language_cfg.path.clone(),
            language_cfg.master,
        );
        match importer.import(&decl, &importer_settings) {
            Ok(language) => {
                tracing::info!(
                    event = "language_imported",
                    language = %language.name(),
                    rows = language.row_count(),
                );
                languages.push(language);
            }
            Err(e) if decl.is_master => {
                return Err(ServiceError::MasterImportFailed {
                    name: language_cfg.name.clone(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(
                    event = "language_import_failed",
                    language = %decl.name,
                    error = %e,
                );
                import_failures.push(ImportFailure {
                    name: decl.name.clone(),
                    error: LocalizationError::file_error(e.to_string()),
                });
            }
        }
    }

    // The set was validated above, so exactly one imported record is the
    // master (a master import failure already aborted).
    let master_index = languages
        .iter()
        .position(|l| l.is_master())
        .expect("master import failure aborts before this point");
    let master = languages.remove(master_index);
    for candidate in &mut languages {
        check_language(&master, candidate);
        tracing::debug!(
            event = "language_checked",
            language = %candidate.name(),
            findings = candidate.errors().len(),
        );
    }
    languages.insert(master_index, master);

    let mut plugin_errors = Vec::new();
    for (exporter, settings) in &exporters {
        let id = exporter.descriptor().id;
        if let Some(error) = exporter.export(&languages, &TomlPluginConfig::new(settings)) {
            tracing::warn!(event = "exporter_failed", exporter = id, error = %error);
            plugin_errors.push(error);
        } else {
            tracing::info!(event = "exporter_done", exporter = id);
        }
    }

    Ok(RunReport {
        languages,
        import_failures,
        plugin_errors,
    })
}

fn validate_language_set(config: &LocLintConfig) -> Result<(), ServiceError> {
    if config.languages.is_empty() {
        return Err(ServiceError::NoLanguages);
    }
    let mut seen = std::collections::HashSet::new();
    for language in &config.languages {
        if !seen.insert(language.name.as_str()) {
            return Err(ServiceError::DuplicateLanguage {
                name: language.name.clone(),
            });
        }
    }
    let masters = config.languages.iter().filter(|l| l.master).count();
    if masters != 1 {
        return Err(ServiceError::MasterCount { found: masters });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loclint_config::{ExporterCfg, ImporterCfg, LanguageCfg};
    use loclint_core::ErrorKind;
    use std::path::Path;

    fn language_cfg(name: &str, path: &Path, master: bool) -> LanguageCfg {
        LanguageCfg {
            name: name.to_string(),
            path: path.to_path_buf(),
            master,
        }
    }

    fn csv_importer_cfg() -> ImporterCfg {
        ImporterCfg {
            plugin: "csv".to_string(),
            settings: toml::Table::new(),
        }
    }

    fn write_master(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("english.csv");
        std::fs::write(
            &path,
            "Key,Desc,Value\ngreeting,Start,Hello {name}!\nfarewell,End,Goodbye\n",
        )
        .unwrap();
        path
    }

    fn write_candidate(dir: &Path, name: &str, rows: &str) -> std::path::PathBuf {
        let path = dir.join(format!("{name}.csv"));
        std::fs::write(&path, format!("Key,Desc,Master,Value\n{rows}")).unwrap();
        path
    }

    #[test]
    fn clean_run_produces_no_findings() {
        let tmp = tempfile::tempdir().unwrap();
        let master = write_master(tmp.path());
        let german = write_candidate(
            tmp.path(),
            "german",
            "greeting,,Hello {name}!,Hallo {name}!\nfarewell,,Goodbye,Tschüss\n",
        );
        let config = LocLintConfig {
            languages: vec![
                language_cfg("english", &master, true),
                language_cfg("german", &german, false),
            ],
            importer: Some(csv_importer_cfg()),
            exporters: Vec::new(),
        };

        let report = run_pipeline(&config, &PluginRegistry::with_builtins()).unwrap();
        assert!(!report.has_findings(), "summary: {:?}", report.summary());
        assert_eq!(report.languages.len(), 2);
        assert!(report.languages[0].is_master(), "declaration order is kept");
    }

    #[test]
    fn findings_land_on_the_right_candidate() {
        let tmp = tempfile::tempdir().unwrap();
        let master = write_master(tmp.path());
        let german = write_candidate(
            tmp.path(),
            "german",
            "greeting,,Hello {name}!,Hallo!\nfarewell,,Goodbye,Tschüss\n",
        );
        let config = LocLintConfig {
            languages: vec![
                language_cfg("english", &master, true),
                language_cfg("german", &german, false),
            ],
            importer: Some(csv_importer_cfg()),
            exporters: Vec::new(),
        };

        let report = run_pipeline(&config, &PluginRegistry::with_builtins()).unwrap();
        assert_eq!(report.total_errors(), 1);
        assert_eq!(report.languages_with_errors(), 1);
        let german = &report.languages[1];
        assert_eq!(german.errors()[0].kind, ErrorKind::FormatArgMissing);
        assert!(report.languages[0].errors().is_empty(), "master stays clean");
    }

    #[test]
    fn failing_candidate_is_skipped_but_the_run_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let master = write_master(tmp.path());
        let german = write_candidate(
            tmp.path(),
            "german",
            "greeting,,Hello {name}!,Hallo {name}!\nfarewell,,Goodbye,Tschüss\n",
        );
        let config = LocLintConfig {
            languages: vec![
                language_cfg("english", &master, true),
                language_cfg("ghost", &tmp.path().join("ghost.csv"), false),
                language_cfg("german", &german, false),
            ],
            importer: Some(csv_importer_cfg()),
            exporters: Vec::new(),
        };

        let report = run_pipeline(&config, &PluginRegistry::with_builtins()).unwrap();
        assert_eq!(report.languages.len(), 2, "ghost is excluded");
        assert_eq!(report.import_failures.len(), 1);
        assert_eq!(report.import_failures[0].name.as_str(), "ghost");
        assert_eq!(report.import_failures[0].error.kind, ErrorKind::FileError);
        assert!(report.has_findings());
    }

    #[test]
    fn failing_master_aborts_the_run() {
        let tmp = tempfile::tempdir().unwrap();
        let german = write_candidate(tmp.path(), "german", "greeting,,Hello,Hallo\n");
        let config = LocLintConfig {
            languages: vec![
                language_cfg("english", &tmp.path().join("ghost.csv"), true),
                language_cfg("german", &german, false),
            ],
            importer: Some(csv_importer_cfg()),
            exporters: Vec::new(),
        };

        let err = run_pipeline(&config, &PluginRegistry::with_builtins()).unwrap_err();
        assert!(matches!(err, ServiceError::MasterImportFailed { .. }));
    }

    #[test]
    fn language_set_is_validated_up_front() {
        let tmp = tempfile::tempdir().unwrap();
        let master = write_master(tmp.path());
        let registry = PluginRegistry::with_builtins();

        let empty = LocLintConfig::default();
        assert!(matches!(
            run_pipeline(&empty, &registry).unwrap_err(),
            ServiceError::NoLanguages
        ));

        let no_master = LocLintConfig {
            languages: vec![language_cfg("english", &master, false)],
            importer: Some(csv_importer_cfg()),
            exporters: Vec::new(),
        };
        assert!(matches!(
            run_pipeline(&no_master, &registry).unwrap_err(),
            ServiceError::MasterCount { found: 0 }
        ));

        let two_masters = LocLintConfig {
            languages: vec![
                language_cfg("english", &master, true),
                language_cfg("british", &master, true),
            ],
            importer: Some(csv_importer_cfg()),
            exporters: Vec::new(),
        };
        assert!(matches!(
            run_pipeline(&two_masters, &registry).unwrap_err(),
            ServiceError::MasterCount { found: 2 }
        ));

        let duplicated = LocLintConfig {
            languages: vec![
                language_cfg("english", &master, true),
                language_cfg("english", &master, false),
            ],
            importer: Some(csv_importer_cfg()),
            exporters: Vec::new(),
        };
        assert!(matches!(
            run_pipeline(&duplicated, &registry).unwrap_err(),
            ServiceError::DuplicateLanguage { .. }
        ));
    }

    #[test]
    fn unknown_plugin_ids_fail_before_any_import() {
        let tmp = tempfile::tempdir().unwrap();
        let master = write_master(tmp.path());
        let registry = PluginRegistry::with_builtins();

        let bad_importer = LocLintConfig {
            languages: vec![language_cfg("english", &master, true)],
            importer: Some(ImporterCfg {
                plugin: "xlsx".to_string(),
                settings: toml::Table::new(),
            }),
            exporters: Vec::new(),
        };
        assert!(matches!(
            run_pipeline(&bad_importer, &registry).unwrap_err(),
            ServiceError::UnknownImporter { .. }
        ));

        let bad_exporter = LocLintConfig {
            languages: vec![language_cfg("english", &master, true)],
            importer: Some(csv_importer_cfg()),
            exporters: vec![ExporterCfg {
                plugin: "nope".to_string(),
                settings: toml::Table::new(),
            }],
        };
        assert!(matches!(
            run_pipeline(&bad_exporter, &registry).unwrap_err(),
            ServiceError::UnknownExporter { .. }
        ));
    }

    #[test]
    fn exporter_soft_failures_are_collected_and_do_not_stop_later_exporters() {
        let tmp = tempfile::tempdir().unwrap();
        let master = write_master(tmp.path());
        let out = tmp.path().join("all.csv");
        let config = LocLintConfig {
            languages: vec![language_cfg("english", &master, true)],
            importer: Some(csv_importer_cfg()),
            exporters: vec![
                // No `output` setting: a guaranteed soft failure.
                ExporterCfg {
                    plugin: "csv".to_string(),
                    settings: toml::Table::new(),
                },
                ExporterCfg {
                    plugin: "csv".to_string(),
                    settings: toml::from_str(&format!("output = {:?}", out.to_str().unwrap()))
                        .unwrap(),
                },
            ],
        };

        let report = run_pipeline(&config, &PluginRegistry::with_builtins()).unwrap();
        assert_eq!(report.plugin_errors.len(), 1);
        assert_eq!(report.plugin_errors[0].kind, ErrorKind::PluginError);
        assert!(out.is_file(), "second exporter still ran");
    }

    #[test]
    fn summary_serializes_with_schema_version() {
        let tmp = tempfile::tempdir().unwrap();
        let master = write_master(tmp.path());
        let config = LocLintConfig {
            languages: vec![language_cfg("english", &master, true)],
            importer: Some(csv_importer_cfg()),
            exporters: Vec::new(),
        };
        let report = run_pipeline(&config, &PluginRegistry::with_builtins()).unwrap();
        let summary = report.summary();
        assert_eq!(summary.schema_version, loclint_core::SCHEMA_VERSION);
        assert_eq!(summary.total_errors, 0);
    }
}
