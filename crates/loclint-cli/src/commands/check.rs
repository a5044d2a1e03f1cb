use std::path::PathBuf;

use clap::ValueEnum;
use loclint_config::ConfigError;
use loclint_core::{ErrorKind, LanguageRecord, LocalizationError};
use loclint_services::{run_pipeline, PluginRegistry, RunReport, ServiceError};

// Exit codes: 0 clean, 1 findings, 2 config missing/unreadable, 3 config
// invalid, 4 plugin or import hard failure, 5 master count wrong.
const EXIT_FINDINGS: i32 = 1;
const EXIT_CONFIG_MISSING: i32 = 2;
const EXIT_CONFIG_INVALID: i32 = 3;
const EXIT_PLUGIN_FAILURE: i32 = 4;
const EXIT_MASTER_COUNT: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run_check(
    config_path: Option<PathBuf>,
    format: OutputFormat,
    use_color: bool,
    registry: &PluginRegistry,
) -> color_eyre::Result<i32> {
    let path = match config_path.or_else(loclint_config::find_config) {
        Some(path) => path,
        None => {
            crate::ui_err!("{}", ConfigError::NotFound);
            return Ok(EXIT_CONFIG_MISSING);
        }
    };
    tracing::debug!(event = "check_args", config = %path.display(), format = ?format);

    let config = match loclint_config::load_config(&path) {
        Ok(config) => config,
        Err(e @ (ConfigError::NotFound | ConfigError::Unreadable { .. })) => {
            crate::ui_err!("{e}");
            return Ok(EXIT_CONFIG_MISSING);
        }
        Err(e @ ConfigError::Invalid { .. }) => {
            crate::ui_err!("{e}");
            return Ok(EXIT_CONFIG_INVALID);
        }
    };

    let report = match run_pipeline(&config, registry) {
        Ok(report) => report,
        Err(e) => {
            crate::ui_err!("{e}");
            return Ok(match e {
                ServiceError::NoLanguages | ServiceError::DuplicateLanguage { .. } => {
                    EXIT_CONFIG_INVALID
                }
                ServiceError::MasterCount { .. } => EXIT_MASTER_COUNT,
                ServiceError::NoImporter
                | ServiceError::UnknownImporter { .. }
                | ServiceError::UnknownExporter { .. }
                | ServiceError::MasterImportFailed { .. } => EXIT_PLUGIN_FAILURE,
            });
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.summary())?),
        OutputFormat::Text => print_report(&report, use_color),
    }

    Ok(if report.has_findings() { EXIT_FINDINGS } else { 0 })
}

fn print_report(report: &RunReport, use_color: bool) {
    for failure in &report.import_failures {
        crate::ui_warn!("Skipped {}: {}", failure.name, failure.error.message);
    }

    for language in &report.languages {
        if language.has_errors() {
            print_language_block(language, use_color);
        }
    }

    if !report.plugin_errors.is_empty() {
        crate::ui_warn!("Exporter failures:");
        for error in &report.plugin_errors {
            println!("  {}", render_error(error, use_color));
        }
    }

    let total = report.total_errors();
    if total > 0 {
        crate::ui_out!(
            "Encountered {} error(s) across {} language(s).",
            total,
            report.languages_with_errors()
        );
    } else {
        crate::ui_ok!("Languages validated. No errors encountered!");
    }
}

fn print_language_block(language: &LanguageRecord, use_color: bool) {
    crate::ui_out!(
        "Errors in {} ({})",
        language.name(),
        language.source_path().display()
    );
    for error in language.errors() {
        println!("  {}", render_error(error, use_color));
    }
    println!();
}

fn render_error(error: &LocalizationError, use_color: bool) -> String {
    if !use_color {
        return format!(
            "[{}] line {} — {}",
            error.kind, error.line, error.message
        );
    }

    use owo_colors::OwoColorize;
    let kind_tag: String = match error.kind {
        ErrorKind::KeysMissing | ErrorKind::KeysAdded | ErrorKind::KeysNotInOrder => {
            format!("{}", error.kind.yellow())
        }
        ErrorKind::FormatArgsAdded | ErrorKind::FormatArgsOpen | ErrorKind::FormatArgMissing => {
            format!("{}", error.kind.cyan())
        }
        ErrorKind::EmptyTerm => format!("{}", error.kind.red()),
        ErrorKind::FileError | ErrorKind::PluginError => format!("{}", error.kind.magenta()),
    };
    format!(
        "[{}] line {} — {}",
        kind_tag,
        error.line.to_string().magenta(),
        error.message
    )
}
