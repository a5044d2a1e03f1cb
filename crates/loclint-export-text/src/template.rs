//! Renders a template file once per language, replacing `{key}` slots with
//! that language's text.
//!
//! Handy for collating several terms into store-page copy: write the page
//! once with slots, export, paste the per-language blocks.

use std::fmt::Write as _;
use std::path::Path;

use loclint_core::{scan_placeholders, LanguageRecord, LocalizationError, RowKey};
use loclint_plugin_api::{Exporter, ParamKind, ParamSpec, PluginConfig, PluginDescriptor};

use crate::{ensure_parent, read_failure, write_failure};

const PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "template-file",
        summary: "Template with localization keys in {slots}.",
        kind: ParamKind::Path,
        required: true,
    },
    ParamSpec {
        name: "output",
        summary: "File to write the rendered copies to.",
        kind: ParamKind::Path,
        required: true,
    },
];

/// The templated-copy exporter, registered as `template`.
#[derive(Debug, Default)]
pub struct TemplateExporter;

impl Exporter for TemplateExporter {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor {
            id: "template",
            summary: "Exports a copy of a template per language with slots replaced by localized text.",
            params: PARAMS,
        }
    }

    fn export(
        &self,
        languages: &[LanguageRecord],
        config: &dyn PluginConfig,
    ) -> Option<LocalizationError> {
        let Some(template_file) = config.get_str("template-file") else {
            return Some(LocalizationError::plugin_error(
                "template exporter: the `template-file` setting is required",
            ));
        };
        let Some(output) = config.get_str("output") else {
            return Some(LocalizationError::plugin_error(
                "template exporter: the `output` setting is required",
            ));
        };

        let template = match std::fs::read_to_string(&template_file) {
            Ok(s) => s,
            Err(e) => return Some(read_failure("template file", &template_file, &e)),
        };

        // Slots use the same delimiters as row placeholders, and the same
        // scanner, so the two syntaxes cannot drift apart.
        let scan = scan_placeholders(&template);
        if scan.unterminated {
            return Some(LocalizationError::plugin_error(
                "Template file has a malformed placeholder slot.",
            ));
        }

        let rendered = render(&template, &scan.tokens, languages);
        let path = Path::new(&output);
        if let Err(e) = ensure_parent(path).and_then(|_| std::fs::write(path, rendered)) {
            return Some(write_failure(&output, &e));
        }
        tracing::info!(event = "export_template_done", path = %output);
        None
    }
}

fn render(template: &str, tokens: &[String], languages: &[LanguageRecord]) -> String {
    let mut out = String::new();
    for language in languages {
        let mut copy = template.to_string();
        for token in tokens {
            // Token keeps its delimiters; the row key is the bare inside.
            let key = RowKey::from(token.trim_matches(|c| c == '{' || c == '}'));
            match language.row(&key) {
                Some(row) => copy = copy.replace(token.as_str(), row.value()),
                None => {
                    tracing::warn!(
                        event = "template_key_missing",
                        language = %language.name(),
                        key = %key,
                    );
                }
            }
        }
        let _ = writeln!(out, "Language: {}", language.name());
        out.push_str(&copy);
        out.push('\n');
    }
    out
}
