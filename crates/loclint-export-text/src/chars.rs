//! Exports the set of characters each language actually uses, plus the
//! union across all languages. Font and glyph-atlas tooling consumes these.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use loclint_core::{LanguageRecord, LocalizationError};
use loclint_plugin_api::{Exporter, ParamKind, ParamSpec, PluginConfig, PluginDescriptor};

use crate::write_failure;

/// Seed for the All file when `include-alphabet` is set.
const ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,:;?!'\"";

const PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "output-dir",
        summary: "Directory to write the character files to.",
        kind: ParamKind::Path,
        required: true,
    },
    ParamSpec {
        name: "include-alphabet",
        summary: "If true, seed the All file with a-z, A-Z, 0-9 and basic punctuation.",
        kind: ParamKind::Bool,
        required: false,
    },
];

/// The character-set exporter, registered as `chars`.
#[derive(Debug, Default)]
pub struct CharsExporter;

impl Exporter for CharsExporter {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor {
            id: "chars",
            summary: "Exports every character per language and across all languages.",
            params: PARAMS,
        }
    }

    fn export(
        &self,
        languages: &[LanguageRecord],
        config: &dyn PluginConfig,
    ) -> Option<LocalizationError> {
        let Some(output_dir) = config.get_str("output-dir") else {
            return Some(LocalizationError::plugin_error(
                "chars exporter: the `output-dir` setting is required",
            ));
        };
        let include_alphabet = config.get_bool("include-alphabet", false);

        let dir = PathBuf::from(&output_dir);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            return Some(write_failure(&output_dir, &e));
        }

        let mut all: BTreeSet<char> = BTreeSet::new();
        if include_alphabet {
            all.extend(ALPHABET.chars());
        }

        for language in languages {
            let mut used: BTreeSet<char> = BTreeSet::new();
            for row in language.rows() {
                for ch in row.value().chars().filter(|c| !c.is_whitespace()) {
                    used.insert(ch);
                }
            }
            all.extend(used.iter().copied());

            let path = dir.join(format!("{}-Characters.txt", language.name()));
            if let Err(e) = write_charset(&path, &used) {
                return Some(write_failure(&path.display().to_string(), &e));
            }
        }

        let all_path = dir.join("All-Characters.txt");
        if let Err(e) = write_charset(&all_path, &all) {
            return Some(write_failure(&all_path.display().to_string(), &e));
        }
        tracing::info!(
            event = "export_chars_done",
            dir = %output_dir,
            unique = all.len(),
        );
        None
    }
}

fn write_charset(path: &Path, chars: &BTreeSet<char>) -> std::io::Result<()> {
    std::fs::write(path, chars.iter().collect::<String>())
}
