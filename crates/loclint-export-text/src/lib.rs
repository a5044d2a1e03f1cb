//! Text-oriented exporters: a transposed key matrix, templated copy per
//! language, and per-language character sets.

mod chars;
mod keys;
mod template;

pub use chars::CharsExporter;
pub use keys::KeysExporter;
pub use template::TemplateExporter;

use std::path::Path;

use loclint_core::LocalizationError;

/// Shared I/O-failure shape: reads and writes report the offending path.
fn read_failure(what: &str, path: &str, e: &std::io::Error) -> LocalizationError {
    LocalizationError::file_error(format!("Unable to read {what}: {path}. {e}"))
}

fn write_failure(path: &str, e: &std::io::Error) -> LocalizationError {
    LocalizationError::file_error(format!("Unable to write to output file: {path}. {e}"))
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test_support {
    use loclint_core::{LanguageDecl, LanguageRecord};

    pub fn language(name: &str, is_master: bool, rows: &[(&str, &str)]) -> LanguageRecord {
        let decl = LanguageDecl::new(name, format!("loc/{name}.csv"), is_master);
        let mut record = LanguageRecord::new(&decl);
        for (i, (key, value)) in rows.iter().enumerate() {
            record.add_text(*key, "", *value, i as u32 + 2).unwrap();
        }
        record
    }

    pub fn settings(toml_src: &str) -> toml::Table {
        toml::from_str(toml_src).unwrap()
    }
}
