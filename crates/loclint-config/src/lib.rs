//! Run configuration: the `loclint.toml` document and the TOML-backed
//! settings accessor handed to plugins.
//!
//! Search order when no explicit path is given: `./loclint.toml`, then
//! `<user config dir>/loclint/loclint.toml`.

use std::path::{Path, PathBuf};

use loclint_plugin_api::PluginConfig;
use serde::Deserialize;

/// The whole `loclint.toml` document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocLintConfig {
    /// Ordered; declaration order defines the working set and the column
    /// order of exported artifacts.
    #[serde(default)]
    pub languages: Vec<LanguageCfg>,
    /// Exactly one importer per run; enforced by the driver, not here.
    pub importer: Option<ImporterCfg>,
    /// Zero or more, run in order.
    #[serde(default)]
    pub exporters: Vec<ExporterCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageCfg {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub master: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImporterCfg {
    /// Registry id of the importer plugin, e.g. `csv`.
    pub plugin: String,
    #[serde(default)]
    pub settings: toml::Table,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExporterCfg {
    pub plugin: String,
    #[serde(default)]
    pub settings: toml::Table,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config file found (looked for ./loclint.toml and the user config dir)")]
    NotFound,

    #[error("cannot read `{path}`: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse `{path}`: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load and parse one config file.
pub fn load_config(path: &Path) -> Result<LocLintConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Locate a config file using the documented search order.
pub fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from("loclint.toml");
    if local.is_file() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("loclint").join("loclint.toml");
    user.is_file().then_some(user)
}

/// [`PluginConfig`] over a plugin's `settings` table.
///
/// TOML values are typed, so the numeric/boolean accessors take the native
/// type first and fall back to parsing a string form; anything else yields
/// the caller's default.
pub struct TomlPluginConfig<'a> {
    settings: &'a toml::Table,
}

impl<'a> TomlPluginConfig<'a> {
    pub fn new(settings: &'a toml::Table) -> Self {
        Self { settings }
    }
}

impl PluginConfig for TomlPluginConfig<'_> {
    fn get_str(&self, setting: &str) -> Option<String> {
        self.settings
            .get(setting)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    fn get_int(&self, setting: &str, default: i64) -> i64 {
        match self.settings.get(setting) {
            Some(toml::Value::Integer(v)) => *v,
            Some(toml::Value::String(s)) => s.parse().unwrap_or(default),
            _ => default,
        }
    }

    fn get_bool(&self, setting: &str, default: bool) -> bool {
        match self.settings.get(setting) {
            Some(toml::Value::Boolean(v)) => *v,
            Some(toml::Value::String(s)) => s.parse().unwrap_or(default),
            _ => default,
        }
    }
}
