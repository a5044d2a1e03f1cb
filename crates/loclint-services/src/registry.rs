//! Explicit plugin resolution.
//!
//! The registry is a plain value: the driver builds one at process start
//! (usually via [`PluginRegistry::with_builtins`]) and passes it by
//! reference into the pipeline. There is no discovery, no global state, and
//! nothing outlives the run that created it.

use std::collections::BTreeMap;

use loclint_plugin_api::{Exporter, Importer, PluginDescriptor};

type ImporterFactory = Box<dyn Fn() -> Box<dyn Importer> + Send + Sync>;
type ExporterFactory = Box<dyn Fn() -> Box<dyn Exporter> + Send + Sync>;

/// Maps configuration-supplied plugin ids to constructors.
///
/// Importer and exporter ids are separate namespaces; `csv` names both the
/// spreadsheet importer and the all-languages exporter.
#[derive(Default)]
pub struct PluginRegistry {
    importers: BTreeMap<&'static str, ImporterFactory>,
    exporters: BTreeMap<&'static str, ExporterFactory>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in plugin registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_importer("csv", || Box::new(loclint_import_csv::CsvImporter));
        registry.register_exporter("csv", || Box::new(loclint_export_csv::CsvExporter));
        registry.register_exporter("keys", || Box::new(loclint_export_text::KeysExporter));
        registry.register_exporter("template", || Box::new(loclint_export_text::TemplateExporter));
        registry.register_exporter("chars", || Box::new(loclint_export_text::CharsExporter));
        registry
    }

    pub fn register_importer<F>(&mut self, id: &'static str, factory: F)
    where
        F: Fn() -> Box<dyn Importer> + Send + Sync + 'static,
    {
        self.importers.insert(id, Box::new(factory));
    }

    pub fn register_exporter<F>(&mut self, id: &'static str, factory: F)
    where
        F: Fn() -> Box<dyn Exporter> + Send + Sync + 'static,
    {
        self.exporters.insert(id, Box::new(factory));
    }

    pub fn create_importer(&self, id: &str) -> Option<Box<dyn Importer>> {
        self.importers.get(id).map(|f| f())
    }

    pub fn create_exporter(&self, id: &str) -> Option<Box<dyn Exporter>> {
        self.exporters.get(id).map(|f| f())
    }

    /// Descriptors of every registered importer, in id order.
    pub fn importer_descriptors(&self) -> Vec<PluginDescriptor> {
        self.importers.values().map(|f| f().descriptor()).collect()
    }

    /// Descriptors of every registered exporter, in id order.
    pub fn exporter_descriptors(&self) -> Vec<PluginDescriptor> {
        self.exporters.values().map(|f| f().descriptor()).collect()
    }
}
