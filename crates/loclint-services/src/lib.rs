//! Orchestration: the run-scoped plugin registry and the import → check →
//! export pipeline the CLI drives.

mod pipeline;
mod registry;
mod report;

pub use pipeline::{run_pipeline, ServiceError};
pub use registry::PluginRegistry;
pub use report::{ImportFailure, LanguageSummary, RunReport, RunSummary};
