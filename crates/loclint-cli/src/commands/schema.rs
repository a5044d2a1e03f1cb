use std::fs;
use std::path::PathBuf;

pub fn run_schema(out_dir: Option<PathBuf>) -> color_eyre::Result<i32> {
    let out_dir = out_dir.unwrap_or_else(|| PathBuf::from("./docs/schemas"));
    fs::create_dir_all(&out_dir)?;
    macro_rules! dump {
        ($ty:ty, $name:literal) => {{
            let schema = schemars::schema_for!($ty);
            let path = out_dir.join($name);
            let f = std::fs::File::create(&path)?;
            serde_json::to_writer_pretty(f, &schema)?;
        }};
    }
    dump!(loclint_core::LocalizationError, "localization_error.schema.json");
    dump!(loclint_services::RunSummary, "run_summary.schema.json");
    crate::ui_ok!("Schemas written to {}", out_dir.display());
    Ok(0)
}
