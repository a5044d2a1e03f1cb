use std::path::Path;

const STARTER_CONFIG: &str = r#"# loclint run configuration.
# Declaration order defines the working set; exactly one language must be
# flagged master.

[[languages]]
name = "english"
path = "loc/english.csv"
master = true

[[languages]]
name = "german"
path = "loc/german.csv"

[importer]
plugin = "csv"
settings = { header-rows = 1 }

[[exporters]]
plugin = "csv"
settings = { output = "out/all-languages.csv" }
"#;

pub fn run_init(force: bool) -> color_eyre::Result<i32> {
    let path = Path::new("loclint.toml");
    if path.exists() && !force {
        crate::ui_err!("{} already exists (pass --force to overwrite)", path.display());
        return Ok(1);
    }
    std::fs::write(path, STARTER_CONFIG)?;
    crate::ui_ok!("Wrote {}", path.display());
    Ok(0)
}
