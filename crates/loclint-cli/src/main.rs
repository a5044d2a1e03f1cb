use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use loclint_services::PluginRegistry;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod ui;

use commands::check::OutputFormat;

#[derive(Parser)]
#[command(name = "loclint", version, about = "Localization consistency checker")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import every declared language, check candidates against the master,
    /// run the configured exporters
    Check {
        /// Config file (default: ./loclint.toml, then the user config dir)
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the available importer and exporter plugins
    Plugins,

    /// Write a starter loclint.toml into the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Dump JSON schemas of the machine-readable outputs
    Schema {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = rolling::daily("logs", "loclint.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = init_tracing();

    let cli = Cli::parse();

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    // The registry is the only plugin source in the process: built once
    // here, passed down by reference.
    let registry = PluginRegistry::with_builtins();

    let code = match cli.cmd {
        Commands::Check { config, format } => {
            commands::check::run_check(config, format, use_color, &registry)?
        }
        Commands::Plugins => commands::plugins::run_plugins(&registry)?,
        Commands::Init { force } => commands::init::run_init(force)?,
        Commands::Schema { out_dir } => commands::schema::run_schema(out_dir)?,
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
