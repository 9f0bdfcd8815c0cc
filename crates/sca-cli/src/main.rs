//! SCA Capture - send saved files to the analysis webhook and collect the verdicts.

use clap::Parser;
use sca_cli::commands;
use sca_cli::workspace::resolve_project_root;
use sca_cli::{Cli, Command, Config, Formatter, OutputFormat, StatusLine};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> sca_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (log to stderr, RUST_LOG wins)
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    // Load config, then apply the command-line / environment override
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?.with_backend_override(cli.backend_url);

    // Determine output format and color setting
    let format: OutputFormat = cli.format.map(Into::into).unwrap_or(OutputFormat::Table);
    let color_enabled = !cli.no_color;

    let formatter = Formatter::new(format, color_enabled);
    let project_root = resolve_project_root(&cli.workspaces);

    match cli.command {
        Command::Analyze(args) => {
            config.validate()?;
            let status = status_line(format, color_enabled);
            commands::execute_analyze(args, &config, &project_root, &formatter, &status).await?;
        }
        Command::Watch(args) => {
            config.validate()?;
            let status = status_line(format, color_enabled);
            commands::execute_watch(args, &config, &project_root, &formatter, &status).await?;
        }
        Command::Records(args) => {
            commands::execute_records(args, &project_root, &formatter).await?;
        }
        Command::Annotate(args) => {
            commands::execute_annotate(args, &project_root, &formatter).await?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await?;
        }
    }

    Ok(())
}

/// One status line per process; only the table format renders it.
fn status_line(format: OutputFormat, color_enabled: bool) -> StatusLine {
    match format {
        OutputFormat::Table => StatusLine::new(color_enabled),
        _ => StatusLine::silent(),
    }
}
