//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::webhook_handler;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::language::language_for_path;
use crate::output::Formatter;
use crate::status::StatusLine;
use crate::trigger::SaveEvent;
use std::path::Path;

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: &Config,
    project_root: &Path,
    formatter: &Formatter,
    status: &StatusLine,
) -> Result<()> {
    let event = save_event(&args, project_root)?;
    let handler = webhook_handler(config, status, formatter)?;

    let path = handler.handle(event).await?;
    if formatter.format() == crate::config::OutputFormat::Quiet {
        println!("{}", path.display());
    }

    Ok(())
}

/// Build the save event for `args.file`.
pub fn save_event(args: &AnalyzeArgs, project_root: &Path) -> Result<SaveEvent> {
    let path = std::path::absolute(&args.file)?;
    if !path.is_file() {
        return Err(CliError::InvalidInput(format!(
            "'{}' is not a file",
            args.file.display()
        )));
    }

    let bytes = std::fs::read(&path)?;
    let content = String::from_utf8(bytes).map_err(|_| {
        CliError::InvalidInput(format!("'{}' is not UTF-8 text", args.file.display()))
    })?;

    let language = args
        .language
        .clone()
        .unwrap_or_else(|| language_for_path(&path).to_string());

    Ok(SaveEvent {
        path,
        content,
        language,
        project_root: project_root.to_path_buf(),
    })
}
