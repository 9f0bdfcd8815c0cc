//! Watch command implementation.

use crate::cli::WatchArgs;
use crate::commands::webhook_handler;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::status::{StatusLine, StatusState};
use crate::watcher::watch_saves;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Execute the watch command.
pub async fn execute_watch(
    args: WatchArgs,
    config: &Config,
    project_root: &Path,
    formatter: &Formatter,
    status: &StatusLine,
) -> Result<()> {
    let root = project_root.canonicalize()?;
    let handler = Arc::new(webhook_handler(config, status, formatter)?);

    eprintln!(
        "{}",
        formatter.info(&format!(
            "Watching {} (webhook: {}). Press Ctrl+C to stop.",
            root.display(),
            config.backend_url
        ))
    );
    status.set(StatusState::Idle);

    watch_saves(handler, root, Duration::from_millis(args.debounce_ms)).await
}
