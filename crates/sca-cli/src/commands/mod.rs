//! Command implementations.

pub mod analyze;
pub mod annotate;
pub mod config;
pub mod records;
pub mod watch;

pub use self::analyze::execute_analyze;
pub use self::annotate::execute_annotate;
pub use self::config::execute_config;
pub use self::records::execute_records;
pub use self::watch::execute_watch;

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::status::StatusLine;
use crate::trigger::SaveHandler;
use sca_store::RecordPipeline;
use sca_webhook::WebhookBackend;

/// Save handler talking to the configured webhook.
pub(crate) fn webhook_handler(
    config: &Config,
    status: &StatusLine,
    formatter: &Formatter,
) -> Result<SaveHandler<WebhookBackend, RecordPipeline>> {
    let backend = WebhookBackend::new(config.backend_url.trim())
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(SaveHandler::new(
        backend,
        RecordPipeline,
        status.clone(),
        formatter.clone(),
    ))
}
