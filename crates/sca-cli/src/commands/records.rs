//! Records command implementation.

use crate::cli::{RecordsAction, RecordsArgs};
use crate::error::Result;
use crate::output::Formatter;
use sca_store::DatasetStore;
use std::path::Path;

/// Execute the records command.
pub async fn execute_records(
    args: RecordsArgs,
    project_root: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let store = DatasetStore::for_project(project_root);

    let output = match args.action {
        RecordsAction::List => formatter.format_records(&store.list()?)?,
        RecordsAction::Show { id } => {
            let stored = store.find(&id)?;
            let ground_truth = store.ground_truth(&stored.name)?;
            formatter.format_record(&stored, ground_truth.as_ref())?
        }
        RecordsAction::Duplicates => formatter.format_duplicates(&store.duplicates()?)?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
