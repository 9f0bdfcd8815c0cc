//! Annotate command implementation.

use crate::cli::AnnotateArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sca_domain::GroundTruth;
use sca_store::DatasetStore;
use std::path::{Path, PathBuf};

/// Execute the annotate command.
pub async fn execute_annotate(
    args: AnnotateArgs,
    project_root: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let path = annotate(args, project_root)?;
    println!(
        "{}",
        formatter.success(&format!("Ground truth saved: {}", path.display()))
    );
    Ok(())
}

/// Write the ground-truth sidecar described by `args`.
pub fn annotate(args: AnnotateArgs, project_root: &Path) -> Result<PathBuf> {
    if args.verdict.is_none() && args.basis.is_none() && args.license_risk.is_none() {
        return Err(CliError::InvalidInput(
            "at least one of --verdict, --basis or --license-risk is required".to_string(),
        ));
    }

    let store = DatasetStore::for_project(project_root);
    let record = store.find(&args.id)?;

    let mut ground_truth = GroundTruth::new(&record.name)
        .with_confidence(args.confidence.into())
        .with_notes(args.notes);
    if let Some(verdict) = args.verdict {
        ground_truth = ground_truth.with_verdict(verdict.into());
    }
    if let Some(basis) = args.basis {
        ground_truth = ground_truth.with_basis(basis.into());
    }
    if let Some(risk) = args.license_risk {
        ground_truth = ground_truth.with_license_risk(risk.into());
    }

    Ok(store.annotate(&record.name, ground_truth)?)
}
