//! Integration tests for save handling
//!
//! Drive `SaveHandler` end to end with a mock backend and the on-disk record
//! pipeline in a temporary workspace.

use sca_cli::config::OutputFormat;
use sca_cli::{CliError, Formatter, SaveEvent, SaveHandler, StatusColor, StatusLine, StatusState};
use sca_domain::DATASET_DIR_NAME;
use sca_store::{DatasetStore, RecordPipeline, StoreError};
use sca_webhook::{MockBackend, WebhookError};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

fn handler(backend: MockBackend) -> SaveHandler<MockBackend, RecordPipeline> {
    SaveHandler::new(
        backend,
        RecordPipeline,
        StatusLine::silent(),
        Formatter::new(OutputFormat::Quiet, false),
    )
}

fn save(root: &Path, name: &str, content: &str) -> SaveEvent {
    SaveEvent {
        path: root.join(name),
        content: content.to_string(),
        language: "python".to_string(),
        project_root: root.to_path_buf(),
    }
}

#[tokio::test]
async fn test_violation_save_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    let handler = handler(MockBackend::new(json!({
        "verdict": "violation",
        "license_risk": "high",
    })));

    let path = handler
        .handle(save(root.path(), "x.py", "print('x')"))
        .await
        .unwrap();

    assert_eq!(path.parent().unwrap(), root.path().join(DATASET_DIR_NAME));
    let stored: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["verdict"], "violation");
    assert_eq!(stored["license_risk"], "high");
    assert_eq!(stored["infringement_basis"], Value::Null);
    assert_eq!(
        stored["code_hash"],
        "51d22c08921edc1f0205612a3a6d26adf703520a4316bd857eeabc38184ff888"
    );

    let status = handler.status().current();
    assert_eq!(status.text(), "violation | high");
    assert_eq!(status.color(), StatusColor::Red);
}

#[tokio::test]
async fn test_missing_fields_display_unknown_but_store_null() {
    let root = tempfile::tempdir().unwrap();
    let handler = handler(MockBackend::default());

    let path = handler
        .handle(save(root.path(), "a.py", "x = 1"))
        .await
        .unwrap();

    assert_eq!(handler.status().current().text(), "unknown | unknown");
    assert_eq!(handler.status().current().color(), StatusColor::Default);

    let stored: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["verdict"], Value::Null);
    assert_eq!(stored["license_risk"], Value::Null);
}

#[tokio::test]
async fn test_network_failure_then_recovery() {
    let root = tempfile::tempdir().unwrap();
    let mut backend = MockBackend::new(json!({"verdict": "safe"}));
    backend.add_error(root.path().join("down.py").to_string_lossy());
    let handler = handler(backend.clone());

    let err = handler
        .handle(save(root.path(), "down.py", "a = 1"))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Network(WebhookError::Communication(_))));
    assert_eq!(handler.status().current(), StatusState::Error);
    assert!(DatasetStore::for_project(root.path()).list().unwrap().is_empty());

    // The next save is processed normally
    handler
        .handle(save(root.path(), "up.py", "b = 2"))
        .await
        .unwrap();
    assert_eq!(handler.status().current().text(), "safe | unknown");
    assert_eq!(DatasetStore::for_project(root.path()).list().unwrap().len(), 1);
    assert_eq!(backend.call_count(), 2);
}

#[tokio::test]
async fn test_blocked_dataset_directory_is_reported() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join(DATASET_DIR_NAME), "not a directory").unwrap();
    let handler = handler(MockBackend::new(json!({"verdict": "high_risk"})));

    let err = handler
        .handle(save(root.path(), "a.py", "x = 1"))
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Store(StoreError::Io { .. })));
    // The analysis itself completed, so the indicator shows its verdict
    assert_eq!(handler.status().current().color(), StatusColor::Amber);
}

#[tokio::test]
async fn test_overlapping_saves_each_write_a_record() {
    let root = tempfile::tempdir().unwrap();
    let handler = Arc::new(handler(MockBackend::new(json!({"verdict": "safe"}))));

    let mut tasks = Vec::new();
    for i in 0..8 {
        let handler = Arc::clone(&handler);
        let event = save(root.path(), "same.py", &format!("v = {}", i));
        tasks.push(tokio::spawn(async move { handler.handle(event).await }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let records = DatasetStore::for_project(root.path()).list().unwrap();
    assert_eq!(records.len(), 8);
    assert!(DatasetStore::for_project(root.path()).duplicates().unwrap().is_empty());
}
