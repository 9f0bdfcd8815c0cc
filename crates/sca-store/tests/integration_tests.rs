//! Integration tests for sca-store
//!
//! These tests drive the record pipeline against real temporary directories.

use sca_domain::{
    AnalysisResult, AnnotationConfidence, CodeHash, EvaluationRecord, GroundTruth,
    InfringementBasis, LicenseRisk, Verdict, DATASET_DIR_NAME,
};
use sca_store::{capture_record, DatasetStore, StoreError};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_violation_scenario_record() {
    let root = tempfile::tempdir().unwrap();
    let result = AnalysisResult::from_value(json!({
        "verdict": "violation",
        "license_risk": "high",
        "trial_A": {"verdict": "violation", "score": 0.93}
    }));

    let path = capture_record(&result, "/ws/x.py", "print('x')", "python", root.path()).unwrap();
    let stored = read_json(&path);

    assert_eq!(stored["verdict"], "violation");
    assert_eq!(stored["license_risk"], "high");
    assert_eq!(stored["infringement_basis"], Value::Null);
    assert_eq!(
        stored["code_hash"],
        "51d22c08921edc1f0205612a3a6d26adf703520a4316bd857eeabc38184ff888"
    );
    assert_eq!(stored["snippet_length"], 10);
    assert_eq!(stored["trial_A"], json!({"verdict": "violation", "score": 0.93}));
    assert_eq!(stored["trial_B"], Value::Null);
    assert_eq!(stored["file_path"], "/ws/x.py");
    assert_eq!(stored["language"], "python");
}

#[test]
fn test_empty_response_still_captured() {
    let root = tempfile::tempdir().unwrap();
    let result = AnalysisResult::from_value(json!({}));

    let path = capture_record(&result, "a.js", "let a = 1;", "javascript", root.path()).unwrap();
    let stored = read_json(&path);

    for field in AnalysisResult::PROMOTED_FIELDS {
        assert_eq!(stored[field], Value::Null, "{} should be null", field);
    }
    assert_eq!(stored["raw_output"], json!({}));
}

#[test]
fn test_record_file_is_pretty_printed_json() {
    let root = tempfile::tempdir().unwrap();
    let result = AnalysisResult::from_value(json!({"verdict": "safe"}));

    let path = capture_record(&result, "a.py", "x", "python", root.path()).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    assert!(text.starts_with("{\n  \""));
    assert!(path.file_name().unwrap().to_str().unwrap().starts_with("record_"));
}

#[test]
fn test_stored_record_round_trips() {
    let root = tempfile::tempdir().unwrap();
    let raw = json!({
        "verdict": "medium_risk",
        "model_comparison": {"a": 0.30000000000000004, "b": [1e-7, 123456789012345678u64]},
        "future_field": {"deeply": {"nested": [true, null, "x"]}}
    });
    let result = AnalysisResult::from_value(raw.clone());

    let path = capture_record(&result, "m.c", "int main(){}", "c", root.path()).unwrap();
    let parsed: EvaluationRecord = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(parsed.raw_output, raw);
    assert_eq!(parsed.code_hash, CodeHash::of("int main(){}"));

    // Re-encoding the parsed record reproduces the file byte for byte
    let reencoded = serde_json::to_string_pretty(&parsed).unwrap() + "\n";
    assert_eq!(reencoded, fs::read_to_string(&path).unwrap());
}

#[test]
fn test_rapid_captures_never_overwrite() {
    let root = tempfile::tempdir().unwrap();
    let result = AnalysisResult::from_value(json!({"verdict": "safe"}));

    let first = capture_record(&result, "a.py", "a = 1", "python", root.path()).unwrap();
    let second = capture_record(&result, "a.py", "a = 2", "python", root.path()).unwrap();

    assert_ne!(first, second);
    assert_eq!(read_json(&first)["snippet"], "a = 1");
    assert_eq!(read_json(&second)["snippet"], "a = 2");
}

#[test]
fn test_concurrent_captures_produce_distinct_files() {
    let root = tempfile::tempdir().unwrap();
    let project_root = root.path().to_path_buf();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let project_root = project_root.clone();
            std::thread::spawn(move || {
                let result = AnalysisResult::from_value(json!({"verdict": "safe"}));
                capture_record(&result, "a.py", &format!("x = {}", i), "python", &project_root)
                    .unwrap()
            })
        })
        .collect();
    let mut paths: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    paths.sort();
    paths.dedup();

    assert_eq!(paths.len(), 16);
    assert_eq!(DatasetStore::for_project(&project_root).list().unwrap().len(), 16);
}

#[test]
fn test_missing_directories_are_created() {
    let root = tempfile::tempdir().unwrap();
    let project_root = root.path().join("deep").join("nested").join("project");
    assert!(!project_root.exists());

    let result = AnalysisResult::from_value(json!({}));
    let path = capture_record(&result, "a.go", "package main", "go", &project_root).unwrap();

    assert!(project_root.join(DATASET_DIR_NAME).is_dir());
    assert!(path.is_file());
}

#[test]
fn test_blocked_dataset_directory_is_io_error() {
    let root = tempfile::tempdir().unwrap();
    // A regular file where the dataset directory should be
    fs::write(root.path().join(DATASET_DIR_NAME), "not a directory").unwrap();

    let result = AnalysisResult::from_value(json!({}));
    let err = capture_record(&result, "a.py", "x", "python", root.path()).unwrap_err();

    match err {
        StoreError::Io { path, .. } => assert_eq!(path, root.path().join(DATASET_DIR_NAME)),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_list_is_chronological_and_skips_garbage() {
    let root = tempfile::tempdir().unwrap();
    let store = DatasetStore::for_project(root.path());
    assert!(store.list().unwrap().is_empty(), "missing dataset is empty");

    let result = AnalysisResult::from_value(json!({"verdict": "safe"}));
    capture_record(&result, "a.py", "first", "python", root.path()).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    capture_record(&result, "a.py", "second", "python", root.path()).unwrap();

    fs::write(store.dir().join("record_garbage.json"), "{ not json").unwrap();
    fs::write(store.dir().join("README.txt"), "operator notes").unwrap();

    let snippets: Vec<String> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|stored| stored.record.snippet)
        .collect();
    assert_eq!(snippets, vec!["first", "second"]);
}

#[test]
fn test_list_skips_record_with_malformed_hash() {
    let root = tempfile::tempdir().unwrap();
    let store = DatasetStore::for_project(root.path());
    let result = AnalysisResult::from_value(json!({"verdict": "safe"}));
    let good = capture_record(&result, "a.py", "print('x')", "python", root.path()).unwrap();

    let mut edited = read_json(&good);
    edited["code_hash"] = json!("abc");
    fs::write(
        store.dir().join("record_1_x.json"),
        serde_json::to_string_pretty(&edited).unwrap(),
    )
    .unwrap();

    let records = store.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, good);
    assert!(store.duplicates().unwrap().is_empty());
    assert!(matches!(
        store.find("record_1_x"),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn test_append_leaves_only_complete_records() {
    let root = tempfile::tempdir().unwrap();
    let result = AnalysisResult::from_value(json!({"verdict": "low_risk"}));
    for i in 0..5 {
        capture_record(&result, "a.py", &format!("v = {}", i), "python", root.path()).unwrap();
    }

    let names: Vec<String> = fs::read_dir(root.path().join(DATASET_DIR_NAME))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 5);
    assert!(names.iter().all(|name| name.starts_with("record_") && name.ends_with(".json")));
}

#[test]
fn test_find_by_name_stem_and_hash() {
    let root = tempfile::tempdir().unwrap();
    let store = DatasetStore::for_project(root.path());
    let result = AnalysisResult::from_value(json!({"verdict": "high_risk"}));

    let path = capture_record(&result, "a.py", "print('x')", "python", root.path()).unwrap();
    let name = path.file_name().unwrap().to_str().unwrap().to_string();
    let stem = name.strip_suffix(".json").unwrap().to_string();

    assert_eq!(store.find(&name).unwrap().path, path);
    assert_eq!(store.find(&stem).unwrap().path, path);
    assert_eq!(
        store
            .find("51d22c08921edc1f0205612a3a6d26adf703520a4316bd857eeabc38184ff888")
            .unwrap()
            .path,
        path
    );
    assert!(matches!(store.find("record_missing"), Err(StoreError::NotFound(_))));
}

#[test]
fn test_duplicates_group_identical_content() {
    let root = tempfile::tempdir().unwrap();
    let store = DatasetStore::for_project(root.path());
    let result = AnalysisResult::from_value(json!({}));

    capture_record(&result, "a.py", "same", "python", root.path()).unwrap();
    capture_record(&result, "b.py", "same", "python", root.path()).unwrap();
    capture_record(&result, "c.py", "different", "python", root.path()).unwrap();

    let groups = store.duplicates().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].code_hash, CodeHash::of("same"));
    assert_eq!(groups[0].records.len(), 2);
}

#[test]
fn test_annotate_writes_sidecar_and_leaves_record_untouched() {
    let root = tempfile::tempdir().unwrap();
    let store = DatasetStore::for_project(root.path());
    let result = AnalysisResult::from_value(json!({"verdict": "violation"}));

    let path = capture_record(&result, "a.py", "print('x')", "python", root.path()).unwrap();
    let before = fs::read_to_string(&path).unwrap();
    let name = path.file_name().unwrap().to_str().unwrap().to_string();

    let ground_truth = GroundTruth::new("ignored")
        .with_verdict(Verdict::HighRisk)
        .with_basis(InfringementBasis::Inspired)
        .with_license_risk(LicenseRisk::AttributionRequired)
        .with_confidence(AnnotationConfidence::Low)
        .with_notes("matches a tutorial");
    let sidecar = store.annotate(&name, ground_truth).unwrap();

    assert!(sidecar.starts_with(store.dir().join("ground_truth")));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);

    let loaded = store.ground_truth(&name).unwrap().unwrap();
    assert_eq!(loaded.record, name);
    assert_eq!(loaded.verdict, Some(Verdict::HighRisk));
    assert_eq!(loaded.notes, "matches a tutorial");

    // Re-annotation replaces the sidecar
    store
        .annotate(&name, GroundTruth::new(&name).with_verdict(Verdict::Safe))
        .unwrap();
    let loaded = store.ground_truth(&name).unwrap().unwrap();
    assert_eq!(loaded.verdict, Some(Verdict::Safe));
    assert_eq!(loaded.confidence, AnnotationConfidence::High);

    // Sidecars are not mistaken for records
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_ground_truth_absent() {
    let root = tempfile::tempdir().unwrap();
    let store = DatasetStore::for_project(root.path());
    assert!(store.ground_truth("record_1.json").unwrap().is_none());
}

#[test]
fn test_annotate_unknown_record() {
    let root = tempfile::tempdir().unwrap();
    let store = DatasetStore::for_project(root.path());
    let result = store.annotate("record_404", GroundTruth::new("record_404"));
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}
