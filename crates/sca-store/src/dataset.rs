//! The dataset directory: ensure-and-append writes plus read-side helpers

use crate::StoreError;
use sca_domain::{CodeHash, EvaluationRecord, GroundTruth, DATASET_DIR_NAME};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File name prefix of record files
pub const RECORD_PREFIX: &str = "record_";

/// Subdirectory holding ground-truth sidecars
pub const GROUND_TRUTH_DIR: &str = "ground_truth";

// Name clashes need a UUIDv7 collision; a couple of fresh draws is plenty
const MAX_NAME_ATTEMPTS: usize = 3;

/// A record read back from disk
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// Full path of the record file
    pub path: PathBuf,

    /// File name (e.g. `record_1760862600000_0192....json`)
    pub name: String,

    /// Parsed contents
    pub record: EvaluationRecord,
}

impl StoredRecord {
    /// File name without the `.json` extension
    pub fn stem(&self) -> &str {
        self.name.strip_suffix(".json").unwrap_or(&self.name)
    }
}

/// Records sharing one fingerprint
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup {
    /// Shared fingerprint
    pub code_hash: CodeHash,

    /// Records with this fingerprint, oldest first
    pub records: Vec<StoredRecord>,
}

/// Handle on one dataset directory
///
/// Creating a handle touches nothing on disk; the directory is created on the
/// first append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStore {
    dir: PathBuf,
}

impl DatasetStore {
    /// Dataset of a project: `<project_root>/sca_llm_eval_data`
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        Self {
            dir: project_root.as_ref().join(DATASET_DIR_NAME),
        }
    }

    /// Dataset at an explicit directory
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The dataset directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append a record as a new file and return its path
    ///
    /// The record is encoded before anything touches the disk, so an
    /// encoding failure never leaves a partial file behind. The bytes are
    /// staged in a hidden temp file and published with a hard link, which
    /// fails instead of replacing an existing record; a failed write removes
    /// the staged file, so readers only ever see complete records.
    pub fn append(&self, record: &EvaluationRecord) -> Result<PathBuf, StoreError> {
        let mut body = serde_json::to_vec_pretty(record)?;
        body.push(b'\n');

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;

        let millis = record.timestamp.timestamp_millis();
        let mut attempts = 0;
        loop {
            attempts += 1;
            let name = record_file_name(millis);
            let path = self.dir.join(&name);

            let staged = StagedFile::create(self.dir.join(format!(".{}.tmp", name)))?;
            staged.write(&body)?;

            match staged.publish(&path) {
                Ok(()) => {
                    tracing::info!(
                        path = %path.display(),
                        code_hash = %record.code_hash.short(),
                        "evaluation record written"
                    );
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempts < MAX_NAME_ATTEMPTS => {
                    tracing::warn!(path = %path.display(), "record name taken, drawing a new one");
                }
                Err(e) => return Err(StoreError::io(&path, e)),
            }
        }
    }

    /// Every readable record, oldest first
    ///
    /// A missing dataset directory is an empty dataset. Files that fail to
    /// parse are skipped with a warning.
    pub fn list(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_record_file_name(&name) && entry.path().is_file() {
                names.push(name);
            }
        }
        names.sort();

        let mut records = Vec::with_capacity(names.len());
        for name in names {
            let path = self.dir.join(&name);
            match read_record(&path) {
                Ok(record) => records.push(StoredRecord { path, name, record }),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable record"),
            }
        }
        Ok(records)
    }

    /// Look up a record by file name, file stem or code hash
    ///
    /// When several records share a code hash, the oldest one is returned.
    pub fn find(&self, id: &str) -> Result<StoredRecord, StoreError> {
        let id = id.trim();
        let wanted_hash = CodeHash::from_hex(id).ok();

        self.list()?
            .into_iter()
            .find(|stored| {
                stored.name == id
                    || stored.stem() == id
                    || wanted_hash.as_ref() == Some(&stored.record.code_hash)
            })
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Groups of records with identical fingerprints
    pub fn duplicates(&self) -> Result<Vec<DuplicateGroup>, StoreError> {
        let mut groups: BTreeMap<CodeHash, Vec<StoredRecord>> = BTreeMap::new();
        for stored in self.list()? {
            groups
                .entry(stored.record.code_hash.clone())
                .or_default()
                .push(stored);
        }

        Ok(groups
            .into_iter()
            .filter(|(_, records)| records.len() > 1)
            .map(|(code_hash, records)| DuplicateGroup { code_hash, records })
            .collect())
    }

    /// Attach a ground-truth judgement to the record matching `id`
    ///
    /// The judgement goes to a sidecar file; the record itself is left
    /// untouched. Annotating the same record again replaces the sidecar.
    pub fn annotate(&self, id: &str, mut ground_truth: GroundTruth) -> Result<PathBuf, StoreError> {
        let stored = self.find(id)?;
        ground_truth.record = stored.name.clone();

        let dir = self.dir.join(GROUND_TRUTH_DIR);
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

        let path = dir.join(format!("{}.json", stored.stem()));
        let tmp = dir.join(format!("{}.json.tmp", stored.stem()));
        let body = serde_json::to_vec_pretty(&ground_truth)?;
        fs::write(&tmp, body).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;

        tracing::info!(record = %stored.name, path = %path.display(), "ground truth recorded");
        Ok(path)
    }

    /// Ground truth for a record file name, if it has been annotated
    pub fn ground_truth(&self, record_name: &str) -> Result<Option<GroundTruth>, StoreError> {
        let stem = record_name.strip_suffix(".json").unwrap_or(record_name);
        let path = self.dir.join(GROUND_TRUTH_DIR).join(format!("{}.json", stem));

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { path, source })
    }
}

/// A hidden temp file that is removed on drop unless it has been published
struct StagedFile {
    path: PathBuf,
    file: File,
}

impl StagedFile {
    fn create(path: PathBuf) -> Result<Self, StoreError> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| StoreError::io(&path, e))?;
        Ok(Self { path, file })
    }

    fn write(&self, body: &[u8]) -> Result<(), StoreError> {
        let mut file = &self.file;
        file.write_all(body)
            .and_then(|_| file.sync_all())
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// Link the staged bytes to `target`; an existing `target` is an error
    fn publish(self, target: &Path) -> std::io::Result<()> {
        fs::hard_link(&self.path, target)
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "could not remove staged record");
            }
        }
    }
}

/// `record_<unix-millis>_<uuidv7>.json`
///
/// The millisecond prefix keeps names in chronological order; the UUIDv7
/// suffix distinguishes saves completing within the same millisecond.
fn record_file_name(millis: i64) -> String {
    format!(
        "{}{}_{}.json",
        RECORD_PREFIX,
        millis,
        uuid::Uuid::now_v7().simple()
    )
}

fn is_record_file_name(name: &str) -> bool {
    name.starts_with(RECORD_PREFIX) && name.ends_with(".json")
}

fn read_record(path: &Path) -> Result<EvaluationRecord, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}
