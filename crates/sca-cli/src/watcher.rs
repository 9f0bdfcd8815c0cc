//! Save detection for `watch`.
//!
//! File system events are debounced per path; once a path has been quiet
//! for the debounce window it counts as one save. Each save runs on its own
//! task, so a slow analysis never holds up the next one. On Ctrl+C, paths
//! still inside their window are dispatched and in-flight saves are awaited;
//! a second Ctrl+C abandons them.

use crate::error::{CliError, Result};
use crate::language::language_for_path;
use crate::trigger::{SaveEvent, SaveHandler};
use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use sca_domain::{AnalysisBackend, RecordSink, DATASET_DIR_NAME};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time;
use tracing::{debug, info, warn};

/// Directory names whose contents never count as saves
pub const IGNORED_DIRS: &[&str] = &[DATASET_DIR_NAME, ".git", "target", "node_modules"];

/// Trailing-edge debouncer keyed by path.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: HashMap<PathBuf, Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    /// Record activity on `path`, pushing its deadline back.
    pub fn note(&mut self, path: PathBuf, now: Instant) {
        self.pending.insert(path, now + self.window);
    }

    /// Remove and return every path whose quiet window has elapsed.
    pub fn due(&mut self, now: Instant) -> Vec<PathBuf> {
        let mut ready: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(path, _)| path.clone())
            .collect();
        for path in &ready {
            self.pending.remove(path);
        }
        ready.sort();
        ready
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Remove and return every waiting path, due or not.
    pub fn drain(&mut self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.pending.drain().map(|(path, _)| path).collect();
        paths.sort();
        paths
    }

    /// Number of paths waiting.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// No paths waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Paths written by an event, if it looks like a save.
pub fn saved_paths(event: &Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Modify(ModifyKind::Data(_))
        | EventKind::Modify(ModifyKind::Any)
        | EventKind::Create(CreateKind::File)
        | EventKind::Create(CreateKind::Any)
        | EventKind::Modify(ModifyKind::Name(RenameMode::To)) => event.paths.clone(),
        // Editors that save through a temp file finish with a rename onto the target
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            event.paths.last().cloned().into_iter().collect()
        }
        _ => Vec::new(),
    }
}

/// Whether a path under `root` is excluded from save detection.
pub fn is_ignored(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|component| match component {
        Component::Normal(name) => name
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name)),
        _ => false,
    })
}

fn create_fs_watcher(
    root: &Path,
    sender: mpsc::Sender<notify::Result<Event>>,
) -> Result<RecommendedWatcher> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = sender.blocking_send(res);
        },
        NotifyConfig::default(),
    )?;
    watcher.watch(root, RecursiveMode::Recursive)?;
    Ok(watcher)
}

/// Read a saved file into a [`SaveEvent`].
///
/// Returns `None` for paths that are gone, are not regular files, or do not
/// hold UTF-8 text.
pub async fn read_save(path: &Path, project_root: &Path) -> Option<SaveEvent> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return None,
    }

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "could not read saved file");
            return None;
        }
    };

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(_) => {
            warn!(file = %path.display(), "skipping non-UTF-8 file");
            return None;
        }
    };

    Some(SaveEvent {
        path: path.to_path_buf(),
        content,
        language: language_for_path(path).to_string(),
        project_root: project_root.to_path_buf(),
    })
}

/// Watch `root` and hand every save to `handler` until Ctrl-C.
///
/// Failures of individual saves are logged by the handler and never stop the
/// loop.
pub async fn watch_saves<B, S>(
    handler: Arc<SaveHandler<B, S>>,
    root: PathBuf,
    debounce: Duration,
) -> Result<()>
where
    B: AnalysisBackend + 'static,
    S: RecordSink + 'static,
    CliError: From<B::Error> + From<S::Error>,
{
    let (event_tx, mut event_rx) = mpsc::channel(1024);
    let watcher = create_fs_watcher(&root, event_tx)?;
    info!(root = %root.display(), debounce_ms = debounce.as_millis() as u64, "watching for saves");

    let mut debouncer = Debouncer::new(debounce);
    let mut tasks = JoinSet::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let deadline = debouncer.next_deadline();
        let flush = async move {
            match deadline {
                Some(deadline) => time::sleep_until(time::Instant::from_std(deadline)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = &mut shutdown => {
                info!("stopping watcher");
                break;
            }
            received = event_rx.recv() => match received {
                Some(Ok(event)) => {
                    let now = Instant::now();
                    for path in saved_paths(&event) {
                        if !is_ignored(&root, &path) {
                            debug!(file = %path.display(), pending = debouncer.len(), "coalescing event");
                            debouncer.note(path, now);
                        }
                    }
                }
                Some(Err(e)) => warn!(error = %e, "watch error"),
                None => break,
            },
            _ = flush => {
                for path in debouncer.due(Instant::now()) {
                    dispatch(&mut tasks, &handler, &path, &root).await;
                }
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => log_joined(joined),
        }
    }

    drop(watcher);
    let pending = debouncer.drain();
    if !pending.is_empty() {
        info!(count = pending.len(), "dispatching saves still inside the debounce window");
    }
    for path in pending {
        dispatch(&mut tasks, &handler, &path, &root).await;
    }

    if !tasks.is_empty() {
        info!(in_flight = tasks.len(), "waiting for in-flight saves, press Ctrl+C again to abandon them");
    }
    let abandoned = finish_tasks(&mut tasks, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await;
    if abandoned > 0 {
        warn!(abandoned, "abandoned in-flight saves; no records were written for them");
    }

    Ok(())
}

async fn dispatch<B, S>(
    tasks: &mut JoinSet<()>,
    handler: &Arc<SaveHandler<B, S>>,
    path: &Path,
    root: &Path,
) where
    B: AnalysisBackend + 'static,
    S: RecordSink + 'static,
    CliError: From<B::Error> + From<S::Error>,
{
    let Some(event) = read_save(path, root).await else {
        debug!(file = %path.display(), "ignoring event");
        return;
    };
    let handler = Arc::clone(handler);
    tasks.spawn(async move {
        // Outcome already reported through the status line and logs
        let _ = handler.handle(event).await;
    });
}

fn log_joined(joined: std::result::Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        if !e.is_cancelled() {
            warn!(error = %e, "save task failed");
        }
    }
}

/// Wait for every task in `tasks`, or until `abandon` completes.
///
/// Returns how many tasks were still running when `abandon` fired; those
/// are aborted.
pub async fn finish_tasks(tasks: &mut JoinSet<()>, abandon: impl Future<Output = ()>) -> usize {
    tokio::pin!(abandon);
    loop {
        tokio::select! {
            joined = tasks.join_next() => match joined {
                Some(joined) => log_joined(joined),
                None => return 0,
            },
            _ = &mut abandon => {
                let remaining = tasks.len();
                tasks.abort_all();
                return remaining;
            }
        }
    }
}
