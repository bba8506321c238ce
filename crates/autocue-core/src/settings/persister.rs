use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use super::file::write_atomic;
use super::Settings;

/// Debounce window between the last update and the write
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(250);

/// Coalesces preference updates into debounced atomic writes
///
/// `save` hands the latest snapshot to a background task through a single-slot
/// channel and returns at once. The task writes the snapshot when no newer one
/// has arrived for the quiet period. `close` flushes whatever is still pending.
///
/// A snapshot that is replaced before the task observes it is never written:
/// only the most recent value matters.
pub struct SettingsPersister {
    path: PathBuf,
    updates: watch::Sender<Option<Settings>>,
    shutdown_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<crate::Result<()>>>>,
    writes: Arc<AtomicUsize>,
}

impl SettingsPersister {
    /// Start a persister writing to `path`. Must be called within a Tokio runtime.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_quiet_period(path, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(path: impl Into<PathBuf>, quiet_period: Duration) -> Self {
        let path = path.into();
        let (updates, updates_rx) = watch::channel(None);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let writes = Arc::new(AtomicUsize::new(0));

        let task = tokio::spawn(run_loop(
            path.clone(),
            quiet_period,
            updates_rx,
            shutdown_rx,
            writes.clone(),
        ));
        debug!(path = %path.display(), quiet_ms = quiet_period.as_millis() as u64, "Settings persister started");

        Self {
            path,
            updates,
            shutdown_tx,
            task: Mutex::new(Some(task)),
            writes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `settings` as the value to persist, replacing any pending one.
    ///
    /// Never blocks on I/O. Safe to call from any number of producers.
    pub fn save(&self, settings: Settings) {
        self.updates.send_replace(Some(settings));
    }

    /// Number of successful writes so far
    pub fn writes_completed(&self) -> usize {
        self.writes.load(Ordering::Acquire)
    }

    /// Stop the background task and flush the pending snapshot, if any.
    ///
    /// Returns once the flush is on disk, with the flush's error if it failed.
    /// Later calls return `Ok(())` immediately without flushing again.
    pub async fn close(&self) -> crate::Result<()> {
        let handle = self.task.lock().take();
        let Some(handle) = handle else {
            return Ok(());
        };

        let _ = self.shutdown_tx.send(true);
        let result = handle
            .await
            .map_err(|e| crate::Error::Task(format!("settings persister: {}", e)))?;

        match &result {
            Ok(()) => debug!("Settings persister closed"),
            Err(e) => error!("Final settings flush failed: {}", e),
        }
        result
    }
}

async fn run_loop(
    path: PathBuf,
    quiet_period: Duration,
    mut updates: watch::Receiver<Option<Settings>>,
    mut shutdown: watch::Receiver<bool>,
    writes: Arc<AtomicUsize>,
) -> crate::Result<()> {
    let mut pending: Option<Settings> = None;
    let mut closed = false;

    let deadline = tokio::time::sleep(quiet_period);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            biased;

            result = shutdown.changed() => {
                if result.is_err() {
                    break;
                }
                if *shutdown.borrow() {
                    closed = true;
                    break;
                }
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                pending = *updates.borrow_and_update();
                deadline.as_mut().reset(Instant::now() + quiet_period);
            }

            _ = &mut deadline, if pending.is_some() => {
                if let Some(settings) = pending.take() {
                    // Best effort: the next successful write repairs the file
                    if let Err(e) = flush(&path, settings, &writes).await {
                        warn!("Settings write failed: {}", e);
                    }
                }
            }
        }
    }

    // A save() may have landed after the last observed change, even one
    // carrying the same snapshot as an earlier failed write
    {
        let latest = updates.borrow_and_update();
        if latest.has_changed() {
            pending = *latest;
        }
    }

    let Some(settings) = pending else {
        return Ok(());
    };

    let result = flush(&path, settings, &writes).await;
    if !closed {
        if let Err(e) = &result {
            warn!("Settings flush on drop failed: {}", e);
        }
    }
    result
}

async fn flush(path: &Path, settings: Settings, writes: &AtomicUsize) -> crate::Result<()> {
    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_atomic(&target, &settings))
        .await
        .map_err(|e| crate::Error::Task(format!("settings write: {}", e)))??;

    writes.fetch_add(1, Ordering::AcqRel);
    debug!(path = %path.display(), speed = settings.speed, "Settings written");
    Ok(())
}
