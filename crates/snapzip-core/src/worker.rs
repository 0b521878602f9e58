//! Background backup worker.
//!
//! Interactive front-ends must not block their UI thread on a backup. The
//! worker runs the pipeline on its own thread and marshals phase changes and
//! progress back over a channel; the owning thread drains
//! [`BackupHandle::messages`] at its own pace and calls
//! [`BackupHandle::join`] for the outcome.

use crate::BackupError;
use crate::BackupReport;
use crate::BackupRequest;
use crate::CancelFlag;
use crate::ProgressEvent;
use crate::Result;
use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use std::thread::JoinHandle;
use tracing::info;

const WORKER_THREAD_NAME: &str = "snapzip-worker";

/// Capacity of the worker's message queue.
///
/// Intermediate progress is dropped while the queue is nearly full; one slot
/// is always left for the terminal event.
pub const MESSAGE_QUEUE_CAPACITY: usize = 64;

/// Message sent from the worker to the owning thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupMessage {
    /// The source tree is being scanned.
    Scanning,
    /// Scanning finished; the archive is being written.
    Writing {
        /// Files that will be archived.
        files: usize,
        /// Bytes expected.
        total_bytes: u64,
    },
    /// Cumulative byte progress.
    Progress(ProgressEvent),
}

/// Handle to a running background backup.
#[derive(Debug)]
pub struct BackupHandle {
    messages: Receiver<BackupMessage>,
    cancel: CancelFlag,
    thread: JoinHandle<Result<BackupReport>>,
}

impl BackupHandle {
    /// Receiver for worker messages.
    ///
    /// The channel disconnects when the worker finishes, so iterating it
    /// ends on its own. It is bounded by [`MESSAGE_QUEUE_CAPACITY`]; a slow
    /// reader sees fewer intermediate progress events, never a stale total.
    #[must_use]
    pub const fn messages(&self) -> &Receiver<BackupMessage> {
        &self.messages
    }

    /// A clone of the run's cancellation flag.
    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Requests cancellation; the worker stops before its next chunk.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once the worker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the worker and returns the run's outcome.
    ///
    /// # Errors
    ///
    /// Returns the run's error, or [`BackupError::WorkerPanicked`] if the
    /// worker thread panicked.
    pub fn join(self) -> Result<BackupReport> {
        self.thread.join().map_err(|_| BackupError::WorkerPanicked)?
    }
}

/// Starts `request` on a background thread.
///
/// # Errors
///
/// Returns [`BackupError::WorkerSpawn`] if the operating system refuses to
/// spawn the thread.
///
/// # Examples
///
/// ```no_run
/// use snapzip_core::BackupMessage;
/// use snapzip_core::BackupRequest;
/// use snapzip_core::spawn_backup;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let handle = spawn_backup(BackupRequest::new("project", "backups"))?;
/// for message in handle.messages() {
///     if let BackupMessage::Progress(event) = message {
///         println!("{}%", event.percent());
///     }
/// }
/// let report = handle.join()?;
/// println!("Backup created: {}", report.archive_path.display());
/// # Ok(())
/// # }
/// ```
pub fn spawn_backup(request: BackupRequest) -> Result<BackupHandle> {
    let (tx, rx) = crossbeam_channel::bounded(MESSAGE_QUEUE_CAPACITY);
    let cancel = CancelFlag::new();
    let worker_cancel = cancel.clone();

    let thread = std::thread::Builder::new()
        .name(WORKER_THREAD_NAME.into())
        .spawn(move || run_worker(&request, &tx, &worker_cancel))
        .map_err(BackupError::WorkerSpawn)?;

    Ok(BackupHandle {
        messages: rx,
        cancel,
        thread,
    })
}

fn run_worker(
    request: &BackupRequest,
    tx: &Sender<BackupMessage>,
    cancel: &CancelFlag,
) -> Result<BackupReport> {
    info!(source = %request.source.display(), "backup worker started");
    // Send failures only mean the receiver went away; the run continues.
    let _ = tx.send(BackupMessage::Scanning);
    let scan = request.scan()?;

    let _ = tx.send(BackupMessage::Writing {
        files: scan.len(),
        total_bytes: scan.total_bytes,
    });
    let mut forward = |event: ProgressEvent| {
        if event.is_complete() {
            let _ = tx.send(BackupMessage::Progress(event));
        } else if tx.len() + 1 < MESSAGE_QUEUE_CAPACITY {
            let _ = tx.try_send(BackupMessage::Progress(event));
        }
    };
    request.write(&scan, &mut forward, cancel)
}
