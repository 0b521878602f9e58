//! Progress reporting and cancellation.
//!
//! The archive writer emits a [`ProgressEvent`] after every chunk it copies.
//! Emission is not throttled by the writer; front-ends that redraw should
//! wrap their reporter in [`ThrottledProgress`].
//!
//! # Components
//!
//! - **`ProgressReporter`**: callback contract, implemented for closures
//! - **`ThrottledProgress`**: forwards at most one event per interval
//! - **`CancelFlag`**: polled by the writer between chunks

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// Default redraw interval for [`ThrottledProgress`] (4 updates per second).
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(250);

/// Snapshot of a run's byte progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Bytes copied into the archive so far.
    pub processed: u64,
    /// Bytes expected, as observed by the scan. Constant across a run.
    pub total: u64,
    /// Time since the write phase started.
    pub elapsed: Duration,
}

impl ProgressEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(processed: u64, total: u64, elapsed: Duration) -> Self {
        Self {
            processed,
            total,
            elapsed,
        }
    }

    /// Elapsed time in seconds.
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Completion in `0.0..=1.0`; `0.0` when the total is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapzip_core::ProgressEvent;
    /// use std::time::Duration;
    ///
    /// let event = ProgressEvent::new(5, 20, Duration::from_secs(1));
    /// assert_eq!(event.fraction(), 0.25);
    /// assert_eq!(ProgressEvent::new(0, 0, Duration::ZERO).fraction(), 0.0);
    /// ```
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.processed as f64 / self.total as f64).min(1.0)
    }

    /// Completion as a whole percentage.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        (self.fraction() * 100.0) as u8
    }

    /// Throughput in bytes per second; `0.0` before any time has elapsed.
    #[must_use]
    pub fn bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs <= 0.0 {
            return 0.0;
        }
        self.processed as f64 / secs
    }

    /// Returns `true` for the terminal event of a run.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.processed == self.total
    }
}

/// Receives progress events from the archive writer.
///
/// The trait requires `Send` so a reporter can move to a worker thread. It is
/// implemented for any `FnMut(ProgressEvent) + Send` closure.
///
/// # Examples
///
/// ```
/// use snapzip_core::ProgressEvent;
/// use snapzip_core::ProgressReporter;
///
/// let mut last = None;
/// let mut reporter = |event: ProgressEvent| last = Some(event.processed);
/// reporter.on_progress(ProgressEvent::new(3, 10, std::time::Duration::ZERO));
/// assert_eq!(last, Some(3));
/// ```
pub trait ProgressReporter: Send {
    /// Called with cumulative progress; must return quickly.
    fn on_progress(&mut self, event: ProgressEvent);
}

impl<F> ProgressReporter for F
where
    F: FnMut(ProgressEvent) + Send,
{
    fn on_progress(&mut self, event: ProgressEvent) {
        self(event);
    }
}

/// No-op implementation of `ProgressReporter`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn on_progress(&mut self, _event: ProgressEvent) {}
}

/// Forwards at most one event per interval to the inner reporter.
///
/// The terminal event (`processed == total`) is always forwarded so the
/// consumer observes completion.
///
/// # Examples
///
/// ```
/// use snapzip_core::ProgressEvent;
/// use snapzip_core::ProgressReporter;
/// use snapzip_core::progress::ThrottledProgress;
/// use std::time::Duration;
///
/// let mut seen = Vec::new();
/// {
///     let mut throttled = ThrottledProgress::new(|e: ProgressEvent| seen.push(e.processed));
///     for processed in 1..=9 {
///         throttled.on_progress(ProgressEvent::new(processed, 10, Duration::ZERO));
///     }
///     throttled.on_progress(ProgressEvent::new(10, 10, Duration::ZERO));
/// }
/// assert_eq!(seen.first(), Some(&1));
/// assert_eq!(seen.last(), Some(&10));
/// ```
#[derive(Debug)]
pub struct ThrottledProgress<R> {
    inner: R,
    interval: Duration,
    last_emit: Option<Instant>,
}

impl<R: ProgressReporter> ThrottledProgress<R> {
    /// Wraps `inner` with the default 250 ms interval.
    pub fn new(inner: R) -> Self {
        Self::with_interval(inner, DEFAULT_THROTTLE)
    }

    /// Wraps `inner` with a custom interval.
    pub fn with_interval(inner: R, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            last_emit: None,
        }
    }

    /// Mutable access to the wrapped reporter.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Returns the wrapped reporter.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: ProgressReporter> ProgressReporter for ThrottledProgress<R> {
    fn on_progress(&mut self, event: ProgressEvent) {
        let now = Instant::now();
        let due = self
            .last_emit
            .is_none_or(|last| now.duration_since(last) >= self.interval);
        if due || event.is_complete() {
            self.last_emit = Some(now);
            self.inner.on_progress(event);
        }
    }
}

/// Cooperative cancellation flag.
///
/// Clones share one flag. The writer checks it before each chunk, so the
/// cancellation latency is bounded by one chunk's I/O.
///
/// # Examples
///
/// ```
/// use snapzip_core::CancelFlag;
///
/// let flag = CancelFlag::new();
/// let remote = flag.clone();
/// assert!(!flag.is_cancelled());
/// remote.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
