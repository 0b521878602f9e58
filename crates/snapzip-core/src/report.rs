//! Backup run reporting.

use crate::CompressionSpec;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a completed backup run.
///
/// # Examples
///
/// ```
/// use snapzip_core::BackupReport;
///
/// let mut report = BackupReport::default();
/// report.bytes_read = 1000;
/// report.archive_size = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BackupReport {
    /// Path of the archive that was written.
    pub archive_path: PathBuf,

    /// Number of files written as archive entries.
    pub files_added: usize,

    /// Files from the scan that were gone by write time.
    pub files_skipped: usize,

    /// Bytes copied from source files.
    pub bytes_read: u64,

    /// Bytes the scan expected (progress denominator).
    pub bytes_expected: u64,

    /// Size of the archive file on disk.
    pub archive_size: u64,

    /// Compression used for every entry.
    pub compression: CompressionSpec,

    /// Duration of the write phase.
    pub duration: Duration,

    /// Warnings generated during the run.
    pub warnings: Vec<String>,
}

impl BackupReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns source bytes per archive byte.
    ///
    /// Returns 0.0 if either size is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.archive_size as f64
    }

    /// Returns the space saved as a percentage of the source bytes.
    ///
    /// Store archives carry headers, so this can be negative for small trees.
    /// Returns 0.0 if `bytes_read` is 0.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_read == 0 {
            return 0.0;
        }
        (1.0 - self.archive_size as f64 / self.bytes_read as f64) * 100.0
    }

    /// Average copy throughput in bytes per second.
    #[must_use]
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.bytes_read as f64 / secs
    }
}
