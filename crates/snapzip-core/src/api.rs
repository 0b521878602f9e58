//! High-level backup pipeline.

use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveWriter;
use crate::BackupConfig;
use crate::BackupReport;
use crate::CancelFlag;
use crate::ProgressReporter;
use crate::Result;
use crate::ScanResult;
use crate::scan_tree;

/// One backup run: what to archive, where to, and how.
#[derive(Debug, Clone)]
pub struct BackupRequest {
    /// Source directory to snapshot.
    pub source: PathBuf,
    /// Directory the archive is written into. Created if missing.
    pub dest_dir: PathBuf,
    /// Exclusions, compression and chunking.
    pub config: BackupConfig,
}

impl BackupRequest {
    /// Creates a request with the default configuration.
    pub fn new(source: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest_dir: dest_dir.into(),
            config: BackupConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: BackupConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the configuration and scans the source tree.
    ///
    /// # Errors
    ///
    /// Returns configuration errors, `InvalidSource` or `EmptySource`. No
    /// archive exists at this point.
    pub fn scan(&self) -> Result<ScanResult> {
        self.config.validate()?;
        scan_tree(&self.source, &self.config.exclusions)
    }

    /// Writes a previously scanned tree into the destination.
    ///
    /// # Errors
    ///
    /// See [`ArchiveWriter::write`].
    pub fn write(
        &self,
        scan: &ScanResult,
        progress: &mut dyn ProgressReporter,
        cancel: &CancelFlag,
    ) -> Result<BackupReport> {
        ArchiveWriter::new(&self.config).write(scan, &self.dest_dir, progress, cancel)
    }

    /// The source directory.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Runs a complete backup: validate, scan, write.
///
/// Blocks until the archive is finalized. Front-ends that must stay
/// responsive should use [`spawn_backup`](crate::spawn_backup) instead.
///
/// # Errors
///
/// - `InvalidSource`, `EmptySource` and configuration errors before any
///   archive is created
/// - `Write` or `Zip` while constructing the archive
/// - `Cancelled` if `cancel` was set during the write phase
///
/// # Examples
///
/// ```no_run
/// use snapzip_core::BackupRequest;
/// use snapzip_core::CancelFlag;
/// use snapzip_core::ProgressEvent;
/// use snapzip_core::run_backup;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = BackupRequest::new("/home/me/project", "/backups");
/// let mut progress = |event: ProgressEvent| {
///     println!("{}% ({:.1}s)", event.percent(), event.elapsed_secs());
/// };
/// let report = run_backup(&request, &mut progress, &CancelFlag::new())?;
/// println!("Backup created: {}", report.archive_path.display());
/// # Ok(())
/// # }
/// ```
pub fn run_backup(
    request: &BackupRequest,
    progress: &mut dyn ProgressReporter,
    cancel: &CancelFlag,
) -> Result<BackupReport> {
    let scan = request.scan()?;
    request.write(&scan, progress, cancel)
}
