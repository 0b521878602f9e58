//! Timestamped archive file naming.

use crate::BackupError;
use crate::Result;
use chrono::Local;
use chrono::NaiveDateTime;
use std::fs::File;
use std::fs::OpenOptions;
use std::path::Path;
use std::path::PathBuf;

/// Extension of every archive this crate writes.
pub const ARCHIVE_EXTENSION: &str = "zip";

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Where a run's archive is written: `<dir>/<source-name>-<YYYYMMDD-HHMMSS>.zip`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use snapzip_core::archive::ArchiveDestination;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .and_then(|d| d.and_hms_opt(7, 5, 1))
///     .unwrap();
/// let dest = ArchiveDestination::new("/backups", "webapp", at);
/// assert_eq!(dest.file_name(), "webapp-20240309-070501.zip");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDestination {
    dir: PathBuf,
    file_name: String,
}

impl ArchiveDestination {
    /// Names the archive for `source_name` at `timestamp`.
    pub fn new(dir: impl Into<PathBuf>, source_name: &str, timestamp: NaiveDateTime) -> Self {
        Self {
            dir: dir.into(),
            file_name: format!(
                "{source_name}-{}.{ARCHIVE_EXTENSION}",
                timestamp.format(TIMESTAMP_FORMAT)
            ),
        }
    }

    /// Names the archive for `source_name` at the current local time.
    pub fn now(dir: impl Into<PathBuf>, source_name: &str) -> Self {
        Self::new(dir, source_name, Local::now().naive_local())
    }

    /// The destination directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The generated file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the archive.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Creates the destination directory tree and the archive file.
    ///
    /// The file is created exclusively; an existing archive is never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Write`] if the directory cannot be created or the
    /// file already exists or cannot be opened.
    pub fn create(&self) -> Result<File> {
        std::fs::create_dir_all(&self.dir).map_err(|err| BackupError::write(&self.dir, err))?;
        let path = self.path();
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|err| BackupError::write(path, err))
    }
}
