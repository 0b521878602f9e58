//! Error types for backup runs.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `BackupError`.
pub type Result<T> = std::result::Result<T, BackupError>;

/// Errors that can terminate a backup run.
///
/// A run either yields exactly one archive or fails with one of these values.
/// Per-file stat failures during scanning are not errors; those entries are
/// skipped and counted in [`ScanResult::skipped`](crate::ScanResult::skipped).
#[derive(Error, Debug)]
pub enum BackupError {
    /// Source path is missing or not a directory.
    #[error("invalid source {path}: {reason}")]
    InvalidSource {
        /// The source path as given by the caller.
        path: PathBuf,
        /// Why the source was rejected.
        reason: String,
    },

    /// The scan produced no files after exclusions.
    #[error("no files to back up in {path}")]
    EmptySource {
        /// The scanned source root.
        path: PathBuf,
    },

    /// I/O failure while constructing the archive.
    #[error("write failed for {path}: {source}")]
    Write {
        /// The file being read or the archive being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The ZIP container rejected an operation.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The run was cancelled between chunks.
    #[error("backup cancelled; partial archive left at {archive}")]
    Cancelled {
        /// The partially written (but finalized) archive.
        archive: PathBuf,
    },

    /// Deflate level outside 1-9.
    #[error("invalid compression level {level} (expected 1-9)")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// A compression level was supplied together with `store`.
    #[error("compression level is only meaningful with deflate")]
    LevelWithoutDeflate,

    /// Compression mode name not recognized.
    #[error("unknown compression mode '{0}' (expected 'store' or 'deflate')")]
    UnknownCompression(String),

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// The background worker thread could not be started.
    #[error("failed to start backup worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// The background worker thread panicked.
    #[error("backup worker panicked")]
    WorkerPanicked,
}

impl BackupError {
    /// Wraps an I/O error with the path it concerns.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for failures raised while constructing the archive.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapzip_core::BackupError;
    ///
    /// let err = BackupError::write("out.zip", std::io::Error::other("disk full"));
    /// assert!(err.is_write_error());
    ///
    /// let err = BackupError::LevelWithoutDeflate;
    /// assert!(!err.is_write_error());
    /// ```
    #[must_use]
    pub const fn is_write_error(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::Zip(_))
    }

    /// Returns `true` if the error stems from caller input rather than I/O.
    ///
    /// These are reported before any archive is opened.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSource { .. }
                | Self::EmptySource { .. }
                | Self::InvalidCompressionLevel { .. }
                | Self::LevelWithoutDeflate
                | Self::UnknownCompression(_)
                | Self::InvalidConfig { .. }
        )
    }

    /// Returns the partial archive left behind by a cancelled run.
    #[must_use]
    pub fn archive_path(&self) -> Option<&Path> {
        match self {
            Self::Cancelled { archive } => Some(archive),
            _ => None,
        }
    }
}
