//! Error conversion utilities for CLI.
//!
//! Converts snapzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use snapzip_core::BackupError;
use std::path::Path;

/// Converts `BackupError` to user-friendly anyhow error with context
pub fn convert_backup_error(err: BackupError, source: &Path) -> anyhow::Error {
    match err {
        BackupError::InvalidSource { path, reason } => {
            anyhow!(
                "Invalid source '{}': {}\n\
                 HINT: --source must name an existing directory.",
                path.display(),
                reason
            )
        }
        BackupError::EmptySource { path } => {
            anyhow!(
                "Nothing to back up in '{}'\n\
                 HINT: The directory is empty or every file sits in an excluded folder. Check --exclude.",
                path.display()
            )
        }
        BackupError::Write { path, source } => {
            anyhow!(
                "Write failed for '{}': {}\n\
                 HINT: Check free space and permissions on the destination and that the file is readable.",
                path.display(),
                source
            )
        }
        BackupError::Zip(zip_err) => {
            anyhow!(
                "Archive error while backing up '{}': {}",
                source.display(),
                zip_err
            )
        }
        BackupError::Cancelled { archive } => {
            anyhow!(
                "Backup cancelled; partial archive left at '{}'\n\
                 HINT: The partial archive is readable but incomplete. Delete it if not needed.",
                archive.display()
            )
        }
        BackupError::LevelWithoutDeflate => {
            anyhow!(
                "--level only applies to deflate compression\n\
                 HINT: Add --compression deflate or drop --level."
            )
        }
        BackupError::InvalidCompressionLevel { level } => {
            anyhow!(
                "Invalid compression level {}\n\
                 HINT: Use a level from 1 (fastest) to 9 (smallest).",
                level
            )
        }
        _ => anyhow::Error::from(err).context(format!("Backup of '{}' failed", source.display())),
    }
}

/// Adds context to a core result about the backup source
pub fn add_backup_context<T>(
    result: Result<T, BackupError>,
    source: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_backup_error(e, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_invalid_source() {
        let err = BackupError::InvalidSource {
            path: PathBuf::from("/nope"),
            reason: "does not exist".into(),
        };
        let msg = format!("{:?}", convert_backup_error(err, Path::new("/nope")));
        assert!(msg.contains("Invalid source '/nope'"));
        assert!(msg.contains("does not exist"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_empty_source() {
        let err = BackupError::EmptySource {
            path: PathBuf::from("/proj"),
        };
        let msg = format!("{:?}", convert_backup_error(err, Path::new("/proj")));
        assert!(msg.contains("Nothing to back up"));
        assert!(msg.contains("--exclude"));
    }

    #[test]
    fn test_convert_write_error() {
        let err = BackupError::write("/out/a.zip", io::Error::other("disk full"));
        let msg = format!("{:?}", convert_backup_error(err, Path::new("/proj")));
        assert!(msg.contains("Write failed"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_convert_level_without_deflate() {
        let msg = format!(
            "{:?}",
            convert_backup_error(BackupError::LevelWithoutDeflate, Path::new("/proj"))
        );
        assert!(msg.contains("--compression deflate"));
    }

    #[test]
    fn test_other_errors_get_context() {
        let converted = convert_backup_error(BackupError::WorkerPanicked, Path::new("/proj"));
        let msg = format!("{converted:#}");
        assert!(msg.contains("Backup of '/proj' failed"));
        assert!(msg.contains("panicked"));
    }
}
