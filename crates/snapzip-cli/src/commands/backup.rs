//! Backup command implementation.

use crate::cli::BackupArgs;
use crate::error::add_backup_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use snapzip_core::BackupConfig;
use snapzip_core::BackupMessage;
use snapzip_core::BackupRequest;
use snapzip_core::CancelFlag;
use snapzip_core::CompressionSpec;
use snapzip_core::ExclusionSet;
use snapzip_core::ProgressReporter;
use snapzip_core::progress::ThrottledProgress;
use snapzip_core::spawn_backup;
use tracing::debug;
use tracing::warn;

pub fn execute(args: &BackupArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let config = add_backup_context(build_config(args), &args.source)?;
    let request = BackupRequest::new(&args.source, &args.dest).with_config(config);
    let handle = add_backup_context(spawn_backup(request), &args.source)?;
    let cancel = handle.cancel_flag();
    if let Err(err) = ctrlc::set_handler(move || interrupt(&cancel)) {
        warn!(error = %err, "Ctrl-C will not stop the backup cleanly");
    }

    // Worker messages are drained here; the bar redraws at most 4 times per second.
    let mut progress =
        show_progress.then(|| ThrottledProgress::new(CliProgress::new(0, "Scanning")));
    for message in handle.messages() {
        match message {
            BackupMessage::Scanning => debug!("scanning source"),
            BackupMessage::Writing { files, total_bytes } => {
                debug!(files, total_bytes, "writing archive");
                if let Some(progress) = progress.as_mut() {
                    progress.get_mut().start_writing(total_bytes);
                }
            }
            BackupMessage::Progress(event) => {
                if let Some(progress) = progress.as_mut() {
                    progress.on_progress(event);
                }
            }
        }
    }
    drop(progress);

    let report = add_backup_context(handle.join(), &args.source)?;
    formatter.format_backup_result(&report)?;

    Ok(())
}

/// Stops the worker before its next chunk; the archive is still finalized.
fn interrupt(cancel: &CancelFlag) {
    warn!("interrupt received, cancelling backup");
    cancel.cancel();
}

fn build_config(args: &BackupArgs) -> snapzip_core::Result<BackupConfig> {
    let compression = CompressionSpec::from_kind(args.compression.into(), args.level)?;
    Ok(BackupConfig::default()
        .with_compression(compression)
        .with_exclusions(ExclusionSet::parse(&args.exclude.exclude)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::CompressionArg;
    use crate::cli::DEFAULT_EXCLUDE_LIST;
    use crate::cli::ExcludeArgs;
    use snapzip_core::BackupError;
    use std::path::PathBuf;

    fn args(compression: CompressionArg, level: Option<u8>, exclude: &str) -> BackupArgs {
        BackupArgs {
            source: PathBuf::from("/src"),
            dest: PathBuf::from("/dst"),
            compression,
            level,
            exclude: ExcludeArgs {
                exclude: exclude.to_string(),
            },
        }
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(&args(CompressionArg::Store, None, DEFAULT_EXCLUDE_LIST)).unwrap();
        assert_eq!(config.compression, CompressionSpec::Store);
        assert_eq!(config.exclusions, ExclusionSet::default());
    }

    #[test]
    fn test_build_config_deflate_default_level() {
        let config = build_config(&args(CompressionArg::Deflate, None, "")).unwrap();
        assert_eq!(config.compression, CompressionSpec::Deflate { level: 1 });
        assert!(config.exclusions.is_empty());
    }

    #[test]
    fn test_interrupt_sets_cancel_flag() {
        let cancel = CancelFlag::new();
        let shared = cancel.clone();
        interrupt(&cancel);
        assert!(shared.is_cancelled());
    }

    #[test]
    fn test_build_config_rejects_level_with_store() {
        let err = build_config(&args(CompressionArg::Store, Some(5), "")).unwrap_err();
        assert!(matches!(err, BackupError::LevelWithoutDeflate));
    }
}
