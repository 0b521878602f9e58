//! Streaming ZIP writer.

use super::destination::ArchiveDestination;
use super::entry::entry_name;
use super::entry::lenient_timestamp;
use super::entry::needs_zip64;
use crate::BackupConfig;
use crate::BackupError;
use crate::BackupReport;
use crate::CancelFlag;
use crate::CompressionSpec;
use crate::FileEntry;
use crate::ProgressEvent;
use crate::ProgressReporter;
use crate::Result;
use crate::ScanResult;
use std::fs::File;
use std::fs::Metadata;
use std::io::BufWriter;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes a scanned tree into a new timestamped ZIP archive.
///
/// File contents are copied in chunks of [`BackupConfig::chunk_size`] through
/// one reused buffer, so memory stays bounded regardless of file size.
///
/// # Examples
///
/// ```no_run
/// use snapzip_core::ArchiveWriter;
/// use snapzip_core::BackupConfig;
/// use snapzip_core::CancelFlag;
/// use snapzip_core::NoopProgress;
/// use snapzip_core::scan_tree;
/// use std::path::Path;
///
/// let config = BackupConfig::default();
/// let scan = scan_tree(Path::new("project"), &config.exclusions)?;
/// let report = ArchiveWriter::new(&config).write(
///     &scan,
///     Path::new("backups"),
///     &mut NoopProgress,
///     &CancelFlag::new(),
/// )?;
/// println!("wrote {}", report.archive_path.display());
/// # Ok::<(), snapzip_core::BackupError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ArchiveWriter<'a> {
    config: &'a BackupConfig,
}

impl<'a> ArchiveWriter<'a> {
    /// Creates a writer using `config` for compression and chunking.
    #[must_use]
    pub const fn new(config: &'a BackupConfig) -> Self {
        Self { config }
    }

    /// Writes every entry of `scan` into `<dest_dir>/<root-name>-<timestamp>.zip`.
    ///
    /// Progress is reported after each chunk while bytes remain, followed by
    /// exactly one terminal event `(total, total, elapsed)` on success. The
    /// central directory is written on every path that opened the archive,
    /// so a cancelled or failed run still leaves a readable ZIP of the
    /// entries completed so far.
    ///
    /// Files that disappeared since the scan are skipped and recorded as
    /// warnings in the report.
    ///
    /// # Errors
    ///
    /// - [`BackupError::Write`] if the destination cannot be created, the
    ///   archive already exists, or a source or archive I/O operation fails
    /// - [`BackupError::Zip`] if the container rejects an entry
    /// - [`BackupError::Cancelled`] if `cancel` was set before completion
    pub fn write(
        &self,
        scan: &ScanResult,
        dest_dir: &Path,
        progress: &mut dyn ProgressReporter,
        cancel: &CancelFlag,
    ) -> Result<BackupReport> {
        let destination = ArchiveDestination::now(dest_dir, &scan.root_name);
        self.write_to(scan, &destination, progress, cancel)
    }

    /// Like [`write`](Self::write), but into an explicit `destination`.
    ///
    /// # Errors
    ///
    /// Same as [`write`](Self::write); an existing file at
    /// `destination.path()` is a [`BackupError::Write`] and is left untouched.
    pub fn write_to(
        &self,
        scan: &ScanResult,
        destination: &ArchiveDestination,
        progress: &mut dyn ProgressReporter,
        cancel: &CancelFlag,
    ) -> Result<BackupReport> {
        let archive_path = destination.path();
        let file = destination.create()?;
        info!(
            archive = %archive_path.display(),
            files = scan.len(),
            bytes = scan.total_bytes,
            compression = %self.config.compression,
            "writing archive"
        );

        let mut zip = ZipWriter::new(BufWriter::new(file));
        let mut session = Session {
            archive_path: archive_path.clone(),
            buffer: vec![0u8; self.config.chunk_size.max(1)],
            started: Instant::now(),
            processed: 0,
            total: scan.total_bytes,
            progress,
            cancel,
            report: BackupReport {
                archive_path: archive_path.clone(),
                bytes_expected: scan.total_bytes,
                compression: self.config.compression,
                ..BackupReport::default()
            },
        };

        let outcome = self.write_entries(&mut zip, scan, &mut session);

        // Finalize on every path so partial archives stay readable.
        let finished = finish_archive(zip, &archive_path);
        if let Err(err) = outcome {
            if let Err(finish_err) = finished {
                warn!(error = %finish_err, "failed to finalize partial archive");
            }
            if matches!(err, BackupError::Cancelled { .. }) {
                warn!(archive = %archive_path.display(), "backup cancelled");
            }
            return Err(err);
        }
        finished?;

        session.emit_terminal();

        let mut report = session.report;
        report.duration = session.started.elapsed();
        report.archive_size = std::fs::metadata(&archive_path)
            .map_err(|err| BackupError::write(&archive_path, err))?
            .len();
        info!(
            archive = %archive_path.display(),
            files = report.files_added,
            skipped = report.files_skipped,
            size = report.archive_size,
            "archive complete"
        );
        Ok(report)
    }

    fn write_entries<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        scan: &ScanResult,
        session: &mut Session<'_>,
    ) -> Result<()> {
        let base = base_options(self.config.compression);
        for entry in scan {
            session.check_cancelled()?;
            self.write_entry(zip, &scan.root_name, entry, base, session)?;
        }
        Ok(())
    }

    fn write_entry<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        root_name: &str,
        entry: &FileEntry,
        base: SimpleFileOptions,
        session: &mut Session<'_>,
    ) -> Result<()> {
        let mut file = match File::open(&entry.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %entry.path.display(), "file vanished since scan, skipping");
                session.report.files_skipped += 1;
                session
                    .report
                    .add_warning(format!("Skipped vanished file: {}", entry.path.display()));
                return Ok(());
            }
            Err(err) => return Err(BackupError::write(&entry.path, err)),
        };
        let metadata = file
            .metadata()
            .map_err(|err| BackupError::write(&entry.path, err))?;

        let name = entry_name(root_name, &entry.relative);
        let options = self.entry_options(base, &metadata, entry.size);
        debug!(entry = %name, size = entry.size, "adding entry");
        zip.start_file(name, options)?;

        loop {
            session.check_cancelled()?;
            let read = match file.read(&mut session.buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(BackupError::write(&entry.path, err)),
            };
            zip.write_all(&session.buffer[..read])
                .map_err(|err| BackupError::write(&session.archive_path, err))?;
            session.advance(read as u64);
        }

        session.report.files_added += 1;
        Ok(())
    }

    fn entry_options(
        &self,
        base: SimpleFileOptions,
        metadata: &Metadata,
        scanned_size: u64,
    ) -> SimpleFileOptions {
        let size = scanned_size.max(metadata.len());
        let options = base
            .last_modified_time(lenient_timestamp(metadata.modified().ok()))
            .large_file(needs_zip64(size));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if self.config.preserve_permissions {
                return options.unix_permissions(metadata.permissions().mode());
            }
        }

        options
    }
}

fn base_options(compression: CompressionSpec) -> SimpleFileOptions {
    match compression {
        CompressionSpec::Store => {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        }
        CompressionSpec::Deflate { level } => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level))),
    }
}

fn finish_archive<W: Write + Seek>(zip: ZipWriter<W>, archive_path: &Path) -> Result<()> {
    let mut writer = zip.finish()?;
    writer
        .flush()
        .map_err(|err| BackupError::write(archive_path, err))
}

/// Mutable state of one write phase.
struct Session<'p> {
    archive_path: PathBuf,
    buffer: Vec<u8>,
    started: Instant,
    processed: u64,
    total: u64,
    progress: &'p mut dyn ProgressReporter,
    cancel: &'p CancelFlag,
    report: BackupReport,
}

impl Session<'_> {
    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(BackupError::Cancelled {
                archive: self.archive_path.clone(),
            });
        }
        Ok(())
    }

    /// Records copied bytes; intermediate events stop once `processed`
    /// reaches `total` so the terminal event is the only one at 100%.
    fn advance(&mut self, bytes: u64) {
        self.processed = self.processed.saturating_add(bytes);
        self.report.bytes_read = self.processed;
        if self.processed < self.total {
            self.progress.on_progress(ProgressEvent::new(
                self.processed,
                self.total,
                self.started.elapsed(),
            ));
        }
    }

    fn emit_terminal(&mut self) {
        self.progress.on_progress(ProgressEvent::new(
            self.total,
            self.total,
            self.started.elapsed(),
        ));
    }
}
