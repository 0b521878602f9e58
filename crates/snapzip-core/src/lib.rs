//! Streaming ZIP snapshots of directory trees.
//!
//! `snapzip-core` walks a source directory, prunes excluded folder names
//! (`.git`, `node_modules`, ...), and streams every remaining file into a new
//! timestamped ZIP archive. Files are copied in fixed-size chunks so memory
//! stays bounded, progress is reported per chunk, and a cancellation flag is
//! honoured between chunks.
//!
//! # Examples
//!
//! ```no_run
//! use snapzip_core::BackupConfig;
//! use snapzip_core::BackupRequest;
//! use snapzip_core::CancelFlag;
//! use snapzip_core::CompressionSpec;
//! use snapzip_core::NoopProgress;
//! use snapzip_core::run_backup;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BackupConfig::default().with_compression(CompressionSpec::deflate(6)?);
//! let request = BackupRequest::new("/home/me/project", "/backups").with_config(config);
//! let report = run_backup(&request, &mut NoopProgress, &CancelFlag::new())?;
//! println!("Backup created: {}", report.archive_path.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod scan;
pub mod worker;

// Re-export main API types
pub use api::BackupRequest;
pub use api::run_backup;
pub use archive::ArchiveDestination;
pub use archive::ArchiveWriter;
pub use config::BackupConfig;
pub use config::CompressionKind;
pub use config::CompressionSpec;
pub use error::BackupError;
pub use error::Result;
pub use progress::CancelFlag;
pub use progress::NoopProgress;
pub use progress::ProgressEvent;
pub use progress::ProgressReporter;
pub use report::BackupReport;
pub use scan::ExclusionSet;
pub use scan::FileEntry;
pub use scan::ScanResult;
pub use scan::scan_tree;
pub use worker::BackupHandle;
pub use worker::BackupMessage;
pub use worker::spawn_backup;
