//! Directory tree scanning with exclusion pruning.
//!
//! The scan is the first of two passes: it enumerates every regular file under
//! the source root and sums their sizes so the write pass has an accurate
//! progress denominator.

use crate::BackupError;
use crate::Result;
use crate::scan::ExclusionSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::info;
use tracing::trace;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Archive prefix used when the source root has no base name (e.g. `/`).
pub const FALLBACK_ROOT_NAME: &str = "backup";

/// A regular file found by the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file.
    pub path: PathBuf,

    /// Path relative to the scanned root.
    pub relative: PathBuf,

    /// Size in bytes at scan time.
    pub size: u64,
}

/// Ordered file list plus the byte total used as progress denominator.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Canonical source root.
    pub root: PathBuf,

    /// Base name of the root, used as the archive entry prefix.
    pub root_name: String,

    /// Files in traversal order (lexicographic per directory).
    pub entries: Vec<FileEntry>,

    /// Sum of `entries[..].size`.
    pub total_bytes: u64,

    /// Entries skipped because they could not be walked or stat'd.
    pub skipped: usize,
}

impl ScanResult {
    /// Number of files found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the files in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Scans `root`, pruning excluded folders, and returns the file list.
///
/// - Children are visited in lexicographic order, so repeated scans of an
///   unchanged tree yield the same list.
/// - Excluded directories are pruned before descending; nothing below them is
///   opened or stat'd.
/// - Symlinks to regular files are included (their target is read); symlinked
///   directories are not descended into; broken links are skipped.
/// - Entries that cannot be walked or stat'd are skipped and counted.
///
/// # Examples
///
/// ```no_run
/// use snapzip_core::ExclusionSet;
/// use snapzip_core::scan_tree;
///
/// let scan = scan_tree("./project".as_ref(), &ExclusionSet::default())?;
/// println!("{} files, {} bytes", scan.len(), scan.total_bytes);
/// # Ok::<(), snapzip_core::BackupError>(())
/// ```
///
/// # Errors
///
/// - [`BackupError::InvalidSource`] if `root` is missing or not a directory
/// - [`BackupError::EmptySource`] if no files remain after exclusions
pub fn scan_tree(root: &Path, exclusions: &ExclusionSet) -> Result<ScanResult> {
    let root = validate_root(root)?;
    let root_name = root_name(&root);

    let mut entries = Vec::new();
    let mut total_bytes = 0u64;
    let mut skipped = 0usize;

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry, exclusions));

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                skipped += 1;
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        // is-file semantics: follows symlinks, so broken links fail here
        let metadata = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!(path = %entry.path().display(), error = %err, "skipping un-stat-able entry");
                skipped += 1;
                continue;
            }
        };
        if !metadata.is_file() {
            trace!(path = %entry.path().display(), "not a regular file");
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(&root) else {
            skipped += 1;
            continue;
        };

        let size = metadata.len();
        total_bytes = total_bytes.saturating_add(size);
        entries.push(FileEntry {
            path: entry.path().to_path_buf(),
            relative: relative.to_path_buf(),
            size,
        });
    }

    if entries.is_empty() {
        return Err(BackupError::EmptySource { path: root });
    }

    info!(
        root = %root.display(),
        files = entries.len(),
        total_bytes,
        skipped,
        "scan complete"
    );

    Ok(ScanResult {
        root,
        root_name,
        entries,
        total_bytes,
        skipped,
    })
}

fn validate_root(root: &Path) -> Result<PathBuf> {
    let metadata = fs::metadata(root).map_err(|err| BackupError::InvalidSource {
        path: root.to_path_buf(),
        reason: err.to_string(),
    })?;
    if !metadata.is_dir() {
        return Err(BackupError::InvalidSource {
            path: root.to_path_buf(),
            reason: "not a directory".into(),
        });
    }
    root.canonicalize().map_err(|err| BackupError::InvalidSource {
        path: root.to_path_buf(),
        reason: err.to_string(),
    })
}

fn root_name(root: &Path) -> String {
    root.file_name()
        .map_or_else(|| FALLBACK_ROOT_NAME.to_string(), |name| name.to_string_lossy().into_owned())
}

/// The root itself is never pruned, even if its own name is excluded.
fn is_pruned(entry: &DirEntry, exclusions: &ExclusionSet) -> bool {
    let pruned =
        entry.depth() > 0 && entry.file_type().is_dir() && exclusions.contains_os(entry.file_name());
    if pruned {
        debug!(path = %entry.path().display(), "pruned excluded directory");
    }
    pruned
}
