//! Tree scanning.
//!
//! Walks a source directory, prunes excluded folder names, and produces the
//! file list plus byte total consumed by the archive writer.

pub mod filters;
pub mod walker;

pub use filters::ExclusionSet;
pub use walker::FileEntry;
pub use walker::ScanResult;
pub use walker::scan_tree;
