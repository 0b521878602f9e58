//! ZIP archive construction.
//!
//! Entries are named `<root-name>/<relative path>` with forward slashes,
//! timestamps are clamped into the DOS range, and large entries are started
//! as ZIP64 up front.

mod destination;
mod entry;
mod writer;

pub use destination::ARCHIVE_EXTENSION;
pub use destination::ArchiveDestination;
pub use entry::ZIP64_ENTRY_THRESHOLD;
pub use entry::clamp_to_dos_range;
pub use entry::entry_name;
pub use entry::lenient_timestamp;
pub use entry::needs_zip64;
pub use writer::ArchiveWriter;
