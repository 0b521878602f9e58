//! Subcommand implementations.

pub mod backup;
pub mod completion;
pub mod scan;
