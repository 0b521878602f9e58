//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::error::add_backup_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use snapzip_core::ExclusionSet;
use snapzip_core::scan_tree;

pub fn execute(args: &ScanArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let exclusions = ExclusionSet::parse(&args.exclude.exclude);
    let scan = add_backup_context(scan_tree(&args.source, &exclusions), &args.source)?;

    formatter.format_scan_result(&scan, &exclusions, args.list)?;

    Ok(())
}
