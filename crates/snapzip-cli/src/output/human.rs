//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use crate::progress::humanize_duration;
use anyhow::Result;
use console::Term;
use console::style;
use snapzip_core::BackupReport;
use snapzip_core::CompressionSpec;
use snapzip_core::ExclusionSet;
use snapzip_core::ScanResult;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn heading(&self, text: &str) {
        if self.use_colors {
            self.line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            self.line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_backup_result(&self, report: &BackupReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading(&format!("Backup created: {}", report.archive_path.display()));
        self.line("");
        self.line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        if report.files_skipped > 0 {
            self.line(&format!(
                "  Files skipped:    {}",
                Self::format_number(report.files_skipped)
            ));
        }
        self.line(&format!(
            "  Source size:      {}",
            humanize_bytes(report.bytes_read)
        ));
        self.line(&format!(
            "  Archive size:     {}",
            humanize_bytes(report.archive_size)
        ));
        self.line(&format!("  Compression:      {}", report.compression));
        if matches!(report.compression, CompressionSpec::Deflate { .. }) {
            self.line(&format!(
                "  Space saved:      {:.1}%",
                report.compression_percentage()
            ));
        }
        self.line(&format!(
            "  Duration:         {}",
            humanize_duration(report.duration)
        ));

        if self.verbose {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let throughput = report.throughput() as u64;
            self.line(&format!(
                "  Throughput:       {}/s",
                humanize_bytes(throughput)
            ));
        }

        if report.has_warnings() {
            self.line("");
            if self.use_colors {
                self.line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.line("Warnings:");
            }
            for warning in &report.warnings {
                self.line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_scan_result(
        &self,
        scan: &ScanResult,
        exclusions: &ExclusionSet,
        list: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if list {
            for entry in scan {
                self.line(&format!(
                    "{:>10}  {}",
                    humanize_bytes(entry.size),
                    entry.relative.display()
                ));
            }
            self.line("");
        }

        self.heading(&format!("Scanned {}", scan.root.display()));
        self.line(&format!(
            "  Files:            {}",
            Self::format_number(scan.len())
        ));
        self.line(&format!(
            "  Total size:       {}",
            humanize_bytes(scan.total_bytes)
        ));
        if scan.skipped > 0 {
            self.line(&format!(
                "  Unreadable:       {}",
                Self::format_number(scan.skipped)
            ));
        }
        if self.verbose {
            self.line(&format!("  Excluded folders: {exclusions}"));
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:#}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:#}"));
        }
    }
}
