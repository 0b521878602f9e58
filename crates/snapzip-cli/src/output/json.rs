//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use snapzip_core::BackupReport;
use snapzip_core::ExclusionSet;
use snapzip_core::ScanResult;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct BackupOutput {
    archive_path: String,
    files_added: usize,
    files_skipped: usize,
    bytes_read: u64,
    bytes_expected: u64,
    archive_size: u64,
    compression: String,
    compression_ratio: f64,
    compression_percentage: f64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&BackupReport> for BackupOutput {
    fn from(report: &BackupReport) -> Self {
        Self {
            archive_path: report.archive_path.display().to_string(),
            files_added: report.files_added,
            files_skipped: report.files_skipped,
            bytes_read: report.bytes_read,
            bytes_expected: report.bytes_expected,
            archive_size: report.archive_size,
            compression: report.compression.to_string(),
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

#[derive(Serialize)]
struct ScanEntry {
    path: String,
    size: u64,
}

#[derive(Serialize)]
struct ScanOutput {
    root: String,
    root_name: String,
    files: usize,
    total_bytes: u64,
    skipped: usize,
    excluded: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<Vec<ScanEntry>>,
}

impl OutputFormatter for JsonFormatter {
    fn format_backup_result(&self, report: &BackupReport) -> Result<()> {
        Self::output(&JsonOutput::success("backup", BackupOutput::from(report)))
    }

    fn format_scan_result(
        &self,
        scan: &ScanResult,
        exclusions: &ExclusionSet,
        list: bool,
    ) -> Result<()> {
        let entries = list.then(|| {
            scan.iter()
                .map(|entry| ScanEntry {
                    path: entry.relative.to_string_lossy().into_owned(),
                    size: entry.size,
                })
                .collect()
        });
        let data = ScanOutput {
            root: scan.root.display().to_string(),
            root_name: scan.root_name.clone(),
            files: scan.len(),
            total_bytes: scan.total_bytes,
            skipped: scan.skipped,
            excluded: exclusions.iter().map(str::to_string).collect(),
            entries,
        };
        Self::output(&JsonOutput::success("scan", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
