//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use snapzip_core::BackupReport;
use snapzip_core::ExclusionSet;
use snapzip_core::ScanResult;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a finished backup
    fn format_backup_result(&self, report: &BackupReport) -> Result<()>;

    /// Format a dry-run scan; `list` includes every entry
    fn format_scan_result(
        &self,
        scan: &ScanResult,
        exclusions: &ExclusionSet,
        list: bool,
    ) -> Result<()>;

    /// Format error message
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
