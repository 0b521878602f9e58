//! Per-entry naming and metadata for the ZIP container.

use chrono::DateTime as ChronoDateTime;
use chrono::Datelike;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::Timelike;
use std::path::Component;
use std::path::Path;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;
use zip::DateTime;

/// Entries at least this large (scan-time size) are written as ZIP64.
///
/// 95% of the 32-bit limit, leaving headroom for deflate expansion of
/// incompressible data and files that grow after the scan.
pub const ZIP64_ENTRY_THRESHOLD: u64 = u32::MAX as u64 / 20 * 19;

/// Builds the archive entry name `<root_name>/<relative>` with `/` separators.
///
/// Backslashes inside components are also turned into `/` so names read the
/// same on every host.
///
/// # Examples
///
/// ```
/// use snapzip_core::archive::entry_name;
/// use std::path::Path;
///
/// assert_eq!(entry_name("proj", Path::new("sub/b.txt")), "proj/sub/b.txt");
/// assert_eq!(entry_name("proj", Path::new("a.txt")), "proj/a.txt");
/// ```
#[must_use]
pub fn entry_name(root_name: &str, relative: &Path) -> String {
    let mut name = root_name.replace('\\', "/");
    for component in relative.components() {
        if let Component::Normal(part) = component {
            name.push('/');
            name.push_str(&part.to_string_lossy().replace('\\', "/"));
        }
    }
    name
}

/// Returns `true` if an entry of `size` bytes must be started as ZIP64.
#[must_use]
pub const fn needs_zip64(size: u64) -> bool {
    size >= ZIP64_ENTRY_THRESHOLD
}

/// Converts a modification time to a ZIP timestamp, clamping instead of
/// failing.
///
/// The DOS date range is 1980-01-01 00:00:00 ..= 2107-12-31 23:59:58. Earlier
/// times (and unknown ones) become the floor, later times the ceiling.
#[must_use]
pub fn lenient_timestamp(modified: Option<SystemTime>) -> DateTime {
    let Some(modified) = modified else {
        return DateTime::default();
    };
    let Ok(since_epoch) = modified.duration_since(UNIX_EPOCH) else {
        return DateTime::default();
    };
    let local = i64::try_from(since_epoch.as_secs())
        .ok()
        .and_then(|secs| ChronoDateTime::from_timestamp(secs, 0))
        .map(|utc| utc.with_timezone(&Local).naive_local());
    match local {
        Some(local) => clamp_to_dos_range(local),
        None => dos_ceiling(),
    }
}

/// Clamps a naive local time into the DOS date range.
#[must_use]
pub fn clamp_to_dos_range(time: NaiveDateTime) -> DateTime {
    if time.year() < 1980 {
        return DateTime::default();
    }
    if time.year() > 2107 {
        return dos_ceiling();
    }
    // All components fit in u8/u16 once the year is in range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let converted = DateTime::from_date_and_time(
        time.year() as u16,
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
    );
    converted.unwrap_or_default()
}

fn dos_ceiling() -> DateTime {
    DateTime::from_date_and_time(2107, 12, 31, 23, 59, 58).unwrap_or_default()
}
