//! Property-based tests for scanning and archive writing.
//!
//! These tests generate arbitrary directory trees and verify the archive
//! invariants hold across a wide range of shapes.

#![allow(clippy::expect_used)]

use proptest::prelude::*;
use snapzip_core::BackupConfig;
use snapzip_core::BackupRequest;
use snapzip_core::CancelFlag;
use snapzip_core::ExclusionSet;
use snapzip_core::ProgressEvent;
use snapzip_core::archive::entry_name;
use snapzip_core::run_backup;
use snapzip_core::scan_tree;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::ZipArchive;

/// Relative file paths (1-3 components) mapped to their contents.
fn tree_strategy() -> impl Strategy<Value = BTreeMap<Vec<String>, Vec<u8>>> {
    let component = prop_oneof![
        4 => "[a-z]{1,6}",
        1 => Just(".git".to_string()),
        1 => Just("node_modules".to_string()),
        1 => Just("build".to_string()),
    ];
    prop::collection::btree_map(
        prop::collection::vec(component, 1..4),
        prop::collection::vec(any::<u8>(), 0..2048),
        1..12,
    )
}

/// Writes the tree under `<temp>/src`, skipping paths that collide with an
/// existing file or directory.
fn materialize(
    temp: &TempDir,
    tree: &BTreeMap<Vec<String>, Vec<u8>>,
) -> (PathBuf, BTreeMap<String, Vec<u8>>) {
    let root = temp.path().join("src");
    fs::create_dir_all(&root).expect("create root");
    let mut written = BTreeMap::new();
    for (components, data) in tree {
        let relative: PathBuf = components.iter().collect();
        let path = root.join(&relative);
        if let Some(parent) = path.parent()
            && fs::create_dir_all(parent).is_err()
        {
            continue;
        }
        if path.exists() || fs::write(&path, data).is_err() {
            continue;
        }
        written.insert(components.join("/"), data.clone());
    }
    (root, written)
}

fn is_excluded(relative: &str, exclusions: &ExclusionSet) -> bool {
    let parts: Vec<&str> = relative.split('/').collect();
    parts[..parts.len() - 1].iter().any(|p| exclusions.contains(p))
}

fn archive_contents(path: &std::path::Path) -> BTreeMap<String, Vec<u8>> {
    let mut archive = ZipArchive::new(fs::File::open(path).expect("open")).expect("zip");
    let mut out = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("entry");
        let mut data = Vec::new();
        file.read_to_end(&mut data).expect("read");
        out.insert(file.name().to_string(), data);
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Files under excluded folders never appear; every other file does,
    /// byte-for-byte.
    #[test]
    fn prop_archive_matches_filtered_tree(tree in tree_strategy(), deflate in any::<bool>()) {
        let temp = TempDir::new().expect("temp");
        let (root, written) = materialize(&temp, &tree);
        let exclusions = ExclusionSet::default();
        let expected: BTreeMap<String, Vec<u8>> = written
            .into_iter()
            .filter(|(rel, _)| !is_excluded(rel, &exclusions))
            .map(|(rel, data)| (format!("src/{rel}"), data))
            .collect();
        prop_assume!(!expected.is_empty());

        let mut config = BackupConfig::default().with_chunk_size(512);
        if deflate {
            config = config.with_compression(snapzip_core::CompressionSpec::deflate(6).expect("level"));
        }
        let request = BackupRequest::new(&root, temp.path().join("out")).with_config(config);
        let mut events: Vec<ProgressEvent> = Vec::new();
        let report = run_backup(&request, &mut |e: ProgressEvent| events.push(e), &CancelFlag::new())
            .expect("backup");

        prop_assert_eq!(archive_contents(&report.archive_path), expected.clone());

        // Progress is monotonic and completes exactly once.
        let total: u64 = expected.values().map(|d| d.len() as u64).sum();
        prop_assert!(events.windows(2).all(|w| w[0].processed <= w[1].processed));
        prop_assert!(events.iter().all(|e| e.total == total));
        prop_assert_eq!(events.iter().filter(|e| e.processed == total).count(), 1);
        prop_assert_eq!(events.last().map(|e| e.processed), Some(total));
    }

    /// Scan totals equal the sum of scanned entry sizes.
    #[test]
    fn prop_scan_total_is_sum_of_sizes(tree in tree_strategy()) {
        let temp = TempDir::new().expect("temp");
        let (root, _) = materialize(&temp, &tree);
        if let Ok(scan) = scan_tree(&root, &ExclusionSet::default()) {
            let sum: u64 = scan.entries.iter().map(|e| e.size).sum();
            prop_assert_eq!(scan.total_bytes, sum);
            prop_assert!(scan.entries.iter().all(|e| !e.relative.as_os_str().is_empty()));
        }
    }

    /// Entry names use `/` only and always start with the root name.
    #[test]
    fn prop_entry_names_portable(
        root in "[a-zA-Z0-9_.-]{1,12}",
        components in prop::collection::vec("[a-zA-Z0-9 _\\\\-]{1,10}", 1..6)
    ) {
        let relative: PathBuf = components.iter().collect();
        let name = entry_name(&root, &relative);
        prop_assert!(!name.contains('\\'));
        let expected_prefix = format!("{root}/");
        prop_assert!(name.starts_with(&expected_prefix));
    }
}
