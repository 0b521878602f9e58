//! Folder-name exclusion rules.
//!
//! Exclusions are plain folder base names, not paths or globs. A name matches
//! any path component at any depth, exactly and case-sensitively.

use crate::config::DEFAULT_EXCLUDES;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

/// A set of folder names pruned from traversal.
///
/// # Examples
///
/// ```
/// use snapzip_core::ExclusionSet;
/// use std::path::Path;
///
/// let set = ExclusionSet::parse(" .git, node_modules ,,");
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(".git"));
/// assert!(set.is_excluded(Path::new("proj/web/node_modules/lib/index.js")));
/// assert!(!set.is_excluded(Path::new("proj/src/main.rs")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl Default for ExclusionSet {
    /// `.git`, `node_modules`, `venv`, `__pycache__`, `dist`, `build`.
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDES.iter().copied())
    }
}

impl ExclusionSet {
    /// Builds a set from folder names. Surrounding whitespace is trimmed and
    /// empty names are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// A set that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Parses a comma-separated list such as `".git,node_modules,venv"`.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Returns `true` if `name` is an excluded folder name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns `true` if the OS file name is excluded.
    ///
    /// Names that are not valid UTF-8 never match.
    #[must_use]
    pub fn contains_os(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|name| self.contains(name))
    }

    /// Returns `true` if any component of `path` is excluded.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        path.components()
            .any(|component| self.contains_os(component.as_os_str()))
    }

    /// Number of names in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Display for ExclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        f.write_str(&joined.join(","))
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
