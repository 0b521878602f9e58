//! Configuration for backup runs.

use crate::BackupError;
use crate::Result;
use crate::scan::ExclusionSet;
use std::fmt;
use std::str::FromStr;

/// Default copy block size (8 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// Folder names pruned from traversal when the caller supplies none.
pub const DEFAULT_EXCLUDES: &[&str] = &[".git", "node_modules", "venv", "__pycache__", "dist", "build"];

/// Deflate level used when `deflate` is selected without an explicit level.
pub const DEFAULT_DEFLATE_LEVEL: u8 = 1;

/// Compression mode name as it appears in the configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionKind {
    /// No compression.
    #[default]
    Store,
    /// Per-entry deflate.
    Deflate,
}

impl FromStr for CompressionKind {
    type Err = BackupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "store" | "stored" => Ok(Self::Store),
            "deflate" | "deflated" => Ok(Self::Deflate),
            _ => Err(BackupError::UnknownCompression(s.to_string())),
        }
    }
}

impl fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store => f.write_str("store"),
            Self::Deflate => f.write_str("deflate"),
        }
    }
}

/// Compression applied to every entry of one run.
///
/// # Examples
///
/// ```
/// use snapzip_core::CompressionSpec;
/// use snapzip_core::config::CompressionKind;
///
/// assert_eq!(CompressionSpec::default(), CompressionSpec::Store);
///
/// let spec = CompressionSpec::from_kind(CompressionKind::Deflate, None)?;
/// assert_eq!(spec, CompressionSpec::Deflate { level: 1 });
///
/// assert!(CompressionSpec::deflate(10).is_err());
/// # Ok::<(), snapzip_core::BackupError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionSpec {
    /// Raw bytes, no CPU cost.
    #[default]
    Store,
    /// Deflate at the given level (1 fastest, 9 smallest).
    Deflate {
        /// Level in 1..=9.
        level: u8,
    },
}

impl CompressionSpec {
    /// Deflate at `level`, rejecting levels outside 1-9.
    pub fn deflate(level: u8) -> Result<Self> {
        if (1..=9).contains(&level) {
            Ok(Self::Deflate { level })
        } else {
            Err(BackupError::InvalidCompressionLevel { level })
        }
    }

    /// Builds the setting from the plain `mode` + optional `level` values.
    ///
    /// `store` must not carry a level; `deflate` without one uses
    /// [`DEFAULT_DEFLATE_LEVEL`].
    pub fn from_kind(kind: CompressionKind, level: Option<u8>) -> Result<Self> {
        match (kind, level) {
            (CompressionKind::Store, None) => Ok(Self::Store),
            (CompressionKind::Store, Some(_)) => Err(BackupError::LevelWithoutDeflate),
            (CompressionKind::Deflate, level) => Self::deflate(level.unwrap_or(DEFAULT_DEFLATE_LEVEL)),
        }
    }

    /// The mode name of this setting.
    #[must_use]
    pub const fn kind(&self) -> CompressionKind {
        match self {
            Self::Store => CompressionKind::Store,
            Self::Deflate { .. } => CompressionKind::Deflate,
        }
    }

    /// The deflate level, `None` for `Store`.
    #[must_use]
    pub const fn level(&self) -> Option<u8> {
        match self {
            Self::Store => None,
            Self::Deflate { level } => Some(*level),
        }
    }
}

impl fmt::Display for CompressionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store => f.write_str("store"),
            Self::Deflate { level } => write!(f, "deflate (level {level})"),
        }
    }
}

/// Configuration for one backup run.
///
/// # Examples
///
/// ```
/// use snapzip_core::BackupConfig;
/// use snapzip_core::CompressionSpec;
/// use snapzip_core::ExclusionSet;
///
/// let config = BackupConfig::default()
///     .with_exclusions(ExclusionSet::parse(".git, target"))
///     .with_compression(CompressionSpec::deflate(9)?);
/// assert!(config.validate().is_ok());
/// # Ok::<(), snapzip_core::BackupError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// Folder names pruned at every depth.
    ///
    /// Default: [`DEFAULT_EXCLUDES`].
    pub exclusions: ExclusionSet,

    /// Compression applied to every entry.
    ///
    /// Default: `Store`.
    pub compression: CompressionSpec,

    /// Size of each read/write block in bytes.
    ///
    /// Default: [`DEFAULT_CHUNK_SIZE`]. Bounds peak memory and cancellation
    /// latency.
    pub chunk_size: usize,

    /// Copy unix permission bits into archive entries.
    ///
    /// Default: `true`. Ignored on non-unix hosts.
    pub preserve_permissions: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            exclusions: ExclusionSet::default(),
            compression: CompressionSpec::Store,
            chunk_size: DEFAULT_CHUNK_SIZE,
            preserve_permissions: true,
        }
    }
}

impl BackupConfig {
    /// Creates a new `BackupConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exclusion set.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Sets the compression mode and level.
    #[must_use]
    pub fn with_compression(mut self, compression: CompressionSpec) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the copy block size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `chunk_size` is zero
    /// - a deflate level is outside 1-9 (only reachable by constructing the
    ///   enum variant directly)
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(BackupError::InvalidConfig {
                reason: "chunk size must be greater than zero".into(),
            });
        }
        if let CompressionSpec::Deflate { level } = self.compression
            && !(1..=9).contains(&level)
        {
            return Err(BackupError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}
