//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_complete::Shell;
use snapzip_core::CompressionKind;
use std::path::PathBuf;

/// Default value of `--exclude`.
pub const DEFAULT_EXCLUDE_LIST: &str = ".git,node_modules,venv,__pycache__,dist,build";

#[derive(Parser, Debug)]
#[command(name = "snapzip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = "DEFAULT EXCLUDES:\n  .git, node_modules, venv, __pycache__, dist, build")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a timestamped ZIP snapshot of a directory
    Backup(BackupArgs),
    /// Scan a directory and report what a backup would include
    Scan(ScanArgs),
    /// Generate shell completion scripts
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Backup(_) => "backup",
            Self::Scan(_) => "scan",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ExcludeArgs {
    /// Comma-separated folder names to skip at any depth
    #[arg(
        short,
        long,
        value_name = "FOLDERS",
        env = "SNAPZIP_EXCLUDE",
        default_value = DEFAULT_EXCLUDE_LIST
    )]
    pub exclude: String,
}

#[derive(clap::Args, Debug)]
pub struct BackupArgs {
    /// Source project directory to back up
    #[arg(short, long, value_name = "PATH", env = "SNAPZIP_SOURCE")]
    pub source: PathBuf,

    /// Destination directory for the archive (created if missing)
    #[arg(short, long, value_name = "PATH", env = "SNAPZIP_DEST")]
    pub dest: PathBuf,

    /// Compression method: store is fastest, deflate is smaller
    #[arg(short, long, value_enum, default_value_t = CompressionArg::Store)]
    pub compression: CompressionArg,

    /// Deflate level, 1 = fastest, 9 = smallest (only with --compression deflate)
    #[arg(short, long, value_name = "1-9", value_parser = clap::value_parser!(u8).range(1..=9))]
    pub level: Option<u8>,

    #[command(flatten)]
    pub exclude: ExcludeArgs,
}

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Source directory to scan
    #[arg(short, long, value_name = "PATH", env = "SNAPZIP_SOURCE")]
    pub source: PathBuf,

    /// List every file that would be archived
    #[arg(long)]
    pub list: bool,

    #[command(flatten)]
    pub exclude: ExcludeArgs,
}

#[derive(clap::Args, Debug)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressionArg {
    /// No compression
    Store,
    /// Deflate compression
    Deflate,
}

impl From<CompressionArg> for CompressionKind {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Store => Self::Store,
            CompressionArg::Deflate => Self::Deflate,
        }
    }
}
