//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Find/replace over generated code that keeps its source map valid.
#[derive(Debug, Parser)]
#[command(name = "remap-replace")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory containing the generated files
    #[arg(long = "src-dir")]
    pub src_dir: Option<Utf8PathBuf>,

    /// Directory the rewritten files are written to
    #[arg(long = "out-dir")]
    pub out_dir: Option<Utf8PathBuf>,

    /// Generated file to rewrite, relative to the source directory (repeatable)
    #[arg(long = "file")]
    pub files: Vec<String>,

    /// Source map file name (single --file only, defaults to <file>.map)
    #[arg(long = "map-file")]
    pub map_file: Option<String>,

    /// Text to search for on each line
    #[arg(long)]
    pub pattern: Option<String>,

    /// Treat the pattern as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Replace every occurrence on a line instead of the first
    #[arg(long)]
    pub all: bool,

    /// Replacement text
    #[arg(long)]
    pub replacement: Option<String>,

    /// Expand $1, ${1} and ${name} in the replacement
    #[arg(long)]
    pub template: bool,

    /// Path to a JSON configuration file (defaults to remap.config.json if present)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Log debug information to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output
    Json,
}
