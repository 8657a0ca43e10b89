//! Configuration loading.
//!
//! Settings come from an optional JSON file and the command line; command-line values win.

use crate::cli::Args;
use camino::{Utf8Path, Utf8PathBuf};
use remap_core::{Pattern, ReplaceError, Replacer};
use serde::Deserialize;
use std::fs;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "remap.config.json";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The config file.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid.
    #[error("invalid config {path}: {source}")]
    Parse {
        /// The config file.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A required setting was given neither in the file nor on the command line.
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    /// `--map-file` is ambiguous with several files.
    #[error("--map-file can only be used with a single --file")]
    MapFileWithManyFiles,
}

/// Contents of a `remap.config.json` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    /// Directory containing the generated files.
    pub src_dir: Option<Utf8PathBuf>,
    /// Directory the rewritten files are written to.
    pub out_dir: Option<Utf8PathBuf>,
    /// Text or regular expression to search for.
    pub pattern: Option<String>,
    /// Treat `pattern` as a regular expression.
    #[serde(default)]
    pub regex: bool,
    /// Replace every occurrence on a line.
    #[serde(default)]
    pub all: bool,
    /// Replacement text.
    pub replacement: Option<String>,
    /// Expand capture group references in `replacement`.
    #[serde(default)]
    pub template: bool,
    /// Files to rewrite.
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// One file listed in a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Generated file name, relative to the source directory.
    pub file: String,
    /// Source map file name; defaults to `<file>.map`.
    pub map_file: Option<String>,
}

impl FileConfig {
    /// Loads a config file.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `remap.config.json` from `dir` if it exists.
    pub fn find(dir: &Utf8Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            tracing::debug!(%path, "using config file");
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// A generated file and its source map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Generated file name, relative to the source and output directories.
    pub file: String,
    /// Source map file name, relative to the source and output directories.
    pub map_file: String,
}

impl Job {
    /// Creates a job, defaulting the map file to `<file>.map`.
    pub fn new(file: impl Into<String>, map_file: Option<String>) -> Self {
        let file = file.into();
        let map_file = map_file.unwrap_or_else(|| format!("{file}.map"));
        Self { file, map_file }
    }
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory containing the generated files.
    pub src_dir: Utf8PathBuf,
    /// Directory the rewritten files are written to.
    pub out_dir: Utf8PathBuf,
    /// Files to rewrite.
    pub jobs: Vec<Job>,
    /// Text or regular expression to search for.
    pub pattern: String,
    /// Treat `pattern` as a regular expression.
    pub regex: bool,
    /// Replace every occurrence on a line.
    pub all: bool,
    /// Replacement text.
    pub replacement: String,
    /// Expand capture group references in `replacement`.
    pub template: bool,
}

impl RunConfig {
    /// Merges command-line arguments over an optional config file.
    pub fn resolve(args: &Args, file: Option<FileConfig>) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();

        let jobs = if args.files.is_empty() {
            if args.map_file.is_some() && file.files.len() > 1 {
                return Err(ConfigError::MapFileWithManyFiles);
            }
            file.files
                .into_iter()
                .map(|entry| Job::new(entry.file, args.map_file.clone().or(entry.map_file)))
                .collect::<Vec<_>>()
        } else {
            if args.map_file.is_some() && args.files.len() > 1 {
                return Err(ConfigError::MapFileWithManyFiles);
            }
            args.files
                .iter()
                .map(|name| Job::new(name.clone(), args.map_file.clone()))
                .collect()
        };
        if jobs.is_empty() {
            return Err(ConfigError::Missing("file"));
        }

        Ok(Self {
            src_dir: args
                .src_dir
                .clone()
                .or(file.src_dir)
                .unwrap_or_else(|| Utf8PathBuf::from(".")),
            out_dir: args
                .out_dir
                .clone()
                .or(file.out_dir)
                .ok_or(ConfigError::Missing("outDir"))?,
            jobs,
            pattern: args
                .pattern
                .clone()
                .or(file.pattern)
                .ok_or(ConfigError::Missing("pattern"))?,
            regex: args.regex || file.regex,
            all: args.all || file.all,
            replacement: args
                .replacement
                .clone()
                .or(file.replacement)
                .ok_or(ConfigError::Missing("replacement"))?,
            template: args.template || file.template,
        })
    }

    /// Builds the pattern to search for.
    pub fn build_pattern(&self) -> Result<Pattern, ReplaceError> {
        let pattern = if self.regex {
            Pattern::regex(&self.pattern)?
        } else {
            Pattern::literal(self.pattern.as_str())
        };
        Ok(if self.all { pattern.all() } else { pattern })
    }

    /// Builds a fresh replacer.
    pub fn build_replacer(&self) -> Replacer<'static> {
        if self.template {
            Replacer::template(&self.replacement)
        } else {
            Replacer::fixed(self.replacement.as_str())
        }
    }
}
