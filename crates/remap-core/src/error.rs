//! Replacement and remapping errors.

use source_map::SourceMapError;
use thiserror::Error;

/// An error raised while producing replacements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplaceError {
    /// The regular expression could not be compiled.
    #[error("invalid pattern: {0}")]
    InvalidRegex(String),

    /// A replacement template referred to a capture group the pattern does not define.
    #[error("replacement refers to unknown capture group `{group}` (line {line}, column {column})")]
    UnknownGroup {
        /// The group reference as written in the template.
        group: String,
        /// 1-indexed line of the match.
        line: u32,
        /// 0-indexed column of the match.
        column: u32,
    },

    /// A replacement would insert a line break, which would change the line count.
    #[error("replacement at line {line}, column {column} contains a line break")]
    LineBreakInReplacement {
        /// 1-indexed line of the match.
        line: u32,
        /// 0-indexed column of the match.
        column: u32,
    },

    /// A replacer function failed.
    #[error("replacer failed at line {line}, column {column}: {message}")]
    Replacer {
        /// What went wrong.
        message: String,
        /// 1-indexed line of the match.
        line: u32,
        /// 0-indexed column of the match.
        column: u32,
    },
}

/// An error raised by a full replace-and-remap pass.
#[derive(Debug, Error)]
pub enum RemapError {
    /// Producing the replacements failed.
    #[error(transparent)]
    Replace(#[from] ReplaceError),

    /// The source map could not be decoded or encoded.
    #[error(transparent)]
    SourceMap(#[from] SourceMapError),
}
