//! Patterns matched against single lines of generated code.

use crate::ReplaceError;
use regex::{Captures, Regex};
use source_map::Span;
use text_size::TextSize;

/// What to look for on each line.
///
/// Both flavours replace only the first occurrence on a line unless switched to
/// [`Pattern::all`], mirroring how a non-global find/replace behaves in most editors.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// A literal substring.
    Literal {
        /// The text to find. An empty needle never matches.
        needle: String,
        /// Replace every occurrence instead of the first one.
        all: bool,
    },
    /// A regular expression, optionally with capture groups.
    Regex {
        /// The compiled expression.
        regex: Regex,
        /// Replace every occurrence instead of the first one.
        all: bool,
    },
}

/// A single match on a line.
#[derive(Debug)]
pub(crate) struct Found<'l> {
    /// Byte span of the whole match within the line.
    pub(crate) span: Span,
    /// Capture groups, for regex patterns.
    pub(crate) captures: Option<Captures<'l>>,
}

impl Pattern {
    /// Creates a pattern matching the first occurrence of `needle` on each line.
    pub fn literal(needle: impl Into<String>) -> Self {
        Pattern::Literal {
            needle: needle.into(),
            all: false,
        }
    }

    /// Compiles a regular expression matching its first occurrence on each line.
    pub fn regex(pattern: &str) -> Result<Self, ReplaceError> {
        let regex = Regex::new(pattern).map_err(|e| ReplaceError::InvalidRegex(e.to_string()))?;
        Ok(Self::from_regex(regex))
    }

    /// Wraps an already compiled regular expression.
    pub fn from_regex(regex: Regex) -> Self {
        Pattern::Regex { regex, all: false }
    }

    /// Matches every non-overlapping occurrence on each line.
    pub fn all(self) -> Self {
        match self {
            Pattern::Literal { needle, .. } => Pattern::Literal { needle, all: true },
            Pattern::Regex { regex, .. } => Pattern::Regex { regex, all: true },
        }
    }

    /// Returns true if every occurrence on a line is replaced.
    pub fn is_all(&self) -> bool {
        match self {
            Pattern::Literal { all, .. } | Pattern::Regex { all, .. } => *all,
        }
    }

    /// Returns the number of capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        match self {
            Pattern::Literal { .. } => 0,
            Pattern::Regex { regex, .. } => regex.captures_len() - 1,
        }
    }

    /// Returns true if `index` refers to a group this pattern defines (0 is the whole match).
    pub(crate) fn defines_group(&self, index: usize) -> bool {
        index <= self.group_count()
    }

    /// Returns true if this pattern defines a group called `name`.
    pub(crate) fn defines_name(&self, name: &str) -> bool {
        match self {
            Pattern::Literal { .. } => false,
            Pattern::Regex { regex, .. } => regex.capture_names().flatten().any(|n| n == name),
        }
    }

    /// Finds matches on `line`, left to right, in the line's own coordinates.
    pub(crate) fn find_in<'l>(&self, line: &'l str) -> Vec<Found<'l>> {
        match self {
            Pattern::Literal { needle, all } => {
                if needle.is_empty() {
                    return Vec::new();
                }
                let found = line.match_indices(needle.as_str()).map(|(start, text)| Found {
                    span: Span::at(TextSize::of(&line[..start]), text),
                    captures: None,
                });
                if *all {
                    found.collect()
                } else {
                    found.take(1).collect()
                }
            }
            Pattern::Regex { regex, all } => {
                let found = regex.captures_iter(line).filter_map(|captures| {
                    let whole = captures.get(0)?;
                    Some(Found {
                        span: Span::at(TextSize::of(&line[..whole.start()]), whole.as_str()),
                        captures: Some(captures),
                    })
                });
                if *all {
                    found.collect()
                } else {
                    found.take(1).collect()
                }
            }
        }
    }
}
