//! Generated and original positions.
//!
//! Lines are 1-based and columns are 0-based UTF-16 code unit offsets, the convention used by
//! JavaScript source map consumers. The v3 wire format stores 0-based lines; the codec converts
//! at the boundary.

/// A position in the generated (post-build) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedPosition {
    /// 1-indexed line number.
    pub line: u32,
    /// 0-indexed column in UTF-16 code units.
    pub column: u32,
}

impl GeneratedPosition {
    /// Creates a new generated position.
    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A position in the original (human-authored) source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OriginalPosition {
    /// 1-indexed line number.
    pub line: u32,
    /// 0-indexed column in UTF-16 code units.
    pub column: u32,
}

impl OriginalPosition {
    /// Creates a new original position.
    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Returns the length of `text` in UTF-16 code units.
#[inline]
pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}
