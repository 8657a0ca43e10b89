//! Byte spans within a single line of generated text.

use text_size::{TextRange, TextSize};

/// A byte offset into a line of text.
pub type ByteOffset = TextSize;

/// A matched region of a line.
///
/// Spans are half-open intervals `[start, end)` of byte offsets. They are only used to splice
/// text; positions reported to source maps are counted in UTF-16 code units instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The start byte offset (inclusive).
    pub start: ByteOffset,
    /// The end byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[inline]
    pub fn new(start: impl Into<ByteOffset>, end: impl Into<ByteOffset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates the span of `needle` when it starts `start` bytes into a line.
    #[inline]
    pub fn at(start: ByteOffset, needle: &str) -> Self {
        Self {
            start,
            end: start + TextSize::of(needle),
        }
    }

    /// Returns the length of this span in bytes.
    #[inline]
    pub fn len(&self) -> TextSize {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the text this span covers in `line`.
    ///
    /// Panics if the span is out of bounds or splits a character, like slicing a `str` does.
    #[inline]
    pub fn slice(self, line: &str) -> &str {
        &line[self.to_range()]
    }

    /// Returns the text of `line` before this span.
    #[inline]
    pub fn prefix(self, line: &str) -> &str {
        &line[..usize::from(self.start)]
    }

    /// Converts this span to a `TextRange`.
    #[inline]
    pub fn to_range(self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}

impl From<TextRange> for Span {
    fn from(range: TextRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
        }
    }
}

impl From<Span> for TextRange {
    fn from(span: Span) -> Self {
        TextRange::new(span.start, span.end)
    }
}
