//! Source map codec errors.

use thiserror::Error;

/// An error that occurred while decoding or encoding a source map.
#[derive(Debug, Error)]
pub enum SourceMapError {
    /// The input could not be decoded as a source map.
    #[error("failed to decode source map: {0}")]
    Decode(#[source] sourcemap::Error),

    /// The input decoded to a map flavour that cannot be rewritten.
    #[error("unsupported source map format")]
    Unsupported,

    /// The rewritten map could not be serialized.
    #[error("failed to encode source map: {0}")]
    Encode(#[source] sourcemap::Error),

    /// The serialized map was not valid UTF-8.
    #[error("encoded source map is not valid UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    /// A line number was outside the range the v3 format can represent.
    #[error("line {0} cannot be encoded")]
    InvalidLine(u32),
}
