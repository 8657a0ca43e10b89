//! Source map model for remap-replace.
//!
//! This crate provides the positions, spans and mapping entries that flow through a
//! find/replace pass, together with a v3 JSON codec so rewritten mappings can be written
//! back out as a source map that debuggers understand.

mod codec;
mod error;
mod mapping;
mod position;
mod span;

pub use codec::{decode, encode};
pub use error::SourceMapError;
pub use mapping::{DecodedMap, MappingEntry};
pub use position::{utf16_len, GeneratedPosition, OriginalPosition};
pub use span::{ByteOffset, Span};
