//! Find/replace over generated code that keeps its source map valid.
//!
//! A pass has three stages:
//!
//! 1. [`replace_in_source`] rewrites the text line by line and records, for every substitution,
//!    where it happened and how much longer or shorter it made the line.
//! 2. [`sum_up_offsets`] turns those records into per-line cumulative boundaries.
//! 3. [`update_generated_source_map`] walks the original mappings and the boundaries together,
//!    shifting generated columns while leaving original positions alone.
//!
//! [`update_source_map`] and [`replace_with_map`] chain the stages around the JSON codec from
//! the `source-map` crate.

mod error;
mod offsets;
mod pattern;
mod replacer;
mod rewrite;
mod scanner;

pub use error::{RemapError, ReplaceError};
pub use offsets::{sum_up_offsets, OffsetBoundaries, OffsetBoundary, UNBOUNDED};
pub use pattern::Pattern;
pub use replacer::{MatchContext, Replacer, ReplacerFn, Template};
pub use rewrite::update_generated_source_map;
pub use scanner::{replace_in_source, ReplaceOutput, ReplacementRecord};

/// Rewrites a serialized source map after the replacements in `records`.
///
/// `file` becomes the `file` field of the new map. Sources, source contents and names are
/// carried over from the input map.
pub fn update_source_map(
    map_json: &str,
    records: &[ReplacementRecord],
    file: &str,
) -> Result<String, RemapError> {
    let map = source_map::decode(map_json)?;
    let boundaries = sum_up_offsets(records);
    let mappings = update_generated_source_map(map.mappings(), &boundaries);
    Ok(source_map::encode(file, &map, &mappings)?)
}

/// The outputs of a full pass over one file.
#[derive(Debug, Clone)]
pub struct Remapped {
    /// The rewritten text.
    pub code: String,
    /// The rewritten source map, serialized.
    pub map: String,
    /// One record per substitution.
    pub records: Vec<ReplacementRecord>,
    /// Number of mappings in the rewritten map.
    pub mapping_count: usize,
}

/// Replaces `pattern` in `source` and rewrites `map_json` to match.
///
/// Either both the text and the map are produced or an error is returned.
pub fn replace_with_map(
    source: &str,
    map_json: &str,
    pattern: &Pattern,
    replacer: &mut Replacer<'_>,
    file: &str,
) -> Result<Remapped, RemapError> {
    let map = source_map::decode(map_json)?;
    let ReplaceOutput { code, records } = replace_in_source(source, pattern, replacer)?;

    let boundaries = sum_up_offsets(&records);
    let mappings = update_generated_source_map(map.mappings(), &boundaries);
    let map = source_map::encode(file, &map, &mappings)?;

    Ok(Remapped {
        code,
        map,
        records,
        mapping_count: mappings.len(),
    })
}
