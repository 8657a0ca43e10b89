//! Source map v3 JSON codec.
//!
//! Decoding and encoding are delegated to the `sourcemap` crate. This module only translates
//! between its 0-based token lines and the 1-based lines used everywhere else.

use crate::{DecodedMap, GeneratedPosition, MappingEntry, OriginalPosition, SourceMapError};

/// Decodes a serialized source map.
///
/// Index maps (`sections`) are flattened into a regular map first. Sources are reported as the
/// decoder resolves them, with any `sourceRoot` already applied. Mappings are returned in
/// ascending generated order.
pub fn decode(json: &str) -> Result<DecodedMap, SourceMapError> {
    let map = match sourcemap::decode_slice(json.as_bytes()).map_err(SourceMapError::Decode)? {
        sourcemap::DecodedMap::Regular(map) => map,
        sourcemap::DecodedMap::Index(index) => index.flatten().map_err(SourceMapError::Decode)?,
        _ => return Err(SourceMapError::Unsupported),
    };

    let sources: Vec<String> = map.sources().map(str::to_owned).collect();
    let sources_content = (0..map.get_source_count())
        .map(|idx| map.get_source_contents(idx).map(str::to_owned))
        .collect();
    let names = map.names().map(str::to_owned).collect();

    let mut mappings: Vec<MappingEntry> = map
        .tokens()
        .map(|token| {
            let generated = GeneratedPosition::new(token.get_dst_line() + 1, token.get_dst_col());
            match token.get_source() {
                Some(source) => MappingEntry {
                    generated,
                    original: Some(OriginalPosition::new(
                        token.get_src_line() + 1,
                        token.get_src_col(),
                    )),
                    source: Some(source.to_owned()),
                    name: token.get_name().map(str::to_owned),
                },
                None => MappingEntry::generated_only(generated),
            }
        })
        .collect();
    // Columns are delta-encoded and may go backwards within a line.
    mappings.sort_by_key(|m| m.generated);

    Ok(DecodedMap {
        file: map.get_file().map(str::to_owned),
        sources,
        sources_content,
        names,
        mappings,
    })
}

/// Encodes `mappings` as a source map for `file`.
///
/// Sources, embedded source contents and names are seeded from `seed` (normally the map the
/// mappings were decoded from) so that entries no mapping refers to are kept.
pub fn encode(
    file: &str,
    seed: &DecodedMap,
    mappings: &[MappingEntry],
) -> Result<String, SourceMapError> {
    let mut builder = sourcemap::SourceMapBuilder::new(None);
    builder.set_file(Some(file));

    for (idx, source) in seed.sources.iter().enumerate() {
        let src_id = builder.add_source(source);
        if let Some(Some(contents)) = seed.sources_content.get(idx) {
            builder.set_source_contents(src_id, Some(contents.as_str()));
        }
    }
    for name in &seed.names {
        builder.add_name(name);
    }

    for entry in mappings {
        let dst_line = zero_based(entry.generated.line)?;
        let dst_col = entry.generated.column;
        match entry.original {
            Some(original) => {
                builder.add(
                    dst_line,
                    dst_col,
                    zero_based(original.line)?,
                    original.column,
                    entry.source.as_deref(),
                    entry.name.as_deref(),
                    false,
                );
            }
            None => {
                // Generated-only segment.
                builder.add(dst_line, dst_col, u32::MAX, u32::MAX, None, None, false);
            }
        }
    }

    let map = builder.into_sourcemap();
    let mut buf: Vec<u8> = Vec::new();
    map.to_writer(&mut buf).map_err(SourceMapError::Encode)?;
    Ok(String::from_utf8(buf)?)
}

fn zero_based(line: u32) -> Result<u32, SourceMapError> {
    line.checked_sub(1).ok_or(SourceMapError::InvalidLine(line))
}
