//! Line-by-line find/replace that records where each substitution happened.

use crate::{MatchContext, Pattern, ReplaceError, Replacer};
use source_map::{utf16_len, Span};
use text_size::TextSize;

/// One substitution, located in the generated text as it was before the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplacementRecord {
    /// 1-indexed line of the match.
    pub line: u32,
    /// 0-indexed column where the match began, in UTF-16 code units of the original line.
    pub column: u32,
    /// Length of the replacement minus length of the match, in UTF-16 code units.
    pub diff: i64,
}

impl ReplacementRecord {
    /// Creates a new record.
    #[inline]
    pub fn new(line: u32, column: u32, diff: i64) -> Self {
        Self { line, column, diff }
    }
}

/// The result of a replacement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutput {
    /// The rewritten text.
    pub code: String,
    /// One record per substitution, in scan order.
    pub records: Vec<ReplacementRecord>,
}

/// Replaces `pattern` with `replacer` in every line of `source`.
///
/// Lines are split on `\n` and joined back with `\n`, so line endings are preserved. Matches on
/// a line are found in a single left-to-right scan of the original line; recorded columns are
/// therefore offsets into the line before any of its substitutions.
///
/// Fails if the replacer fails or if a replacement contains a line break.
pub fn replace_in_source(
    source: &str,
    pattern: &Pattern,
    replacer: &mut Replacer<'_>,
) -> Result<ReplaceOutput, ReplaceError> {
    let mut code = String::with_capacity(source.len());
    let mut records = Vec::new();
    let mut line_count = 0u32;

    for (idx, line) in source.split('\n').enumerate() {
        if idx > 0 {
            code.push('\n');
        }
        line_count = idx as u32 + 1;
        replace_in_line(line, line_count, pattern, replacer, &mut code, &mut records)?;
    }

    tracing::debug!(
        lines = line_count,
        replacements = records.len(),
        "replaced in source"
    );

    Ok(ReplaceOutput { code, records })
}

fn replace_in_line(
    line: &str,
    line_number: u32,
    pattern: &Pattern,
    replacer: &mut Replacer<'_>,
    out: &mut String,
    records: &mut Vec<ReplacementRecord>,
) -> Result<(), ReplaceError> {
    // Byte cursor into `line` and the UTF-16 column it corresponds to.
    let mut cursor = TextSize::from(0);
    let mut column = 0u32;

    for found in pattern.find_in(line) {
        let before = Span::new(cursor, found.span.start).slice(line);
        let matched = found.span.slice(line);
        column += utf16_len(before);

        let ctx = MatchContext {
            line_number,
            column,
            line,
            matched,
            captures: found.captures,
        };
        let replacement = replacer.produce(pattern, &ctx)?;
        if replacement.contains(['\n', '\r']) {
            return Err(ReplaceError::LineBreakInReplacement {
                line: line_number,
                column,
            });
        }

        let diff = i64::from(utf16_len(&replacement)) - i64::from(utf16_len(matched));
        tracing::trace!(line = line_number, column, diff, "replacement");
        records.push(ReplacementRecord::new(line_number, column, diff));

        out.push_str(before);
        out.push_str(&replacement);
        column += utf16_len(matched);
        cursor = found.span.end;
    }

    out.push_str(&line[usize::from(cursor)..]);
    Ok(())
}
