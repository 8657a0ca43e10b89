//! Cumulative column offsets derived from replacement records.

use crate::ReplacementRecord;
use source_map::GeneratedPosition;

/// Stands in for an unbounded line or column.
pub const UNBOUNDED: u32 = u32::MAX;

/// A cumulative diff that applies up to and including a generated position.
///
/// On one line, the boundaries at columns `c1 < c2 < … < cn` followed by the line-closing
/// boundary at [`UNBOUNDED`] split the line into the intervals `[0, c1]`, `(c1, c2]`, …,
/// `(cn, ∞)`, each tagged with the shift to add to generated columns falling into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetBoundary {
    /// 1-indexed line, or [`UNBOUNDED`] for the sentinel.
    pub line: u32,
    /// 0-indexed column, or [`UNBOUNDED`] to close the line.
    pub column: u32,
    /// Sum of the diffs of all earlier replacements on the same line.
    pub diff: i64,
}

impl OffsetBoundary {
    /// The boundary terminating every sequence.
    pub const SENTINEL: OffsetBoundary = OffsetBoundary {
        line: UNBOUNDED,
        column: UNBOUNDED,
        diff: 0,
    };

    /// Creates a new boundary.
    #[inline]
    pub fn new(line: u32, column: u32, diff: i64) -> Self {
        Self { line, column, diff }
    }

    /// Creates the boundary closing `line` with its final cumulative diff.
    #[inline]
    pub fn line_end(line: u32, diff: i64) -> Self {
        Self {
            line,
            column: UNBOUNDED,
            diff,
        }
    }

    /// Returns true if `position` lies after this boundary, so the boundary no longer applies.
    #[inline]
    pub fn is_before(&self, position: GeneratedPosition) -> bool {
        position.line > self.line || (position.line == self.line && position.column > self.column)
    }
}

/// A boundary sequence produced by [`sum_up_offsets`].
///
/// The sequence always ends in [`OffsetBoundary::SENTINEL`], which no position can pass, so
/// a forward scan over it never runs off the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetBoundaries(Vec<OffsetBoundary>);

impl OffsetBoundaries {
    /// Returns the boundaries as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[OffsetBoundary] {
        &self.0
    }

    /// Returns the number of boundaries, sentinel included.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: the sentinel is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if no replacement was recorded.
    pub fn is_identity(&self) -> bool {
        self.0.iter().all(|b| b.diff == 0)
    }

    /// Returns the cumulative diff in effect at `position`.
    ///
    /// For shifting many ordered positions use
    /// [`update_generated_source_map`](crate::update_generated_source_map), which walks the
    /// sequence once instead of searching it per position.
    pub fn diff_at(&self, position: GeneratedPosition) -> i64 {
        let idx = self.0.partition_point(|b| b.is_before(position));
        self.0[idx].diff
    }

    /// Consumes the sequence, returning the boundaries.
    pub fn into_vec(self) -> Vec<OffsetBoundary> {
        self.0
    }
}

/// Sums up replacement diffs into per-line cumulative boundaries.
///
/// `records` must be in scan order, as produced by
/// [`replace_in_source`](crate::replace_in_source). Each boundary carries the sum of the diffs
/// of the records before it on the same line; every touched line is closed with an
/// [`UNBOUNDED`] column boundary and the cumulative diff resets on the next line.
pub fn sum_up_offsets(records: &[ReplacementRecord]) -> OffsetBoundaries {
    let mut boundaries = Vec::with_capacity(records.len() * 2 + 2);

    let mut current_diff = 0i64;
    let mut previous_line = 1u32;
    for record in records {
        if record.line > previous_line {
            boundaries.push(OffsetBoundary::line_end(previous_line, current_diff));
            current_diff = 0;
            previous_line = record.line;
        }
        boundaries.push(OffsetBoundary::new(record.line, record.column, current_diff));
        current_diff += record.diff;
    }
    boundaries.push(OffsetBoundary::line_end(previous_line, current_diff));
    boundaries.push(OffsetBoundary::SENTINEL);

    OffsetBoundaries(boundaries)
}
