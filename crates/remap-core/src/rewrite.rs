//! Shifting source map mappings by cumulative offsets.

use crate::OffsetBoundaries;
use source_map::{GeneratedPosition, MappingEntry};

/// Shifts the generated column of every mapping by the boundary in effect at its position.
///
/// Generated lines and all original-side fields are copied unchanged. `mappings` must be in
/// ascending generated order; both sequences are walked once and the boundary cursor never moves
/// back.
pub fn update_generated_source_map<'m>(
    mappings: impl IntoIterator<Item = &'m MappingEntry>,
    boundaries: &OffsetBoundaries,
) -> Vec<MappingEntry> {
    let bounds = boundaries.as_slice();
    let mut current = 0;
    let mut previous: Option<GeneratedPosition> = None;

    let rewritten: Vec<MappingEntry> = mappings
        .into_iter()
        .map(|mapping| {
            let generated = mapping.generated;
            debug_assert!(
                previous.map_or(true, |p| p <= generated),
                "mappings out of generated order: {:?} after {:?}",
                generated,
                previous
            );
            previous = Some(generated);

            // The trailing sentinel stops this loop for every position.
            while bounds[current].is_before(generated) {
                current += 1;
            }

            let column = shift_column(generated, bounds[current].diff);
            mapping.moved_to(GeneratedPosition::new(generated.line, column))
        })
        .collect();

    tracing::debug!(
        mappings = rewritten.len(),
        boundaries = bounds.len(),
        "rewrote generated positions"
    );

    rewritten
}

fn shift_column(generated: GeneratedPosition, diff: i64) -> u32 {
    let shifted = i64::from(generated.column) + diff;
    if shifted < 0 {
        // Only possible for a mapping inside text that a replacement removed.
        tracing::warn!(
            line = generated.line,
            column = generated.column,
            diff,
            "mapping shifted before the start of its line; clamping to column 0"
        );
        return 0;
    }
    u32::try_from(shifted).unwrap_or(u32::MAX)
}
