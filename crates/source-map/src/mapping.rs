//! Decoded source map model.

use crate::{GeneratedPosition, OriginalPosition};

/// A single mapping from a generated position to an optional original position.
///
/// Entries without an original position describe generated-only segments.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MappingEntry {
    /// The position in the generated output.
    pub generated: GeneratedPosition,
    /// The position in the original source, if any.
    pub original: Option<OriginalPosition>,
    /// The original source file, if any.
    pub source: Option<String>,
    /// The original symbol name, if any.
    pub name: Option<String>,
}

impl MappingEntry {
    /// Creates a generated-only mapping entry.
    pub fn generated_only(generated: GeneratedPosition) -> Self {
        Self {
            generated,
            original: None,
            source: None,
            name: None,
        }
    }

    /// Creates a mapping entry pointing back into `source`.
    pub fn new(
        generated: GeneratedPosition,
        original: OriginalPosition,
        source: impl Into<String>,
    ) -> Self {
        Self {
            generated,
            original: Some(original),
            source: Some(source.into()),
            name: None,
        }
    }

    /// Sets the original symbol name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns a copy of this entry moved to another generated position.
    ///
    /// Original-side fields are carried over untouched.
    pub fn moved_to(&self, generated: GeneratedPosition) -> Self {
        Self {
            generated,
            ..self.clone()
        }
    }
}

/// A fully decoded source map.
///
/// Besides the mappings, the map keeps the metadata needed to seed a rewritten map so that
/// sources, embedded contents and names survive a rewrite even when no mapping refers to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedMap {
    /// The generated file this map describes.
    pub file: Option<String>,
    /// Original source files, with any `sourceRoot` already applied.
    pub sources: Vec<String>,
    /// Embedded contents of `sources`, index-aligned.
    pub sources_content: Vec<Option<String>>,
    /// Symbol names referenced by mappings.
    pub names: Vec<String>,
    /// Mappings, sorted by generated position.
    pub mappings: Vec<MappingEntry>,
}

impl DecodedMap {
    /// Returns the number of mappings.
    #[inline]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns true if the map has no mappings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Returns an iterator over all mappings in generated order.
    pub fn mappings(&self) -> impl Iterator<Item = &MappingEntry> {
        self.mappings.iter()
    }

    /// Returns true if the mappings are in non-decreasing generated order.
    pub fn is_ordered(&self) -> bool {
        self.mappings
            .windows(2)
            .all(|pair| pair[0].generated <= pair[1].generated)
    }

    /// Finds the mapping that covers a generated position.
    ///
    /// A mapping covers every column from its own up to the next mapping on the same line.
    pub fn lookup(&self, position: GeneratedPosition) -> Option<&MappingEntry> {
        let idx = match self
            .mappings
            .binary_search_by(|m| m.generated.cmp(&position))
        {
            Ok(idx) => idx,
            Err(0) => return None,
            Err(idx) => idx - 1,
        };

        self.mappings
            .get(idx)
            .filter(|m| m.generated.line == position.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DecodedMap {
        DecodedMap {
            sources: vec!["main.ts".to_string()],
            sources_content: vec![None],
            mappings: vec![
                MappingEntry::new(
                    GeneratedPosition::new(1, 0),
                    OriginalPosition::new(1, 0),
                    "main.ts",
                ),
                MappingEntry::new(
                    GeneratedPosition::new(1, 6),
                    OriginalPosition::new(1, 4),
                    "main.ts",
                ),
                MappingEntry::generated_only(GeneratedPosition::new(3, 2)),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_map() {
        let map = DecodedMap::default();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert!(map.is_ordered());
    }

    #[test]
    fn test_lookup() {
        let map = sample();
        let hit = map.lookup(GeneratedPosition::new(1, 8)).unwrap();
        assert_eq!(hit.original, Some(OriginalPosition::new(1, 4)));

        let hit = map.lookup(GeneratedPosition::new(1, 3)).unwrap();
        assert_eq!(hit.original, Some(OriginalPosition::new(1, 0)));

        // Line 2 has no mapping of its own.
        assert_eq!(map.lookup(GeneratedPosition::new(2, 0)), None);

        let hit = map.lookup(GeneratedPosition::new(3, 9)).unwrap();
        assert_eq!(hit.original, None);
    }

    #[test]
    fn test_is_ordered() {
        let mut map = sample();
        assert!(map.is_ordered());
        map.mappings.swap(0, 2);
        assert!(!map.is_ordered());
    }

    #[test]
    fn test_moved_to_keeps_original_side() {
        let entry = MappingEntry::new(
            GeneratedPosition::new(4, 10),
            OriginalPosition::new(7, 2),
            "lib.ts",
        )
        .with_name("render");
        let moved = entry.moved_to(GeneratedPosition::new(4, 7));
        assert_eq!(moved.generated, GeneratedPosition::new(4, 7));
        assert_eq!(moved.original, entry.original);
        assert_eq!(moved.source, entry.source);
        assert_eq!(moved.name, entry.name);
    }
}
