//! End-to-end tests for a replace-and-remap pass.
//!
//! These tests build a small generated file with a source map, run one pass over it and check
//! that every rewritten mapping still resolves to the same original position.

use pretty_assertions::assert_eq;
use remap_core::{
    replace_with_map, update_source_map, Pattern, RemapError, ReplaceError, ReplacementRecord,
    Replacer,
};
use source_map::{decode, encode, DecodedMap, GeneratedPosition, MappingEntry, OriginalPosition};

const GENERATED: &str = "const a = t(\"TRANSLATEME_hello\");\nconsole.log(a, t('TRANSLATEME_bye'));\n";

const TRANSLATE: &str = r#"t\(['"]TRANSLATEME_([^'"]*)['"]\)"#;

/// Generated positions of interesting tokens, paired with where they came from in `app.ts`.
fn token_positions() -> Vec<((u32, u32), (u32, u32))> {
    vec![
        ((1, 0), (1, 0)),   // const
        ((1, 6), (1, 4)),   // a
        ((1, 10), (1, 8)),  // t(
        ((1, 32), (1, 30)), // ;
        ((2, 0), (3, 0)),   // console
        ((2, 8), (3, 8)),   // log
        ((2, 12), (3, 12)), // a
        ((2, 15), (3, 15)), // t(
        ((2, 35), (3, 33)), // )
    ]
}

fn input_map() -> String {
    let seed = DecodedMap {
        sources: vec!["app.ts".to_string()],
        sources_content: vec![Some("// original".to_string())],
        names: vec!["a".to_string()],
        ..Default::default()
    };
    let mappings: Vec<MappingEntry> = token_positions()
        .into_iter()
        .map(|((gl, gc), (ol, oc))| {
            MappingEntry::new(
                GeneratedPosition::new(gl, gc),
                OriginalPosition::new(ol, oc),
                "app.ts",
            )
        })
        .collect();
    encode("main.js", &seed, &mappings).unwrap()
}

fn translate_pattern() -> Pattern {
    Pattern::regex(TRANSLATE).unwrap().all()
}

#[test]
fn rewrites_text_and_map_together() {
    let map = input_map();
    let mut replacer = Replacer::template("\"$1\"");
    let result =
        replace_with_map(GENERATED, &map, &translate_pattern(), &mut replacer, "main.js").unwrap();

    insta::assert_snapshot!(result.code, @r#"
    const a = "hello";
    console.log(a, "bye");
    "#);
    assert_eq!(
        result.records,
        vec![
            ReplacementRecord::new(1, 10, -15),
            ReplacementRecord::new(2, 15, -15),
        ]
    );
    assert_eq!(result.mapping_count, token_positions().len());

    let rewritten = decode(&result.map).unwrap();
    assert_eq!(rewritten.file.as_deref(), Some("main.js"));
    assert_eq!(rewritten.sources, vec!["app.ts".to_string()]);
    assert_eq!(
        rewritten.sources_content,
        vec![Some("// original".to_string())]
    );

    let generated: Vec<(u32, u32)> = rewritten
        .mappings()
        .map(|m| (m.generated.line, m.generated.column))
        .collect();
    assert_eq!(
        generated,
        vec![
            (1, 0),
            (1, 6),
            (1, 10),
            (1, 17),
            (2, 0),
            (2, 8),
            (2, 12),
            (2, 15),
            (2, 20),
        ]
    );

    let original: Vec<(u32, u32)> = rewritten
        .mappings()
        .map(|m| {
            let o = m.original.unwrap();
            (o.line, o.column)
        })
        .collect();
    let expected: Vec<(u32, u32)> = token_positions().into_iter().map(|(_, o)| o).collect();
    assert_eq!(original, expected);
}

#[test]
fn shifted_tokens_still_point_at_their_text() {
    let map = input_map();
    let mut replacer = Replacer::template("\"$1\"");
    let result =
        replace_with_map(GENERATED, &map, &translate_pattern(), &mut replacer, "main.js").unwrap();
    let rewritten = decode(&result.map).unwrap();

    let lines: Vec<&str> = result.code.split('\n').collect();
    let closing = rewritten
        .lookup(GeneratedPosition::new(2, 20))
        .and_then(|m| m.original)
        .unwrap();
    assert_eq!(closing, OriginalPosition::new(3, 33));
    assert_eq!(&lines[1][20..21], ")");

    let semicolon = rewritten
        .lookup(GeneratedPosition::new(1, 17))
        .and_then(|m| m.original)
        .unwrap();
    assert_eq!(semicolon, OriginalPosition::new(1, 30));
    assert_eq!(&lines[0][17..18], ";");
}

#[test]
fn no_match_is_identity_on_text_and_map() {
    let map = input_map();
    let mut replacer = Replacer::fixed("unused");
    let result = replace_with_map(
        GENERATED,
        &map,
        &Pattern::literal("does not occur"),
        &mut replacer,
        "main.js",
    )
    .unwrap();

    assert_eq!(result.code, GENERATED);
    assert!(result.records.is_empty());
    assert_eq!(
        decode(&result.map).unwrap().mappings,
        decode(&map).unwrap().mappings
    );
}

#[test]
fn update_source_map_matches_full_pass() {
    let map = input_map();
    let records = [
        ReplacementRecord::new(1, 10, -15),
        ReplacementRecord::new(2, 15, -15),
    ];
    let updated = update_source_map(&map, &records, "main.js").unwrap();

    let mut replacer = Replacer::template("\"$1\"");
    let full =
        replace_with_map(GENERATED, &map, &translate_pattern(), &mut replacer, "main.js").unwrap();

    assert_eq!(
        decode(&updated).unwrap().mappings,
        decode(&full.map).unwrap().mappings
    );
}

#[test]
fn invalid_map_produces_nothing() {
    let mut replacer = Replacer::fixed("x");
    let err = replace_with_map(
        GENERATED,
        "{ not json",
        &Pattern::literal("const"),
        &mut replacer,
        "main.js",
    )
    .unwrap_err();
    assert!(matches!(err, RemapError::SourceMap(_)));
}

#[test]
fn unknown_group_fails_the_pass() {
    let map = input_map();
    let mut replacer = Replacer::template("$2");
    let err = replace_with_map(GENERATED, &map, &translate_pattern(), &mut replacer, "main.js")
        .unwrap_err();
    match err {
        RemapError::Replace(ReplaceError::UnknownGroup { group, line, column }) => {
            assert_eq!(group, "2");
            assert_eq!((line, column), (1, 10));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
