/// Round-trip tests between the parser and the serializer
use crate::*;
use proptest::prelude::*;

#[test]
fn test_roundtrip_fixed_values() {
    let sources = vec![
        "",
        "plain text",
        "{post_title}",
        "Hello {name}!",
        "{a}{b}{c}",
        "A {date} B",
        "unbalanced { brace",
        "stray } brace",
        "empty {} braces",
        "nested {a{b}c}",
        "multi\nline {x}\n",
        "ünïcödé {wört} ✓",
    ];

    for source in sources {
        let segments = parse(source);
        assert_eq!(serialize(&segments), source, "roundtrip failed for {:?}", source);
        assert!(validate(&segments).is_ok(), "non-canonical parse of {:?}", source);
    }
}

#[test]
fn test_reparse_is_idempotent() {
    let source = "Read {minutes} min · {author}";
    let first = parse(source);
    let second = parse(&serialize(&first));
    assert!(same_structure(&first, &second));
}

#[test]
fn test_normalized_segments_reparse_equal() {
    let mut ids = IdGenerator::new("normalize");
    let segments = vec![
        Segment::text(ids.new_id(), "x"),
        Segment::text(ids.new_id(), "y"),
        Segment::variable(ids.new_id(), "v", "V"),
        Segment::variable(ids.new_id(), "w", "W"),
    ];

    let normalized = normalize(segments, &mut ids);
    let reparsed = parse(&serialize(&normalized));
    assert!(same_structure(&normalized, &reparsed));
}

fn field_value() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 @.,]{0,8}",
            "[a-z_]{1,6}".prop_map(|name| format!("{{{}}}", name)),
            Just("{".to_string()),
            Just("}".to_string()),
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_roundtrip_law(source in field_value()) {
        let segments = parse(&source);
        prop_assert_eq!(serialize(&segments), source);
    }

    #[test]
    fn prop_parse_is_canonical(source in field_value()) {
        prop_assert!(validate(&parse(&source)).is_ok());
    }

    #[test]
    fn prop_reparse_is_structurally_equal(source in field_value()) {
        let first = parse(&source);
        let second = parse(&serialize(&first));
        prop_assert!(same_structure(&first, &second));
    }
}
