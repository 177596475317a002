use polaris_parser::{
    display_text, parse, parse_with_ids, plain_text, serialize, IdGenerator, SegmentKind,
};

#[test]
fn test_title_template() {
    let source = "{post_title} | {site_title}";
    let segments = parse(source);

    let variables: Vec<_> = segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Variable)
        .map(|s| s.raw_value.as_str())
        .collect();
    assert_eq!(variables, vec!["post_title", "site_title"]);
    assert_eq!(serialize(&segments), source);
}

#[test]
fn test_projections_of_parsed_value() {
    let segments = parse("Hi {name}, see {link}");
    assert_eq!(plain_text(&segments), "Hi name, see link");
    assert_eq!(display_text(&segments), "Hi name, see link");
}

#[test]
fn test_ids_share_session_seed() {
    let mut ids = IdGenerator::new("meta_description");
    let segments = parse_with_ids("{excerpt} more", &mut ids);

    for segment in &segments {
        assert!(segment.id.starts_with(ids.seed()));
    }
}

#[test]
fn test_segments_json_shape() {
    let segments = parse("a{b}");
    let json = serde_json::to_string(&segments).unwrap();
    assert!(json.contains(r#""kind":"variable""#));
    assert!(json.contains(r#""rawValue":"b""#));
}
