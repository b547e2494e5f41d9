use crate::{
    path::{Path, PathError, PathSegment},
    test_fixtures::{Order, Warehouse},
    traits::EntitySchema,
};

#[test]
fn builder_and_parser_agree() {
    let built = Path::root().field("Tags").first().field("Id");
    let parsed = Path::parse("Tags.0.Id");

    assert_eq!(built, parsed);
    assert_eq!(built.key(), "tags.0.id");
    assert_eq!(built.to_string(), "Tags[0].Id");
}

#[test]
fn last_segment_stays_symbolic() {
    let path = Path::root().field("Tags").last_or_default().field("Label");

    assert_eq!(
        path.segments(),
        &[
            PathSegment::Field("Tags".to_string()),
            PathSegment::Last,
            PathSegment::Field("Label".to_string()),
        ]
    );
    assert_eq!(path.key(), "tags.$last.label");
    assert_eq!(path.to_string(), "Tags[$last].Label");
    assert_eq!(Path::parse("tags.$LAST.label"), path);
}

#[test]
fn equality_and_hash_ignore_field_case() {
    use std::collections::HashSet;

    let upper = Path::parse("TAGS.0.LABEL");
    let lower = Path::root().field("tags").first().field("label");

    assert_eq!(upper, lower);
    assert_eq!(HashSet::from([upper, lower]).len(), 1);
    assert_ne!(Path::root().field("0"), Path::root().index(0));
}

#[test]
fn field_names_never_share_keys_with_other_segments() {
    let pairs = [
        (Path::root().field("Tags").field("0"), Path::parse("Tags.0")),
        (Path::root().field("Tags").field("$last"), Path::parse("Tags.$last")),
        (Path::root().field("a.b"), Path::parse("a.b")),
        (Path::root().field("a\\").field("b"), Path::root().field("a\\.b")),
    ];

    for (built, other) in &pairs {
        assert_ne!(built.key(), other.key(), "{built} vs {other}");
    }
    assert_eq!(Path::root().field("Tags").field("0").key(), "tags.\\0");
    assert_eq!(Path::root().field("A.b").key(), "a\\.b");
}

#[test]
fn first_and_element_at_materialize_indices() {
    assert_eq!(
        Path::root().field("Tags").first_or_default(),
        Path::root().field("Tags").index(0)
    );
    assert_eq!(
        Path::root().field("Tags").element_at(3).key(),
        "tags.3"
    );
}

#[test]
fn parse_accepts_brackets_and_skips_empty_segments() {
    assert_eq!(Path::parse("Grid[1][2].Id").key(), "grid.1.2.id");
    assert_eq!(Path::parse("a..b").key(), "a.b");
    assert!(Path::parse("").is_empty());
}

#[test]
fn oversized_index_parses_as_field() {
    let path = Path::parse("Tags.99999999999999999999999");

    assert!(matches!(path.segments()[1], PathSegment::Field(_)));
}

#[test]
fn prefix_keys_are_strict_and_shortest_first() {
    let path = Path::parse("Tags.$last.Id");

    assert_eq!(path.prefix_keys(), vec!["tags", "tags.$last"]);
    assert!(Path::parse("Id").prefix_keys().is_empty());
}

#[test]
fn check_accepts_declared_paths() {
    assert_eq!(Path::parse("Id").check(Order::MODEL), Ok(()));
    assert_eq!(Path::parse("tags.0.label").check(Order::MODEL), Ok(()));
    assert_eq!(Path::parse("Tags.$last.Id").check(Order::MODEL), Ok(()));
    assert_eq!(Path::parse("Grid.1.0.Id").check(Warehouse::MODEL), Ok(()));
}

#[test]
fn check_rejects_unknown_fields() {
    let err = Path::parse("Tags.0.Colour")
        .check(Order::MODEL)
        .expect_err("Colour is not declared on Tag");

    assert_eq!(
        err,
        PathError::UnknownField {
            path: "Tags[0].Colour".to_string(),
            entity: "Tag",
            field: "Colour".to_string(),
        }
    );
}

#[test]
fn check_rejects_shape_mismatches() {
    assert!(matches!(
        Path::parse("Name.0").check(Order::MODEL),
        Err(PathError::NotIndexable { kind: "text", .. })
    ));
    assert!(matches!(
        Path::parse("Tags.Id").check(Order::MODEL),
        Err(PathError::NotARecord { kind: "list", .. })
    ));
    assert!(matches!(
        Path::parse("0").check(Order::MODEL),
        Err(PathError::NotIndexable { kind: "record", .. })
    ));
    assert_eq!(Path::root().check(Order::MODEL), Err(PathError::EmptyPath));
}
