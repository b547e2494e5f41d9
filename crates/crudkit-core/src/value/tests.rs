use crate::{
    model::field::FieldKind,
    value::{TermError, Value, canonical_cmp, parse_term},
};
use std::cmp::Ordering;
use time::{Date, Month};
use ulid::Ulid;
use uuid::Uuid;

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

const STATUS: FieldKind = FieldKind::Enum(&["Active", "Suspended"]);

// ---- parse_term --------------------------------------------------------

#[test]
fn parse_term_converts_scalars_by_kind() {
    assert_eq!(parse_term(&FieldKind::Int, " -42 "), Ok(Value::Int(-42)));
    assert_eq!(parse_term(&FieldKind::Uint, "7"), Ok(Value::Uint(7)));
    assert_eq!(parse_term(&FieldKind::Float, "2.5"), Ok(Value::Float(2.5)));
    assert_eq!(parse_term(&FieldKind::Bool, "TRUE"), Ok(Value::Bool(true)));
    assert_eq!(parse_term(&FieldKind::Text, " keep "), Ok(v_txt(" keep ")));
}

#[test]
fn parse_term_rejects_unconvertible_terms() {
    assert!(matches!(
        parse_term(&FieldKind::Int, "seven"),
        Err(TermError::Invalid { kind: "int", .. })
    ));
    assert!(parse_term(&FieldKind::Uint, "-1").is_err());
    assert!(parse_term(&FieldKind::Bool, "yes").is_err());
    assert!(parse_term(&FieldKind::Float, "NaN").is_err());
}

#[test]
fn parse_term_matches_enum_variants_case_insensitively() {
    assert_eq!(
        parse_term(&STATUS, "suspended"),
        Ok(Value::Enum("Suspended".to_string()))
    );
    assert!(parse_term(&STATUS, "deleted").is_err());
}

#[test]
fn parse_term_reads_identifiers() {
    let ulid = Ulid::from_parts(1_700_000_000_000, 42);
    let uuid = Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);

    assert_eq!(
        parse_term(&FieldKind::Ulid, &ulid.to_string()),
        Ok(Value::Ulid(ulid))
    );
    assert_eq!(
        parse_term(&FieldKind::Uuid, &uuid.hyphenated().to_string()),
        Ok(Value::Uuid(uuid))
    );
    assert!(parse_term(&FieldKind::Uuid, "not-a-uuid").is_err());
}

#[test]
fn parse_term_reads_dates_and_timestamps() {
    let date = Date::from_calendar_date(2024, Month::January, 2).expect("valid date");

    assert_eq!(parse_term(&FieldKind::Date, "2024-01-02"), Ok(Value::Date(date)));
    assert!(matches!(
        parse_term(&FieldKind::Timestamp, "2024-01-02T03:04:05Z"),
        Ok(Value::Timestamp(_))
    ));
    assert!(parse_term(&FieldKind::Timestamp, "2024-01-02").is_err());
}

#[test]
fn parse_term_refuses_structural_kinds() {
    const TAGS: FieldKind = FieldKind::List(&FieldKind::Int);

    assert_eq!(
        parse_term(&TAGS, "1"),
        Err(TermError::NotScalar { kind: "list" })
    );
    assert!(parse_term(&FieldKind::Unsupported, "1").is_err());
}

// ---- comparison --------------------------------------------------------

#[test]
fn loose_eq_widens_numerics() {
    assert!(Value::Int(3).loose_eq(&Value::Uint(3)));
    assert!(Value::Float(3.0).loose_eq(&Value::Int(3)));
    assert!(!Value::Int(-1).loose_eq(&Value::Uint(u64::MAX)));
    assert!(!Value::Int(3).loose_eq(&v_txt("3")));
}

#[test]
fn loose_eq_never_matches_unsupported() {
    assert!(!Value::Unsupported.loose_eq(&Value::Unsupported));
}

#[test]
fn text_contains_ci_ignores_case_and_rejects_non_text() {
    assert_eq!(v_txt("Abc Inc").text_contains_ci("aBC"), Some(true));
    assert_eq!(v_txt("xyz").text_contains_ci("abc"), Some(false));
    assert_eq!(Value::Int(1).text_contains_ci("1"), None);
}

#[test]
fn canonical_cmp_sorts_null_first() {
    assert_eq!(canonical_cmp(&Value::Null, &Value::Int(0)), Ordering::Less);
    assert_eq!(canonical_cmp(&v_txt(""), &Value::Null), Ordering::Greater);
}

#[test]
fn canonical_cmp_is_antisymmetric_for_mixed_variants() {
    let left = Value::Bool(true);
    let right = v_txt("x");

    assert_ne!(canonical_cmp(&left, &right), Ordering::Equal);
    assert_eq!(
        canonical_cmp(&left, &right),
        canonical_cmp(&right, &left).reverse()
    );
}

#[test]
fn canonical_cmp_widens_numerics() {
    assert_eq!(
        canonical_cmp(&Value::Int(-5), &Value::Uint(2)),
        Ordering::Less
    );
    assert_eq!(
        canonical_cmp(&Value::Float(2.5), &Value::Int(2)),
        Ordering::Greater
    );
}

#[test]
fn canonical_cmp_orders_nan_totally() {
    let values = [
        Value::Float(f64::NAN),
        Value::Float(1.5),
        Value::Int(1),
        Value::Uint(2),
        Value::Float(-0.0),
        Value::Int(0),
        Value::Float(f64::NEG_INFINITY),
    ];

    for a in &values {
        assert_eq!(canonical_cmp(a, a), Ordering::Equal);
        for b in &values {
            assert_eq!(canonical_cmp(a, b), canonical_cmp(b, a).reverse());
            for c in &values {
                if canonical_cmp(a, b).is_le() && canonical_cmp(b, c).is_le() {
                    assert!(canonical_cmp(a, c).is_le(), "{a} <= {b} <= {c}");
                }
            }
        }
    }

    assert_eq!(
        canonical_cmp(&Value::Float(f64::NAN), &Value::Uint(u64::MAX)),
        Ordering::Greater
    );
}

#[test]
fn display_renders_diagnostic_text() {
    let list = Value::from_list(vec![1i64, 2, 3]);

    assert_eq!(list.to_string(), "[1, 2, 3]");
    assert_eq!(v_txt("a").to_string(), "\"a\"");
    assert_eq!(Value::Null.to_string(), "null");
}
