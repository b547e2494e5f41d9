use crudkit::{
    config::QueryConfig,
    entity_model,
    prelude::*,
    query::{FilterChain, QueryParams},
    serde::{Deserialize, Serialize},
};

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(crate = "crudkit::serde")]
struct Ticket {
    #[serde(rename = "Id")]
    id: Ulid,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Priority")]
    priority: i32,
}

entity_model! {
    Ticket,
    path = "prelude::Ticket",
    entity_name = "Ticket",
    primary_key = "Id",
    fields = [
        (id, "Id", FieldKind::Ulid),
        (title, "Title", FieldKind::Text),
        (priority, "Priority", FieldKind::Int),
    ],
}

fn ticket(seq: u128, title: &str, priority: i32) -> Ticket {
    Ticket {
        id: Ulid::from_parts(1_700_000_000_000, seq),
        title: title.to_string(),
        priority,
    }
}

#[test]
fn facade_exposes_the_whole_flow() {
    assert_eq!(Ticket::MODEL.primary_key, "Id");
    assert_eq!(ticket(1, "a", 2).get_value("priority"), Some(Value::Int(2)));

    let query = FilterChain::standard(&QueryConfig::default())
        .compile(
            Ticket::MODEL,
            &QueryParams::from_query_str("search=crash&sort=priority&order=desc"),
        )
        .expect("compiles");

    let rows = query.apply(vec![
        ticket(1, "Crash on save", 1),
        ticket(2, "Typo", 5),
        ticket(3, "crash at boot", 3),
    ]);
    let titles: Vec<_> = rows.iter().map(|row| row.title.as_str()).collect();
    assert_eq!(titles, vec!["crash at boot", "Crash on save"]);

    let mut stored = ticket(4, "Old", 1);
    let partial: Partial<Ticket> = Partial::from_json(r#"{"priority": 9}"#).expect("parses");
    assert!(partial.is_set(&Path::root().field("Priority")));
    partial.copy_to(&mut stored).expect("materializes");
    assert_eq!((stored.title.as_str(), stored.priority), ("Old", 9));

    assert_eq!(
        Predicate::contains("Title", "x").to_string(),
        r#"Title contains "x""#
    );
    assert_eq!(OrderDirection::parse("DESC"), Some(OrderDirection::Desc));
}
