use super::*;
use crate::Location;

fn key(name: &str, start: u32) -> Spanned<Cow<'_, str>> {
    Spanned::with_location(
        Cow::Borrowed(name),
        Span::new(start, start + name.len() as u32),
        Location::new(1, start + 1),
    )
}

#[test]
fn insert_get_remove() {
    let mut t = Table::new();
    assert!(t.is_empty());
    assert_eq!(t.insert("a", Value::from(1i64)), None);
    assert_eq!(t.insert(String::from("b"), Value::from("two")), None);
    assert_eq!(t.len(), 2);
    assert!(t.contains_key("a"));
    assert!(!t.contains_key("c"));
    assert_eq!(t.get("b").and_then(Value::as_str), Some("two"));

    if let Some(Value::Integer(i)) = t.get_mut("a") {
        *i += 41;
    }
    assert_eq!(t.get("a"), Some(&Value::Integer(42)));

    assert_eq!(t.remove("a"), Some(Value::Integer(42)));
    assert_eq!(t.remove("a"), None);
    assert_eq!(t.len(), 1);
}

#[test]
fn insert_overwrites() {
    let mut t = Table::new();
    t.insert("k", Value::from(1i64));
    assert_eq!(t.insert("k", Value::from(false)), Some(Value::Integer(1)));
    assert_eq!(t.len(), 1);
    assert_eq!(t.get("k"), Some(&Value::Boolean(false)));
}

#[test]
fn key_spans() {
    let mut t = Table::new();
    t.insert_spanned("port".into(), Span::new(10, 14), Value::from(80i64));
    t.insert("plain", Value::from(true));
    assert_eq!(t.get_key_span("port"), Some(Span::new(10, 14)));
    assert_eq!(t.get_key_span("plain"), Some(Span::default()));
    assert_eq!(t.get_key_span("missing"), None);
}

#[test]
fn subtable_is_created_then_reused() {
    let mut t = Table::new();
    t.subtable_or_insert(&key("server", 1))
        .unwrap()
        .insert("host", Value::from("localhost"));
    assert_eq!(t.get_key_span("server"), Some(Span::new(1, 7)));

    // a later key reuses the table and keeps the first span
    let server = t.subtable_or_insert(&key("server", 20)).unwrap();
    assert_eq!(server.len(), 1);
    server.insert("port", Value::from(8080i64));

    assert_eq!(t.len(), 1);
    assert_eq!(t.get_key_span("server"), Some(Span::new(1, 7)));
    let server = t.get("server").and_then(Value::as_table).unwrap();
    assert_eq!(server.len(), 2);
}

#[test]
fn subtable_over_scalar_is_not_a_table() {
    let mut t = Table::new();
    t.insert_spanned("name".into(), Span::new(0, 4), Value::from("x"));
    let err = t.subtable_or_insert(&key("name", 12)).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::NotATable {
            key: "name".into(),
            first: Span::new(0, 4),
        }
    );
    assert_eq!(err.span, Span::new(12, 16));
    assert_eq!(err.location, Location::new(1, 13));
    // the scalar is untouched
    assert_eq!(t.get("name").and_then(Value::as_str), Some("x"));
}

#[test]
fn equality_ignores_spans_and_order() {
    let mut a = Table::new();
    a.insert_spanned("x".into(), Span::new(0, 1), Value::from(1i64));
    a.insert_spanned("y".into(), Span::new(6, 7), Value::from(2i64));

    let b: Table = [("y", Value::from(2i64)), ("x", Value::from(1i64))]
        .into_iter()
        .collect();
    assert_eq!(a, b);

    let c: Table = [("x", Value::from(1i64))].into_iter().collect();
    assert_ne!(a, c);
    assert_ne!(c, a);
}

#[test]
fn iteration() {
    let t: Table = [
        ("one", Value::from(1i64)),
        ("two", Value::from(2i64)),
        ("three", Value::from(3i64)),
    ]
    .into_iter()
    .collect();

    let iter = t.iter();
    assert_eq!(iter.len(), 3);
    let mut seen: Vec<(&str, i64)> = iter
        .map(|(k, v)| (k, v.as_integer().unwrap()))
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, [("one", 1), ("three", 3), ("two", 2)]);

    let mut keys: Vec<&str> = t.keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, t.sorted_keys());

    let sum: i64 = (&t).into_iter().filter_map(|(_, v)| v.as_integer()).sum();
    assert_eq!(sum, 6);

    let mut t = t;
    for v in t.values_mut() {
        *v = Value::from(0i64);
    }
    assert!(t.values().all(|v| *v == Value::Integer(0)));

    let mut owned: Vec<String> = t.into_iter().map(|(k, _)| k).collect();
    owned.sort();
    assert_eq!(owned, ["one", "three", "two"]);
}

#[test]
fn debug_is_sorted() {
    let t: Table = [
        ("zeta", Value::from(true)),
        ("alpha", Value::from("a")),
        ("mid", Value::from(Table::new())),
    ]
    .into_iter()
    .collect();
    assert_eq!(format!("{t:?}"), r#"{"alpha": "a", "mid": {}, "zeta": true}"#);
}
