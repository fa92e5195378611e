use std::collections::{BTreeMap, BTreeSet};

use chrono::DateTime;
use num_bigint::BigInt;

use crate::{Keyword, Number, Symbol, Tagged, Uuid, Value};

type Predicate = fn(&Value) -> bool;

// Type predicates for disjoint types
static TYPE_PREDICATES: &[(&str, Predicate)] = &[
    ("nil", Value::is_nil),
    ("boolean", Value::is_boolean),
    ("string", Value::is_string),
    ("symbol", Value::is_symbol),
    ("keyword", Value::is_keyword),
    ("number", Value::is_number),
    ("vector", Value::is_vector),
    ("list", Value::is_list),
    ("map", Value::is_map),
    ("set", Value::is_set),
    ("tagged", Value::is_tagged),
];

fn check_type_predicates(value: &Value, type_name: &str) {
    let predicate = TYPE_PREDICATES
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, p)| p)
        .unwrap();
    assert!(
        predicate(value),
        "{} type predicate returned false: {:?}",
        type_name,
        value
    );
    for (name, predicate) in TYPE_PREDICATES
        .iter()
        .filter(|(name, _)| *name != type_name)
    {
        assert!(
            !predicate(value),
            "{} type predicate returned true for {}: {:?}",
            name,
            type_name,
            value
        );
    }
}

#[test]
fn test_nil_and_booleans() {
    check_type_predicates(&Value::Nil, "nil");
    assert_eq!(Value::from(None::<i32>), Value::Nil);
    let t = Value::from(true);
    check_type_predicates(&t, "boolean");
    assert_eq!(t.as_bool(), Some(true));
    assert_eq!(Value::Nil.as_bool(), None);
    assert_eq!(t, true);
}

#[test]
fn test_strings() {
    let s = Value::from("hello");
    check_type_predicates(&s, "string");
    assert_eq!(s.as_str(), Some("hello"));
    assert_eq!(s, String::from("hello"));
    assert_eq!(s, "hello");
    assert_eq!(Value::symbol("hello").as_str(), None);
}

#[test]
fn test_symbols() {
    let sym = Value::symbol("a-symbol");
    check_type_predicates(&sym, "symbol");
    assert_eq!(sym.as_symbol().map(Symbol::name), Some("a-symbol"));
    assert_eq!(sym.as_symbol().and_then(Symbol::namespace), None);
    let qualified = Value::from(Symbol::with_namespace("my.ns", "a-symbol"));
    assert_eq!(qualified.as_symbol().and_then(Symbol::namespace), Some("my.ns"));
    assert_ne!(sym, qualified);
    // Same text, different kind.
    assert_ne!(sym, Value::keyword("a-symbol"));
}

#[test]
fn test_keywords() {
    let kw = Value::keyword("a-keyword");
    check_type_predicates(&kw, "keyword");
    assert_eq!(kw.as_keyword().map(Keyword::name), Some("a-keyword"));
    assert_eq!(kw, Value::from(Keyword::new("a-keyword")));
    assert_eq!(
        kw.as_keyword().unwrap().as_symbol(),
        &Symbol::new("a-keyword")
    );
}

#[test]
fn test_numbers() {
    for n in &[
        Number::from(-123),
        Number::from(0),
        Number::from(1001),
        Number::from(BigInt::from(7)),
        Number::from(0.5),
    ] {
        let n_value = Value::from(n.clone());
        check_type_predicates(&n_value, "number");
        assert_eq!(n_value.as_number(), Some(n));
    }
    assert_eq!(Value::from(42).as_i64(), Some(42));
    assert_eq!(Value::from(2.5).as_f64(), Some(2.5));
    assert_eq!(Value::from("42").as_i64(), None);
}

#[test]
fn test_sequences() {
    for elts in &[
        vec![],
        vec![Value::symbol("singleton")],
        vec![Value::from(1), Value::from(2)],
        vec![Value::symbol("answer"), Value::from(42)],
    ] {
        let vector = Value::vector(elts.clone());
        check_type_predicates(&vector, "vector");
        assert_eq!(vector.as_slice(), Some(elts.as_slice()));

        let list = Value::list(elts.clone());
        check_type_predicates(&list, "list");
        assert_eq!(list.as_slice(), Some(elts.as_slice()));

        // Same elements, different kind.
        assert_ne!(vector, list);
    }
    assert_eq!(Value::from(vec![Value::from(1)]), Value::vector(vec![1]));
}

#[test]
fn test_maps() {
    let map = Value::map(vec![
        (Value::keyword("a"), Value::from(1)),
        (Value::from("b"), Value::from(2)),
        (Value::vector(vec![1, 2]), Value::from(3)),
    ]);
    check_type_predicates(&map, "map");
    assert_eq!(map.as_map().unwrap().len(), 3);
    assert_eq!(map["a"], Value::from(1));
    assert_eq!(map[&Value::from("b")], Value::from(2));
    assert_eq!(map[Value::vector(vec![1, 2])], Value::from(3));
    assert_eq!(map["b"], Value::Nil);
    assert_eq!(map.get("missing"), None);
    assert_eq!(map.get(0), None);

    let mut entries = BTreeMap::new();
    entries.insert(Value::keyword("a"), Value::from(1));
    assert_eq!(Value::from(entries), Value::map(vec![(Value::keyword("a"), 1)]));
}

#[test]
fn test_namespaced_keyword_index() {
    let map = Value::map(vec![(
        Value::from(Keyword::with_namespace("user", "id")),
        Value::from(7),
    )]);
    assert_eq!(map["user/id"], Value::from(7));
    assert_eq!(map["id"], Value::Nil);
}

#[test]
fn test_sets() {
    let set = Value::set(vec![1, 2, 2, 3]);
    check_type_predicates(&set, "set");
    assert_eq!(set.as_set().unwrap().len(), 3);
    assert!(set.as_set().unwrap().contains(&Value::from(2)));
    let elements: BTreeSet<Value> = vec![Value::from(1)].into_iter().collect();
    assert_eq!(Value::from(elements), Value::set(vec![1]));
}

#[test]
fn test_sequence_index() {
    let list = Value::list(vec![23, 24, 25]);
    assert_eq!(list[0], Value::from(23));
    assert_eq!(list[2], Value::from(25));
    assert_eq!(list[3], Value::Nil);
    assert_eq!(list["x"], Value::Nil);
    assert_eq!(Value::Nil[0], Value::Nil);
}

#[test]
fn test_tagged() {
    let tagged = Value::tagged(Symbol::with_namespace("my", "tag"), 42);
    check_type_predicates(&tagged, "tagged");
    let inner = tagged.as_tagged().unwrap();
    assert_eq!(inner.tag(), &Symbol::with_namespace("my", "tag"));
    assert_eq!(inner.value(), &Value::from(42));
    let (tag, value) = inner.clone().into_parts();
    assert_eq!(Value::from(Tagged::new(tag, value)), tagged);
}

#[test]
fn test_instants_and_uuids() {
    let t = DateTime::parse_from_rfc3339("1985-04-12T23:20:50.52Z").unwrap();
    let instant = Value::from(t);
    assert_eq!(instant.as_instant(), Some(&t));
    assert_eq!(instant.kind_name(), "instant");

    let uuid = Uuid::new(1, 2);
    let value = Value::from(uuid);
    assert_eq!(value.as_uuid(), Some(uuid));
    assert_eq!(value.kind_name(), "uuid");
    assert_eq!(Value::Nil.as_uuid(), None);
}

#[test]
fn test_display() {
    for (value, text) in vec![
        (Value::Nil, "nil"),
        (Value::from(false), "false"),
        (Value::from(-42), "-42"),
        (Value::from(BigInt::from(42)), "42N"),
        (Value::from(1.5), "1.5"),
        (Value::from("say \"hi\"\n"), r#""say \"hi\"\n""#),
        (Value::keyword("k"), ":k"),
        (Value::from(Symbol::with_namespace("ns", "s")), "ns/s"),
        (Value::vector(vec![1, 2]), "[1 2]"),
        (Value::list(Vec::<Value>::new()), "()"),
        (Value::map(vec![(Value::keyword("a"), 1)]), "{:a 1}"),
        (Value::set(vec![2, 1]), "#{1 2}"),
        (
            Value::tagged(Symbol::new("point"), Value::vector(vec![1, 2])),
            "#point [1 2]",
        ),
        (
            Value::from(Uuid::new(0xf81d4fae7dec11d0, 0xa76500a0c91e6bf6)),
            r#"#uuid "f81d4fae-7dec-11d0-a765-00a0c91e6bf6""#,
        ),
        (
            Value::from(DateTime::parse_from_rfc3339("1985-04-12T23:20:50.52Z").unwrap()),
            r#"#inst "1985-04-12T23:20:50.520Z""#,
        ),
    ] {
        assert_eq!(value.to_string(), text);
    }
}

#[test]
fn test_display_parses_back() {
    let input = r#"{:a [1 2N 0.25 -3/4] :b #{"x\ty" sym ns/sym} :c (nil true) :d #my/tag {:k :v}}"#;
    let value = crate::from_str(input).unwrap();
    assert_eq!(crate::from_str(&value.to_string()).unwrap(), value);
}
