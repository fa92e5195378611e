//! Basic sanity checking on the `Value` type.
//!
//! These tests primarily test the round-trip (i.e converting to text and back)
//! behavior of `Value` using quickcheck.

#![cfg_attr(tarpaulin, skip)]

use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;
use rand::Rng;

use chrono::DateTime;
use num_bigint::BigInt;
use num_rational::BigRational;

use std::io::Cursor;

use crate::{parse, Number, Value};

enum ValueKind {
    Nil,
    Bool,
    Number,
    String,
    Symbol,
    Keyword,
    Instant,
    Uuid,
    Vector,
    List,
    Map,
    Set,
    Tagged,
}

fn gen_value(g: &mut Gen, depth: usize) -> Value {
    use ValueKind::*;
    let choices = if depth >= g.size() {
        &[Nil, Bool, Number, String, Symbol, Keyword, Instant, Uuid] as &[ValueKind]
    } else {
        &[
            Nil, Bool, Number, String, Symbol, Keyword, Instant, Uuid, Vector, List, Map, Set,
            Tagged,
        ]
    };
    match g.choose(choices).unwrap() {
        Nil => Value::Nil,
        Bool => Value::Bool(Arbitrary::arbitrary(g)),
        Number => Value::Number(Arbitrary::arbitrary(g)),
        String => {
            let choices = ["", "foo", "\"", "\t", "back\\slash", "line\nbreak", "λ"];
            Value::string(*g.choose(&choices).unwrap())
        }
        Symbol => {
            let choices = [
                "foo", "a-symbol", "$?:!", "+", "+foo", "-", "-foo", "..", ".foo", "/", "*x*",
            ];
            let name = *g.choose(&choices).unwrap();
            if bool::arbitrary(g) {
                Value::from(crate::Symbol::with_namespace("my.ns", name))
            } else {
                Value::symbol(name)
            }
        }
        Keyword => {
            let choices = ["foo", "a-keyword", "$?:!", "x1"];
            let name = *g.choose(&choices).unwrap();
            if bool::arbitrary(g) {
                Value::from(crate::Keyword::with_namespace("my.ns", name))
            } else {
                Value::keyword(name)
            }
        }
        Instant => {
            let choices = [
                "1985-04-12T23:20:50.52Z",
                "1970-01-01T00:00:00Z",
                "2024-02-29T12:00:00.000001-08:00",
            ];
            let text = *g.choose(&choices).unwrap();
            Value::Instant(DateTime::parse_from_rfc3339(text).unwrap())
        }
        Uuid => Value::Uuid(crate::Uuid::new(Arbitrary::arbitrary(g), Arbitrary::arbitrary(g))),
        Vector => Value::vector(gen_elements(g, depth)),
        List => Value::list(gen_elements(g, depth)),
        Map => {
            let keys = gen_elements(g, depth);
            let values = gen_elements(g, depth);
            Value::map(keys.into_iter().zip(values))
        }
        Set => Value::set(gen_elements(g, depth)),
        Tagged => {
            let choices = [
                crate::Symbol::new("point"),
                crate::Symbol::with_namespace("my", "tag"),
            ];
            let tag = g.choose(&choices).unwrap().clone();
            Value::tagged(tag, gen_value(g, depth + 1))
        }
    }
}

fn gen_elements(g: &mut Gen, depth: usize) -> Vec<Value> {
    let len = usize::arbitrary(g) % (g.size() + 1);
    (0..len).map(|_| gen_value(g, depth + 1)).collect()
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        gen_value(g, 0)
    }
}

enum NumberKind {
    I64,
    BigInt,
    F64,
    Ratio,
}

impl Arbitrary for Number {
    fn arbitrary(g: &mut Gen) -> Self {
        use NumberKind::*;
        let choices = [I64, BigInt, F64, Ratio];
        // We do not use the `Arbitrary` implementations for the
        // numbers, as we want to cover the whole range.
        let mut rng = rand::thread_rng();
        match g.choose(&choices).unwrap() {
            I64 => Number::from(rng.gen::<i64>()),
            BigInt => Number::from(num_bigint::BigInt::from(rng.gen::<i128>())),
            F64 => {
                let scale = *g.choose(&[-1e300, -1.0, 1e-10, 1.0, 1e20]).unwrap();
                Number::from(rng.gen::<f64>() * scale)
            }
            Ratio => {
                let denom = rng.gen_range(1..=i64::MAX);
                Number::from(BigRational::new(
                    num_bigint::BigInt::from(rng.gen::<i64>()),
                    num_bigint::BigInt::from(denom),
                ))
            }
        }
    }
}

#[quickcheck]
fn display_parse_number(input: Number) -> bool {
    let text = Value::from(input.clone()).to_string();
    let parsed = crate::from_str(&text).expect("parsing failed");
    let output = parsed.as_number().expect("parsed as a non-number");
    input == *output
}

#[test]
fn display_number() {
    #[allow(clippy::unreadable_literal)]
    let value = Value::from(Number::from(-11.287888289184039));
    assert_eq!(value.to_string(), "-11.287888289184039");
    assert_eq!(Value::from(BigInt::from(-3)).to_string(), "-3N");
}

#[test]
fn display_parse_roundtrip_default() {
    fn prop(input: Value) -> bool {
        let output = crate::from_str(&input.to_string()).expect("parsing failed");
        input == output
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(2000)
        .gen(Gen::new(4))
        .quickcheck(prop as fn(Value) -> bool);
}

// An empty tag registry keeps `#inst` and `#uuid` as tagged strings, which
// goes through a different code path.
#[test]
fn display_parse_roundtrip_without_tags() {
    fn prop(input: Value) -> bool {
        let options = parse::Options::new().with_tags(parse::Tags::new());
        let output =
            crate::from_str_custom(&input.to_string(), options).expect("parsing failed");
        let reparsed = crate::from_str(&output.to_string()).expect("parsing failed");
        input == reparsed
    }
    QuickCheck::new()
        .tests(500)
        .max_tests(1000)
        .gen(Gen::new(4))
        .quickcheck(prop as fn(Value) -> bool);
}

#[test]
fn display_parse_roundtrip_io_default() {
    fn prop(input: Value) -> bool {
        let text = input.to_string();
        let output = crate::from_reader(Cursor::new(text.as_bytes())).expect("parsing failed");
        input == output
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(2000)
        .gen(Gen::new(4))
        .quickcheck(prop as fn(Value) -> bool);
}

#[test]
fn display_parse_roundtrip_all() {
    fn prop(input: Vec<Value>) -> bool {
        let text = input
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        let output = crate::from_str_all(&text).expect("parsing failed");
        input == output
    }
    QuickCheck::new()
        .tests(200)
        .max_tests(400)
        .gen(Gen::new(3))
        .quickcheck(prop as fn(Vec<Value>) -> bool);
}

#[test]
fn test_unidiomatic_space() {
    let nested_value = Value::list(vec![
        Value::symbol("feedback"),
        Value::vector(vec![Value::symbol("nested")]),
    ]);
    let value = crate::from_str("(feedback[nested])").expect("failed to parse");
    assert_eq!(value, nested_value);
    let value = crate::from_str("feedback; some comment\n").expect("failed to parse");
    assert_eq!(value, Value::symbol("feedback"));

    let value = crate::from_reader(Cursor::new("(feedback[nested])")).expect("failed to parse");
    assert_eq!(value, nested_value);
    let value =
        crate::from_reader(Cursor::new("feedback; some comment\n")).expect("failed to parse");
    assert_eq!(value, Value::symbol("feedback"));
}

#[test]
fn test_keyword_map_index() {
    let map = crate::from_str("{:foo 42 :bar 23 :my.ns/baz 127}").expect("failed to parse");
    assert_eq!(map["foo"], Value::from(42));
    assert_eq!(map["bar"], Value::from(23));
    assert_eq!(map["my.ns/baz"], Value::from(127));
    assert_eq!(map["baz"], Value::Nil);
}
