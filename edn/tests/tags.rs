use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use edn::parse::{ErrorCode, Options, TagError, Tags};
use edn::{Symbol, Value};

fn point(_tag: &Symbol, payload: Value) -> Result<Value, TagError> {
    match payload.as_slice() {
        Some([x, y]) if x.is_number() && y.is_number() => Ok(Value::map(vec![
            (Value::keyword("x"), x.clone()),
            (Value::keyword("y"), y.clone()),
        ])),
        _ => Err(TagError::custom(format_args!(
            "expected two coordinates, got {}",
            payload
        ))),
    }
}

#[test]
fn test_custom_decoder() {
    let options = Options::new().with_tag(Symbol::new("point"), point);
    let value = edn::from_str_custom("[#point [1 2] #point (3 4)]", options).unwrap();
    assert_eq!(value[0]["x"], Value::from(1));
    assert_eq!(value[1]["y"], Value::from(4));
}

#[test]
fn test_custom_decoder_keeps_builtins() {
    let options = Options::new().with_tag(Symbol::new("point"), point);
    assert!(options.tags().contains(&Symbol::new("inst")));
    assert!(options.tags().contains(&Symbol::new("uuid")));
    let value = edn::from_str_custom(
        r#"#uuid "f81d4fae-7dec-11d0-a765-00a0c91e6bf6""#,
        options,
    )
    .unwrap();
    assert!(value.as_uuid().is_some());
}

#[test]
fn test_decoder_error() {
    let options = Options::new().with_tag(Symbol::new("point"), point);
    let err = edn::from_str_custom("#point [1]", options).unwrap_err();
    assert!(err.is_syntax());
    match err.code() {
        ErrorCode::InvalidTaggedValue { tag, error } => {
            assert_eq!(tag, &Symbol::new("point"));
            assert!(matches!(error, TagError::Custom(_)));
            assert!(error.to_string().contains("expected two coordinates"));
        }
        code => panic!("unexpected error code {:?}", code),
    }
}

#[test]
fn test_decoder_sees_tag() {
    let tags = Tags::new()
        .with(Symbol::with_namespace("my", "a"), |tag: &Symbol, _: Value| {
            Ok(Value::from(tag.clone()))
        });
    let options = Options::new().with_tags(tags);
    let value = edn::from_str_custom("#my/a nil", options).unwrap();
    assert_eq!(value, Value::from(Symbol::with_namespace("my", "a")));
}

#[test]
fn test_empty_registry() {
    let options = Options::new().with_tags(Tags::new());
    let value = edn::from_str_custom(r#"#inst "1985-04-12T23:20:50.52Z""#, options).unwrap();
    let tagged = value.as_tagged().expect("not tagged");
    assert_eq!(tagged.tag(), &Symbol::new("inst"));
    assert_eq!(tagged.value(), &Value::from("1985-04-12T23:20:50.52Z"));
}

#[test]
fn test_replace_builtin() {
    let options = Options::new().with_tag(Symbol::new("inst"), |_: &Symbol, payload: Value| {
        Ok(payload)
    });
    let value = edn::from_str_custom(r#"#inst "yesterday""#, options).unwrap();
    assert_eq!(value, "yesterday");
}

#[test]
fn test_decoder_called_once_per_form() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let options = Options::new().with_tag(Symbol::new("count"), move |_: &Symbol, v: Value| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(v)
    });
    let values =
        edn::parse::from_reader_all_custom(Cursor::new("#count 1 #_ #count 2 [#count 3]"), options)
            .unwrap();
    assert_eq!(values, vec![Value::from(1), Value::vector(vec![3])]);
    // The discarded form is still read, including its tag.
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_nested_tags() {
    let options = Options::new().with_tag(Symbol::new("point"), point);
    let value = edn::from_str_custom("#my/tag #point [5 6]", options).unwrap();
    let tagged = value.as_tagged().unwrap();
    assert_eq!(tagged.tag(), &Symbol::with_namespace("my", "tag"));
    assert_eq!(tagged.value()["x"], Value::from(5));
}
