//! Byte classes and the symbol/keyword grammar.

use crate::{Keyword, Symbol, Value};

/// Space, newline and comma, extended with tab and carriage return, so that
/// `[1\t2]` reads as two elements.
#[inline]
pub(crate) fn is_whitespace(ch: u8) -> bool {
    matches!(ch, b' ' | b'\n' | b',' | b'\t' | b'\r')
}

#[inline]
pub(crate) fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Bytes that may never appear in a token.
#[inline]
pub(crate) fn is_non_constituent(ch: u8) -> bool {
    matches!(ch, b'@' | b'`' | b'~')
}

/// Interprets a complete token as a literal, symbol or keyword.
///
/// Returns `None` when the token is not valid.
pub(crate) fn interpret_token(token: &str) -> Option<Value> {
    match token {
        "nil" => Some(Value::Nil),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => match_symbol(token),
    }
}

fn match_symbol(token: &str) -> Option<Value> {
    if token.contains("::") {
        return None;
    }
    match token.strip_prefix(':') {
        // Only keywords are barred from ending in `:`.
        Some(body) if body.ends_with(':') => None,
        Some(body) => split_symbol(body).map(|sym| Value::Keyword(Keyword::from(sym))),
        None => split_symbol(token).map(Value::Symbol),
    }
}

fn split_symbol(body: &str) -> Option<Symbol> {
    if body == "/" {
        return Some(Symbol::new("/"));
    }
    let (namespace, name) = match body.strip_suffix("//") {
        Some(namespace) => (Some(namespace), "/"),
        None => match body.rsplit_once('/') {
            Some((namespace, name)) => (Some(namespace), name),
            None => (None, body),
        },
    };
    if name.is_empty() {
        return None;
    }
    match namespace {
        None => Some(Symbol::new(name)),
        Some(namespace) => {
            if namespace.is_empty() || namespace.starts_with('/') || namespace.ends_with(':') {
                None
            } else {
                Some(Symbol::with_namespace(namespace, name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(ns: Option<&str>, name: &str) -> Value {
        match ns {
            Some(ns) => Value::Symbol(Symbol::with_namespace(ns, name)),
            None => Value::symbol(name),
        }
    }

    fn keyword(ns: Option<&str>, name: &str) -> Value {
        match ns {
            Some(ns) => Value::Keyword(Keyword::with_namespace(ns, name)),
            None => Value::keyword(name),
        }
    }

    #[test]
    fn literals() {
        assert_eq!(interpret_token("nil"), Some(Value::Nil));
        assert_eq!(interpret_token("true"), Some(Value::Bool(true)));
        assert_eq!(interpret_token("false"), Some(Value::Bool(false)));
        assert_eq!(interpret_token("nils"), Some(Value::symbol("nils")));
    }

    #[test]
    fn symbols() {
        for (token, expected) in vec![
            ("foo", symbol(None, "foo")),
            ("my.ns/bar", symbol(Some("my.ns"), "bar")),
            ("/", symbol(None, "/")),
            ("clojure.core//", symbol(Some("clojure.core"), "/")),
            ("a/b/c", symbol(Some("a/b"), "c")),
            ("-", symbol(None, "-")),
            ("+x", symbol(None, "+x")),
            ("a:b", symbol(None, "a:b")),
            ("a#b", symbol(None, "a#b")),
            ("foo:", symbol(None, "foo:")),
            ("ns/a:", symbol(Some("ns"), "a:")),
        ] {
            assert_eq!(interpret_token(token), Some(expected), "{}", token);
        }
    }

    #[test]
    fn keywords() {
        for (token, expected) in vec![
            (":foo", keyword(None, "foo")),
            (":ns/foo", keyword(Some("ns"), "foo")),
            (":/", keyword(None, "/")),
            (":nil", keyword(None, "nil")),
        ] {
            assert_eq!(interpret_token(token), Some(expected), "{}", token);
        }
    }

    #[test]
    fn rejected_tokens() {
        for token in &[
            ":", "::foo", "a::b", "foo/", "/foo", ":foo:", ":ns/a:", "ns:/a", ":ns:/a", "//",
        ] {
            assert_eq!(interpret_token(token), None, "{}", token);
        }
    }
}
