//! The Value enum, a dynamically typed way of representing any valid EDN value.
//!
//! A string of EDN data can be parsed into an `edn::Value` by the
//! [`edn::from_str`][from_str] function. There is also
//! [`from_slice`][from_slice] for parsing from a byte slice `&[u8]` and
//! [`from_reader`][from_reader] for parsing from any `io::Read` like a File or
//! a TCP stream.
//!
//! Values can also be built directly:
//!
//! ```
//! use edn::{Keyword, Value};
//!
//! let point = Value::map(vec![
//!     (Value::from(Keyword::new("x")), Value::from(1)),
//!     (Value::from(Keyword::new("y")), Value::from(2)),
//! ]);
//! assert_eq!(point, edn::from_str("{:x 1 :y 2}").unwrap());
//! assert_eq!(point["y"], Value::from(2));
//! ```
//!
//! [from_str]: ../fn.from_str.html
//! [from_slice]: ../fn.from_slice.html
//! [from_reader]: ../fn.from_reader.html

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Write as _};

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::{Keyword, Number, Symbol, Tagged, Uuid};

pub use self::index::Index;

/// Represents an EDN value.
///
/// Values are ordered (and hashed) structurally, first by variant in
/// declaration order, then by content, so that any value can be a map key or
/// a set element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    /// The literal `nil`.
    Nil,

    /// `true` or `false`.
    Bool(bool),

    /// An integer, big integer, float or ratio.
    Number(Number),

    /// A string, with escapes already processed.
    String(Box<str>),

    /// A symbol such as `foo` or `my.ns/bar`.
    Symbol(Symbol),

    /// A keyword such as `:foo` or `:my.ns/bar`.
    Keyword(Keyword),

    /// `[...]`
    Vector(Vec<Value>),

    /// `(...)`; same element semantics as a vector.
    List(Vec<Value>),

    /// `{...}`
    Map(BTreeMap<Value, Value>),

    /// `#{...}`
    Set(BTreeSet<Value>),

    /// A timestamp read from `#inst "<RFC 3339>"`.
    Instant(DateTime<FixedOffset>),

    /// A UUID read from `#uuid "<canonical>"`.
    Uuid(Uuid),

    /// A `#tag value` form with an unregistered tag.
    Tagged(Tagged),
}

impl Value {
    /// Construct a symbol, given its name.
    ///
    /// ```
    /// # use edn::Value;
    /// let value = Value::symbol("foo");
    /// assert!(value.is_symbol());
    /// assert_eq!(value.as_symbol().unwrap().name(), "foo");
    /// ```
    pub fn symbol(name: impl Into<Box<str>>) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    /// Construct a keyword, given its name (without the leading colon).
    pub fn keyword(name: impl Into<Box<str>>) -> Self {
        Value::Keyword(Keyword::new(name))
    }

    /// Construct a string.
    pub fn string(s: impl Into<Box<str>>) -> Self {
        Value::String(s.into())
    }

    /// Create a vector value from elements convertible into `Value`.
    ///
    /// ```
    /// # use edn::Value;
    /// assert_eq!(Value::vector(vec![1, 2, 3]), edn::from_str("[1 2 3]").unwrap());
    /// ```
    pub fn vector<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Vector(elements.into_iter().map(Into::into).collect())
    }

    /// Create a list value from elements convertible into `Value`.
    pub fn list<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::List(elements.into_iter().map(Into::into).collect())
    }

    /// Create a map value from key-value pairs. Later pairs replace earlier
    /// ones with an equal key.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create a set value; duplicates collapse.
    pub fn set<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Set(elements.into_iter().map(Into::into).collect())
    }

    /// Create a tagged value.
    pub fn tagged(tag: Symbol, value: impl Into<Value>) -> Self {
        Value::Tagged(Tagged::new(tag, value))
    }

    /// Returns true if the `Value` is `nil`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns true if the `Value` is a boolean.
    pub fn is_boolean(&self) -> bool {
        self.as_bool().is_some()
    }

    /// If the `Value` is a boolean, returns it. Returns `None` otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns true if the `Value` is a number of any kind.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// If the `Value` is a number, returns a reference to it.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the `Value` is an integer fitting into `i64`, returns it.
    ///
    /// ```
    /// # use edn::Value;
    /// let v = edn::from_str("[64 64N 6.4]").unwrap();
    /// assert_eq!(v[0].as_i64(), Some(64));
    /// assert_eq!(v[1].as_i64(), Some(64));
    /// assert_eq!(v[2].as_i64(), None);
    /// ```
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// If the `Value` is a number, represents it as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Returns true if the `Value` is a string.
    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    /// If the `Value` is a string, returns the associated str. Returns `None`
    /// otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if the `Value` is a symbol.
    pub fn is_symbol(&self) -> bool {
        self.as_symbol().is_some()
    }

    /// If the `Value` is a symbol, returns it.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the `Value` is a keyword.
    pub fn is_keyword(&self) -> bool {
        self.as_keyword().is_some()
    }

    /// If the `Value` is a keyword, returns it.
    pub fn as_keyword(&self) -> Option<&Keyword> {
        match self {
            Value::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns true if the `Value` is a vector.
    pub fn is_vector(&self) -> bool {
        matches!(self, Value::Vector(_))
    }

    /// Returns true if the `Value` is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// If the `Value` is a vector or a list, returns its elements.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Vector(elements) | Value::List(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns true if the `Value` is a map.
    pub fn is_map(&self) -> bool {
        self.as_map().is_some()
    }

    /// If the `Value` is a map, returns it.
    pub fn as_map(&self) -> Option<&BTreeMap<Value, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns true if the `Value` is a set.
    pub fn is_set(&self) -> bool {
        self.as_set().is_some()
    }

    /// If the `Value` is a set, returns it.
    pub fn as_set(&self) -> Option<&BTreeSet<Value>> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    /// If the `Value` is an instant, returns it.
    pub fn as_instant(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Instant(t) => Some(t),
            _ => None,
        }
    }

    /// If the `Value` is a UUID, returns it.
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(uuid) => Some(*uuid),
            _ => None,
        }
    }

    /// Returns true if the `Value` is a tagged value with an unregistered tag.
    pub fn is_tagged(&self) -> bool {
        self.as_tagged().is_some()
    }

    /// If the `Value` is a tagged value, returns it.
    pub fn as_tagged(&self) -> Option<&Tagged> {
        match self {
            Value::Tagged(tagged) => Some(tagged),
            _ => None,
        }
    }

    /// A short human-readable name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Keyword(_) => "keyword",
            Value::Vector(_) => "vector",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Instant(_) => "instant",
            Value::Uuid(_) => "uuid",
            Value::Tagged(_) => "tagged value",
        }
    }

    /// Index into an EDN vector, list or map. A string index can be used to
    /// access a map value by keyword, and a usize index can be used to access
    /// an element of a vector or list.
    ///
    /// Returns `None` if the type of `self` does not match the type of the
    /// index, or if the key or position is absent.
    ///
    /// ```
    /// # use edn::Value;
    /// let v = edn::from_str(r#"{:name "edn" :tags ["data" "notation"]}"#).unwrap();
    /// assert_eq!(v.get("tags").and_then(|tags| tags.get(1)), Some(&Value::string("notation")));
    /// assert_eq!(v.get("missing"), None);
    /// ```
    pub fn get<I: Index>(&self, index: I) -> Option<&Value> {
        index.index_into(self)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => Display::fmt(n, f),
            Value::String(s) => write_string(f, s),
            Value::Symbol(sym) => Display::fmt(sym, f),
            Value::Keyword(kw) => Display::fmt(kw, f),
            Value::Vector(elements) => write_seq(f, "[", elements, "]"),
            Value::List(elements) => write_seq(f, "(", elements, ")"),
            Value::Map(map) => {
                f.write_char('{')?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                f.write_char('}')
            }
            Value::Set(set) => write_seq(f, "#{", set, "}"),
            Value::Instant(t) => write!(
                f,
                "#inst \"{}\"",
                t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
            ),
            Value::Uuid(uuid) => write!(f, "#uuid \"{}\"", uuid),
            Value::Tagged(tagged) => Display::fmt(tagged, f),
        }
    }
}

fn write_seq<'a, I>(f: &mut fmt::Formatter<'_>, open: &str, elements: I, close: &str) -> fmt::Result
where
    I: IntoIterator<Item = &'a Value>,
{
    f.write_str(open)?;
    for (i, element) in elements.into_iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        Display::fmt(element, f)?;
    }
    f.write_str(close)
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        let escape = match ch {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\t' => "\\t",
            '\r' => "\\r",
            '\n' => "\\n",
            '\x08' => "\\b",
            '\x0C' => "\\f",
            _ => continue,
        };
        f.write_str(&s[start..i])?;
        f.write_str(escape)?;
        start = i + ch.len_utf8();
    }
    f.write_str(&s[start..])?;
    f.write_char('"')
}

mod from;
mod index;

#[cfg(test)]
mod tests;
