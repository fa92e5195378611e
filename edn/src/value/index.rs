use std::ops;

use crate::{Keyword, Value};

/// A type that can be used to index into an `edn::Value`.
///
/// The [`get`] method of `Value` accept any type that implements
/// `Index`, as does the [square-bracket indexing operator]. This
/// trait is implemented for `usize`, indexing into vectors and lists by
/// position, for `Value`, looking up a map entry by key, and for strings,
/// looking up a map entry whose key is the keyword of that name (`"a"` finds
/// `:a`, `"ns/a"` finds `:ns/a`).
///
/// [`get`]: enum.Value.html#method.get
/// [square-bracket indexing operator]: enum.Value.html#impl-Index%3CI%3E
///
/// This trait is sealed and cannot be implemented for types outside
/// of `edn`.
///
/// # Examples
///
/// ```
/// let data = edn::from_str("{:foo 42 :bar [1 2 3]}").unwrap();
///
/// // Data is a map keyed by keywords so it can be indexed with a string.
/// let bar = &data["bar"];
///
/// // Bar is a vector so it can be indexed with an integer.
/// let second = &bar[1];
///
/// assert_eq!(*second, 2);
/// ```
pub trait Index: private::Sealed {
    /// Return None if the key is not already in the array or object.
    #[doc(hidden)]
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value>;
}

// Prevent users from implementing the Index trait.
mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<'a, T: ?Sized> Sealed for &'a T where T: Sealed {}
    impl Sealed for super::Value {}
}

impl Index for usize {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        v.as_slice().and_then(|elements| elements.get(*self))
    }
}

fn keyword_for(name: &str) -> Keyword {
    match name.rsplit_once('/') {
        Some((ns, name)) if !ns.is_empty() && !name.is_empty() => Keyword::with_namespace(ns, name),
        _ => Keyword::new(name),
    }
}

impl Index for str {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        match v {
            Value::Map(map) => map.get(&Value::Keyword(keyword_for(self))),
            _ => None,
        }
    }
}

impl Index for String {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        self[..].index_into(v)
    }
}

impl<'a, T: ?Sized> Index for &'a T
where
    T: Index,
{
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        (**self).index_into(v)
    }
}

impl Index for Value {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        match v {
            Value::Map(map) => map.get(self),
            _ => None,
        }
    }
}

// Indexing is deliberately forgiving: a mismatched index type, a missing
// key or an out-of-bounds position all yield `nil` instead of panicking.
// Use `get` or pattern matching to tell these cases apart from a stored
// `nil`.
impl<I> ops::Index<I> for Value
where
    I: Index,
{
    type Output = Value;

    /// Index into an `edn::Value` using the syntax `value[0]` or
    /// `value["k"]`.
    ///
    /// Returns the nil value if the type of `self` does not match the
    /// type of the index, for example if the index is a string and
    /// `self` is not a map. Also returns the nil value if the given key
    /// does not exist in the map or the given index is not within the
    /// bounds of the vector or list.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edn::Value;
    /// let data = edn::from_str("{:a 42 :x (y [z zz])}").unwrap();
    ///
    /// assert_eq!(data["x"][1], edn::from_str("[z zz]").unwrap());
    ///
    /// assert_eq!(data["a"], Value::from(42));
    /// assert_eq!(data["b"], Value::Nil); // returns nil for undefined values
    /// ```
    fn index(&self, index: I) -> &Value {
        static NIL: Value = Value::Nil;
        index.index_into(self).unwrap_or(&NIL)
    }
}
