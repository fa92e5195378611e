//! Symbols and keywords.

use std::fmt::{self, Display};

/// An identifier used as data, optionally qualified by a namespace.
///
/// The textual form is `name` or `namespace/name`; the lone `/` is a valid
/// name on its own.
///
/// ```
/// # use edn::Symbol;
/// let sym = Symbol::with_namespace("clojure.core", "map");
/// assert_eq!(sym.namespace(), Some("clojure.core"));
/// assert_eq!(sym.name(), "map");
/// assert_eq!(sym.to_string(), "clojure.core/map");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    namespace: Option<Box<str>>,
    name: Box<str>,
}

impl Symbol {
    /// Construct a symbol without namespace.
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Symbol {
            namespace: None,
            name: name.into(),
        }
    }

    /// Construct a namespace-qualified symbol.
    pub fn with_namespace(namespace: impl Into<Box<str>>, name: impl Into<Box<str>>) -> Self {
        Symbol {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// The namespace part, if present.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The name part.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.namespace {
            f.write_str(ns)?;
            f.write_str("/")?;
        }
        f.write_str(&self.name)
    }
}

/// A self-evaluating identifier, written with a leading colon.
///
/// Keywords share the shape of [`Symbol`]s; the colon is not part of the
/// name.
///
/// ```
/// # use edn::Keyword;
/// let kw = Keyword::new("a");
/// assert_eq!(kw.name(), "a");
/// assert_eq!(kw.to_string(), ":a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keyword(Symbol);

impl Keyword {
    /// Construct a keyword without namespace.
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Keyword(Symbol::new(name))
    }

    /// Construct a namespace-qualified keyword.
    pub fn with_namespace(namespace: impl Into<Box<str>>, name: impl Into<Box<str>>) -> Self {
        Keyword(Symbol::with_namespace(namespace, name))
    }

    /// The namespace part, if present.
    pub fn namespace(&self) -> Option<&str> {
        self.0.namespace()
    }

    /// The name part, without the leading colon.
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// The keyword's identifier as a symbol.
    pub fn as_symbol(&self) -> &Symbol {
        &self.0
    }
}

impl From<Symbol> for Keyword {
    fn from(symbol: Symbol) -> Self {
        Keyword(symbol)
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}
