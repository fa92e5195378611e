//! EDN parser and options.
//!
//! # Terminology
//!
//! The process of converting EDN from its textual representation to values is
//! referred to as "reading" in Clojure. To avoid confusion with Rust's `Read`
//! trait, `edn` uses "parsing" instead; the byte source a [`Parser`] pulls
//! from is still called a [`Read`].

use std::io;
use std::str;

use tracing::debug;

use crate::{Symbol, Value};

use self::grammar::{is_digit, is_non_constituent, is_whitespace};
use self::table::{Dispatch, Macro};

pub use self::error::{Category, Error, ErrorCode, Location, Result, TagError};
pub use self::read::{IoRead, Read, SliceRead, StrRead};
pub use self::tags::{decode_inst, decode_uuid, Decoder, Tags};

/// Parser for the EDN text representation.
///
/// This type, given an input source, provides the [`parse`] method,
/// which can be used to read a single value from the input source.
/// Successive calls continue where the previous one stopped.
///
/// [`parse`]: struct.Parser.html#method.parse
pub struct Parser<R> {
    read: R,
    scratch: Vec<u8>,
    remaining_depth: Option<usize>,
    options: Options,
}

/// Various options to influence parser behavior.
#[derive(Debug, Clone)]
pub struct Options {
    tags: Tags,
    depth_limit: Option<usize>,
}

const DEFAULT_DEPTH_LIMIT: usize = 128;

impl Options {
    /// Construct the default set of options.
    ///
    /// This recognizes the built-in `#inst` and `#uuid` tags and allows
    /// collections and tagged values to nest 128 levels deep.
    pub fn new() -> Self {
        Options {
            tags: Tags::default(),
            depth_limit: Some(DEFAULT_DEPTH_LIMIT),
        }
    }

    /// Replace the tag registry.
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Add a decoder for `tag` to the current tag registry.
    ///
    /// ```
    /// # use edn::parse::{Options, TagError};
    /// # use edn::{Symbol, Value};
    /// let options = Options::new().with_tag(Symbol::new("upper"), |_: &Symbol, payload: Value| {
    ///     match payload.as_str() {
    ///         Some(s) => Ok(Value::from(s.to_uppercase())),
    ///         None => Err(TagError::custom("expected a string")),
    ///     }
    /// });
    /// let value = edn::from_str_custom(r#"#upper "shout""#, options).unwrap();
    /// assert_eq!(value, "SHOUT");
    /// ```
    pub fn with_tag<F>(mut self, tag: Symbol, decoder: F) -> Self
    where
        F: Fn(&Symbol, Value) -> std::result::Result<Value, TagError> + Send + Sync + 'static,
    {
        self.tags.insert(tag, decoder);
        self
    }

    /// Set how deep collections and tagged values may nest; `None` removes
    /// the limit.
    ///
    /// Without a limit, deeply nested input can overflow the stack.
    pub fn with_depth_limit(mut self, limit: Option<usize>) -> Self {
        self.depth_limit = limit;
        self
    }

    /// Query the tag registry.
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Query the nesting limit.
    pub fn depth_limit(&self) -> Option<usize> {
        self.depth_limit
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::new()
    }
}

/// Outcome of reading a form that may legitimately produce no value.
enum Produced {
    Value(Value),
    /// A comment or a discarded form.
    Nothing,
}

impl<R> Parser<R>
where
    R: Read,
{
    /// Create an EDN parser from one of the possible EDN input sources.
    ///
    /// Typically it is more convenient to use one of these methods
    /// instead:
    ///
    ///   - `Parser::from_str`
    ///   - `Parser::from_slice`
    ///   - `Parser::from_reader`
    pub fn new(read: R) -> Self {
        Parser::with_options(read, Options::default())
    }

    /// Create a customized EDN parser from one of the possible EDN input
    /// sources.
    ///
    /// Typically it is more convenient to use one of these methods
    /// instead:
    ///
    ///   - `Parser::from_str_custom`
    ///   - `Parser::from_slice_custom`
    ///   - `Parser::from_reader_custom`
    pub fn with_options(read: R, options: Options) -> Self {
        Parser {
            read,
            scratch: Vec::with_capacity(128),
            remaining_depth: options.depth_limit,
            options,
        }
    }

    /// The options this parser was created with.
    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl<R> Parser<IoRead<R>>
where
    R: io::Read,
{
    /// Creates an EDN parser from an `io::Read`.
    pub fn from_reader(reader: R) -> Self {
        Parser::new(IoRead::new(reader))
    }

    /// Creates an EDN parser from an `io::Read`.
    pub fn from_reader_custom(reader: R, options: Options) -> Self {
        Parser::with_options(IoRead::new(reader), options)
    }
}

impl<'a> Parser<SliceRead<'a>> {
    /// Creates an EDN parser from a `&[u8]`.
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Parser::new(SliceRead::new(bytes))
    }

    /// Creates an EDN parser from a `&[u8]`.
    pub fn from_slice_custom(bytes: &'a [u8], options: Options) -> Self {
        Parser::with_options(SliceRead::new(bytes), options)
    }
}

impl<'a> Parser<StrRead<'a>> {
    /// Creates an EDN parser from a `&str`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &'a str) -> Self {
        Parser::new(StrRead::new(s))
    }

    /// Creates an EDN parser from a `&str`.
    pub fn from_str_custom(s: &'a str, options: Options) -> Self {
        Parser::with_options(StrRead::new(s), options)
    }
}

impl<R: Read> Parser<R> {
    /// The `Parser::end` method should be called after a value has been fully
    /// parsed. This allows the `Parser` to validate that the input stream is
    /// at the end or that it only has trailing whitespace, comments and
    /// discarded forms.
    pub fn end(&mut self) -> Result<()> {
        loop {
            match self.next_non_whitespace()? {
                None => return Ok(()),
                Some(b';') => self.skip_comment()?,
                Some(b'#') => match self.next_char()? {
                    Some(b'_') => self.discard()?,
                    _ => return Err(self.error(ErrorCode::TrailingCharacters)),
                },
                Some(_) => return Err(self.error(ErrorCode::TrailingCharacters)),
            }
        }
    }

    /// Parse a single EDN value from the input source.
    ///
    /// This expects a value to be actually present, and returns an `Err`
    /// when called at the end of input. Use `Parser::parse` if you need to
    /// handle end of input gracefully.
    ///
    /// ```
    /// # use edn::{Parser, Value};
    /// let mut parser = Parser::from_str(r#"foo ("bar" 3.14) :baz [1 2 3]"#);
    /// assert_eq!(parser.parse_value().unwrap(), Value::symbol("foo"));
    /// assert_eq!(parser.parse_value().unwrap(), Value::list(vec![Value::from("bar"), Value::from(3.14)]));
    /// assert_eq!(parser.parse_value().unwrap(), Value::keyword("baz"));
    /// assert_eq!(parser.parse_value().unwrap(), Value::vector(vec![1, 2, 3]));
    /// assert!(parser.end().is_ok());
    /// ```
    pub fn parse_value(&mut self) -> Result<Value> {
        match self.parse()? {
            Some(value) => Ok(value),
            None => Err(self.error(ErrorCode::EofWhileParsingValue)),
        }
    }

    /// Parse a single EDN value from the input source.
    ///
    /// If the end of input is encountered, this will return `Ok(None)`,
    /// otherwise, if parsing succeeded, `Ok(Some(Value))`. Comments and
    /// discarded forms are skipped.
    ///
    /// ```
    /// # use edn::{Parser, Value};
    /// let mut parser = Parser::from_str("foo ; comment\n #_ ignored 42");
    /// assert_eq!(parser.parse().unwrap(), Some(Value::symbol("foo")));
    /// assert_eq!(parser.parse().unwrap(), Some(Value::from(42)));
    /// assert_eq!(parser.parse().unwrap(), None);
    /// ```
    pub fn parse(&mut self) -> Result<Option<Value>> {
        loop {
            let ch = match self.next_non_whitespace()? {
                Some(ch) => ch,
                None => return Ok(None),
            };
            if let Produced::Value(value) = self.read_form(ch)? {
                return Ok(Some(value));
            }
        }
    }

    /// Parse all values up to the end of input.
    ///
    /// Only the end of input stops the sequence cleanly; any error aborts it
    /// and the values read so far are dropped.
    ///
    /// ```
    /// # use edn::{Parser, Value};
    /// let mut parser = Parser::from_str("#_ 42 7 :x");
    /// assert_eq!(parser.parse_all().unwrap(), vec![Value::from(7), Value::keyword("x")]);
    /// ```
    pub fn parse_all(&mut self) -> Result<Vec<Value>> {
        let mut values = Vec::new();
        loop {
            match self.parse() {
                Ok(Some(value)) => values.push(value),
                Ok(None) => return Ok(values),
                Err(error) => {
                    debug!(%error, parsed = values.len(), "stopped reading values");
                    return Err(error);
                }
            }
        }
    }

    /// Iterate over the values of the input source.
    ///
    /// The iterator ends at the end of input, or after yielding the first
    /// error.
    pub fn value_iter(&mut self) -> ValueIter<'_, R> {
        ValueIter {
            parser: self,
            done: false,
        }
    }

    fn next_char(&mut self) -> Result<Option<u8>> {
        self.read.next()
    }

    /// Error located at the most recently read byte.
    fn error(&self, code: ErrorCode) -> Error {
        Error::syntax(code, self.read.position())
    }

    fn next_non_whitespace(&mut self) -> Result<Option<u8>> {
        loop {
            match self.next_char()? {
                Some(ch) if is_whitespace(ch) => {}
                other => return Ok(other),
            }
        }
    }

    /// Reads the form starting with the already consumed byte `ch`.
    fn read_form(&mut self, ch: u8) -> Result<Produced> {
        if is_digit(ch) {
            return self.parse_number(ch).map(Produced::Value);
        }
        if let Some(reader) = table::macro_for(ch) {
            return self.read_macro(reader, ch);
        }
        if ch == b'+' || ch == b'-' {
            if let Some(next) = self.next_char()? {
                self.read.push_back(next);
                if is_digit(next) {
                    return self.parse_number(ch).map(Produced::Value);
                }
            }
        }
        self.parse_token(ch).map(Produced::Value)
    }

    fn read_macro(&mut self, reader: Macro, ch: u8) -> Result<Produced> {
        let value = match reader {
            Macro::Vector => Value::Vector(
                self.nested(|p| p.parse_seq(b']', ErrorCode::EofWhileParsingVector))?,
            ),
            Macro::List => {
                Value::List(self.nested(|p| p.parse_seq(b')', ErrorCode::EofWhileParsingList))?)
            }
            Macro::Map => self.nested(Self::parse_map)?,
            Macro::String => self.parse_string()?,
            Macro::Comment => {
                self.skip_comment()?;
                return Ok(Produced::Nothing);
            }
            Macro::Dispatch => return self.read_dispatch(),
            Macro::Unmatched => return Err(self.error(ErrorCode::UnmatchedDelimiter(ch))),
            Macro::Unsupported => return Err(self.error(ErrorCode::UnsupportedMacro(ch))),
        };
        Ok(Produced::Value(value))
    }

    fn read_dispatch(&mut self) -> Result<Produced> {
        let ch = match self.next_char()? {
            Some(ch) => ch,
            None => return Err(self.error(ErrorCode::EofWhileParsingDispatchCharacter)),
        };
        match table::dispatch_for(ch) {
            Some(Dispatch::Set) => {
                let elements = self.nested(|p| p.parse_seq(b'}', ErrorCode::EofWhileParsingSet))?;
                Ok(Produced::Value(Value::Set(elements.into_iter().collect())))
            }
            Some(Dispatch::Discard) => {
                self.discard()?;
                Ok(Produced::Nothing)
            }
            Some(Dispatch::Unsupported) => Err(self.error(ErrorCode::UnsupportedDispatch(ch))),
            None => {
                self.read.push_back(ch);
                self.nested(Self::parse_tagged).map(Produced::Value)
            }
        }
    }

    /// Runs `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if let Some(depth) = self.remaining_depth {
            if depth == 0 {
                return Err(self.error(ErrorCode::RecursionLimitExceeded));
            }
            self.remaining_depth = Some(depth - 1);
        }
        let ret = f(self);
        self.remaining_depth = self.remaining_depth.map(|depth| depth + 1);
        ret
    }

    fn parse_seq(&mut self, terminator: u8, eof: ErrorCode) -> Result<Vec<Value>> {
        let mut elements = Vec::new();
        loop {
            let ch = match self.next_non_whitespace()? {
                Some(ch) => ch,
                None => return Err(self.error(eof)),
            };
            if ch == terminator {
                return Ok(elements);
            }
            if let Produced::Value(value) = self.read_form(ch)? {
                elements.push(value);
            }
        }
    }

    fn parse_map(&mut self) -> Result<Value> {
        let elements = self.parse_seq(b'}', ErrorCode::EofWhileParsingMap)?;
        if elements.len() % 2 != 0 {
            return Err(self.error(ErrorCode::OddMapLiteral));
        }
        let mut elements = elements.into_iter();
        let mut map = std::collections::BTreeMap::new();
        while let (Some(key), Some(value)) = (elements.next(), elements.next()) {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    fn parse_tagged(&mut self) -> Result<Value> {
        let tag = match self.parse()? {
            Some(Value::Symbol(tag)) => tag,
            Some(_) => return Err(self.error(ErrorCode::ReaderTagNotSymbol)),
            None => return Err(self.error(ErrorCode::EofWhileParsingReaderTag)),
        };
        let payload = match self.parse()? {
            Some(payload) => payload,
            None => return Err(self.error(ErrorCode::EofWhileParsingTaggedValue)),
        };
        self.options
            .tags
            .decode(tag.clone(), payload)
            .map_err(|error| self.error(ErrorCode::InvalidTaggedValue { tag, error }))
    }

    /// Discards count as a nesting level, as `#_ #_ ...` recurses.
    fn discard(&mut self) -> Result<()> {
        self.nested(|p| match p.parse()? {
            Some(_) => Ok(()),
            None => Err(p.error(ErrorCode::EofWhileParsingDiscardedValue)),
        })
    }

    fn skip_comment(&mut self) -> Result<()> {
        loop {
            match self.next_char()? {
                Some(b'\n') | Some(b'\r') => return Ok(()),
                Some(_) => {}
                None => return Err(self.error(ErrorCode::EofWhileParsingComment)),
            }
        }
    }

    /// Assumes the opening quotation mark has been consumed.
    fn parse_string(&mut self) -> Result<Value> {
        self.scratch.clear();
        loop {
            let ch = match self.next_char()? {
                Some(ch) => ch,
                None => return Err(self.error(ErrorCode::EofWhileParsingString)),
            };
            match ch {
                b'"' => break,
                b'\\' => {
                    let escaped = match self.next_char()? {
                        Some(ch) => ch,
                        None => return Err(self.error(ErrorCode::EofWhileParsingString)),
                    };
                    let ch = match escaped {
                        b't' => b'\t',
                        b'r' => b'\r',
                        b'n' => b'\n',
                        b'b' => b'\x08',
                        b'f' => b'\x0c',
                        b'\\' => b'\\',
                        b'"' => b'"',
                        b'u' => return Err(self.error(ErrorCode::UnicodeEscape)),
                        b'0'..=b'9' => return Err(self.error(ErrorCode::OctalEscape)),
                        other => return Err(self.error(ErrorCode::InvalidEscape(other))),
                    };
                    self.scratch.push(ch);
                }
                _ => self.scratch.push(ch),
            }
        }
        match str::from_utf8(&self.scratch) {
            Ok(s) => Ok(Value::from(s)),
            Err(_) => Err(self.error(ErrorCode::InvalidUtf8)),
        }
    }

    /// Reads a symbol, keyword or literal token starting with `lead`.
    fn parse_token(&mut self, lead: u8) -> Result<Value> {
        self.scratch.clear();
        let mut ch = lead;
        loop {
            if is_non_constituent(ch) {
                return Err(self.error(ErrorCode::InvalidConstituent(ch)));
            }
            self.scratch.push(ch);
            match self.next_char()? {
                None => break,
                Some(next) if is_whitespace(next) || table::is_terminating_macro(next) => {
                    self.read.push_back(next);
                    break;
                }
                Some(next) => ch = next,
            }
        }
        let token = str::from_utf8(&self.scratch).map_err(|_| self.error(ErrorCode::InvalidUtf8))?;
        grammar::interpret_token(token).ok_or_else(|| self.error(ErrorCode::InvalidToken))
    }

    /// Reads a numeric literal starting with `lead`, a digit or a sign.
    fn parse_number(&mut self, lead: u8) -> Result<Value> {
        self.scratch.clear();
        self.scratch.push(lead);
        loop {
            match self.next_char()? {
                None => break,
                Some(ch) if is_whitespace(ch) || table::is_macro(ch) => {
                    self.read.push_back(ch);
                    break;
                }
                Some(ch) => self.scratch.push(ch),
            }
        }
        let text = str::from_utf8(&self.scratch).map_err(|_| self.error(ErrorCode::InvalidNumber))?;
        number::match_number(text)
            .map(Value::Number)
            .map_err(|code| self.error(code))
    }
}

/// Iterator over the values of a [`Parser`]'s input, created by
/// [`Parser::value_iter`].
pub struct ValueIter<'p, R> {
    parser: &'p mut Parser<R>,
    done: bool,
}

impl<'p, R: Read> Iterator for ValueIter<'p, R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.parser.parse() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

fn from_trait<R>(read: R, options: Options) -> Result<Value>
where
    R: Read,
{
    let mut parser = Parser::with_options(read, options);
    let value = parser.parse_value()?;
    parser.end()?;

    Ok(value)
}

fn all_from_trait<R>(read: R, options: Options) -> Result<Vec<Value>>
where
    R: Read,
{
    Parser::with_options(read, options).parse_all()
}

/// Parse a value from an IO stream containing a single EDN value.
///
/// The content of the IO stream is parsed directly from the stream
/// without being buffered in memory.
///
/// When reading from a source against which short reads are not efficient, such
/// as a [`File`], you will want to apply your own buffering, e.g. using
/// [`std::io::BufReader`].
///
/// ```
/// use std::error::Error;
/// use std::fs::File;
/// use std::io::BufReader;
/// use std::path::Path;
///
/// fn read_value_from_file<P: AsRef<Path>>(path: P) -> Result<edn::Value, Box<dyn Error>> {
///     // Open the file in read-only mode with buffer.
///     let file = File::open(path)?;
///     let reader = BufReader::new(file);
///
///     // Read an arbitrary EDN value, without depth limit.
///     let options = edn::parse::Options::new().with_depth_limit(None);
///     let value = edn::from_reader_custom(reader, options)?;
///
///     // Return the value.
///     Ok(value)
/// }
///
/// fn main() {
/// # }
/// # fn fake_main() {
///     let value = read_value_from_file("config.edn").unwrap();
///     println!("{}", value);
/// }
/// ```
///
/// [`File`]: https://doc.rust-lang.org/std/fs/struct.File.html
pub fn from_reader_custom(rdr: impl io::Read, options: Options) -> Result<Value> {
    from_trait(IoRead::new(rdr), options)
}

/// Parse a value from an IO stream of EDN, using the default parser
/// options.
///
/// See [`from_reader_custom`] for more information.
///
/// [`from_reader_custom`]: fn.from_reader_custom.html
pub fn from_reader(rdr: impl io::Read) -> Result<Value> {
    from_reader_custom(rdr, Options::default())
}

/// Parse all values from an IO stream of EDN.
pub fn from_reader_all_custom(rdr: impl io::Read, options: Options) -> Result<Vec<Value>> {
    all_from_trait(IoRead::new(rdr), options)
}

/// Parse all values from an IO stream of EDN, using the default parser
/// options.
pub fn from_reader_all(rdr: impl io::Read) -> Result<Vec<Value>> {
    from_reader_all_custom(rdr, Options::default())
}

/// Parse a value from bytes representing a single EDN value.
///
/// ```
/// let value = edn::from_slice_custom(b"[a (nested) list]", edn::parse::Options::new());
/// println!("{:?}", value);
/// ```
pub fn from_slice_custom(bytes: &[u8], options: Options) -> Result<Value> {
    from_trait(SliceRead::new(bytes), options)
}

/// Parse a value from bytes representing a single EDN value, using the
/// default parser options.
///
/// See [`from_slice_custom`] for more information.
///
/// [`from_slice_custom`]: fn.from_slice_custom.html
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
    from_slice_custom(bytes, Options::default())
}

/// Parse all values from bytes.
pub fn from_slice_all_custom(bytes: &[u8], options: Options) -> Result<Vec<Value>> {
    all_from_trait(SliceRead::new(bytes), options)
}

/// Parse all values from bytes, using the default parser options.
pub fn from_slice_all(bytes: &[u8]) -> Result<Vec<Value>> {
    from_slice_all_custom(bytes, Options::default())
}

/// Parse a value from a string slice representing a single EDN value.
///
/// ```
/// let value = edn::from_str_custom("{:a [nested] :b #{set}}", edn::parse::Options::new());
/// println!("{:?}", value);
/// ```
pub fn from_str_custom(s: &str, options: Options) -> Result<Value> {
    from_trait(StrRead::new(s), options)
}

/// Parse a value from a string slice representing a single EDN value, using
/// the default parser options.
///
/// See [`from_str_custom`] for more information.
///
/// [`from_str_custom`]: fn.from_str_custom.html
pub fn from_str(s: &str) -> Result<Value> {
    from_str_custom(s, Options::default())
}

/// Parse all values from a string slice.
///
/// ```
/// # use edn::Value;
/// let values = edn::from_str_all("1 ;one\n 2 #_3").unwrap();
/// assert_eq!(values, vec![Value::from(1), Value::from(2)]);
/// ```
pub fn from_str_all_custom(s: &str, options: Options) -> Result<Vec<Value>> {
    all_from_trait(StrRead::new(s), options)
}

/// Parse all values from a string slice, using the default parser options.
pub fn from_str_all(s: &str) -> Result<Vec<Value>> {
    from_str_all_custom(s, Options::default())
}

mod error;
mod grammar;
mod number;
mod read;
mod table;
mod tags;
