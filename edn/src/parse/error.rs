//! When reading EDN goes wrong.

use std::error;
use std::fmt::{self, Debug, Display};
use std::io;
use std::result;

use crate::Symbol;

/// This type represents the possible errors when reading EDN data.
pub struct Error {
    /// This `Box` allows us to keep the size of `Error` as small as possible. A
    /// larger `Error` type was substantially slower due to all the functions
    /// that pass around `Result<T, Error>`.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `edn::parse::Error`.
pub type Result<T> = result::Result<T, Error>;

/// Location of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    line: usize,
    column: usize,
}

impl Location {
    /// Construct a location from a one-based line and column.
    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }

    /// One-based line number at which the error was detected.
    ///
    /// Characters in the first line of the input (before the first newline
    /// character) are in line 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based column number at which the error was detected.
    ///
    /// The first character in the input and any characters immediately
    /// following a newline character are in column 1.
    ///
    /// Note that errors may occur in column 0, for example if the input ends
    /// immediately following a newline character.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Error {
    /// Location of the error in the input stream, if the byte source keeps
    /// track of it.
    pub fn location(&self) -> Option<Location> {
        self.err.location
    }

    /// The specific cause of this error.
    pub fn code(&self) -> &ErrorCode {
        &self.err.code
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Io` - failure to read bytes from the byte source
    /// - `Category::Syntax` - input that is not syntactically valid EDN
    /// - `Category::Unsupported` - valid notation this reader declines to decode
    /// - `Category::Eof` - unexpected end of the input data
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::Io(_) => Category::Io,
            ErrorCode::EofWhileParsingValue
            | ErrorCode::EofWhileParsingString
            | ErrorCode::EofWhileParsingComment
            | ErrorCode::EofWhileParsingVector
            | ErrorCode::EofWhileParsingList
            | ErrorCode::EofWhileParsingMap
            | ErrorCode::EofWhileParsingSet
            | ErrorCode::EofWhileParsingDispatchCharacter
            | ErrorCode::EofWhileParsingReaderTag
            | ErrorCode::EofWhileParsingTaggedValue
            | ErrorCode::EofWhileParsingDiscardedValue => Category::Eof,
            ErrorCode::InvalidNumber
            | ErrorCode::NumberOutOfRange
            | ErrorCode::InvalidToken
            | ErrorCode::InvalidConstituent(_)
            | ErrorCode::ReaderTagNotSymbol
            | ErrorCode::OddMapLiteral
            | ErrorCode::UnmatchedDelimiter(_)
            | ErrorCode::InvalidEscape(_)
            | ErrorCode::InvalidUtf8
            | ErrorCode::InvalidTaggedValue { .. }
            | ErrorCode::TrailingCharacters
            | ErrorCode::RecursionLimitExceeded => Category::Syntax,
            ErrorCode::UnicodeEscape
            | ErrorCode::OctalEscape
            | ErrorCode::BigDecimal
            | ErrorCode::RadixOutOfRange(_)
            | ErrorCode::UnsupportedMacro(_)
            | ErrorCode::UnsupportedDispatch(_) => Category::Unsupported,
        }
    }

    /// Returns true if this error was caused by a failure to read bytes from
    /// an IO stream.
    pub fn is_io(&self) -> bool {
        self.classify() == Category::Io
    }

    /// Returns true if this error was caused by input that was not
    /// syntactically valid EDN.
    pub fn is_syntax(&self) -> bool {
        self.classify() == Category::Syntax
    }

    /// Returns true if this error was caused by notation that is recognized
    /// but deliberately not supported, such as Unicode string escapes or
    /// arbitrary-precision decimals.
    pub fn is_unsupported(&self) -> bool {
        self.classify() == Category::Unsupported
    }

    /// Returns true if this error was caused by prematurely reaching the end of
    /// the input data.
    pub fn is_eof(&self) -> bool {
        self.classify() == Category::Eof
    }
}

/// Categorizes the cause of an `edn::parse::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The error was caused by a failure to read bytes from an input source.
    Io,

    /// The error was caused by input that was not syntactically valid EDN.
    Syntax,

    /// The input used notation the reader rejects instead of approximating.
    Unsupported,

    /// The error was caused by prematurely reaching the end of the input data.
    Eof,
}

impl From<Error> for io::Error {
    /// Convert an `edn::parse::Error` into an `io::Error`.
    ///
    /// Syntax and unsupported-feature errors are turned into `InvalidData` IO
    /// errors. EOF errors are turned into `UnexpectedEof` IO errors.
    fn from(l: Error) -> Self {
        match l.classify() {
            Category::Io => match l.err.code {
                ErrorCode::Io(err) => err,
                _ => unreachable!(),
            },
            Category::Syntax | Category::Unsupported => {
                io::Error::new(io::ErrorKind::InvalidData, l)
            }
            Category::Eof => io::Error::new(io::ErrorKind::UnexpectedEof, l),
        }
    }
}

impl From<io::Error> for Error {
    /// Wraps a failure of the byte source; used by custom `Read`
    /// implementations.
    fn from(error: io::Error) -> Self {
        Error::io(error)
    }
}

impl Error {
    pub(crate) fn syntax(code: ErrorCode, location: Option<Location>) -> Self {
        Error {
            err: Box::new(ErrorImpl { code, location }),
        }
    }

    pub(crate) fn io(error: io::Error) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code: ErrorCode::Io(error),
                location: None,
            }),
        }
    }
}

struct ErrorImpl {
    code: ErrorCode,
    location: Option<Location>,
}

/// The specific cause of an [`Error`].
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Some IO error occurred while reading.
    Io(io::Error),

    /// EOF where a value was required.
    EofWhileParsingValue,

    /// EOF while parsing a string.
    EofWhileParsingString,

    /// EOF while skipping a `;` comment.
    EofWhileParsingComment,

    /// EOF while parsing a vector.
    EofWhileParsingVector,

    /// EOF while parsing a list.
    EofWhileParsingList,

    /// EOF while parsing a map.
    EofWhileParsingMap,

    /// EOF while parsing a set.
    EofWhileParsingSet,

    /// EOF right after a `#`.
    EofWhileParsingDispatchCharacter,

    /// EOF where the symbol of a `#tag` was expected.
    EofWhileParsingReaderTag,

    /// EOF where the payload of a `#tag` was expected.
    EofWhileParsingTaggedValue,

    /// EOF where the value following `#_` was expected.
    EofWhileParsingDiscardedValue,

    /// Invalid number.
    InvalidNumber,

    /// Integer does not fit into 64 bits, or a float overflows.
    NumberOutOfRange,

    /// Token is neither a literal nor a valid symbol or keyword.
    InvalidToken,

    /// Byte that may never appear in a token.
    InvalidConstituent(u8),

    /// The value following `#` decoded to something other than a symbol.
    ReaderTagNotSymbol,

    /// Map literal with an odd number of forms.
    OddMapLiteral,

    /// A closing delimiter without a matching opener.
    UnmatchedDelimiter(u8),

    /// Unknown string escape.
    InvalidEscape(u8),

    /// String or token contents are not valid UTF-8.
    InvalidUtf8,

    /// A registered tag decoder rejected its payload.
    InvalidTaggedValue {
        /// The reader tag.
        tag: Symbol,
        /// Why the decoder failed.
        error: TagError,
    },

    /// Input has non-whitespace trailing characters after the value.
    TrailingCharacters,

    /// Nesting of collections and tagged values exceeds the depth limit.
    RecursionLimitExceeded,

    /// `\u` string escape.
    UnicodeEscape,

    /// Octal string escape.
    OctalEscape,

    /// Float with the `M` suffix.
    BigDecimal,

    /// Integer radix outside 2-36.
    RadixOutOfRange(u32),

    /// Macro character whose reader is not implemented (`\`, `^`).
    UnsupportedMacro(u8),

    /// Dispatch character whose reader is not implemented (`#^`, `#<`).
    UnsupportedDispatch(u8),
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Io(err) => Display::fmt(err, f),
            ErrorCode::EofWhileParsingValue => f.write_str("EOF while parsing a value"),
            ErrorCode::EofWhileParsingString => f.write_str("EOF while parsing a string"),
            ErrorCode::EofWhileParsingComment => f.write_str("EOF while parsing a comment"),
            ErrorCode::EofWhileParsingVector => f.write_str("EOF while parsing a vector"),
            ErrorCode::EofWhileParsingList => f.write_str("EOF while parsing a list"),
            ErrorCode::EofWhileParsingMap => f.write_str("EOF while parsing a map"),
            ErrorCode::EofWhileParsingSet => f.write_str("EOF while parsing a set"),
            ErrorCode::EofWhileParsingDispatchCharacter => {
                f.write_str("EOF while parsing a dispatch character")
            }
            ErrorCode::EofWhileParsingReaderTag => f.write_str("EOF while parsing a reader tag"),
            ErrorCode::EofWhileParsingTaggedValue => {
                f.write_str("EOF while parsing a tagged value")
            }
            ErrorCode::EofWhileParsingDiscardedValue => {
                f.write_str("EOF while parsing a discarded value")
            }
            ErrorCode::InvalidNumber => f.write_str("invalid number"),
            ErrorCode::NumberOutOfRange => f.write_str("number out of range"),
            ErrorCode::InvalidToken => f.write_str("invalid token"),
            ErrorCode::InvalidConstituent(ch) => {
                write!(f, "invalid constituent character `{}`", char::from(*ch))
            }
            ErrorCode::ReaderTagNotSymbol => f.write_str("reader tag must be a symbol"),
            ErrorCode::OddMapLiteral => {
                f.write_str("map literal must contain an even number of forms")
            }
            ErrorCode::UnmatchedDelimiter(ch) => {
                write!(f, "unmatched delimiter `{}`", char::from(*ch))
            }
            ErrorCode::InvalidEscape(ch) => write!(f, "invalid escape `\\{}`", char::from(*ch)),
            ErrorCode::InvalidUtf8 => f.write_str("invalid UTF-8"),
            ErrorCode::InvalidTaggedValue { tag, error } => {
                write!(f, "invalid value for #{}: {}", tag, error)
            }
            ErrorCode::TrailingCharacters => f.write_str("trailing characters"),
            ErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
            ErrorCode::UnicodeEscape => f.write_str("unicode escapes are not supported"),
            ErrorCode::OctalEscape => f.write_str("octal escapes are not supported"),
            ErrorCode::BigDecimal => {
                f.write_str("arbitrary-precision decimals are not supported")
            }
            ErrorCode::RadixOutOfRange(radix) => {
                write!(f, "radix {} is out of range 2-36", radix)
            }
            ErrorCode::UnsupportedMacro(ch) => {
                write!(f, "reader for `{}` is not supported", char::from(*ch))
            }
            ErrorCode::UnsupportedDispatch(ch) => {
                write!(f, "reader for `#{}` is not supported", char::from(*ch))
            }
        }
    }
}

/// Failure of a tag decoder to turn a payload into a value.
#[derive(Debug)]
#[non_exhaustive]
pub enum TagError {
    /// The payload has the wrong type.
    UnexpectedPayload {
        /// What the decoder accepts.
        expected: &'static str,
        /// What it got, as given by [`Value::kind_name`](crate::Value::kind_name).
        found: &'static str,
    },

    /// The payload is not a canonical UUID string.
    InvalidUuid(&'static str),

    /// The payload is not an RFC 3339 timestamp.
    InvalidInstant(chrono::ParseError),

    /// Failure reported by a user-supplied decoder.
    Custom(String),
}

impl TagError {
    /// Construct an error for a user-supplied decoder.
    pub fn custom(msg: impl Display) -> Self {
        TagError::Custom(msg.to_string())
    }
}

impl Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagError::UnexpectedPayload { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            TagError::InvalidUuid(reason) => write!(f, "invalid uuid: {}", reason),
            TagError::InvalidInstant(err) => write!(f, "invalid timestamp: {}", err),
            TagError::Custom(msg) => f.write_str(msg),
        }
    }
}

impl error::Error for TagError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            TagError::InvalidInstant(err) => Some(err),
            _ => None,
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.err.code {
            ErrorCode::Io(err) => Some(err),
            ErrorCode::InvalidTaggedValue { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = self.location {
            write!(
                f,
                "{} at line {} column {}",
                self.code, loc.line, loc.column
            )
        } else {
            Display::fmt(&self.code, f)
        }
    }
}

// Remove two layers of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = self.err.location {
            write!(
                f,
                "Error({:?}, line: {}, column: {})",
                self.err.code.to_string(),
                loc.line,
                loc.column,
            )
        } else {
            write!(f, "Error({:?})", self.err.code.to_string())
        }
    }
}
