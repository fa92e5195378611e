use std::io;

use super::error::{Location, Result};

/// Byte cursor used by the parser for iterating over input.
///
/// The parser never looks more than one byte ahead: whenever it reads a byte
/// that ends a token or a number it hands that byte back via
/// [`push_back`](Read::push_back) before reading anything else. An
/// implementation therefore only needs a single slot of push-back storage.
pub trait Read {
    /// Returns the next byte, or `None` at the end of input.
    fn next(&mut self) -> Result<Option<u8>>;

    /// Un-reads `ch`, which must be the byte most recently returned by
    /// [`next`](Read::next), so that the following call returns it again.
    fn push_back(&mut self, ch: u8);

    /// Position of the most recently returned byte.
    ///
    /// Only called in case of an error, so performance is not important.
    fn position(&self) -> Option<Location> {
        None
    }
}

impl<'a, R> Read for &'a mut R
where
    R: Read + ?Sized,
{
    fn next(&mut self) -> Result<Option<u8>> {
        (**self).next()
    }

    fn push_back(&mut self, ch: u8) {
        (**self).push_back(ch)
    }

    fn position(&self) -> Option<Location> {
        (**self).position()
    }
}

/// EDN input source that reads from a std::io input stream.
///
/// Bytes are pulled from the stream one at a time; wrap sources for which
/// short reads are expensive, such as a `File`, in a `BufReader`.
pub struct IoRead<R>
where
    R: io::Read,
{
    bytes: io::Bytes<R>,
    /// Temporary storage of a pushed back byte.
    ch: Option<u8>,
    line: usize,
    column: usize,
    /// Position before the most recent byte, restored by `push_back`.
    prev: (usize, usize),
}

/// EDN input source that reads from a slice of bytes.
//
// This is more efficient than other iterators because push_back() is a single
// decrement and we can compute line/col position only if an error happens.
pub struct SliceRead<'a> {
    slice: &'a [u8],
    /// Index of the *next* byte that will be returned by next().
    index: usize,
}

/// EDN input source that reads from a UTF-8 string.
pub struct StrRead<'a> {
    delegate: SliceRead<'a>,
}

//////////////////////////////////////////////////////////////////////////////

impl<R> IoRead<R>
where
    R: io::Read,
{
    /// Create an EDN input source to read from a std::io input stream.
    pub fn new(reader: R) -> Self {
        IoRead {
            bytes: reader.bytes(),
            ch: None,
            line: 1,
            column: 0,
            prev: (1, 0),
        }
    }
}

impl<R> Read for IoRead<R>
where
    R: io::Read,
{
    #[inline]
    fn next(&mut self) -> Result<Option<u8>> {
        let ch = match self.ch.take() {
            Some(ch) => ch,
            None => match self.bytes.next() {
                Some(Err(err)) => return Err(err.into()),
                Some(Ok(ch)) => ch,
                None => return Ok(None),
            },
        };
        self.prev = (self.line, self.column);
        if ch == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Ok(Some(ch))
    }

    #[inline]
    fn push_back(&mut self, ch: u8) {
        debug_assert!(self.ch.is_none(), "only one byte of push-back");
        self.ch = Some(ch);
        let (line, column) = self.prev;
        self.line = line;
        self.column = column;
    }

    fn position(&self) -> Option<Location> {
        Some(Location::new(self.line, self.column))
    }
}

//////////////////////////////////////////////////////////////////////////////

impl<'a> SliceRead<'a> {
    /// Create an EDN input source to read from a slice of bytes.
    pub fn new(slice: &'a [u8]) -> Self {
        SliceRead { slice, index: 0 }
    }

    fn position_of_index(&self, i: usize) -> Location {
        let mut line = 1;
        let mut column = 0;
        for ch in &self.slice[..i] {
            match *ch {
                b'\n' => {
                    line += 1;
                    column = 0;
                }
                _ => {
                    column += 1;
                }
            }
        }
        Location::new(line, column)
    }
}

impl<'a> Read for SliceRead<'a> {
    #[inline]
    fn next(&mut self) -> Result<Option<u8>> {
        Ok(if self.index < self.slice.len() {
            let ch = self.slice[self.index];
            self.index += 1;
            Some(ch)
        } else {
            None
        })
    }

    #[inline]
    fn push_back(&mut self, ch: u8) {
        debug_assert!(self.index > 0 && self.slice[self.index - 1] == ch);
        self.index -= 1;
    }

    fn position(&self) -> Option<Location> {
        Some(self.position_of_index(self.index))
    }
}

//////////////////////////////////////////////////////////////////////////////

impl<'a> StrRead<'a> {
    /// Create an EDN input source to read from a UTF-8 string.
    pub fn new(s: &'a str) -> Self {
        StrRead {
            delegate: SliceRead::new(s.as_bytes()),
        }
    }
}

impl<'a> Read for StrRead<'a> {
    #[inline]
    fn next(&mut self) -> Result<Option<u8>> {
        self.delegate.next()
    }

    #[inline]
    fn push_back(&mut self, ch: u8) {
        self.delegate.push_back(ch);
    }

    fn position(&self) -> Option<Location> {
        self.delegate.position()
    }
}
