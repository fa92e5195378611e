//! Values produced by reader tags.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::parse::TagError;
use crate::{Symbol, Value};

/// A `#tag value` form whose tag has no registered decoder.
///
/// The reader preserves such forms instead of failing, keeping both the tag
/// and the (already decoded) payload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tagged {
    tag: Symbol,
    value: Box<Value>,
}

impl Tagged {
    /// Construct a tagged value.
    pub fn new(tag: Symbol, value: impl Into<Value>) -> Self {
        Tagged {
            tag,
            value: Box::new(value.into()),
        }
    }

    /// The reader tag.
    pub fn tag(&self) -> &Symbol {
        &self.tag
    }

    /// The payload following the tag.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Splits into tag and payload.
    pub fn into_parts(self) -> (Symbol, Value) {
        (self.tag, *self.value)
    }
}

impl Display for Tagged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.tag, self.value)
    }
}

/// A 128-bit UUID, stored as its most and least significant halves.
///
/// ```
/// # use edn::Uuid;
/// let uuid: Uuid = "f81d4fae-7dec-11d0-a765-00a0c91e6bf6".parse().unwrap();
/// assert_eq!(uuid.most_significant_bits(), 0xf81d4fae7dec11d0);
/// assert_eq!(uuid.least_significant_bits(), 0xa76500a0c91e6bf6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uuid {
    msb: u64,
    lsb: u64,
}

impl Uuid {
    /// Construct a UUID from its two halves.
    pub fn new(msb: u64, lsb: u64) -> Self {
        Uuid { msb, lsb }
    }

    /// The most significant 64 bits.
    pub fn most_significant_bits(&self) -> u64 {
        self.msb
    }

    /// The least significant 64 bits.
    pub fn least_significant_bits(&self) -> u64 {
        self.lsb
    }

    /// The UUID as a single 128-bit number.
    pub fn as_u128(&self) -> u128 {
        (u128::from(self.msb) << 64) | u128::from(self.lsb)
    }
}

impl FromStr for Uuid {
    type Err = TagError;

    /// Parses the canonical `8-4-4-4-12` hex-digit form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 36 {
            return Err(TagError::InvalidUuid("must be a string of length 36"));
        }
        if [8, 13, 18, 23].iter().any(|&i| bytes[i] != b'-') {
            return Err(TagError::InvalidUuid("groups must be separated by `-`"));
        }
        let uuid = uuid::Uuid::try_parse(s)
            .map_err(|_| TagError::InvalidUuid("invalid hex digit"))?;
        let (msb, lsb) = uuid.as_u64_pair();
        Ok(Uuid { msb, lsb })
    }
}

impl From<uuid::Uuid> for Uuid {
    fn from(uuid: uuid::Uuid) -> Self {
        let (msb, lsb) = uuid.as_u64_pair();
        Uuid { msb, lsb }
    }
}

impl From<Uuid> for uuid::Uuid {
    fn from(uuid: Uuid) -> Self {
        uuid::Uuid::from_u64_pair(uuid.msb, uuid.lsb)
    }
}

impl Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&uuid::Uuid::from(*self).hyphenated(), f)
    }
}
