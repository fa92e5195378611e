//! Registry of reader tag decoders.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use tracing::{debug, trace};

use super::error::TagError;
use crate::{Symbol, Tagged, Uuid, Value};

/// Function turning the payload of a `#tag` form into a value.
pub type Decoder = Arc<dyn Fn(&Symbol, Value) -> Result<Value, TagError> + Send + Sync>;

/// Maps reader tags to their decoders.
///
/// The default registry knows the two built-in tags, `#inst` and `#uuid`.
/// Forms whose tag has no decoder are preserved as [`Value::Tagged`].
///
/// ```
/// # use edn::parse::{Options, Tags, TagError};
/// # use edn::{Symbol, Value};
/// let tags = Tags::default().with(Symbol::new("double"), |_: &Symbol, payload: Value| {
///     payload
///         .as_i64()
///         .map(|n| Value::from(n * 2))
///         .ok_or_else(|| TagError::custom("expected an integer"))
/// });
/// let options = Options::new().with_tags(tags);
/// let value = edn::from_str_custom("#double 21", options).unwrap();
/// assert_eq!(value, Value::from(42));
/// ```
#[derive(Clone)]
pub struct Tags {
    decoders: BTreeMap<Symbol, Decoder>,
}

impl Tags {
    /// An empty registry; every tagged form is preserved as-is.
    pub fn new() -> Self {
        Tags {
            decoders: BTreeMap::new(),
        }
    }

    /// Registers `decoder` for `tag`, replacing any previous decoder.
    pub fn with<F>(mut self, tag: Symbol, decoder: F) -> Self
    where
        F: Fn(&Symbol, Value) -> Result<Value, TagError> + Send + Sync + 'static,
    {
        self.insert(tag, decoder);
        self
    }

    /// Registers `decoder` for `tag` in place, replacing any previous
    /// decoder.
    pub fn insert<F>(&mut self, tag: Symbol, decoder: F)
    where
        F: Fn(&Symbol, Value) -> Result<Value, TagError> + Send + Sync + 'static,
    {
        self.decoders.insert(tag, Arc::new(decoder));
    }

    /// Looks up the decoder registered for `tag`.
    pub fn get(&self, tag: &Symbol) -> Option<&Decoder> {
        self.decoders.get(tag)
    }

    /// Returns true if a decoder is registered for `tag`.
    pub fn contains(&self, tag: &Symbol) -> bool {
        self.decoders.contains_key(tag)
    }

    pub(crate) fn decode(&self, tag: Symbol, payload: Value) -> Result<Value, TagError> {
        match self.decoders.get(&tag) {
            Some(decoder) => decoder(&tag, payload).map_err(|error| {
                debug!(%tag, %error, "tag decoder rejected its payload");
                error
            }),
            None => {
                trace!(%tag, "no decoder registered, keeping tagged value");
                Ok(Value::Tagged(Tagged::new(tag, payload)))
            }
        }
    }
}

impl Default for Tags {
    /// The registry holding the `inst` and `uuid` decoders.
    fn default() -> Self {
        Tags::new()
            .with(Symbol::new("inst"), decode_inst)
            .with(Symbol::new("uuid"), decode_uuid)
    }
}

impl fmt::Debug for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.decoders.keys()).finish()
    }
}

fn expect_string<'a>(payload: &'a Value) -> Result<&'a str, TagError> {
    payload.as_str().ok_or(TagError::UnexpectedPayload {
        expected: "string",
        found: payload.kind_name(),
    })
}

/// Decodes `#inst "<RFC 3339>"` into [`Value::Instant`].
pub fn decode_inst(_tag: &Symbol, payload: Value) -> Result<Value, TagError> {
    let text = expect_string(&payload)?;
    DateTime::parse_from_rfc3339(text)
        .map(Value::Instant)
        .map_err(TagError::InvalidInstant)
}

/// Decodes `#uuid "<canonical>"` into [`Value::Uuid`].
pub fn decode_uuid(_tag: &Symbol, payload: Value) -> Result<Value, TagError> {
    let text = expect_string(&payload)?;
    text.parse::<Uuid>().map(Value::Uuid)
}
