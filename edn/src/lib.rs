#![deny(missing_docs)]

//! This crate provides facilities for parsing and manipulating data in the
//! extensible data notation (EDN). EDN is the data subset of Clojure's
//! syntax: a richer JSON with symbols, keywords, sets, arbitrary-precision
//! numbers and extensible tagged values.
//!
//! ```clojure
//! {:name    "edn"
//!  :tags    #{:data :notation}
//!  :version [0 1 0]
//!  :created #inst "1985-04-12T23:20:50.52Z"
//!  :id      #uuid "f81d4fae-7dec-11d0-a765-00a0c91e6bf6"}
//! ```
//!
//! There are two common ways that you might find yourself needing to work
//! with EDN data in Rust:
//!
//! - **As text data**. An unprocessed string of EDN that you receive from a
//!   Clojure program, read from a file, or prepare to send to another
//!   process.
//!
//! - **As a dynamically typed representation**. Maybe you want to check that
//!   some EDN is valid before passing it on, but without knowing the
//!   structure of what it contains. Or you want to handle arbitrarily
//!   structured data.
//!
//! Both are handled by `edn`: the [`parse`] module turns text into the
//! [`Value`] data structure, and every `Value` displays as EDN text that
//! parses back to an equal value.
//!
//! # Operating on dynamically typed EDN data
//!
//! Any valid EDN value can be manipulated using the [`Value`] data
//! structure.
//!
//! ```
//!  use edn::{Value, parse::Error};
//!
//!  fn example() -> Result<(), Error> {
//!      // Some EDN in a &str.
//!      let data = r#"{:name "John Doe"
//!                     :age 43
//!                     :phones ["+44 1234567" "+44 2345678"]}"#;
//!
//!      // Parse the string of data into edn::Value.
//!      let v = edn::from_str(data)?;
//!
//!      // Access parts of the data by indexing with square brackets.
//!      println!("Please call {} at the number {}", v["name"], v["phones"][1]);
//!
//!      Ok(())
//!  }
//!  #
//!  # fn main() {
//!  #     example().unwrap();
//!  # }
//! ```
//!
//! # The data model
//!
//! ## Primitive types
//!
//! `nil`, `true` and `false` are literals. Numbers are represented by the
//! [`Number`] type, which keeps apart four kinds that never compare equal
//! to each other:
//!
//! ```clojure
//! 42 -7 0xff 017 2r1010  ; 64-bit integers, in various radixes
//! 42N                    ; an arbitrary-precision integer
//! 3.14 1e10              ; floating point numbers
//! 22/7                   ; an exact ratio
//! ```
//!
//! Strings are delimited by double quotes and support the escapes `\t`,
//! `\r`, `\n`, `\b`, `\f`, `\\` and `\"`.
//!
//! ### Symbols and keywords
//!
//! A [`Symbol`] is an identifier, optionally qualified by a namespace; a
//! [`Keyword`] is the same prefixed with a colon. The namespace is separated
//! from the name by the last `/`; a lone `/` is a valid name.
//!
//! ```clojure
//! this-is-a-symbol  my.ns/qualified  /
//! :keyword          :my.ns/qualified
//! ```
//!
//! ## Collections
//!
//! ```clojure
//! [1 2 3]        ; a vector
//! (1 2 3)        ; a list
//! {:a 1 :b 2}    ; a map
//! #{1 2 3}       ; a set
//! ```
//!
//! Maps and sets are ordered, using the total order `Value` implements, so
//! any value can be a key. Duplicate set elements collapse; for duplicate
//! map keys the last entry wins.
//!
//! ## Tagged values
//!
//! `#tag value` hands `value` to the decoder registered for `tag` in the
//! parser's [`Tags`](parse::Tags). `#inst` (RFC 3339 timestamps) and `#uuid`
//! are built in; other tags are kept as [`Tagged`] values.
//!
//! ## Comments and discards
//!
//! `;` starts a comment running to the end of the line, and `#_` discards
//! the form following it.

pub mod number;
pub mod parse;
pub mod symbol;
pub mod tagged;
pub mod value;

#[doc(inline)]
pub use self::parse::{
    from_reader, from_reader_all, from_reader_custom, from_slice, from_slice_all,
    from_slice_custom, from_str, from_str_all, from_str_custom, Parser,
};

#[doc(inline)]
pub use value::Value;

#[doc(inline)]
pub use value::Index;

#[doc(inline)]
pub use number::Number;

#[doc(inline)]
pub use symbol::{Keyword, Symbol};

#[doc(inline)]
pub use tagged::{Tagged, Uuid};

#[cfg(test)]
mod tests;
