//! A strict JSON codec with exact, reproducible error positions.
//!
//! The decoder turns JSON text into a [`Value`] tree, reporting the first
//! grammar violation with its precise character offset and derived
//! line/column. The encoder walks anything implementing [`Encode`] back
//! into JSON text under configurable formatting rules. Both directions are
//! synchronous, allocation-conscious (tokens are borrowed slices; plain
//! strings decode without copying), and free of shared mutable state.
//!
//! # Decoding
//!
//! ```
//! use exactjson::{DecodeErrorKind, Value};
//!
//! let v = exactjson::decode(r#"{"name": "spam", "count": 3}"#).unwrap();
//! assert_eq!(v.as_object().unwrap()["name"].as_str(), Some("spam"));
//!
//! // Failures carry exact positions.
//! let err = exactjson::decode(r#"["spam",]"#).unwrap_err();
//! assert_eq!(err.kind(), DecodeErrorKind::TrailingCommaArray);
//! assert_eq!(err.pos, 7);
//! ```
//!
//! # Encoding
//!
//! ```
//! use exactjson::{EncodeOptions, Indent};
//!
//! let v = exactjson::decode(r#"{"a": 1}"#).unwrap();
//! let options = EncodeOptions {
//!     indent: Some(Indent::Spaces(4)),
//!     ..EncodeOptions::default()
//! };
//! assert_eq!(
//!     exactjson::encode_with(&v, &options).unwrap(),
//!     "{\n    \"a\": 1\n}"
//! );
//! ```
//!
//! Non-standard conveniences are opt-in and documented: the constants
//! `Infinity`/`-Infinity`/`NaN` decode only through a
//! [`parse_constant`](DecodeOptions::parse_constant) hook, and integer
//! literals are capped at [`DEFAULT_MAX_INT_DIGITS`] digits unless
//! reconfigured.

mod content;
mod encoder;
mod error;
mod io;
mod lexer;
mod options;
mod parser;
mod value;

#[cfg(test)]
mod tests;

pub use encoder::{encode, encode_with, Encode, MapKey, Node};
pub use error::{DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind};
pub use io::{decode_from, decode_from_with, encode_to, encode_to_with, StreamError};
pub use options::{
    DecodeOptions, EncodeOptions, FallbackHook, Indent, ObjectHook, PairsHook, ScalarHook,
    DEFAULT_MAX_INT_DIGITS,
};
pub use parser::{decode, decode_with};
pub use value::{Array, Map, Number, Value};
