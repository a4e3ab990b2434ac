//! Whole-document stream adapters.
//!
//! These are thin wrappers: read everything, decode; encode, write
//! everything. There is no incremental contract — a reader is drained to
//! end-of-stream before the first byte is parsed. Byte input must be valid
//! UTF-8; the boundary check here is the typed equivalent of "decode your
//! bytes to text first".

use std::io::{Read, Write};

use thiserror::Error;

use crate::encoder::{encode_with, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::options::{DecodeOptions, EncodeOptions};
use crate::parser::decode_with;
use crate::value::Value;

/// A failure while decoding from a reader or encoding to a writer.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The underlying reader or writer failed.
    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),
    /// The stream's bytes were not UTF-8 text. JSON documents are text;
    /// re-encode the bytes before decoding.
    #[error("the JSON document must be UTF-8 text: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// The document was read but failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The value could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Reads `reader` to its end and decodes the result with default options.
///
/// # Errors
///
/// Fails on read errors, non-UTF-8 input, or any decode failure.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
///
/// let v = exactjson::decode_from(Cursor::new(b"[1, 2]")).unwrap();
/// assert_eq!(v.as_array().map(Vec::len), Some(2));
/// ```
pub fn decode_from<R: Read>(reader: R) -> Result<Value, StreamError> {
    decode_from_with(reader, &DecodeOptions::default())
}

/// Reads `reader` to its end and decodes the result under `options`.
///
/// # Errors
///
/// As [`decode_from`].
pub fn decode_from_with<R: Read>(
    mut reader: R,
    options: &DecodeOptions,
) -> Result<Value, StreamError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)?;
    Ok(decode_with(&text, options)?)
}

/// Encodes `value` with default options and writes the whole result.
///
/// # Errors
///
/// Fails on any encode failure or write error; nothing is written unless
/// the entire document encoded.
pub fn encode_to<T: Encode, W: Write>(value: &T, writer: W) -> Result<(), StreamError> {
    encode_to_with(value, writer, &EncodeOptions::default())
}

/// Encodes `value` under `options` and writes the whole result.
///
/// # Errors
///
/// As [`encode_to`].
pub fn encode_to_with<T: Encode, W: Write>(
    value: &T,
    mut writer: W,
    options: &EncodeOptions,
) -> Result<(), StreamError> {
    let text = encode_with(value, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}
