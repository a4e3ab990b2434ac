//! Content parsers: raw token text to values.
//!
//! The lexer hands these functions raw slices (quotes and escapes intact);
//! this is where escapes decode, numbers route to int/float, and the
//! caller's hooks get a say. Strings with no backslash never allocate here.

use std::borrow::Cow;

use num_bigint::BigInt;

use crate::error::{DecodeError, DecodeErrorKind};
use crate::options::DecodeOptions;
use crate::value::{Number, Value};

/// Resolves a literal token: the three standard keywords map directly, the
/// constant extensions go through `parse_constant` or fail.
pub(crate) fn parse_literal(
    raw: &str,
    start: usize,
    doc: &str,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    match raw {
        "null" => Ok(Value::Null),
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => match &options.parse_constant {
            Some(hook) => Ok(hook(raw)),
            None => Err(DecodeError::at_byte(
                DecodeErrorKind::InvalidLiteral,
                doc,
                start,
            )),
        },
    }
}

/// Decodes the content of a string token.
///
/// `raw` includes the surrounding quotes; `start` is the opening quote's
/// byte offset in `doc`, used for error positions. Returns a borrowed slice
/// whenever the string contains no backslash.
///
/// Escape handling: the seven short escapes plus `\/`; `\uXXXX` decodes a
/// UTF-16 code unit, combining a high surrogate with an immediately
/// following `\uXXXX` low surrogate into one scalar. An unpaired surrogate
/// is replaced with U+FFFD: tolerating the input matches long-standing JSON
/// library behavior, and a Rust string cannot carry the lone code unit.
pub(crate) fn parse_string<'raw>(
    raw: &'raw str,
    start: usize,
    doc: &str,
) -> Result<Cow<'raw, str>, DecodeError> {
    let inner = &raw[1..raw.len() - 1];
    if memchr::memchr(b'\\', inner.as_bytes()).is_none() {
        return Ok(Cow::Borrowed(inner));
    }

    let bytes = inner.as_bytes();
    let mut out = String::with_capacity(inner.len());
    let mut i = 0;
    while i < bytes.len() {
        let Some(next) = memchr::memchr(b'\\', &bytes[i..]) else {
            out.push_str(&inner[i..]);
            break;
        };
        out.push_str(&inner[i..i + next]);
        let bs = i + next;
        // Offset of this backslash within the whole document.
        let at = start + 1 + bs;
        let Some(&esc) = bytes.get(bs + 1) else {
            return Err(DecodeError::at_byte(DecodeErrorKind::InvalidEscape, doc, at));
        };
        match esc {
            b'"' => {
                out.push('"');
                i = bs + 2;
            }
            b'\\' => {
                out.push('\\');
                i = bs + 2;
            }
            b'/' => {
                out.push('/');
                i = bs + 2;
            }
            b'b' => {
                out.push('\u{8}');
                i = bs + 2;
            }
            b'f' => {
                out.push('\u{c}');
                i = bs + 2;
            }
            b'n' => {
                out.push('\n');
                i = bs + 2;
            }
            b'r' => {
                out.push('\r');
                i = bs + 2;
            }
            b't' => {
                out.push('\t');
                i = bs + 2;
            }
            b'u' => {
                let unit = parse_hex4(bytes, bs + 2, doc, at)?;
                if (0xD800..=0xDBFF).contains(&unit) {
                    // High surrogate: combine with a following \uXXXX low
                    // surrogate, otherwise substitute U+FFFD.
                    if let Some(low) = peek_low_surrogate(bytes, bs + 6) {
                        let scalar =
                            0x1_0000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                        out.push(char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER));
                        i = bs + 12;
                        continue;
                    }
                    out.push(char::REPLACEMENT_CHARACTER);
                } else if (0xDC00..=0xDFFF).contains(&unit) {
                    out.push(char::REPLACEMENT_CHARACTER);
                } else {
                    // Non-surrogate BMP code points are always valid chars.
                    out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                i = bs + 6;
            }
            _ => {
                return Err(DecodeError::at_byte(DecodeErrorKind::InvalidEscape, doc, at));
            }
        }
    }
    Ok(Cow::Owned(out))
}

/// Reads 4 hex digits at `idx`, reporting truncation and non-hex input as
/// distinct failures at the escape's backslash (`err_at`).
fn parse_hex4(bytes: &[u8], idx: usize, doc: &str, err_at: usize) -> Result<u32, DecodeError> {
    if idx + 4 > bytes.len() {
        return Err(DecodeError::at_byte(
            DecodeErrorKind::IncompleteUnicodeEscape,
            doc,
            err_at,
        ));
    }
    let mut value = 0u32;
    for &b in &bytes[idx..idx + 4] {
        let digit = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'a'..=b'f' => u32::from(b - b'a') + 10,
            b'A'..=b'F' => u32::from(b - b'A') + 10,
            _ => {
                return Err(DecodeError::at_byte(
                    DecodeErrorKind::InvalidUnicodeEscape,
                    doc,
                    err_at,
                ));
            }
        };
        value = value * 16 + digit;
    }
    Ok(value)
}

/// Returns the code unit of a `\uXXXX` low surrogate at `idx`, or `None`
/// when anything else is there.
fn peek_low_surrogate(bytes: &[u8], idx: usize) -> Option<u32> {
    if bytes.get(idx) != Some(&b'\\') || bytes.get(idx + 1) != Some(&b'u') {
        return None;
    }
    if idx + 6 > bytes.len() {
        return None;
    }
    let mut value = 0u32;
    for &b in &bytes[idx + 2..idx + 6] {
        let digit = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'a'..=b'f' => u32::from(b - b'a') + 10,
            b'A'..=b'F' => u32::from(b - b'A') + 10,
            _ => return None,
        };
        value = value * 16 + digit;
    }
    (0xDC00..=0xDFFF).contains(&value).then_some(value)
}

/// Resolves a number token. A fraction or exponent routes to the float
/// path, everything else to the integer path; each path prefers its hook
/// over the built-in conversion. The digit ceiling guards only the built-in
/// integer conversion, whose cost grows superlinearly with length.
pub(crate) fn parse_number(
    raw: &str,
    start: usize,
    doc: &str,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    let is_float = raw.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'));
    if is_float {
        if let Some(hook) = &options.parse_float {
            return Ok(hook(raw));
        }
        let n: f64 = raw
            .parse()
            .map_err(|_| DecodeError::at_byte(DecodeErrorKind::InvalidNumber, doc, start))?;
        return Ok(Value::Number(Number::Float(n)));
    }

    if let Some(hook) = &options.parse_int {
        return Ok(hook(raw));
    }
    let digits = raw.len() - usize::from(raw.starts_with('-'));
    if digits > options.max_int_digits {
        return Err(DecodeError::at_byte(
            DecodeErrorKind::NumberTooLarge,
            doc,
            start,
        ));
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(Value::Number(Number::Int(n)));
    }
    let n: BigInt = raw
        .parse()
        .map_err(|_| DecodeError::at_byte(DecodeErrorKind::InvalidNumber, doc, start))?;
    Ok(Value::Number(Number::BigInt(n)))
}
