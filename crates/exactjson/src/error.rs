//! Decode and encode failures, with exact source positions.
//!
//! Positions are zero-based *character* offsets into the decoded document.
//! The lexer and parser track byte offsets internally; conversion happens
//! here, once, when an error is materialized. Line and column are derived
//! from the position at construction time and never stored independently of
//! it: `line` is one plus the number of newlines before the position, and
//! `column` is the distance to the previous newline (one-based).

use std::fmt;

use thiserror::Error;

/// The individual decode failure conditions.
///
/// Each variant's display string is the user-facing message; the full
/// [`DecodeError`] appends the derived line/column location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// A value was expected and something else (or end of input) was found.
    #[error("Expecting value")]
    ExpectingValue,
    /// A string ran to end of input or a raw newline before its closing
    /// quote. Positioned at the opening quote, not the point of failure.
    #[error("Unterminated string starting at")]
    UnterminatedString,
    /// A bare control character (below U+0020) appeared inside a string.
    #[error("Invalid control character")]
    InvalidControlCharacter,
    /// A backslash escape used an unrecognized escape character.
    #[error("Invalid escape sequence")]
    InvalidEscape,
    /// A `\uXXXX` escape contained a non-hex digit.
    #[error("Invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    /// A `\uXXXX` escape was cut short by the end of the string.
    #[error("Incomplete unicode escape sequence")]
    IncompleteUnicodeEscape,
    /// A number had a decimal point or exponent marker with no digits.
    #[error("Invalid number")]
    InvalidNumber,
    /// An integer literal exceeded the configured digit ceiling.
    #[error("Number too large")]
    NumberTooLarge,
    /// A zero was followed by more digits.
    #[error("Leading zeros not allowed")]
    LeadingZero,
    /// An object member was missing its `:` separator.
    #[error("Expecting ':' delimiter")]
    ExpectingColon,
    /// A container member was not followed by `,` or the closing delimiter.
    #[error("Expecting ',' delimiter")]
    ExpectingComma,
    /// An object slot held something other than a double-quoted key.
    #[error("Expecting property name enclosed in double quotes")]
    ExpectingPropertyName,
    /// A comma immediately preceded `}`. Positioned at the comma.
    #[error("Illegal trailing comma before end of object")]
    TrailingCommaObject,
    /// A comma immediately preceded `]`. Positioned at the comma.
    #[error("Illegal trailing comma before end of array")]
    TrailingCommaArray,
    /// Input continued after the top-level value.
    #[error("Extra data")]
    ExtraData,
    /// The document opened with U+FEFF.
    #[error("BOM not allowed at start of document")]
    BomRejected,
    /// `Infinity`, `-Infinity` or `NaN` without a `parse_constant` hook.
    #[error("Invalid literal")]
    InvalidLiteral,
}

/// A decode failure with its exact location in the source document.
///
/// `pos` is a zero-based character offset; `line` and `column` are one-based
/// and derived from `pos` when the error is built. The error owns a copy of
/// the document so callers can render context without holding on to the
/// original input.
///
/// # Examples
///
/// ```
/// let err = exactjson::decode("[1, 2, 3]5").unwrap_err();
/// assert_eq!(err.kind(), exactjson::DecodeErrorKind::ExtraData);
/// assert_eq!(err.pos, 9);
/// assert_eq!(err.to_string(), "Extra data at line 1, column 10");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct DecodeError {
    kind: DecodeErrorKind,
    document: String,
    /// Character offset of the failure, zero-based.
    pub pos: usize,
    /// Line of the failure, one-based.
    pub line: usize,
    /// Column of the failure, one-based.
    pub column: usize,
}

impl DecodeError {
    /// Builds an error from a *byte* offset into `document`.
    ///
    /// `byte_pos` must lie on a character boundary; every token and scan
    /// position in this crate does.
    pub(crate) fn at_byte(kind: DecodeErrorKind, document: &str, byte_pos: usize) -> Self {
        debug_assert!(document.is_char_boundary(byte_pos));
        let prefix = &document[..byte_pos];
        let line = memchr::memchr_iter(b'\n', prefix.as_bytes()).count() + 1;
        let column = match prefix.rfind('\n') {
            Some(nl) => prefix[nl + 1..].chars().count() + 1,
            None => prefix.chars().count() + 1,
        };
        let pos = if document.is_ascii() {
            byte_pos
        } else {
            prefix.chars().count()
        };
        Self {
            kind,
            document: document.to_owned(),
            pos,
            line,
            column,
        }
    }

    /// The failure condition.
    #[must_use]
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// The document that failed to decode.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The bare failure message, without the location suffix.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// The individual encode failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EncodeErrorKind {
    /// A value of a shape the encoder does not know, with no `default` hook
    /// to fall back to. Carries the offending type's name.
    #[error("Object of type {0} is not JSON serializable")]
    UnsupportedType(String),
    /// A NaN or infinite float; JSON has no representation for them.
    #[error("Out of range float values are not JSON compliant")]
    NonFiniteNumber,
    /// A mapping key that is not a string, bool, int or float.
    #[error("keys must be str, int, float or bool, not {0}")]
    UnsupportedKeyType(String),
}

/// An encode failure, annotated with the traversal context it occurred in.
///
/// Context entries are ordered innermost first: the failing value's own
/// container comes before the containers that hold it.
///
/// ```
/// use exactjson::{Number, Value};
///
/// let doc = Value::Array(vec![Value::Number(Number::Float(f64::NAN))]);
/// let err = exactjson::encode(&doc).unwrap_err();
/// assert_eq!(err.context(), ["in array at index 0"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeError {
    kind: EncodeErrorKind,
    context: Vec<String>,
}

impl EncodeError {
    pub(crate) fn new(kind: EncodeErrorKind) -> Self {
        Self {
            kind,
            context: Vec::new(),
        }
    }

    pub(crate) fn push_context(mut self, note: String) -> Self {
        self.context.push(note);
        self
    }

    /// The failure condition.
    #[must_use]
    pub fn kind(&self) -> &EncodeErrorKind {
        &self.kind
    }

    /// Traversal annotations, innermost failure site first.
    #[must_use]
    pub fn context(&self) -> &[String] {
        &self.context
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for note in &self.context {
            write!(f, ", {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EncodeError {}
