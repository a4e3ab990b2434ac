//! Token scanner over a complete JSON document.
//!
//! The lexer classifies slices of the source without decoding them: string
//! tokens keep their quotes and escape sequences verbatim, number tokens
//! keep their raw digits. Decoding is the content parsers' job, which keeps
//! this layer allocation-free and reusable for validation-only passes.
//!
//! Token boundaries are found with forward scans (`memchr` for string
//! delimiters, byte runs for numbers), never by accumulating characters one
//! at a time. Positions are byte offsets; they become character offsets only
//! inside [`DecodeError`] construction.

use memchr::memchr2;

use crate::error::{DecodeError, DecodeErrorKind};

/// What a token is, without having looked inside it.
///
/// `Eof` and `Unexpected` are not grammar tokens: they let the parser turn
/// "nothing left" and "unscannable character" into whichever diagnostic its
/// grammar position calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    ObjectOpen,
    ObjectClose,
    ArrayOpen,
    ArrayClose,
    Comma,
    Colon,
    String,
    Number,
    Literal,
    Eof,
    Unexpected,
}

/// A classified, positioned slice of the source.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Token<'src> {
    pub kind: TokenKind,
    /// The raw source slice, escapes and quotes included.
    pub raw: &'src str,
    /// Byte offset of the first byte of the token.
    pub start: usize,
    /// Byte offset one past the last byte of the token.
    pub end: usize,
}

pub(crate) struct Lexer<'src> {
    text: &'src str,
    pos: usize,
}

/// The literal spellings the lexer recognizes. `true`/`false`/`null` are
/// standard; the constant spellings are a documented extension resolved by
/// the literal content parser. `-NaN` is deliberately absent.
const LITERALS: [&str; 6] = ["true", "false", "null", "NaN", "Infinity", "-Infinity"];

impl<'src> Lexer<'src> {
    pub fn new(text: &'src str) -> Self {
        Self { text, pos: 0 }
    }

    fn token(&self, kind: TokenKind, start: usize, end: usize) -> Token<'src> {
        Token {
            kind,
            raw: &self.text[start..end],
            start,
            end,
        }
    }

    /// Scans the next token, skipping JSON whitespace first. At end of
    /// input returns an [`TokenKind::Eof`] token positioned after the
    /// trailing whitespace, which is where a continuation would begin.
    pub fn next_token(&mut self) -> Result<Token<'src>, DecodeError> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && matches!(bytes[self.pos], b' ' | b'\t' | b'\n' | b'\r') {
            self.pos += 1;
        }
        let start = self.pos;
        if start >= bytes.len() {
            return Ok(self.token(TokenKind::Eof, start, start));
        }

        let kind = match bytes[start] {
            b'{' => TokenKind::ObjectOpen,
            b'}' => TokenKind::ObjectClose,
            b'[' => TokenKind::ArrayOpen,
            b']' => TokenKind::ArrayClose,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'"' => {
                let end = scan_string(self.text, start)?;
                self.pos = end;
                return Ok(self.token(TokenKind::String, start, end));
            }
            b'0'..=b'9' => {
                let end = scan_number(self.text, start)?;
                self.pos = end;
                return Ok(self.token(TokenKind::Number, start, end));
            }
            b'-' => {
                // `-Infinity` is a literal, not a number.
                if bytes.get(start + 1) == Some(&b'I') {
                    return self.literal_or_unexpected(start);
                }
                let end = scan_number(self.text, start)?;
                self.pos = end;
                return Ok(self.token(TokenKind::Number, start, end));
            }
            b't' | b'f' | b'n' | b'I' | b'N' => {
                return self.literal_or_unexpected(start);
            }
            _ => {
                let ch_len = self.text[start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.pos = start + ch_len;
                return Ok(self.token(TokenKind::Unexpected, start, self.pos));
            }
        };
        self.pos = start + 1;
        Ok(self.token(kind, start, start + 1))
    }

    fn literal_or_unexpected(&mut self, start: usize) -> Result<Token<'src>, DecodeError> {
        if let Some(end) = scan_literal(self.text, start) {
            self.pos = end;
            return Ok(self.token(TokenKind::Literal, start, end));
        }
        let ch_len = self.text[start..].chars().next().map_or(1, char::len_utf8);
        self.pos = start + ch_len;
        Ok(self.token(TokenKind::Unexpected, start, self.pos))
    }
}

/// Scans a string token opening at `start` (the quote) and returns the byte
/// offset one past its closing quote.
///
/// Escape sequences are skipped over, not validated: `\` plus the following
/// character is treated as opaque so the token's raw text survives intact.
/// Control characters below U+0020 are fatal at their own offset, except a
/// raw newline, which reports the string unterminated at the opening quote.
pub(crate) fn scan_string(text: &str, start: usize) -> Result<usize, DecodeError> {
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes[start], b'"');
    let mut i = start + 1;
    loop {
        let rest = &bytes[i..];
        let stop = memchr2(b'"', b'\\', rest).unwrap_or(rest.len());
        // Control bytes can only be ASCII, so a plain byte sweep is exact.
        if let Some(ctl) = rest[..stop].iter().position(|&b| b < 0x20) {
            if rest[ctl] == b'\n' {
                return Err(DecodeError::at_byte(
                    DecodeErrorKind::UnterminatedString,
                    text,
                    start,
                ));
            }
            return Err(DecodeError::at_byte(
                DecodeErrorKind::InvalidControlCharacter,
                text,
                i + ctl,
            ));
        }
        if stop == rest.len() {
            return Err(DecodeError::at_byte(
                DecodeErrorKind::UnterminatedString,
                text,
                start,
            ));
        }
        let at = i + stop;
        if bytes[at] == b'"' {
            return Ok(at + 1);
        }
        // Backslash: skip it and the escaped character, whatever it is.
        match text[at + 1..].chars().next() {
            Some(c) => i = at + 1 + c.len_utf8(),
            None => {
                return Err(DecodeError::at_byte(
                    DecodeErrorKind::UnterminatedString,
                    text,
                    start,
                ));
            }
        }
    }
}

/// Scans a number token at `start` against the strict grammar
/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?` and returns its end
/// offset. Only ASCII digits participate; a fullwidth digit simply ends the
/// token and fails wherever the grammar then stands.
pub(crate) fn scan_number(text: &str, start: usize) -> Result<usize, DecodeError> {
    let bytes = text.as_bytes();
    let mut i = start;
    if bytes[i] == b'-' {
        i += 1;
    }
    match bytes.get(i).copied() {
        Some(b'0') => {
            i += 1;
            if bytes.get(i).is_some_and(u8::is_ascii_digit) {
                return Err(DecodeError::at_byte(DecodeErrorKind::LeadingZero, text, start));
            }
        }
        Some(b'1'..=b'9') => {
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
        }
        _ => {
            // A bare minus sign is not the start of anything.
            return Err(DecodeError::at_byte(DecodeErrorKind::ExpectingValue, text, start));
        }
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if !bytes.get(i).is_some_and(u8::is_ascii_digit) {
            return Err(DecodeError::at_byte(DecodeErrorKind::InvalidNumber, text, start));
        }
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
    }
    if matches!(bytes.get(i).copied(), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i).copied(), Some(b'+' | b'-')) {
            i += 1;
        }
        if !bytes.get(i).is_some_and(u8::is_ascii_digit) {
            return Err(DecodeError::at_byte(DecodeErrorKind::InvalidNumber, text, start));
        }
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
    }
    Ok(i)
}

/// Matches one of the known literal spellings at `start`, returning its end
/// offset. Matching is exact and case-sensitive; `truE` or `nan` match
/// nothing.
pub(crate) fn scan_literal(text: &str, start: usize) -> Option<usize> {
    let rest = &text[start..];
    LITERALS
        .iter()
        .find(|lit| rest.starts_with(**lit))
        .map(|lit| start + lit.len())
}
