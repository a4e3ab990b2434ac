//! Recursive-descent parser over the token stream.
//!
//! State lives in the call stack; the parser owns the lexer, one token of
//! lookahead, and a per-call key cache. Every diagnostic is positioned at
//! the start of the token that triggered it, with two deliberate
//! exceptions: an unterminated string reports its opening quote, and a
//! trailing comma reports the comma itself.

use std::collections::HashMap;

use crate::content;
use crate::error::{DecodeError, DecodeErrorKind};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::options::DecodeOptions;
use crate::value::{Map, Value};

/// Decodes a complete JSON document with default options.
///
/// # Errors
///
/// Returns a [`DecodeError`] carrying the exact character position of the
/// first grammar violation.
///
/// # Examples
///
/// ```
/// use exactjson::{Number, Value};
///
/// let v = exactjson::decode("[1, 2, 3]").unwrap();
/// assert_eq!(
///     v,
///     Value::Array(vec![
///         Value::Number(Number::Int(1)),
///         Value::Number(Number::Int(2)),
///         Value::Number(Number::Int(3)),
///     ])
/// );
/// ```
pub fn decode(text: &str) -> Result<Value, DecodeError> {
    decode_with(text, &DecodeOptions::default())
}

/// Decodes a complete JSON document under `options`.
///
/// # Errors
///
/// Returns a [`DecodeError`] for the first grammar violation, byte-order
/// mark, or post-value trailing data.
pub fn decode_with(text: &str, options: &DecodeOptions) -> Result<Value, DecodeError> {
    // A BOM is rejected at document start only; inside a string literal
    // U+FEFF is an ordinary character.
    if text.starts_with('\u{feff}') {
        return Err(DecodeError::at_byte(DecodeErrorKind::BomRejected, text, 0));
    }
    log::trace!("decoding {} byte document", text.len());
    let mut parser = Parser::new(text, options);
    let value = parser.parse_value()?;
    let tail = parser.next_token()?;
    if tail.kind != TokenKind::Eof {
        return Err(parser.fail(DecodeErrorKind::ExtraData, tail.start));
    }
    Ok(value)
}

struct Parser<'src, 'opt> {
    text: &'src str,
    lexer: Lexer<'src>,
    options: &'opt DecodeOptions,
    peeked: Option<Token<'src>>,
    /// Raw key slice -> decoded key, scoped to this call. Repeated keys hit
    /// the cache and skip re-decoding; nothing outlives the decode.
    key_cache: HashMap<&'src str, String>,
}

impl<'src, 'opt> Parser<'src, 'opt> {
    fn new(text: &'src str, options: &'opt DecodeOptions) -> Self {
        Self {
            text,
            lexer: Lexer::new(text),
            options,
            peeked: None,
            key_cache: HashMap::new(),
        }
    }

    fn fail(&self, kind: DecodeErrorKind, at: usize) -> DecodeError {
        DecodeError::at_byte(kind, self.text, at)
    }

    fn next_token(&mut self) -> Result<Token<'src>, DecodeError> {
        match self.peeked.take() {
            Some(tok) => Ok(tok),
            None => self.lexer.next_token(),
        }
    }

    fn peek_kind(&mut self) -> Result<TokenKind, DecodeError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_token()?);
        }
        match &self.peeked {
            Some(tok) => Ok(tok.kind),
            None => unreachable!("lookahead was just filled"),
        }
    }

    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        let tok = self.next_token()?;
        match tok.kind {
            TokenKind::Literal => content::parse_literal(tok.raw, tok.start, self.text, self.options),
            TokenKind::String => {
                let s = content::parse_string(tok.raw, tok.start, self.text)?;
                Ok(Value::String(s.into_owned()))
            }
            TokenKind::Number => content::parse_number(tok.raw, tok.start, self.text, self.options),
            TokenKind::ObjectOpen => self.parse_object(),
            TokenKind::ArrayOpen => self.parse_array(),
            _ => Err(self.fail(DecodeErrorKind::ExpectingValue, tok.start)),
        }
    }

    fn parse_object(&mut self) -> Result<Value, DecodeError> {
        // Empty-object fast path.
        if self.peek_kind()? == TokenKind::ObjectClose {
            self.next_token()?;
            return Ok(self.finish_object(Vec::new()));
        }

        let mut pairs: Vec<(String, Value)> = Vec::new();
        loop {
            let key_tok = self.next_token()?;
            if key_tok.kind != TokenKind::String {
                return Err(self.fail(DecodeErrorKind::ExpectingPropertyName, key_tok.start));
            }
            let key = self.decode_key(key_tok)?;

            let colon = self.next_token()?;
            if colon.kind != TokenKind::Colon {
                return Err(self.fail(DecodeErrorKind::ExpectingColon, colon.start));
            }

            let value = self.parse_value()?;
            pairs.push((key, value));

            let sep = self.next_token()?;
            match sep.kind {
                TokenKind::ObjectClose => break,
                TokenKind::Comma => {
                    if self.peek_kind()? == TokenKind::ObjectClose {
                        return Err(self.fail(DecodeErrorKind::TrailingCommaObject, sep.start));
                    }
                }
                _ => return Err(self.fail(DecodeErrorKind::ExpectingComma, sep.start)),
            }
        }
        Ok(self.finish_object(pairs))
    }

    /// Applies the object hooks: the pairs hook sees the raw ordered list,
    /// duplicates included; otherwise pairs fold into a [`Map`] where a
    /// duplicate key overwrites its value but keeps its first-seen slot.
    fn finish_object(&self, pairs: Vec<(String, Value)>) -> Value {
        if let Some(hook) = &self.options.object_pairs_hook {
            return hook(pairs);
        }
        let mut map = Map::with_capacity(pairs.len());
        for (key, value) in pairs {
            map.insert(key, value);
        }
        match &self.options.object_hook {
            Some(hook) => hook(map),
            None => Value::Object(map),
        }
    }

    fn decode_key(&mut self, tok: Token<'src>) -> Result<String, DecodeError> {
        if let Some(cached) = self.key_cache.get(tok.raw) {
            return Ok(cached.clone());
        }
        let key = content::parse_string(tok.raw, tok.start, self.text)?.into_owned();
        self.key_cache.insert(tok.raw, key.clone());
        Ok(key)
    }

    fn parse_array(&mut self) -> Result<Value, DecodeError> {
        // Empty-array fast path.
        if self.peek_kind()? == TokenKind::ArrayClose {
            self.next_token()?;
            return Ok(Value::Array(Vec::new()));
        }

        let mut items = Vec::new();
        loop {
            items.push(self.parse_value()?);

            let sep = self.next_token()?;
            match sep.kind {
                TokenKind::ArrayClose => break,
                TokenKind::Comma => {
                    if self.peek_kind()? == TokenKind::ArrayClose {
                        return Err(self.fail(DecodeErrorKind::TrailingCommaArray, sep.start));
                    }
                }
                _ => return Err(self.fail(DecodeErrorKind::ExpectingComma, sep.start)),
            }
        }
        Ok(Value::Array(items))
    }
}
