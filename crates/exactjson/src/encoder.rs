//! Formatting encoder: value graphs to JSON text.
//!
//! The encoder does not require its input to be a [`Value`]. It works
//! against the [`Encode`] trait, which classifies a value into one of the
//! shapes JSON can express — or [`Node::Other`], which routes through the
//! configurable fallback hook. `Value` and the ordinary Rust shapes
//! (booleans, integers, floats, strings, `Vec`, string-keyed maps)
//! implement it out of the box.

use core::fmt::Write as _;

use num_bigint::BigInt;

use crate::error::{EncodeError, EncodeErrorKind};
use crate::options::{EncodeOptions, Indent};
use crate::value::{write_escaped_string, write_float, Number, Value};

/// A value's JSON shape, as reported by [`Encode::encode_node`].
pub enum Node<'a> {
    Null,
    Bool(bool),
    Int(i64),
    BigInt(&'a BigInt),
    Float(f64),
    Str(&'a str),
    /// An ordered sequence; encodes as an array.
    Seq(Vec<&'a dyn Encode>),
    /// An ordered sequence of key/value pairs; encodes as an object.
    Map(Vec<(MapKey<'a>, &'a dyn Encode)>),
    /// Anything else. Carries a type name for diagnostics; only the
    /// `default` fallback hook can turn it into output.
    Other {
        /// Name of the unsupported type, e.g. `"module"`.
        type_name: &'a str,
    },
}

/// An object key before coercion to text.
///
/// JSON keys are strings, but bools, integers and floats are accepted and
/// coerced to their textual form as a convenience. Anything else is
/// [`MapKey::Other`] and either fails the encode or, under `skip_keys`,
/// silently drops its pair.
pub enum MapKey<'a> {
    Str(&'a str),
    Bool(bool),
    Int(i64),
    Float(f64),
    Other {
        /// Name of the unsupported key type, e.g. `"tuple"`.
        type_name: &'a str,
    },
}

/// Introspection contract between the encoder and its input values.
///
/// Implementations report their JSON shape per call; the encoder never
/// caches a node, so interior mutability in an implementor is visible (and
/// its consistency is the implementor's problem).
pub trait Encode {
    /// Classifies this value as one of the encodable shapes.
    fn encode_node(&self) -> Node<'_>;
}

impl Encode for Value {
    fn encode_node(&self) -> Node<'_> {
        match self {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(*b),
            Value::Number(Number::Int(n)) => Node::Int(*n),
            Value::Number(Number::BigInt(n)) => Node::BigInt(n),
            Value::Number(Number::Float(n)) => Node::Float(*n),
            Value::String(s) => Node::Str(s),
            Value::Array(items) => Node::Seq(items.iter().map(|v| v as &dyn Encode).collect()),
            Value::Object(map) => Node::Map(
                map.iter()
                    .map(|(k, v)| (MapKey::Str(k.as_str()), v as &dyn Encode))
                    .collect(),
            ),
        }
    }
}

impl Encode for Number {
    fn encode_node(&self) -> Node<'_> {
        match self {
            Number::Int(n) => Node::Int(*n),
            Number::BigInt(n) => Node::BigInt(n),
            Number::Float(n) => Node::Float(*n),
        }
    }
}

impl Encode for bool {
    fn encode_node(&self) -> Node<'_> {
        Node::Bool(*self)
    }
}

impl Encode for i64 {
    fn encode_node(&self) -> Node<'_> {
        Node::Int(*self)
    }
}

impl Encode for i32 {
    fn encode_node(&self) -> Node<'_> {
        Node::Int(i64::from(*self))
    }
}

impl Encode for f64 {
    fn encode_node(&self) -> Node<'_> {
        Node::Float(*self)
    }
}

impl Encode for &str {
    fn encode_node(&self) -> Node<'_> {
        Node::Str(self)
    }
}

impl Encode for String {
    fn encode_node(&self) -> Node<'_> {
        Node::Str(self)
    }
}

impl Encode for BigInt {
    fn encode_node(&self) -> Node<'_> {
        Node::BigInt(self)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode_node(&self) -> Node<'_> {
        match self {
            Some(v) => v.encode_node(),
            None => Node::Null,
        }
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode_node(&self) -> Node<'_> {
        Node::Seq(self.iter().map(|v| v as &dyn Encode).collect())
    }
}

impl<T: Encode> Encode for indexmap::IndexMap<String, T> {
    fn encode_node(&self) -> Node<'_> {
        Node::Map(
            self.iter()
                .map(|(k, v)| (MapKey::Str(k.as_str()), v as &dyn Encode))
                .collect(),
        )
    }
}

/// Encodes `value` to JSON text with default options.
///
/// # Errors
///
/// Fails with an [`EncodeError`] for non-finite floats, unsupported key
/// types, or values with no JSON shape and no fallback hook.
///
/// # Examples
///
/// ```
/// let v = exactjson::decode(r#"{"a": [1, 2]}"#).unwrap();
/// assert_eq!(exactjson::encode(&v).unwrap(), r#"{"a": [1, 2]}"#);
/// ```
pub fn encode<T: Encode>(value: &T) -> Result<String, EncodeError> {
    encode_with(value, &EncodeOptions::default())
}

/// Encodes `value` to JSON text under `options`.
///
/// # Errors
///
/// As [`encode`]; nested failures are annotated with the traversal context
/// (array index or object key), innermost first.
pub fn encode_with<T: Encode>(value: &T, options: &EncodeOptions) -> Result<String, EncodeError> {
    log::trace!("encoding value graph");
    let mut encoder = Encoder::new(options);
    encoder.write_value(value, 0)?;
    Ok(encoder.out)
}

struct Encoder<'opt> {
    options: &'opt EncodeOptions,
    out: String,
    item_sep: String,
    key_sep: String,
    indent: Option<String>,
}

impl<'opt> Encoder<'opt> {
    fn new(options: &'opt EncodeOptions) -> Self {
        let (item_sep, key_sep) = match &options.separators {
            Some((item, key)) => (item.clone(), key.clone()),
            // With an indent the item separator sits at end of line, so the
            // compact default drops its trailing space.
            None if options.indent.is_some() => (",".to_owned(), ": ".to_owned()),
            None => (", ".to_owned(), ": ".to_owned()),
        };
        Self {
            options,
            out: String::new(),
            item_sep,
            key_sep,
            indent: options.indent.as_ref().map(Indent::unit),
        }
    }

    fn newline_indent(&mut self, depth: usize) {
        if let Some(unit) = &self.indent {
            self.out.push('\n');
            for _ in 0..depth {
                self.out.push_str(unit);
            }
        }
    }

    fn write_value(&mut self, value: &dyn Encode, depth: usize) -> Result<(), EncodeError> {
        match value.encode_node() {
            Node::Null => {
                self.out.push_str("null");
                Ok(())
            }
            Node::Bool(b) => {
                self.out.push_str(if b { "true" } else { "false" });
                Ok(())
            }
            Node::Int(n) => {
                let _ = write!(self.out, "{n}");
                Ok(())
            }
            Node::BigInt(n) => {
                let _ = write!(self.out, "{n}");
                Ok(())
            }
            Node::Float(n) => {
                if !n.is_finite() {
                    return Err(EncodeError::new(EncodeErrorKind::NonFiniteNumber));
                }
                let _ = write_float(n, &mut self.out);
                Ok(())
            }
            Node::Str(s) => {
                self.write_string(s);
                Ok(())
            }
            Node::Seq(items) => self.write_array(&items, depth),
            Node::Map(entries) => self.write_object(entries, depth),
            Node::Other { type_name } => self.write_fallback(value, type_name, depth),
        }
    }

    fn write_string(&mut self, s: &str) {
        self.out.push('"');
        let _ = write_escaped_string(s, self.options.ensure_ascii, &mut self.out);
        self.out.push('"');
    }

    fn write_array(&mut self, items: &[&dyn Encode], depth: usize) -> Result<(), EncodeError> {
        if items.is_empty() {
            self.out.push_str("[]");
            return Ok(());
        }
        self.out.push('[');
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.out.push_str(&self.item_sep);
            }
            self.newline_indent(depth + 1);
            self.write_value(*item, depth + 1)
                .map_err(|e| e.push_context(format!("in array at index {index}")))?;
        }
        self.newline_indent(depth);
        self.out.push(']');
        Ok(())
    }

    fn write_object(
        &mut self,
        entries: Vec<(MapKey<'_>, &dyn Encode)>,
        depth: usize,
    ) -> Result<(), EncodeError> {
        // Coerce keys first: bad keys must fail (or be skipped) before any
        // of the object is emitted.
        let mut members: Vec<(SortKey<'_>, String, &dyn Encode)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match key {
                MapKey::Str(s) => members.push((SortKey::Str(s), s.to_owned(), value)),
                MapKey::Bool(b) => members.push((
                    SortKey::Num(if b { 1.0 } else { 0.0 }),
                    if b { "true" } else { "false" }.to_owned(),
                    value,
                )),
                MapKey::Int(n) => {
                    #[allow(clippy::cast_precision_loss)]
                    members.push((SortKey::Num(n as f64), n.to_string(), value));
                }
                MapKey::Float(n) => {
                    let mut text = String::new();
                    let _ = write_float(n, &mut text);
                    members.push((SortKey::Num(n), text, value));
                }
                MapKey::Other { type_name } => {
                    if self.options.skip_keys {
                        continue;
                    }
                    return Err(EncodeError::new(EncodeErrorKind::UnsupportedKeyType(
                        type_name.to_owned(),
                    )));
                }
            }
        }

        if self.options.sort_keys {
            members.sort_by(|(a, ..), (b, ..)| a.cmp(b));
        }

        if members.is_empty() {
            self.out.push_str("{}");
            return Ok(());
        }
        self.out.push('{');
        for (index, (_, key_text, value)) in members.iter().enumerate() {
            if index > 0 {
                self.out.push_str(&self.item_sep);
            }
            self.newline_indent(depth + 1);
            self.write_string(key_text);
            self.out.push_str(&self.key_sep);
            self.write_value(*value, depth + 1)
                .map_err(|e| e.push_context(format!("in object at key '{key_text}'")))?;
        }
        self.newline_indent(depth);
        self.out.push('}');
        Ok(())
    }

    fn write_fallback(
        &mut self,
        value: &dyn Encode,
        type_name: &str,
        depth: usize,
    ) -> Result<(), EncodeError> {
        if let Some(hook) = &self.options.default {
            if let Some(replacement) = hook(value) {
                return self.write_value(&replacement, depth);
            }
        }
        Err(EncodeError::new(EncodeErrorKind::UnsupportedType(
            type_name.to_owned(),
        )))
    }
}

/// Pre-coercion key ordering for `sort_keys`: numeric keys (bools included)
/// order by numeric value and sort before string keys, string keys order
/// lexicographically.
enum SortKey<'a> {
    Num(f64),
    Str(&'a str),
}

impl SortKey<'_> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        use core::cmp::Ordering;
        match (self, other) {
            (SortKey::Num(a), SortKey::Num(b)) => a.total_cmp(b),
            (SortKey::Str(a), SortKey::Str(b)) => a.cmp(b),
            (SortKey::Num(_), SortKey::Str(_)) => Ordering::Less,
            (SortKey::Str(_), SortKey::Num(_)) => Ordering::Greater,
        }
    }
}

