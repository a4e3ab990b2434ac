//! Configuration bundles for decoding and encoding.
//!
//! Both option types are plain field structs, fully set at construction and
//! never mutated by the codec. Hooks are `Arc`'d closures so one options
//! value can be shared read-only across threads; `None` in a hook slot
//! always means "use the built-in behavior", never "do nothing".

use core::fmt;
use std::sync::Arc;

use crate::encoder::Encode;
use crate::value::{Map, Value};

/// Default ceiling on the digit count of integer literals.
///
/// Parsing an N-digit integer costs more than linear time, so unbounded
/// literals are a denial-of-service vector. The ceiling only applies to the
/// built-in integer path; a caller-supplied [`DecodeOptions::parse_int`]
/// hook owns its own cost model. Raise or lower it per call via
/// [`DecodeOptions::max_int_digits`].
pub const DEFAULT_MAX_INT_DIGITS: usize = 5000;

/// Converts the raw text of a number or constant literal into a [`Value`].
pub type ScalarHook = Arc<dyn Fn(&str) -> Value + Send + Sync>;

/// Converts a decoded object into a [`Value`].
pub type ObjectHook = Arc<dyn Fn(Map) -> Value + Send + Sync>;

/// Converts the ordered key/value pairs of an object into a [`Value`].
pub type PairsHook = Arc<dyn Fn(Vec<(String, Value)>) -> Value + Send + Sync>;

/// Fallback for encoding values the encoder has no shape for. Returning
/// `None` declines, and the encode fails as if no hook were set.
pub type FallbackHook = Arc<dyn Fn(&dyn Encode) -> Option<Value> + Send + Sync>;

/// Options controlling [`decode_with`](crate::decode_with).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use exactjson::{DecodeOptions, Value};
///
/// let options = DecodeOptions {
///     parse_int: Some(Arc::new(|raw| Value::String(raw.to_owned()))),
///     ..DecodeOptions::default()
/// };
/// let v = exactjson::decode_with("7", &options).unwrap();
/// assert_eq!(v, Value::String("7".to_owned()));
/// ```
#[derive(Clone)]
pub struct DecodeOptions {
    /// Reserved for a future relaxed mode; the grammar is currently always
    /// strict regardless of this flag.
    ///
    /// # Default
    ///
    /// `true`
    pub strict: bool,

    /// Replaces the built-in `f64` parse for literals with a fraction or
    /// exponent. Receives the raw literal text.
    pub parse_float: Option<ScalarHook>,

    /// Replaces the built-in integer parse. Receives the raw literal text.
    /// When set, [`max_int_digits`](Self::max_int_digits) is not enforced.
    pub parse_int: Option<ScalarHook>,

    /// Handles the extension constants `Infinity`, `-Infinity` and `NaN`.
    /// These are not standard JSON; without this hook they fail to decode.
    pub parse_constant: Option<ScalarHook>,

    /// Maps each decoded object. Ignored when
    /// [`object_pairs_hook`](Self::object_pairs_hook) is also set.
    pub object_hook: Option<ObjectHook>,

    /// Receives each object as its ordered key/value pair list, duplicates
    /// included, before any folding into a [`Map`]. Takes priority over
    /// [`object_hook`](Self::object_hook).
    pub object_pairs_hook: Option<PairsHook>,

    /// Digit ceiling for integer literals on the built-in path.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_INT_DIGITS`]
    pub max_int_digits: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: true,
            parse_float: None,
            parse_int: None,
            parse_constant: None,
            object_hook: None,
            object_pairs_hook: None,
            max_int_digits: DEFAULT_MAX_INT_DIGITS,
        }
    }
}

impl fmt::Debug for DecodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("strict", &self.strict)
            .field("parse_float", &self.parse_float.is_some())
            .field("parse_int", &self.parse_int.is_some())
            .field("parse_constant", &self.parse_constant.is_some())
            .field("object_hook", &self.object_hook.is_some())
            .field("object_pairs_hook", &self.object_pairs_hook.is_some())
            .field("max_int_digits", &self.max_int_digits)
            .finish()
    }
}

/// Indentation for pretty-printed output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Indent {
    /// That many spaces per nesting level.
    Spaces(usize),
    /// A literal string repeated per nesting level, e.g. `"\t"`.
    Text(String),
}

impl Indent {
    pub(crate) fn unit(&self) -> String {
        match self {
            Indent::Spaces(n) => " ".repeat(*n),
            Indent::Text(s) => s.clone(),
        }
    }
}

impl From<usize> for Indent {
    fn from(n: usize) -> Self {
        Indent::Spaces(n)
    }
}

impl From<&str> for Indent {
    fn from(s: &str) -> Self {
        Indent::Text(s.to_owned())
    }
}

impl From<String> for Indent {
    fn from(s: String) -> Self {
        Indent::Text(s)
    }
}

/// Options controlling [`encode_with`](crate::encode_with).
///
/// Unset `separators` default to `(", ", ": ")`, or `(",", ": ")` when
/// `indent` is set so line ends carry no trailing space.
#[derive(Clone)]
pub struct EncodeOptions {
    /// Silently drop object members whose key is not a string, bool, int or
    /// float instead of failing.
    ///
    /// # Default
    ///
    /// `false`
    pub skip_keys: bool,

    /// Escape every character above U+007F as `\uXXXX`, keeping the output
    /// 7-bit clean. When off, non-ASCII characters pass through as UTF-8.
    ///
    /// # Default
    ///
    /// `true`
    pub ensure_ascii: bool,

    /// Emit object members sorted by key (pre-coercion value) instead of
    /// insertion order.
    ///
    /// # Default
    ///
    /// `false`
    pub sort_keys: bool,

    /// Pretty-print containers one child per line at this indent per level.
    /// `None` keeps everything on one line.
    pub indent: Option<Indent>,

    /// `(item_separator, key_separator)` override.
    pub separators: Option<(String, String)>,

    /// Fallback for values the encoder cannot classify; its result is
    /// encoded in place of the original value, recursively.
    pub default: Option<FallbackHook>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            skip_keys: false,
            ensure_ascii: true,
            sort_keys: false,
            indent: None,
            separators: None,
            default: None,
        }
    }
}

impl fmt::Debug for EncodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeOptions")
            .field("skip_keys", &self.skip_keys)
            .field("ensure_ascii", &self.ensure_ascii)
            .field("sort_keys", &self.sort_keys)
            .field("indent", &self.indent)
            .field("separators", &self.separators)
            .field("default", &self.default.is_some())
            .finish()
    }
}
