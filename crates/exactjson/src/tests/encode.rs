use std::sync::Arc;

use crate::{
    decode, encode, encode_with, Encode, EncodeErrorKind, EncodeOptions, Indent, MapKey, Map,
    Node, Number, Value,
};

fn reencode(doc: &str) -> String {
    encode(&decode(doc).unwrap()).unwrap()
}

#[test]
fn empty_containers_stay_flat() {
    assert_eq!(encode(&Value::Object(Map::new())).unwrap(), "{}");
    assert_eq!(encode(&Value::Array(vec![])).unwrap(), "[]");
    let options = EncodeOptions {
        indent: Some(Indent::Spaces(4)),
        ..EncodeOptions::default()
    };
    assert_eq!(
        encode_with(&Value::Object(Map::new()), &options).unwrap(),
        "{}"
    );
}

#[test]
fn default_separators_include_spaces() {
    assert_eq!(
        reencode(r#"{"a":1,"b":[true,null]}"#),
        r#"{"a": 1, "b": [true, null]}"#
    );
}

#[test]
fn custom_separators_apply_verbatim() {
    let options = EncodeOptions {
        separators: Some((",".to_owned(), ":".to_owned())),
        ..EncodeOptions::default()
    };
    assert_eq!(
        encode_with(&decode(r#"{"a": 1, "b": 2}"#).unwrap(), &options).unwrap(),
        r#"{"a":1,"b":2}"#
    );
}

#[test]
fn indent_renders_one_member_per_line() {
    let options = EncodeOptions {
        indent: Some(Indent::Spaces(4)),
        ..EncodeOptions::default()
    };
    let v = decode(r#"{"valid_key": true}"#).unwrap();
    assert_eq!(
        encode_with(&v, &options).unwrap(),
        "{\n    \"valid_key\": true\n}"
    );
}

#[test]
fn indent_nests() {
    let options = EncodeOptions {
        indent: Some(Indent::Spaces(2)),
        ..EncodeOptions::default()
    };
    let v = decode("[1, [2, 3]]").unwrap();
    assert_eq!(
        encode_with(&v, &options).unwrap(),
        "[\n  1,\n  [\n    2,\n    3\n  ]\n]"
    );
}

#[test]
fn indent_accepts_literal_text() {
    let options = EncodeOptions {
        indent: Some(Indent::from("\t")),
        ..EncodeOptions::default()
    };
    let v = decode("[1, 2]").unwrap();
    assert_eq!(encode_with(&v, &options).unwrap(), "[\n\t1,\n\t2\n]");
}

#[test]
fn floats_keep_a_fraction_marker() {
    assert_eq!(encode(&3.0_f64).unwrap(), "3.0");
    assert_eq!(encode(&0.5_f64).unwrap(), "0.5");
    assert_eq!(encode(&-0.0_f64).unwrap(), "-0.0");
    assert_eq!(encode(&Value::Number(Number::Int(3))).unwrap(), "3");
}

#[test]
fn non_finite_floats_fail() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = encode(&bad).unwrap_err();
        assert_eq!(err.kind(), &EncodeErrorKind::NonFiniteNumber);
        assert_eq!(
            err.to_string(),
            "Out of range float values are not JSON compliant"
        );
    }
}

#[test]
fn nested_failures_annotate_innermost_first() {
    let v = decode(r#"[1, [2, 3, 4]]"#).unwrap();
    let Value::Array(mut arr) = v else { unreachable!() };
    if let Value::Array(inner) = &mut arr[1] {
        inner[2] = Value::Number(Number::Float(f64::NAN));
    }
    let err = encode(&Value::Array(arr)).unwrap_err();
    assert_eq!(err.context(), ["in array at index 2", "in array at index 1"]);

    let v = decode(r#"{"a": {"b": 1}}"#).unwrap();
    let Value::Object(mut map) = v else { unreachable!() };
    if let Value::Object(inner) = &mut map["a"] {
        inner["b"] = Value::Number(Number::Float(f64::NAN));
    }
    let err = encode(&Value::Object(map)).unwrap_err();
    assert_eq!(err.context(), ["in object at key 'b'", "in object at key 'a'"]);
    assert!(err.to_string().contains("in object at key 'b', in object at key 'a'"));
}

#[test]
fn ensure_ascii_escapes_everything_above_ascii() {
    let v = Value::String("a\u{e9}\u{2603}z".to_owned());
    assert_eq!(encode(&v).unwrap(), "\"a\\u00e9\\u2603z\"");

    let options = EncodeOptions {
        ensure_ascii: false,
        ..EncodeOptions::default()
    };
    assert_eq!(encode_with(&v, &options).unwrap(), "\"a\u{e9}\u{2603}z\"");
}

#[test]
fn ensure_ascii_splits_astral_characters_into_surrogate_pairs() {
    let v = Value::String("\u{1d120}".to_owned());
    assert_eq!(encode(&v).unwrap(), "\"\\ud834\\udd20\"");
}

#[test]
fn control_characters_always_escape() {
    let v = Value::String("a\nb\u{1}c".to_owned());
    assert_eq!(encode(&v).unwrap(), "\"a\\nb\\u0001c\"");
}

#[test]
fn sort_keys_orders_string_keys() {
    let options = EncodeOptions {
        sort_keys: true,
        ..EncodeOptions::default()
    };
    let v = decode(r#"{"b": 1, "a": 2}"#).unwrap();
    assert_eq!(encode_with(&v, &options).unwrap(), r#"{"a": 2, "b": 1}"#);
}

// A mapping whose keys are not strings, standing in for foreign values the
// trait contract admits.
struct BoolKeys;

static TRUE_VALUE: bool = true;
static FALSE_VALUE: bool = false;

impl Encode for BoolKeys {
    fn encode_node(&self) -> Node<'_> {
        Node::Map(vec![
            (MapKey::Bool(true), &FALSE_VALUE as &dyn Encode),
            (MapKey::Bool(false), &TRUE_VALUE as &dyn Encode),
        ])
    }
}

#[test]
fn bool_keys_coerce_and_sort() {
    let options = EncodeOptions {
        sort_keys: true,
        ..EncodeOptions::default()
    };
    assert_eq!(
        encode_with(&BoolKeys, &options).unwrap(),
        r#"{"false": true, "true": false}"#
    );
}

struct NumericKeys;

static FLOAT_VALUE: f64 = 3.0;
static INT_FIVE: i64 = 5;
static INT_ONE: i64 = 1;

impl Encode for NumericKeys {
    fn encode_node(&self) -> Node<'_> {
        Node::Map(vec![
            (MapKey::Int(2), &FLOAT_VALUE as &dyn Encode),
            (MapKey::Float(4.0), &INT_FIVE as &dyn Encode),
            (MapKey::Bool(false), &INT_ONE as &dyn Encode),
            (MapKey::Int(6), &TRUE_VALUE as &dyn Encode),
        ])
    }
}

#[test]
fn mixed_numeric_keys_coerce_and_sort_numerically() {
    let options = EncodeOptions {
        sort_keys: true,
        ..EncodeOptions::default()
    };
    assert_eq!(
        encode_with(&NumericKeys, &options).unwrap(),
        r#"{"false": 1, "2": 3.0, "4.0": 5, "6": true}"#
    );
}

struct PartlyBadKeys;

impl Encode for PartlyBadKeys {
    fn encode_node(&self) -> Node<'_> {
        Node::Map(vec![
            (
                MapKey::Other { type_name: "bytes" },
                &FALSE_VALUE as &dyn Encode,
            ),
            (MapKey::Str("valid_key"), &TRUE_VALUE as &dyn Encode),
        ])
    }
}

struct OnlyBadKeys;

impl Encode for OnlyBadKeys {
    fn encode_node(&self) -> Node<'_> {
        Node::Map(vec![(
            MapKey::Other { type_name: "bytes" },
            &FALSE_VALUE as &dyn Encode,
        )])
    }
}

#[test]
fn unsupported_keys_fail_without_skip_keys() {
    let err = encode(&PartlyBadKeys).unwrap_err();
    assert_eq!(
        err.to_string(),
        "keys must be str, int, float or bool, not bytes"
    );
}

#[test]
fn skip_keys_drops_only_the_bad_pairs() {
    let options = EncodeOptions {
        skip_keys: true,
        ..EncodeOptions::default()
    };
    assert_eq!(
        encode_with(&PartlyBadKeys, &options).unwrap(),
        r#"{"valid_key": true}"#
    );

    let indented = EncodeOptions {
        skip_keys: true,
        indent: Some(Indent::Spaces(4)),
        ..EncodeOptions::default()
    };
    assert_eq!(
        encode_with(&PartlyBadKeys, &indented).unwrap(),
        "{\n    \"valid_key\": true\n}"
    );
    // Dropping every pair leaves a flat empty object even when indenting.
    assert_eq!(encode_with(&OnlyBadKeys, &indented).unwrap(), "{}");
}

struct Opaque;

impl Encode for Opaque {
    fn encode_node(&self) -> Node<'_> {
        Node::Other {
            type_name: "module",
        }
    }
}

#[test]
fn unsupported_types_fail_by_name() {
    let err = encode(&Opaque).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Object of type module is not JSON serializable"
    );
}

#[test]
fn unsupported_types_inside_containers_carry_context() {
    let items: Vec<Opaque> = vec![Opaque];
    let err = encode(&items).unwrap_err();
    assert_eq!(err.context(), ["in array at index 0"]);
}

#[test]
fn default_hook_replaces_unknown_shapes() {
    let options = EncodeOptions {
        default: Some(Arc::new(|_| Some(Value::String("stand-in".to_owned())))),
        ..EncodeOptions::default()
    };
    assert_eq!(encode_with(&Opaque, &options).unwrap(), "\"stand-in\"");
}

#[test]
fn default_hook_result_is_reencoded() {
    let options = EncodeOptions {
        default: Some(Arc::new(|_| {
            Some(Value::Array(vec![Value::Null, Value::Bool(true)]))
        })),
        ..EncodeOptions::default()
    };
    assert_eq!(encode_with(&Opaque, &options).unwrap(), "[null, true]");
}

#[test]
fn declining_default_hook_fails_like_no_hook() {
    let options = EncodeOptions {
        default: Some(Arc::new(|_| None)),
        ..EncodeOptions::default()
    };
    let err = encode_with(&Opaque, &options).unwrap_err();
    assert!(matches!(err.kind(), EncodeErrorKind::UnsupportedType(name) if name == "module"));
}

#[test]
fn display_renders_compact_json() {
    let v = decode(r#"{"a": [1, 2.5, "x"], "b": null}"#).unwrap();
    assert_eq!(v.to_string(), r#"{"a":[1,2.5,"x"],"b":null}"#);
}
