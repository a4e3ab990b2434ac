use rstest::rstest;

use crate::{decode, DecodeErrorKind};

fn assert_failure(doc: &str, message: &str, pos: usize, line: usize, column: usize) {
    let err = decode(doc).unwrap_err();
    assert_eq!(err.message(), message, "message for {doc:?}");
    assert_eq!(err.pos, pos, "pos for {doc:?}");
    assert_eq!(err.line, line, "line for {doc:?}");
    assert_eq!(err.column, column, "column for {doc:?}");
}

#[rstest]
#[case("", "Expecting value", 0)]
#[case("[", "Expecting value", 1)]
#[case("[42", "Expecting ',' delimiter", 3)]
#[case("[42,", "Expecting value", 4)]
#[case(r#"[""#, "Unterminated string starting at", 1)]
#[case(r#"["spam"#, "Unterminated string starting at", 1)]
#[case(r#"["spam""#, "Expecting ',' delimiter", 7)]
#[case(r#"["spam","#, "Expecting value", 8)]
#[case("{", "Expecting property name enclosed in double quotes", 1)]
#[case(r#"{""#, "Unterminated string starting at", 1)]
#[case(r#"{"spam"#, "Unterminated string starting at", 1)]
#[case(r#"{"spam""#, "Expecting ':' delimiter", 7)]
#[case(r#"{"spam":"#, "Expecting value", 8)]
#[case(r#"{"spam":42"#, "Expecting ',' delimiter", 10)]
#[case(
    r#"{"spam":42,"#,
    "Expecting property name enclosed in double quotes",
    11
)]
#[case(r#"""#, "Unterminated string starting at", 0)]
#[case(r#""spam"#, "Unterminated string starting at", 0)]
fn truncated_input_positions(#[case] doc: &str, #[case] message: &str, #[case] pos: usize) {
    assert_failure(doc, message, pos, 1, pos + 1);
}

#[rstest]
#[case("[,", "Expecting value", 1)]
#[case(r#"{"spam":[}"#, "Expecting value", 9)]
#[case("[42:", "Expecting ',' delimiter", 3)]
#[case(r#"[42 "spam""#, "Expecting ',' delimiter", 4)]
#[case("[42,]", "Illegal trailing comma before end of array", 3)]
#[case(r#"{"spam":[42}"#, "Expecting ',' delimiter", 11)]
#[case(r#"["]"#, "Unterminated string starting at", 1)]
#[case(r#"["spam":"#, "Expecting ',' delimiter", 7)]
#[case(r#"["spam",]"#, "Illegal trailing comma before end of array", 7)]
#[case("{:", "Expecting property name enclosed in double quotes", 1)]
#[case("{,", "Expecting property name enclosed in double quotes", 1)]
#[case("{42", "Expecting property name enclosed in double quotes", 1)]
#[case("[{]", "Expecting property name enclosed in double quotes", 2)]
#[case(r#"{"spam","#, "Expecting ':' delimiter", 7)]
#[case(r#"{"spam"}"#, "Expecting ':' delimiter", 7)]
#[case(r#"[{"spam"]"#, "Expecting ':' delimiter", 8)]
#[case(r#"{"spam":}"#, "Expecting value", 8)]
#[case(r#"[{"spam":]"#, "Expecting value", 9)]
#[case(r#"{"spam":42 "ham""#, "Expecting ',' delimiter", 11)]
#[case(r#"[{"spam":42]"#, "Expecting ',' delimiter", 11)]
#[case(r#"{"spam":42,}"#, "Illegal trailing comma before end of object", 10)]
#[case(r#"{"a":1,}"#, "Illegal trailing comma before end of object", 6)]
#[case(r#"{"spam":42 , }"#, "Illegal trailing comma before end of object", 11)]
#[case("[123  , ]", "Illegal trailing comma before end of array", 6)]
fn unexpected_data_positions(#[case] doc: &str, #[case] message: &str, #[case] pos: usize) {
    assert_failure(doc, message, pos, 1, pos + 1);
}

#[rstest]
#[case("[1,2,3]5", 7)]
#[case("[]]", 2)]
#[case("{}}", 2)]
#[case("[],[]", 2)]
#[case("{},{}", 2)]
#[case(r#"42,"spam""#, 2)]
#[case(r#""spam",42"#, 6)]
fn extra_data_positions(#[case] doc: &str, #[case] pos: usize) {
    assert_failure(doc, "Extra data", pos, 1, pos + 1);
}

#[rstest]
#[case("!", 1, 1, 0)]
#[case(" !", 1, 2, 1)]
#[case("\n!", 2, 1, 1)]
#[case("\n  \n\n     !", 4, 6, 10)]
fn line_and_column_track_newlines(
    #[case] doc: &str,
    #[case] line: usize,
    #[case] column: usize,
    #[case] pos: usize,
) {
    let err = decode(doc).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::ExpectingValue);
    assert_eq!(err.pos, pos);
    assert_eq!(err.line, line);
    assert_eq!(err.column, column);
    assert_eq!(
        err.to_string(),
        format!("Expecting value at line {line}, column {column}")
    );
}

#[test]
fn positions_are_character_offsets() {
    // The two-byte é must not shift reported positions.
    let err = decode("[\"\u{e9}\",]").unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::TrailingCommaArray);
    assert_eq!(err.pos, 4);
    assert_eq!(err.column, 5);
}

// The JSON_checker corpus documents that must be rejected. The suite's
// bare-string payload and its nesting-depth case are accepted here, as the
// original conformance run documents.
#[rstest]
#[case(r#"["Unclosed array""#)]
#[case(r#"{unquoted_key: "keys must be quoted"}"#)]
#[case(r#"["extra comma",]"#)]
#[case(r#"["double extra comma",,]"#)]
#[case(r#"[   , "<-- missing value"]"#)]
#[case(r#"["Comma after the close"],"#)]
#[case(r#"["Extra close"]]"#)]
#[case(r#"{"Extra comma": true,}"#)]
#[case(r#"{"Extra value after close": true} "misplaced quoted value""#)]
#[case(r#"{"Illegal expression": 1 + 2}"#)]
#[case(r#"{"Illegal invocation": alert()}"#)]
#[case(r#"{"Numbers cannot have leading zeroes": 013}"#)]
#[case(r#"{"Numbers cannot be hex": 0x14}"#)]
#[case(r#"["Illegal backslash escape: \x15"]"#)]
#[case(r"[\naked]")]
#[case(r#"["Illegal backslash escape: \017"]"#)]
#[case(r#"{"Missing colon" null}"#)]
#[case(r#"{"Double colon":: null}"#)]
#[case(r#"{"Comma instead of colon", null}"#)]
#[case(r#"["Colon instead of comma": false]"#)]
#[case(r#"["Bad value", truth]"#)]
#[case("['single quote']")]
#[case("[\"\ttab\tcharacter\tin\tstring\t\"]")]
#[case(r#"["tab\   character\   in\  string\  "]"#)]
#[case("[\"line\nbreak\"]")]
#[case("[\"line\\\nbreak\"]")]
#[case("[0e]")]
#[case("[0e+]")]
#[case("[0e+-1]")]
#[case(r#"{"Comma instead if closing brace": true,"#)]
#[case(r#"["mismatch"}"#)]
#[case("[\"A\u{1f}Z control characters in string\"]")]
fn json_checker_failures(#[case] doc: &str) {
    let err = decode(doc).unwrap_err();
    assert!(err.pos <= doc.chars().count());
    assert!(err.line >= 1);
    assert!(err.column >= 1);
}

#[rstest]
#[case("1\u{ff10}")]
#[case("0.\u{ff10}")]
#[case("0e\u{ff10}")]
fn non_ascii_digits_are_rejected(#[case] doc: &str) {
    decode(doc).unwrap_err();
}

#[rstest]
#[case("nan")]
#[case("NAN")]
#[case("naN")]
#[case("infinity")]
#[case("INFINITY")]
#[case("inFiniTy")]
#[case("-NaN")]
fn miscased_constants_are_rejected(#[case] doc: &str) {
    decode(doc).unwrap_err();
}

#[test]
fn constants_without_hook_are_invalid_literals() {
    for doc in ["Infinity", "-Infinity", "NaN"] {
        let err = decode(doc).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::InvalidLiteral, "{doc}");
        assert_eq!(err.pos, 0);
    }
}

#[test]
fn control_character_reports_its_own_offset() {
    let err = decode("[\"a\tb\"]").unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::InvalidControlCharacter);
    assert_eq!(err.pos, 3);
}

#[test]
fn raw_newline_reports_string_unterminated_at_quote() {
    let err = decode("[\"line\nbreak\"]").unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::UnterminatedString);
    assert_eq!(err.pos, 1);
}

#[test]
fn bom_is_rejected_at_document_start() {
    let err = decode("\u{feff}[1,2,3]").unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::BomRejected);
    assert_eq!(err.pos, 0);
    assert!(err.to_string().contains("BOM"));
}

#[test]
fn invalid_escape_is_rejected() {
    let err = decode(r#"["abc\y"]"#).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::InvalidEscape);
    assert_eq!(err.pos, 5);
}

#[test]
fn one_digit_past_the_ceiling_is_too_large() {
    let doc = "1".repeat(crate::DEFAULT_MAX_INT_DIGITS + 1);
    let err = decode(&doc).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::NumberTooLarge);
    assert_eq!(err.pos, 0);
}

#[test]
fn leading_zeros_are_rejected() {
    let err = decode("013").unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::LeadingZero);
    assert_eq!(err.message(), "Leading zeros not allowed");
}
