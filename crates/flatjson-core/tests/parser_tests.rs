use flatjson_core::{
    parse, parse_value, parse_with, JsonError, Navigate, ParseError, ParserConfig, Value,
};

/// Helper: parse and return the root entries.
fn entries(text: &str) -> Vec<(String, Value)> {
    match parse(text).unwrap().into_root() {
        Value::Object(entries) => entries,
        other => panic!("root should be an object, got {other:?}"),
    }
}

fn parse_err(text: &str) -> ParseError {
    match parse(text) {
        Err(JsonError::Parse(e)) => e,
        other => panic!("expected a parse error for {text:?}, got {other:?}"),
    }
}

// ============================================================================
// Primitive values
// ============================================================================

#[test]
fn parse_all_primitive_kinds() {
    let doc =
        parse("{ \"int\": 1, \"double\": 1.332, \"bool\": false, \"string\": \"Hello World!\" }")
            .unwrap();
    assert_eq!(doc.root().len(), 4);
    assert_eq!(doc.by_key("int").read_int().unwrap(), 1);
    assert_eq!(doc.by_key("double").read_double().unwrap(), 1.332);
    assert!(!doc.by_key("bool").read_bool().unwrap());
    assert_eq!(doc.by_key("string").read_string().unwrap(), "Hello World!");
}

#[test]
fn parse_bare_keys() {
    let doc = parse("{ int : 1, double : 1.332, bool : false, string : \"Hello World!\" }").unwrap();
    assert_eq!(doc.by_key("int").read_int().unwrap(), 1);
    assert_eq!(doc.by_key("string").read_string().unwrap(), "Hello World!");
}

#[test]
fn parse_single_quoted_strings_and_keys() {
    let doc = parse("{ 'name' : 'Bob', say : 'he said \"hi\"' }").unwrap();
    assert_eq!(doc.by_key("name").read_string().unwrap(), "Bob");
    assert_eq!(doc.by_key("say").read_string().unwrap(), "he said \"hi\"");
}

#[test]
fn parse_true_and_null() {
    let doc = parse("{ yes : true, nothing : null }").unwrap();
    assert!(doc.by_key("yes").read_bool().unwrap());
    assert!(doc.by_key("nothing").unwrap().is_null());
}

#[test]
fn parse_negative_numbers() {
    let doc = parse("{ a : -7, b : -0.25 }").unwrap();
    assert_eq!(doc.by_key("a").read_int().unwrap(), -7);
    assert_eq!(doc.by_key("b").read_double().unwrap(), -0.25);
}

#[test]
fn parse_whole_number_with_dot_is_double() {
    let doc = parse("{ a : 3.0 }").unwrap();
    assert_eq!(doc.by_key("a").unwrap(), &Value::Double(3.0));
}

#[test]
fn string_content_is_verbatim() {
    let doc = parse(r#"{ path : "C:\new\table", spaced : "  two  spaces  " }"#).unwrap();
    assert_eq!(doc.by_key("path").read_string().unwrap(), r"C:\new\table");
    assert_eq!(doc.by_key("spaced").read_string().unwrap(), "  two  spaces  ");
}

#[test]
fn whitespace_outside_quotes_is_ignored() {
    let a = parse("{\n\tkey\t:\n  [ 1 ,\r\n 2 ]\n}").unwrap();
    let b = parse("{key:[1,2]}").unwrap();
    assert_eq!(a, b);
}

#[test]
fn bare_key_whitespace_is_stripped() {
    let doc = parse("{ my key : 1 }").unwrap();
    assert_eq!(doc.by_key("mykey").read_int().unwrap(), 1);
}

#[test]
fn quoted_key_keeps_padding_but_matches_trimmed() {
    let doc = parse("{ ' padded ' : 1 }").unwrap();
    assert_eq!(doc.root().as_object().unwrap()[0].0, " padded ");
    assert_eq!(doc.by_key("padded").read_int().unwrap(), 1);
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn parse_mixed_array() {
    let doc = parse("{ \"array\": [1, 2, \"word\"] }").unwrap();
    assert_eq!(doc.by_key("array").by_index(1).read_int().unwrap(), 2);
    assert_eq!(doc.by_key("array").by_index(2).read_string().unwrap(), "word");
}

#[test]
fn parse_nested_object() {
    let doc = parse("{ \"object\": { \"nestedKey\": \"nestedValue\" } }").unwrap();
    assert_eq!(
        doc.by_key("object").by_key("nestedKey").read_string().unwrap(),
        "nestedValue"
    );
}

#[test]
fn parse_object_with_nested_array() {
    let doc =
        parse("{ object : { nestedKey: \"nestedValue\", anotherArray : [1, true, 1.443] } }")
            .unwrap();
    let arr = doc.by_key("object").by_key("anotherArray").unwrap();
    assert_eq!(
        arr,
        &Value::Array(vec![Value::Int(1), Value::Bool(true), Value::Double(1.443)])
    );
}

#[test]
fn parse_nested_arrays_and_objects_in_arrays() {
    let doc = parse("{ grid : [[1, 2], [3, [4, 5]]], people : [{ n : 'a' }, { n : 'b' }] }")
        .unwrap();
    assert_eq!(doc.by_key("grid").by_index(1).by_index(1).by_index(0).read_int().unwrap(), 4);
    assert_eq!(doc.by_key("people").by_index(1).by_key("n").read_string().unwrap(), "b");
}

#[test]
fn parse_empty_containers() {
    let doc = parse("{ o : {}, a : [] }").unwrap();
    assert_eq!(doc.by_key("o").unwrap(), &Value::object());
    assert_eq!(doc.by_key("a").unwrap(), &Value::array());
}

#[test]
fn delimiters_inside_strings_do_not_affect_depth() {
    let doc = parse("{ a : { s : 'close } and ] here' }, b : ['[', '{'] }").unwrap();
    assert_eq!(doc.by_key("a").by_key("s").read_string().unwrap(), "close } and ] here");
    assert_eq!(doc.by_key("b").by_index(1).read_string().unwrap(), "{");
}

#[test]
fn entry_order_is_preserved() {
    let keys: Vec<String> = entries("{ z : 1, a : 2, m : 3 }")
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn duplicate_keys_are_kept() {
    let e = entries("{ k : 1, k : 2 }");
    assert_eq!(e.len(), 2);
    let doc = parse("{ k : 1, k : 2 }").unwrap();
    assert_eq!(doc.by_key("k").read_int().unwrap(), 1);
}

#[test]
fn repeated_commas_are_tolerated() {
    let doc = parse("{ a : 1,, b : [1,,2,], }").unwrap();
    assert_eq!(doc.root().len(), 2);
    assert_eq!(doc.by_key("b").unwrap().len(), 2);
}

// ============================================================================
// Recovery
// ============================================================================

#[test]
fn empty_input_yields_empty_document() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("   \n ").unwrap().is_empty());
}

#[test]
fn non_object_top_level_yields_empty_document() {
    assert!(parse("[1, 2, 3]").unwrap().is_empty());
    assert!(parse("hello").unwrap().is_empty());
    assert!(parse("'unterminated").unwrap().is_empty());
}

#[test]
fn trailing_input_after_root_is_ignored() {
    let doc = parse("{ a : 1 } garbage").unwrap();
    assert_eq!(doc.by_key("a").read_int().unwrap(), 1);
}

#[test]
fn trailing_input_with_stray_quote_is_ignored() {
    let doc = parse("{ a : 1 } it's").unwrap();
    assert_eq!(doc.by_key("a").read_int().unwrap(), 1);

    let doc = parse("{ s : '}' } \"unterminated { [").unwrap();
    assert_eq!(doc.by_key("s").read_string().unwrap(), "}");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unterminated_object_is_end_of_input() {
    assert!(matches!(
        parse_err("{ a : 1"),
        ParseError::UnexpectedEndOfInput { .. }
    ));
}

#[test]
fn unterminated_string_is_end_of_input() {
    assert!(matches!(
        parse_err("{ a : 'oops }"),
        ParseError::UnexpectedEndOfInput { .. }
    ));
}

#[test]
fn unterminated_nested_array_is_end_of_input() {
    assert!(matches!(
        parse_err("{ a : [1, 2 }"),
        ParseError::UnexpectedEndOfInput { .. }
    ));
}

#[test]
fn key_without_colon_is_end_of_input() {
    assert!(matches!(
        parse_err("{ lonely }"),
        ParseError::UnexpectedEndOfInput { .. }
    ));
}

#[test]
fn quoted_key_followed_by_junk_is_unexpected_character() {
    assert_eq!(
        parse_err("{ 'a' x : 1 }"),
        ParseError::UnexpectedCharacter {
            found: 'x',
            position: 4
        }
    );
}

#[test]
fn junk_after_string_value_is_unexpected_character() {
    assert!(matches!(
        parse_err("{ a : 'x' y }"),
        ParseError::UnexpectedCharacter { found: 'y', .. }
    ));
}

#[test]
fn bareword_value_is_invalid() {
    assert!(matches!(
        parse_err("{ a : hello }"),
        ParseError::InvalidValue { .. }
    ));
}

#[test]
fn misspelled_bool_is_invalid() {
    assert!(matches!(
        parse_err("{ a : tru }"),
        ParseError::InvalidValue { .. }
    ));
}

#[test]
fn two_dots_is_not_a_number() {
    assert!(matches!(
        parse_err("{ a : 1.2.3 }"),
        ParseError::InvalidValue { .. }
    ));
}

#[test]
fn missing_value_is_invalid() {
    assert!(matches!(
        parse_err("{ a : , b : 1 }"),
        ParseError::InvalidValue { .. }
    ));
}

#[test]
fn integer_overflow_is_invalid_number() {
    assert!(matches!(
        parse_err("{ a : 99999999999999999999 }"),
        ParseError::InvalidNumber { .. }
    ));
}

#[test]
fn depth_limit_is_enforced() {
    let config = ParserConfig { max_depth: 3 };
    assert!(parse_with("{ a : { b : [1] } }", &config).is_ok());
    assert_eq!(
        parse_with("{ a : { b : [[1]] } }", &config),
        Err(JsonError::Parse(ParseError::DepthLimitExceeded { limit: 3 }))
    );
}

#[test]
fn default_depth_limit_rejects_adversarial_nesting() {
    let text = format!("{{ a : {}1{} }}", "[".repeat(10_000), "]".repeat(10_000));
    assert!(matches!(
        parse_err(&text),
        ParseError::DepthLimitExceeded { .. }
    ));
}

// ============================================================================
// Single values
// ============================================================================

#[test]
fn parse_value_literals() {
    assert_eq!(parse_value("42").unwrap(), Value::Int(42));
    assert_eq!(parse_value(" 'hi there' ").unwrap(), Value::from("hi there"));
    assert_eq!(parse_value("false").unwrap(), Value::Bool(false));
    assert_eq!(
        parse_value("[1, { a : 2 }]").unwrap(),
        Value::Array(vec![
            Value::Int(1),
            Value::Object(vec![("a".to_string(), Value::Int(2))])
        ])
    );
}

#[test]
fn parse_value_rejects_trailing_text() {
    assert!(matches!(
        parse_value("1, 2"),
        Err(JsonError::Parse(ParseError::UnexpectedCharacter { found: ',', .. }))
    ));
    assert!(matches!(
        parse_value(""),
        Err(JsonError::Parse(ParseError::UnexpectedEndOfInput { .. }))
    ));
}
