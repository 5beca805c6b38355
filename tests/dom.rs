use std::fs;
use std::path::PathBuf;

use chisel_dom::{Document, DuplicateKeys, JsonValue, Parser, ParserErrorDetails, ParserOptions};

/// Render a tree back into JSON text. Only used to check that parsing is structurally faithful
fn render(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::from("null"),
        JsonValue::Boolean(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => render_string(s),
        JsonValue::Array(values) => {
            let inner: Vec<String> = values.iter().map(render).collect();
            format!("[{}]", inner.join(","))
        }
        JsonValue::Object(fields) => {
            let inner: Vec<String> = fields
                .iter()
                .map(|(k, v)| format!("{}:{}", render_string(k), render(v)))
                .collect();
            format!("{{{}}}", inner.join(","))
        }
    }
}

fn render_string(s: &str) -> String {
    let mut out = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures/json/valid")
        .join(name);
    fs::read_to_string(path).unwrap()
}

#[test]
fn rendered_trees_should_reparse_to_equivalent_trees() {
    let sources = vec![
        fixture("simple_structure.json"),
        fixture("blog_entries.json"),
        fixture("matrix.json"),
        String::from(r#"{"ctl": "a\u0001b\u001f", "deep": [[[{"x": [null]}]]], "n": -0.125}"#),
    ];
    for source in sources {
        let first = Parser::default().parse_str(&source).unwrap();
        let rendered = render(&first);
        let second = Parser::default().parse_str(&rendered).unwrap();
        assert_eq!(first, second, "round trip of {}", rendered);
    }
}

#[test]
fn empty_object_should_be_valid() {
    let doc = Document::parse("{}");
    assert!(doc.is_valid());
    assert!(doc.root().is_object());
    assert_eq!(doc.root().len(), 0);
}

#[test]
fn empty_array_should_be_valid() {
    let doc = Document::parse("[]");
    assert!(doc.is_valid());
    assert!(doc.root().is_array());
    assert!(doc.root().is_empty());
}

#[test]
fn should_build_an_object_with_a_nested_array() {
    let mut expected = JsonValue::empty_object();
    expected.insert_field("a", JsonValue::Number(1.0));
    let mut b = JsonValue::empty_array();
    for n in [1.0, 2.0, 3.0] {
        b.push(JsonValue::Number(n));
    }
    expected.insert_field("b", b);

    let doc = Document::parse(r#"{"a": 1, "b": [1, 2, 3]}"#);
    assert!(doc.is_valid());
    assert_eq!(doc.into_root(), expected);
}

#[test]
fn unicode_escape_should_decode_to_a_single_character() {
    let doc = Document::parse(r#""\u0041""#);
    assert!(doc.is_valid());
    assert_eq!(doc.root().as_str(), Some("A"));
}

#[test]
fn empty_input_should_be_invalid() {
    let doc = Document::parse("");
    assert!(!doc.is_valid());
    assert_eq!(doc.error().unwrap().details, ParserErrorDetails::EndOfInput);
    assert!(doc.message().unwrap().contains("end of input"));
}

#[test]
fn trailing_comma_in_object_should_be_invalid() {
    for _ in 0..3 {
        let doc = Document::parse(r#"{"a": 1,}"#);
        assert!(!doc.is_valid());
        assert_eq!(
            doc.error().unwrap().details,
            ParserErrorDetails::IllegalIdentifier(String::from("}"))
        );
        assert_eq!(doc.root().get("a"), Some(&JsonValue::Number(1.0)));
    }
}

#[test]
fn nested_arrays_should_keep_order() {
    let value = Parser::default().parse_str("[[1,2],[3,4]]").unwrap();
    let rows: Vec<Vec<f64>> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row.as_array().unwrap().iter().filter_map(|v| v.as_f64()).collect())
        .collect();
    assert_eq!(rows, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
}

#[test]
fn simple_escapes_should_decode_to_single_bytes() {
    let value = Parser::default()
        .parse_str(r#"{"s": "1\n2\t3\\4\"5"}"#)
        .unwrap();
    let s = value.get("s").and_then(|s| s.as_str()).unwrap();
    assert_eq!(s, "1\n2\t3\\4\"5");
    assert_eq!(s.len(), 9);
}

#[test]
fn keys_should_be_escape_decoded() {
    let value = Parser::default().parse_str(r#"{"a\tb": 1}"#).unwrap();
    assert_eq!(value.get("a\tb"), Some(&JsonValue::Number(1.0)));
}

#[test]
fn options_should_be_combinable() {
    let options = ParserOptions::default()
        .with_duplicate_keys(DuplicateKeys::Reject)
        .with_trailing_content(true);
    let parser = Parser::with_options(options);
    assert_eq!(parser.options(), &options);
    assert!(parser.parse_str(r#"{"a": 1} trailing"#).is_ok());
    assert!(parser.parse_str(r#"{"a": 1, "a": 2}"#).is_err());
}

#[test]
fn parsing_should_work_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let text = format!("[{}, {{\"i\": {}}}]", i, i);
                Parser::default().parse_str(&text).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle.join().unwrap();
        assert_eq!(value.pointer("/1/i"), Some(&JsonValue::Number(i as f64)));
    }
}
