use std::env;

use chisel_dom::{decoders::Encoding, pointer::JsonPointer, JsonValue, Parser};

/// Walk a tree depth first, printing the pointer to every scalar value
fn dump(value: &JsonValue, pointer: &mut JsonPointer) {
    match value {
        JsonValue::Array(values) => {
            for (index, child) in values.iter().enumerate() {
                pointer.push_index(index);
                dump(child, pointer);
                pointer.pop();
            }
        }
        JsonValue::Object(fields) => {
            let mut keys: Vec<&String> = fields.keys().collect();
            keys.sort();
            for key in keys {
                pointer.push_name(key.as_str());
                dump(&fields[key], pointer);
                pointer.pop();
            }
        }
        scalar => println!("{} ({})", pointer, scalar.kind()),
    }
}

/// Parse a file and print a pointer for each of the scalar values within it
fn main() {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("fixtures/json/valid/blog_entries.json"));
    let parser = Parser::with_encoding(Encoding::Utf8);
    match parser.parse_file(&path) {
        Ok(root) => dump(&root, &mut JsonPointer::default()),
        Err(err) => eprintln!("{}: {}", path, err),
    }
}
