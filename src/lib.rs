//! A small JSON DOM parser built from three layers:
//!
//! - a delimiter-based [tokenizer] which chops text into raw tokens,
//! - a string-aware [lexer] which drops whitespace and decodes quoted strings,
//! - a recursive-descent [parser] which builds a [JsonValue] tree.
//!
//! ```
//! use chisel_dom::Document;
//!
//! let doc = Document::parse(r#"{"a": 1, "b": [1, 2, 3]}"#);
//! assert!(doc.is_valid());
//! assert_eq!(doc.root().pointer("/b/2").and_then(|v| v.as_f64()), Some(3.0));
//! ```
use std::collections::HashMap;

pub mod decoders;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod pointer;
pub mod tokenizer;
#[cfg(test)]
mod test_macros;

pub use crate::errors::{ParserError, ParserErrorDetails, ParserResult, Stage};
pub use crate::parser::dom::{Document, Parser};
pub use crate::parser::{DuplicateKeys, ParserOptions};

use crate::pointer::JsonPointer;

/// Basic enumeration of different Json values
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    /// Canonical null value. Freshly created nodes start out as null
    #[default]
    Null,
    /// Canonical boolean value
    Boolean(bool),
    /// Floating point numeric value
    Number(f64),
    /// Canonical string value
    String(String),
    /// Array of values, in source order
    Array(Vec<JsonValue>),
    /// Map of values. Iteration order is unspecified
    Object(HashMap<String, JsonValue>),
}

impl JsonValue {
    /// Create an empty array value
    pub fn empty_array() -> Self {
        JsonValue::Array(vec![])
    }

    /// Create an empty object value
    pub fn empty_object() -> Self {
        JsonValue::Object(HashMap::new())
    }

    /// The name of the variant, mainly for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Append a child value. If this value isn't already an array it becomes an empty one first,
    /// dropping whatever it held before
    pub fn push(&mut self, child: JsonValue) {
        if !self.is_array() {
            *self = JsonValue::empty_array();
        }
        if let JsonValue::Array(values) = self {
            values.push(child);
        }
    }

    /// Insert a field. If this value isn't already an object it becomes an empty one first.
    /// Any value previously stored under `key` is handed back to the caller
    pub fn insert_field<K: Into<String>>(&mut self, key: K, child: JsonValue) -> Option<JsonValue> {
        if !self.is_object() {
            *self = JsonValue::empty_object();
        }
        match self {
            JsonValue::Object(fields) => fields.insert(key.into(), child),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonValue::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, JsonValue>> {
        match self {
            JsonValue::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a field of an object value
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|fields| fields.get(key))
    }

    /// Look up a field of an object value, mutably
    pub fn get_mut(&mut self, key: &str) -> Option<&mut JsonValue> {
        match self {
            JsonValue::Object(fields) => fields.get_mut(key),
            _ => None,
        }
    }

    /// Look up an element of an array value
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array().and_then(|values| values.get(index))
    }

    /// Look up an element of an array value, mutably
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut JsonValue> {
        match self {
            JsonValue::Array(values) => values.get_mut(index),
            _ => None,
        }
    }

    /// Number of children held by a composite value. Scalars have no children
    pub fn len(&self) -> usize {
        match self {
            JsonValue::Array(values) => values.len(),
            JsonValue::Object(fields) => fields.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve an RFC 6901 pointer such as `/b/0` against this value
    pub fn pointer(&self, pointer: &str) -> Option<&JsonValue> {
        JsonPointer::parse(pointer)?.resolve(self)
    }

    /// Resolve an RFC 6901 pointer against this value, mutably
    pub fn pointer_mut(&mut self, pointer: &str) -> Option<&mut JsonValue> {
        JsonPointer::parse(pointer)?.resolve_mut(self)
    }
}
