//! A representation of a JSON Pointer with associated operations, as per RFC 6901
//!
//! Pointers are used to address individual nodes within a parsed [JsonValue] tree.
use std::fmt::Display;

use crate::JsonValue;

/// Each pointer is a series of segments delineated by a separator char
const PATH_SEPARATOR: char = '/';
/// As per the RFC, we need to encode any tilde characters as ~0
const ENCODED_TILDE: &str = "~0";
/// As per the RFC, we need to encode any slash characters as ~1
const ENCODED_SLASH: &str = "~1";

/// A pointer is made of named or indexed components
#[derive(Debug, Clone, PartialEq)]
pub enum JsonPointerComponent {
    /// A named element within a pointer. Names which look like numbers also address array
    /// elements
    Name(String),
    /// An indexed element within a pointer
    Index(usize),
}

impl JsonPointerComponent {
    /// Step from `value` into the child addressed by this component
    fn step<'v>(&self, value: &'v JsonValue) -> Option<&'v JsonValue> {
        match (self, value) {
            (Self::Name(name), JsonValue::Object(fields)) => fields.get(name),
            (Self::Name(name), JsonValue::Array(values)) => values.get(array_index(name)?),
            (Self::Index(index), JsonValue::Array(values)) => values.get(*index),
            (Self::Index(index), JsonValue::Object(fields)) => fields.get(&index.to_string()),
            _ => None,
        }
    }

    /// Step from `value` into the child addressed by this component, mutably
    fn step_mut<'v>(&self, value: &'v mut JsonValue) -> Option<&'v mut JsonValue> {
        match (self, value) {
            (Self::Name(name), JsonValue::Object(fields)) => fields.get_mut(name),
            (Self::Name(name), JsonValue::Array(values)) => values.get_mut(array_index(name)?),
            (Self::Index(index), JsonValue::Array(values)) => values.get_mut(*index),
            (Self::Index(index), JsonValue::Object(fields)) => fields.get_mut(&index.to_string()),
            _ => None,
        }
    }
}

/// Array indices within a pointer are plain decimal numbers without leading zeros
fn array_index(name: &str) -> Option<usize> {
    let well_formed = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_digit())
        && (name == "0" || !name.starts_with('0'));
    if well_formed {
        name.parse().ok()
    } else {
        None
    }
}

impl Display for JsonPointerComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(s) => write!(
                f,
                "{}",
                s.replace('~', ENCODED_TILDE).replace('/', ENCODED_SLASH)
            ),
            Self::Index(i) => write!(f, "{}", i),
        }
    }
}

/// A structure representing a complete pointer, comprising multiple [JsonPointerComponent]s
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonPointer {
    /// The components that go together to make up the pointer
    components: Vec<JsonPointerComponent>,
}

impl JsonPointer {
    /// Parse the textual form of a pointer. The empty string addresses the whole document,
    /// anything else must begin with a `/`
    pub fn parse(pointer: &str) -> Option<Self> {
        if pointer.is_empty() {
            return Some(JsonPointer::default());
        }
        let rest = pointer.strip_prefix(PATH_SEPARATOR)?;
        let components = rest
            .split(PATH_SEPARATOR)
            .map(|s| {
                JsonPointerComponent::Name(
                    s.replace(ENCODED_SLASH, "/").replace(ENCODED_TILDE, "~"),
                )
            })
            .collect();
        Some(JsonPointer { components })
    }

    /// Returns the number of [JsonPointerComponent]s within the pointer
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Checks whether the pointer is the empty pointer
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Push a new [JsonPointerComponent::Name] onto the end of the pointer
    pub fn push_name<S: Into<String>>(&mut self, name: S) {
        self.components.push(JsonPointerComponent::Name(name.into()))
    }

    /// Push a new [JsonPointerComponent::Index] onto the end of the pointer
    pub fn push_index(&mut self, index: usize) {
        self.components.push(JsonPointerComponent::Index(index))
    }

    /// Pop the last component off the back of the pointer
    pub fn pop(&mut self) -> Option<JsonPointerComponent> {
        self.components.pop()
    }

    /// Follow the pointer from `root`, returning the addressed value if there is one
    pub fn resolve<'v>(&self, root: &'v JsonValue) -> Option<&'v JsonValue> {
        self.components
            .iter()
            .try_fold(root, |value, component| component.step(value))
    }

    /// Follow the pointer from `root`, returning a mutable reference to the addressed value
    pub fn resolve_mut<'v>(&self, root: &'v mut JsonValue) -> Option<&'v mut JsonValue> {
        self.components
            .iter()
            .try_fold(root, |value, component| component.step_mut(value))
    }

    /// Serialise the pointer into a string representation that's compliant with RFC 6901
    pub fn as_str(&self) -> String {
        self.components
            .iter()
            .map(|c| format!("{}{}", PATH_SEPARATOR, c))
            .collect()
    }
}

impl Display for JsonPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonPointer, JsonPointerComponent};
    use crate::JsonValue;

    #[test]
    fn an_empty_pointer_should_be_represented_by_an_empty_string() {
        let s = JsonPointer::default().as_str();
        assert_eq!(s, "")
    }

    #[test]
    fn pointers_should_serialise_with_escapes_correctly() {
        let mut s = JsonPointer::default();
        s.push_name("a/b");
        s.push_name("c~d");
        s.push_index(3);
        assert_eq!("/a~1b/c~0d/3", s.as_str())
    }

    #[test]
    fn parsing_should_undo_escapes() {
        let p = JsonPointer::parse("/a~1b/c~0d/~01").unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.as_str(), "/a~1b/c~0d/~01");
        assert!(JsonPointer::parse("no-leading-slash").is_none());
        assert!(JsonPointer::parse("").unwrap().is_empty());
    }

    #[test]
    fn popping_should_shorten_pointers_correctly() {
        let mut s = JsonPointer::default();
        s.push_name("a");
        s.push_name("b");
        assert_eq!(s.pop(), Some(JsonPointerComponent::Name(String::from("b"))));
        assert_eq!("/a", s.as_str())
    }

    #[test]
    fn numeric_names_should_index_arrays_but_not_with_leading_zeros() {
        let mut array = JsonValue::empty_array();
        array.push(JsonValue::Number(10.0));
        array.push(JsonValue::Number(11.0));
        let mut root = JsonValue::empty_object();
        root.insert_field("01", JsonValue::Boolean(true));
        root.insert_field("xs", array);
        assert_eq!(root.pointer("/xs/1"), Some(&JsonValue::Number(11.0)));
        assert!(root.pointer("/xs/01").is_none());
        assert_eq!(root.pointer("/01"), Some(&JsonValue::Boolean(true)));
        assert!(root.pointer("/xs/1/deeper").is_none());
    }
}
