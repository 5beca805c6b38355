/// The parser is a recursive-descent DOM parser which drives the string-aware lexer and builds a
/// complete [JsonValue](crate::JsonValue) tree for the supplied input.
///
/// Behaviour for the corners of the grammar which are commonly treated differently between
/// parsers is controlled through [ParserOptions].

/// The DOM-based parser
pub mod dom;

/// What to do when an object contains the same key more than once
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// The last occurrence wins, earlier values are released
    #[default]
    Overwrite,
    /// A repeated key fails the parse
    Reject,
}

/// Default limit on how deeply arrays and objects may nest
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration for a [Parser](dom::Parser)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Policy for repeated object keys
    pub duplicate_keys: DuplicateKeys,
    /// When set, anything following the root value is ignored rather than reported
    pub allow_trailing_content: bool,
    /// Maximum number of nested arrays/objects. The parser recurses once per level
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            duplicate_keys: DuplicateKeys::default(),
            allow_trailing_content: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserOptions {
    /// Set the policy for repeated object keys
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Allow (or disallow) content after the root value
    pub fn with_trailing_content(mut self, allow: bool) -> Self {
        self.allow_trailing_content = allow;
        self
    }

    /// Set the maximum nesting depth of arrays and objects
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
