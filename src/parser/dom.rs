//! The DOM parser
//!
//! A recursive-descent parser which pulls lexemes from a [Lexer] and builds a [JsonValue] tree.
//! Each call to `parse_value` handles exactly one value and leaves the lexer positioned on the
//! last lexeme of that value; the caller is responsible for advancing past it.
use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{ParserError, ParserErrorDetails, ParserResult};
use crate::lexer::Lexer;
use crate::parser::{DuplicateKeys, ParserOptions};
use crate::{parser_error, JsonValue};

/// Strip the surrounding double quotes from a decoded string lexeme
fn strip_quotes(lexeme: &str) -> Option<&str> {
    if lexeme.len() >= 2 && lexeme.starts_with('"') && lexeme.ends_with('"') {
        Some(&lexeme[1..lexeme.len() - 1])
    } else {
        None
    }
}

/// Consume a run of ascii digits, returning how many were found
fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Check a lexeme against the JSON number grammar. `fast_float` is more forgiving than JSON
/// (leading zeros, bare fractions, `inf` etc...) so the shape is checked up front
fn is_json_number(lexeme: &str) -> bool {
    let mut rest = lexeme.as_bytes();
    if let [b'-', tail @ ..] = rest {
        rest = tail;
    }
    let int = digits(rest);
    if int == 0 || (int > 1 && rest[0] == b'0') {
        return false;
    }
    rest = &rest[int..];
    if let [b'.', tail @ ..] = rest {
        let frac = digits(tail);
        if frac == 0 {
            return false;
        }
        rest = &tail[frac..];
    }
    if let [b'e' | b'E', tail @ ..] = rest {
        let tail = match tail {
            [b'+' | b'-', signed @ ..] => signed,
            _ => tail,
        };
        let exp = digits(tail);
        if exp == 0 {
            return false;
        }
        rest = &tail[exp..];
    }
    rest.is_empty()
}

/// The outcome of a parse: the tree (complete, or as far as the parse got), a validity flag and
/// on failure the error which stopped the parse
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The root of the tree
    root: JsonValue,
    /// The first error encountered, if any
    error: Option<ParserError>,
}

impl Document {
    /// Parse some text using the default [Parser]
    pub fn parse(text: &str) -> Self {
        Parser::default().parse_document(text)
    }

    /// Did the parse succeed?
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// A diagnostic message describing why the parse failed
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(|err| err.to_string())
    }

    /// The error which stopped the parse
    pub fn error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    /// The root of the (possibly partial) tree
    pub fn root(&self) -> &JsonValue {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut JsonValue {
        &mut self.root
    }

    /// Take ownership of the tree, regardless of whether the parse succeeded
    pub fn into_root(self) -> JsonValue {
        self.root
    }

    /// Convert into a [ParserResult], discarding any partial tree on failure
    pub fn into_result(self) -> ParserResult<JsonValue> {
        match self.error {
            None => Ok(self.root),
            Some(err) => Err(err),
        }
    }
}

/// Main JSON parser struct
#[derive(Debug, Default)]
pub struct Parser {
    decoders: DecoderSelector,
    encoding: Encoding,
    options: ParserOptions,
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Default::default()
        }
    }

    /// Create a new instance of the parser using specific [ParserOptions]
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// The options in use by this parser
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Read and parse the contents of a file, decoding it with the configured [Encoding]
    pub fn parse_file<PathLike: AsRef<Path>>(&self, path: PathLike) -> ParserResult<JsonValue> {
        match fs::read(&path) {
            Ok(bytes) => self.parse_bytes(&bytes),
            Err(err) => {
                debug!(path = %path.as_ref().display(), error = %err, "failed to read input file");
                parser_error!(ParserErrorDetails::InvalidFile(
                    path.as_ref().display().to_string()
                ))
            }
        }
    }

    /// Decode and parse a byte buffer
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<JsonValue> {
        let text = self.decoders.decode_bytes(bytes, self.encoding)?;
        self.parse_str(&text)
    }

    pub fn parse_str(&self, text: &str) -> ParserResult<JsonValue> {
        self.parse_document(text).into_result()
    }

    /// Parse some text into a [Document]. The document always carries a tree, even when the
    /// parse fails part way through
    pub fn parse_document(&self, text: &str) -> Document {
        let mut root = JsonValue::empty_object();
        let error = self.parse_into(text, &mut root).err();
        match &error {
            None => debug!(bytes = text.len(), root = root.kind(), "parsed document"),
            Some(err) => debug!(bytes = text.len(), error = %err, "failed to parse document"),
        }
        Document { root, error }
    }

    /// Parse exactly one root value into `root`, then check for anything left over
    fn parse_into(&self, text: &str, root: &mut JsonValue) -> ParserResult<()> {
        let mut lexer = Lexer::new(text);
        lexer.advance()?;
        self.parse_value(&mut lexer, root, 0)?;
        if self.options.allow_trailing_content {
            return Ok(());
        }
        lexer.advance()?;
        if lexer.is_end_of_input() {
            Ok(())
        } else {
            parser_error!(ParserErrorDetails::TrailingContent(
                lexer.current().to_string()
            ))
        }
    }

    /// Parse a single value into `target`. `depth` is the number of containers enclosing it
    fn parse_value(
        &self,
        lexer: &mut Lexer,
        target: &mut JsonValue,
        depth: usize,
    ) -> ParserResult<()> {
        if lexer.is_end_of_input() {
            return parser_error!(ParserErrorDetails::EndOfInput);
        }
        match lexer.current() {
            "{" => self.parse_object(lexer, target, self.enter_container(depth)?),
            "[" => self.parse_array(lexer, target, self.enter_container(depth)?),
            scalar => self.parse_scalar(scalar, target),
        }
    }

    /// Check that opening another container stays within the configured nesting limit
    fn enter_container(&self, depth: usize) -> ParserResult<usize> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return parser_error!(ParserErrorDetails::NestingTooDeep(self.options.max_depth));
        }
        Ok(depth)
    }

    /// An object is just a list of comma separated KV pairs
    fn parse_object(
        &self,
        lexer: &mut Lexer,
        target: &mut JsonValue,
        depth: usize,
    ) -> ParserResult<()> {
        *target = JsonValue::empty_object();
        lexer.advance()?;
        if lexer.current() == "}" {
            return Ok(());
        }
        loop {
            if lexer.is_end_of_input() {
                return parser_error!(ParserErrorDetails::EndOfInput);
            }
            let name = match strip_quotes(lexer.current()) {
                Some(name) => name.to_string(),
                None => {
                    return parser_error!(ParserErrorDetails::IllegalIdentifier(
                        lexer.current().to_string()
                    ))
                }
            };

            lexer.advance()?;
            match lexer.current() {
                ":" => lexer.advance()?,
                _ if lexer.is_end_of_input() => {
                    return parser_error!(ParserErrorDetails::EndOfInput)
                }
                other => {
                    return parser_error!(ParserErrorDetails::ExpectedColon(other.to_string()))
                }
            }

            if self.options.duplicate_keys == DuplicateKeys::Reject && target.get(&name).is_some()
            {
                return parser_error!(ParserErrorDetails::DuplicateKey(name));
            }
            let mut child = JsonValue::default();
            let parsed = self.parse_value(lexer, &mut child, depth);
            if let Some(superseded) = target.insert_field(name, child) {
                trace!(kind = superseded.kind(), "released value for duplicate key");
            }
            parsed?;

            lexer.advance()?;
            match lexer.current() {
                "," => lexer.advance()?,
                "}" => return Ok(()),
                _ if lexer.is_end_of_input() => {
                    return parser_error!(ParserErrorDetails::EndOfInput)
                }
                other => {
                    return parser_error!(ParserErrorDetails::ExpectedCommaOrBrace(
                        other.to_string()
                    ))
                }
            }
        }
    }

    /// An array is just a list of comma separated values
    fn parse_array(
        &self,
        lexer: &mut Lexer,
        target: &mut JsonValue,
        depth: usize,
    ) -> ParserResult<()> {
        *target = JsonValue::empty_array();
        lexer.advance()?;
        if lexer.current() == "]" {
            return Ok(());
        }
        loop {
            let mut child = JsonValue::default();
            let parsed = self.parse_value(lexer, &mut child, depth);
            target.push(child);
            parsed?;

            lexer.advance()?;
            match lexer.current() {
                "," => lexer.advance()?,
                "]" => return Ok(()),
                _ if lexer.is_end_of_input() => {
                    return parser_error!(ParserErrorDetails::EndOfInput)
                }
                other => {
                    return parser_error!(ParserErrorDetails::ExpectedCommaOrBracket(
                        other.to_string()
                    ))
                }
            }
        }
    }

    /// Strings, literals and numbers
    fn parse_scalar(&self, lexeme: &str, target: &mut JsonValue) -> ParserResult<()> {
        *target = match lexeme {
            s if s.starts_with('"') => match strip_quotes(s) {
                Some(content) => JsonValue::String(content.to_string()),
                None => return parser_error!(ParserErrorDetails::IllegalString(s.to_string())),
            },
            "null" => JsonValue::Null,
            "true" => JsonValue::Boolean(true),
            "false" => JsonValue::Boolean(false),
            n => match fast_float::parse::<f64, _>(n) {
                Ok(value) if value.is_finite() && is_json_number(n) => JsonValue::Number(value),
                _ => return parser_error!(ParserErrorDetails::IllegalNumber(n.to_string())),
            },
        };
        Ok(())
    }
}
