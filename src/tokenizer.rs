//! Delimiter-based tokenizer. The tokenizer knows nothing about JSON beyond its delimiter table,
//! it simply chops the input into slices which are reinterpreted by the
//! [Lexer](crate::lexer::Lexer).
//!
//! Every byte of the input belongs to exactly one token, so concatenating the tokens yields the
//! original input.

/// The escape character. A backslash always pairs with the character that follows it
const ESCAPE: char = '\\';

/// The fixed set of single-character delimiters. Each of these is produced as a token of its own
pub const DELIMITERS: &[char] = &[
    '{', '}', '[', ']', ':', ',', '"', '\'', '`', ' ', '\t', '\r', '\n',
];

/// Check whether a given character is a member of [DELIMITERS]
#[inline]
pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Check whether a raw token is whitespace (or a bare newline) and therefore insignificant
/// outside of a string run
#[inline]
pub fn is_whitespace(token: &str) -> bool {
    matches!(token, " " | "\t" | "\r" | "\n")
}

/// An iterator over the raw tokens of some input text
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    /// The input text
    input: &'a str,
    /// Byte offset of the next unconsumed character
    offset: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer positioned at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Tokenizer { input, offset: 0 }
    }

    /// The portion of the input which hasn't yet been tokenized
    pub fn remaining(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// Length in bytes of the token at the front of `rest`
    fn token_length(rest: &str) -> usize {
        let mut chars = rest.char_indices();
        match chars.next() {
            None => 0,
            Some((_, ESCAPE)) => match chars.next() {
                Some((index, c)) => index + c.len_utf8(),
                None => ESCAPE.len_utf8(),
            },
            Some((_, c)) if is_delimiter(c) => c.len_utf8(),
            Some(_) => rest
                .find(|c: char| c == ESCAPE || is_delimiter(c))
                .unwrap_or(rest.len()),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.remaining();
        let length = Self::token_length(rest);
        if length == 0 {
            return None;
        }
        self.offset += length;
        Some(&rest[..length])
    }
}
