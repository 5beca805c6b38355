//! The string-aware lexer. Pulls raw tokens from a [Tokenizer], drops insignificant whitespace
//! and reassembles quoted runs of tokens into single, escape-decoded lexemes.
//!
//! A decoded string lexeme retains its surrounding quote characters, so that the parser can
//! distinguish `"1"` from `1`. The empty lexeme signals the end of the input.
use tracing::trace;

use crate::errors::{ParserErrorDetails, ParserResult};
use crate::lexer_error;
use crate::tokenizer::{is_whitespace, Tokenizer};

/// Default string buffer capacity
const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Number of hex digits within a `\u` escape
const UNICODE_ESCAPE_DIGITS: usize = 4;

/// Range of high (leading) UTF-16 surrogates
const HIGH_SURROGATES: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;

/// Range of low (trailing) UTF-16 surrogates
const LOW_SURROGATES: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Check whether a raw token opens (and therefore closes) a string run
#[inline]
fn is_quote(token: &str) -> bool {
    matches!(token, "\"" | "'" | "`")
}

/// What the lexer is currently looking at
#[derive(Debug, Copy, Clone, PartialEq)]
enum Current<'a> {
    /// Nothing more in the input
    EndOfInput,
    /// A raw token, passed straight through from the tokenizer
    Raw(&'a str),
    /// A decoded string run, held in the lexer buffer
    Decoded,
}

/// A lexer which sits on top of a [Tokenizer], producing one meaningful lexeme at a time
#[derive(Debug)]
pub struct Lexer<'a> {
    /// Source of raw tokens
    tokens: Tokenizer<'a>,
    /// Internal buffer for hoovering up decoded strings from the input
    buffer: String,
    /// The current lexeme
    current: Current<'a>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over some input text. The lexer isn't primed, so [Lexer::advance]
    /// must be called before the first lexeme is available
    pub fn new(input: &'a str) -> Self {
        Lexer {
            tokens: Tokenizer::new(input),
            buffer: String::with_capacity(DEFAULT_BUFFER_CAPACITY),
            current: Current::EndOfInput,
        }
    }

    /// The current lexeme, or the empty string at the end of the input
    pub fn current(&self) -> &str {
        match self.current {
            Current::EndOfInput => "",
            Current::Raw(token) => token,
            Current::Decoded => &self.buffer,
        }
    }

    /// Whether the lexer has run out of input
    pub fn is_end_of_input(&self) -> bool {
        self.current == Current::EndOfInput
    }

    /// Move on to the next meaningful lexeme. Whitespace between lexemes is skipped, and quoted
    /// strings are decoded in their entirety
    pub fn advance(&mut self) -> ParserResult<()> {
        self.current = match self.tokens.by_ref().find(|t| !is_whitespace(t)) {
            None => Current::EndOfInput,
            Some(quote) if is_quote(quote) => {
                self.match_string(quote)?;
                Current::Decoded
            }
            Some(token) => Current::Raw(token),
        };
        trace!(lexeme = self.current(), "advanced lexer");
        Ok(())
    }

    /// Accumulate a complete string run into the buffer, up to and including the closing quote
    fn match_string(&mut self, quote: &'a str) -> ParserResult<()> {
        self.buffer.clear();
        self.buffer.push_str(quote);
        loop {
            match self.tokens.next() {
                Some(token) if token == quote => {
                    self.buffer.push_str(token);
                    return Ok(());
                }
                Some(token) if token.starts_with('\\') => self.match_escape_sequence(token)?,
                Some(token) => self.buffer.push_str(token),
                None => {
                    return lexer_error!(ParserErrorDetails::UnterminatedString(
                        self.buffer.clone()
                    ))
                }
            }
        }
    }

    /// Translate a two character escape sequence into the buffer. Unknown escapes are copied
    /// across verbatim
    fn match_escape_sequence(&mut self, escape: &'a str) -> ParserResult<()> {
        let decoded = match escape {
            "\\a" => '\x07',
            "\\b" => '\x08',
            "\\f" => '\x0C',
            "\\n" => '\n',
            "\\r" => '\r',
            "\\t" => '\t',
            "\\v" => '\x0B',
            "\\\"" => '"',
            "\\'" => '\'',
            "\\\\" => '\\',
            "\\?" => '?',
            "\\/" => '/',
            "\\u" => return self.match_unicode_escape_sequence(),
            _ => {
                self.buffer.push_str(escape);
                return Ok(());
            }
        };
        self.buffer.push(decoded);
        Ok(())
    }

    /// Decode a `\uXXXX` sequence, or a pair of them if the first is a high surrogate
    fn match_unicode_escape_sequence(&mut self) -> ParserResult<()> {
        let (high, rest) = self.match_hex_digits()?;
        if !HIGH_SURROGATES.contains(&high) {
            return self.push_code_point(high, rest);
        }
        let paired = rest.is_empty() && self.tokens.next() == Some("\\u");
        if !paired {
            return lexer_error!(ParserErrorDetails::InvalidUnicodeEscape(format!(
                "\\u{:04X}{}",
                high, rest
            )));
        }
        let (low, rest) = self.match_hex_digits()?;
        if !LOW_SURROGATES.contains(&low) {
            return lexer_error!(ParserErrorDetails::InvalidUnicodeEscape(format!(
                "\\u{:04X}\\u{:04X}",
                high, low
            )));
        }
        self.push_code_point(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00), rest)
    }

    /// Read the four hex digits which follow a `\u`. Returns the decoded value along with any
    /// characters trailing the digits within the same raw token
    fn match_hex_digits(&mut self) -> ParserResult<(u32, &'a str)> {
        let token = self.tokens.next().unwrap_or_default();
        let digits = token
            .get(..UNICODE_ESCAPE_DIGITS)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()));
        match digits.and_then(|d| u32::from_str_radix(d, 16).ok()) {
            Some(value) => Ok((value, &token[UNICODE_ESCAPE_DIGITS..])),
            None => lexer_error!(ParserErrorDetails::InvalidUnicodeEscape(format!(
                "\\u{}",
                token
            ))),
        }
    }

    /// Append the UTF-8 encoding of a code point, followed by any trailing literal characters
    fn push_code_point(&mut self, code: u32, trailing: &str) -> ParserResult<()> {
        match char::from_u32(code) {
            Some(c) => {
                self.buffer.push(c);
                self.buffer.push_str(trailing);
                Ok(())
            }
            None => lexer_error!(ParserErrorDetails::InvalidUnicodeEscape(format!(
                "\\u{:04X}",
                code
            ))),
        }
    }
}
