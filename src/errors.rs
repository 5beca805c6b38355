//! General error types for the lexer and parser

use thiserror::Error;

/// Global result type used throughout the parser stages
pub type ParserResult<T> = Result<T, ParserError>;

/// Enumeration of the various different parser stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// The string-aware lexer
    Lexer,
    /// The recursive-descent DOM parser
    Parser,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexer => write!(f, "lexer"),
            Self::Parser => write!(f, "parser"),
        }
    }
}

/// A global enumeration of error codes. Where it makes sense, the offending lexeme is carried
/// along with the code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserErrorDetails {
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("illegal identifier '{0}', object keys must be double-quoted strings")]
    IllegalIdentifier(String),
    #[error("expected ':' but found '{0}'")]
    ExpectedColon(String),
    #[error("expected ',' or '}}' but found '{0}'")]
    ExpectedCommaOrBrace(String),
    #[error("expected ',' or ']' but found '{0}'")]
    ExpectedCommaOrBracket(String),
    #[error("illegal string '{0}'")]
    IllegalString(String),
    #[error("illegal number '{0}'")]
    IllegalNumber(String),
    #[error("unterminated string '{0}'")]
    UnterminatedString(String),
    #[error("invalid unicode escape sequence '{0}'")]
    InvalidUnicodeEscape(String),
    #[error("unexpected trailing content '{0}'")]
    TrailingContent(String),
    #[error("nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),
    #[error("duplicate object key '{0}'")]
    DuplicateKey(String),
    #[error("unable to read file '{0}'")]
    InvalidFile(String),
    #[error("input is not valid for the selected encoding")]
    InvalidEncoding,
}

/// The general error structure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} error: {details}")]
pub struct ParserError {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: ParserErrorDetails,
}

#[macro_export]
macro_rules! lexer_error {
    ($details: expr) => {
        Err($crate::errors::ParserError {
            stage: $crate::errors::Stage::Lexer,
            details: $details,
        })
    };
}

#[macro_export]
macro_rules! parser_error {
    ($details: expr) => {
        Err($crate::errors::ParserError {
            stage: $crate::errors::Stage::Parser,
            details: $details,
        })
    };
}

#[cfg(test)]
mod tests {
    use crate::errors::{ParserError, ParserErrorDetails, ParserResult, Stage};

    #[test]
    fn errors_should_render_their_stage_and_lexeme() {
        let result: ParserResult<()> =
            parser_error!(ParserErrorDetails::ExpectedColon(String::from("1")));
        let err = result.unwrap_err();
        assert_eq!(err.stage, Stage::Parser);
        assert_eq!(err.to_string(), "parser error: expected ':' but found '1'");
    }

    #[test]
    fn brace_errors_should_escape_formatting() {
        let err = ParserError {
            stage: Stage::Parser,
            details: ParserErrorDetails::ExpectedCommaOrBrace(String::from("]")),
        };
        assert_eq!(err.to_string(), "parser error: expected ',' or '}' but found ']'");
    }
}
