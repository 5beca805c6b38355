//! The parser itself operates over `&str` input. When parsing raw bytes (or files) the bytes are
//! first run through a decoder which converts them into a stream of `char`s.
//!
//! The [DecoderSelector] implemented within this module is used to instantiate new `char`
//! iterators, based on different encodings. (Currently only ASCII and UTF-8 are supported).
use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};
use std::io::{BufRead, BufReader};

use crate::errors::{ParserErrorDetails, ParserResult};
use crate::lexer_error;

/// Enumeration of different supported encoding types
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
}

/// A struct that is essentially a factory for creating new instances of [char] iterators,
/// based on a specified encoding type
#[derive(Debug, Default)]
pub(crate) struct DecoderSelector {}

impl DecoderSelector {
    /// Create and return an instance of a given byte decoder / char iterator based on a specific
    /// encoding
    pub fn new_decoder<'a, Buffer: BufRead>(
        &'a self,
        buffer: &'a mut Buffer,
        encoding: Encoding,
    ) -> Box<dyn Iterator<Item = char> + 'a> {
        match encoding {
            Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
            Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
        }
    }

    /// Decode a complete byte buffer into a [String]. Decoders stop at the first byte sequence
    /// they can't handle, so a decoded text that is shorter than its input means the input
    /// wasn't valid for the encoding
    pub fn decode_bytes(&self, bytes: &[u8], encoding: Encoding) -> ParserResult<String> {
        let mut reader = BufReader::new(bytes);
        let text: String = self.new_decoder(&mut reader, encoding).collect();
        if text.len() == bytes.len() {
            Ok(text)
        } else {
            lexer_error!(ParserErrorDetails::InvalidEncoding)
        }
    }
}
