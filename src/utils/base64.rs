//! Decoding and encoding of Base 64.
//!
//! The Base 64 encoding is defined in [RFC 4648]. Record data uses the
//! standard alphabet with padding.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use super::break_into_chunks;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

//------------ Constants -----------------------------------------------------

/// The default number of characters between breaks in base 64 output.
pub const CHUNK_SIZE: usize = 32;

//------------ Convenience Functions -----------------------------------------

/// Encodes binary data in Base 64.
///
/// A space is inserted every `chunk_size` characters. If `chunk_size` is
/// zero, the output is not broken up.
#[must_use]
pub fn base64ify(data: &[u8], chunk_size: usize) -> String {
    break_into_chunks(STANDARD.encode(data), chunk_size)
}

/// Decodes a string with Base 64 encoded data.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(s).map_err(|err| match err {
        base64::DecodeError::InvalidByte(_, ch)
        | base64::DecodeError::InvalidLastSymbol(_, ch) => {
            DecodeError::IllegalChar(char::from(ch))
        }
        base64::DecodeError::InvalidLength(..) => DecodeError::ShortInput,
        base64::DecodeError::InvalidPadding => DecodeError::TrailingInput,
    })
}

//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding a base 64 or base 16 encoded string.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    /// A character was pushed that isn’t allowed in the encoding.
    #[error("illegal character '{0}'")]
    IllegalChar(char),

    /// There was trailing data after a padding sequence.
    #[error("trailing input")]
    TrailingInput,

    /// The input ended with an incomplete sequence.
    #[error("incomplete input")]
    ShortInput,
}

//============ Test ==========================================================
