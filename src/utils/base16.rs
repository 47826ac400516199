//! Decoding and encoding of Base 16 a.k.a. hex digits.
//!
//! The Base 16 encoding is defined in [RFC 4648]. It really is just a normal
//! hex-encoding using the (case-insensitive) letters ‘A’ to ‘F’ as
//! additional values for the digits.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use super::break_into_chunks;

//------------ Re-exports ----------------------------------------------------

pub use super::base64::DecodeError;

//------------ Constants -----------------------------------------------------

/// The default number of characters between breaks in hex output.
pub const CHUNK_SIZE: usize = 32;

//------------ Convenience Functions -----------------------------------------

/// Encodes binary data in lowercase Base 16.
///
/// A space is inserted every `chunk_size` characters. If `chunk_size` is
/// zero, the output is not broken up.
#[must_use]
pub fn hexify(data: &[u8], chunk_size: usize) -> String {
    break_into_chunks(hex::encode(data), chunk_size)
}

/// Decodes a string with Base 16 encoded data.
///
/// Both upper and lower case digits are accepted.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    hex::decode(s).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, .. } => DecodeError::IllegalChar(c),
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            DecodeError::ShortInput
        }
    })
}

//============ Test ==========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hexify_chunks() {
        let data: Vec<u8> = (0..20).collect();
        assert_eq!(
            hexify(&data, CHUNK_SIZE),
            "000102030405060708090a0b0c0d0e0f 10111213"
        );
        assert_eq!(hexify(&data, 0), "000102030405060708090a0b0c0d0e0f10111213");
        assert_eq!(hexify(b"", CHUNK_SIZE), "");
        assert_eq!(hexify(&[0xAB, 0xCD], 2), "ab cd");
    }

    #[test]
    fn decode_str() {
        assert_eq!(decode("C0000201").unwrap(), b"\xc0\x00\x02\x01");
        assert_eq!(decode("abc"), Err(DecodeError::ShortInput));
        assert_eq!(decode("zz"), Err(DecodeError::IllegalChar('z')));
    }
}
