//! Escaping of character strings for presentation format.

/// Escapes octets for use inside a quoted character string.
///
/// Printable ASCII characters are kept except for `"` and `\` which are
/// escaped with a backslash. All other octets become a `\DDD` decimal
/// escape.
#[must_use]
pub fn escape_text(data: &[u8]) -> String {
    let mut res = String::with_capacity(data.len());
    for &ch in data {
        match ch {
            b'"' | b'\\' => {
                res.push('\\');
                res.push(char::from(ch));
            }
            0x20..=0x7E => res.push(char::from(ch)),
            _ => res.push_str(&format!("\\{:03}", ch)),
        }
    }
    res
}

//============ Test ==========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn escapes() {
        assert_eq!(escape_text(b"ab\"c\x00"), "ab\\\"c\\000");
        assert_eq!(escape_text(b"a\\b c~"), "a\\\\b c~");
        assert_eq!(escape_text(b"\x7f\xff\n"), "\\127\\255\\010");
        assert_eq!(escape_text(b""), "");
    }
}
