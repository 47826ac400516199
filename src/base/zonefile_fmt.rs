//! Writing record data in zone file presentation format.

use super::name::Name;
use crate::utils::{base16, base64, text};
use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//------------ TextOptions ---------------------------------------------------

/// Options for the presentation format of record data.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextOptions {
    /// The number of characters after which hex and base64 fields are
    /// broken into separate tokens.
    ///
    /// If `None`, each record type uses its own default. A value of zero
    /// disables breaking.
    pub chunk_size: Option<usize>,
}

impl TextOptions {
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        TextOptions {
            chunk_size: Some(chunk_size),
        }
    }
}

//------------ Presenter -----------------------------------------------------

/// Collects the presentation format tokens of record data.
///
/// This writer does not do any alignment and squeezes the record data onto
/// a single line with tokens separated by a single space.
pub struct Presenter<'a> {
    out: String,
    first: bool,
    origin: Option<&'a Name>,
    relativize: bool,
    options: &'a TextOptions,
}

impl<'a> Presenter<'a> {
    pub fn new(
        origin: Option<&'a Name>,
        relativize: bool,
        options: &'a TextOptions,
    ) -> Self {
        Presenter {
            out: String::new(),
            first: true,
            origin,
            relativize,
            options,
        }
    }

    /// Push a token.
    pub fn fmt_token(&mut self, args: fmt::Arguments<'_>) {
        if !self.first {
            self.out.push(' ');
        }
        self.first = false;
        self.out.push_str(&std::fmt::format(args));
    }

    /// Push a token from anything displayable.
    pub fn write_token(&mut self, token: impl fmt::Display) {
        self.fmt_token(format_args!("{}", token))
    }

    /// Push a domain name, relative to the origin if requested.
    pub fn write_name(&mut self, name: &Name) {
        match self.origin {
            Some(origin) if self.relativize => {
                self.write_token(name.relativize(origin))
            }
            _ => self.write_token(name),
        }
    }

    /// Push a quoted character string.
    pub fn write_quoted(&mut self, data: &[u8]) {
        self.fmt_token(format_args!("\"{}\"", text::escape_text(data)))
    }

    /// Push data as hex, broken into chunks.
    ///
    /// `default_chunk` applies unless the options override it.
    pub fn write_hex(&mut self, data: &[u8], default_chunk: usize) {
        let chunk = self.options.chunk_size.unwrap_or(default_chunk);
        self.write_token(base16::hexify(data, chunk))
    }

    /// Push data as base64, broken into chunks.
    pub fn write_base64(&mut self, data: &[u8], default_chunk: usize) {
        let chunk = self.options.chunk_size.unwrap_or(default_chunk);
        self.write_token(base64::base64ify(data, chunk))
    }

    /// Returns the text written so far.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn tokens_and_names() {
        let origin = Name::from_str("example.com.").unwrap();
        let options = TextOptions::default();
        let mut p = Presenter::new(Some(&origin), true, &options);
        p.write_token(10);
        p.write_name(&Name::from_str("mail.example.com.").unwrap());
        p.write_name(&Name::from_str("example.com.").unwrap());
        p.write_quoted(b"a\"b");
        assert_eq!(p.finish(), "10 mail @ \"a\\\"b\"");

        let mut p = Presenter::new(Some(&origin), false, &options);
        p.write_name(&Name::from_str("mail.example.com.").unwrap());
        assert_eq!(p.finish(), "mail.example.com.");
    }

    #[test]
    fn chunk_override() {
        let options = TextOptions::with_chunk_size(0);
        let mut p = Presenter::new(None, false, &options);
        p.write_hex(&[0xab; 20], 4);
        assert_eq!(p.finish(), "ab".repeat(20));

        let options = TextOptions::default();
        let mut p = Presenter::new(None, false, &options);
        p.write_hex(&[0xab; 3], 4);
        assert_eq!(p.finish(), "abab ab");
    }
}
