//! Record data for the TXT record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::rdata::{FieldError, FieldValue, ParseRdata, Rdata, Replace, ScanRdata};
use crate::base::scan::{ScanContext, SyntaxError, Tokenizer};
use crate::base::wire::{ComposeError, Composer, FormError, ParseError};
use crate::base::zonefile_fmt::Presenter;
use crate::utils::freeze::Freeze;
use bytes::Bytes;
use octseq::parse::Parser;
use std::sync::Arc;
use thiserror::Error;

//------------ Txt ----------------------------------------------------------

/// TXT record data.
///
/// TXT records hold descriptive text. The data consists of one or more
/// character strings of up to 255 octets each.
///
/// The TXT record type is defined in [RFC 1035, section 3.3.14][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.14
#[derive(Clone, Debug)]
pub struct Txt {
    class: Class,
    strings: Arc<[Bytes]>,
}

impl Txt {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::TXT;

    /// Creates new TXT record data for class IN.
    pub fn new(strings: impl Freeze<Frozen = Arc<[Bytes]>>) -> Result<Self, TxtError> {
        Self::with_class(Class::IN, strings)
    }

    /// Creates new TXT record data for the given class.
    pub fn with_class(
        class: Class,
        strings: impl Freeze<Frozen = Arc<[Bytes]>>,
    ) -> Result<Self, TxtError> {
        let strings = strings.freeze();
        Self::check(&strings)?;
        Ok(Txt { class, strings })
    }

    fn check(strings: &[Bytes]) -> Result<(), TxtError> {
        if strings.is_empty() {
            return Err(TxtError::Empty);
        }
        if strings.iter().any(|s| s.len() > 255) {
            return Err(TxtError::LongString);
        }
        Ok(())
    }

    /// Returns the character strings.
    #[must_use]
    pub fn strings(&self) -> &[Bytes] {
        &self.strings
    }

    /// Returns all character strings concatenated.
    #[must_use]
    pub fn text(&self) -> Vec<u8> {
        self.strings.concat()
    }

    pub fn with_strings(
        &self,
        strings: impl Freeze<Frozen = Arc<[Bytes]>>,
    ) -> Result<Self, TxtError> {
        Self::with_class(self.class, strings)
    }
}

//--- Rdata, ParseRdata, ScanRdata

impl Rdata for Txt {
    fn class(&self) -> Class {
        self.class
    }

    fn rtype(&self) -> Rtype {
        Txt::RTYPE
    }

    fn fmt_rdata(&self, p: &mut Presenter<'_>) {
        for s in self.strings.iter() {
            p.write_quoted(s);
        }
    }

    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError> {
        for s in self.strings.iter() {
            target.append_charstr(s)?;
        }
        Ok(())
    }
}

impl ParseRdata for Txt {
    fn parse_rdata(
        class: Class,
        _rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        _origin: Option<&Name>,
    ) -> Result<Self, ParseError> {
        let mut strings = Vec::new();
        while parser.remaining() > 0 {
            let len = usize::from(parser.parse_u8()?);
            let mut buf = vec![0u8; len];
            parser.parse_buf(&mut buf)?;
            strings.push(Bytes::from(buf));
        }
        if strings.is_empty() {
            return Err(FormError::new("empty TXT record").into());
        }
        Ok(Txt {
            class,
            strings: strings.freeze(),
        })
    }
}

impl ScanRdata for Txt {
    fn scan_rdata(
        class: Class,
        _rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        _ctx: &ScanContext,
    ) -> Result<Self, SyntaxError> {
        let mut strings = Vec::new();
        loop {
            let token = tokens.get()?;
            if token.is_eol_or_eof() {
                break;
            }
            tokens.unget(token)?;
            strings.push(tokens.get_string()?);
        }
        Self::with_class(class, strings).map_err(|err| tokens.error(err.to_string()))
    }
}

//--- Replace

impl Replace for Txt {
    const FIELDS: &'static [&'static str] = &["strings"];

    fn replace_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match (name, value) {
            ("strings", FieldValue::Strings(strings)) => {
                *self = self
                    .with_strings(strings)
                    .map_err(|err| FieldError::invalid(name, err))?;
                Ok(())
            }
            (name, _) => Err(FieldError::kind(name)),
        }
    }
}

rdata_impls!(Txt);

//------------ TxtError ------------------------------------------------------

/// TXT record data could not be created.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum TxtError {
    #[error("TXT record data needs at least one string")]
    Empty,

    #[error("character string exceeds 255 octets")]
    LongString,
}

//============ Testing =======================================================
