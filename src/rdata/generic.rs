//! Generic record data.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::rdata::{FieldError, FieldValue, ParseRdata, Rdata, Replace, ScanRdata};
use crate::base::scan::{ScanContext, SyntaxError, Tokenizer};
use crate::base::wire::{ComposeError, Composer, ParseError};
use crate::base::zonefile_fmt::Presenter;
use crate::utils::base16;
use crate::utils::freeze::Freeze;
use bytes::Bytes;
use octseq::parse::Parser;

//------------ Generic -------------------------------------------------------

/// Record data of any type as a plain octets sequence.
///
/// This type is used for all record types that do not have a specific
/// implementation. Its presentation format is the generic syntax defined
/// in [RFC 3597]: the token `\#` followed by the length of the data and
/// the data in hex.
///
/// Because some record types allow compressed domain names in their record
/// data, this type cannot be used safely with these record types. [RFC 3597]
/// limits the types for which compressed names are allowed in the record
/// data to those defined in [RFC 1035] itself. Specific types for all these
/// record types used in practice exist in
/// [`rdata::rfc1035`][crate::rdata::rfc1035].
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 3597]: https://tools.ietf.org/html/rfc3597
#[derive(Clone, Debug)]
pub struct Generic {
    class: Class,
    rtype: Rtype,
    data: Bytes,
}

impl Generic {
    /// Creates generic record data from an octets sequence.
    ///
    /// Fails if the data is longer than 65535 octets.
    pub fn from_octets(
        class: Class,
        rtype: Rtype,
        data: impl Freeze<Frozen = Bytes>,
    ) -> Result<Self, ComposeError> {
        let data = data.freeze();
        if data.len() > usize::from(u16::MAX) {
            return Err(ComposeError::LongData);
        }
        Ok(Generic { class, rtype, data })
    }

    /// Returns the record data.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns a copy with the data replaced.
    pub fn with_data(&self, data: impl Freeze<Frozen = Bytes>) -> Result<Self, FieldError> {
        Self::from_octets(self.class, self.rtype, data)
            .map_err(|err| FieldError::invalid("data", err))
    }
}

//--- Rdata, ParseRdata, ScanRdata

impl Rdata for Generic {
    fn class(&self) -> Class {
        self.class
    }

    fn rtype(&self) -> Rtype {
        self.rtype
    }

    fn fmt_rdata(&self, p: &mut Presenter<'_>) {
        p.write_token("\\#");
        p.write_token(self.data.len());
        if !self.data.is_empty() {
            p.write_hex(&self.data, base16::CHUNK_SIZE);
        }
    }

    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError> {
        target.append_slice(&self.data)
    }
}

impl ParseRdata for Generic {
    fn parse_rdata(
        class: Class,
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        _origin: Option<&Name>,
    ) -> Result<Self, ParseError> {
        let data = Bytes::copy_from_slice(parser.peek_all());
        parser.advance(data.len())?;
        Ok(Generic { class, rtype, data })
    }
}

impl ScanRdata for Generic {
    fn scan_rdata(
        class: Class,
        rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        _ctx: &ScanContext,
    ) -> Result<Self, SyntaxError> {
        if !tokens.get()?.is_identifier("\\#") {
            return Err(tokens.error("generic record data does not start with \\#"));
        }
        let len = usize::from(tokens.get_u16()?);
        let hex = tokens.concat_remaining()?;
        let data = base16::decode(&hex)
            .map_err(|err| tokens.error(format!("invalid hex data: {}", err)))?;
        if data.len() != len {
            return Err(tokens.error(format!(
                "generic record data has length {} but {} was given",
                data.len(),
                len
            )));
        }
        Ok(Generic {
            class,
            rtype,
            data: data.into(),
        })
    }
}

//--- Replace

impl Replace for Generic {
    const FIELDS: &'static [&'static str] = &["data"];

    fn replace_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match (name, value) {
            ("data", FieldValue::Octets(data)) => {
                *self = self.with_data(data)?;
                Ok(())
            }
            (name, _) => Err(FieldError::kind(name)),
        }
    }
}

rdata_impls!(Generic);

//============ Testing =======================================================
