//! Record data from [RFC 3596]: AAAA records.
//!
//! This RFC defines the Aaaa record type.
//!
//! [RFC 3596]: https://tools.ietf.org/html/rfc3596

use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::rdata::{FieldError, FieldValue, ParseRdata, Rdata, Replace, ScanRdata};
use crate::base::scan::{ScanContext, SyntaxError, Tokenizer};
use crate::base::wire::{ComposeError, Composer, ParseError};
use crate::base::zonefile_fmt::Presenter;
use octseq::parse::Parser;
use std::net::Ipv6Addr;

//------------ Aaaa ---------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Aaaa {
    class: Class,
    addr: Ipv6Addr,
}

impl Aaaa {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::AAAA;

    #[must_use]
    pub fn new(addr: Ipv6Addr) -> Aaaa {
        Aaaa {
            class: Class::IN,
            addr,
        }
    }

    #[must_use]
    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }

    #[must_use]
    pub fn with_addr(&self, addr: Ipv6Addr) -> Aaaa {
        Aaaa {
            class: self.class,
            addr,
        }
    }
}

//--- Rdata, ParseRdata, ScanRdata

impl Rdata for Aaaa {
    fn class(&self) -> Class {
        self.class
    }

    fn rtype(&self) -> Rtype {
        Aaaa::RTYPE
    }

    fn fmt_rdata(&self, p: &mut Presenter<'_>) {
        p.write_token(self.addr)
    }

    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError> {
        target.append_slice(&self.addr.octets())
    }
}

impl ParseRdata for Aaaa {
    fn parse_rdata(
        class: Class,
        _rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        _origin: Option<&Name>,
    ) -> Result<Self, ParseError> {
        let mut octets = [0u8; 16];
        parser.parse_buf(&mut octets)?;
        Ok(Aaaa {
            class,
            addr: octets.into(),
        })
    }
}

impl ScanRdata for Aaaa {
    fn scan_rdata(
        class: Class,
        _rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        _ctx: &ScanContext,
    ) -> Result<Self, SyntaxError> {
        let text = tokens.get_identifier()?;
        let addr = text
            .parse()
            .map_err(|_| tokens.error(format!("invalid IPv6 address: {}", text)))?;
        tokens.expect_eol()?;
        Ok(Aaaa { class, addr })
    }
}

//--- Replace

impl Replace for Aaaa {
    const FIELDS: &'static [&'static str] = &["address"];

    fn replace_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match (name, value) {
            ("address", FieldValue::Ipv6(addr)) => self.addr = addr,
            (name, _) => return Err(FieldError::kind(name)),
        }
        Ok(())
    }
}

rdata_impls!(Aaaa);

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_scan};

    #[test]
    fn aaaa_compose_parse_scan() {
        let addr = Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1);
        let rdata = Aaaa::new(addr);
        test_compose_parse(&rdata);
        test_scan("2001:db8::1", &rdata);
        assert_eq!(rdata.to_string(), "2001:db8::1");
        assert!(Aaaa::scan_rdata(
            Class::IN,
            Rtype::AAAA,
            &mut Tokenizer::new("1.2.3.4"),
            &ScanContext::default()
        )
        .is_err());
    }
}
