//! Record data for the A record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::rdata::{FieldError, FieldValue, ParseRdata, Rdata, Replace, ScanRdata};
use crate::base::scan::{ScanContext, SyntaxError, Tokenizer};
use crate::base::wire::{ComposeError, Composer, ParseError};
use crate::base::zonefile_fmt::Presenter;
use octseq::parse::Parser;
use std::net::Ipv4Addr;

//------------ A ------------------------------------------------------------

/// A record data.
///
/// A records convey the IPv4 address of a host. The wire format is the 32
/// bit IPv4 address in network byte order. The representation file format
/// is the usual dotted notation.
///
/// The A record type is defined in [RFC 1035, section 3.4.1][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.4.1
#[derive(Clone, Debug)]
pub struct A {
    class: Class,
    addr: Ipv4Addr,
}

impl A {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::A;

    /// Creates a new A record data for class IN from an IPv4 address.
    #[must_use]
    pub fn new(addr: Ipv4Addr) -> A {
        A {
            class: Class::IN,
            addr,
        }
    }

    /// Creates a new A record from the IPv4 address components.
    #[must_use]
    pub fn from_octets(a: u8, b: u8, c: u8, d: u8) -> A {
        A::new(Ipv4Addr::new(a, b, c, d))
    }

    #[must_use]
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// Returns a copy with the address replaced.
    #[must_use]
    pub fn with_addr(&self, addr: Ipv4Addr) -> A {
        A {
            class: self.class,
            addr,
        }
    }
}

//--- Rdata, ParseRdata, ScanRdata

impl Rdata for A {
    fn class(&self) -> Class {
        self.class
    }

    fn rtype(&self) -> Rtype {
        A::RTYPE
    }

    fn fmt_rdata(&self, p: &mut Presenter<'_>) {
        p.write_token(self.addr)
    }

    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError> {
        target.append_slice(&self.addr.octets())
    }
}

impl ParseRdata for A {
    fn parse_rdata(
        class: Class,
        _rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        _origin: Option<&Name>,
    ) -> Result<Self, ParseError> {
        let mut octets = [0u8; 4];
        parser.parse_buf(&mut octets)?;
        Ok(A {
            class,
            addr: octets.into(),
        })
    }
}

impl ScanRdata for A {
    fn scan_rdata(
        class: Class,
        _rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        _ctx: &ScanContext,
    ) -> Result<Self, SyntaxError> {
        let text = tokens.get_identifier()?;
        let addr = text
            .parse()
            .map_err(|_| tokens.error(format!("invalid IPv4 address: {}", text)))?;
        tokens.expect_eol()?;
        Ok(A { class, addr })
    }
}

//--- Replace

impl Replace for A {
    const FIELDS: &'static [&'static str] = &["address"];

    fn replace_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match (name, value) {
            ("address", FieldValue::Ipv4(addr)) => self.addr = addr,
            (name, _) => return Err(FieldError::kind(name)),
        }
        Ok(())
    }
}

rdata_impls!(A);

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_scan};

    #[test]
    fn a_compose_parse_scan() {
        let rdata = A::from_octets(1, 2, 3, 4);
        test_compose_parse(&rdata);
        test_scan("1.2.3.4", &rdata);
        assert_eq!(rdata.to_string(), "1.2.3.4");
    }

    #[test]
    fn scan_errors() {
        let scan = |s: &str| {
            A::scan_rdata(
                Class::IN,
                Rtype::A,
                &mut Tokenizer::new(s),
                &ScanContext::default(),
            )
        };
        assert!(scan("1.2.3").is_err());
        assert!(scan("1.2.3.4 5").is_err());
        assert!(scan("").is_err());
    }

    #[test]
    fn replace() {
        let rdata = A::from_octets(1, 2, 3, 4);
        let new = rdata
            .replace([("address", FieldValue::Ipv4(Ipv4Addr::new(5, 6, 7, 8)))])
            .unwrap();
        assert_eq!(new, A::from_octets(5, 6, 7, 8));
        assert_eq!(rdata.with_addr(Ipv4Addr::new(5, 6, 7, 8)), new);
        assert!(rdata.replace([("bogus", FieldValue::U8(1))]).is_err());
    }
}
