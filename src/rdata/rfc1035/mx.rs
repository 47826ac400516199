//! Record data for the MX record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::rdata::{
    parse_name, FieldError, FieldValue, ParseRdata, Rdata, Replace, ScanRdata,
};
use crate::base::scan::{ScanContext, SyntaxError, Tokenizer};
use crate::base::wire::{ComposeError, Composer, ParseError};
use crate::base::zonefile_fmt::Presenter;
use octseq::parse::Parser;

//------------ Mx -----------------------------------------------------------

/// Mx record data.
///
/// The Mx record specifies a host willing to serve as a mail exchange for
/// the owner name.
///
/// The Mx record type is defined in [RFC 1035, section 3.3.9][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.9
#[derive(Clone, Debug)]
pub struct Mx {
    class: Class,
    preference: u16,
    exchange: Name,
}

impl Mx {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::MX;

    /// Creates a new Mx record data for class IN from the components.
    #[must_use]
    pub fn new(preference: u16, exchange: Name) -> Self {
        Self::with_class(Class::IN, preference, exchange)
    }

    #[must_use]
    pub fn with_class(class: Class, preference: u16, exchange: Name) -> Self {
        Mx {
            class,
            preference,
            exchange,
        }
    }

    /// The preference for this record.
    ///
    /// Defines an order if there are several Mx records for the same owner.
    /// Lower values are preferred.
    #[must_use]
    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// The name of the host that is the exchange.
    #[must_use]
    pub fn exchange(&self) -> &Name {
        &self.exchange
    }

    #[must_use]
    pub fn with_preference(&self, preference: u16) -> Self {
        Mx {
            preference,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_exchange(&self, exchange: Name) -> Self {
        Mx {
            exchange,
            ..self.clone()
        }
    }
}

//--- Rdata, ParseRdata, ScanRdata

impl Rdata for Mx {
    fn class(&self) -> Class {
        self.class
    }

    fn rtype(&self) -> Rtype {
        Mx::RTYPE
    }

    fn fmt_rdata(&self, p: &mut Presenter<'_>) {
        p.write_token(self.preference);
        p.write_name(&self.exchange);
    }

    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError> {
        target.append_u16(self.preference)?;
        target.compose_compressible_name(&self.exchange)
    }
}

impl ParseRdata for Mx {
    fn parse_rdata(
        class: Class,
        _rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        origin: Option<&Name>,
    ) -> Result<Self, ParseError> {
        let preference = parser.parse_u16_be()?;
        let exchange = parse_name(parser, origin)?;
        Ok(Self::with_class(class, preference, exchange))
    }
}

impl ScanRdata for Mx {
    fn scan_rdata(
        class: Class,
        _rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        ctx: &ScanContext,
    ) -> Result<Self, SyntaxError> {
        let preference = tokens.get_u16()?;
        let exchange = tokens.get_name(ctx)?;
        tokens.expect_eol()?;
        Ok(Self::with_class(class, preference, exchange))
    }
}

//--- Replace

impl Replace for Mx {
    const FIELDS: &'static [&'static str] = &["preference", "exchange"];

    fn replace_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match (name, value) {
            ("preference", FieldValue::U16(value)) => self.preference = value,
            ("exchange", FieldValue::Name(value)) => self.exchange = value,
            (name, _) => return Err(FieldError::kind(name)),
        }
        Ok(())
    }
}

rdata_impls!(Mx);

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::cmp::CanonicalOrd;
    use crate::base::rdata::test::{test_compose_parse, test_scan};
    use core::cmp::Ordering;
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn mx_compose_parse_scan() {
        let rdata = Mx::new(12, name("mail.example.com."));
        test_compose_parse(&rdata);
        test_scan("12 mail.example.com.", &rdata);
        test_scan("( 12\n mail.example.com. ) ; comment", &rdata);
        assert_eq!(rdata.to_string(), "12 mail.example.com.");
    }

    #[test]
    fn ordering() {
        let a = Mx::new(10, name("b.example."));
        let b = Mx::new(10, name("A.example."));
        let c = Mx::new(20, name("a.example."));
        assert_eq!(a.partial_cmp(&b), Some(Ordering::Greater));
        assert!(b < c);
        assert!(a < c);
        assert_eq!(b, Mx::new(10, name("a.example.")));
        assert_eq!(b.canonical_cmp(&Mx::new(10, name("a.example."))), Ordering::Equal);
        let ch = Mx::with_class(Class::CH, 10, name("a.example."));
        assert_ne!(b, ch);
        assert_eq!(b.partial_cmp(&ch), None);
        assert_eq!(b.canonical_cmp(&ch), Ordering::Less);
    }

    #[test]
    fn replace() {
        let rdata = Mx::new(10, name("mail.example."));
        let new = rdata
            .replace([
                ("preference", FieldValue::U16(20)),
                ("exchange", FieldValue::Name(name("mx.example."))),
            ])
            .unwrap();
        assert_eq!(new, Mx::new(20, name("mx.example.")));
        assert_eq!(rdata.preference(), 10);
        assert_eq!(rdata.with_preference(20).with_exchange(name("mx.example.")), new);
        assert_eq!(
            rdata.replace([("preference", FieldValue::U32(20))]),
            Err(FieldError::Kind("preference".into()))
        );
        assert_eq!(
            rdata.replace([("rtype", FieldValue::U16(1))]),
            Err(FieldError::Immutable("rtype".into()))
        );
    }
}
