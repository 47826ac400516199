//! Record data types from RFC 1035 that consist of a single domain name.
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

/// Creates a record data type consisting of a single compressible name.
macro_rules! name_type_well_known {
    ( $(#[$attr:meta])* ($target:ident, $rtype:ident, $field:ident, $into_field:ident) ) => {
        $(#[$attr])*
        #[derive(Clone, Debug)]
        pub struct $target {
            class: Class,
            $field: Name,
        }

        impl $target {
            /// The rtype of this record data type.
            pub(crate) const RTYPE: Rtype = Rtype::$rtype;

            /// Creates new record data for class IN.
            #[must_use]
            pub fn new($field: Name) -> Self {
                Self::with_class(Class::IN, $field)
            }

            /// Creates new record data for the given class.
            #[must_use]
            pub fn with_class(class: Class, $field: Name) -> Self {
                $target { class, $field }
            }

            #[must_use]
            pub fn $field(&self) -> &Name {
                &self.$field
            }

            #[must_use]
            pub fn $into_field(self) -> Name {
                self.$field
            }
        }

        impl Rdata for $target {
            fn class(&self) -> Class {
                self.class
            }

            fn rtype(&self) -> Rtype {
                Self::RTYPE
            }

            fn fmt_rdata(&self, p: &mut Presenter<'_>) {
                p.write_name(&self.$field)
            }

            fn compose_rdata(
                &self,
                target: &mut Composer<'_>,
            ) -> Result<(), ComposeError> {
                target.compose_compressible_name(&self.$field)
            }
        }

        impl ParseRdata for $target {
            fn parse_rdata(
                class: Class,
                _rtype: Rtype,
                parser: &mut Parser<'_, [u8]>,
                origin: Option<&Name>,
            ) -> Result<Self, ParseError> {
                Ok(Self::with_class(class, parse_name(parser, origin)?))
            }
        }

        impl ScanRdata for $target {
            fn scan_rdata(
                class: Class,
                _rtype: Rtype,
                tokens: &mut Tokenizer<'_>,
                ctx: &ScanContext,
            ) -> Result<Self, SyntaxError> {
                let name = tokens.get_name(ctx)?;
                tokens.expect_eol()?;
                Ok(Self::with_class(class, name))
            }
        }

        impl Replace for $target {
            const FIELDS: &'static [&'static str] = &[stringify!($field)];

            fn replace_field(
                &mut self,
                name: &str,
                value: FieldValue,
            ) -> Result<(), FieldError> {
                match value {
                    FieldValue::Name(value) => {
                        self.$field = value;
                        Ok(())
                    }
                    _ => Err(FieldError::kind(name)),
                }
            }
        }

        rdata_impls!($target);
    };
}

//------------ Cname --------------------------------------------------------

name_type_well_known! {
    /// CNAME record data.
    ///
    /// The CNAME record specifies the canonical or primary name for domain
    /// name alias.
    ///
    /// The CNAME type is defined in [RFC 1035, section 3.3.1][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.1
    (Cname, CNAME, cname, into_cname)
}

//------------ Ns -----------------------------------------------------------

name_type_well_known! {
    /// NS record data.
    ///
    /// NS records specify hosts that are authoritative for a class and domain.
    ///
    /// The NS record type is defined in [RFC 1035, section 3.3.11][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.11
    (Ns, NS, nsdname, into_nsdname)
}

//------------ Ptr ----------------------------------------------------------

name_type_well_known! {
    /// PTR record data.
    ///
    /// PTR records are used in special domains to point to some other location
    /// in the domain space.
    ///
    /// The PTR record type is defined in [RFC 1035, section 3.3.12][1].
    ///
    /// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.12
    (Ptr, PTR, ptrdname, into_ptrdname)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_scan};
    use crate::base::rdata::RdataExt;
    use crate::base::wire::NameCompressor;
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn ns_compose_parse_scan() {
        let rdata = Ns::new(name("ns1.example.com."));
        test_compose_parse(&rdata);
        test_scan("ns1.example.com.", &rdata);
        assert_eq!(rdata.to_string(), "ns1.example.com.");
    }

    #[test]
    fn canonical_form_is_lowercase() {
        let upper = Cname::new(name("WWW.Example.COM."));
        let lower = Cname::new(name("www.example.com."));
        assert_eq!(
            upper.to_digestable(None).unwrap().as_ref(),
            b"\x03www\x07example\x03com\x00"
        );
        assert_eq!(upper, lower);
        let mut buf = Vec::new();
        upper.to_wire(&mut buf, None, None).unwrap();
        assert_eq!(buf, b"\x03WWW\x07Example\x03COM\x00");
    }

    #[test]
    fn compression_and_origin() {
        let origin = name("example.com.");
        let rdata = Ptr::new(name("host"));
        let mut buf = Vec::new();
        let mut compressor = NameCompressor::new();
        Ns::new(origin.clone())
            .to_wire(&mut buf, Some(&mut compressor), None)
            .unwrap();
        rdata.to_wire(&mut buf, Some(&mut compressor), Some(&origin)).unwrap();
        assert_eq!(&buf[13..], b"\x04host\xc0\x00");
        assert_eq!(
            rdata.to_wire(&mut Vec::new(), None, None),
            Err(ComposeError::RelativeName)
        );
        assert_eq!(rdata.to_text(Some(&origin), true, &Default::default()), "host");
    }

    #[test]
    fn parse_relativizes() {
        let wire = b"\x03www\x07example\x03com\x00";
        let origin = name("example.com.");
        let mut parser = Parser::from_ref(&wire[..]);
        let rdata = Cname::parse_rdata(Class::IN, Rtype::CNAME, &mut parser, Some(&origin))
            .unwrap();
        assert_eq!(rdata.cname(), &name("www"));
    }
}
