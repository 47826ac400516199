//! Record data implementations.
//!
//! This module contains implementations for the record data of a set of
//! commonly used record types as well as [`Generic`] record data for all
//! other types. The types are named after the record type they implement.
//! Some of them are grouped into submodules for the RFCs they are defined
//! in. All types are also re-exported at the top level here. Ie., for the
//! AAAA record type, you can simply `use domain_rdata::rdata::Aaaa`.
//!
//! Record data is created from zone file text or wire format via a
//! [`Registry`] which picks the type for a given class and record type. The
//! free functions of this module use the process-wide registry.

pub use self::aaaa::Aaaa;
pub use self::dnssec::{Dnskey, Ds, IllegalSignatureTime, Nsec, Rrsig, Timestamp};
pub use self::generic::Generic;
pub use self::registry::{Codec, CodecSource, RdataCodec, Registry};
pub use self::rfc1035::{Cname, Mx, Ns, Ptr, Txt, TxtError, A};

pub mod registry;
pub mod rfc1035;

mod aaaa;
mod dnssec;
mod generic;

use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::rdata::RecordData;
use crate::base::scan::{ScanContext, Tokenizer};
use crate::error::Error;

//------------ Builtin -------------------------------------------------------

/// The source for the record data types built into the crate.
///
/// Address types are only defined for class `IN`. All other types apply
/// to every class.
#[derive(Clone, Copy, Debug, Default)]
pub struct Builtin;

impl CodecSource for Builtin {
    fn load(&self, class: &str, rtype: &str) -> Option<Codec> {
        match (class, rtype) {
            ("IN", "A") => Some(Codec::of::<A>()),
            ("IN", "AAAA") => Some(Codec::of::<Aaaa>()),
            ("ANY", "NS") => Some(Codec::of::<Ns>()),
            ("ANY", "CNAME") => Some(Codec::of::<Cname>()),
            ("ANY", "PTR") => Some(Codec::of::<Ptr>()),
            ("ANY", "MX") => Some(Codec::of::<Mx>()),
            ("ANY", "TXT") => Some(Codec::of::<Txt>()),
            ("ANY", "DS") => Some(Codec::of::<Ds>()),
            ("ANY", "DNSKEY") => Some(Codec::of::<Dnskey>()),
            ("ANY", "RRSIG") => Some(Codec::of::<Rrsig>()),
            ("ANY", "NSEC") => Some(Codec::of::<Nsec>()),
            _ => None,
        }
    }
}

//------------ Convenience Functions -----------------------------------------

/// Creates record data from zone file text using the global registry.
///
/// See [`Registry::from_text`].
pub fn from_text(
    class: Class,
    rtype: Rtype,
    text: &str,
    ctx: &ScanContext,
) -> Result<RecordData, Error> {
    Registry::global().from_text(class, rtype, text, ctx)
}

/// Creates record data from zone file tokens using the global registry.
///
/// See [`Registry::from_tokenizer`].
pub fn from_tokenizer(
    class: Class,
    rtype: Rtype,
    tokens: &mut Tokenizer<'_>,
    ctx: &ScanContext,
) -> Result<RecordData, Error> {
    Registry::global().from_tokenizer(class, rtype, tokens, ctx)
}

/// Creates record data from wire format using the global registry.
///
/// See [`Registry::from_wire`].
pub fn from_wire(
    class: Class,
    rtype: Rtype,
    wire: &[u8],
    offset: usize,
    len: usize,
    origin: Option<&Name>,
) -> Result<RecordData, Error> {
    Registry::global().from_wire(class, rtype, wire, offset, len, origin)
}

/// Registers a record data type with the global registry.
///
/// See [`Registry::register_type`].
pub fn register_type(
    codec: Codec,
    rtype: Rtype,
    rtype_text: &str,
    is_singleton: bool,
    class: Class,
) -> Result<(), Error> {
    Registry::global().register_type(codec, rtype, rtype_text, is_singleton, class)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_codecs() {
        let registry = Registry::new();
        assert_eq!(registry.codec(Class::IN, Rtype::A).name(), Codec::of::<A>().name());
        assert!(registry.codec(Class::CH, Rtype::A).is_generic());
        assert_eq!(
            registry.codec(Class::CH, Rtype::MX).name(),
            Codec::of::<Mx>().name()
        );
        assert!(registry.codec(Class::IN, Rtype::from_int(9999)).is_generic());
    }

    #[test]
    fn global_functions() {
        let data = from_text(Class::IN, Rtype::A, "192.0.2.1", &ScanContext::default())
            .unwrap();
        assert!(data.is::<A>());
        let wire = [192, 0, 2, 1];
        assert_eq!(
            from_wire(Class::IN, Rtype::A, &wire, 0, 4, None).unwrap(),
            data
        );
    }
}
