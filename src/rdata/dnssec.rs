//! Record data from [RFC 4034]: DS, DNSKEY, RRSIG, and NSEC records.
//!
//! This RFC defines the record types for DNSSEC.
//!
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::rdata::{
    parse_name, FieldError, FieldValue, ParseRdata, Rdata, Replace, ScanRdata,
};
use crate::base::scan::{ScanContext, SyntaxError, Tokenizer};
use crate::base::wire::{ComposeError, Composer, FormError, ParseError};
use crate::base::zonefile_fmt::Presenter;
use crate::utils::bitmap::truncate_trailing_zeros;
use crate::utils::freeze::Freeze;
use crate::utils::{base16, base64};
use bytes::Bytes;
use core::{fmt, str};
use octseq::parse::Parser;
use std::sync::Arc;
use thiserror::Error;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

/// Returns all remaining octets of the parser.
fn parse_remaining(parser: &mut Parser<'_, [u8]>) -> Result<Bytes, ParseError> {
    let data = Bytes::copy_from_slice(parser.peek_all());
    parser.advance(data.len())?;
    Ok(data)
}

/// Scans the remaining tokens of the entry as one encoded value.
fn scan_encoded(
    tokens: &mut Tokenizer<'_>,
    decode: fn(&str) -> Result<Vec<u8>, base64::DecodeError>,
) -> Result<Bytes, SyntaxError> {
    let text = tokens.concat_remaining()?;
    decode(&text)
        .map(Bytes::from)
        .map_err(|err| tokens.error(format!("invalid encoded data: {}", err)))
}

//------------ Dnskey --------------------------------------------------------

/// DNSKEY record data.
///
/// The DNSKEY record holds a public key used for DNSSEC. Its presentation
/// format has the key in base 64.
///
/// The DNSKEY record type is defined in [RFC 4034, section 2][1].
///
/// [1]: https://tools.ietf.org/html/rfc4034#section-2
#[derive(Clone, Debug)]
pub struct Dnskey {
    class: Class,
    flags: u16,
    protocol: u8,
    algorithm: u8,
    public_key: Bytes,
}

impl Dnskey {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::DNSKEY;

    #[must_use]
    pub fn new(
        flags: u16,
        protocol: u8,
        algorithm: u8,
        public_key: impl Freeze<Frozen = Bytes>,
    ) -> Self {
        Dnskey {
            class: Class::IN,
            flags,
            protocol,
            algorithm,
            public_key: public_key.freeze(),
        }
    }

    #[must_use]
    pub fn flags(&self) -> u16 {
        self.flags
    }

    #[must_use]
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    #[must_use]
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    #[must_use]
    pub fn public_key(&self) -> &Bytes {
        &self.public_key
    }

    /// Returns whether the Revoke flag is set.
    ///
    /// See [RFC 5011, Section 3].
    ///
    /// [RFC 5011, Section 3]: https://tocs.ietf.org/html/rfc5011#section-3
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.flags & 0b0000_0000_1000_0000 != 0
    }

    /// Returns whether the the Secure Entry Point (SEP) flag is set.
    ///
    /// See [RFC 4034, Section 2.1.1]:
    ///
    /// > This flag is only intended to be a hint to zone signing or
    /// > debugging software as to the intended use of this DNSKEY record;
    /// > validators MUST NOT alter their behavior during the signature
    /// > validation process in any way based on the setting of this bit.
    ///
    /// [RFC 4034, Section 2.1.1]: https://datatracker.ietf.org/doc/html/rfc4034#section-2.1.1
    #[must_use]
    pub fn is_secure_entry_point(&self) -> bool {
        self.flags & 0b0000_0000_0000_0001 != 0
    }

    /// Returns whether the Zone Key flag is set.
    #[must_use]
    pub fn is_zone_key(&self) -> bool {
        self.flags & 0b0000_0001_0000_0000 != 0
    }

    #[must_use]
    pub fn with_flags(&self, flags: u16) -> Self {
        Dnskey {
            flags,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_public_key(&self, public_key: impl Freeze<Frozen = Bytes>) -> Self {
        Dnskey {
            public_key: public_key.freeze(),
            ..self.clone()
        }
    }
}

impl Rdata for Dnskey {
    fn class(&self) -> Class {
        self.class
    }

    fn rtype(&self) -> Rtype {
        Dnskey::RTYPE
    }

    fn fmt_rdata(&self, p: &mut Presenter<'_>) {
        p.write_token(self.flags);
        p.write_token(self.protocol);
        p.write_token(self.algorithm);
        if !self.public_key.is_empty() {
            p.write_base64(&self.public_key, base64::CHUNK_SIZE);
        }
    }

    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError> {
        target.append_u16(self.flags)?;
        target.append_u8(self.protocol)?;
        target.append_u8(self.algorithm)?;
        target.append_slice(&self.public_key)
    }
}

impl ParseRdata for Dnskey {
    fn parse_rdata(
        class: Class,
        _rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        _origin: Option<&Name>,
    ) -> Result<Self, ParseError> {
        Ok(Dnskey {
            class,
            flags: parser.parse_u16_be()?,
            protocol: parser.parse_u8()?,
            algorithm: parser.parse_u8()?,
            public_key: parse_remaining(parser)?,
        })
    }
}

impl ScanRdata for Dnskey {
    fn scan_rdata(
        class: Class,
        _rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        _ctx: &ScanContext,
    ) -> Result<Self, SyntaxError> {
        Ok(Dnskey {
            class,
            flags: tokens.get_u16()?,
            protocol: tokens.get_u8()?,
            algorithm: tokens.get_u8()?,
            public_key: scan_encoded(tokens, base64::decode)?,
        })
    }
}

impl Replace for Dnskey {
    const FIELDS: &'static [&'static str] = &["flags", "protocol", "algorithm", "key"];

    fn replace_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match (name, value) {
            ("flags", FieldValue::U16(value)) => self.flags = value,
            ("protocol", FieldValue::U8(value)) => self.protocol = value,
            ("algorithm", FieldValue::U8(value)) => self.algorithm = value,
            ("key", FieldValue::Octets(value)) => self.public_key = value,
            (name, _) => return Err(FieldError::kind(name)),
        }
        Ok(())
    }
}

rdata_impls!(Dnskey);

//------------ Ds -----------------------------------------------------------

/// DS record data.
///
/// The DS record refers to a DNSKEY record of a child zone by the key’s
/// tag, algorithm, and a digest over it.
///
/// The DS record type is defined in [RFC 4034, section 5][1].
///
/// [1]: https://tools.ietf.org/html/rfc4034#section-5
#[derive(Clone, Debug)]
pub struct Ds {
    class: Class,
    key_tag: u16,
    algorithm: u8,
    digest_type: u8,
    digest: Bytes,
}

impl Ds {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::DS;

    /// The number of hex digits after which the digest is broken up.
    const CHUNK_SIZE: usize = 128;

    #[must_use]
    pub fn new(
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: impl Freeze<Frozen = Bytes>,
    ) -> Self {
        Ds {
            class: Class::IN,
            key_tag,
            algorithm,
            digest_type,
            digest: digest.freeze(),
        }
    }

    #[must_use]
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    #[must_use]
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    #[must_use]
    pub fn digest_type(&self) -> u8 {
        self.digest_type
    }

    #[must_use]
    pub fn digest(&self) -> &Bytes {
        &self.digest
    }

    #[must_use]
    pub fn with_digest(&self, digest_type: u8, digest: impl Freeze<Frozen = Bytes>) -> Self {
        Ds {
            digest_type,
            digest: digest.freeze(),
            ..self.clone()
        }
    }
}

impl Rdata for Ds {
    fn class(&self) -> Class {
        self.class
    }

    fn rtype(&self) -> Rtype {
        Ds::RTYPE
    }

    fn fmt_rdata(&self, p: &mut Presenter<'_>) {
        p.write_token(self.key_tag);
        p.write_token(self.algorithm);
        p.write_token(self.digest_type);
        if !self.digest.is_empty() {
            p.write_hex(&self.digest, Ds::CHUNK_SIZE);
        }
    }

    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError> {
        target.append_u16(self.key_tag)?;
        target.append_u8(self.algorithm)?;
        target.append_u8(self.digest_type)?;
        target.append_slice(&self.digest)
    }
}

impl ParseRdata for Ds {
    fn parse_rdata(
        class: Class,
        _rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        _origin: Option<&Name>,
    ) -> Result<Self, ParseError> {
        Ok(Ds {
            class,
            key_tag: parser.parse_u16_be()?,
            algorithm: parser.parse_u8()?,
            digest_type: parser.parse_u8()?,
            digest: parse_remaining(parser)?,
        })
    }
}

impl ScanRdata for Ds {
    fn scan_rdata(
        class: Class,
        _rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        _ctx: &ScanContext,
    ) -> Result<Self, SyntaxError> {
        Ok(Ds {
            class,
            key_tag: tokens.get_u16()?,
            algorithm: tokens.get_u8()?,
            digest_type: tokens.get_u8()?,
            digest: scan_encoded(tokens, base16::decode)?,
        })
    }
}

impl Replace for Ds {
    const FIELDS: &'static [&'static str] = &["key_tag", "algorithm", "digest_type", "digest"];

    fn replace_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match (name, value) {
            ("key_tag", FieldValue::U16(value)) => self.key_tag = value,
            ("algorithm", FieldValue::U8(value)) => self.algorithm = value,
            ("digest_type", FieldValue::U8(value)) => self.digest_type = value,
            ("digest", FieldValue::Octets(value)) => self.digest = value,
            (name, _) => return Err(FieldError::kind(name)),
        }
        Ok(())
    }
}

rdata_impls!(Ds);

//------------ Timestamp ------------------------------------------------------

/// A timestamp for RRSIG records.
///
/// [RFC 4034] defines timestamps as the number of seconds elepased since
/// since 1 January 1970 00:00:00 UTC, ignoring leap seconds, modulo 2^32.
///
/// In presentation format, timestamps are written as a date in
/// `YYYYMMDDHHmmSS` format. When reading, the plain integer value is
/// accepted, too.
///
/// [RFC 4034]: https://tools.ietf.org/html/rfc4034
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(u32);

impl Timestamp {
    #[must_use]
    pub fn from_int(value: u32) -> Self {
        Timestamp(value)
    }

    /// Returns the timestamp as a raw integer.
    #[must_use]
    pub fn into_int(self) -> u32 {
        self.0
    }
}

//--- From and FromStr

impl From<u32> for Timestamp {
    fn from(item: u32) -> Self {
        Timestamp(item)
    }
}

impl str::FromStr for Timestamp {
    type Err = IllegalSignatureTime;

    /// Parses a timestamp value from a string.
    ///
    /// The presentation format can either be their integer value of up to
    /// ten digits or a specific date in `YYYYMMDDHHmmSS` format.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.is_empty() || !src.bytes().all(|ch| ch.is_ascii_digit()) {
            return Err(IllegalSignatureTime(()));
        }
        if src.len() <= 10 {
            return src
                .parse::<u32>()
                .map(Timestamp)
                .map_err(|_| IllegalSignatureTime(()));
        }
        if src.len() != 14 {
            return Err(IllegalSignatureTime(()));
        }
        let field = |range: core::ops::Range<usize>| {
            src[range].parse::<u8>().map_err(|_| IllegalSignatureTime(()))
        };
        let year = src[0..4]
            .parse::<i32>()
            .map_err(|_| IllegalSignatureTime(()))?;
        let month = Month::try_from(field(4..6)?).map_err(|_| IllegalSignatureTime(()))?;
        let date = Date::from_calendar_date(year, month, field(6..8)?)
            .map_err(|_| IllegalSignatureTime(()))?;
        let time = Time::from_hms(field(8..10)?, field(10..12)?, field(12..14)?)
            .map_err(|_| IllegalSignatureTime(()))?;
        let secs = PrimitiveDateTime::new(date, time).assume_utc().unix_timestamp();
        u32::try_from(secs)
            .map(Timestamp)
            .map_err(|_| IllegalSignatureTime(()))
    }
}

//--- Display

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match OffsetDateTime::from_unix_timestamp(i64::from(self.0)) {
            Ok(dt) => write!(
                f,
                "{:04}{:02}{:02}{:02}{:02}{:02}",
                dt.year(),
                u8::from(dt.month()),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second()
            ),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

//------------ Rrsig ---------------------------------------------------------

/// RRSIG record data.
///
/// The RRSIG record holds a signature over an RRset. It covers the record
/// type of the signed RRset.
///
/// The RRSIG record type is defined in [RFC 4034, section 3][1].
///
/// [1]: https://tools.ietf.org/html/rfc4034#section-3
#[derive(Clone, Debug)]
pub struct Rrsig {
    class: Class,
    type_covered: Rtype,
    algorithm: u8,
    labels: u8,
    original_ttl: u32,
    expiration: Timestamp,
    inception: Timestamp,
    key_tag: u16,
    signer_name: Name,
    signature: Bytes,
}

impl Rrsig {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::RRSIG;

    #[allow(clippy::too_many_arguments)] // Because it’s the format.
    #[must_use]
    pub fn new(
        type_covered: Rtype,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: Timestamp,
        inception: Timestamp,
        key_tag: u16,
        signer_name: Name,
        signature: impl Freeze<Frozen = Bytes>,
    ) -> Self {
        Rrsig {
            class: Class::IN,
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature: signature.freeze(),
        }
    }

    #[must_use]
    pub fn type_covered(&self) -> Rtype {
        self.type_covered
    }

    #[must_use]
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    #[must_use]
    pub fn labels(&self) -> u8 {
        self.labels
    }

    #[must_use]
    pub fn original_ttl(&self) -> u32 {
        self.original_ttl
    }

    #[must_use]
    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    #[must_use]
    pub fn inception(&self) -> Timestamp {
        self.inception
    }

    #[must_use]
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    #[must_use]
    pub fn signer_name(&self) -> &Name {
        &self.signer_name
    }

    #[must_use]
    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    #[must_use]
    pub fn with_validity(&self, inception: Timestamp, expiration: Timestamp) -> Self {
        Rrsig {
            inception,
            expiration,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_signature(&self, signature: impl Freeze<Frozen = Bytes>) -> Self {
        Rrsig {
            signature: signature.freeze(),
            ..self.clone()
        }
    }
}

impl Rdata for Rrsig {
    fn class(&self) -> Class {
        self.class
    }

    fn rtype(&self) -> Rtype {
        Rrsig::RTYPE
    }

    fn covers(&self) -> Rtype {
        self.type_covered
    }

    fn fmt_rdata(&self, p: &mut Presenter<'_>) {
        p.write_token(self.type_covered);
        p.write_token(self.algorithm);
        p.write_token(self.labels);
        p.write_token(self.original_ttl);
        p.write_token(self.expiration);
        p.write_token(self.inception);
        p.write_token(self.key_tag);
        p.write_name(&self.signer_name);
        if !self.signature.is_empty() {
            p.write_base64(&self.signature, base64::CHUNK_SIZE);
        }
    }

    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError> {
        target.append_u16(self.type_covered.to_int())?;
        target.append_u8(self.algorithm)?;
        target.append_u8(self.labels)?;
        target.append_u32(self.original_ttl)?;
        target.append_u32(self.expiration.into_int())?;
        target.append_u32(self.inception.into_int())?;
        target.append_u16(self.key_tag)?;
        target.compose_name(&self.signer_name)?;
        target.append_slice(&self.signature)
    }
}

impl ParseRdata for Rrsig {
    fn parse_rdata(
        class: Class,
        _rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        origin: Option<&Name>,
    ) -> Result<Self, ParseError> {
        Ok(Rrsig {
            class,
            type_covered: Rtype::parse(parser)?,
            algorithm: parser.parse_u8()?,
            labels: parser.parse_u8()?,
            original_ttl: parser.parse_u32_be()?,
            expiration: parser.parse_u32_be()?.into(),
            inception: parser.parse_u32_be()?.into(),
            key_tag: parser.parse_u16_be()?,
            signer_name: parse_name(parser, origin)?,
            signature: parse_remaining(parser)?,
        })
    }
}

impl ScanRdata for Rrsig {
    fn scan_rdata(
        class: Class,
        _rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        ctx: &ScanContext,
    ) -> Result<Self, SyntaxError> {
        let type_covered = scan_rtype(tokens)?;
        let algorithm = tokens.get_u8()?;
        let labels = tokens.get_u8()?;
        let original_ttl = tokens.get_u32()?;
        let expiration = scan_timestamp(tokens)?;
        let inception = scan_timestamp(tokens)?;
        let key_tag = tokens.get_u16()?;
        let signer_name = tokens.get_name(ctx)?;
        let signature = scan_encoded(tokens, base64::decode)?;
        Ok(Rrsig {
            class,
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        })
    }
}

impl Replace for Rrsig {
    const FIELDS: &'static [&'static str] = &[
        "type_covered",
        "algorithm",
        "labels",
        "original_ttl",
        "expiration",
        "inception",
        "key_tag",
        "signer",
        "signature",
    ];

    fn replace_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match (name, value) {
            ("type_covered", FieldValue::Rtype(value)) => self.type_covered = value,
            ("algorithm", FieldValue::U8(value)) => self.algorithm = value,
            ("labels", FieldValue::U8(value)) => self.labels = value,
            ("original_ttl", FieldValue::U32(value)) => self.original_ttl = value,
            ("expiration", FieldValue::U32(value)) => self.expiration = value.into(),
            ("inception", FieldValue::U32(value)) => self.inception = value.into(),
            ("key_tag", FieldValue::U16(value)) => self.key_tag = value,
            ("signer", FieldValue::Name(value)) => self.signer_name = value,
            ("signature", FieldValue::Octets(value)) => self.signature = value,
            (name, _) => return Err(FieldError::kind(name)),
        }
        Ok(())
    }
}

rdata_impls!(Rrsig);

fn scan_rtype(tokens: &mut Tokenizer<'_>) -> Result<Rtype, SyntaxError> {
    let text = tokens.get_identifier()?;
    text.parse()
        .map_err(|_| tokens.error(format!("unknown record type: {}", text)))
}

fn scan_timestamp(tokens: &mut Tokenizer<'_>) -> Result<Timestamp, SyntaxError> {
    let text = tokens.get_identifier()?;
    text.parse()
        .map_err(|err| tokens.error(format!("{}: {}", err, text)))
}

//------------ Nsec ----------------------------------------------------------

/// NSEC record data.
///
/// The NSEC record proves the non-existence of names and types. It holds
/// the next owner name in canonical order and the types present at the
/// owner.
///
/// Since [RFC 6840], the next name is kept in its original case in the
/// canonical form.
///
/// The NSEC record type is defined in [RFC 4034, section 4][1].
///
/// [1]: https://tools.ietf.org/html/rfc4034#section-4
/// [RFC 6840]: https://tools.ietf.org/html/rfc6840
#[derive(Clone, Debug)]
pub struct Nsec {
    class: Class,
    next_name: Name,
    types: Arc<[Rtype]>,
}

impl Nsec {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::NSEC;

    /// Creates new NSEC record data.
    ///
    /// The types are sorted and duplicates removed.
    #[must_use]
    pub fn new(next_name: Name, types: impl Freeze<Frozen = Arc<[Rtype]>>) -> Self {
        Self::with_class(Class::IN, next_name, types)
    }

    #[must_use]
    pub fn with_class(
        class: Class,
        next_name: Name,
        types: impl Freeze<Frozen = Arc<[Rtype]>>,
    ) -> Self {
        Nsec {
            class,
            next_name,
            types: normalize_types(types.freeze()),
        }
    }

    #[must_use]
    pub fn next_name(&self) -> &Name {
        &self.next_name
    }

    /// Returns the types in ascending order.
    #[must_use]
    pub fn types(&self) -> &[Rtype] {
        &self.types
    }

    #[must_use]
    pub fn contains(&self, rtype: Rtype) -> bool {
        self.types.binary_search(&rtype).is_ok()
    }

    #[must_use]
    pub fn with_types(&self, types: impl Freeze<Frozen = Arc<[Rtype]>>) -> Self {
        Self::with_class(self.class, self.next_name.clone(), types)
    }
}

fn normalize_types(types: Arc<[Rtype]>) -> Arc<[Rtype]> {
    if types.windows(2).all(|pair| pair[0] < pair[1]) {
        return types;
    }
    let mut types = types.to_vec();
    types.sort_unstable();
    types.dedup();
    types.into()
}

impl Rdata for Nsec {
    fn class(&self) -> Class {
        self.class
    }

    fn rtype(&self) -> Rtype {
        Nsec::RTYPE
    }

    fn fmt_rdata(&self, p: &mut Presenter<'_>) {
        p.write_name(&self.next_name);
        for rtype in self.types.iter() {
            p.write_token(rtype);
        }
    }

    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError> {
        target.compose_name_as_is(&self.next_name)?;
        compose_type_bitmap(&self.types, target)
    }
}

impl ParseRdata for Nsec {
    fn parse_rdata(
        class: Class,
        _rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        origin: Option<&Name>,
    ) -> Result<Self, ParseError> {
        let next_name = parse_name(parser, origin)?;
        let types = parse_type_bitmap(parser)?;
        Ok(Nsec {
            class,
            next_name,
            types: types.into(),
        })
    }
}

impl ScanRdata for Nsec {
    fn scan_rdata(
        class: Class,
        _rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        ctx: &ScanContext,
    ) -> Result<Self, SyntaxError> {
        let next_name = tokens.get_name(ctx)?;
        let mut types = Vec::new();
        while !tokens.peek()?.is_eol_or_eof() {
            types.push(scan_rtype(tokens)?);
        }
        tokens.expect_eol()?;
        Ok(Self::with_class(class, next_name, types))
    }
}

impl Replace for Nsec {
    const FIELDS: &'static [&'static str] = &["next", "types"];

    fn replace_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match (name, value) {
            ("next", FieldValue::Name(value)) => self.next_name = value,
            ("types", FieldValue::Types(value)) => self.types = normalize_types(value),
            (name, _) => return Err(FieldError::kind(name)),
        }
        Ok(())
    }
}

rdata_impls!(Nsec);

//------------ Type bitmaps --------------------------------------------------

/// Splits a record type into window number, octet, and bit mask.
fn split_rtype(rtype: Rtype) -> (u8, usize, u8) {
    let rtype = rtype.to_int();
    (
        (rtype >> 8) as u8,
        usize::from((rtype & 0xFF) >> 3),
        0b1000_0000 >> (rtype & 0x07),
    )
}

/// Appends the type bitmap for a sorted slice of types.
///
/// Each window only has as many octets as needed for its last type.
fn compose_type_bitmap(types: &[Rtype], target: &mut Composer<'_>) -> Result<(), ComposeError> {
    let mut windows: Vec<(u8, [u8; 32])> = Vec::new();
    for &rtype in types {
        let (number, octet, mask) = split_rtype(rtype);
        match windows.last_mut() {
            Some((last, bits)) if *last == number => bits[octet] |= mask,
            _ => {
                let mut bits = [0u8; 32];
                bits[octet] |= mask;
                windows.push((number, bits));
            }
        }
    }
    for (number, bits) in &windows {
        let bits = truncate_trailing_zeros(bits);
        target.append_u8(*number)?;
        target.append_u8(bits.len() as u8)?;
        target.append_slice(bits)?;
    }
    Ok(())
}

/// Parses a type bitmap from the remainder of the parser.
fn parse_type_bitmap(parser: &mut Parser<'_, [u8]>) -> Result<Vec<Rtype>, ParseError> {
    let mut res = Vec::new();
    let mut last = None;
    while parser.remaining() > 0 {
        let number = parser.parse_u8()?;
        let len = usize::from(parser.parse_u8()?);
        // https://tools.ietf.org/html/rfc4034#section-4.1.2:
        //  Blocks with no types present MUST NOT be included.
        if len == 0 || len > 32 {
            return Err(FormError::new("invalid type bitmap window length").into());
        }
        if last.map_or(false, |last| number <= last) {
            return Err(FormError::new("type bitmap windows out of order").into());
        }
        last = Some(number);
        let mut bits = [0u8; 32];
        parser.parse_buf(&mut bits[..len])?;
        //  Trailing zero octets in the bitmap MUST be omitted.
        if bits[len - 1] == 0 {
            return Err(FormError::new("trailing zero octets in type bitmap").into());
        }
        for (i, octet) in bits[..len].iter().enumerate() {
            for bit in 0..8 {
                if octet & (0b1000_0000 >> bit) != 0 {
                    let low = (i * 8 + bit) as u16;
                    res.push(Rtype::from_int(u16::from(number) << 8 | low));
                }
            }
        }
    }
    Ok(res)
}

//============ Error Types ===================================================

//------------ IllegalSignatureTime ------------------------------------------

/// An error parsing a timestamp.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("illegal signature time")]
pub struct IllegalSignatureTime(());

//============ Test ==========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_scan};
    use crate::base::rdata::RdataExt;
    use crate::base::zonefile_fmt::TextOptions;
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn dnskey_compose_parse_scan() {
        let rdata = Dnskey::new(257, 3, 8, b"foobar".as_ref());
        test_compose_parse(&rdata);
        test_scan("257 3 8 Zm9v YmFy", &rdata);
        assert_eq!(rdata.to_string(), "257 3 8 Zm9vYmFy");
        assert!(rdata.is_zone_key());
        assert!(rdata.is_secure_entry_point());
        assert!(!rdata.is_revoked());
    }

    #[test]
    fn ds_compose_parse_scan() {
        let digest = base16::decode(
            "2bb183af5f22588179a53b0a98631fad1a292118",
        )
        .unwrap();
        let rdata = Ds::new(60485, 5, 1, digest);
        test_compose_parse(&rdata);
        test_scan("60485 5 1 2BB183AF5F22588179A5 3B0A98631FAD1A292118", &rdata);
        assert_eq!(
            rdata.to_string(),
            "60485 5 1 2bb183af5f22588179a53b0a98631fad1a292118"
        );
        assert_eq!(
            rdata.to_text(None, true, &TextOptions::with_chunk_size(8)),
            "60485 5 1 2bb183af 5f225881 79a53b0a 98631fad 1a292118"
        );
    }

    #[test]
    fn timestamps() {
        assert_eq!(Timestamp::from_str("20240101000000").unwrap().into_int(), 1704067200);
        assert_eq!(Timestamp::from_str("1704067200").unwrap().into_int(), 1704067200);
        assert_eq!(Timestamp::from(1704067200).to_string(), "20240101000000");
        assert_eq!(Timestamp::from(0).to_string(), "19700101000000");
        assert!(Timestamp::from_str("20241301000000").is_err());
        assert!(Timestamp::from_str("202401010000").is_err());
        assert!(Timestamp::from_str("99999999999").is_err());
        assert!(Timestamp::from_str("4294967296").is_err());
        assert!(Timestamp::from_str("").is_err());
    }

    #[test]
    fn rrsig_compose_parse_scan() {
        let rdata = Rrsig::new(
            Rtype::A,
            8,
            2,
            3600,
            Timestamp::from(1704067200),
            Timestamp::from(1701388800),
            12345,
            name("Example.com."),
            b"foobar".as_ref(),
        );
        test_compose_parse(&rdata);
        test_scan(
            "A 8 2 3600 20240101000000 1701388800 12345 Example.com. Zm9vYmFy",
            &rdata,
        );
        assert_eq!(
            rdata.to_string(),
            "A 8 2 3600 20240101000000 20231201000000 12345 Example.com. Zm9vYmFy"
        );
        assert_eq!(rdata.covers(), Rtype::A);
        assert_eq!(rdata.extended_rtype(), (1 << 16) | 46);

        // The signer name is lowercased in canonical form.
        let digestable = rdata.to_digestable(None).unwrap();
        assert_eq!(&digestable[18..31], b"\x07example\x03com\x00");
    }

    #[test]
    fn nsec_compose_parse_scan() {
        let rdata = Nsec::new(
            name("Host.example.com."),
            vec![Rtype::RRSIG, Rtype::A, Rtype::MX, Rtype::NSEC, Rtype::from_int(1234)],
        );
        test_compose_parse(&rdata);
        test_scan("Host.example.com. A MX RRSIG NSEC TYPE1234", &rdata);
        assert_eq!(
            rdata.to_string(),
            "Host.example.com. A MX RRSIG NSEC TYPE1234"
        );
        assert!(rdata.contains(Rtype::MX));
        assert!(!rdata.contains(Rtype::AAAA));

        let mut buf = Vec::new();
        rdata.to_wire(&mut buf, None, None).unwrap();
        let bitmap = &buf[name("Host.example.com.").len()..];
        let mut expected = b"\x00\x06\x40\x01\x00\x00\x00\x03\x04\x1b".to_vec();
        expected.extend_from_slice(&[0; 26]);
        expected.push(0x20);
        assert_eq!(bitmap, expected.as_slice());

        // The next name keeps its case in canonical form.
        let digestable = rdata.to_digestable(None).unwrap();
        assert_eq!(&digestable[..5], b"\x04Host");
    }

    #[test]
    fn nsec_empty_bitmap() {
        let rdata = Nsec::new(name("a."), Vec::<Rtype>::new());
        test_compose_parse(&rdata);
        assert_eq!(rdata.to_string(), "a.");
    }

    #[test]
    fn nsec_bad_bitmaps() {
        let parse = |data: &[u8]| {
            let mut parser = Parser::from_ref(data);
            Nsec::parse_rdata(Class::IN, Rtype::NSEC, &mut parser, None)
        };
        assert!(parse(&b"\x00\x00\x00"[..]).is_err());
        assert!(parse(&b"\x00\x00\x21"[..]).is_err());
        assert!(parse(&b"\x00\x01\x01\x40\x00\x01\x40"[..]).is_err());
        assert!(parse(&b"\x00\x00\x02\x40"[..]).is_err());
        assert!(parse(&b"\x00\x00\x02\x40\x00"[..]).is_err());
        assert!(parse(&b"\x00\x00\x01\x00"[..]).is_err());
    }

    #[test]
    fn replace_rrsig() {
        let rdata = Rrsig::new(
            Rtype::A,
            8,
            2,
            3600,
            Timestamp::from(2),
            Timestamp::from(1),
            1,
            name("example."),
            Bytes::new(),
        );
        let new = rdata
            .replace([
                ("type_covered", FieldValue::Rtype(Rtype::MX)),
                ("signature", FieldValue::Octets(Bytes::from_static(b"x"))),
            ])
            .unwrap();
        assert_eq!(new.covers(), Rtype::MX);
        assert_eq!(new.signature().as_ref(), b"x");
        assert_eq!(rdata.covers(), Rtype::A);
        assert_eq!(
            new,
            rdata.with_signature(b"x".as_ref()).replace([("type_covered", FieldValue::Rtype(Rtype::MX))]).unwrap()
        );
    }
}
