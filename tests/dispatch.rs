use std::net::Ipv4Addr;
use std::str::FromStr;

use rstest::rstest;

use domain_rdata::base::iana::{Class, Rtype};
use domain_rdata::base::name::Name;
use domain_rdata::base::cmp::CanonicalOrd;
use domain_rdata::base::rdata::{Rdata, RdataExt, RecordData};
use domain_rdata::base::scan::{ScanContext, Tokenizer};
use domain_rdata::base::wire::{ComposeError, NameCompressor, ParseError};
use domain_rdata::base::zonefile_fmt::TextOptions;
use domain_rdata::rdata::{self, Cname, Generic, Mx, Ns, Registry, Txt, A};
use domain_rdata::Error;

mod common;

fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

fn scan(class: Class, rtype: Rtype, text: &str) -> Result<RecordData, Error> {
    rdata::from_text(class, rtype, text, &ScanContext::default())
}

//----------- Text -----------------------------------------------------------

#[test]
fn generic_syntax_for_unknown_type() {
    common::init_logging();

    let rtype = Rtype::from_int(9999);
    let data = scan(Class::IN, rtype, "\\# 4 c0000201").unwrap();
    let generic = data.downcast_ref::<Generic>().unwrap();
    assert_eq!(generic.data().as_ref(), b"\xc0\x00\x02\x01");
    assert_eq!(data.to_string(), "\\# 4 c0000201");
    assert_eq!(data.rtype(), rtype);

    let mut wire = Vec::new();
    data.to_wire(&mut wire, None, None).unwrap();
    assert_eq!(wire, b"\xc0\x00\x02\x01");
}

#[test]
fn generic_syntax_for_known_type() {
    let data = scan(Class::IN, Rtype::A, "\\# 4 c0000201").unwrap();
    let a = data.downcast_ref::<A>().unwrap();
    assert_eq!(a.addr(), Ipv4Addr::new(192, 0, 2, 1));
    assert_eq!(data, scan(Class::IN, Rtype::A, "192.0.2.1").unwrap());

    // Names in the generic data are made relative to the origin.
    let ctx = ScanContext::with_origin(name("example.com."));
    let data = rdata::from_text(
        Class::IN,
        Rtype::NS,
        "\\# 17 036e7331076578616d706c6503636f6d00",
        &ctx,
    )
    .unwrap();
    assert_eq!(
        data.downcast_ref::<Ns>().unwrap().nsdname(),
        &Name::from_labels([b"ns1".as_ref()], false).unwrap()
    );
}

#[rstest]
#[case(Rtype::A, "\\# 3 c00002")]
#[case(Rtype::A, "\\# 5 c000020101")]
#[case(Rtype::MX, "\\# 2 000a")]
#[case(Rtype::TXT, "\\# 0")]
fn generic_syntax_with_bad_data(#[case] rtype: Rtype, #[case] text: &str) {
    assert!(matches!(
        scan(Class::IN, rtype, text),
        Err(Error::Malformed(_))
    ));
}

#[rstest]
#[case(Rtype::A, "192.0.2")]
#[case(Rtype::A, "192.0.2.1 extra")]
#[case(Rtype::MX, "mail.example.com.")]
#[case(Rtype::MX, "70000 mail.example.com.")]
#[case(Rtype::from_int(9999), "c0000201")]
#[case(Rtype::from_int(9999), "\\# 5 c0000201")]
fn syntax_errors(#[case] rtype: Rtype, #[case] text: &str) {
    assert!(matches!(scan(Class::IN, rtype, text), Err(Error::Syntax(_))));
}

#[test]
fn names_and_origin() {
    let origin = name("example.com.");

    let ctx = ScanContext::with_origin(origin.clone());
    let data = rdata::from_text(Class::IN, Rtype::MX, "10 mail", &ctx).unwrap();
    assert_eq!(
        data.downcast_ref::<Mx>().unwrap().exchange(),
        &name("mail.example.com.")
    );
    assert_eq!(data.to_string(), "10 mail.example.com.");
    assert_eq!(
        data.to_text(Some(&origin), true, &TextOptions::default()),
        "10 mail"
    );

    // Relativized names need the origin for wire format.
    let ctx = ScanContext::with_origin(origin.clone()).relativize(true, None);
    let data = rdata::from_text(Class::IN, Rtype::CNAME, "www", &ctx).unwrap();
    let cname = data.downcast_ref::<Cname>().unwrap();
    assert!(!cname.cname().is_absolute());
    assert_eq!(data.to_string(), "www");

    let mut wire = Vec::new();
    assert_eq!(
        data.to_wire(&mut wire, None, None),
        Err(ComposeError::RelativeName)
    );
    assert!(wire.is_empty());
    data.to_wire(&mut wire, None, Some(&origin)).unwrap();
    assert_eq!(wire, b"\x03www\x07example\x03com\x00");

    // Relative names without an origin stay relative.
    let data = scan(Class::IN, Rtype::CNAME, "www").unwrap();
    assert_eq!(data.to_string(), "www");
}

#[test]
fn tokenizer_entries() {
    let registry = Registry::new();
    let ctx = ScanContext::default();
    let mut tokens = Tokenizer::new(
        "10 mx1.example. ; primary\n\
         20 (\n\
             mx2.example. )\n",
    );
    let first = registry
        .from_tokenizer(Class::IN, Rtype::MX, &mut tokens, &ctx)
        .unwrap();
    let second = registry
        .from_tokenizer(Class::IN, Rtype::MX, &mut tokens, &ctx)
        .unwrap();
    assert_eq!(first.to_string(), "10 mx1.example.");
    assert_eq!(second.to_string(), "20 mx2.example.");
    assert!(first.canonical_lt(&second));
}

#[test]
fn quoted_strings() {
    let data = scan(Class::IN, Rtype::TXT, "\"hello world\" foo \"\\\"q\\\"\" \\065").unwrap();
    let txt = data.downcast_ref::<Txt>().unwrap();
    assert_eq!(
        txt.strings(),
        [
            b"hello world".as_ref(),
            b"foo".as_ref(),
            b"\"q\"".as_ref(),
            b"A".as_ref()
        ]
    );
    assert_eq!(data.to_string(), "\"hello world\" \"foo\" \"\\\"q\\\"\" \"A\"");
}

//----------- Wire -----------------------------------------------------------

/// Returns a message with `example.com.` at offset 12 followed by MX data.
fn message() -> (Vec<u8>, usize, usize) {
    let mut msg = vec![0u8; 12];
    msg.extend_from_slice(b"\x07example\x03com\x00");
    let offset = msg.len();
    msg.extend_from_slice(b"\x00\x0a\x04mail\xc0\x0c");
    let len = msg.len() - offset;
    msg.extend_from_slice(b"\xff\xff");
    (msg, offset, len)
}

#[test]
fn compressed_names() {
    let (msg, offset, len) = message();
    let data = rdata::from_wire(Class::IN, Rtype::MX, &msg, offset, len, None).unwrap();
    let mx = data.downcast_ref::<Mx>().unwrap();
    assert_eq!(mx.preference(), 10);
    assert_eq!(mx.exchange(), &name("mail.example.com."));

    let origin = name("example.com.");
    let data =
        rdata::from_wire(Class::IN, Rtype::MX, &msg, offset, len, Some(&origin)).unwrap();
    assert_eq!(data.to_string(), "10 mail");

    // Uncompressed output unless a compressor is given.
    let mut wire = Vec::new();
    data.to_wire(&mut wire, None, Some(&origin)).unwrap();
    assert_eq!(wire, b"\x00\x0a\x04mail\x07example\x03com\x00");

    let mut compressor = NameCompressor::new();
    let mut wire = b"\x07example\x03com\x00".to_vec();
    compressor.insert(name("example.com."), 0);
    data.to_wire(&mut wire, Some(&mut compressor), Some(&origin))
        .unwrap();
    assert_eq!(&wire[13..], b"\x00\x0a\x04mail\xc0\x00");
}

#[test]
fn bad_wire_data() {
    let (msg, offset, len) = message();
    let registry = Registry::new();

    assert!(matches!(
        registry.from_wire(Class::IN, Rtype::MX, &msg, offset, len + 1, None),
        Err(Error::Malformed(ParseError::TrailingData))
    ));
    assert!(matches!(
        registry.from_wire(Class::IN, Rtype::MX, &msg, offset, len - 1, None),
        Err(Error::Malformed(_))
    ));
    assert!(matches!(
        registry.from_wire(Class::IN, Rtype::MX, &msg, offset, msg.len(), None),
        Err(Error::Malformed(ParseError::ShortInput))
    ));

    // Pointers must point backwards.
    let wire = b"\x00\x0a\xc0\x02";
    assert!(matches!(
        registry.from_wire(Class::IN, Rtype::MX, wire, 0, 4, None),
        Err(Error::Malformed(_))
    ));
}

#[test]
fn empty_rdata() {
    let registry = Registry::new();
    let data = registry
        .from_wire(Class::IN, Rtype::from_int(9999), b"", 0, 0, None)
        .unwrap();
    assert_eq!(data.to_string(), "\\# 0");
    assert!(matches!(
        registry.from_wire(Class::IN, Rtype::A, b"", 0, 0, None),
        Err(Error::Malformed(ParseError::ShortInput))
    ));
}
