use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use octseq::parse::Parser;
use rstest::rstest;

use domain_rdata::base::iana::{Class, Rtype};
use domain_rdata::base::name::Name;
use domain_rdata::base::rdata::{ParseRdata, Rdata, RdataExt, ScanRdata};
use domain_rdata::base::scan::{ScanContext, SyntaxError, Tokenizer};
use domain_rdata::base::wire::{ComposeError, Composer, ParseError};
use domain_rdata::base::zonefile_fmt::Presenter;
use domain_rdata::rdata::{self, Builtin, Codec, CodecSource, Generic, Mx, Registry, A};
use domain_rdata::Error;

mod common;

//----------- A record type defined outside the crate ------------------------

/// Record data holding a single port number.
#[derive(Clone, Debug, PartialEq)]
struct Port {
    class: Class,
    rtype: Rtype,
    port: u16,
}

impl Rdata for Port {
    fn class(&self) -> Class {
        self.class
    }

    fn rtype(&self) -> Rtype {
        self.rtype
    }

    fn fmt_rdata(&self, p: &mut Presenter<'_>) {
        p.write_token(self.port)
    }

    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError> {
        target.append_u16(self.port)
    }
}

impl ParseRdata for Port {
    fn parse_rdata(
        class: Class,
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        _origin: Option<&Name>,
    ) -> Result<Self, ParseError> {
        Ok(Port {
            class,
            rtype,
            port: parser.parse_u16_be()?,
        })
    }
}

impl ScanRdata for Port {
    fn scan_rdata(
        class: Class,
        rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        _ctx: &ScanContext,
    ) -> Result<Self, SyntaxError> {
        let port = tokens.get_u16()?;
        tokens.expect_eol()?;
        Ok(Port { class, rtype, port })
    }
}

//----------- Tests ----------------------------------------------------------

#[test]
fn register_custom_type() {
    common::init_logging();

    let registry = Registry::new();
    let rtype = Rtype::from_int(65281);
    let ctx = ScanContext::default();

    // Before registration, the type is generic.
    let data = registry.from_text(Class::IN, rtype, "\\# 2 0035", &ctx).unwrap();
    assert!(data.is::<Generic>());

    registry
        .register_type(Codec::of::<Port>(), rtype, "port", false, Class::IN)
        .unwrap();
    assert_eq!(registry.rtype_to_text(rtype), "PORT");
    assert_eq!(registry.rtype_from_text("Port"), Some(rtype));
    assert!(!registry.is_singleton(rtype));

    let data = registry.from_text(Class::IN, rtype, "53", &ctx).unwrap();
    assert_eq!(data.downcast_ref::<Port>().unwrap().port, 53);
    assert_eq!(data.to_string(), "53");

    // The generic syntax now produces the registered type, too.
    let generic = registry.from_text(Class::IN, rtype, "\\# 2 0035", &ctx).unwrap();
    assert!(generic.is::<Port>());
    assert_eq!(generic, data);

    let wire = registry.from_wire(Class::IN, rtype, b"\x00\x35", 0, 2, None).unwrap();
    assert_eq!(wire, data);
    assert!(data.validate_with(&registry).is_ok());

    // Other classes are not affected.
    assert!(registry.codec(Class::CH, rtype).is_generic());
}

#[test]
fn register_for_any_class() {
    let registry = Registry::new();
    let rtype = Rtype::from_int(65282);
    registry
        .register_type(Codec::of::<Port>(), rtype, "PORT2", true, Class::ANY)
        .unwrap();
    for class in [Class::IN, Class::CH, Class::HS] {
        let data = registry
            .from_text(class, rtype, "80", &ScanContext::default())
            .unwrap();
        assert_eq!(data.class(), class);
        assert!(data.is::<Port>());
    }
    assert!(registry.is_singleton(rtype));
}

#[rstest]
#[case(Class::IN, Rtype::A)]
#[case(Class::IN, Rtype::MX)]
#[case(Class::CH, Rtype::TXT)]
#[case(Class::IN, Rtype::NSEC)]
fn register_builtin_fails(#[case] class: Class, #[case] rtype: Rtype) {
    let registry = Registry::new();
    assert_eq!(
        registry.register_type(Codec::of::<Port>(), rtype, "X", false, class),
        Err(Error::TypeExists { class, rtype })
    );
}

#[test]
fn register_in_global_registry() {
    let rtype = Rtype::from_int(65283);
    rdata::register_type(Codec::of::<Port>(), rtype, "GLOBALPORT", false, Class::IN)
        .unwrap();
    assert!(matches!(
        rdata::register_type(Codec::of::<Port>(), rtype, "GLOBALPORT", false, Class::IN),
        Err(Error::TypeExists { .. })
    ));
    let data = rdata::from_text(Class::IN, rtype, "8080", &ScanContext::default()).unwrap();
    assert!(data.is::<Port>());
    assert_eq!(Registry::global().rtype_to_text(rtype), "GLOBALPORT");
}

#[test]
fn wire_only_type() {
    let registry = Registry::new();
    let rtype = Rtype::from_int(65284);
    registry
        .register_type(Codec::wire_only::<Port>(), rtype, "WIREPORT", false, Class::IN)
        .unwrap();
    assert_eq!(
        registry.from_text(Class::IN, rtype, "53", &ScanContext::default()),
        Err(Error::Unimplemented {
            op: "from_text",
            rtype
        })
    );
    let data = registry
        .from_text(Class::IN, rtype, "\\# 2 0035", &ScanContext::default())
        .unwrap();
    assert_eq!(data.downcast_ref::<Port>().unwrap().port, 53);
}

#[test]
fn concurrent_first_use() {
    common::init_logging();

    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();
    let registry = Registry::with_source(move |class: &str, rtype: &str| {
        counter.fetch_add(1, Ordering::SeqCst);
        Builtin.load(class, rtype)
    });
    let rtype = Rtype::from_int(9999);
    let text = "\\# 4 c0000201";

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let data = registry
                    .from_text(Class::IN, rtype, text, &ScanContext::default())
                    .unwrap();
                assert!(data.is::<Generic>());
                let data = registry
                    .from_text(Class::IN, Rtype::MX, "10 mx.", &ScanContext::default())
                    .unwrap();
                assert!(data.is::<Mx>());
            });
        }
    });

    // Each miss asks the source for the class and for ANY exactly once.
    // MX is found through the lookup for class ANY.
    assert_eq!(loads.load(Ordering::SeqCst), 4);
}

#[test]
fn source_resolution() {
    let registry = Registry::with_source(|class: &str, rtype: &str| match (class, rtype) {
        ("CH", "A") => Some(Codec::of::<A>()),
        _ => None,
    });
    let ctx = ScanContext::default();
    let data = registry.from_text(Class::CH, Rtype::A, "10.0.0.1", &ctx).unwrap();
    assert!(data.is::<A>());
    assert_eq!(data.class(), Class::CH);
    assert!(registry.codec(Class::IN, Rtype::A).is_generic());
    assert!(matches!(
        registry.from_text(Class::IN, Rtype::A, "10.0.0.1", &ctx),
        Err(Error::Syntax(_))
    ));
}

#[test]
fn type_names() {
    let registry = Registry::new();
    assert_eq!(registry.rtype_to_text(Rtype::NSAPPTR), "NSAP-PTR");
    assert_eq!(registry.rtype_from_text("nsap-ptr"), Some(Rtype::NSAPPTR));
    assert_eq!(registry.rtype_from_text("TYPE65000"), Some(Rtype::from_int(65000)));
    assert_eq!(registry.rtype_from_text("bogus"), None);
    assert_eq!(Rtype::from_str("mx"), Ok(Rtype::MX));
}
