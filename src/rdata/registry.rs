//! The registry of record data types.
//!
//! The registry maps a pair of class and record type to the [`Codec`] that
//! creates record data of that type from zone file text or wire format.
//! Entries are resolved lazily on first use through a [`CodecSource`] and
//! then cached for the lifetime of the registry. Types without an
//! implementation resolve to [`Generic`] record data. Additional types can
//! be added via [`Registry::register_type`].
//!
//! The class `ANY` acts as a wildcard: a codec bound to `ANY` applies to
//! every class unless a codec for the specific class exists.
//!
//! Most applications use the process-wide registry returned by
//! [`Registry::global`] through the free functions of the
//! [`rdata`][crate::rdata] module. Separate registries can be created for
//! isolation, for instance in tests.

use super::generic::Generic;
use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::rdata::{ParseRdata, RecordData, ScanRdata};
use crate::base::scan::{ScanContext, Tokenizer};
use crate::base::wire::ParseError;
use crate::error::Error;
use core::fmt;
use core::marker::PhantomData;
use octseq::parse::Parser;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

//------------ RdataCodec ----------------------------------------------------

/// The operations for creating record data of one type.
///
/// Encoding is provided by the record data values themselves via
/// [`Rdata`][crate::base::rdata::Rdata].
pub trait RdataCodec: Send + Sync {
    /// Returns the name of the record data type.
    fn name(&self) -> &'static str;

    /// Returns whether this is the codec for generic record data.
    fn is_generic(&self) -> bool {
        false
    }

    /// Scans record data from zone file text.
    fn scan(
        &self,
        class: Class,
        rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        ctx: &ScanContext,
    ) -> Result<RecordData, Error>;

    /// Parses record data from wire format.
    ///
    /// The parser is limited to the record data.
    fn parse(
        &self,
        class: Class,
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        origin: Option<&Name>,
    ) -> Result<RecordData, ParseError>;
}

//------------ Codec ---------------------------------------------------------

/// A shared handle to the codec of a record data type.
#[derive(Clone)]
pub struct Codec(Arc<dyn RdataCodec>);

impl Codec {
    /// Creates a codec from an implementation.
    pub fn new(codec: impl RdataCodec + 'static) -> Self {
        Codec(Arc::new(codec))
    }

    /// Returns the codec for a type supporting both text and wire format.
    #[must_use]
    pub fn of<T: ParseRdata + ScanRdata + 'static>() -> Self {
        Self::new(TypedCodec::<T>(PhantomData))
    }

    /// Returns the codec for a type that can only be parsed from wire format.
    ///
    /// Scanning from text fails with [`Error::Unimplemented`] unless the
    /// text uses the generic syntax.
    #[must_use]
    pub fn wire_only<T: ParseRdata + 'static>() -> Self {
        Self::new(WireOnlyCodec::<T>(PhantomData))
    }

    /// Returns the codec for generic record data.
    #[must_use]
    pub fn generic() -> Self {
        static GENERIC: OnceLock<Codec> = OnceLock::new();
        GENERIC.get_or_init(|| Self::new(GenericCodec)).clone()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.0.is_generic()
    }

    pub fn scan(
        &self,
        class: Class,
        rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        ctx: &ScanContext,
    ) -> Result<RecordData, Error> {
        self.0.scan(class, rtype, tokens, ctx)
    }

    pub fn parse(
        &self,
        class: Class,
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        origin: Option<&Name>,
    ) -> Result<RecordData, ParseError> {
        self.0.parse(class, rtype, parser, origin)
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Codec").field(&self.name()).finish()
    }
}

//--- Codec implementations

struct TypedCodec<T>(PhantomData<fn() -> T>);

impl<T: ParseRdata + ScanRdata + 'static> RdataCodec for TypedCodec<T> {
    fn name(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    fn scan(
        &self,
        class: Class,
        rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        ctx: &ScanContext,
    ) -> Result<RecordData, Error> {
        Ok(RecordData::new(T::scan_rdata(class, rtype, tokens, ctx)?))
    }

    fn parse(
        &self,
        class: Class,
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        origin: Option<&Name>,
    ) -> Result<RecordData, ParseError> {
        T::parse_rdata(class, rtype, parser, origin).map(RecordData::new)
    }
}

struct WireOnlyCodec<T>(PhantomData<fn() -> T>);

impl<T: ParseRdata + 'static> RdataCodec for WireOnlyCodec<T> {
    fn name(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    fn scan(
        &self,
        _class: Class,
        rtype: Rtype,
        _tokens: &mut Tokenizer<'_>,
        _ctx: &ScanContext,
    ) -> Result<RecordData, Error> {
        Err(Error::Unimplemented {
            op: "from_text",
            rtype,
        })
    }

    fn parse(
        &self,
        class: Class,
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        origin: Option<&Name>,
    ) -> Result<RecordData, ParseError> {
        T::parse_rdata(class, rtype, parser, origin).map(RecordData::new)
    }
}

struct GenericCodec;

impl RdataCodec for GenericCodec {
    fn name(&self) -> &'static str {
        core::any::type_name::<Generic>()
    }

    fn is_generic(&self) -> bool {
        true
    }

    fn scan(
        &self,
        class: Class,
        rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        ctx: &ScanContext,
    ) -> Result<RecordData, Error> {
        Ok(RecordData::new(Generic::scan_rdata(class, rtype, tokens, ctx)?))
    }

    fn parse(
        &self,
        class: Class,
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        origin: Option<&Name>,
    ) -> Result<RecordData, ParseError> {
        Generic::parse_rdata(class, rtype, parser, origin).map(RecordData::new)
    }
}

//------------ CodecSource ---------------------------------------------------

/// A source of codecs looked up by name.
///
/// The registry asks the source for a codec the first time a pair of class
/// and record type is used. The class is given as its mnemonic, e.g., `IN`
/// or `ANY`, or as `CLASSnnn`. The record type is given as its mnemonic with
/// any `-` replaced by `_`, e.g., `NSAP_PTR`, or as `TYPEnnn`.
pub trait CodecSource: Send + Sync {
    fn load(&self, class: &str, rtype: &str) -> Option<Codec>;
}

impl<F> CodecSource for F
where
    F: Fn(&str, &str) -> Option<Codec> + Send + Sync,
{
    fn load(&self, class: &str, rtype: &str) -> Option<Codec> {
        self(class, rtype)
    }
}

//------------ Registry ------------------------------------------------------

/// The registry of record data types.
pub struct Registry {
    /// The resolved codecs.
    ///
    /// The whole sequence of lookup, resolution, and insertion happens
    /// under this lock.
    codecs: Mutex<HashMap<(Class, Rtype), Codec>>,

    /// Names and singleton flags of registered types.
    types: RwLock<TypeTable>,

    source: Box<dyn CodecSource>,
}

#[derive(Default)]
struct TypeTable {
    names: HashMap<Rtype, String>,
    by_name: HashMap<String, Rtype>,
    singletons: HashMap<Rtype, bool>,
}

impl Registry {
    /// Creates a registry with the types built into the crate.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(super::Builtin)
    }

    /// Creates a registry resolving codecs through `source`.
    pub fn with_source(source: impl CodecSource + 'static) -> Self {
        Registry {
            codecs: Mutex::new(HashMap::new()),
            types: RwLock::new(TypeTable::default()),
            source: Box::new(source),
        }
    }

    /// Returns the process-wide registry.
    ///
    /// It is created with the built-in types on first use.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Returns the codec for the given class and record type.
    ///
    /// Resolution proceeds in this order:
    ///
    /// 1. a codec already bound to the class and type,
    /// 2. a codec bound to class `ANY` and the type,
    /// 3. a codec for the class and type from the source,
    /// 4. a codec for class `ANY` and the type from the source,
    /// 5. the generic codec.
    ///
    /// The result is bound to the class and type, so later calls always
    /// return the same codec.
    pub fn codec(&self, class: Class, rtype: Rtype) -> Codec {
        let mut codecs = self.codecs.lock();
        self.resolve(&mut codecs, class, rtype)
    }

    fn resolve(
        &self,
        codecs: &mut HashMap<(Class, Rtype), Codec>,
        class: Class,
        rtype: Rtype,
    ) -> Codec {
        if let Some(codec) = codecs.get(&(class, rtype)) {
            return codec.clone();
        }
        if let Some(codec) = codecs.get(&(Class::ANY, rtype)).cloned() {
            trace!("Using {} for {} {} via class ANY", codec.name(), class, rtype);
            codecs.insert((class, rtype), codec.clone());
            return codec;
        }

        let class_text = class.to_string();
        let rtype_text = self.rtype_to_text(rtype).replace('-', "_");
        if let Some(codec) = self.source.load(&class_text, &rtype_text) {
            debug!("Loaded {} for {} {}", codec.name(), class_text, rtype_text);
            codecs.insert((class, rtype), codec.clone());
            return codec;
        }
        if let Some(codec) = self.source.load("ANY", &rtype_text) {
            debug!("Loaded {} for ANY {}", codec.name(), rtype_text);
            codecs.insert((Class::ANY, rtype), codec.clone());
            codecs.insert((class, rtype), codec.clone());
            return codec;
        }

        debug!("No codec for {} {}, using generic record data", class_text, rtype_text);
        let codec = Codec::generic();
        codecs.insert((class, rtype), codec.clone());
        codec
    }

    /// Registers a codec for a record type.
    ///
    /// Fails with [`Error::TypeExists`] if the class and type already
    /// resolve to a codec other than the generic one. Otherwise binds the
    /// codec and records `rtype_text` as the name of the type and whether
    /// RRsets of the type can only have a single member.
    ///
    /// The class is usually `IN` or, for types that apply to all classes,
    /// `ANY`.
    pub fn register_type(
        &self,
        codec: Codec,
        rtype: Rtype,
        rtype_text: &str,
        is_singleton: bool,
        class: Class,
    ) -> Result<(), Error> {
        let mut codecs = self.codecs.lock();
        if !self.resolve(&mut codecs, class, rtype).is_generic() {
            return Err(Error::TypeExists { class, rtype });
        }
        debug!("Registering {} for {} {}", codec.name(), class, rtype_text);
        codecs.insert((class, rtype), codec);

        let mut types = self.types.write();
        let upper = rtype_text.to_ascii_uppercase();
        if let Some(old) = types.names.insert(rtype, upper.clone()) {
            types.by_name.remove(&old);
        }
        types.by_name.insert(upper, rtype);
        types.singletons.insert(rtype, is_singleton);
        Ok(())
    }

    /// Returns the text form of a record type.
    ///
    /// Registered names take precedence over the built-in mnemonics.
    #[must_use]
    pub fn rtype_to_text(&self, rtype: Rtype) -> String {
        match self.types.read().names.get(&rtype) {
            Some(name) => name.clone(),
            None => rtype.to_string(),
        }
    }

    /// Returns the record type for its text form.
    #[must_use]
    pub fn rtype_from_text(&self, text: &str) -> Option<Rtype> {
        if let Some(rtype) = self.types.read().by_name.get(&text.to_ascii_uppercase()) {
            return Some(*rtype);
        }
        text.parse().ok()
    }

    /// Returns whether RRsets of the type can have only one member.
    #[must_use]
    pub fn is_singleton(&self, rtype: Rtype) -> bool {
        match self.types.read().singletons.get(&rtype) {
            Some(singleton) => *singleton,
            None => rtype.is_singleton(),
        }
    }
}

/// # Dispatch
///
impl Registry {
    /// Creates record data from zone file text.
    pub fn from_text(
        &self,
        class: Class,
        rtype: Rtype,
        text: &str,
        ctx: &ScanContext,
    ) -> Result<RecordData, Error> {
        self.from_tokenizer(class, rtype, &mut Tokenizer::new(text), ctx)
    }

    /// Creates record data from the tokens of a zone file entry.
    ///
    /// Any type can be given in the generic syntax of [RFC 3597]. If the
    /// type has a specific implementation, the generic data is parsed from
    /// wire format so the result always has the specific type.
    ///
    /// [RFC 3597]: https://tools.ietf.org/html/rfc3597
    pub fn from_tokenizer(
        &self,
        class: Class,
        rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        ctx: &ScanContext,
    ) -> Result<RecordData, Error> {
        let codec = self.codec(class, rtype);
        if !codec.is_generic() && tokens.peek()?.is_identifier("\\#") {
            trace!("Generic syntax for {} {}", class, rtype);
            let generic = Generic::scan_rdata(class, rtype, tokens, ctx)?;
            let data = generic.data();
            return self.from_wire(class, rtype, data, 0, data.len(), ctx.origin.as_ref());
        }
        codec.scan(class, rtype, tokens, ctx)
    }

    /// Creates record data from wire format.
    ///
    /// The record data is the `len` octets in `wire` starting at `offset`.
    /// Compressed names in the data may point anywhere before it in `wire`.
    /// All `len` octets must be used by the data. If `origin` is given,
    /// names are made relative to it.
    pub fn from_wire(
        &self,
        class: Class,
        rtype: Rtype,
        wire: &[u8],
        offset: usize,
        len: usize,
        origin: Option<&Name>,
    ) -> Result<RecordData, Error> {
        let end = offset.checked_add(len).ok_or(ParseError::ShortInput)?;
        if end > wire.len() {
            return Err(ParseError::ShortInput.into());
        }
        let mut parser = Parser::from_ref(wire);
        parser.advance(offset).map_err(ParseError::from)?;
        let mut parser = parser.parse_parser(len).map_err(ParseError::from)?;
        let codec = self.codec(class, rtype);
        let res = codec.parse(class, rtype, &mut parser, origin)?;
        if parser.remaining() != 0 {
            return Err(ParseError::TrailingData.into());
        }
        Ok(res)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::RdataExt;
    use crate::rdata::{Mx, A};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A source that counts lookups and only knows `IN A` and `ANY MX`.
    #[derive(Clone, Default)]
    struct Counting(Arc<Mutex<Vec<(String, String)>>>);

    impl CodecSource for Counting {
        fn load(&self, class: &str, rtype: &str) -> Option<Codec> {
            self.0.lock().push((class.into(), rtype.into()));
            match (class, rtype) {
                ("IN", "A") => Some(Codec::of::<A>()),
                ("ANY", "MX") => Some(Codec::of::<Mx>()),
                _ => None,
            }
        }
    }

    impl Counting {
        fn lookups(&self) -> Vec<(String, String)> {
            self.0.lock().clone()
        }
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(c, t)| (c.to_string(), t.to_string())).collect()
    }

    #[test]
    fn resolution_order() {
        let source = Counting::default();
        let registry = Registry::with_source(source.clone());

        assert!(!registry.codec(Class::IN, Rtype::A).is_generic());
        assert_eq!(source.lookups(), pairs(&[("IN", "A")]));

        assert!(!registry.codec(Class::IN, Rtype::MX).is_generic());
        assert_eq!(
            source.lookups(),
            pairs(&[("IN", "A"), ("IN", "MX"), ("ANY", "MX")])
        );

        // The ANY binding now applies to other classes without a lookup.
        assert!(!registry.codec(Class::CH, Rtype::MX).is_generic());
        assert_eq!(source.lookups().len(), 3);
    }

    #[test]
    fn misses_are_memoized() {
        let source = Counting::default();
        let registry = Registry::with_source(source.clone());
        let rtype = Rtype::from_int(9999);
        assert!(registry.codec(Class::IN, rtype).is_generic());
        assert!(registry.codec(Class::IN, rtype).is_generic());
        assert_eq!(
            source.lookups(),
            pairs(&[("IN", "TYPE9999"), ("ANY", "TYPE9999")])
        );
    }

    #[test]
    fn dashes_in_mnemonics() {
        let source = Counting::default();
        let registry = Registry::with_source(source.clone());
        registry.codec(Class::IN, Rtype::NSAPPTR);
        assert_eq!(source.lookups()[0], ("IN".into(), "NSAP_PTR".into()));
    }

    #[test]
    fn closure_source() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let registry = Registry::with_source(move |_: &str, _: &str| -> Option<Codec> {
            counter.fetch_add(1, Ordering::SeqCst);
            None
        });
        registry.codec(Class::IN, Rtype::TXT);
        registry.codec(Class::IN, Rtype::TXT);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn register_type_twice() {
        let registry = Registry::new();
        let rtype = Rtype::from_int(65280);
        registry
            .register_type(Codec::of::<Mx>(), rtype, "MYTYPE", true, Class::IN)
            .unwrap();
        assert_eq!(
            registry.register_type(Codec::of::<Mx>(), rtype, "MYTYPE", true, Class::IN),
            Err(Error::TypeExists {
                class: Class::IN,
                rtype
            })
        );
        assert_eq!(registry.rtype_to_text(rtype), "MYTYPE");
        assert_eq!(registry.rtype_from_text("mytype"), Some(rtype));
        assert!(registry.is_singleton(rtype));
        assert!(!registry.is_singleton(Rtype::A));
        assert!(registry.is_singleton(Rtype::CNAME));
    }

    #[test]
    fn register_builtin_type_fails() {
        let registry = Registry::new();
        assert!(matches!(
            registry.register_type(Codec::of::<A>(), Rtype::A, "A", false, Class::IN),
            Err(Error::TypeExists { .. })
        ));
    }

    #[test]
    fn from_wire_bounds() {
        let registry = Registry::new();
        let wire = b"\xff\xc0\x00\x02\x01\xff";
        let data = registry
            .from_wire(Class::IN, Rtype::A, wire, 1, 4, None)
            .unwrap();
        assert_eq!(data.to_text(None, true, &Default::default()), "192.0.2.1");
        assert!(matches!(
            registry.from_wire(Class::IN, Rtype::A, wire, 3, 4, None),
            Err(Error::Malformed(ParseError::ShortInput))
        ));
        assert!(matches!(
            registry.from_wire(Class::IN, Rtype::A, wire, 1, 5, None),
            Err(Error::Malformed(ParseError::TrailingData))
        ));
        assert!(matches!(
            registry.from_wire(Class::IN, Rtype::A, wire, 1, 3, None),
            Err(Error::Malformed(ParseError::ShortInput))
        ));
    }
}
