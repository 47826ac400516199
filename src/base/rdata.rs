//! Resource record data.
//!
//! Each resource record type has it’s own definition of the content and
//! formatting of its data. This module provides the basics for implementing
//! specific types for this record data. The concrete implementations for
//! well-known record types live in the top-level [`rdata`][crate::rdata]
//! module.
//!
//! Any type that represents record data implements [`Rdata`]. It provides
//! the class and record type and knows how to write itself in presentation
//! and wire format. Everything else is derived from these by the sealed
//! [`RdataExt`] trait which is implemented for every record data type and
//! cannot be overridden. If the data can also be created from wire format
//! or from a zone file, the type in addition implements [`ParseRdata`] or
//! [`ScanRdata`], respectively.
//!
//! Values of record data are shared through [`RecordData`], a cheap handle
//! around an `Arc<dyn Rdata>`. Equality, ordering, and hashing of record
//! data always go through the canonical wire format of [RFC 4034].
//! Concrete types receive the same impls via the `rdata_impls!` macro.
//!
//! Record data is immutable. [`Replace`] creates a copy with some fields
//! replaced.
//!
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

use super::cmp::CanonicalOrd;
use super::iana::{Class, Rtype};
use super::name::Name;
use super::scan::{ScanContext, SyntaxError, Tokenizer};
use super::wire::{ComposeError, Composer, NameCompressor, ParseError};
use super::zonefile_fmt::{Presenter, TextOptions};
use crate::error::Error;
use crate::rdata::Generic;
use crate::rdata::registry::Registry;
use bytes::Bytes;
use core::any::Any;
use core::cmp::Ordering;
use core::{fmt, hash, ops};
use octseq::parse::Parser;
use tracing::warn;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use thiserror::Error;

//----------- Rdata ----------------------------------------------------------

/// A type that represents record data.
///
/// Implementations provide the class and record type of the data, its
/// presentation format via [`fmt_rdata`][Self::fmt_rdata], and its wire
/// format via [`compose_rdata`][Self::compose_rdata]. All other operations
/// are provided by [`RdataExt`].
pub trait Rdata: AsAny + fmt::Debug + Send + Sync {
    /// Returns the class of the record data.
    fn class(&self) -> Class;

    /// Returns the record type of the record data.
    ///
    /// This is a method rather than an associated function to allow one
    /// type to be used for several real record types.
    fn rtype(&self) -> Rtype;

    /// Returns the record type this data covers.
    ///
    /// Only signatures cover another type. All other types return
    /// `Rtype::NONE`.
    fn covers(&self) -> Rtype {
        Rtype::NONE
    }

    /// Writes the presentation format of the data.
    fn fmt_rdata(&self, p: &mut Presenter<'_>);

    /// Appends the wire format of the record data.
    ///
    /// If the target is in canonical mode, the canonical form is to be
    /// produced.
    fn compose_rdata(&self, target: &mut Composer<'_>) -> Result<(), ComposeError>;

    /// Returns the name of the type for diagnostics.
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

//----------- AsAny ----------------------------------------------------------

/// Access to a record data value as `dyn Any` for downcasting.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

//----------- RdataExt -------------------------------------------------------

mod sealed {
    pub trait Sealed {}

    impl<T: super::Rdata + ?Sized> Sealed for T {}
}

/// Operations available on all record data.
///
/// This trait is implemented for every type implementing [`Rdata`] and
/// cannot be implemented elsewhere.
pub trait RdataExt: Rdata + sealed::Sealed {
    /// Returns record type and covered type combined into a single value.
    ///
    /// The covered type is in the upper 16 bits.
    fn extended_rtype(&self) -> u32;

    /// Returns the presentation format of the data.
    ///
    /// If `relativize` is `true` and `origin` is given, names below the
    /// origin are written relative to it.
    fn to_text(
        &self,
        origin: Option<&Name>,
        relativize: bool,
        options: &TextOptions,
    ) -> String;

    /// Appends the wire format to `target`.
    ///
    /// Names in those record types that allow it are compressed if a
    /// compressor is given. Relative names are made absolute via `origin`.
    /// On error, `target` is left unchanged and the compressor forgets
    /// any names written during the call.
    fn to_wire(
        &self,
        target: &mut Vec<u8>,
        compress: Option<&mut NameCompressor>,
        origin: Option<&Name>,
    ) -> Result<(), ComposeError>;

    /// Returns the data as generic record data.
    fn to_generic(&self, origin: Option<&Name>) -> Result<Generic, ComposeError>;

    /// Returns the canonical wire format for use in DNSSEC digests.
    ///
    /// Relative names are made absolute via `origin` or the root.
    fn to_digestable(&self, origin: Option<&Name>) -> Result<Bytes, ComposeError>;

    /// Checks that the data survives a round trip through its text format.
    ///
    /// Uses the process-wide registry.
    fn validate(&self) -> Result<(), Error>;

    /// Checks the text round trip using the given registry.
    fn validate_with(&self, registry: &Registry) -> Result<(), Error>;
}

impl<T: Rdata + ?Sized> RdataExt for T {
    fn extended_rtype(&self) -> u32 {
        (u32::from(self.covers().to_int()) << 16) | u32::from(self.rtype().to_int())
    }

    fn to_text(
        &self,
        origin: Option<&Name>,
        relativize: bool,
        options: &TextOptions,
    ) -> String {
        let mut p = Presenter::new(origin, relativize, options);
        self.fmt_rdata(&mut p);
        p.finish()
    }

    fn to_wire(
        &self,
        target: &mut Vec<u8>,
        compress: Option<&mut NameCompressor>,
        origin: Option<&Name>,
    ) -> Result<(), ComposeError> {
        let start = target.len();
        let mut compress = compress;
        let res = self.compose_rdata(&mut Composer::new(
            target,
            compress.as_deref_mut(),
            origin,
            false,
        ));
        if res.is_err() {
            target.truncate(start);
            if let Some(compress) = compress {
                compress.truncate(start);
            }
        }
        res
    }

    fn to_generic(&self, origin: Option<&Name>) -> Result<Generic, ComposeError> {
        let mut data = Vec::new();
        self.to_wire(&mut data, None, origin)?;
        Generic::from_octets(self.class(), self.rtype(), data)
    }

    fn to_digestable(&self, origin: Option<&Name>) -> Result<Bytes, ComposeError> {
        let root = Name::root();
        let mut data = Vec::new();
        self.compose_rdata(&mut Composer::new(
            &mut data,
            None,
            Some(origin.unwrap_or(&root)),
            true,
        ))?;
        Ok(data.into())
    }

    fn validate(&self) -> Result<(), Error> {
        self.validate_with(Registry::global())
    }

    fn validate_with(&self, registry: &Registry) -> Result<(), Error> {
        let text = self.to_text(None, false, &TextOptions::default());
        registry
            .from_text(self.class(), self.rtype(), &text, &ScanContext::default())
            .map(|_| ())
    }
}

//----------- Canonical comparison -------------------------------------------

/// Returns the canonical wire format used for comparison and hashing.
///
/// Names are made absolute relative to the root, so composing cannot fail
/// for data that was successfully created.
fn canonical_octets<T: Rdata + ?Sized>(data: &T) -> Vec<u8> {
    let root = Name::root();
    let mut res = Vec::new();
    if let Err(err) = data.compose_rdata(&mut Composer::new(&mut res, None, Some(&root), true)) {
        warn!(
            "canonical form of {} record data failed to compose: {}",
            data.rtype(),
            err
        );
    }
    res
}

#[doc(hidden)]
pub fn canonical_eq<T: Rdata + ?Sized, U: Rdata + ?Sized>(left: &T, right: &U) -> bool {
    left.class() == right.class()
        && left.rtype() == right.rtype()
        && canonical_octets(left) == canonical_octets(right)
}

#[doc(hidden)]
pub fn canonical_partial_cmp<T: Rdata + ?Sized, U: Rdata + ?Sized>(
    left: &T,
    right: &U,
) -> Option<Ordering> {
    if left.class() != right.class() || left.rtype() != right.rtype() {
        return None;
    }
    Some(canonical_octets(left).cmp(&canonical_octets(right)))
}

#[doc(hidden)]
pub fn canonical_cmp<T: Rdata + ?Sized, U: Rdata + ?Sized>(left: &T, right: &U) -> Ordering {
    left.class()
        .cmp(&right.class())
        .then_with(|| left.rtype().cmp(&right.rtype()))
        .then_with(|| canonical_octets(left).cmp(&canonical_octets(right)))
}

#[doc(hidden)]
pub fn canonical_hash<T: Rdata + ?Sized, H: hash::Hasher>(data: &T, state: &mut H) {
    hash::Hash::hash(&canonical_octets(data), state)
}

/// Implements comparison, hashing and display for a record data type.
///
/// Equality and ordering are only defined for data of the same class and
/// record type and compare the canonical wire format.
macro_rules! rdata_impls {
    ($ty:ident) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::base::rdata::canonical_eq(self, other)
            }
        }

        impl Eq for $ty {}

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                $crate::base::rdata::canonical_partial_cmp(self, other)
            }
        }

        impl $crate::base::cmp::CanonicalOrd for $ty {
            fn canonical_cmp(&self, other: &Self) -> core::cmp::Ordering {
                $crate::base::rdata::canonical_cmp(self, other)
            }
        }

        impl core::hash::Hash for $ty {
            fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
                $crate::base::rdata::canonical_hash(self, state)
            }
        }

        impl core::fmt::Display for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.write_str(&$crate::base::rdata::RdataExt::to_text(
                    self,
                    None,
                    true,
                    &Default::default(),
                ))
            }
        }

        impl From<$ty> for $crate::base::rdata::RecordData {
            fn from(data: $ty) -> Self {
                $crate::base::rdata::RecordData::new(data)
            }
        }
    };
}

//----------- RecordData -----------------------------------------------------

/// A shared, immutable record data value of any type.
///
/// This is what the dispatch functions of the
/// [`registry`][crate::rdata::registry] return. It dereferences to
/// `dyn Rdata` so all of [`RdataExt`] is available and can be downcast into
/// the concrete type via [`downcast_ref`][Self::downcast_ref].
#[derive(Clone)]
pub struct RecordData(Arc<dyn Rdata>);

impl RecordData {
    pub fn new<T: Rdata + 'static>(data: T) -> Self {
        RecordData(Arc::new(data))
    }

    /// Returns a reference to the concrete type if it is `T`.
    #[must_use]
    pub fn downcast_ref<T: Rdata + 'static>(&self) -> Option<&T> {
        AsAny::as_any(&*self.0).downcast_ref()
    }

    /// Returns whether the concrete type is `T`.
    #[must_use]
    pub fn is<T: Rdata + 'static>(&self) -> bool {
        AsAny::as_any(&*self.0).is::<T>()
    }

    #[must_use]
    pub fn as_rdata(&self) -> &dyn Rdata {
        &*self.0
    }
}

//--- Deref

impl ops::Deref for RecordData {
    type Target = dyn Rdata;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

//--- PartialEq, Eq, PartialOrd, CanonicalOrd, and Hash

impl PartialEq for RecordData {
    fn eq(&self, other: &Self) -> bool {
        canonical_eq(&*self.0, &*other.0)
    }
}

impl Eq for RecordData {}

impl PartialOrd for RecordData {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        canonical_partial_cmp(&*self.0, &*other.0)
    }
}

impl CanonicalOrd for RecordData {
    fn canonical_cmp(&self, other: &Self) -> Ordering {
        canonical_cmp(&*self.0, &*other.0)
    }
}

impl hash::Hash for RecordData {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        canonical_hash(&*self.0, state)
    }
}

//--- Display and Debug

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0.to_text(None, true, &TextOptions::default()))
    }
}

impl fmt::Debug for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

//------------ ParseRdata ----------------------------------------------------

/// A record data type that can be parsed from wire format.
pub trait ParseRdata: Rdata + Sized {
    /// Parses the record data.
    ///
    /// The `parser` is positioned at the beginning of the record data and
    /// is limited to the length of the data. It may, however, have been
    /// created over a complete message so that compressed names can be
    /// followed. The data must consume the whole parser; the caller checks
    /// this.
    ///
    /// If `origin` is given, names are made relative to it.
    fn parse_rdata(
        class: Class,
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        origin: Option<&Name>,
    ) -> Result<Self, ParseError>;
}

/// Parses a name in record data, relativizing it to `origin`.
pub fn parse_name(
    parser: &mut Parser<'_, [u8]>,
    origin: Option<&Name>,
) -> Result<Name, ParseError> {
    let name = Name::parse(parser)?;
    Ok(match origin {
        Some(origin) => name.relativize(origin),
        None => name,
    })
}

//------------ ScanRdata -----------------------------------------------------

/// A record data type that can be scanned from zone file text.
pub trait ScanRdata: Rdata + Sized {
    /// Scans the record data from the tokens of a single entry.
    ///
    /// The tokenizer is positioned after the record type. The
    /// implementation must consume the end of the entry.
    fn scan_rdata(
        class: Class,
        rtype: Rtype,
        tokens: &mut Tokenizer<'_>,
        ctx: &ScanContext,
    ) -> Result<Self, SyntaxError>;
}

//------------ Replace -------------------------------------------------------

/// Creating a copy of record data with some fields replaced.
///
/// Each record data type additionally provides typed `with_*` methods.
/// This trait offers the same by field name for generic code.
pub trait Replace: Rdata + Clone {
    /// The names of the fields that can be replaced.
    const FIELDS: &'static [&'static str];

    /// Replaces a single field of `self`.
    ///
    /// The name has already been checked against [`FIELDS`][Self::FIELDS].
    fn replace_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError>;

    /// Returns a copy of `self` with the given fields replaced.
    ///
    /// The class and record type cannot be replaced. `self` is never
    /// changed.
    fn replace<'n, I>(&self, fields: I) -> Result<Self, FieldError>
    where
        I: IntoIterator<Item = (&'n str, FieldValue)>,
    {
        let mut res = self.clone();
        for (name, value) in fields {
            if matches!(name, "class" | "rtype" | "type") {
                return Err(FieldError::Immutable(name.into()));
            }
            if !Self::FIELDS.contains(&name) {
                return Err(FieldError::Unknown(name.into()));
            }
            res.replace_field(name, value)?;
        }
        Ok(res)
    }
}

//------------ FieldValue ----------------------------------------------------

/// A new value for a record data field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    Rtype(Rtype),
    Octets(Bytes),
    Name(Name),
    Strings(Arc<[Bytes]>),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Types(Arc<[Rtype]>),
}

//============ Error Types ===================================================

//------------ FieldError ----------------------------------------------------

/// A field could not be replaced.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FieldError {
    #[error("unknown field '{0}'")]
    Unknown(String),

    #[error("field '{0}' cannot be replaced")]
    Immutable(String),

    #[error("wrong kind of value for field '{0}'")]
    Kind(String),

    #[error("invalid value for field '{field}': {msg}")]
    Invalid { field: String, msg: String },
}

impl FieldError {
    pub(crate) fn kind(name: &str) -> Self {
        FieldError::Kind(name.into())
    }

    pub(crate) fn invalid(name: &str, msg: impl fmt::Display) -> Self {
        FieldError::Invalid {
            field: name.into(),
            msg: msg.to_string(),
        }
    }
}

//============ Testing =======================================================
