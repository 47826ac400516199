//! Basics.
//!
//! This module provides the types and traits record data is built from:
//! domain names, the IANA registries for classes and record types, the
//! tokenizer for zone file text, the presentation format writer, and the
//! wire format composer with its error types.
//!
//! The [`Rdata`] trait defined in the [rdata] module is the interface all
//! record data types implement. Its companion [`RdataExt`] provides the
//! conversions every record data value supports, while [`RecordData`] is
//! a shared handle to record data of any type.
//!
//!
//! ## Parsing and Composing
//!
//! In order to easily distinguish the process of creating and disecting
//! wire-format data from other forms of representation conversion such as
//! reading from a zone file, we use the term *parsing* for extracting data
//! from a wire-format representation and *composing* for producing such a
//! representation. Reading zone file text is called *scanning*.

pub use self::cmp::CanonicalOrd;
pub use self::iana::{Class, Rtype};
pub use self::name::Name;
pub use self::rdata::{Rdata, RdataExt, RecordData};
pub use self::scan::{ScanContext, Tokenizer};
pub use self::wire::{Composer, NameCompressor};
pub use self::zonefile_fmt::TextOptions;

pub mod cmp;
pub mod iana;
pub mod name;
#[macro_use]
pub mod rdata;
pub mod scan;
pub mod wire;
pub mod zonefile_fmt;
