//! Record data for the DNS.
//!
//! This crate converts the record data of DNS resource records between
//! three forms: zone file text, wire format, and typed values. It provides
//! typed record data for a set of common record types and a generic
//! representation for all other types following [RFC 3597].
//!
//! # Modules
//!
//! * [base] contains the fundamental types such as domain names, classes,
//!   and record types as well as the [`Rdata`][base::Rdata] trait all
//!   record data implements,
//! * [rdata] contains the record data types and the
//!   [`Registry`][rdata::Registry] that picks the type for a class and
//!   record type,
//! * [utils] contains helpers for encoding binary data as text, and
//! * [error] contains the error type returned by the registry.
//!
//! # Example
//!
//! ```
//! use domain_rdata::base::{Class, RdataExt, Rtype, ScanContext};
//! use domain_rdata::rdata::{self, Mx};
//!
//! let data = rdata::from_text(
//!     Class::IN, Rtype::MX, "10 mail.example.com.", &ScanContext::default()
//! ).unwrap();
//! assert_eq!(data.downcast_ref::<Mx>().unwrap().preference(), 10);
//!
//! let mut wire = Vec::new();
//! data.to_wire(&mut wire, None, None).unwrap();
//! let parsed = rdata::from_wire(
//!     Class::IN, Rtype::MX, &wire, 0, wire.len(), None
//! ).unwrap();
//! assert_eq!(data, parsed);
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `serde`: Enables serde serialization for a number of basic types.
//!
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
pub mod base;
pub mod error;
pub mod rdata;
pub mod utils;

pub use self::error::Error;
