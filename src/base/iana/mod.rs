//! IANA Definitions for DNS.
//!
//! This module contains types for parameters defined in IANA registries
//! that are relevant for record data.
//!
//! The types are newtypes around the raw integer with associated constants
//! for all well-defined values. Since the integer can’t be restricted to
//! only the undefined values, any value is allowed and a well-defined
//! constant compares equal to the raw value it stands for.
//!
//! There are two methods `from_int()` and `to_int()` to convert from and
//! to raw integer values as well as implementations of the `From` trait
//! for these. `FromStr` and `Display` are implemented to convert from
//! the string codes to the values and back.

pub use self::class::Class;
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod rtype;
