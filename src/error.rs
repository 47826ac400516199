//! The error type of the crate.
//!
//! Each stage has its own error type: [`SyntaxError`] for zone file text,
//! [`ParseError`] for wire format, [`ComposeError`] for writing wire format,
//! and [`FieldError`] for replacing fields. [`Error`] combines them with the
//! errors of the registry.

use crate::base::iana::{Class, Rtype};
use crate::base::rdata::FieldError;
use crate::base::scan::SyntaxError;
use crate::base::wire::{ComposeError, ParseError};
use thiserror::Error;

/// An error happened while converting record data.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Zone file text did not match the grammar of the record type.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Wire format data was malformed or inconsistent with its length.
    #[error("malformed record data: {0}")]
    Malformed(#[from] ParseError),

    /// Record data could not be written in wire format.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The record type does not support an operation.
    #[error("{op} is not implemented for record type {rtype}")]
    Unimplemented { op: &'static str, rtype: Rtype },

    /// A replaced field was invalid.
    #[error(transparent)]
    InvalidField(#[from] FieldError),

    /// A record type was registered that already has an implementation.
    #[error("record type {rtype} is already defined for class {class}")]
    TypeExists { class: Class, rtype: Rtype },
}
