//! Creating and consuming data in wire format.
//!
//! Parsing uses octseq’s [`Parser`] directly. This module adds the error
//! types for parsing and the [`Composer`] which record data writes its wire
//! format into.
//!
//! [`Parser`]: octseq::parse::Parser

use super::name::{Name, NameError};
use octseq::parse::ShortInput;
use std::collections::HashMap;
use thiserror::Error;

//------------ Composer ------------------------------------------------------

/// The target for composing record data in wire format.
///
/// The composer appends to a vec and carries the context needed for
/// writing domain names: an optional compression map, the origin for
/// relative names, and whether the canonical form of RFC 4034 is
/// requested. In canonical mode, names are never compressed and those
/// written via [`compose_name`][Self::compose_name] or
/// [`compose_compressible_name`][Self::compose_compressible_name] are
/// lowercased.
pub struct Composer<'a> {
    target: &'a mut Vec<u8>,
    compressor: Option<&'a mut NameCompressor>,
    origin: Option<&'a Name>,
    canonical: bool,
}

impl<'a> Composer<'a> {
    /// Creates a composer appending to `target`.
    pub fn new(
        target: &'a mut Vec<u8>,
        compressor: Option<&'a mut NameCompressor>,
        origin: Option<&'a Name>,
        canonical: bool,
    ) -> Self {
        Composer {
            target,
            compressor,
            origin,
            canonical,
        }
    }

    /// Returns whether the canonical form is being composed.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.canonical
    }

    /// Returns the current length of the target.
    #[must_use]
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Returns whether the target is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    pub fn append_slice(&mut self, slice: &[u8]) -> Result<(), ComposeError> {
        self.target.extend_from_slice(slice);
        Ok(())
    }

    pub fn append_u8(&mut self, value: u8) -> Result<(), ComposeError> {
        self.target.push(value);
        Ok(())
    }

    pub fn append_u16(&mut self, value: u16) -> Result<(), ComposeError> {
        self.append_slice(&value.to_be_bytes())
    }

    pub fn append_u32(&mut self, value: u32) -> Result<(), ComposeError> {
        self.append_slice(&value.to_be_bytes())
    }

    /// Appends octets prefixed by their length as a single octet.
    pub fn append_charstr(&mut self, data: &[u8]) -> Result<(), ComposeError> {
        let len = u8::try_from(data.len()).map_err(|_| ComposeError::LongData)?;
        self.append_u8(len)?;
        self.append_slice(data)
    }

    /// Appends a name using compression if available.
    ///
    /// Only names in the record types of RFC 1035 may be compressed. All
    /// other types must use [`compose_name`][Self::compose_name].
    pub fn compose_compressible_name(&mut self, name: &Name) -> Result<(), ComposeError> {
        let name = self.absolute(name)?;
        if self.canonical {
            return self.append_slice(name.to_lowercase().as_slice());
        }
        let start = self.target.len();
        let compressor = match self.compressor.as_deref_mut() {
            Some(compressor) => compressor,
            None => {
                self.target.extend_from_slice(name.as_slice());
                return Ok(());
            }
        };
        for (pos, suffix) in name.suffixes() {
            if suffix.is_root() {
                break;
            }
            if let Some(offset) = compressor.get(&suffix) {
                self.target.extend_from_slice(&name.as_slice()[..pos]);
                self.target.extend_from_slice(&(offset | 0xC000).to_be_bytes());
                return Ok(());
            }
            compressor.insert(suffix, start + pos);
        }
        self.target.extend_from_slice(name.as_slice());
        Ok(())
    }

    /// Appends a name without compression.
    ///
    /// The name is lowercased in canonical mode.
    pub fn compose_name(&mut self, name: &Name) -> Result<(), ComposeError> {
        let name = self.absolute(name)?;
        if self.canonical {
            self.append_slice(name.to_lowercase().as_slice())
        } else {
            self.append_slice(name.as_slice())
        }
    }

    /// Appends a name without compression and without changing its case.
    pub fn compose_name_as_is(&mut self, name: &Name) -> Result<(), ComposeError> {
        let name = self.absolute(name)?;
        self.append_slice(name.as_slice())
    }

    fn absolute(&self, name: &Name) -> Result<Name, ComposeError> {
        let name = name.derelativize(self.origin)?;
        if name.is_absolute() {
            Ok(name)
        } else {
            Err(ComposeError::RelativeName)
        }
    }
}

//------------ NameCompressor ------------------------------------------------

/// The name compression state of a message being assembled.
///
/// Maps each absolute name suffix already written to its offset in the
/// target. Lookups ignore ASCII case.
#[derive(Clone, Debug, Default)]
pub struct NameCompressor {
    map: HashMap<Name, u16>,
}

impl NameCompressor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the offset of a name written earlier.
    #[must_use]
    pub fn get(&self, name: &Name) -> Option<u16> {
        self.map.get(name).copied()
    }

    /// Records that `name` was written at offset `pos`.
    ///
    /// Offsets beyond the reach of a compression pointer are ignored, as
    /// are names already known.
    pub fn insert(&mut self, name: Name, pos: usize) {
        // Pointers only have 14 bits for the offset.
        if let Ok(pos) = u16::try_from(pos) {
            if pos < 0x4000 {
                self.map.entry(name).or_insert(pos);
            }
        }
    }

    /// Forgets all names written at or after offset `len`.
    ///
    /// Use this after truncating the target back to `len`.
    pub fn truncate(&mut self, len: usize) {
        self.map.retain(|_, pos| usize::from(*pos) < len);
    }
}

//============ Error Types ===================================================

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the parser.
    #[error("unexpected end of input")]
    ShortInput,

    /// A formatting error occurred.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The record data did not consume its declared length.
    #[error("trailing data in record data")]
    TrailingData,
}

impl ParseError {
    /// Creates a new parse error as a form error with the given message.
    #[must_use]
    pub fn form_error(msg: &'static str) -> Self {
        FormError::new(msg).into()
    }
}

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::ShortInput
    }
}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("{0}")]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    #[must_use]
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }
}

//------------ ComposeError --------------------------------------------------

/// Record data could not be written in wire format.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ComposeError {
    /// A relative name was encountered and no origin was given.
    #[error("relative name without origin")]
    RelativeName,

    /// Making a name absolute exceeded the maximum name length.
    #[error("domain name too long")]
    LongName,

    /// A field exceeded the length its length prefix can express.
    #[error("data too long")]
    LongData,
}

impl From<NameError> for ComposeError {
    fn from(_: NameError) -> Self {
        ComposeError::LongName
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn compress_suffixes() {
        let mut buf = Vec::new();
        let mut compressor = NameCompressor::new();
        let mut composer = Composer::new(&mut buf, Some(&mut compressor), None, false);
        composer.compose_compressible_name(&name("example.com.")).unwrap();
        composer.compose_compressible_name(&name("WWW.Example.com.")).unwrap();
        composer.compose_name(&name("example.com.")).unwrap();
        assert_eq!(
            buf,
            b"\x07example\x03com\x00\x03WWW\xc0\x00\x07example\x03com\x00"
        );
    }

    #[test]
    fn canonical_lowercases() {
        let mut buf = Vec::new();
        let mut compressor = NameCompressor::new();
        let mut composer = Composer::new(&mut buf, Some(&mut compressor), None, true);
        composer.compose_compressible_name(&name("A.")).unwrap();
        composer.compose_compressible_name(&name("A.")).unwrap();
        composer.compose_name_as_is(&name("A.")).unwrap();
        assert_eq!(buf, b"\x01a\x00\x01a\x00\x01A\x00");
    }

    #[test]
    fn relative_names() {
        let mut buf = Vec::new();
        let mut composer = Composer::new(&mut buf, None, None, false);
        assert_eq!(
            composer.compose_name(&name("www")),
            Err(ComposeError::RelativeName)
        );
        let origin = name("example.");
        let mut composer = Composer::new(&mut buf, None, Some(&origin), false);
        composer.compose_name(&name("www")).unwrap();
        assert_eq!(buf, b"\x03www\x07example\x00");
    }
}
