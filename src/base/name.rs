//! Domain names.
//!
//! Record data regularly embeds domain names. This module provides the one
//! name type used throughout the crate, [`Name`], which keeps the name in
//! its uncompressed wire format in a shared [`Bytes`] value.
//!
//! Domain names are a sequence of *labels* which are in turn a sequence of
//! up to 63 octets. In their wire-format representation labels are prefixed
//! with an octet containing the number of octets in the label. In an
//! *absolute* domain name, the last label is the empty *root label*. A name
//! without the root label is *relative* and needs an origin before it can
//! appear in a message.
//!
//! Names compare and hash ignoring ASCII case as prescribed by [RFC 4343].
//!
//! [RFC 4343]: https://tools.ietf.org/html/rfc4343

use super::wire::{FormError, ParseError};
use bytes::{BufMut, Bytes, BytesMut};
use core::{fmt, hash, str};
use octseq::parse::Parser;
use thiserror::Error;

//------------ Name ----------------------------------------------------------

/// A domain name, either absolute or relative.
#[derive(Clone)]
pub struct Name {
    /// The labels in wire format.
    ///
    /// If the name is absolute, the last label is the root label, i.e., the
    /// octets end in a single zero octet. The empty relative name has empty
    /// octets.
    octets: Bytes,
}

/// # Creation
///
impl Name {
    /// The maximum length of an absolute name in wire format.
    pub const MAX_LEN: usize = 255;

    /// The maximum length of a single label.
    pub const MAX_LABEL_LEN: usize = 63;

    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name {
            octets: Bytes::from_static(b"\0"),
        }
    }

    /// Returns the empty relative name.
    ///
    /// In presentation format, this name is written as `@`.
    #[must_use]
    pub fn empty() -> Self {
        Name {
            octets: Bytes::new(),
        }
    }

    /// Creates a name from a sequence of label contents.
    ///
    /// The root label must not be part of `labels`. If `absolute` is `true`,
    /// it is added.
    pub fn from_labels<'a, I>(labels: I, absolute: bool) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut octets = BytesMut::new();
        for label in labels {
            if label.is_empty() {
                return Err(NameError::EmptyLabel);
            }
            if label.len() > Self::MAX_LABEL_LEN {
                return Err(NameError::LongLabel);
            }
            octets.put_u8(label.len() as u8);
            octets.extend_from_slice(label);
        }
        if absolute {
            octets.put_u8(0);
        }
        Self::from_checked_octets(octets.freeze())
    }

    /// Checks the length of the octets and creates the name.
    fn from_checked_octets(octets: Bytes) -> Result<Self, NameError> {
        let absolute = octets.last() == Some(&0);
        let limit = if absolute {
            Self::MAX_LEN
        } else {
            Self::MAX_LEN - 1
        };
        if octets.len() > limit {
            Err(NameError::LongName)
        } else {
            Ok(Name { octets })
        }
    }

    /// Takes a possibly compressed name from the beginning of a parser.
    ///
    /// Compression pointers are resolved against the complete octets
    /// sequence the parser was created over, so the parser may well be
    /// limited to the record data while the name points into the message
    /// before it. Pointers must point backwards.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let message = parser.octets_ref();
        let mut octets = BytesMut::new();

        // Read labels from the parser itself until the root label or the
        // first pointer.
        let mut pointer = None;
        loop {
            let len = parser.parse_u8()?;
            match len {
                0 => {
                    octets.put_u8(0);
                    break;
                }
                1..=0x3F => {
                    octets.put_u8(len);
                    let mut label = [0u8; 63];
                    let label = &mut label[..usize::from(len)];
                    parser.parse_buf(label)?;
                    octets.extend_from_slice(label);
                }
                0xC0..=0xFF => {
                    let low = parser.parse_u8()?;
                    let start = parser.pos() - 2;
                    pointer = Some((
                        (usize::from(len & 0x3F) << 8) | usize::from(low),
                        start,
                    ));
                    break;
                }
                _ => return Err(FormError::new("invalid label type").into()),
            }
            if octets.len() > Self::MAX_LEN {
                return Err(FormError::new("long domain name").into());
            }
        }

        // Follow pointers through the message. Each pointer has to point
        // before the start of the labels it was found in which rules out
        // loops.
        while let Some((target, limit)) = pointer.take() {
            if target >= limit {
                return Err(FormError::new("invalid compression pointer").into());
            }
            let mut pos = target;
            loop {
                let len = *message
                    .get(pos)
                    .ok_or_else(|| FormError::new("invalid compression pointer"))?;
                match len {
                    0 => {
                        octets.put_u8(0);
                        break;
                    }
                    1..=0x3F => {
                        let end = pos + 1 + usize::from(len);
                        let label = message.get(pos + 1..end).ok_or_else(|| {
                            FormError::new("invalid compression pointer")
                        })?;
                        octets.put_u8(len);
                        octets.extend_from_slice(label);
                        pos = end;
                    }
                    0xC0..=0xFF => {
                        let low = *message.get(pos + 1).ok_or_else(|| {
                            FormError::new("invalid compression pointer")
                        })?;
                        pointer = Some((
                            (usize::from(len & 0x3F) << 8) | usize::from(low),
                            target,
                        ));
                        break;
                    }
                    _ => {
                        return Err(FormError::new("invalid label type").into())
                    }
                }
                if octets.len() > Self::MAX_LEN {
                    return Err(FormError::new("long domain name").into());
                }
            }
        }

        Self::from_checked_octets(octets.freeze())
            .map_err(|_| FormError::new("long domain name").into())
    }
}

/// # Properties
///
impl Name {
    /// Returns whether the name is absolute.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.octets.last() == Some(&0)
    }

    /// Returns whether this is the root name.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.octets.as_ref() == b"\0"
    }

    /// Returns whether this is the empty relative name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.octets.is_empty()
    }

    /// Returns the wire format of the name.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.octets.as_ref()
    }

    /// Returns the length of the wire format of the name.
    #[must_use]
    pub fn len(&self) -> usize {
        self.octets.len()
    }

    /// Returns an iterator over the labels of the name.
    ///
    /// The root label of an absolute name is included as an empty slice.
    pub fn iter_labels(&self) -> LabelIter<'_> {
        LabelIter {
            octets: self.octets.as_ref(),
        }
    }

    /// Returns the number of labels including the root label.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.iter_labels().count()
    }

    /// Returns whether `self` is `base` or a name below it.
    ///
    /// Both names need to be of the same kind, absolute or relative.
    #[must_use]
    pub fn ends_with(&self, base: &Name) -> bool {
        if self.is_absolute() != base.is_absolute() {
            return false;
        }
        let ours = self.label_offsets();
        let theirs = base.label_offsets();
        if theirs.len() > ours.len() {
            return false;
        }
        let start = ours[ours.len() - theirs.len()..].first().copied();
        match start {
            Some(start) => self.octets[start..].eq_ignore_ascii_case(&base.octets),
            None => true,
        }
    }

    /// Returns the start offsets of all labels.
    fn label_offsets(&self) -> Vec<usize> {
        let mut res = Vec::new();
        let mut pos = 0;
        while pos < self.octets.len() {
            res.push(pos);
            pos += usize::from(self.octets[pos]) + 1;
        }
        res
    }

    /// Returns an iterator over the absolute suffixes of the name.
    ///
    /// The first item is the name itself, the last one the root name.
    /// Returns an empty iterator for relative names.
    pub(crate) fn suffixes(&self) -> impl Iterator<Item = (usize, Name)> + '_ {
        let offsets = if self.is_absolute() {
            self.label_offsets()
        } else {
            Vec::new()
        };
        offsets.into_iter().map(move |pos| {
            (
                pos,
                Name {
                    octets: self.octets.slice(pos..),
                },
            )
        })
    }
}

/// # Conversions
///
impl Name {
    /// Appends `origin` to a relative name.
    ///
    /// Returns a clone of `self` if it already is absolute.
    pub fn concat(&self, origin: &Name) -> Result<Self, NameError> {
        if self.is_absolute() {
            return Ok(self.clone());
        }
        let mut octets = BytesMut::with_capacity(self.len() + origin.len());
        octets.extend_from_slice(self.as_slice());
        octets.extend_from_slice(origin.as_slice());
        Self::from_checked_octets(octets.freeze())
    }

    /// Makes the name absolute using `origin` if necessary.
    ///
    /// If `origin` is `None`, the name is returned unchanged.
    pub fn derelativize(&self, origin: Option<&Name>) -> Result<Self, NameError> {
        match origin {
            Some(origin) => self.concat(origin),
            None => Ok(self.clone()),
        }
    }

    /// Makes a relative name absolute by adding the root label.
    ///
    /// Relative names are at most 254 octets long, so this cannot fail.
    #[must_use]
    pub fn to_absolute(&self) -> Self {
        if self.is_absolute() {
            return self.clone();
        }
        let mut octets = BytesMut::with_capacity(self.len() + 1);
        octets.extend_from_slice(self.as_slice());
        octets.put_u8(0);
        Name {
            octets: octets.freeze(),
        }
    }

    /// Returns the name relative to `origin`.
    ///
    /// If `self` isn’t below or equal to `origin`, it is returned unchanged.
    /// If it is equal, the empty relative name is returned.
    #[must_use]
    pub fn relativize(&self, origin: &Name) -> Self {
        if !self.is_absolute() || !self.ends_with(origin) {
            return self.clone();
        }
        Name {
            octets: self.octets.slice(..self.len() - origin.len()),
        }
    }

    /// Returns the name with all ASCII letters in lower case.
    #[must_use]
    pub fn to_lowercase(&self) -> Self {
        if !self.octets.iter().any(u8::is_ascii_uppercase) {
            return self.clone();
        }
        Name {
            octets: Bytes::from(self.octets.to_ascii_lowercase()),
        }
    }
}

//--- FromStr

impl str::FromStr for Name {
    type Err = NameError;

    /// Parses a name from its presentation format.
    ///
    /// A name ending in a dot is absolute, `.` is the root, and `@` is the
    /// empty relative name. Labels may contain the escape sequences `\X`
    /// and `\DDD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => return Err(NameError::EmptyLabel),
            "." => return Ok(Self::root()),
            "@" => return Ok(Self::empty()),
            _ => {}
        }

        let mut labels: Vec<Vec<u8>> = vec![Vec::new()];
        let mut absolute = false;
        let mut chars = s.chars().peekable();
        while let Some(ch) = chars.next() {
            if absolute {
                // A dot was the last character we saw but there is more.
                absolute = false;
                labels.push(Vec::new());
            }
            let label = labels.last_mut().ok_or(NameError::EmptyLabel)?;
            match ch {
                '.' => {
                    if label.is_empty() {
                        return Err(NameError::EmptyLabel);
                    }
                    absolute = true;
                }
                '\\' => {
                    let first = chars.next().ok_or(NameError::BadEscape)?;
                    if let Some(hundreds) = first.to_digit(10) {
                        let tens = chars
                            .next()
                            .and_then(|ch| ch.to_digit(10))
                            .ok_or(NameError::BadEscape)?;
                        let ones = chars
                            .next()
                            .and_then(|ch| ch.to_digit(10))
                            .ok_or(NameError::BadEscape)?;
                        let value = hundreds * 100 + tens * 10 + ones;
                        label.push(
                            u8::try_from(value).map_err(|_| NameError::BadEscape)?,
                        );
                    } else {
                        let mut buf = [0u8; 4];
                        label.extend_from_slice(first.encode_utf8(&mut buf).as_bytes());
                    }
                }
                ch => {
                    let mut buf = [0u8; 4];
                    label.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
            }
        }
        Self::from_labels(labels.iter().map(Vec::as_slice), absolute)
    }
}

//--- PartialEq, Eq, and Hash

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.octets.eq_ignore_ascii_case(&other.octets)
    }
}

impl Eq for Name {}

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for ch in self.octets.iter() {
            state.write_u8(ch.to_ascii_lowercase())
        }
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("@");
        }
        if self.is_root() {
            return f.write_str(".");
        }
        let mut first = true;
        for label in self.iter_labels() {
            if label.is_empty() {
                // The root label.
                f.write_str(".")?;
                break;
            }
            if !first {
                f.write_str(".")?;
            }
            first = false;
            for &ch in label {
                if matches!(
                    ch,
                    b' ' | b'.' | b'\\' | b'"' | b'(' | b')' | b';' | b'@' | b'$'
                ) {
                    write!(f, "\\{}", ch as char)?;
                } else if !(0x21..0x7F).contains(&ch) {
                    write!(f, "\\{:03}", ch)?;
                } else {
                    write!(f, "{}", ch as char)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

//------------ LabelIter -----------------------------------------------------

/// An iterator over the labels of a name.
#[derive(Clone, Debug)]
pub struct LabelIter<'a> {
    octets: &'a [u8],
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, tail) = self.octets.split_first()?;
        let (label, tail) = tail.split_at(usize::from(len));
        self.octets = tail;
        Some(label)
    }
}

//============ Error Types ===================================================

//------------ NameError -----------------------------------------------------

/// A domain name could not be created.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum NameError {
    #[error("empty label")]
    EmptyLabel,

    #[error("label exceeds 63 octets")]
    LongLabel,

    #[error("domain name exceeds 255 octets")]
    LongName,

    #[error("invalid escape sequence")]
    BadEscape,
}

//============ Testing =======================================================
