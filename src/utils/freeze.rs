//! Converting field values into their immutable form.
//!
//! Record data only holds immutable octets and sequences. The [`Freeze`]
//! trait turns the usual mutable or borrowed forms into these. Converting
//! an already frozen value returns it unchanged.

use crate::base::iana::Rtype;
use bytes::{Bytes, BytesMut};
use std::sync::Arc;

/// A value that can be converted into an immutable form.
pub trait Freeze {
    type Frozen;

    fn freeze(self) -> Self::Frozen;
}

//--- Octets

impl Freeze for Bytes {
    type Frozen = Bytes;

    fn freeze(self) -> Bytes {
        self
    }
}

impl Freeze for BytesMut {
    type Frozen = Bytes;

    fn freeze(self) -> Bytes {
        BytesMut::freeze(self)
    }
}

impl Freeze for Vec<u8> {
    type Frozen = Bytes;

    fn freeze(self) -> Bytes {
        Bytes::from(self)
    }
}

impl<'a> Freeze for &'a [u8] {
    type Frozen = Bytes;

    fn freeze(self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

impl<const N: usize> Freeze for [u8; N] {
    type Frozen = Bytes;

    fn freeze(self) -> Bytes {
        Bytes::copy_from_slice(&self)
    }
}

//--- Sequences of octets

impl Freeze for Arc<[Bytes]> {
    type Frozen = Arc<[Bytes]>;

    fn freeze(self) -> Self::Frozen {
        self
    }
}

impl Freeze for Vec<Bytes> {
    type Frozen = Arc<[Bytes]>;

    fn freeze(self) -> Self::Frozen {
        self.into()
    }
}

impl Freeze for Vec<Vec<u8>> {
    type Frozen = Arc<[Bytes]>;

    fn freeze(self) -> Self::Frozen {
        self.into_iter().map(Bytes::from).collect()
    }
}

impl<'a> Freeze for Vec<&'a [u8]> {
    type Frozen = Arc<[Bytes]>;

    fn freeze(self) -> Self::Frozen {
        self.into_iter().map(Bytes::copy_from_slice).collect()
    }
}

//--- Sequences of record types

impl Freeze for Arc<[Rtype]> {
    type Frozen = Arc<[Rtype]>;

    fn freeze(self) -> Self::Frozen {
        self
    }
}

impl Freeze for Vec<Rtype> {
    type Frozen = Arc<[Rtype]>;

    fn freeze(self) -> Self::Frozen {
        self.into()
    }
}

impl<'a> Freeze for &'a [Rtype] {
    type Frozen = Arc<[Rtype]>;

    fn freeze(self) -> Self::Frozen {
        self.into()
    }
}

//============ Test ==========================================================
