//! The field model.
//!
//! A [`Guid`] keeps its 16 bytes in wire order. The mixed-endian rule lives only in the
//! accessors and constructors in this file: `A`, `B` and `C` are little-endian in the buffer,
//! `D`..`K` are copied through unchanged.

use crate::constants::GUID_BYTE_LEN;
use crate::{GuidError, GuidResult};

/// A 128-bit structured identifier.
///
/// Values are immutable once constructed. Build one by parsing text (see [`Guid::parse`]),
/// from raw bytes ([`Guid::from_bytes`]), from discrete fields ([`Guid::from_fields`]), or
/// by generating a random one ([`Guid::new_random`]).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Guid {
    bytes: [u8; GUID_BYTE_LEN],
}

impl Default for Guid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Guid {
    /// The all-zero identifier.
    pub const EMPTY: Guid = Guid {
        bytes: [0; GUID_BYTE_LEN],
    };

    /// Builds a GUID from its 16-byte wire representation.
    pub const fn from_bytes(bytes: [u8; GUID_BYTE_LEN]) -> Self {
        Self { bytes }
    }

    /// Builds a GUID from a byte slice, which must be exactly 16 bytes long.
    ///
    /// # Errors
    ///
    /// Returns [`GuidError::InvalidByteLength`] for any other length.
    pub fn from_slice(bytes: &[u8]) -> GuidResult<Self> {
        let bytes: [u8; GUID_BYTE_LEN] = bytes
            .try_into()
            .map_err(|_| GuidError::InvalidByteLength(bytes.len()))?;
        Ok(Self { bytes })
    }

    /// Builds a GUID from `A`, `B`, `C` and the eight trailing bytes `D`..`K`.
    pub const fn from_parts(a: u32, b: u16, c: u16, tail: [u8; 8]) -> Self {
        let a = a.to_le_bytes();
        let b = b.to_le_bytes();
        let c = c.to_le_bytes();
        Self {
            bytes: [
                a[0], a[1], a[2], a[3], b[0], b[1], c[0], c[1], tail[0], tail[1], tail[2],
                tail[3], tail[4], tail[5], tail[6], tail[7],
            ],
        }
    }

    /// Builds a GUID from its eleven discrete fields.
    #[allow(clippy::too_many_arguments)]
    pub const fn from_fields(
        a: u32,
        b: u16,
        c: u16,
        d: u8,
        e: u8,
        f: u8,
        g: u8,
        h: u8,
        i: u8,
        j: u8,
        k: u8,
    ) -> Self {
        Self::from_parts(a, b, c, [d, e, f, g, h, i, j, k])
    }

    /// Returns the 16-byte wire representation.
    pub const fn to_bytes(&self) -> [u8; GUID_BYTE_LEN] {
        self.bytes
    }

    pub const fn as_bytes(&self) -> &[u8; GUID_BYTE_LEN] {
        &self.bytes
    }

    /// Returns true for [`Guid::EMPTY`].
    pub fn is_empty(&self) -> bool {
        self.bytes == [0; GUID_BYTE_LEN]
    }

    /// Field `A` (time-low).
    pub const fn a(&self) -> u32 {
        u32::from_le_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }

    /// Field `B` (time-mid).
    pub const fn b(&self) -> u16 {
        u16::from_le_bytes([self.bytes[4], self.bytes[5]])
    }

    /// Field `C` (time-hi-and-version).
    pub const fn c(&self) -> u16 {
        u16::from_le_bytes([self.bytes[6], self.bytes[7]])
    }

    /// Fields `D`..`K` in textual order.
    pub const fn tail(&self) -> [u8; 8] {
        let b = &self.bytes;
        [b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]]
    }

    pub const fn d(&self) -> u8 {
        self.bytes[8]
    }

    pub const fn e(&self) -> u8 {
        self.bytes[9]
    }

    pub const fn f(&self) -> u8 {
        self.bytes[10]
    }

    pub const fn g(&self) -> u8 {
        self.bytes[11]
    }

    pub const fn h(&self) -> u8 {
        self.bytes[12]
    }

    pub const fn i(&self) -> u8 {
        self.bytes[13]
    }

    pub const fn j(&self) -> u8 {
        self.bytes[14]
    }

    pub const fn k(&self) -> u8 {
        self.bytes[15]
    }

    /// The version nibble, i.e. the top four bits of `C`.
    ///
    /// This is informational only. Parsing accepts any bit pattern.
    pub const fn version(&self) -> u8 {
        (self.c() >> 12) as u8
    }

    /// The top two bits of `D` (`0b10` for RFC 4122 identifiers).
    pub const fn variant_bits(&self) -> u8 {
        self.d() >> 6
    }
}

impl From<[u8; GUID_BYTE_LEN]> for Guid {
    fn from(bytes: [u8; GUID_BYTE_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Guid> for [u8; GUID_BYTE_LEN] {
    fn from(guid: Guid) -> Self {
        guid.to_bytes()
    }
}

impl TryFrom<&[u8]> for Guid {
    type Error = GuidError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for Guid {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
