//! Random (version 4) GUID generation.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::constants::GUID_BYTE_LEN;
use crate::Guid;

/// Source of random bytes for [`Guid::new_random_with`].
///
/// Every cryptographically secure `rand` generator is a `RandomSource`.
pub trait RandomSource {
    fn fill(&mut self, dest: &mut [u8]);
}

impl<R: RngCore + CryptoRng + ?Sized> RandomSource for R {
    fn fill(&mut self, dest: &mut [u8]) {
        self.fill_bytes(dest);
    }
}

/// Marks `bytes` as version 4 with the RFC 4122 variant.
///
/// Byte 7 is the most significant byte of `C` (stored little-endian) and byte 8 is `D`.
fn apply_v4_fixup(bytes: &mut [u8; GUID_BYTE_LEN]) {
    bytes[7] = (bytes[7] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
}

impl Guid {
    /// Generates a new random GUID from the operating system's secure random source.
    pub fn new_random() -> Self {
        Self::new_random_with(&mut OsRng)
    }

    /// Generates a new random GUID from `source`.
    pub fn new_random_with<S: RandomSource + ?Sized>(source: &mut S) -> Self {
        let mut bytes = [0u8; GUID_BYTE_LEN];
        source.fill(&mut bytes);
        apply_v4_fixup(&mut bytes);
        let guid = Guid::from_bytes(bytes);
        tracing::trace!(%guid, "generated random GUID");
        guid
    }
}
