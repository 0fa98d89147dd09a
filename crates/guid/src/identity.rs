//! Ordering and hashing.
//!
//! Equality is derived on the byte buffer, which is the same as comparing all eleven fields.
//! Ordering compares fields rather than bytes because `A`, `B` and `C` are stored
//! little-endian.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::Guid;

impl Guid {
    /// XOR of the four native-endian 32-bit words of the byte representation.
    pub fn hash_code(&self) -> u32 {
        self.as_bytes()
            .chunks_exact(4)
            .map(|word| u32::from_ne_bytes([word[0], word[1], word[2], word[3]]))
            .fold(0, |acc, word| acc ^ word)
    }
}

impl Ord for Guid {
    /// Lexicographic over `A`, `B`, `C`, `D`..`K`, each field compared unsigned.
    fn cmp(&self, other: &Self) -> Ordering {
        self.a()
            .cmp(&other.a())
            .then_with(|| self.b().cmp(&other.b()))
            .then_with(|| self.c().cmp(&other.c()))
            .then_with(|| self.tail().cmp(&other.tail()))
    }
}

impl PartialOrd for Guid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Guid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}
