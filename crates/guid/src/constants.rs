//! Fixed sizes used by the codec.

/// Size of the binary representation.
pub const GUID_BYTE_LEN: usize = 16;

/// Length of the `N` notation (32 hex digits).
pub(crate) const N_LEN: usize = 32;

/// Length of the `D` notation (`8-4-4-4-12`).
pub(crate) const D_LEN: usize = 36;

/// Length of the bracketed `B` and `P` notations.
pub(crate) const WRAPPED_LEN: usize = 38;

/// Length of the `X` notation.
pub(crate) const X_LEN: usize = 68;

/// Offsets of the four dashes in the `D` body.
pub(crate) const DASH_OFFSETS: [usize; 4] = [8, 13, 18, 23];

/// Hex digits in the trailing node group.
pub(crate) const NODE_DIGITS: usize = 12;
