//! 128-bit structured identifier (GUID) codec.
//!
//! A [`Guid`] is a fixed 16-byte value split into eleven logical fields: `A` (32 bits),
//! `B` (16 bits), `C` (16 bits) and eight single-byte fields `D` through `K`.
//!
//! ## Byte layout
//! The 16-byte form uses the Microsoft/COM *mixed-endian* layout:
//! - bytes 0-3: `A`, little-endian
//! - bytes 4-5: `B`, little-endian
//! - bytes 6-7: `C`, little-endian
//! - bytes 8-15: `D`..`K`, in textual order
//!
//! So `00000001-0002-0003-0405-060708090a0b` is stored as
//! `01 00 00 00 02 00 03 00 04 05 06 07 08 09 0a 0b`.
//!
//! ## Textual notations
//! | Notation | Example | Length |
//! |---|---|---|
//! | `N` | `6ba7b8109dad11d180b400c04fd430c8` | 32 |
//! | `D` | `6ba7b810-9dad-11d1-80b4-00c04fd430c8` | 36 |
//! | `B` | `{6ba7b810-9dad-11d1-80b4-00c04fd430c8}` | 38 |
//! | `P` | `(6ba7b810-9dad-11d1-80b4-00c04fd430c8)` | 38 |
//! | `X` | `{0x6ba7b810,0x9dad,0x11d1,{0x80,0xb4,0x00,0xc0,0x4f,0xd4,0x30,0xc8}}` | 68 |
//!
//! Parsing is case-insensitive; formatting always emits lowercase hex.
//!
//! ## Failure reporting
//! Each entry point picks a [`ThrowPolicy`]:
//! - [`Guid::from_text`] / [`str::parse`] are strict and keep overflow distinct.
//! - [`Guid::parse`] / [`Guid::parse_exact`] report overflow as a format error.
//! - [`Guid::try_parse`] / [`Guid::try_parse_exact`] never fail, they return `None`.

mod constants;
mod fields;
mod format;
mod generate;
mod hex;
mod identity;
mod interop;
mod parse;
mod policy;
#[cfg(feature = "serde")]
mod serde_impl;

pub use constants::GUID_BYTE_LEN;
pub use fields::Guid;
pub use format::Notation;
pub use generate::RandomSource;
pub use hex::{hex_char, hex_digit_value, parse_hex_run, HexRun, HexRunError};
pub use parse::{parse_with_styles, Field, FormatFault, OverflowFault, ParseFault, Styles};
pub use policy::ThrowPolicy;

/// Error type for GUID operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuidError {
    /// The text does not match any accepted GUID grammar.
    #[error("invalid GUID format: {0}")]
    InvalidFormat(FormatFault),
    /// A hex run was well-formed but too large for its field.
    #[error("GUID field overflow: {0}")]
    Overflow(OverflowFault),
    /// No input was supplied at all.
    #[error("GUID input is missing")]
    NullInput,
    /// A byte buffer was not exactly 16 bytes long.
    #[error("GUID byte buffer must be exactly {len} bytes, got {0}", len = GUID_BYTE_LEN)]
    InvalidByteLength(usize),
}

impl GuidError {
    /// Returns true if this error is (or wraps) an overflow.
    pub fn is_overflow(&self) -> bool {
        matches!(
            self,
            GuidError::Overflow(_) | GuidError::InvalidFormat(FormatFault::Overflow(_))
        )
    }
}

/// Result type for GUID operations.
pub type GuidResult<T> = Result<T, GuidError>;
