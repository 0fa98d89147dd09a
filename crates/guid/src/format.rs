//! Formatter for the five textual notations.

use std::fmt;
use std::str::FromStr;

use crate::constants::{DASH_OFFSETS, D_LEN, N_LEN, WRAPPED_LEN, X_LEN};
use crate::hex::write_hex;
use crate::parse::FormatFault;
use crate::{Guid, GuidError, GuidResult};

/// One of the five textual spellings of a GUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Notation {
    /// 32 digits: `00000000000000000000000000000000`
    N,
    /// Dashed: `00000000-0000-0000-0000-000000000000`
    #[default]
    D,
    /// Braced: `{00000000-0000-0000-0000-000000000000}`
    B,
    /// Parenthesised: `(00000000-0000-0000-0000-000000000000)`
    P,
    /// C struct literal: `{0x00000000,0x0000,0x0000,{0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00}}`
    X,
}

impl Notation {
    pub const ALL: [Notation; 5] = [
        Notation::N,
        Notation::D,
        Notation::B,
        Notation::P,
        Notation::X,
    ];

    /// Exact number of characters this notation formats to.
    pub const fn text_len(self) -> usize {
        match self {
            Notation::N => N_LEN,
            Notation::D => D_LEN,
            Notation::B | Notation::P => WRAPPED_LEN,
            Notation::X => X_LEN,
        }
    }

    /// The selector character, uppercase.
    pub const fn as_char(self) -> char {
        match self {
            Notation::N => 'N',
            Notation::D => 'D',
            Notation::B => 'B',
            Notation::P => 'P',
            Notation::X => 'X',
        }
    }

    /// Looks up a notation by its selector character, in either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Notation::N),
            'D' => Some(Notation::D),
            'B' => Some(Notation::B),
            'P' => Some(Notation::P),
            'X' => Some(Notation::X),
            _ => None,
        }
    }
}

impl TryFrom<char> for Notation {
    type Error = GuidError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Notation::from_char(c).ok_or(GuidError::InvalidFormat(FormatFault::UnknownNotation(c)))
    }
}

impl FromStr for Notation {
    type Err = GuidError;

    /// Parses a single-character selector such as `"D"` or `"x"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Notation::try_from(c),
            _ => Err(GuidError::InvalidFormat(FormatFault::BadFormatSpecifier)),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Sequential writer over a buffer that is known to be exactly the right size.
struct TextWriter<'a> {
    out: &'a mut [u8],
    pos: usize,
}

impl TextWriter<'_> {
    fn literal(&mut self, text: &[u8]) {
        self.out[self.pos..self.pos + text.len()].copy_from_slice(text);
        self.pos += text.len();
    }

    fn hex(&mut self, value: u64, digits: usize) {
        write_hex(&mut self.out[self.pos..], value, digits);
        self.pos += digits;
    }
}

/// Writes `guid` into `out`, which must be exactly `notation.text_len()` bytes.
fn encode(guid: &Guid, notation: Notation, out: &mut [u8]) {
    debug_assert_eq!(out.len(), notation.text_len());
    let mut w = TextWriter { out, pos: 0 };

    match notation {
        Notation::N => {
            w.hex(u64::from(guid.a()), 8);
            w.hex(u64::from(guid.b()), 4);
            w.hex(u64::from(guid.c()), 4);
            for byte in guid.tail() {
                w.hex(u64::from(byte), 2);
            }
        }
        Notation::D | Notation::B | Notation::P => {
            let (open, close) = match notation {
                Notation::B => (Some(b'{'), Some(b'}')),
                Notation::P => (Some(b'('), Some(b')')),
                _ => (None, None),
            };
            if let Some(open) = open {
                w.literal(&[open]);
            }
            encode_dashed_body(guid, &mut w);
            if let Some(close) = close {
                w.literal(&[close]);
            }
        }
        Notation::X => {
            w.literal(b"{0x");
            w.hex(u64::from(guid.a()), 8);
            w.literal(b",0x");
            w.hex(u64::from(guid.b()), 4);
            w.literal(b",0x");
            w.hex(u64::from(guid.c()), 4);
            w.literal(b",{");
            for (idx, byte) in guid.tail().into_iter().enumerate() {
                if idx > 0 {
                    w.literal(b",");
                }
                w.literal(b"0x");
                w.hex(u64::from(byte), 2);
            }
            w.literal(b"}}");
        }
    }
}

fn encode_dashed_body(guid: &Guid, w: &mut TextWriter<'_>) {
    let start = w.pos;
    let tail = guid.tail();

    w.hex(u64::from(guid.a()), 8);
    w.literal(b"-");
    w.hex(u64::from(guid.b()), 4);
    w.literal(b"-");
    w.hex(u64::from(guid.c()), 4);
    w.literal(b"-");
    w.hex(u64::from(u16::from_be_bytes([tail[0], tail[1]])), 4);
    w.literal(b"-");
    for byte in &tail[2..] {
        w.hex(u64::from(*byte), 2);
    }

    debug_assert!(DASH_OFFSETS
        .iter()
        .all(|&offset| w.out[start + offset] == b'-'));
}

impl Guid {
    /// Formats this GUID in the given notation, always in lowercase.
    pub fn format(&self, notation: Notation) -> String {
        let mut buf = [0u8; X_LEN];
        let len = notation.text_len();
        encode(self, notation, &mut buf[..len]);
        buf[..len].iter().map(|&b| char::from(b)).collect()
    }

    /// Formats into a caller-supplied buffer without allocating.
    ///
    /// Exactly `notation.text_len()` bytes are written at the front of `buf`. Returns `false`,
    /// leaving `buf` untouched, if it is too short.
    pub fn format_into(&self, notation: Notation, buf: &mut [u8]) -> bool {
        let len = notation.text_len();
        match buf.get_mut(..len) {
            Some(out) => {
                encode(self, notation, out);
                true
            }
            None => false,
        }
    }

    /// Formats using a format-string selector.
    ///
    /// An empty specifier means `D`. Otherwise it must be a single `N`, `D`, `B`, `P` or `X`,
    /// in either case.
    ///
    /// # Errors
    ///
    /// Returns [`GuidError::InvalidFormat`] for any other specifier.
    pub fn to_string_spec(&self, spec: &str) -> GuidResult<String> {
        let notation = if spec.is_empty() {
            Notation::default()
        } else {
            spec.parse()?
        };
        Ok(self.format(notation))
    }
}

impl fmt::Display for Guid {
    /// `D` notation; the alternate flag (`{:#}`) selects `B`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notation = if f.alternate() {
            Notation::B
        } else {
            Notation::D
        };
        let mut buf = [0u8; X_LEN];
        let len = notation.text_len();
        encode(self, notation, &mut buf[..len]);
        let text = std::str::from_utf8(&buf[..len]).map_err(|_| fmt::Error)?;
        f.pad(text)
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Guid = Guid::from_fields(
        0x6ba7_b810,
        0x9dad,
        0x11d1,
        0x80,
        0xb4,
        0x00,
        0xc0,
        0x4f,
        0xd4,
        0x30,
        0xc8,
    );

    #[test]
    fn test_each_notation() {
        assert_eq!(SAMPLE.format(Notation::N), "6ba7b8109dad11d180b400c04fd430c8");
        assert_eq!(
            SAMPLE.format(Notation::D),
            "6ba7b810-9dad-11d1-80b4-00c04fd430c8"
        );
        assert_eq!(
            SAMPLE.format(Notation::B),
            "{6ba7b810-9dad-11d1-80b4-00c04fd430c8}"
        );
        assert_eq!(
            SAMPLE.format(Notation::P),
            "(6ba7b810-9dad-11d1-80b4-00c04fd430c8)"
        );
        assert_eq!(
            SAMPLE.format(Notation::X),
            "{0x6ba7b810,0x9dad,0x11d1,{0x80,0xb4,0x00,0xc0,0x4f,0xd4,0x30,0xc8}}"
        );
    }

    #[test]
    fn test_lengths_match_notation() {
        for notation in Notation::ALL {
            assert_eq!(SAMPLE.format(notation).len(), notation.text_len());
            assert_eq!(Guid::EMPTY.format(notation).len(), notation.text_len());
        }
    }

    #[test]
    fn test_empty_in_n_notation() {
        assert_eq!(
            Guid::EMPTY.format(Notation::N),
            "00000000000000000000000000000000"
        );
    }

    #[test]
    fn test_output_is_lowercase() {
        let all_ones = Guid::from_bytes([0xff; 16]);
        for notation in Notation::ALL {
            let text = all_ones.format(notation);
            assert!(!text.chars().any(|c| c.is_ascii_uppercase()), "{text}");
        }
    }

    #[test]
    fn test_format_into_exact_and_larger_buffers() {
        let mut exact = [0u8; 36];
        assert!(SAMPLE.format_into(Notation::D, &mut exact));
        assert_eq!(&exact, b"6ba7b810-9dad-11d1-80b4-00c04fd430c8");

        let mut larger = [b'#'; 40];
        assert!(SAMPLE.format_into(Notation::N, &mut larger));
        assert_eq!(&larger[..32], b"6ba7b8109dad11d180b400c04fd430c8");
        assert_eq!(&larger[32..], b"########");
    }

    #[test]
    fn test_format_into_rejects_short_buffer() {
        let mut short = [b'#'; 67];
        assert!(!SAMPLE.format_into(Notation::X, &mut short));
        assert!(short.iter().all(|&b| b == b'#'));

        let mut empty: [u8; 0] = [];
        assert!(!SAMPLE.format_into(Notation::N, &mut empty));
    }

    #[test]
    fn test_display_and_alternate() {
        assert_eq!(SAMPLE.to_string(), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(
            format!("{SAMPLE:#}"),
            "{6ba7b810-9dad-11d1-80b4-00c04fd430c8}"
        );
        assert_eq!(
            format!("{:?}", Guid::EMPTY),
            "Guid(00000000-0000-0000-0000-000000000000)"
        );
    }

    #[test]
    fn test_to_string_spec() {
        assert_eq!(SAMPLE.to_string_spec("").unwrap(), SAMPLE.format(Notation::D));
        assert_eq!(SAMPLE.to_string_spec("n").unwrap(), SAMPLE.format(Notation::N));
        assert_eq!(SAMPLE.to_string_spec("X").unwrap(), SAMPLE.format(Notation::X));
        assert_eq!(
            SAMPLE.to_string_spec("Q"),
            Err(GuidError::InvalidFormat(FormatFault::UnknownNotation('Q')))
        );
        assert_eq!(
            SAMPLE.to_string_spec("DD"),
            Err(GuidError::InvalidFormat(FormatFault::BadFormatSpecifier))
        );
    }

    #[test]
    fn test_notation_from_char() {
        assert_eq!(Notation::from_char('b'), Some(Notation::B));
        assert_eq!(Notation::from_char('P'), Some(Notation::P));
        assert_eq!(Notation::from_char('z'), None);
        assert_eq!("x".parse::<Notation>(), Ok(Notation::X));
        assert!("".parse::<Notation>().is_err());
        assert_eq!(Notation::default(), Notation::D);
    }
}
