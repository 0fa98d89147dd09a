//! Grammar dispatcher and the three sub-parsers.
//!
//! Every sub-parser returns a [`ParseFault`] instead of failing eagerly. Turning a fault into
//! an error, or into `None`, is the job of [`crate::ThrowPolicy`].

use std::fmt;

use bitflags::bitflags;

use crate::constants::{DASH_OFFSETS, D_LEN, NODE_DIGITS, N_LEN, WRAPPED_LEN};
use crate::format::Notation;
use crate::hex::{parse_hex_field, parse_hex_run, HexRunError};
use crate::Guid;

bitflags! {
    /// Structural markers a parse is allowed or required to see.
    ///
    /// A `REQUIRE_*` flag implies the matching `ALLOW_*` flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Styles: u8 {
        const ALLOW_PARENTHESES = 0x01;
        const ALLOW_BRACES = 0x02;
        const ALLOW_DASHES = 0x04;
        const REQUIRE_PARENTHESES = 0x10;
        const REQUIRE_BRACES = 0x20;
        const REQUIRE_DASHES = 0x40;

        /// Loose mode: allow everything, require nothing.
        const ANY = Self::ALLOW_PARENTHESES.bits()
            | Self::ALLOW_BRACES.bits()
            | Self::ALLOW_DASHES.bits();
    }
}

impl Styles {
    /// The exact combination of flags implied by a single notation.
    pub const fn for_notation(notation: Notation) -> Self {
        match notation {
            Notation::N => Styles::empty(),
            Notation::D => Styles::REQUIRE_DASHES,
            Notation::B => Styles::REQUIRE_DASHES.union(Styles::REQUIRE_BRACES),
            Notation::P => Styles::REQUIRE_DASHES.union(Styles::REQUIRE_PARENTHESES),
            Notation::X => Styles::REQUIRE_BRACES,
        }
    }
}

/// Names one of the eleven logical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
}

impl Field {
    const TAIL: [Field; 8] = [
        Field::D,
        Field::E,
        Field::F,
        Field::G,
        Field::H,
        Field::I,
        Field::J,
        Field::K,
    ];

    /// Width of the field in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Field::A => 32,
            Field::B | Field::C => 16,
            _ => 8,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A hex value that was syntactically valid but too wide for its field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("0x{digits} does not fit in field {field} ({bits} bits)", bits = .field.bits())]
pub struct OverflowFault {
    pub field: Field,
    pub digits: String,
}

/// Why a piece of text is not a GUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatFault {
    #[error("input is empty")]
    Empty,
    #[error("dashes are not allowed in this notation")]
    UnexpectedDashes,
    #[error("dashes are required in this notation")]
    MissingDashes,
    #[error("braces are not allowed in this notation")]
    UnexpectedBraces,
    #[error("braces are required in this notation")]
    MissingBraces,
    #[error("parentheses are not allowed in this notation")]
    UnexpectedParentheses,
    #[error("parentheses are required in this notation")]
    MissingParentheses,
    #[error("input has the wrong length")]
    InvalidLength,
    #[error("dashes are in the wrong place")]
    MisplacedDashes,
    #[error("opening and closing brackets do not match")]
    MismatchedBracket,
    #[error("input contains a non-hex character")]
    InvalidChar,
    #[error("expected a 0x hex prefix")]
    MissingHexPrefix,
    #[error("expected a comma")]
    MissingComma,
    #[error("expected an opening brace")]
    MissingBrace,
    #[error("expected a closing brace")]
    MissingEndBrace,
    #[error("unexpected characters after the closing brace")]
    TrailingJunk,
    #[error("unknown notation '{0}', expected one of N, D, B, P, X")]
    UnknownNotation(char),
    #[error("format specifier must be a single character")]
    BadFormatSpecifier,
    #[error("{0}")]
    Overflow(OverflowFault),
}

/// Internal outcome of a failed parse, before a throw policy is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFault {
    Format(FormatFault),
    Overflow(OverflowFault),
}

impl From<FormatFault> for ParseFault {
    fn from(fault: FormatFault) -> Self {
        ParseFault::Format(fault)
    }
}

impl fmt::Display for ParseFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFault::Format(fault) => fault.fmt(f),
            ParseFault::Overflow(fault) => fault.fmt(f),
        }
    }
}

type ParseOutcome<T> = Result<T, ParseFault>;

/// Parses `text` under the given structural `styles`.
///
/// Leading and trailing whitespace is ignored. The grammar is chosen by the markers present,
/// first match wins: any dash selects the dashed form (`D`, `B`, `P`), otherwise any brace
/// selects the C-literal form (`X`), otherwise the input must be 32 bare hex digits (`N`).
pub fn parse_with_styles(text: &str, styles: Styles) -> ParseOutcome<Guid> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FormatFault::Empty.into());
    }

    let has_dashes = text.contains('-');
    let has_braces = text.contains('{');
    let has_parens = text.contains('(');

    check_marker(
        has_dashes,
        styles,
        Styles::REQUIRE_DASHES,
        Styles::ALLOW_DASHES,
        FormatFault::MissingDashes,
        FormatFault::UnexpectedDashes,
    )?;
    check_marker(
        has_braces,
        styles,
        Styles::REQUIRE_BRACES,
        Styles::ALLOW_BRACES,
        FormatFault::MissingBraces,
        FormatFault::UnexpectedBraces,
    )?;
    check_marker(
        has_parens,
        styles,
        Styles::REQUIRE_PARENTHESES,
        Styles::ALLOW_PARENTHESES,
        FormatFault::MissingParentheses,
        FormatFault::UnexpectedParentheses,
    )?;

    if has_dashes {
        parse_dashed(text.as_bytes())
    } else if has_braces {
        parse_hex_literal(text)
    } else {
        parse_plain(text.as_bytes())
    }
}

fn check_marker(
    present: bool,
    styles: Styles,
    require: Styles,
    allow: Styles,
    missing: FormatFault,
    unexpected: FormatFault,
) -> ParseOutcome<()> {
    if styles.contains(require) {
        if !present {
            return Err(missing.into());
        }
    } else if !styles.contains(allow) && present {
        return Err(unexpected.into());
    }
    Ok(())
}

/// `8-4-4-4-12`, optionally wrapped in `{}` or `()`.
fn parse_dashed(text: &[u8]) -> ParseOutcome<Guid> {
    let start = match text[0] {
        b'{' => expect_wrapped(text, b'}')?,
        b'(' => expect_wrapped(text, b')')?,
        _ if text.len() != D_LEN => return Err(FormatFault::InvalidLength.into()),
        _ => 0,
    };

    if DASH_OFFSETS.iter().any(|&offset| text[start + offset] != b'-') {
        return Err(FormatFault::MisplacedDashes.into());
    }

    let mut pos = start;
    let a = fixed_group(text, &mut pos, 8)? as u32;
    pos += 1;
    let b = fixed_group(text, &mut pos, 4)? as u16;
    pos += 1;
    let c = fixed_group(text, &mut pos, 4)? as u16;
    pos += 1;
    let tail = clock_and_node(&text[..start + D_LEN], &mut pos, true)?;

    Ok(Guid::from_parts(a, b, c, tail))
}

fn expect_wrapped(text: &[u8], closer: u8) -> ParseOutcome<usize> {
    if text.len() != WRAPPED_LEN {
        return Err(FormatFault::InvalidLength.into());
    }
    if text[WRAPPED_LEN - 1] != closer {
        return Err(FormatFault::MismatchedBracket.into());
    }
    Ok(1)
}

/// 32 bare hex digits.
fn parse_plain(text: &[u8]) -> ParseOutcome<Guid> {
    if text.len() != N_LEN {
        return Err(FormatFault::InvalidLength.into());
    }
    if !text.iter().all(u8::is_ascii_hexdigit) {
        return Err(FormatFault::InvalidChar.into());
    }

    let mut pos = 0;
    let a = fixed_group(text, &mut pos, 8)? as u32;
    let b = fixed_group(text, &mut pos, 4)? as u16;
    let c = fixed_group(text, &mut pos, 4)? as u16;
    let tail = clock_and_node(text, &mut pos, false)?;

    Ok(Guid::from_parts(a, b, c, tail))
}

/// Reads exactly `len` hex digits starting at `pos`, bounded so a longer run of digits
/// cannot bleed into the next group.
fn fixed_group(text: &[u8], pos: &mut usize, len: usize) -> ParseOutcome<u64> {
    let window = text
        .get(*pos..*pos + len)
        .ok_or(FormatFault::InvalidLength)?;
    let run = parse_hex_run(window, 0, Some(len)).map_err(|_| FormatFault::InvalidChar)?;
    *pos += len;
    Ok(run.value)
}

/// Reads the 4-digit clock sequence and the 12-digit node that make up `D`..`K`.
///
/// `text` must end where the node group ends. The node run has to consume exactly 12
/// digits, which catches a misplaced or missing dash.
fn clock_and_node(text: &[u8], pos: &mut usize, dashed: bool) -> ParseOutcome<[u8; 8]> {
    let clock = fixed_group(text, pos, 4)? as u16;
    if dashed {
        *pos += 1;
    }

    let node_window = text.get(*pos..).unwrap_or_default();
    let node = match parse_hex_run(node_window, 0, None) {
        Ok(run) if run.consumed == NODE_DIGITS && node_window.len() == NODE_DIGITS => run.value,
        Ok(_) | Err(HexRunError::WrongLength { .. } | HexRunError::Overflow) => {
            return Err(FormatFault::InvalidLength.into())
        }
        Err(HexRunError::NotHex) => return Err(FormatFault::InvalidChar.into()),
    };
    *pos += NODE_DIGITS;

    let clock = clock.to_be_bytes();
    let node = node.to_be_bytes();
    Ok([
        clock[0], clock[1], node[2], node[3], node[4], node[5], node[6], node[7],
    ])
}

/// `{0xA,0xB,0xC,{0xD,0xE,0xF,0xG,0xH,0xI,0xJ,0xK}}` with all whitespace ignored.
fn parse_hex_literal(text: &str) -> ParseOutcome<Guid> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut cursor = LiteralCursor {
        text: compact.as_bytes(),
        pos: 0,
    };

    cursor.expect(b'{', FormatFault::MissingBrace)?;
    let a = cursor.prefixed_number(b',', FormatFault::MissingComma, Field::A)? as u32;
    let b = cursor.prefixed_number(b',', FormatFault::MissingComma, Field::B)? as u16;
    let c = cursor.prefixed_number(b',', FormatFault::MissingComma, Field::C)? as u16;
    cursor.expect(b'{', FormatFault::MissingBrace)?;

    let mut tail = [0u8; 8];
    for (idx, (slot, field)) in tail.iter_mut().zip(Field::TAIL).enumerate() {
        let (delim, missing) = if idx + 1 < Field::TAIL.len() {
            (b',', FormatFault::MissingComma)
        } else {
            (b'}', FormatFault::MissingEndBrace)
        };
        *slot = cursor.prefixed_number(delim, missing, field)? as u8;
    }

    cursor.expect(b'}', FormatFault::MissingEndBrace)?;
    if cursor.pos != cursor.text.len() {
        return Err(FormatFault::TrailingJunk.into());
    }

    Ok(Guid::from_parts(a, b, c, tail))
}

struct LiteralCursor<'a> {
    text: &'a [u8],
    pos: usize,
}

impl LiteralCursor<'_> {
    fn expect(&mut self, byte: u8, fault: FormatFault) -> ParseOutcome<()> {
        if self.text.get(self.pos) != Some(&byte) {
            return Err(fault.into());
        }
        self.pos += 1;
        Ok(())
    }

    /// Reads `0x<hex>` followed by `delim`, and checks the value fits `field`.
    fn prefixed_number(
        &mut self,
        delim: u8,
        missing: FormatFault,
        field: Field,
    ) -> ParseOutcome<u64> {
        match self.text.get(self.pos..self.pos + 2) {
            Some([b'0', b'x' | b'X']) => self.pos += 2,
            _ => return Err(FormatFault::MissingHexPrefix.into()),
        }

        let rest = &self.text[self.pos..];
        let len = match rest.iter().position(|&b| b == delim) {
            Some(len) if len > 0 => len,
            _ => return Err(missing.into()),
        };
        let digits = &rest[..len];

        let value = parse_hex_field(digits, field.bits()).map_err(|err| match err {
            HexRunError::Overflow => ParseFault::Overflow(OverflowFault {
                field,
                digits: String::from_utf8_lossy(digits).into_owned(),
            }),
            HexRunError::NotHex | HexRunError::WrongLength { .. } => {
                FormatFault::InvalidChar.into()
            }
        })?;

        self.pos += len + 1;
        Ok(value)
    }
}
