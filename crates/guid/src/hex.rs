//! Hex primitives shared by the parser and the formatter.

/// Failure reported by [`parse_hex_run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HexRunError {
    /// No hex digit at the starting position.
    NotHex,
    /// An exact length was requested and a different number of digits was found.
    WrongLength { expected: usize, found: usize },
    /// The digits do not fit in 64 bits.
    Overflow,
}

/// A successfully parsed run of hex digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexRun {
    pub value: u64,
    pub consumed: usize,
}

/// Decodes one ASCII hex digit (`0-9`, `a-f`, `A-F`).
pub const fn hex_digit_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Encodes the low nibble of `nibble` as a lowercase ASCII hex digit.
pub const fn hex_char(nibble: u8) -> u8 {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    DIGITS[(nibble & 0x0f) as usize]
}

/// Consumes hex digits from `input[pos..]` and returns their value.
///
/// Scanning stops at the first non-hex byte or the end of input. With `exact_len`, the
/// run must be exactly that many digits long.
///
/// # Errors
///
/// - [`HexRunError::NotHex`] if `input[pos]` is not a hex digit.
/// - [`HexRunError::WrongLength`] if `exact_len` is given and not met.
/// - [`HexRunError::Overflow`] if the value exceeds `u64::MAX`.
pub fn parse_hex_run(
    input: &[u8],
    pos: usize,
    exact_len: Option<usize>,
) -> Result<HexRun, HexRunError> {
    let digits = input
        .get(pos..)
        .unwrap_or_default()
        .iter()
        .take_while(|c| c.is_ascii_hexdigit())
        .count();

    if digits == 0 {
        return Err(HexRunError::NotHex);
    }
    if let Some(expected) = exact_len {
        if digits != expected {
            return Err(HexRunError::WrongLength {
                expected,
                found: digits,
            });
        }
    }

    let mut value: u64 = 0;
    for &c in &input[pos..pos + digits] {
        let nibble = hex_digit_value(c).ok_or(HexRunError::NotHex)?;
        value = value
            .checked_mul(16)
            .map(|v| v | u64::from(nibble))
            .ok_or(HexRunError::Overflow)?;
    }

    Ok(HexRun {
        value,
        consumed: digits,
    })
}

/// Parses `text` as a single hex number that must fill the whole slice and fit in
/// `width_bits`.
///
/// Returns `Err(NotHex)` if any byte is not a hex digit, `Err(Overflow)` if the value is
/// wider than `width_bits`.
pub(crate) fn parse_hex_field(text: &[u8], width_bits: u32) -> Result<u64, HexRunError> {
    let run = parse_hex_run(text, 0, None)?;
    if run.consumed != text.len() {
        return Err(HexRunError::NotHex);
    }
    if width_bits < 64 && run.value >> width_bits != 0 {
        return Err(HexRunError::Overflow);
    }
    Ok(run.value)
}

/// Writes `value` as `digits` lowercase hex characters into `out`, most significant first.
pub(crate) fn write_hex(out: &mut [u8], value: u64, digits: usize) {
    for (idx, slot) in out[..digits].iter_mut().enumerate() {
        let shift = (digits - 1 - idx) * 4;
        *slot = hex_char((value >> shift) as u8);
    }
}
