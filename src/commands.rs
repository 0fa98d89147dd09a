//! Command handlers for the `guid` binary.
//!
//! Handlers return the text to print so they can be tested without capturing stdout.

use std::cmp::Ordering;

use anyhow::{bail, Context};
use guid_codec::{hex_digit_value, Guid, Notation, GUID_BYTE_LEN};
use serde::Serialize;

use crate::config::RunConfig;

/// Everything the `parse` command knows about a GUID.
#[derive(Debug, Serialize)]
pub struct GuidReport {
    pub id: Guid,
    pub n: String,
    pub d: String,
    pub b: String,
    pub p: String,
    pub x: String,
    pub bytes: String,
    pub version: u8,
    pub variant_bits: u8,
    pub hash_code: u32,
}

impl GuidReport {
    pub fn new(guid: Guid, config: &RunConfig) -> Self {
        Self {
            id: guid,
            n: config.render(&guid, Some(Notation::N)),
            d: config.render(&guid, Some(Notation::D)),
            b: config.render(&guid, Some(Notation::B)),
            p: config.render(&guid, Some(Notation::P)),
            x: config.render(&guid, Some(Notation::X)),
            bytes: wire_hex(&guid),
            version: guid.version(),
            variant_bits: guid.variant_bits(),
            hash_code: guid.hash_code(),
        }
    }

    pub fn to_text(&self) -> String {
        format!(
            "N: {}\nD: {}\nB: {}\nP: {}\nX: {}\nbytes: {}\nversion: {}\nvariant: {:02b}\nhash: {:08x}",
            self.n,
            self.d,
            self.b,
            self.p,
            self.x,
            self.bytes,
            self.version,
            self.variant_bits,
            self.hash_code
        )
    }
}

/// Parses `text` the way the `parse` command was asked to.
pub fn parse_guid(text: Option<&str>, exact: Option<Notation>, strict: bool) -> anyhow::Result<Guid> {
    let guid = match (text, exact) {
        (None, _) => Guid::parse_nullable(None)?,
        (Some(text), Some(notation)) => Guid::parse_exact(text, notation)
            .with_context(|| format!("'{text}' is not in {notation} notation"))?,
        (Some(text), None) if strict => Guid::from_text(text)?,
        (Some(text), None) => Guid::parse(text)?,
    };
    Ok(guid)
}

/// Generates `count` random GUIDs, one per line.
pub fn generate(count: usize, notation: Option<Notation>, config: &RunConfig) -> String {
    (0..count)
        .map(|_| config.render(&Guid::new_random(), notation))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The 16 wire bytes as space-separated lowercase hex.
pub fn wire_hex(guid: &Guid) -> String {
    guid.as_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes a dump of the 16 wire bytes. Whitespace, `:` and `-` between digits are ignored.
pub fn decode_wire_hex(text: &str) -> anyhow::Result<Guid> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':' && *b != b'-')
        .collect();
    if digits.len() != GUID_BYTE_LEN * 2 {
        bail!(
            "expected {} hex digits of wire bytes, got {}",
            GUID_BYTE_LEN * 2,
            digits.len()
        );
    }

    let bytes = digits
        .chunks_exact(2)
        .map(|pair| match (hex_digit_value(pair[0]), hex_digit_value(pair[1])) {
            (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
            _ => bail!(
                "'{}' is not a hex byte",
                String::from_utf8_lossy(pair)
            ),
        })
        .collect::<anyhow::Result<Vec<u8>>>()?;

    Ok(Guid::from_slice(&bytes)?)
}

/// Describes how `left` orders against `right`.
pub fn describe_order(left: &Guid, right: &Guid) -> &'static str {
    match left.cmp(right) {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}
