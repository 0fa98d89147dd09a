//! Throw policies and the public parsing entry points.
//!
//! The sub-parsers only ever produce a [`ParseFault`]. A [`ThrowPolicy`] decides, per call
//! site, whether that becomes an error, a re-classified error, or simply `None`.

use std::str::FromStr;

use crate::format::Notation;
use crate::parse::{parse_with_styles, FormatFault, ParseFault, Styles};
use crate::{Guid, GuidError, GuidResult};

/// How a parse failure is surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowPolicy {
    /// Every failure is an error; overflow stays [`GuidError::Overflow`].
    Strict,
    /// Every failure is an error; overflow is reported as [`GuidError::InvalidFormat`].
    StrictExceptOverflow,
    /// Failures are swallowed and reported as `Ok(None)`.
    Silent,
}

impl ThrowPolicy {
    /// Converts the outcome of a sub-parser into this policy's result.
    ///
    /// `Ok(Some(_))` on success. Only [`ThrowPolicy::Silent`] ever returns `Ok(None)`.
    pub fn surface(
        self,
        input: &str,
        outcome: Result<Guid, ParseFault>,
    ) -> GuidResult<Option<Guid>> {
        match outcome {
            Ok(guid) => Ok(Some(guid)),
            Err(fault) if self == ThrowPolicy::Silent => {
                tracing::trace!(input, %fault, "GUID parse failed");
                Ok(None)
            }
            Err(fault) => Err(self.escalate(input, fault)),
        }
    }

    /// Like [`ThrowPolicy::surface`] but always raises, for the strict entry points.
    fn raise(self, input: &str, outcome: Result<Guid, ParseFault>) -> GuidResult<Guid> {
        outcome.map_err(|fault| self.escalate(input, fault))
    }

    fn escalate(self, input: &str, fault: ParseFault) -> GuidError {
        let error = match (self, fault) {
            (_, ParseFault::Format(fault)) => GuidError::InvalidFormat(fault),
            (ThrowPolicy::Strict, ParseFault::Overflow(fault)) => GuidError::Overflow(fault),
            (_, ParseFault::Overflow(fault)) => {
                GuidError::InvalidFormat(FormatFault::Overflow(fault))
            }
        };
        tracing::debug!(input, error = %error, policy = ?self, "GUID parse failed");
        error
    }
}

impl Guid {
    /// Parses any of the `N`, `D`, `B`, `P` (or `X`) notations, inferred from the separators
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`GuidError::InvalidFormat`] for any failure, including a field overflow.
    pub fn parse(text: &str) -> GuidResult<Self> {
        ThrowPolicy::StrictExceptOverflow.raise(text, parse_with_styles(text, Styles::ANY))
    }

    /// Parses exactly the given notation.
    ///
    /// # Errors
    ///
    /// Returns [`GuidError::InvalidFormat`] if `text` is not in `notation`, including a field
    /// overflow.
    pub fn parse_exact(text: &str, notation: Notation) -> GuidResult<Self> {
        let styles = Styles::for_notation(notation);
        ThrowPolicy::StrictExceptOverflow.raise(text, parse_with_styles(text, styles))
    }

    /// Like [`Guid::parse_exact`], with the notation given as a format string (`"D"`, `"x"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`GuidError::InvalidFormat`] if the specifier is not exactly one notation
    /// character, or if `text` does not parse.
    pub fn parse_exact_spec(text: &str, spec: &str) -> GuidResult<Self> {
        let notation: Notation = spec.parse()?;
        Self::parse_exact(text, notation)
    }

    /// Loose-mode parse that returns `None` instead of an error.
    pub fn try_parse(text: &str) -> Option<Self> {
        ThrowPolicy::Silent
            .surface(text, parse_with_styles(text, Styles::ANY))
            .ok()
            .flatten()
    }

    /// Exact-mode parse that returns `None` instead of an error.
    pub fn try_parse_exact(text: &str, notation: Notation) -> Option<Self> {
        let styles = Styles::for_notation(notation);
        ThrowPolicy::Silent
            .surface(text, parse_with_styles(text, styles))
            .ok()
            .flatten()
    }

    /// Constructs a GUID from text, keeping overflow distinct from bad formatting.
    ///
    /// # Errors
    ///
    /// - [`GuidError::Overflow`] if a C-literal field is too wide.
    /// - [`GuidError::InvalidFormat`] for every other failure.
    pub fn from_text(text: &str) -> GuidResult<Self> {
        ThrowPolicy::Strict.raise(text, parse_with_styles(text, Styles::ANY))
    }

    /// Loose-mode parse of input that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`GuidError::NullInput`] for `None`, otherwise as [`Guid::parse`].
    pub fn parse_nullable(text: Option<&str>) -> GuidResult<Self> {
        match text {
            Some(text) => Self::parse(text),
            None => {
                tracing::debug!("GUID parse called without input");
                Err(GuidError::NullInput)
            }
        }
    }
}

impl FromStr for Guid {
    type Err = GuidError;

    /// Equivalent to [`Guid::from_text`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Guid::from_text(s)
    }
}

impl TryFrom<&str> for Guid {
    type Error = GuidError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Guid::from_text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, OverflowFault};
    use proptest::prelude::*;

    const DASHED: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";
    const BRACED: &str = "{6ba7b810-9dad-11d1-80b4-00c04fd430c8}";
    const SHORT: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c";
    const WIDE_BYTE: &str = "{0x6ba7b810,0x9dad,0x11d1,{0x80,0xb4,0x00,0xc0,0x4f,0xd4,0x30,0x1c8}}";

    fn wide_byte_fault() -> OverflowFault {
        OverflowFault {
            field: Field::K,
            digits: "1c8".into(),
        }
    }

    #[test]
    fn test_parse_exact_d_round_trips() {
        let guid = Guid::parse_exact(DASHED, Notation::D).unwrap();
        assert_eq!(guid.format(Notation::D), DASHED);
    }

    #[test]
    fn test_parse_exact_b_accepts_braces_but_d_does_not() {
        let braced = Guid::parse_exact(BRACED, Notation::B).unwrap();
        assert_eq!(braced, Guid::parse(DASHED).unwrap());

        assert_eq!(
            Guid::parse_exact(BRACED, Notation::D),
            Err(GuidError::InvalidFormat(FormatFault::UnexpectedBraces))
        );
    }

    #[test]
    fn test_short_input_fails_under_every_policy() {
        let expected = GuidError::InvalidFormat(FormatFault::InvalidLength);
        assert_eq!(Guid::parse(SHORT), Err(expected.clone()));
        assert_eq!(Guid::from_text(SHORT), Err(expected.clone()));
        assert_eq!(SHORT.parse::<Guid>(), Err(expected.clone()));
        assert_eq!(Guid::parse_exact(SHORT, Notation::D), Err(expected));
        assert_eq!(Guid::try_parse(SHORT), None);
        assert_eq!(Guid::try_parse_exact(SHORT, Notation::D), None);
    }

    #[test]
    fn test_to_bytes_shows_mixed_endian_layout() {
        let guid = Guid::parse_exact("00000001-0002-0003-0405-060708090a0b", Notation::D).unwrap();
        assert_eq!(
            guid.to_bytes(),
            [
                0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04, 0x05, 0x06, 0x07, 0x08,
                0x09, 0x0a, 0x0b
            ]
        );
    }

    #[test]
    fn test_overflow_policies() {
        assert_eq!(
            Guid::from_text(WIDE_BYTE),
            Err(GuidError::Overflow(wide_byte_fault()))
        );
        assert_eq!(
            Guid::parse(WIDE_BYTE),
            Err(GuidError::InvalidFormat(FormatFault::Overflow(
                wide_byte_fault()
            )))
        );
        assert_eq!(
            Guid::parse_exact(WIDE_BYTE, Notation::X),
            Err(GuidError::InvalidFormat(FormatFault::Overflow(
                wide_byte_fault()
            )))
        );
        assert_eq!(Guid::try_parse(WIDE_BYTE), None);
        assert!(Guid::parse(WIDE_BYTE).unwrap_err().is_overflow());
        assert!(Guid::from_text(WIDE_BYTE).unwrap_err().is_overflow());
    }

    #[test]
    fn test_surface_directly() {
        let fault = ParseFault::Format(FormatFault::InvalidChar);
        assert_eq!(ThrowPolicy::Silent.surface("x", Err(fault.clone())), Ok(None));
        assert_eq!(
            ThrowPolicy::Strict.surface("x", Err(fault)),
            Err(GuidError::InvalidFormat(FormatFault::InvalidChar))
        );
        assert_eq!(
            ThrowPolicy::Strict.surface("x", Ok(Guid::EMPTY)),
            Ok(Some(Guid::EMPTY))
        );
    }

    #[test]
    fn test_parse_exact_spec() {
        let guid = Guid::parse_exact_spec(BRACED, "b").unwrap();
        assert_eq!(guid.format(Notation::B), BRACED);

        assert_eq!(
            Guid::parse_exact_spec(BRACED, ""),
            Err(GuidError::InvalidFormat(FormatFault::BadFormatSpecifier))
        );
        assert_eq!(
            Guid::parse_exact_spec(BRACED, "Z"),
            Err(GuidError::InvalidFormat(FormatFault::UnknownNotation('Z')))
        );
    }

    #[test]
    fn test_parse_nullable() {
        assert_eq!(Guid::parse_nullable(None), Err(GuidError::NullInput));
        assert_eq!(
            Guid::parse_nullable(Some(DASHED)),
            Guid::parse(DASHED)
        );
        assert_eq!(
            Guid::parse_nullable(Some("")),
            Err(GuidError::InvalidFormat(FormatFault::Empty))
        );
    }

    #[test]
    fn test_exact_mode_rejects_other_notations() {
        let guid = Guid::parse(DASHED).unwrap();
        for notation in Notation::ALL {
            for other in Notation::ALL {
                let text = guid.format(other);
                let parsed = Guid::try_parse_exact(&text, notation);
                if notation == other {
                    assert_eq!(parsed, Some(guid), "{notation} on {text}");
                } else {
                    assert_eq!(parsed, None, "{notation} on {text}");
                }
            }
        }
    }

    #[test]
    fn test_error_messages() {
        let err = Guid::parse(SHORT).unwrap_err();
        assert_eq!(err.to_string(), "invalid GUID format: input has the wrong length");

        let err = Guid::from_text(WIDE_BYTE).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GUID field overflow: 0x1c8 does not fit in field K (8 bits)"
        );
    }

    fn any_guid() -> impl Strategy<Value = Guid> {
        any::<[u8; 16]>().prop_map(Guid::from_bytes)
    }

    fn any_notation() -> impl Strategy<Value = Notation> {
        prop_oneof![
            Just(Notation::N),
            Just(Notation::D),
            Just(Notation::B),
            Just(Notation::P),
            Just(Notation::X),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_parse_exact_round_trips(x in any_guid(), notation in any_notation()) {
            let text = x.format(notation);
            prop_assert_eq!(Guid::parse_exact(&text, notation), Ok(x));
            prop_assert_eq!(text.len(), notation.text_len());
        }

        #[test]
        fn prop_loose_parse_round_trips(x in any_guid(), notation in any_notation()) {
            prop_assert_eq!(Guid::parse(&x.format(notation)), Ok(x));
        }

        #[test]
        fn prop_uppercase_input_is_equivalent(x in any_guid(), notation in any_notation()) {
            let lower = x.format(notation);
            let upper = lower.to_ascii_uppercase();
            prop_assert!(!lower.chars().any(|c| c.is_ascii_uppercase()));
            prop_assert_eq!(Guid::parse_exact(&upper, notation), Ok(x));
        }

        #[test]
        fn prop_bytes_round_trip(x in any_guid()) {
            prop_assert_eq!(Guid::from_bytes(x.to_bytes()), x);
        }
    }
}
