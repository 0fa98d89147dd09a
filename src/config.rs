//! Runtime configuration for the `guid` binary.
//!
//! Configuration is resolved once at startup and then passed to the command handlers, so
//! nothing below `main` reads environment variables.

use guid_codec::{Guid, GuidError, Notation};

/// Environment variable selecting the notation used when a command is not given one.
pub const DEFAULT_NOTATION_ENV: &str = "GUID_DEFAULT_NOTATION";

/// Environment variable that switches output to uppercase hex.
pub const UPPERCASE_ENV: &str = "GUID_UPPERCASE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {0}", var = DEFAULT_NOTATION_ENV)]
    InvalidNotation(#[source] GuidError),
    #[error("{var} must be one of true/false/1/0/yes/no, got '{0}'", var = UPPERCASE_ENV)]
    InvalidFlag(String),
}

/// Binary configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct RunConfig {
    default_notation: Notation,
    uppercase: bool,
}

impl RunConfig {
    pub fn new(default_notation: Notation, uppercase: bool) -> Self {
        Self {
            default_notation,
            uppercase,
        }
    }

    /// Reads configuration from the process environment.
    ///
    /// Call this once, after `.env` has been loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        let default_notation = notation_from_env_value(std::env::var(DEFAULT_NOTATION_ENV).ok())?;
        let uppercase = uppercase_from_env_value(std::env::var(UPPERCASE_ENV).ok())?;
        Ok(Self::new(default_notation, uppercase))
    }

    pub fn default_notation(&self) -> Notation {
        self.default_notation
    }

    pub fn uppercase(&self) -> bool {
        self.uppercase
    }

    /// Formats `guid` for output, using the default notation when `notation` is `None`.
    ///
    /// The codec always produces lowercase; uppercase is applied here only.
    pub fn render(&self, guid: &Guid, notation: Option<Notation>) -> String {
        let text = guid.format(notation.unwrap_or(self.default_notation));
        if self.uppercase {
            text.to_ascii_uppercase()
        } else {
            text
        }
    }
}

/// Parse the default notation from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `D`.
pub fn notation_from_env_value(value: Option<String>) -> Result<Notation, ConfigError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value
        .map(|v| v.parse::<Notation>())
        .transpose()
        .map_err(ConfigError::InvalidNotation)?;

    Ok(parsed.unwrap_or_default())
}

/// Parse the uppercase switch from an optional string value. Absent means `false`.
pub fn uppercase_from_env_value(value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value.map(|v| v.trim().to_ascii_lowercase()) else {
        return Ok(false);
    };

    match value.as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        _ => Err(ConfigError::InvalidFlag(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_defaults_to_d() {
        assert_eq!(notation_from_env_value(None).unwrap(), Notation::D);
        assert_eq!(
            notation_from_env_value(Some("  ".into())).unwrap(),
            Notation::D
        );
    }

    #[test]
    fn test_notation_is_case_insensitive() {
        assert_eq!(
            notation_from_env_value(Some("x".into())).unwrap(),
            Notation::X
        );
        assert_eq!(
            notation_from_env_value(Some(" B ".into())).unwrap(),
            Notation::B
        );
    }

    #[test]
    fn test_notation_rejects_unknown_values() {
        let err = notation_from_env_value(Some("braces".into())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNotation(_)));

        let err = notation_from_env_value(Some("Q".into())).unwrap_err();
        assert!(err.to_string().contains(DEFAULT_NOTATION_ENV));
    }

    #[test]
    fn test_uppercase_flag_values() {
        assert!(!uppercase_from_env_value(None).unwrap());
        assert!(!uppercase_from_env_value(Some("0".into())).unwrap());
        assert!(uppercase_from_env_value(Some("TRUE".into())).unwrap());
        assert!(uppercase_from_env_value(Some(" yes ".into())).unwrap());
        assert!(matches!(
            uppercase_from_env_value(Some("maybe".into())),
            Err(ConfigError::InvalidFlag(v)) if v == "maybe"
        ));
    }

    #[test]
    fn test_render_applies_case_and_default() {
        let guid = Guid::from_fields(0xabcd_ef01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff);

        let lower = RunConfig::new(Notation::N, false);
        assert_eq!(
            lower.render(&guid, None),
            "abcdef010000000000000000000000ff"
        );

        let upper = RunConfig::new(Notation::D, true);
        assert_eq!(
            upper.render(&guid, Some(Notation::B)),
            "{ABCDEF01-0000-0000-0000-0000000000FF}"
        );
    }
}
