//! Serde support.
//!
//! Human-readable formats (JSON, YAML, ...) use the `D` notation and accept anything
//! [`Guid::parse`] accepts. Binary formats use the 16-byte wire layout.

use std::fmt;

use serde::de::{self, Visitor};

use crate::Guid;

impl serde::Serialize for Guid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

struct GuidVisitor;

impl<'de> Visitor<'de> for GuidVisitor {
    type Value = Guid;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a GUID string or 16 bytes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Guid, E> {
        Guid::parse(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Guid, E> {
        Guid::from_slice(v).map_err(E::custom)
    }
}

impl<'de> serde::Deserialize<'de> for Guid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(GuidVisitor)
        } else {
            deserializer.deserialize_bytes(GuidVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Record {
        id: Guid,
    }

    #[test]
    fn test_json_uses_d_notation() {
        let record = Record {
            id: Guid::from_fields(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"00000001-0002-0003-0405-060708090a0b"}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_json_accepts_other_notations() {
        let back: Record =
            serde_json::from_str(r#"{"id":"{00000001-0002-0003-0405-060708090A0B}"}"#).unwrap();
        assert_eq!(back.id, Guid::from_fields(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11));
    }

    #[test]
    fn test_json_rejects_bad_text() {
        let err = serde_json::from_str::<Record>(r#"{"id":"not-a-guid"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid GUID format"));
    }
}
