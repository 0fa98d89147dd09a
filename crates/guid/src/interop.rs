//! Conversions to and from [`uuid::Uuid`].
//!
//! `uuid::Uuid` stores its bytes big-endian (RFC 4122 order) while [`Guid`] uses the
//! mixed-endian layout, so conversions go through the fields. The textual form is preserved:
//! a `Guid` and the `Uuid` it converts to print the same `D` string.

use uuid::Uuid;

use crate::Guid;

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        let (a, b, c, tail) = uuid.as_fields();
        Guid::from_parts(a, b, c, *tail)
    }
}

impl From<Guid> for Uuid {
    fn from(guid: Guid) -> Self {
        Uuid::from_fields(guid.a(), guid.b(), guid.c(), &guid.tail())
    }
}
