//! Identity binding for document payloads.
//!
//! The store carries a document's identity out-of-band, as the document key.
//! Typed records carry it in-band, as an `id` field. These two total
//! functions convert between the conventions: [`decorate`] injects the
//! identity before decoding, [`strip`] removes it after encoding.
//!
//! Both take their payload by value and return the adjusted map, so the
//! caller's own copy is never mutated behind its back.

use crate::document::FieldMap;
use crate::id::DocumentId;

/// The payload key under which a document's identity is bound.
pub const ID_FIELD: &str = "id";

/// Returns `fields` with the identity bound under [`ID_FIELD`].
///
/// Any existing value under that key is overwritten: the out-of-band
/// identity is authoritative, whatever the payload body claims.
#[must_use]
pub fn decorate(mut fields: FieldMap, id: &DocumentId) -> FieldMap {
    fields.insert(
        ID_FIELD.to_string(),
        serde_json::Value::String(id.as_str().to_string()),
    );
    fields
}

/// Returns `fields` with the [`ID_FIELD`] entry removed.
///
/// Used when re-encoding a record for the wire, where the identity travels
/// as the document key and must not be duplicated inside the body. A map
/// without the key passes through unchanged.
#[must_use]
pub fn strip(mut fields: FieldMap) -> FieldMap {
    fields.remove(ID_FIELD);
    fields
}
