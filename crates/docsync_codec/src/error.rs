//! Error types for the codec crate.

use crate::id::DocumentId;
use thiserror::Error;

/// A document payload failed structural decoding.
///
/// Raised when a payload is missing a required field, has a field of the
/// wrong type, or contains a malformed nested value for the target shape.
/// Extra unknown fields never cause this error.
#[derive(Debug, Error)]
#[error("failed to decode document {id}: {source}")]
pub struct DecodeError {
    /// Identity of the offending document.
    pub id: DocumentId,
    /// Underlying structural error.
    #[source]
    pub source: serde_json::Error,
}

impl DecodeError {
    /// Creates a decode error for the given document.
    pub fn new(id: DocumentId, source: serde_json::Error) -> Self {
        Self { id, source }
    }
}

/// A typed record failed to encode to a document payload.
///
/// Both variants are programming-error-class: a well-formed [`Document`]
/// type does not hit them in normal operation.
///
/// [`Document`]: crate::Document
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The record did not serialize.
    #[error("failed to encode document {id}: {source}")]
    Serialize {
        /// Identity of the offending record.
        id: DocumentId,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The record serialized to something other than a JSON object.
    ///
    /// Document payloads are field maps; a type that serializes to a bare
    /// scalar or array cannot be stored as a document.
    #[error("document {id} did not encode to an object")]
    NotAnObject {
        /// Identity of the offending record.
        id: DocumentId,
    },
}

impl EncodeError {
    /// Creates a serialization failure for the given record.
    pub fn serialize(id: DocumentId, source: serde_json::Error) -> Self {
        Self::Serialize { id, source }
    }

    /// Creates a non-object failure for the given record.
    pub fn not_an_object(id: DocumentId) -> Self {
        Self::NotAnObject { id }
    }
}
