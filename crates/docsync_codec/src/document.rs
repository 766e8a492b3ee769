//! The typed-record contract.

use crate::id::DocumentId;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// An untyped document payload: field name to JSON value.
///
/// This is the shape in which the store delivers and accepts documents.
/// Values may be strings, numbers, booleans, nulls, arrays, or nested
/// objects; timestamps arrive in whatever JSON representation the store
/// adapter uses (RFC 3339 text or epoch numbers) and are passed through
/// untouched.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// Trait for application types stored as documents.
///
/// A `Document` is any serde-serializable type that knows its own identity.
/// The identity lives on the struct (conventionally an `id` field) but is
/// carried out-of-band on the wire: [`decode_document`] injects it before
/// deserializing and [`encode_document`] strips it after serializing, so
/// payload bodies never duplicate the store's document key.
///
/// Decoding is permissive: payload fields with no counterpart on the struct
/// are ignored, so adding fields on the store side does not break older
/// readers.
///
/// # Example
///
/// ```
/// use docsync_codec::{Document, DocumentId};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Task {
///     id: DocumentId,
///     title: String,
///     done: bool,
/// }
///
/// impl Document for Task {
///     fn id(&self) -> &DocumentId {
///         &self.id
///     }
/// }
/// ```
///
/// [`decode_document`]: crate::decode_document
/// [`encode_document`]: crate::encode_document
pub trait Document: Serialize + DeserializeOwned {
    /// Returns the document's stable identity.
    ///
    /// Must equal the identity under which the document was fetched or
    /// observed; the decoder guarantees this for records it produces.
    fn id(&self) -> &DocumentId;
}
