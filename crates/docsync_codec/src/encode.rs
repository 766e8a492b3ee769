//! Record-to-payload encoding.

use crate::document::{Document, FieldMap};
use crate::error::EncodeError;
use crate::identity;

/// Encodes a typed record into a storable payload body.
///
/// The record is serialized to a JSON object and the identity key is removed
/// from the result, since identity travels beside the payload rather than
/// inside it. A record whose serialized form is not an object (a bare
/// scalar or array) is rejected with [`EncodeError::NotAnObject`].
pub fn encode_document<T: Document>(record: &T) -> Result<FieldMap, EncodeError> {
    let value = serde_json::to_value(record)
        .map_err(|source| EncodeError::serialize(record.id().clone(), source))?;
    match value {
        serde_json::Value::Object(fields) => Ok(identity::strip(fields)),
        _ => Err(EncodeError::not_an_object(record.id().clone())),
    }
}
