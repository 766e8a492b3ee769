//! # Docsync Codec
//!
//! Typed JSON document codec with identity binding for docsync.
//!
//! A document store keeps schemaless JSON bodies addressed by an identity
//! that lives *outside* the body. This crate converts between those two
//! worlds:
//!
//! - Decoding binds the external identity into the payload before
//!   deserializing, so a typed record always carries the identity it was
//!   fetched under
//! - Encoding strips the identity key from the serialized body, so identity
//!   is never duplicated into storage
//! - Batch decoding tolerates malformed documents: failures are reported to
//!   a [`ReportSink`] and dropped instead of failing the whole batch
//!
//! ## Usage
//!
//! ```
//! use docsync_codec::{decode_document, encode_document, Document, DocumentId};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Task {
//!     id: DocumentId,
//!     title: String,
//!     done: bool,
//! }
//!
//! impl Document for Task {
//!     fn id(&self) -> &DocumentId {
//!         &self.id
//!     }
//! }
//!
//! let task = Task {
//!     id: DocumentId::new("t1"),
//!     title: "write docs".into(),
//!     done: false,
//! };
//!
//! // Encode: the identity key stays out of the stored body.
//! let fields = encode_document(&task).unwrap();
//! assert!(!fields.contains_key("id"));
//!
//! // Decode: identity is bound back in from outside the body.
//! let restored: Task = decode_document(fields, task.id()).unwrap();
//! assert_eq!(restored, task);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decode;
mod document;
mod encode;
mod error;
mod id;
mod identity;
mod sink;

pub use decode::{decode_document, decode_documents};
pub use document::{Document, FieldMap};
pub use encode::encode_document;
pub use error::{DecodeError, EncodeError};
pub use id::DocumentId;
pub use identity::{decorate, strip, ID_FIELD};
pub use sink::{LogSink, MemorySink, NullSink, ReportSink};
