//! Error types for store operations.

use docsync_codec::{DecodeError, EncodeError};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when operating against a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store client or its connection failed.
    ///
    /// The message is whatever the adapter's underlying client reported;
    /// this layer treats it as opaque.
    #[error("backend error: {message}")]
    Backend {
        /// Error message from the store client.
        message: String,
        /// Whether the operation can be retried.
        retryable: bool,
    },

    /// A fetched payload failed to decode into the record type.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A record failed to encode into a storable payload.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}

impl StoreError {
    /// Creates a non-retryable backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            retryable: false,
        }
    }

    /// Creates a retryable backend error.
    pub fn backend_retryable(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            retryable: true,
        }
    }

    /// Returns true if the failed operation can be retried.
    ///
    /// Codec failures are never retryable: the same payload will fail the
    /// same way until the record type or the stored document changes.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Backend { retryable, .. } => *retryable,
            StoreError::Decode(_) | StoreError::Encode(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_codec::DocumentId;

    #[test]
    fn retryable_errors() {
        assert!(StoreError::backend_retryable("connection reset").is_retryable());
        assert!(!StoreError::backend("permission denied").is_retryable());
    }

    #[test]
    fn codec_errors_are_never_retryable() {
        let source = serde_json::from_str::<i64>("not json").unwrap_err();
        let err = StoreError::from(DecodeError::new(DocumentId::new("d1"), source));
        assert!(!err.is_retryable());
    }

    #[test]
    fn error_display() {
        let err = StoreError::backend("quota exceeded");
        assert_eq!(err.to_string(), "backend error: quota exceeded");
    }
}
