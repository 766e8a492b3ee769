//! Change events delivered by a watched store view.

use docsync_codec::{DocumentId, FieldMap};

/// What happened to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// The document entered the watched view.
    Added,
    /// The document's payload changed.
    Modified,
    /// The document left the watched view.
    Removed,
}

/// A single change event from a store notification.
///
/// Every event carries the document's payload at event time. `Removed`
/// events carry the last payload the store knew, so consumers can still
/// decode the departing record.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChange {
    /// Identity of the affected document.
    pub id: DocumentId,
    /// What happened.
    pub kind: ChangeKind,
    /// The document's payload body at event time.
    pub fields: FieldMap,
}

impl DocumentChange {
    /// Creates an `Added` event.
    pub fn added(id: DocumentId, fields: FieldMap) -> Self {
        Self {
            id,
            kind: ChangeKind::Added,
            fields,
        }
    }

    /// Creates a `Modified` event.
    pub fn modified(id: DocumentId, fields: FieldMap) -> Self {
        Self {
            id,
            kind: ChangeKind::Modified,
            fields,
        }
    }

    /// Creates a `Removed` event carrying the document's last payload.
    pub fn removed(id: DocumentId, fields: FieldMap) -> Self {
        Self {
            id,
            kind: ChangeKind::Removed,
            fields,
        }
    }
}

/// One store notification: the ordered events it delivered.
///
/// A batch is the atomic unit of delivery. Events for the same identity may
/// appear more than once in a batch (for example removed and re-added); the
/// diff applier's group order resolves that.
pub type ChangeBatch = Vec<DocumentChange>;
