//! Routing change events into typed groups.

use crate::change::{ChangeBatch, ChangeKind, DocumentChange};
use crate::diff::SnapshotDiff;
use docsync_codec::{decode_document, Document, ReportSink};

/// One batch's change events, decoded and grouped by kind.
///
/// Groups preserve batch order. They are disjoint per event but not
/// deduplicated by identity: an identity that appears under two kinds in
/// one batch lands in both groups, and the applier's fixed processing
/// order (removed, then modified, then added) resolves the overlap.
#[derive(Debug, Clone)]
pub struct Classified<T> {
    /// Records from `Added` events.
    pub added: Vec<T>,
    /// Records from `Modified` events.
    pub modified: Vec<T>,
    /// Records from `Removed` events.
    pub removed: Vec<T>,
}

impl<T: Document> Classified<T> {
    /// Reduces these groups to an ordered [`SnapshotDiff`].
    pub fn into_diff(self) -> SnapshotDiff<T> {
        SnapshotDiff::reduce(self.added, self.modified, self.removed)
    }
}

/// Classifies a change batch into typed groups, in a single pass.
///
/// Every event's payload is decoded under the event's identity, removals
/// included. An event whose payload fails to decode is reported to `sink`
/// and dropped; the rest of the batch is unaffected.
pub fn classify<T: Document>(batch: ChangeBatch, sink: &dyn ReportSink) -> Classified<T> {
    let mut groups = Classified {
        added: Vec::new(),
        modified: Vec::new(),
        removed: Vec::new(),
    };

    for DocumentChange { id, kind, fields } in batch {
        let record: T = match decode_document(fields, &id) {
            Ok(record) => record,
            Err(error) => {
                sink.report(error);
                continue;
            }
        };
        match kind {
            ChangeKind::Added => groups.added.push(record),
            ChangeKind::Modified => groups.modified.push(record),
            ChangeKind::Removed => groups.removed.push(record),
        }
    }

    groups
}
