//! Snapshot diffs: reducing change groups and applying them to a collection.

use crate::change::{ChangeBatch, ChangeKind};
use crate::classify::classify;
use docsync_codec::{Document, ReportSink};

/// Records sharing one change kind within a diff.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffGroup<T> {
    /// What happened to every record in this group.
    pub kind: ChangeKind,
    /// The affected records, in batch order.
    pub records: Vec<T>,
}

/// An ordered diff reduced from one change batch.
///
/// A diff holds at most three groups, always in the order removed,
/// modified, added; kinds with no records contribute no group. The fixed
/// order is a merge policy: when one identity is removed and re-added in
/// the same batch, applying removals first makes the pair net out to an
/// insert instead of a lost record.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotDiff<T> {
    groups: Vec<DiffGroup<T>>,
}

impl<T: Document> SnapshotDiff<T> {
    /// Builds a diff from per-kind record groups.
    ///
    /// Empty groups are omitted; three empty groups reduce to an empty diff.
    pub fn reduce(added: Vec<T>, modified: Vec<T>, removed: Vec<T>) -> Self {
        let mut groups = Vec::with_capacity(3);
        if !removed.is_empty() {
            groups.push(DiffGroup {
                kind: ChangeKind::Removed,
                records: removed,
            });
        }
        if !modified.is_empty() {
            groups.push(DiffGroup {
                kind: ChangeKind::Modified,
                records: modified,
            });
        }
        if !added.is_empty() {
            groups.push(DiffGroup {
                kind: ChangeKind::Added,
                records: added,
            });
        }
        Self { groups }
    }

    /// Returns the diff's groups in application order.
    pub fn groups(&self) -> &[DiffGroup<T>] {
        &self.groups
    }

    /// Returns true if the diff carries no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Applies the diff to an ordered collection, in group order.
    ///
    /// Matching is by identity, never by whole-value equality:
    ///
    /// - removed: the first element with a matching identity is removed;
    ///   further removals of the same identity are no-ops
    /// - modified: the first element with a matching identity is replaced
    ///   in place, keeping its position; an absent identity is ignored
    /// - added: a record whose identity is already present is skipped;
    ///   otherwise it is inserted at the front, so the last added record
    ///   ends up frontmost
    ///
    /// Returns `true` if the diff carried at least one group, whether or
    /// not the collection changed: a delivered notification was processed.
    pub fn apply(self, collection: &mut Vec<T>) -> bool {
        if self.groups.is_empty() {
            return false;
        }

        for group in self.groups {
            match group.kind {
                ChangeKind::Removed => {
                    for record in group.records {
                        let found = collection.iter().position(|item| item.id() == record.id());
                        if let Some(index) = found {
                            collection.remove(index);
                        }
                    }
                }
                ChangeKind::Modified => {
                    for record in group.records {
                        let found = collection.iter().position(|item| item.id() == record.id());
                        if let Some(index) = found {
                            collection[index] = record;
                        }
                    }
                }
                ChangeKind::Added => {
                    for record in group.records {
                        let present = collection.iter().any(|item| item.id() == record.id());
                        if !present {
                            collection.insert(0, record);
                        }
                    }
                }
            }
        }

        true
    }
}

/// Classifies a change batch and reduces it to an ordered diff.
///
/// This is the full notification-to-diff path: decode every event under
/// its identity (reporting failures to `sink`), group by kind, and order
/// the groups removed, modified, added.
pub fn diff_batch<T: Document>(batch: ChangeBatch, sink: &dyn ReportSink) -> SnapshotDiff<T> {
    classify(batch, sink).into_diff()
}
