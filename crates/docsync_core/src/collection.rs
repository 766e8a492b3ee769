//! Typed collection front-end over a store view.

use crate::change::{ChangeKind, DocumentChange};
use crate::diff::{diff_batch, SnapshotDiff};
use crate::error::StoreResult;
use crate::store::{DocumentStore, Subscription};
use docsync_codec::{
    decode_document, decode_documents, encode_document, Document, DocumentId, FieldMap, LogSink,
    ReportSink,
};
use std::marker::PhantomData;
use std::sync::Arc;

/// One page of typed records from a cursor-paged fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPage<T> {
    /// The decoded records in this page.
    pub items: Vec<T>,
    /// Identity of the last raw document in the page, for continuation.
    ///
    /// `None` means the page was empty and iteration is complete. The
    /// cursor tracks raw documents, so a page whose records all failed to
    /// decode still advances.
    pub cursor: Option<DocumentId>,
}

/// A typed view of one store collection.
///
/// `Collection<T, S>` layers the codec and the diff machinery over a store
/// adapter `S`: fetches decode into `T`, writes encode from `T`, and watch
/// notifications arrive as ready-to-apply [`SnapshotDiff`]s.
///
/// Batch reads tolerate corrupt documents (dropped and reported to the
/// collection's [`ReportSink`]); single-document reads surface the decode
/// failure to the caller.
///
/// # Example
///
/// ```
/// use docsync_core::{Collection, Document, DocumentId, MemoryStore};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Task {
///     id: DocumentId,
///     title: String,
/// }
///
/// impl Document for Task {
///     fn id(&self) -> &DocumentId {
///         &self.id
///     }
/// }
///
/// let store = MemoryStore::new();
/// let tasks: Collection<Task, _> = Collection::new(store.collection("tasks"));
///
/// let task = Task {
///     id: DocumentId::new("t1"),
///     title: "water plants".into(),
/// };
/// tasks.put(&task)?;
///
/// assert_eq!(tasks.get(task.id())?, Some(task));
/// # Ok::<(), docsync_core::StoreError>(())
/// ```
pub struct Collection<T: Document, S: DocumentStore> {
    store: Arc<S>,
    sink: Arc<dyn ReportSink>,
    _marker: PhantomData<T>,
}

impl<T: Document, S: DocumentStore> Collection<T, S> {
    /// Creates a typed view over a store adapter.
    ///
    /// Dropped-document reports go to a [`LogSink`]; use
    /// [`with_sink`](Collection::with_sink) to route them elsewhere.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            sink: Arc::new(LogSink),
            _marker: PhantomData,
        }
    }

    /// Replaces the report sink for dropped documents.
    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Fetches and decodes one record.
    ///
    /// Returns `Ok(None)` for an absent document. A document that exists
    /// but fails to decode is an error here, not a silent drop: the caller
    /// asked for this one specifically.
    pub fn get(&self, id: &DocumentId) -> StoreResult<Option<T>> {
        match self.store.fetch_one(id)? {
            Some(fields) => Ok(Some(decode_document(fields, id)?)),
            None => Ok(None),
        }
    }

    /// Fetches and decodes every record in the view.
    ///
    /// Corrupt documents are dropped and reported; the call succeeds with
    /// the survivors.
    pub fn get_all(&self) -> StoreResult<Vec<T>> {
        let pairs = self.store.fetch_all()?;
        Ok(decode_documents(pairs, self.sink.as_ref()))
    }

    /// Fetches one page of records after the given cursor.
    pub fn get_page(
        &self,
        after: Option<&DocumentId>,
        limit: usize,
    ) -> StoreResult<DocumentPage<T>> {
        let pairs = self.store.fetch_page(after, limit)?;
        let cursor = pairs.last().map(|(id, _)| id.clone());
        let items = decode_documents(pairs, self.sink.as_ref());
        Ok(DocumentPage { items, cursor })
    }

    /// Encodes and writes one record, creating or replacing its document.
    pub fn put(&self, record: &T) -> StoreResult<()> {
        let fields = encode_document(record)?;
        self.store.put(record.id(), fields)
    }

    /// Merges raw fields into an existing document.
    ///
    /// Takes raw fields rather than a record: a partial update is exactly
    /// the case where no complete `T` exists on the caller's side.
    pub fn patch(&self, id: &DocumentId, fields: FieldMap) -> StoreResult<()> {
        self.store.patch(id, fields)
    }

    /// Deletes a document. Deleting an absent document succeeds.
    pub fn delete(&self, id: &DocumentId) -> StoreResult<()> {
        self.store.delete(id)
    }

    /// Watches the view, delivering each notification as an ordered diff.
    ///
    /// Per-event decode failures are dropped and reported to the
    /// collection's sink; backend failures of the stream are forwarded to
    /// `on_diff` as errors. The registration lives until the returned
    /// handle is cancelled.
    pub fn watch<F>(&self, on_diff: F) -> Box<dyn Subscription>
    where
        F: Fn(StoreResult<SnapshotDiff<T>>) + Send + Sync + 'static,
        T: 'static,
    {
        let sink = Arc::clone(&self.sink);
        self.store.watch(Box::new(move |result| match result {
            Ok(batch) => on_diff(Ok(diff_batch(batch, sink.as_ref()))),
            Err(error) => on_diff(Err(error)),
        }))
    }

    /// Watches a single document by identity.
    ///
    /// Added and modified events decode to `Some(record)`, removal to
    /// `None`; notifications not touching the identity produce no call.
    /// This is a single-document read, so a decode failure surfaces as an
    /// error instead of being dropped.
    pub fn watch_one<F>(&self, id: &DocumentId, on_change: F) -> Box<dyn Subscription>
    where
        F: Fn(StoreResult<Option<T>>) + Send + Sync + 'static,
        T: 'static,
    {
        let watched = id.clone();
        self.store.watch(Box::new(move |result| {
            let batch = match result {
                Ok(batch) => batch,
                Err(error) => {
                    on_change(Err(error));
                    return;
                }
            };
            for DocumentChange { id, kind, fields } in batch {
                if id != watched {
                    continue;
                }
                match kind {
                    ChangeKind::Removed => on_change(Ok(None)),
                    ChangeKind::Added | ChangeKind::Modified => {
                        match decode_document::<T>(fields, &id) {
                            Ok(record) => on_change(Ok(Some(record))),
                            Err(error) => on_change(Err(error.into())),
                        }
                    }
                }
            }
        }))
    }
}
