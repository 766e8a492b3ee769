//! Store boundary traits.
//!
//! One adapter per document-store client implements these traits against
//! an already-scoped view of the store (a collection, or a query the
//! adapter constructed). The capability object stands for the view; no
//! query language crosses this boundary.
//!
//! All calls are synchronous request/response. An adapter wrapping an
//! async or callback-based client owns the bridging; this layer never
//! blocks on its own machinery.

use crate::change::ChangeBatch;
use crate::error::StoreResult;
use docsync_codec::{DocumentId, FieldMap};

/// Callback invoked with each notification from a watched view.
///
/// Successful deliveries carry the batch of change events; a backend
/// failure of the notification stream arrives as an error through the
/// same callback.
pub type ChangeListener = Box<dyn Fn(StoreResult<ChangeBatch>) + Send + Sync>;

/// Read access to a view of a document store.
pub trait FetchSource: Send + Sync {
    /// Fetches one document's payload body by identity.
    ///
    /// Returns `Ok(None)` if the document does not exist.
    fn fetch_one(&self, id: &DocumentId) -> StoreResult<Option<FieldMap>>;

    /// Fetches every document in the view, as `(identity, payload)` pairs.
    fn fetch_all(&self) -> StoreResult<Vec<(DocumentId, FieldMap)>>;

    /// Fetches up to `limit` documents after the given cursor.
    ///
    /// `after: None` starts from the beginning of the view. The caller
    /// continues by passing the identity of the last document it received.
    fn fetch_page(
        &self,
        after: Option<&DocumentId>,
        limit: usize,
    ) -> StoreResult<Vec<(DocumentId, FieldMap)>>;
}

/// Write access to a view of a document store.
pub trait WriteSink: Send + Sync {
    /// Creates or fully replaces a document.
    fn put(&self, id: &DocumentId, fields: FieldMap) -> StoreResult<()>;

    /// Merges fields into an existing document.
    ///
    /// Fails if the document does not exist; `put` is the call that
    /// creates documents.
    fn patch(&self, id: &DocumentId, fields: FieldMap) -> StoreResult<()>;

    /// Deletes a document. Deleting an absent document succeeds.
    fn delete(&self, id: &DocumentId) -> StoreResult<()>;
}

/// Change-notification access to a view of a document store.
pub trait WatchSource: Send + Sync {
    /// Registers a listener for change notifications on the view.
    ///
    /// Registration does not replay already-existing documents; callers
    /// that need the current contents fetch first. The listener stays
    /// registered until the returned handle is cancelled.
    fn watch(&self, listener: ChangeListener) -> Box<dyn Subscription>;
}

/// Handle controlling one active watch registration.
///
/// The handle is a controller, not a guard: dropping it without calling
/// [`cancel`](Subscription::cancel) leaves the registration active.
pub trait Subscription: Send + Sync {
    /// Cancels the registration. Safe to call more than once.
    fn cancel(&self);
}

/// Full access to a store view: fetch, write, and watch.
///
/// Blanket-implemented for any type carrying all three capabilities, so
/// adapters implement the three narrow traits and get this one for free.
pub trait DocumentStore: FetchSource + WriteSink + WatchSource {}

impl<S: FetchSource + WriteSink + WatchSource> DocumentStore for S {}
