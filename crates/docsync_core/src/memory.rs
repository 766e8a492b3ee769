//! In-memory document store.
//!
//! [`MemoryStore`] is the reference adapter for the store boundary. It
//! implements fetch, write, and watch against process-local state and
//! emits one single-event change batch per successful write, synchronously
//! on the writer's thread. Tests use it as their store double; adapter
//! authors can use it as a template for the trait contracts.

use crate::change::{ChangeBatch, DocumentChange};
use crate::error::{StoreError, StoreResult};
use crate::store::{ChangeListener, FetchSource, Subscription, WatchSource, WriteSink};
use docsync_codec::{DocumentId, FieldMap};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::debug;

type StoredListener = Arc<dyn Fn(StoreResult<ChangeBatch>) + Send + Sync>;
type ListenerMap = RwLock<HashMap<u64, StoredListener>>;

/// An in-memory document store with named collections.
///
/// Collections are created on first use and shared: every call to
/// [`collection`](MemoryStore::collection) with the same name returns the
/// same underlying collection.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Arc<MemoryCollection>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the named collection, creating it on first use.
    pub fn collection(&self, name: &str) -> Arc<MemoryCollection> {
        if let Some(collection) = self.collections.read().get(name) {
            return Arc::clone(collection);
        }

        let mut collections = self.collections.write();
        let collection = collections.entry(name.to_string()).or_insert_with(|| {
            Arc::new(MemoryCollection::new(
                name.to_string(),
                Arc::clone(&self.offline),
            ))
        });
        Arc::clone(collection)
    }

    /// Simulates losing the backend.
    ///
    /// While offline, every fetch and write in every collection fails with
    /// a retryable backend error. Watch registrations stay alive, matching
    /// a store client that keeps its listeners across reconnects.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// One named collection inside a [`MemoryStore`].
///
/// Documents are kept in identity order, so `fetch_all` and `fetch_page`
/// return deterministic sequences and the page cursor is just the last
/// identity seen.
///
/// Events are delivered outside the document lock, so a listener may
/// re-enter the store. When two threads race writes to one identity, their
/// events can therefore arrive in either order; single-writer and
/// distinct-identity flows always observe state-transition order.
pub struct MemoryCollection {
    name: String,
    offline: Arc<AtomicBool>,
    documents: RwLock<BTreeMap<DocumentId, FieldMap>>,
    listeners: Arc<ListenerMap>,
    next_listener_id: AtomicU64,
}

impl MemoryCollection {
    fn new(name: String, offline: Arc<AtomicBool>) -> Self {
        Self {
            name,
            offline,
            documents: RwLock::new(BTreeMap::new()),
            listeners: Arc::new(RwLock::new(HashMap::new())),
            next_listener_id: AtomicU64::new(0),
        }
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of documents in the collection.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Returns true if the collection holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Returns the number of active watch registrations.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Pushes a backend error to every active listener.
    ///
    /// Simulates a notification stream failure (network drop, revoked
    /// permission) without touching the stored documents.
    pub fn emit_backend_error(&self, message: impl Into<String>) {
        let message = message.into();
        for listener in self.active_listeners() {
            listener(Err(StoreError::backend_retryable(message.clone())));
        }
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::backend_retryable("store is offline"));
        }
        Ok(())
    }

    fn active_listeners(&self) -> Vec<StoredListener> {
        self.listeners.read().values().cloned().collect()
    }

    /// Delivers one event to all listeners as a single-event batch.
    ///
    /// Called after the document lock is released; a listener may re-enter
    /// the store.
    fn emit(&self, change: DocumentChange) {
        debug!(
            collection = %self.name,
            id = %change.id,
            kind = ?change.kind,
            "delivering change"
        );
        for listener in self.active_listeners() {
            listener(Ok(vec![change.clone()]));
        }
    }
}

impl FetchSource for MemoryCollection {
    fn fetch_one(&self, id: &DocumentId) -> StoreResult<Option<FieldMap>> {
        self.ensure_online()?;
        Ok(self.documents.read().get(id).cloned())
    }

    fn fetch_all(&self) -> StoreResult<Vec<(DocumentId, FieldMap)>> {
        self.ensure_online()?;
        Ok(self
            .documents
            .read()
            .iter()
            .map(|(id, fields)| (id.clone(), fields.clone()))
            .collect())
    }

    fn fetch_page(
        &self,
        after: Option<&DocumentId>,
        limit: usize,
    ) -> StoreResult<Vec<(DocumentId, FieldMap)>> {
        self.ensure_online()?;
        let documents = self.documents.read();
        // DocumentId borrows as both itself and str; pin the lookup key type.
        let range = match after {
            Some(cursor) => {
                documents.range::<DocumentId, _>((Bound::Excluded(cursor), Bound::Unbounded))
            }
            None => documents.range::<DocumentId, _>(..),
        };
        Ok(range
            .take(limit)
            .map(|(id, fields)| (id.clone(), fields.clone()))
            .collect())
    }
}

impl WriteSink for MemoryCollection {
    fn put(&self, id: &DocumentId, fields: FieldMap) -> StoreResult<()> {
        self.ensure_online()?;
        let replaced = {
            let mut documents = self.documents.write();
            documents.insert(id.clone(), fields.clone()).is_some()
        };

        let change = if replaced {
            DocumentChange::modified(id.clone(), fields)
        } else {
            DocumentChange::added(id.clone(), fields)
        };
        self.emit(change);
        Ok(())
    }

    fn patch(&self, id: &DocumentId, fields: FieldMap) -> StoreResult<()> {
        self.ensure_online()?;
        let merged = {
            let mut documents = self.documents.write();
            match documents.get_mut(id) {
                Some(existing) => {
                    for (key, value) in fields {
                        existing.insert(key, value);
                    }
                    existing.clone()
                }
                None => {
                    return Err(StoreError::backend(format!(
                        "cannot patch missing document {id}"
                    )));
                }
            }
        };

        self.emit(DocumentChange::modified(id.clone(), merged));
        Ok(())
    }

    fn delete(&self, id: &DocumentId) -> StoreResult<()> {
        self.ensure_online()?;
        let removed = self.documents.write().remove(id);

        // Deleting an absent document succeeds and emits nothing.
        if let Some(fields) = removed {
            self.emit(DocumentChange::removed(id.clone(), fields));
        }
        Ok(())
    }
}

impl WatchSource for MemoryCollection {
    fn watch(&self, listener: ChangeListener) -> Box<dyn Subscription> {
        let id = self.next_listener_id.fetch_add(1, Ordering::SeqCst);
        self.listeners.write().insert(id, Arc::from(listener));

        Box::new(MemorySubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        })
    }
}

/// Watch handle for a [`MemoryCollection`] registration.
struct MemorySubscription {
    id: u64,
    listeners: Weak<ListenerMap>,
}

impl Subscription for MemorySubscription {
    fn cancel(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.write().remove(&self.id);
        }
    }
}
