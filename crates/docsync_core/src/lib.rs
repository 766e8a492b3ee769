//! # Docsync Core
//!
//! Typed collection sync over schemaless document stores.
//!
//! This crate provides:
//! - Change events and batches as delivered by a watched store view
//! - A classifier that decodes raw events into typed groups
//! - A diff reducer producing ordered, minimal snapshot diffs
//! - A diff applier with fixed merge semantics for ordered collections
//! - Store boundary traits (fetch / write / watch / subscription)
//! - A typed collection front-end tying codec, diffs, and store together
//! - An in-memory reference store for tests and adapter authors
//!
//! ## Architecture
//!
//! The flow per notification is **classify, reduce, apply**:
//! 1. The store adapter delivers a change batch to a watch listener
//! 2. Classification decodes each event under its identity and groups by
//!    kind, dropping (and reporting) events that fail to decode
//! 3. Reduction orders the groups removed, modified, added
//! 4. Application merges the diff into a caller-owned `Vec<T>` by identity
//!
//! ## Key Invariants
//!
//! - Identity matching only: the applier never compares whole records
//! - Group order is fixed; a same-batch remove and re-add nets to an insert
//! - Batch operations never fail as a whole; only single-document
//!   primitives surface codec errors
//! - Core functions are synchronous and lock-free; the only shared state
//!   they touch is the caller's collection

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod change;
mod classify;
mod collection;
mod diff;
mod error;
mod memory;
mod store;

pub use change::{ChangeBatch, ChangeKind, DocumentChange};
pub use classify::{classify, Classified};
pub use collection::{Collection, DocumentPage};
pub use diff::{diff_batch, DiffGroup, SnapshotDiff};
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryCollection, MemoryStore};
pub use store::{
    ChangeListener, DocumentStore, FetchSource, Subscription, WatchSource, WriteSink,
};

// Codec types that appear in this crate's public signatures, re-exported
// so adapters and applications need a single import.
pub use docsync_codec::{
    DecodeError, Document, DocumentId, EncodeError, FieldMap, LogSink, MemorySink, NullSink,
    ReportSink,
};
