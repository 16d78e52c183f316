//! # Storage Layer
//!
//! This module defines the storage collaborator the reconciliation engine
//! talks to. The [`CopyStore`] trait is the whole contract: four calls, each
//! of which may fail with a store error.
//!
//! ## Layering
//!
//! ```text
//! CopyStore (what)          fetch_all / insert_many / update_one / delete_many
//!     │
//! RecordStore<B> (how)      id assignment, timestamps, not-found checks
//!     │
//! StorageBackend (where)    load/save one collection per scope
//!     ├── FsBackend         JSON file per scope
//!     └── MemBackend        RefCell maps, failure injection for tests
//! ```
//!
//! A remote store (HTTP, SQL...) would implement [`CopyStore`] directly.
//!
//! ## Guarantees
//!
//! - Every call is scoped: records of one scope are never visible from another.
//! - `insert_many` assigns ids and timestamps and returns the stored records.
//! - `update_one` bumps `updated_at` and fails with `NotFound` on unknown ids.
//! - `delete_many` ignores ids that are already gone.
//! - No call takes a lock or a version token: last write wins.
//!
//! ## Implementations
//!
//! - [`record_store::RecordStore`] over [`fs_backend::FsBackend`]: production.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.

use crate::error::Result;
use crate::model::{NewRecord, PersistedRecord, RecordPatch, Scope};
use uuid::Uuid;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

/// Storage collaborator consumed by the reconciliation engine.
pub trait CopyStore {
    /// All records owned by `scope`, in no particular order.
    fn fetch_all(&self, scope: &Scope) -> Result<Vec<PersistedRecord>>;

    /// Insert records (each carries its own scope). Returns them with ids assigned.
    fn insert_many(&mut self, records: Vec<NewRecord>) -> Result<Vec<PersistedRecord>>;

    /// Apply a partial update to one record.
    fn update_one(&mut self, scope: &Scope, id: &Uuid, patch: &RecordPatch) -> Result<()>;

    /// Remove records by id.
    fn delete_many(&mut self, scope: &Scope, ids: &[Uuid]) -> Result<()>;
}
