use super::mem_backend::MemBackend;
use super::record_store::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::Result;
    use crate::model::{DraftItem, NewRecord, PersistedRecord, RecordPatch, Scope};
    use crate::store::CopyStore;
    use std::cell::RefCell;
    use uuid::Uuid;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_records(mut self, count: usize, scope: &Scope) -> Self {
            let records = (0..count)
                .map(|i| {
                    let draft = DraftItem::new(
                        format!("Test Copy {}", i + 1),
                        format!("Body for copy {}", i + 1),
                    );
                    NewRecord::from_draft(scope, &draft)
                })
                .collect();
            self.store.insert_many(records).unwrap();
            self
        }

        pub fn with_record(mut self, title: &str, body: &str, scope: &Scope) -> Self {
            let draft = DraftItem::new(title, body);
            self.store
                .insert_many(vec![NewRecord::from_draft(scope, &draft)])
                .unwrap();
            self
        }

        /// Records of `scope`, sorted by title for stable assertions.
        pub fn records(&self, scope: &Scope) -> Vec<PersistedRecord> {
            let mut records = self.store.fetch_all(scope).unwrap();
            records.sort_by(|a, b| a.content.title.cmp(&b.content.title));
            records
        }

        pub fn record_titled(&self, title: &str, scope: &Scope) -> PersistedRecord {
            self.records(scope)
                .into_iter()
                .find(|r| r.content.title == title)
                .unwrap_or_else(|| panic!("no record titled {title:?}"))
        }

        pub fn recording(self) -> RecordingStore<InMemoryStore> {
            RecordingStore::new(self.store)
        }
    }

    /// One call made against a [`CopyStore`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum StoreCall {
        FetchAll(Scope),
        InsertMany(Vec<NewRecord>),
        UpdateOne(Uuid, RecordPatch),
        DeleteMany(Vec<Uuid>),
    }

    impl StoreCall {
        pub fn is_write(&self) -> bool {
            !matches!(self, StoreCall::FetchAll(_))
        }
    }

    /// Wraps a store and logs every call made through it.
    pub struct RecordingStore<S: CopyStore> {
        pub inner: S,
        calls: RefCell<Vec<StoreCall>>,
    }

    impl<S: CopyStore> RecordingStore<S> {
        pub fn new(inner: S) -> Self {
            Self {
                inner,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<StoreCall> {
            self.calls.borrow().clone()
        }

        pub fn write_calls(&self) -> Vec<StoreCall> {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.is_write())
                .cloned()
                .collect()
        }

        pub fn clear(&self) {
            self.calls.borrow_mut().clear();
        }
    }

    impl<S: CopyStore> CopyStore for RecordingStore<S> {
        fn fetch_all(&self, scope: &Scope) -> Result<Vec<PersistedRecord>> {
            self.calls
                .borrow_mut()
                .push(StoreCall::FetchAll(scope.clone()));
            self.inner.fetch_all(scope)
        }

        fn insert_many(&mut self, records: Vec<NewRecord>) -> Result<Vec<PersistedRecord>> {
            self.calls
                .borrow_mut()
                .push(StoreCall::InsertMany(records.clone()));
            self.inner.insert_many(records)
        }

        fn update_one(&mut self, scope: &Scope, id: &Uuid, patch: &RecordPatch) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(StoreCall::UpdateOne(*id, patch.clone()));
            self.inner.update_one(scope, id, patch)
        }

        fn delete_many(&mut self, scope: &Scope, ids: &[Uuid]) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(StoreCall::DeleteMany(ids.to_vec()));
            self.inner.delete_many(scope, ids)
        }
    }
}
