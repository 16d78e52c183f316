use super::backend::StorageBackend;
use super::CopyStore;
use crate::error::{CopyError, Result};
use crate::model::{NewRecord, PersistedRecord, RecordPatch, Scope};
use chrono::Utc;
use std::collections::BTreeMap;
use uuid::Uuid;

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: StorageBackend> CopyStore for RecordStore<B> {
    fn fetch_all(&self, scope: &Scope) -> Result<Vec<PersistedRecord>> {
        Ok(self.backend.load_collection(scope)?.into_values().collect())
    }

    fn insert_many(&mut self, records: Vec<NewRecord>) -> Result<Vec<PersistedRecord>> {
        let now = Utc::now();
        let inserted: Vec<PersistedRecord> = records
            .into_iter()
            .map(|record| PersistedRecord::from_new(record, Uuid::new_v4(), now))
            .collect();

        // One load/save per touched scope, in a stable order.
        let mut by_scope: BTreeMap<&Scope, Vec<&PersistedRecord>> = BTreeMap::new();
        for record in &inserted {
            by_scope.entry(&record.scope).or_default().push(record);
        }

        for (scope, records) in by_scope {
            let mut collection = self.backend.load_collection(scope)?;
            for record in records {
                collection.insert(record.id, record.clone());
            }
            self.backend.save_collection(scope, &collection)?;
        }

        Ok(inserted)
    }

    fn update_one(&mut self, scope: &Scope, id: &Uuid, patch: &RecordPatch) -> Result<()> {
        let mut collection = self.backend.load_collection(scope)?;
        let record = collection.get_mut(id).ok_or(CopyError::NotFound(*id))?;

        patch.apply_to(&mut record.content);
        record.updated_at = Utc::now();

        self.backend.save_collection(scope, &collection)
    }

    fn delete_many(&mut self, scope: &Scope, ids: &[Uuid]) -> Result<()> {
        let mut collection = self.backend.load_collection(scope)?;
        let before = collection.len();
        for id in ids {
            collection.remove(id);
        }

        if collection.len() != before {
            self.backend.save_collection(scope, &collection)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DraftItem;
    use crate::store::mem_backend::MemBackend;

    fn make_store() -> RecordStore<MemBackend> {
        RecordStore::with_backend(MemBackend::new())
    }

    fn scope() -> Scope {
        Scope::new("site-1", "user-1")
    }

    fn new_record(scope: &Scope, title: &str) -> NewRecord {
        NewRecord::from_draft(scope, &DraftItem::new(title, "Body"))
    }

    // --- Insert Tests ---

    #[test]
    fn test_insert_assigns_ids_and_timestamps() {
        let mut store = make_store();
        let inserted = store
            .insert_many(vec![new_record(&scope(), "A"), new_record(&scope(), "B")])
            .unwrap();

        assert_eq!(inserted.len(), 2);
        assert_ne!(inserted[0].id, inserted[1].id);
        assert_eq!(inserted[0].content.title, "A");
        assert_eq!(inserted[1].content.title, "B");
        assert_eq!(inserted[0].created_at, inserted[0].updated_at);

        let fetched = store.fetch_all(&scope()).unwrap();
        assert_eq!(fetched.len(), 2);
    }

    #[test]
    fn test_insert_routes_records_to_their_scope() {
        let mut store = make_store();
        let other = Scope::new("site-2", "user-1");
        store
            .insert_many(vec![new_record(&scope(), "Mine"), new_record(&other, "Theirs")])
            .unwrap();

        let mine = store.fetch_all(&scope()).unwrap();
        let theirs = store.fetch_all(&other).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].content.title, "Mine");
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].content.title, "Theirs");
    }

    // --- Update Tests ---

    #[test]
    fn test_update_applies_patch_and_bumps_updated_at() {
        let mut store = make_store();
        let inserted = store.insert_many(vec![new_record(&scope(), "Old")]).unwrap();
        let id = inserted[0].id;

        let patch = RecordPatch {
            title: Some("New".into()),
            ..Default::default()
        };
        store.update_one(&scope(), &id, &patch).unwrap();

        let fetched = store.fetch_all(&scope()).unwrap();
        assert_eq!(fetched[0].content.title, "New");
        assert_eq!(fetched[0].content.body, "Body");
        assert!(fetched[0].updated_at >= inserted[0].updated_at);
        assert_eq!(fetched[0].created_at, inserted[0].created_at);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = make_store();
        let id = Uuid::new_v4();
        let result = store.update_one(&scope(), &id, &RecordPatch::default());
        assert!(matches!(result, Err(CopyError::NotFound(missing)) if missing == id));
    }

    #[test]
    fn test_update_does_not_cross_scopes() {
        let mut store = make_store();
        let inserted = store.insert_many(vec![new_record(&scope(), "A")]).unwrap();
        let other = Scope::new("site-1", "user-2");

        let result = store.update_one(&other, &inserted[0].id, &RecordPatch::default());
        assert!(result.is_err());
    }

    // --- Delete Tests ---

    #[test]
    fn test_delete_many_removes_listed_ids() {
        let mut store = make_store();
        let inserted = store
            .insert_many(vec![
                new_record(&scope(), "A"),
                new_record(&scope(), "B"),
                new_record(&scope(), "C"),
            ])
            .unwrap();

        store
            .delete_many(&scope(), &[inserted[0].id, inserted[2].id])
            .unwrap();

        let remaining = store.fetch_all(&scope()).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].content.title, "B");
    }

    #[test]
    fn test_delete_many_ignores_missing_ids() {
        let mut store = make_store();
        store.insert_many(vec![new_record(&scope(), "A")]).unwrap();
        store.delete_many(&scope(), &[Uuid::new_v4()]).unwrap();
        assert_eq!(store.fetch_all(&scope()).unwrap().len(), 1);
    }

    // --- Error Handling Tests ---

    #[test]
    fn test_insert_fails_on_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut store = RecordStore::with_backend(backend);

        let result = store.insert_many(vec![new_record(&scope(), "A")]);
        assert!(matches!(result, Err(CopyError::Store(_))));
        assert!(store.fetch_all(&scope()).unwrap().is_empty());
    }

    #[test]
    fn test_fetch_unknown_scope_is_empty() {
        let store = make_store();
        assert!(store.fetch_all(&scope()).unwrap().is_empty());
    }
}
