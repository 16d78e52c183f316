use crate::error::Result;
use crate::model::{PersistedRecord, Scope};
use crate::store::CopyStore;
use tracing::debug;

/// Fetch every record the store holds for `scope`.
///
/// Stores return records in no particular order; the snapshot is sorted by
/// creation time (then id) so title fallback and deletions are deterministic.
pub fn load<S: CopyStore>(store: &S, scope: &Scope) -> Result<Vec<PersistedRecord>> {
    scope.validate()?;

    let mut records = store.fetch_all(scope)?;
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    debug!(records = records.len(), "snapshot loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CopyError;
    use crate::model::{DraftItem, NewRecord, RecordPatch};
    use crate::store::memory::fixtures::StoreFixture;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn loads_records_of_scope_only() {
        let scope = Scope::new("site", "user");
        let fixture = StoreFixture::new()
            .with_records(3, &scope)
            .with_record("Elsewhere", "", &Scope::new("site", "other"));

        let snapshot = load(&fixture.store, &scope).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.iter().all(|r| r.scope == scope));
    }

    /// Hands back a fixed list, in the order given.
    struct FixedStore(Vec<PersistedRecord>);

    impl CopyStore for FixedStore {
        fn fetch_all(&self, _scope: &Scope) -> Result<Vec<PersistedRecord>> {
            Ok(self.0.clone())
        }

        fn insert_many(&mut self, _records: Vec<NewRecord>) -> Result<Vec<PersistedRecord>> {
            unreachable!("snapshot never writes")
        }

        fn update_one(
            &mut self,
            _scope: &Scope,
            _id: &Uuid,
            _patch: &RecordPatch,
        ) -> Result<()> {
            unreachable!("snapshot never writes")
        }

        fn delete_many(&mut self, _scope: &Scope, _ids: &[Uuid]) -> Result<()> {
            unreachable!("snapshot never writes")
        }
    }

    fn record_at(
        scope: &Scope,
        title: &str,
        id: u128,
        created_at: DateTime<Utc>,
    ) -> PersistedRecord {
        PersistedRecord::from_new(
            NewRecord::from_draft(scope, &DraftItem::new(title, "")),
            Uuid::from_u128(id),
            created_at,
        )
    }

    #[test]
    fn snapshot_is_sorted_by_creation_then_id() {
        let scope = Scope::new("site", "user");
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let t1 = t0 + Duration::hours(1);

        // Returned newest first, with a creation-time tie between 3 and 2.
        let store = FixedStore(vec![
            record_at(&scope, "later-b", 3, t1),
            record_at(&scope, "later-a", 2, t1),
            record_at(&scope, "oldest", 9, t0),
        ]);

        let snapshot = load(&store, &scope).unwrap();
        let titles: Vec<&str> = snapshot.iter().map(|r| r.content.title.as_str()).collect();
        assert_eq!(titles, vec!["oldest", "later-a", "later-b"]);
    }

    #[test]
    fn store_errors_are_returned() {
        let scope = Scope::new("site", "user");
        let fixture = StoreFixture::new();
        fixture.store.backend().set_simulate_read_error(true);

        let result = load(&fixture.store, &scope);
        assert!(matches!(result, Err(CopyError::Store(_))));
    }
}
