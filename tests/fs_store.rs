use copydeck::model::{CopyStatus, DraftItem, Scope};
use copydeck::reconcile::{self, SyncOptions};
use copydeck::store::fs_backend::FsBackend;
use copydeck::store::record_store::RecordStore;
use copydeck::store::CopyStore;

fn scope() -> Scope {
    Scope::new("acme", "jo")
}

#[test]
fn records_survive_a_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = RecordStore::with_backend(FsBackend::new(dir.path().to_path_buf()));
        let outcome = reconcile::run(
            &mut store,
            &scope(),
            vec![
                DraftItem::new("Launch Tweet", "We are live"),
                DraftItem::new("Welcome Email", "Hi"),
            ],
            SyncOptions::authoritative(),
        )
        .unwrap();
        assert_eq!(outcome.report.created.len(), 2);
    }

    let store = RecordStore::with_backend(FsBackend::new(dir.path().to_path_buf()));
    let records = store.fetch_all(&scope()).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.scope == scope()));
}

#[test]
fn full_lifecycle_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecordStore::with_backend(FsBackend::new(dir.path().to_path_buf()));

    reconcile::run(
        &mut store,
        &scope(),
        vec![DraftItem::new("A", "a"), DraftItem::new("B", "b")],
        SyncOptions::authoritative(),
    )
    .unwrap();

    let snapshot = reconcile::snapshot::load(&store, &scope()).unwrap();
    let a = snapshot
        .iter()
        .find(|r| r.content.title == "A")
        .unwrap()
        .clone();

    let mut edited = DraftItem::from(&a);
    edited.content.title = "A prime".to_string();
    edited.content.status = CopyStatus::Approved;

    let outcome = reconcile::run(
        &mut store,
        &scope(),
        vec![edited, DraftItem::new("C", "c")],
        SyncOptions::authoritative(),
    )
    .unwrap();

    assert_eq!(outcome.report.created.len(), 1);
    assert_eq!(outcome.report.updated, vec![a.id]);
    assert_eq!(outcome.report.deleted.len(), 1);

    let mut titles: Vec<String> = store
        .fetch_all(&scope())
        .unwrap()
        .into_iter()
        .map(|r| r.content.title)
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["A prime", "C"]);
}

#[test]
fn scopes_live_in_separate_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecordStore::with_backend(FsBackend::new(dir.path().to_path_buf()));
    let other = Scope::new("acme", "sam");

    reconcile::run(
        &mut store,
        &scope(),
        vec![DraftItem::new("Mine", "")],
        SyncOptions::upsert_only(),
    )
    .unwrap();
    reconcile::run(
        &mut store,
        &other,
        vec![],
        SyncOptions::authoritative(),
    )
    .unwrap();

    assert_eq!(store.fetch_all(&scope()).unwrap().len(), 1);
    assert!(store.fetch_all(&other).unwrap().is_empty());
    assert!(dir.path().join("acme").join("jo").join("records.json").exists());
}

#[test]
fn no_temp_files_left_behind() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecordStore::with_backend(FsBackend::new(dir.path().to_path_buf()));

    reconcile::run(
        &mut store,
        &scope(),
        vec![DraftItem::new("One", "1"), DraftItem::new("Two", "2")],
        SyncOptions::authoritative(),
    )
    .unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(store.backend().scope_dir(&scope()))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
