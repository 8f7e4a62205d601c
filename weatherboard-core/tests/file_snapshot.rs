//! Favorites persisted through the file-backed snapshot store.

use weatherboard_core::{
    CityWeatherRecord, Condition, FavoritesStore, FileSnapshotStore, SnapshotStore, UnitSystem,
    store::FAVORITES_KEY,
};

fn record(id: u64, name: &str) -> CityWeatherRecord {
    CityWeatherRecord {
        id,
        name: name.to_string(),
        temperature: 14.0,
        humidity: 66,
        condition: Condition {
            icon: "04d".to_string(),
            description: "overcast clouds".to_string(),
        },
        unit: UnitSystem::Metric,
        forecast: Vec::new(),
    }
}

#[test]
fn test_favorites_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("nested").join("data");

    let mut store = FavoritesStore::open(Box::new(FileSnapshotStore::new(&data_dir)));
    assert!(store.is_empty());

    store.add(record(2643743, "London")).unwrap();
    store.add(record(2988507, "Paris")).unwrap();
    store.add(record(1850147, "Tokyo")).unwrap();
    store.remove(2988507).unwrap();

    let reopened = FavoritesStore::open(Box::new(FileSnapshotStore::new(&data_dir)));
    let ids: Vec<u64> = reopened.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1850147, 2643743]);
    assert_eq!(reopened.records(), store.records());
}

#[test]
fn test_write_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = FileSnapshotStore::new(dir.path());

    snapshot.write(FAVORITES_KEY, "[]").unwrap();
    snapshot.write(FAVORITES_KEY, "[1]").unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["weather-favorites.json".to_string()]);
    assert_eq!(snapshot.read(FAVORITES_KEY).unwrap().as_deref(), Some("[1]"));
}

#[test]
fn test_concurrent_writers_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = std::sync::Arc::new(FileSnapshotStore::new(dir.path()));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let snapshot = snapshot.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    snapshot
                        .write(FAVORITES_KEY, &format!("[{t}, {i}]"))
                        .expect("concurrent write succeeds");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let value = snapshot.read(FAVORITES_KEY).unwrap().unwrap();
    assert!(value.ends_with(", 24]"));

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["weather-favorites.json".to_string()]);
}

#[test]
fn test_missing_file_reads_none() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = FileSnapshotStore::new(dir.path().join("never-created"));
    assert_eq!(snapshot.read(FAVORITES_KEY).unwrap(), None);
}

#[test]
fn test_corrupt_file_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = FileSnapshotStore::new(dir.path());
    std::fs::write(snapshot.path_for(FAVORITES_KEY), "[{\"id\": \"oops\"").unwrap();

    let store = FavoritesStore::open(Box::new(snapshot));
    assert!(store.is_empty());
}

#[test]
fn test_remove_last_record_reloads_empty() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = FavoritesStore::open(Box::new(FileSnapshotStore::new(dir.path())));
    store.add(record(2643743, "London")).unwrap();
    store.remove(2643743).unwrap();

    let reopened = FavoritesStore::open(Box::new(FileSnapshotStore::new(dir.path())));
    assert!(reopened.is_empty());
}
