//! Integration tests for saving and loading culture records.

use std::fs;

use tempfile::TempDir;

use farmtech::{
    CropType, DimensionUpdate, Dimensions, FarmTechError, LoadStatus, RecordStore, Storage,
    StorageConfig,
};

/// Store with a mix of shapes, inputs, and a gap left by a deletion.
fn populated_store() -> RecordStore {
    let mut store = RecordStore::new();
    let soy = store
        .create(CropType::Soy, Dimensions::rectangle(100.0, 50.0))
        .unwrap()
        .id;
    let doomed = store
        .create(CropType::Soy, Dimensions::rectangle(1.0, 1.0))
        .unwrap()
        .id;
    let coffee = store
        .create(CropType::Coffee, Dimensions::circle(10.0))
        .unwrap()
        .id;

    store.add_input(soy, "fertilizer", 2.5).unwrap();
    store.add_input(soy, "fertilizer", 0.4).unwrap();
    store.add_input(coffee, "herbicide", 0.01).unwrap();
    store
        .update_dimensions(soy, &DimensionUpdate::new().with_width(25.0))
        .unwrap();
    store.delete(doomed).unwrap();
    store
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let storage = Storage::new(&StorageConfig::in_dir(dir.path()));
    let store = populated_store();

    storage.save(store.list()).expect("save failed");
    let outcome = storage.load();

    assert_eq!(outcome.status, LoadStatus::Loaded(2));
    assert_eq!(outcome.cultures, store.list());
}

#[test]
fn test_reloaded_store_continues_ids() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&StorageConfig::in_dir(dir.path()));
    let store = populated_store();
    storage.save(store.list()).unwrap();

    let mut reloaded = RecordStore::from_records(storage.load().cultures);
    assert_eq!(reloaded.next_id(), 4);

    let id = reloaded
        .create(CropType::Coffee, Dimensions::circle(1.0))
        .unwrap()
        .id;
    assert_eq!(id, 4);
}

#[test]
fn test_document_layout() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&StorageConfig::in_dir(dir.path()));
    storage.save(populated_store().list()).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(storage.json_path()).unwrap()).unwrap();

    assert_eq!(json["format_version"], "1.0.0");
    assert!(json["saved_at"].is_string());
    let first = &json["cultures"][0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["crop_type"], "soy");
    assert_eq!(first["dimensions"]["shape"], "rectangle");
    assert_eq!(first["area"], 2500.0);
    assert_eq!(first["inputs"][0]["total_required"], 6250.0);
}

#[test]
fn test_csv_export_is_projection() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&StorageConfig::in_dir(dir.path()));
    storage.save(populated_store().list()).unwrap();

    let mut reader = csv::Reader::from_path(storage.csv_path()).unwrap();
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(headers, vec!["id", "crop_type", "area"]);

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["1".to_string(), "soy".to_string(), "2500".to_string()],
            vec!["3".to_string(), "coffee".to_string(), "314.16".to_string()],
        ]
    );
}

#[test]
fn test_stale_derived_values_are_recomputed_on_load() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&StorageConfig::in_dir(dir.path()));
    fs::write(
        storage.json_path(),
        r#"{
            "format_version": "1.0.0",
            "saved_at": "2024-05-01T12:00:00Z",
            "cultures": [{
                "id": 7,
                "crop_type": "soy",
                "dimensions": {"shape": "rectangle", "length": 100.0, "width": 50.0},
                "area": 1.0,
                "inputs": [{"name": "fertilizer", "rate_per_area": 2.5, "total_required": 3.0}]
            }]
        }"#,
    )
    .unwrap();

    let cultures = storage.try_load().unwrap();
    assert_eq!(cultures[0].area, 5000.0);
    assert_eq!(cultures[0].inputs[0].total_required, 12500.0);
}

#[test]
fn test_inconsistent_record_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&StorageConfig::in_dir(dir.path()));
    fs::write(
        storage.json_path(),
        r#"[{"id": 1, "crop_type": "soy",
             "dimensions": {"shape": "circle", "radius": 2.0},
             "area": 12.57, "inputs": []}]"#,
    )
    .unwrap();

    let outcome = storage.load();
    assert!(matches!(outcome.status, LoadStatus::Corrupt(_)));
    assert!(outcome.cultures.is_empty());
}

#[test]
fn test_failed_save_keeps_memory_state() {
    let dir = TempDir::new().unwrap();
    // A regular file where the data directory should be makes every write fail.
    let blocker = dir.path().join("blocked");
    fs::write(&blocker, "").unwrap();
    let storage = Storage::new(&StorageConfig::in_dir(&blocker));

    let store = populated_store();
    let before = store.clone();
    assert!(storage.save(store.list()).is_err());
    assert_eq!(store, before);
}

#[test]
fn test_oversized_values_never_reach_disk() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&StorageConfig::in_dir(dir.path()));
    let mut store = populated_store();

    let err = store
        .create(CropType::Soy, Dimensions::rectangle(1e200, 1e200))
        .unwrap_err();
    assert!(matches!(err, FarmTechError::InvalidDimension { .. }));

    let err = store.add_input(1, "fertilizer", 1e306).unwrap_err();
    assert!(matches!(err, FarmTechError::InvalidRate(_)));

    let err = store
        .update_dimensions(3, &DimensionUpdate::new().with_radius(1e160))
        .unwrap_err();
    assert!(matches!(err, FarmTechError::InvalidDimension { .. }));

    storage.save(store.list()).unwrap();
    let outcome = storage.load();
    assert_eq!(outcome.status, LoadStatus::Loaded(2));
    assert_eq!(outcome.cultures, store.list());
}

#[test]
fn test_unallocatable_id_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&StorageConfig::in_dir(dir.path()));
    fs::write(
        storage.json_path(),
        r#"[{"id": 18446744073709551615, "crop_type": "coffee",
             "dimensions": {"shape": "circle", "radius": 1.0},
             "area": 3.14, "inputs": []}]"#,
    )
    .unwrap();

    let outcome = storage.load();
    assert!(matches!(outcome.status, LoadStatus::Corrupt(_)));

    let mut store = RecordStore::from_records(outcome.cultures);
    let id = store
        .create(CropType::Coffee, Dimensions::circle(1.0))
        .unwrap()
        .id;
    assert_eq!(id, 1);
}

#[test]
fn test_parse_errors_name_the_problem() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&StorageConfig::in_dir(dir.path()));

    fs::write(
        storage.json_path(),
        r#"{"format_version": "1.0.0", "saved_at": "2024-05-01T12:00:00Z"}"#,
    )
    .unwrap();
    let message = storage.try_load().unwrap_err().to_string();
    assert!(message.contains("missing field `cultures`"), "{}", message);

    fs::write(
        storage.json_path(),
        r#"[{"id": 1, "crop_type": "coffee",
             "dimensions": {"shape": "circle", "radius": "ten"},
             "area": 3.14, "inputs": []}]"#,
    )
    .unwrap();
    let message = storage.try_load().unwrap_err().to_string();
    assert!(message.contains("expected f64"), "{}", message);
}
