//! Integration tests for RecordStore.

use farmtech::{CropType, DimensionUpdate, Dimensions, FarmTechError, RecordStore};

/// Store with one soy plot of 100m x 50m carrying a fertilizer input.
fn store_with_fertilized_soy() -> (RecordStore, u64) {
    let mut store = RecordStore::new();
    let id = store
        .create(CropType::Soy, Dimensions::rectangle(100.0, 50.0))
        .expect("create failed")
        .id;
    store
        .add_input(id, "fertilizer", 2.5)
        .expect("add_input failed");
    (store, id)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_rectangle_scenario_cascades_to_inputs() {
    let mut store = RecordStore::new();
    let culture = store
        .create(CropType::Soy, Dimensions::rectangle(100.0, 50.0))
        .unwrap();
    assert_eq!(culture.area, 5000.0);
    let id = culture.id;

    let input = store.add_input(id, "fertilizer", 2.5).unwrap();
    assert_eq!(input.total_required, 12500.0);

    let culture = store
        .update_dimensions(id, &DimensionUpdate::new().with_width(25.0))
        .unwrap();
    assert_eq!(culture.area, 2500.0);
    assert_eq!(culture.dimensions, Dimensions::rectangle(100.0, 25.0));
    assert_eq!(culture.inputs[0].total_required, 6250.0);
}

#[test]
fn test_circle_scenario_rejects_negative_radius() {
    let mut store = RecordStore::new();
    let culture = store
        .create(CropType::Coffee, Dimensions::circle(10.0))
        .unwrap();
    assert_eq!(culture.area, 314.16);
    let next_id = store.next_id();

    let err = store
        .create(CropType::Coffee, Dimensions::circle(-5.0))
        .unwrap_err();
    assert!(matches!(err, FarmTechError::InvalidDimension { ref field, .. } if field == "radius"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.next_id(), next_id);
}

#[test]
fn test_deleted_ids_are_not_reused() {
    let mut store = RecordStore::new();
    let first = store
        .create(CropType::Soy, Dimensions::rectangle(10.0, 10.0))
        .unwrap()
        .id;
    let second = store
        .create(CropType::Coffee, Dimensions::circle(3.0))
        .unwrap()
        .id;

    store.delete(first).unwrap();
    let third = store
        .create(CropType::Soy, Dimensions::rectangle(1.0, 2.0))
        .unwrap()
        .id;

    assert_eq!(third, second + 1);
    assert_eq!(store.next_id(), 4);
}

// =============================================================================
// Lookup and delete
// =============================================================================

#[test]
fn test_delete_then_find_is_not_found() {
    let mut store = RecordStore::new();
    let a = store.create(CropType::Soy, Dimensions::rectangle(1.0, 1.0)).unwrap().id;
    let b = store.create(CropType::Coffee, Dimensions::circle(1.0)).unwrap().id;
    let c = store.create(CropType::Soy, Dimensions::rectangle(2.0, 2.0)).unwrap().id;

    let removed = store.delete(b).unwrap();
    assert_eq!(removed.id, b);
    assert!(store.find(b).is_none());
    assert!(matches!(store.delete(b), Err(FarmTechError::NotFound { .. })));

    let ids: Vec<u64> = store.list().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![a, c]);
}

#[test]
fn test_list_preserves_insertion_order() {
    let mut store = RecordStore::new();
    for radius in [3.0, 1.0, 2.0] {
        store.create(CropType::Coffee, Dimensions::circle(radius)).unwrap();
    }

    let radii: Vec<f64> = store
        .list()
        .iter()
        .filter_map(|c| c.dimensions.get("radius"))
        .collect();
    assert_eq!(radii, vec![3.0, 1.0, 2.0]);
}

// =============================================================================
// Dimension updates
// =============================================================================

#[test]
fn test_invalid_update_leaves_record_unmodified() {
    let (mut store, id) = store_with_fertilized_soy();
    let before = store.find(id).unwrap().clone();

    let update = DimensionUpdate::new().with_length(10.0).with_width(-2.0);
    let err = store.update_dimensions(id, &update).unwrap_err();

    assert!(matches!(err, FarmTechError::InvalidDimension { ref field, .. } if field == "width"));
    assert_eq!(store.find(id).unwrap(), &before);
}

#[test]
fn test_update_with_field_of_other_shape_fails() {
    let mut store = RecordStore::new();
    let id = store.create(CropType::Coffee, Dimensions::circle(5.0)).unwrap().id;

    let err = store
        .update_dimensions(id, &DimensionUpdate::new().with_length(4.0))
        .unwrap_err();
    assert!(matches!(err, FarmTechError::InvalidDimension { ref field, .. } if field == "length"));
    assert_eq!(store.find(id).unwrap().dimensions, Dimensions::circle(5.0));
}

#[test]
fn test_circle_update_cascades() {
    let mut store = RecordStore::new();
    let id = store.create(CropType::Coffee, Dimensions::circle(10.0)).unwrap().id;
    store.add_input(id, "water", 2.0).unwrap();

    let culture = store
        .update_dimensions(id, &DimensionUpdate::new().with_radius(5.0))
        .unwrap();
    assert_eq!(culture.area, 78.54);
    assert_eq!(culture.inputs[0].total_required, 157.08);
}

// =============================================================================
// Inputs
// =============================================================================

#[test]
fn test_add_input_validation() {
    let (mut store, id) = store_with_fertilized_soy();

    assert!(matches!(
        store.add_input(id, "", 1.0),
        Err(FarmTechError::EmptyInputName)
    ));
    assert!(matches!(
        store.add_input(id, "lime", 0.0),
        Err(FarmTechError::InvalidRate(_))
    ));
    assert_eq!(store.find(id).unwrap().inputs.len(), 1);
}

#[test]
fn test_remove_input_by_position() {
    let (mut store, id) = store_with_fertilized_soy();
    store.add_input(id, "seed", 0.02).unwrap();
    store.add_input(id, "lime", 0.5).unwrap();

    let removed = store.remove_input(id, 2).unwrap();
    assert_eq!(removed.name, "seed");

    let names: Vec<&str> = store
        .find(id)
        .unwrap()
        .inputs
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, vec!["fertilizer", "lime"]);
}

#[test]
fn test_remove_input_out_of_range_states_range() {
    let (mut store, id) = store_with_fertilized_soy();

    for position in [0, 2] {
        let err = store.remove_input(id, position).unwrap_err();
        assert!(matches!(err, FarmTechError::IndexOutOfRange { len: 1, .. }));
        assert!(err.to_string().contains("between 1 and 1"));
    }
    assert_eq!(store.find(id).unwrap().inputs.len(), 1);
}

#[test]
fn test_update_input_rate_recomputes_total() {
    let (mut store, id) = store_with_fertilized_soy();
    let input = store.update_input_rate(id, 1, 1.2).unwrap();
    assert_eq!(input.rate_per_area, 1.2);
    assert_eq!(input.total_required, 6000.0);
}
