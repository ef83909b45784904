//! Storage integration tests: intake, removal, queries and office updates.
//!
//! Run with: `cargo test`

use post_office::{Cost, Parcel, ParcelRef, ParcelStorage, StorageError};

fn parcel(weight: f64, cost: &str, volume: f64, office: i32) -> ParcelRef {
    ParcelRef::new(Parcel::new(weight, cost.parse().expect("cost"), volume, office))
}

fn cost(s: &str) -> Cost {
    s.parse().expect("cost")
}

/// A(weight=2, cost=5, volume=1, office=10), B(weight=5, cost=1, volume=3, office=20)
fn seeded() -> (ParcelStorage, ParcelRef, ParcelRef) {
    post_office::logging::init(true);
    let a = parcel(2.0, "5", 1.0, 10);
    let b = parcel(5.0, "1", 3.0, 20);
    let storage = ParcelStorage::with_parcels([a.clone(), b.clone()]).expect("seed");
    (storage, a, b)
}

fn all(storage: &ParcelStorage) -> Vec<ParcelRef> {
    storage.search_boxes(|_| true)
}

#[test]
fn test_new_storage_is_empty() {
    let storage = ParcelStorage::new();
    assert!(storage.is_empty());
    assert!(all(&storage).is_empty());
}

#[test]
fn test_with_parcels_keeps_order() {
    let items: Vec<ParcelRef> = (0..5).map(|i| parcel(i as f64 + 1.0, "1", 1.0, i)).collect();
    let storage = ParcelStorage::with_parcels(items.clone()).expect("seed");
    assert_eq!(all(&storage), items);
}

#[test]
fn test_with_parcels_does_not_alias_callers_collection() {
    let mut items = vec![parcel(1.0, "1", 1.0, 1)];
    let storage = ParcelStorage::with_parcels(&items).expect("seed");
    items.push(parcel(2.0, "2", 2.0, 2));
    items.clear();
    assert_eq!(storage.len(), 1);
}

#[test]
fn test_with_parcels_rejects_absent_element() {
    let items = vec![Some(parcel(1.0, "1", 1.0, 1)), None, Some(parcel(2.0, "1", 1.0, 1))];
    let err = ParcelStorage::with_parcels(items).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("position 1"));
}

#[test]
fn test_accept_box_appends_last() {
    let (mut storage, a, b) = seeded();
    let c = parcel(1.0, "0.50", 0.5, 30);
    assert!(storage.accept_box(c.clone()).expect("accept"));
    assert_eq!(all(&storage), vec![a, b, c]);
}

#[test]
fn test_accept_box_rejects_absent() {
    let (mut storage, _, _) = seeded();
    let err = storage.accept_box(None::<ParcelRef>).unwrap_err();
    assert!(matches!(err, StorageError::InvalidArgument { operation: "accept_box", .. }));
    assert_eq!(storage.len(), 2);
}

#[test]
fn test_accept_all_boxes_appends_in_order() {
    let (mut storage, a, b) = seeded();
    let c = parcel(1.0, "1", 1.0, 1);
    let d = parcel(1.0, "1", 1.0, 1);
    assert!(storage.accept_all_boxes(vec![c.clone(), d.clone()]).expect("accept"));
    assert_eq!(all(&storage), vec![a, b, c, d]);
}

#[test]
fn test_accept_all_boxes_is_all_or_nothing() {
    let (mut storage, a, b) = seeded();
    let c = parcel(1.0, "1", 1.0, 1);
    let err = storage.accept_all_boxes(vec![Some(c), None]).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(all(&storage), vec![a, b]);
}

#[test]
fn test_carry_out_boxes_removes_intersection() {
    let (mut storage, a, b) = seeded();
    let c = parcel(1.0, "1", 1.0, 1);
    storage.accept_box(c.clone()).expect("accept");
    let stranger = parcel(1.0, "1", 1.0, 1);

    assert!(storage.carry_out_boxes(vec![b.clone(), stranger.clone()]).expect("carry out"));
    assert_eq!(all(&storage), vec![a.clone(), c.clone()]);

    assert!(!storage.carry_out_boxes(vec![stranger]).expect("carry out"));
    assert!(!storage.carry_out_boxes(Vec::<ParcelRef>::new()).expect("carry out"));
    assert_eq!(all(&storage), vec![a, c]);
}

#[test]
fn test_carry_out_boxes_uses_identity_not_fields() {
    let (mut storage, a, _) = seeded();
    let lookalike = ParcelRef::new(a.snapshot());
    assert!(!storage.carry_out_boxes([lookalike]).expect("carry out"));
    assert_eq!(storage.len(), 2);
}

#[test]
fn test_carry_out_boxes_removes_duplicates() {
    let (mut storage, a, b) = seeded();
    storage.accept_box(a.clone()).expect("accept");
    assert!(storage.carry_out_boxes([&a]).expect("carry out"));
    assert_eq!(all(&storage), vec![b]);
}

#[test]
fn test_carry_out_boxes_rejects_absent_element() {
    let (mut storage, a, _) = seeded();
    let err = storage.carry_out_boxes(vec![Some(a), None]).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(storage.len(), 2, "nothing removed before the fault");
}

#[test]
fn test_carry_out_where_returns_and_removes_matches() {
    let (mut storage, a, b) = seeded();
    let c = parcel(4.0, "2", 1.0, 10);
    storage.accept_box(c.clone()).expect("accept");

    let removed = storage.carry_out_where(|p| p.office_number() == 10);
    assert_eq!(removed, vec![a, c]);
    assert_eq!(all(&storage), vec![b]);
    assert!(storage.search_boxes(|p| p.office_number() == 10).is_empty());
}

#[test]
fn test_carry_out_where_without_match_is_empty() {
    let (mut storage, _, _) = seeded();
    assert!(storage.carry_out_where(|p| p.weight() > 100.0).is_empty());
    assert_eq!(storage.len(), 2);
}

#[test]
fn test_carry_out_where_removes_by_membership() {
    let (mut storage, a, b) = seeded();
    storage.accept_box(a.clone()).expect("accept");
    // Only the first occurrence of `a` matches; membership removes both.
    let mut seen = 0;
    let removed = storage.carry_out_where(|p| {
        if p.weight() == 2.0 {
            seen += 1;
            seen == 1
        } else {
            false
        }
    });
    assert_eq!(removed, vec![a]);
    assert_eq!(all(&storage), vec![b]);
}

#[test]
fn test_search_boxes_does_not_mutate() {
    let (storage, a, b) = seeded();
    assert_eq!(storage.search_boxes(|p| p.volume() > 2.0), vec![b.clone()]);
    assert_eq!(all(&storage), vec![a, b]);
}

#[test]
fn test_weight_query() {
    let (storage, a, b) = seeded();
    assert_eq!(storage.get_all_weight_less_than(3.0).expect("query"), vec![a.clone()]);
    assert_eq!(storage.get_all_weight_less_than(5.0).expect("query"), vec![a.clone()]);
    assert_eq!(storage.get_all_weight_less_than(5.5).expect("query"), vec![a, b]);

    for bad in [0.0, -1.0, f64::NAN] {
        let err = storage.get_all_weight_less_than(bad).unwrap_err();
        assert!(err.is_invalid_argument(), "accepted {bad}");
    }
}

#[test]
fn test_cost_query() {
    let (storage, a, b) = seeded();
    assert_eq!(storage.get_all_cost_greater_than(cost("2")).expect("query"), vec![a.clone()]);
    assert!(storage.get_all_cost_greater_than(cost("5")).expect("query").is_empty());
    assert_eq!(storage.get_all_cost_greater_than(Cost::ZERO).expect("query"), vec![a, b]);

    let err = storage.get_all_cost_greater_than(cost("-0.01")).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_volume_query() {
    let (storage, a, b) = seeded();
    assert_eq!(storage.get_all_volume_greater_or_equal(3.0).expect("query"), vec![b.clone()]);
    assert_eq!(storage.get_all_volume_greater_or_equal(0.0).expect("query"), vec![a, b]);

    let err = storage.get_all_volume_greater_or_equal(-0.5).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_update_office_number() {
    let (mut storage, a, b) = seeded();
    storage.update_office_number(|p| p.volume() > 2.0, 99);
    assert_eq!(b.office_number(), 99);
    assert_eq!(a.office_number(), 10);
}

#[test]
fn test_update_is_visible_to_other_holders() {
    let (mut storage, a, _) = seeded();
    let held_elsewhere = a.clone();
    storage.update_office_number(|p| p.weight() < 3.0, -7);
    assert_eq!(held_elsewhere.office_number(), -7);

    let removed = storage.carry_out_where(|p| p.office_number() == -7);
    assert!(removed[0].ptr_eq(&held_elsewhere));
}

#[test]
fn test_iteration_and_snapshot() {
    let (storage, _, _) = seeded();
    let weights: Vec<f64> = storage.iter().map(ParcelRef::weight).collect();
    assert_eq!(weights, vec![2.0, 5.0]);

    let mut count = 0;
    for _ in &storage {
        count += 1;
    }
    assert_eq!(count, 2);

    let snap = storage.snapshot();
    assert_eq!(snap[1], Parcel::new(5.0, cost("1"), 3.0, 20));
}
