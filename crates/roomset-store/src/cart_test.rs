use super::*;
use crate::storage::{FileStorage, MemoryStorage};
use roomset_core::{resolve_color, LineKind, LineType, Provenance};

fn product_line(product_id: &str, color: Option<&str>, quantity: u32, price: f64) -> NewLineItem {
    NewLineItem {
        kind: LineKind::Product {
            product_id: product_id.to_owned(),
        },
        name: format!("Product {product_id}"),
        designer: None,
        price,
        original_price: None,
        image: None,
        quantity,
        selected_color: color.map(resolve_color),
        provenance: Provenance::designer(Some("d1".to_owned())),
    }
}

#[test]
fn same_product_and_color_merges_quantity() {
    let mut cart = CartStore::open(MemoryStorage::new()).unwrap();
    let first = cart.add(product_line("p1", Some("Oak"), 1, 100.0)).unwrap();
    let second = cart.add(product_line("p1", Some("Oak"), 1, 100.0)).unwrap();

    assert!(matches!(first, AddOutcome::Inserted(_)));
    assert_eq!(
        second,
        AddOutcome::Merged {
            id: first.id(),
            quantity: 2
        }
    );
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
}

#[test]
fn different_color_creates_second_line() {
    let mut cart = CartStore::open(MemoryStorage::new()).unwrap();
    cart.add(product_line("p1", Some("Oak"), 1, 100.0)).unwrap();
    cart.add(product_line("p1", Some("Walnut"), 1, 100.0)).unwrap();

    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.item_count(), 2);
    assert!(cart.is_present("p1", LineType::Product));
}

#[test]
fn design_look_and_product_with_same_key_stay_separate() {
    let mut cart = CartStore::open(MemoryStorage::new()).unwrap();
    cart.add(product_line("42", None, 1, 10.0)).unwrap();
    let mut look = product_line("42", None, 1, 10.0);
    look.kind = LineKind::DesignLook {
        look_id: "42".to_owned(),
    };
    cart.add(look).unwrap();

    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.query(|item| item.kind.line_type() == LineType::DesignLook).len(), 1);
}

#[test]
fn update_quantity_to_zero_removes_line() {
    let mut cart = CartStore::open(MemoryStorage::new()).unwrap();
    let id = cart.add(product_line("p1", None, 3, 50.0)).unwrap().id();

    assert!(cart.update_quantity(id, 5).unwrap());
    assert_eq!(cart.item_count(), 5);
    assert!(cart.update_quantity(id, 0).unwrap());
    assert!(cart.items().is_empty());
    assert!(!cart.update_quantity(id, 1).unwrap());
}

#[test]
fn subtotal_and_unit_count() {
    let mut cart = CartStore::open(MemoryStorage::new()).unwrap();
    cart.add(product_line("p1", None, 1, 100.0)).unwrap();
    cart.add(product_line("p2", None, 2, 75.0)).unwrap();

    assert_eq!(cart.item_count(), 3);
    assert!((cart.subtotal() - 250.0).abs() < f64::EPSILON);
}

#[test]
fn memory_storage_survives_reopen() {
    let storage = MemoryStorage::new();
    let id = {
        let mut cart = CartStore::open(storage.clone()).unwrap();
        cart.add(product_line("p1", Some("Oak"), 2, 100.0)).unwrap().id()
    };

    let raw = storage.contents().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["itemCount"], 2);
    assert_eq!(value["items"][0]["type"], "product");
    assert!(value["items"][0]["addedAt"].is_string());

    let reopened = CartStore::open(storage).unwrap();
    let line = reopened.find(id).expect("line should persist");
    assert_eq!(line.quantity, 2);
    assert_eq!(line.selected_color.as_ref().map(|c| c.name.as_str()), Some("Oak"));
}

#[test]
fn file_storage_survives_reopen_with_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");

    let added_at = {
        let mut cart = CartStore::open(FileStorage::new(&path)).unwrap();
        cart.add(product_line("p1", None, 1, 100.0)).unwrap();
        cart.items()[0].added_at
    };

    let reopened = CartStore::open(FileStorage::new(&path)).unwrap();
    assert_eq!(reopened.items().len(), 1);
    assert_eq!(reopened.items()[0].added_at, added_at);
}

#[test]
fn clear_empties_and_persists() {
    let storage = MemoryStorage::new();
    let mut cart = CartStore::open(storage.clone()).unwrap();
    cart.add(product_line("p1", None, 1, 100.0)).unwrap();
    cart.clear().unwrap();

    assert!(cart.items().is_empty());
    assert!(CartStore::open(storage).unwrap().items().is_empty());
}

#[test]
fn corrupt_record_opens_empty() {
    let cart = CartStore::open(MemoryStorage::with_contents("[[[")).unwrap();
    assert!(cart.items().is_empty());
    assert_eq!(cart.item_count(), 0);
}
