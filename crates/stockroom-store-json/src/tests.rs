//! Tests for `JsonStore` against files in a temporary directory.

use std::fs;

use serde_json::{Value, json};
use stockroom_core::{
  order::{NewOrder, Order, OrderKind, OrderPatch},
  stock::{NewStockItem, StockItem, StockItemPatch},
  store::RecordStore,
};
use tempfile::TempDir;

use crate::{DataDir, Error, JsonStore, OrderManager, StockManager};

fn data_dir() -> (TempDir, DataDir) {
  let tmp = tempfile::tempdir().expect("temp dir");
  let dir = DataDir::new(tmp.path().join("data"));
  (tmp, dir)
}

fn stock() -> (TempDir, StockManager) {
  let (tmp, dir) = data_dir();
  let store = StockManager::open_in(&dir).expect("open stock");
  (tmp, store)
}

fn orders() -> (TempDir, OrderManager) {
  let (tmp, dir) = data_dir();
  let store = OrderManager::open_in(&dir, None).expect("open orders");
  (tmp, store)
}

fn on_disk(path: &std::path::Path) -> Value {
  serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn gpu_deal() -> NewOrder {
  NewOrder {
    kind:       OrderKind::parse("SALE").unwrap(),
    title:      "GPU deal".into(),
    contact:    "Jo Bloggs".into(),
    from_where: "walk-in".into(),
    by_who:     "Sam".into(),
    date:       "2025-01-31".into(),
    status:     "in_talks".into(),
    notes:      String::new(),
  }
}

// ─── Opening ─────────────────────────────────────────────────────────────────

#[test]
fn open_missing_file_is_empty_and_creates_dir() {
  let (_tmp, dir) = data_dir();
  let s = StockManager::open_in(&dir).unwrap();

  assert!(s.is_empty());
  assert!(dir.root().is_dir());
  assert!(!dir.stock_path().exists());
}

#[test]
fn open_invalid_json_is_empty() {
  let (_tmp, dir) = data_dir();
  dir.ensure().unwrap();
  fs::write(dir.stock_path(), "[{\"id\": 1, \"name\": ").unwrap();

  let s = StockManager::open_in(&dir).unwrap();
  assert!(s.get_all().is_empty());
}

#[test]
fn open_non_array_is_empty() {
  let (_tmp, dir) = data_dir();
  dir.ensure().unwrap();
  fs::write(dir.orders_path(None), r#"{"orders": []}"#).unwrap();

  let o = OrderManager::open_in(&dir, None).unwrap();
  assert!(o.get_all().is_empty());
}

#[test]
fn undecodable_elements_survive_a_mutation() {
  let (_tmp, dir) = data_dir();
  dir.ensure().unwrap();
  let fan = json!({ "id": 7, "name": "Fan", "quantity": "3", "unit_price": 5.0 });
  let content = json!([
    { "id": 1, "name": "RAM", "quantity": 4, "unit_price": 39.99, "supplier": "Scan" },
    fan.clone(),
    { "id": 3, "name": "PSU", "quantity": 2, "unit_price": 59.5, "type": "PSU",
      "date_added": "2025-01-01T10:00:00" }
  ]);
  fs::write(dir.stock_path(), content.to_string()).unwrap();

  let mut s = StockManager::open_in(&dir).unwrap();
  let ids: Vec<_> = s.get_all().iter().map(|i| i.id).collect();
  assert_eq!(ids, [1, 3]);
  assert_eq!(s.len(), 2);
  assert_eq!(s.undecodable(), 1);

  let gpu = s.add_item("GPU", 1, 499.0, "GPU").unwrap();
  assert_eq!(gpu.id, 8);

  let disk = on_disk(s.path());
  let elements = disk.as_array().unwrap();
  assert_eq!(elements.len(), 4);
  assert_eq!(elements[0]["supplier"], "Scan");
  assert_eq!(elements[1], fan);
  assert_eq!(elements[3]["id"], 8);
}

#[test]
fn undecodable_element_can_be_deleted_but_not_updated() {
  let (_tmp, dir) = data_dir();
  dir.ensure().unwrap();
  fs::write(
    dir.stock_path(),
    r#"[{"id": 2, "name": "Fan", "quantity": "3", "unit_price": 5.0}]"#,
  )
  .unwrap();
  let mut s = StockManager::open_in(&dir).unwrap();

  let err = s
    .update(2, StockItemPatch { quantity: Some(3), ..Default::default() })
    .unwrap_err();
  assert!(matches!(err, Error::Undecodable { id: 2, .. }));

  s.delete(2).unwrap();
  assert_eq!(s.undecodable(), 0);
  assert_eq!(on_disk(s.path()), json!([]));
}

#[test]
fn order_with_unknown_kind_is_kept() {
  let (_tmp, dir) = data_dir();
  dir.ensure().unwrap();
  let refund = json!({
    "id": 1, "kind": "refund", "title": "Broken PSU", "contact": "Jo",
    "from_where": "", "by_who": "Sam", "date": "2025-01-02", "status": "open", "notes": ""
  });
  fs::write(dir.orders_path(None), json!([refund.clone()]).to_string()).unwrap();

  let mut o = OrderManager::open_in(&dir, None).unwrap();
  assert!(o.get_all().is_empty());

  let deal = o.add(gpu_deal()).unwrap();
  assert_eq!(deal.id, 2);
  assert_eq!(on_disk(o.path())[0], refund);
}

#[test]
fn migrated_items_share_one_load_timestamp() {
  let (_tmp, dir) = data_dir();
  dir.ensure().unwrap();
  fs::write(
    dir.stock_path(),
    json!([
      { "id": 1, "name": "A", "quantity": 1, "unit_price": 1.0 },
      { "id": 2, "name": "B", "quantity": 1, "unit_price": 1.0 },
      { "id": 3, "name": "C", "quantity": 1, "unit_price": 1.0 }
    ])
    .to_string(),
  )
  .unwrap();

  let s = StockManager::open_in(&dir).unwrap();
  let stamps: Vec<_> = s.get_all().into_iter().map(|i| i.date_added).collect();
  assert!(stamps.iter().all(|d| *d == stamps[0]));
}

#[test]
fn open_fills_missing_stock_fields() {
  let (_tmp, dir) = data_dir();
  dir.ensure().unwrap();
  fs::write(
    dir.stock_path(),
    r#"[{"id": 5, "name": "Case", "quantity": 1, "unit_price": 30.0}]"#,
  )
  .unwrap();

  let s = StockManager::open_in(&dir).unwrap();
  let item = s.get_one(5).unwrap();
  assert_eq!(item.item_type, "");
  assert!(!item.date_added.is_empty());
}

#[test]
fn open_custom_orders_file_name() {
  let (_tmp, dir) = data_dir();
  let mut o = OrderManager::open_in(&dir, Some("archive.json")).unwrap();
  o.add(gpu_deal()).unwrap();

  assert!(dir.file("archive.json").exists());
  assert!(!dir.orders_path(None).exists());
}

#[test]
fn save_creates_missing_parent_directories() {
  let tmp = tempfile::tempdir().unwrap();
  let path = tmp.path().join("nested").join("deeper").join("stock.json");
  let mut s: StockManager = JsonStore::open(&path);

  s.add_item("RAM", 4, 39.99, "RAM").unwrap();
  assert!(path.exists());
}

// ─── Adding ──────────────────────────────────────────────────────────────────

#[test]
fn add_then_get_one_returns_same_record() {
  let (_tmp, mut s) = stock();
  let added = s.add_item("RAM", 4, 39.99, "RAM").unwrap();

  assert_eq!(s.get_one(added.id), Some(added));
}

#[test]
fn first_id_is_one_and_ids_increase() {
  let (_tmp, mut s) = stock();
  let first = s.add_item("RAM", 4, 39.99, "RAM").unwrap();
  let second = s.add_item("PSU", 2, 59.5, "PSU").unwrap();

  assert_eq!(first.id, 1);
  assert_eq!(second.id, 2);
  assert_eq!(s.len(), 2);
}

#[test]
fn next_id_follows_highest_present_id() {
  let (_tmp, dir) = data_dir();
  dir.ensure().unwrap();
  fs::write(
    dir.stock_path(),
    json!([
      { "id": 10, "name": "A", "quantity": 1, "unit_price": 1.0 },
      { "id": 3, "name": "B", "quantity": 1, "unit_price": 1.0 }
    ])
    .to_string(),
  )
  .unwrap();

  let mut s = StockManager::open_in(&dir).unwrap();
  let added = s.add_item("C", 1, 1.0, "").unwrap();
  assert_eq!(added.id, 11);
}

#[test]
fn deleted_highest_id_is_reused() {
  let (_tmp, mut s) = stock();
  s.add_item("RAM", 4, 39.99, "RAM").unwrap();
  let psu = s.add_item("PSU", 2, 59.5, "PSU").unwrap();
  s.delete(psu.id).unwrap();

  let next = s.add_item("GPU", 1, 499.0, "GPU").unwrap();
  assert_eq!(next.id, psu.id);
}

#[test]
fn add_persists_immediately() {
  let (_tmp, mut s) = stock();
  s.add_item("RAM", 4, 39.99, "RAM").unwrap();

  let disk = on_disk(s.path());
  assert_eq!(disk[0]["id"], 1);
  assert_eq!(disk[0]["name"], "RAM");
  assert_eq!(disk[0]["quantity"], 4);
  assert_eq!(disk[0]["unit_price"], 39.99);
  assert_eq!(disk[0]["type"], "RAM");
  assert!(disk[0]["date_added"].is_string());
}

#[test]
fn file_is_indented_array() {
  let (_tmp, mut o) = orders();
  o.add(gpu_deal()).unwrap();

  let raw = fs::read_to_string(o.path()).unwrap();
  assert!(raw.starts_with("[\n  {\n    \"id\": 1,"));
}

// ─── Scenario from the stock window ──────────────────────────────────────────

#[test]
fn stock_add_add_delete_scenario() {
  let (_tmp, mut s) = stock();
  let ram = s.add_item("RAM", 4, 39.99, "RAM").unwrap();
  assert_eq!(ram.id, 1);
  assert_eq!(ram.name, "RAM");
  assert_eq!(ram.quantity, 4);
  assert_eq!(ram.unit_price, 39.99);
  assert_eq!(ram.item_type, "RAM");

  let psu = s.add_item("PSU", 2, 59.5, "PSU").unwrap();
  assert_eq!(psu.id, 2);

  s.delete(1).unwrap();
  let all = s.get_all();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].id, 2);
  assert_eq!(all[0].name, "PSU");

  let updated = s
    .update(2, StockItemPatch { quantity: Some(5), ..Default::default() })
    .unwrap();
  assert_eq!(updated.quantity, 5);
  assert_eq!(updated.name, "PSU");
}

// ─── Updating ────────────────────────────────────────────────────────────────

#[test]
fn update_changes_only_named_fields() {
  let (_tmp, mut s) = stock();
  let before = s.add_item("PSU", 2, 59.5, "PSU").unwrap();

  let after = s
    .update(before.id, StockItemPatch { unit_price: Some(54.0), ..Default::default() })
    .unwrap();

  assert_eq!(after.unit_price, 54.0);
  assert_eq!(StockItem { unit_price: before.unit_price, ..after.clone() }, before);
  assert_eq!(s.len(), 1);
  assert_eq!(s.get_one(before.id), Some(after));
}

#[test]
fn update_persists() {
  let (_tmp, mut o) = orders();
  let order = o.add(gpu_deal()).unwrap();
  o.update(order.id, OrderPatch { status: Some("won".into()), ..Default::default() })
    .unwrap();

  assert_eq!(on_disk(o.path())[0]["status"], "won");
}

#[test]
fn update_missing_id_is_not_found_and_changes_nothing() {
  let (_tmp, mut s) = stock();
  s.add_item("RAM", 4, 39.99, "RAM").unwrap();
  let before = s.get_all();
  let file_before = fs::read_to_string(s.path()).unwrap();

  let err = s
    .update(42, StockItemPatch { name: Some("Ghost".into()), ..Default::default() })
    .unwrap_err();

  assert!(matches!(err, Error::NotFound { id: 42, kind: "stock item" }));
  assert_eq!(s.get_all(), before);
  assert_eq!(fs::read_to_string(s.path()).unwrap(), file_before);
}

#[test]
fn update_fields_validates_names_before_merging() {
  let (_tmp, mut s) = stock();
  let item = s.add_item("RAM", 4, 39.99, "RAM").unwrap();

  let Value::Object(good) = json!({ "quantity": 8 }) else { unreachable!() };
  let updated = s.update_fields(item.id, good).unwrap();
  assert_eq!(updated.quantity, 8);

  let Value::Object(bad) = json!({ "quantity": 9, "id": 99 }) else { unreachable!() };
  let err = s.update_fields(item.id, bad).unwrap_err();
  assert!(matches!(err, Error::Core(stockroom_core::Error::UnknownField { .. })));
  assert_eq!(s.get_one(item.id).unwrap().quantity, 8);
}

#[test]
fn non_finite_price_is_rejected_before_anything_changes() {
  let (_tmp, mut s) = stock();
  let ram = s.add_item("RAM", 4, 39.99, "RAM").unwrap();
  let file_before = fs::read_to_string(s.path()).unwrap();

  let err = s.add_item("Mystery", 1, f64::NAN, "").unwrap_err();
  assert!(matches!(err, Error::Core(stockroom_core::Error::InvalidField { .. })));

  let err = s
    .update(ram.id, StockItemPatch { unit_price: Some(f64::INFINITY), ..Default::default() })
    .unwrap_err();
  assert!(matches!(err, Error::Core(stockroom_core::Error::InvalidField { .. })));

  assert_eq!(s.get_all(), vec![ram]);
  assert_eq!(fs::read_to_string(s.path()).unwrap(), file_before);
  assert_eq!(s.add_item("PSU", 2, 59.5, "PSU").unwrap().id, 2);
}

// ─── Deleting ────────────────────────────────────────────────────────────────

#[test]
fn delete_removes_and_keeps_order_of_the_rest() {
  let (_tmp, mut s) = stock();
  for name in ["A", "B", "C", "D"] {
    s.add_item(name, 1, 1.0, "").unwrap();
  }

  s.delete(2).unwrap();

  let names: Vec<_> = s.get_all().into_iter().map(|i| i.name).collect();
  assert_eq!(names, ["A", "C", "D"]);
  let disk = on_disk(s.path());
  assert_eq!(disk.as_array().unwrap().len(), 3);
}

#[test]
fn delete_missing_id_is_not_found() {
  let (_tmp, mut o) = orders();
  o.add(gpu_deal()).unwrap();

  let err = o.delete(7).unwrap_err();
  assert!(err.is_not_found());
  assert_eq!(o.len(), 1);
}

// ─── Orders ──────────────────────────────────────────────────────────────────

#[test]
fn order_kind_is_stored_lower_case_and_matched_case_insensitively() {
  let (_tmp, mut o) = orders();
  let deal = o.add(gpu_deal()).unwrap();
  o.add(NewOrder::new(OrderKind::Parts, "SSD restock")).unwrap();

  assert_eq!(deal.kind, OrderKind::Sale);
  assert_eq!(on_disk(o.path())[0]["kind"], "sale");

  let sales = o.get_by_kind("Sale");
  assert_eq!(sales, vec![deal]);
  assert_eq!(o.get_by_kind("PARTS").len(), 1);
}

#[test]
fn get_by_kind_without_matches_is_empty() {
  let (_tmp, mut o) = orders();
  o.add(NewOrder::new(OrderKind::Parts, "SSD restock")).unwrap();

  assert!(o.get_by_kind("sale").is_empty());
  assert!(o.get_by_kind("refund").is_empty());
  assert!(o.get_by_kind(" parts ").is_empty());
}

#[test]
fn get_all_is_a_copy() {
  let (_tmp, mut o) = orders();
  o.add(gpu_deal()).unwrap();

  let mut copy = o.get_all();
  copy.clear();
  assert_eq!(o.len(), 1);
}

// ─── Round trip ──────────────────────────────────────────────────────────────

#[test]
fn reopen_yields_same_collection() {
  let (_tmp, dir) = data_dir();
  let expected: Vec<Order> = {
    let mut o = OrderManager::open_in(&dir, None).unwrap();
    o.add(gpu_deal()).unwrap();
    o.add(NewOrder::new(OrderKind::Parts, "SSD restock")).unwrap();
    o.add(NewOrder::new(OrderKind::Sale, "Laptop")).unwrap();
    o.delete(2).unwrap();
    o.get_all()
  };

  let reopened = OrderManager::open_in(&dir, None).unwrap();
  assert_eq!(reopened.get_all(), expected);
}

#[test]
fn reopen_stock_preserves_items() {
  let (_tmp, dir) = data_dir();
  let mut s = StockManager::open_in(&dir).unwrap();
  s.add(NewStockItem::new("RAM", 4, 39.99, "RAM")).unwrap();
  s.add_item("PSU", 2, 59.5, "PSU").unwrap();
  let expected = s.get_all();

  let reopened = StockManager::open_in(&dir).unwrap();
  assert_eq!(reopened.get_all(), expected);
}
