//! Stock items, one row per product line held in the shop.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use crate::record::local_timestamp;
use crate::{
  Error, Result,
  record::{FromFields, Record, RecordId, decode_field, finite},
};

/// Suggested values for [`StockItem::item_type`]. Not enforced by the store.
pub const STOCK_TYPES: &[&str] = &[
  "Motherboard",
  "CPU",
  "GPU",
  "RAM",
  "PSU",
  "Storage",
  "Accessory",
  "Other",
];

// ─── StockItem ───────────────────────────────────────────────────────────────

/// A stock item as persisted in `stock.json`.
///
/// Files written before `type` and `date_added` existed still load: both are
/// filled in on decode (empty type, current timestamp). Keys this type does
/// not know are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
  pub id:         RecordId,
  pub name:       String,
  pub quantity:   i64,
  pub unit_price: f64,
  #[serde(rename = "type", default)]
  pub item_type:  String,
  #[serde(default = "local_timestamp")]
  pub date_added: String,
  #[serde(flatten)]
  pub extra:      Map<String, Value>,
}

// ─── NewStockItem ────────────────────────────────────────────────────────────

/// Input to `add` for stock. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewStockItem {
  pub name:       String,
  pub quantity:   i64,
  pub unit_price: f64,
  pub item_type:  String,
  /// Stamped with [`local_timestamp`] when `None`.
  pub date_added: Option<String>,
}

impl NewStockItem {
  /// Convenience constructor with no explicit `date_added`.
  pub fn new(
    name: impl Into<String>,
    quantity: i64,
    unit_price: f64,
    item_type: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      quantity,
      unit_price,
      item_type: item_type.into(),
      date_added: None,
    }
  }
}

// ─── StockItemPatch ──────────────────────────────────────────────────────────

/// Partial update for a stock item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StockItemPatch {
  pub name:       Option<String>,
  pub quantity:   Option<i64>,
  pub unit_price: Option<f64>,
  pub item_type:  Option<String>,
  pub date_added: Option<String>,
}

impl StockItemPatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

impl FromFields for StockItemPatch {
  const TEXT_FIELDS: &'static [&'static str] = &["name", "type", "date_added"];

  /// Accepts the persisted field names (`name`, `quantity`, `unit_price`,
  /// `type`, `date_added`). `id` is not editable.
  fn from_fields(fields: Map<String, Value>) -> Result<Self> {
    let mut patch = Self::default();
    for (field, value) in fields {
      match field.as_str() {
        "name" => patch.name = Some(decode_field(&field, value)?),
        "quantity" => patch.quantity = Some(decode_field(&field, value)?),
        "unit_price" => patch.unit_price = Some(decode_field(&field, value)?),
        "type" => patch.item_type = Some(decode_field(&field, value)?),
        "date_added" => patch.date_added = Some(decode_field(&field, value)?),
        _ => {
          return Err(Error::UnknownField { record: StockItem::KIND, field });
        }
      }
    }
    Ok(patch)
  }
}

impl Record for StockItem {
  type New = NewStockItem;
  type Patch = StockItemPatch;

  const KIND: &'static str = "stock item";

  fn id(&self) -> RecordId { self.id }

  fn from_new(id: RecordId, input: NewStockItem) -> Self {
    Self {
      id,
      name: input.name,
      quantity: input.quantity,
      unit_price: input.unit_price,
      item_type: input.item_type,
      date_added: input.date_added.unwrap_or_else(local_timestamp),
      extra: Map::new(),
    }
  }

  fn apply(&mut self, patch: StockItemPatch) {
    if let Some(name) = patch.name {
      self.name = name;
    }
    if let Some(quantity) = patch.quantity {
      self.quantity = quantity;
    }
    if let Some(unit_price) = patch.unit_price {
      self.unit_price = unit_price;
    }
    if let Some(item_type) = patch.item_type {
      self.item_type = item_type;
    }
    if let Some(date_added) = patch.date_added {
      self.date_added = date_added;
    }
  }

  fn validate(&self) -> Result<()> { finite("unit_price", self.unit_price) }

  fn upgrade(fields: &mut Map<String, Value>, loaded_at: &str) {
    fields.entry("type").or_insert_with(|| Value::from(""));
    fields
      .entry("date_added")
      .or_insert_with(|| Value::from(loaded_at));
  }
}
