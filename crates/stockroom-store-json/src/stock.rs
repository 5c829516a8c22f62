//! [`StockManager`] — the stock collection.

use stockroom_core::{
  stock::{NewStockItem, StockItem},
  store::RecordStore as _,
};

use crate::{DataDir, JsonStore, Result};

/// Stock items persisted to `stock.json`.
pub type StockManager = JsonStore<StockItem>;

impl JsonStore<StockItem> {
  /// Open `stock.json` inside `dir`, creating the directory if needed.
  pub fn open_in(dir: &DataDir) -> Result<Self> {
    dir.ensure()?;
    Ok(Self::open(dir.stock_path()))
  }

  /// Add an item stamped with the current time.
  pub fn add_item(
    &mut self,
    name: impl Into<String>,
    quantity: i64,
    unit_price: f64,
    item_type: impl Into<String>,
  ) -> Result<StockItem> {
    self.add(NewStockItem::new(name, quantity, unit_price, item_type))
  }
}
