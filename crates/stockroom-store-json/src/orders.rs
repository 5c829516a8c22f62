//! [`OrderManager`]: the sales and parts order collection.

use stockroom_core::order::{Order, OrderKind};

use crate::{DataDir, JsonStore, Result};

/// Orders persisted to `orders.json` (or a caller-chosen file name).
pub type OrderManager = JsonStore<Order>;

impl JsonStore<Order> {
  /// Open `filename` (default `orders.json`) inside `dir`, creating the
  /// directory if needed.
  pub fn open_in(dir: &DataDir, filename: Option<&str>) -> Result<Self> {
    dir.ensure()?;
    Ok(Self::open(dir.orders_path(filename)))
  }

  /// Orders whose kind matches `kind`, compared case-insensitively.
  /// Text that names no kind matches nothing.
  pub fn get_by_kind(&self, kind: &str) -> Vec<Order> {
    OrderKind::parse(kind)
      .map(|kind| self.by_kind(kind))
      .unwrap_or_default()
  }

  pub fn by_kind(&self, kind: OrderKind) -> Vec<Order> {
    self
      .records()
      .filter(|o| o.kind == kind)
      .cloned()
      .collect()
  }
}
