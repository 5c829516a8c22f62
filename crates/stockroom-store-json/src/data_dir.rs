//! Location of the collection files on disk.

use std::{
  fs,
  path::{Path, PathBuf},
};

use crate::{Error, Result};

/// Data directory used when none is configured, relative to the working
/// directory.
pub const DEFAULT_DATA_DIR: &str = "data";
pub const STOCK_FILE: &str = "stock.json";
pub const ORDERS_FILE: &str = "orders.json";

/// The directory holding `stock.json` and `orders.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
  root: PathBuf,
}

impl DataDir {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  pub fn root(&self) -> &Path { &self.root }

  /// Create the directory (and parents) if missing. Safe to call repeatedly.
  pub fn ensure(&self) -> Result<()> {
    fs::create_dir_all(&self.root).map_err(|source| Error::Io {
      path: self.root.clone(),
      source,
    })
  }

  pub fn file(&self, name: &str) -> PathBuf { self.root.join(name) }

  pub fn stock_path(&self) -> PathBuf { self.file(STOCK_FILE) }

  /// `orders.json`, or `filename` inside the data directory when given.
  pub fn orders_path(&self, filename: Option<&str>) -> PathBuf {
    self.file(filename.unwrap_or(ORDERS_FILE))
  }
}

impl Default for DataDir {
  fn default() -> Self { Self::new(DEFAULT_DATA_DIR) }
}
