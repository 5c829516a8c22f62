//! JSON-file backend for the stockroom record store.
//!
//! Each collection lives in one JSON array file. The whole file is read when
//! a store is opened and rewritten after every mutation.

mod data_dir;
mod orders;
mod stock;
mod store;

pub mod error;

pub use data_dir::{DEFAULT_DATA_DIR, DataDir, ORDERS_FILE, STOCK_FILE};
pub use error::{Error, Result};
pub use orders::OrderManager;
pub use stock::StockManager;
pub use store::JsonStore;

#[cfg(test)]
mod tests;
