//! Core types and trait definitions for the stockroom record store.
//!
//! This crate does no I/O. Storage backends (e.g. `stockroom-store-json`)
//! implement [`store::RecordStore`]; front ends depend on that trait.

pub mod error;
pub mod order;
pub mod record;
pub mod stock;
pub mod store;

pub use error::{Error, Result};
