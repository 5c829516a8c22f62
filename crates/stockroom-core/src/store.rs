//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `stockroom-store-json`). Front ends
//! depend on this abstraction, not on a concrete backend.
//!
//! Every call runs to completion before returning. A store's in-memory view
//! and its backing storage agree after each successful mutation.

use crate::record::{Record, RecordId};

/// Identifier-keyed CRUD over one collection of `R`.
pub trait RecordStore<R: Record> {
  type Error: std::error::Error + Send + Sync + 'static;

  /// A copy of every record, in insertion order.
  fn get_all(&self) -> Vec<R>;

  /// The record with `id`, or `None`.
  fn get_one(&self, id: RecordId) -> Option<R>;

  /// Assign the next id, append, persist, and return the new record.
  fn add(&mut self, input: R::New) -> Result<R, Self::Error>;

  /// Merge `patch` into the record with `id`, persist, and return it.
  ///
  /// Fails with a not-found error, leaving the collection unchanged, if no
  /// record has that id.
  fn update(&mut self, id: RecordId, patch: R::Patch) -> Result<R, Self::Error>;

  /// Remove the record with `id` and persist.
  ///
  /// Fails with a not-found error if no record has that id.
  fn delete(&mut self, id: RecordId) -> Result<(), Self::Error>;
}
