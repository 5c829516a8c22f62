//! Error type for `stockroom-store-json`.

use std::path::PathBuf;

use stockroom_core::record::RecordId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// `update` or `delete` named an id that is not in the collection.
  #[error("no {kind} with id {id}")]
  NotFound { kind: &'static str, id: RecordId },

  /// The id belongs to a persisted element that could not be decoded, so
  /// it can be deleted but not updated.
  #[error("{kind} {id} could not be read from the file and cannot be updated")]
  Undecodable { kind: &'static str, id: RecordId },

  #[error("core error: {0}")]
  Core(#[from] stockroom_core::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("i/o error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl Error {
  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
