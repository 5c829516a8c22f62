//! Error types for `stockroom-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown order kind: {0:?} (expected \"sale\" or \"parts\")")]
  UnknownOrderKind(String),

  #[error("{record} has no editable field named {field:?}")]
  UnknownField { record: &'static str, field: String },

  #[error("invalid value for {field}: {reason}")]
  InvalidField { field: String, reason: String },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
