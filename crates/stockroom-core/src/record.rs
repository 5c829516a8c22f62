//! The [`Record`] trait shared by every record kind a store can hold.

use chrono::Local;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Numeric record identifier, unique within one collection.
pub type RecordId = u64;

/// Current local time as an ISO-8601 string without offset, e.g.
/// `2025-01-31T14:02:11.482913`.
pub fn local_timestamp() -> String {
  Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// A flat record persisted as one element of a JSON array.
pub trait Record: Clone + Serialize + DeserializeOwned {
  /// Creation input; everything except the store-assigned `id`.
  type New;
  /// Partial update; only the fields that are present change.
  type Patch;

  /// Human-readable label for logs and errors, e.g. `"stock item"`.
  const KIND: &'static str;

  fn id(&self) -> RecordId;

  /// Build the record from its creation input and a freshly assigned id.
  fn from_new(id: RecordId, input: Self::New) -> Self;

  /// Merge `patch` into `self`, leaving absent fields untouched.
  fn apply(&mut self, patch: Self::Patch);

  /// Reject values that would not survive a JSON round trip.
  fn validate(&self) -> Result<()> { Ok(()) }

  /// Fill fields missing from a persisted element before it is decoded.
  /// `loaded_at` is the same for every element of one load.
  fn upgrade(_fields: &mut Map<String, Value>, _loaded_at: &str) {}
}

/// Builds a typed patch from a field-name → value mapping, rejecting names
/// that are not editable fields of the record.
pub trait FromFields: Sized {
  /// Editable fields whose values are plain text.
  const TEXT_FIELDS: &'static [&'static str];

  fn from_fields(fields: Map<String, Value>) -> Result<Self>;

  fn is_text_field(name: &str) -> bool { Self::TEXT_FIELDS.contains(&name) }
}

/// Decode a single patch value, tagging failures with the field name.
pub(crate) fn decode_field<T: DeserializeOwned>(field: &str, value: Value) -> Result<T> {
  serde_json::from_value(value).map_err(|e| Error::InvalidField {
    field:  field.to_owned(),
    reason: e.to_string(),
  })
}

/// Error unless `value` is finite; `NaN` and infinities serialise as `null`.
pub(crate) fn finite(field: &str, value: f64) -> Result<()> {
  if value.is_finite() {
    Ok(())
  } else {
    Err(Error::InvalidField {
      field:  field.to_owned(),
      reason: format!("{value} is not a finite number"),
    })
  }
}
