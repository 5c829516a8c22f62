//! `FIELD=VALUE` arguments for the `set` subcommands.

use anyhow::bail;
use serde_json::{Map, Value};
use stockroom_core::record::FromFields;

/// Split `FIELD=VALUE` without interpreting the value.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
  let (field, value) = raw
    .split_once('=')
    .ok_or_else(|| format!("expected FIELD=VALUE, got {raw:?}"))?;
  let field = field.trim();
  if field.is_empty() {
    return Err(format!("missing field name in {raw:?}"));
  }
  Ok((field.to_owned(), value.to_owned()))
}

/// Build the field map for patch `P`. Values of text fields are taken
/// verbatim; any other value is read as JSON (so `quantity=5` is a number),
/// falling back to a string.
pub fn into_map<P: FromFields>(assignments: Vec<(String, String)>) -> Map<String, Value> {
  assignments
    .into_iter()
    .map(|(field, raw)| {
      let value = if P::is_text_field(&field) {
        Value::String(raw)
      } else {
        serde_json::from_str(&raw).unwrap_or(Value::String(raw))
      };
      (field, value)
    })
    .collect()
}

/// Error if `field` is being set to blank text.
pub fn require_non_blank(fields: &Map<String, Value>, field: &str) -> anyhow::Result<()> {
  if let Some(Value::String(value)) = fields.get(field)
    && value.trim().is_empty()
  {
    bail!("{field} is required");
  }
  Ok(())
}
