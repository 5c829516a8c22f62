//! [`JsonStore`] — a record collection mirrored to one JSON array file.

use std::{
  fs, io,
  path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Map, Value};
use stockroom_core::{
  record::{FromFields, Record, RecordId, local_timestamp},
  store::RecordStore,
};
use tracing::{debug, warn};

use crate::{Error, Result};

// ─── Entries ─────────────────────────────────────────────────────────────────

/// One element of the persisted array. Elements that do not decode as `R`
/// are held verbatim so a save writes them back where they were.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Entry<R> {
  Record(R),
  Raw(Value),
}

impl<R: Record> Entry<R> {
  fn record(&self) -> Option<&R> {
    match self {
      Self::Record(record) => Some(record),
      Self::Raw(_) => None,
    }
  }

  /// The element's id, if it has one a record could use.
  fn id(&self) -> Option<RecordId> {
    match self {
      Self::Record(record) => Some(record.id()),
      Self::Raw(value) => value.get("id").and_then(Value::as_u64),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An ordered, in-memory collection of `R` loaded from `path` on open and
/// rewritten in full after every mutation.
///
/// There is no locking. Two stores over the same file (in one process or
/// several) each overwrite the whole file on save; the last writer wins.
#[derive(Debug)]
pub struct JsonStore<R> {
  path:    PathBuf,
  entries: Vec<Entry<R>>,
}

impl<R: Record> JsonStore<R> {
  /// Open the collection at `path`.
  ///
  /// Never fails: a missing file, unreadable file, invalid JSON, or a JSON
  /// value that is not an array all yield an empty collection. Array
  /// elements that do not decode as `R` are kept as raw JSON: they are not
  /// returned by reads, but they are saved back unchanged and their ids are
  /// never handed out again while they exist.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let entries = load(&path);
    let store = Self { path, entries };
    debug!(
      path = %store.path.display(),
      count = store.len(),
      undecodable = store.undecodable(),
      "loaded {}s",
      R::KIND
    );
    store
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Number of decoded records.
  pub fn len(&self) -> usize { self.records().count() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  /// Number of persisted elements that could not be decoded as `R`.
  pub fn undecodable(&self) -> usize {
    self.entries.len() - self.len()
  }

  /// Iterate the decoded records in order without copying.
  pub fn records(&self) -> impl Iterator<Item = &R> + '_ {
    self.entries.iter().filter_map(Entry::record)
  }

  /// Update from a field-name → value mapping. Names are checked against the
  /// record's editable fields before anything changes.
  pub fn update_fields(&mut self, id: RecordId, fields: Map<String, Value>) -> Result<R>
  where
    R::Patch: FromFields,
  {
    let patch = R::Patch::from_fields(fields)?;
    self.update(id, patch)
  }

  /// Rewrite the backing file from the in-memory collection.
  fn save(&self) -> Result<()> {
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|source| Error::Io {
        path: parent.to_path_buf(),
        source,
      })?;
    }

    let json = serde_json::to_string_pretty(&self.entries)?;
    fs::write(&self.path, json).map_err(|source| Error::Io {
      path: self.path.clone(),
      source,
    })?;

    debug!(path = %self.path.display(), count = self.entries.len(), "saved {}s", R::KIND);
    Ok(())
  }

  /// Highest present id plus one; `1` for an empty collection. A deleted
  /// highest id is handed out again.
  fn next_id(&self) -> RecordId {
    self.entries.iter().filter_map(Entry::id).max().unwrap_or(0) + 1
  }

  fn find_index(&self, id: RecordId) -> Option<usize> {
    self.entries.iter().position(|e| e.id() == Some(id))
  }

  fn not_found(id: RecordId) -> Error { Error::NotFound { kind: R::KIND, id } }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

fn load<R: Record>(path: &Path) -> Vec<Entry<R>> {
  let raw = match fs::read_to_string(path) {
    Ok(raw) => raw,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
    Err(e) => {
      warn!(path = %path.display(), error = %e, "unreadable {} file; starting empty", R::KIND);
      return Vec::new();
    }
  };

  let value: Value = match serde_json::from_str(&raw) {
    Ok(value) => value,
    Err(e) => {
      warn!(path = %path.display(), error = %e, "malformed {} file; starting empty", R::KIND);
      return Vec::new();
    }
  };

  let Value::Array(elements) = value else {
    warn!(path = %path.display(), "{} file is not a JSON array; starting empty", R::KIND);
    return Vec::new();
  };

  let loaded_at = local_timestamp();
  elements
    .into_iter()
    .enumerate()
    .map(|(index, element)| {
      decode(element, &loaded_at).unwrap_or_else(|(element, e)| {
        warn!(path = %path.display(), index, error = %e, "keeping undecodable {} as-is", R::KIND);
        Entry::Raw(element)
      })
    })
    .collect()
}

/// Decode one element, filling missing fields first. On failure the
/// element comes back untouched.
fn decode<R: Record>(
  element: Value,
  loaded_at: &str,
) -> Result<Entry<R>, (Value, serde_json::Error)> {
  let mut upgraded = element.clone();
  if let Value::Object(fields) = &mut upgraded {
    R::upgrade(fields, loaded_at);
  }
  serde_json::from_value(upgraded)
    .map(Entry::Record)
    .map_err(|e| (element, e))
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl<R: Record> RecordStore<R> for JsonStore<R> {
  type Error = Error;

  fn get_all(&self) -> Vec<R> { self.records().cloned().collect() }

  fn get_one(&self, id: RecordId) -> Option<R> {
    self.records().find(|r| r.id() == id).cloned()
  }

  fn add(&mut self, input: R::New) -> Result<R> {
    let record = R::from_new(self.next_id(), input);
    record.validate()?;
    self.entries.push(Entry::Record(record.clone()));
    self.save()?;
    Ok(record)
  }

  fn update(&mut self, id: RecordId, patch: R::Patch) -> Result<R> {
    let index = self.find_index(id).ok_or_else(|| Self::not_found(id))?;
    let Entry::Record(current) = &self.entries[index] else {
      return Err(Error::Undecodable { kind: R::KIND, id });
    };

    let mut updated = current.clone();
    updated.apply(patch);
    updated.validate()?;
    self.entries[index] = Entry::Record(updated.clone());
    self.save()?;
    Ok(updated)
  }

  /// Removes undecodable elements too, by their `id` key.
  fn delete(&mut self, id: RecordId) -> Result<()> {
    let index = self.find_index(id).ok_or_else(|| Self::not_found(id))?;
    self.entries.remove(index);
    self.save()
  }
}
