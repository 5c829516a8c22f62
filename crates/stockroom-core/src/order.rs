//! Orders: sales being negotiated and parts requested from suppliers.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};
use strum::{Display, EnumString, VariantNames};

use crate::{
  Error, Result,
  record::{FromFields, Record, RecordId, decode_field},
};

/// Suggested values for [`Order::status`]. Not enforced by the store.
pub const ORDER_STATUSES: &[&str] =
  &["open", "in_talks", "ordered", "received", "won", "lost", "closed"];

/// Status given to new orders when the caller does not pick one.
pub const DEFAULT_ORDER_STATUS: &str = "open";

// ─── OrderKind ───────────────────────────────────────────────────────────────

/// Discriminates a sale from a parts order.
///
/// Always written lower-case; parsed case-insensitively, so `"SALE"` and
/// `"Sale"` both name [`OrderKind::Sale`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Display,
  EnumString,
  VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderKind {
  Sale,
  Parts,
}

impl OrderKind {
  /// Case-insensitive parse with a core [`Error`] on failure. Surrounding
  /// whitespace is not ignored.
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownOrderKind(s.to_owned()))
  }
}

impl<'de> Deserialize<'de> for OrderKind {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw
      .parse()
      .map_err(|_| de::Error::unknown_variant(&raw, Self::VARIANTS))
  }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// An order as persisted in `orders.json`. Unknown keys are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
  pub id:         RecordId,
  pub kind:       OrderKind,
  /// Short description.
  pub title:      String,
  /// Customer or supplier.
  pub contact:    String,
  /// Where the parts came from, or who was spoken to.
  pub from_where: String,
  /// Staff member handling the order.
  pub by_who:     String,
  /// Free-form; conventionally `YYYY-MM-DD`.
  pub date:       String,
  pub status:     String,
  #[serde(default)]
  pub notes:      String,
  #[serde(flatten)]
  pub extra:      Map<String, Value>,
}

// ─── NewOrder ────────────────────────────────────────────────────────────────

/// Input to `add` for orders. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
  pub kind:       OrderKind,
  pub title:      String,
  pub contact:    String,
  pub from_where: String,
  pub by_who:     String,
  pub date:       String,
  pub status:     String,
  pub notes:      String,
}

impl NewOrder {
  /// An order of `kind` titled `title`, with every other field empty and
  /// status [`DEFAULT_ORDER_STATUS`].
  pub fn new(kind: OrderKind, title: impl Into<String>) -> Self {
    Self {
      kind,
      title: title.into(),
      contact: String::new(),
      from_where: String::new(),
      by_who: String::new(),
      date: String::new(),
      status: DEFAULT_ORDER_STATUS.to_owned(),
      notes: String::new(),
    }
  }
}

// ─── OrderPatch ──────────────────────────────────────────────────────────────

/// Partial update for an order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderPatch {
  pub kind:       Option<OrderKind>,
  pub title:      Option<String>,
  pub contact:    Option<String>,
  pub from_where: Option<String>,
  pub by_who:     Option<String>,
  pub date:       Option<String>,
  pub status:     Option<String>,
  pub notes:      Option<String>,
}

impl OrderPatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

impl FromFields for OrderPatch {
  const TEXT_FIELDS: &'static [&'static str] =
    &["kind", "title", "contact", "from_where", "by_who", "date", "status", "notes"];

  fn from_fields(fields: Map<String, Value>) -> Result<Self> {
    let mut patch = Self::default();
    for (field, value) in fields {
      match field.as_str() {
        "kind" => {
          let raw: String = decode_field(&field, value)?;
          patch.kind = Some(OrderKind::parse(&raw)?);
        }
        "title" => patch.title = Some(decode_field(&field, value)?),
        "contact" => patch.contact = Some(decode_field(&field, value)?),
        "from_where" => patch.from_where = Some(decode_field(&field, value)?),
        "by_who" => patch.by_who = Some(decode_field(&field, value)?),
        "date" => patch.date = Some(decode_field(&field, value)?),
        "status" => patch.status = Some(decode_field(&field, value)?),
        "notes" => patch.notes = Some(decode_field(&field, value)?),
        _ => return Err(Error::UnknownField { record: Order::KIND, field }),
      }
    }
    Ok(patch)
  }
}

impl Record for Order {
  type New = NewOrder;
  type Patch = OrderPatch;

  const KIND: &'static str = "order";

  fn id(&self) -> RecordId { self.id }

  fn from_new(id: RecordId, input: NewOrder) -> Self {
    Self {
      id,
      kind: input.kind,
      title: input.title,
      contact: input.contact,
      from_where: input.from_where,
      by_who: input.by_who,
      date: input.date,
      status: input.status,
      notes: input.notes,
      extra: Map::new(),
    }
  }

  fn apply(&mut self, patch: OrderPatch) {
    let OrderPatch { kind, title, contact, from_where, by_who, date, status, notes } =
      patch;

    if let Some(kind) = kind {
      self.kind = kind;
    }
    for (slot, value) in [
      (&mut self.title, title),
      (&mut self.contact, contact),
      (&mut self.from_where, from_where),
      (&mut self.by_who, by_who),
      (&mut self.date, date),
      (&mut self.status, status),
      (&mut self.notes, notes),
    ] {
      if let Some(value) = value {
        *slot = value;
      }
    }
  }
}
