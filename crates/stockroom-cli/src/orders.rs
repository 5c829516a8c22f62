//! `stockroom orders …`: sales and parts orders.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use clap::Subcommand;
use stockroom_core::{
  order::{DEFAULT_ORDER_STATUS, NewOrder, Order, OrderKind, OrderPatch},
  record::RecordId,
  store::RecordStore as _,
};
use stockroom_store_json::OrderManager;
use tracing::info;

use crate::{
  fields::{into_map, parse_assignment, require_non_blank},
  render::{delete_confirmed, order_table},
  stock::{note_undecodable, required},
};

fn parse_kind(raw: &str) -> Result<OrderKind, stockroom_core::Error> {
  OrderKind::parse(raw.trim())
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
  /// Show orders, optionally only sales or only parts.
  List {
    #[arg(long, default_value = "all", ignore_case = true, value_parser = ["all", "sale", "parts"])]
    kind: String,
  },

  /// Record a sale or a parts order.
  Add {
    /// `sale` or `parts`.
    #[arg(long, value_parser = parse_kind)]
    kind:       OrderKind,
    #[arg(long)]
    title:      String,
    /// Customer or supplier.
    #[arg(long, default_value = "")]
    contact:    String,
    /// Where parts came from, or who was spoken to.
    #[arg(long, default_value = "")]
    from_where: String,
    /// Staff member handling it.
    #[arg(long, default_value = "")]
    by_who:     String,
    /// Conventionally YYYY-MM-DD.
    #[arg(long, default_value = "")]
    date:       String,
    /// See `stockroom statuses`.
    #[arg(long, default_value = DEFAULT_ORDER_STATUS)]
    status:     String,
    #[arg(long, default_value = "")]
    notes:      String,
  },

  /// Change selected fields of an order.
  Edit {
    id:         RecordId,
    #[arg(long, value_parser = parse_kind)]
    kind:       Option<OrderKind>,
    #[arg(long)]
    title:      Option<String>,
    #[arg(long)]
    contact:    Option<String>,
    #[arg(long)]
    from_where: Option<String>,
    #[arg(long)]
    by_who:     Option<String>,
    #[arg(long)]
    date:       Option<String>,
    #[arg(long)]
    status:     Option<String>,
    #[arg(long)]
    notes:      Option<String>,
  },

  /// Set fields by name, e.g. `status=won notes="paid cash"`.
  Set {
    id:     RecordId,
    #[arg(required = true, value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    fields: Vec<(String, String)>,
  },

  /// Delete an order.
  Delete {
    id:  RecordId,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,
  },
}

pub fn run(
  command: OrderCommand,
  store: &mut OrderManager,
  input: &mut impl BufRead,
  output: &mut impl Write,
) -> Result<()> {
  match command {
    OrderCommand::List { kind } => {
      let orders = if kind.eq_ignore_ascii_case("all") {
        store.get_all()
      } else {
        store.get_by_kind(&kind)
      };
      write!(output, "{}", order_table(&orders))?;
      note_undecodable(output, store.undecodable())?;
    }

    OrderCommand::Add { kind, title, contact, from_where, by_who, date, status, notes } => {
      let order = store.add(NewOrder {
        kind,
        title: required("title", &title)?.to_owned(),
        contact: contact.trim().to_owned(),
        from_where: from_where.trim().to_owned(),
        by_who: by_who.trim().to_owned(),
        date: date.trim().to_owned(),
        status: status.trim().to_owned(),
        notes: notes.trim().to_owned(),
      })?;
      info!(id = order.id, kind = %order.kind, "added order");
      report(output, "Added", &order)?;
    }

    OrderCommand::Edit { id, kind, title, contact, from_where, by_who, date, status, notes } => {
      let trimmed = |v: Option<String>| v.map(|v| v.trim().to_owned());
      let patch = OrderPatch {
        kind,
        title: title
          .as_deref()
          .map(|t| required("title", t).map(str::to_owned))
          .transpose()?,
        contact: trimmed(contact),
        from_where: trimmed(from_where),
        by_who: trimmed(by_who),
        date: trimmed(date),
        status: trimmed(status),
        notes: trimmed(notes),
      };
      if patch.is_empty() {
        bail!("nothing to change; pass at least one field flag");
      }
      let order = store.update(id, patch)?;
      report(output, "Updated", &order)?;
    }

    OrderCommand::Set { id, fields } => {
      let fields = into_map::<OrderPatch>(fields);
      require_non_blank(&fields, "title")?;
      let order = store.update_fields(id, fields)?;
      report(output, "Updated", &order)?;
    }

    OrderCommand::Delete { id, yes } => {
      delete_confirmed(store, id, yes, input, output)?;
    }
  }
  Ok(())
}

fn report(output: &mut impl Write, verb: &str, order: &Order) -> Result<()> {
  writeln!(output, "{verb} order {}.", order.id)?;
  write!(output, "{}", order_table(std::slice::from_ref(order)))?;
  if !order.notes.is_empty() {
    writeln!(output, "Notes: {}", order.notes)?;
  }
  Ok(())
}
