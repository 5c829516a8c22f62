//! `stockroom stock …`: list, add, edit and delete stock items.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use clap::Subcommand;
use stockroom_core::{
  record::RecordId,
  stock::{NewStockItem, StockItem, StockItemPatch},
  store::RecordStore as _,
};
use stockroom_store_json::StockManager;
use tracing::info;

use crate::{
  fields::{into_map, parse_assignment, require_non_blank},
  render::{delete_confirmed, stock_table},
};

#[derive(Subcommand, Debug)]
pub enum StockCommand {
  /// Show every stock item.
  List,

  /// Add a stock item.
  Add {
    #[arg(long)]
    name:      String,
    #[arg(long)]
    quantity:  i64,
    /// Unit price.
    #[arg(long, value_parser = parse_price)]
    price:     f64,
    /// Item type, e.g. CPU or RAM (see `stockroom types`).
    #[arg(long = "type", default_value = "")]
    item_type: String,
  },

  /// Change selected fields of a stock item.
  Edit {
    id:        RecordId,
    #[arg(long)]
    name:      Option<String>,
    #[arg(long)]
    quantity:  Option<i64>,
    #[arg(long, value_parser = parse_price)]
    price:     Option<f64>,
    #[arg(long = "type")]
    item_type: Option<String>,
  },

  /// Set fields by name, e.g. `quantity=5 type=GPU`.
  Set {
    id:     RecordId,
    #[arg(required = true, value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    fields: Vec<(String, String)>,
  },

  /// Delete a stock item.
  Delete {
    id:  RecordId,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,
  },
}

pub fn run(
  command: StockCommand,
  store: &mut StockManager,
  input: &mut impl BufRead,
  output: &mut impl Write,
) -> Result<()> {
  match command {
    StockCommand::List => {
      write!(output, "{}", stock_table(&store.get_all()))?;
      note_undecodable(output, store.undecodable())?;
    }

    StockCommand::Add { name, quantity, price, item_type } => {
      let name = required("name", &name)?;
      let item = store.add(NewStockItem::new(name, quantity, price, item_type.trim()))?;
      info!(id = item.id, "added stock item");
      report(output, "Added", &item)?;
    }

    StockCommand::Edit { id, name, quantity, price, item_type } => {
      let patch = StockItemPatch {
        name: name
          .as_deref()
          .map(|n| required("name", n).map(str::to_owned))
          .transpose()?,
        quantity,
        unit_price: price,
        item_type: item_type.map(|t| t.trim().to_owned()),
        date_added: None,
      };
      if patch.is_empty() {
        bail!("nothing to change; pass at least one of --name, --quantity, --price, --type");
      }
      let item = store.update(id, patch)?;
      report(output, "Updated", &item)?;
    }

    StockCommand::Set { id, fields } => {
      let fields = into_map::<StockItemPatch>(fields);
      require_non_blank(&fields, "name")?;
      let item = store.update_fields(id, fields)?;
      report(output, "Updated", &item)?;
    }

    StockCommand::Delete { id, yes } => {
      delete_confirmed(store, id, yes, input, output)?;
    }
  }
  Ok(())
}

/// Trimmed `value`, or an error naming `field` when it is blank.
pub(crate) fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
  let value = value.trim();
  if value.is_empty() {
    bail!("{field} is required");
  }
  Ok(value)
}

/// A unit price; must be a finite number.
fn parse_price(raw: &str) -> Result<f64, String> {
  let price: f64 = raw.trim().parse().map_err(|e| format!("{e}"))?;
  if !price.is_finite() {
    return Err(format!("{raw:?} is not a finite number"));
  }
  Ok(price)
}

/// Mention elements the list could not show.
pub(crate) fn note_undecodable(output: &mut impl Write, count: usize) -> Result<()> {
  if count > 0 {
    writeln!(output, "({count} unreadable record(s) in the file are not shown)")?;
  }
  Ok(())
}

fn report(output: &mut impl Write, verb: &str, item: &StockItem) -> Result<()> {
  writeln!(output, "{verb} stock item {}.", item.id)?;
  write!(output, "{}", stock_table(std::slice::from_ref(item)))?;
  Ok(())
}
