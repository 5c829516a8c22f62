//! Plain-text tables and the delete confirmation prompt.

use std::io::{BufRead, Write};

use stockroom_core::{
  order::Order,
  record::{Record, RecordId},
  stock::StockItem,
  store::RecordStore,
};

const STOCK_HEADERS: [&str; 6] =
  ["Id", "Type", "Name", "Quantity", "Unit price", "Date added"];

const ORDER_HEADERS: [&str; 8] =
  ["Id", "Kind", "Title", "Contact", "From where", "By who", "Date", "Status"];

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header row.
pub fn table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
  let mut widths = headers.map(|h| h.chars().count());
  for row in rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(cell.chars().count());
    }
  }

  let rule = widths.map(|w| "-".repeat(w));
  let lines = [headers, rule.each_ref().map(String::as_str)]
    .into_iter()
    .chain(rows.iter().map(|row| row.each_ref().map(String::as_str)));

  let mut out = String::new();
  for cells in lines {
    out.push_str(&render_row(cells, widths));
    out.push('\n');
  }
  out
}

fn render_row<const N: usize>(cells: [&str; N], widths: [usize; N]) -> String {
  let padded: Vec<String> = cells
    .iter()
    .zip(widths)
    .map(|(cell, width)| format!("{cell:<width$}"))
    .collect();
  padded.join("  ").trim_end().to_owned()
}

pub fn stock_table(items: &[StockItem]) -> String {
  let rows: Vec<[String; 6]> = items
    .iter()
    .map(|i| {
      [
        i.id.to_string(),
        i.item_type.clone(),
        i.name.clone(),
        i.quantity.to_string(),
        format!("{:.2}", i.unit_price),
        i.date_added.clone(),
      ]
    })
    .collect();
  table(STOCK_HEADERS, &rows)
}

pub fn order_table(orders: &[Order]) -> String {
  let rows: Vec<[String; 8]> = orders
    .iter()
    .map(|o| {
      [
        o.id.to_string(),
        o.kind.to_string(),
        o.title.clone(),
        o.contact.clone(),
        o.from_where.clone(),
        o.by_who.clone(),
        o.date.clone(),
        o.status.clone(),
      ]
    })
    .collect();
  table(ORDER_HEADERS, &rows)
}

/// Ask a yes/no question; anything but `y` or `yes` is a no.
pub fn confirm(
  question: &str,
  input: &mut impl BufRead,
  output: &mut impl Write,
) -> anyhow::Result<bool> {
  write!(output, "{question} [y/N] ")?;
  output.flush()?;
  let mut answer = String::new();
  input.read_line(&mut answer)?;
  Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Delete `id` from `store`, asking first unless `yes`. Returns whether the
/// record was deleted. A missing id skips the prompt and surfaces the
/// store's not-found error.
pub fn delete_confirmed<R, S>(
  store: &mut S,
  id: RecordId,
  yes: bool,
  input: &mut impl BufRead,
  output: &mut impl Write,
) -> anyhow::Result<bool>
where
  R: Record,
  S: RecordStore<R>,
{
  let exists = store.get_one(id).is_some();
  if exists && !yes {
    let question = format!("Delete {} {id}?", R::KIND);
    if !confirm(&question, input, output)? {
      writeln!(output, "Cancelled.")?;
      return Ok(false);
    }
  }
  store.delete(id)?;
  writeln!(output, "Deleted {} {id}.", R::KIND)?;
  Ok(true)
}
