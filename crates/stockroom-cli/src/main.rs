//! `stockroom` — command-line front end for the stock and order records.
//!
//! # Usage
//!
//! ```text
//! stockroom stock add --name "DDR5 16GB" --quantity 4 --price 39.99 --type RAM
//! stockroom stock list
//! stockroom orders add --kind sale --title "GPU deal" --contact "Jo Bloggs"
//! stockroom orders list --kind sale
//! stockroom --data-dir /srv/shop/data stock delete 3
//! ```

mod fields;
mod orders;
mod render;
mod settings;
mod stock;

use std::{
  io::{self, Write},
  path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orders::OrderCommand;
use settings::Settings;
use stock::StockCommand;
use stockroom_core::{order::ORDER_STATUSES, stock::STOCK_TYPES};
use stockroom_store_json::{OrderManager, StockManager};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "stockroom", version, about = "Track shop stock and sales/parts orders")]
struct Cli {
  /// Path to the TOML configuration file (data_dir, orders_file).
  #[arg(short, long, value_name = "FILE", default_value = "stockroom.toml")]
  config: PathBuf,

  /// Directory holding stock.json and the orders file (default: ./data).
  #[arg(long, value_name = "DIR")]
  data_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Stock items.
  #[command(subcommand)]
  Stock(StockCommand),

  /// Sales and parts orders.
  #[command(subcommand)]
  Orders(OrderCommand),

  /// List the suggested stock item types.
  Types,

  /// List the suggested order statuses.
  Statuses,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config, cli.data_dir.as_deref())?;
  let data_dir = settings.data_dir();

  let stdin = io::stdin();
  let mut input = stdin.lock();
  let mut output = io::stdout().lock();

  match cli.command {
    Command::Stock(command) => {
      let mut store = StockManager::open_in(&data_dir)
        .with_context(|| format!("failed to open stock in {}", data_dir.root().display()))?;
      stock::run(command, &mut store, &mut input, &mut output)?;
    }
    Command::Orders(command) => {
      let mut store = OrderManager::open_in(&data_dir, Some(&settings.orders_file))
        .with_context(|| format!("failed to open orders in {}", data_dir.root().display()))?;
      orders::run(command, &mut store, &mut input, &mut output)?;
    }
    Command::Types => print_lines(&mut output, STOCK_TYPES)?,
    Command::Statuses => print_lines(&mut output, ORDER_STATUSES)?,
  }

  Ok(())
}

fn print_lines(output: &mut impl Write, lines: &[&str]) -> Result<()> {
  for line in lines {
    writeln!(output, "{line}")?;
  }
  Ok(())
}
