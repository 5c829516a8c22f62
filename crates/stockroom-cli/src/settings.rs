//! Layered configuration: defaults, then `stockroom.toml`, then
//! `STOCKROOM_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use stockroom_store_json::{DEFAULT_DATA_DIR, DataDir, ORDERS_FILE};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
  /// Directory holding `stock.json` and the orders file.
  pub data_dir:    PathBuf,
  /// File name of the orders collection inside `data_dir`.
  pub orders_file: String,
}

impl Settings {
  pub fn load(config_path: &Path, data_dir_flag: Option<&Path>) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("data_dir", DEFAULT_DATA_DIR)?
      .set_default("orders_file", ORDERS_FILE)?
      .add_source(config::File::from(config_path).required(false))
      .add_source(config::Environment::with_prefix("STOCKROOM"))
      .set_override_option(
        "data_dir",
        data_dir_flag.map(|p| p.to_string_lossy().into_owned()),
      )?
      .build()
      .with_context(|| format!("failed to read config file {}", config_path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn data_dir(&self) -> DataDir { DataDir::new(&self.data_dir) }
}
