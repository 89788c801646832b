use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::ValueEnum;
use fst_core::SqliteStore;

use crate::config::{Settings, DEFAULT_DB_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	Human,
	Json,
}

/// Resolved global options shared by every command
#[derive(Debug)]
pub struct Context {
	pub db_path: PathBuf,
	pub format: OutputFormat,
	pub settings: Settings,
}

impl Context {
	pub fn new(db: Option<PathBuf>, config: Option<PathBuf>, format: OutputFormat) -> Result<Self> {
		let settings = match config {
			Some(path) => Settings::load(&path)?,
			None => Settings::default(),
		};

		let db_path = db
			.or_else(|| settings.db.clone())
			.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

		Ok(Self {
			db_path,
			format,
			settings,
		})
	}

	pub async fn open_store(&self) -> Result<SqliteStore> {
		SqliteStore::open(&self.db_path)
			.await
			.with_context(|| format!("Failed to open database {}", self.db_path.display()))
	}
}
