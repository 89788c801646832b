//! Optional settings file
//!
//! Every value here is a fallback: an explicit command line flag always wins,
//! and anything left unset falls back to the built-in default.

use std::{
	path::{Path, PathBuf},
	time::Duration,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DB_PATH: &str = "fstimeline.db";
pub const DEFAULT_WATCH_PATH: &str = ".";
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_BUFFER_SIZE: usize = 100;
pub const DEFAULT_QUERY_LIMIT: u64 = 100;
pub const DEFAULT_EXPORT_LIMIT: u64 = 1000;
pub const DEFAULT_EXPORT_OUTPUT: &str = "timeline.html";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	/// Database path
	pub db: Option<PathBuf>,
	pub watch: WatchSettings,
	pub query: QuerySettings,
	pub export: ExportSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchSettings {
	pub paths: Vec<PathBuf>,
	/// Flush interval, humantime formatted (`5s`, `1m`)
	#[serde(with = "humantime_serde")]
	pub flush: Option<Duration>,
	pub buffer: Option<usize>,
	pub recursive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuerySettings {
	pub limit: Option<u64>,
	pub color: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
	pub limit: Option<u64>,
	pub output: Option<PathBuf>,
}

impl Settings {
	pub fn load(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file {}", path.display()))?;

		Self::from_toml(&raw).with_context(|| format!("Invalid config file {}", path.display()))
	}

	pub fn from_toml(raw: &str) -> Result<Self> {
		Ok(toml::from_str(raw)?)
	}
}
