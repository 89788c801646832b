use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Args;
use fst_core::PipelineConfig;

use crate::config::{
	WatchSettings, DEFAULT_BUFFER_SIZE, DEFAULT_FLUSH_INTERVAL, DEFAULT_WATCH_PATH,
};

#[derive(Args, Debug, Default)]
pub struct WatchArgs {
	/// Directory to watch, repeat for several [default: .]
	#[arg(long = "path", short = 'p')]
	pub paths: Vec<PathBuf>,

	/// Flush interval in seconds [default: 5]
	#[arg(long, short = 'f')]
	pub flush: Option<u64>,

	/// Maximum buffer size before flush [default: 100]
	#[arg(long, short = 'b')]
	pub buffer: Option<usize>,

	/// Only watch the top level of each path
	#[arg(long)]
	pub non_recursive: bool,
}

impl WatchArgs {
	/// Merge flags over the settings file over the defaults.
	pub fn to_config(&self, settings: &WatchSettings) -> Result<PipelineConfig> {
		let paths = if !self.paths.is_empty() {
			self.paths.clone()
		} else if !settings.paths.is_empty() {
			settings.paths.clone()
		} else {
			vec![PathBuf::from(DEFAULT_WATCH_PATH)]
		};

		let flush_interval = self
			.flush
			.map(Duration::from_secs)
			.or(settings.flush)
			.unwrap_or(DEFAULT_FLUSH_INTERVAL);

		let buffer = self
			.buffer
			.or(settings.buffer)
			.unwrap_or(DEFAULT_BUFFER_SIZE);

		let recursive = !self.non_recursive && settings.recursive.unwrap_or(true);

		Ok(PipelineConfig::new(paths, flush_interval, buffer)?.with_recursive(recursive))
	}
}
