use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use fst_core::QueryFilter;

use crate::util::time::{parse_end, parse_start};

/// Filters shared by `query` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
	/// Start time (RFC3339 or relative like -24h)
	#[arg(long, short = 's', allow_hyphen_values = true)]
	pub start: Option<String>,

	/// End time (RFC3339)
	#[arg(long, short = 'e')]
	pub end: Option<String>,

	/// Filter by file type (e.g. 'rs', 'txt', 'no-extension')
	#[arg(long = "type", short = 't')]
	pub file_type: Option<String>,

	/// Filter by directory prefix
	#[arg(long, short = 'D')]
	pub dir: Option<String>,

	/// Maximum number of events, 0 for no limit
	#[arg(long, short = 'l')]
	pub limit: Option<u64>,
}

impl FilterArgs {
	pub fn to_filter(&self, default_limit: u64, now: DateTime<Utc>) -> Result<QueryFilter> {
		let mut filter = QueryFilter::default().limit(self.limit.unwrap_or(default_limit));

		if let Some(start) = non_empty(&self.start) {
			filter = filter.since(parse_start(start, now).context("Invalid start time")?);
		}
		if let Some(end) = non_empty(&self.end) {
			filter = filter.until(parse_end(end).context("Invalid end time")?);
		}
		if let Some(file_type) = non_empty(&self.file_type) {
			filter = filter.file_type(file_type);
		}
		if let Some(dir) = non_empty(&self.dir) {
			filter = filter.directory(dir);
		}

		Ok(filter)
	}
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Args, Debug)]
pub struct QueryArgs {
	#[command(flatten)]
	pub filter: FilterArgs,

	/// Disable colored output
	#[arg(long, short = 'n')]
	pub no_color: bool,
}
