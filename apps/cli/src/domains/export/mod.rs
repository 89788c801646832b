mod args;

pub use args::*;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::Utc;
use fst_core::EventStore;
use tracing::info;

use crate::{
	config::{DEFAULT_EXPORT_LIMIT, DEFAULT_EXPORT_OUTPUT},
	context::{Context, OutputFormat},
	ui::html,
};

pub async fn run(ctx: &Context, args: ExportArgs) -> Result<()> {
	let limit = ctx.settings.export.limit.unwrap_or(DEFAULT_EXPORT_LIMIT);
	let filter = args.filter.to_filter(limit, Utc::now())?;
	let output = args
		.output
		.or_else(|| ctx.settings.export.output.clone())
		.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_OUTPUT));

	let store = ctx.open_store().await?;
	let mut events = store
		.query(&filter)
		.await
		.context("Failed to query events")?;
	events.reverse();

	html::export(&events, &output).context("Failed to export timeline")?;
	info!(path = %output.display(), count = events.len(), "Exported timeline;");

	match ctx.format {
		OutputFormat::Human => {
			println!("Timeline exported to: {}", output.display());
			println!("Total events: {}", events.len());
		}
		OutputFormat::Json => {
			println!(
				"{}",
				serde_json::json!({ "output": output, "total_events": events.len() })
			);
		}
	}

	Ok(())
}
