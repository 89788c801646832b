mod args;

pub use args::*;

use anyhow::{Context as _, Result};
use chrono::Utc;
use fst_core::EventStore;

use crate::{
	config::DEFAULT_QUERY_LIMIT,
	context::{Context, OutputFormat},
	ui::timeline::TimelineRenderer,
};

pub async fn run(ctx: &Context, args: QueryArgs) -> Result<()> {
	let limit = ctx.settings.query.limit.unwrap_or(DEFAULT_QUERY_LIMIT);
	let filter = args.filter.to_filter(limit, Utc::now())?;

	let store = ctx.open_store().await?;
	let mut events = store
		.query(&filter)
		.await
		.context("Failed to query events")?;

	// Newest first from the store, oldest first on screen
	events.reverse();

	match ctx.format {
		OutputFormat::Human => {
			let color = !args.no_color && ctx.settings.query.color.unwrap_or(true);
			print!("{}", TimelineRenderer::new(color).render(&events));
		}
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&events)?);
		}
	}

	Ok(())
}
