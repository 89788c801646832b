mod args;

pub use args::*;

use std::sync::{atomic::Ordering, Arc};

use anyhow::{Context as _, Result};
use fst_core::{CancellationToken, PipelineEvent, TimelineWatcher};
use tokio::{signal, sync::broadcast::error::RecvError};
use tracing::{debug, error, warn};

use crate::context::Context;

pub async fn run(ctx: &Context, args: WatchArgs) -> Result<()> {
	let config = args.to_config(&ctx.settings.watch)?;
	let store = ctx.open_store().await?;

	let watcher = TimelineWatcher::new(config.clone(), Arc::new(store))
		.context("Failed to start watcher")?;

	for root in &config.roots {
		println!("Watching directory: {}", root.display());
	}
	println!("Database: {}", ctx.db_path.display());
	println!("Flush interval: {}", humantime::format_duration(config.flush_interval));
	println!("Buffer size: {} events", config.max_buffer_size);
	println!("Press Ctrl+C to stop");

	let metrics = watcher.metrics();
	let mut events = watcher.subscribe();
	tokio::spawn(async move {
		loop {
			match events.recv().await {
				Ok(PipelineEvent::StateChanged(state)) => debug!(%state, "Pipeline state changed;"),
				Ok(event @ PipelineEvent::FlushFailed { .. }) => {
					if let Some(line) = flush_line(&event) {
						eprintln!("{line}");
					}
				}
				Ok(event) => {
					if let Some(line) = flush_line(&event) {
						println!("{line}");
					}
				}
				Err(RecvError::Lagged(n)) => warn!(n, "Pipeline event listener lagged;"),
				Err(RecvError::Closed) => break,
			}
		}
	});

	let shutdown = CancellationToken::new();
	tokio::spawn(cancel_on_signal(shutdown.clone()));

	watcher.run(shutdown).await;

	metrics.log_metrics();
	println!(
		"Stopped. {} events saved in {} batches, {} dropped",
		metrics.events_flushed.load(Ordering::Relaxed),
		metrics.batches_flushed.load(Ordering::Relaxed),
		metrics.events_dropped.load(Ordering::Relaxed),
	);

	Ok(())
}

/// Terminal line for a flush outcome. Other bus events only go to the logs.
fn flush_line(event: &PipelineEvent) -> Option<String> {
	match event {
		PipelineEvent::Flushed { trigger, count } => {
			Some(format!("Flushed {count} events to database ({trigger})"))
		}
		PipelineEvent::FlushFailed {
			trigger,
			count,
			error,
		} => Some(format!(
			"Failed to flush {count} events ({trigger}), batch dropped: {error}"
		)),
		PipelineEvent::SourceError { .. } | PipelineEvent::StateChanged(_) => None,
	}
}

async fn cancel_on_signal(shutdown: CancellationToken) {
	let ctrl_c = async {
		if let Err(e) = signal::ctrl_c().await {
			error!(?e, "Failed to listen for Ctrl+C;");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			}
			Err(e) => {
				error!(?e, "Failed to install SIGTERM handler;");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		() = ctrl_c => println!("\nReceived Ctrl+C, flushing and shutting down..."),
		() = terminate => println!("\nReceived SIGTERM, flushing and shutting down..."),
	}

	shutdown.cancel();
}
