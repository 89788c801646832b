//! The dispatch loop
//!
//! One task multiplexes four streams: raw notifications, source errors, timer
//! ticks and the shutdown signal. Every flush runs inline, so batches reach the
//! store one at a time and in drain order.

use std::{pin::pin, sync::Arc, time::Duration};

use futures::{
	future,
	stream::{self, StreamExt},
};
use futures_concurrency::stream::Merge;
use serde::{Deserialize, Serialize};
use strum::Display;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use fst_fs_watcher::{NotificationSource, RawNotification, SourceError};

use crate::{
	buffer::EventBuffer,
	bus::{EventBus, PipelineEvent},
	classifier::classify,
	config::PipelineConfig,
	flush::FlushPipeline,
	metrics::PipelineMetrics,
	store::EventStore,
	trigger::{interval_ticks, FlushTrigger},
};

/// Lifecycle of a dispatch loop. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum PipelineState {
	Running,
	ShuttingDown,
	Stopped,
}

pub struct DispatchLoop {
	flush: FlushPipeline,
	flush_interval: Duration,
	bus: EventBus,
	metrics: Arc<PipelineMetrics>,
	state: watch::Sender<PipelineState>,
}

impl DispatchLoop {
	pub fn new(config: &PipelineConfig, store: Arc<dyn EventStore>) -> Self {
		let bus = EventBus::default();
		let metrics = Arc::new(PipelineMetrics::new());
		let (state, _) = watch::channel(PipelineState::Running);

		Self {
			flush: FlushPipeline::new(
				Arc::new(EventBuffer::new(config.max_buffer_size)),
				store,
				bus.clone(),
				Arc::clone(&metrics),
			),
			flush_interval: config.flush_interval,
			bus,
			metrics,
			state,
		}
	}

	pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
		self.bus.subscribe()
	}

	pub fn state(&self) -> watch::Receiver<PipelineState> {
		self.state.subscribe()
	}

	pub fn metrics(&self) -> Arc<PipelineMetrics> {
		Arc::clone(&self.metrics)
	}

	pub fn buffer(&self) -> Arc<EventBuffer> {
		Arc::clone(self.flush.buffer())
	}

	/// Run until `shutdown` is cancelled or the notification stream closes.
	///
	/// Either way, notifications queued at that moment are ingested and one
	/// final flush is attempted before returning. Notifications arriving after
	/// shutdown began are left in the source.
	pub async fn run(self, source: NotificationSource, shutdown: CancellationToken) {
		enum StreamMessage {
			Notification(RawNotification),
			SourceError(SourceError),
			SourceClosed,
			Tick,
			Stop,
		}

		self.set_state(PipelineState::Running);

		let pending = source.notifications.clone();

		let mut msg_stream = pin!((
			source
				.notifications
				.map(StreamMessage::Notification)
				.chain(stream::once(future::ready(StreamMessage::SourceClosed))),
			source.errors.map(StreamMessage::SourceError),
			interval_ticks(self.flush_interval).map(|_| StreamMessage::Tick),
			stream::once(async move { shutdown.cancelled().await }).map(|()| StreamMessage::Stop),
		)
			.merge());

		while let Some(msg) = msg_stream.next().await {
			match msg {
				StreamMessage::Notification(notification) => {
					if self.ingest(&notification) {
						self.flush.flush(FlushTrigger::Capacity).await;
					}
				}

				StreamMessage::SourceError(e) => {
					error!(error = %e, paths = ?e.paths, "Watcher error;");
					self.metrics.record_source_error();
					self.bus.emit(PipelineEvent::SourceError {
						message: e.to_string(),
					});
				}

				StreamMessage::Tick => {
					self.flush.flush(FlushTrigger::Interval).await;
				}

				StreamMessage::Stop => {
					debug!("Received shutdown signal");
					break;
				}

				StreamMessage::SourceClosed => {
					debug!("Notification source closed");
					break;
				}
			}
		}

		self.set_state(PipelineState::ShuttingDown);

		// Only what was queued when shutdown began; the source may still be live.
		let queued = pending.len();
		let mut drained = 0;
		while drained < queued {
			let Ok(notification) = pending.try_recv() else {
				break;
			};
			self.ingest(&notification);
			drained += 1;
		}
		if drained > 0 {
			debug!(drained, "Ingested queued notifications before final flush;");
		}

		self.flush.flush(FlushTrigger::Shutdown).await;

		self.set_state(PipelineState::Stopped);
		info!("Dispatch loop stopped");
	}

	/// Classify and buffer, returning whether capacity was reached.
	fn ingest(&self, notification: &RawNotification) -> bool {
		let event = classify(notification);
		trace!(path = %event.file_path, event_type = %event.event_type, "Buffered event;");
		self.metrics.record_event_received();
		self.flush.buffer().append(event)
	}

	fn set_state(&self, state: PipelineState) {
		self.state.send_replace(state);
		self.bus.emit(PipelineEvent::StateChanged(state));
	}
}
