//! Buffer to store flushing

use std::{sync::Arc, time::Instant};

use tracing::{error, info, trace};

use crate::{
	buffer::EventBuffer,
	bus::{EventBus, PipelineEvent},
	error::StoreError,
	metrics::PipelineMetrics,
	store::EventStore,
	trigger::FlushTrigger,
};

/// Result of one flush attempt
#[derive(Debug)]
pub enum FlushOutcome {
	/// The buffer was empty, the store was not touched
	Empty,
	Committed { count: usize },
	/// The batch was dropped
	Failed { count: usize, error: StoreError },
}

impl FlushOutcome {
	pub fn count(&self) -> usize {
		match self {
			Self::Empty => 0,
			Self::Committed { count } | Self::Failed { count, .. } => *count,
		}
	}
}

/// Drains the buffer and commits what it got as a single batch.
///
/// A failed batch is reported and discarded. Events appended while a flush is
/// in progress land in the now empty buffer and go out with the next one.
#[derive(Clone)]
pub struct FlushPipeline {
	buffer: Arc<EventBuffer>,
	store: Arc<dyn EventStore>,
	bus: EventBus,
	metrics: Arc<PipelineMetrics>,
}

impl FlushPipeline {
	pub fn new(
		buffer: Arc<EventBuffer>,
		store: Arc<dyn EventStore>,
		bus: EventBus,
		metrics: Arc<PipelineMetrics>,
	) -> Self {
		Self {
			buffer,
			store,
			bus,
			metrics,
		}
	}

	pub fn buffer(&self) -> &Arc<EventBuffer> {
		&self.buffer
	}

	pub async fn flush(&self, trigger: FlushTrigger) -> FlushOutcome {
		let batch = self.buffer.drain();
		if batch.is_empty() {
			trace!(%trigger, "Nothing to flush;");
			return FlushOutcome::Empty;
		}

		let count = batch.len();
		let start = Instant::now();

		match self.store.insert_batch(&batch).await {
			Ok(()) => {
				self.metrics.record_flush(count, start.elapsed());
				info!(%trigger, count, "Flushed events to database;");
				self.bus.emit(PipelineEvent::Flushed { trigger, count });

				FlushOutcome::Committed { count }
			}
			Err(e) => {
				self.metrics.record_flush_failure(count, start.elapsed());
				error!(?e, %trigger, count, "Failed to flush events, batch dropped;");
				self.bus.emit(PipelineEvent::FlushFailed {
					trigger,
					count,
					error: e.to_string(),
				});

				FlushOutcome::Failed { count, error: e }
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{classifier::classify, event::Event, store::QueryFilter, Ops, RawNotification};
	use async_trait::async_trait;
	use sea_orm::DbErr;
	use std::sync::{
		atomic::{AtomicBool, Ordering},
		Mutex,
	};
	use tracing_test::traced_test;

	#[derive(Default)]
	struct MemoryStore {
		batches: Mutex<Vec<Vec<Event>>>,
		fail: AtomicBool,
	}

	#[async_trait]
	impl EventStore for MemoryStore {
		async fn insert_batch(&self, events: &[Event]) -> Result<(), StoreError> {
			if self.fail.load(Ordering::SeqCst) {
				return Err(DbErr::Custom("disk full".to_string()).into());
			}
			self.batches.lock().unwrap().push(events.to_vec());
			Ok(())
		}

		async fn query(&self, _: &QueryFilter) -> Result<Vec<Event>, StoreError> {
			Ok(Vec::new())
		}
	}

	fn setup(store: Arc<MemoryStore>) -> FlushPipeline {
		FlushPipeline::new(
			Arc::new(EventBuffer::new(10)),
			store,
			EventBus::new(16),
			Arc::new(PipelineMetrics::new()),
		)
	}

	fn push(pipeline: &FlushPipeline, name: &str) {
		pipeline
			.buffer()
			.append(classify(&RawNotification::new(format!("/tmp/{name}"), Ops::CREATE)));
	}

	#[tokio::test]
	async fn test_empty_flush_skips_store() {
		let store = Arc::new(MemoryStore::default());
		let pipeline = setup(Arc::clone(&store));

		assert!(matches!(
			pipeline.flush(FlushTrigger::Interval).await,
			FlushOutcome::Empty
		));
		assert!(store.batches.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_commit_emits_flushed() {
		let store = Arc::new(MemoryStore::default());
		let pipeline = setup(Arc::clone(&store));
		let mut events = pipeline.bus.subscribe();

		push(&pipeline, "a");
		push(&pipeline, "b");

		let outcome = pipeline.flush(FlushTrigger::Capacity).await;
		assert!(matches!(outcome, FlushOutcome::Committed { count: 2 }));
		assert!(pipeline.buffer().is_empty());
		assert_eq!(store.batches.lock().unwrap()[0].len(), 2);
		assert_eq!(
			events.recv().await.unwrap(),
			PipelineEvent::Flushed {
				trigger: FlushTrigger::Capacity,
				count: 2
			}
		);
	}

	#[tokio::test]
	#[traced_test]
	async fn test_failed_batch_is_dropped() {
		let store = Arc::new(MemoryStore::default());
		store.fail.store(true, Ordering::SeqCst);
		let pipeline = setup(Arc::clone(&store));

		push(&pipeline, "a");
		let outcome = pipeline.flush(FlushTrigger::Interval).await;

		assert!(matches!(outcome, FlushOutcome::Failed { count: 1, .. }));
		assert!(pipeline.buffer().is_empty());
		assert_eq!(pipeline.metrics.events_dropped.load(Ordering::Relaxed), 1);
		assert!(logs_contain("batch dropped"));

		store.fail.store(false, Ordering::SeqCst);
		push(&pipeline, "b");
		assert_eq!(pipeline.flush(FlushTrigger::Interval).await.count(), 1);

		let batches = store.batches.lock().unwrap();
		assert_eq!(batches.len(), 1);
		assert_eq!(batches[0][0].file_name, "b");
	}
}
