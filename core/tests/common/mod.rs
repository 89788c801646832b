#![allow(dead_code)]

use std::{
	sync::{
		atomic::{AtomicBool, AtomicUsize, Ordering},
		Arc, Mutex,
	},
	time::Duration,
};

use async_trait::async_trait;
use fst_core::{
	DispatchLoop, Event, EventStore, NotificationSource, Ops, PipelineConfig, PipelineEvent,
	QueryFilter, RawNotification, StoreError,
};
use sea_orm::DbErr;
use tokio::{sync::broadcast, time::timeout};

/// In-memory store recording every committed batch
#[derive(Default)]
pub struct RecordingStore {
	batches: Mutex<Vec<Vec<Event>>>,
	insert_calls: AtomicUsize,
	fail_next: AtomicBool,
}

impl RecordingStore {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Make the next `insert_batch` call fail
	pub fn fail_next(&self) {
		self.fail_next.store(true, Ordering::SeqCst);
	}

	pub fn batches(&self) -> Vec<Vec<Event>> {
		self.batches.lock().unwrap().clone()
	}

	pub fn insert_calls(&self) -> usize {
		self.insert_calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl EventStore for RecordingStore {
	async fn insert_batch(&self, events: &[Event]) -> Result<(), StoreError> {
		self.insert_calls.fetch_add(1, Ordering::SeqCst);

		if self.fail_next.swap(false, Ordering::SeqCst) {
			return Err(DbErr::Custom("database is locked".to_string()).into());
		}

		if !events.is_empty() {
			self.batches.lock().unwrap().push(events.to_vec());
		}

		Ok(())
	}

	async fn query(&self, filter: &QueryFilter) -> Result<Vec<Event>, StoreError> {
		let mut events: Vec<_> = self.batches().into_iter().flatten().collect();
		events.reverse();
		if let Some(limit) = filter.limit.filter(|l| *l > 0) {
			events.truncate(limit as usize);
		}
		Ok(events)
	}
}

pub struct Harness {
	pub dispatch: DispatchLoop,
	pub notifications: async_channel::Sender<RawNotification>,
	pub errors: async_channel::Sender<fst_core::SourceError>,
	pub source: NotificationSource,
	pub bus: broadcast::Receiver<PipelineEvent>,
}

pub fn harness(store: Arc<RecordingStore>, interval: Duration, capacity: usize) -> Harness {
	let config = PipelineConfig::new(["/watched"], interval, capacity).unwrap();
	let dispatch = DispatchLoop::new(&config, store);
	let bus = dispatch.subscribe();
	let (notifications, errors, source) = NotificationSource::channel();

	Harness {
		dispatch,
		notifications,
		errors,
		source,
		bus,
	}
}

pub fn notification(path: &str, ops: Ops) -> RawNotification {
	RawNotification::new(path, ops)
}

/// Next flush related bus event, skipping state changes
pub async fn next_flush(bus: &mut broadcast::Receiver<PipelineEvent>) -> PipelineEvent {
	timeout(Duration::from_secs(10), async {
		loop {
			match bus.recv().await.unwrap() {
				event @ (PipelineEvent::Flushed { .. } | PipelineEvent::FlushFailed { .. }) => {
					return event
				}
				_ => continue,
			}
		}
	})
	.await
	.expect("timed out waiting for a flush")
}
