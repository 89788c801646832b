//! Metrics for the capture pipeline

use std::{
	sync::atomic::{AtomicU64, Ordering},
	time::Duration,
};

use tracing::info;

/// Counters updated by the dispatch loop and the flush pipeline
#[derive(Debug, Default)]
pub struct PipelineMetrics {
	/// Notifications classified and buffered
	pub events_received: AtomicU64,
	/// Errors reported by the notification source
	pub source_errors: AtomicU64,
	/// Batches committed
	pub batches_flushed: AtomicU64,
	/// Events committed across all batches
	pub events_flushed: AtomicU64,
	/// Batches whose commit failed
	pub batches_failed: AtomicU64,
	/// Events discarded with failed batches
	pub events_dropped: AtomicU64,
	/// Largest batch handed to the store
	pub max_batch_size: AtomicU64,
	/// Last flush duration, in milliseconds
	pub last_flush_duration: AtomicU64,
	/// Maximum flush duration, in milliseconds
	pub max_flush_duration: AtomicU64,
}

impl PipelineMetrics {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record_event_received(&self) {
		self.events_received.fetch_add(1, Ordering::Relaxed);
	}

	pub fn record_source_error(&self) {
		self.source_errors.fetch_add(1, Ordering::Relaxed);
	}

	/// Record a committed batch
	pub fn record_flush(&self, batch_size: usize, duration: Duration) {
		self.batches_flushed.fetch_add(1, Ordering::Relaxed);
		self.events_flushed
			.fetch_add(batch_size as u64, Ordering::Relaxed);
		self.record_batch(batch_size, duration);
	}

	/// Record a batch that failed and was dropped
	pub fn record_flush_failure(&self, batch_size: usize, duration: Duration) {
		self.batches_failed.fetch_add(1, Ordering::Relaxed);
		self.events_dropped
			.fetch_add(batch_size as u64, Ordering::Relaxed);
		self.record_batch(batch_size, duration);
	}

	/// Average committed batch size
	pub fn average_batch_size(&self) -> f64 {
		let batches = self.batches_flushed.load(Ordering::Relaxed);
		if batches == 0 {
			0.0
		} else {
			self.events_flushed.load(Ordering::Relaxed) as f64 / batches as f64
		}
	}

	pub fn log_metrics(&self) {
		info!(
			events_received = self.events_received.load(Ordering::Relaxed),
			source_errors = self.source_errors.load(Ordering::Relaxed),
			batches_flushed = self.batches_flushed.load(Ordering::Relaxed),
			events_flushed = self.events_flushed.load(Ordering::Relaxed),
			batches_failed = self.batches_failed.load(Ordering::Relaxed),
			events_dropped = self.events_dropped.load(Ordering::Relaxed),
			avg_batch_size = self.average_batch_size(),
			max_batch_size = self.max_batch_size.load(Ordering::Relaxed),
			max_flush_duration_ms = self.max_flush_duration.load(Ordering::Relaxed),
			"Pipeline metrics;"
		);
	}

	fn record_batch(&self, batch_size: usize, duration: Duration) {
		let duration_ms = duration.as_millis() as u64;
		self.last_flush_duration
			.store(duration_ms, Ordering::Relaxed);

		store_max(&self.max_flush_duration, duration_ms);
		store_max(&self.max_batch_size, batch_size as u64);
	}
}

fn store_max(target: &AtomicU64, value: u64) {
	let mut current_max = target.load(Ordering::Relaxed);
	while value > current_max {
		match target.compare_exchange_weak(
			current_max,
			value,
			Ordering::Relaxed,
			Ordering::Relaxed,
		) {
			Ok(_) => break,
			Err(val) => current_max = val,
		}
	}
}
