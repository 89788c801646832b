//! Pipeline event bus

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::{dispatch::PipelineState, trigger::FlushTrigger};

/// Notifications about the pipeline itself, for observers such as the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
	/// A batch was committed
	Flushed { trigger: FlushTrigger, count: usize },
	/// A batch failed to commit and was discarded
	FlushFailed {
		trigger: FlushTrigger,
		count: usize,
		error: String,
	},
	/// The notification source reported an error
	SourceError { message: String },
	StateChanged(PipelineState),
}

/// Broadcast bus for [`PipelineEvent`]s.
///
/// Emitting never blocks and never fails; events sent while nobody is
/// subscribed are lost. Slow subscribers lag rather than stall the pipeline.
#[derive(Debug, Clone)]
pub struct EventBus {
	sender: broadcast::Sender<PipelineEvent>,
}

impl EventBus {
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	pub fn emit(&self, event: PipelineEvent) {
		// Err only means there are no subscribers
		let _ = self.sender.send(event);
	}

	pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
		self.sender.subscribe()
	}

	pub fn subscriber_count(&self) -> usize {
		self.sender.receiver_count()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(1024)
	}
}
