use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use fst_fs_watcher::{FsWatcher, NotificationSource};

use crate::{
	bus::PipelineEvent,
	config::PipelineConfig,
	dispatch::{DispatchLoop, PipelineState},
	error::PipelineError,
	metrics::PipelineMetrics,
	store::EventStore,
};

/// Platform watcher wired to a [`DispatchLoop`].
///
/// Construction registers every root; by the time [`TimelineWatcher::new`]
/// returns the pipeline is observing the filesystem and notifications queue
/// up until [`TimelineWatcher::run`] starts consuming them.
pub struct TimelineWatcher {
	watcher: FsWatcher,
	source: NotificationSource,
	dispatch: DispatchLoop,
}

impl TimelineWatcher {
	#[instrument(skip_all, fields(roots = ?config.roots, recursive = config.recursive), err)]
	pub fn new(config: PipelineConfig, store: Arc<dyn EventStore>) -> Result<Self, PipelineError> {
		config.validate()?;

		let (mut watcher, source) = FsWatcher::new()?;
		for root in &config.roots {
			watcher.watch(root, config.recursive)?;
		}

		info!("Watching {} root(s)", config.roots.len());

		Ok(Self {
			watcher,
			source,
			dispatch: DispatchLoop::new(&config, store),
		})
	}

	pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
		self.dispatch.subscribe()
	}

	pub fn state(&self) -> watch::Receiver<PipelineState> {
		self.dispatch.state()
	}

	pub fn metrics(&self) -> Arc<PipelineMetrics> {
		self.dispatch.metrics()
	}

	/// Drive the pipeline until `shutdown` is cancelled, then flush what is
	/// left. The platform watcher is released only after the final flush.
	pub async fn run(self, shutdown: CancellationToken) {
		let Self {
			watcher,
			source,
			dispatch,
		} = self;

		dispatch.run(source, shutdown).await;

		drop(watcher);
	}
}
