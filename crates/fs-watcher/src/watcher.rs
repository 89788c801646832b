use std::path::{Path, PathBuf};

use async_channel as chan;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{error, instrument, trace, warn};

use crate::{FsWatcherError, RawNotification, Result, SourceError};

/// Receiving ends of the watcher's two streams.
///
/// Both channels are unbounded so the platform callback never blocks. They
/// close once the owning [`FsWatcher`] is dropped.
#[derive(Debug, Clone)]
pub struct NotificationSource {
	pub notifications: chan::Receiver<RawNotification>,
	pub errors: chan::Receiver<SourceError>,
}

impl NotificationSource {
	/// Build a source from plain channels, for feeding notifications from
	/// something other than the platform watcher.
	pub fn channel() -> (
		chan::Sender<RawNotification>,
		chan::Sender<SourceError>,
		Self,
	) {
		let (notifications_tx, notifications) = chan::unbounded();
		let (errors_tx, errors) = chan::unbounded();

		(
			notifications_tx,
			errors_tx,
			Self {
				notifications,
				errors,
			},
		)
	}
}

/// Platform filesystem watcher feeding a [`NotificationSource`].
#[derive(Debug)]
pub struct FsWatcher {
	watcher: RecommendedWatcher,
	watched: Vec<PathBuf>,
}

impl FsWatcher {
	/// Create the platform watcher. No path is observed until [`FsWatcher::watch`]
	/// is called.
	pub fn new() -> Result<(Self, NotificationSource)> {
		let (notifications_tx, errors_tx, source) = NotificationSource::channel();

		let watcher = RecommendedWatcher::new(
			move |result: notify::Result<Event>| match result {
				Ok(event) => {
					if event.need_rescan() {
						let err = SourceError::new("events were dropped, rescan needed")
							.with_paths(event.paths.clone());
						forward(&errors_tx, err);
					}

					for notification in RawNotification::from_notify(event) {
						forward(&notifications_tx, notification);
					}
				}
				Err(e) => forward(&errors_tx, SourceError::from(e)),
			},
			Config::default(),
		)
		.map_err(FsWatcherError::Create)?;

		Ok((
			Self {
				watcher,
				watched: Vec::new(),
			},
			source,
		))
	}

	/// Start observing `path`. Failure here means the path will never produce
	/// notifications.
	#[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
	pub fn watch(&mut self, path: impl AsRef<Path>, recursive: bool) -> Result<()> {
		let path = path.as_ref();
		let mode = if recursive {
			RecursiveMode::Recursive
		} else {
			RecursiveMode::NonRecursive
		};

		self.watcher
			.watch(path, mode)
			.map_err(|source| FsWatcherError::Watch {
				path: path.to_path_buf(),
				source,
			})?;

		self.watched.push(path.to_path_buf());
		trace!("Now watching path");

		Ok(())
	}

	#[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
	pub fn unwatch(&mut self, path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();

		self.watcher
			.unwatch(path)
			.map_err(|source| FsWatcherError::Unwatch {
				path: path.to_path_buf(),
				source,
			})?;

		self.watched.retain(|watched| watched != path);
		trace!("Stopped watching path");

		Ok(())
	}

	pub fn watched_paths(&self) -> &[PathBuf] {
		&self.watched
	}
}

fn forward<T>(tx: &chan::Sender<T>, item: T) {
	if tx.is_closed() {
		warn!("Tried to send filesystem notification to a closed channel;");
		return;
	}

	// Unbounded channel: this never waits.
	if tx.send_blocking(item).is_err() {
		error!("Unable to forward filesystem notification;");
	}
}
