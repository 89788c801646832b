use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while setting up the watcher. These are fatal to startup.
#[derive(Error, Debug)]
pub enum FsWatcherError {
	#[error("unable to create filesystem watcher: {0}")]
	Create(#[source] notify::Error),
	#[error("unable to watch path (path: {path:?}): {source}")]
	Watch {
		path: PathBuf,
		#[source]
		source: notify::Error,
	},
	#[error("unable to unwatch path (path: {path:?}): {source}")]
	Unwatch {
		path: PathBuf,
		#[source]
		source: notify::Error,
	},
}

/// A malfunction reported by the notification mechanism for an already
/// registered path. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SourceError {
	pub message: String,
	pub paths: Vec<PathBuf>,
}

impl SourceError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			paths: Vec::new(),
		}
	}

	pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
		self.paths = paths;
		self
	}
}

impl From<notify::Error> for SourceError {
	fn from(mut err: notify::Error) -> Self {
		// Display appends the paths when present; keep them separate.
		let paths = std::mem::take(&mut err.paths);
		Self {
			message: err.to_string(),
			paths,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn source_error_from_notify_keeps_paths() {
		let err = notify::Error::generic("queue overflow").add_path(PathBuf::from("/tmp/a"));
		let source: SourceError = err.into();

		assert_eq!(source.message, "queue overflow");
		assert_eq!(source.paths, vec![PathBuf::from("/tmp/a")]);
		assert_eq!(source.to_string(), "queue overflow");
	}
}
