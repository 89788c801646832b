use std::path::PathBuf;

use fst_fs_watcher::FsWatcherError;
use sea_orm::DbErr;
use thiserror::Error;
use tokio::io;

/// Invalid pipeline parameters, rejected before anything starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
	#[error("At least one root path must be watched")]
	NoRoots,
	#[error("Flush interval must be greater than zero")]
	ZeroFlushInterval,
	#[error("Maximum buffer size must be greater than zero")]
	ZeroBufferSize,
}

/// Error type for event store operations
#[derive(Error, Debug)]
pub enum StoreError {
	#[error("Database error (error: {0})")]
	Database(#[from] DbErr),
	#[error("Failed to prepare database location (path: {1:?}); (error: {0})")]
	Io(io::Error, PathBuf),
}

/// Error type for starting the capture pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error("Watcher error (error: {0})")]
	Watcher(#[from] FsWatcherError),
}
