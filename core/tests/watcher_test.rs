//! End to end: real filesystem, real watcher, recording store

mod common;

use std::{path::PathBuf, time::Duration};

use common::RecordingStore;
use fst_core::{
	CancellationToken, ConfigError, EventType, PipelineConfig, PipelineError, PipelineState,
	TimelineWatcher,
};
use fst_fs_watcher::FsWatcherError;
use tokio::time::{sleep, timeout};

#[tokio::test]
async fn created_file_is_persisted_on_shutdown() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path().canonicalize().unwrap();
	let store = RecordingStore::new();

	let config = PipelineConfig::new([&root], Duration::from_secs(3600), 1000).unwrap();
	let watcher = TimelineWatcher::new(config, store.clone()).unwrap();
	let state = watcher.state();

	let shutdown = CancellationToken::new();
	let handle = tokio::spawn(watcher.run(shutdown.clone()));

	let file = root.join("notes.md");
	tokio::fs::write(&file, b"hello").await.unwrap();

	// Give the platform watcher time to report
	sleep(Duration::from_millis(500)).await;
	shutdown.cancel();
	timeout(Duration::from_secs(10), handle)
		.await
		.unwrap()
		.unwrap();

	assert_eq!(*state.borrow(), PipelineState::Stopped);

	let events: Vec<_> = store.batches().into_iter().flatten().collect();
	let created = events
		.iter()
		.find(|e| e.file_name == "notes.md" && e.event_type == EventType::Create)
		.expect("no create event recorded");
	assert_eq!(created.file_type, "md");
	assert_eq!(PathBuf::from(&created.directory), root);
}

#[tokio::test]
async fn missing_root_fails_startup() {
	let dir = tempfile::tempdir().unwrap();
	let missing = dir.path().join("does-not-exist");

	let config = PipelineConfig::new([&missing], Duration::from_secs(5), 100).unwrap();
	let result = TimelineWatcher::new(config, RecordingStore::new());

	match result {
		Err(PipelineError::Watcher(FsWatcherError::Watch { path, .. })) => assert_eq!(path, missing),
		Err(e) => panic!("unexpected error: {e}"),
		Ok(_) => panic!("watching a missing root should fail"),
	}
}

#[tokio::test]
async fn invalid_deserialized_config_is_rejected() {
	let config = PipelineConfig {
		roots: Vec::new(),
		flush_interval: Duration::from_secs(5),
		max_buffer_size: 100,
		recursive: true,
	};

	assert!(matches!(
		TimelineWatcher::new(config, RecordingStore::new()),
		Err(PipelineError::Config(ConfigError::NoRoots))
	));
}
