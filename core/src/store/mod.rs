//! Durable event storage

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::StoreError, event::Event};

mod database;
pub mod entities;
pub mod migration;

pub use database::SqliteStore;

/// Persistence backend for classified events.
#[async_trait]
pub trait EventStore: Send + Sync {
	/// Persist every event of the batch in one transaction.
	///
	/// Either the whole batch becomes visible or none of it does. An empty
	/// batch is a no-op.
	async fn insert_batch(&self, events: &[Event]) -> Result<(), StoreError>;

	/// Events matching `filter`, newest first.
	async fn query(&self, filter: &QueryFilter) -> Result<Vec<Event>, StoreError>;
}

/// Criteria for [`EventStore::query`]. Unset fields don't filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
	/// Inclusive lower bound on the timestamp
	pub start_time: Option<DateTime<Utc>>,
	/// Inclusive upper bound on the timestamp
	pub end_time: Option<DateTime<Utc>>,
	/// Exact, case-sensitive match on the file type
	pub file_type: Option<String>,
	/// Raw string prefix of the directory
	pub directory: Option<String>,
	/// Maximum number of rows; zero means unbounded
	pub limit: Option<u64>,
}

impl QueryFilter {
	#[must_use]
	pub fn since(mut self, start_time: DateTime<Utc>) -> Self {
		self.start_time = Some(start_time);
		self
	}

	#[must_use]
	pub fn until(mut self, end_time: DateTime<Utc>) -> Self {
		self.end_time = Some(end_time);
		self
	}

	#[must_use]
	pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
		self.file_type = Some(file_type.into());
		self
	}

	#[must_use]
	pub fn directory(mut self, directory: impl Into<String>) -> Self {
		self.directory = Some(directory.into());
		self
	}

	#[must_use]
	pub fn limit(mut self, limit: u64) -> Self {
		self.limit = Some(limit);
		self
	}
}
