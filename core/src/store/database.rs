use std::{path::Path, time::Duration};

use async_trait::async_trait;
use sea_orm::{
	ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryFilter as _,
	QueryOrder, QuerySelect, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use tokio::fs;
use tracing::{debug, info, instrument};

use super::{
	entities::event::{self, ActiveModel, Column},
	migration::Migrator,
	EventStore, QueryFilter,
};
use crate::{error::StoreError, event::Event};

/// Rows per INSERT statement, kept well under SQLite's bound parameter limit
const INSERT_CHUNK_SIZE: usize = 100;

/// SQLite-backed [`EventStore`]
#[derive(Debug, Clone)]
pub struct SqliteStore {
	conn: DatabaseConnection,
}

impl SqliteStore {
	/// Open the database at `path`, creating it and its schema when missing.
	#[instrument(fields(path = %path.as_ref().display()), skip(path), err)]
	pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
		let path = path.as_ref();

		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)
				.await
				.map_err(|e| StoreError::Io(e, parent.to_path_buf()))?;
		}

		let mut opt = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
		opt.max_connections(4)
			.min_connections(1)
			.connect_timeout(Duration::from_secs(8))
			.sqlx_logging(false);

		let conn = Database::connect(opt).await?;
		Migrator::up(&conn, None).await?;

		info!("Opened event database");

		Ok(Self { conn })
	}

	pub async fn close(self) -> Result<(), StoreError> {
		self.conn.close().await.map_err(Into::into)
	}
}

#[async_trait]
impl EventStore for SqliteStore {
	async fn insert_batch(&self, events: &[Event]) -> Result<(), StoreError> {
		if events.is_empty() {
			return Ok(());
		}

		let txn = self.conn.begin().await?;
		for chunk in events.chunks(INSERT_CHUNK_SIZE) {
			event::Entity::insert_many(chunk.iter().map(ActiveModel::from))
				.exec(&txn)
				.await?;
		}
		txn.commit().await?;

		debug!(count = events.len(), "Inserted event batch;");

		Ok(())
	}

	async fn query(&self, filter: &QueryFilter) -> Result<Vec<Event>, StoreError> {
		let mut select = event::Entity::find();

		if let Some(start_time) = filter.start_time {
			select = select.filter(Column::Timestamp.gte(start_time));
		}
		if let Some(end_time) = filter.end_time {
			select = select.filter(Column::Timestamp.lte(end_time));
		}
		if let Some(file_type) = &filter.file_type {
			select = select.filter(Column::FileType.eq(file_type.as_str()));
		}
		if let Some(directory) = &filter.directory {
			select = select.filter(Column::Directory.starts_with(directory.as_str()));
		}
		if let Some(limit) = filter.limit.filter(|limit| *limit > 0) {
			select = select.limit(limit);
		}

		let models = select
			.order_by_desc(Column::Timestamp)
			.order_by_desc(Column::Id)
			.all(&self.conn)
			.await?;

		Ok(models.into_iter().map(Event::from).collect())
	}
}
