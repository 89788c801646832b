//! Create the events table and its lookup indexes

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.create_table(
				Table::create()
					.table(Events::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Events::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(Events::Timestamp).timestamp().not_null())
					.col(ColumnDef::new(Events::EventType).string().not_null())
					.col(ColumnDef::new(Events::FilePath).text().not_null())
					.col(ColumnDef::new(Events::FileName).text().not_null())
					.col(ColumnDef::new(Events::FileType).string().not_null())
					.col(ColumnDef::new(Events::Directory).text().not_null())
					.to_owned(),
			)
			.await?;

		for (name, column) in [
			("idx_events_timestamp", Events::Timestamp),
			("idx_events_directory", Events::Directory),
			("idx_events_file_type", Events::FileType),
		] {
			manager
				.create_index(
					Index::create()
						.name(name)
						.table(Events::Table)
						.col(column)
						.if_not_exists()
						.to_owned(),
				)
				.await?;
		}

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.drop_table(Table::drop().table(Events::Table).to_owned())
			.await
	}
}

#[derive(DeriveIden)]
enum Events {
	Table,
	Id,
	Timestamp,
	EventType,
	FilePath,
	FileName,
	FileType,
	Directory,
}
