use std::str::FromStr;

use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,

	pub timestamp: DateTime<Utc>,

	pub event_type: String,

	pub file_path: String,

	pub file_name: String,

	pub file_type: String,

	pub directory: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Event> for ActiveModel {
	fn from(event: &Event) -> Self {
		Self {
			// Ids are assigned by the store, never carried over
			id: NotSet,
			timestamp: Set(event.timestamp),
			event_type: Set(event.event_type.to_string()),
			file_path: Set(event.file_path.clone()),
			file_name: Set(event.file_name.clone()),
			file_type: Set(event.file_type.clone()),
			directory: Set(event.directory.clone()),
		}
	}
}

impl From<Model> for Event {
	fn from(model: Model) -> Self {
		Self {
			id: Some(model.id),
			timestamp: model.timestamp,
			event_type: EventType::from_str(&model.event_type).unwrap_or(EventType::Unknown),
			file_path: model.file_path,
			file_name: model.file_name,
			file_type: model.file_type,
			directory: model.directory,
		}
	}
}
