//! Canonical event record

use chrono::{DateTime, Utc};
use fst_fs_watcher::Ops;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// `file_type` value for names without an extension separator.
pub const NO_EXTENSION: &str = "no-extension";

/// Kind of change recorded for a path.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	Serialize,
	Deserialize,
	Display,
	EnumString,
	AsRefStr,
	IntoStaticStr,
	EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum EventType {
	Create,
	Write,
	Remove,
	Rename,
	Chmod,
	Unknown,
}

impl EventType {
	/// Pick one type out of a flag set.
	///
	/// Flags are checked in a fixed order (create, write, remove, rename,
	/// chmod) and the first one set wins, so a notification never produces more
	/// than one event.
	pub fn from_ops(ops: Ops) -> Self {
		const PRIORITY: [(Ops, EventType); 5] = [
			(Ops::CREATE, EventType::Create),
			(Ops::WRITE, EventType::Write),
			(Ops::REMOVE, EventType::Remove),
			(Ops::RENAME, EventType::Rename),
			(Ops::CHMOD, EventType::Chmod),
		];

		PRIORITY
			.iter()
			.find(|(flag, _)| ops.contains(*flag))
			.map_or(Self::Unknown, |(_, event_type)| *event_type)
	}
}

/// One classified filesystem change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
	/// Store key, `None` until persisted
	pub id: Option<i32>,
	/// When the notification was classified
	pub timestamp: DateTime<Utc>,
	pub event_type: EventType,
	/// Path as reported by the source, not canonicalized
	pub file_path: String,
	pub file_name: String,
	pub file_type: String,
	pub directory: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;
	use strum::IntoEnumIterator;

	#[test]
	fn test_event_type_strings() {
		assert_eq!(EventType::Create.to_string(), "CREATE");
		assert_eq!(EventType::Chmod.as_ref(), "CHMOD");
		assert_eq!(EventType::from_str("RENAME").unwrap(), EventType::Rename);
		assert!(EventType::from_str("rename").is_err());

		for event_type in EventType::iter() {
			assert_eq!(EventType::from_str(event_type.as_ref()).unwrap(), event_type);
		}
	}

	#[test]
	fn test_priority_order() {
		assert_eq!(EventType::from_ops(Ops::all()), EventType::Create);
		assert_eq!(
			EventType::from_ops(Ops::WRITE | Ops::REMOVE | Ops::CHMOD),
			EventType::Write
		);
		assert_eq!(
			EventType::from_ops(Ops::RENAME | Ops::REMOVE),
			EventType::Remove
		);
		assert_eq!(EventType::from_ops(Ops::CHMOD | Ops::RENAME), EventType::Rename);
		assert_eq!(EventType::from_ops(Ops::CHMOD), EventType::Chmod);
		assert_eq!(EventType::from_ops(Ops::empty()), EventType::Unknown);
	}
}
