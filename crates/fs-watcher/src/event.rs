//! Raw notifications and their operation flags

use std::path::PathBuf;

use bitflags::bitflags;
use notify::{event::ModifyKind, Event, EventKind};

bitflags! {
	/// Operations observed on a path in a single notification.
	///
	/// Several flags may be set at once; the source never picks one for you.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Ops: u8 {
		const CREATE = 1;
		const WRITE  = 1 << 1;
		const REMOVE = 1 << 2;
		const RENAME = 1 << 3;
		const CHMOD  = 1 << 4;
	}
}

impl Ops {
	/// Flags carried by a `notify` event kind.
	///
	/// Returns `None` for access notifications, which describe reads and
	/// open/close calls rather than mutations.
	pub fn from_event_kind(kind: &EventKind) -> Option<Self> {
		match kind {
			EventKind::Access(_) => None,
			EventKind::Create(_) => Some(Self::CREATE),
			EventKind::Remove(_) => Some(Self::REMOVE),
			EventKind::Modify(ModifyKind::Name(_)) => Some(Self::RENAME),
			EventKind::Modify(ModifyKind::Metadata(_)) => Some(Self::CHMOD),
			EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any | ModifyKind::Other) => {
				Some(Self::WRITE)
			}
			EventKind::Any | EventKind::Other => Some(Self::empty()),
		}
	}
}

/// One change notification: the path exactly as the platform reported it and
/// the operations seen on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNotification {
	pub path: PathBuf,
	pub ops: Ops,
}

impl RawNotification {
	pub fn new(path: impl Into<PathBuf>, ops: Ops) -> Self {
		Self {
			path: path.into(),
			ops,
		}
	}

	/// Split a `notify` event into one notification per reported path.
	///
	/// A rename reported with both ends (`RenameMode::Both`) yields two
	/// notifications, old path first.
	pub fn from_notify(event: Event) -> Vec<Self> {
		let Some(ops) = Ops::from_event_kind(&event.kind) else {
			return Vec::new();
		};

		event
			.paths
			.into_iter()
			.map(|path| Self { path, ops })
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use notify::event::{
		AccessKind, AccessMode, CreateKind, DataChange, MetadataKind, RemoveKind, RenameMode,
	};

	fn event(kind: EventKind, paths: &[&str]) -> Event {
		paths
			.iter()
			.fold(Event::new(kind), |event, path| event.add_path(PathBuf::from(path)))
	}

	#[test]
	fn test_kind_to_ops() {
		let cases = [
			(EventKind::Create(CreateKind::File), Some(Ops::CREATE)),
			(EventKind::Create(CreateKind::Folder), Some(Ops::CREATE)),
			(
				EventKind::Modify(ModifyKind::Data(DataChange::Content)),
				Some(Ops::WRITE),
			),
			(EventKind::Modify(ModifyKind::Any), Some(Ops::WRITE)),
			(
				EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
				Some(Ops::RENAME),
			),
			(
				EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
				Some(Ops::CHMOD),
			),
			(EventKind::Remove(RemoveKind::File), Some(Ops::REMOVE)),
			(EventKind::Any, Some(Ops::empty())),
			(EventKind::Other, Some(Ops::empty())),
			(
				EventKind::Access(AccessKind::Close(AccessMode::Write)),
				None,
			),
		];

		for (kind, expected) in cases {
			assert_eq!(Ops::from_event_kind(&kind), expected, "{kind:?}");
		}
	}

	#[test]
	fn test_rename_both_fans_out_per_path() {
		let notifications = RawNotification::from_notify(event(
			EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
			&["/test/old.txt", "/test/new.txt"],
		));

		assert_eq!(
			notifications,
			vec![
				RawNotification::new("/test/old.txt", Ops::RENAME),
				RawNotification::new("/test/new.txt", Ops::RENAME),
			]
		);
	}

	#[test]
	fn test_access_events_are_dropped() {
		let notifications = RawNotification::from_notify(event(
			EventKind::Access(AccessKind::Close(AccessMode::Write)),
			&["/test/file.txt"],
		));

		assert!(notifications.is_empty());
	}

	#[test]
	fn test_event_without_paths_yields_nothing() {
		let notifications = RawNotification::from_notify(Event::new(EventKind::Create(
			CreateKind::File,
		)));

		assert!(notifications.is_empty());
	}
}
