//! Raw notification to [`Event`]

use std::path::Path;

use chrono::{DateTime, Utc};
use fst_fs_watcher::RawNotification;

use crate::event::{Event, EventType, NO_EXTENSION};

/// Classify a notification, stamped with the current time.
pub fn classify(notification: &RawNotification) -> Event {
	classify_at(notification, Utc::now())
}

/// Classify a notification with an explicit timestamp.
pub fn classify_at(notification: &RawNotification, timestamp: DateTime<Utc>) -> Event {
	let path = notification.path.as_path();
	let file_name = base_name(path);

	Event {
		id: None,
		timestamp,
		event_type: EventType::from_ops(notification.ops),
		file_path: path.to_string_lossy().into_owned(),
		file_type: file_type_of(&file_name),
		directory: parent_dir(path),
		file_name,
	}
}

/// Extension of a base name, lower-cased and without the dot.
///
/// The split happens on the last `.` so `archive.tar.GZ` gives `gz` and
/// `.bashrc` gives `bashrc`. A trailing dot gives an empty string. Names with
/// no dot at all give [`NO_EXTENSION`].
pub fn file_type_of(file_name: &str) -> String {
	match file_name.rfind('.') {
		Some(idx) => file_name[idx + 1..].to_lowercase(),
		None => NO_EXTENSION.to_string(),
	}
}

fn base_name(path: &Path) -> String {
	match path.file_name() {
		Some(name) => name.to_string_lossy().into_owned(),
		// `/`, `..` and the empty path have no final component
		None => {
			let raw = path.to_string_lossy();
			let trimmed = raw.trim_end_matches('/');
			if trimmed.is_empty() && raw.starts_with('/') {
				"/".to_string()
			} else if raw.is_empty() {
				".".to_string()
			} else {
				trimmed.rsplit('/').next().unwrap_or(trimmed).to_string()
			}
		}
	}
}

/// Everything before the last separator, lexically cleaned.
fn parent_dir(path: &Path) -> String {
	let raw = path.to_string_lossy();
	let dir = raw.rfind('/').map_or("", |idx| &raw[..=idx]);
	clean(dir)
}

/// Collapse repeated separators, drop `.` and resolve `..` against the
/// component before it. Never touches the filesystem.
fn clean(path: &str) -> String {
	let rooted = path.starts_with('/');
	let mut parts: Vec<&str> = Vec::new();

	for part in path.split('/') {
		match part {
			"" | "." => {}
			".." => match parts.last() {
				Some(&last) if last != ".." => {
					parts.pop();
				}
				// `..` above the root stays at the root
				_ if rooted => {}
				_ => parts.push(".."),
			},
			part => parts.push(part),
		}
	}

	let joined = parts.join("/");
	if rooted {
		format!("/{joined}")
	} else if joined.is_empty() {
		".".to_string()
	} else {
		joined
	}
}
