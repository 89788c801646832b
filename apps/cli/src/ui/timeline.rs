//! Plain text timeline

use std::fmt::Display;

use chrono::{Local, TimeZone};
use colored::{ColoredString, Colorize};
use fst_core::{Event, EventType};

/// Renders chronologically ordered events as a text timeline.
#[derive(Debug, Clone, Copy)]
pub struct TimelineRenderer {
	color: bool,
}

impl TimelineRenderer {
	pub fn new(color: bool) -> Self {
		Self { color }
	}

	/// Render in the local timezone.
	pub fn render(&self, events: &[Event]) -> String {
		self.render_in(events, &Local)
	}

	pub fn render_in<Tz>(&self, events: &[Event], tz: &Tz) -> String
	where
		Tz: TimeZone,
		Tz::Offset: Display,
	{
		if events.is_empty() {
			return "No events found.\n".to_string();
		}

		let mut out = String::new();
		out.push_str(&self.header());
		out.push('\n');

		let mut current_date = String::new();
		for event in events {
			let local = event.timestamp.with_timezone(tz);

			let date = local.format("%Y-%m-%d").to_string();
			if date != current_date {
				out.push_str(&self.date_header(&date));
				out.push('\n');
				current_date = date;
			}

			out.push_str(&format!(
				"    {}  {}  {} [{}]\n",
				local.format("%H:%M:%S"),
				self.event_type(event.event_type),
				event.file_path,
				event.file_type
			));
		}

		out.push_str(&self.footer(events.len()));
		out
	}

	fn header(&self) -> String {
		if self.color {
			"═══ File System Timeline ═══".cyan().bold().to_string()
		} else {
			"=== File System Timeline ===".to_string()
		}
	}

	fn date_header(&self, date: &str) -> String {
		if self.color {
			format!("  {}", format!("▸ {date}").yellow().bold())
		} else {
			format!("  > {date}")
		}
	}

	fn event_type(&self, event_type: EventType) -> String {
		let padded = format!("{:<7}", event_type.as_ref());
		if !self.color {
			return padded;
		}

		let colored: ColoredString = match event_type {
			EventType::Create => padded.green(),
			EventType::Write => padded.blue(),
			EventType::Remove => padded.red(),
			EventType::Rename => padded.magenta(),
			EventType::Chmod => padded.yellow(),
			EventType::Unknown => padded.white(),
		};
		colored.to_string()
	}

	fn footer(&self, count: usize) -> String {
		let footer = format!("\nTotal events: {count}\n");
		if self.color {
			footer.cyan().to_string()
		} else {
			footer
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{DateTime, Utc};
	use fst_core::{classify_at, Ops, RawNotification};
	use pretty_assertions::assert_eq;

	fn at(path: &str, ops: Ops, timestamp: &str) -> Event {
		let timestamp = DateTime::parse_from_rfc3339(timestamp)
			.unwrap()
			.with_timezone(&Utc);
		classify_at(&RawNotification::new(path, ops), timestamp)
	}

	#[test]
	fn test_empty_input() {
		assert_eq!(
			TimelineRenderer::new(false).render_in(&[], &Utc),
			"No events found.\n"
		);
	}

	#[test]
	fn test_plain_rendering_groups_by_date() {
		let events = [
			at("/a/x.txt", Ops::CREATE, "2024-05-01T23:59:58Z"),
			at("/a/y", Ops::CHMOD, "2024-05-01T23:59:59Z"),
			at("/b/z.RS", Ops::REMOVE, "2024-05-02T00:00:01Z"),
		];

		let rendered = TimelineRenderer::new(false).render_in(&events, &Utc);

		assert_eq!(
			rendered,
			"=== File System Timeline ===\n\
			 \x20 > 2024-05-01\n\
			 \x20   23:59:58  CREATE   /a/x.txt [txt]\n\
			 \x20   23:59:59  CHMOD    /a/y [no-extension]\n\
			 \x20 > 2024-05-02\n\
			 \x20   00:00:01  REMOVE   /b/z.RS [rs]\n\
			 \n\
			 Total events: 3\n"
		);
	}

	#[test]
	fn test_dates_follow_the_timezone() {
		let events = [at("/late/night.log", Ops::WRITE, "2024-05-01T23:30:00Z")];
		let tz = chrono::FixedOffset::east_opt(2 * 3600).unwrap();

		let rendered = TimelineRenderer::new(false).render_in(&events, &tz);

		assert!(rendered.contains("  > 2024-05-02\n"));
		assert!(rendered.contains("    01:30:00  WRITE    /late/night.log [log]\n"));
	}

	#[test]
	fn test_colored_output_keeps_text() {
		colored::control::set_override(true);
		let events = [at("/c/d.md", Ops::RENAME, "2024-05-01T10:00:00Z")];

		let rendered = TimelineRenderer::new(true).render_in(&events, &Utc);

		assert!(rendered.contains("\x1b["));
		assert!(rendered.contains("RENAME "));
		assert!(rendered.contains("/c/d.md [md]"));
		assert!(rendered.contains("Total events: 1"));
	}
}
