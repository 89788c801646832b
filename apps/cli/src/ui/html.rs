//! Static HTML export

use std::{collections::BTreeMap, fmt::Display, fs, path::Path};

use anyhow::{Context, Result};
use askama::Template;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use fst_core::Event;

#[derive(Template)]
#[template(path = "timeline.html")]
struct TimelinePage {
	generated_at: String,
	total_events: usize,
	groups: Vec<DateGroup>,
}

struct DateGroup {
	date: String,
	events: Vec<EventRow>,
}

struct EventRow {
	time: String,
	event_type: &'static str,
	file_path: String,
	file_type: String,
}

/// Render events into a standalone HTML page, one section per calendar date
/// in ascending order. Text is HTML-escaped.
pub fn render<Tz>(events: &[Event], generated_at: DateTime<Utc>, tz: &Tz) -> Result<String>
where
	Tz: TimeZone,
	Tz::Offset: Display,
{
	let mut by_date: BTreeMap<NaiveDate, Vec<EventRow>> = BTreeMap::new();
	for event in events {
		let local = event.timestamp.with_timezone(tz);
		by_date.entry(local.date_naive()).or_default().push(EventRow {
			time: local.format("%H:%M:%S").to_string(),
			event_type: event_type_name(event),
			file_path: event.file_path.clone(),
			file_type: event.file_type.clone(),
		});
	}

	let page = TimelinePage {
		generated_at: generated_at
			.with_timezone(tz)
			.format("%Y-%m-%d %H:%M:%S")
			.to_string(),
		total_events: events.len(),
		groups: by_date
			.into_iter()
			.map(|(date, events)| DateGroup {
				date: date.format("%Y-%m-%d").to_string(),
				events,
			})
			.collect(),
	};

	page.render().context("Failed to render timeline template")
}

/// Write the timeline page for `events` to `path`, in the local timezone.
pub fn export(events: &[Event], path: impl AsRef<Path>) -> Result<()> {
	let path = path.as_ref();
	let html = render(events, Utc::now(), &Local)?;

	fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}

fn event_type_name(event: &Event) -> &'static str {
	event.event_type.into()
}
