//! Time filter parsing

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

/// Parse a start bound: RFC 3339, or `-<duration>` meaning that long before
/// `now` (`-24h`, `-1h30m`, `-2days`).
pub fn parse_start(value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
	if let Ok(time) = parse_rfc3339(value) {
		return Ok(time);
	}

	let Some(relative) = value.strip_prefix('-') else {
		return Err(anyhow!(
			"invalid time format {value:?} (use RFC3339 or relative like -24h)"
		));
	};

	let duration = humantime::parse_duration(relative).with_context(|| {
		format!("invalid time format {value:?} (use RFC3339 or relative like -24h)")
	})?;
	let duration = chrono::Duration::from_std(duration)
		.with_context(|| format!("duration out of range: {value:?}"))?;

	now.checked_sub_signed(duration)
		.ok_or_else(|| anyhow!("duration out of range: {value:?}"))
}

/// Parse an end bound, RFC 3339 only.
pub fn parse_end(value: &str) -> Result<DateTime<Utc>> {
	parse_rfc3339(value).with_context(|| format!("invalid end time {value:?} (use RFC3339)"))
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
	DateTime::parse_from_rfc3339(value).map(|time| time.with_timezone(&Utc))
}
