//! Flush triggers

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;

/// What caused a flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FlushTrigger {
	/// The buffer reached its capacity on append
	Capacity,
	/// The periodic timer fired
	Interval,
	/// The pipeline is stopping
	Shutdown,
}

/// Periodic tick stream for the interval trigger.
///
/// The first tick arrives one full period after creation. Ticks missed while
/// a flush is running are not replayed in a burst; the schedule slides
/// instead.
pub fn interval_ticks(period: Duration) -> IntervalStream {
	let mut interval = interval_at(Instant::now() + period, period);
	interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
	IntervalStream::new(interval)
}
