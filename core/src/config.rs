//! Pipeline parameters

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters of one capture pipeline.
///
/// Only reachable through [`PipelineConfig::new`] or deserialization followed
/// by [`PipelineConfig::validate`]; defaults live with the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
	/// Directories registered with the notification source
	pub roots: Vec<PathBuf>,
	/// Period of the interval flush trigger
	#[serde(with = "duration_secs")]
	pub flush_interval: Duration,
	/// Buffer length at which a capacity flush fires
	pub max_buffer_size: usize,
	/// Watch subdirectories of each root
	#[serde(default = "default_recursive")]
	pub recursive: bool,
}

fn default_recursive() -> bool {
	true
}

impl PipelineConfig {
	pub fn new(
		roots: impl IntoIterator<Item = impl Into<PathBuf>>,
		flush_interval: Duration,
		max_buffer_size: usize,
	) -> Result<Self, ConfigError> {
		let config = Self {
			roots: roots.into_iter().map(Into::into).collect(),
			flush_interval,
			max_buffer_size,
			recursive: true,
		};
		config.validate()?;

		Ok(config)
	}

	#[must_use]
	pub fn with_recursive(mut self, recursive: bool) -> Self {
		self.recursive = recursive;
		self
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.roots.is_empty() {
			return Err(ConfigError::NoRoots);
		}
		if self.flush_interval.is_zero() {
			return Err(ConfigError::ZeroFlushInterval);
		}
		if self.max_buffer_size == 0 {
			return Err(ConfigError::ZeroBufferSize);
		}

		Ok(())
	}
}

mod duration_secs {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_f64(duration.as_secs_f64())
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		let secs = f64::deserialize(deserializer)?;
		Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
	}
}
