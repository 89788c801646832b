//! fs-timeline core
//!
//! Captures filesystem notifications, classifies each into an [`Event`],
//! buffers them in memory and persists them in batches.
//!
//! ## Pipeline
//!
//! - **Classifier** (`classifier`): raw notification to [`Event`], pure
//! - **Buffer** (`buffer`): ordered, lock-protected, capacity bounded
//! - **Triggers** (`trigger`): capacity and interval flush triggers
//! - **Flush pipeline** (`flush`): drains the buffer into one store transaction
//! - **Dispatch loop** (`dispatch`): multiplexes notifications, source errors,
//!   timer ticks and shutdown
//! - **Timeline watcher** (`watcher`): registers roots, then runs the loop
//!
//! Batches that fail to commit are reported and dropped; nothing is retried.

pub mod buffer;
pub mod bus;
pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod flush;
pub mod metrics;
pub mod store;
pub mod trigger;
pub mod watcher;

pub use buffer::EventBuffer;
pub use bus::{EventBus, PipelineEvent};
pub use classifier::{classify, classify_at, file_type_of};
pub use config::PipelineConfig;
pub use dispatch::{DispatchLoop, PipelineState};
pub use error::{ConfigError, PipelineError, StoreError};
pub use event::{Event, EventType, NO_EXTENSION};
pub use flush::{FlushOutcome, FlushPipeline};
pub use metrics::PipelineMetrics;
pub use store::{EventStore, QueryFilter, SqliteStore};
pub use trigger::FlushTrigger;
pub use watcher::TimelineWatcher;

pub use fst_fs_watcher::{NotificationSource, Ops, RawNotification, SourceError};
pub use tokio_util::sync::CancellationToken;
