//! Filesystem notification source
//!
//! Wraps `notify`'s recommended watcher and turns its callbacks into two
//! unbounded channels: one carrying [`RawNotification`]s (a path plus the set of
//! [`Ops`] observed on it) and one carrying [`SourceError`]s.
//!
//! The source does not interpret notifications beyond flag extraction; choosing
//! a single event type out of the flag set is the consumer's job.

mod error;
mod event;
mod watcher;

pub use error::{FsWatcherError, SourceError};
pub use event::{Ops, RawNotification};
pub use watcher::{FsWatcher, NotificationSource};

pub type Result<T> = std::result::Result<T, FsWatcherError>;
