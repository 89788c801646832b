//! In-memory event buffer

use std::{
	mem,
	sync::{Mutex, MutexGuard, PoisonError},
};

use crate::event::Event;

/// Ordered, capacity-bounded event buffer.
///
/// Every operation takes the same lock, so an append and its capacity check
/// are never split by a concurrent drain. The capacity is a trigger point, not
/// a hard limit: appending past it still succeeds.
#[derive(Debug)]
pub struct EventBuffer {
	inner: Mutex<Vec<Event>>,
	capacity: usize,
}

impl EventBuffer {
	pub fn new(capacity: usize) -> Self {
		Self {
			inner: Mutex::new(Vec::with_capacity(capacity)),
			capacity,
		}
	}

	/// Append an event, returning `true` when the buffer has reached capacity.
	pub fn append(&self, event: Event) -> bool {
		let mut events = self.lock();
		events.push(event);
		events.len() >= self.capacity
	}

	/// Take every buffered event, oldest first, leaving the buffer empty.
	pub fn drain(&self) -> Vec<Event> {
		mem::take(&mut *self.lock())
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
		// A panicking holder can't leave the Vec half-written
		self.inner.lock().unwrap_or_else(PoisonError::into_inner)
	}
}
