//! Bounded segment queue between producers and the renderer.
//!
//! The queue reports "full" one slot before its physical capacity, so a
//! producer is rejected instead of ever waiting for room. Pushes never block;
//! draining is a best-effort sweep rather than a snapshot.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::num::NonZeroU16;

use crate::error::{Error, Result};
use crate::types::Segment;

/// Fixed-capacity FIFO of segments that have not been rendered yet.
#[derive(Debug)]
pub(crate) struct SegmentQueue {
    inner: Mutex<VecDeque<Segment>>,
    capacity: usize,
}

impl SegmentQueue {
    /// Create the queue backing a sliding window of `window_size` segments.
    ///
    /// Capacity is `2 * window_size`; pushes are rejected from
    /// `2 * window_size - 1` pending segments onwards.
    pub(crate) fn for_window(window_size: NonZeroU16) -> Self {
        let capacity = usize::from(window_size.get()) * 2;
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Physical capacity.
    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pending count at which pushes start failing.
    pub(crate) fn limit(&self) -> usize {
        self.capacity - 1
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Enqueue `segment`, or fail with [`Error::QueueFull`] at the limit.
    #[cfg(test)]
    fn try_push(&self, segment: Segment) -> Result<()> {
        self.try_push_with(segment, |_| {})
    }

    /// Like `try_push`, running `on_accept` after the
    /// capacity check and before the segment becomes visible to drains.
    ///
    /// `on_accept` runs with the queue locked and must not touch the queue.
    pub(crate) fn try_push_with<F>(&self, segment: Segment, on_accept: F) -> Result<()>
    where
        F: FnOnce(&Segment),
    {
        let mut queue = self.inner.lock();
        if queue.len() >= self.limit() {
            return Err(Error::QueueFull {
                pending: queue.len(),
                limit: self.limit(),
            });
        }
        on_accept(&segment);
        queue.push_back(segment);
        Ok(())
    }

    /// Remove the oldest segment, if any.
    pub(crate) fn pop(&self) -> Option<Segment> {
        self.inner.lock().pop_front()
    }

    /// Remove every segment present at the moment of each removal attempt.
    ///
    /// The length is sampled once and at most `length + 1` removals are
    /// attempted, each taking the lock on its own, so producers can interleave.
    /// Segments pushed during the sweep may or may not be picked up.
    pub(crate) fn drain_available(&self) -> Vec<Segment> {
        let sampled = self.len();
        let mut drained = Vec::with_capacity(sampled);
        for _ in 0..=sampled {
            match self.pop() {
                Some(segment) => drained.push(segment),
                None => break,
            }
        }
        drained
    }
}
