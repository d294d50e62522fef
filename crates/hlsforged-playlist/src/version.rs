//! Protocol version negotiation.
//!
//! A playlist starts at [`MIN_VERSION`] and is raised whenever a feature with
//! a higher requirement is used. There is no downgrade path.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Baseline `#EXT-X-VERSION` for a playlist that uses no optional features.
pub const MIN_VERSION: u8 = 1;

/// Required once any segment carries `#EXT-X-BYTERANGE`.
pub const BYTE_RANGE_VERSION: u8 = 4;

/// Required once any segment (or the playlist default) carries `#EXT-X-KEY`.
pub const KEY_VERSION: u8 = 5;

/// Monotonic protocol version owned by a single playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(u8);

impl ProtocolVersion {
    pub const MIN: Self = Self(MIN_VERSION);

    pub fn get(self) -> u8 {
        self.0
    }

    /// Store `max(current, candidate)` and return the result.
    pub fn raise(&mut self, candidate: u8) -> u8 {
        if self.0 < candidate {
            self.0 = candidate;
        }
        self.0
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared variant of [`ProtocolVersion`] that producers raise through `&self`.
#[derive(Debug)]
pub(crate) struct AtomicVersion(AtomicU8);

impl AtomicVersion {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(MIN_VERSION))
    }

    pub(crate) fn get(&self) -> ProtocolVersion {
        ProtocolVersion(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn raise(&self, candidate: u8) -> u8 {
        let previous = self.0.fetch_max(candidate, Ordering::AcqRel);
        previous.max(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_is_monotonic() {
        let mut v = ProtocolVersion::default();
        assert_eq!(v.get(), MIN_VERSION);
        assert_eq!(v.raise(KEY_VERSION), 5);
        assert_eq!(v.raise(BYTE_RANGE_VERSION), 5);
        assert_eq!(v.raise(MIN_VERSION), 5);
        assert_eq!(v.to_string(), "5");
    }

    #[test]
    fn test_atomic_raise_returns_max() {
        let v = AtomicVersion::new();
        assert_eq!(v.raise(BYTE_RANGE_VERSION), 4);
        assert_eq!(v.raise(2), 4);
        assert_eq!(v.raise(KEY_VERSION), 5);
        assert_eq!(v.get().get(), 5);
    }
}
