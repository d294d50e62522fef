//! Error types for hlsforged-playlist.

use thiserror::Error;

/// Result type for hlsforged-playlist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for hlsforged-playlist operations.
///
/// Rendering never fails; the only recoverable condition is backpressure from
/// a sliding playlist's segment queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The sliding window's pending queue is at its reject threshold.
    #[error("Segment queue full: {pending} pending (limit {limit})")]
    QueueFull {
        /// Segments waiting to be rendered when the append was attempted.
        pending: usize,
        /// Reject threshold (`2 * window_size - 1`).
        limit: usize,
    },
}

impl Error {
    /// Whether the caller may retry the same append later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::QueueFull { .. })
    }
}
